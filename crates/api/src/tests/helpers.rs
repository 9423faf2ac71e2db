// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reserva::State;
use reserva_audit::Cause;
use reserva_domain::{Participant, Role, Room, RoomType, SlotCatalog, TimeSlot};
use time::{Date, PrimitiveDateTime, Time};

pub const ORGANIZER: i64 = 10;
pub const INVITEE: i64 = 11;
pub const OUTSIDER: i64 = 12;

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Participant request"))
}

/// Six hourly slots, 08:00 through 14:00.
pub fn create_test_state() -> State {
    let slots: Vec<TimeSlot> = (0..6u32)
        .map(|i| {
            #[allow(clippy::cast_possible_truncation)]
            let hour = 8 + i as u8;
            TimeSlot::new(
                i64::from(i + 1),
                i + 1,
                Time::from_hms(hour, 0, 0).unwrap(),
                Time::from_hms(hour + 1, 0, 0).unwrap(),
                Some(format!("{hour:02}:00 - {:02}:00", hour + 1)),
            )
            .unwrap()
        })
        .collect();

    State::new(
        SlotCatalog::new(slots).unwrap(),
        vec![
            Room::new(1, 1, String::from("Study Room A"), RoomType::Free, 4),
            Room::new(2, 1, String::from("Seminar Room B"), RoomType::Faculty, 12),
        ],
        vec![
            Participant::new(
                ORGANIZER,
                String::from("Ana Diaz"),
                String::from("ana@example.edu"),
                Role::Undergraduate,
            ),
            Participant::new(
                INVITEE,
                String::from("Ben Ortiz"),
                String::from("ben@example.edu"),
                Role::Undergraduate,
            ),
            Participant::new(
                OUTSIDER,
                String::from("Carla Ruiz"),
                String::from("carla@example.edu"),
                Role::Postgraduate,
            ),
        ],
    )
}

pub fn at(date: Date, hour: u8, minute: u8) -> PrimitiveDateTime {
    PrimitiveDateTime::new(date, Time::from_hms(hour, minute, 0).unwrap())
}
