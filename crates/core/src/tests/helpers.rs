// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::State;
use reserva_audit::{Actor, Cause};
use reserva_domain::{Participant, Role, Room, RoomType, SlotCatalog, TimeSlot};
use time::{Date, PrimitiveDateTime, Time};

/// Participant ids used throughout the suite.
pub const UNDERGRAD: i64 = 10;
pub const UNDERGRAD_2: i64 = 11;
pub const POSTGRAD: i64 = 12;
pub const PROFESSOR: i64 = 13;
pub const INACTIVE: i64 = 14;

pub fn create_test_actor() -> Actor {
    Actor::participant(UNDERGRAD)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Participant request"))
}

/// Ten hourly slots, 08:00 through 18:00, slot ids 1..=10.
pub fn create_test_catalog() -> SlotCatalog {
    let slots: Vec<TimeSlot> = (0..10u32)
        .map(|i| {
            #[allow(clippy::cast_possible_truncation)]
            let hour = 8 + i as u8;
            TimeSlot::new(
                i64::from(i + 1),
                i + 1,
                Time::from_hms(hour, 0, 0).unwrap(),
                Time::from_hms(hour + 1, 0, 0).unwrap(),
                None,
            )
            .unwrap()
        })
        .collect();
    SlotCatalog::new(slots).unwrap()
}

pub fn create_test_state() -> State {
    let rooms: Vec<Room> = vec![
        Room::new(1, 1, String::from("Study Room A"), RoomType::Free, 5),
        Room::new(2, 1, String::from("Lab B"), RoomType::Postgraduate, 8),
        Room::new(3, 2, String::from("Seminar Room C"), RoomType::Faculty, 20),
    ];
    let participants: Vec<Participant> = vec![
        Participant::new(
            UNDERGRAD,
            String::from("Ana Diaz"),
            String::from("ana@example.edu"),
            Role::Undergraduate,
        ),
        Participant::new(
            UNDERGRAD_2,
            String::from("Ben Ortiz"),
            String::from("ben@example.edu"),
            Role::Undergraduate,
        ),
        Participant::new(
            POSTGRAD,
            String::from("Carla Ruiz"),
            String::from("carla@example.edu"),
            Role::Postgraduate,
        ),
        Participant::new(
            PROFESSOR,
            String::from("Prof. Vega"),
            String::from("vega@example.edu"),
            Role::Faculty,
        ),
        Participant {
            participant_id: INACTIVE,
            name: String::from("Gone Person"),
            email: String::from("gone@example.edu"),
            role: Role::Undergraduate,
            active: false,
        },
    ];
    State::new(create_test_catalog(), rooms, participants)
}

/// A moment on the given date.
pub fn at(date: Date, hour: u8, minute: u8) -> PrimitiveDateTime {
    PrimitiveDateTime::new(date, Time::from_hms(hour, minute, 0).unwrap())
}
