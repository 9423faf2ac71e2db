// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the domain test suite.

use crate::timeslot::{SlotCatalog, TimeSlot};
use crate::types::{Room, RoomType};
use time::Time;

/// Builds an hourly catalog of `count` slots starting at 08:00, with slot
/// ids and order indexes both starting at 1.
pub fn hourly_catalog(count: u32) -> SlotCatalog {
    let slots: Vec<TimeSlot> = (0..count)
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
    SlotCatalog::new(slots).unwrap()
}

/// A free-access room with the given capacity.
pub fn free_room(capacity: u32) -> Room {
    Room::new(1, 1, String::from("Study Room A"), RoomType::Free, capacity)
}

/// A faculty-only room with the given capacity.
pub fn faculty_room(capacity: u32) -> Room {
    Room::new(
        2,
        1,
        String::from("Seminar Room B"),
        RoomType::Faculty,
        capacity,
    )
}
