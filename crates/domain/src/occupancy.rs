// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Occupancy computation for a room and date.
//!
//! The resulting set feeds two consumers: the booking client disables
//! occupied slots in its picker, and the authoritative arbiter rejects
//! creation attempts that include one. Only the arbiter's check is a
//! correctness guarantee; the client-side check is a UX optimization
//! computed from its last fetched snapshot.

use crate::error::DomainError;
use crate::timeslot::SlotCatalog;
use crate::types::Reservation;
use std::collections::BTreeSet;
use time::Date;

/// Returns the set of slot ids already claimed for a room on a date.
///
/// Reservations count toward occupancy iff they match the room and date
/// and are in a status that claims slots (Active or Confirmed). Each
/// matching reservation's inclusive slot range is expanded through the
/// catalog ordering and the ranges are unioned.
///
/// # Errors
///
/// Returns `DomainError::UnknownSlot` if a matching reservation refers
/// to a slot id missing from the catalog. Stored data naming unknown
/// slots is reported, never silently skipped.
pub fn occupied_slots(
    room_id: i64,
    date: Date,
    reservations: &[Reservation],
    catalog: &SlotCatalog,
) -> Result<BTreeSet<i64>, DomainError> {
    let mut occupied: BTreeSet<i64> = BTreeSet::new();

    for reservation in reservations {
        if reservation.room_id == room_id
            && reservation.date == date
            && reservation.status.occupies()
        {
            occupied.extend(catalog.expand_range(
                reservation.start_slot_id,
                reservation.end_slot_id,
            )?);
        }
    }

    Ok(occupied)
}
