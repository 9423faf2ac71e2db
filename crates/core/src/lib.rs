// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use reserva_domain::{DomainError, occupied_slots};
use std::collections::BTreeSet;
use time::Date;

// Re-export public types and functions
pub use apply::{apply, sweep_elapsed};
pub use command::Command;
pub use error::CoreError;
pub use state::{State, SweepResult, TransitionResult};

/// Returns the slot ids taken for a room on a date.
///
/// This is a read-only query that does not create audit events. Only
/// Active and Confirmed reservations occupy slots.
///
/// # Errors
///
/// Returns an error if the room does not exist, or if a stored
/// reservation references a slot missing from the catalog.
pub fn occupancy(state: &State, room_id: i64, date: Date) -> Result<BTreeSet<i64>, DomainError> {
    state.room(room_id)?;
    occupied_slots(room_id, date, &state.reservations, &state.catalog)
}

/// Returns every reservation a participant appears on, most recent
/// date first.
///
/// This is a read-only query that does not create audit events.
#[must_use]
pub fn reservations_for(state: &State, participant_id: i64) -> Vec<&reserva_domain::Reservation> {
    let mut found: Vec<&reserva_domain::Reservation> = state
        .reservations
        .iter()
        .filter(|r| r.participant(participant_id).is_some())
        .collect();
    found.sort_by(|a, b| b.date.cmp(&a.date));
    found
}
