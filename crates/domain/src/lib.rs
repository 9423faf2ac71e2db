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

mod eligibility;
mod error;
mod occupancy;
mod sanction;
mod status;
mod timeslot;
mod types;
mod validation;
mod window;

#[cfg(test)]
mod tests;

pub use eligibility::{can_book, ensure_can_book};
pub use error::DomainError;
pub use occupancy::occupied_slots;
pub use sanction::{
    NO_SHOW_SANCTION_DAYS, ensure_not_sanctioned, is_sanctioned, no_show_sanction,
    validate_no_overlapping_sanction, validate_sanction_dates,
};
pub use status::{AttendanceStatus, ParticipationStatus, ReservationStatus};
pub use timeslot::{SlotCatalog, TimeSlot, TimeValue};
pub use validation::{
    DAILY_SLOT_LIMIT, MAX_SLOTS_PER_RESERVATION, ReservationRequest,
    WEEKLY_CONFIRMED_PARTICIPATION_LIMIT, build_reservation_request, validate_daily_slot_limit,
    validate_no_overlapping_reservation, validate_weekly_participation_limit,
};
pub use window::{CONFIRMATION_LEAD_MINUTES, ReservationWindow};

// Re-export public types
pub use types::{Participant, Reservation, ReservationParticipant, Role, Room, RoomType, Sanction};
