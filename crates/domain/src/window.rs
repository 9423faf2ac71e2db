// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guard windows for reservation actions.
//!
//! A reservation's window is derived from its date and its slot range in
//! the catalog. All guards take `now` explicitly; this module never reads
//! a clock.
//!
//! ## Invariants
//!
//! - Cancellation and invitation responses close strictly at start time.
//! - Attendance may be recorded from 15 minutes before start through the
//!   end of the last slot, inclusive.

use crate::error::DomainError;
use crate::timeslot::SlotCatalog;
use crate::types::Reservation;
use time::{Duration, PrimitiveDateTime};

/// Minutes before the reservation start at which attendance recording opens.
pub const CONFIRMATION_LEAD_MINUTES: i64 = 15;

/// The wall-clock extent of a reservation on its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationWindow {
    /// Start of the first reserved slot.
    pub starts_at: PrimitiveDateTime,
    /// End of the last reserved slot.
    pub ends_at: PrimitiveDateTime,
}

impl ReservationWindow {
    /// Builds the window for a reservation from the slot catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownSlot` if either endpoint of the
    /// reservation's slot range is not in the catalog.
    pub fn for_reservation(
        reservation: &Reservation,
        catalog: &SlotCatalog,
    ) -> Result<Self, DomainError> {
        let start_slot = catalog.slot(reservation.start_slot_id)?;
        let end_slot = catalog.slot(reservation.end_slot_id)?;

        Ok(Self {
            starts_at: PrimitiveDateTime::new(reservation.date, start_slot.starts_at),
            ends_at: PrimitiveDateTime::new(reservation.date, end_slot.ends_at),
        })
    }

    /// Returns when the confirmation window opens.
    #[must_use]
    pub fn confirmation_opens_at(&self) -> PrimitiveDateTime {
        self.starts_at - Duration::minutes(CONFIRMATION_LEAD_MINUTES)
    }

    /// Returns whether attendance may be recorded at `now`.
    #[must_use]
    pub fn allows_attendance(&self, now: PrimitiveDateTime) -> bool {
        now >= self.confirmation_opens_at() && now <= self.ends_at
    }

    /// Returns whether the organizer may still cancel at `now`.
    #[must_use]
    pub fn allows_cancellation(&self, now: PrimitiveDateTime) -> bool {
        now < self.starts_at
    }

    /// Returns whether an invited participant may still answer at `now`.
    #[must_use]
    pub fn allows_invitation_response(&self, now: PrimitiveDateTime) -> bool {
        now < self.starts_at
    }

    /// Returns whether the reservation has fully elapsed at `now`.
    #[must_use]
    pub fn has_elapsed(&self, now: PrimitiveDateTime) -> bool {
        now >= self.ends_at
    }
}
