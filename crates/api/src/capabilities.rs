// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what a participant may still do with a
//! reservation without leaking domain internals. They are advisory only
//! and do not replace the checks the engine runs when a command
//! arrives.

use crate::session::Session;
use reserva_domain::{
    DomainError, ParticipationStatus, Reservation, ReservationWindow, SlotCatalog,
};
use time::PrimitiveDateTime;

/// Whether an action is currently permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The action would be accepted right now.
    Allowed,
    /// The action would be rejected right now.
    Denied,
}

/// What one participant may still do with one reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReservationCapabilities {
    /// May the participant cancel the reservation.
    pub can_cancel: Capability,
    /// May the participant record attendance on it.
    pub can_record_attendance: Capability,
    /// May the participant answer its invitation.
    pub can_respond: Capability,
}

impl ReservationCapabilities {
    /// No permitted actions.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            can_cancel: Capability::Denied,
            can_record_attendance: Capability::Denied,
            can_respond: Capability::Denied,
        }
    }
}

/// Computes what the session's participant may still do with a
/// reservation at the given moment.
///
/// # Errors
///
/// Returns an error if the reservation references slots missing from
/// the catalog.
pub fn compute_reservation_capabilities(
    session: &Session,
    reservation: &Reservation,
    catalog: &SlotCatalog,
    now: PrimitiveDateTime,
) -> Result<ReservationCapabilities, DomainError> {
    // Terminal reservations admit no further actions.
    if reservation.status.is_terminal() {
        return Ok(ReservationCapabilities::none());
    }

    let window = ReservationWindow::for_reservation(reservation, catalog)?;
    let is_organizer = reservation.is_organizer(session.participant_id);

    let can_cancel = if is_organizer
        && window.allows_cancellation(now)
        && reservation
            .status
            .validate_transition(reserva_domain::ReservationStatus::Cancelled)
            .is_ok()
    {
        Capability::Allowed
    } else {
        Capability::Denied
    };

    let can_record_attendance = if is_organizer && window.allows_attendance(now) {
        Capability::Allowed
    } else {
        Capability::Denied
    };

    let can_respond = if !is_organizer
        && window.allows_invitation_response(now)
        && reservation
            .participant(session.participant_id)
            .is_some_and(|p| p.participation == ParticipationStatus::Pending)
    {
        Capability::Allowed
    } else {
        Capability::Denied
    };

    Ok(ReservationCapabilities {
        can_cancel,
        can_record_attendance,
        can_respond,
    })
}
