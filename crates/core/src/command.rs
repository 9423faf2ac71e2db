// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// A command represents participant or scheduler intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new reservation. The acting participant becomes the
    /// organizer.
    CreateReservation {
        /// The room to reserve.
        room_id: i64,
        /// The reservation date.
        date: Date,
        /// The selected slot ids. Order does not matter; the
        /// selection must be contiguous in the slot catalog.
        slot_ids: Vec<i64>,
        /// The participants to invite. The organizer is included
        /// whether or not listed here.
        participant_ids: Vec<i64>,
    },
    /// Cancel an owned reservation before it starts.
    CancelReservation {
        /// The reservation to cancel.
        reservation_id: i64,
    },
    /// Record one participant's attendance during the confirmation
    /// window. Only the organizer may do this.
    RecordAttendance {
        /// The reservation being confirmed.
        reservation_id: i64,
        /// The participant whose attendance is recorded.
        participant_id: i64,
        /// Whether the participant is present.
        present: bool,
    },
    /// Answer an invitation before the reservation starts.
    RespondToInvitation {
        /// The reservation the acting participant was invited to.
        reservation_id: i64,
        /// Whether the invitation is accepted.
        accept: bool,
    },
    /// Close out every reservation whose last slot has passed. Issued
    /// by the scheduler, never by a participant.
    SweepElapsed,
}
