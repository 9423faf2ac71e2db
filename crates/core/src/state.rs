// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reserva_audit::AuditEvent;
use reserva_domain::{DomainError, Participant, Reservation, Room, Sanction, SlotCatalog};

/// The complete system state.
///
/// Rooms, participants, and the slot catalog are reference data loaded
/// at startup. Reservations and sanctions are the mutable records the
/// engine produces. State is immutable during a transition: `apply`
/// takes the current state by reference and returns the new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// The daily slot catalog.
    pub catalog: SlotCatalog,
    /// All bookable rooms.
    pub rooms: Vec<Room>,
    /// All registered participants.
    pub participants: Vec<Participant>,
    /// All reservations, in every lifecycle status.
    pub reservations: Vec<Reservation>,
    /// All sanctions, current and elapsed.
    pub sanctions: Vec<Sanction>,
    /// The next reservation id to assign.
    next_reservation_id: i64,
    /// The next sanction id to assign.
    next_sanction_id: i64,
}

impl State {
    /// Creates a new state with the given reference data and no records.
    #[must_use]
    pub const fn new(
        catalog: SlotCatalog,
        rooms: Vec<Room>,
        participants: Vec<Participant>,
    ) -> Self {
        Self {
            catalog,
            rooms,
            participants,
            reservations: Vec::new(),
            sanctions: Vec::new(),
            next_reservation_id: 1,
            next_sanction_id: 1,
        }
    }

    /// Looks up a room by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RoomNotFound` if the room does not exist.
    pub fn room(&self, room_id: i64) -> Result<&Room, DomainError> {
        self.rooms
            .iter()
            .find(|r| r.room_id == room_id)
            .ok_or(DomainError::RoomNotFound(room_id))
    }

    /// Looks up a participant by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ParticipantNotFound` if the participant
    /// does not exist.
    pub fn participant(&self, participant_id: i64) -> Result<&Participant, DomainError> {
        self.participants
            .iter()
            .find(|p| p.participant_id == participant_id)
            .ok_or(DomainError::ParticipantNotFound(participant_id))
    }

    /// Looks up a participant by id, requiring them to be active.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ParticipantNotFound` if the participant does
    /// not exist, or `DomainError::ParticipantInactive` if deactivated.
    pub fn active_participant(&self, participant_id: i64) -> Result<&Participant, DomainError> {
        let participant = self.participant(participant_id)?;
        if !participant.active {
            return Err(DomainError::ParticipantInactive(participant_id));
        }
        Ok(participant)
    }

    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ReservationNotFound` if no reservation has
    /// the id.
    pub fn reservation(&self, reservation_id: i64) -> Result<&Reservation, DomainError> {
        self.reservations
            .iter()
            .find(|r| r.reservation_id == Some(reservation_id))
            .ok_or(DomainError::ReservationNotFound(reservation_id))
    }

    /// Assigns the next reservation id.
    pub(crate) const fn allocate_reservation_id(&mut self) -> i64 {
        let id = self.next_reservation_id;
        self.next_reservation_id += 1;
        id
    }

    /// Assigns the next sanction id.
    pub(crate) const fn allocate_sanction_id(&mut self) -> i64 {
        let id = self.next_sanction_id;
        self.next_sanction_id += 1;
        id
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail
/// without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of an elapsed-reservation sweep.
///
/// A sweep closes out every occupying reservation whose last slot has
/// passed, producing one audit event per closed reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// The new state after the sweep.
    pub new_state: State,
    /// One audit event per closed reservation.
    pub audit_events: Vec<AuditEvent>,
    /// Ids of reservations that ended with attendance and were finalized.
    pub finalized: Vec<i64>,
    /// Ids of reservations that ended with no attendance at all.
    pub no_shows: Vec<i64>,
    /// Number of sanctions issued for no-show reservations.
    pub sanctions_applied: usize,
}
