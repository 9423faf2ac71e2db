// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::status::{AttendanceStatus, ParticipationStatus, ReservationStatus};
use serde::{Deserialize, Serialize};
use time::Date;

/// Role of a participant within the university.
///
/// Roles are fixed domain constants and determine room eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Undergraduate student.
    Undergraduate,
    /// Postgraduate student.
    Postgraduate,
    /// Faculty member.
    Faculty,
    /// System administrator. Not a booking actor in the reservation flow.
    Admin,
}

impl Role {
    /// Parses a role from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid role.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "undergraduate" => Ok(Self::Undergraduate),
            "postgraduate" => Ok(Self::Postgraduate),
            "faculty" => Ok(Self::Faculty),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }

    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Undergraduate => "undergraduate",
            Self::Postgraduate => "postgraduate",
            Self::Faculty => "faculty",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of a room, controlling who may book it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// Bookable by any student or faculty member.
    Free,
    /// Reserved for postgraduate students and faculty.
    Postgraduate,
    /// Reserved for faculty members.
    Faculty,
}

impl RoomType {
    /// Parses a room type from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid room type.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "free" => Ok(Self::Free),
            "postgraduate" => Ok(Self::Postgraduate),
            "faculty" => Ok(Self::Faculty),
            _ => Err(DomainError::InvalidRoomType(s.to_string())),
        }
    }

    /// Returns the string representation of this room type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Postgraduate => "postgraduate",
            Self::Faculty => "faculty",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable room within a building.
///
/// Rooms are reference data and always carry a persisted id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// The canonical room identifier.
    pub room_id: i64,
    /// The building this room belongs to.
    pub building_id: i64,
    /// The room's display name.
    pub name: String,
    /// The room type, controlling eligibility.
    pub room_type: RoomType,
    /// Maximum number of participants a reservation in this room may have.
    pub capacity: u32,
}

impl Room {
    /// Creates a new `Room`.
    #[must_use]
    pub const fn new(
        room_id: i64,
        building_id: i64,
        name: String,
        room_type: RoomType,
        capacity: u32,
    ) -> Self {
        Self {
            room_id,
            building_id,
            name,
            room_type,
            capacity,
        }
    }
}

/// A registered participant (student or faculty member).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The canonical participant identifier.
    pub participant_id: i64,
    /// The participant's full name.
    pub name: String,
    /// The participant's email address (unique).
    pub email: String,
    /// The participant's role.
    pub role: Role,
    /// Whether the participant is active. Deactivated participants
    /// cannot act; their history is retained.
    pub active: bool,
}

impl Participant {
    /// Creates a new active `Participant`.
    #[must_use]
    pub const fn new(participant_id: i64, name: String, email: String, role: Role) -> Self {
        Self {
            participant_id,
            name,
            email,
            role,
            active: true,
        }
    }
}

/// A participant entry on a reservation.
///
/// Tracks both the invitation response and the recorded attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationParticipant {
    /// The participant.
    pub participant_id: i64,
    /// Invitation state.
    pub participation: ParticipationStatus,
    /// Recorded attendance.
    pub attendance: AttendanceStatus,
    /// When the invitation was answered (ISO 8601), if it was.
    pub responded_at: Option<String>,
    /// When attendance was recorded (ISO 8601), if it was.
    pub marked_at: Option<String>,
}

impl ReservationParticipant {
    /// Creates the organizer's participant record.
    ///
    /// The organizer is implicitly confirmed and never answers an invitation.
    #[must_use]
    pub const fn organizer(participant_id: i64) -> Self {
        Self {
            participant_id,
            participation: ParticipationStatus::Confirmed,
            attendance: AttendanceStatus::Unregistered,
            responded_at: None,
            marked_at: None,
        }
    }

    /// Creates an invited participant record, pending a response.
    #[must_use]
    pub const fn invited(participant_id: i64) -> Self {
        Self {
            participant_id,
            participation: ParticipationStatus::Pending,
            attendance: AttendanceStatus::Unregistered,
            responded_at: None,
            marked_at: None,
        }
    }
}

/// A reservation of a room for a contiguous run of time slots on one date.
///
/// `reservation_id` is assigned by the authoritative service; `None` means
/// the reservation has not been accepted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// The canonical identifier, once assigned.
    pub reservation_id: Option<i64>,
    /// The reserved room.
    pub room_id: i64,
    /// The reservation date.
    pub date: Date,
    /// First slot of the inclusive slot range.
    pub start_slot_id: i64,
    /// Last slot of the inclusive slot range.
    pub end_slot_id: i64,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// The participant who created the reservation.
    pub organizer_id: i64,
    /// All participants, always including the organizer.
    pub participants: Vec<ReservationParticipant>,
    /// Creation timestamp (ISO 8601), once assigned.
    pub created_at: Option<String>,
}

impl Reservation {
    /// Creates a new Active reservation without a persisted id.
    #[must_use]
    pub const fn new(
        room_id: i64,
        date: Date,
        start_slot_id: i64,
        end_slot_id: i64,
        organizer_id: i64,
        participants: Vec<ReservationParticipant>,
    ) -> Self {
        Self {
            reservation_id: None,
            room_id,
            date,
            start_slot_id,
            end_slot_id,
            status: ReservationStatus::Active,
            organizer_id,
            participants,
            created_at: None,
        }
    }

    /// Creates a `Reservation` with an existing persisted id.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        reservation_id: i64,
        room_id: i64,
        date: Date,
        start_slot_id: i64,
        end_slot_id: i64,
        status: ReservationStatus,
        organizer_id: i64,
        participants: Vec<ReservationParticipant>,
        created_at: Option<String>,
    ) -> Self {
        Self {
            reservation_id: Some(reservation_id),
            room_id,
            date,
            start_slot_id,
            end_slot_id,
            status,
            organizer_id,
            participants,
            created_at,
        }
    }

    /// Returns the participant entry for the given participant, if invited.
    #[must_use]
    pub fn participant(&self, participant_id: i64) -> Option<&ReservationParticipant> {
        self.participants
            .iter()
            .find(|p| p.participant_id == participant_id)
    }

    /// Returns a mutable participant entry for the given participant.
    pub fn participant_mut(&mut self, participant_id: i64) -> Option<&mut ReservationParticipant> {
        self.participants
            .iter_mut()
            .find(|p| p.participant_id == participant_id)
    }

    /// Returns whether the given participant is the organizer.
    #[must_use]
    pub const fn is_organizer(&self, participant_id: i64) -> bool {
        self.organizer_id == participant_id
    }

    /// Validates the organizer invariant.
    ///
    /// # Invariant
    ///
    /// The organizer is always present in the participant list and is
    /// implicitly confirmed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoParticipants` if the organizer is missing
    /// from the participant list.
    pub fn validate_organizer_present(&self) -> Result<(), DomainError> {
        if self.participant(self.organizer_id).is_none() {
            return Err(DomainError::NoParticipants);
        }
        Ok(())
    }
}

/// A sanction barring a participant from creating reservations.
///
/// A sanction is active on every date of its inclusive `[start_date,
/// end_date]` range. Existing reservations are not cancelled by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sanction {
    /// The canonical identifier, once assigned.
    pub sanction_id: Option<i64>,
    /// The sanctioned participant.
    pub participant_id: i64,
    /// First day the sanction is active.
    pub start_date: Date,
    /// Last day the sanction is active (inclusive).
    pub end_date: Date,
    /// Human-readable reason.
    pub reason: Option<String>,
}

impl Sanction {
    /// Creates a new `Sanction` without a persisted id.
    #[must_use]
    pub const fn new(
        participant_id: i64,
        start_date: Date,
        end_date: Date,
        reason: Option<String>,
    ) -> Self {
        Self {
            sanction_id: None,
            participant_id,
            start_date,
            end_date,
            reason,
        }
    }

    /// Creates a `Sanction` with an existing persisted id.
    #[must_use]
    pub const fn with_id(
        sanction_id: i64,
        participant_id: i64,
        start_date: Date,
        end_date: Date,
        reason: Option<String>,
    ) -> Self {
        Self {
            sanction_id: Some(sanction_id),
            participant_id,
            start_date,
            end_date,
            reason,
        }
    }
}
