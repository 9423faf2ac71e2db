// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation and participation status tracking and transition logic.
//!
//! All status transitions are validated here, centrally. No other module
//! may decide a transition by comparing status values ad hoc.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a reservation.
///
/// A reservation is created Active. It becomes Confirmed when attendance
/// is recorded inside the confirmation window. Finalized and `NoShow` are
/// assigned by the elapsed sweep once the last slot has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Created, awaiting attendance confirmation.
    Active,
    /// Attendance confirmed inside the confirmation window.
    Confirmed,
    /// Cancelled by the organizer before start time.
    Cancelled,
    /// Completed with at least one recorded attendance.
    Finalized,
    /// Completed with no recorded attendance.
    NoShow,
}

impl ReservationStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Finalized => "finalized",
            Self::NoShow => "no_show",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "active" => Ok(Self::Active),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "finalized" => Ok(Self::Finalized),
            "no_show" => Ok(Self::NoShow),
            _ => Err(DomainError::InvalidReservationStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (cannot transition further).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Finalized | Self::NoShow)
    }

    /// Returns true if reservations in this status claim their time slots.
    ///
    /// Only Active and Confirmed reservations count toward occupancy and
    /// the double-booking invariant.
    #[must_use]
    pub const fn occupies(&self) -> bool {
        matches!(self, Self::Active | Self::Confirmed)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid = match self {
            Self::Active => matches!(
                new_status,
                Self::Confirmed | Self::Cancelled | Self::Finalized | Self::NoShow
            ),
            Self::Confirmed => matches!(new_status, Self::Finalized | Self::NoShow),
            Self::Cancelled | Self::Finalized | Self::NoShow => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by reservation lifecycle rules".to_string(),
            })
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Invitation states of a reservation participant.
///
/// Every non-organizer participant starts Pending. The organizer's own
/// participant record is created Confirmed and never transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatus {
    /// Invited, awaiting a response.
    Pending,
    /// Invitation accepted.
    Confirmed,
    /// Invitation declined.
    Rejected,
}

impl ParticipationStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidParticipationStatus(s.to_string())),
        }
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Only Pending → Confirmed and Pending → Rejected are valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        let valid = matches!(
            (self, new_status),
            (Self::Pending, Self::Confirmed) | (Self::Pending, Self::Rejected)
        );

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidParticipationTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
            })
        }
    }
}

impl std::fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParticipationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Recorded attendance of a reservation participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// No attendance recorded yet.
    Unregistered,
    /// Marked present by the organizer.
    Present,
    /// Marked absent, either by the organizer or by the elapsed sweep.
    Absent,
}

impl AttendanceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unregistered => "unregistered",
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "unregistered" => Ok(Self::Unregistered),
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            _ => Err(DomainError::InvalidAttendanceStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
