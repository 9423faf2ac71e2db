// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use reserva::CoreError;
use reserva_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Every variant maps to exactly one HTTP status class at the
/// server boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller could not be identified as an active participant.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller is known but not permitted to perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the action is not permitted.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The request lost a race against existing state.
    Conflict {
        /// The rule that produced the conflict.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}' denied: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly. The `rule` fields carry the domain error's stable
/// kind string so clients can branch without parsing messages.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match &err {
        DomainError::InvalidRole(_) => ApiError::InvalidInput {
            field: String::from("role"),
            message,
        },
        DomainError::InvalidRoomType(_) => ApiError::InvalidInput {
            field: String::from("room_type"),
            message,
        },
        DomainError::InvalidReservationStatus(_)
        | DomainError::InvalidParticipationStatus(_)
        | DomainError::InvalidAttendanceStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::InvalidTimeValue(_) => ApiError::InvalidInput {
            field: String::from("time"),
            message,
        },
        DomainError::InvalidSlotRange { .. }
        | DomainError::NoSlotSelected
        | DomainError::TooManySlots { .. }
        | DomainError::NonContiguousSlots => ApiError::InvalidInput {
            field: String::from("slot_ids"),
            message,
        },
        DomainError::NoParticipants => ApiError::InvalidInput {
            field: String::from("participant_ids"),
            message,
        },
        DomainError::InvalidSanctionDates { .. } => ApiError::InvalidInput {
            field: String::from("sanction_dates"),
            message,
        },
        DomainError::DateParseError { .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message,
        },
        DomainError::CapacityExceeded { .. }
        | DomainError::DailyLimitExceeded { .. }
        | DomainError::WeeklyLimitExceeded { .. } => ApiError::DomainRuleViolation {
            rule: String::from(err.kind()),
            message,
        },
        DomainError::SlotConflict { .. }
        | DomainError::OverlappingReservation { .. }
        | DomainError::OverlappingSanction { .. }
        | DomainError::ReservationCancelled { .. }
        | DomainError::InvalidStatusTransition { .. }
        | DomainError::InvalidParticipationTransition { .. } => ApiError::Conflict {
            rule: String::from(err.kind()),
            message,
        },
        DomainError::SanctionedUser { .. } | DomainError::RoomTypeNotAllowed { .. } => {
            ApiError::Unauthorized {
                action: String::from("create_reservation"),
                reason: message,
            }
        }
        DomainError::NotOrganizer { .. } => ApiError::Unauthorized {
            action: String::from("manage_reservation"),
            reason: message,
        },
        DomainError::NotInvited { .. } | DomainError::ResponseAfterStart { .. } => {
            ApiError::Unauthorized {
                action: String::from("respond_to_invitation"),
                reason: message,
            }
        }
        DomainError::CancellationAfterStart { .. } => ApiError::Unauthorized {
            action: String::from("cancel_reservation"),
            reason: message,
        },
        DomainError::OutsideConfirmationWindow { .. } => ApiError::Unauthorized {
            action: String::from("record_attendance"),
            reason: message,
        },
        DomainError::RoomNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Room"),
            message,
        },
        DomainError::ReservationNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Reservation"),
            message,
        },
        DomainError::ParticipantNotFound(_) | DomainError::ParticipantInactive(_) => {
            ApiError::ResourceNotFound {
                resource_type: String::from("Participant"),
                message,
            }
        }
        DomainError::UnknownSlot(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Time slot"),
            message,
        },
        DomainError::EmptyCatalog
        | DomainError::DuplicateSlotId(_)
        | DomainError::DuplicateOrderIndex(_)
        | DomainError::DateArithmeticOverflow { .. } => ApiError::Internal { message },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::SweepNotRoutable => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
