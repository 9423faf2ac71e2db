// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Role, RoomType};
use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Role string is not a recognized role.
    InvalidRole(String),
    /// Room type string is not a recognized room type.
    InvalidRoomType(String),
    /// Reservation status string is not a recognized status.
    InvalidReservationStatus(String),
    /// Participation status string is not a recognized status.
    InvalidParticipationStatus(String),
    /// Attendance status string is not a recognized status.
    InvalidAttendanceStatus(String),
    /// A time-of-day value could not be normalized.
    InvalidTimeValue(String),
    /// The time slot catalog has no slots.
    EmptyCatalog,
    /// Two catalog slots share the same slot id.
    DuplicateSlotId(i64),
    /// Two catalog slots share the same order index.
    DuplicateOrderIndex(u32),
    /// A slot id does not exist in the catalog.
    UnknownSlot(i64),
    /// The start slot orders after the end slot.
    InvalidSlotRange {
        /// The first slot id of the range.
        start_slot_id: i64,
        /// The last slot id of the range.
        end_slot_id: i64,
    },
    /// No time slot was selected for the reservation.
    NoSlotSelected,
    /// More slots were selected than a single reservation may span.
    TooManySlots {
        /// The number of slots selected.
        selected: usize,
        /// The maximum number of slots allowed.
        limit: usize,
    },
    /// The selected slots are not adjacent in the catalog ordering.
    NonContiguousSlots,
    /// The reservation has no participants.
    NoParticipants,
    /// The participant count exceeds the room capacity.
    CapacityExceeded {
        /// The number of participants requested.
        participants: usize,
        /// The room capacity.
        capacity: u32,
    },
    /// A selected slot is already taken by another reservation.
    SlotConflict {
        /// The conflicting slot id.
        slot_id: i64,
    },
    /// The organizer has an active sanction.
    SanctionedUser {
        /// The sanctioned participant.
        participant_id: i64,
    },
    /// The role is not permitted to book this room type.
    RoomTypeNotAllowed {
        /// The booking actor's role.
        role: Role,
        /// The room type that was requested.
        room_type: RoomType,
    },
    /// The participant would exceed the daily slot limit.
    DailyLimitExceeded {
        /// Slots already held on the date.
        held: u32,
        /// Slots requested by this reservation.
        requested: u32,
        /// The daily limit.
        limit: u32,
    },
    /// The participant would exceed the weekly confirmed-participation limit.
    WeeklyLimitExceeded {
        /// Confirmed participations already held this week.
        confirmed: usize,
        /// The weekly limit.
        limit: usize,
    },
    /// The organizer already holds a reservation overlapping these slots.
    OverlappingReservation {
        /// The overlapping reservation, if it has a persisted id.
        reservation_id: Option<i64>,
    },
    /// A reservation status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// A participation status transition is not permitted.
    InvalidParticipationTransition {
        /// The current participation status.
        from: String,
        /// The requested participation status.
        to: String,
    },
    /// Cancellation was attempted at or after the reservation start.
    CancellationAfterStart {
        /// The reservation.
        reservation_id: i64,
    },
    /// Attendance was recorded outside the confirmation window.
    OutsideConfirmationWindow {
        /// The reservation.
        reservation_id: i64,
    },
    /// An invitation response arrived at or after the reservation start.
    ResponseAfterStart {
        /// The reservation.
        reservation_id: i64,
    },
    /// The reservation was cancelled and accepts no further responses.
    ReservationCancelled {
        /// The reservation.
        reservation_id: i64,
    },
    /// The acting participant is not the reservation organizer.
    NotOrganizer {
        /// The acting participant.
        participant_id: i64,
        /// The reservation.
        reservation_id: i64,
    },
    /// The acting participant is not invited to the reservation.
    NotInvited {
        /// The acting participant.
        participant_id: i64,
        /// The reservation.
        reservation_id: i64,
    },
    /// Room does not exist.
    RoomNotFound(i64),
    /// Reservation does not exist.
    ReservationNotFound(i64),
    /// Participant does not exist.
    ParticipantNotFound(i64),
    /// Participant exists but has been deactivated.
    ParticipantInactive(i64),
    /// Sanction end date precedes its start date.
    InvalidSanctionDates {
        /// The sanction start date.
        start_date: Date,
        /// The sanction end date.
        end_date: Date,
    },
    /// The participant already has a sanction covering the period.
    OverlappingSanction {
        /// The participant.
        participant_id: i64,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl DomainError {
    /// Returns a stable machine-readable kind string for this error.
    ///
    /// Kind strings identify the violated rule in API error payloads
    /// without forcing clients to parse display text.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRole(_) => "invalid_role",
            Self::InvalidRoomType(_) => "invalid_room_type",
            Self::InvalidReservationStatus(_) => "invalid_reservation_status",
            Self::InvalidParticipationStatus(_) => "invalid_participation_status",
            Self::InvalidAttendanceStatus(_) => "invalid_attendance_status",
            Self::InvalidTimeValue(_) => "invalid_time_value",
            Self::EmptyCatalog => "empty_catalog",
            Self::DuplicateSlotId(_) => "duplicate_slot_id",
            Self::DuplicateOrderIndex(_) => "duplicate_order_index",
            Self::UnknownSlot(_) => "unknown_slot",
            Self::InvalidSlotRange { .. } => "invalid_slot_range",
            Self::NoSlotSelected => "no_slot_selected",
            Self::TooManySlots { .. } => "too_many_slots",
            Self::NonContiguousSlots => "non_contiguous_slots",
            Self::NoParticipants => "no_participants",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::SlotConflict { .. } => "slot_conflict",
            Self::SanctionedUser { .. } => "sanctioned_user",
            Self::RoomTypeNotAllowed { .. } => "room_type_not_allowed",
            Self::DailyLimitExceeded { .. } => "daily_limit_exceeded",
            Self::WeeklyLimitExceeded { .. } => "weekly_limit_exceeded",
            Self::OverlappingReservation { .. } => "overlapping_reservation",
            Self::InvalidStatusTransition { .. } => "invalid_status_transition",
            Self::InvalidParticipationTransition { .. } => "invalid_participation_transition",
            Self::CancellationAfterStart { .. } => "cancellation_after_start",
            Self::OutsideConfirmationWindow { .. } => "outside_confirmation_window",
            Self::ResponseAfterStart { .. } => "response_after_start",
            Self::ReservationCancelled { .. } => "reservation_cancelled",
            Self::NotOrganizer { .. } => "not_organizer",
            Self::NotInvited { .. } => "not_invited",
            Self::RoomNotFound(_) => "room_not_found",
            Self::ReservationNotFound(_) => "reservation_not_found",
            Self::ParticipantNotFound(_) => "participant_not_found",
            Self::ParticipantInactive(_) => "participant_inactive",
            Self::InvalidSanctionDates { .. } => "invalid_sanction_dates",
            Self::OverlappingSanction { .. } => "overlapping_sanction",
            Self::DateArithmeticOverflow { .. } => "date_arithmetic_overflow",
            Self::DateParseError { .. } => "date_parse_error",
        }
    }
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(value) => write!(f, "Invalid role: {value}"),
            Self::InvalidRoomType(value) => write!(f, "Invalid room type: {value}"),
            Self::InvalidReservationStatus(value) => {
                write!(f, "Invalid reservation status: {value}")
            }
            Self::InvalidParticipationStatus(value) => {
                write!(f, "Invalid participation status: {value}")
            }
            Self::InvalidAttendanceStatus(value) => {
                write!(f, "Invalid attendance status: {value}")
            }
            Self::InvalidTimeValue(value) => write!(f, "Invalid time value: {value}"),
            Self::EmptyCatalog => write!(f, "Time slot catalog must contain at least one slot"),
            Self::DuplicateSlotId(slot_id) => {
                write!(f, "Duplicate slot id {slot_id} in time slot catalog")
            }
            Self::DuplicateOrderIndex(order_index) => {
                write!(f, "Duplicate order index {order_index} in time slot catalog")
            }
            Self::UnknownSlot(slot_id) => {
                write!(f, "Slot {slot_id} does not exist in the time slot catalog")
            }
            Self::InvalidSlotRange {
                start_slot_id,
                end_slot_id,
            } => {
                write!(
                    f,
                    "Invalid slot range: slot {start_slot_id} does not order before slot {end_slot_id}"
                )
            }
            Self::NoSlotSelected => write!(f, "At least one time slot must be selected"),
            Self::TooManySlots { selected, limit } => {
                write!(
                    f,
                    "Selected {selected} slots, but a reservation may span at most {limit}"
                )
            }
            Self::NonContiguousSlots => {
                write!(f, "Selected time slots must be contiguous")
            }
            Self::NoParticipants => write!(f, "A reservation requires at least one participant"),
            Self::CapacityExceeded {
                participants,
                capacity,
            } => {
                write!(
                    f,
                    "Participant count {participants} exceeds room capacity {capacity}"
                )
            }
            Self::SlotConflict { slot_id } => {
                write!(f, "Slot {slot_id} is already reserved for this room and date")
            }
            Self::SanctionedUser { participant_id } => {
                write!(
                    f,
                    "Participant {participant_id} has an active sanction and may not create reservations"
                )
            }
            Self::RoomTypeNotAllowed { role, room_type } => {
                write!(
                    f,
                    "Role '{role}' may not book rooms of type '{room_type}'"
                )
            }
            Self::DailyLimitExceeded {
                held,
                requested,
                limit,
            } => {
                write!(
                    f,
                    "Daily limit of {limit} slots exceeded: {held} already held, {requested} requested"
                )
            }
            Self::WeeklyLimitExceeded { confirmed, limit } => {
                write!(
                    f,
                    "Already has {confirmed} confirmed participations this week (limit {limit})"
                )
            }
            Self::OverlappingReservation { reservation_id } => match reservation_id {
                Some(id) => write!(
                    f,
                    "Organizer already holds reservation {id} overlapping these slots"
                ),
                None => write!(
                    f,
                    "Organizer already holds a reservation overlapping these slots"
                ),
            },
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition reservation from {from} to {to}: {reason}")
            }
            Self::InvalidParticipationTransition { from, to } => {
                write!(f, "Cannot transition participation from {from} to {to}")
            }
            Self::CancellationAfterStart { reservation_id } => {
                write!(
                    f,
                    "Reservation {reservation_id} can no longer be cancelled: its start time has passed"
                )
            }
            Self::OutsideConfirmationWindow { reservation_id } => {
                write!(
                    f,
                    "Attendance for reservation {reservation_id} may only be recorded inside the confirmation window"
                )
            }
            Self::ResponseAfterStart { reservation_id } => {
                write!(
                    f,
                    "Invitation to reservation {reservation_id} can no longer be answered: its start time has passed"
                )
            }
            Self::ReservationCancelled { reservation_id } => {
                write!(f, "Reservation {reservation_id} has been cancelled")
            }
            Self::NotOrganizer {
                participant_id,
                reservation_id,
            } => {
                write!(
                    f,
                    "Participant {participant_id} is not the organizer of reservation {reservation_id}"
                )
            }
            Self::NotInvited {
                participant_id,
                reservation_id,
            } => {
                write!(
                    f,
                    "Participant {participant_id} is not invited to reservation {reservation_id}"
                )
            }
            Self::RoomNotFound(room_id) => write!(f, "Room {room_id} not found"),
            Self::ReservationNotFound(reservation_id) => {
                write!(f, "Reservation {reservation_id} not found")
            }
            Self::ParticipantNotFound(participant_id) => {
                write!(f, "Participant {participant_id} not found")
            }
            Self::ParticipantInactive(participant_id) => {
                write!(f, "Participant {participant_id} is inactive")
            }
            Self::InvalidSanctionDates {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Sanction end date {end_date} must not precede start date {start_date}"
                )
            }
            Self::OverlappingSanction { participant_id } => {
                write!(
                    f,
                    "Participant {participant_id} already has a sanction covering this period"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
