// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use crate::capabilities::compute_reservation_capabilities;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    CancelReservationResponse, CreateReservationRequest, CreateReservationResponse,
    OccupancyResponse, ParticipantEntryInfo, RecordAttendanceRequest, RecordAttendanceResponse,
    ReservationInfo, RespondInvitationRequest, RespondInvitationResponse, RoomInfo, SweepResponse,
    TimeSlotInfo,
};
use crate::session::Session;
use reserva::{Command, State, SweepResult, TransitionResult, apply, sweep_elapsed};
use reserva_audit::{Actor, AuditEvent, Cause};
use reserva_domain::{Reservation, can_book};
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

/// The result of an API operation that includes both the response and
/// the audit event.
///
/// This ensures that successful API operations always produce an audit
/// trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOutcome<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
    /// The new state after the operation.
    pub new_state: State,
}

/// The result of a sweep, which may close many reservations at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepOutcome {
    /// The API response.
    pub response: SweepResponse,
    /// One audit event per closed reservation.
    pub audit_events: Vec<AuditEvent>,
    /// The new state after the sweep.
    pub new_state: State,
}

/// Creates a reservation on behalf of the session's participant.
///
/// # Errors
///
/// Returns an error if any creation rule rejects the request.
pub fn create_reservation(
    state: &State,
    session: &Session,
    request: CreateReservationRequest,
    cause: Cause,
    now: PrimitiveDateTime,
) -> Result<ApiOutcome<CreateReservationResponse>, ApiError> {
    let command = Command::CreateReservation {
        room_id: request.room_id,
        date: request.date,
        slot_ids: request.slot_ids,
        participant_ids: request.participant_ids,
    };

    let TransitionResult {
        new_state,
        audit_event,
    } = apply(
        state,
        command,
        session.participant_id,
        session.to_audit_actor(),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let reservation = new_state
        .reservations
        .last()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("accepted reservation missing from state"),
        })?;
    let reservation_id = reservation
        .reservation_id
        .ok_or_else(|| ApiError::Internal {
            message: String::from("accepted reservation has no id"),
        })?;

    tracing::info!(
        reservation_id,
        room_id = reservation.room_id,
        organizer_id = session.participant_id,
        "reservation created"
    );

    let response = CreateReservationResponse {
        reservation_id,
        room_id: reservation.room_id,
        date: reservation.date,
        start_slot_id: reservation.start_slot_id,
        end_slot_id: reservation.end_slot_id,
        status: reservation.status.as_str().to_string(),
        message: format!("Reservation {reservation_id} created"),
    };

    Ok(ApiOutcome {
        response,
        audit_event,
        new_state,
    })
}

/// Cancels a reservation owned by the session's participant.
///
/// # Errors
///
/// Returns an error if the caller is not the organizer, the
/// reservation has started, or it is not in a cancellable status.
pub fn cancel_reservation(
    state: &State,
    session: &Session,
    reservation_id: i64,
    cause: Cause,
    now: PrimitiveDateTime,
) -> Result<ApiOutcome<CancelReservationResponse>, ApiError> {
    let TransitionResult {
        new_state,
        audit_event,
    } = apply(
        state,
        Command::CancelReservation { reservation_id },
        session.participant_id,
        session.to_audit_actor(),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    tracing::info!(reservation_id, "reservation cancelled");

    let status = new_state
        .reservation(reservation_id)
        .map_err(translate_domain_error)?
        .status;
    let response = CancelReservationResponse {
        reservation_id,
        status: status.as_str().to_string(),
        message: format!("Reservation {reservation_id} cancelled"),
    };

    Ok(ApiOutcome {
        response,
        audit_event,
        new_state,
    })
}

/// Records one participant's attendance within the confirmation window.
///
/// # Errors
///
/// Returns an error if the caller is not the organizer, the window is
/// closed, or the participant is not on the reservation.
pub fn record_attendance(
    state: &State,
    session: &Session,
    reservation_id: i64,
    request: RecordAttendanceRequest,
    cause: Cause,
    now: PrimitiveDateTime,
) -> Result<ApiOutcome<RecordAttendanceResponse>, ApiError> {
    let TransitionResult {
        new_state,
        audit_event,
    } = apply(
        state,
        Command::RecordAttendance {
            reservation_id,
            participant_id: request.participant_id,
            present: request.present,
        },
        session.participant_id,
        session.to_audit_actor(),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let reservation = new_state
        .reservation(reservation_id)
        .map_err(translate_domain_error)?;
    let entry = reservation
        .participant(request.participant_id)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("recorded participant missing from reservation"),
        })?;

    tracing::info!(
        reservation_id,
        participant_id = request.participant_id,
        attendance = entry.attendance.as_str(),
        "attendance recorded"
    );

    let response = RecordAttendanceResponse {
        reservation_id,
        participant_id: request.participant_id,
        attendance: entry.attendance.as_str().to_string(),
        status: reservation.status.as_str().to_string(),
        message: format!(
            "Attendance recorded for participant {} on reservation {reservation_id}",
            request.participant_id
        ),
    };

    Ok(ApiOutcome {
        response,
        audit_event,
        new_state,
    })
}

/// Answers an invitation on behalf of the session's participant.
///
/// # Errors
///
/// Returns an error if the caller was not invited, has already
/// answered, or the reservation has started or been cancelled.
pub fn respond_to_invitation(
    state: &State,
    session: &Session,
    reservation_id: i64,
    request: RespondInvitationRequest,
    cause: Cause,
    now: PrimitiveDateTime,
) -> Result<ApiOutcome<RespondInvitationResponse>, ApiError> {
    let TransitionResult {
        new_state,
        audit_event,
    } = apply(
        state,
        Command::RespondToInvitation {
            reservation_id,
            accept: request.accept,
        },
        session.participant_id,
        session.to_audit_actor(),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let participation = new_state
        .reservation(reservation_id)
        .map_err(translate_domain_error)?
        .participant(session.participant_id)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("responding participant missing from reservation"),
        })?
        .participation;

    tracing::info!(
        reservation_id,
        participant_id = session.participant_id,
        participation = participation.as_str(),
        "invitation answered"
    );

    let response = RespondInvitationResponse {
        reservation_id,
        participant_id: session.participant_id,
        participation: participation.as_str().to_string(),
        message: format!("Invitation to reservation {reservation_id} answered"),
    };

    Ok(ApiOutcome {
        response,
        audit_event,
        new_state,
    })
}

/// Closes out every reservation whose last slot has passed.
///
/// Issued by the scheduler, not by a participant session.
///
/// # Errors
///
/// Returns an error if the sweep cannot compute a reservation window
/// or a sanction date.
pub fn run_sweep(
    state: &State,
    cause: &Cause,
    now: PrimitiveDateTime,
) -> Result<SweepOutcome, ApiError> {
    let SweepResult {
        new_state,
        audit_events,
        finalized,
        no_shows,
        sanctions_applied,
    } = sweep_elapsed(state, &Actor::scheduler(), cause, now).map_err(translate_core_error)?;

    tracing::info!(
        finalized = finalized.len(),
        no_shows = no_shows.len(),
        sanctions_applied,
        "elapsed reservations swept"
    );

    let message = format!(
        "Swept {} reservations: {} finalized, {} no-shows, {} sanctions",
        finalized.len() + no_shows.len(),
        finalized.len(),
        no_shows.len(),
        sanctions_applied
    );
    let response = SweepResponse {
        finalized,
        no_shows,
        sanctions_applied,
        message,
    };

    Ok(SweepOutcome {
        response,
        audit_events,
        new_state,
    })
}

/// Returns the occupied slots for a room on a date.
///
/// # Errors
///
/// Returns an error if the room does not exist.
pub fn get_occupancy(state: &State, room_id: i64, date: Date) -> Result<OccupancyResponse, ApiError> {
    let occupied = reserva::occupancy(state, room_id, date).map_err(translate_domain_error)?;
    Ok(OccupancyResponse {
        room_id,
        date,
        occupied_slot_ids: occupied.into_iter().collect(),
    })
}

/// Returns the slot catalog in display form.
///
/// # Errors
///
/// Returns an error if a slot time cannot be formatted.
pub fn list_time_slots(state: &State) -> Result<Vec<TimeSlotInfo>, ApiError> {
    state
        .catalog
        .slots()
        .iter()
        .map(|slot| {
            Ok(TimeSlotInfo {
                slot_id: slot.slot_id,
                order_index: slot.order_index,
                starts_at: format_clock(slot.starts_at)?,
                ends_at: format_clock(slot.ends_at)?,
                description: slot.description.clone(),
            })
        })
        .collect()
}

/// Returns every room, flagged by whether the session's role may book it.
#[must_use]
pub fn list_rooms(state: &State, session: &Session) -> Vec<RoomInfo> {
    state
        .rooms
        .iter()
        .map(|room| RoomInfo {
            room_id: room.room_id,
            building_id: room.building_id,
            name: room.name.clone(),
            room_type: room.room_type.as_str().to_string(),
            capacity: room.capacity,
            bookable: can_book(session.role, room.room_type),
        })
        .collect()
}

/// Returns every reservation the session's participant appears on,
/// most recent date first, with per-reservation capabilities.
///
/// # Errors
///
/// Returns an error if a stored reservation references slots missing
/// from the catalog.
pub fn list_my_reservations(
    state: &State,
    session: &Session,
    now: PrimitiveDateTime,
) -> Result<Vec<ReservationInfo>, ApiError> {
    reserva::reservations_for(state, session.participant_id)
        .into_iter()
        .map(|reservation| reservation_info(state, session, reservation, now))
        .collect()
}

fn reservation_info(
    state: &State,
    session: &Session,
    reservation: &Reservation,
    now: PrimitiveDateTime,
) -> Result<ReservationInfo, ApiError> {
    let reservation_id = reservation
        .reservation_id
        .ok_or_else(|| ApiError::Internal {
            message: String::from("stored reservation has no id"),
        })?;
    let capabilities =
        compute_reservation_capabilities(session, reservation, &state.catalog, now)
            .map_err(translate_domain_error)?;

    Ok(ReservationInfo {
        reservation_id,
        room_id: reservation.room_id,
        date: reservation.date,
        start_slot_id: reservation.start_slot_id,
        end_slot_id: reservation.end_slot_id,
        status: reservation.status.as_str().to_string(),
        organizer_id: reservation.organizer_id,
        participants: reservation
            .participants
            .iter()
            .map(|p| ParticipantEntryInfo {
                participant_id: p.participant_id,
                participation: p.participation.as_str().to_string(),
                attendance: p.attendance.as_str().to_string(),
            })
            .collect(),
        capabilities,
    })
}

fn format_clock(value: Time) -> Result<String, ApiError> {
    let format = format_description!("[hour]:[minute]:[second]");
    value.format(&format).map_err(|err| ApiError::Internal {
        message: format!("Failed to format time: {err}"),
    })
}
