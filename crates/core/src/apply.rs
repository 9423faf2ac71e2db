// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{State, SweepResult, TransitionResult};
use reserva_audit::{Action, Actor, AuditEvent, Cause, EventScope, StateSnapshot};
use reserva_domain::{
    AttendanceStatus, DomainError, ParticipationStatus, ReservationStatus, ReservationWindow,
    build_reservation_request, ensure_can_book, no_show_sanction, validate_daily_slot_limit,
    validate_no_overlapping_reservation, validate_no_overlapping_sanction,
    validate_weekly_participation_limit,
};
use time::PrimitiveDateTime;

/// Applies a command to the current state, producing a new state and
/// audit event.
///
/// Every guard runs against the current state before anything is
/// cloned; a failed command leaves no trace.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `acting_participant` - The participant issuing the command
/// * `actor` / `cause` - Audit attribution for this action
/// * `now` - The authoritative current time
///
/// # Errors
///
/// Returns an error if the command violates a domain rule, targets a
/// record that does not exist, or arrives outside its permitted window.
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    command: Command,
    acting_participant: i64,
    actor: Actor,
    cause: Cause,
    now: PrimitiveDateTime,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateReservation {
            room_id,
            date,
            slot_ids,
            participant_ids,
        } => {
            let organizer = state.active_participant(acting_participant)?;
            let room = state.room(room_id)?;

            ensure_can_book(organizer.role, room.room_type)?;

            // Every invitee must be a known, active participant.
            for participant_id in &participant_ids {
                state.active_participant(*participant_id)?;
            }

            let request = build_reservation_request(
                date,
                &slot_ids,
                &participant_ids,
                acting_participant,
                room,
                &state.reservations,
                &state.sanctions,
                &state.catalog,
                now.date(),
            )?;

            let span = state
                .catalog
                .span_len(request.start_slot_id, request.end_slot_id)?;
            validate_daily_slot_limit(
                acting_participant,
                date,
                span,
                &state.reservations,
                &state.catalog,
            )?;
            validate_no_overlapping_reservation(
                acting_participant,
                date,
                request.start_slot_id,
                request.end_slot_id,
                &state.reservations,
                &state.catalog,
                None,
            )?;
            validate_weekly_participation_limit(acting_participant, date, &state.reservations)?;

            let mut new_state: State = state.clone();
            let reservation_id: i64 = new_state.allocate_reservation_id();

            let mut reservation = request.into_reservation();
            reservation.reservation_id = Some(reservation_id);
            reservation.created_at = Some(now.to_string());

            let after: StateSnapshot = StateSnapshot::of(&reservation);
            let action: Action = Action::new(
                String::from("CreateReservation"),
                Some(format!(
                    "Reserved room {} on {} (slots {}-{})",
                    room_id, date, reservation.start_slot_id, reservation.end_slot_id
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                EventScope::new(room_id, date.to_string()),
                None,
                after,
            );

            new_state.reservations.push(reservation);

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::CancelReservation { reservation_id } => {
            state.active_participant(acting_participant)?;
            let reservation = state.reservation(reservation_id)?;

            if !reservation.is_organizer(acting_participant) {
                return Err(DomainError::NotOrganizer {
                    participant_id: acting_participant,
                    reservation_id,
                }
                .into());
            }

            let window = ReservationWindow::for_reservation(reservation, &state.catalog)?;
            if !window.allows_cancellation(now) {
                return Err(DomainError::CancellationAfterStart { reservation_id }.into());
            }

            reservation
                .status
                .validate_transition(ReservationStatus::Cancelled)?;

            let before: StateSnapshot = StateSnapshot::of(reservation);
            let scope = EventScope::new(reservation.room_id, reservation.date.to_string());

            let mut new_state: State = state.clone();
            let cancelled = new_state
                .reservations
                .iter_mut()
                .find(|r| r.reservation_id == Some(reservation_id))
                .ok_or(DomainError::ReservationNotFound(reservation_id))?;
            cancelled.status = ReservationStatus::Cancelled;

            let after: StateSnapshot = StateSnapshot::of(cancelled);
            let action: Action = Action::new(
                String::from("CancelReservation"),
                Some(format!("Cancelled reservation {reservation_id}")),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, scope, Some(before), after);

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::RecordAttendance {
            reservation_id,
            participant_id,
            present,
        } => {
            state.active_participant(acting_participant)?;
            let reservation = state.reservation(reservation_id)?;

            if !reservation.is_organizer(acting_participant) {
                return Err(DomainError::NotOrganizer {
                    participant_id: acting_participant,
                    reservation_id,
                }
                .into());
            }
            if reservation.status == ReservationStatus::Cancelled {
                return Err(DomainError::ReservationCancelled { reservation_id }.into());
            }

            let window = ReservationWindow::for_reservation(reservation, &state.catalog)?;
            if !window.allows_attendance(now) {
                return Err(DomainError::OutsideConfirmationWindow { reservation_id }.into());
            }

            if reservation.participant(participant_id).is_none() {
                return Err(DomainError::NotInvited {
                    participant_id,
                    reservation_id,
                }
                .into());
            }

            // The first present participant confirms the reservation.
            let confirms = present && reservation.status == ReservationStatus::Active;
            if confirms {
                reservation
                    .status
                    .validate_transition(ReservationStatus::Confirmed)?;
            }

            let before: StateSnapshot = StateSnapshot::of(reservation);
            let scope = EventScope::new(reservation.room_id, reservation.date.to_string());

            let mut new_state: State = state.clone();
            let updated = new_state
                .reservations
                .iter_mut()
                .find(|r| r.reservation_id == Some(reservation_id))
                .ok_or(DomainError::ReservationNotFound(reservation_id))?;
            if confirms {
                updated.status = ReservationStatus::Confirmed;
            }
            let entry = updated
                .participant_mut(participant_id)
                .ok_or(DomainError::NotInvited {
                    participant_id,
                    reservation_id,
                })?;
            entry.attendance = if present {
                AttendanceStatus::Present
            } else {
                AttendanceStatus::Absent
            };
            entry.marked_at = Some(now.to_string());

            let after: StateSnapshot = StateSnapshot::of(updated);
            let action: Action = Action::new(
                String::from("RecordAttendance"),
                Some(format!(
                    "Marked participant {participant_id} {} on reservation {reservation_id}",
                    if present { "present" } else { "absent" }
                )),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, scope, Some(before), after);

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::RespondToInvitation {
            reservation_id,
            accept,
        } => {
            state.active_participant(acting_participant)?;
            let reservation = state.reservation(reservation_id)?;

            if reservation.status == ReservationStatus::Cancelled {
                return Err(DomainError::ReservationCancelled { reservation_id }.into());
            }

            let window = ReservationWindow::for_reservation(reservation, &state.catalog)?;
            if !window.allows_invitation_response(now) {
                return Err(DomainError::ResponseAfterStart { reservation_id }.into());
            }

            let entry =
                reservation
                    .participant(acting_participant)
                    .ok_or(DomainError::NotInvited {
                        participant_id: acting_participant,
                        reservation_id,
                    })?;

            let target = if accept {
                ParticipationStatus::Confirmed
            } else {
                ParticipationStatus::Rejected
            };
            entry.participation.validate_transition(target)?;

            // Accepting counts against the weekly participation limit.
            if accept {
                validate_weekly_participation_limit(
                    acting_participant,
                    reservation.date,
                    &state.reservations,
                )?;
            }

            let before: StateSnapshot = StateSnapshot::of(reservation);
            let scope = EventScope::new(reservation.room_id, reservation.date.to_string());

            let mut new_state: State = state.clone();
            let updated = new_state
                .reservations
                .iter_mut()
                .find(|r| r.reservation_id == Some(reservation_id))
                .ok_or(DomainError::ReservationNotFound(reservation_id))?;
            let entry =
                updated
                    .participant_mut(acting_participant)
                    .ok_or(DomainError::NotInvited {
                        participant_id: acting_participant,
                        reservation_id,
                    })?;
            entry.participation = target;
            entry.responded_at = Some(now.to_string());

            let after: StateSnapshot = StateSnapshot::of(updated);
            let action: Action = Action::new(
                String::from("RespondToInvitation"),
                Some(format!(
                    "Participant {acting_participant} {} reservation {reservation_id}",
                    if accept { "accepted" } else { "declined" }
                )),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, scope, Some(before), after);

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::SweepElapsed => Err(CoreError::SweepNotRoutable),
    }
}

/// Closes out every occupying reservation whose last slot has passed.
///
/// Reservations with at least one recorded presence are finalized, with
/// the remaining unregistered participants marked absent. Reservations
/// with no presence at all become no-shows: every participant is marked
/// absent and receives a sanction, pending invitees included. A
/// participant already under a sanction covering the issue date is not
/// sanctioned again.
///
/// # Errors
///
/// Returns an error if a reservation's window cannot be computed or a
/// sanction end date overflows.
pub fn sweep_elapsed(
    state: &State,
    actor: &Actor,
    cause: &Cause,
    now: PrimitiveDateTime,
) -> Result<SweepResult, CoreError> {
    let mut new_state: State = state.clone();
    let mut audit_events: Vec<AuditEvent> = Vec::new();
    let mut finalized: Vec<i64> = Vec::new();
    let mut no_shows: Vec<i64> = Vec::new();
    let mut sanctions_applied: usize = 0;
    let today = now.date();

    for index in 0..new_state.reservations.len() {
        let mut reservation = new_state.reservations[index].clone();
        let Some(reservation_id) = reservation.reservation_id else {
            continue;
        };
        if !reservation.status.occupies() {
            continue;
        }

        let window = ReservationWindow::for_reservation(&reservation, &state.catalog)?;
        if !window.has_elapsed(now) {
            continue;
        }

        let before: StateSnapshot = StateSnapshot::of(&reservation);
        let scope = EventScope::new(reservation.room_id, reservation.date.to_string());

        let anyone_present = reservation
            .participants
            .iter()
            .any(|p| p.attendance == AttendanceStatus::Present);

        let action: Action = if anyone_present {
            reservation
                .status
                .validate_transition(ReservationStatus::Finalized)?;
            reservation.status = ReservationStatus::Finalized;
            for entry in &mut reservation.participants {
                if entry.attendance == AttendanceStatus::Unregistered {
                    entry.attendance = AttendanceStatus::Absent;
                }
            }
            finalized.push(reservation_id);
            Action::new(
                String::from("FinalizeReservation"),
                Some(format!("Reservation {reservation_id} ended with attendance")),
            )
        } else {
            reservation
                .status
                .validate_transition(ReservationStatus::NoShow)?;
            reservation.status = ReservationStatus::NoShow;
            for entry in &mut reservation.participants {
                entry.attendance = AttendanceStatus::Absent;
            }
            no_shows.push(reservation_id);

            for entry in &reservation.participants {
                if validate_no_overlapping_sanction(
                    entry.participant_id,
                    today,
                    today,
                    &new_state.sanctions,
                    None,
                )
                .is_err()
                {
                    continue;
                }
                let mut sanction = no_show_sanction(entry.participant_id, today, reservation_id)?;
                sanction.sanction_id = Some(new_state.allocate_sanction_id());
                new_state.sanctions.push(sanction);
                sanctions_applied += 1;
            }

            Action::new(
                String::from("MarkNoShow"),
                Some(format!("Reservation {reservation_id} ended with no attendance")),
            )
        };

        let after: StateSnapshot = StateSnapshot::of(&reservation);
        new_state.reservations[index] = reservation;

        audit_events.push(AuditEvent::new(
            actor.clone(),
            cause.clone(),
            action,
            scope,
            Some(before),
            after,
        ));
    }

    Ok(SweepResult {
        new_state,
        audit_events,
        finalized,
        no_shows,
        sanctions_applied,
    })
}
