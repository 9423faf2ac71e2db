// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{ApiError, translate_core_error};
use crate::handlers::{
    cancel_reservation, create_reservation, get_occupancy, list_my_reservations, list_rooms,
    list_time_slots, record_attendance, respond_to_invitation, run_sweep,
};
use crate::request_response::{
    CreateReservationRequest, RecordAttendanceRequest, RespondInvitationRequest,
};
use crate::session::Session;
use crate::tests::helpers::{INVITEE, ORGANIZER, OUTSIDER, at, create_test_cause, create_test_state};
use reserva::State;
use time::macros::date;

const BOOKING_DATE: time::Date = date!(2026 - 09 - 07);

fn booked() -> (State, Session) {
    let state = create_test_state();
    let session = Session::open(&state, ORGANIZER).unwrap();
    let outcome = create_reservation(
        &state,
        &session,
        CreateReservationRequest {
            room_id: 1,
            date: BOOKING_DATE,
            slot_ids: vec![1, 2],
            participant_ids: vec![INVITEE],
        },
        create_test_cause(),
        at(date!(2026 - 09 - 01), 12, 0),
    )
    .unwrap();
    (outcome.new_state, session)
}

#[test]
fn test_session_open_rejects_unknown_participant() {
    let state = create_test_state();
    let result = Session::open(&state, 999);
    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_create_reservation_returns_response_and_audit_event() {
    let state = create_test_state();
    let session = Session::open(&state, ORGANIZER).unwrap();

    let outcome = create_reservation(
        &state,
        &session,
        CreateReservationRequest {
            room_id: 1,
            date: BOOKING_DATE,
            slot_ids: vec![1, 2],
            participant_ids: vec![INVITEE],
        },
        create_test_cause(),
        at(date!(2026 - 09 - 01), 12, 0),
    )
    .unwrap();

    assert_eq!(outcome.response.reservation_id, 1);
    assert_eq!(outcome.response.status, "active");
    assert_eq!(outcome.response.start_slot_id, 1);
    assert_eq!(outcome.response.end_slot_id, 2);
    assert_eq!(outcome.audit_event.action.name, "CreateReservation");
    assert_eq!(outcome.new_state.reservations.len(), 1);
}

#[test]
fn test_create_reservation_translates_ineligibility_to_unauthorized() {
    let state = create_test_state();
    let session = Session::open(&state, ORGANIZER).unwrap();

    let result = create_reservation(
        &state,
        &session,
        CreateReservationRequest {
            room_id: 2,
            date: BOOKING_DATE,
            slot_ids: vec![1],
            participant_ids: vec![],
        },
        create_test_cause(),
        at(date!(2026 - 09 - 01), 12, 0),
    );

    assert!(matches!(
        result,
        Err(ApiError::Unauthorized { action, .. }) if action == "create_reservation"
    ));
}

#[test]
fn test_create_reservation_translates_conflict() {
    let (state, _) = booked();
    let session = Session::open(&state, OUTSIDER).unwrap();

    let result = create_reservation(
        &state,
        &session,
        CreateReservationRequest {
            room_id: 1,
            date: BOOKING_DATE,
            slot_ids: vec![2, 3],
            participant_ids: vec![],
        },
        create_test_cause(),
        at(date!(2026 - 09 - 01), 12, 0),
    );

    assert!(matches!(
        result,
        Err(ApiError::Conflict { rule, .. }) if rule == "slot_conflict"
    ));
}

#[test]
fn test_create_reservation_translates_bad_slots_to_invalid_input() {
    let state = create_test_state();
    let session = Session::open(&state, ORGANIZER).unwrap();

    let result = create_reservation(
        &state,
        &session,
        CreateReservationRequest {
            room_id: 1,
            date: BOOKING_DATE,
            slot_ids: vec![1, 3],
            participant_ids: vec![],
        },
        create_test_cause(),
        at(date!(2026 - 09 - 01), 12, 0),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "slot_ids"
    ));
}

#[test]
fn test_cancel_reservation_succeeds_for_organizer() {
    let (state, session) = booked();

    let outcome = cancel_reservation(
        &state,
        &session,
        1,
        create_test_cause(),
        at(BOOKING_DATE, 7, 0),
    )
    .unwrap();

    assert_eq!(outcome.response.status, "cancelled");
    assert_eq!(outcome.audit_event.action.name, "CancelReservation");
}

#[test]
fn test_cancel_by_invitee_is_unauthorized() {
    let (state, _) = booked();
    let invitee = Session::open(&state, INVITEE).unwrap();

    let result = cancel_reservation(
        &state,
        &invitee,
        1,
        create_test_cause(),
        at(BOOKING_DATE, 7, 0),
    );

    assert!(matches!(
        result,
        Err(ApiError::Unauthorized { action, .. }) if action == "manage_reservation"
    ));
}

#[test]
fn test_cancel_of_missing_reservation_is_not_found() {
    let (state, session) = booked();

    let result = cancel_reservation(
        &state,
        &session,
        42,
        create_test_cause(),
        at(BOOKING_DATE, 7, 0),
    );

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Reservation"
    ));
}

#[test]
fn test_record_attendance_confirms_and_reports_status() {
    let (state, session) = booked();

    let outcome = record_attendance(
        &state,
        &session,
        1,
        RecordAttendanceRequest {
            participant_id: ORGANIZER,
            present: true,
        },
        create_test_cause(),
        at(BOOKING_DATE, 7, 50),
    )
    .unwrap();

    assert_eq!(outcome.response.attendance, "present");
    assert_eq!(outcome.response.status, "confirmed");
}

#[test]
fn test_record_attendance_outside_window_is_unauthorized() {
    let (state, session) = booked();

    let result = record_attendance(
        &state,
        &session,
        1,
        RecordAttendanceRequest {
            participant_id: ORGANIZER,
            present: true,
        },
        create_test_cause(),
        at(BOOKING_DATE, 7, 0),
    );

    assert!(matches!(
        result,
        Err(ApiError::Unauthorized { action, .. }) if action == "record_attendance"
    ));
}

#[test]
fn test_respond_to_invitation_reports_participation() {
    let (state, _) = booked();
    let invitee = Session::open(&state, INVITEE).unwrap();

    let outcome = respond_to_invitation(
        &state,
        &invitee,
        1,
        RespondInvitationRequest { accept: true },
        create_test_cause(),
        at(BOOKING_DATE, 7, 0),
    )
    .unwrap();

    assert_eq!(outcome.response.participation, "confirmed");
    assert_eq!(outcome.response.participant_id, INVITEE);
}

#[test]
fn test_respond_by_uninvited_participant_is_unauthorized() {
    let (state, _) = booked();
    let outsider = Session::open(&state, OUTSIDER).unwrap();

    let result = respond_to_invitation(
        &state,
        &outsider,
        1,
        RespondInvitationRequest { accept: true },
        create_test_cause(),
        at(BOOKING_DATE, 7, 0),
    );

    assert!(matches!(
        result,
        Err(ApiError::Unauthorized { action, .. }) if action == "respond_to_invitation"
    ));
}

#[test]
fn test_run_sweep_reports_closures() {
    let (state, _) = booked();

    let outcome = run_sweep(&state, &create_test_cause(), at(BOOKING_DATE, 11, 0)).unwrap();

    assert_eq!(outcome.response.no_shows, vec![1]);
    assert!(outcome.response.finalized.is_empty());
    // Both the organizer and the still-pending invitee are sanctioned.
    assert_eq!(outcome.response.sanctions_applied, 2);
    assert_eq!(outcome.audit_events.len(), 1);
}

#[test]
fn test_misrouted_sweep_command_translates_to_internal() {
    let translated = translate_core_error(reserva::CoreError::SweepNotRoutable);
    assert!(matches!(translated, ApiError::Internal { .. }));
}

#[test]
fn test_get_occupancy_lists_taken_slots() {
    let (state, _) = booked();

    let response = get_occupancy(&state, 1, BOOKING_DATE).unwrap();
    assert_eq!(response.occupied_slot_ids, vec![1, 2]);

    let result = get_occupancy(&state, 42, BOOKING_DATE);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_list_time_slots_formats_clock_times() {
    let state = create_test_state();

    let slots = list_time_slots(&state).unwrap();
    assert_eq!(slots.len(), 6);
    assert_eq!(slots[0].starts_at, "08:00:00");
    assert_eq!(slots[0].ends_at, "09:00:00");
}

#[test]
fn test_list_rooms_flags_bookability_by_role() {
    let state = create_test_state();
    let undergrad = Session::open(&state, ORGANIZER).unwrap();

    let rooms = list_rooms(&state, &undergrad);
    assert_eq!(rooms.len(), 2);
    assert!(rooms[0].bookable);
    assert!(!rooms[1].bookable);
}

#[test]
fn test_list_my_reservations_includes_capabilities() {
    let (state, session) = booked();

    let mine = list_my_reservations(&state, &session, at(date!(2026 - 09 - 02), 12, 0)).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].reservation_id, 1);
    assert_eq!(mine[0].participants.len(), 2);
    assert_eq!(
        mine[0].capabilities.can_cancel,
        crate::capabilities::Capability::Allowed
    );

    let outsider = Session::open(&state, OUTSIDER).unwrap();
    assert!(
        list_my_reservations(&state, &outsider, at(date!(2026 - 09 - 02), 12, 0))
            .unwrap()
            .is_empty()
    );
}
