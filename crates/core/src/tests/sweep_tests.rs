// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    POSTGRAD, UNDERGRAD, UNDERGRAD_2, at, create_test_cause, create_test_state,
};
use crate::{Command, State, SweepResult, apply, sweep_elapsed};
use reserva_audit::Actor;
use reserva_domain::{AttendanceStatus, ReservationStatus, is_sanctioned};
use time::macros::date;

const BOOKING_DATE: time::Date = date!(2026 - 09 - 07);

fn book(state: &State, organizer: i64, room_id: i64, slot_ids: Vec<i64>, invitees: Vec<i64>) -> State {
    apply(
        state,
        Command::CreateReservation {
            room_id,
            date: BOOKING_DATE,
            slot_ids,
            participant_ids: invitees,
        },
        organizer,
        Actor::participant(organizer),
        create_test_cause(),
        at(date!(2026 - 09 - 01), 12, 0),
    )
    .unwrap()
    .new_state
}

fn mark_present(state: &State, organizer: i64, reservation_id: i64) -> State {
    apply(
        state,
        Command::RecordAttendance {
            reservation_id,
            participant_id: organizer,
            present: true,
        },
        organizer,
        Actor::participant(organizer),
        create_test_cause(),
        at(BOOKING_DATE, 8, 0),
    )
    .unwrap()
    .new_state
}

#[test]
fn test_attended_reservation_is_finalized() {
    // Slots 1-2 end at 10:00.
    let state = book(&create_test_state(), UNDERGRAD, 1, vec![1, 2], vec![UNDERGRAD_2]);
    let state = mark_present(&state, UNDERGRAD, 1);

    let result: SweepResult = sweep_elapsed(
        &state,
        &Actor::scheduler(),
        &create_test_cause(),
        at(BOOKING_DATE, 10, 0),
    )
    .unwrap();

    assert_eq!(result.finalized, vec![1]);
    assert!(result.no_shows.is_empty());
    assert_eq!(result.sanctions_applied, 0);

    let reservation = result.new_state.reservation(1).unwrap();
    assert_eq!(reservation.status, ReservationStatus::Finalized);
    assert_eq!(
        reservation.participant(UNDERGRAD).unwrap().attendance,
        AttendanceStatus::Present
    );
    // The invitee never showed; unregistered becomes absent.
    assert_eq!(
        reservation.participant(UNDERGRAD_2).unwrap().attendance,
        AttendanceStatus::Absent
    );

    assert_eq!(result.audit_events.len(), 1);
    assert_eq!(result.audit_events[0].action.name, "FinalizeReservation");
    assert_eq!(result.audit_events[0].actor.actor_type, "scheduler");
}

#[test]
fn test_unattended_reservation_becomes_no_show_and_sanctions_everyone() {
    let state = book(&create_test_state(), UNDERGRAD, 1, vec![1, 2], vec![UNDERGRAD_2]);

    let result: SweepResult = sweep_elapsed(
        &state,
        &Actor::scheduler(),
        &create_test_cause(),
        at(BOOKING_DATE, 10, 0),
    )
    .unwrap();

    assert!(result.finalized.is_empty());
    assert_eq!(result.no_shows, vec![1]);
    // Everyone on the reservation is sanctioned, the pending invitee
    // included.
    assert_eq!(result.sanctions_applied, 2);

    let reservation = result.new_state.reservation(1).unwrap();
    assert_eq!(reservation.status, ReservationStatus::NoShow);
    assert!(
        reservation
            .participants
            .iter()
            .all(|p| p.attendance == AttendanceStatus::Absent)
    );

    assert!(is_sanctioned(
        UNDERGRAD,
        BOOKING_DATE,
        &result.new_state.sanctions
    ));
    assert!(is_sanctioned(
        UNDERGRAD,
        date!(2026 - 11 - 06),
        &result.new_state.sanctions
    ));
    assert!(!is_sanctioned(
        UNDERGRAD,
        date!(2026 - 11 - 07),
        &result.new_state.sanctions
    ));
    assert!(is_sanctioned(
        UNDERGRAD_2,
        BOOKING_DATE,
        &result.new_state.sanctions
    ));

    assert_eq!(result.audit_events.len(), 1);
    assert_eq!(result.audit_events[0].action.name, "MarkNoShow");
}

#[test]
fn test_confirmed_invitee_of_a_no_show_is_sanctioned_too() {
    let state = book(&create_test_state(), UNDERGRAD, 1, vec![1, 2], vec![UNDERGRAD_2]);
    let state = apply(
        &state,
        Command::RespondToInvitation {
            reservation_id: 1,
            accept: true,
        },
        UNDERGRAD_2,
        Actor::participant(UNDERGRAD_2),
        create_test_cause(),
        at(BOOKING_DATE, 7, 0),
    )
    .unwrap()
    .new_state;

    let result = sweep_elapsed(
        &state,
        &Actor::scheduler(),
        &create_test_cause(),
        at(BOOKING_DATE, 10, 0),
    )
    .unwrap();

    assert_eq!(result.sanctions_applied, 2);
    assert!(is_sanctioned(
        UNDERGRAD_2,
        BOOKING_DATE,
        &result.new_state.sanctions
    ));
}

#[test]
fn test_sweep_skips_reservations_still_in_progress() {
    let state = book(&create_test_state(), UNDERGRAD, 1, vec![1, 2], vec![]);

    let result = sweep_elapsed(
        &state,
        &Actor::scheduler(),
        &create_test_cause(),
        at(BOOKING_DATE, 9, 59),
    )
    .unwrap();

    assert!(result.finalized.is_empty());
    assert!(result.no_shows.is_empty());
    assert!(result.audit_events.is_empty());
    assert_eq!(
        result.new_state.reservation(1).unwrap().status,
        ReservationStatus::Active
    );
}

#[test]
fn test_sweep_skips_cancelled_reservations() {
    let state = book(&create_test_state(), UNDERGRAD, 1, vec![1, 2], vec![]);
    let state = apply(
        &state,
        Command::CancelReservation { reservation_id: 1 },
        UNDERGRAD,
        Actor::participant(UNDERGRAD),
        create_test_cause(),
        at(BOOKING_DATE, 7, 0),
    )
    .unwrap()
    .new_state;

    let result = sweep_elapsed(
        &state,
        &Actor::scheduler(),
        &create_test_cause(),
        at(BOOKING_DATE, 11, 0),
    )
    .unwrap();

    assert!(result.no_shows.is_empty());
    assert_eq!(result.sanctions_applied, 0);
    assert_eq!(
        result.new_state.reservation(1).unwrap().status,
        ReservationStatus::Cancelled
    );
}

#[test]
fn test_sweep_closes_multiple_reservations_at_once() {
    let state = create_test_state();
    let state = book(&state, UNDERGRAD, 1, vec![1, 2], vec![]);
    let state = book(&state, POSTGRAD, 2, vec![1], vec![]);
    let state = mark_present(&state, POSTGRAD, 2);

    let result = sweep_elapsed(
        &state,
        &Actor::scheduler(),
        &create_test_cause(),
        at(BOOKING_DATE, 12, 0),
    )
    .unwrap();

    assert_eq!(result.no_shows, vec![1]);
    assert_eq!(result.finalized, vec![2]);
    assert_eq!(result.audit_events.len(), 2);
}

#[test]
fn test_already_sanctioned_participant_is_not_sanctioned_again() {
    let state = create_test_state();
    let state = book(&state, UNDERGRAD, 1, vec![1], vec![]);
    let state = book(&state, UNDERGRAD, 1, vec![3], vec![]);

    // Both reservations lapse in the same sweep; only one sanction lands.
    let result = sweep_elapsed(
        &state,
        &Actor::scheduler(),
        &create_test_cause(),
        at(BOOKING_DATE, 12, 0),
    )
    .unwrap();

    assert_eq!(result.no_shows, vec![1, 2]);
    assert_eq!(result.sanctions_applied, 1);
}
