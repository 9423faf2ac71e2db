// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    INACTIVE, POSTGRAD, PROFESSOR, UNDERGRAD, UNDERGRAD_2, at, create_test_actor,
    create_test_cause, create_test_state,
};
use crate::{Command, CoreError, State, TransitionResult, apply, occupancy};
use reserva_domain::{DomainError, ParticipationStatus, ReservationStatus, Role, RoomType};
use std::collections::BTreeSet;
use time::macros::date;

const BOOKING_DATE: time::Date = date!(2026 - 09 - 07);

fn create_command(room_id: i64, slot_ids: Vec<i64>, participant_ids: Vec<i64>) -> Command {
    Command::CreateReservation {
        room_id,
        date: BOOKING_DATE,
        slot_ids,
        participant_ids,
    }
}

#[test]
fn test_valid_command_returns_new_state() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        create_command(1, vec![1, 2], vec![UNDERGRAD_2]),
        UNDERGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    );

    assert!(result.is_ok());
    let transition: TransitionResult = result.unwrap();
    assert_eq!(transition.new_state.reservations.len(), 1);

    let reservation = &transition.new_state.reservations[0];
    assert_eq!(reservation.reservation_id, Some(1));
    assert_eq!(reservation.status, ReservationStatus::Active);
    assert_eq!(reservation.organizer_id, UNDERGRAD);
    assert_eq!(reservation.participants.len(), 2);
    assert_eq!(
        reservation.participants[0].participation,
        ParticipationStatus::Confirmed
    );
    assert_eq!(
        reservation.participants[1].participation,
        ParticipationStatus::Pending
    );
    assert!(reservation.created_at.is_some());
}

#[test]
fn test_valid_command_emits_audit_event() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    let transition: TransitionResult = apply(
        &state,
        create_command(1, vec![1], vec![]),
        UNDERGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    )
    .unwrap();

    assert_eq!(transition.audit_event.action.name, "CreateReservation");
    assert_eq!(transition.audit_event.actor.id, UNDERGRAD.to_string());
    assert_eq!(transition.audit_event.cause.id, "req-456");
    assert_eq!(transition.audit_event.scope.room_id, 1);
    assert_eq!(transition.audit_event.scope.date, "2026-09-07");
    assert_eq!(transition.audit_event.before, None);
    assert_eq!(
        transition.audit_event.after.status,
        ReservationStatus::Active
    );
}

#[test]
fn test_failed_command_leaves_state_untouched() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    let result = apply(
        &state,
        create_command(1, vec![], vec![]),
        UNDERGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::NoSlotSelected))
    );
    assert!(state.reservations.is_empty());
}

#[test]
fn test_unknown_room_is_rejected() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    let result = apply(
        &state,
        create_command(99, vec![1], vec![]),
        UNDERGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::RoomNotFound(99)))
    );
}

#[test]
fn test_inactive_organizer_cannot_book() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    let result = apply(
        &state,
        create_command(1, vec![1], vec![]),
        INACTIVE,
        create_test_actor(),
        create_test_cause(),
        now,
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ParticipantInactive(
            INACTIVE
        )))
    );
}

#[test]
fn test_inactive_invitee_is_rejected() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    let result = apply(
        &state,
        create_command(1, vec![1], vec![INACTIVE]),
        UNDERGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ParticipantInactive(
            INACTIVE
        )))
    );
}

#[test]
fn test_undergraduate_cannot_book_postgraduate_room() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    let result = apply(
        &state,
        create_command(2, vec![1], vec![]),
        UNDERGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::RoomTypeNotAllowed {
                role: Role::Undergraduate,
                room_type: RoomType::Postgraduate,
            }
        ))
    );
}

#[test]
fn test_faculty_may_book_any_room() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    for room_id in [1, 2, 3] {
        let result = apply(
            &state,
            create_command(room_id, vec![1], vec![]),
            PROFESSOR,
            create_test_actor(),
            create_test_cause(),
            now,
        );
        assert!(result.is_ok(), "faculty booking of room {room_id} failed");
    }
}

#[test]
fn test_conflicting_booking_is_rejected() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    let transition = apply(
        &state,
        create_command(1, vec![1, 2], vec![]),
        UNDERGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    )
    .unwrap();

    let result = apply(
        &transition.new_state,
        create_command(1, vec![2, 3], vec![]),
        POSTGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::SlotConflict {
            slot_id: 2
        }))
    );
}

#[test]
fn test_occupancy_reflects_accepted_reservations() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    let transition = apply(
        &state,
        create_command(1, vec![3, 4], vec![]),
        UNDERGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    )
    .unwrap();

    assert_eq!(
        occupancy(&transition.new_state, 1, BOOKING_DATE).unwrap(),
        BTreeSet::from([3, 4])
    );
    assert!(
        occupancy(&transition.new_state, 2, BOOKING_DATE)
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        occupancy(&transition.new_state, 99, BOOKING_DATE),
        Err(DomainError::RoomNotFound(99))
    );
}

#[test]
fn test_ids_are_assigned_sequentially() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    let first = apply(
        &state,
        create_command(1, vec![1], vec![]),
        UNDERGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    )
    .unwrap();
    let second = apply(
        &first.new_state,
        create_command(1, vec![3], vec![]),
        POSTGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    )
    .unwrap();

    assert_eq!(second.new_state.reservations[0].reservation_id, Some(1));
    assert_eq!(second.new_state.reservations[1].reservation_id, Some(2));
}

#[test]
fn test_sweep_command_is_not_routable_through_apply() {
    let state: State = create_test_state();
    let now = at(date!(2026 - 09 - 01), 12, 0);

    let result = apply(
        &state,
        Command::SweepElapsed,
        UNDERGRAD,
        create_test_actor(),
        create_test_cause(),
        now,
    );

    assert_eq!(result, Err(CoreError::SweepNotRoutable));
}
