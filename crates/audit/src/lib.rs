// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use reserva_domain::{Reservation, ReservationStatus};

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// This could be a participant, an administrator, or the elapsed-slot
/// scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "participant", "admin", "scheduler").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The actor acting on behalf of a participant.
    #[must_use]
    pub fn participant(participant_id: i64) -> Self {
        Self::new(participant_id.to_string(), String::from("participant"))
    }

    /// The scheduler actor which sweeps elapsed reservations.
    #[must_use]
    pub fn scheduler() -> Self {
        Self::new(String::from("sweep"), String::from("scheduler"))
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID, sweep run ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`CreateReservation`", "`CancelReservation`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The room and date a state transition touched.
///
/// Scoping events this way lets a reviewer pull the history of one room
/// on one day without replaying the whole log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventScope {
    /// The room the transition concerns.
    pub room_id: i64,
    /// The reservation date, as an ISO 8601 string.
    pub date: String,
}

impl EventScope {
    /// Creates a new `EventScope`.
    #[must_use]
    pub const fn new(room_id: i64, date: String) -> Self {
        Self { room_id, date }
    }
}

/// A snapshot of one reservation's state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// The reservation id, if it had been assigned when the snapshot
    /// was taken.
    pub reservation_id: Option<i64>,
    /// The reservation's lifecycle status.
    pub status: ReservationStatus,
    /// Per-participant state, one "`id:participation:attendance`" entry each.
    pub participants: Vec<String>,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(
        reservation_id: Option<i64>,
        status: ReservationStatus,
        participants: Vec<String>,
    ) -> Self {
        Self {
            reservation_id,
            status,
            participants,
        }
    }

    /// Captures the current state of a reservation.
    #[must_use]
    pub fn of(reservation: &Reservation) -> Self {
        let participants = reservation
            .participants
            .iter()
            .map(|p| {
                format!(
                    "{}:{}:{}",
                    p.participant_id,
                    p.participation.as_str(),
                    p.attendance.as_str()
                )
            })
            .collect();
        Self::new(reservation.reservation_id, reservation.status, participants)
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - Which room and date it touched (scope)
/// - The state before the transition (before)
/// - The state after the transition (after)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The room and date the transition touched.
    pub scope: EventScope,
    /// The state before the transition, if the reservation existed.
    pub before: Option<StateSnapshot>,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable. A creation event has
    /// no `before` snapshot.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        scope: EventScope,
        before: Option<StateSnapshot>,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            scope,
            before,
            after,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reserva_domain::{Reservation, ReservationParticipant};
    use time::macros::date;

    fn reservation() -> Reservation {
        Reservation::with_id(
            42,
            1,
            date!(2026 - 09 - 07),
            1,
            2,
            ReservationStatus::Active,
            10,
            vec![
                ReservationParticipant::organizer(10),
                ReservationParticipant::invited(11),
            ],
            None,
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::participant(10);

        assert_eq!(actor.id, "10");
        assert_eq!(actor.actor_type, "participant");
    }

    #[test]
    fn test_scheduler_actor() {
        let actor: Actor = Actor::scheduler();

        assert_eq!(actor.id, "sweep");
        assert_eq!(actor.actor_type, "scheduler");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Participant request"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "Participant request");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("CreateReservation"),
            Some(String::from("slots 1-2")),
        );

        assert_eq!(action.name, "CreateReservation");
        assert_eq!(action.details, Some(String::from("slots 1-2")));
    }

    #[test]
    fn test_snapshot_captures_reservation_state() {
        let snapshot: StateSnapshot = StateSnapshot::of(&reservation());

        assert_eq!(snapshot.reservation_id, Some(42));
        assert_eq!(snapshot.status, ReservationStatus::Active);
        assert_eq!(
            snapshot.participants,
            vec![
                String::from("10:confirmed:unregistered"),
                String::from("11:pending:unregistered"),
            ]
        );
    }

    #[test]
    fn test_audit_event_creation_requires_all_fields() {
        let actor: Actor = Actor::participant(10);
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Participant request"));
        let action: Action = Action::new(String::from("CancelReservation"), None);
        let scope: EventScope = EventScope::new(1, String::from("2026-09-07"));
        let before: StateSnapshot = StateSnapshot::of(&reservation());
        let mut cancelled = reservation();
        cancelled.status = ReservationStatus::Cancelled;
        let after: StateSnapshot = StateSnapshot::of(&cancelled);

        let event: AuditEvent = AuditEvent::new(
            actor.clone(),
            cause.clone(),
            action.clone(),
            scope.clone(),
            Some(before.clone()),
            after.clone(),
        );

        assert_eq!(event.actor, actor);
        assert_eq!(event.cause, cause);
        assert_eq!(event.action, action);
        assert_eq!(event.scope, scope);
        assert_eq!(event.before, Some(before));
        assert_eq!(event.after, after);
    }

    #[test]
    fn test_creation_event_has_no_before_snapshot() {
        let event: AuditEvent = AuditEvent::new(
            Actor::participant(10),
            Cause::new(String::from("req-1"), String::from("Participant request")),
            Action::new(String::from("CreateReservation"), None),
            EventScope::new(1, String::from("2026-09-07")),
            None,
            StateSnapshot::of(&reservation()),
        );

        assert_eq!(event.before, None);
        assert_eq!(event.after.status, ReservationStatus::Active);
    }

    #[test]
    fn test_audit_event_equality() {
        let make = || {
            AuditEvent::new(
                Actor::scheduler(),
                Cause::new(String::from("sweep-1"), String::from("Elapsed sweep")),
                Action::new(String::from("FinalizeReservation"), None),
                EventScope::new(1, String::from("2026-09-07")),
                Some(StateSnapshot::of(&reservation())),
                StateSnapshot::of(&reservation()),
            )
        };

        assert_eq!(make(), make());
    }
}
