// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation request construction and booking limits.
//!
//! `build_reservation_request` runs every creation-time check in a fixed
//! order and either produces a request ready to persist or reports the
//! first violated rule. Validation is all-or-nothing: a failed check
//! leaves no partial state behind.

use crate::error::DomainError;
use crate::occupancy::occupied_slots;
use crate::sanction::ensure_not_sanctioned;
use crate::status::ParticipationStatus;
use crate::timeslot::SlotCatalog;
use crate::types::{Reservation, ReservationParticipant, Room, Sanction};
use time::{Date, Duration};

/// Maximum number of slots a single reservation may span.
pub const MAX_SLOTS_PER_RESERVATION: usize = 2;

/// Maximum number of slots one organizer may hold across all rooms on
/// one date.
pub const DAILY_SLOT_LIMIT: u32 = 2;

/// Maximum number of confirmed participations per calendar week
/// (Monday through Sunday).
pub const WEEKLY_CONFIRMED_PARTICIPATION_LIMIT: usize = 3;

/// A fully validated reservation request, ready to be accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    /// The room to reserve.
    pub room_id: i64,
    /// The reservation date.
    pub date: Date,
    /// First slot of the inclusive range.
    pub start_slot_id: i64,
    /// Last slot of the inclusive range.
    pub end_slot_id: i64,
    /// The creating participant.
    pub organizer_id: i64,
    /// All participant entries, organizer first and confirmed.
    pub participants: Vec<ReservationParticipant>,
}

impl ReservationRequest {
    /// Converts this request into a new Active reservation.
    #[must_use]
    pub fn into_reservation(self) -> Reservation {
        Reservation::new(
            self.room_id,
            self.date,
            self.start_slot_id,
            self.end_slot_id,
            self.organizer_id,
            self.participants,
        )
    }
}

/// Validates a reservation request.
///
/// Checks run in order: slot selection (non-empty, within the span limit,
/// contiguous), participant list (non-empty once the organizer is
/// inserted, within capacity), slot availability, and the sanction gate
/// for every participant. The organizer is inserted into the participant
/// list if absent and is always confirmed, so an organizer-only booking
/// passes; everyone else starts pending. Duplicate participant ids are
/// collapsed, first occurrence wins.
///
/// # Errors
///
/// Returns the first violated rule as a `DomainError`.
#[allow(clippy::too_many_arguments)]
pub fn build_reservation_request(
    date: Date,
    selected_slot_ids: &[i64],
    participant_ids: &[i64],
    organizer_id: i64,
    room: &Room,
    existing: &[Reservation],
    sanctions: &[Sanction],
    catalog: &SlotCatalog,
    today: Date,
) -> Result<ReservationRequest, DomainError> {
    if selected_slot_ids.is_empty() {
        return Err(DomainError::NoSlotSelected);
    }
    if selected_slot_ids.len() > MAX_SLOTS_PER_RESERVATION {
        return Err(DomainError::TooManySlots {
            selected: selected_slot_ids.len(),
            limit: MAX_SLOTS_PER_RESERVATION,
        });
    }
    if !catalog.are_contiguous(selected_slot_ids)? {
        return Err(DomainError::NonContiguousSlots);
    }

    // The organizer is always a participant, whether or not the caller
    // listed them, so an organizer-only booking is valid. Duplicates
    // collapse to one entry.
    let mut ids: Vec<i64> = Vec::with_capacity(participant_ids.len() + 1);
    ids.push(organizer_id);
    for id in participant_ids {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }

    if ids.is_empty() {
        return Err(DomainError::NoParticipants);
    }

    if ids.len() > room.capacity as usize {
        return Err(DomainError::CapacityExceeded {
            participants: ids.len(),
            capacity: room.capacity,
        });
    }

    // Endpoints come from catalog order, not from numeric slot ids.
    let (start_slot_id, end_slot_id) = range_endpoints(selected_slot_ids, catalog)?;

    let taken = occupied_slots(room.room_id, date, existing, catalog)?;
    for slot_id in catalog.expand_range(start_slot_id, end_slot_id)? {
        if taken.contains(&slot_id) {
            return Err(DomainError::SlotConflict { slot_id });
        }
    }

    for id in &ids {
        ensure_not_sanctioned(*id, today, sanctions)?;
    }

    let participants = ids
        .iter()
        .map(|&id| {
            if id == organizer_id {
                ReservationParticipant::organizer(id)
            } else {
                ReservationParticipant::invited(id)
            }
        })
        .collect();

    Ok(ReservationRequest {
        room_id: room.room_id,
        date,
        start_slot_id,
        end_slot_id,
        organizer_id,
        participants,
    })
}

/// Returns the first and last of a slot selection in catalog order.
fn range_endpoints(slot_ids: &[i64], catalog: &SlotCatalog) -> Result<(i64, i64), DomainError> {
    let mut start = slot_ids[0];
    let mut end = slot_ids[0];
    let mut start_order = catalog.order_of(start)?;
    let mut end_order = start_order;

    for &slot_id in &slot_ids[1..] {
        let order = catalog.order_of(slot_id)?;
        if order < start_order {
            start = slot_id;
            start_order = order;
        }
        if order > end_order {
            end = slot_id;
            end_order = order;
        }
    }
    Ok((start, end))
}

/// Validates the daily booking limit for a participant.
///
/// Counts the slots of every occupying reservation the participant
/// appears on for the date, in any room and under any participation,
/// plus the slots being requested.
///
/// # Errors
///
/// Returns `DomainError::DailyLimitExceeded` if the total would pass the
/// limit, or a catalog error if a reservation references unknown slots.
pub fn validate_daily_slot_limit(
    participant_id: i64,
    date: Date,
    requested_slots: u32,
    existing: &[Reservation],
    catalog: &SlotCatalog,
) -> Result<(), DomainError> {
    let mut held: u32 = 0;
    for reservation in existing {
        if reservation.participant(participant_id).is_some()
            && reservation.date == date
            && reservation.status.occupies()
        {
            held += catalog.span_len(reservation.start_slot_id, reservation.end_slot_id)?;
        }
    }

    if held + requested_slots > DAILY_SLOT_LIMIT {
        return Err(DomainError::DailyLimitExceeded {
            held,
            requested: requested_slots,
            limit: DAILY_SLOT_LIMIT,
        });
    }
    Ok(())
}

/// Validates the weekly confirmed-participation limit.
///
/// A participant may hold at most three confirmed participations on
/// occupying reservations in the Monday-through-Sunday week containing
/// the date. Cancelled and already-closed reservations do not count.
///
/// # Errors
///
/// Returns `DomainError::WeeklyLimitExceeded` if the participant already
/// holds the limit, or `DomainError::DateArithmeticOverflow` if the week
/// boundaries cannot be computed.
pub fn validate_weekly_participation_limit(
    participant_id: i64,
    date: Date,
    existing: &[Reservation],
) -> Result<(), DomainError> {
    let (week_start, week_end) = week_bounds(date)?;

    let confirmed = existing
        .iter()
        .filter(|r| {
            r.date >= week_start
                && r.date <= week_end
                && r.status.occupies()
                && r.participant(participant_id)
                    .is_some_and(|p| p.participation == ParticipationStatus::Confirmed)
        })
        .count();

    if confirmed >= WEEKLY_CONFIRMED_PARTICIPATION_LIMIT {
        return Err(DomainError::WeeklyLimitExceeded {
            confirmed,
            limit: WEEKLY_CONFIRMED_PARTICIPATION_LIMIT,
        });
    }
    Ok(())
}

/// Returns the Monday and Sunday of the week containing the date.
fn week_bounds(date: Date) -> Result<(Date, Date), DomainError> {
    let days_from_monday = i64::from(date.weekday().number_days_from_monday());
    let week_start = date
        .checked_sub(Duration::days(days_from_monday))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing week start for {date}"),
        })?;
    let week_end = week_start
        .checked_add(Duration::days(6))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing week end for {date}"),
        })?;
    Ok((week_start, week_end))
}

/// Validates that an organizer holds no other occupying reservation
/// whose slot range overlaps the requested range on the date.
///
/// # Arguments
///
/// * `exclude` - A reservation id to ignore, for updates to an existing
///   reservation
///
/// # Errors
///
/// Returns `DomainError::OverlappingReservation` naming the clashing
/// reservation, or a catalog error if any slot id is unknown.
pub fn validate_no_overlapping_reservation(
    organizer_id: i64,
    date: Date,
    start_slot_id: i64,
    end_slot_id: i64,
    existing: &[Reservation],
    catalog: &SlotCatalog,
    exclude: Option<i64>,
) -> Result<(), DomainError> {
    let new_start = catalog.order_of(start_slot_id)?;
    let new_end = catalog.order_of(end_slot_id)?;

    for reservation in existing {
        if reservation.organizer_id != organizer_id
            || reservation.date != date
            || !reservation.status.occupies()
        {
            continue;
        }
        if reservation.reservation_id.is_some() && reservation.reservation_id == exclude {
            continue;
        }

        let start = catalog.order_of(reservation.start_slot_id)?;
        let end = catalog.order_of(reservation.end_slot_id)?;
        if start <= new_end && new_start <= end {
            return Err(DomainError::OverlappingReservation {
                reservation_id: reservation.reservation_id,
            });
        }
    }
    Ok(())
}
