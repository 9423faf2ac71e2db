// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sanction gate and sanction validation.
//!
//! A sanction blocks reservation creation while its date range is
//! current; it never cancels reservations that already exist. Sanctions
//! whose range has elapsed do not count — activity is decided by date
//! range, matching the authoritative service, not by mere existence of
//! a record.

use crate::error::DomainError;
use crate::types::Sanction;
use time::{Date, Duration};

/// Length of the sanction applied when a reservation ends with no
/// recorded attendance.
pub const NO_SHOW_SANCTION_DAYS: i64 = 60;

/// Returns whether the participant has a sanction active on the given date.
#[must_use]
pub fn is_sanctioned(participant_id: i64, on: Date, sanctions: &[Sanction]) -> bool {
    sanctions.iter().any(|sanction| {
        sanction.participant_id == participant_id
            && sanction.start_date <= on
            && on <= sanction.end_date
    })
}

/// Validates that the participant has no sanction active on the given date.
///
/// # Errors
///
/// Returns `DomainError::SanctionedUser` if an active sanction exists.
pub fn ensure_not_sanctioned(
    participant_id: i64,
    on: Date,
    sanctions: &[Sanction],
) -> Result<(), DomainError> {
    if is_sanctioned(participant_id, on, sanctions) {
        return Err(DomainError::SanctionedUser { participant_id });
    }
    Ok(())
}

/// Validates the ordering of a sanction's date range.
///
/// # Errors
///
/// Returns `DomainError::InvalidSanctionDates` if the end date precedes
/// the start date.
pub const fn validate_sanction_dates(start_date: Date, end_date: Date) -> Result<(), DomainError> {
    // Date comparison is not const; compare via Julian day.
    if end_date.to_julian_day() < start_date.to_julian_day() {
        return Err(DomainError::InvalidSanctionDates {
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// Validates that no existing sanction for the participant overlaps the
/// given range.
///
/// # Arguments
///
/// * `participant_id` - The participant being sanctioned
/// * `start_date` / `end_date` - The proposed range (inclusive)
/// * `sanctions` - All known sanctions
/// * `exclude` - A sanction id to ignore, for updates to an existing record
///
/// # Errors
///
/// Returns `DomainError::OverlappingSanction` if any other sanction for
/// the participant intersects the range.
pub fn validate_no_overlapping_sanction(
    participant_id: i64,
    start_date: Date,
    end_date: Date,
    sanctions: &[Sanction],
    exclude: Option<i64>,
) -> Result<(), DomainError> {
    for sanction in sanctions {
        if sanction.participant_id != participant_id {
            continue;
        }
        if sanction.sanction_id.is_some() && sanction.sanction_id == exclude {
            continue;
        }
        if !(sanction.end_date < start_date || sanction.start_date > end_date) {
            return Err(DomainError::OverlappingSanction { participant_id });
        }
    }
    Ok(())
}

/// Builds the sanction applied to a participant of a no-show reservation.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the end date cannot
/// be computed.
pub fn no_show_sanction(
    participant_id: i64,
    from: Date,
    reservation_id: i64,
) -> Result<Sanction, DomainError> {
    let end_date = from
        .checked_add(Duration::days(NO_SHOW_SANCTION_DAYS))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing no-show sanction end date from {from}"),
        })?;

    Ok(Sanction::new(
        participant_id,
        from,
        end_date,
        Some(format!(
            "No attendance recorded for reservation #{reservation_id}"
        )),
    ))
}
