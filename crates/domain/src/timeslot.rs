// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The time slot catalog and time-of-day normalization.
//!
//! Slots are immutable reference data fetched once. Adjacency, contiguity,
//! and range expansion are all defined by `order_index`, never by arithmetic
//! on slot ids. With densely numbered ids the results coincide with integer
//! range expansion; with gaps or reordered ids they stay correct.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Time;

/// A fixed daily time interval, referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// The canonical slot identifier.
    pub slot_id: i64,
    /// Position of this slot in the daily ordering.
    pub order_index: u32,
    /// Start of the interval.
    pub starts_at: Time,
    /// End of the interval (exclusive of the next slot's start).
    pub ends_at: Time,
    /// Optional display description (e.g. "08:00 - 09:00").
    pub description: Option<String>,
}

impl TimeSlot {
    /// Creates a new `TimeSlot`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeValue` if the end time does not
    /// come after the start time.
    pub fn new(
        slot_id: i64,
        order_index: u32,
        starts_at: Time,
        ends_at: Time,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        if ends_at <= starts_at {
            return Err(DomainError::InvalidTimeValue(format!(
                "slot {slot_id} ends at {ends_at} which is not after its start {starts_at}"
            )));
        }
        Ok(Self {
            slot_id,
            order_index,
            starts_at,
            ends_at,
            description,
        })
    }
}

/// The ordered catalog of daily time slots.
///
/// Construction validates the catalog once; every later lookup can then
/// trust id and order-index uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCatalog {
    /// Slots sorted by `order_index`.
    slots: Vec<TimeSlot>,
}

impl SlotCatalog {
    /// Creates a catalog from a list of slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, or if two slots share a slot
    /// id or an order index.
    pub fn new(mut slots: Vec<TimeSlot>) -> Result<Self, DomainError> {
        if slots.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }

        slots.sort_by_key(|s| s.order_index);

        for pair in slots.windows(2) {
            if pair[0].order_index == pair[1].order_index {
                return Err(DomainError::DuplicateOrderIndex(pair[0].order_index));
            }
        }

        let mut ids: Vec<i64> = slots.iter().map(|s| s.slot_id).collect();
        ids.sort_unstable();
        for pair in ids.windows(2) {
            if pair[0] == pair[1] {
                return Err(DomainError::DuplicateSlotId(pair[0]));
            }
        }

        Ok(Self { slots })
    }

    /// Returns the number of slots in the catalog.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns whether the catalog is empty. Always false for a
    /// successfully constructed catalog.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the slots in catalog order.
    #[must_use]
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Looks up a slot by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownSlot` if the id is not in the catalog.
    pub fn slot(&self, slot_id: i64) -> Result<&TimeSlot, DomainError> {
        self.slots
            .iter()
            .find(|s| s.slot_id == slot_id)
            .ok_or(DomainError::UnknownSlot(slot_id))
    }

    /// Returns the order index of a slot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownSlot` if the id is not in the catalog.
    pub fn order_of(&self, slot_id: i64) -> Result<u32, DomainError> {
        Ok(self.slot(slot_id)?.order_index)
    }

    /// Expands an inclusive slot range into the ids of every slot it
    /// covers, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is unknown, or if the start
    /// slot orders after the end slot.
    pub fn expand_range(
        &self,
        start_slot_id: i64,
        end_slot_id: i64,
    ) -> Result<Vec<i64>, DomainError> {
        let start_order = self.order_of(start_slot_id)?;
        let end_order = self.order_of(end_slot_id)?;

        if start_order > end_order {
            return Err(DomainError::InvalidSlotRange {
                start_slot_id,
                end_slot_id,
            });
        }

        Ok(self
            .slots
            .iter()
            .filter(|s| s.order_index >= start_order && s.order_index <= end_order)
            .map(|s| s.slot_id)
            .collect())
    }

    /// Returns the number of slots an inclusive range covers.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is unknown, or if the start
    /// slot orders after the end slot.
    pub fn span_len(&self, start_slot_id: i64, end_slot_id: i64) -> Result<u32, DomainError> {
        let start_order = self.order_of(start_slot_id)?;
        let end_order = self.order_of(end_slot_id)?;

        end_order
            .checked_sub(start_order)
            .map(|diff| diff + 1)
            .ok_or(DomainError::InvalidSlotRange {
                start_slot_id,
                end_slot_id,
            })
    }

    /// Checks whether a set of slot ids forms a contiguous run in the
    /// catalog ordering.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownSlot` if any id is not in the catalog.
    pub fn are_contiguous(&self, slot_ids: &[i64]) -> Result<bool, DomainError> {
        let mut orders: Vec<u32> = Vec::with_capacity(slot_ids.len());
        for slot_id in slot_ids {
            orders.push(self.order_of(*slot_id)?);
        }
        orders.sort_unstable();

        Ok(orders.windows(2).all(|pair| pair[1] == pair[0] + 1))
    }
}

/// A time-of-day value as it may arrive at the API boundary.
///
/// The external service sends time-of-day values either as formatted
/// strings ("HH:MM:SS" or "HH:MM") or as seconds since midnight. Both
/// forms normalize to a single internal `time::Time` before any
/// contiguity or overlap arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Seconds since midnight.
    Seconds(u32),
    /// A formatted time string.
    Text(String),
}

impl TimeValue {
    /// Normalizes this value to a `time::Time`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeValue` if the value does not
    /// describe a valid time of day.
    pub fn normalize(&self) -> Result<Time, DomainError> {
        match self {
            Self::Seconds(seconds) => time_from_seconds(*seconds),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::InvalidTimeValue(String::from(
                        "empty time string",
                    )));
                }
                // A bare integer string is seconds since midnight.
                if trimmed.bytes().all(|b| b.is_ascii_digit()) {
                    let seconds: u32 = trimmed.parse().map_err(|_| {
                        DomainError::InvalidTimeValue(trimmed.to_string())
                    })?;
                    return time_from_seconds(seconds);
                }

                let parts: Vec<&str> = trimmed.split(':').collect();
                if parts.len() != 2 && parts.len() != 3 {
                    return Err(DomainError::InvalidTimeValue(trimmed.to_string()));
                }

                let mut components: Vec<u8> = Vec::with_capacity(3);
                for part in &parts {
                    components.push(part.parse().map_err(|_| {
                        DomainError::InvalidTimeValue(trimmed.to_string())
                    })?);
                }
                let second = if components.len() == 3 { components[2] } else { 0 };

                Time::from_hms(components[0], components[1], second)
                    .map_err(|_| DomainError::InvalidTimeValue(trimmed.to_string()))
            }
        }
    }
}

/// Converts seconds since midnight to a `time::Time`.
fn time_from_seconds(seconds: u32) -> Result<Time, DomainError> {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let hours = u8::try_from(hours)
        .map_err(|_| DomainError::InvalidTimeValue(format!("{seconds} seconds since midnight")))?;
    #[allow(clippy::cast_possible_truncation)]
    let result = Time::from_hms(hours, (minutes % 60) as u8, (secs % 60) as u8);
    result.map_err(|_| DomainError::InvalidTimeValue(format!("{seconds} seconds since midnight")))
}
