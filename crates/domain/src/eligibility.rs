// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room eligibility policy.
//!
//! The rule table is evaluated as ordered checks, first match wins:
//! - faculty may book any room type
//! - postgraduate students may book postgraduate and free rooms
//! - undergraduate students may book free rooms only
//! - admins are not booking actors in this flow

use crate::error::DomainError;
use crate::types::{Role, RoomType};

/// Decides whether a role may book a room of the given type.
///
/// Pure function of `(role, room_type)`; no side effects.
#[must_use]
pub const fn can_book(role: Role, room_type: RoomType) -> bool {
    match role {
        Role::Faculty => true,
        Role::Postgraduate => matches!(room_type, RoomType::Postgraduate | RoomType::Free),
        Role::Undergraduate => matches!(room_type, RoomType::Free),
        Role::Admin => false,
    }
}

/// Validates that a role may book a room of the given type.
///
/// # Errors
///
/// Returns `DomainError::RoomTypeNotAllowed` if the eligibility table
/// rejects the combination.
pub const fn ensure_can_book(role: Role, room_type: RoomType) -> Result<(), DomainError> {
    if can_book(role, room_type) {
        Ok(())
    } else {
        Err(DomainError::RoomTypeNotAllowed { role, room_type })
    }
}
