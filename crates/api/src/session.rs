// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant sessions.
//!
//! A session identifies who is acting. Opening one is the only place
//! the API layer resolves a raw participant id; every handler takes the
//! session it produced. There is no token or credential handling here:
//! the hosting process is trusted to have authenticated the caller and
//! the session only establishes identity against the participant
//! registry.

use crate::error::ApiError;
use reserva::State;
use reserva_audit::Actor;
use reserva_domain::Role;

/// An authenticated participant session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The acting participant.
    pub participant_id: i64,
    /// The participant's role, resolved at open time.
    pub role: Role,
}

impl Session {
    /// Opens a session for a participant.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if the participant is
    /// unknown or deactivated.
    pub fn open(state: &State, participant_id: i64) -> Result<Self, ApiError> {
        let participant = state.active_participant(participant_id).map_err(|err| {
            ApiError::AuthenticationFailed {
                reason: err.to_string(),
            }
        })?;
        Ok(Self {
            participant_id,
            role: participant.role,
        })
    }

    /// Converts this session into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::participant(self.participant_id)
    }
}
