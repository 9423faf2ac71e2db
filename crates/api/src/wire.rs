// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Normalization of legacy wire formats.
//!
//! The previous front ends never agreed on field names or value
//! vocabularies: the same room id arrives as `idSala`, `id_sala`, or
//! `roomId`, roles and room types arrive in a Spanish legacy
//! vocabulary, and times arrive as either clock strings or seconds
//! since midnight. Everything is folded into the canonical form here,
//! at the boundary, so nothing past this module ever sees an alias.

use crate::error::ApiError;
use crate::request_response::CreateReservationRequest;
use reserva_domain::{Role, RoomType, TimeValue};
use serde::Deserialize;
use time::Date;
use time::macros::format_description;

/// Parses a wire date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the string is not a valid date.
pub fn parse_wire_date(s: &str) -> Result<Date, ApiError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(s, &format).map_err(|err| ApiError::InvalidInput {
        field: String::from("date"),
        message: format!("Failed to parse date '{s}': {err}"),
    })
}

/// Parses a role, accepting the legacy Spanish vocabulary.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the string matches neither the
/// canonical nor the legacy vocabulary.
pub fn parse_wire_role(s: &str) -> Result<Role, ApiError> {
    match s {
        "alumno_grado" => Ok(Role::Undergraduate),
        "alumno_posgrado" => Ok(Role::Postgraduate),
        "docente" => Ok(Role::Faculty),
        "administrador" => Ok(Role::Admin),
        other => Role::parse(other).map_err(|err| ApiError::InvalidInput {
            field: String::from("role"),
            message: err.to_string(),
        }),
    }
}

/// Parses a room type, accepting the legacy Spanish vocabulary.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the string matches neither the
/// canonical nor the legacy vocabulary.
pub fn parse_wire_room_type(s: &str) -> Result<RoomType, ApiError> {
    match s {
        "libre" => Ok(RoomType::Free),
        "posgrado" => Ok(RoomType::Postgraduate),
        "docente" => Ok(RoomType::Faculty),
        other => RoomType::parse(other).map_err(|err| ApiError::InvalidInput {
            field: String::from("room_type"),
            message: err.to_string(),
        }),
    }
}

/// Normalizes a wire time value to a `time::Time`.
///
/// Accepts `HH:MM:SS`, `HH:MM`, and integer or digit-string seconds
/// since midnight.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the value is not a valid time
/// of day.
pub fn normalize_wire_time(value: &TimeValue) -> Result<time::Time, ApiError> {
    value.normalize().map_err(|err| ApiError::InvalidInput {
        field: String::from("time"),
        message: err.to_string(),
    })
}

/// A reservation creation payload as any legacy client sends it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateReservationWire {
    /// The room id, under any of its historical names.
    #[serde(alias = "idSala", alias = "id_sala", alias = "roomId")]
    pub room_id: i64,
    /// The reservation date as `YYYY-MM-DD`.
    #[serde(alias = "fecha")]
    pub date: String,
    /// The selected slot ids.
    #[serde(alias = "idsBloques", alias = "slotIds", alias = "bloques")]
    pub slot_ids: Vec<i64>,
    /// The invited participant ids.
    #[serde(default, alias = "participantes", alias = "participantIds")]
    pub participant_ids: Vec<i64>,
}

impl CreateReservationWire {
    /// Converts this payload into the canonical request form.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the date string is invalid.
    pub fn into_request(self) -> Result<CreateReservationRequest, ApiError> {
        let date: Date = parse_wire_date(&self.date)?;
        Ok(CreateReservationRequest {
            room_id: self.room_id,
            date,
            slot_ids: self.slot_ids,
            participant_ids: self.participant_ids,
        })
    }
}
