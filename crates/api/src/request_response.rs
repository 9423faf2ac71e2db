// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use time::Date;

/// API request to create a reservation.
///
/// This DTO is distinct from domain types and represents the API
/// contract after wire normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReservationRequest {
    /// The room to reserve.
    pub room_id: i64,
    /// The reservation date.
    pub date: Date,
    /// The selected slot ids.
    pub slot_ids: Vec<i64>,
    /// The invited participant ids.
    pub participant_ids: Vec<i64>,
}

/// API response for a successful reservation creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateReservationResponse {
    /// The assigned reservation identifier.
    pub reservation_id: i64,
    /// The reserved room.
    pub room_id: i64,
    /// The reservation date.
    pub date: Date,
    /// First slot of the inclusive range.
    pub start_slot_id: i64,
    /// Last slot of the inclusive range.
    pub end_slot_id: i64,
    /// The reservation's lifecycle status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancelReservationResponse {
    /// The cancelled reservation.
    pub reservation_id: i64,
    /// The reservation's lifecycle status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to record one participant's attendance.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RecordAttendanceRequest {
    /// The participant whose attendance is recorded.
    #[serde(alias = "idUsuario", alias = "userId")]
    pub participant_id: i64,
    /// Whether the participant is present.
    #[serde(alias = "presente")]
    pub present: bool,
}

/// API response for a recorded attendance.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordAttendanceResponse {
    /// The reservation the attendance was recorded on.
    pub reservation_id: i64,
    /// The participant whose attendance was recorded.
    pub participant_id: i64,
    /// The recorded attendance value.
    pub attendance: String,
    /// The reservation's lifecycle status after the recording.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to answer an invitation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RespondInvitationRequest {
    /// Whether the invitation is accepted.
    #[serde(alias = "acepta")]
    pub accept: bool,
}

/// API response for an answered invitation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RespondInvitationResponse {
    /// The reservation the response applies to.
    pub reservation_id: i64,
    /// The responding participant.
    pub participant_id: i64,
    /// The resulting participation status.
    pub participation: String,
    /// A success message.
    pub message: String,
}

/// One participant entry on a reservation, for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParticipantEntryInfo {
    /// The participant.
    pub participant_id: i64,
    /// Invitation state.
    pub participation: String,
    /// Recorded attendance.
    pub attendance: String,
}

/// A reservation as returned by read-only queries.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReservationInfo {
    /// The reservation identifier.
    pub reservation_id: i64,
    /// The reserved room.
    pub room_id: i64,
    /// The reservation date.
    pub date: Date,
    /// First slot of the inclusive range.
    pub start_slot_id: i64,
    /// Last slot of the inclusive range.
    pub end_slot_id: i64,
    /// The reservation's lifecycle status.
    pub status: String,
    /// The organizer.
    pub organizer_id: i64,
    /// All participant entries.
    pub participants: Vec<ParticipantEntryInfo>,
    /// What the querying participant may still do with it.
    pub capabilities: crate::capabilities::ReservationCapabilities,
}

/// API response for an occupancy query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OccupancyResponse {
    /// The queried room.
    pub room_id: i64,
    /// The queried date.
    pub date: Date,
    /// Slot ids taken by Active or Confirmed reservations.
    pub occupied_slot_ids: Vec<i64>,
}

/// One catalog slot, for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeSlotInfo {
    /// The slot identifier.
    pub slot_id: i64,
    /// Position in the daily ordering.
    pub order_index: u32,
    /// Start of the interval, `HH:MM:SS`.
    pub starts_at: String,
    /// End of the interval, `HH:MM:SS`.
    pub ends_at: String,
    /// Optional display description.
    pub description: Option<String>,
}

/// One room, for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomInfo {
    /// The room identifier.
    pub room_id: i64,
    /// The building the room belongs to.
    pub building_id: i64,
    /// The room's display name.
    pub name: String,
    /// The room type.
    pub room_type: String,
    /// Maximum participants per reservation.
    pub capacity: u32,
    /// Whether the querying participant's role may book this room.
    pub bookable: bool,
}

/// API response for an elapsed-reservation sweep.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SweepResponse {
    /// Reservations finalized by the sweep.
    pub finalized: Vec<i64>,
    /// Reservations marked no-show by the sweep.
    pub no_shows: Vec<i64>,
    /// Sanctions issued for no-shows.
    pub sanctions_applied: usize,
    /// A summary message.
    pub message: String,
}
