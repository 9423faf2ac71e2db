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

mod capabilities;
mod error;
mod handlers;
mod request_response;
mod session;
mod wire;

#[cfg(test)]
mod tests;

pub use capabilities::{Capability, ReservationCapabilities, compute_reservation_capabilities};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    ApiOutcome, SweepOutcome, cancel_reservation, create_reservation, get_occupancy,
    list_my_reservations, list_rooms, list_time_slots, record_attendance, respond_to_invitation,
    run_sweep,
};
pub use request_response::{
    CancelReservationResponse, CreateReservationRequest, CreateReservationResponse,
    OccupancyResponse, ParticipantEntryInfo, RecordAttendanceRequest, RecordAttendanceResponse,
    ReservationInfo, RespondInvitationRequest, RespondInvitationResponse, RoomInfo, SweepResponse,
    TimeSlotInfo,
};
pub use session::Session;
pub use wire::{
    CreateReservationWire, normalize_wire_time, parse_wire_date, parse_wire_role,
    parse_wire_room_type,
};
