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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use reserva::State;
use reserva_api::{
    ApiError, ApiOutcome, CancelReservationResponse, CreateReservationRequest,
    CreateReservationResponse, CreateReservationWire, OccupancyResponse, RecordAttendanceRequest,
    RecordAttendanceResponse, ReservationInfo, RespondInvitationRequest, RespondInvitationResponse,
    RoomInfo, Session, SweepOutcome, SweepResponse, TimeSlotInfo, cancel_reservation,
    create_reservation, get_occupancy, list_my_reservations, list_rooms, list_time_slots,
    parse_wire_date, record_attendance, respond_to_invitation, run_sweep,
};
use reserva_audit::{AuditEvent, Cause, StateSnapshot};
use reserva_domain::{DomainError, Participant, Role, Room, RoomType, SlotCatalog, TimeSlot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::macros::time;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use tokio::sync::Mutex;
use tracing::{error, info};

/// Command-line arguments for the server.
#[derive(Debug, Parser)]
#[command(name = "reserva-server")]
#[command(about = "HTTP server for the room reservation system")]
struct Args {
    /// Port to listen on.
    #[arg(short, long, default_value = "3000")]
    port: u16,
    /// Address to bind to.
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Everything the server mutates, behind a single lock.
#[derive(Debug)]
struct SharedState {
    /// The current reservation system state.
    state: State,
    /// Audit events recorded since startup, oldest first.
    audit_log: Vec<AuditEvent>,
}

/// Application state shared across request handlers.
#[derive(Debug, Clone)]
struct AppState {
    /// The shared mutable state.
    shared: Arc<Mutex<SharedState>>,
}

/// Request body for POST `/reservations`.
#[derive(Debug, Deserialize)]
struct CreateReservationApiRequest {
    /// The organizer creating the reservation.
    participant_id: i64,
    /// The cause ID for audit purposes.
    cause_id: String,
    /// The cause description for audit purposes.
    cause_description: String,
    /// The reservation payload, accepted under legacy field names too.
    #[serde(flatten)]
    reservation: CreateReservationWire,
}

/// Request body for POST `/reservations/{id}/cancel`.
#[derive(Debug, Deserialize)]
struct CancelReservationApiRequest {
    /// The organizer cancelling the reservation.
    participant_id: i64,
    /// The cause ID for audit purposes.
    cause_id: String,
    /// The cause description for audit purposes.
    cause_description: String,
}

/// Request body for POST `/reservations/{id}/attendance`.
#[derive(Debug, Deserialize)]
struct RecordAttendanceApiRequest {
    /// The organizer recording attendance.
    organizer_id: i64,
    /// The cause ID for audit purposes.
    cause_id: String,
    /// The cause description for audit purposes.
    cause_description: String,
    /// The participant whose attendance is being recorded.
    #[serde(alias = "idUsuario", alias = "userId")]
    participant_id: i64,
    /// Whether the participant was present.
    #[serde(alias = "presente")]
    present: bool,
}

/// Request body for POST `/reservations/{id}/respond`.
#[derive(Debug, Deserialize)]
struct RespondInvitationApiRequest {
    /// The invited participant responding.
    participant_id: i64,
    /// The cause ID for audit purposes.
    cause_id: String,
    /// The cause description for audit purposes.
    cause_description: String,
    /// Whether the invitation is accepted.
    #[serde(alias = "acepta")]
    accept: bool,
}

/// Request body for POST `/admin/sweep`.
#[derive(Debug, Deserialize)]
struct SweepApiRequest {
    /// The cause ID for audit purposes.
    cause_id: String,
    /// The cause description for audit purposes.
    cause_description: String,
}

/// Query parameters for GET `/reservations`.
#[derive(Debug, Deserialize)]
struct ListReservationsQuery {
    /// The participant whose reservations to list.
    participant_id: i64,
}

/// Query parameters for GET `/rooms`.
#[derive(Debug, Deserialize)]
struct ListRoomsQuery {
    /// The participant the bookability flags are computed for.
    participant_id: i64,
}

/// Query parameters for GET `/rooms/{id}/occupancy`.
#[derive(Debug, Deserialize)]
struct OccupancyQuery {
    /// The date to query, as `YYYY-MM-DD`.
    date: String,
}

/// Serializable representation of an `AuditEvent` for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuditEventResponse {
    /// The actor ID.
    actor_id: String,
    /// The actor type.
    actor_type: String,
    /// The cause ID.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The action name.
    action_name: String,
    /// Optional action details.
    action_details: Option<String>,
    /// The room the transition concerns.
    room_id: i64,
    /// The reservation date.
    date: String,
    /// State before the transition, if the reservation existed.
    before_snapshot: Option<String>,
    /// State after the transition.
    after_snapshot: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Returns the current wall-clock time in UTC.
fn current_time() -> PrimitiveDateTime {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Renders a state snapshot as a single audit log line.
fn snapshot_to_string(snapshot: &StateSnapshot) -> String {
    let reservation: String = snapshot
        .reservation_id
        .map_or_else(|| String::from("unassigned"), |id| id.to_string());
    format!(
        "reservation={reservation} status={} participants=[{}]",
        snapshot.status.as_str(),
        snapshot.participants.join(", ")
    )
}

/// Converts an `AuditEvent` to an `AuditEventResponse`.
fn audit_event_to_response(event: &AuditEvent) -> AuditEventResponse {
    AuditEventResponse {
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        room_id: event.scope.room_id,
        date: event.scope.date.clone(),
        before_snapshot: event.before.as_ref().map(snapshot_to_string),
        after_snapshot: snapshot_to_string(&event.after),
    }
}

/// Handler for POST `/reservations` endpoint.
///
/// Creates a reservation on behalf of the requesting participant.
async fn handle_create_reservation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateReservationApiRequest>,
) -> Result<Json<CreateReservationResponse>, HttpError> {
    info!(
        participant_id = req.participant_id,
        room_id = req.reservation.room_id,
        "Handling create_reservation request"
    );

    let request: CreateReservationRequest = req.reservation.into_request()?;
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let now: PrimitiveDateTime = current_time();

    let mut shared = app_state.shared.lock().await;
    let session: Session = Session::open(&shared.state, req.participant_id)?;
    let ApiOutcome {
        response,
        audit_event,
        new_state,
    } = create_reservation(&shared.state, &session, request, cause, now)?;
    shared.state = new_state;
    shared.audit_log.push(audit_event);
    drop(shared);

    info!(
        reservation_id = response.reservation_id,
        "Successfully created reservation"
    );

    Ok(Json(response))
}

/// Handler for POST `/reservations/{id}/cancel` endpoint.
///
/// Cancels a reservation before its start time.
async fn handle_cancel_reservation(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<i64>,
    Json(req): Json<CancelReservationApiRequest>,
) -> Result<Json<CancelReservationResponse>, HttpError> {
    info!(
        participant_id = req.participant_id,
        reservation_id = reservation_id,
        "Handling cancel_reservation request"
    );

    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let now: PrimitiveDateTime = current_time();

    let mut shared = app_state.shared.lock().await;
    let session: Session = Session::open(&shared.state, req.participant_id)?;
    let ApiOutcome {
        response,
        audit_event,
        new_state,
    } = cancel_reservation(&shared.state, &session, reservation_id, cause, now)?;
    shared.state = new_state;
    shared.audit_log.push(audit_event);
    drop(shared);

    info!(
        reservation_id = reservation_id,
        "Successfully cancelled reservation"
    );

    Ok(Json(response))
}

/// Handler for POST `/reservations/{id}/attendance` endpoint.
///
/// Records one participant's attendance within the confirmation window.
async fn handle_record_attendance(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<i64>,
    Json(req): Json<RecordAttendanceApiRequest>,
) -> Result<Json<RecordAttendanceResponse>, HttpError> {
    info!(
        organizer_id = req.organizer_id,
        reservation_id = reservation_id,
        participant_id = req.participant_id,
        present = req.present,
        "Handling record_attendance request"
    );

    let request: RecordAttendanceRequest = RecordAttendanceRequest {
        participant_id: req.participant_id,
        present: req.present,
    };
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let now: PrimitiveDateTime = current_time();

    let mut shared = app_state.shared.lock().await;
    let session: Session = Session::open(&shared.state, req.organizer_id)?;
    let ApiOutcome {
        response,
        audit_event,
        new_state,
    } = record_attendance(&shared.state, &session, reservation_id, request, cause, now)?;
    shared.state = new_state;
    shared.audit_log.push(audit_event);
    drop(shared);

    info!(
        reservation_id = reservation_id,
        participant_id = req.participant_id,
        "Successfully recorded attendance"
    );

    Ok(Json(response))
}

/// Handler for POST `/reservations/{id}/respond` endpoint.
///
/// Accepts or declines an invitation before the reservation starts.
async fn handle_respond_to_invitation(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<i64>,
    Json(req): Json<RespondInvitationApiRequest>,
) -> Result<Json<RespondInvitationResponse>, HttpError> {
    info!(
        participant_id = req.participant_id,
        reservation_id = reservation_id,
        accept = req.accept,
        "Handling respond_to_invitation request"
    );

    let request: RespondInvitationRequest = RespondInvitationRequest { accept: req.accept };
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let now: PrimitiveDateTime = current_time();

    let mut shared = app_state.shared.lock().await;
    let session: Session = Session::open(&shared.state, req.participant_id)?;
    let ApiOutcome {
        response,
        audit_event,
        new_state,
    } = respond_to_invitation(&shared.state, &session, reservation_id, request, cause, now)?;
    shared.state = new_state;
    shared.audit_log.push(audit_event);
    drop(shared);

    info!(
        reservation_id = reservation_id,
        "Successfully recorded invitation response"
    );

    Ok(Json(response))
}

/// Handler for POST `/admin/sweep` endpoint.
///
/// Closes out every reservation whose day and end time have passed.
async fn handle_sweep(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SweepApiRequest>,
) -> Result<Json<SweepResponse>, HttpError> {
    info!("Handling sweep request");

    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let now: PrimitiveDateTime = current_time();

    let mut shared = app_state.shared.lock().await;
    let SweepOutcome {
        response,
        audit_events,
        new_state,
    } = run_sweep(&shared.state, &cause, now)?;
    shared.state = new_state;
    shared.audit_log.extend(audit_events);
    drop(shared);

    info!(
        finalized = response.finalized.len(),
        no_shows = response.no_shows.len(),
        sanctions_applied = response.sanctions_applied,
        "Successfully swept elapsed reservations"
    );

    Ok(Json(response))
}

/// Handler for GET `/reservations` endpoint.
///
/// Lists every reservation the participant appears on.
async fn handle_list_reservations(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<Json<Vec<ReservationInfo>>, HttpError> {
    info!(
        participant_id = query.participant_id,
        "Handling list_reservations request"
    );

    let now: PrimitiveDateTime = current_time();

    let shared = app_state.shared.lock().await;
    let session: Session = Session::open(&shared.state, query.participant_id)?;
    let reservations: Vec<ReservationInfo> =
        list_my_reservations(&shared.state, &session, now)?;
    drop(shared);

    Ok(Json(reservations))
}

/// Handler for GET `/rooms` endpoint.
///
/// Lists every room, flagged by whether the participant may book it.
async fn handle_list_rooms(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListRoomsQuery>,
) -> Result<Json<Vec<RoomInfo>>, HttpError> {
    info!(
        participant_id = query.participant_id,
        "Handling list_rooms request"
    );

    let shared = app_state.shared.lock().await;
    let session: Session = Session::open(&shared.state, query.participant_id)?;
    let rooms: Vec<RoomInfo> = list_rooms(&shared.state, &session);
    drop(shared);

    Ok(Json(rooms))
}

/// Handler for GET `/timeslots` endpoint.
///
/// Lists the daily slot catalog.
async fn handle_list_time_slots(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<TimeSlotInfo>>, HttpError> {
    info!("Handling list_time_slots request");

    let shared = app_state.shared.lock().await;
    let slots: Vec<TimeSlotInfo> = list_time_slots(&shared.state)?;
    drop(shared);

    Ok(Json(slots))
}

/// Handler for GET `/rooms/{id}/occupancy` endpoint.
///
/// Returns the occupied slots for a room on a date.
async fn handle_get_occupancy(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
    Query(query): Query<OccupancyQuery>,
) -> Result<Json<OccupancyResponse>, HttpError> {
    info!(
        room_id = room_id,
        date = %query.date,
        "Handling get_occupancy request"
    );

    let date: Date = parse_wire_date(&query.date)?;

    let shared = app_state.shared.lock().await;
    let response: OccupancyResponse = get_occupancy(&shared.state, room_id, date)?;
    drop(shared);

    Ok(Json(response))
}

/// Handler for GET `/audit/timeline` endpoint.
///
/// Returns every audit event recorded since startup, oldest first.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
) -> Json<Vec<AuditEventResponse>> {
    info!("Handling get_audit_timeline request");

    let shared = app_state.shared.lock().await;
    let events: Vec<AuditEventResponse> =
        shared.audit_log.iter().map(audit_event_to_response).collect();
    drop(shared);

    Json(events)
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/reservations", post(handle_create_reservation))
        .route("/reservations", get(handle_list_reservations))
        .route(
            "/reservations/{reservation_id}/cancel",
            post(handle_cancel_reservation),
        )
        .route(
            "/reservations/{reservation_id}/attendance",
            post(handle_record_attendance),
        )
        .route(
            "/reservations/{reservation_id}/respond",
            post(handle_respond_to_invitation),
        )
        .route("/rooms", get(handle_list_rooms))
        .route("/rooms/{room_id}/occupancy", get(handle_get_occupancy))
        .route("/timeslots", get(handle_list_time_slots))
        .route("/admin/sweep", post(handle_sweep))
        .route("/audit/timeline", get(handle_get_audit_timeline))
        .with_state(app_state)
}

/// Builds the reference data the server starts with: ten hourly slots
/// from 08:00 to 18:00, four rooms across two buildings, and a small
/// participant roster.
fn seed_state() -> Result<State, DomainError> {
    let hours: [(i64, u32, Time, Time); 10] = [
        (1, 0, time!(8:00), time!(9:00)),
        (2, 1, time!(9:00), time!(10:00)),
        (3, 2, time!(10:00), time!(11:00)),
        (4, 3, time!(11:00), time!(12:00)),
        (5, 4, time!(12:00), time!(13:00)),
        (6, 5, time!(13:00), time!(14:00)),
        (7, 6, time!(14:00), time!(15:00)),
        (8, 7, time!(15:00), time!(16:00)),
        (9, 8, time!(16:00), time!(17:00)),
        (10, 9, time!(17:00), time!(18:00)),
    ];
    let mut slots: Vec<TimeSlot> = Vec::with_capacity(hours.len());
    for (slot_id, order_index, starts_at, ends_at) in hours {
        slots.push(TimeSlot::new(slot_id, order_index, starts_at, ends_at, None)?);
    }
    let catalog: SlotCatalog = SlotCatalog::new(slots)?;

    let rooms: Vec<Room> = vec![
        Room::new(1, 1, String::from("Study Room A"), RoomType::Free, 6),
        Room::new(2, 1, String::from("Study Room B"), RoomType::Free, 4),
        Room::new(3, 2, String::from("Postgraduate Lab"), RoomType::Postgraduate, 12),
        Room::new(4, 2, String::from("Faculty Meeting Room"), RoomType::Faculty, 8),
    ];

    let participants: Vec<Participant> = vec![
        Participant::new(
            1,
            String::from("Diego Rivera"),
            String::from("diego.rivera@university.edu"),
            Role::Undergraduate,
        ),
        Participant::new(
            2,
            String::from("Lucia Moreno"),
            String::from("lucia.moreno@university.edu"),
            Role::Undergraduate,
        ),
        Participant::new(
            3,
            String::from("Marta Salas"),
            String::from("marta.salas@university.edu"),
            Role::Postgraduate,
        ),
        Participant::new(
            4,
            String::from("Elena Ortiz"),
            String::from("elena.ortiz@university.edu"),
            Role::Faculty,
        ),
        Participant::new(
            5,
            String::from("Front Desk"),
            String::from("front.desk@university.edu"),
            Role::Admin,
        ),
    ];

    Ok(State::new(catalog, rooms, participants))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing reservation server");

    let state: State = seed_state()?;
    let app_state: AppState = AppState {
        shared: Arc::new(Mutex::new(SharedState {
            state,
            audit_log: Vec::new(),
        })),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
