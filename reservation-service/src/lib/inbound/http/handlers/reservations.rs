use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::Violations;
use crate::domain::reservation::errors::ReservationError;
use crate::domain::reservation::models::CreateReservationCommand;
use crate::domain::reservation::models::Reservation;
use crate::domain::reservation::models::ReservationId;
use crate::domain::reservation::models::SeatCount;
use crate::domain::showtime::models::ShowtimeId;
use crate::inbound::http::exception::HttpException;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub showtime_id: String,
    pub seats: i32,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ReservationResponse {
    pub id: String,
    pub showtime_id: String,
    pub seats: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id.to_string(),
            showtime_id: reservation.showtime_id.to_string(),
            seats: reservation.seats.get(),
            created_at: reservation.created_at,
        }
    }
}

fn parse_id(id: &str) -> Result<ReservationId, HttpException> {
    ReservationId::from_string(id).map_err(|e| ReservationError::from(e).into())
}

pub async fn create_reservation(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreateReservationRequest>,
) -> Result<ApiSuccess<ReservationResponse>, HttpException> {
    let mut violations = Violations::default();
    let showtime_id = violations.check(ShowtimeId::from_string(&body.showtime_id));
    let seats = violations.check(SeatCount::new(body.seats));

    let (Some(showtime_id), Some(seats)) = (showtime_id, seats) else {
        return Err(violations.into_exception());
    };

    let command = CreateReservationCommand {
        user_id: caller.user_id,
        showtime_id,
        seats,
    };

    state
        .reservation_service
        .create_reservation(command)
        .await
        .map_err(HttpException::from)
        .map(|reservation| ApiSuccess::created(reservation.into()))
}

pub async fn list_reservations(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<ReservationResponse>>, HttpException> {
    state
        .reservation_service
        .list_reservations(&caller.user_id)
        .await
        .map_err(HttpException::from)
        .map(|reservations| ApiSuccess::ok(reservations.into_iter().map(Into::into).collect()))
}

pub async fn get_reservation(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ReservationResponse>, HttpException> {
    let id = parse_id(&id)?;

    state
        .reservation_service
        .get_reservation(&caller.user_id, &id)
        .await
        .map_err(HttpException::from)
        .map(|reservation| ApiSuccess::ok(reservation.into()))
}

pub async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, HttpException> {
    let id = parse_id(&id)?;

    state
        .reservation_service
        .cancel_reservation(&caller.user_id, &id)
        .await
        .map_err(HttpException::from)
        .map(|_| ApiSuccess::ok(()))
}
