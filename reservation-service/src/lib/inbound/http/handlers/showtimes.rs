use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::Violations;
use crate::domain::movie::models::MovieId;
use crate::domain::showtime::errors::ShowtimeError;
use crate::domain::showtime::models::CreateShowtimeCommand;
use crate::domain::showtime::models::Price;
use crate::domain::showtime::models::SeatAvailability;
use crate::domain::showtime::models::Showtime;
use crate::domain::showtime::models::ShowtimeId;
use crate::domain::showtime::models::UpdateShowtimeCommand;
use crate::domain::theater::models::TheaterId;
use crate::inbound::http::exception::HttpException;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateShowtimeRequest {
    pub movie_id: String,
    pub theater_id: String,
    pub starts_at: DateTime<Utc>,
    pub price_cents: i64,
}

impl CreateShowtimeRequest {
    fn try_into_command(self) -> Result<CreateShowtimeCommand, HttpException> {
        let mut violations = Violations::default();

        let movie_id = violations.check(MovieId::from_string(&self.movie_id));
        let theater_id = violations.check(TheaterId::from_string(&self.theater_id));
        let price = violations.check(Price::from_cents(self.price_cents));

        match (movie_id, theater_id, price) {
            (Some(movie_id), Some(theater_id), Some(price)) => Ok(CreateShowtimeCommand {
                movie_id,
                theater_id,
                starts_at: self.starts_at,
                price,
            }),
            _ => Err(violations.into_exception()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateShowtimeRequest {
    pub starts_at: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
}

impl UpdateShowtimeRequest {
    fn try_into_command(self) -> Result<UpdateShowtimeCommand, HttpException> {
        let price = self
            .price_cents
            .map(Price::from_cents)
            .transpose()
            .map_err(ShowtimeError::from)?;

        Ok(UpdateShowtimeCommand {
            starts_at: self.starts_at,
            price,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ShowtimeQuery {
    pub movie_id: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ShowtimeResponse {
    pub id: String,
    pub movie_id: String,
    pub theater_id: String,
    pub starts_at: DateTime<Utc>,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Showtime> for ShowtimeResponse {
    fn from(showtime: Showtime) -> Self {
        Self {
            id: showtime.id.to_string(),
            movie_id: showtime.movie_id.to_string(),
            theater_id: showtime.theater_id.to_string(),
            starts_at: showtime.starts_at,
            price_cents: showtime.price.cents(),
            created_at: showtime.created_at,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AvailabilityResponse {
    pub showtime_id: String,
    pub capacity: i64,
    pub reserved: i64,
    pub available: i64,
}

impl From<SeatAvailability> for AvailabilityResponse {
    fn from(availability: SeatAvailability) -> Self {
        Self {
            showtime_id: availability.showtime_id.to_string(),
            capacity: availability.capacity,
            reserved: availability.reserved,
            available: availability.available,
        }
    }
}

fn parse_id(id: &str) -> Result<ShowtimeId, HttpException> {
    ShowtimeId::from_string(id).map_err(|e| ShowtimeError::from(e).into())
}

pub async fn create_showtime(
    State(state): State<AppState>,
    Json(body): Json<CreateShowtimeRequest>,
) -> Result<ApiSuccess<ShowtimeResponse>, HttpException> {
    let command = body.try_into_command()?;

    state
        .showtime_service
        .create_showtime(command)
        .await
        .map_err(HttpException::from)
        .map(|showtime| ApiSuccess::created(showtime.into()))
}

pub async fn list_showtimes(
    State(state): State<AppState>,
    Query(query): Query<ShowtimeQuery>,
) -> Result<ApiSuccess<Vec<ShowtimeResponse>>, HttpException> {
    let movie_id = query
        .movie_id
        .map(|id| MovieId::from_string(&id))
        .transpose()
        .map_err(ShowtimeError::from)?;

    state
        .showtime_service
        .list_showtimes(movie_id)
        .await
        .map_err(HttpException::from)
        .map(|showtimes| ApiSuccess::ok(showtimes.into_iter().map(Into::into).collect()))
}

pub async fn get_showtime(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ShowtimeResponse>, HttpException> {
    let id = parse_id(&id)?;

    state
        .showtime_service
        .get_showtime(&id)
        .await
        .map_err(HttpException::from)
        .map(|showtime| ApiSuccess::ok(showtime.into()))
}

pub async fn get_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<AvailabilityResponse>, HttpException> {
    let id = parse_id(&id)?;

    state
        .showtime_service
        .get_availability(&id)
        .await
        .map_err(HttpException::from)
        .map(|availability| ApiSuccess::ok(availability.into()))
}

pub async fn update_showtime(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateShowtimeRequest>,
) -> Result<ApiSuccess<ShowtimeResponse>, HttpException> {
    let id = parse_id(&id)?;
    let command = body.try_into_command()?;

    state
        .showtime_service
        .update_showtime(&id, command)
        .await
        .map_err(HttpException::from)
        .map(|showtime| ApiSuccess::ok(showtime.into()))
}

pub async fn delete_showtime(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, HttpException> {
    let id = parse_id(&id)?;

    state
        .showtime_service
        .delete_showtime(&id)
        .await
        .map_err(HttpException::from)
        .map(|_| ApiSuccess::ok(()))
}
