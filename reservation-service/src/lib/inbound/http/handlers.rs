use std::fmt;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::domain::auth::errors::AuthError;
use crate::domain::genre::errors::GenreError;
use crate::domain::movie::errors::MovieError;
use crate::domain::reservation::errors::ReservationError;
use crate::domain::showtime::errors::ShowtimeError;
use crate::domain::theater::errors::TheaterError;
use crate::inbound::http::exception::HttpException;
use crate::user::errors::UserError;

pub mod auth;
pub mod genres;
pub mod movies;
pub mod reservations;
pub mod showtimes;
pub mod theaters;
pub mod users;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Successful handler result. The response interceptor adds the envelope.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, data)
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Collects request validation failures so they can be reported together.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn check<T, E: fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(e.to_string());
                None
            }
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_exception(self) -> HttpException {
        HttpException::validation(self.0)
    }
}

pub async fn health() -> &'static str {
    "ok"
}

impl From<AuthError> for HttpException {
    fn from(err: AuthError) -> Self {
        if err.is_rejection() {
            return HttpException::unauthorized(err.to_string());
        }
        let exception = HttpException::internal(err.to_string());
        match err.detail() {
            Some(detail) => exception.with_cause(detail),
            None => exception,
        }
    }
}

impl From<UserError> for HttpException {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUserId(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => HttpException::bad_request(err.to_string()),
            UserError::NotFound(_) => HttpException::not_found("User not found"),
            UserError::EmailAlreadyExists(_) => HttpException::conflict("User already exists"),
            UserError::HashingFailed(_) | UserError::DatabaseError(_) => {
                HttpException::internal(INTERNAL_MESSAGE).with_cause(err)
            }
        }
    }
}

impl From<GenreError> for HttpException {
    fn from(err: GenreError) -> Self {
        match err {
            GenreError::InvalidGenreId(_) | GenreError::InvalidName(_) => {
                HttpException::bad_request(err.to_string())
            }
            GenreError::NotFound(_) => HttpException::not_found("Genre not found"),
            GenreError::NameAlreadyExists(_) => HttpException::conflict("Genre already exists"),
            GenreError::InUse(_) => HttpException::conflict("Genre is assigned to movies"),
            GenreError::DatabaseError(_) => {
                HttpException::internal(INTERNAL_MESSAGE).with_cause(err)
            }
        }
    }
}

impl From<MovieError> for HttpException {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::InvalidMovieId(_)
            | MovieError::InvalidGenreId(_)
            | MovieError::InvalidTitle(_)
            | MovieError::InvalidRuntime(_) => HttpException::bad_request(err.to_string()),
            MovieError::NotFound(_) => HttpException::not_found("Movie not found"),
            MovieError::GenreNotFound(_) => HttpException::not_found("Genre not found"),
            MovieError::HasShowtimes(_) => HttpException::conflict("Movie has scheduled showtimes"),
            MovieError::DatabaseError(_) => {
                HttpException::internal(INTERNAL_MESSAGE).with_cause(err)
            }
        }
    }
}

impl From<TheaterError> for HttpException {
    fn from(err: TheaterError) -> Self {
        match err {
            TheaterError::InvalidTheaterId(_)
            | TheaterError::InvalidName(_)
            | TheaterError::InvalidCapacity(_) => HttpException::bad_request(err.to_string()),
            TheaterError::NotFound(_) => HttpException::not_found("Theater not found"),
            TheaterError::NameAlreadyExists(_) => {
                HttpException::conflict("Theater already exists")
            }
            TheaterError::HasShowtimes(_) => {
                HttpException::conflict("Theater has scheduled showtimes")
            }
            TheaterError::DatabaseError(_) => {
                HttpException::internal(INTERNAL_MESSAGE).with_cause(err)
            }
        }
    }
}

impl From<ShowtimeError> for HttpException {
    fn from(err: ShowtimeError) -> Self {
        match err {
            ShowtimeError::InvalidShowtimeId(_)
            | ShowtimeError::InvalidMovieId(_)
            | ShowtimeError::InvalidTheaterId(_)
            | ShowtimeError::InvalidPrice(_) => HttpException::bad_request(err.to_string()),
            ShowtimeError::StartsInPast(_) => {
                HttpException::bad_request("Showtime must start in the future")
            }
            ShowtimeError::NotFound(_) => HttpException::not_found("Showtime not found"),
            ShowtimeError::MovieNotFound(_) => HttpException::not_found("Movie not found"),
            ShowtimeError::TheaterNotFound(_) => HttpException::not_found("Theater not found"),
            ShowtimeError::HasReservations(_) => {
                HttpException::conflict("Showtime has reservations")
            }
            ShowtimeError::DatabaseError(_) => {
                HttpException::internal(INTERNAL_MESSAGE).with_cause(err)
            }
        }
    }
}

impl From<ReservationError> for HttpException {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::InvalidReservationId(_)
            | ReservationError::InvalidShowtimeId(_)
            | ReservationError::InvalidSeatCount(_) => HttpException::bad_request(err.to_string()),
            ReservationError::NotFound(_) => HttpException::not_found("Reservation not found"),
            ReservationError::ShowtimeNotFound(_) => {
                HttpException::not_found("Showtime not found")
            }
            ReservationError::ShowtimeStarted(_) => {
                HttpException::bad_request("Showtime has already started")
            }
            ReservationError::NotEnoughSeats {
                requested,
                available,
            } => HttpException::conflict("Not enough seats available").with_data(json!({
                "requested": requested,
                "available": available,
            })),
            ReservationError::DatabaseError(_) => {
                HttpException::internal(INTERNAL_MESSAGE).with_cause(err)
            }
        }
    }
}
