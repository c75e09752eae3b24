use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::domain::movie::errors::MovieIdError;
use crate::domain::movie::models::MovieId;
use crate::domain::showtime::models::ShowtimeId;
use crate::domain::theater::errors::TheaterIdError;
use crate::domain::theater::models::TheaterId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShowtimeIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price must not be negative, got {0}")]
    Negative(i64),
}

/// Top-level error type for all showtime-related operations
#[derive(Debug, Clone, Error)]
pub enum ShowtimeError {
    #[error("Invalid showtime ID: {0}")]
    InvalidShowtimeId(#[from] ShowtimeIdError),

    #[error("Invalid movie ID: {0}")]
    InvalidMovieId(#[from] MovieIdError),

    #[error("Invalid theater ID: {0}")]
    InvalidTheaterId(#[from] TheaterIdError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("Showtime must start in the future, got {0}")]
    StartsInPast(DateTime<Utc>),

    #[error("Showtime not found: {0}")]
    NotFound(ShowtimeId),

    #[error("Movie not found: {0}")]
    MovieNotFound(MovieId),

    #[error("Theater not found: {0}")]
    TheaterNotFound(TheaterId),

    #[error("Showtime {0} still has reservations")]
    HasReservations(ShowtimeId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
