use thiserror::Error;

use crate::domain::reservation::models::ReservationId;
use crate::domain::showtime::errors::ShowtimeIdError;
use crate::domain::showtime::models::ShowtimeId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReservationIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SeatCountError {
    #[error("Seats must be between {min} and {max}, got {actual}")]
    OutOfRange { min: i32, max: i32, actual: i32 },
}

/// Top-level error type for all reservation-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReservationError {
    #[error("Invalid reservation ID: {0}")]
    InvalidReservationId(#[from] ReservationIdError),

    #[error("Invalid showtime ID: {0}")]
    InvalidShowtimeId(#[from] ShowtimeIdError),

    #[error("Invalid seat count: {0}")]
    InvalidSeatCount(#[from] SeatCountError),

    #[error("Reservation not found: {0}")]
    NotFound(ReservationId),

    #[error("Showtime not found: {0}")]
    ShowtimeNotFound(ShowtimeId),

    #[error("Showtime {0} has already started")]
    ShowtimeStarted(ShowtimeId),

    #[error("Not enough seats available: requested {requested}, available {available}")]
    NotEnoughSeats { requested: i32, available: i64 },

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
