use thiserror::Error;

use crate::domain::theater::models::TheaterId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TheaterIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TheaterNameError {
    #[error("Theater name is empty")]
    Empty,

    #[error("Theater name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapacityError {
    #[error("Capacity must be between {min} and {max} seats, got {actual}")]
    OutOfRange { min: i32, max: i32, actual: i32 },
}

/// Top-level error type for all theater-related operations
#[derive(Debug, Clone, Error)]
pub enum TheaterError {
    #[error("Invalid theater ID: {0}")]
    InvalidTheaterId(#[from] TheaterIdError),

    #[error("Invalid theater name: {0}")]
    InvalidName(#[from] TheaterNameError),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(#[from] CapacityError),

    #[error("Theater not found: {0}")]
    NotFound(TheaterId),

    #[error("Theater already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Theater {0} still has showtimes")]
    HasShowtimes(TheaterId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
