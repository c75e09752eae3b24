use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::movie::models::MovieId;
use crate::domain::showtime::errors::PriceError;
use crate::domain::showtime::errors::ShowtimeIdError;
use crate::domain::theater::models::TheaterId;

/// A screening of a movie in a theater at a fixed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Showtime {
    pub id: ShowtimeId,
    pub movie_id: MovieId,
    pub theater_id: TheaterId,
    pub starts_at: DateTime<Utc>,
    pub price: Price,
    pub created_at: DateTime<Utc>,
}

impl Showtime {
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShowtimeId(pub Uuid);

impl ShowtimeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, ShowtimeIdError> {
        Uuid::parse_str(s)
            .map(ShowtimeId)
            .map_err(|e| ShowtimeIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ShowtimeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShowtimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ticket price in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(i64);

impl Price {
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        if cents < 0 {
            return Err(PriceError::Negative(cents));
        }
        Ok(Self(cents))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

/// Seat occupancy snapshot for one showtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatAvailability {
    pub showtime_id: ShowtimeId,
    pub capacity: i64,
    pub reserved: i64,
    pub available: i64,
}

impl SeatAvailability {
    pub fn new(showtime_id: ShowtimeId, capacity: i64, reserved: i64) -> Self {
        Self {
            showtime_id,
            capacity,
            reserved,
            available: (capacity - reserved).max(0),
        }
    }
}

#[derive(Debug)]
pub struct CreateShowtimeCommand {
    pub movie_id: MovieId,
    pub theater_id: TheaterId,
    pub starts_at: DateTime<Utc>,
    pub price: Price,
}

#[derive(Debug, Default)]
pub struct UpdateShowtimeCommand {
    pub starts_at: Option<DateTime<Utc>>,
    pub price: Option<Price>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_price_rejects_negative() {
        assert_eq!(Price::from_cents(-1), Err(PriceError::Negative(-1)));
        assert_eq!(Price::from_cents(0).unwrap().cents(), 0);
        assert_eq!(Price::from_cents(1250).unwrap().cents(), 1250);
    }

    #[test]
    fn test_availability_never_negative() {
        let availability = SeatAvailability::new(ShowtimeId::new(), 10, 12);
        assert_eq!(availability.available, 0);

        let availability = SeatAvailability::new(ShowtimeId::new(), 100, 37);
        assert_eq!(availability.available, 63);
    }

    #[test]
    fn test_has_started() {
        let now = Utc::now();
        let showtime = Showtime {
            id: ShowtimeId::new(),
            movie_id: MovieId::new(),
            theater_id: TheaterId::new(),
            starts_at: now,
            price: Price::from_cents(900).unwrap(),
            created_at: now - Duration::days(1),
        };

        assert!(showtime.has_started(now));
        assert!(!showtime.has_started(now - Duration::minutes(1)));
    }
}
