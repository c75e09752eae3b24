use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::reservation::errors::ReservationError;
use crate::domain::reservation::errors::ReservationIdError;
use crate::domain::reservation::errors::SeatCountError;
use crate::domain::showtime::models::ShowtimeId;
use crate::domain::user::models::UserId;

/// Seats booked by one user for one showtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub showtime_id: ShowtimeId,
    pub seats: SeatCount,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReservationId(pub Uuid);

impl ReservationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, ReservationIdError> {
        Uuid::parse_str(s)
            .map(ReservationId)
            .map_err(|e| ReservationIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Seats in a single reservation, 1 to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatCount(i32);

impl SeatCount {
    const MIN: i32 = 1;
    const MAX: i32 = 10;

    pub fn new(seats: i32) -> Result<Self, SeatCountError> {
        if !(Self::MIN..=Self::MAX).contains(&seats) {
            return Err(SeatCountError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: seats,
            });
        }
        Ok(Self(seats))
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

/// Booking state of a showtime as read under its row lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub showtime_id: ShowtimeId,
    pub starts_at: DateTime<Utc>,
    pub capacity: i64,
    pub reserved: i64,
}

impl BookingWindow {
    pub fn available(&self) -> i64 {
        (self.capacity - self.reserved).max(0)
    }

    pub fn ensure_open(&self, now: DateTime<Utc>) -> Result<(), ReservationError> {
        if self.starts_at <= now {
            return Err(ReservationError::ShowtimeStarted(self.showtime_id));
        }
        Ok(())
    }

    /// Decide whether `seats` more can be booked at `now`.
    pub fn admit(&self, seats: SeatCount, now: DateTime<Utc>) -> Result<(), ReservationError> {
        self.ensure_open(now)?;

        let available = self.available();
        if i64::from(seats.get()) > available {
            return Err(ReservationError::NotEnoughSeats {
                requested: seats.get(),
                available,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct CreateReservationCommand {
    pub user_id: UserId,
    pub showtime_id: ShowtimeId,
    pub seats: SeatCount,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn window(capacity: i64, reserved: i64, starts_in: Duration) -> BookingWindow {
        BookingWindow {
            showtime_id: ShowtimeId::new(),
            starts_at: Utc::now() + starts_in,
            capacity,
            reserved,
        }
    }

    #[test]
    fn test_seat_count_bounds() {
        assert!(SeatCount::new(0).is_err());
        assert_eq!(SeatCount::new(10).unwrap().get(), 10);
        assert_eq!(
            SeatCount::new(11),
            Err(SeatCountError::OutOfRange {
                min: 1,
                max: 10,
                actual: 11
            })
        );
    }

    #[test]
    fn test_admit_exact_fill() {
        let window = window(100, 96, Duration::hours(3));
        assert!(window.admit(SeatCount::new(4).unwrap(), Utc::now()).is_ok());
    }

    #[test]
    fn test_admit_over_capacity() {
        let window = window(100, 97, Duration::hours(3));
        let result = window.admit(SeatCount::new(4).unwrap(), Utc::now());
        assert_eq!(
            result,
            Err(ReservationError::NotEnoughSeats {
                requested: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_admit_after_start() {
        let window = window(100, 0, -Duration::minutes(5));
        let result = window.admit(SeatCount::new(1).unwrap(), Utc::now());
        assert!(matches!(result, Err(ReservationError::ShowtimeStarted(_))));
    }

    #[test]
    fn test_start_checked_before_capacity() {
        let window = window(1, 1, -Duration::minutes(5));
        let result = window.admit(SeatCount::new(2).unwrap(), Utc::now());
        assert!(matches!(result, Err(ReservationError::ShowtimeStarted(_))));
    }
}
