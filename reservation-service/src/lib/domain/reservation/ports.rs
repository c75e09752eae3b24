use async_trait::async_trait;

use crate::domain::reservation::errors::ReservationError;
use crate::domain::reservation::models::BookingWindow;
use crate::domain::reservation::models::CreateReservationCommand;
use crate::domain::reservation::models::Reservation;
use crate::domain::reservation::models::ReservationId;
use crate::domain::showtime::models::ShowtimeId;
use crate::domain::user::models::UserId;

/// Port for seat booking. Every operation is scoped to the calling user.
#[async_trait]
pub trait ReservationServicePort: Send + Sync + 'static {
    /// Book seats for a showtime.
    ///
    /// # Errors
    /// * `ShowtimeNotFound` - Showtime does not exist
    /// * `ShowtimeStarted` - Showtime has already begun
    /// * `NotEnoughSeats` - Booking would exceed the theater capacity
    async fn create_reservation(
        &self,
        command: CreateReservationCommand,
    ) -> Result<Reservation, ReservationError>;

    async fn list_reservations(&self, user_id: &UserId)
        -> Result<Vec<Reservation>, ReservationError>;

    /// # Errors
    /// * `NotFound` - Reservation does not exist or belongs to someone else
    async fn get_reservation(
        &self,
        user_id: &UserId,
        id: &ReservationId,
    ) -> Result<Reservation, ReservationError>;

    /// # Errors
    /// * `NotFound` - Reservation does not exist or belongs to someone else
    /// * `ShowtimeStarted` - Too late to cancel
    async fn cancel_reservation(
        &self,
        user_id: &UserId,
        id: &ReservationId,
    ) -> Result<(), ReservationError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync + 'static {
    /// Persist a reservation if the showtime admits it.
    ///
    /// The showtime row is locked, its [`BookingWindow`] evaluated and the
    /// reservation inserted within a single transaction.
    async fn reserve(&self, reservation: Reservation) -> Result<Reservation, ReservationError>;

    async fn find_by_id(&self, id: &ReservationId)
        -> Result<Option<Reservation>, ReservationError>;

    /// Reservations of one user, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Reservation>, ReservationError>;

    async fn booking_window(
        &self,
        showtime_id: &ShowtimeId,
    ) -> Result<Option<BookingWindow>, ReservationError>;

    async fn delete(&self, id: &ReservationId) -> Result<(), ReservationError>;
}
