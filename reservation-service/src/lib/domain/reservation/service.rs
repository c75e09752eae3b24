use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::reservation::errors::ReservationError;
use crate::domain::reservation::models::CreateReservationCommand;
use crate::domain::reservation::models::Reservation;
use crate::domain::reservation::models::ReservationId;
use crate::domain::reservation::ports::ReservationRepository;
use crate::domain::reservation::ports::ReservationServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for seat booking.
pub struct ReservationService<RR>
where
    RR: ReservationRepository,
{
    repository: Arc<RR>,
}

impl<RR> ReservationService<RR>
where
    RR: ReservationRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }

    async fn find_owned(
        &self,
        user_id: &UserId,
        id: &ReservationId,
    ) -> Result<Reservation, ReservationError> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|reservation| reservation.is_owned_by(user_id))
            .ok_or(ReservationError::NotFound(*id))
    }
}

#[async_trait]
impl<RR> ReservationServicePort for ReservationService<RR>
where
    RR: ReservationRepository,
{
    async fn create_reservation(
        &self,
        command: CreateReservationCommand,
    ) -> Result<Reservation, ReservationError> {
        let reservation = Reservation {
            id: ReservationId::new(),
            user_id: command.user_id,
            showtime_id: command.showtime_id,
            seats: command.seats,
            created_at: Utc::now(),
        };

        let created = self.repository.reserve(reservation).await?;
        tracing::info!(
            reservation_id = %created.id,
            user_id = %created.user_id,
            showtime_id = %created.showtime_id,
            seats = created.seats.get(),
            "Seats reserved"
        );
        Ok(created)
    }

    async fn list_reservations(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Reservation>, ReservationError> {
        self.repository.list_by_user(user_id).await
    }

    async fn get_reservation(
        &self,
        user_id: &UserId,
        id: &ReservationId,
    ) -> Result<Reservation, ReservationError> {
        self.find_owned(user_id, id).await
    }

    async fn cancel_reservation(
        &self,
        user_id: &UserId,
        id: &ReservationId,
    ) -> Result<(), ReservationError> {
        let reservation = self.find_owned(user_id, id).await?;

        let window = self
            .repository
            .booking_window(&reservation.showtime_id)
            .await?
            .ok_or(ReservationError::ShowtimeNotFound(reservation.showtime_id))?;
        window.ensure_open(Utc::now())?;

        self.repository.delete(id).await?;
        tracing::info!(reservation_id = %id, user_id = %user_id, "Reservation cancelled");
        Ok(())
    }
}
