use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::movie::models::MovieId;
use crate::domain::showtime::errors::ShowtimeError;
use crate::domain::showtime::models::CreateShowtimeCommand;
use crate::domain::showtime::models::SeatAvailability;
use crate::domain::showtime::models::Showtime;
use crate::domain::showtime::models::ShowtimeId;
use crate::domain::showtime::models::UpdateShowtimeCommand;
use crate::domain::showtime::ports::ShowtimeRepository;
use crate::domain::showtime::ports::ShowtimeServicePort;

pub struct ShowtimeService<SR>
where
    SR: ShowtimeRepository,
{
    repository: Arc<SR>,
}

impl<SR> ShowtimeService<SR>
where
    SR: ShowtimeRepository,
{
    pub fn new(repository: Arc<SR>) -> Self {
        Self { repository }
    }
}

fn ensure_future(starts_at: DateTime<Utc>) -> Result<(), ShowtimeError> {
    if starts_at <= Utc::now() {
        return Err(ShowtimeError::StartsInPast(starts_at));
    }
    Ok(())
}

#[async_trait]
impl<SR> ShowtimeServicePort for ShowtimeService<SR>
where
    SR: ShowtimeRepository,
{
    async fn create_showtime(
        &self,
        command: CreateShowtimeCommand,
    ) -> Result<Showtime, ShowtimeError> {
        ensure_future(command.starts_at)?;

        let showtime = Showtime {
            id: ShowtimeId::new(),
            movie_id: command.movie_id,
            theater_id: command.theater_id,
            starts_at: command.starts_at,
            price: command.price,
            created_at: Utc::now(),
        };

        let created = self.repository.create(showtime).await?;
        tracing::info!(
            showtime_id = %created.id,
            movie_id = %created.movie_id,
            theater_id = %created.theater_id,
            starts_at = %created.starts_at,
            "Showtime scheduled"
        );
        Ok(created)
    }

    async fn get_showtime(&self, id: &ShowtimeId) -> Result<Showtime, ShowtimeError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ShowtimeError::NotFound(*id))
    }

    async fn list_showtimes(
        &self,
        movie_id: Option<MovieId>,
    ) -> Result<Vec<Showtime>, ShowtimeError> {
        self.repository.list(movie_id).await
    }

    async fn update_showtime(
        &self,
        id: &ShowtimeId,
        command: UpdateShowtimeCommand,
    ) -> Result<Showtime, ShowtimeError> {
        let mut showtime = self.get_showtime(id).await?;

        if let Some(starts_at) = command.starts_at {
            ensure_future(starts_at)?;
            showtime.starts_at = starts_at;
        }
        if let Some(price) = command.price {
            showtime.price = price;
        }

        self.repository.update(showtime).await
    }

    async fn delete_showtime(&self, id: &ShowtimeId) -> Result<(), ShowtimeError> {
        self.repository.delete(id).await?;
        tracing::info!(showtime_id = %id, "Showtime deleted");
        Ok(())
    }

    async fn get_availability(&self, id: &ShowtimeId) -> Result<SeatAvailability, ShowtimeError> {
        self.repository
            .availability(id)
            .await?
            .ok_or(ShowtimeError::NotFound(*id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::showtime::models::Price;
    use crate::domain::theater::models::TheaterId;

    mock! {
        pub TestShowtimeRepository {}

        #[async_trait]
        impl ShowtimeRepository for TestShowtimeRepository {
            async fn create(&self, showtime: Showtime) -> Result<Showtime, ShowtimeError>;
            async fn find_by_id(&self, id: &ShowtimeId) -> Result<Option<Showtime>, ShowtimeError>;
            async fn list(&self, movie_id: Option<MovieId>) -> Result<Vec<Showtime>, ShowtimeError>;
            async fn update(&self, showtime: Showtime) -> Result<Showtime, ShowtimeError>;
            async fn delete(&self, id: &ShowtimeId) -> Result<(), ShowtimeError>;
            async fn availability(&self, id: &ShowtimeId) -> Result<Option<SeatAvailability>, ShowtimeError>;
        }
    }

    fn command(starts_at: DateTime<Utc>) -> CreateShowtimeCommand {
        CreateShowtimeCommand {
            movie_id: MovieId::new(),
            theater_id: TheaterId::new(),
            starts_at,
            price: Price::from_cents(1200).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_showtime_in_future() {
        let mut repository = MockTestShowtimeRepository::new();
        repository
            .expect_create()
            .withf(|showtime| showtime.price.cents() == 1200)
            .times(1)
            .returning(Ok);

        let service = ShowtimeService::new(Arc::new(repository));

        let starts_at = Utc::now() + Duration::days(2);
        let showtime = service.create_showtime(command(starts_at)).await.unwrap();
        assert_eq!(showtime.starts_at, starts_at);
    }

    #[tokio::test]
    async fn test_create_showtime_in_past() {
        let mut repository = MockTestShowtimeRepository::new();
        repository.expect_create().times(0);

        let service = ShowtimeService::new(Arc::new(repository));

        let result = service
            .create_showtime(command(Utc::now() - Duration::hours(1)))
            .await;
        assert!(matches!(result, Err(ShowtimeError::StartsInPast(_))));
    }

    #[tokio::test]
    async fn test_create_showtime_unknown_theater() {
        let mut repository = MockTestShowtimeRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|showtime| Err(ShowtimeError::TheaterNotFound(showtime.theater_id)));

        let service = ShowtimeService::new(Arc::new(repository));

        let result = service
            .create_showtime(command(Utc::now() + Duration::days(1)))
            .await;
        assert!(matches!(result, Err(ShowtimeError::TheaterNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_showtime_rejects_past_start() {
        let existing = Showtime {
            id: ShowtimeId::new(),
            movie_id: MovieId::new(),
            theater_id: TheaterId::new(),
            starts_at: Utc::now() + Duration::days(1),
            price: Price::from_cents(800).unwrap(),
            created_at: Utc::now(),
        };
        let id = existing.id;

        let mut repository = MockTestShowtimeRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_update().times(0);

        let service = ShowtimeService::new(Arc::new(repository));

        let command = UpdateShowtimeCommand {
            starts_at: Some(Utc::now() - Duration::days(1)),
            price: None,
        };
        let result = service.update_showtime(&id, command).await;
        assert!(matches!(result, Err(ShowtimeError::StartsInPast(_))));
    }

    #[tokio::test]
    async fn test_get_availability() {
        let id = ShowtimeId::new();

        let mut repository = MockTestShowtimeRepository::new();
        repository
            .expect_availability()
            .withf(move |requested| *requested == id)
            .times(1)
            .returning(|id| Ok(Some(SeatAvailability::new(*id, 80, 30))));

        let service = ShowtimeService::new(Arc::new(repository));

        let availability = service.get_availability(&id).await.unwrap();
        assert_eq!(availability.available, 50);
    }

    #[tokio::test]
    async fn test_get_availability_unknown_showtime() {
        let mut repository = MockTestShowtimeRepository::new();
        repository
            .expect_availability()
            .times(1)
            .returning(|_| Ok(None));

        let service = ShowtimeService::new(Arc::new(repository));

        let result = service.get_availability(&ShowtimeId::new()).await;
        assert!(matches!(result, Err(ShowtimeError::NotFound(_))));
    }
}
