use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::theater::errors::TheaterError;
use crate::domain::theater::models::CreateTheaterCommand;
use crate::domain::theater::models::Theater;
use crate::domain::theater::models::TheaterId;
use crate::domain::theater::models::UpdateTheaterCommand;
use crate::domain::theater::ports::TheaterRepository;
use crate::domain::theater::ports::TheaterServicePort;

pub struct TheaterService<TR>
where
    TR: TheaterRepository,
{
    repository: Arc<TR>,
}

impl<TR> TheaterService<TR>
where
    TR: TheaterRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TheaterServicePort for TheaterService<TR>
where
    TR: TheaterRepository,
{
    async fn create_theater(
        &self,
        command: CreateTheaterCommand,
    ) -> Result<Theater, TheaterError> {
        let theater = Theater {
            id: TheaterId::new(),
            name: command.name,
            location: command.location,
            capacity: command.capacity,
            created_at: Utc::now(),
        };

        let created = self.repository.create(theater).await?;
        tracing::info!(
            theater_id = %created.id,
            capacity = created.capacity.seats(),
            "Theater created"
        );
        Ok(created)
    }

    async fn get_theater(&self, id: &TheaterId) -> Result<Theater, TheaterError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TheaterError::NotFound(*id))
    }

    async fn list_theaters(&self) -> Result<Vec<Theater>, TheaterError> {
        self.repository.list_all().await
    }

    async fn update_theater(
        &self,
        id: &TheaterId,
        command: UpdateTheaterCommand,
    ) -> Result<Theater, TheaterError> {
        let mut theater = self.get_theater(id).await?;

        if let Some(name) = command.name {
            theater.name = name;
        }
        if let Some(location) = command.location {
            theater.location = Some(location);
        }
        if let Some(capacity) = command.capacity {
            theater.capacity = capacity;
        }

        self.repository.update(theater).await
    }

    async fn delete_theater(&self, id: &TheaterId) -> Result<(), TheaterError> {
        self.repository.delete(id).await?;
        tracing::info!(theater_id = %id, "Theater deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::theater::models::SeatCapacity;
    use crate::domain::theater::models::TheaterName;

    mock! {
        pub TestTheaterRepository {}

        #[async_trait]
        impl TheaterRepository for TestTheaterRepository {
            async fn create(&self, theater: Theater) -> Result<Theater, TheaterError>;
            async fn find_by_id(&self, id: &TheaterId) -> Result<Option<Theater>, TheaterError>;
            async fn list_all(&self) -> Result<Vec<Theater>, TheaterError>;
            async fn update(&self, theater: Theater) -> Result<Theater, TheaterError>;
            async fn delete(&self, id: &TheaterId) -> Result<(), TheaterError>;
        }
    }

    #[tokio::test]
    async fn test_create_theater() {
        let mut repository = MockTestTheaterRepository::new();
        repository
            .expect_create()
            .withf(|theater| theater.name.as_str() == "Odeon" && theater.capacity.seats() == 120)
            .times(1)
            .returning(Ok);

        let service = TheaterService::new(Arc::new(repository));

        let command = CreateTheaterCommand {
            name: TheaterName::new("Odeon".to_string()).unwrap(),
            location: Some("Leicester Square".to_string()),
            capacity: SeatCapacity::new(120).unwrap(),
        };

        let theater = service.create_theater(command).await.unwrap();
        assert_eq!(theater.location.as_deref(), Some("Leicester Square"));
    }

    #[tokio::test]
    async fn test_update_theater_not_found() {
        let mut repository = MockTestTheaterRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = TheaterService::new(Arc::new(repository));

        let result = service
            .update_theater(&TheaterId::new(), UpdateTheaterCommand::default())
            .await;
        assert!(matches!(result, Err(TheaterError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_theater_with_showtimes() {
        let mut repository = MockTestTheaterRepository::new();
        repository
            .expect_delete()
            .times(1)
            .returning(|id| Err(TheaterError::HasShowtimes(*id)));

        let service = TheaterService::new(Arc::new(repository));

        let result = service.delete_theater(&TheaterId::new()).await;
        assert!(matches!(result, Err(TheaterError::HasShowtimes(_))));
    }
}
