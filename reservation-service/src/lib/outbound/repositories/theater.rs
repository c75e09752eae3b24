use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::theater::errors::TheaterError;
use crate::domain::theater::models::SeatCapacity;
use crate::domain::theater::models::Theater;
use crate::domain::theater::models::TheaterId;
use crate::domain::theater::models::TheaterName;
use crate::domain::theater::ports::TheaterRepository;

pub struct PostgresTheaterRepository {
    pool: PgPool,
}

impl PostgresTheaterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_theater(row: PgRow) -> Result<Theater, TheaterError> {
        Ok(Theater {
            id: TheaterId(row.get("id")),
            name: TheaterName::new(row.get("name"))?,
            location: row.get("location"),
            capacity: SeatCapacity::new(row.get("capacity"))?,
            created_at: row.get("created_at"),
        })
    }

    fn write_error(e: sqlx::Error, theater: &Theater) -> TheaterError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("theaters_name_key") {
                return TheaterError::NameAlreadyExists(theater.name.to_string());
            }
        }
        TheaterError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl TheaterRepository for PostgresTheaterRepository {
    async fn create(&self, theater: Theater) -> Result<Theater, TheaterError> {
        sqlx::query(
            r#"
            INSERT INTO theaters (id, name, location, capacity, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(theater.id.0)
        .bind(theater.name.as_str())
        .bind(theater.location.as_deref())
        .bind(theater.capacity.seats())
        .bind(theater.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, &theater))?;

        Ok(theater)
    }

    async fn find_by_id(&self, id: &TheaterId) -> Result<Option<Theater>, TheaterError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, location, capacity, created_at
            FROM theaters
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TheaterError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_theater).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Theater>, TheaterError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, location, capacity, created_at
            FROM theaters
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TheaterError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_theater).collect()
    }

    async fn update(&self, theater: Theater) -> Result<Theater, TheaterError> {
        let result = sqlx::query(
            r#"
            UPDATE theaters
            SET name = $2, location = $3, capacity = $4
            WHERE id = $1
            "#,
        )
        .bind(theater.id.0)
        .bind(theater.name.as_str())
        .bind(theater.location.as_deref())
        .bind(theater.capacity.seats())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, &theater))?;

        if result.rows_affected() == 0 {
            return Err(TheaterError::NotFound(theater.id));
        }

        Ok(theater)
    }

    async fn delete(&self, id: &TheaterId) -> Result<(), TheaterError> {
        let result = sqlx::query(
            r#"
            DELETE FROM theaters
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return TheaterError::HasShowtimes(*id);
                }
            }
            TheaterError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(TheaterError::NotFound(*id));
        }

        Ok(())
    }
}
