use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::movie::models::MovieId;
use crate::domain::showtime::errors::ShowtimeError;
use crate::domain::showtime::models::Price;
use crate::domain::showtime::models::SeatAvailability;
use crate::domain::showtime::models::Showtime;
use crate::domain::showtime::models::ShowtimeId;
use crate::domain::showtime::ports::ShowtimeRepository;
use crate::domain::theater::models::TheaterId;

pub struct PostgresShowtimeRepository {
    pool: PgPool,
}

impl PostgresShowtimeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_showtime(row: PgRow) -> Result<Showtime, ShowtimeError> {
        Ok(Showtime {
            id: ShowtimeId(row.get("id")),
            movie_id: MovieId(row.get("movie_id")),
            theater_id: TheaterId(row.get("theater_id")),
            starts_at: row.get("starts_at"),
            price: Price::from_cents(row.get("price_cents"))?,
            created_at: row.get("created_at"),
        })
    }

    fn write_error(e: sqlx::Error, showtime: &Showtime) -> ShowtimeError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_foreign_key_violation() {
                match db_err.constraint() {
                    Some("showtimes_movie_id_fkey") => {
                        return ShowtimeError::MovieNotFound(showtime.movie_id)
                    }
                    Some("showtimes_theater_id_fkey") => {
                        return ShowtimeError::TheaterNotFound(showtime.theater_id)
                    }
                    _ => {}
                }
            }
        }
        ShowtimeError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl ShowtimeRepository for PostgresShowtimeRepository {
    async fn create(&self, showtime: Showtime) -> Result<Showtime, ShowtimeError> {
        sqlx::query(
            r#"
            INSERT INTO showtimes (id, movie_id, theater_id, starts_at, price_cents, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(showtime.id.0)
        .bind(showtime.movie_id.0)
        .bind(showtime.theater_id.0)
        .bind(showtime.starts_at)
        .bind(showtime.price.cents())
        .bind(showtime.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, &showtime))?;

        Ok(showtime)
    }

    async fn find_by_id(&self, id: &ShowtimeId) -> Result<Option<Showtime>, ShowtimeError> {
        let row = sqlx::query(
            r#"
            SELECT id, movie_id, theater_id, starts_at, price_cents, created_at
            FROM showtimes
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShowtimeError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_showtime).transpose()
    }

    async fn list(&self, movie_id: Option<MovieId>) -> Result<Vec<Showtime>, ShowtimeError> {
        let rows = sqlx::query(
            r#"
            SELECT id, movie_id, theater_id, starts_at, price_cents, created_at
            FROM showtimes
            WHERE $1::UUID IS NULL OR movie_id = $1
            ORDER BY starts_at
            "#,
        )
        .bind(movie_id.map(|id| id.0))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ShowtimeError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_showtime).collect()
    }

    async fn update(&self, showtime: Showtime) -> Result<Showtime, ShowtimeError> {
        let result = sqlx::query(
            r#"
            UPDATE showtimes
            SET starts_at = $2, price_cents = $3
            WHERE id = $1
            "#,
        )
        .bind(showtime.id.0)
        .bind(showtime.starts_at)
        .bind(showtime.price.cents())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, &showtime))?;

        if result.rows_affected() == 0 {
            return Err(ShowtimeError::NotFound(showtime.id));
        }

        Ok(showtime)
    }

    async fn delete(&self, id: &ShowtimeId) -> Result<(), ShowtimeError> {
        let result = sqlx::query(
            r#"
            DELETE FROM showtimes
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return ShowtimeError::HasReservations(*id);
                }
            }
            ShowtimeError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(ShowtimeError::NotFound(*id));
        }

        Ok(())
    }

    async fn availability(
        &self,
        id: &ShowtimeId,
    ) -> Result<Option<SeatAvailability>, ShowtimeError> {
        let row = sqlx::query(
            r#"
            SELECT t.capacity::BIGINT AS capacity,
                   COALESCE(SUM(r.seats), 0)::BIGINT AS reserved
            FROM showtimes s
            JOIN theaters t ON t.id = s.theater_id
            LEFT JOIN reservations r ON r.showtime_id = s.id
            WHERE s.id = $1
            GROUP BY t.capacity
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShowtimeError::DatabaseError(e.to_string()))?;

        Ok(row.map(|r| SeatAvailability::new(*id, r.get("capacity"), r.get("reserved"))))
    }
}
