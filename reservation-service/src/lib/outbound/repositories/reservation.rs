use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::reservation::errors::ReservationError;
use crate::domain::reservation::models::BookingWindow;
use crate::domain::reservation::models::Reservation;
use crate::domain::reservation::models::ReservationId;
use crate::domain::reservation::models::SeatCount;
use crate::domain::reservation::ports::ReservationRepository;
use crate::domain::showtime::models::ShowtimeId;
use crate::domain::user::models::UserId;
use crate::outbound::database::Database;

impl From<sqlx::Error> for ReservationError {
    fn from(e: sqlx::Error) -> Self {
        ReservationError::DatabaseError(e.to_string())
    }
}

pub struct PostgresReservationRepository {
    database: Database,
}

impl PostgresReservationRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn row_to_reservation(row: PgRow) -> Result<Reservation, ReservationError> {
        Ok(Reservation {
            id: ReservationId(row.get("id")),
            user_id: UserId(row.get("user_id")),
            showtime_id: ShowtimeId(row.get("showtime_id")),
            seats: SeatCount::new(row.get("seats"))?,
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn reserve(&self, reservation: Reservation) -> Result<Reservation, ReservationError> {
        self.database
            .transaction(move |tx| {
                Box::pin(async move {
                    let showtime_id = reservation.showtime_id;

                    // Serializes concurrent bookings for the same showtime.
                    let locked = sqlx::query(
                        r#"
                        SELECT s.starts_at, t.capacity
                        FROM showtimes s
                        JOIN theaters t ON t.id = s.theater_id
                        WHERE s.id = $1
                        FOR UPDATE OF s
                        "#,
                    )
                    .bind(showtime_id.0)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or(ReservationError::ShowtimeNotFound(showtime_id))?;

                    let reserved: i64 = sqlx::query_scalar(
                        r#"
                        SELECT COALESCE(SUM(seats), 0)::BIGINT
                        FROM reservations
                        WHERE showtime_id = $1
                        "#,
                    )
                    .bind(showtime_id.0)
                    .fetch_one(&mut **tx)
                    .await?;

                    let window = BookingWindow {
                        showtime_id,
                        starts_at: locked.get("starts_at"),
                        capacity: i64::from(locked.get::<i32, _>("capacity")),
                        reserved,
                    };
                    window.admit(reservation.seats, Utc::now())?;

                    sqlx::query(
                        r#"
                        INSERT INTO reservations (id, user_id, showtime_id, seats, created_at)
                        VALUES ($1, $2, $3, $4, $5)
                        "#,
                    )
                    .bind(reservation.id.0)
                    .bind(reservation.user_id.0)
                    .bind(showtime_id.0)
                    .bind(reservation.seats.get())
                    .bind(reservation.created_at)
                    .execute(&mut **tx)
                    .await?;

                    Ok::<_, ReservationError>(reservation)
                })
            })
            .await
    }

    async fn find_by_id(
        &self,
        id: &ReservationId,
    ) -> Result<Option<Reservation>, ReservationError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, showtime_id, seats, created_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(self.database.pool())
        .await?;

        row.map(Self::row_to_reservation).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Reservation>, ReservationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, showtime_id, seats, created_at
            FROM reservations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(self.database.pool())
        .await?;

        rows.into_iter().map(Self::row_to_reservation).collect()
    }

    async fn booking_window(
        &self,
        showtime_id: &ShowtimeId,
    ) -> Result<Option<BookingWindow>, ReservationError> {
        let row = sqlx::query(
            r#"
            SELECT s.starts_at,
                   t.capacity::BIGINT AS capacity,
                   COALESCE(SUM(r.seats), 0)::BIGINT AS reserved
            FROM showtimes s
            JOIN theaters t ON t.id = s.theater_id
            LEFT JOIN reservations r ON r.showtime_id = s.id
            WHERE s.id = $1
            GROUP BY s.starts_at, t.capacity
            "#,
        )
        .bind(showtime_id.0)
        .fetch_optional(self.database.pool())
        .await?;

        Ok(row.map(|r| BookingWindow {
            showtime_id: *showtime_id,
            starts_at: r.get("starts_at"),
            capacity: r.get("capacity"),
            reserved: r.get("reserved"),
        }))
    }

    async fn delete(&self, id: &ReservationId) -> Result<(), ReservationError> {
        let result = sqlx::query(
            r#"
            DELETE FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(self.database.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(ReservationError::NotFound(*id));
        }

        Ok(())
    }
}
