use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::genre::models::GenreId;
use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::MovieTitle;
use crate::domain::movie::models::Runtime;
use crate::domain::movie::ports::MovieRepository;

pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_movie(row: PgRow) -> Result<Movie, MovieError> {
        Ok(Movie {
            id: MovieId(row.get("id")),
            title: MovieTitle::new(row.get("title"))?,
            description: row.get("description"),
            duration: Runtime::new(row.get("duration_minutes"))?,
            release_date: row.get("release_date"),
            genre_id: GenreId(row.get("genre_id")),
            created_at: row.get("created_at"),
        })
    }

    fn write_error(e: sqlx::Error, movie: &Movie) -> MovieError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_foreign_key_violation()
                && db_err.constraint() == Some("movies_genre_id_fkey")
            {
                return MovieError::GenreNotFound(movie.genre_id);
            }
        }
        MovieError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn create(&self, movie: Movie) -> Result<Movie, MovieError> {
        sqlx::query(
            r#"
            INSERT INTO movies
                (id, title, description, duration_minutes, release_date, genre_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(movie.id.0)
        .bind(movie.title.as_str())
        .bind(movie.description.as_deref())
        .bind(movie.duration.minutes())
        .bind(movie.release_date)
        .bind(movie.genre_id.0)
        .bind(movie.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, &movie))?;

        Ok(movie)
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, duration_minutes, release_date, genre_id, created_at
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MovieError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_movie).transpose()
    }

    async fn list(&self, genre_id: Option<GenreId>) -> Result<Vec<Movie>, MovieError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, duration_minutes, release_date, genre_id, created_at
            FROM movies
            WHERE $1::UUID IS NULL OR genre_id = $1
            ORDER BY title
            "#,
        )
        .bind(genre_id.map(|id| id.0))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MovieError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_movie).collect()
    }

    async fn update(&self, movie: Movie) -> Result<Movie, MovieError> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = $2, description = $3, duration_minutes = $4,
                release_date = $5, genre_id = $6
            WHERE id = $1
            "#,
        )
        .bind(movie.id.0)
        .bind(movie.title.as_str())
        .bind(movie.description.as_deref())
        .bind(movie.duration.minutes())
        .bind(movie.release_date)
        .bind(movie.genre_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, &movie))?;

        if result.rows_affected() == 0 {
            return Err(MovieError::NotFound(movie.id));
        }

        Ok(movie)
    }

    async fn delete(&self, id: &MovieId) -> Result<(), MovieError> {
        let result = sqlx::query(
            r#"
            DELETE FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return MovieError::HasShowtimes(*id);
                }
            }
            MovieError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(MovieError::NotFound(*id));
        }

        Ok(())
    }
}
