use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::genre::errors::GenreError;
use crate::domain::genre::models::Genre;
use crate::domain::genre::models::GenreId;
use crate::domain::genre::models::GenreName;
use crate::domain::genre::ports::GenreRepository;

pub struct PostgresGenreRepository {
    pool: PgPool,
}

impl PostgresGenreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_genre(row: PgRow) -> Result<Genre, GenreError> {
        Ok(Genre {
            id: GenreId(row.get("id")),
            name: GenreName::new(row.get("name"))?,
            created_at: row.get("created_at"),
        })
    }

    fn write_error(e: sqlx::Error, genre: &Genre) -> GenreError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("genres_name_key") {
                return GenreError::NameAlreadyExists(genre.name.to_string());
            }
        }
        GenreError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl GenreRepository for PostgresGenreRepository {
    async fn create(&self, genre: Genre) -> Result<Genre, GenreError> {
        sqlx::query(
            r#"
            INSERT INTO genres (id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(genre.id.0)
        .bind(genre.name.as_str())
        .bind(genre.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, &genre))?;

        Ok(genre)
    }

    async fn find_by_id(&self, id: &GenreId) -> Result<Option<Genre>, GenreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM genres
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GenreError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_genre).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Genre>, GenreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM genres
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GenreError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_genre).collect()
    }

    async fn update(&self, genre: Genre) -> Result<Genre, GenreError> {
        let result = sqlx::query(
            r#"
            UPDATE genres
            SET name = $2
            WHERE id = $1
            "#,
        )
        .bind(genre.id.0)
        .bind(genre.name.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, &genre))?;

        if result.rows_affected() == 0 {
            return Err(GenreError::NotFound(genre.id));
        }

        Ok(genre)
    }

    async fn delete(&self, id: &GenreId) -> Result<(), GenreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM genres
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return GenreError::InUse(*id);
                }
            }
            GenreError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(GenreError::NotFound(*id));
        }

        Ok(())
    }
}
