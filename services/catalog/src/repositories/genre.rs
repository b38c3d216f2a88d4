//! Genre repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::GenreRepository;
use crate::models::{Genre, NewGenre};

/// PostgreSQL genre repository
#[derive(Clone)]
pub struct PgGenreRepository {
    pool: PgPool,
}

impl PgGenreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreRepository for PgGenreRepository {
    async fn list(&self) -> DatabaseResult<Vec<Genre>> {
        sqlx::query_as::<_, Genre>(
            "SELECT id, name, image_url, description FROM genres ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn find(&self, id: Uuid) -> DatabaseResult<Option<Genre>> {
        sqlx::query_as::<_, Genre>(
            "SELECT id, name, image_url, description FROM genres WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn count(&self) -> DatabaseResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn create(&self, genre: &NewGenre) -> DatabaseResult<Genre> {
        info!("Creating genre: {}", genre.name);

        sqlx::query_as::<_, Genre>(
            r#"
            INSERT INTO genres (id, name, image_url, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, image_url, description
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&genre.name)
        .bind(&genre.image_url)
        .bind(&genre.description)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }
}
