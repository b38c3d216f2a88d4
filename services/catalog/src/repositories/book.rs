//! Cached book repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use uuid::Uuid;

use super::BookRepository;
use crate::models::{CachedBook, NewCachedBook};

const BOOK_COLUMNS: &str = "id, genre_id, title, authors, overview, image_url, download_url, \
                            preview_link, published_date, page_count, cached_at";

/// PostgreSQL cached book repository
#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list_for_genre(&self, genre_id: Uuid) -> DatabaseResult<Vec<CachedBook>> {
        let query = format!(
            "SELECT {BOOK_COLUMNS} FROM books_cache WHERE genre_id = $1 ORDER BY fill_order"
        );

        sqlx::query_as::<_, CachedBook>(&query)
            .bind(genre_id)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn find(&self, id: &str) -> DatabaseResult<Option<CachedBook>> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM books_cache WHERE id = $1");

        sqlx::query_as::<_, CachedBook>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn insert_missing(&self, books: &[NewCachedBook]) -> DatabaseResult<u64> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::Query)?;
        let cached_at = Utc::now();
        let mut inserted = 0;

        for book in books {
            let result = sqlx::query(
                r#"
                INSERT INTO books_cache (id, genre_id, title, authors, overview, image_url,
                                         download_url, preview_link, published_date, page_count,
                                         cached_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(&book.id)
            .bind(book.genre_id)
            .bind(&book.title)
            .bind(&book.authors)
            .bind(&book.overview)
            .bind(&book.image_url)
            .bind(&book.download_url)
            .bind(&book.preview_link)
            .bind(&book.published_date)
            .bind(book.page_count)
            .bind(cached_at)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::Query)?;

            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(DatabaseError::Query)?;
        Ok(inserted)
    }
}
