//! In-memory catalog repositories

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BookRepository, GenreRepository};
use crate::models::{CachedBook, Genre, NewCachedBook, NewGenre};

/// Genre repository kept in process memory
#[derive(Clone, Default)]
pub struct MemoryGenreRepository {
    genres: Arc<RwLock<Vec<Genre>>>,
}

impl MemoryGenreRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GenreRepository for MemoryGenreRepository {
    async fn list(&self) -> DatabaseResult<Vec<Genre>> {
        let mut genres = self.genres.read().await.clone();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn find(&self, id: Uuid) -> DatabaseResult<Option<Genre>> {
        Ok(self.genres.read().await.iter().find(|g| g.id == id).cloned())
    }

    async fn count(&self) -> DatabaseResult<i64> {
        Ok(self.genres.read().await.len() as i64)
    }

    async fn create(&self, genre: &NewGenre) -> DatabaseResult<Genre> {
        let mut genres = self.genres.write().await;
        if genres.iter().any(|g| g.name == genre.name) {
            return Err(DatabaseError::Conflict("genres_name_key".to_string()));
        }

        let row = Genre {
            id: Uuid::new_v4(),
            name: genre.name.clone(),
            image_url: genre.image_url.clone(),
            description: genre.description.clone(),
        };
        genres.push(row.clone());
        Ok(row)
    }
}

/// Cached book repository kept in process memory
#[derive(Clone, Default)]
pub struct MemoryBookRepository {
    books: Arc<RwLock<Vec<CachedBook>>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached books across all genres
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn list_for_genre(&self, genre_id: Uuid) -> DatabaseResult<Vec<CachedBook>> {
        Ok(self
            .books
            .read()
            .await
            .iter()
            .filter(|b| b.genre_id == genre_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: &str) -> DatabaseResult<Option<CachedBook>> {
        Ok(self.books.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn insert_missing(&self, books: &[NewCachedBook]) -> DatabaseResult<u64> {
        let mut stored = self.books.write().await;
        let cached_at = Utc::now();
        let mut inserted = 0;

        for book in books {
            if stored.iter().any(|b| b.id == book.id) {
                continue;
            }
            stored.push(book.clone().into_cached(cached_at));
            inserted += 1;
        }

        Ok(inserted)
    }
}
