//! Repositories for genres and cached books

mod book;
mod genre;
mod memory;

pub use book::PgBookRepository;
pub use genre::PgGenreRepository;
pub use memory::{MemoryBookRepository, MemoryGenreRepository};

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{CachedBook, Genre, NewCachedBook, NewGenre};

/// Genre storage
#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// All genres ordered by name
    async fn list(&self) -> DatabaseResult<Vec<Genre>>;

    async fn find(&self, id: Uuid) -> DatabaseResult<Option<Genre>>;

    async fn count(&self) -> DatabaseResult<i64>;

    async fn create(&self, genre: &NewGenre) -> DatabaseResult<Genre>;
}

/// Cached book storage
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Cached books of a genre in the order they were inserted
    ///
    /// A fill inserts volumes in upstream relevance order, so this is the
    /// order the catalog returned them in.
    async fn list_for_genre(&self, genre_id: Uuid) -> DatabaseResult<Vec<CachedBook>>;

    async fn find(&self, id: &str) -> DatabaseResult<Option<CachedBook>>;

    /// Insert books whose id is not cached yet, in slice order; returns how many were written
    async fn insert_missing(&self, books: &[NewCachedBook]) -> DatabaseResult<u64>;
}
