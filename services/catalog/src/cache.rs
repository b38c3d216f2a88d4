//! Read-through cache over the catalog API

use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    client::CatalogClient,
    error::{CatalogError, CatalogResult},
    models::{BookPreview, CachedBook, Genre, NewCachedBook},
    repositories::{BookRepository, GenreRepository},
};

/// Default number of volumes requested per fill
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Default bound on a single catalog API call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Genres, books and the cache fill that connects them
#[derive(Clone)]
pub struct CatalogCache {
    genres: Arc<dyn GenreRepository>,
    books: Arc<dyn BookRepository>,
    client: Arc<dyn CatalogClient>,
    max_results: u32,
    timeout: Duration,
    fill_locks: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl CatalogCache {
    pub fn new(
        genres: Arc<dyn GenreRepository>,
        books: Arc<dyn BookRepository>,
        client: Arc<dyn CatalogClient>,
    ) -> Self {
        Self {
            genres,
            books,
            client,
            max_results: DEFAULT_MAX_RESULTS,
            timeout: DEFAULT_TIMEOUT,
            fill_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn list_genres(&self) -> CatalogResult<Vec<Genre>> {
        Ok(self.genres.list().await?)
    }

    pub async fn genre(&self, id: Uuid) -> CatalogResult<Genre> {
        self.genres
            .find(id)
            .await?
            .ok_or(CatalogError::GenreNotFound)
    }

    pub async fn book(&self, id: &str) -> CatalogResult<CachedBook> {
        self.books.find(id).await?.ok_or(CatalogError::BookNotFound)
    }

    pub async fn preview(&self, id: &str) -> CatalogResult<BookPreview> {
        self.book(id).await.map(|book| book.preview())
    }

    pub async fn download_url(&self, id: &str) -> CatalogResult<String> {
        self.book(id)
            .await?
            .download_url
            .ok_or(CatalogError::DownloadUnavailable)
    }

    /// Books of a genre, filling the cache from the catalog API on a miss.
    ///
    /// Cached rows are returned as they are. A failed or timed-out API call
    /// yields an empty list and leaves the cache empty for the next request.
    pub async fn books_for_genre(&self, genre_id: Uuid) -> CatalogResult<Vec<CachedBook>> {
        let genre = self.genre(genre_id).await?;

        let cached = self.books.list_for_genre(genre_id).await?;
        if !cached.is_empty() {
            return Ok(cached);
        }

        let lock = self.fill_lock(genre_id).await;
        let _guard = lock.lock().await;

        // Another request may have filled the genre while we waited
        let cached = self.books.list_for_genre(genre_id).await?;
        if !cached.is_empty() {
            return Ok(cached);
        }

        let fetched = match self.fetch(&genre).await {
            Ok(books) => books,
            Err(e) => {
                warn!(genre = %genre.name, error = %e, "Catalog fill failed");
                return Ok(Vec::new());
            }
        };

        if fetched.is_empty() {
            info!(genre = %genre.name, "Catalog API returned no books");
            return Ok(Vec::new());
        }

        let inserted = self.books.insert_missing(&fetched).await?;
        info!(genre = %genre.name, inserted, "Genre cache filled");

        Ok(self.books.list_for_genre(genre_id).await?)
    }

    async fn fetch(&self, genre: &Genre) -> CatalogResult<Vec<NewCachedBook>> {
        let volumes = tokio::time::timeout(
            self.timeout,
            self.client.search_subject(&genre.name, self.max_results),
        )
        .await
        .map_err(|_| CatalogError::UpstreamTimeout)??;

        Ok(volumes
            .into_iter()
            .map(|volume| volume.into_cached_book(genre.id))
            .collect())
    }

    async fn fill_lock(&self, genre_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.fill_locks.lock().await;
        locks.entry(genre_id).or_default().clone()
    }
}
