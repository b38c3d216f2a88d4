//! Catalog errors

use common::error::DatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Genre not found")]
    GenreNotFound,

    #[error("Book not found")]
    BookNotFound,

    #[error("Download not available for this book")]
    DownloadUnavailable,

    /// The catalog API failed or answered with an error status
    #[error("Catalog API request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Catalog API request timed out")]
    UpstreamTimeout,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
