//! Catalog models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Title stored when the catalog API omits one
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Number of pages a preview claims to cover
pub const PREVIEW_PAGES: u32 = 5;

const PREVIEW_UNAVAILABLE: &str = "Preview content not available";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGenre {
    pub name: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Book record copied from the catalog API.
///
/// `id` is the catalog's volume id. Rows are written once and never refreshed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CachedBook {
    pub id: String,
    pub genre_id: Uuid,
    pub title: String,
    pub authors: Option<String>,
    pub overview: Option<String>,
    pub image_url: Option<String>,
    pub download_url: Option<String>,
    pub preview_link: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    pub cached_at: DateTime<Utc>,
}

impl CachedBook {
    pub fn preview(&self) -> BookPreview {
        BookPreview {
            book_id: self.id.clone(),
            preview_pages: PREVIEW_PAGES,
            content: self
                .overview
                .clone()
                .unwrap_or_else(|| PREVIEW_UNAVAILABLE.to_string()),
            preview_link: self.preview_link.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCachedBook {
    pub id: String,
    pub genre_id: Uuid,
    pub title: String,
    pub authors: Option<String>,
    pub overview: Option<String>,
    pub image_url: Option<String>,
    pub download_url: Option<String>,
    pub preview_link: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
}

impl NewCachedBook {
    pub fn into_cached(self, cached_at: DateTime<Utc>) -> CachedBook {
        CachedBook {
            id: self.id,
            genre_id: self.genre_id,
            title: self.title,
            authors: self.authors,
            overview: self.overview,
            image_url: self.image_url,
            download_url: self.download_url,
            preview_link: self.preview_link,
            published_date: self.published_date,
            page_count: self.page_count,
            cached_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookPreview {
    pub book_id: String,
    pub preview_pages: u32,
    pub content: String,
    pub preview_link: Option<String>,
}
