//! Client for the external book catalog API

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::CatalogResult,
    models::{NewCachedBook, UNKNOWN_TITLE},
};

/// Source of book volumes for a subject
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search volumes by subject, most relevant first
    async fn search_subject(&self, subject: &str, max_results: u32) -> CatalogResult<Vec<Volume>>;
}

/// Google Books volumes search
#[derive(Clone)]
pub struct GoogleBooksClient {
    http: reqwest::Client,
    base_url: String,
}

impl GoogleBooksClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> CatalogResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CatalogClient for GoogleBooksClient {
    async fn search_subject(&self, subject: &str, max_results: u32) -> CatalogResult<Vec<Volume>> {
        let url = format!("{}/volumes", self.base_url);
        debug!(%subject, max_results, "Querying catalog API");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", format!("subject:{}", subject)),
                ("maxResults", max_results.to_string()),
                ("orderBy", "relevance".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<VolumeSearch>()
            .await?;

        Ok(response.items.unwrap_or_default())
    }
}

/// Search response; `items` is absent when nothing matched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumeSearch {
    pub items: Option<Vec<Volume>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
    pub access_info: Option<AccessInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub image_links: Option<ImageLinks>,
    pub preview_link: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessInfo {
    pub pdf: Option<PdfAccess>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfAccess {
    pub download_link: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Volume {
    /// Flatten a volume into a cache row for `genre_id`
    pub fn into_cached_book(self, genre_id: Uuid) -> NewCachedBook {
        let info = self.volume_info;
        let image_url = info
            .image_links
            .and_then(|links| non_empty(links.thumbnail).or(non_empty(links.small_thumbnail)));

        NewCachedBook {
            id: self.id,
            genre_id,
            title: non_empty(info.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            authors: info
                .authors
                .map(|authors| authors.join(", "))
                .filter(|joined| !joined.is_empty()),
            overview: non_empty(info.description),
            image_url,
            download_url: self
                .access_info
                .and_then(|access| access.pdf)
                .and_then(|pdf| non_empty(pdf.download_link)),
            preview_link: non_empty(info.preview_link),
            published_date: non_empty(info.published_date),
            page_count: info.page_count.filter(|count| *count > 0),
        }
    }
}
