//! Genre and book handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use catalog::CatalogError;
use uuid::Uuid;

use crate::{error::ApiResult, models::DownloadResponse, state::AppState};

fn genre_id(raw: &str) -> Result<Uuid, CatalogError> {
    Uuid::parse_str(raw).map_err(|_| CatalogError::GenreNotFound)
}

pub async fn list_genres(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.catalog.list_genres().await?))
}

pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.catalog.genre(genre_id(&id)?).await?))
}

pub async fn genre_books(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.catalog.books_for_genre(genre_id(&id)?).await?))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.catalog.book(&id).await?))
}

pub async fn book_preview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.catalog.preview(&id).await?))
}

pub async fn book_download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let download_url = state.catalog.download_url(&id).await?;
    Ok(Json(DownloadResponse { download_url }))
}
