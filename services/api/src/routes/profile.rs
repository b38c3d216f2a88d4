//! Profile and avatar handlers

use ::auth::models::ProfileChanges;
use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::debug;

use super::MAX_AVATAR_BYTES;
use crate::{
    error::{ApiError, ApiResult, FILE_TOO_LARGE},
    middleware::AuthUser,
    models::AvatarResponse,
    state::AppState,
};

const AVATAR_FIELD: &str = "avatar";

pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.credentials.current_user(user.id).await?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(changes), _): WithRejection<Json<ProfileChanges>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.credentials.update_profile(user.id, changes).await?))
}

/// Store an uploaded image as a `data:` URL on the user
pub async fn upload_avatar(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(mut multipart, _): WithRejection<Multipart, ApiError>,
) -> ApiResult<impl IntoResponse> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .map(str::to_string)
            .filter(|mime| mime.starts_with("image/"))
            .ok_or_else(|| ApiError::BadRequest("Only image files are allowed".to_string()))?;

        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(ApiError::BadRequest("No file uploaded".to_string()));
        }
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(ApiError::BadRequest(FILE_TOO_LARGE.to_string()));
        }

        debug!(user_id = %user.id, size = bytes.len(), %content_type, "Avatar received");
        let data_url = format!("data:{};base64,{}", content_type, STANDARD.encode(&bytes));
        let avatar_url = state.credentials.update_avatar(user.id, data_url).await?;

        return Ok(Json(AvatarResponse { avatar_url }));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}
