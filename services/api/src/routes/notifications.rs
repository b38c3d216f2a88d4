//! Notification handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{MessageResponse, NotificationQuery},
    state::AppState,
};

pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Query(query), _): WithRejection<Query<NotificationQuery>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let notifications = if query.all {
        state.notifications.list_all(user.id).await?
    } else {
        state.notifications.list_unread(user.id).await?
    };

    Ok(Json(notifications))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let not_found = || ApiError::NotFound("Notification not found".to_string());

    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    if !state.notifications.mark_read(user.id, id).await? {
        return Err(not_found());
    }

    Ok(Json(MessageResponse::new("Notification marked as read")))
}
