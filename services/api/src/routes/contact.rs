//! Contact form handler

use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{ContactResponse, ContactSubmission},
    state::AppState,
};

pub async fn submit_contact(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    WithRejection(Json(submission), _): WithRejection<Json<ContactSubmission>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let stored = state
        .contact
        .submit(user.map(|user| user.id), submission)
        .await?;

    Ok(Json(ContactResponse {
        message: "Message sent successfully".to_string(),
        id: stored.id,
    }))
}
