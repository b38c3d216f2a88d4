//! Registration, login and password reset handlers

use ::auth::models::{PasswordReset, Registration};
use axum::{
    Json,
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
};
use axum_extra::{TypedHeader, extract::WithRejection, headers::Cookie};

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterResponse},
    state::AppState,
};

const RESET_REQUESTED: &str = "If the email exists, a reset link has been sent";

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<Registration>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let user_id = state.credentials.register(payload).await?;

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state
        .credentials
        .login(&payload.email, &payload.password)
        .await?;

    let cookie = state
        .cookie
        .set_cookie_header(&outcome.session.id)
        .ok_or(ApiError::InternalServerError)?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse {
            message: "Logged in successfully".to_string(),
            user: outcome.user,
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<Cookie>>,
) -> ApiResult<impl IntoResponse> {
    if let Some(session_id) = cookies
        .as_ref()
        .and_then(|TypedHeader(cookies)| cookies.get(&state.cookie.name))
    {
        state.credentials.logout(session_id).await?;
    }

    let cleared = state
        .cookie
        .delete_cookie_header()
        .ok_or(ApiError::InternalServerError)?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, cleared)]),
        Json(MessageResponse::new("Logged out successfully")),
    ))
}

pub async fn me(State(state): State<AppState>, user: AuthUser) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.credentials.current_user(user.id).await?))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ForgotPasswordRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    state
        .credentials
        .request_password_reset(&payload.email)
        .await?;

    Ok(Json(MessageResponse::new(RESET_REQUESTED)))
}

pub async fn reset_password(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<PasswordReset>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    state.credentials.redeem_password_reset(payload).await?;

    Ok(Json(MessageResponse::new("Password reset successfully")))
}
