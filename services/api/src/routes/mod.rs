//! API service routes

mod auth;
mod catalog;
mod contact;
mod health;
mod notifications;
mod profile;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
};

use crate::{
    middleware::{require_auth, session_middleware},
    state::AppState,
};

/// Largest accepted avatar image
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/profile", get(profile::get_profile).put(profile::update_profile))
        .route(
            "/api/profile/avatar",
            post(profile::upload_avatar).layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + 64 * 1024)),
        )
        .route("/api/notifications", get(notifications::list_notifications))
        .route(
            "/api/notifications/:id/read",
            put(notifications::mark_notification_read),
        )
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/genres", get(catalog::list_genres))
        .route("/api/genres/:id", get(catalog::get_genre))
        .route("/api/genres/:id/books", get(catalog::genre_books))
        .route("/api/books/:id", get(catalog::get_book))
        .route("/api/books/:id/preview", get(catalog::book_preview))
        .route("/api/books/:id/download", get(catalog::book_download))
        .route("/api/contact", post(contact::submit_contact))
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .with_state(state)
}
