//! Health check endpoint

use axum::{Json, extract::State, response::IntoResponse};
use common::database::health_check as database_health;
use serde_json::json;

use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match &state.db_pool {
        Some(pool) => match database_health(pool).await {
            Ok(true) => "connected",
            _ => "unreachable",
        },
        None => "in-memory",
    };

    Json(json!({
        "status": "ok",
        "service": "library-api",
        "database": database,
    }))
}
