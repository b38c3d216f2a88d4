//! Contact and order request models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored contact or order request
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub message: Option<String>,
    pub book_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Contact form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: String,
    pub message: Option<String>,
    pub book_id: Option<String>,
}

/// Validated contact message ready for storage
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub message: Option<String>,
    pub book_id: Option<String>,
}
