//! Per-user notification ledger
//!
//! Notifications are append-only messages tied to a user. The only mutation is
//! flipping the read flag; nothing is ever deleted.

mod memory;
mod repository;

pub use memory::MemoryNotificationRepository;
pub use repository::{NotificationRepository, PgNotificationRepository};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};
use tracing::info;
use uuid::Uuid;

use crate::error::DatabaseResult;

/// Severity tag carried by a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(NotificationKind::Info),
            "success" => Ok(NotificationKind::Success),
            "warning" => Ok(NotificationKind::Warning),
            "error" => Ok(NotificationKind::Error),
            other => Err(format!("unknown notification type: {}", other)),
        }
    }
}

/// Notification entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// New notification payload
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
}

/// Service facade over the notification repository
#[derive(Clone)]
pub struct NotificationLedger {
    repository: Arc<dyn NotificationRepository>,
}

impl NotificationLedger {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    /// Append a message to a user's ledger
    pub async fn notify(
        &self,
        user_id: Uuid,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> DatabaseResult<Notification> {
        let notification = self
            .repository
            .create(NewNotification {
                user_id,
                kind,
                message: message.into(),
            })
            .await?;

        info!(%user_id, kind = %kind, "Notification recorded");
        Ok(notification)
    }

    /// Unread notifications for a user, oldest first
    pub async fn list_unread(&self, user_id: Uuid) -> DatabaseResult<Vec<Notification>> {
        self.repository.list_for_user(user_id, true).await
    }

    /// Every notification for a user, oldest first
    pub async fn list_all(&self, user_id: Uuid) -> DatabaseResult<Vec<Notification>> {
        self.repository.list_for_user(user_id, false).await
    }

    /// Mark one of the user's notifications as read.
    ///
    /// Returns `false` when the notification does not exist or belongs to
    /// someone else. Marking an already-read notification returns `true`.
    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> DatabaseResult<bool> {
        self.repository.mark_read(user_id, id).await
    }
}
