//! In-memory notification repository

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{NewNotification, Notification, NotificationRepository};
use crate::error::DatabaseResult;

/// Notification repository kept in process memory
#[derive(Clone, Default)]
pub struct MemoryNotificationRepository {
    entries: Arc<RwLock<Vec<Notification>>>,
}

impl MemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notifications across all users
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn create(&self, new: NewNotification) -> DatabaseResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            kind: new.kind,
            message: new.message,
            read: false,
            created_at: Utc::now(),
        };

        self.entries.write().await.push(notification.clone());
        Ok(notification)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> DatabaseResult<Vec<Notification>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.read))
            .cloned()
            .collect())
    }

    async fn mark_read(&self, user_id: Uuid, id: Uuid) -> DatabaseResult<bool> {
        let mut entries = self.entries.write().await;
        match entries
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            Some(notification) => {
                notification.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
