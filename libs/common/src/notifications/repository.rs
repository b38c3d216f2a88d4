//! Notification repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use super::{NewNotification, Notification};
use crate::error::{DatabaseError, DatabaseResult};

/// Storage for notifications
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append a notification
    async fn create(&self, new: NewNotification) -> DatabaseResult<Notification>;

    /// Notifications of a user in creation order
    async fn list_for_user(&self, user_id: Uuid, unread_only: bool)
    -> DatabaseResult<Vec<Notification>>;

    /// Set the read flag; true when a notification owned by `user_id` matched
    async fn mark_read(&self, user_id: Uuid, id: Uuid) -> DatabaseResult<bool>;
}

/// PostgreSQL notification repository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new notification repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn notification_from_row(row: &PgRow) -> DatabaseResult<Notification> {
    let kind: String = row.try_get("type").map_err(DatabaseError::Query)?;
    Ok(Notification {
        id: row.try_get("id").map_err(DatabaseError::Query)?,
        user_id: row.try_get("user_id").map_err(DatabaseError::Query)?,
        kind: kind.parse().map_err(DatabaseError::Configuration)?,
        message: row.try_get("message").map_err(DatabaseError::Query)?,
        read: row.try_get("read").map_err(DatabaseError::Query)?,
        created_at: row.try_get("created_at").map_err(DatabaseError::Query)?,
    })
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, new: NewNotification) -> DatabaseResult<Notification> {
        let row = sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, type, message, read, created_at)
            VALUES ($1, $2, $3, $4, FALSE, $5)
            RETURNING id, user_id, type, message, read, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.kind.as_str())
        .bind(&new.message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        notification_from_row(&row)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> DatabaseResult<Vec<Notification>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, type, message, read, created_at
            FROM notifications
            WHERE user_id = $1 AND ($2 = FALSE OR read = FALSE)
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        rows.iter().map(notification_from_row).collect()
    }

    async fn mark_read(&self, user_id: Uuid, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read = TRUE
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
