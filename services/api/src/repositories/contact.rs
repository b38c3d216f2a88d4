//! Contact message repository

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{ContactMessage, NewContactMessage};

/// Append-only storage for contact messages
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, message: &NewContactMessage) -> DatabaseResult<ContactMessage>;
}

/// PostgreSQL contact message repository
#[derive(Clone)]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn create(&self, message: &NewContactMessage) -> DatabaseResult<ContactMessage> {
        sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (id, user_id, name, email, phone, country, message,
                                          book_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, name, email, phone, country, message, book_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(message.user_id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&message.country)
        .bind(&message.message)
        .bind(&message.book_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }
}

/// Contact message repository kept in process memory
#[derive(Clone, Default)]
pub struct MemoryContactRepository {
    messages: Arc<RwLock<Vec<ContactMessage>>>,
}

impl MemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored message, oldest first
    pub async fn all(&self) -> Vec<ContactMessage> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl ContactRepository for MemoryContactRepository {
    async fn create(&self, message: &NewContactMessage) -> DatabaseResult<ContactMessage> {
        let row = ContactMessage {
            id: Uuid::new_v4(),
            user_id: message.user_id,
            name: message.name.clone(),
            email: message.email.clone(),
            phone: message.phone.clone(),
            country: message.country.clone(),
            message: message.message.clone(),
            book_id: message.book_id.clone(),
            created_at: Utc::now(),
        };
        self.messages.write().await.push(row.clone());
        Ok(row)
    }
}
