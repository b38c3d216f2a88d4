//! User repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::UserRepository;
use crate::models::{NewUser, UpdateUser, User};

const USER_COLUMNS: &str = "id, email, password_hash, name, bio, avatar_url, country, created_at";

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let query = format!(
            r#"
            INSERT INTO users (id, email, password_hash, name, country, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(Uuid::new_v4())
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(&new_user.name)
            .bind(&new_user.country)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
            .inspect(|user| debug!(user_id = %user.id, "User row inserted"))
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn update(&self, id: Uuid, changes: &UpdateUser) -> DatabaseResult<Option<User>> {
        let query = format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                country = COALESCE($4, country),
                avatar_url = COALESCE($5, avatar_url),
                password_hash = COALESCE($6, password_hash)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.bio)
            .bind(&changes.country)
            .bind(&changes.avatar_url)
            .bind(&changes.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }
}
