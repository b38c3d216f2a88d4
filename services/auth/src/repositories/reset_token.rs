//! Password reset token repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use uuid::Uuid;

use super::ResetTokenRepository;
use crate::models::PasswordResetToken;

/// PostgreSQL reset token repository
#[derive(Clone)]
pub struct PgResetTokenRepository {
    pool: PgPool,
}

impl PgResetTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResetTokenRepository for PgResetTokenRepository {
    async fn create(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> DatabaseResult<PasswordResetToken> {
        sqlx::query_as::<_, PasswordResetToken>(
            r#"
            INSERT INTO password_reset_tokens (id, user_id, token, expires_at, used, created_at)
            VALUES ($1, $2, $3, $4, FALSE, $5)
            RETURNING id, user_id, token, expires_at, used, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn find_unused(&self, token: &str) -> DatabaseResult<Option<PasswordResetToken>> {
        sqlx::query_as::<_, PasswordResetToken>(
            r#"
            SELECT id, user_id, token, expires_at, used, created_at
            FROM password_reset_tokens
            WHERE token = $1 AND used = FALSE
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn redeem(&self, id: Uuid, user_id: Uuid, password_hash: &str) -> DatabaseResult<bool> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::Query)?;

        let claimed = sqlx::query(
            r#"
            UPDATE password_reset_tokens
            SET used = TRUE
            WHERE id = $1 AND user_id = $2 AND used = FALSE
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::Query)?;

        if claimed.rows_affected() != 1 {
            return Ok(false);
        }

        let updated = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::Query)?;

        if updated.rows_affected() != 1 {
            return Ok(false);
        }

        tx.commit().await.map_err(DatabaseError::Query)?;
        Ok(true)
    }
}
