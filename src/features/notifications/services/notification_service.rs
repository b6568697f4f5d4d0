use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Role;
use crate::features::notifications::models::Notification;

/// Service for persisted in-app notifications
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a notification for a single recipient
    pub async fn notify(&self, user_id: Uuid, payload: Value) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, payload)
            VALUES ($1, $2)
            RETURNING id, user_id, payload, read_at, created_at
            "#,
        )
        .bind(user_id)
        .bind(&payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create notification: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::debug!(
            "Notification {} created for user {}",
            notification.id,
            user_id
        );

        Ok(notification)
    }

    /// Fan a notification out to every user holding the given role
    pub async fn notify_role(&self, role: Role, payload: Value) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, payload)
            SELECT id, $2 FROM users WHERE role = $1
            "#,
        )
        .bind(role.as_str())
        .bind(&payload)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fan out notification: {:?}", e);
            AppError::Database(e)
        })?;

        let count = result.rows_affected() as i64;
        tracing::info!("Notification fanned out to {} {} users", count, role);
        Ok(count)
    }

    /// List the user's notifications, newest first. Returns (rows, total).
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Notification>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count notifications: {:?}", e);
            AppError::Database(e)
        })?;

        let rows = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, payload, read_at, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list notifications: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((rows, total))
    }

    /// Mark one of the user's notifications as read
    pub async fn mark_as_read(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read_at = NOW()
            WHERE id = $1 AND user_id = $2 AND read_at IS NULL
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark notification read: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            // Distinguish "not yours / missing" from "already read"
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM notifications WHERE id = $1 AND user_id = $2)",
            )
            .bind(id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

            if !exists {
                return Err(AppError::NotFound(format!("Notification {} not found", id)));
            }
        }

        Ok(())
    }

    /// Mark all of the user's unread notifications as read
    pub async fn mark_all_as_read(&self, user_id: Uuid) -> Result<i64> {
        let result = sqlx::query(
            "UPDATE notifications SET read_at = NOW() WHERE user_id = $1 AND read_at IS NULL",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark notifications read: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() as i64)
    }

    /// Delete one of the user's notifications
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete notification: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Notification {} not found", id)));
        }

        Ok(())
    }

    /// Delete all of the user's notifications
    pub async fn delete_all(&self, user_id: Uuid) -> Result<i64> {
        let result = sqlx::query("DELETE FROM notifications WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete notifications: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() as i64)
    }
}
