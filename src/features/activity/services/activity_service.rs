use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;

/// Append-only audit trail. Failures here are logged but never fail the
/// caller's operation, so `log` swallows its own errors.
#[derive(Clone)]
pub struct ActivityService {
    pool: PgPool,
}

impl ActivityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn log(&self, user_id: Uuid, action: &str, properties: serde_json::Value) {
        if let Err(e) = self.insert(user_id, action, properties).await {
            tracing::error!("Failed to record activity '{}': {:?}", action, e);
        }
    }

    async fn insert(
        &self,
        user_id: Uuid,
        action: &str,
        properties: serde_json::Value,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO activities (user_id, action, properties)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(properties)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
