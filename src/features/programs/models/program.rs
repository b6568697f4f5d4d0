use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a program
#[derive(Debug, Clone, FromRow)]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub coordinator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Program row joined with its coordinator's directory entry
#[derive(Debug, Clone, FromRow)]
pub struct ProgramWithCoordinator {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub coordinator_id: Uuid,
    pub coordinator_name: String,
    pub coordinator_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
