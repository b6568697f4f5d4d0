use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::form_schema::FormField;

/// A report requested by a coordinator under a program
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub program_id: Uuid,
    pub coordinator_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub deadline: DateTime<Utc>,
    pub final_deadline: Option<DateTime<Utc>>,
    pub form_schema: Json<Vec<FormField>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Report row joined with the requesting field officer's submission status
/// (None when they have not submitted yet)
#[derive(Debug, Clone, FromRow)]
pub struct ReportWithSubmissionStatus {
    pub id: Uuid,
    pub program_id: Uuid,
    pub coordinator_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub deadline: DateTime<Utc>,
    pub final_deadline: Option<DateTime<Utc>>,
    pub form_schema: Json<Vec<FormField>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submission_status: Option<String>,
}

/// Coordinator-provided report media (templates, references)
#[derive(Debug, Clone, FromRow)]
pub struct ReportAttachment {
    pub id: Uuid,
    pub report_id: Uuid,
    pub collection: String,
    pub file_key: String,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}
