use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::answer::SubmissionData;

/// Lifecycle of a report submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "submission_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Draft,
    Submitted,
    Accepted,
    Returned,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Accepted => "accepted",
            SubmissionStatus::Returned => "returned",
        }
    }

    /// Whether a coordinator may still review this submission. `accepted`
    /// is terminal.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, SubmissionStatus::Submitted | SubmissionStatus::Returned)
    }
}

/// Timeliness of a submission against its report deadline, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "submission_timeliness", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Timeliness {
    Early,
    OnTime,
    Late,
}

/// A field officer's submission against a report
#[derive(Debug, Clone, FromRow)]
pub struct ReportSubmission {
    pub id: Uuid,
    pub report_id: Uuid,
    pub field_officer_id: Uuid,
    pub status: SubmissionStatus,
    pub description: Option<String>,
    pub data: Json<SubmissionData>,
    pub timeliness: Timeliness,
    pub remarks: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submission row joined with its report and officer for listings
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionWithContext {
    pub id: Uuid,
    pub report_id: Uuid,
    pub field_officer_id: Uuid,
    pub status: SubmissionStatus,
    pub description: Option<String>,
    pub data: Json<SubmissionData>,
    pub timeliness: Timeliness,
    pub remarks: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub report_title: String,
    pub program_id: Uuid,
    pub field_officer_name: String,
}

/// A stored file answering one of the report's form fields
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionAttachment {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub field_id: String,
    pub file_key: String,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(SubmissionStatus::Returned).unwrap(),
            "returned"
        );
        assert_eq!(serde_json::to_value(Timeliness::OnTime).unwrap(), "on_time");
    }

    #[test]
    fn accepted_is_terminal() {
        assert!(SubmissionStatus::Submitted.is_reviewable());
        assert!(SubmissionStatus::Returned.is_reviewable());
        assert!(!SubmissionStatus::Accepted.is_reviewable());
        assert!(!SubmissionStatus::Draft.is_reviewable());
    }
}
