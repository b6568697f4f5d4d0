use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::submissions::models::{
    SubmissionAttachment, SubmissionStatus, SubmissionWithContext, Timeliness,
};

/// Submission creation form for OpenAPI documentation only; the handler
/// reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateSubmissionDto {
    /// Report being answered
    pub report_id: Uuid,
    /// Optional free-text description
    pub description: Option<String>,
    /// Scalar answers as `submission_data[<field_id>]` text parts, file
    /// answers as `submission_data[<field_id>]` (or `[...][]`) file parts
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub submission_data: Option<String>,
}

/// Submission update form for OpenAPI documentation only
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UpdateSubmissionDto {
    pub description: Option<String>,
    /// JSON array of attachment ids to remove
    #[schema(example = "[\"7b1c...\", \"90ff...\"]")]
    pub files_to_delete: Option<String>,
    /// Additional `submission_data[<field_id>]` file parts
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub submission_data: Option<String>,
}

/// Review outcome a coordinator can record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Accepted,
    Returned,
}

/// Request DTO for the status transition endpoint
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStatusDto {
    pub status: ReviewStatus,
    /// Required when returning a submission for revision
    pub remarks: Option<String>,
}

/// Filter values for the officer's own submission listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    /// Awaiting review
    Pending,
    Accepted,
    /// Returned for revision
    Rejected,
}

impl StatusFilter {
    /// Database status this filter narrows to, if any
    pub fn as_status(&self) -> Option<SubmissionStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some(SubmissionStatus::Submitted),
            StatusFilter::Accepted => Some(SubmissionStatus::Accepted),
            StatusFilter::Rejected => Some(SubmissionStatus::Returned),
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct StatusFilterQuery {
    /// all | pending | accepted | rejected
    #[serde(default)]
    pub filter: StatusFilter,
}

/// Officer summary embedded in submission responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldOfficerDto {
    pub id: Uuid,
    pub name: String,
}

/// Attachment item in submission responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionAttachmentDto {
    pub id: Uuid,
    /// Form field this file answers
    pub field_id: String,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<SubmissionAttachment> for SubmissionAttachmentDto {
    fn from(row: SubmissionAttachment) -> Self {
        Self {
            id: row.id,
            field_id: row.field_id,
            file_name: row.file_name,
            content_type: row.content_type,
            file_size: row.file_size,
            url: row.url,
            created_at: row.created_at,
        }
    }
}

/// Response DTO for a submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponseDto {
    pub id: Uuid,
    pub report_id: Uuid,
    pub report_title: String,
    pub program_id: Uuid,
    pub field_officer: FieldOfficerDto,
    pub status: SubmissionStatus,
    pub description: Option<String>,
    /// Answers keyed by form-field id (string for scalar fields, array of
    /// URLs for file fields)
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    pub timeliness: Timeliness,
    pub remarks: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub attachments: Vec<SubmissionAttachmentDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubmissionResponseDto {
    pub fn from_row(row: SubmissionWithContext, attachments: Vec<SubmissionAttachment>) -> Self {
        Self {
            id: row.id,
            report_id: row.report_id,
            report_title: row.report_title,
            program_id: row.program_id,
            field_officer: FieldOfficerDto {
                id: row.field_officer_id,
                name: row.field_officer_name,
            },
            status: row.status,
            description: row.description,
            data: serde_json::to_value(&row.data.0).unwrap_or_default(),
            timeliness: row.timeliness,
            remarks: row.remarks,
            submitted_at: row.submitted_at,
            attachments: attachments
                .into_iter()
                .map(SubmissionAttachmentDto::from)
                .collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Temporary download link for a submission attachment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttachmentDownloadDto {
    pub url: String,
    /// Seconds the link stays valid
    pub expires_in: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_maps_to_statuses() {
        assert_eq!(StatusFilter::All.as_status(), None);
        assert_eq!(
            StatusFilter::Pending.as_status(),
            Some(SubmissionStatus::Submitted)
        );
        assert_eq!(
            StatusFilter::Rejected.as_status(),
            Some(SubmissionStatus::Returned)
        );
    }

    #[test]
    fn review_status_deserializes_snake_case() {
        let dto: UpdateStatusDto =
            serde_json::from_str(r#"{"status":"returned","remarks":"incomplete"}"#).unwrap();
        assert_eq!(dto.status, ReviewStatus::Returned);
        assert_eq!(dto.remarks.as_deref(), Some("incomplete"));
    }
}
