use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{
    FormField, Report, ReportAttachment, ReportWithSubmissionStatus,
};

/// Request DTO for creating a report
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    pub program_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "title is required (max 255 characters)"))]
    pub title: String,

    pub content: Option<String>,

    pub deadline: DateTime<Utc>,

    /// Grace deadline; must not precede `deadline`
    pub final_deadline: Option<DateTime<Utc>>,

    #[serde(default)]
    pub form_schema: Vec<FormField>,
}

/// Upload form for the template and reference endpoints, for OpenAPI
/// documentation only; the handlers read the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The file to attach
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Report media item in responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportAttachmentDto {
    pub id: Uuid,
    pub collection: String,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReportAttachment> for ReportAttachmentDto {
    fn from(row: ReportAttachment) -> Self {
        Self {
            id: row.id,
            collection: row.collection,
            file_name: row.file_name,
            content_type: row.content_type,
            file_size: row.file_size,
            url: row.url,
            created_at: row.created_at,
        }
    }
}

/// Response DTO for a report in listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub program_id: Uuid,
    pub coordinator_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub deadline: DateTime<Utc>,
    pub final_deadline: Option<DateTime<Utc>>,
    pub form_schema: Vec<FormField>,
    /// The requesting field officer's submission status for this report
    /// (null when they have not submitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(row: Report) -> Self {
        Self {
            id: row.id,
            program_id: row.program_id,
            coordinator_id: row.coordinator_id,
            title: row.title,
            content: row.content,
            deadline: row.deadline,
            final_deadline: row.final_deadline,
            form_schema: row.form_schema.0,
            submission_status: None,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<ReportWithSubmissionStatus> for ReportResponseDto {
    fn from(row: ReportWithSubmissionStatus) -> Self {
        Self {
            id: row.id,
            program_id: row.program_id,
            coordinator_id: row.coordinator_id,
            title: row.title,
            content: row.content,
            deadline: row.deadline,
            final_deadline: row.final_deadline,
            form_schema: row.form_schema.0,
            submission_status: row.submission_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Report detail with its media collections
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportDetailDto {
    #[serde(flatten)]
    pub report: ReportResponseDto,
    pub templates: Vec<ReportAttachmentDto>,
    pub references: Vec<ReportAttachmentDto>,
}
