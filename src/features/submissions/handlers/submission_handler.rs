use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::{AuthenticatedUser, Role};
use crate::features::submissions::dtos::{
    AttachmentDownloadDto, CreateSubmissionDto, ReviewStatus, StatusFilterQuery,
    SubmissionResponseDto, UpdateStatusDto, UpdateSubmissionDto,
};
use crate::features::submissions::form::submission_field_id;
use crate::features::submissions::services::{
    NewSubmission, SubmissionChanges, SubmissionService, UploadedAnswerFile,
};
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Submit a report (field officer only)
#[utoipa::path(
    post,
    path = "/api/report-submissions",
    request_body(
        content = CreateSubmissionDto,
        content_type = "multipart/form-data",
        description = "Submission form: report_id, optional description, and \
                       submission_data[<field_id>] answer parts"
    ),
    responses(
        (status = 201, description = "Submission created", body = ApiResponse<SubmissionResponseDto>),
        (status = 400, description = "Malformed multipart payload"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires field_officer role"),
        (status = 404, description = "Report not found"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "report-submissions"
)]
pub async fn create_submission(
    user: AuthenticatedUser,
    State(service): State<Arc<SubmissionService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionResponseDto>>)> {
    user.require_role(Role::FieldOfficer)?;

    let mut report_id: Option<Uuid> = None;
    let mut description: Option<String> = None;
    let mut scalar_answers: Vec<(String, String)> = Vec::new();
    let mut files: Vec<UploadedAnswerFile> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let part_name = field.name().unwrap_or("").to_string();

        if part_name == "report_id" {
            let text = read_text(field, &part_name).await?;
            let parsed = text
                .parse::<Uuid>()
                .map_err(|_| AppError::Validation("report_id must be a valid id".to_string()))?;
            report_id = Some(parsed);
        } else if part_name == "description" {
            let text = read_text(field, &part_name).await?;
            if !text.trim().is_empty() {
                description = Some(text.trim().to_string());
            }
        } else if let Some(field_id) = submission_field_id(&part_name) {
            let field_id = field_id.to_string();
            if field.file_name().is_some() {
                files.push(read_answer_file(field, field_id).await?);
            } else {
                let text = read_text(field, &part_name).await?;
                scalar_answers.push((field_id, text));
            }
        } else {
            debug!("Ignoring unknown field: {}", part_name);
        }
    }

    let report_id =
        report_id.ok_or_else(|| AppError::Validation("report_id is required".to_string()))?;

    let (submission, attachments) = service
        .create(
            &user,
            NewSubmission {
                report_id,
                description,
                scalar_answers,
                files,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(SubmissionResponseDto::from_row(submission, attachments)),
            Some("Report submitted successfully.".to_string()),
            None,
        )),
    ))
}

/// Edit an existing submission (owner only)
#[utoipa::path(
    patch,
    path = "/api/report-submissions/{id}",
    params(("id" = Uuid, Path, description = "Submission id")),
    request_body(
        content = UpdateSubmissionDto,
        content_type = "multipart/form-data",
        description = "Fields to change: description, files_to_delete (JSON \
                       array of attachment ids), new submission_data files"
    ),
    responses(
        (status = 200, description = "Submission updated (or unchanged)", body = ApiResponse<SubmissionResponseDto>),
        (status = 400, description = "Malformed multipart payload"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the submission's owner"),
        (status = 404, description = "Submission not found"),
        (status = 409, description = "Submission already accepted"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "report-submissions"
)]
pub async fn update_submission(
    user: AuthenticatedUser,
    State(service): State<Arc<SubmissionService>>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<SubmissionResponseDto>>> {
    user.require_role(Role::FieldOfficer)?;

    let mut description: Option<String> = None;
    let mut files_to_delete: Vec<Uuid> = Vec::new();
    let mut files: Vec<UploadedAnswerFile> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let part_name = field.name().unwrap_or("").to_string();

        if part_name == "description" {
            description = Some(read_text(field, &part_name).await?);
        } else if part_name == "files_to_delete" {
            let text = read_text(field, &part_name).await?;
            files_to_delete = serde_json::from_str(&text).map_err(|_| {
                AppError::Validation(
                    "files_to_delete must be a JSON array of attachment ids".to_string(),
                )
            })?;
        } else if let Some(field_id) = submission_field_id(&part_name) {
            if field.file_name().is_some() {
                let field_id = field_id.to_string();
                files.push(read_answer_file(field, field_id).await?);
            } else {
                debug!("Ignoring non-file answer part on update: {}", part_name);
            }
        } else {
            debug!("Ignoring unknown field: {}", part_name);
        }
    }

    let (submission, attachments, changed) = service
        .update(
            user.id,
            id,
            SubmissionChanges {
                description,
                files_to_delete,
                files,
            },
        )
        .await?;

    let message = if changed {
        "Report submission updated successfully."
    } else {
        "No changes were made to the submission."
    };

    Ok(Json(ApiResponse::success(
        Some(SubmissionResponseDto::from_row(submission, attachments)),
        Some(message.to_string()),
        None,
    )))
}

/// Accept or return a submission (the report's coordinator only)
#[utoipa::path(
    patch,
    path = "/api/report-submissions/{id}/status",
    params(("id" = Uuid, Path, description = "Submission id")),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<SubmissionResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the report's coordinator"),
        (status = 404, description = "Submission not found"),
        (status = 409, description = "Submission already accepted"),
        (status = 422, description = "Missing remarks on return")
    ),
    security(("bearer_auth" = [])),
    tag = "report-submissions"
)]
pub async fn update_submission_status(
    user: AuthenticatedUser,
    State(service): State<Arc<SubmissionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateStatusDto>,
) -> Result<Json<ApiResponse<SubmissionResponseDto>>> {
    user.require_role(Role::FocalPerson)?;

    let submission = service.update_status(user.id, id, &dto).await?;
    let attachments = service.list_attachments(submission.id).await?;

    let message = match dto.status {
        ReviewStatus::Accepted => "Submission accepted.",
        ReviewStatus::Returned => "Submission returned for revision.",
    };

    Ok(Json(ApiResponse::success(
        Some(SubmissionResponseDto::from_row(submission, attachments)),
        Some(message.to_string()),
        None,
    )))
}

/// List the authenticated field officer's submissions
#[utoipa::path(
    get,
    path = "/api/report-submissions/mine",
    params(PaginationQuery, StatusFilterQuery),
    responses(
        (status = 200, description = "Paginated submissions", body = ApiResponse<Vec<SubmissionResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires field_officer role")
    ),
    security(("bearer_auth" = [])),
    tag = "report-submissions"
)]
pub async fn list_my_submissions(
    user: AuthenticatedUser,
    State(service): State<Arc<SubmissionService>>,
    Query(pagination): Query<PaginationQuery>,
    Query(filter): Query<StatusFilterQuery>,
) -> Result<Json<ApiResponse<Vec<SubmissionResponseDto>>>> {
    user.require_role(Role::FieldOfficer)?;

    let (rows, total) = service
        .list_mine(
            user.id,
            filter.filter.as_status(),
            pagination.limit(),
            pagination.offset(),
        )
        .await?;

    let mut dtos = Vec::with_capacity(rows.len());
    for row in rows {
        let attachments = service.list_attachments(row.id).await?;
        dtos.push(SubmissionResponseDto::from_row(row, attachments));
    }

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// List a report's submissions for its coordinator
#[utoipa::path(
    get,
    path = "/api/reports/{id}/submissions",
    params(
        ("id" = Uuid, Path, description = "Report id"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Paginated submissions", body = ApiResponse<Vec<SubmissionResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the report's coordinator"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "report-submissions"
)]
pub async fn list_report_submissions(
    user: AuthenticatedUser,
    State(service): State<Arc<SubmissionService>>,
    Path(report_id): Path<Uuid>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<SubmissionResponseDto>>>> {
    user.require_role(Role::FocalPerson)?;

    let (rows, total) = service
        .list_for_report(report_id, user.id, pagination.limit(), pagination.offset())
        .await?;

    let mut dtos = Vec::with_capacity(rows.len());
    for row in rows {
        let attachments = service.list_attachments(row.id).await?;
        dtos.push(SubmissionResponseDto::from_row(row, attachments));
    }

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// The authenticated field officer's current submission for a report
#[utoipa::path(
    get,
    path = "/api/reports/{id}/my-submission",
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "Current submission", body = ApiResponse<SubmissionResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No submission for this report")
    ),
    security(("bearer_auth" = [])),
    tag = "report-submissions"
)]
pub async fn get_my_submission(
    user: AuthenticatedUser,
    State(service): State<Arc<SubmissionService>>,
    Path(report_id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmissionResponseDto>>> {
    user.require_role(Role::FieldOfficer)?;

    let (submission, attachments) = service.my_submission(report_id, user.id).await?;

    Ok(Json(ApiResponse::success(
        Some(SubmissionResponseDto::from_row(submission, attachments)),
        None,
        None,
    )))
}

/// Temporary download link for a submission attachment
#[utoipa::path(
    get,
    path = "/api/report-submissions/{id}/attachments/{attachment_id}/download",
    params(
        ("id" = Uuid, Path, description = "Submission id"),
        ("attachment_id" = Uuid, Path, description = "Attachment id")
    ),
    responses(
        (status = 200, description = "Presigned download URL", body = ApiResponse<AttachmentDownloadDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No access to this attachment"),
        (status = 404, description = "Submission or attachment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "report-submissions"
)]
pub async fn download_attachment(
    user: AuthenticatedUser,
    State(service): State<Arc<SubmissionService>>,
    Path((submission_id, attachment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<AttachmentDownloadDto>>> {
    let (url, expires_in) = service
        .attachment_download_url(user.id, submission_id, attachment_id)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(AttachmentDownloadDto { url, expires_in }),
        None,
        None,
    )))
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read '{}' field: {}", name, e)))
}

async fn read_answer_file(
    field: axum::extract::multipart::Field<'_>,
    field_id: String,
) -> Result<UploadedAnswerFile> {
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let file_name = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unnamed".to_string());
    let data = field.bytes().await.map_err(|e| {
        debug!("Failed to read file bytes: {}", e);
        AppError::BadRequest(format!("Failed to read file data: {}", e))
    })?;

    Ok(UploadedAnswerFile {
        field_id,
        file_name,
        content_type,
        data: data.to_vec(),
    })
}
