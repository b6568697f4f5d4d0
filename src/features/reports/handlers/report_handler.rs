use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::{AuthenticatedUser, Role};
use crate::features::reports::dtos::{
    CreateReportDto, ReportAttachmentDto, ReportDetailDto, ReportResponseDto, UploadFileDto,
};
use crate::features::reports::models::ReportAttachment;
use crate::features::reports::services::ReportService;
use crate::shared::constants::{COLLECTION_REFERENCES, COLLECTION_TEMPLATES};
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};
use uuid::Uuid;

/// Create a report under a program (focal person only)
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires focal_person role"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    user.require_role(Role::FocalPerson)?;

    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service.create(user.id, &dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ReportResponseDto::from(report)),
            Some("Report created successfully.".to_string()),
            None,
        )),
    ))
}

/// List a program's reports for a field officer, with their submission status
#[utoipa::path(
    get,
    path = "/api/programs/{id}/reports",
    params(
        ("id" = Uuid, Path, description = "Program id"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Paginated reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Program not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_program_reports(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    Path(program_id): Path<Uuid>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    user.require_role(Role::FieldOfficer)?;

    let (rows, total) = service
        .list_for_officer(program_id, user.id, pagination.limit(), pagination.offset())
        .await?;

    let dtos: Vec<ReportResponseDto> = rows.into_iter().map(ReportResponseDto::from).collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// List the reports the authenticated coordinator created in a program,
/// including their template attachments
#[utoipa::path(
    get,
    path = "/api/programs/{id}/reports/created",
    params(
        ("id" = Uuid, Path, description = "Program id"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Paginated reports", body = ApiResponse<Vec<ReportDetailDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires focal_person role"),
        (status = 404, description = "Program not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_created_reports(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    Path(program_id): Path<Uuid>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ReportDetailDto>>>> {
    user.require_role(Role::FocalPerson)?;

    let (rows, total) = service
        .list_created_by(program_id, user.id, pagination.limit(), pagination.offset())
        .await?;

    let mut dtos = Vec::with_capacity(rows.len());
    for report in rows {
        let attachments = service.list_attachments(report.id, None).await?;
        let (templates, references) = split_media(attachments);
        dtos.push(ReportDetailDto {
            report: ReportResponseDto::from(report),
            templates,
            references,
        });
    }

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Report detail with form schema and media collections
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report detail", body = ApiResponse<ReportDetailDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    _user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportDetailDto>>> {
    let report = service.get_by_id(id).await?;
    let attachments = service.list_attachments(id, None).await?;
    let (templates, references) = split_media(attachments);

    Ok(Json(ApiResponse::success(
        Some(ReportDetailDto {
            report: ReportResponseDto::from(report),
            templates,
            references,
        }),
        None,
        None,
    )))
}

/// Bucket a report's attachments into the templates and references
/// collections
fn split_media(
    attachments: Vec<ReportAttachment>,
) -> (Vec<ReportAttachmentDto>, Vec<ReportAttachmentDto>) {
    let mut templates = Vec::new();
    let mut references = Vec::new();
    for attachment in attachments {
        if attachment.collection == COLLECTION_TEMPLATES {
            templates.push(ReportAttachmentDto::from(attachment));
        } else if attachment.collection == COLLECTION_REFERENCES {
            references.push(ReportAttachmentDto::from(attachment));
        }
    }
    (templates, references)
}

/// Attach a template file to a report (focal person only)
#[utoipa::path(
    post,
    path = "/api/reports/{id}/templates",
    params(("id" = Uuid, Path, description = "Report id")),
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "Template file upload"
    ),
    responses(
        (status = 201, description = "Template attached", body = ApiResponse<ReportAttachmentDto>),
        (status = 400, description = "Missing file"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the report's coordinator"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn upload_template(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    Path(report_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportAttachmentDto>>)> {
    user.require_role(Role::FocalPerson)?;

    let (file_data, file_name, content_type) = read_file_upload(multipart).await?;
    let attachment = service
        .upload_template(report_id, user.id, &file_name, &content_type, file_data)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ReportAttachmentDto::from(attachment)),
            Some("Template uploaded successfully.".to_string()),
            None,
        )),
    ))
}

/// Attach a reference file to a report (focal person only)
#[utoipa::path(
    post,
    path = "/api/reports/{id}/references",
    params(("id" = Uuid, Path, description = "Report id")),
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "Reference file upload"
    ),
    responses(
        (status = 201, description = "Reference attached", body = ApiResponse<ReportAttachmentDto>),
        (status = 400, description = "Missing file"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the report's coordinator"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn upload_reference(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    Path(report_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportAttachmentDto>>)> {
    user.require_role(Role::FocalPerson)?;

    let (file_data, file_name, content_type) = read_file_upload(multipart).await?;
    let attachment = service
        .upload_reference(report_id, user.id, &file_name, &content_type, file_data)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ReportAttachmentDto::from(attachment)),
            Some("Reference uploaded successfully.".to_string()),
            None,
        )),
    ))
}

/// Read the single "file" part out of an upload form
async fn read_file_upload(mut multipart: Multipart) -> Result<(Vec<u8>, String, String)> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "file" {
            let ct = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let fname = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unnamed".to_string());
            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;

            file_data = Some(data.to_vec());
            file_name = Some(fname);
            content_type = Some(ct);
        } else {
            debug!("Ignoring unknown field: {}", field_name);
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    Ok((file_data, file_name, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn attachment(collection: &str, file_name: &str) -> ReportAttachment {
        ReportAttachment {
            id: Uuid::new_v4(),
            report_id: Uuid::new_v4(),
            collection: collection.to_string(),
            file_key: format!("{}/key", collection),
            file_name: file_name.to_string(),
            content_type: "application/pdf".to_string(),
            file_size: 128,
            url: format!("http://storage/{}/{}", collection, file_name),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn split_media_buckets_templates_and_references() {
        let rows = vec![
            attachment(COLLECTION_TEMPLATES, "form.xlsx"),
            attachment(COLLECTION_REFERENCES, "guidelines.pdf"),
            attachment(COLLECTION_TEMPLATES, "form-v2.xlsx"),
        ];

        let (templates, references) = split_media(rows);

        assert_eq!(templates.len(), 2);
        assert_eq!(references.len(), 1);
        assert_eq!(references[0].file_name, "guidelines.pdf");
    }
}
