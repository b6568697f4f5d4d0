use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
};
use crate::features::programs::{dtos as programs_dtos, handlers as programs_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::submissions::{
    dtos as submissions_dtos, handlers as submissions_handlers, models as submissions_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Programs
        programs_handlers::create_program,
        programs_handlers::list_programs,
        programs_handlers::list_my_programs,
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_program_reports,
        reports_handlers::list_created_reports,
        reports_handlers::get_report,
        reports_handlers::upload_template,
        reports_handlers::upload_reference,
        // Report submissions
        submissions_handlers::create_submission,
        submissions_handlers::update_submission,
        submissions_handlers::update_submission_status,
        submissions_handlers::list_my_submissions,
        submissions_handlers::list_report_submissions,
        submissions_handlers::get_my_submission,
        submissions_handlers::download_attachment,
        // Notifications
        notifications_handlers::list_notifications,
        notifications_handlers::mark_as_read,
        notifications_handlers::mark_all_as_read,
        notifications_handlers::delete_notification,
        notifications_handlers::delete_all_notifications,
    ),
    components(
        schemas(
            // Shared
            Meta,
            auth::model::Role,
            auth::model::AuthenticatedUser,
            // Programs
            programs_dtos::CreateProgramDto,
            programs_dtos::CoordinatorDto,
            programs_dtos::ProgramResponseDto,
            ApiResponse<programs_dtos::ProgramResponseDto>,
            ApiResponse<Vec<programs_dtos::ProgramResponseDto>>,
            // Reports
            reports_models::FieldType,
            reports_models::FormField,
            reports_dtos::CreateReportDto,
            reports_dtos::UploadFileDto,
            reports_dtos::ReportAttachmentDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::ReportDetailDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::ReportDetailDto>,
            ApiResponse<Vec<reports_dtos::ReportDetailDto>>,
            ApiResponse<reports_dtos::ReportAttachmentDto>,
            // Report submissions
            submissions_models::SubmissionStatus,
            submissions_models::Timeliness,
            submissions_dtos::CreateSubmissionDto,
            submissions_dtos::UpdateSubmissionDto,
            submissions_dtos::ReviewStatus,
            submissions_dtos::UpdateStatusDto,
            submissions_dtos::StatusFilter,
            submissions_dtos::FieldOfficerDto,
            submissions_dtos::SubmissionAttachmentDto,
            submissions_dtos::SubmissionResponseDto,
            submissions_dtos::AttachmentDownloadDto,
            ApiResponse<submissions_dtos::SubmissionResponseDto>,
            ApiResponse<Vec<submissions_dtos::SubmissionResponseDto>>,
            ApiResponse<submissions_dtos::AttachmentDownloadDto>,
            // Notifications
            notifications_dtos::NotificationResponseDto,
            ApiResponse<Vec<notifications_dtos::NotificationResponseDto>>,
        )
    ),
    tags(
        (name = "programs", description = "Government programs grouping reports"),
        (name = "reports", description = "Reports with dynamic form schemas and deadlines"),
        (name = "report-submissions", description = "Field-officer submissions and coordinator review"),
        (name = "notifications", description = "In-app notification feed"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Fieldflow API",
        version = "0.1.0",
        description = "API documentation for the field-reporting workflow",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
