use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Role;
use crate::features::notifications::payloads;
use crate::features::notifications::services::NotificationService;
use crate::features::reports::dtos::CreateReportDto;
use crate::features::reports::models::{
    validate_form_schema, Report, ReportAttachment, ReportWithSubmissionStatus,
};
use crate::modules::storage::ObjectStore;
use crate::shared::constants::{COLLECTION_REFERENCES, COLLECTION_TEMPLATES};

const REPORT_COLUMNS: &str = r#"
    id, program_id, coordinator_id, title, content,
    deadline, final_deadline, form_schema, created_at, updated_at
"#;

/// Service for report operations
pub struct ReportService {
    pool: PgPool,
    storage: Arc<ObjectStore>,
    notifications: Arc<NotificationService>,
    frontend_url: String,
}

impl ReportService {
    pub fn new(
        pool: PgPool,
        storage: Arc<ObjectStore>,
        notifications: Arc<NotificationService>,
        frontend_url: String,
    ) -> Self {
        Self {
            pool,
            storage,
            notifications,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a report under a program and announce it to all field officers
    pub async fn create(&self, coordinator_id: Uuid, dto: &CreateReportDto) -> Result<Report> {
        if let Some(final_deadline) = dto.final_deadline {
            if final_deadline < dto.deadline {
                return Err(AppError::Validation(
                    "final_deadline must not be earlier than deadline".to_string(),
                ));
            }
        }

        validate_form_schema(&dto.form_schema).map_err(AppError::Validation)?;

        let program_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM programs WHERE id = $1)",
        )
        .bind(dto.program_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check program: {:?}", e);
            AppError::Database(e)
        })?;

        if !program_exists {
            return Err(AppError::Validation(
                "The selected program is invalid".to_string(),
            ));
        }

        let schema_json = serde_json::to_value(&dto.form_schema)
            .map_err(|e| AppError::Internal(format!("Failed to serialize form schema: {}", e)))?;

        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            INSERT INTO reports (program_id, coordinator_id, title, content,
                                 deadline, final_deadline, form_schema)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(dto.program_id)
        .bind(coordinator_id)
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.deadline)
        .bind(dto.final_deadline)
        .bind(schema_json)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created report {} in program {} by coordinator {}",
            report.id,
            report.program_id,
            coordinator_id
        );

        let action_url = format!("{}/reports/{}", self.frontend_url, report.id);
        self.notifications
            .notify_role(
                Role::FieldOfficer,
                payloads::new_report_added(report.id, &report.title, &action_url),
            )
            .await?;

        Ok(report)
    }

    /// Get a report by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<Report> {
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {} FROM reports WHERE id = $1",
            REPORT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// List a program's reports with the requesting field officer's latest
    /// submission status attached. Returns (rows, total).
    pub async fn list_for_officer(
        &self,
        program_id: Uuid,
        officer_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ReportWithSubmissionStatus>, i64)> {
        self.require_program(program_id).await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reports WHERE program_id = $1",
        )
        .bind(program_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count reports: {:?}", e);
            AppError::Database(e)
        })?;

        let rows = sqlx::query_as::<_, ReportWithSubmissionStatus>(
            r#"
            SELECT
                r.id, r.program_id, r.coordinator_id, r.title, r.content,
                r.deadline, r.final_deadline, r.form_schema,
                r.created_at, r.updated_at,
                s.status::text AS submission_status
            FROM reports r
            LEFT JOIN LATERAL (
                SELECT status FROM report_submissions
                WHERE report_id = r.id AND field_officer_id = $2
                ORDER BY created_at DESC
                LIMIT 1
            ) s ON TRUE
            WHERE r.program_id = $1
            ORDER BY r.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(program_id)
        .bind(officer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((rows, total))
    }

    /// List the reports a coordinator created in a program. Returns
    /// (rows, total).
    pub async fn list_created_by(
        &self,
        program_id: Uuid,
        coordinator_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Report>, i64)> {
        self.require_program(program_id).await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reports WHERE program_id = $1 AND coordinator_id = $2",
        )
        .bind(program_id)
        .bind(coordinator_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count created reports: {:?}", e);
            AppError::Database(e)
        })?;

        let rows = sqlx::query_as::<_, Report>(&format!(
            r#"
            SELECT {} FROM reports
            WHERE program_id = $1 AND coordinator_id = $2
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            REPORT_COLUMNS
        ))
        .bind(program_id)
        .bind(coordinator_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list created reports: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((rows, total))
    }

    /// Media rows for a report, optionally narrowed to one collection
    pub async fn list_attachments(
        &self,
        report_id: Uuid,
        collection: Option<&str>,
    ) -> Result<Vec<ReportAttachment>> {
        sqlx::query_as::<_, ReportAttachment>(
            r#"
            SELECT id, report_id, collection, file_key, file_name,
                   content_type, file_size, url, created_at
            FROM report_attachments
            WHERE report_id = $1
              AND ($2::text IS NULL OR collection = $2)
            ORDER BY created_at
            "#,
        )
        .bind(report_id)
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list report attachments: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Attach a template file to a report
    pub async fn upload_template(
        &self,
        report_id: Uuid,
        coordinator_id: Uuid,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<ReportAttachment> {
        self.upload_attachment(
            report_id,
            coordinator_id,
            COLLECTION_TEMPLATES,
            file_name,
            content_type,
            data,
        )
        .await
    }

    /// Attach a reference file to a report
    pub async fn upload_reference(
        &self,
        report_id: Uuid,
        coordinator_id: Uuid,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<ReportAttachment> {
        self.upload_attachment(
            report_id,
            coordinator_id,
            COLLECTION_REFERENCES,
            file_name,
            content_type,
            data,
        )
        .await
    }

    /// Store a file in one of the report's media collections. Only the
    /// report's coordinator may attach files.
    ///
    /// The object is written first; if the row insert fails afterwards, the
    /// object is deleted again so storage does not accumulate orphans.
    async fn upload_attachment(
        &self,
        report_id: Uuid,
        coordinator_id: Uuid,
        collection: &str,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<ReportAttachment> {
        let report = self.get_by_id(report_id).await?;
        if report.coordinator_id != coordinator_id {
            return Err(AppError::Forbidden(
                "Only the report's coordinator can attach files to this report".to_string(),
            ));
        }

        let file_size = data.len() as i64;
        let key = self.storage.generate_key(collection, report_id, file_name);
        self.storage.upload(&key, data, content_type).await?;
        let url = self.storage.file_url(&key);

        let insert = sqlx::query_as::<_, ReportAttachment>(
            r#"
            INSERT INTO report_attachments
                (report_id, collection, file_key, file_name, content_type, file_size, url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, report_id, collection, file_key, file_name,
                      content_type, file_size, url, created_at
            "#,
        )
        .bind(report_id)
        .bind(collection)
        .bind(&key)
        .bind(file_name)
        .bind(content_type)
        .bind(file_size)
        .bind(&url)
        .fetch_one(&self.pool)
        .await;

        match insert {
            Ok(attachment) => Ok(attachment),
            Err(e) => {
                tracing::error!("Failed to record report attachment: {:?}", e);
                if let Err(cleanup) = self.storage.delete(&key).await {
                    tracing::warn!(
                        "Failed to clean up orphaned attachment '{}': {}",
                        key,
                        cleanup
                    );
                }
                Err(AppError::Database(e))
            }
        }
    }

    async fn require_program(&self, program_id: Uuid) -> Result<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM programs WHERE id = $1)",
        )
        .bind(program_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check program: {:?}", e);
            AppError::Database(e)
        })?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "Program {} not found",
                program_id
            )));
        }

        Ok(())
    }
}
