use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::activity::ActivityService;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::notifications::payloads;
use crate::features::notifications::services::NotificationService;
use crate::features::reports::models::{FieldType, FormField, Report};
use crate::features::reports::services::ReportService;
use crate::features::submissions::dtos::{ReviewStatus, UpdateStatusDto};
use crate::features::submissions::models::{
    append_file_urls, compute_timeliness, remove_file_urls, validate_scalar_answer, FieldAnswer,
    ReportSubmission, SubmissionAttachment, SubmissionData, SubmissionStatus,
    SubmissionWithContext,
};
use crate::modules::storage::ObjectStore;
use crate::shared::constants::COLLECTION_SUBMISSION_ATTACHMENTS;

const SUBMISSION_WITH_CONTEXT: &str = r#"
    SELECT
        s.id, s.report_id, s.field_officer_id, s.status, s.description,
        s.data, s.timeliness, s.remarks, s.submitted_at,
        s.created_at, s.updated_at,
        r.title AS report_title, r.program_id,
        u.name AS field_officer_name
    FROM report_submissions s
    JOIN reports r ON r.id = s.report_id
    JOIN users u ON u.id = s.field_officer_id
"#;

/// One file part answering a form field
pub struct UploadedAnswerFile {
    pub field_id: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Parsed multipart payload for submission creation
pub struct NewSubmission {
    pub report_id: Uuid,
    pub description: Option<String>,
    /// (field_id, value) pairs from text parts
    pub scalar_answers: Vec<(String, String)>,
    pub files: Vec<UploadedAnswerFile>,
}

/// Parsed multipart payload for a submission edit. `description` is None
/// when the part was absent (keep the stored value).
pub struct SubmissionChanges {
    pub description: Option<String>,
    pub files_to_delete: Vec<Uuid>,
    pub files: Vec<UploadedAnswerFile>,
}

/// Build the answer map from the multipart parts, checking each answer
/// against its field's declared type. Unanswered fields are fine; whether a
/// `required` field was filled in is the client form's concern.
fn collect_answers(
    schema: &HashMap<&str, &FormField>,
    input: &NewSubmission,
) -> Result<SubmissionData> {
    let mut data = SubmissionData::new();

    for (field_id, value) in &input.scalar_answers {
        let field = schema
            .get(field_id.as_str())
            .ok_or_else(|| AppError::Validation(format!("Unknown form field '{}'", field_id)))?;
        validate_scalar_answer(field, value).map_err(AppError::Validation)?;
        data.insert(field_id.clone(), FieldAnswer::Scalar(value.clone()));
    }

    for file in &input.files {
        let field = schema.get(file.field_id.as_str()).ok_or_else(|| {
            AppError::Validation(format!("Unknown form field '{}'", file.field_id))
        })?;
        if field.field_type != FieldType::File {
            return Err(AppError::Validation(format!(
                "Field '{}' does not accept file uploads",
                field.label
            )));
        }
    }

    Ok(data)
}

/// Service for report-submission operations
pub struct SubmissionService {
    pool: PgPool,
    storage: Arc<ObjectStore>,
    reports: Arc<ReportService>,
    notifications: Arc<NotificationService>,
    activity: Arc<ActivityService>,
    frontend_url: String,
}

impl SubmissionService {
    pub fn new(
        pool: PgPool,
        storage: Arc<ObjectStore>,
        reports: Arc<ReportService>,
        notifications: Arc<NotificationService>,
        activity: Arc<ActivityService>,
        frontend_url: String,
    ) -> Self {
        Self {
            pool,
            storage,
            reports,
            notifications,
            activity,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a submission for a report.
    ///
    /// The write is deliberately phased: the submission row first, then each
    /// attachment object and its row, then the derived data map. If a later
    /// phase fails, the stored objects and the row are removed again.
    pub async fn create(
        &self,
        officer: &AuthenticatedUser,
        input: NewSubmission,
    ) -> Result<(SubmissionWithContext, Vec<SubmissionAttachment>)> {
        let report = self.reports.get_by_id(input.report_id).await?;
        let schema: HashMap<&str, &FormField> = report
            .form_schema
            .0
            .iter()
            .map(|f| (f.id.as_str(), f))
            .collect();

        let mut data = collect_answers(&schema, &input)?;

        let submitted_at = Utc::now();
        let timeliness = compute_timeliness(submitted_at, report.deadline);

        let submission_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO report_submissions
                (report_id, field_officer_id, status, description, timeliness, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(report.id)
        .bind(officer.id)
        .bind(SubmissionStatus::Submitted)
        .bind(&input.description)
        .bind(timeliness)
        .bind(submitted_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create submission: {:?}", e);
            AppError::Database(e)
        })?;

        let mut stored_keys: Vec<String> = Vec::new();
        let mut urls_by_field: HashMap<String, Vec<String>> = HashMap::new();

        for file in &input.files {
            match self.store_attachment(submission_id, file).await {
                Ok((url, key)) => {
                    stored_keys.push(key);
                    urls_by_field.entry(file.field_id.clone()).or_default().push(url);
                }
                Err(e) => {
                    self.abandon_submission(submission_id, &stored_keys).await;
                    return Err(e);
                }
            }
        }

        for (field_id, urls) in urls_by_field {
            append_file_urls(&mut data, &field_id, urls);
        }

        let data_json = match serde_json::to_value(&data) {
            Ok(v) => v,
            Err(e) => {
                self.abandon_submission(submission_id, &stored_keys).await;
                return Err(AppError::Internal(format!(
                    "Failed to serialize submission data: {}",
                    e
                )));
            }
        };

        if let Err(e) = sqlx::query(
            "UPDATE report_submissions SET data = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(&data_json)
        .bind(submission_id)
        .execute(&self.pool)
        .await
        {
            tracing::error!("Failed to persist submission data: {:?}", e);
            self.abandon_submission(submission_id, &stored_keys).await;
            return Err(AppError::Database(e));
        }

        tracing::info!(
            "Submission {} created for report {} by officer {} ({} files)",
            submission_id,
            report.id,
            officer.id,
            stored_keys.len()
        );

        self.notify_submission_created(submission_id, &report, officer)
            .await?;

        let submission = self.get_with_context(submission_id).await?;
        let attachments = self.list_attachments(submission_id).await?;
        Ok((submission, attachments))
    }

    /// Edit a submission: remove marked attachments, add new files, change
    /// the description. Returns `changed = false` when the request amounts
    /// to no change at all, in which case nothing is written.
    pub async fn update(
        &self,
        officer_id: Uuid,
        submission_id: Uuid,
        changes: SubmissionChanges,
    ) -> Result<(SubmissionWithContext, Vec<SubmissionAttachment>, bool)> {
        let submission = self.get_by_id(submission_id).await?;
        if submission.field_officer_id != officer_id {
            return Err(AppError::Forbidden(
                "You can only edit your own submissions".to_string(),
            ));
        }
        if submission.status == SubmissionStatus::Accepted {
            return Err(AppError::Conflict(
                "An accepted submission can no longer be edited".to_string(),
            ));
        }

        let report = self.reports.get_by_id(submission.report_id).await?;
        let schema: HashMap<&str, &FormField> = report
            .form_schema
            .0
            .iter()
            .map(|f| (f.id.as_str(), f))
            .collect();
        for file in &changes.files {
            let field = schema.get(file.field_id.as_str()).ok_or_else(|| {
                AppError::Validation(format!("Unknown form field '{}'", file.field_id))
            })?;
            if field.field_type != FieldType::File {
                return Err(AppError::Validation(format!(
                    "Field '{}' does not accept file uploads",
                    field.label
                )));
            }
        }

        let attachments = self.list_attachments(submission_id).await?;
        let mut to_delete: Vec<&SubmissionAttachment> = Vec::new();
        for id in &changes.files_to_delete {
            let attachment = attachments.iter().find(|a| a.id == *id).ok_or_else(|| {
                AppError::Validation(format!(
                    "Attachment {} does not belong to this submission",
                    id
                ))
            })?;
            to_delete.push(attachment);
        }

        let new_description = match &changes.description {
            Some(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            None => submission.description.clone(),
        };
        let description_changed = new_description != submission.description;

        if to_delete.is_empty() && changes.files.is_empty() && !description_changed {
            let context = self.get_with_context(submission_id).await?;
            return Ok((context, attachments, false));
        }

        let mut data = submission.data.0.clone();

        // Rows go first so no surviving row can point at a removed object;
        // the object deletes afterwards are best-effort cleanup.
        let removed_urls: HashSet<String> = to_delete.iter().map(|a| a.url.clone()).collect();
        let mut removed_keys: Vec<String> = Vec::with_capacity(to_delete.len());
        for attachment in &to_delete {
            sqlx::query("DELETE FROM submission_attachments WHERE id = $1")
                .bind(attachment.id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to delete attachment row: {:?}", e);
                    AppError::Database(e)
                })?;
            removed_keys.push(attachment.file_key.clone());
        }
        self.discard_objects(&removed_keys).await;
        remove_file_urls(&mut data, &removed_urls);

        let mut stored_keys: Vec<String> = Vec::new();
        let mut urls_by_field: HashMap<String, Vec<String>> = HashMap::new();
        for file in &changes.files {
            match self.store_attachment(submission_id, file).await {
                Ok((url, key)) => {
                    stored_keys.push(key);
                    urls_by_field.entry(file.field_id.clone()).or_default().push(url);
                }
                Err(e) => {
                    self.discard_objects(&stored_keys).await;
                    return Err(e);
                }
            }
        }
        for (field_id, urls) in urls_by_field {
            append_file_urls(&mut data, &field_id, urls);
        }

        let data_json = serde_json::to_value(&data).map_err(|e| {
            AppError::Internal(format!("Failed to serialize submission data: {}", e))
        })?;

        sqlx::query(
            r#"
            UPDATE report_submissions
            SET description = $1, data = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(&new_description)
        .bind(&data_json)
        .bind(submission_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update submission: {:?}", e);
            AppError::Database(e)
        })?;

        self.activity
            .log(
                officer_id,
                "submission_updated",
                json!({
                    "submission_id": submission_id,
                    "report_id": submission.report_id,
                    "files_deleted": to_delete.len(),
                    "files_added": changes.files.len(),
                    "description_changed": description_changed,
                }),
            )
            .await;

        let context = self.get_with_context(submission_id).await?;
        let attachments = self.list_attachments(submission_id).await?;
        Ok((context, attachments, true))
    }

    /// Review a submission: accept it, or return it with remarks. Only the
    /// report's coordinator may review, and only while the submission is
    /// submitted or returned.
    pub async fn update_status(
        &self,
        coordinator_id: Uuid,
        submission_id: Uuid,
        dto: &UpdateStatusDto,
    ) -> Result<SubmissionWithContext> {
        let submission = self.get_by_id(submission_id).await?;
        let report = self.reports.get_by_id(submission.report_id).await?;

        if report.coordinator_id != coordinator_id {
            return Err(AppError::Forbidden(
                "Only the report's coordinator can review this submission".to_string(),
            ));
        }
        if !submission.status.is_reviewable() {
            return Err(AppError::Conflict(
                "This submission has already been accepted".to_string(),
            ));
        }

        // Accepting clears any remarks left from an earlier return
        let (new_status, remarks) = match dto.status {
            ReviewStatus::Accepted => (SubmissionStatus::Accepted, None),
            ReviewStatus::Returned => {
                let remarks = dto
                    .remarks
                    .as_deref()
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or_else(|| {
                        AppError::Validation(
                            "remarks are required when returning a submission".to_string(),
                        )
                    })?;
                (SubmissionStatus::Returned, Some(remarks.to_string()))
            }
        };

        sqlx::query(
            r#"
            UPDATE report_submissions
            SET status = $1, remarks = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(new_status)
        .bind(&remarks)
        .bind(submission_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update submission status: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Submission {} reviewed as {} by coordinator {}",
            submission_id,
            new_status.as_str(),
            coordinator_id
        );

        let action_url = format!("{}/submissions/{}", self.frontend_url, submission_id);
        let payload = match new_status {
            SubmissionStatus::Accepted => {
                payloads::submission_accepted(submission_id, &report.title, &action_url)
            }
            _ => payloads::submission_returned(submission_id, &report.title, &action_url),
        };
        self.notifications
            .notify(submission.field_officer_id, payload)
            .await?;

        self.get_with_context(submission_id).await
    }

    /// The officer's own submissions, optionally narrowed to one status.
    /// Returns (rows, total), newest first.
    pub async fn list_mine(
        &self,
        officer_id: Uuid,
        status: Option<SubmissionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<SubmissionWithContext>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM report_submissions
            WHERE field_officer_id = $1
              AND ($2::submission_status IS NULL OR status = $2)
            "#,
        )
        .bind(officer_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count submissions: {:?}", e);
            AppError::Database(e)
        })?;

        let rows = sqlx::query_as::<_, SubmissionWithContext>(&format!(
            r#"{}
            WHERE s.field_officer_id = $1
              AND ($2::submission_status IS NULL OR s.status = $2)
            ORDER BY s.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            SUBMISSION_WITH_CONTEXT
        ))
        .bind(officer_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list submissions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((rows, total))
    }

    /// All submissions for a report, for the report's coordinator.
    /// Returns (rows, total), newest first.
    pub async fn list_for_report(
        &self,
        report_id: Uuid,
        coordinator_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<SubmissionWithContext>, i64)> {
        let report = self.reports.get_by_id(report_id).await?;
        if report.coordinator_id != coordinator_id {
            return Err(AppError::Forbidden(
                "Only the report's coordinator can view its submissions".to_string(),
            ));
        }

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM report_submissions WHERE report_id = $1",
        )
        .bind(report_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count report submissions: {:?}", e);
            AppError::Database(e)
        })?;

        let rows = sqlx::query_as::<_, SubmissionWithContext>(&format!(
            r#"{}
            WHERE s.report_id = $1
            ORDER BY s.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            SUBMISSION_WITH_CONTEXT
        ))
        .bind(report_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list report submissions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((rows, total))
    }

    /// The officer's current submission for a report: the newest one, since
    /// the table carries no uniqueness constraint on (report, officer)
    pub async fn my_submission(
        &self,
        report_id: Uuid,
        officer_id: Uuid,
    ) -> Result<(SubmissionWithContext, Vec<SubmissionAttachment>)> {
        // 404s before looking for the submission
        self.reports.get_by_id(report_id).await?;

        let submission = sqlx::query_as::<_, SubmissionWithContext>(&format!(
            r#"{}
            WHERE s.report_id = $1 AND s.field_officer_id = $2
            ORDER BY s.created_at DESC
            LIMIT 1
            "#,
            SUBMISSION_WITH_CONTEXT
        ))
        .bind(report_id)
        .bind(officer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get submission: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| {
            AppError::NotFound("You have not submitted this report yet".to_string())
        })?;

        let attachments = self.list_attachments(submission.id).await?;
        Ok((submission, attachments))
    }

    /// Attachments of a submission, oldest first
    pub async fn list_attachments(
        &self,
        submission_id: Uuid,
    ) -> Result<Vec<SubmissionAttachment>> {
        sqlx::query_as::<_, SubmissionAttachment>(
            r#"
            SELECT id, submission_id, field_id, file_key, file_name,
                   content_type, file_size, url, created_at
            FROM submission_attachments
            WHERE submission_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(submission_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list submission attachments: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Presigned download link for one attachment. Visible to the submitting
    /// officer and the report's coordinator.
    pub async fn attachment_download_url(
        &self,
        user_id: Uuid,
        submission_id: Uuid,
        attachment_id: Uuid,
    ) -> Result<(String, u32)> {
        let submission = self.get_by_id(submission_id).await?;
        let report = self.reports.get_by_id(submission.report_id).await?;

        if user_id != submission.field_officer_id && user_id != report.coordinator_id {
            return Err(AppError::Forbidden(
                "You do not have access to this attachment".to_string(),
            ));
        }

        let attachment = sqlx::query_as::<_, SubmissionAttachment>(
            r#"
            SELECT id, submission_id, field_id, file_key, file_name,
                   content_type, file_size, url, created_at
            FROM submission_attachments
            WHERE id = $1 AND submission_id = $2
            "#,
        )
        .bind(attachment_id)
        .bind(submission_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get attachment: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Attachment {} not found", attachment_id)))?;

        let url = self.storage.presigned_url(&attachment.file_key).await?;
        Ok((url, self.storage.presigned_url_expiry_secs()))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<ReportSubmission> {
        sqlx::query_as::<_, ReportSubmission>(
            r#"
            SELECT id, report_id, field_officer_id, status, description, data,
                   timeliness, remarks, submitted_at, created_at, updated_at
            FROM report_submissions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get submission: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Submission {} not found", id)))
    }

    async fn get_with_context(&self, id: Uuid) -> Result<SubmissionWithContext> {
        sqlx::query_as::<_, SubmissionWithContext>(&format!(
            "{} WHERE s.id = $1",
            SUBMISSION_WITH_CONTEXT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get submission: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Submission {} not found", id)))
    }

    /// Store one answer file and record its row. Returns (url, key).
    async fn store_attachment(
        &self,
        submission_id: Uuid,
        file: &UploadedAnswerFile,
    ) -> Result<(String, String)> {
        let key = self.storage.generate_key(
            COLLECTION_SUBMISSION_ATTACHMENTS,
            submission_id,
            &file.file_name,
        );
        self.storage
            .upload(&key, file.data.clone(), &file.content_type)
            .await?;
        let url = self.storage.file_url(&key);

        let insert = sqlx::query(
            r#"
            INSERT INTO submission_attachments
                (submission_id, field_id, file_key, file_name, content_type, file_size, url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(submission_id)
        .bind(&file.field_id)
        .bind(&key)
        .bind(&file.file_name)
        .bind(&file.content_type)
        .bind(file.data.len() as i64)
        .bind(&url)
        .execute(&self.pool)
        .await;

        if let Err(e) = insert {
            tracing::error!("Failed to record submission attachment: {:?}", e);
            if let Err(cleanup) = self.storage.delete(&key).await {
                tracing::warn!("Failed to clean up orphaned object '{}': {}", key, cleanup);
            }
            return Err(AppError::Database(e));
        }

        Ok((url, key))
    }

    /// Best-effort removal of a half-created submission and its objects
    async fn abandon_submission(&self, submission_id: Uuid, stored_keys: &[String]) {
        self.discard_objects(stored_keys).await;

        // Cascade removes any attachment rows already inserted
        if let Err(e) = sqlx::query("DELETE FROM report_submissions WHERE id = $1")
            .bind(submission_id)
            .execute(&self.pool)
            .await
        {
            tracing::warn!(
                "Failed to remove abandoned submission {}: {:?}",
                submission_id,
                e
            );
        }
    }

    async fn discard_objects(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.storage.delete(key).await {
                tracing::warn!("Failed to clean up object '{}': {}", key, e);
            }
        }
    }

    async fn notify_submission_created(
        &self,
        submission_id: Uuid,
        report: &Report,
        officer: &AuthenticatedUser,
    ) -> Result<()> {
        let officer_url = format!("{}/submissions/{}", self.frontend_url, submission_id);
        self.notifications
            .notify(
                officer.id,
                payloads::submission_confirmation(
                    submission_id,
                    report.id,
                    report.program_id,
                    &report.title,
                    &officer_url,
                ),
            )
            .await?;

        let coordinator_url = format!(
            "{}/reports/{}/submissions/{}",
            self.frontend_url, report.id, submission_id
        );
        self.notifications
            .notify(
                report.coordinator_id,
                payloads::submission_received(
                    submission_id,
                    report.id,
                    report.program_id,
                    &report.title,
                    &officer.name,
                    &coordinator_url,
                ),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &str, field_type: FieldType, required: bool) -> FormField {
        FormField {
            id: id.to_string(),
            label: id.to_string(),
            field_type,
            required,
        }
    }

    fn schema_map(fields: &[FormField]) -> HashMap<&str, &FormField> {
        fields.iter().map(|f| (f.id.as_str(), f)).collect()
    }

    fn empty_submission() -> NewSubmission {
        NewSubmission {
            report_id: Uuid::new_v4(),
            description: Some("quarterly figures attached".to_string()),
            scalar_answers: Vec::new(),
            files: Vec::new(),
        }
    }

    #[test]
    fn accepts_submission_leaving_required_fields_unanswered() {
        // Required-ness is a client-form concern; an answerless submission
        // still goes through with an empty data map.
        let fields = [field("headcount", FieldType::Number, true)];
        let schema = schema_map(&fields);

        let data = collect_answers(&schema, &empty_submission()).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn rejects_answer_for_unknown_field() {
        let fields = [field("headcount", FieldType::Number, false)];
        let schema = schema_map(&fields);

        let mut input = empty_submission();
        input.scalar_answers.push(("budget".to_string(), "12".to_string()));

        let err = collect_answers(&schema, &input).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn rejects_file_part_on_scalar_field() {
        let fields = [field("headcount", FieldType::Number, false)];
        let schema = schema_map(&fields);

        let mut input = empty_submission();
        input.files.push(UploadedAnswerFile {
            field_id: "headcount".to_string(),
            file_name: "counts.csv".to_string(),
            content_type: "text/csv".to_string(),
            data: b"1,2,3".to_vec(),
        });

        let err = collect_answers(&schema, &input).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn typed_answers_land_in_the_data_map() {
        let fields = [
            field("headcount", FieldType::Number, true),
            field("visited_on", FieldType::Date, false),
        ];
        let schema = schema_map(&fields);

        let mut input = empty_submission();
        input
            .scalar_answers
            .push(("headcount".to_string(), "42".to_string()));
        input
            .scalar_answers
            .push(("visited_on".to_string(), "2026-03-14".to_string()));

        let data = collect_answers(&schema, &input).unwrap();
        assert_eq!(
            data.get("headcount"),
            Some(&FieldAnswer::Scalar("42".to_string()))
        );
        assert_eq!(data.len(), 2);
    }
}
