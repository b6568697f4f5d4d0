use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::programs::dtos::CreateProgramDto;
use crate::features::programs::models::{Program, ProgramWithCoordinator};

const PROGRAM_WITH_COORDINATOR: &str = r#"
    SELECT
        p.id, p.name, p.description, p.coordinator_id,
        u.name AS coordinator_name, u.email AS coordinator_email,
        p.created_at, p.updated_at
    FROM programs p
    JOIN users u ON u.id = p.coordinator_id
"#;

/// Service for program operations
pub struct ProgramService {
    pool: PgPool,
}

impl ProgramService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new program owned by the given coordinator
    pub async fn create(&self, dto: &CreateProgramDto) -> Result<Program> {
        let coordinator_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE id = $1 AND role = 'focal_person')",
        )
        .bind(dto.coordinator_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check coordinator: {:?}", e);
            AppError::Database(e)
        })?;

        if !coordinator_exists {
            return Err(AppError::Validation(
                "The selected coordinator is invalid".to_string(),
            ));
        }

        let program = sqlx::query_as::<_, Program>(
            r#"
            INSERT INTO programs (name, description, coordinator_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, coordinator_id, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.coordinator_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create program: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created program: {} (coordinator: {})",
            program.id,
            program.coordinator_id
        );

        Ok(program)
    }

    /// Get a program by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<ProgramWithCoordinator> {
        sqlx::query_as::<_, ProgramWithCoordinator>(&format!(
            "{} WHERE p.id = $1",
            PROGRAM_WITH_COORDINATOR
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get program: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Program {} not found", id)))
    }

    /// List all programs (field-officer view), newest first.
    /// Returns (programs, total_count).
    pub async fn list_paginated(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProgramWithCoordinator>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM programs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count programs: {:?}", e);
                AppError::Database(e)
            })?;

        let rows = sqlx::query_as::<_, ProgramWithCoordinator>(&format!(
            "{} ORDER BY p.created_at DESC LIMIT $1 OFFSET $2",
            PROGRAM_WITH_COORDINATOR
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list programs: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((rows, total))
    }

    /// List programs coordinated by the given user, optionally filtered by
    /// creation year. Returns (programs, total_count).
    pub async fn list_by_coordinator(
        &self,
        coordinator_id: Uuid,
        year: Option<i32>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProgramWithCoordinator>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM programs
            WHERE coordinator_id = $1
              AND ($2::int IS NULL OR date_part('year', created_at)::int = $2)
            "#,
        )
        .bind(coordinator_id)
        .bind(year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count coordinator programs: {:?}", e);
            AppError::Database(e)
        })?;

        let rows = sqlx::query_as::<_, ProgramWithCoordinator>(&format!(
            r#"{}
            WHERE p.coordinator_id = $1
              AND ($2::int IS NULL OR date_part('year', p.created_at)::int = $2)
            ORDER BY p.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            PROGRAM_WITH_COORDINATOR
        ))
        .bind(coordinator_id)
        .bind(year)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list coordinator programs: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((rows, total))
    }

    /// Whether the given user still has reports requiring action in this
    /// program: a report with no submission from them, or one whose
    /// submission came back as returned.
    ///
    /// Read-time convenience only; nothing is locked or reserved.
    pub async fn has_pending_reports_for_user(
        &self,
        program_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM reports r
                WHERE r.program_id = $1
                  AND (
                    NOT EXISTS (
                        SELECT 1 FROM report_submissions s
                        WHERE s.report_id = r.id AND s.field_officer_id = $2
                    )
                    OR EXISTS (
                        SELECT 1 FROM report_submissions s
                        WHERE s.report_id = r.id
                          AND s.field_officer_id = $2
                          AND s.status = 'returned'
                    )
                  )
            )
            "#,
        )
        .bind(program_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check pending reports: {:?}", e);
            AppError::Database(e)
        })
    }
}
