use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::{AuthenticatedUser, Role};
use crate::features::programs::dtos::{CreateProgramDto, ProgramResponseDto, YearFilterQuery};
use crate::features::programs::services::ProgramService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Create a program (program head only)
#[utoipa::path(
    post,
    path = "/api/programs",
    request_body = CreateProgramDto,
    responses(
        (status = 201, description = "Program created", body = ApiResponse<ProgramResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires program_head role"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
pub async fn create_program(
    user: AuthenticatedUser,
    State(service): State<Arc<ProgramService>>,
    AppJson(dto): AppJson<CreateProgramDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProgramResponseDto>>)> {
    user.require_role(Role::ProgramHead)?;

    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let program = service.create(&dto).await?;
    let row = service.get_by_id(program.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ProgramResponseDto::from_row(row, None)),
            Some("Program created successfully.".to_string()),
            None,
        )),
    ))
}

/// List programs for a field officer, with the pending-reports indicator
#[utoipa::path(
    get,
    path = "/api/programs",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated programs", body = ApiResponse<Vec<ProgramResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
pub async fn list_programs(
    user: AuthenticatedUser,
    State(service): State<Arc<ProgramService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ProgramResponseDto>>>> {
    user.require_role(Role::FieldOfficer)?;

    let (rows, total) = service
        .list_paginated(pagination.limit(), pagination.offset())
        .await?;

    let mut dtos = Vec::with_capacity(rows.len());
    for row in rows {
        let pending = service
            .has_pending_reports_for_user(row.id, user.id)
            .await?;
        dtos.push(ProgramResponseDto::from_row(row, Some(pending)));
    }

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// List the authenticated coordinator's own programs
#[utoipa::path(
    get,
    path = "/api/programs/mine",
    params(PaginationQuery, YearFilterQuery),
    responses(
        (status = 200, description = "Paginated programs", body = ApiResponse<Vec<ProgramResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires focal_person role")
    ),
    security(("bearer_auth" = [])),
    tag = "programs"
)]
pub async fn list_my_programs(
    user: AuthenticatedUser,
    State(service): State<Arc<ProgramService>>,
    Query(pagination): Query<PaginationQuery>,
    Query(filter): Query<YearFilterQuery>,
) -> Result<Json<ApiResponse<Vec<ProgramResponseDto>>>> {
    user.require_role(Role::FocalPerson)?;

    let (rows, total) = service
        .list_by_coordinator(
            user.id,
            filter.year,
            pagination.limit(),
            pagination.offset(),
        )
        .await?;

    let dtos: Vec<ProgramResponseDto> = rows
        .into_iter()
        .map(|row| ProgramResponseDto::from_row(row, None))
        .collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}
