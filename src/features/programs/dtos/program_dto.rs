use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::programs::models::ProgramWithCoordinator;

/// Request DTO for creating a program
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProgramDto {
    #[validate(length(min = 1, max = 255, message = "name is required (max 255 characters)"))]
    pub name: String,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    pub coordinator_id: Uuid,
}

/// Coordinator summary embedded in program responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoordinatorDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Response DTO for a program
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProgramResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub coordinator: CoordinatorDto,
    /// Whether the requesting field officer still has reports requiring
    /// action in this program (never submitted, or returned for revision)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_pending_reports: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProgramResponseDto {
    pub fn from_row(row: ProgramWithCoordinator, has_pending_reports: Option<bool>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            coordinator: CoordinatorDto {
                id: row.coordinator_id,
                name: row.coordinator_name,
                email: row.coordinator_email,
            },
            has_pending_reports,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Year filter for the coordinator's own program listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct YearFilterQuery {
    /// Filter programs by creation year
    pub year: Option<i32>,
}
