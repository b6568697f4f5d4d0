use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Workflow roles, mirrored from the identity provider's role claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProgramHead,
    FocalPerson,
    FieldOfficer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::ProgramHead => "program_head",
            Role::FocalPerson => "focal_person",
            Role::FieldOfficer => "field_officer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The request-scoped identity injected by the auth middleware.
///
/// Authentication itself lives in the identity gateway; this service only
/// consumes the verified claims.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Fail with 403 unless the caller holds the given role
    pub fn require_role(&self, role: Role) -> Result<()> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "This action requires the {} role",
                role
            )))
        }
    }

}

/// JWT claims issued by the identity gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub role: Role,
    pub exp: u64,
    pub iat: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{field_officer, focal_person};

    #[test]
    fn require_role_matches() {
        let coordinator = focal_person("Ana");
        assert!(coordinator.require_role(Role::FocalPerson).is_ok());
        assert!(coordinator.require_role(Role::FieldOfficer).is_err());

        let officer = field_officer("Budi");
        assert!(officer.has_role(Role::FieldOfficer));
        assert!(matches!(
            officer.require_role(Role::ProgramHead),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::FieldOfficer).unwrap();
        assert_eq!(json, "\"field_officer\"");
    }
}
