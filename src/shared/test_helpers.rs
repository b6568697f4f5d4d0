#![cfg(test)]

use uuid::Uuid;

use crate::features::auth::model::{AuthenticatedUser, Role};

pub fn field_officer(name: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        id: Uuid::new_v4(),
        name: name.to_string(),
        role: Role::FieldOfficer,
    }
}

pub fn focal_person(name: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        id: Uuid::new_v4(),
        name: name.to_string(),
        role: Role::FocalPerson,
    }
}
