use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims};

/// Verifies bearer tokens issued by the identity gateway (HS256, shared secret)
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway.as_secs();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid subject claim".to_string()))?;

        Ok(AuthenticatedUser {
            id,
            name: data.claims.name,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use jsonwebtoken::{EncodingKey, Header};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_leeway: Duration::from_secs(60),
        }
    }

    fn issue(claims: &Claims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_for(sub: &str) -> Claims {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        Claims {
            sub: sub.to_string(),
            name: "Budi".to_string(),
            role: Role::FieldOfficer,
            exp: now + 3600,
            iat: now,
        }
    }

    #[test]
    fn verifies_valid_token() {
        let verifier = TokenVerifier::new(&config());
        let id = Uuid::new_v4();
        let token = issue(&claims_for(&id.to_string()), "test-secret");

        let user = verifier.verify(&token).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.role, Role::FieldOfficer);
    }

    #[test]
    fn rejects_wrong_secret() {
        let verifier = TokenVerifier::new(&config());
        let token = issue(&claims_for(&Uuid::new_v4().to_string()), "other-secret");

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn rejects_non_uuid_subject() {
        let verifier = TokenVerifier::new(&config());
        let token = issue(&claims_for("not-a-uuid"), "test-secret");

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
