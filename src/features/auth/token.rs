use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, UserRole};

/// Claims expected in tokens minted by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub name: String,
    pub role: UserRole,
    pub exp: u64,
}

/// Validates bearer tokens and maps claims onto [`AuthenticatedUser`].
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway.as_secs();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(AuthenticatedUser {
            id: data.claims.sub,
            name: data.claims.name,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_leeway: Duration::from_secs(60),
        }
    }

    fn mint(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600
    }

    #[test]
    fn valid_token_round_trips_identity() {
        let validator = TokenValidator::new(&test_config());
        let id = Uuid::new_v4();
        let token = mint(
            &Claims {
                sub: id,
                name: "Ada".to_string(),
                role: UserRole::Admin,
                exp: future_exp(),
            },
            "test-secret",
        );

        let user = validator.validate_token(&token).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.role, UserRole::Admin);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let validator = TokenValidator::new(&test_config());
        let token = mint(
            &Claims {
                sub: Uuid::new_v4(),
                name: "Mallory".to_string(),
                role: UserRole::Citizen,
                exp: future_exp(),
            },
            "other-secret",
        );

        assert!(matches!(
            validator.validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
