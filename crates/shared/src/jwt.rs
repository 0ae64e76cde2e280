//! JWT token generation and validation.
//!
//! Tokens are HS256-signed with a server-held secret. By default they carry no
//! expiry; a lifetime can be configured with `jwt.token_ttl_secs`.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::auth::Claims;
use crate::config::JwtConfig;
use crate::types::UserId;

/// Upper bound on a configured token lifetime (100 years).
const MAX_TOKEN_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    token_ttl: Option<Duration>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("token_ttl", &self.token_ttl)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let token_ttl = config.token_ttl_secs.map(|secs| {
            i64::try_from(secs.min(MAX_TOKEN_TTL_SECS)).map_or(Duration::zero(), Duration::seconds)
        });
        Self {
            token_ttl,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues a bearer token for a user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn issue_token(&self, user_id: UserId, email: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let expires_at = self.token_ttl.map(|ttl| now + ttl);
        let claims = Claims::new(user_id, email, now, expires_at);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` if the token is malformed or the
    /// signature does not match.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        if self.token_ttl.is_some() {
            validation.set_required_spec_claims(&["exp"]);
        } else {
            validation.set_required_spec_claims::<&str>(&[]);
            validation.validate_exp = false;
        }

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service(ttl: Option<u64>) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            token_ttl_secs: ttl,
        })
    }

    #[test]
    fn test_issue_and_validate_token() {
        let service = create_test_service(None);
        let user_id = UserId::new();

        let token = service.issue_token(user_id, "a@example.com").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email, "a@example.com");
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_token_with_ttl_carries_expiry() {
        let service = create_test_service(Some(3600));
        let token = service.issue_token(UserId::new(), "a@example.com").unwrap();
        let claims = service.validate_token(&token).unwrap();

        let exp = claims.exp.unwrap();
        assert!(exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let expired = Claims {
            sub: UserId::new(),
            email: "a@example.com".to_string(),
            iat: 1_000,
            exp: Some(2_000),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &expired,
            &EncodingKey::from_secret(b"test-secret-key-for-testing"),
        )
        .unwrap();

        let service = create_test_service(Some(60));
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = create_test_service(None);
        let token = issuer.issue_token(UserId::new(), "a@example.com").unwrap();

        let other = JwtService::new(&JwtConfig {
            secret: "another-secret".to_string(),
            token_ttl_secs: None,
        });
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service(None);
        let result = service.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
