//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{AppState, error::ApiError};
use fesa_db::{UserRepository, entities::users};
use fesa_shared::types::UserId;
use fesa_shared::{Claims, JwtError};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Stores the claims in request extensions for handlers to access
///
/// A missing token answers 401; a token that fails verification answers 403.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return ApiError::unauthorized(
            "missing_token",
            "Authorization header with Bearer token is required",
        )
        .into_response();
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            let message = match e {
                JwtError::Expired => "Token has expired",
                _ => "Invalid or malformed token",
            };
            info!(error = %e, "Rejected bearer token");
            ApiError::forbidden("invalid_token", message).into_response()
        }
    }
}

/// Extractor for authenticated user claims.
///
/// Use this in handlers to get the authenticated user's claims:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.0.user_id()
    }

    /// Returns the inner claims.
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.0
    }

    /// Loads the caller's current user record.
    ///
    /// # Errors
    ///
    /// 401 `unknown_user` if the account behind the token no longer exists.
    pub async fn load(&self, state: &AppState) -> Result<users::Model, ApiError> {
        UserRepository::new((*state.db).clone())
            .find_by_id(self.user_id())
            .await?
            .ok_or_else(|| {
                warn!(user_id = %self.user_id(), "Token subject no longer exists");
                ApiError::unauthorized("unknown_user", "The account for this token no longer exists")
            })
    }

    /// Admin gate: loads the caller and checks their stored access level.
    ///
    /// The level in the database is authoritative; nothing about roles is
    /// read from the token.
    ///
    /// # Errors
    ///
    /// 403 `admin_required` for members, 401 `unknown_user` for a stale token.
    pub async fn require_admin(&self, state: &AppState) -> Result<users::Model, ApiError> {
        let user = self.load(state).await?;
        if !user.access().is_admin() {
            info!(user_id = %user.id, "Admin route refused for member");
            return Err(ApiError::forbidden(
                "admin_required",
                "Administrator access required",
            ));
        }
        Ok(user)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized("missing_token", "Authentication required"))
    }
}
