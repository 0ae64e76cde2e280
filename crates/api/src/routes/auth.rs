//! Authentication routes: register, login, current user, profile.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError, extractors::ValidatedJson, middleware::AuthUser};
use fesa_core::auth::{AccessLevel, PasswordError, hash_password, verify_password};
use fesa_core::profile::OnlineStatus;
use fesa_db::{NewUser, ProfileUpdate, UserRepository, entities::users};
use fesa_shared::types::Money;

/// Creates the public auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Creates the auth routes that need a bearer token.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/profile", put(update_profile))
}

/// Request body for registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name.
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,
    /// Contact phone.
    #[validate(length(min = 1, max = 32, message = "Phone is required"))]
    pub phone: String,
}

/// Request body for login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for a profile update. Every field is overwritten.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Display name.
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,
    /// Contact phone.
    #[validate(length(min = 1, max = 32, message = "Phone is required"))]
    pub phone: String,
    /// Inline-encoded picture.
    #[serde(default, alias = "profilePicture")]
    pub profile_picture: Option<String>,
    /// Free-text bio.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    /// `online`, `away` or `offline`; omitted keeps the current status.
    #[serde(default, alias = "onlineStatus")]
    pub online_status: Option<String>,
}

/// Public user record. The password hash is never included.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Contact phone.
    pub phone: String,
    /// Wallet balance.
    pub wallet_balance: Money,
    /// Numeric access level (0, 1, 2).
    pub access_level: i16,
    /// Named access level.
    pub role: AccessLevel,
    /// Inline-encoded picture.
    pub profile_picture: Option<String>,
    /// Free-text bio.
    pub bio: Option<String>,
    /// Presence status.
    pub online_status: OnlineStatus,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        let role = user.access();
        let online_status = user.status();
        let wallet_balance = user.balance();
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            wallet_balance,
            access_level: role.level(),
            role,
            profile_picture: user.profile_picture,
            bio: user.bio,
            online_status,
            created_at: user.created_at,
        }
    }
}

/// Token plus the user it was issued for.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Bearer token.
    pub token: String,
    /// Public user record.
    pub user: UserResponse,
}

fn issue_token(state: &AppState, user: &users::Model) -> Result<String, ApiError> {
    state
        .jwt_service
        .issue_token(user.user_id(), &user.email)
        .map_err(|e| {
            error!(error = %e, "Failed to issue token");
            ApiError::internal("token_error", e.to_string())
        })
}

/// POST /auth/register - Create an account and sign the caller in.
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let password_hash = hash_password(&payload.password).map_err(|e| match e {
        PasswordError::Empty => ApiError::validation("invalid_fields", e.to_string()),
        _ => {
            error!(error = %e, "Password hashing failed");
            ApiError::internal("hash_error", e.to_string())
        }
    })?;

    let user = UserRepository::new((*state.db).clone())
        .register(
            NewUser {
                email: payload.email.trim().to_lowercase(),
                password_hash,
                full_name: payload.full_name.trim().to_string(),
                phone: payload.phone.trim().to_string(),
            },
            state.clock.now(),
        )
        .await?;

    info!(user_id = %user.id, role = %user.access(), "User registered");

    let token = issue_token(&state, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// POST /auth/login - Exchange credentials for a token.
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invalid = || ApiError::unauthorized("invalid_credentials", "Invalid email or password");

    let email = payload.email.trim().to_lowercase();
    let Some(user) = UserRepository::new((*state.db).clone())
        .find_by_email(&email)
        .await?
    else {
        info!("Login attempt for unknown email");
        return Err(invalid());
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return Err(invalid());
        }
        Err(e) => {
            error!(error = %e, user_id = %user.id, "Password verification error");
            return Err(ApiError::internal("hash_error", e.to_string()));
        }
    }

    let token = issue_token(&state, &user)?;
    info!(user_id = %user.id, "User logged in successfully");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /auth/me - The caller's public record.
async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(auth.load(&state).await?.into()))
}

/// PUT /auth/profile - Overwrite the caller's profile fields.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let current = auth.load(&state).await?;

    let online_status = match payload.online_status.as_deref() {
        Some(raw) => raw
            .parse::<OnlineStatus>()
            .map_err(|e| ApiError::validation("unknown_status", e.to_string()))?,
        None => current.status(),
    };

    let user = UserRepository::new((*state.db).clone())
        .update_profile(
            auth.user_id(),
            ProfileUpdate {
                full_name: payload.full_name.trim().to_string(),
                phone: payload.phone.trim().to_string(),
                profile_picture: payload.profile_picture,
                bio: payload.bio,
                online_status,
            },
        )
        .await?;

    info!(user_id = %user.id, "Profile updated");
    Ok(Json(serde_json::json!({
        "success": true,
        "user": UserResponse::from(user),
    })))
}
