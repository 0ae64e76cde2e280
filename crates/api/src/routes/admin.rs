//! Admin routes: users, roles, ad moderation, dashboard statistics.
//!
//! Every handler passes the admin gate first. The caller's level is read
//! from the database on each request.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{ads::AdResponse, auth::UserResponse};
use crate::{AppState, error::ApiError, extractors::ValidatedJson, middleware::AuthUser};
use fesa_core::auth::AccessLevel;
use fesa_core::publication::AdEdit;
use fesa_db::{AdRepository, DashboardStats, StatsRepository, UserRepository};
use fesa_shared::types::{AdId, Money, UserId};

/// Creates the admin routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}/role", put(set_user_role))
        .route("/admin/ads", get(list_ads))
        .route("/admin/ads/{id}", put(edit_ad).delete(delete_ad))
        .route("/admin/stats", get(stats))
}

/// Request body for a role change.
#[derive(Debug, Deserialize, Validate)]
pub struct SetRoleRequest {
    /// Requested level: 0 member, 1 admin, 2 super-admin.
    #[serde(alias = "level", alias = "role")]
    pub access_level: i64,
}

/// Request body for an admin overwrite of an ad.
#[derive(Debug, Deserialize, Validate)]
pub struct EditAdRequest {
    /// Title.
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Asking price.
    pub price: Decimal,
    /// Location.
    #[serde(default)]
    pub location: String,
    /// Category name.
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,
    /// New visibility cut-off.
    #[serde(alias = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

/// Publication revenue per window.
#[derive(Debug, Serialize)]
pub struct RevenueResponse {
    /// Since midnight UTC.
    pub day: Money,
    /// Since the first of the month.
    pub month: Money,
    /// Since 1 January.
    pub year: Money,
}

/// Headline counters.
#[derive(Debug, Serialize)]
pub struct CountsResponse {
    /// Registered accounts.
    pub users: u64,
    /// All ads.
    pub ads: u64,
    /// Synthetic estimate, not a measurement.
    pub visitors: u32,
    /// Accounts currently `online`.
    pub online: u64,
}

/// Ads per category.
#[derive(Debug, Serialize)]
pub struct CategoryCountResponse {
    /// Category text.
    pub category: String,
    /// Number of ads.
    pub count: u64,
}

/// Admin dashboard.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Revenue.
    pub revenue: RevenueResponse,
    /// Counters.
    pub counts: CountsResponse,
    /// Ads grouped by category.
    pub ads_by_category: Vec<CategoryCountResponse>,
    /// Percentage of ads still listed.
    pub activation_rate: Decimal,
}

impl From<DashboardStats> for StatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            revenue: RevenueResponse {
                day: stats.revenue.day,
                month: stats.revenue.month,
                year: stats.revenue.year,
            },
            counts: CountsResponse {
                users: stats.counts.users,
                ads: stats.counts.ads,
                visitors: stats.counts.visitors,
                online: stats.counts.online,
            },
            ads_by_category: stats
                .ads_by_category
                .into_iter()
                .map(|c| CategoryCountResponse {
                    category: c.category,
                    count: c.count,
                })
                .collect(),
            activation_rate: stats.activation_rate,
        }
    }
}

/// GET /admin/users - Every account, oldest first.
async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    auth.require_admin(&state).await?;

    let users = UserRepository::new((*state.db).clone()).list_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PUT /admin/users/{id}/role - Change an account's access level.
async fn set_user_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SetRoleRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    auth.require_admin(&state).await?;

    let requested = AccessLevel::from_level(payload.access_level)
        .map_err(|e| ApiError::validation("unknown_level", e.to_string()))?;

    let target = UserId::from_uuid(id);
    let user = UserRepository::new((*state.db).clone())
        .set_access_level(auth.user_id(), target, requested)
        .await
        .inspect_err(|e| {
            info!(admin_id = %auth.user_id(), target_id = %target, error = %e, "Role change refused");
        })?;

    info!(admin_id = %auth.user_id(), target_id = %target, role = %requested, "Access level changed");
    Ok(Json(user.into()))
}

/// GET /admin/ads - Every ad with its author, expired included.
async fn list_ads(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<AdResponse>>, ApiError> {
    auth.require_admin(&state).await?;

    let ads = AdRepository::new((*state.db).clone())
        .list_all(state.clock.now())
        .await?;
    Ok(Json(ads.into_iter().map(AdResponse::from).collect()))
}

/// PUT /admin/ads/{id} - Overwrite an ad's fields.
async fn edit_ad(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<EditAdRequest>,
) -> Result<Json<AdResponse>, ApiError> {
    let admin = auth.require_admin(&state).await?;

    let ad = AdRepository::new((*state.db).clone())
        .update(
            AdId::from_uuid(id),
            AdEdit {
                title: payload.title.trim().to_string(),
                description: payload.description,
                price: Money::new(payload.price),
                location: payload.location,
                category: payload.category.trim().to_string(),
                expires_at: payload.expires_at,
            },
            state.clock.now(),
        )
        .await?;

    info!(admin_id = %admin.id, ad_id = %id, "Ad edited by admin");
    Ok(Json(ad.into()))
}

/// DELETE /admin/ads/{id} - Remove an ad. Missing ads are not an error.
async fn delete_ad(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let admin = auth.require_admin(&state).await?;

    let deleted = AdRepository::new((*state.db).clone())
        .delete(AdId::from_uuid(id))
        .await?;

    info!(admin_id = %admin.id, ad_id = %id, deleted, "Ad deleted by admin");
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}

/// GET /admin/stats - Dashboard figures.
async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<StatsResponse>, ApiError> {
    auth.require_admin(&state).await?;

    let stats = StatsRepository::new((*state.db).clone())
        .dashboard(state.clock.now())
        .await?;
    Ok(Json(stats.into()))
}
