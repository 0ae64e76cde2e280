//! Ad routes: public listing, the caller's ads, paid publication.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError, extractors::ValidatedJson, middleware::AuthUser};
use fesa_core::publication::AdDraft;
use fesa_db::{AdRecord, AdRepository, LedgerRepository};
use fesa_shared::types::{Money, PageMeta, PageRequest};

/// Creates the public ad routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ads", get(list_ads))
}

/// Creates the ad routes that need a bearer token.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/ads", post(publish_ad))
        .route("/ads/me", get(list_my_ads))
}

/// Query parameters for the public listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListAdsQuery {
    /// Page number (1-indexed, values below 1 mean 1).
    pub page: Option<i64>,
    /// Page size (clamped to the configured maximum).
    pub limit: Option<i64>,
}

/// Request body for publishing an ad.
#[derive(Debug, Deserialize, Validate)]
pub struct PublishAdRequest {
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
    /// Inline-encoded images (at most five).
    #[serde(default)]
    pub images: Vec<String>,
    /// Plan identifier (`7days`, `30days`, `90days`).
    #[serde(default, alias = "planId", alias = "plan_id")]
    pub plan: Option<String>,
}

/// An ad as returned to clients.
#[derive(Debug, Serialize)]
pub struct AdResponse {
    /// Ad ID.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Owner display name.
    pub author_name: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Asking price.
    pub price: Money,
    /// Location.
    pub location: String,
    /// Category name.
    pub category: String,
    /// Inline-encoded images.
    pub images: Vec<String>,
    /// Visibility cut-off.
    pub expires_at: DateTime<Utc>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the ad is still publicly listed.
    pub is_active: bool,
}

impl From<AdRecord> for AdResponse {
    fn from(ad: AdRecord) -> Self {
        Self {
            id: ad.id.into_inner(),
            user_id: ad.user_id.into_inner(),
            author_name: ad.author_name,
            title: ad.title,
            description: ad.description,
            price: ad.price,
            location: ad.location,
            category: ad.category,
            images: ad.images,
            expires_at: ad.expires_at,
            created_at: ad.created_at,
            is_active: ad.is_active,
        }
    }
}

/// Pagination block of the public listing.
#[derive(Debug, Serialize)]
pub struct ListingPagination {
    /// Current page number.
    pub current_page: u32,
    /// Number of pages; 0 when nothing is listed.
    pub total_pages: u64,
    /// Number of listed (non-expired) ads.
    pub total_ads: u64,
    /// Items per page.
    pub page_size: u32,
}

impl From<PageMeta> for ListingPagination {
    fn from(meta: PageMeta) -> Self {
        Self {
            current_page: meta.current_page,
            total_pages: meta.total_pages,
            total_ads: meta.total,
            page_size: meta.page_size,
        }
    }
}

/// Public listing response.
#[derive(Debug, Serialize)]
pub struct ListAdsResponse {
    /// Ads on this page.
    pub ads: Vec<AdResponse>,
    /// Pagination metadata.
    pub pagination: ListingPagination,
}

/// Successful publication.
#[derive(Debug, Serialize)]
pub struct PublishAdResponse {
    /// Always true.
    pub success: bool,
    /// The new ad.
    pub ad_id: Uuid,
    /// Plan that was charged.
    pub plan: &'static str,
    /// Wallet balance after the debit.
    pub new_balance: Money,
    /// Visibility cut-off.
    pub expires_at: DateTime<Utc>,
}

fn clamp_query(value: Option<i64>) -> Option<u32> {
    value.map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
}

/// GET /ads - Non-expired ads, newest first, paginated.
async fn list_ads(
    State(state): State<AppState>,
    Query(query): Query<ListAdsQuery>,
) -> Result<Json<ListAdsResponse>, ApiError> {
    let page = PageRequest::resolve(
        clamp_query(query.page),
        clamp_query(query.limit),
        state.listing.default_page_size,
        state.listing.max_page_size,
    );

    let result = AdRepository::new((*state.db).clone())
        .list_active(state.clock.now(), page)
        .await?;

    Ok(Json(ListAdsResponse {
        ads: result.data.into_iter().map(AdResponse::from).collect(),
        pagination: result.pagination.into(),
    }))
}

/// GET /ads/me - All of the caller's ads, expired included.
async fn list_my_ads(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<AdResponse>>, ApiError> {
    let ads = AdRepository::new((*state.db).clone())
        .list_for_user(auth.user_id(), state.clock.now())
        .await?;

    Ok(Json(ads.into_iter().map(AdResponse::from).collect()))
}

/// POST /ads - Publish an ad, paid from the caller's wallet.
async fn publish_ad(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<PublishAdRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = AdDraft {
        title: payload.title.trim().to_string(),
        description: payload.description,
        price: Money::new(payload.price),
        location: payload.location,
        category: payload.category.trim().to_string(),
        images: payload.images,
    };

    let publication = LedgerRepository::new((*state.db).clone())
        .publish_ad(
            auth.user_id(),
            draft,
            payload.plan.as_deref(),
            state.clock.now(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PublishAdResponse {
            success: true,
            ad_id: publication.ad_id.into_inner(),
            plan: publication.plan.id,
            new_balance: publication.new_balance,
            expires_at: publication.expires_at,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_query() {
        assert_eq!(clamp_query(None), None);
        assert_eq!(clamp_query(Some(-3)), Some(0));
        assert_eq!(clamp_query(Some(4)), Some(4));
        assert_eq!(clamp_query(Some(i64::MAX)), Some(u32::MAX));
    }
}
