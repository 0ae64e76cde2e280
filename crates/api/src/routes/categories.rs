//! Category routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError, extractors::ValidatedJson, middleware::AuthUser};
use fesa_db::{CategoryRepository, entities::categories};
use fesa_shared::types::CategoryId;

/// Creates the public category routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}

/// Creates the admin category routes.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", post(create_category))
        .route("/categories/{id}", delete(delete_category))
}

/// Request body for adding a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Category name, unique.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
}

/// A category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
}

impl From<categories::Model> for CategoryResponse {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// GET /categories - All categories by name.
async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = CategoryRepository::new((*state.db).clone()).list().await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// POST /categories - Add a category (admin).
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = auth.require_admin(&state).await?;

    let category = CategoryRepository::new((*state.db).clone())
        .create(&payload.name, state.clock.now())
        .await?;

    info!(admin_id = %admin.id, category = %category.name, "Category added");
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// DELETE /categories/{id} - Remove a category (admin). Ads keep their text.
async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = auth.require_admin(&state).await?;

    let deleted = CategoryRepository::new((*state.db).clone())
        .delete(CategoryId::from_uuid(id))
        .await?;

    info!(admin_id = %admin.id, category_id = %id, deleted, "Category removed");
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}
