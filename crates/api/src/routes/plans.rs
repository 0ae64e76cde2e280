//! Publication plan table.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;
use fesa_core::publication::{DEFAULT_PLAN_ID, PLANS};
use fesa_shared::types::Money;

/// A publication plan.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    /// Identifier to send when publishing.
    pub id: &'static str,
    /// Days the ad stays listed.
    pub days: i64,
    /// Price.
    pub cost: Money,
    /// Whether unknown identifiers fall back to this plan.
    pub default: bool,
}

/// GET /plans - Available plans, shortest first.
async fn list_plans() -> Json<Vec<PlanResponse>> {
    Json(
        PLANS
            .iter()
            .map(|plan| PlanResponse {
                id: plan.id,
                days: plan.days,
                cost: plan.cost(),
                default: plan.id == DEFAULT_PLAN_ID,
            })
            .collect(),
    )
}

/// Creates plan routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/plans", get(list_plans))
}
