//! Wallet routes: transaction history and simulated top-up.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError, extractors::ValidatedJson, middleware::AuthUser};
use fesa_core::wallet::{TransactionKind, TransactionStatus};
use fesa_db::{LedgerEntry, LedgerRepository};
use fesa_shared::types::{CURRENCY_CODE, Money};

/// Creates the wallet routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallet/transactions", get(list_transactions))
        .route("/wallet/deposit", post(deposit))
}

/// Request body for a simulated top-up.
#[derive(Debug, Deserialize, Validate)]
pub struct DepositRequest {
    /// Amount to credit.
    pub amount: Decimal,
    /// Phone number the payment was made from.
    #[validate(length(min = 1, max = 32, message = "Phone is required"))]
    pub phone: String,
    /// Payment provider label.
    #[validate(length(min = 1, max = 64, message = "Provider is required"))]
    pub provider: String,
}

/// Balance after a top-up.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// New balance.
    pub balance: Money,
    /// Currency code.
    pub currency: &'static str,
}

/// One ledger row.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Signed amount.
    pub amount: Money,
    /// Deposit, payment or withdrawal.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Settlement status.
    pub status: TransactionStatus,
    /// Description.
    pub description: String,
    /// When it was recorded.
    pub created_at: DateTime<Utc>,
}

impl From<LedgerEntry> for TransactionResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            id: entry.id.into_inner(),
            amount: entry.amount,
            kind: entry.kind,
            status: entry.status,
            description: entry.description,
            created_at: entry.created_at,
        }
    }
}

/// GET /wallet/transactions - The caller's ledger, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    let entries = LedgerRepository::new((*state.db).clone())
        .transactions_for_user(auth.user_id())
        .await?;

    Ok(Json(
        entries.into_iter().map(TransactionResponse::from).collect(),
    ))
}

/// POST /wallet/deposit - Credit a simulated top-up.
async fn deposit(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<DepositRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = LedgerRepository::new((*state.db).clone())
        .deposit(
            auth.user_id(),
            Money::new(payload.amount),
            &payload.phone,
            &payload.provider,
            state.clock.now(),
        )
        .await?;

    Ok(Json(BalanceResponse {
        balance,
        currency: CURRENCY_CODE,
    }))
}
