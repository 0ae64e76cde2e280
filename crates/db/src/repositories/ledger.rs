//! Ledger repository: wallet balances, the transaction log and paid publication.
//!
//! Every balance change happens inside one database transaction together
//! with exactly one appended `transactions` row whose amount equals the
//! delta. Publication adds the ad row to the same unit.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, sea_query::Expr,
};

use fesa_core::publication::{AdDraft, Plan, PublicationError, PublicationService};
use fesa_core::wallet::{TransactionKind, TransactionStatus, WalletRuleError, WalletService};
use fesa_shared::AppError;
use fesa_shared::types::{AdId, Money, MoneyError, TransactionId, UserId};

use super::ad::encode_images;
use crate::begin_atomic;
use crate::entities::{ads, transactions, users};

/// Error types for wallet and publication operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Wallet owner not found.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Publication refused (validation or insufficient funds).
    #[error(transparent)]
    Publication(#[from] PublicationError),

    /// Deposit refused, or a stored row is unreadable.
    #[error(transparent)]
    Wallet(#[from] WalletRuleError),

    /// Amount not representable in minor units.
    #[error(transparent)]
    Amount(#[from] MoneyError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl LedgerError {
    /// Machine-readable failure reason for API responses.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "unknown_user",
            Self::Publication(PublicationError::InsufficientFunds { .. }) => "insufficient_funds",
            Self::Publication(_) => "invalid_ad",
            Self::Wallet(WalletRuleError::UnknownKind(_) | WalletRuleError::UnknownStatus(_)) => {
                "corrupt_record"
            }
            Self::Wallet(_) => "invalid_deposit",
            Self::Amount(_) => "invalid_amount",
            Self::Database(_) => "database_error",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UserNotFound(_) => Self::Unauthorized(err.to_string()),
            LedgerError::Publication(PublicationError::InsufficientFunds { .. }) => {
                Self::InsufficientFunds(err.to_string())
            }
            LedgerError::Wallet(
                WalletRuleError::UnknownKind(_) | WalletRuleError::UnknownStatus(_),
            ) => Self::Internal(err.to_string()),
            LedgerError::Publication(_) | LedgerError::Wallet(_) | LedgerError::Amount(_) => {
                Self::Validation(err.to_string())
            }
            LedgerError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Outcome of a successful publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// The new ad.
    pub ad_id: AdId,
    /// Plan that was charged.
    pub plan: &'static Plan,
    /// Amount debited.
    pub cost: Money,
    /// Balance after the debit, re-read inside the unit.
    pub new_balance: Money,
    /// Visibility cut-off of the new ad.
    pub expires_at: DateTime<Utc>,
}

/// One row of a user's transaction history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Transaction ID.
    pub id: TransactionId,
    /// Signed amount; the balance delta it caused.
    pub amount: Money,
    /// Deposit, payment or withdrawal.
    pub kind: TransactionKind,
    /// Settlement status.
    pub status: TransactionStatus,
    /// Free-text description.
    pub description: String,
    /// When it was recorded.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<transactions::Model> for LedgerEntry {
    type Error = WalletRuleError;

    fn try_from(row: transactions::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TransactionId::from_uuid(row.id),
            amount: Money::from_minor_units(row.amount),
            kind: row.kind.parse()?,
            status: row.status.parse()?,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

/// Ledger repository for balance-changing operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Publishes an ad, paying for it from the author's wallet.
    ///
    /// Debit, `payment` row and ad insert commit together or not at all.
    /// The debit is conditional on the balance still covering the cost, so
    /// two concurrent publications cannot both spend the same funds.
    ///
    /// # Errors
    ///
    /// - `Publication(InsufficientFunds)` if the balance is below the plan cost
    /// - `Publication(..)` for any other rejected draft
    /// - `UserNotFound` if the author does not exist
    /// - `Database` for storage failures; the unit is rolled back
    pub async fn publish_ad(
        &self,
        user_id: UserId,
        draft: AdDraft,
        plan_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Publication, LedgerError> {
        PublicationService::validate_draft(&draft)?;
        let quote = PublicationService::quote(plan_id, now);
        let cost = quote.cost.to_minor_units()?;
        let price = draft.price.to_minor_units()?;

        let txn = begin_atomic(&self.db).await?;

        // Guarded debit first, so the write lock is held before any read.
        let debited = users::Entity::update_many()
            .col_expr(
                users::Column::WalletBalance,
                Expr::col(users::Column::WalletBalance).sub(cost),
            )
            .filter(users::Column::Id.eq(user_id.into_inner()))
            .filter(users::Column::WalletBalance.gte(cost))
            .exec(&txn)
            .await?;
        if debited.rows_affected == 0 {
            let balance = Self::balance_in(&txn, user_id).await?;
            tracing::info!(user_id = %user_id, balance = %balance, cost = %quote.cost, "Publication refused: insufficient funds");
            PublicationService::ensure_affordable(balance, quote.cost)?;
            return Err(PublicationError::InsufficientFunds {
                balance,
                cost: quote.cost,
            }
            .into());
        }

        Self::append(
            &txn,
            user_id,
            -cost,
            TransactionKind::Payment,
            WalletService::payment_description(&draft.title),
            now,
        )
        .await?;

        let ad_id = AdId::new();
        ads::ActiveModel {
            id: Set(ad_id.into_inner()),
            user_id: Set(user_id.into_inner()),
            title: Set(draft.title),
            description: Set(draft.description),
            price: Set(price),
            location: Set(draft.location),
            category: Set(draft.category),
            images: Set(encode_images(&draft.images)),
            expires_at: Set(quote.expires_at),
            created_at: Set(quote.published_at),
        }
        .insert(&txn)
        .await?;

        let new_balance = Self::balance_in(&txn, user_id).await?;
        txn.commit().await?;

        tracing::info!(
            user_id = %user_id,
            ad_id = %ad_id,
            plan = quote.plan.id,
            new_balance = %new_balance,
            "Ad published"
        );

        Ok(Publication {
            ad_id,
            plan: quote.plan,
            cost: quote.cost,
            new_balance,
            expires_at: quote.expires_at,
        })
    }

    /// Credits a simulated top-up and returns the new balance.
    ///
    /// # Errors
    ///
    /// - `Wallet(..)` if the amount, phone or provider is rejected
    /// - `UserNotFound` if the wallet owner does not exist
    /// - `Database` for storage failures; the unit is rolled back
    pub async fn deposit(
        &self,
        user_id: UserId,
        amount: Money,
        phone: &str,
        provider: &str,
        now: DateTime<Utc>,
    ) -> Result<Money, LedgerError> {
        WalletService::validate_deposit(amount, phone, provider)?;
        let units = amount.to_minor_units()?;

        let txn = begin_atomic(&self.db).await?;

        let credited = users::Entity::update_many()
            .col_expr(
                users::Column::WalletBalance,
                Expr::col(users::Column::WalletBalance).add(units),
            )
            .filter(users::Column::Id.eq(user_id.into_inner()))
            .exec(&txn)
            .await?;
        if credited.rows_affected == 0 {
            return Err(LedgerError::UserNotFound(user_id));
        }

        Self::append(
            &txn,
            user_id,
            units,
            TransactionKind::Deposit,
            WalletService::deposit_description(provider, phone),
            now,
        )
        .await?;

        let new_balance = Self::balance_in(&txn, user_id).await?;
        txn.commit().await?;

        tracing::info!(user_id = %user_id, amount = %amount, new_balance = %new_balance, "Deposit recorded");
        Ok(new_balance)
    }

    /// A user's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is unreadable.
    pub async fn transactions_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<LedgerEntry>, LedgerError> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|row| LedgerEntry::try_from(row).map_err(LedgerError::from))
            .collect()
    }

    /// Current wallet balance.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not exist.
    pub async fn balance(&self, user_id: UserId) -> Result<Money, LedgerError> {
        users::Entity::find_by_id(user_id.into_inner())
            .one(&self.db)
            .await?
            .map(|user| user.balance())
            .ok_or(LedgerError::UserNotFound(user_id))
    }

    async fn balance_in(txn: &DatabaseTransaction, user_id: UserId) -> Result<Money, LedgerError> {
        users::Entity::find_by_id(user_id.into_inner())
            .one(txn)
            .await?
            .map(|user| user.balance())
            .ok_or(LedgerError::UserNotFound(user_id))
    }

    async fn append(
        txn: &DatabaseTransaction,
        user_id: UserId,
        amount: i64,
        kind: TransactionKind,
        description: String,
        now: DateTime<Utc>,
    ) -> Result<transactions::Model, DbErr> {
        transactions::ActiveModel {
            id: Set(TransactionId::new().into_inner()),
            user_id: Set(user_id.into_inner()),
            amount: Set(amount),
            kind: Set(kind.as_str().to_string()),
            status: Set(TransactionStatus::Completed.as_str().to_string()),
            description: Set(description),
            created_at: Set(now),
        }
        .insert(txn)
        .await
    }
}
