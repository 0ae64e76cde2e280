//! Statistics repository for the admin dashboard.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{Expr, Order},
};

use fesa_core::profile::OnlineStatus;
use fesa_core::stats::{RevenueTotals, StatsService};
use fesa_core::wallet::TransactionKind;
use fesa_shared::AppError;
use fesa_shared::types::Money;

use crate::entities::{ads, transactions, users};

/// Error types for statistics queries.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Headline counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsCounts {
    /// Registered accounts.
    pub users: u64,
    /// All ads, expired included.
    pub ads: u64,
    /// Synthetic visitor estimate.
    pub visitors: u32,
    /// Accounts whose status is `online`.
    pub online: u64,
}

/// Number of ads carrying a category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// Category text as stored on the ads.
    pub category: String,
    /// Number of ads.
    pub count: u64,
}

/// Everything shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    /// Publication revenue per window.
    pub revenue: RevenueTotals,
    /// Headline counters.
    pub counts: StatsCounts,
    /// Ads per category, largest first.
    pub ads_by_category: Vec<CategoryCount>,
    /// Percentage of ads not yet expired.
    pub activation_rate: Decimal,
}

/// Statistics repository.
#[derive(Debug, Clone)]
pub struct StatsRepository {
    db: DatabaseConnection,
}

impl StatsRepository {
    /// Creates a new statistics repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes the dashboard as of `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub async fn dashboard(&self, now: DateTime<Utc>) -> Result<DashboardStats, StatsError> {
        let revenue = self.revenue(now).await?;

        let users_total = users::Entity::find().count(&self.db).await?;
        let online = users::Entity::find()
            .filter(users::Column::OnlineStatus.eq(OnlineStatus::Online.as_str()))
            .count(&self.db)
            .await?;
        let ads_total = ads::Entity::find().count(&self.db).await?;
        let ads_active = ads::Entity::find()
            .filter(ads::Column::ExpiresAt.gt(now))
            .count(&self.db)
            .await?;

        Ok(DashboardStats {
            revenue,
            counts: StatsCounts {
                users: users_total,
                ads: ads_total,
                visitors: StatsService::visitor_estimate(),
                online,
            },
            ads_by_category: self.ads_by_category().await?,
            activation_rate: StatsService::activation_rate(ads_active, ads_total),
        })
    }

    /// Publication revenue for the day, month and year containing `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn revenue(&self, now: DateTime<Utc>) -> Result<RevenueTotals, StatsError> {
        let windows = StatsService::windows(now);

        let payments: Vec<(DateTime<Utc>, i64)> = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::CreatedAt)
            .column(transactions::Column::Amount)
            .filter(transactions::Column::Kind.eq(TransactionKind::Payment.as_str()))
            .filter(transactions::Column::CreatedAt.gte(windows.year_start))
            .filter(transactions::Column::CreatedAt.lte(now))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(StatsService::revenue(
            now,
            payments
                .into_iter()
                .map(|(at, amount)| (at, Money::from_minor_units(amount))),
        ))
    }

    /// Ads grouped by category text, largest group first, then by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn ads_by_category(&self) -> Result<Vec<CategoryCount>, StatsError> {
        let rows: Vec<(String, i64)> = ads::Entity::find()
            .select_only()
            .column(ads::Column::Category)
            .column_as(Expr::col(ads::Column::Id).count(), "count")
            .group_by(ads::Column::Category)
            .order_by(Expr::col(ads::Column::Id).count(), Order::Desc)
            .order_by(ads::Column::Category, Order::Asc)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category,
                count: u64::try_from(count).unwrap_or_default(),
            })
            .collect())
    }
}
