//! Statistics data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fesa_shared::types::Money;

/// Start instants of the revenue windows containing a given moment (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueWindows {
    /// Midnight of the current day.
    pub day_start: DateTime<Utc>,
    /// Midnight of the first day of the current month.
    pub month_start: DateTime<Utc>,
    /// Midnight of 1 January of the current year.
    pub year_start: DateTime<Utc>,
}

/// Publication revenue per window, as positive amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueTotals {
    /// Since midnight today.
    pub day: Money,
    /// Since the first of the month.
    pub month: Money,
    /// Since 1 January.
    pub year: Money,
}

impl Default for RevenueTotals {
    fn default() -> Self {
        Self {
            day: Money::ZERO,
            month: Money::ZERO,
            year: Money::ZERO,
        }
    }
}
