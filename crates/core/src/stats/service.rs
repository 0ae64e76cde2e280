//! Statistics calculations.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use fesa_shared::types::Money;

use super::types::{RevenueTotals, RevenueWindows};

/// Bounds of the synthetic visitor count. Not a measurement.
pub const VISITOR_ESTIMATE_RANGE: RangeInclusive<u32> = 50..=149;

/// Statistics service for business logic.
pub struct StatsService;

impl StatsService {
    /// Revenue windows containing `now`.
    #[must_use]
    pub fn windows(now: DateTime<Utc>) -> RevenueWindows {
        let today = now.date_naive();
        let month_first = today.with_day(1).unwrap_or(today);
        let year_first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(month_first);

        RevenueWindows {
            day_start: midnight(today),
            month_start: midnight(month_first),
            year_start: midnight(year_first),
        }
    }

    /// Sums publication payments into day/month/year revenue.
    ///
    /// Payments are stored as negative ledger amounts; revenue is reported
    /// positive. Entries before the year window or after `now` are ignored.
    #[must_use]
    pub fn revenue<I>(now: DateTime<Utc>, payments: I) -> RevenueTotals
    where
        I: IntoIterator<Item = (DateTime<Utc>, Money)>,
    {
        let windows = Self::windows(now);
        let (mut day, mut month, mut year) = (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);

        for (at, amount) in payments {
            if at > now || at < windows.year_start {
                continue;
            }
            let earned = -amount.amount();
            year += earned;
            if at >= windows.month_start {
                month += earned;
            }
            if at >= windows.day_start {
                day += earned;
            }
        }

        RevenueTotals {
            day: Money::new(day),
            month: Money::new(month),
            year: Money::new(year),
        }
    }

    /// Share of ads still visible, as a percentage rounded to 2 places.
    ///
    /// Zero when there are no ads at all.
    #[must_use]
    pub fn activation_rate(active: u64, total: u64) -> Decimal {
        if total == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(active) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(2)
    }

    /// Synthetic visitor count for the dashboard.
    #[must_use]
    pub fn visitor_estimate() -> u32 {
        rand::rng().random_range(VISITOR_ESTIMATE_RANGE)
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
