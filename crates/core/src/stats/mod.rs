//! Admin dashboard statistics math.

pub mod service;
pub mod types;

pub use service::{StatsService, VISITOR_ESTIMATE_RANGE};
pub use types::{RevenueTotals, RevenueWindows};
