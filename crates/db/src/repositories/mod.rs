//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod ad;
pub mod category;
pub mod ledger;
pub mod stats;
pub mod user;

pub use ad::{AdError, AdRecord, AdRepository};
pub use category::{CategoryError, CategoryRepository};
pub use ledger::{LedgerEntry, LedgerError, LedgerRepository, Publication};
pub use stats::{CategoryCount, DashboardStats, StatsCounts, StatsError, StatsRepository};
pub use user::{NewUser, ProfileUpdate, UserError, UserRepository};
