//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//!
//! Every multi-statement write (registration, publication, deposit, role
//! change) runs inside one database transaction opened by [`begin_atomic`].

pub mod entities;
pub mod migration;
pub mod repositories;

pub use migration::Migrator;
pub use repositories::{
    AdError, AdRecord, AdRepository, CategoryCount, CategoryError, CategoryRepository,
    DashboardStats, LedgerEntry, LedgerError, LedgerRepository, NewUser, ProfileUpdate,
    Publication, StatsCounts, StatsError, StatsRepository, UserError, UserRepository,
};

use std::time::Duration;

use fesa_shared::config::DatabaseConfig;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbBackend,
    DbErr, IsolationLevel, TransactionTrait,
};

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options).await
}

/// Opens the transaction used for atomic units.
///
/// `PostgreSQL` runs it at `SERIALIZABLE`. On `SQLite` this is a deferred
/// `BEGIN`: the write lock is taken by the first write, not at `BEGIN`.
/// Units that read and then write can fail with `SQLITE_BUSY` under
/// contention instead of waiting, so every wallet unit issues its guarded
/// `UPDATE` as the first statement. A writer that then finds the lock held
/// waits for the pool's busy timeout; only if that runs out does the unit
/// fail with `DbErr` (reported as INTERNAL).
///
/// # Errors
///
/// Returns an error if the transaction cannot be started.
pub async fn begin_atomic<C>(db: &C) -> Result<DatabaseTransaction, DbErr>
where
    C: ConnectionTrait + TransactionTrait,
{
    if db.get_database_backend() == DbBackend::Postgres {
        db.begin_with_config(Some(IsolationLevel::Serializable), None)
            .await
    } else {
        db.begin().await
    }
}
