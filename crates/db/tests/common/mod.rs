//! Shared fixtures for repository integration tests.
//!
//! Each test gets its own in-memory `SQLite` database with all migrations
//! applied. The pool holds a single connection so the database lives as
//! long as the pool. Tests that need several connections racing on the
//! same data use [`SharedFileDb`] instead.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use fesa_core::publication::AdDraft;
use fesa_db::migration::{Migrator, MigratorTrait};
use fesa_db::{NewUser, UserRepository, entities::users};
use fesa_shared::config::DatabaseConfig;
use fesa_shared::types::Money;

pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let db = fesa_db::connect(&config)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// A migrated `SQLite` file behind a multi-connection pool. The file and its
/// journal are removed on drop.
pub struct SharedFileDb {
    pub db: DatabaseConnection,
    path: PathBuf,
}

impl SharedFileDb {
    pub async fn open(max_connections: u32) -> Self {
        let path = std::env::temp_dir().join(format!("fesa-{}.db", Uuid::new_v4()));
        let config = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", path.display()),
            max_connections,
            min_connections: 1,
        };
        let db = fesa_db::connect(&config)
            .await
            .expect("Failed to open file database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        Self { db, path }
    }
}

impl Drop for SharedFileDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 10, 0, 0).unwrap()
}

pub async fn register(db: &DatabaseConnection, email: &str, now: DateTime<Utc>) -> users::Model {
    UserRepository::new(db.clone())
        .register(
            NewUser {
                email: email.to_string(),
                password_hash: "$argon2id$test_hash".to_string(),
                full_name: format!("User {email}"),
                phone: "670000000".to_string(),
            },
            now,
        )
        .await
        .expect("Failed to register user")
}

pub fn draft(title: &str) -> AdDraft {
    AdDraft {
        title: title.to_string(),
        description: "Plomberie et petites réparations".to_string(),
        price: Money::new(Decimal::from(2500)),
        location: "Douala".to_string(),
        category: "Bricolage".to_string(),
        images: vec!["data:image/png;base64,AAAA".to_string()],
    }
}

pub fn money(units: i64) -> Money {
    Money::new(Decimal::from(units))
}
