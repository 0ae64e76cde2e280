//! Provisions the bootstrap super-admin and, optionally, demo listings.
//!
//! The account is created through the regular registration path, so it only
//! becomes a super-admin because it is the first one. The seeder refuses to
//! run against a database that already has users.
//!
//! Environment:
//!   SEED_ADMIN_EMAIL     (required)
//!   SEED_ADMIN_PASSWORD  (required)
//!   SEED_ADMIN_NAME      (default "Administrateur")
//!   SEED_ADMIN_PHONE     (default "+22800000000")
//!   SEED_DEMO=1          also tops up the wallet and publishes two ads
//!
//! Usage: cargo run --bin seeder

use anyhow::{Context, bail};
use rust_decimal::Decimal;

use fesa_core::{auth::hash_password, publication::AdDraft};
use fesa_db::{
    LedgerRepository, NewUser, UserRepository, connect,
    migration::{Migrator, MigratorTrait},
};
use fesa_shared::{
    AppConfig, Clock, SystemClock,
    types::{Money, UserId},
};

const DEMO_DEPOSIT: i64 = 5_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let email = std::env::var("SEED_ADMIN_EMAIL").context("SEED_ADMIN_EMAIL must be set")?;
    let password =
        std::env::var("SEED_ADMIN_PASSWORD").context("SEED_ADMIN_PASSWORD must be set")?;
    let full_name =
        std::env::var("SEED_ADMIN_NAME").unwrap_or_else(|_| "Administrateur".to_string());
    let phone = std::env::var("SEED_ADMIN_PHONE").unwrap_or_else(|_| "+22800000000".to_string());
    let demo = std::env::var("SEED_DEMO").is_ok_and(|v| v == "1");

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = connect(&config.database).await?;
    Migrator::up(&db, None).await?;

    let users = UserRepository::new(db.clone());
    let existing = users.count().await?;
    if existing > 0 {
        bail!("database already has {existing} account(s); bootstrap only runs on an empty database");
    }

    let clock = SystemClock;

    println!("Registering bootstrap account...");
    let admin = users
        .register(
            NewUser {
                email: email.trim().to_lowercase(),
                password_hash: hash_password(&password)?,
                full_name,
                phone: phone.clone(),
            },
            clock.now(),
        )
        .await?;
    println!("  Created {} with level {}", admin.email, admin.access_level);

    if demo {
        println!("Seeding demo listings...");
        seed_demo(LedgerRepository::new(db), admin.user_id(), &phone, &clock).await?;
    }

    println!("Seeding complete!");
    Ok(())
}

async fn seed_demo(
    ledger: LedgerRepository,
    owner: UserId,
    phone: &str,
    clock: &SystemClock,
) -> anyhow::Result<()> {
    let balance = ledger
        .deposit(
            owner,
            Money::new(Decimal::from(DEMO_DEPOSIT)),
            phone,
            "seeder",
            clock.now(),
        )
        .await?;
    println!("  Wallet topped up to {balance}");

    let listings = [
        ("Ordinateur portable", "Core i5, 8 Go de RAM, chargeur inclus", 120_000, "Lomé", "Informatique", "30days"),
        ("Cours de mathématiques", "Niveau collège et lycée", 5_000, "Kara", "Cours particuliers", "7days"),
    ];

    for (title, description, price, location, category, plan) in listings {
        let publication = ledger
            .publish_ad(
                owner,
                AdDraft {
                    title: title.to_string(),
                    description: description.to_string(),
                    price: Money::new(Decimal::from(price)),
                    location: location.to_string(),
                    category: category.to_string(),
                    images: Vec::new(),
                },
                Some(plan),
                clock.now(),
            )
            .await?;
        println!(
            "  Published \"{title}\" on plan {} (balance {})",
            publication.plan.id, publication.new_balance
        );
    }

    Ok(())
}
