//! Integration tests for deposits, paid publication and the transaction log.

mod common;

use chrono::Duration;
use futures::future::join_all;
use rust_decimal_macros::dec;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

use common::{SharedFileDb, draft, money, register, setup_db, start_time};
use fesa_core::publication::PublicationError;
use fesa_core::wallet::{TransactionKind, TransactionStatus, WalletRuleError};
use fesa_db::entities::{ads, transactions};
use fesa_db::{AdRepository, LedgerError, LedgerRepository};
use fesa_shared::types::{Money, PageRequest, UserId};
use fesa_shared::{AppError, Clock, ManualClock};

#[tokio::test]
async fn test_deposit_credits_and_logs() {
    let db = setup_db().await;
    let ledger = LedgerRepository::new(db.clone());
    let user = register(&db, "payer@example.com", start_time()).await;

    let balance = ledger
        .deposit(user.user_id(), money(1000), "670000000", "Orange Money", start_time())
        .await
        .unwrap();
    assert_eq!(balance, money(1000));

    let entries = ledger.transactions_for_user(user.user_id()).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].amount, money(1000));
    assert_eq!(entries[0].kind, TransactionKind::Deposit);
    assert_eq!(entries[0].status, TransactionStatus::Completed);
    assert_eq!(entries[0].description, "Top-up via Orange Money (670000000)");
}

#[tokio::test]
async fn test_repeated_deposits_have_no_drift() {
    let db = setup_db().await;
    let ledger = LedgerRepository::new(db.clone());
    let user = register(&db, "drift@example.com", start_time()).await;
    let amount = Money::new(dec!(0.10));

    for _ in 0..30 {
        ledger
            .deposit(user.user_id(), amount, "1", "MTN", start_time())
            .await
            .unwrap();
    }

    assert_eq!(ledger.balance(user.user_id()).await.unwrap(), Money::new(dec!(3.00)));
    assert_eq!(ledger.transactions_for_user(user.user_id()).await.unwrap().len(), 30);
}

#[tokio::test]
async fn test_invalid_deposits_change_nothing() {
    let db = setup_db().await;
    let ledger = LedgerRepository::new(db.clone());
    let user = register(&db, "bad@example.com", start_time()).await;

    let negative = ledger
        .deposit(user.user_id(), money(-50), "1", "MTN", start_time())
        .await;
    assert!(matches!(
        negative,
        Err(LedgerError::Wallet(WalletRuleError::NonPositiveAmount))
    ));

    let fractional = ledger
        .deposit(user.user_id(), Money::new(dec!(1.005)), "1", "MTN", start_time())
        .await;
    assert!(matches!(fractional, Err(LedgerError::Wallet(_))));

    let no_provider = ledger
        .deposit(user.user_id(), money(10), "1", "  ", start_time())
        .await;
    assert!(matches!(
        no_provider,
        Err(LedgerError::Wallet(WalletRuleError::MissingField("provider")))
    ));

    assert_eq!(ledger.balance(user.user_id()).await.unwrap(), Money::ZERO);
    assert!(ledger.transactions_for_user(user.user_id()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deposit_unknown_user() {
    let db = setup_db().await;
    let ledger = LedgerRepository::new(db.clone());

    let result = ledger
        .deposit(UserId::new(), money(10), "1", "MTN", start_time())
        .await;

    assert!(matches!(result, Err(LedgerError::UserNotFound(_))));
    assert_eq!(transactions::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_publish_debits_logs_and_inserts_ad() {
    let db = setup_db().await;
    let ledger = LedgerRepository::new(db.clone());
    let user = register(&db, "seller@example.com", start_time()).await;
    ledger
        .deposit(user.user_id(), money(2000), "1", "MTN", start_time())
        .await
        .unwrap();

    let published = ledger
        .publish_ad(user.user_id(), draft("Cours de guitare"), Some("30days"), start_time())
        .await
        .unwrap();

    assert_eq!(published.plan.id, "30days");
    assert_eq!(published.cost, money(1500));
    assert_eq!(published.new_balance, money(500));
    assert_eq!(published.expires_at, start_time() + Duration::days(30));

    let entries = ledger.transactions_for_user(user.user_id()).await.unwrap();
    let payment = entries
        .iter()
        .find(|e| e.kind == TransactionKind::Payment)
        .unwrap();
    assert_eq!(payment.amount, money(-1500));
    assert_eq!(payment.description, "Ad publication: Cours de guitare");

    let ad = AdRepository::new(db.clone())
        .find_by_id(published.ad_id, start_time())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ad.title, "Cours de guitare");
    assert_eq!(ad.images.len(), 1);
    assert_eq!(ad.price, money(2500));
    assert_eq!(ad.author_name, "User seller@example.com");
}

#[tokio::test]
async fn test_unknown_plan_falls_back_to_seven_days() {
    let db = setup_db().await;
    let ledger = LedgerRepository::new(db.clone());
    let user = register(&db, "plan@example.com", start_time()).await;
    ledger
        .deposit(user.user_id(), money(500), "1", "MTN", start_time())
        .await
        .unwrap();

    let published = ledger
        .publish_ad(user.user_id(), draft("Ménage"), Some("365days"), start_time())
        .await
        .unwrap();

    assert_eq!(published.plan.id, "7days");
    assert_eq!(published.new_balance, Money::ZERO);
}

#[tokio::test]
async fn test_insufficient_funds_changes_nothing() {
    let db = setup_db().await;
    let ledger = LedgerRepository::new(db.clone());
    let user = register(&db, "poor@example.com", start_time()).await;
    ledger
        .deposit(user.user_id(), money(499), "1", "MTN", start_time())
        .await
        .unwrap();

    let result = ledger
        .publish_ad(user.user_id(), draft("Livraison"), None, start_time())
        .await;

    assert!(matches!(
        result,
        Err(LedgerError::Publication(PublicationError::InsufficientFunds { .. }))
    ));
    assert_eq!(ledger.balance(user.user_id()).await.unwrap(), money(499));
    assert_eq!(ledger.transactions_for_user(user.user_id()).await.unwrap().len(), 1);
    assert_eq!(ads::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_draft_rejected_before_debit() {
    let db = setup_db().await;
    let ledger = LedgerRepository::new(db.clone());
    let user = register(&db, "draft@example.com", start_time()).await;
    ledger
        .deposit(user.user_id(), money(1000), "1", "MTN", start_time())
        .await
        .unwrap();

    let mut too_many = draft("Photos");
    too_many.images = vec!["x".to_string(); 6];
    let result = ledger
        .publish_ad(user.user_id(), too_many, None, start_time())
        .await;
    assert!(matches!(
        result,
        Err(LedgerError::Publication(PublicationError::TooManyImages { .. }))
    ));

    let mut negative = draft("Prix");
    negative.price = money(-1);
    let result = ledger
        .publish_ad(user.user_id(), negative, None, start_time())
        .await;
    assert!(matches!(
        result,
        Err(LedgerError::Publication(PublicationError::NegativePrice))
    ));

    assert_eq!(ledger.balance(user.user_id()).await.unwrap(), money(1000));
    assert_eq!(ads::Entity::find().count(&db).await.unwrap(), 0);
}

/// One pooled connection: attempts queue, so every loser sees the debited balance.
#[tokio::test]
async fn test_queued_publications_never_overspend() {
    let db = setup_db().await;
    let ledger = LedgerRepository::new(db.clone());
    let user = register(&db, "race@example.com", start_time()).await;
    ledger
        .deposit(user.user_id(), money(1200), "1", "MTN", start_time())
        .await
        .unwrap();

    let attempts = (0..5).map(|i| {
        let ledger = ledger.clone();
        let user_id = user.user_id();
        async move {
            ledger
                .publish_ad(user_id, draft(&format!("Annonce {i}")), Some("7days"), start_time())
                .await
        }
    });
    let results = join_all(attempts).await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 2);
    for result in results.iter().filter(|r| r.is_err()) {
        assert!(matches!(
            result,
            Err(LedgerError::Publication(PublicationError::InsufficientFunds { .. }))
        ));
    }

    let balance = ledger.balance(user.user_id()).await.unwrap();
    assert_eq!(balance, money(200));
    assert!(!balance.is_negative());

    let payments: i64 = transactions::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.amount)
        .sum();
    // +1200 deposit, two -500 payments, in minor units
    assert_eq!(payments, 20_000);
    assert_eq!(ads::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_connections_never_overspend() {
    let shared = SharedFileDb::open(5).await;
    let db = shared.db.clone();
    let ledger = LedgerRepository::new(db.clone());
    let user = register(&db, "racer@example.com", start_time()).await;
    ledger
        .deposit(user.user_id(), money(1200), "1", "MTN", start_time())
        .await
        .unwrap();

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let ledger = ledger.clone();
            let user_id = user.user_id();
            tokio::spawn(async move {
                ledger
                    .publish_ad(user_id, draft(&format!("Course {i}")), Some("7days"), start_time())
                    .await
            })
        })
        .collect();
    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("publication task panicked"))
        .collect();

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    assert!(succeeded <= 2, "{succeeded} publications paid from 1200");
    for result in results.iter().filter(|r| r.is_err()) {
        assert!(
            matches!(
                result,
                Err(LedgerError::Publication(PublicationError::InsufficientFunds { .. })
                    | LedgerError::Database(_))
            ),
            "unexpected failure: {result:?}"
        );
    }

    let balance = ledger.balance(user.user_id()).await.unwrap();
    assert!(!balance.is_negative());
    let spent = i64::try_from(succeeded).unwrap() * 500;
    assert_eq!(balance, money(1200 - spent));
    assert_eq!(
        ads::Entity::find().count(&db).await.unwrap(),
        u64::try_from(succeeded).unwrap()
    );
    assert_eq!(
        transactions::Entity::find().count(&db).await.unwrap(),
        1 + u64::try_from(succeeded).unwrap()
    );
}

#[tokio::test]
async fn test_failure_after_debit_rolls_back_unit() {
    let db = setup_db().await;
    let ledger = LedgerRepository::new(db.clone());
    let user = register(&db, "rollback@example.com", start_time()).await;
    ledger
        .deposit(user.user_id(), money(1000), "1", "MTN", start_time())
        .await
        .unwrap();

    // The debit and the payment row succeed; the ad insert then fails.
    db.execute_unprepared("DROP TABLE ads").await.unwrap();
    let result = ledger
        .publish_ad(user.user_id(), draft("Perdue"), Some("7days"), start_time())
        .await;

    let err = result.expect_err("publication must fail without the ads table");
    assert!(matches!(err, LedgerError::Database(_)), "{err:?}");
    assert_eq!(err.reason(), "database_error");
    assert_eq!(AppError::from(err).error_code(), "INTERNAL");
    assert_eq!(ledger.balance(user.user_id()).await.unwrap(), money(1000));
    assert_eq!(transactions::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_transaction_amounts_match_balance() {
    let db = setup_db().await;
    let ledger = LedgerRepository::new(db.clone());
    let user = register(&db, "sum@example.com", start_time()).await;

    ledger
        .deposit(user.user_id(), money(5000), "1", "MTN", start_time())
        .await
        .unwrap();
    ledger
        .publish_ad(user.user_id(), draft("A"), Some("90days"), start_time())
        .await
        .unwrap();
    ledger
        .deposit(user.user_id(), Money::new(dec!(12.34)), "1", "MTN", start_time())
        .await
        .unwrap();

    let entries = ledger.transactions_for_user(user.user_id()).await.unwrap();
    let total = entries
        .iter()
        .fold(Money::ZERO, |acc, e| Money::new(acc.amount() + e.amount.amount()));
    assert_eq!(total, ledger.balance(user.user_id()).await.unwrap());
    assert_eq!(total, Money::new(dec!(1012.34)));
}

#[tokio::test]
async fn test_seven_day_scenario() {
    let db = setup_db().await;
    let clock = ManualClock::new(start_time());
    let ledger = LedgerRepository::new(db.clone());
    let ads_repo = AdRepository::new(db.clone());

    let user = register(&db, "scenario@example.com", clock.now()).await;
    assert_eq!(user.access_level, 2);

    ledger
        .deposit(user.user_id(), money(1000), "670000000", "MTN", clock.now())
        .await
        .unwrap();
    let published = ledger
        .publish_ad(user.user_id(), draft("Dépannage"), Some("7days"), clock.now())
        .await
        .unwrap();
    assert_eq!(published.new_balance, money(500));

    let entries = ledger.transactions_for_user(user.user_id()).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|e| e.kind == TransactionKind::Deposit && e.amount == money(1000)));
    assert!(entries.iter().any(|e| e.kind == TransactionKind::Payment && e.amount == money(-500)));

    let ad = ads_repo
        .find_by_id(published.ad_id, clock.now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ad.expires_at - ad.created_at, Duration::days(7));

    let page = PageRequest::default();
    let listed = ads_repo.list_active(clock.now(), page).await.unwrap();
    assert_eq!(listed.data.len(), 1);

    clock.advance(Duration::days(7) - Duration::seconds(1));
    assert_eq!(ads_repo.list_active(clock.now(), page).await.unwrap().data.len(), 1);

    // Expiry at exactly now is no longer visible
    clock.advance(Duration::seconds(1));
    let listed = ads_repo.list_active(clock.now(), page).await.unwrap();
    assert!(listed.data.is_empty());
    assert_eq!(listed.pagination.total, 0);
    assert_eq!(listed.pagination.total_pages, 0);

    let mine = ads_repo.list_for_user(user.user_id(), clock.now()).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert!(!mine[0].is_active);
}
