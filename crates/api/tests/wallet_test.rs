//! Deposits, paid publication and the public listing over HTTP.

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use rust_decimal_macros::dec;
use serde_json::json;

use common::{decimal, spawn_app};

#[tokio::test]
async fn test_deposit_credits_balance() {
    let app = spawn_app().await;
    let (token, _) = app.register("ama@fesa.tg", "Ama").await;

    let (status, body) = app.deposit(&token, "1000").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(decimal(&body["balance"]), dec!(1000));
    assert_eq!(body["currency"], "XAF");

    let (_, body) = app.deposit(&token, "250.50").await;
    assert_eq!(decimal(&body["balance"]), dec!(1250.50));

    let (_, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(decimal(&me["wallet_balance"]), dec!(1250.50));
}

#[tokio::test]
async fn test_deposit_rejects_non_positive_amount() {
    let app = spawn_app().await;
    let (token, _) = app.register("ama@fesa.tg", "Ama").await;

    for amount in ["0", "-50"] {
        let (status, body) = app.deposit(&token, amount).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "amount {amount}");
        assert_eq!(body["error"], "VALIDATION_FAILED");
    }

    let (_, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(decimal(&me["wallet_balance"]), dec!(0));
}

#[tokio::test]
async fn test_deposit_requires_token() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/api/wallet/deposit",
            None,
            json!({ "amount": "1000", "phone": "+22890000000", "provider": "tmoney" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reason"], "missing_token");
}

#[tokio::test]
async fn test_publish_without_funds_is_refused() {
    let app = spawn_app().await;
    let (token, _) = app.register("ama@fesa.tg", "Ama").await;
    app.deposit(&token, "400").await;

    let (status, body) = app.publish(&token, "Ponceuse", "7days").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "INSUFFICIENT_FUNDS");

    let (_, ads) = app.get("/api/ads/me", Some(&token)).await;
    assert_eq!(ads.as_array().unwrap().len(), 0);
    let (_, history) = app.get("/api/wallet/transactions", Some(&token)).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_publish_debits_and_lists_ad() {
    let app = spawn_app().await;
    let (token, user) = app.register("ama@fesa.tg", "Ama").await;
    app.deposit(&token, "1000").await;
    app.clock.advance(Duration::minutes(1));

    let (status, body) = app.publish(&token, "Ponceuse", "7days").await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["plan"], "7days");
    assert_eq!(decimal(&body["new_balance"]), dec!(500));
    let ad_id = body["ad_id"].clone();

    let (status, listing) = app.get("/api/ads", None).await;
    assert_eq!(status, StatusCode::OK);
    let ads = listing["ads"].as_array().unwrap();
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0]["id"], ad_id);
    assert_eq!(ads[0]["user_id"], user["id"]);
    assert_eq!(ads[0]["author_name"], "Ama");
    assert_eq!(ads[0]["images"].as_array().unwrap().len(), 1);
    assert_eq!(listing["pagination"]["total_ads"], 1);
    assert_eq!(listing["pagination"]["current_page"], 1);

    let (_, history) = app.get("/api/wallet/transactions", Some(&token)).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["type"], "payment");
    assert_eq!(decimal(&history[0]["amount"]), dec!(-500));
    assert_eq!(history[1]["type"], "deposit");
    assert_eq!(decimal(&history[1]["amount"]), dec!(1000));
}

#[tokio::test]
async fn test_unknown_plan_falls_back_to_shortest() {
    let app = spawn_app().await;
    let (token, _) = app.register("ama@fesa.tg", "Ama").await;
    app.deposit(&token, "1000").await;

    let (status, body) = app.publish(&token, "Ponceuse", "365days").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["plan"], "7days");
    assert_eq!(decimal(&body["new_balance"]), dec!(500));
}

#[tokio::test]
async fn test_expired_ad_leaves_public_listing() {
    let app = spawn_app().await;
    let (token, _) = app.register("ama@fesa.tg", "Ama").await;
    app.deposit(&token, "500").await;
    app.publish(&token, "Ponceuse", "7days").await;

    app.clock.advance(Duration::days(7) + Duration::seconds(1));

    let (_, listing) = app.get("/api/ads", None).await;
    assert_eq!(listing["ads"].as_array().unwrap().len(), 0);
    assert_eq!(listing["pagination"]["total_ads"], 0);

    let (_, mine) = app.get("/api/ads/me", Some(&token)).await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["is_active"], false);
}

#[tokio::test]
async fn test_listing_clamps_paging_parameters() {
    let app = spawn_app().await;
    let (token, _) = app.register("ama@fesa.tg", "Ama").await;
    app.deposit(&token, "1500").await;
    for title in ["Ponceuse", "Perceuse", "Scie"] {
        app.publish(&token, title, "7days").await;
        app.clock.advance(Duration::minutes(1));
    }

    let (status, body) = app.get("/api/ads?page=0&limit=1000", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["current_page"], 1);
    assert_eq!(body["pagination"]["page_size"], 100);
    assert_eq!(body["ads"].as_array().unwrap().len(), 3);

    let (_, body) = app.get("/api/ads?page=2&limit=2", None).await;
    assert_eq!(body["pagination"]["total_pages"], 2);
    let ads = body["ads"].as_array().unwrap();
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0]["title"], "Ponceuse");
}

#[tokio::test]
async fn test_publish_rejects_invalid_draft() {
    let app = spawn_app().await;
    let (token, _) = app.register("ama@fesa.tg", "Ama").await;
    app.deposit(&token, "1000").await;

    let (status, _) = app
        .post(
            "/api/ads",
            Some(&token),
            json!({ "title": "", "price": "100", "category": "Bricolage" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let images: Vec<String> = (0..6).map(|i| format!("img-{i}")).collect();
    let (status, _) = app
        .post(
            "/api/ads",
            Some(&token),
            json!({ "title": "Lot", "price": "100", "category": "Bricolage", "images": images }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(decimal(&me["wallet_balance"]), dec!(1000));
}

#[tokio::test]
async fn test_plans_are_public() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/plans", None).await;

    assert_eq!(status, StatusCode::OK);
    let plans = body.as_array().unwrap();
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0]["id"], "7days");
    assert_eq!(plans[0]["default"], true);
    assert_eq!(decimal(&plans[2]["cost"]), dec!(4000));
}
