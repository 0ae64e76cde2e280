//! Shared helpers for the HTTP-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;

use fesa_api::{AppState, create_router};
use fesa_db::migration::{Migrator, MigratorTrait};
use fesa_shared::{
    AppConfig, JwtConfig, ManualClock,
    config::{DatabaseConfig, ListingConfig, ServerConfig},
};

/// A router wired to a fresh in-memory database and a controllable clock.
pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub clock: ManualClock,
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 10, 0, 0).unwrap()
}

pub async fn spawn_app() -> TestApp {
    let database = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let db = fesa_db::connect(&database).await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");

    let config = AppConfig {
        server: ServerConfig::default(),
        database,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            token_ttl_secs: None,
        },
        listing: ListingConfig::default(),
    };

    let clock = ManualClock::new(start_time());
    let state = AppState::new(db.clone(), &config).with_clock(Arc::new(clock.clone()));

    TestApp {
        router: create_router(state),
        db,
        clock,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Registers an account and returns its token and user payload.
    pub async fn register(&self, email: &str, name: &str) -> (String, Value) {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                json!({
                    "email": email,
                    "password": "correct horse",
                    "full_name": name,
                    "phone": "+22890000000",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        let token = body["token"].as_str().unwrap().to_string();
        (token, body["user"].clone())
    }

    pub async fn deposit(&self, token: &str, amount: &str) -> (StatusCode, Value) {
        self.post(
            "/api/wallet/deposit",
            Some(token),
            json!({ "amount": amount, "phone": "+22890000000", "provider": "tmoney" }),
        )
        .await
    }

    pub async fn publish(&self, token: &str, title: &str, plan: &str) -> (StatusCode, Value) {
        self.post(
            "/api/ads",
            Some(token),
            json!({
                "title": title,
                "description": "Ponceuse en bon état",
                "price": "2500",
                "location": "Lomé",
                "category": "Bricolage",
                "images": ["data:image/png;base64,AAAA"],
                "plan": plan,
            }),
        )
        .await
    }
}

/// Reads a monetary value whether it was serialized as a string or a number.
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().unwrap(),
        Value::Number(n) => n.to_string().parse().unwrap(),
        other => panic!("not a monetary value: {other}"),
    }
}
