// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use chrono::NaiveDate;
use std::sync::Arc;
use triplan::config::Config;
use triplan::db::{FirestoreDb, PlanDb};
use triplan::middleware::auth::create_jwt;
use triplan::routes::create_router;
use triplan::services::{PlanScheduler, PlanService, TrainingTables};
use triplan::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid ISO date")
}

/// Plan service over an empty in-memory store with a fixed shuffle seed.
#[allow(dead_code)]
pub fn test_plan_service(seed: u64) -> PlanService {
    PlanService::new(
        PlanDb::in_memory(),
        PlanScheduler::new(Arc::new(TrainingTables::default())),
        Default::default(),
        Some(seed),
    )
}

/// Create a test app backed by the in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let tables = Arc::new(TrainingTables::default());
    let plan_service = PlanService::new(
        PlanDb::in_memory(),
        PlanScheduler::new(tables.clone()),
        config.default_preferred_weekdays.clone(),
        config.plan_shuffle_seed,
    );

    let state = Arc::new(AppState {
        config,
        tables,
        plan_service,
    });

    (create_router(state.clone()), state)
}

/// Create a session token signed with the test key.
#[allow(dead_code)]
pub fn create_test_jwt(athlete_id: u64, signing_key: &[u8]) -> String {
    create_jwt(athlete_id, signing_key).expect("Failed to sign test token")
}

/// Authenticated JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Authenticated request without a body.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
