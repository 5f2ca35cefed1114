// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Triplan API Server
//!
//! Generates periodized training plans for running, cycling, swimming and
//! triathlon competitions.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triplan::{
    config::{Config, StorageBackend},
    db::{FirestoreDb, PlanDb},
    services::{PlanScheduler, PlanService, TrainingTables},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Triplan API");

    let db = match config.storage {
        StorageBackend::Firestore => {
            let db = FirestoreDb::new(&config.gcp_project_id).await?;
            tracing::info!(project = %config.gcp_project_id, "Firestore connected");
            PlanDb::Firestore(db)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; plans are lost on restart");
            PlanDb::in_memory()
        }
    };

    let tables = Arc::new(TrainingTables::default());
    let scheduler = PlanScheduler::new(tables.clone());
    let plan_service = PlanService::new(
        db,
        scheduler,
        config.default_preferred_weekdays.clone(),
        config.plan_shuffle_seed,
    );
    tracing::info!(
        default_weekdays = %config.default_preferred_weekdays,
        seeded = config.plan_shuffle_seed.is_some(),
        "Plan service initialized"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        tables,
        plan_service,
    });

    // Build router
    let app = triplan::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("triplan=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
