// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Triplan: periodized endurance training plans
//!
//! This crate provides the backend API that turns a competition goal and a
//! complexity score into a dated schedule of running, cycling and swimming
//! workouts.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{PlanService, TrainingTables};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tables: Arc<TrainingTables>,
    pub plan_service: PlanService,
}
