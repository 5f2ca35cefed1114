// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public reference data: competition, sport and workout types.

use crate::models::{CompetitionType, SportType, WorkoutType};
use crate::services::training_tables::{MAX_COMPLEXITY, MIN_COMPLEXITY};
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/competition-types", get(get_competition_types))
        .route("/api/sport-types", get(get_sport_types))
        .route("/api/workout-types", get(get_workout_types))
}

#[derive(Serialize)]
pub struct CompetitionTypeInfo {
    pub value: CompetitionType,
    pub sports: Vec<SportType>,
    /// Unit for `competition_distance`, when the event takes one
    pub distance_unit: Option<&'static str>,
}

async fn get_competition_types(State(state): State<Arc<AppState>>) -> Json<Vec<CompetitionTypeInfo>> {
    let tables = &state.tables;
    Json(
        CompetitionType::ALL
            .into_iter()
            .map(|value| CompetitionTypeInfo {
                value,
                sports: tables
                    .sports_for_competition(value)
                    .map(<[SportType]>::to_vec)
                    .unwrap_or_default(),
                distance_unit: value.distance_unit(),
            })
            .collect(),
    )
}

#[derive(Serialize)]
pub struct SportTypeInfo {
    pub value: SportType,
    /// Weekly minutes at the lowest and highest complexity
    pub weekly_minutes: MinutesRange,
}

#[derive(Serialize)]
pub struct MinutesRange {
    pub min: u32,
    pub max: u32,
}

async fn get_sport_types(State(state): State<Arc<AppState>>) -> Json<Vec<SportTypeInfo>> {
    let tables = &state.tables;
    Json(
        SportType::ALL
            .into_iter()
            .map(|value| SportTypeInfo {
                value,
                weekly_minutes: MinutesRange {
                    min: tables.weekly_volume_minutes(value, MIN_COMPLEXITY),
                    max: tables.weekly_volume_minutes(value, MAX_COMPLEXITY),
                },
            })
            .collect(),
    )
}

#[derive(Serialize)]
pub struct WorkoutTypeInfo {
    pub value: WorkoutType,
    /// Typical session length per sport
    pub durations: Vec<SportDuration>,
}

#[derive(Serialize)]
pub struct SportDuration {
    pub sport: SportType,
    pub minutes: MinutesRange,
}

async fn get_workout_types(State(state): State<Arc<AppState>>) -> Json<Vec<WorkoutTypeInfo>> {
    let tables = &state.tables;
    Json(
        WorkoutType::ALL
            .into_iter()
            .map(|value| WorkoutTypeInfo {
                value,
                durations: SportType::ALL
                    .into_iter()
                    .map(|sport| SportDuration {
                        sport,
                        minutes: MinutesRange {
                            min: tables.workout_duration(value, sport, MIN_COMPLEXITY),
                            max: tables.workout_duration(value, sport, MAX_COMPLEXITY),
                        },
                    })
                    .collect(),
            })
            .collect(),
    )
}
