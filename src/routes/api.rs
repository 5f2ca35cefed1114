// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{CompetitionType, CompletionMark, Plan, PreferredWeekdays, Workout};
use crate::services::plan::PlanGoal;
use crate::services::scheduler::ScheduleError;
use crate::services::wizard::{calculate_complexity, competition_type_for_distance, WizardAnswers};
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/me/preferences", put(update_preferences))
        .route("/api/plans", post(create_plan))
        .route("/api/plans/complexity", post(calculate_plan_complexity))
        .route(
            "/api/plans/current",
            get(get_current_plan).delete(delete_current_plan),
        )
        .route("/api/plans/current/workouts", get(get_workouts))
        .route(
            "/api/plans/current/workouts/{workout_id}/completion",
            post(mark_workout_completed)
                .get(get_workout_completion)
                .delete(unmark_workout_completed),
        )
        .route(
            "/api/plans/{plan_id}/workouts/{workout_id}/date",
            put(reschedule_workout),
        )
}

fn parse_weekdays(days: Vec<u8>) -> Result<PreferredWeekdays> {
    Ok(PreferredWeekdays::new(days)?)
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub athlete_id: u64,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub preferred_weekdays: Vec<u8>,
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state.plan_service.profile(user.athlete_id).await?;

    Ok(Json(UserResponse {
        athlete_id: profile.athlete_id,
        email: profile.email,
        first_name: profile.first_name,
        last_name: profile.last_name,
        preferred_weekdays: profile.preferred_weekdays.into(),
    }))
}

#[derive(Deserialize)]
struct PreferencesRequest {
    preferred_weekdays: Vec<u8>,
}

/// Set preferred training weekdays; upcoming workouts follow.
async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<PreferencesRequest>,
) -> Result<Json<UserResponse>> {
    let weekdays = parse_weekdays(body.preferred_weekdays)?;
    let profile = state
        .plan_service
        .update_preferences(user.athlete_id, weekdays, today_utc())
        .await?;

    Ok(Json(UserResponse {
        athlete_id: profile.athlete_id,
        email: profile.email,
        first_name: profile.first_name,
        last_name: profile.last_name,
        preferred_weekdays: profile.preferred_weekdays.into(),
    }))
}

// ─── Plans ───────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
struct CreatePlanRequest {
    #[validate(range(min = 0, max = 1000))]
    complexity: i32,
    competition_date: NaiveDate,
    competition_type: String,
    #[validate(range(exclusive_min = 0.0))]
    competition_distance: Option<f64>,
    /// Falls back to the profile, then the server default
    preferred_weekdays: Option<Vec<u8>>,
}

/// Generate a new plan, replacing the current one.
async fn create_plan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreatePlanRequest>,
) -> Result<(StatusCode, Json<Plan>)> {
    body.validate()?;

    let competition_type = CompetitionType::from_name(&body.competition_type)
        .ok_or_else(|| ScheduleError::UnknownCompetition(body.competition_type.clone()))?;
    let preferred_weekdays = body.preferred_weekdays.map(parse_weekdays).transpose()?;

    tracing::debug!(
        athlete_id = user.athlete_id,
        complexity = body.complexity,
        competition = competition_type.as_str(),
        competition_date = %body.competition_date,
        "Generating plan"
    );

    let goal = PlanGoal {
        complexity: body.complexity as u16,
        competition_date: body.competition_date,
        competition_type,
        competition_distance: body.competition_distance,
        preferred_weekdays,
    };

    let plan = state
        .plan_service
        .generate(user.athlete_id, goal, today_utc())
        .await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// Get the current plan with all workouts.
async fn get_current_plan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Plan>> {
    state
        .plan_service
        .current_plan(user.athlete_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No plan for athlete {}", user.athlete_id)))
}

/// Delete the current plan and its workouts.
async fn delete_current_plan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode> {
    if state.plan_service.delete_plan(user.athlete_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "No plan for athlete {}",
            user.athlete_id
        )))
    }
}

#[derive(Deserialize)]
struct WorkoutRangeQuery {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutsResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub athlete_id: u64,
    pub workouts: Vec<Workout>,
}

/// Workouts of the current plan within a date range (inclusive).
async fn get_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<WorkoutRangeQuery>,
) -> Result<Json<WorkoutsResponse>> {
    let workouts = state
        .plan_service
        .workouts_in_range(user.athlete_id, params.start_date, params.end_date)
        .await?;

    Ok(Json(WorkoutsResponse {
        athlete_id: user.athlete_id,
        workouts,
    }))
}

#[derive(Deserialize)]
struct RescheduleRequest {
    new_date: NaiveDate,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RescheduleResponse {
    pub success: bool,
}

/// Move a single workout to another date.
async fn reschedule_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((plan_id, workout_id)): Path<(String, u32)>,
    Json(body): Json<RescheduleRequest>,
) -> Result<Json<RescheduleResponse>> {
    let success = state
        .plan_service
        .reschedule_workout(user.athlete_id, &plan_id, workout_id, body.new_date)
        .await?;

    if !success {
        return Err(AppError::NotFound(format!(
            "Workout {} not found in plan {}",
            workout_id, plan_id
        )));
    }

    Ok(Json(RescheduleResponse { success }))
}

// ─── Completion Marks ────────────────────────────────────────

#[derive(Deserialize)]
struct CompletionRequest {
    /// Day the workout was done; defaults to today
    #[serde(default)]
    date: Option<NaiveDate>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CompletionResponse {
    pub workout_id: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub completed_at: String,
}

impl CompletionResponse {
    fn new(workout_id: u32, mark: CompletionMark) -> Self {
        Self {
            workout_id,
            date: mark.date,
            completed_at: mark.completed_at,
        }
    }
}

/// Mark a workout of the current plan as done.
async fn mark_workout_completed(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<u32>,
    Json(body): Json<CompletionRequest>,
) -> Result<(StatusCode, Json<CompletionResponse>)> {
    let date = body.date.unwrap_or_else(today_utc);
    let mark = state
        .plan_service
        .mark_completed(user.athlete_id, workout_id, date)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CompletionResponse::new(workout_id, mark)),
    ))
}

async fn get_workout_completion(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<u32>,
) -> Result<Json<CompletionResponse>> {
    let mark = state
        .plan_service
        .completion(user.athlete_id, workout_id)
        .await?;

    Ok(Json(CompletionResponse::new(workout_id, mark)))
}

async fn unmark_workout_completed(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<u32>,
) -> Result<StatusCode> {
    state
        .plan_service
        .unmark_completed(user.athlete_id, workout_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ─── Plan Wizard ─────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ComplexityResponse {
    pub complexity: u16,
    pub competition_type: CompetitionType,
}

/// Suggest a complexity score and competition type from wizard answers.
async fn calculate_plan_complexity(Json(answers): Json<WizardAnswers>) -> Json<ComplexityResponse> {
    Json(ComplexityResponse {
        complexity: calculate_complexity(&answers, today_utc()),
        competition_type: competition_type_for_distance(&answers.target_distance),
    })
}
