// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan lifecycle service.
//!
//! Wraps the scheduler with everything around it:
//! - resolving preferred weekdays (request, then profile, then default)
//! - replacing the athlete's plan in one atomic write
//! - manual workout reschedules and completion marks
//! - re-fitting the current plan when preferred weekdays change
//!
//! Writes for one athlete are serialized with a per-athlete lock so two
//! concurrent regenerations cannot interleave.

use crate::db::PlanDb;
use crate::error::{AppError, Result};
use crate::models::{CompetitionType, CompletionMark, Plan, PreferredWeekdays, User, Workout};
use crate::services::scheduler::{resolve_conflicts, PlanRequest, PlanScheduler, MAX_PLAN_WEEKS};
use crate::services::training_tables::MAX_COMPLEXITY;
use crate::time_utils::format_utc_rfc3339;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Per-athlete write locks, shared by all clones of the service.
pub type PlanLocks = Arc<DashMap<u64, Arc<Mutex<()>>>>;

/// What the athlete is training for.
#[derive(Debug, Clone)]
pub struct PlanGoal {
    pub complexity: u16,
    pub competition_date: NaiveDate,
    pub competition_type: CompetitionType,
    pub competition_distance: Option<f64>,
    /// Overrides the profile's weekdays for this plan
    pub preferred_weekdays: Option<PreferredWeekdays>,
}

#[derive(Clone)]
pub struct PlanService {
    db: PlanDb,
    scheduler: PlanScheduler,
    default_weekdays: PreferredWeekdays,
    shuffle_seed: Option<u64>,
    locks: PlanLocks,
}

impl PlanService {
    pub fn new(
        db: PlanDb,
        scheduler: PlanScheduler,
        default_weekdays: PreferredWeekdays,
        shuffle_seed: Option<u64>,
    ) -> Self {
        Self {
            db,
            scheduler,
            default_weekdays,
            shuffle_seed,
            locks: Arc::new(DashMap::new()),
        }
    }

    fn athlete_lock(&self, athlete_id: u64) -> Arc<Mutex<()>> {
        self.locks
            .entry(athlete_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn shuffle_rng(&self) -> ChaCha8Rng {
        match self.shuffle_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// The athlete's stored weekdays, or the configured default.
    async fn preferred_weekdays(&self, athlete_id: u64) -> Result<PreferredWeekdays> {
        Ok(self
            .db
            .get_user(athlete_id)
            .await?
            .map(|user| user.preferred_weekdays)
            .unwrap_or_else(|| self.default_weekdays.clone()))
    }

    // ─── Generation ──────────────────────────────────────────────

    /// Generate a new plan, replacing any existing plan for the athlete.
    pub async fn generate(&self, athlete_id: u64, goal: PlanGoal, today: NaiveDate) -> Result<Plan> {
        if i32::from(goal.complexity) > MAX_COMPLEXITY {
            return Err(AppError::BadRequest(format!(
                "Complexity must be between 0 and {}",
                MAX_COMPLEXITY
            )));
        }
        if goal
            .competition_distance
            .is_some_and(|d| !d.is_finite() || d <= 0.0)
        {
            return Err(AppError::BadRequest(
                "Competition distance must be positive".to_string(),
            ));
        }
        if (goal.competition_date - today).num_days() > MAX_PLAN_WEEKS * 7 {
            return Err(AppError::BadRequest(format!(
                "Competition date must be within {} weeks",
                MAX_PLAN_WEEKS
            )));
        }

        let lock = self.athlete_lock(athlete_id);
        let _guard = lock.lock().await;

        let preferred_weekdays = match goal.preferred_weekdays {
            Some(days) => days,
            None => self.preferred_weekdays(athlete_id).await?,
        };

        let request = PlanRequest {
            complexity: goal.complexity,
            competition_date: goal.competition_date,
            competition_type: goal.competition_type,
            competition_distance: goal.competition_distance,
            preferred_weekdays,
        };

        let scheduled = self
            .scheduler
            .generate(&request, today, &mut self.shuffle_rng())?;

        let now = Utc::now();
        let plan = Plan {
            plan_id: format!("{}-{}", athlete_id, now.timestamp_millis()),
            athlete_id,
            complexity: request.complexity,
            competition_date: request.competition_date,
            competition_type: request.competition_type,
            competition_distance: request.competition_distance,
            created_at: format_utc_rfc3339(now),
            workouts: scheduled
                .into_iter()
                .enumerate()
                .map(|(i, w)| Workout {
                    workout_id: i as u32 + 1,
                    date: w.date,
                    sport_type: w.sport,
                    workout_type: w.workout_type,
                    duration_minutes: w.duration_minutes,
                    completion: None,
                })
                .collect(),
        };

        self.db.replace_plan(&plan).await?;

        tracing::info!(
            athlete_id,
            plan_id = %plan.plan_id,
            competition = plan.competition_type.as_str(),
            competition_date = %plan.competition_date,
            workouts = plan.workouts.len(),
            total_minutes = plan.total_minutes(),
            "Training plan generated"
        );

        Ok(plan)
    }

    // ─── Queries ─────────────────────────────────────────────────

    pub async fn current_plan(&self, athlete_id: u64) -> Result<Option<Plan>> {
        self.db.get_plan(athlete_id).await
    }

    /// Workouts dated within `[start, end]`. Empty when there is no plan.
    pub async fn workouts_in_range(
        &self,
        athlete_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Workout>> {
        if start > end {
            return Err(AppError::BadRequest(
                "start_date must not be after end_date".to_string(),
            ));
        }

        Ok(self
            .db
            .get_plan(athlete_id)
            .await?
            .map(|plan| plan.workouts_between(start, end))
            .unwrap_or_default())
    }

    // ─── Edits ───────────────────────────────────────────────────

    /// Move a workout to `new_date`.
    ///
    /// Manual moves are not checked against preferred weekdays. Returns
    /// `false` if the plan or workout does not belong to the athlete.
    pub async fn reschedule_workout(
        &self,
        athlete_id: u64,
        plan_id: &str,
        workout_id: u32,
        new_date: NaiveDate,
    ) -> Result<bool> {
        let lock = self.athlete_lock(athlete_id);
        let _guard = lock.lock().await;

        let updated = self
            .db
            .update_workout_date(athlete_id, plan_id, workout_id, new_date)
            .await?;

        if updated {
            tracing::info!(athlete_id, plan_id, workout_id, %new_date, "Workout rescheduled");
        } else {
            tracing::debug!(athlete_id, plan_id, workout_id, "Workout not found for reschedule");
        }

        Ok(updated)
    }

    /// Delete the athlete's plan and all its workouts.
    pub async fn delete_plan(&self, athlete_id: u64) -> Result<bool> {
        let lock = self.athlete_lock(athlete_id);
        let _guard = lock.lock().await;

        let deleted = self.db.delete_plan(athlete_id).await?;
        if deleted {
            tracing::info!(athlete_id, "Training plan deleted");
        }

        // Drop the entry unless another call is holding or waiting on it
        self.locks
            .remove_if(&athlete_id, |_, held| Arc::strong_count(held) == 2);
        Ok(deleted)
    }

    // ─── Completion marks ────────────────────────────────────────

    async fn plan_or_not_found(&self, athlete_id: u64) -> Result<Plan> {
        self.db
            .get_plan(athlete_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No plan for athlete {}", athlete_id)))
    }

    /// Mark a workout of the current plan as done on `date`.
    ///
    /// A workout carries at most one mark; marking it again is a bad request.
    pub async fn mark_completed(
        &self,
        athlete_id: u64,
        workout_id: u32,
        date: NaiveDate,
    ) -> Result<CompletionMark> {
        let lock = self.athlete_lock(athlete_id);
        let _guard = lock.lock().await;

        let mut plan = self.plan_or_not_found(athlete_id).await?;
        let workout = plan
            .workout_mut(workout_id)
            .ok_or_else(|| workout_not_found(workout_id))?;
        if workout.completion.is_some() {
            return Err(AppError::BadRequest(format!(
                "Workout {} is already marked completed",
                workout_id
            )));
        }

        let mark = CompletionMark {
            date,
            completed_at: format_utc_rfc3339(Utc::now()),
        };
        workout.completion = Some(mark.clone());
        self.db.replace_plan(&plan).await?;

        tracing::info!(athlete_id, workout_id, %date, "Workout marked completed");
        Ok(mark)
    }

    /// The workout's completion mark.
    pub async fn completion(&self, athlete_id: u64, workout_id: u32) -> Result<CompletionMark> {
        let plan = self.plan_or_not_found(athlete_id).await?;
        plan.workout(workout_id)
            .ok_or_else(|| workout_not_found(workout_id))?
            .completion
            .clone()
            .ok_or_else(|| no_completion_mark(workout_id))
    }

    /// Remove the workout's completion mark.
    pub async fn unmark_completed(&self, athlete_id: u64, workout_id: u32) -> Result<()> {
        let lock = self.athlete_lock(athlete_id);
        let _guard = lock.lock().await;

        let mut plan = self.plan_or_not_found(athlete_id).await?;
        plan.workout_mut(workout_id)
            .ok_or_else(|| workout_not_found(workout_id))?
            .completion
            .take()
            .ok_or_else(|| no_completion_mark(workout_id))?;
        self.db.replace_plan(&plan).await?;

        tracing::info!(athlete_id, workout_id, "Workout completion mark removed");
        Ok(())
    }

    // ─── Profile ─────────────────────────────────────────────────

    /// Stored profile, or an unsaved one carrying the default weekdays.
    pub async fn profile(&self, athlete_id: u64) -> Result<User> {
        match self.db.get_user(athlete_id).await? {
            Some(user) => Ok(user),
            None => Ok(User::new(
                athlete_id,
                self.default_weekdays.clone(),
                &format_utc_rfc3339(Utc::now()),
            )),
        }
    }

    /// Store new preferred weekdays and move upcoming workouts of the
    /// current plan onto them.
    ///
    /// Workouts pushed onto or past the competition date are dropped.
    pub async fn update_preferences(
        &self,
        athlete_id: u64,
        preferred_weekdays: PreferredWeekdays,
        today: NaiveDate,
    ) -> Result<User> {
        let lock = self.athlete_lock(athlete_id);
        let _guard = lock.lock().await;

        let now = format_utc_rfc3339(Utc::now());
        let user = match self.db.get_user(athlete_id).await? {
            Some(mut user) => {
                user.preferred_weekdays = preferred_weekdays.clone();
                user.updated_at = now;
                user
            }
            None => User::new(athlete_id, preferred_weekdays.clone(), &now),
        };
        self.db.upsert_user(&user).await?;

        if let Some(mut plan) = self.db.get_plan(athlete_id).await? {
            let before = plan.workouts.len();
            let moved = resolve_conflicts(
                plan.workouts
                    .iter_mut()
                    .filter(|w| w.date >= today)
                    .map(|w| &mut w.date),
                &preferred_weekdays,
            );
            let competition_date = plan.competition_date;
            plan.workouts.retain(|w| w.date < competition_date);
            let dropped = before - plan.workouts.len();

            if moved > 0 || dropped > 0 {
                self.db.replace_plan(&plan).await?;
                tracing::info!(
                    athlete_id,
                    moved,
                    dropped,
                    "Current plan refitted to new preferred weekdays"
                );
            }
        }

        Ok(user)
    }
}

fn workout_not_found(workout_id: u32) -> AppError {
    AppError::NotFound(format!("Workout {} not found in current plan", workout_id))
}

fn no_completion_mark(workout_id: u32) -> AppError {
    AppError::NotFound(format!("Workout {} has no completion mark", workout_id))
}
