// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store for local runs and tests.

use crate::models::{Plan, User};
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;

/// Plans and users held in memory, keyed by athlete ID.
#[derive(Clone, Default)]
pub struct MemoryDb {
    users: Arc<DashMap<u64, User>>,
    plans: Arc<DashMap<u64, Plan>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user(&self, athlete_id: u64) -> Option<User> {
        self.users.get(&athlete_id).map(|u| u.clone())
    }

    pub fn upsert_user(&self, user: &User) {
        self.users.insert(user.athlete_id, user.clone());
    }

    pub fn get_plan(&self, athlete_id: u64) -> Option<Plan> {
        self.plans.get(&athlete_id).map(|p| p.clone())
    }

    pub fn replace_plan(&self, plan: &Plan) {
        self.plans.insert(plan.athlete_id, plan.clone());
    }

    pub fn delete_plan(&self, athlete_id: u64) -> bool {
        self.plans.remove(&athlete_id).is_some()
    }

    pub fn update_workout_date(
        &self,
        athlete_id: u64,
        plan_id: &str,
        workout_id: u32,
        new_date: NaiveDate,
    ) -> bool {
        let Some(mut plan) = self.plans.get_mut(&athlete_id) else {
            return false;
        };
        if plan.plan_id != plan_id {
            return false;
        }
        match plan.workout_mut(workout_id) {
            Some(workout) => {
                workout.date = new_date;
                true
            }
            None => false,
        }
    }
}
