//! Database layer (Firestore, or in-memory for local runs and tests).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{Plan, User};
use chrono::NaiveDate;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Active plan per athlete (keyed by athlete_id)
    pub const PLANS: &str = "plans";
}

/// Storage backend for users and plans.
#[derive(Clone)]
pub enum PlanDb {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl PlanDb {
    /// Empty in-memory store.
    pub fn in_memory() -> Self {
        PlanDb::Memory(MemoryDb::new())
    }

    pub async fn get_user(&self, athlete_id: u64) -> Result<Option<User>, AppError> {
        match self {
            PlanDb::Firestore(db) => db.get_user(athlete_id).await,
            PlanDb::Memory(db) => Ok(db.get_user(athlete_id)),
        }
    }

    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        match self {
            PlanDb::Firestore(db) => db.upsert_user(user).await,
            PlanDb::Memory(db) => {
                db.upsert_user(user);
                Ok(())
            }
        }
    }

    pub async fn get_plan(&self, athlete_id: u64) -> Result<Option<Plan>, AppError> {
        match self {
            PlanDb::Firestore(db) => db.get_plan(athlete_id).await,
            PlanDb::Memory(db) => Ok(db.get_plan(athlete_id)),
        }
    }

    /// Atomically replace the athlete's plan, workouts included.
    pub async fn replace_plan(&self, plan: &Plan) -> Result<(), AppError> {
        match self {
            PlanDb::Firestore(db) => db.replace_plan(plan).await,
            PlanDb::Memory(db) => {
                db.replace_plan(plan);
                Ok(())
            }
        }
    }

    /// Delete the plan and its workouts. `false` if there was none.
    pub async fn delete_plan(&self, athlete_id: u64) -> Result<bool, AppError> {
        match self {
            PlanDb::Firestore(db) => db.delete_plan(athlete_id).await,
            PlanDb::Memory(db) => Ok(db.delete_plan(athlete_id)),
        }
    }

    pub async fn update_workout_date(
        &self,
        athlete_id: u64,
        plan_id: &str,
        workout_id: u32,
        new_date: NaiveDate,
    ) -> Result<bool, AppError> {
        match self {
            PlanDb::Firestore(db) => {
                db.update_workout_date(athlete_id, plan_id, workout_id, new_date)
                    .await
            }
            PlanDb::Memory(db) => Ok(db.update_workout_date(athlete_id, plan_id, workout_id, new_date)),
        }
    }
}
