// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile and preferred weekdays)
//! - Plans (one document per athlete, workouts embedded)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Plan, User};
use chrono::NaiveDate;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by athlete ID.
    pub async fn get_user(&self, athlete_id: u64) -> Result<Option<User>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(&athlete_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user profile.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(user.athlete_id.to_string())
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Plan Operations ─────────────────────────────────────────

    /// Get the athlete's active plan.
    pub async fn get_plan(&self, athlete_id: u64) -> Result<Option<Plan>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::PLANS)
            .obj()
            .one(&athlete_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Replace the athlete's plan (and all its workouts) with `plan`.
    ///
    /// The plan document is keyed by athlete ID, so the old plan is
    /// overwritten by a single committed write and is never observed
    /// half-replaced.
    pub async fn replace_plan(&self, plan: &Plan) -> Result<(), AppError> {
        let mut transaction = self
            .client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        self.client
            .fluent()
            .update()
            .in_col(collections::PLANS)
            .document_id(plan.athlete_id.to_string())
            .object(plan)
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add plan to transaction: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(())
    }

    /// Delete the athlete's plan. Returns `false` if there was none.
    pub async fn delete_plan(&self, athlete_id: u64) -> Result<bool, AppError> {
        if self.get_plan(athlete_id).await?.is_none() {
            return Ok(false);
        }

        self.client
            .fluent()
            .delete()
            .from(collections::PLANS)
            .document_id(athlete_id.to_string())
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(true)
    }

    /// Overwrite one workout's date.
    ///
    /// Returns `false` if the athlete has no plan with `plan_id` or the
    /// plan has no such workout.
    pub async fn update_workout_date(
        &self,
        athlete_id: u64,
        plan_id: &str,
        workout_id: u32,
        new_date: NaiveDate,
    ) -> Result<bool, AppError> {
        let mut transaction = self
            .client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Writers for one athlete are serialized by PlanService
        let current: Option<Plan> = self
            .client
            .fluent()
            .select()
            .by_id_in(collections::PLANS)
            .obj()
            .one(&athlete_id.to_string())
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read plan in transaction: {}", e))
            })?;

        let Some(mut plan) = current.filter(|p| p.plan_id == plan_id) else {
            let _ = transaction.rollback().await;
            return Ok(false);
        };

        match plan.workout_mut(workout_id) {
            Some(workout) => workout.date = new_date,
            None => {
                let _ = transaction.rollback().await;
                return Ok(false);
            }
        }

        self.client
            .fluent()
            .update()
            .in_col(collections::PLANS)
            .document_id(athlete_id.to_string())
            .object(&plan)
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add plan to transaction: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(true)
    }
}
