// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod plan;
pub mod scheduler;
pub mod training_tables;
pub mod wizard;

pub use plan::{PlanGoal, PlanService};
pub use scheduler::{PlanRequest, PlanScheduler, ScheduleError, ScheduledWorkout, VolumeModel};
pub use training_tables::{TrainingTables, WorkoutItem};
pub use wizard::{calculate_complexity, WizardAnswers};
