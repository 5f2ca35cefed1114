// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod plan;
pub mod user;
pub mod weekday;

pub use plan::{
    CompetitionType, CompletionMark, Plan, SportType, TrainingPhase, Workout, WorkoutType,
};
pub use user::User;
pub use weekday::{weekday_index, PreferredWeekdays, WeekdayError, DEFAULT_PREFERRED_WEEKDAYS};
