// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan wizard: derive a complexity score from a short questionnaire.
//!
//! The score is the sum of per-answer coefficients, adjusted for how much
//! time is left before the event, and clamped to 0-1000.

use crate::models::CompetitionType;
use crate::services::training_tables::{MAX_COMPLEXITY, MIN_COMPLEXITY};
use chrono::NaiveDate;
use serde::Deserialize;

/// Current weekly running distance.
const WEEKLY_DISTANCE_COEFFICIENTS: &[(&str, i32)] = &[
    ("beginner", 100),
    ("5-10", 200),
    ("10-30", 400),
    ("30-50", 600),
    ("50+", 800),
];
const WEEKLY_DISTANCE_FALLBACK: i32 = 200;

/// Comfortable pace in min/km.
const PACE_COEFFICIENTS: &[(&str, i32)] = &[
    ("8+", 50),
    ("7-8", 100),
    ("6-7", 200),
    ("5-6", 350),
    ("4-5", 500),
    ("4-", 650),
];
const PACE_FALLBACK: i32 = 100;

const TARGET_DISTANCE_COEFFICIENTS: &[(&str, i32)] =
    &[("5k", 50), ("10k", 100), ("21k", 200), ("42k", 350)];
const TARGET_DISTANCE_FALLBACK: i32 = 100;

/// Preparation shorter than this raises the score.
const OPTIMAL_PREPARATION_WEEKS: i64 = 16;
const SHORT_PREPARATION_BASE: f64 = 100.0;
const SHORT_PREPARATION_CAP: f64 = 200.0;
const LONG_PREPARATION_BONUS: i32 = -50;
const NO_GOAL_ADJUSTMENT: i32 = 50;

/// Questionnaire answers.
#[derive(Debug, Clone, Deserialize)]
pub struct WizardAnswers {
    pub weekly_distance: String,
    pub comfortable_pace: String,
    pub target_distance: String,
    pub competition_date: NaiveDate,
    #[serde(default)]
    pub has_specific_goal: bool,
}

fn coefficient(table: &[(&str, i32)], answer: &str, fallback: i32) -> i32 {
    table
        .iter()
        .find(|(key, _)| *key == answer)
        .map(|(_, value)| *value)
        .unwrap_or(fallback)
}

/// Complexity score (0-1000) for a set of answers, as of `today`.
pub fn calculate_complexity(answers: &WizardAnswers, today: NaiveDate) -> u16 {
    let mut complexity = f64::from(
        coefficient(
            WEEKLY_DISTANCE_COEFFICIENTS,
            &answers.weekly_distance,
            WEEKLY_DISTANCE_FALLBACK,
        ) + coefficient(PACE_COEFFICIENTS, &answers.comfortable_pace, PACE_FALLBACK)
            + coefficient(
                TARGET_DISTANCE_COEFFICIENTS,
                &answers.target_distance,
                TARGET_DISTANCE_FALLBACK,
            ),
    );

    if answers.has_specific_goal {
        let weeks = (answers.competition_date - today).num_days().div_euclid(7);
        if weeks < OPTIMAL_PREPARATION_WEEKS {
            let factor =
                SHORT_PREPARATION_BASE * OPTIMAL_PREPARATION_WEEKS as f64 / weeks.max(1) as f64;
            complexity += factor.min(SHORT_PREPARATION_CAP);
        } else {
            complexity += f64::from(LONG_PREPARATION_BONUS);
        }
    } else {
        complexity += f64::from(NO_GOAL_ADJUSTMENT);
    }

    (complexity as i32).clamp(MIN_COMPLEXITY, MAX_COMPLEXITY) as u16
}

/// Competition type for a wizard target distance. 5k plans train as 10k.
pub fn competition_type_for_distance(target_distance: &str) -> CompetitionType {
    match target_distance {
        "21k" => CompetitionType::RunHalfMarathon,
        "42k" => CompetitionType::RunMarathon,
        _ => CompetitionType::Run10k,
    }
}
