// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training plan and workout models for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Sport of a single workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum SportType {
    Running,
    Cycling,
    Swimming,
}

impl SportType {
    pub const ALL: [SportType; 3] = [SportType::Running, SportType::Cycling, SportType::Swimming];

    pub fn as_str(&self) -> &'static str {
        match self {
            SportType::Running => "running",
            SportType::Cycling => "cycling",
            SportType::Swimming => "swimming",
        }
    }
}

/// Kind of session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Long steady session
    Endurance,
    /// High intensity repeats
    Interval,
    /// Easy session between hard days
    Recovery,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 3] = [
        WorkoutType::Endurance,
        WorkoutType::Interval,
        WorkoutType::Recovery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Endurance => "endurance",
            WorkoutType::Interval => "interval",
            WorkoutType::Recovery => "recovery",
        }
    }
}

/// Target event the plan builds towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionType {
    #[serde(rename = "run_10k")]
    Run10k,
    RunHalfMarathon,
    RunMarathon,
    /// Distance given in kilometers
    Cycling,
    /// Distance given in meters
    Swimming,
    TriathlonSprint,
    TriathlonOlympic,
    TriathlonIronman,
}

impl CompetitionType {
    pub const ALL: [CompetitionType; 8] = [
        CompetitionType::Run10k,
        CompetitionType::RunHalfMarathon,
        CompetitionType::RunMarathon,
        CompetitionType::Cycling,
        CompetitionType::Swimming,
        CompetitionType::TriathlonSprint,
        CompetitionType::TriathlonOlympic,
        CompetitionType::TriathlonIronman,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitionType::Run10k => "run_10k",
            CompetitionType::RunHalfMarathon => "run_half_marathon",
            CompetitionType::RunMarathon => "run_marathon",
            CompetitionType::Cycling => "cycling",
            CompetitionType::Swimming => "swimming",
            CompetitionType::TriathlonSprint => "triathlon_sprint",
            CompetitionType::TriathlonOlympic => "triathlon_olympic",
            CompetitionType::TriathlonIronman => "triathlon_ironman",
        }
    }

    /// Parse a wire name such as `"run_marathon"`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Unit of `competition_distance` for this event, if one applies.
    pub fn distance_unit(&self) -> Option<&'static str> {
        match self {
            CompetitionType::Cycling => Some("km"),
            CompetitionType::Swimming => Some("m"),
            _ => None,
        }
    }
}

/// Periodization stage, derived from weeks remaining until the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    Base,
    Build,
    Peak,
    Taper,
}

/// A single scheduled session.
///
/// Only `date` changes after generation (manual reschedule).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Workout {
    /// 1-based, unique within the owning plan
    pub workout_id: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub sport_type: SportType,
    pub workout_type: WorkoutType,
    pub duration_minutes: u32,
    /// Set once the athlete marks the workout done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(optional))]
    pub completion: Option<CompletionMark>,
}

/// Athlete's record that a workout was done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CompletionMark {
    /// Day the workout was actually done
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    /// When the mark was recorded (ISO 8601)
    pub completed_at: String,
}

/// An athlete's active training plan.
///
/// Stored at: `plans/{athlete_id}`. Workouts are embedded so that
/// replacing or deleting a plan is a single document write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Plan {
    pub plan_id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub athlete_id: u64,
    /// 0-1000
    pub complexity: u16,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub competition_date: NaiveDate,
    pub competition_type: CompetitionType,
    /// Kilometers for cycling, meters for swimming
    pub competition_distance: Option<f64>,
    /// When the plan was generated (ISO 8601)
    pub created_at: String,
    #[serde(default)]
    pub workouts: Vec<Workout>,
}

impl Plan {
    pub fn workout(&self, workout_id: u32) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.workout_id == workout_id)
    }

    pub fn workout_mut(&mut self, workout_id: u32) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.workout_id == workout_id)
    }

    /// Workouts with `start <= date <= end`, ordered by date.
    pub fn workouts_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<Workout> {
        let mut selected: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|w| w.date >= start && w.date <= end)
            .cloned()
            .collect();
        selected.sort_by_key(|w| (w.date, w.workout_id));
        selected
    }

    /// Sum of planned minutes.
    pub fn total_minutes(&self) -> u32 {
        self.workouts.iter().map(|w| w.duration_minutes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_plan(dates: &[&str]) -> Plan {
        Plan {
            plan_id: "p1".to_string(),
            athlete_id: 7,
            complexity: 500,
            competition_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            competition_type: CompetitionType::RunMarathon,
            competition_distance: None,
            created_at: "2026-10-18T10:00:00Z".to_string(),
            workouts: dates
                .iter()
                .enumerate()
                .map(|(i, d)| Workout {
                    workout_id: i as u32 + 1,
                    date: d.parse().unwrap(),
                    sport_type: SportType::Running,
                    workout_type: WorkoutType::Endurance,
                    duration_minutes: 30,
                    completion: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_competition_type_wire_names() {
        for competition in CompetitionType::ALL {
            let json = serde_json::to_string(&competition).unwrap();
            assert_eq!(json, format!("\"{}\"", competition.as_str()));
        }
        let parsed: CompetitionType = serde_json::from_str("\"run_10k\"").unwrap();
        assert_eq!(parsed, CompetitionType::Run10k);
        assert_eq!(
            CompetitionType::from_name("triathlon_olympic"),
            Some(CompetitionType::TriathlonOlympic)
        );
        assert_eq!(CompetitionType::from_name("duathlon"), None);
    }

    #[test]
    fn test_workout_serializes_iso_date() {
        let plan = make_plan(&["2026-11-02"]);
        let value = serde_json::to_value(&plan.workouts[0]).unwrap();
        assert_eq!(value["date"], "2026-11-02");
        assert_eq!(value["sport_type"], "running");
        assert_eq!(value["workout_type"], "endurance");
        assert_eq!(value["duration_minutes"], 30);
        assert!(value.get("completion").is_none());
    }

    #[test]
    fn test_completion_mark_serialized_when_set() {
        let mut plan = make_plan(&["2026-11-02"]);
        plan.workout_mut(1).unwrap().completion = Some(CompletionMark {
            date: NaiveDate::from_ymd_opt(2026, 11, 3).unwrap(),
            completed_at: "2026-11-03T19:00:00Z".to_string(),
        });

        let value = serde_json::to_value(plan.workout(1).unwrap()).unwrap();
        assert_eq!(value["completion"]["date"], "2026-11-03");

        // Documents stored before marks existed still load
        let legacy = serde_json::json!({
            "workout_id": 1,
            "date": "2026-11-02",
            "sport_type": "running",
            "workout_type": "recovery",
            "duration_minutes": 25
        });
        let workout: Workout = serde_json::from_value(legacy).unwrap();
        assert_eq!(workout.completion, None);
    }

    #[test]
    fn test_workouts_between_is_inclusive_and_sorted() {
        let plan = make_plan(&["2026-11-05", "2026-11-01", "2026-11-03", "2026-11-09"]);
        let start = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 11, 5).unwrap();

        let selected = plan.workouts_between(start, end);
        let ids: Vec<u32> = selected.iter().map(|w| w.workout_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_total_minutes() {
        let plan = make_plan(&["2026-11-01", "2026-11-02"]);
        assert_eq!(plan.total_minutes(), 60);
    }
}
