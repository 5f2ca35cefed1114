// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan scheduler: turns a competition goal into dated workouts.
//!
//! Generation walks calendar weeks from the current week up to the
//! competition date. Each week:
//! 1. Derive the training phase from the weeks remaining
//! 2. Scale the primary sport's weekly volume by phase and load cycle
//! 3. Ask the knowledge base to split that volume into sessions
//! 4. Shuffle the sessions and place them on preferred weekdays
//!
//! A final pass moves anything that landed on a non-preferred weekday.

use crate::models::{
    weekday_index, CompetitionType, PreferredWeekdays, SportType, TrainingPhase, WeekdayError,
    WorkoutType,
};
use crate::services::training_tables::{training_phase, TrainingTables, WorkoutItem};
use crate::time_utils::{add_days, monday_of};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// Inputs for one plan generation.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// 0-1000
    pub complexity: u16,
    pub competition_date: NaiveDate,
    pub competition_type: CompetitionType,
    pub competition_distance: Option<f64>,
    pub preferred_weekdays: PreferredWeekdays,
}

/// A workout placed on the calendar, not yet persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledWorkout {
    pub date: NaiveDate,
    pub sport: SportType,
    pub workout_type: WorkoutType,
    pub duration_minutes: u32,
}

impl ScheduledWorkout {
    fn new(date: NaiveDate, item: &WorkoutItem) -> Self {
        Self {
            date,
            sport: item.sport,
            workout_type: item.workout_type,
            duration_minutes: item.duration_minutes,
        }
    }
}

/// Weekly volume multipliers.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeModel {
    pub base: f64,
    pub build: f64,
    pub peak: f64,
    pub taper: f64,
    /// Replaces the load cycle in the final week
    pub final_week: f64,
    /// Replaces the load cycle two weeks out
    pub penultimate_week: f64,
    /// 4-week load cycle, indexed by `(week_number - 1) % 4`
    pub cycle: [f64; 4],
}

impl Default for VolumeModel {
    fn default() -> Self {
        Self {
            base: 1.0,
            build: 1.1,
            peak: 0.9,
            taper: 0.6,
            final_week: 0.5,
            penultimate_week: 0.7,
            cycle: [1.0, 1.25, 1.37, 0.75],
        }
    }
}

impl VolumeModel {
    pub fn phase_multiplier(&self, phase: TrainingPhase) -> f64 {
        match phase {
            TrainingPhase::Base => self.base,
            TrainingPhase::Build => self.build,
            TrainingPhase::Peak => self.peak,
            TrainingPhase::Taper => self.taper,
        }
    }

    /// Combined multiplier for a week. `week_number` is 1-based.
    pub fn multiplier(&self, phase: TrainingPhase, weeks_remaining: i64, week_number: u32) -> f64 {
        let phase_multiplier = self.phase_multiplier(phase);
        match weeks_remaining {
            1 => phase_multiplier * self.final_week,
            2 => phase_multiplier * self.penultimate_week,
            _ => {
                let slot = (week_number.max(1) - 1) as usize % self.cycle.len();
                phase_multiplier * self.cycle[slot]
            }
        }
    }
}

/// Furthest competition date, in weeks from today, a plan may target.
pub const MAX_PLAN_WEEKS: i64 = 104;

/// Errors that stop plan generation. Both are configuration problems,
/// never a consequence of the chosen dates or complexity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid preferred weekdays: {0}")]
    Weekdays(#[from] WeekdayError),

    #[error("No sports configured for competition type: {0}")]
    UnknownCompetition(String),
}

/// Week-by-week plan generator.
#[derive(Debug, Clone)]
pub struct PlanScheduler {
    tables: Arc<TrainingTables>,
    volume: VolumeModel,
}

impl PlanScheduler {
    pub fn new(tables: Arc<TrainingTables>) -> Self {
        Self::with_volume_model(tables, VolumeModel::default())
    }

    pub fn with_volume_model(tables: Arc<TrainingTables>, volume: VolumeModel) -> Self {
        Self { tables, volume }
    }

    /// Generate the dated workouts for a plan starting `today`.
    ///
    /// Competition dates in the past or inside the current week produce a
    /// short or empty schedule rather than an error.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        request: &PlanRequest,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Vec<ScheduledWorkout>, ScheduleError> {
        let sports = self
            .tables
            .sports_for_competition(request.competition_type)
            .ok_or_else(|| {
                ScheduleError::UnknownCompetition(request.competition_type.as_str().to_string())
            })?;
        let preferred = &request.preferred_weekdays;
        if preferred.is_empty() {
            return Err(WeekdayError::Empty.into());
        }

        let competition_date = request.competition_date;
        let complexity = i32::from(request.complexity);

        if competition_date <= today {
            tracing::debug!(
                %competition_date,
                %today,
                "Competition date is not in the future, nothing to schedule"
            );
        }

        let base_volume = self.tables.weekly_volume_minutes(sports[0], complexity);
        let mut scheduled = Vec::new();
        let mut week_start = monday_of(today);
        let mut week_number = 0u32;

        while week_start < competition_date {
            week_number += 1;

            let weeks_remaining = ((competition_date - week_start).num_days() / 7).max(1);
            let phase = training_phase(weeks_remaining);
            let multiplier = self.volume.multiplier(phase, weeks_remaining, week_number);
            let adjusted_volume = (f64::from(base_volume) * multiplier) as u32;

            let mut items =
                self.tables
                    .distribute_weekly_workouts(sports, adjusted_volume, phase, complexity);
            items.shuffle(rng);

            // The first week may already be under way.
            let earliest = week_start.max(today);
            let placed = place_week(&items, week_start, earliest, competition_date, preferred);

            tracing::debug!(
                week_number,
                %week_start,
                weeks_remaining,
                ?phase,
                adjusted_volume,
                generated = items.len(),
                placed = placed.len(),
                "Scheduled training week"
            );

            scheduled.extend(placed);
            week_start = add_days(week_start, 7);
        }

        resolve_conflicts(scheduled.iter_mut().map(|w| &mut w.date), preferred);
        scheduled.retain(|w| w.date < competition_date);

        Ok(scheduled)
    }
}

/// Place one week's shuffled items on preferred weekdays.
///
/// Item `i` goes to `preferred[i % len]`. Days before `earliest` are
/// unavailable, so such items are re-indexed into the remaining preferred
/// days of the week, or dropped when none remain. Items landing on or
/// after the competition date are dropped.
fn place_week(
    items: &[WorkoutItem],
    week_start: NaiveDate,
    earliest: NaiveDate,
    competition_date: NaiveDate,
    preferred: &PreferredWeekdays,
) -> Vec<ScheduledWorkout> {
    let days = preferred.days();
    let day_date = |weekday: u8| add_days(week_start, i64::from(weekday));
    let open_days: Vec<u8> = days
        .iter()
        .copied()
        .filter(|&d| day_date(d) >= earliest)
        .collect();

    let mut placed = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let mut date = day_date(days[i % days.len()]);

        if date < earliest {
            if open_days.is_empty() {
                tracing::trace!(?item, %week_start, "No open day left this week, dropping workout");
                continue;
            }
            date = day_date(open_days[i % open_days.len()]);
        }

        if date >= competition_date {
            tracing::trace!(?item, %date, "Workout falls on or after competition, dropping");
            continue;
        }

        placed.push(ScheduledWorkout::new(date, item));
    }

    placed
}

/// Days to move forward from `weekday` to reach a preferred weekday.
///
/// Always at least 1: a non-preferred day is never kept. The smallest
/// distance wins, then the lowest weekday index.
pub fn forward_shift(weekday: u8, preferred: &PreferredWeekdays) -> Option<i64> {
    preferred
        .days()
        .iter()
        .map(|&d| {
            let distance = (i64::from(d) - i64::from(weekday)).rem_euclid(7);
            (if distance == 0 { 7 } else { distance }, d)
        })
        .min()
        .map(|(distance, _)| distance)
}

/// Move every date that is not on a preferred weekday forward to the
/// nearest one. Returns how many dates moved.
pub fn resolve_conflicts<'a>(
    dates: impl IntoIterator<Item = &'a mut NaiveDate>,
    preferred: &PreferredWeekdays,
) -> usize {
    let mut moved = 0;
    for date in dates {
        let weekday = weekday_index(*date);
        if preferred.contains(weekday) {
            continue;
        }
        if let Some(shift) = forward_shift(weekday, preferred) {
            *date = add_days(*date, shift);
            moved += 1;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn weekdays(days: &[u8]) -> PreferredWeekdays {
        PreferredWeekdays::new(days.iter().copied()).unwrap()
    }

    fn scheduler() -> PlanScheduler {
        PlanScheduler::new(Arc::new(TrainingTables::default()))
    }

    fn request(competition: CompetitionType, complexity: u16, date: NaiveDate) -> PlanRequest {
        PlanRequest {
            complexity,
            competition_date: date,
            competition_type: competition,
            competition_distance: None,
            preferred_weekdays: PreferredWeekdays::default(),
        }
    }

    fn item(workout_type: WorkoutType) -> WorkoutItem {
        WorkoutItem {
            sport: SportType::Running,
            workout_type,
            duration_minutes: 30,
        }
    }

    #[test]
    fn test_multiplier_overrides_final_weeks() {
        let model = VolumeModel::default();
        assert!((model.multiplier(TrainingPhase::Taper, 1, 3) - 0.3).abs() < 1e-9);
        assert!((model.multiplier(TrainingPhase::Taper, 2, 3) - 0.42).abs() < 1e-9);
    }

    #[test]
    fn test_multiplier_load_cycle() {
        let model = VolumeModel::default();
        let expected = [1.0, 1.25, 1.37, 0.75, 1.0];
        for (i, cycle) in expected.iter().enumerate() {
            let m = model.multiplier(TrainingPhase::Base, 12, i as u32 + 1);
            assert!((m - cycle).abs() < 1e-9, "week {}", i + 1);
        }
        let build = model.multiplier(TrainingPhase::Build, 6, 2);
        assert!((build - 1.1 * 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_forward_shift_example() {
        let preferred = weekdays(&[0, 1, 4, 5, 6]);
        assert_eq!(forward_shift(3, &preferred), Some(1));
        assert_eq!(forward_shift(2, &preferred), Some(2));
    }

    #[test]
    fn test_forward_shift_wraps_into_next_week() {
        let preferred = weekdays(&[1]);
        assert_eq!(forward_shift(3, &preferred), Some(5));
        // Never stays on the same day
        assert_eq!(forward_shift(1, &preferred), Some(7));
    }

    #[test]
    fn test_resolve_conflicts_moves_only_non_preferred() {
        let preferred = weekdays(&[0, 1, 4, 5, 6]);
        // 2026-10-21 is a Wednesday, 2026-10-19 a Monday
        let mut dates = vec![date("2026-10-21"), date("2026-10-19")];
        let moved = resolve_conflicts(dates.iter_mut(), &preferred);

        assert_eq!(moved, 1);
        assert_eq!(dates, vec![date("2026-10-23"), date("2026-10-19")]);
    }

    #[test]
    fn test_place_week_round_robin() {
        let monday = date("2026-10-19");
        let items = vec![
            item(WorkoutType::Endurance),
            item(WorkoutType::Interval),
            item(WorkoutType::Recovery),
        ];
        let placed = place_week(
            &items,
            monday,
            monday,
            date("2027-01-01"),
            &weekdays(&[1, 5]),
        );

        let dates: Vec<NaiveDate> = placed.iter().map(|w| w.date).collect();
        assert_eq!(
            dates,
            vec![date("2026-10-20"), date("2026-10-24"), date("2026-10-20")]
        );
    }

    #[test]
    fn test_place_week_mid_week_reindexes() {
        let monday = date("2026-10-19");
        let thursday = date("2026-10-22");
        let items = vec![
            item(WorkoutType::Endurance),
            item(WorkoutType::Interval),
            item(WorkoutType::Recovery),
        ];
        let placed = place_week(
            &items,
            monday,
            thursday,
            date("2027-01-01"),
            &weekdays(&[0, 2, 4, 6]),
        );

        // Open days: Friday (4) and Sunday (6).
        // i=0 -> Monday (past) -> open[0] = Friday
        // i=1 -> Wednesday (past) -> open[1] = Sunday
        // i=2 -> Friday
        let dates: Vec<NaiveDate> = placed.iter().map(|w| w.date).collect();
        assert_eq!(
            dates,
            vec![date("2026-10-23"), date("2026-10-25"), date("2026-10-23")]
        );
    }

    #[test]
    fn test_place_week_drops_when_week_is_over() {
        let monday = date("2026-10-19");
        let sunday = date("2026-10-25");
        let placed = place_week(
            &[item(WorkoutType::Endurance)],
            monday,
            sunday,
            date("2027-01-01"),
            &weekdays(&[0, 1]),
        );
        assert!(placed.is_empty());
    }

    #[test]
    fn test_place_week_drops_on_competition_day() {
        let monday = date("2026-10-19");
        let placed = place_week(
            &[item(WorkoutType::Endurance), item(WorkoutType::Recovery)],
            monday,
            monday,
            date("2026-10-20"),
            &weekdays(&[0, 1]),
        );
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].date, monday);
    }

    #[test]
    fn test_generate_past_competition_is_empty() {
        let today = date("2026-10-18");
        let req = request(CompetitionType::Run10k, 500, date("2026-09-01"));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let workouts = scheduler().generate(&req, today, &mut rng).unwrap();
        assert!(workouts.is_empty());
    }

    #[test]
    fn test_generate_competition_today_is_empty() {
        let today = date("2026-10-21");
        let req = request(CompetitionType::Run10k, 500, today);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let workouts = scheduler().generate(&req, today, &mut rng).unwrap();
        assert!(workouts.is_empty());
    }

    #[test]
    fn test_generate_same_seed_is_deterministic() {
        let today = date("2026-10-18");
        let req = request(CompetitionType::TriathlonSprint, 640, date("2027-02-14"));

        let first = scheduler()
            .generate(&req, today, &mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();
        let second = scheduler()
            .generate(&req, today, &mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_respects_bounds_and_weekdays() {
        let today = date("2026-10-22");
        let mut req = request(CompetitionType::Cycling, 820, date("2027-03-03"));
        req.preferred_weekdays = weekdays(&[1, 3, 5]);

        let workouts = scheduler()
            .generate(&req, today, &mut ChaCha8Rng::seed_from_u64(9))
            .unwrap();

        assert!(!workouts.is_empty());
        for w in &workouts {
            assert!(w.date >= today);
            assert!(w.date < req.competition_date);
            assert!(req.preferred_weekdays.contains_date(w.date));
            assert_eq!(w.sport, SportType::Cycling);
            assert!(w.duration_minutes >= 20);
        }
    }
}
