// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Periodization knowledge base.
//!
//! Immutable lookup tables plus the pure functions that interpolate them:
//! - weekly training volume per sport and complexity
//! - workout type mix per training phase
//! - session duration and weekly frequency ranges
//! - the sports that make up each competition type
//!
//! Tables are built once at startup and shared read-only.

use crate::models::{CompetitionType, SportType, TrainingPhase, WorkoutType};
use std::collections::HashMap;

/// Lowest and highest supported complexity score.
pub const MIN_COMPLEXITY: i32 = 0;
pub const MAX_COMPLEXITY: i32 = 1000;

/// No generated session is shorter than this.
pub const MIN_WORKOUT_MINUTES: u32 = 20;

/// Triathletes train each discipline at least this often.
const MIN_MULTISPORT_FREQUENCY: u32 = 2;

/// A (sport, workout type, duration) item produced for one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkoutItem {
    pub sport: SportType,
    pub workout_type: WorkoutType,
    pub duration_minutes: u32,
}

/// Inclusive range scaled linearly by complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledRange {
    pub min: u32,
    pub max: u32,
}

impl ScaledRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// `min + (max - min) * complexity / 1000`, unrounded.
    fn scale(&self, complexity: i32) -> f64 {
        let fraction = f64::from(complexity) / f64::from(MAX_COMPLEXITY);
        f64::from(self.min) + f64::from(self.max - self.min) * fraction
    }
}

/// Everything the tables know about one sport.
#[derive(Debug, Clone)]
pub struct SportProfile {
    /// (complexity, weekly minutes), sorted by complexity
    pub volume_anchors: Vec<(i32, u32)>,
    /// Sessions per week
    pub frequency: ScaledRange,
    pub endurance_minutes: ScaledRange,
    pub interval_minutes: ScaledRange,
    pub recovery_minutes: ScaledRange,
}

impl SportProfile {
    fn duration_range(&self, workout_type: WorkoutType) -> ScaledRange {
        match workout_type {
            WorkoutType::Endurance => self.endurance_minutes,
            WorkoutType::Interval => self.interval_minutes,
            WorkoutType::Recovery => self.recovery_minutes,
        }
    }
}

/// Workout type fractions for one phase; fractions sum to 1.0.
pub type WorkoutMix = Vec<(WorkoutType, f64)>;

/// Immutable periodization tables.
#[derive(Debug, Clone)]
pub struct TrainingTables {
    running: SportProfile,
    cycling: SportProfile,
    swimming: SportProfile,
    base_mix: WorkoutMix,
    build_mix: WorkoutMix,
    peak_mix: WorkoutMix,
    taper_mix: WorkoutMix,
    competitions: HashMap<CompetitionType, Vec<SportType>>,
}

impl Default for TrainingTables {
    /// Standard tables (Joe Friel style periodization).
    fn default() -> Self {
        use CompetitionType::*;
        use SportType::*;
        use WorkoutType::*;

        let competitions = HashMap::from([
            (Run10k, vec![Running]),
            (RunHalfMarathon, vec![Running]),
            (RunMarathon, vec![Running]),
            (CompetitionType::Cycling, vec![SportType::Cycling]),
            (CompetitionType::Swimming, vec![SportType::Swimming]),
            (TriathlonSprint, vec![SportType::Swimming, SportType::Cycling, Running]),
            (TriathlonOlympic, vec![SportType::Swimming, SportType::Cycling, Running]),
            (TriathlonIronman, vec![SportType::Swimming, SportType::Cycling, Running]),
        ]);

        Self {
            running: SportProfile {
                volume_anchors: vec![(0, 120), (250, 180), (500, 300), (750, 420), (1000, 600)],
                frequency: ScaledRange::new(3, 6),
                endurance_minutes: ScaledRange::new(45, 120),
                interval_minutes: ScaledRange::new(30, 60),
                recovery_minutes: ScaledRange::new(20, 45),
            },
            cycling: SportProfile {
                volume_anchors: vec![(0, 180), (250, 300), (500, 480), (750, 720), (1000, 1080)],
                frequency: ScaledRange::new(3, 5),
                endurance_minutes: ScaledRange::new(60, 180),
                interval_minutes: ScaledRange::new(45, 90),
                recovery_minutes: ScaledRange::new(30, 60),
            },
            swimming: SportProfile {
                volume_anchors: vec![(0, 90), (250, 120), (500, 180), (750, 240), (1000, 360)],
                frequency: ScaledRange::new(3, 6),
                endurance_minutes: ScaledRange::new(30, 90),
                interval_minutes: ScaledRange::new(30, 60),
                recovery_minutes: ScaledRange::new(20, 40),
            },
            base_mix: vec![(Endurance, 0.70), (Recovery, 0.25), (Interval, 0.05)],
            build_mix: vec![(Endurance, 0.50), (Interval, 0.35), (Recovery, 0.15)],
            peak_mix: vec![(Interval, 0.50), (Endurance, 0.30), (Recovery, 0.20)],
            taper_mix: vec![(Recovery, 0.60), (Interval, 0.25), (Endurance, 0.15)],
            competitions,
        }
    }
}

impl TrainingTables {
    pub fn sport_profile(&self, sport: SportType) -> &SportProfile {
        match sport {
            SportType::Running => &self.running,
            SportType::Cycling => &self.cycling,
            SportType::Swimming => &self.swimming,
        }
    }

    /// Sports trained for a competition, primary sport first.
    ///
    /// Triathlons return swimming, cycling, running in race order.
    pub fn sports_for_competition(&self, competition: CompetitionType) -> Option<&[SportType]> {
        self.competitions
            .get(&competition)
            .map(Vec::as_slice)
            .filter(|sports| !sports.is_empty())
    }

    /// Weekly training minutes, linearly interpolated between anchors and
    /// truncated. Complexity outside the anchor range clamps to the end anchor.
    pub fn weekly_volume_minutes(&self, sport: SportType, complexity: i32) -> u32 {
        let anchors = &self.sport_profile(sport).volume_anchors;
        let (Some(&(first_c, first_v)), Some(&(last_c, last_v))) = (anchors.first(), anchors.last())
        else {
            return 0;
        };

        if complexity <= first_c {
            return first_v;
        }
        if complexity >= last_c {
            return last_v;
        }

        for pair in anchors.windows(2) {
            let (c_low, v_low) = pair[0];
            let (c_high, v_high) = pair[1];
            if complexity >= c_low && complexity <= c_high {
                let ratio = f64::from(complexity - c_low) / f64::from(c_high - c_low);
                let volume = f64::from(v_low) + (f64::from(v_high) - f64::from(v_low)) * ratio;
                return volume as u32;
            }
        }

        last_v
    }

    /// Workout type fractions for a phase.
    pub fn workout_type_mix(&self, phase: TrainingPhase) -> &[(WorkoutType, f64)] {
        match phase {
            TrainingPhase::Base => &self.base_mix,
            TrainingPhase::Build => &self.build_mix,
            TrainingPhase::Peak => &self.peak_mix,
            TrainingPhase::Taper => &self.taper_mix,
        }
    }

    /// Sessions per week, rounded and clamped to the sport's range.
    pub fn weekly_frequency(&self, sport: SportType, complexity: i32) -> u32 {
        let range = self.sport_profile(sport).frequency;
        let frequency = range.scale(complexity).round().max(0.0) as u32;
        frequency.clamp(range.min, range.max)
    }

    /// Typical single-session duration for a workout type.
    pub fn workout_duration(
        &self,
        workout_type: WorkoutType,
        sport: SportType,
        complexity: i32,
    ) -> u32 {
        let range = self.sport_profile(sport).duration_range(workout_type);
        range.scale(complexity).round().max(0.0) as u32
    }

    /// Break a week's volume into concrete sessions.
    ///
    /// With several sports the volume is split evenly and each sport trains
    /// half as often as it would on its own (never less than twice).
    pub fn distribute_weekly_workouts(
        &self,
        sports: &[SportType],
        weekly_volume_minutes: u32,
        phase: TrainingPhase,
        complexity: i32,
    ) -> Vec<WorkoutItem> {
        let mix = self.workout_type_mix(phase);
        let mut items = Vec::new();

        match sports {
            [] => {}
            [sport] => {
                let frequency = self.weekly_frequency(*sport, complexity);
                push_sport_items(&mut items, *sport, weekly_volume_minutes, frequency, mix);
            }
            _ => {
                let volume_per_sport = weekly_volume_minutes / sports.len() as u32;
                for &sport in sports {
                    let frequency = (self.weekly_frequency(sport, complexity) / 2)
                        .max(MIN_MULTISPORT_FREQUENCY);
                    push_sport_items(&mut items, sport, volume_per_sport, frequency, mix);
                }
            }
        }

        items
    }
}

/// Periodization phase for the number of weeks left before the event.
pub fn training_phase(weeks_remaining: i64) -> TrainingPhase {
    match weeks_remaining {
        i64::MIN..=2 => TrainingPhase::Taper,
        3..=4 => TrainingPhase::Peak,
        5..=8 => TrainingPhase::Build,
        _ => TrainingPhase::Base,
    }
}

fn push_sport_items(
    items: &mut Vec<WorkoutItem>,
    sport: SportType,
    volume: u32,
    frequency: u32,
    mix: &[(WorkoutType, f64)],
) {
    for &(workout_type, fraction) in mix {
        // Halves round up (2.5 -> 3), not to even
        let count = ((f64::from(frequency) * fraction).round() as u32).max(1);
        let type_volume = (f64::from(volume) * fraction) as u32;
        let duration_minutes = (type_volume / count).max(MIN_WORKOUT_MINUTES);

        items.extend((0..count).map(|_| WorkoutItem {
            sport,
            workout_type,
            duration_minutes,
        }));
    }
}
