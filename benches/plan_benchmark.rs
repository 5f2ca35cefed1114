use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use std::sync::Arc;
use triplan::models::{CompetitionType, PreferredWeekdays};
use triplan::services::{PlanRequest, PlanScheduler, TrainingTables};

fn benchmark_generate(c: &mut Criterion) {
    let scheduler = PlanScheduler::new(Arc::new(TrainingTables::default()));
    let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");

    // A long ironman build is the largest schedule we produce
    let ironman = PlanRequest {
        complexity: 900,
        competition_date: today + chrono::Duration::weeks(40),
        competition_type: CompetitionType::TriathlonIronman,
        competition_distance: None,
        preferred_weekdays: PreferredWeekdays::new(vec![0, 1, 3, 5, 6]).expect("valid weekdays"),
    };

    let marathon = PlanRequest {
        complexity: 500,
        competition_date: today + chrono::Duration::weeks(12),
        competition_type: CompetitionType::RunMarathon,
        competition_distance: None,
        preferred_weekdays: PreferredWeekdays::default(),
    };

    let mut group = c.benchmark_group("plan_generation");

    group.bench_function("ironman_40_weeks", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            scheduler.generate(black_box(&ironman), today, &mut rng)
        })
    });

    group.bench_function("marathon_12_weeks", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            scheduler.generate(black_box(&marathon), today, &mut rng)
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_generate);
criterion_main!(benches);
