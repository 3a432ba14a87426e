use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use tempfile::TempDir;

use bednight::config::{Config, ConfigBuilder};
use bednight::database::{Database, DatabaseConfig};
use bednight::operations::{seed_units, SeedOptions};
use bednight::{
    BookingFinalizer, ConfirmHoldCommand, CreateHoldCommand, ExpirySweeper, HoldManager,
    HoldSelection, NightDate,
};

const BEDS: usize = 20;
const HOLD_COUNTS: &[usize] = &[10, 100, 250];
const NIGHTS_PER_HOLD: &[usize] = &[1, 3, 7];

fn benchmark_config() -> Config {
    ConfigBuilder::new()
        .skip_env()
        .skip_files()
        .build()
        .expect("failed to build benchmark configuration")
}

fn first_night() -> NightDate {
    "2026-01-01".parse().expect("valid night")
}

fn nth_night(n: usize) -> NightDate {
    NightDate::new(first_night().date() + chrono::Days::new(n as u64))
}

fn setup_database(nights: usize) -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("failed to create temporary directory");
    let db_path = temp_dir.path().join("bednight.db");
    let mut db = Database::open(DatabaseConfig::new(&db_path)).expect("failed to open database");
    let beds = (0..BEDS).map(|b| format!("bed-{b}")).collect();
    seed_units(
        &mut db,
        &SeedOptions::new(beds, first_night(), nth_night(nights.max(1) - 1)),
    )
    .expect("failed to seed inventory");
    (temp_dir, db)
}

fn hold_command(config: &Config, index: usize, nights: usize) -> CreateHoldCommand {
    let bed = format!("bed-{}", index % BEDS);
    let offset = (index / BEDS) * nights;
    let created_at = 0;
    CreateHoldCommand::new(
        format!("hold-{index}"),
        "club",
        format!("member-{index}"),
        created_at,
        config.hold_expiry(created_at),
    )
    .with_selections((0..nights).map(|n| {
        HoldSelection::new(&bed, nth_night(offset + n), format!("guest-{index}"))
            .expect("valid selection")
    }))
}

fn bench_create_hold(c: &mut Criterion) {
    let config = benchmark_config();
    let mut group = c.benchmark_group("create_hold");

    for &nights in NIGHTS_PER_HOLD {
        group.bench_with_input(BenchmarkId::from_parameter(nights), &nights, |b, &nights| {
            b.iter_batched(
                || setup_database(nights),
                |(temp_dir, mut db)| {
                    let _temp_dir = temp_dir;
                    let command = hold_command(&config, 0, nights);
                    black_box(HoldManager::create_hold(&mut db, &command).expect("create failed"));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_hold_then_confirm(c: &mut Criterion) {
    let config = benchmark_config();
    let mut group = c.benchmark_group("hold_then_confirm");

    for &count in HOLD_COUNTS {
        let nights = count.div_ceil(BEDS);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || setup_database(nights),
                |(temp_dir, mut db)| {
                    let _temp_dir = temp_dir;
                    for index in 0..count {
                        let command = hold_command(&config, index, 1);
                        HoldManager::create_hold(&mut db, &command).expect("create failed");
                        let confirm = ConfirmHoldCommand::new(
                            command.hold_id.clone(),
                            format!("booking-{index}"),
                            10_000,
                            1_000,
                        );
                        black_box(
                            BookingFinalizer::confirm_hold(&mut db, &confirm)
                                .expect("confirm failed"),
                        );
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let config = benchmark_config();
    let mut group = c.benchmark_group("sweep");

    for &count in HOLD_COUNTS {
        let nights = count.div_ceil(BEDS);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || {
                    let (temp_dir, mut db) = setup_database(nights);
                    for index in 0..count {
                        HoldManager::create_hold(&mut db, &hold_command(&config, index, 1))
                            .expect("create failed");
                    }
                    (temp_dir, db)
                },
                |(temp_dir, mut db)| {
                    let _temp_dir = temp_dir;
                    let as_of = config.hold_expiry(0);
                    black_box(ExpirySweeper::sweep(&mut db, as_of, false).expect("sweep failed"));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    lifecycle_bench,
    bench_create_hold,
    bench_hold_then_confirm,
    bench_sweep
);
criterion_main!(lifecycle_bench);
