//! Criterion benchmarks for the per-frame and per-save hot paths.
//!
//! The repeat update runs once per rendered frame; config serialization runs
//! on every persisted settings change.
//!
//! Run with:
//! ```bash
//! cargo bench --package retro-core --bench core_bench
//! ```

use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use retro_core::{ConfigGroup, ConfigOption, ConfigStore, FloatRect, KeyMask, RepeatController};

fn bench_repeat_update(c: &mut Criterion) {
    let start = Instant::now();
    let mut ctrl = RepeatController::starting_at(200, start);
    let mut frame = 0u32;

    c.bench_function("repeat_update_held_key", |b| {
        b.iter(|| {
            frame = frame.wrapping_add(1);
            let now = start + Duration::from_millis(u64::from(frame % 8_000));
            black_box(ctrl.update_at(black_box(KeyMask::DOWN), now))
        })
    });
}

fn bench_config_serialize(c: &mut Criterion) {
    let mut main = ConfigGroup::new("main");
    for option in [
        ConfigOption::new("data_path", "/cd/RD"),
        ConfigOption::new("filer_last_path", "/cd/games"),
        ConfigOption::new("screen_size", FloatRect::new(0.0, 0.0, 640.0, 480.0)),
        ConfigOption::new("input_delay", 200),
    ] {
        main.add_option(option).expect("unique keys");
    }
    let mut store = ConfigStore::new("BenchConfig", std::env::temp_dir().join("unused.toml"));
    store.define_group(main).expect("unique group");

    c.bench_function("config_to_toml_string", |b| {
        b.iter(|| black_box(store.to_toml_string().expect("serialize")))
    });
}

criterion_group!(benches, bench_repeat_update, bench_config_serialize);
criterion_main!(benches);
