//! Criterion benchmarks for the finite-difference swaption engine.
//!
//! A calibration pass prices one European per exercise date many times, and
//! every Greek reprices the Bermudan, so both shapes are measured across
//! grid sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::{CurveNode, DiscountCurve};
use pricer_core::types::{Date, DayCountConvention};
use pricer_models::instruments::rates::{OisSwap, SwapDirection, Swaption};
use pricer_models::instruments::Exercise;
use pricer_models::models::HullWhiteParams;
use pricer_models::schedules::{Frequency, ScheduleBuilder};
use pricer_pricing::fd::{FdConfig, FdHullWhiteSwaptionEngine};
use pricer_pricing::SwaptionEngine;

fn curve() -> DiscountCurve {
    let val = Date::from_ymd(2025, 3, 17).unwrap();
    let dc = DayCountConvention::Actual365Fixed;
    let nodes: Vec<CurveNode> = (1..=60)
        .map(|q| {
            let date = val.add_months(3 * q).unwrap();
            CurveNode::new(date, (-0.03 * dc.year_fraction(val, date)).exp())
        })
        .collect();
    DiscountCurve::new(val, &nodes, dc).unwrap()
}

fn swaption(bermudan: bool) -> Swaption {
    let schedule = ScheduleBuilder::new()
        .start(Date::from_ymd(2030, 3, 19).unwrap())
        .end(Date::from_ymd(2035, 3, 19).unwrap())
        .frequency(Frequency::SemiAnnual)
        .build()
        .unwrap();
    let exercise = if bermudan {
        Exercise::from_schedule(&schedule, schedule.start_date()).unwrap()
    } else {
        Exercise::European(schedule.start_date())
    };
    let swap = OisSwap::new(1e7, 0.03, SwapDirection::Receiver, schedule, 2).unwrap();
    Swaption::new(swap, exercise)
}

fn bench_fd_engine(c: &mut Criterion) {
    let curve = curve();
    let params = HullWhiteParams::new(0.03, 0.006).unwrap();
    let mut group = c.benchmark_group("fd_hull_white");
    group.sample_size(20);

    for size in [100, 200, 300] {
        let config = FdConfig::builder().time_steps(size).space_steps(size).build().unwrap();
        let engine = FdHullWhiteSwaptionEngine::new(config).unwrap();
        for (name, instrument) in [("european", swaption(false)), ("bermudan", swaption(true))] {
            group.bench_with_input(BenchmarkId::new(name, size), &instrument, |b, s| {
                b.iter(|| engine.price(black_box(s), &curve, &params).unwrap())
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_fd_engine);
criterion_main!(benches);
