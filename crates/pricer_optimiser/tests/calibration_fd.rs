//! Calibration against the finite-difference engine.
//!
//! A coarse grid keeps the repeated oracle calls cheap; the properties
//! checked here do not depend on grid accuracy.

use approx::assert_relative_eq;
use pricer_core::market_data::{AtmNormalVolSurface, CurveNode, DiscountCurve};
use pricer_core::types::{Date, DayCountConvention};
use pricer_models::instruments::rates::{OisSwap, SwapDirection, Swaption};
use pricer_models::instruments::Exercise;
use pricer_models::models::HullWhiteParams;
use pricer_models::schedules::{Frequency, ScheduleBuilder};
use pricer_optimiser::basket::BasketBuilder;
use pricer_optimiser::calibration::{CalibrationConfig, CalibrationEngine, CalibrationMethod};
use pricer_pricing::fd::{FdConfig, FdHullWhiteSwaptionEngine};
use pricer_pricing::SwaptionEngine;

fn curve() -> DiscountCurve {
    let val = Date::from_ymd(2025, 3, 17).unwrap();
    let dc = DayCountConvention::Actual365Fixed;
    let nodes: Vec<CurveNode> = (1..=48)
        .map(|q| {
            let date = val.add_months(3 * q).unwrap();
            CurveNode::new(date, (-0.03 * dc.year_fraction(val, date)).exp())
        })
        .collect();
    DiscountCurve::new(val, &nodes, dc).unwrap()
}

fn bermudan(strike: f64) -> Swaption {
    let schedule = ScheduleBuilder::new()
        .start(Date::from_ymd(2030, 3, 19).unwrap())
        .end(Date::from_ymd(2035, 3, 19).unwrap())
        .frequency(Frequency::SemiAnnual)
        .build()
        .unwrap();
    let exercise = Exercise::from_schedule(&schedule, schedule.start_date()).unwrap();
    let swap = OisSwap::new(1e7, strike, SwapDirection::Receiver, schedule, 2).unwrap();
    Swaption::new(swap, exercise)
}

fn coarse_engine() -> FdHullWhiteSwaptionEngine {
    FdHullWhiteSwaptionEngine::new(
        FdConfig::builder()
            .time_steps(80)
            .space_steps(81)
            .build()
            .unwrap(),
    )
    .unwrap()
}

#[test]
fn test_atm_fit_matches_flat_surface() {
    let curve = curve();
    let surface = AtmNormalVolSurface::flat(0.0050).unwrap();
    let basket = BasketBuilder::new(&curve, &surface)
        .build(&bermudan(0.03))
        .unwrap();
    let engine = coarse_engine();
    let calibrator = CalibrationEngine::new(&engine, CalibrationConfig::default()).unwrap();

    let result = calibrator.fit_atm(&basket, &curve, 0.03).unwrap();
    assert_eq!(result.method, CalibrationMethod::Atm);
    // Hull-White normal vol decays with expiry, so σ sits above the quoted vol
    assert!(
        result.volatility() > 0.0050 && result.volatility() < 0.0065,
        "σ = {}",
        result.volatility()
    );

    // Each European reprices within a few percent of its Bachelier price
    for entry in &basket {
        let model = engine.price(&entry.swaption, &curve, &result.params).unwrap();
        assert_relative_eq!(model, entry.market_price, max_relative = 0.05);
    }
}

#[test]
fn test_higher_surface_gives_higher_sigma() {
    let curve = curve();
    let swaption = bermudan(0.03);
    let engine = coarse_engine();
    let calibrator = CalibrationEngine::new(&engine, CalibrationConfig::default()).unwrap();

    let surface = AtmNormalVolSurface::flat(0.0050).unwrap();
    let base = BasketBuilder::new(&curve, &surface).build(&swaption).unwrap();
    let bumped = BasketBuilder::new(&curve, &surface)
        .vol_shift_bp(5.0)
        .build(&swaption)
        .unwrap();

    let sigma_base = calibrator.fit_atm(&base, &curve, 0.03).unwrap().volatility();
    let sigma_bumped = calibrator.fit_atm(&bumped, &curve, 0.03).unwrap().volatility();
    assert!(sigma_bumped > sigma_base);
}

#[test]
fn test_inverse_fit_reproduces_bermudan_target() {
    let curve = curve();
    let swaption = bermudan(0.03);
    let engine = coarse_engine();
    let calibrator = CalibrationEngine::new(&engine, CalibrationConfig::default()).unwrap();

    let truth = HullWhiteParams::new(0.03, 0.0068).unwrap();
    let target = engine.price(&swaption, &curve, &truth).unwrap();

    let result = calibrator.fit_inverse(&swaption, &curve, 0.03, target).unwrap();
    assert_eq!(result.method, CalibrationMethod::Inverse);
    assert_relative_eq!(result.volatility(), 0.0068, max_relative = 1e-6);

    let repriced = engine.price(&swaption, &curve, &result.params).unwrap();
    assert_relative_eq!(repriced, target, max_relative = 1e-8);
}
