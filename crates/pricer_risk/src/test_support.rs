//! Fixtures shared by the unit tests.

use pricer_core::market_data::{AtmNormalVolSurface, CurveNode, DiscountCurve};
use pricer_core::types::{Calendar, Date, DayCountConvention};
use pricer_models::analytical::Bachelier;
use pricer_models::instruments::rates::{OisSwap, SwapDirection, Swaption};
use pricer_models::instruments::Exercise;
use pricer_models::models::HullWhiteParams;
use pricer_models::schedules::{Frequency, ScheduleBuilder};
use pricer_pricing::{EngineError, SwaptionEngine};

/// Bermudan value as the best live European, each priced with Bachelier at
/// normal vol `σ·√((1 − e^{−2aT})/(2aT))`.
pub struct MaxEuropeanOracle;

impl SwaptionEngine for MaxEuropeanOracle {
    fn price(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        params: &HullWhiteParams,
    ) -> Result<f64, EngineError> {
        let Some(live) = swaption.live_after(curve.valuation_date()) else {
            return Ok(0.0);
        };
        let swap = live.underlying();
        let mut best = 0.0_f64;
        for &exercise in live.exercise().dates() {
            let mut annuity = 0.0;
            let mut floating = 0.0;
            for p in swap.periods().iter().filter(|p| p.start() >= exercise) {
                let df = curve.discount(p.payment())?;
                annuity += p.year_fraction() * df;
                floating += (curve.discount(p.start())? / curve.discount(p.end())? - 1.0) * df;
            }
            if annuity <= 0.0 {
                continue;
            }
            let expiry = curve.time(exercise);
            let two_at = 2.0 * params.mean_reversion() * expiry;
            let vol = params.volatility() * (-(-two_at).exp_m1() / two_at).sqrt();
            let model = Bachelier::new(floating / annuity, vol)
                .map_err(|_| EngineError::NonFinite(vol))?;
            let notional_annuity = swap.notional() * annuity;
            let value = match swap.direction() {
                SwapDirection::Receiver => {
                    model.receiver_swaption(swap.fixed_rate(), expiry, notional_annuity)
                }
                SwapDirection::Payer => {
                    model.payer_swaption(swap.fixed_rate(), expiry, notional_annuity)
                }
            };
            best = best.max(value);
        }
        Ok(best)
    }
}

/// [`MaxEuropeanOracle`] that refuses any curve other than the one it was
/// built for, detected by the discount factor at `date`.
pub struct UnbumpedCurveOracle {
    pub date: Date,
    pub discount: f64,
}

impl UnbumpedCurveOracle {
    pub fn for_curve(curve: &DiscountCurve) -> Self {
        let date = d(2032, 1, 15);
        Self {
            date,
            discount: curve.discount(date).unwrap(),
        }
    }
}

impl SwaptionEngine for UnbumpedCurveOracle {
    fn price(
        &self,
        swaption: &Swaption,
        curve: &DiscountCurve,
        params: &HullWhiteParams,
    ) -> Result<f64, EngineError> {
        let df = curve.discount(self.date)?;
        if (df - self.discount).abs() > 1e-12 {
            return Err(EngineError::NonFinite(df));
        }
        MaxEuropeanOracle.price(swaption, curve, params)
    }
}

pub fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

pub fn flat_curve(val: Date, rate: f64) -> DiscountCurve {
    let dc = DayCountConvention::Actual365Fixed;
    let nodes: Vec<CurveNode> = (1..=80)
        .map(|q| {
            let date = val.add_months(3 * q).unwrap();
            CurveNode::new(date, (-rate * dc.year_fraction(val, date)).exp())
        })
        .collect();
    DiscountCurve::new(val, &nodes, dc).unwrap()
}

pub fn flat_surface() -> AtmNormalVolSurface {
    AtmNormalVolSurface::flat(0.0050).unwrap()
}

/// Vols falling with expiry: 70bp at 1y, 55bp at 5y, 45bp at 10y.
pub fn sloped_surface() -> AtmNormalVolSurface {
    AtmNormalVolSurface::new(
        vec![1.0, 5.0, 10.0],
        vec![1.0, 10.0],
        vec![vec![0.0070, 0.0070], vec![0.0055, 0.0055], vec![0.0045, 0.0045]],
    )
    .unwrap()
}

/// 5y-into-5y semi-annual Bermudan on 10MM, exercisable on every accrual
/// date but the last.
pub fn bermudan(direction: SwapDirection, strike: f64) -> Swaption {
    let schedule = ScheduleBuilder::new()
        .start(d(2030, 1, 15))
        .end(d(2035, 1, 15))
        .frequency(Frequency::SemiAnnual)
        .calendar(Calendar::NullCalendar)
        .build()
        .unwrap();
    let exercise = Exercise::from_schedule(&schedule, schedule.start_date()).unwrap();
    let swap = OisSwap::new(1e7, strike, direction, schedule, 0).unwrap();
    Swaption::new(swap, exercise)
}
