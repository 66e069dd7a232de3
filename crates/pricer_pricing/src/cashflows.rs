//! Underlying swap cashflows as seen from one exercise date.

use pricer_core::market_data::DiscountCurve;
use pricer_core::types::Date;
use pricer_models::instruments::rates::OisSwap;
use pricer_models::models::HullWhiteParams;

use crate::error::EngineError;

/// One accrual period in curve time with its initial discount factors.
#[derive(Debug, Clone, Copy)]
struct Coupon {
    start: f64,
    end: f64,
    payment: f64,
    df_start: f64,
    df_end: f64,
    df_payment: f64,
    fixed_amount: f64,
}

/// The part of a swap entered by exercising at a given date: every period
/// whose accrual starts on or after that date.
#[derive(Debug, Clone)]
pub struct ExerciseCashflows {
    time: f64,
    df_time: f64,
    notional: f64,
    sign: f64,
    coupons: Vec<Coupon>,
}

impl ExerciseCashflows {
    /// Collects the periods of `swap` entered on `exercise_date`.
    pub fn new(
        swap: &OisSwap,
        exercise_date: Date,
        curve: &DiscountCurve,
    ) -> Result<Self, EngineError> {
        let mut coupons = Vec::new();
        for period in swap.periods().iter().filter(|p| p.start() >= exercise_date) {
            coupons.push(Coupon {
                start: curve.time(period.start()),
                end: curve.time(period.end()),
                payment: curve.time(period.payment()),
                df_start: curve.discount(period.start())?,
                df_end: curve.discount(period.end())?,
                df_payment: curve.discount(period.payment())?,
                fixed_amount: swap.notional() * swap.fixed_rate() * period.year_fraction(),
            });
        }
        Ok(Self {
            time: curve.time(exercise_date),
            df_time: curve.discount(exercise_date)?,
            notional: swap.notional(),
            sign: swap.direction().fixed_multiplier(),
            coupons,
        })
    }

    /// Curve time of the exercise date.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Initial discount factor to the exercise date.
    #[inline]
    pub fn discount(&self) -> f64 {
        self.df_time
    }

    /// True when no period starts on or after the exercise date.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }

    /// Value of the entered swap at the exercise time given factor `x`,
    /// from the holder's side.
    pub fn swap_value(&self, params: &HullWhiteParams, x: f64) -> f64 {
        let t = self.time;
        let bond = |maturity: f64, df: f64| {
            params.zero_bond_from_discounts(self.df_time, df, t, maturity, x)
        };
        self.coupons
            .iter()
            .map(|c| {
                let p_pay = bond(c.payment, c.df_payment);
                let growth = bond(c.start, c.df_start) / bond(c.end, c.df_end);
                let floating = self.notional * (growth - 1.0) * p_pay;
                self.sign * (c.fixed_amount * p_pay - floating)
            })
            .sum()
    }

    /// Intrinsic exercise value, `max(swap_value, 0)`.
    #[inline]
    pub fn payoff(&self, params: &HullWhiteParams, x: f64) -> f64 {
        self.swap_value(params, x).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::CurveNode;
    use pricer_core::types::{Calendar, DayCountConvention};
    use pricer_models::instruments::rates::{price_ois, SwapDirection};
    use pricer_models::schedules::{Frequency, ScheduleBuilder};

    fn curve() -> DiscountCurve {
        let val = Date::from_ymd(2025, 1, 15).unwrap();
        let dc = DayCountConvention::Actual365Fixed;
        let nodes: Vec<CurveNode> = (1..=15)
            .map(|y| {
                let date = val.add_months(12 * y).unwrap();
                CurveNode::new(date, (-0.03 * dc.year_fraction(val, date)).exp())
            })
            .collect();
        DiscountCurve::new(val, &nodes, dc).unwrap()
    }

    fn swap(direction: SwapDirection) -> OisSwap {
        let schedule = ScheduleBuilder::new()
            .start(Date::from_ymd(2027, 1, 15).unwrap())
            .end(Date::from_ymd(2030, 1, 15).unwrap())
            .frequency(Frequency::SemiAnnual)
            .calendar(Calendar::WeekendsOnly)
            .build()
            .unwrap();
        OisSwap::new(1e7, 0.031, direction, schedule, 2).unwrap()
    }

    #[test]
    fn test_tiny_volatility_matches_forward_swap_value() {
        // With σ → 0 the value at x = 0 is the forward value P(0,t)⁻¹·NPV
        let curve = curve();
        let params = HullWhiteParams::new(0.03, 1e-10).unwrap();
        let swap = swap(SwapDirection::Receiver);
        let ex = Date::from_ymd(2027, 1, 15).unwrap();
        let flows = ExerciseCashflows::new(&swap, ex, &curve).unwrap();
        let npv = price_ois(&swap, &curve).unwrap();
        assert_relative_eq!(flows.swap_value(&params, 0.0) * flows.discount(), npv, epsilon = 1e-6);
    }

    #[test]
    fn test_exercise_drops_started_periods() {
        let curve = curve();
        let swap = swap(SwapDirection::Payer);
        let mid = Date::from_ymd(2028, 3, 1).unwrap();
        let flows = ExerciseCashflows::new(&swap, mid, &curve).unwrap();
        assert_eq!(flows.coupons.len(), 3);
        let last = Date::from_ymd(2030, 1, 15).unwrap();
        assert!(ExerciseCashflows::new(&swap, last, &curve).unwrap().is_empty());
    }

    #[test]
    fn test_direction_flips_sign() {
        let curve = curve();
        let params = HullWhiteParams::new(0.03, 0.01).unwrap();
        let ex = Date::from_ymd(2027, 1, 15).unwrap();
        let rec = ExerciseCashflows::new(&swap(SwapDirection::Receiver), ex, &curve).unwrap();
        let pay = ExerciseCashflows::new(&swap(SwapDirection::Payer), ex, &curve).unwrap();
        for x in [-0.02, 0.0, 0.015] {
            assert_relative_eq!(rec.swap_value(&params, x), -pay.swap_value(&params, x), epsilon = 1e-9);
        }
        // Receiver gains when rates fall
        assert!(rec.swap_value(&params, -0.01) > rec.swap_value(&params, 0.01));
    }
}
