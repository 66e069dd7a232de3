//! Dated discount curve with log-linear interpolation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};
use tracing::warn;

/// Largest discount factor accepted without a data-quality warning.
const MAX_PLAUSIBLE_DF: f64 = 1.05;

/// Tolerance on discount factors increasing with maturity.
const MONOTONICITY_TOLERANCE: f64 = 1e-6;

/// A single `(date, discount factor)` observation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveNode {
    /// Pillar date.
    pub date: Date,
    /// Discount factor from the valuation date to `date`.
    pub discount_factor: f64,
}

impl CurveNode {
    /// Create a node.
    pub fn new(date: Date, discount_factor: f64) -> Self {
        Self {
            date,
            discount_factor,
        }
    }
}

/// Discount curve anchored at a valuation date.
///
/// Discount factors are interpolated log-linearly in time (piecewise flat
/// forwards), with an implicit `(valuation_date, 1.0)` node in front. Past
/// the last node the last segment's forward is extrapolated.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveNode, DiscountCurve};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let val = Date::from_ymd(2025, 1, 15).unwrap();
/// let nodes = [
///     CurveNode::new(Date::from_ymd(2026, 1, 15).unwrap(), 0.97),
///     CurveNode::new(Date::from_ymd(2030, 1, 15).unwrap(), 0.86),
/// ];
/// let curve = DiscountCurve::new(val, &nodes, DayCountConvention::Actual365Fixed).unwrap();
///
/// assert_eq!(curve.discount(val).unwrap(), 1.0);
/// assert!((curve.discount(nodes[0].date).unwrap() - 0.97).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountCurve {
    valuation_date: Date,
    day_count: DayCountConvention,
    nodes: Vec<CurveNode>,
    /// Node times including the leading 0.0 anchor
    times: Vec<f64>,
    /// ln(DF) at `times`
    log_dfs: Vec<f64>,
}

impl DiscountCurve {
    /// Validate `nodes` and build the curve.
    ///
    /// Nodes on or before `valuation_date` are discarded, the rest are
    /// sorted by date and duplicates resolved in favour of the last
    /// occurrence. Discount factors above 1.05, or rising with maturity
    /// by more than 1e-6, are accepted with a warning.
    ///
    /// # Errors
    ///
    /// * `NoNodesAfterValuation` - Nothing survives the date filter
    /// * `NonPositiveDiscount` - A surviving node has DF <= 0 or non-finite
    pub fn new(
        valuation_date: Date,
        nodes: &[CurveNode],
        day_count: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        let mut kept: Vec<CurveNode> = nodes
            .iter()
            .filter(|n| n.date > valuation_date)
            .copied()
            .collect();
        kept.sort_by_key(|n| n.date);

        let mut cleaned: Vec<CurveNode> = Vec::with_capacity(kept.len());
        for node in kept {
            match cleaned.last_mut() {
                Some(prev) if prev.date == node.date => *prev = node,
                _ => cleaned.push(node),
            }
        }

        if cleaned.is_empty() {
            return Err(MarketDataError::NoNodesAfterValuation { valuation_date });
        }

        for node in &cleaned {
            if !(node.discount_factor > 0.0) || !node.discount_factor.is_finite() {
                return Err(MarketDataError::NonPositiveDiscount {
                    date: node.date,
                    df: node.discount_factor,
                });
            }
            if node.discount_factor > MAX_PLAUSIBLE_DF {
                warn!(date = %node.date, df = node.discount_factor, "discount factor above 1.05, check curve data");
            }
        }
        for pair in cleaned.windows(2) {
            if pair[1].discount_factor > pair[0].discount_factor + MONOTONICITY_TOLERANCE {
                warn!(
                    from = %pair[0].date,
                    to = %pair[1].date,
                    df_from = pair[0].discount_factor,
                    df_to = pair[1].discount_factor,
                    "non-monotone discount factors"
                );
            }
        }

        Ok(Self::from_validated(valuation_date, cleaned, day_count))
    }

    /// Build from nodes already known to be sorted, unique, positive and
    /// after `valuation_date`.
    fn from_validated(
        valuation_date: Date,
        nodes: Vec<CurveNode>,
        day_count: DayCountConvention,
    ) -> Self {
        let mut times = Vec::with_capacity(nodes.len() + 1);
        let mut log_dfs = Vec::with_capacity(nodes.len() + 1);
        times.push(0.0);
        log_dfs.push(0.0);
        for node in &nodes {
            times.push(day_count.year_fraction(valuation_date, node.date));
            log_dfs.push(node.discount_factor.ln());
        }
        Self {
            valuation_date,
            day_count,
            nodes,
            times,
            log_dfs,
        }
    }

    /// Curve valuation date.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Day count used to turn dates into curve times.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Validated nodes, excluding the valuation date anchor.
    #[inline]
    pub fn nodes(&self) -> &[CurveNode] {
        &self.nodes
    }

    /// Curve time of `date`; negative before the valuation date.
    #[inline]
    pub fn time(&self, date: Date) -> f64 {
        self.day_count.year_fraction(self.valuation_date, date)
    }

    /// Discount factor to `date`.
    pub fn discount(&self, date: Date) -> Result<f64, MarketDataError> {
        self.discount_factor(self.time(date))
    }

    /// Parallel shift of the continuously compounded zero curve.
    ///
    /// Every node becomes `DF * exp(-shift_bp / 1e4 * t)`.
    pub fn bumped(&self, shift_bp: f64) -> Self {
        let shift = shift_bp / 1e4;
        let nodes = self
            .nodes
            .iter()
            .zip(&self.times[1..])
            .map(|(node, &t)| CurveNode::new(node.date, node.discount_factor * (-shift * t).exp()))
            .collect();
        Self::from_validated(self.valuation_date, nodes, self.day_count)
    }

    /// The same curve seen from a later valuation date.
    ///
    /// Nodes on or before `new_valuation_date` are dropped and the rest are
    /// rescaled by `1 / DF(new_valuation_date)`.
    ///
    /// # Errors
    ///
    /// `NoNodesAfterValuation` when the roll passes the last node.
    pub fn rolled(&self, new_valuation_date: Date) -> Result<Self, MarketDataError> {
        let df_new = self.discount(new_valuation_date)?;
        let nodes: Vec<CurveNode> = self
            .nodes
            .iter()
            .filter(|n| n.date > new_valuation_date)
            .map(|n| CurveNode::new(n.date, n.discount_factor / df_new))
            .collect();
        if nodes.is_empty() {
            return Err(MarketDataError::NoNodesAfterValuation {
                valuation_date: new_valuation_date,
            });
        }
        Ok(Self::from_validated(new_valuation_date, nodes, self.day_count))
    }
}

impl YieldCurve<f64> for DiscountCurve {
    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        if !(t >= 0.0) {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        let last = self.times.len() - 1;
        let hi = self.times.partition_point(|&x| x < t).clamp(1, last);
        let lo = hi - 1;
        let (t0, t1) = (self.times[lo], self.times[hi]);
        let (l0, l1) = (self.log_dfs[lo], self.log_dfs[hi]);
        if t1 <= t0 {
            return Ok(l1.exp());
        }
        Ok((l0 + (t - t0) / (t1 - t0) * (l1 - l0)).exp())
    }
}
