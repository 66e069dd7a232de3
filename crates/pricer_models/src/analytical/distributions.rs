//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! The CDF uses Hart's double precision rational approximation (as
//! published by West, "Better approximations to cumulative normal
//! functions"), with absolute error below 1e-15 over the whole real line.

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631;

/// Beyond this |x| the tail is below f64 resolution.
const TAIL_CUTOFF: f64 = 37.0;

/// Switch point between the rational and continued fraction forms.
const RATIONAL_LIMIT: f64 = 7.071_067_811_865_47;

/// Numerator coefficients, highest degree first.
const HART_NUM: [f64; 7] = [
    0.035_262_496_599_891_1,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

/// Denominator coefficients, highest degree first.
const HART_DEN: [f64; 8] = [
    0.088_388_347_648_318_4,
    1.755_667_163_182_64,
    16.064_177_579_207,
    86.780_732_202_946_1,
    296.564_248_779_674,
    637.333_633_378_831,
    793.826_512_519_948,
    440.413_735_824_752,
];

#[inline]
fn horner(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Standard normal cumulative distribution function.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.0) - 0.841_344_746_068_542_9).abs() < 1e-14);
/// ```
pub fn norm_cdf(x: f64) -> f64 {
    let ax = x.abs();
    let tail = if ax > TAIL_CUTOFF {
        0.0
    } else {
        let e = (-0.5 * ax * ax).exp();
        if ax < RATIONAL_LIMIT {
            let num = horner(&HART_NUM, ax);
            let den = horner(&HART_DEN, ax);
            e * num / den
        } else {
            let cf = ax + 1.0 / (ax + 2.0 / (ax + 3.0 / (ax + 4.0 / (ax + 0.65))));
            e / cf / SQRT_2PI
        }
    };
    if x > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Standard normal probability density function, `exp(-x²/2) / sqrt(2π)`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0) - 0.398_942_280_401_432_7).abs() < 1e-16);
/// ```
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}
