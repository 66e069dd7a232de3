//! Clamped bilinear 2D interpolation for surfaces.

use crate::types::InterpolationError;
use num_traits::Float;

/// Bilinear interpolator for 2D grid data with flat extrapolation.
///
/// Stores a grid `zs[i][j] = z(xs[i], ys[j])` and blends the four corners
/// of the cell containing the query. Queries outside the grid are clamped
/// to the boundary before lookup, so the interpolator never fails once
/// constructed.
///
/// Cell selection per axis: the upper index is the first grid value
/// `>= q` (capped at the last index) and the lower index is one below it
/// (floored at 0). When both indices coincide the weight on that axis is
/// zero, which also makes single-point axes valid.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::BilinearInterpolator;
///
/// let xs = [1.0_f64, 2.0];
/// let ys = [5.0, 10.0];
/// let zs = [&[0.0040, 0.0050][..], &[0.0060, 0.0070][..]];
///
/// let interp = BilinearInterpolator::new(&xs, &ys, &zs).unwrap();
/// assert!((interp.interpolate(1.5, 7.5) - 0.0055).abs() < 1e-12);
/// // Clamped to the (2.0, 10.0) corner
/// assert!((interp.interpolate(30.0, 30.0) - 0.0070).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BilinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    /// zs[i][j] = z(xs[i], ys[j])
    zs: Vec<Vec<T>>,
}

impl<T: Float> BilinearInterpolator<T> {
    /// Construct a bilinear interpolator from grid data.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - An axis is empty
    /// * `NonMonotonicData` - An axis is not strictly increasing
    /// * `InvalidInput` - Grid dimensions don't match axis lengths, or a
    ///   value is not finite
    pub fn new(xs: &[T], ys: &[T], zs: &[&[T]]) -> Result<Self, InterpolationError> {
        for axis in [xs, ys] {
            if axis.is_empty() {
                return Err(InterpolationError::InsufficientData { got: 0, need: 1 });
            }
            if let Some(index) = axis.windows(2).position(|w| !(w[1] > w[0])) {
                return Err(InterpolationError::NonMonotonicData { index: index + 1 });
            }
        }

        if zs.len() != xs.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "Grid rows ({}) must match x-axis length ({})",
                zs.len(),
                xs.len()
            )));
        }

        for (i, row) in zs.iter().enumerate() {
            if row.len() != ys.len() {
                return Err(InterpolationError::InvalidInput(format!(
                    "Grid row {} length ({}) must match y-axis length ({})",
                    i,
                    row.len(),
                    ys.len()
                )));
            }
            if let Some(j) = row.iter().position(|z| !z.is_finite()) {
                return Err(InterpolationError::InvalidInput(format!(
                    "Grid value at ({}, {}) is not finite",
                    i, j
                )));
            }
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            zs: zs.iter().map(|row| row.to_vec()).collect(),
        })
    }

    /// Interpolate value at point (x, y), clamping to the grid domain.
    pub fn interpolate(&self, x: T, y: T) -> T {
        let (i0, i1, wx) = Self::bracket(&self.xs, x);
        let (j0, j1, wy) = Self::bracket(&self.ys, y);

        let one = T::one();
        let lower = (one - wx) * self.zs[i0][j0] + wx * self.zs[i1][j0];
        let upper = (one - wx) * self.zs[i0][j1] + wx * self.zs[i1][j1];
        (one - wy) * lower + wy * upper
    }

    /// Lower index, upper index and weight of the upper node for `q`.
    fn bracket(axis: &[T], q: T) -> (usize, usize, T) {
        let last = axis.len() - 1;
        let q = q.max(axis[0]).min(axis[last]);
        let hi = axis.partition_point(|&v| v < q).min(last);
        let lo = hi.saturating_sub(1);
        let w = if axis[hi] == axis[lo] {
            T::zero()
        } else {
            (q - axis[lo]) / (axis[hi] - axis[lo])
        };
        (lo, hi, w)
    }

    /// Return the grid domain for x.
    #[inline]
    pub fn domain_x(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Return the grid domain for y.
    #[inline]
    pub fn domain_y(&self) -> (T, T) {
        (self.ys[0], self.ys[self.ys.len() - 1])
    }

    /// Returns a reference to the x-axis coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns a reference to the y-axis coordinates.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns a reference to the grid values.
    #[inline]
    pub fn zs(&self) -> &[Vec<T>] {
        &self.zs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid() -> BilinearInterpolator<f64> {
        let xs = [0.25, 1.0, 5.0];
        let ys = [1.0, 5.0, 10.0];
        let zs = [
            &[0.0060, 0.0065, 0.0070][..],
            &[0.0055, 0.0060, 0.0062][..],
            &[0.0050, 0.0052, 0.0054][..],
        ];
        BilinearInterpolator::new(&xs, &ys, &zs).unwrap()
    }

    #[test]
    fn test_exact_on_grid_points() {
        let interp = grid();
        for (i, &x) in interp.xs().to_vec().iter().enumerate() {
            for (j, &y) in interp.ys().to_vec().iter().enumerate() {
                assert_relative_eq!(interp.interpolate(x, y), interp.zs()[i][j], epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_midpoint_blend() {
        let interp = grid();
        // Midpoint of cell [1, 5] x [5, 10]
        let z = interp.interpolate(3.0, 7.5);
        let expected = 0.25 * (0.0060 + 0.0062 + 0.0052 + 0.0054);
        assert_relative_eq!(z, expected, epsilon = 1e-15);
    }

    #[test]
    fn test_clamped_outside_domain() {
        let interp = grid();
        assert_relative_eq!(interp.interpolate(0.0, 0.0), 0.0060, epsilon = 1e-15);
        assert_relative_eq!(interp.interpolate(50.0, 50.0), 0.0054, epsilon = 1e-15);
        // Clamped on x only
        assert_relative_eq!(
            interp.interpolate(50.0, 7.5),
            interp.interpolate(5.0, 7.5),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_single_point_axes() {
        let interp = BilinearInterpolator::new(&[2.0], &[5.0], &[&[0.0048][..]]).unwrap();
        assert_relative_eq!(interp.interpolate(0.1, 30.0), 0.0048, epsilon = 1e-15);
    }

    #[test]
    fn test_single_row_interpolates_along_y() {
        let interp = BilinearInterpolator::new(&[1.0], &[1.0, 3.0], &[&[1.0, 3.0][..]]).unwrap();
        assert_relative_eq!(interp.interpolate(7.0, 2.0), 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_new_rejects_empty_axis() {
        let result = BilinearInterpolator::<f64>::new(&[], &[1.0], &[]);
        assert!(matches!(
            result,
            Err(InterpolationError::InsufficientData { got: 0, need: 1 })
        ));
    }

    #[test]
    fn test_new_rejects_non_increasing_axis() {
        let zs = [&[1.0, 2.0][..], &[3.0, 4.0][..]];
        let result = BilinearInterpolator::new(&[1.0, 1.0], &[1.0, 2.0], &zs);
        assert!(matches!(
            result,
            Err(InterpolationError::NonMonotonicData { index: 1 })
        ));
    }

    #[test]
    fn test_new_rejects_shape_mismatch() {
        let zs = [&[1.0, 2.0][..]];
        let result = BilinearInterpolator::new(&[1.0, 2.0], &[1.0, 2.0], &zs);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));

        let zs = [&[1.0][..], &[2.0][..]];
        let result = BilinearInterpolator::new(&[1.0, 2.0], &[1.0, 2.0], &zs);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }

    #[test]
    fn test_new_rejects_nan() {
        let zs = [&[1.0, f64::NAN][..]];
        let result = BilinearInterpolator::new(&[1.0], &[1.0, 2.0], &zs);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_value_within_corner_range(x in -5.0f64..40.0, y in -5.0f64..40.0) {
                let interp = grid();
                let z = interp.interpolate(x, y);
                prop_assert!((0.0050 - 1e-15..=0.0070 + 1e-15).contains(&z));
            }

            #[test]
            fn test_clamping_equals_boundary(x in 5.0f64..100.0, y in 10.0f64..100.0) {
                let interp = grid();
                prop_assert!((interp.interpolate(x, y) - 0.0054).abs() < 1e-15);
            }
        }
    }
}
