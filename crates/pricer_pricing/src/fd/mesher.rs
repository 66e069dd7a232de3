//! Time and space grids.

/// Exercise times closer than this are treated as one grid time.
pub(crate) const TIME_EPS: f64 = 1e-10;

/// Smallest half-width of the space grid.
const MIN_HALF_WIDTH: f64 = 1e-6;

/// Ascending time grid from 0 to the last mandatory time.
///
/// Every mandatory time is a grid point; each interval between consecutive
/// mandatory times gets at least one step and roughly `horizon / steps`
/// spacing.
pub fn time_grid(mandatory: &[f64], steps: usize) -> Vec<f64> {
    let mut stops: Vec<f64> = mandatory.iter().copied().filter(|t| *t > TIME_EPS).collect();
    stops.sort_by(|a, b| a.total_cmp(b));
    stops.dedup_by(|a, b| (*a - *b).abs() < TIME_EPS);

    let mut grid = vec![0.0];
    let Some(&horizon) = stops.last() else {
        return grid;
    };
    let dt = horizon / steps.max(1) as f64;
    let mut from = 0.0;
    for stop in stops {
        let n = (((stop - from) / dt) - 1e-9).ceil().max(1.0) as usize;
        let h = (stop - from) / n as f64;
        grid.extend((1..n).map(|i| from + i as f64 * h));
        grid.push(stop);
        from = stop;
    }
    grid
}

/// Uniform grid on `[-w, w]` with `points` nodes, `w` at least
/// `MIN_HALF_WIDTH`. With an odd count the middle node is exactly 0.
pub fn space_grid(half_width: f64, points: usize) -> Vec<f64> {
    let w = half_width.max(MIN_HALF_WIDTH);
    let dx = 2.0 * w / (points - 1) as f64;
    let mid = (points / 2) as f64;
    (0..points).map(|i| (i as f64 - mid) * dx).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_time_grid_contains_mandatory_times() {
        let grid = time_grid(&[5.0, 5.5, 6.0, 5.5], 100);
        assert_eq!(grid[0], 0.0);
        assert_eq!(*grid.last().unwrap(), 6.0);
        for t in [5.0, 5.5, 6.0] {
            assert!(grid.iter().any(|g| *g == t));
        }
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
        // 5y at 0.06 spacing is 84 steps, then 9 and 9
        assert_eq!(grid.len(), 1 + 84 + 9 + 9);
    }

    #[test]
    fn test_time_grid_without_future_times() {
        assert_eq!(time_grid(&[0.0], 50), vec![0.0]);
        assert_eq!(time_grid(&[], 50), vec![0.0]);
    }

    #[test]
    fn test_space_grid_symmetric_with_zero_centre() {
        let xs = space_grid(0.03, 301);
        assert_eq!(xs.len(), 301);
        assert_eq!(xs[150], 0.0);
        assert_relative_eq!(xs[0], -0.03, epsilon = 1e-15);
        assert_relative_eq!(xs[300], 0.03, epsilon = 1e-15);
        assert_relative_eq!(xs[10], -xs[290], epsilon = 1e-18);
    }
}
