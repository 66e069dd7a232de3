//! Tridiagonal operators and the Thomas algorithm.

use crate::error::EngineError;

/// Banded operator `(lower, diag, upper)`; `lower[0]` and
/// `upper[n - 1]` are unused.
#[derive(Debug, Clone)]
pub struct TridiagonalOperator {
    lower: Vec<f64>,
    diag: Vec<f64>,
    upper: Vec<f64>,
}

impl TridiagonalOperator {
    /// Creates an operator from three bands of equal length.
    pub fn new(lower: Vec<f64>, diag: Vec<f64>, upper: Vec<f64>) -> Self {
        debug_assert!(lower.len() == diag.len() && upper.len() == diag.len());
        Self { lower, diag, upper }
    }

    /// Dimension.
    #[inline]
    pub fn size(&self) -> usize {
        self.diag.len()
    }

    /// `out = (I + c·L)·v`.
    pub fn apply_shifted(&self, c: f64, v: &[f64], out: &mut [f64]) {
        let n = self.size();
        for i in 0..n {
            let mut acc = v[i] + c * self.diag[i] * v[i];
            if i > 0 {
                acc += c * self.lower[i] * v[i - 1];
            }
            if i + 1 < n {
                acc += c * self.upper[i] * v[i + 1];
            }
            out[i] = acc;
        }
    }

    /// Solve `(I − c·L)·x = rhs` in place of `rhs`, using `scratch` for the
    /// forward sweep.
    pub fn solve_shifted(
        &self,
        c: f64,
        rhs: &mut [f64],
        scratch: &mut [f64],
    ) -> Result<(), EngineError> {
        let n = self.size();
        let mut pivot = 1.0 - c * self.diag[0];
        if pivot == 0.0 {
            return Err(EngineError::SingularSystem { row: 0 });
        }
        rhs[0] /= pivot;
        for i in 1..n {
            scratch[i] = -c * self.upper[i - 1] / pivot;
            let lower = -c * self.lower[i];
            pivot = (1.0 - c * self.diag[i]) - lower * scratch[i];
            if pivot == 0.0 {
                return Err(EngineError::SingularSystem { row: i });
            }
            rhs[i] = (rhs[i] - lower * rhs[i - 1]) / pivot;
        }
        for i in (0..n - 1).rev() {
            let next = rhs[i + 1];
            rhs[i] -= scratch[i + 1] * next;
        }
        Ok(())
    }
}
