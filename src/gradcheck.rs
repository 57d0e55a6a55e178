//! Finite-difference gradient checking.
//!
//! Compares an analytic gradient against central differences
//! `(f(x + h) - f(x - h)) / 2h`, one coordinate at a time.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::math::Matrix;

/// One coordinate whose analytic and numerical gradients disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    pub row: usize,
    pub col: usize,
    pub analytic: f64,
    pub numerical: f64,
    pub rel_error: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GradCheckReport {
    /// Number of coordinates examined.
    pub checked: usize,
    pub max_rel_error: f64,
    pub mismatches: Vec<Mismatch>,
}

impl GradCheckReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn into_result(self) -> Result<Self> {
        match self.mismatches.first() {
            None => Ok(self),
            Some(m) => Err(Error::GradientMismatch {
                count: self.mismatches.len(),
                row: m.row,
                col: m.col,
                rel_error: m.rel_error,
            }),
        }
    }
}

impl fmt::Display for GradCheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GradCheck {{ passed: {}, checked: {}, mismatches: {}, max_rel_error: {:.3e} }}",
            self.passed(),
            self.checked,
            self.mismatches.len(),
            self.max_rel_error
        )
    }
}

/// Central-difference gradient checker.
#[derive(Debug, Clone, Copy)]
pub struct GradCheck {
    /// Perturbation applied to each coordinate.
    pub epsilon: f64,
    /// Largest accepted `|num - ana| / max(1, |num|, |ana|)`.
    pub tolerance: f64,
}

impl Default for GradCheck {
    fn default() -> Self {
        Self {
            epsilon: 1e-4,
            tolerance: 1e-5,
        }
    }
}

impl GradCheck {
    pub fn new(epsilon: f64, tolerance: f64) -> Self {
        Self { epsilon, tolerance }
    }

    /// Check `f` at `x`. `f` returns the cost and its gradient.
    ///
    /// `f` is called `2 * len + 1` times. A stochastic `f` must reset its
    /// randomness on every call or the differences are meaningless.
    pub fn check<F>(&self, mut f: F, x: &Matrix) -> GradCheckReport
    where
        F: FnMut(&Matrix) -> (f64, Matrix),
    {
        let (_, grad) = f(x);
        assert_eq!(
            (grad.rows, grad.cols),
            (x.rows, x.cols),
            "gradient shape differs from parameter shape"
        );

        let mut x = x.clone();
        let mut report = GradCheckReport::default();
        let h = self.epsilon;

        for idx in 0..x.data.len() {
            let original = x.data[idx];

            x.data[idx] = original + h;
            let (fxh, _) = f(&x);
            x.data[idx] = original - h;
            let (fxnh, _) = f(&x);
            x.data[idx] = original;

            let numerical = (fxh - fxnh) / (2.0 * h);
            let analytic = grad.data[idx];
            let rel_error = relative_error(analytic, numerical);

            report.checked += 1;
            report.max_rel_error = report.max_rel_error.max(rel_error);
            // NaN never compares greater, so test for it explicitly
            if rel_error > self.tolerance || rel_error.is_nan() {
                let m = Mismatch {
                    row: idx / x.cols,
                    col: idx % x.cols,
                    analytic,
                    numerical,
                    rel_error,
                };
                log::warn!("{}", crate::logging::format_mismatch(&m));
                report.mismatches.push(m);
            }
        }

        log::debug!("{report}");
        report
    }
}

/// `|a - n| / max(1, |a|, |n|)`: absolute error for small values, relative above 1.
pub fn relative_error(analytic: f64, numerical: f64) -> f64 {
    (numerical - analytic).abs() / 1f64.max(numerical.abs()).max(analytic.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic(x: &Matrix) -> (f64, Matrix) {
        let cost = x.data.iter().map(|v| v * v).sum();
        let mut grad = x.clone();
        grad.scale(2.0);
        (cost, grad)
    }

    #[test]
    fn quadratic_passes() {
        let x = Matrix::from_rows(&[vec![1.0, -2.0], vec![0.5, 3.0]]);
        let report = GradCheck::default().check(quadratic, &x);
        assert!(report.passed(), "{report}");
        assert_eq!(report.checked, 4);
    }

    #[test]
    fn wrong_gradient_reports_every_bad_coordinate() {
        let x = Matrix::from_rows(&[vec![1.0, -2.0], vec![0.5, 3.0]]);
        let report = GradCheck::default().check(
            |x| {
                let (c, mut g) = quadratic(x);
                g.set(0, 1, 0.0);
                g.set(1, 1, 0.0);
                (c, g)
            },
            &x,
        );
        assert_eq!(report.mismatches.len(), 2);
        assert_eq!((report.mismatches[0].row, report.mismatches[0].col), (0, 1));
        assert_eq!((report.mismatches[1].row, report.mismatches[1].col), (1, 1));
        assert!(matches!(
            report.into_result(),
            Err(Error::GradientMismatch { count: 2, row: 0, col: 1, .. })
        ));
    }

    #[test]
    fn relative_error_scales_above_one() {
        assert!((relative_error(0.1, 0.2) - 0.1).abs() < 1e-12);
        assert!((relative_error(10.0, 12.0) - 2.0 / 12.0).abs() < 1e-12);
    }
}
