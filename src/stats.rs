// =============================================================================
// Statistics primitives: mean, population standard deviation, OLS fit
// =============================================================================
//
// Foundation layer for every indicator and model above it. Empty input is a
// documented edge case (returns 0.0), not an error, so the pipeline never
// halts on sparse market data.

use serde::{Deserialize, Serialize};

/// Arithmetic mean. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by n, not n-1).
///
/// Returns 0.0 for empty input.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ordinary-least-squares fit of `y` against `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, clamped to `[0, 1]`.
    pub r2: f64,
}

/// Fit a straight line through `(x, y)` pairs by ordinary least squares.
///
/// # Edge cases
/// - Empty or mismatched input => all-zero fit (over the common prefix).
/// - Degenerate denominator (`n*Σx² - (Σx)² == 0`, e.g. all x equal)
///   => slope 0, intercept `mean(y)`, r2 0. Never divides by zero.
/// - R² is clamped to >= 0 so degenerate fits cannot report a negative value.
pub fn linear_regression(x: &[f64], y: &[f64]) -> RegressionFit {
    let n = x.len().min(y.len());
    if n == 0 {
        return RegressionFit {
            slope: 0.0,
            intercept: 0.0,
            r2: 0.0,
        };
    }

    let x = &x[..n];
    let y = &y[..n];
    let n_f = n as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();

    let denominator = n_f * sum_x2 - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        // All x equal (or numerically indistinguishable): no line to fit.
        return RegressionFit {
            slope: 0.0,
            intercept: mean(y),
            r2: 0.0,
        };
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n_f;

    // R² = 1 - SS_res / SS_tot, guarding a flat y (SS_tot == 0).
    let mean_y = sum_y / n_f;
    let ss_tot: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| {
            let fitted = slope * a + intercept;
            (b - fitted).powi(2)
        })
        .sum();

    let r2 = if ss_tot.abs() < f64::EPSILON {
        // Flat target: the fit is exact whenever the residuals collapse too.
        if ss_res.abs() < f64::EPSILON {
            1.0
        } else {
            0.0
        }
    } else {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    };

    RegressionFit {
        slope,
        intercept,
        r2,
    }
}
