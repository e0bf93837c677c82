//! Statistical utilities for dashboard aggregation.
//!
//! All functions return `Option` rather than guessing a value for empty
//! or degenerate input; callers decide how an absent statistic renders.

use serde::{Deserialize, Serialize};

/// Calculate the sum of a slice of values.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Calculate the mean of a slice of values.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(sum(values) / values.len() as f64)
}

/// Calculate the variance of a slice of values (population variance).
pub fn variance(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean_val = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean_val).powi(2)).sum();
    Some(sum_sq / n as f64)
}

/// Calculate covariance between two series of equal length.
pub fn covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let mean_x = mean(x)?;
    let mean_y = mean(y)?;
    let n = x.len();

    let total: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| (xi - mean_x) * (yi - mean_y))
        .sum();

    Some(total / n as f64)
}

/// A fitted ordinary-least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Predicted y at the given x.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a least-squares line of y on x.
///
/// Returns `None` for fewer than two points or when x has no spread
/// (a vertical cloud has no defined slope).
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    let cov = covariance(x, y)?;
    let var_x = variance(x)?;

    if var_x == 0.0 {
        return None;
    }

    let slope = cov / var_x;
    let intercept = mean(y)? - slope * mean(x)?;
    Some(LinearFit { slope, intercept })
}
