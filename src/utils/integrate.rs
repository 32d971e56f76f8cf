// src/utils/integrate.rs
use crate::core::{CurveError, Result};

/// Area under the curve `(x, y)` by the trapezoidal rule.
///
/// `x` must be monotone. A non-increasing `x` is integrated in reverse so the
/// area is still reported as positive. NaN coordinates propagate into the
/// result.
pub fn area_under_curve(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(CurveError::IncompatibleDimensions(format!(
            "x has {} points but y has {}.",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(CurveError::InvalidInput(format!(
            "At least 2 points are needed to compute an area, got {}.",
            x.len()
        )));
    }

    let direction = if x.windows(2).any(|w| w[1] - w[0] < 0.0) {
        if x.windows(2).all(|w| w[1] - w[0] <= 0.0 || (w[1] - w[0]).is_nan()) {
            -1.0
        } else {
            return Err(CurveError::InvalidInput(
                "x is neither increasing nor decreasing.".to_string(),
            ));
        }
    } else {
        1.0
    };

    Ok(direction * trapezoid(x, y))
}

fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}
