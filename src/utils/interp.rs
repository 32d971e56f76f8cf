// src/utils/interp.rs
use std::cmp::Ordering;

/// Sorted, deduplicated copy of `values`. NaN sorts last and is kept once.
pub fn unique_sorted(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.into_iter().collect();
    out.sort_by(|a, b| a.total_cmp(b));
    out.dedup_by(|a, b| a == b || (a.is_nan() && b.is_nan()));
    out
}

/// Piecewise-linear interpolation of `(xp, fp)` evaluated at each of `x`.
///
/// `xp` must be non-decreasing. Outside `[xp[0], xp[last]]` the nearest
/// endpoint value is returned. When `xp` repeats a value (a vertical
/// segment), the value at that abscissa is taken from the last repeated
/// point.
pub fn interp(x: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| interp_one(v, xp, fp)).collect()
}

fn interp_one(v: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 || v.is_nan() {
        return f64::NAN;
    }
    if n == 1 || v < xp[0] {
        return fp[0];
    }

    // last j with xp[j] <= v
    let j = xp[..n]
        .partition_point(|&p| p.partial_cmp(&v) != Some(Ordering::Greater))
        .saturating_sub(1);
    if j >= n - 1 {
        return fp[n - 1];
    }
    if xp[j] == v {
        return fp[j];
    }

    let slope = (fp[j + 1] - fp[j]) / (xp[j + 1] - xp[j]);
    fp[j] + slope * (v - xp[j])
}
