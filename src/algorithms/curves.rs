// src/algorithms/curves.rs
//! Threshold sweeps over one class column: ROC, precision-recall and
//! average precision.

use crate::core::{CurveError, PrCurve, Result, RocCurve};
use log::warn;
use ndarray::ArrayView1;

/// Cumulative counts at each distinct score, highest score first.
struct ThresholdCounts {
    fps: Vec<f64>,
    tps: Vec<f64>,
    thresholds: Vec<f64>,
}

fn check_inputs(y_true: &ArrayView1<u8>, scores: &ArrayView1<f64>) -> Result<()> {
    if y_true.len() != scores.len() {
        return Err(CurveError::IncompatibleDimensions(format!(
            "Label column has {} samples but score column has {}.",
            y_true.len(),
            scores.len()
        )));
    }
    if y_true.is_empty() {
        return Err(CurveError::InvalidInput("Cannot sweep thresholds over zero samples.".to_string()));
    }
    if y_true.iter().any(|&v| v > 1) {
        return Err(CurveError::InvalidInput("Label column must be binary (0 or 1).".to_string()));
    }
    Ok(())
}

fn threshold_counts(y_true: &ArrayView1<u8>, scores: &ArrayView1<f64>) -> Result<ThresholdCounts> {
    check_inputs(y_true, scores)?;

    let mut order: Vec<usize> = (0..scores.len()).collect();
    // descending, stable
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut counts = ThresholdCounts {
        fps: Vec::new(),
        tps: Vec::new(),
        thresholds: Vec::new(),
    };
    let (mut tp, mut fp) = (0.0, 0.0);
    for (pos, &idx) in order.iter().enumerate() {
        if y_true[idx] == 1 {
            tp += 1.0;
        } else {
            fp += 1.0;
        }
        let last_of_run = match order.get(pos + 1) {
            Some(&next) => scores[next] != scores[idx],
            None => true,
        };
        if last_of_run {
            counts.tps.push(tp);
            counts.fps.push(fp);
            counts.thresholds.push(scores[idx]);
        }
    }
    Ok(counts)
}

fn normalize(counts: &[f64], what: &str) -> Vec<f64> {
    let total = counts.last().copied().unwrap_or(0.0);
    if total <= 0.0 {
        warn!("No {} samples in label column; rate is undefined (NaN).", what);
        return vec![f64::NAN; counts.len()];
    }
    counts.iter().map(|c| c / total).collect()
}

/// ROC curve of one binary label column against its scores.
///
/// The curve starts at `(0, 0)` with threshold `+inf` and ends at `(1, 1)`.
/// With `drop_intermediate`, points lying on a straight horizontal or vertical
/// run between their neighbours are removed; the area is unaffected.
///
/// A column without positives (or without negatives) produces NaN rates.
pub fn roc_curve(
    y_true: ArrayView1<u8>,
    scores: ArrayView1<f64>,
    drop_intermediate: bool,
) -> Result<RocCurve> {
    let ThresholdCounts {
        mut fps,
        mut tps,
        mut thresholds,
    } = threshold_counts(&y_true, &scores)?;

    if drop_intermediate && fps.len() > 2 {
        let last = fps.len() - 1;
        let keep: Vec<usize> = (0..fps.len())
            .filter(|&i| {
                i == 0
                    || i == last
                    || fps[i - 1] - 2.0 * fps[i] + fps[i + 1] != 0.0
                    || tps[i - 1] - 2.0 * tps[i] + tps[i + 1] != 0.0
            })
            .collect();
        fps = keep.iter().map(|&i| fps[i]).collect();
        tps = keep.iter().map(|&i| tps[i]).collect();
        thresholds = keep.iter().map(|&i| thresholds[i]).collect();
    }

    fps.insert(0, 0.0);
    tps.insert(0, 0.0);
    thresholds.insert(0, f64::INFINITY);

    Ok(RocCurve {
        fpr: normalize(&fps, "negative"),
        tpr: normalize(&tps, "positive"),
        thresholds,
    })
}

/// Precision-recall curve of one binary label column against its scores.
///
/// Thresholds past the point where full recall is reached are dropped, the
/// remaining points are ordered by increasing threshold and a final
/// `(recall 0, precision 1)` point is appended.
pub fn precision_recall_curve(y_true: ArrayView1<u8>, scores: ArrayView1<f64>) -> Result<PrCurve> {
    let ThresholdCounts { fps, tps, thresholds } = threshold_counts(&y_true, &scores)?;

    let precision: Vec<f64> = tps.iter().zip(&fps).map(|(tp, fp)| tp / (tp + fp)).collect();
    let recall = normalize(&tps, "positive");

    // first index where every positive has been recovered
    let total_tp = tps.last().copied().unwrap_or(0.0);
    let last_ind = tps.partition_point(|&t| t < total_tp);

    let mut curve = PrCurve {
        precision: precision[..=last_ind].iter().rev().copied().collect(),
        recall: recall[..=last_ind].iter().rev().copied().collect(),
        thresholds: thresholds[..=last_ind].iter().rev().copied().collect(),
    };
    curve.precision.push(1.0);
    curve.recall.push(0.0);
    Ok(curve)
}

/// Average precision: `sum_n (R_n - R_{n-1}) * P_n` over the PR curve.
///
/// This is the step-interpolated area, not the trapezoidal one.
pub fn average_precision_score(y_true: ArrayView1<u8>, scores: ArrayView1<f64>) -> Result<f64> {
    let curve = precision_recall_curve(y_true, scores)?;
    Ok(average_precision_from_curve(&curve))
}

pub(crate) fn average_precision_from_curve(curve: &PrCurve) -> f64 {
    -curve
        .recall
        .windows(2)
        .zip(&curve.precision)
        .map(|(r, p)| (r[1] - r[0]) * p)
        .sum::<f64>()
}
