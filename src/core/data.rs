// src/core/data.rs
use ndarray::{Array1, Array2};
use std::fmt;

/// Feature table: one row per sample, one column per feature.
pub type Dataset = Array2<f64>;

/// Integer class labels, one per sample, with values in `1..=n_classes`.
pub type Labels = Array1<usize>;

/// Per-class probability scores, shape `(n_samples, n_classes)`.
pub type ScoreMatrix = Array2<f64>;

/// One-hot label matrix, shape `(n_samples, n_classes)`. Column `i` holds label `i + 1`.
pub type BinaryLabels = Array2<u8>;

/// Receiver operating characteristic of a single class.
#[derive(Debug, Clone)]
pub struct RocCurve {
    /// False positive rates, non-decreasing.
    pub fpr: Vec<f64>,
    /// True positive rates, non-decreasing.
    pub tpr: Vec<f64>,
    /// Decision threshold for each point. The first one is `+inf`.
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    pub fn len(&self) -> usize {
        self.fpr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fpr.is_empty()
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.fpr.iter().copied().zip(self.tpr.iter().copied()).collect()
    }
}

/// Precision-recall curve of a single class.
///
/// Points are ordered by increasing threshold, so recall decreases along the
/// curve. The last point is always `(recall = 0, precision = 1)` and has no
/// threshold of its own, hence `thresholds.len() == precision.len() - 1`.
#[derive(Debug, Clone)]
pub struct PrCurve {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub thresholds: Vec<f64>,
}

impl PrCurve {
    pub fn len(&self) -> usize {
        self.precision.len()
    }

    pub fn is_empty(&self) -> bool {
        self.precision.is_empty()
    }

    /// `(recall, precision)` pairs, the order in which the curve is plotted.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.recall.iter().copied().zip(self.precision.iter().copied()).collect()
    }
}

/// Curve of the macro-average over classes, defined on the unified fpr axis.
#[derive(Debug, Clone)]
pub struct MacroCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl fmt::Display for RocCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ROC curve ({} points):", self.len())?;
        for ((fpr, tpr), thr) in self.fpr.iter().zip(&self.tpr).zip(&self.thresholds).take(10) {
            writeln!(f, "  fpr {:.4}  tpr {:.4}  threshold {:.4}", fpr, tpr, thr)?;
        }
        if self.len() > 10 {
            writeln!(f, "  ...")?;
        }
        Ok(())
    }
}
