// src/traits.rs
use crate::core::{Dataset, Labels, Result, ScoreMatrix};

/// A classifier that can be fitted on labelled data and emits per-class
/// probability estimates.
///
/// Cross-validation clones the (unfitted) model once per fold, so
/// implementors are expected to be cheap to clone and to reset any learned
/// state in `fit`.
pub trait ProbabilisticClassifier {
    /// Fits the model on `instances` with the given labels.
    fn fit(&mut self, instances: &Dataset, labels: &Labels) -> Result<()>;

    /// Returns one row per instance and one column per class seen during
    /// `fit`, columns in ascending label order.
    fn predict_proba(&self, instances: &Dataset) -> Result<ScoreMatrix>;

    /// Number of features the model expects, if it is known.
    fn num_features(&self) -> Option<usize> {
        None
    }
}
