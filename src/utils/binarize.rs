// src/utils/binarize.rs
use crate::core::{BinaryLabels, CurveError, Labels, Result};

/// One-hot encodes `labels` over the classes `1..=n_classes`.
///
/// Column `i` of the result corresponds to label `i + 1`. A label outside
/// that range means the class count does not describe the data, which is
/// reported as a dimension mismatch.
pub fn label_binarize(labels: &Labels, n_classes: usize) -> Result<BinaryLabels> {
    if n_classes == 0 {
        return Err(CurveError::InvalidInput(
            "Number of classes must be at least 1.".to_string(),
        ));
    }
    if labels.is_empty() {
        return Err(CurveError::InvalidInput("Label vector cannot be empty.".to_string()));
    }

    let mut binary = BinaryLabels::zeros((labels.len(), n_classes));
    for (row, &label) in labels.iter().enumerate() {
        if label == 0 || label > n_classes {
            return Err(CurveError::IncompatibleDimensions(format!(
                "Label {} at sample {} is outside the class range 1..={}.",
                label, row, n_classes
            )));
        }
        binary[[row, label - 1]] = 1;
    }
    Ok(binary)
}

/// Sorted distinct labels present in `labels`.
pub fn distinct_labels(labels: &Labels) -> Vec<usize> {
    let mut classes: Vec<usize> = labels.to_vec();
    classes.sort_unstable();
    classes.dedup();
    classes
}
