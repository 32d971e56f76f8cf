// src/algorithms/precision_recall.rs

use super::config::CurveConfig;
use super::cross_val::out_of_fold_scores;
use super::curves::{average_precision_from_curve, precision_recall_curve};
use crate::core::{BinaryLabels, CurveError, Dataset, Labels, PrCurve, Result, ScoreMatrix};
use crate::plot::{to_hex, Chart, HuePalette, Palette, Series};
use crate::traits::ProbabilisticClassifier;
use log::{debug, warn};

/// Everything computed by a cross-validated precision-recall evaluation.
#[derive(Debug, Clone)]
pub struct PrEvaluation {
    pub chart: Chart,
    /// One curve per class, class `i` holding label `i + 1`.
    pub curves: Vec<PrCurve>,
    pub average_precisions: Vec<f64>,
    /// Plain mean of `average_precisions`.
    pub mean_average_precision: f64,
}

/// Per-class precision-recall curves and average precisions.
pub fn per_class_precision_recall(
    binary: &BinaryLabels,
    scores: &ScoreMatrix,
) -> Result<(Vec<PrCurve>, Vec<f64>)> {
    if binary.dim() != scores.dim() {
        return Err(CurveError::IncompatibleDimensions(format!(
            "Label matrix is {:?} but score matrix is {:?}.",
            binary.dim(),
            scores.dim()
        )));
    }

    let mut curves = Vec::with_capacity(binary.ncols());
    let mut average_precisions = Vec::with_capacity(binary.ncols());
    for (class, (y, s)) in binary.columns().into_iter().zip(scores.columns()).enumerate() {
        let curve = precision_recall_curve(y, s)?;
        let ap = average_precision_from_curve(&curve);
        if ap.is_nan() {
            warn!("Class {} has an undefined average precision; the mean will be NaN.", class);
        }
        debug!("Class {}: {} PR points, average precision {:.4}.", class, curve.len(), ap);
        curves.push(curve);
        average_precisions.push(ap);
    }
    Ok((curves, average_precisions))
}

/// Arithmetic mean of per-class average precisions.
///
/// Unlike the ROC macro-average there is no interpolation onto a shared
/// axis; each class contributes its scalar score with equal weight.
pub fn mean_average_precision(average_precisions: &[f64]) -> Result<f64> {
    if average_precisions.is_empty() {
        return Err(CurveError::InvalidInput(
            "Cannot average zero precision scores.".to_string(),
        ));
    }
    Ok(average_precisions.iter().sum::<f64>() / average_precisions.len() as f64)
}

/// Cross-validated precision-recall evaluation of a classifier.
#[derive(Debug)]
pub struct PrAggregator<M: ProbabilisticClassifier + Clone> {
    model: M,
    config: CurveConfig,
    palette: Box<dyn Palette>,
}

impl<M: ProbabilisticClassifier + Clone> PrAggregator<M> {
    pub fn new(model: M, config: Option<CurveConfig>) -> Self {
        PrAggregator {
            model,
            config: config.unwrap_or_default(),
            palette: Box::new(HuePalette::default()),
        }
    }

    pub fn with_palette(mut self, palette: impl Palette + 'static) -> Self {
        self.palette = Box::new(palette);
        self
    }

    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn evaluate(
        &self,
        instances: &Dataset,
        labels: &Labels,
        n_classes: usize,
        folds: usize,
    ) -> Result<PrEvaluation> {
        let (binary, scores) =
            out_of_fold_scores(&self.model, instances, labels, n_classes, &self.config.splitter(folds))?;
        let (curves, average_precisions) = per_class_precision_recall(&binary, &scores)?;
        let mean = mean_average_precision(&average_precisions)?;
        debug!("Mean average precision over {} classes: {:.4}.", n_classes, mean);

        let mut chart = Chart::new("Precision-recall", "Recall", "Precision");
        let colors = self.palette.colors(curves.len());
        debug!(
            "Precision-recall class colours: {:?}.",
            colors.iter().map(to_hex).collect::<Vec<_>>()
        );
        for (class, ((curve, ap), color)) in curves.iter().zip(&average_precisions).zip(colors).enumerate() {
            chart.push_series(Series {
                label: Some(format!("Precision-recall for class {} (area = {:.2})", class, ap)),
                color,
                line_width: 2,
                points: curve.points(),
            });
        }

        Ok(PrEvaluation {
            chart,
            curves,
            average_precisions,
            mean_average_precision: mean,
        })
    }
}

/// Runs a default [`PrAggregator`] and returns the chart with the mean
/// average precision.
pub fn pr_kfold_plot<M: ProbabilisticClassifier + Clone>(
    classifier: &M,
    instances: &Dataset,
    labels: &Labels,
    n_classes: usize,
    folds: usize,
) -> Result<(Chart, f64)> {
    let evaluation = PrAggregator::new(classifier.clone(), None).evaluate(instances, labels, n_classes, folds)?;
    Ok((evaluation.chart, evaluation.mean_average_precision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NearestCentroid;
    use crate::plot::RandomHexPalette;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    #[test]
    fn test_mean_is_plain_average() -> Result<()> {
        assert_abs_diff_eq!(mean_average_precision(&[1.0, 0.5, 0.0])?, 0.5);
        assert!(mean_average_precision(&[]).is_err());
        assert!(mean_average_precision(&[1.0, f64::NAN])?.is_nan());
        Ok(())
    }

    #[test]
    fn test_per_class_scores_match_hand_computation() -> Result<()> {
        let binary: BinaryLabels = array![[1, 0], [0, 1], [1, 0], [0, 1]];
        let scores: ScoreMatrix = array![[0.9, 0.1], [0.6, 0.4], [0.3, 0.7], [0.2, 0.8]];
        let (curves, aps) = per_class_precision_recall(&binary, &scores)?;
        assert_eq!(curves.len(), 2);
        // class 0 ranking: 0.9 (+), 0.6 (-), 0.3 (+)
        assert_abs_diff_eq!(aps[0], 0.5 * 1.0 + 0.5 * (2.0 / 3.0), epsilon = 1e-12);
        // class 1 ranking: 0.8 (+), 0.7 (-), 0.4 (+)
        assert_abs_diff_eq!(aps[1], 0.5 * 1.0 + 0.5 * (2.0 / 3.0), epsilon = 1e-12);
        for curve in &curves {
            assert_eq!(curve.recall.last().copied(), Some(0.0));
            assert_eq!(curve.precision.last().copied(), Some(1.0));
        }
        Ok(())
    }

    #[test]
    fn test_chart_lists_every_class() -> Result<()> {
        let labels: Labels = (0..12).map(|i| i % 3 + 1).collect();
        let x: Dataset = Array2::from_shape_fn((12, 1), |(i, _)| labels[i] as f64);
        let evaluation = PrAggregator::new(NearestCentroid::new(), None)
            .with_palette(RandomHexPalette::new(5))
            .evaluate(&x, &labels, 3, 4)?;

        assert_eq!(
            evaluation.chart.legend(),
            vec![
                "Precision-recall for class 0 (area = 1.00)",
                "Precision-recall for class 1 (area = 1.00)",
                "Precision-recall for class 2 (area = 1.00)",
            ]
        );
        assert_eq!(evaluation.chart.x_label, "Recall");
        let colors = RandomHexPalette::new(5).colors(3);
        for (series, color) in evaluation.chart.series.iter().zip(colors) {
            assert_eq!(series.color, color);
        }
        assert_abs_diff_eq!(evaluation.mean_average_precision, 1.0);
        Ok(())
    }
}
