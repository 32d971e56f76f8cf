// src/algorithms/roc.rs

use super::config::CurveConfig;
use super::cross_val::out_of_fold_scores;
use super::curves::roc_curve;
use crate::core::{BinaryLabels, CurveError, Dataset, Labels, MacroCurve, Result, RocCurve, ScoreMatrix};
use crate::plot::{to_hex, Chart, HuePalette, Palette, Series};
use crate::traits::ProbabilisticClassifier;
use crate::utils::{area_under_curve, interp, unique_sorted};
use log::{debug, warn};
use plotters::style::BLACK;

/// Everything computed by a cross-validated ROC evaluation.
#[derive(Debug, Clone)]
pub struct RocEvaluation {
    pub chart: Chart,
    /// One curve per class, class `i` holding label `i + 1`.
    pub curves: Vec<RocCurve>,
    pub aucs: Vec<f64>,
    /// Mean of the interpolated class curves on the unified fpr axis.
    pub macro_curve: MacroCurve,
    pub macro_auc: f64,
}

/// Macro-average of per-class ROC curves.
///
/// Every curve is linearly interpolated onto the sorted union of all fpr
/// values and the interpolated tpr values are averaged with equal weight.
/// Returns the macro curve and its trapezoidal area.
pub fn macro_average_roc(curves: &[RocCurve]) -> Result<(MacroCurve, f64)> {
    if curves.is_empty() {
        return Err(CurveError::InvalidInput(
            "Cannot average zero ROC curves.".to_string(),
        ));
    }

    let all_fpr = unique_sorted(curves.iter().flat_map(|c| c.fpr.iter().copied()));
    let mut mean_tpr = vec![0.0; all_fpr.len()];
    for curve in curves {
        for (acc, tpr) in mean_tpr.iter_mut().zip(interp(&all_fpr, &curve.fpr, &curve.tpr)) {
            *acc += tpr;
        }
    }
    let n = curves.len() as f64;
    mean_tpr.iter_mut().for_each(|v| *v /= n);

    let auc = area_under_curve(&all_fpr, &mean_tpr)?;
    Ok((
        MacroCurve {
            x: all_fpr,
            y: mean_tpr,
        },
        auc,
    ))
}

/// Per-class ROC curves and their areas for a binarized label matrix.
pub fn per_class_roc(
    binary: &BinaryLabels,
    scores: &ScoreMatrix,
    drop_intermediate: bool,
) -> Result<(Vec<RocCurve>, Vec<f64>)> {
    if binary.dim() != scores.dim() {
        return Err(CurveError::IncompatibleDimensions(format!(
            "Label matrix is {:?} but score matrix is {:?}.",
            binary.dim(),
            scores.dim()
        )));
    }

    let mut curves = Vec::with_capacity(binary.ncols());
    let mut aucs = Vec::with_capacity(binary.ncols());
    for (class, (y, s)) in binary.columns().into_iter().zip(scores.columns()).enumerate() {
        let curve = roc_curve(y, s, drop_intermediate)?;
        let auc = area_under_curve(&curve.fpr, &curve.tpr)?;
        if auc.is_nan() {
            warn!("Class {} has an undefined ROC area; the macro average will be NaN.", class);
        }
        debug!("Class {}: {} ROC points, AUC {:.4}.", class, curve.len(), auc);
        curves.push(curve);
        aucs.push(auc);
    }
    Ok((curves, aucs))
}

/// Cross-validated, macro-averaged ROC evaluation of a classifier.
#[derive(Debug)]
pub struct RocAggregator<M: ProbabilisticClassifier + Clone> {
    model: M,
    config: CurveConfig,
    palette: Box<dyn Palette>,
}

impl<M: ProbabilisticClassifier + Clone> RocAggregator<M> {
    pub fn new(model: M, config: Option<CurveConfig>) -> Self {
        RocAggregator {
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
    ) -> Result<RocEvaluation> {
        let (binary, scores) =
            out_of_fold_scores(&self.model, instances, labels, n_classes, &self.config.splitter(folds))?;
        let (curves, aucs) = per_class_roc(&binary, &scores, self.config.drop_intermediate)?;
        let (macro_curve, macro_auc) = macro_average_roc(&curves)?;
        debug!("Macro-average ROC AUC over {} classes: {:.4}.", n_classes, macro_auc);

        let chart = self.chart(&curves, &aucs, &macro_curve, macro_auc);
        Ok(RocEvaluation {
            chart,
            curves,
            aucs,
            macro_curve,
            macro_auc,
        })
    }

    fn chart(&self, curves: &[RocCurve], aucs: &[f64], macro_curve: &MacroCurve, macro_auc: f64) -> Chart {
        let mut chart = Chart::new(
            "Receiver operating characteristic",
            "False Positive Rate",
            "True Positive Rate",
        );
        let colors = self.palette.colors(curves.len());
        debug!(
            "ROC class colours: {:?}.",
            colors.iter().map(to_hex).collect::<Vec<_>>()
        );
        for (class, ((curve, auc), color)) in curves.iter().zip(aucs).zip(colors).enumerate() {
            chart.push_series(Series {
                label: Some(format!("ROC curve of class {} (area = {:.2})", class, auc)),
                color,
                line_width: 2,
                points: curve.points(),
            });
        }
        chart.push_series(Series {
            label: Some(format!("macro-average ROC curve (area = {:.2})", macro_auc)),
            color: self.palette.accent(),
            line_width: 4,
            points: macro_curve.x.iter().copied().zip(macro_curve.y.iter().copied()).collect(),
        });
        chart.push_series(Series {
            label: None,
            color: BLACK,
            line_width: 1,
            points: vec![(0.0, 0.0), (1.0, 1.0)],
        });
        chart
    }
}

/// Runs a default [`RocAggregator`] and returns the chart with the macro AUC.
pub fn roc_kfold_plot<M: ProbabilisticClassifier + Clone>(
    classifier: &M,
    instances: &Dataset,
    labels: &Labels,
    n_classes: usize,
    folds: usize,
) -> Result<(Chart, f64)> {
    let evaluation = RocAggregator::new(classifier.clone(), None).evaluate(instances, labels, n_classes, folds)?;
    Ok((evaluation.chart, evaluation.macro_auc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NearestCentroid;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    fn curve(points: &[(f64, f64)]) -> RocCurve {
        RocCurve {
            fpr: points.iter().map(|p| p.0).collect(),
            tpr: points.iter().map(|p| p.1).collect(),
            thresholds: vec![0.0; points.len()],
        }
    }

    #[test]
    fn test_vertical_segments_take_their_upper_value() -> Result<()> {
        let c = curve(&[(0.0, 0.0), (0.0, 0.5), (0.5, 0.5), (0.5, 1.0), (1.0, 1.0)]);
        let (m, auc) = macro_average_roc(&[c.clone(), c])?;
        assert_eq!(m.x, vec![0.0, 0.5, 1.0]);
        assert_eq!(m.y, vec![0.5, 1.0, 1.0]);
        // the staircase corner at 0.5 is cut by a straight segment, so the
        // macro area exceeds the 0.75 of the class curve
        assert_abs_diff_eq!(auc, 0.875);
        Ok(())
    }

    #[test]
    fn test_macro_auc_is_mean_of_class_aucs() -> Result<()> {
        let a = curve(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let b = curve(&[(0.0, 0.0), (1.0, 1.0)]);
        let (m, auc) = macro_average_roc(&[a, b])?;
        assert_eq!(m.x, vec![0.0, 1.0]);
        assert_eq!(m.y, vec![0.5, 1.0]);
        assert_abs_diff_eq!(auc, 0.75);
        Ok(())
    }

    #[test]
    fn test_nan_class_poisons_macro() -> Result<()> {
        let good = curve(&[(0.0, 0.0), (0.5, 1.0), (1.0, 1.0)]);
        let degenerate = RocCurve {
            fpr: vec![0.0, 0.5, 1.0],
            tpr: vec![f64::NAN; 3],
            thresholds: vec![f64::INFINITY, 0.5, 0.1],
        };
        let (m, auc) = macro_average_roc(&[good, degenerate])?;
        assert!(m.y.iter().all(|v| v.is_nan()));
        assert!(auc.is_nan());
        Ok(())
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(macro_average_roc(&[]).is_err());
    }

    #[test]
    fn test_per_class_requires_matching_shapes() {
        let binary: BinaryLabels = array![[1, 0], [0, 1]];
        let scores: ScoreMatrix = Array2::zeros((2, 3));
        assert!(matches!(
            per_class_roc(&binary, &scores, true),
            Err(CurveError::IncompatibleDimensions(_))
        ));
    }

    #[test]
    fn test_chart_has_class_macro_and_reference_series() -> Result<()> {
        let labels: Labels = (0..12).map(|i| i % 3 + 1).collect();
        let x: Dataset = Array2::from_shape_fn((12, 1), |(i, _)| labels[i] as f64);
        let evaluation = RocAggregator::new(NearestCentroid::new(), None).evaluate(&x, &labels, 3, 2)?;

        assert_eq!(evaluation.chart.series.len(), 5);
        let legend = evaluation.chart.legend();
        assert_eq!(legend[0], "ROC curve of class 0 (area = 1.00)");
        assert_eq!(legend.len(), 4);
        assert_eq!(evaluation.chart.x_label, "False Positive Rate");
        let reference = evaluation.chart.series.last().map(|s| s.points.clone());
        assert_eq!(reference, Some(vec![(0.0, 0.0), (1.0, 1.0)]));
        assert_abs_diff_eq!(evaluation.macro_auc, 1.0);
        Ok(())
    }

    #[test]
    fn test_macro_curve_stands_apart_from_class_colours() -> Result<()> {
        let labels: Labels = (0..12).map(|i| i % 3 + 1).collect();
        let x: Dataset = Array2::from_shape_fn((12, 1), |(i, _)| labels[i] as f64);
        let evaluation = RocAggregator::new(NearestCentroid::new(), None).evaluate(&x, &labels, 3, 2)?;

        let series = &evaluation.chart.series;
        let macro_series = &series[3];
        assert!(macro_series.label.as_deref().map_or(false, |l| l.starts_with("macro-average")));
        assert_eq!(macro_series.color, HuePalette::default().accent());
        for class_series in &series[..3] {
            assert_ne!(class_series.color, macro_series.color);
            assert!(class_series.line_width < macro_series.line_width);
        }
        Ok(())
    }
}
