// src/models/nearest_centroid.rs
use crate::core::{CurveError, Dataset, Labels, Result, ScoreMatrix};
use crate::traits::ProbabilisticClassifier;
use crate::utils::distinct_labels;
use ndarray::{Array1, Array2, Axis};

/// Nearest-centroid classifier with soft-max class probabilities.
///
/// `fit` stores one mean vector per label. `predict_proba` turns negative
/// squared Euclidean distances into probabilities; columns follow the
/// ascending order of the labels seen during `fit`.
#[derive(Debug, Clone, Default)]
pub struct NearestCentroid {
    classes: Vec<usize>,
    centroids: Option<Array2<f64>>,
}

impl NearestCentroid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels seen during `fit`, ascending.
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    pub fn centroids(&self) -> Option<&Array2<f64>> {
        self.centroids.as_ref()
    }
}

impl ProbabilisticClassifier for NearestCentroid {
    fn fit(&mut self, instances: &Dataset, labels: &Labels) -> Result<()> {
        if instances.nrows() == 0 {
            return Err(CurveError::InvalidInput("Training data cannot be empty.".to_string()));
        }
        if instances.nrows() != labels.len() {
            return Err(CurveError::IncompatibleDimensions(format!(
                "Training data has {} rows, but {} labels were given.",
                instances.nrows(),
                labels.len()
            )));
        }

        let classes = distinct_labels(labels);
        let mut centroids = Array2::zeros((classes.len(), instances.ncols()));
        for (c, &class) in classes.iter().enumerate() {
            let members: Vec<usize> = labels
                .iter()
                .enumerate()
                .filter(|&(_, &l)| l == class)
                .map(|(i, _)| i)
                .collect();
            let mean = instances
                .select(Axis(0), &members)
                .mean_axis(Axis(0))
                .ok_or_else(|| {
                    CurveError::InternalError(format!("Class {} has no members.", class))
                })?;
            centroids.row_mut(c).assign(&mean);
        }

        self.classes = classes;
        self.centroids = Some(centroids);
        Ok(())
    }

    fn predict_proba(&self, instances: &Dataset) -> Result<ScoreMatrix> {
        let centroids = self.centroids.as_ref().ok_or_else(|| {
            CurveError::ModelPredictionError("predict_proba called before fit.".to_string())
        })?;
        if instances.ncols() != centroids.ncols() {
            return Err(CurveError::IncompatibleDimensions(format!(
                "Model was fitted on {} features, got {}.",
                centroids.ncols(),
                instances.ncols()
            )));
        }

        let mut proba = ScoreMatrix::zeros((instances.nrows(), centroids.nrows()));
        for (instance, mut out) in instances.outer_iter().zip(proba.outer_iter_mut()) {
            let logits: Array1<f64> = centroids
                .outer_iter()
                .map(|centroid| {
                    let diff = &instance - &centroid;
                    -diff.dot(&diff)
                })
                .collect();
            let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let exp = logits.mapv(|v| (v - max).exp());
            let total = exp.sum();
            out.assign(&(exp / total));
        }
        Ok(proba)
    }

    fn num_features(&self) -> Option<usize> {
        self.centroids.as_ref().map(|c| c.ncols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn test_predicts_closest_class() -> Result<()> {
        let x = array![[0.0, 0.0], [0.2, 0.0], [5.0, 5.0], [5.2, 5.0]];
        let y: Labels = array![1, 1, 2, 2];
        let mut model = NearestCentroid::new();
        model.fit(&x, &y)?;

        assert_eq!(model.classes(), &[1, 2]);
        let proba = model.predict_proba(&array![[0.1, 0.0], [5.1, 5.1]])?;
        assert!(proba[[0, 0]] > 0.99);
        assert!(proba[[1, 1]] > 0.99);
        for row in proba.outer_iter() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_blobs_are_separated() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        let noise = Normal::new(0.0, 0.3).unwrap();
        let n = 60;
        let y: Labels = (0..n).map(|i| i % 3 + 1).collect();
        let x = Dataset::from_shape_fn((n, 2), |(i, j)| {
            let center = if j == 0 { y[i] as f64 * 4.0 } else { 0.0 };
            center + noise.sample(&mut rng)
        });

        let mut model = NearestCentroid::new();
        model.fit(&x, &y)?;
        let proba = model.predict_proba(&x)?;
        let correct = proba
            .outer_iter()
            .zip(y.iter())
            .filter(|(row, label)| {
                let best = row
                    .iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |acc, (i, &p)| if p > acc.1 { (i, p) } else { acc });
                best.0 + 1 == **label
            })
            .count();
        assert_eq!(correct, n);
        Ok(())
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let model = NearestCentroid::new();
        assert!(matches!(
            model.predict_proba(&array![[1.0]]),
            Err(CurveError::ModelPredictionError(_))
        ));
    }

    #[test]
    fn test_feature_count_mismatch() -> Result<()> {
        let mut model = NearestCentroid::new();
        model.fit(&array![[0.0, 1.0], [1.0, 0.0]], &array![1, 2])?;
        assert_eq!(model.num_features(), Some(2));
        assert!(model.predict_proba(&array![[0.0]]).is_err());
        Ok(())
    }
}
