// src/algorithms/cross_val.rs
//! Stratified k-fold splitting and out-of-fold probability prediction.

use crate::core::{BinaryLabels, CurveError, Dataset, Labels, Result, ScoreMatrix};
use crate::traits::ProbabilisticClassifier;
use crate::utils::{distinct_labels, label_binarize};
use log::debug;
use ndarray::Axis;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Stratified k-fold splitter.
///
/// The indices of each class are dealt round-robin over the folds, so every
/// fold holds either `floor(n_c / k)` or `ceil(n_c / k)` members of class `c`.
#[derive(Debug, Clone)]
pub struct StratifiedKFold {
    pub n_splits: usize,
    pub shuffle: bool,
    pub seed: u64,
}

impl StratifiedKFold {
    pub fn new(n_splits: usize) -> Self {
        StratifiedKFold {
            n_splits,
            shuffle: false,
            seed: 0,
        }
    }

    pub fn with_shuffle(mut self, seed: u64) -> Self {
        self.shuffle = true;
        self.seed = seed;
        self
    }

    /// Returns `(train_indices, test_indices)` for each fold.
    ///
    /// Fails if fewer than two folds are requested or if any class has fewer
    /// members than there are folds.
    pub fn split(&self, labels: &Labels) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        let k = self.n_splits;
        if k < 2 {
            return Err(CurveError::InvalidInput(format!(
                "Fold count must be at least 2, got {}.",
                k
            )));
        }
        if k > labels.len() {
            return Err(CurveError::InvalidInput(format!(
                "Fold count ({}) exceeds the number of samples ({}).",
                k,
                labels.len()
            )));
        }

        let classes = distinct_labels(labels);
        let mut groups: Vec<Vec<usize>> = classes
            .iter()
            .map(|&c| {
                labels
                    .iter()
                    .enumerate()
                    .filter(|&(_, &l)| l == c)
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();

        if let Some((class, group)) = classes
            .iter()
            .zip(&groups)
            .find(|(_, group)| group.len() < k)
        {
            return Err(CurveError::InvalidInput(format!(
                "Fold count ({}) exceeds the {} samples of class {}.",
                k,
                group.len(),
                class
            )));
        }

        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed);
            for group in &mut groups {
                group.shuffle(&mut rng);
            }
        }

        let mut test_folds: Vec<Vec<usize>> = vec![Vec::new(); k];
        let mut next = 0;
        for group in &groups {
            for &idx in group {
                test_folds[next % k].push(idx);
                next += 1;
            }
        }

        let mut splits = Vec::with_capacity(k);
        for mut test in test_folds {
            test.sort_unstable();
            let mut in_test = vec![false; labels.len()];
            for &i in &test {
                in_test[i] = true;
            }
            let train: Vec<usize> = (0..labels.len()).filter(|&i| !in_test[i]).collect();
            splits.push((train, test));
        }
        Ok(splits)
    }
}

/// Out-of-fold class probabilities for every sample.
///
/// A fresh clone of `model` is fitted on the training rows of each fold and
/// scores that fold's test rows, so no sample is scored by a model that saw
/// it. The result has shape `(n_samples, n_classes)`.
pub fn cross_val_predict_proba<M>(
    model: &M,
    instances: &Dataset,
    labels: &Labels,
    n_classes: usize,
    splitter: &StratifiedKFold,
) -> Result<ScoreMatrix>
where
    M: ProbabilisticClassifier + Clone,
{
    if instances.nrows() != labels.len() {
        return Err(CurveError::IncompatibleDimensions(format!(
            "Feature table has {} rows, but label vector has {} entries.",
            instances.nrows(),
            labels.len()
        )));
    }
    if let Some(expected) = model.num_features() {
        if instances.ncols() != expected {
            return Err(CurveError::IncompatibleDimensions(format!(
                "Feature table has {} features, but model expects {}.",
                instances.ncols(),
                expected
            )));
        }
    }

    let mut scores = ScoreMatrix::from_elem((labels.len(), n_classes), f64::NAN);
    for (fold, (train, test)) in splitter.split(labels)?.iter().enumerate() {
        let x_train = instances.select(Axis(0), train);
        let y_train = labels.select(Axis(0), train);
        let x_test = instances.select(Axis(0), test);

        let mut fold_model = model.clone();
        fold_model.fit(&x_train, &y_train)?;
        let proba = fold_model.predict_proba(&x_test)?;

        if proba.nrows() != test.len() {
            return Err(CurveError::ModelPredictionError(format!(
                "Fold {}: model returned {} probability rows for {} test samples.",
                fold,
                proba.nrows(),
                test.len()
            )));
        }
        if proba.ncols() != n_classes {
            return Err(CurveError::IncompatibleDimensions(format!(
                "Fold {}: model returned {} probability columns, but {} classes were requested.",
                fold,
                proba.ncols(),
                n_classes
            )));
        }

        for (row, &idx) in proba.outer_iter().zip(test) {
            scores.row_mut(idx).assign(&row);
        }
        debug!(
            "Fold {}: trained on {} samples, scored {} samples.",
            fold,
            train.len(),
            test.len()
        );
    }
    Ok(scores)
}

/// Binarized labels and out-of-fold scores: the shared front half of both
/// curve aggregators.
///
/// Every class in `1..=n_classes` must occur in `labels`. A declared class
/// with no samples would leave an empty label column and a NaN summary, so
/// it is rejected before any model is fitted.
pub(crate) fn out_of_fold_scores<M>(
    model: &M,
    instances: &Dataset,
    labels: &Labels,
    n_classes: usize,
    splitter: &StratifiedKFold,
) -> Result<(BinaryLabels, ScoreMatrix)>
where
    M: ProbabilisticClassifier + Clone,
{
    let binary = label_binarize(labels, n_classes)?;
    let present = distinct_labels(labels).len();
    if present != n_classes {
        return Err(CurveError::IncompatibleDimensions(format!(
            "{} classes were requested, but the labels contain {} distinct values.",
            n_classes, present
        )));
    }
    let scores = cross_val_predict_proba(model, instances, labels, n_classes, splitter)?;
    if binary.dim() != scores.dim() {
        return Err(CurveError::IncompatibleDimensions(format!(
            "Binarized labels are {:?} but scores are {:?}.",
            binary.dim(),
            scores.dim()
        )));
    }
    Ok((binary, scores))
}
