// src/algorithms/config.rs
use super::cross_val::StratifiedKFold;

/// Configuration shared by the ROC and precision-recall aggregators.
#[derive(Debug, Clone)]
pub struct CurveConfig {
    /// Drop collinear intermediate ROC points. Never changes the area.
    pub drop_intermediate: bool,
    /// Shuffle each class before dealing it into folds.
    pub shuffle: bool,
    /// Seed for the fold shuffle; ignored unless `shuffle` is set.
    pub seed: u64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        CurveConfig {
            drop_intermediate: true,
            shuffle: false,
            seed: 0,
        }
    }
}

impl CurveConfig {
    pub(crate) fn splitter(&self, folds: usize) -> StratifiedKFold {
        let splitter = StratifiedKFold::new(folds);
        if self.shuffle {
            splitter.with_shuffle(self.seed)
        } else {
            splitter
        }
    }
}
