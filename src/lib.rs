// src/lib.rs

//! `kfold_curves` evaluates multi-class probabilistic classifiers with k-fold
//! cross-validation and draws the results as ROC and precision-recall charts.
//!
//! The ROC evaluation interpolates every class curve onto a shared false
//! positive rate axis and reports the area under the macro-averaged curve.
//! The precision-recall evaluation reports the plain mean of the per-class
//! average precisions.
//!
//! ```no_run
//! use kfold_curves::{roc_kfold_plot, Dataset, Labels, NearestCentroid};
//!
//! let labels: Labels = (0..30).map(|i| i % 3 + 1).collect();
//! let features = Dataset::from_shape_fn((30, 1), |(i, _)| labels[i] as f64);
//! let (chart, macro_auc) = roc_kfold_plot(&NearestCentroid::new(), &features, &labels, 3, 5)?;
//! let svg = chart.to_svg()?;
//! println!("macro AUC {:.3}, {} bytes of SVG", macro_auc, svg.len());
//! # Ok::<(), kfold_curves::CurveError>(())
//! ```

pub mod algorithms;
pub mod core;
pub mod models;
pub mod plot;
pub mod traits;
pub mod utils;

// Re-export key components for easier use by library consumers
pub use crate::algorithms::{
    pr_kfold_plot, roc_kfold_plot, CurveConfig, PrAggregator, PrEvaluation, RocAggregator, RocEvaluation,
};
pub use crate::core::{BinaryLabels, CurveError, Dataset, Labels, MacroCurve, PrCurve, Result, RocCurve, ScoreMatrix};
pub use crate::models::NearestCentroid;
pub use crate::plot::{Chart, Palette};
pub use crate::traits::ProbabilisticClassifier;
