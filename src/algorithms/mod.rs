pub mod config;
pub mod cross_val;
pub mod curves;
pub mod precision_recall;
pub mod roc;

pub use config::CurveConfig;
pub use cross_val::{cross_val_predict_proba, StratifiedKFold};
pub use curves::{average_precision_score, precision_recall_curve, roc_curve};
pub use precision_recall::{mean_average_precision, per_class_precision_recall, pr_kfold_plot, PrAggregator, PrEvaluation};
pub use roc::{macro_average_roc, per_class_roc, roc_kfold_plot, RocAggregator, RocEvaluation};
