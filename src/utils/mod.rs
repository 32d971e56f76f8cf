//! Numeric helpers shared by the curve aggregators.

pub mod binarize;
pub mod integrate;
pub mod interp;

pub use binarize::{distinct_labels, label_binarize};
pub use integrate::area_under_curve;
pub use interp::{interp, unique_sorted};
