// src/core/errors.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurveError {
    #[error("Invalid Input: {0}")]
    InvalidInput(String),
    #[error("Incompatible Dimensions: {0}")]
    IncompatibleDimensions(String),
    #[error("Model Prediction Error: {0}")]
    ModelPredictionError(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
    #[error("Ndarray Error: {0}")]
    NdarrayError(#[from] ndarray::ShapeError),
    /// Failure inside the plotting backend while rendering a chart.
    #[error("Plot Error: {0}")]
    PlotError(String),
}

// Convenience type alias for Result
pub type Result<T> = std::result::Result<T, CurveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_shape_error_converts_with_question_mark() {
        fn build() -> Result<Array2<f64>> {
            Ok(Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0])?)
        }
        let err = build().unwrap_err();
        assert!(matches!(err, CurveError::NdarrayError(_)));
        assert!(err.to_string().starts_with("Ndarray Error:"));
    }

    #[test]
    fn test_display_prefixes_variant() {
        let err = CurveError::IncompatibleDimensions("4 != 3".to_string());
        assert_eq!(err.to_string(), "Incompatible Dimensions: 4 != 3");
    }
}
