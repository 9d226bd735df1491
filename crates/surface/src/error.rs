//! Surface rendering error types.

use knnmap_knn::KnnError;

/// Errors that can occur while building or writing a decision surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// A grid axis has non-finite bounds or `min >= max`.
    #[error("invalid {axis} range [{min}, {max}]")]
    InvalidBounds { axis: char, min: f64, max: f64 },

    /// A grid axis has fewer than two steps.
    #[error("{axis} axis needs at least 2 steps, got {steps}")]
    TooFewSteps { axis: char, steps: usize },

    /// `nx × ny` does not fit in a `usize`.
    #[error("grid of {nx} × {ny} cells is too large")]
    TooManyCells { nx: usize, ny: usize },

    /// The margin around a dataset is negative or non-finite.
    #[error("grid margin must be finite and non-negative, got {margin}")]
    InvalidMargin { margin: f64 },

    /// The dataset is not two-dimensional.
    #[error("decision surfaces need 2-D points, dataset has {n_dims} dimension(s)")]
    NotTwoDimensional { n_dims: usize },

    /// A vote was rejected.
    #[error(transparent)]
    Knn(#[from] KnnError),

    /// Wraps an I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Wraps an error originating from the csv crate.
    #[error("csv error: {reason}")]
    Csv { reason: String },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl From<csv::Error> for SurfaceError {
    fn from(e: csv::Error) -> Self {
        SurfaceError::Csv {
            reason: e.to_string(),
        }
    }
}
