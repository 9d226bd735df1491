//! Error types for the knnmap-knn crate.

/// Invalid-input errors for dataset construction, distance and vote queries.
///
/// Every variant is a contract violation by the caller: the query is
/// rejected with no partial result, and reissuing it unchanged fails again.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnnError {
    /// Returned when a dataset would contain no points.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Returned when points are declared with zero coordinates.
    #[error("points must have at least one dimension")]
    ZeroDimension,

    /// Returned when the number of labels differs from the number of points.
    #[error("{points} points but {labels} labels")]
    LabelCountMismatch {
        /// Number of points.
        points: usize,
        /// Number of labels.
        labels: usize,
    },

    /// Returned when a flat coordinate buffer is not divisible by n_dims.
    #[error("points length {len} is not divisible by n_dims {n_dims}")]
    PointShapeMismatch {
        /// Length of the flat coordinate buffer.
        len: usize,
        /// Declared dimension.
        n_dims: usize,
    },

    /// Returned when one row has a different dimension than the first row.
    #[error("point {index} has {found} coordinates, expected {expected}")]
    RaggedPoint {
        /// Position of the offending point.
        index: usize,
        /// Dimension of the first point.
        expected: usize,
        /// Dimension of the offending point.
        found: usize,
    },

    /// Returned when a dataset coordinate is NaN or infinite.
    #[error("point {index} has a non-finite coordinate in dimension {dim}")]
    NonFiniteCoordinate {
        /// Position of the offending point.
        index: usize,
        /// Dimension of the offending coordinate.
        dim: usize,
    },

    /// Returned when a query coordinate is NaN or infinite.
    #[error("query has a non-finite coordinate in dimension {dim}")]
    NonFiniteQuery {
        /// Dimension of the offending coordinate.
        dim: usize,
    },

    /// Returned when the query dimension does not match the dataset.
    #[error("query has {query} coordinates but dataset points have {n_dims}")]
    QueryDimensionMismatch {
        /// Length of the query point.
        query: usize,
        /// Dimension of the dataset.
        n_dims: usize,
    },

    /// Returned when k is outside `[1, n]`.
    #[error("k must be in [1, {n}], got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
        /// Number of points in the dataset.
        n: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_dataset() {
        assert_eq!(KnnError::EmptyDataset.to_string(), "dataset is empty");
    }

    #[test]
    fn error_zero_dimension() {
        assert_eq!(
            KnnError::ZeroDimension.to_string(),
            "points must have at least one dimension"
        );
    }

    #[test]
    fn error_label_count_mismatch() {
        let e = KnnError::LabelCountMismatch {
            points: 4,
            labels: 3,
        };
        assert_eq!(e.to_string(), "4 points but 3 labels");
    }

    #[test]
    fn error_point_shape_mismatch() {
        let e = KnnError::PointShapeMismatch { len: 7, n_dims: 2 };
        assert_eq!(e.to_string(), "points length 7 is not divisible by n_dims 2");
    }

    #[test]
    fn error_ragged_point() {
        let e = KnnError::RaggedPoint {
            index: 3,
            expected: 2,
            found: 5,
        };
        assert_eq!(e.to_string(), "point 3 has 5 coordinates, expected 2");
    }

    #[test]
    fn error_query_dimension_mismatch() {
        let e = KnnError::QueryDimensionMismatch {
            query: 3,
            n_dims: 2,
        };
        assert_eq!(
            e.to_string(),
            "query has 3 coordinates but dataset points have 2"
        );
    }

    #[test]
    fn error_non_finite_coordinate() {
        let e = KnnError::NonFiniteCoordinate { index: 4, dim: 1 };
        assert_eq!(
            e.to_string(),
            "point 4 has a non-finite coordinate in dimension 1"
        );
        let e = KnnError::NonFiniteQuery { dim: 0 };
        assert_eq!(e.to_string(), "query has a non-finite coordinate in dimension 0");
    }

    #[test]
    fn error_invalid_k() {
        let e = KnnError::InvalidK { k: 0, n: 10 };
        assert_eq!(e.to_string(), "k must be in [1, 10], got 0");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<KnnError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<KnnError>();
    }
}
