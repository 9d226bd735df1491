//! Error types for knnmap-data.

use std::path::PathBuf;

use knnmap_knn::KnnError;

/// Error type for all fallible operations in the knnmap-data crate.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// No cluster specifications were given.
    #[error("no clusters to simulate")]
    NoClusters,

    /// A cluster has a zero-length center.
    #[error("cluster '{label}' has an empty center")]
    EmptyCenter { label: String },

    /// A cluster center differs in dimension from the first cluster.
    #[error("cluster '{label}' has {found} coordinates, expected {expected}")]
    CenterDimensionMismatch {
        label: String,
        expected: usize,
        found: usize,
    },

    /// A cluster spread is negative or non-finite.
    #[error("cluster '{label}' has invalid spread {spread}")]
    InvalidSpread { label: String, spread: f64 },

    /// A cluster center coordinate is NaN or infinite.
    #[error("cluster '{label}' has a non-finite center")]
    NonFiniteCenter { label: String },

    /// The input file does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A CSV header has fewer than two columns.
    #[error("CSV needs at least one coordinate column and a label column, got {columns} column(s)")]
    TooFewColumns { columns: usize },

    /// A coordinate field is not a finite number (`NaN` and `inf` included).
    #[error("line {line}, column '{column}': cannot parse {value:?} as a finite number")]
    ParseCoordinate {
        line: u64,
        column: String,
        value: String,
    },

    /// Wraps an error originating from the csv crate.
    #[error("csv error: {reason}")]
    Csv { reason: String },

    /// Wraps an I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The assembled points violate a dataset invariant.
    #[error(transparent)]
    Dataset(#[from] KnnError),
}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        DataError::Csv {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_clusters_display() {
        assert_eq!(DataError::NoClusters.to_string(), "no clusters to simulate");
    }

    #[test]
    fn test_center_mismatch_display() {
        let err = DataError::CenterDimensionMismatch {
            label: "blue".to_string(),
            expected: 2,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "cluster 'blue' has 3 coordinates, expected 2"
        );
    }

    #[test]
    fn test_invalid_spread_display() {
        let err = DataError::InvalidSpread {
            label: "red".to_string(),
            spread: -0.5,
        };
        assert_eq!(err.to_string(), "cluster 'red' has invalid spread -0.5");
    }

    #[test]
    fn test_file_not_found_display() {
        let err = DataError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn test_parse_coordinate_display() {
        let err = DataError::ParseCoordinate {
            line: 3,
            column: "x1".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "line 3, column 'x1': cannot parse \"abc\" as a finite number"
        );
    }

    #[test]
    fn test_dataset_is_transparent() {
        let err = DataError::from(KnnError::EmptyDataset);
        assert_eq!(err.to_string(), "dataset is empty");
    }
}
