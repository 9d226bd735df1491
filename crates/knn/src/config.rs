//! Configuration for vote queries.

use crate::error::KnnError;
use crate::norm::PNorm;

/// Parameters of a kNN vote: how many neighbours and which norm.
///
/// # Example
///
/// ```
/// use knnmap_knn::{KnnConfig, PNorm};
///
/// let config = KnnConfig::new(5).with_norm(PNorm::Infinity);
///
/// assert!(config.validate(100).is_ok());
/// assert!(config.validate(4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnnConfig {
    /// Number of nearest neighbours requested.
    k: usize,
    /// Requested distance norm, before any fallback.
    norm: PNorm,
}

impl KnnConfig {
    /// Creates a configuration with the given k and the Euclidean norm.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            norm: PNorm::EUCLIDEAN,
        }
    }

    /// Sets the distance norm.
    pub fn with_norm(mut self, norm: PNorm) -> Self {
        self.norm = norm;
        self
    }

    /// Returns the number of neighbours requested.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the requested norm.
    pub fn norm(&self) -> PNorm {
        self.norm
    }

    /// Checks `1 <= k <= n_points`.
    ///
    /// The norm is never rejected; see [`PNorm::resolve`].
    pub fn validate(&self, n_points: usize) -> Result<(), KnnError> {
        if self.k < 1 || self.k > n_points {
            return Err(KnnError::InvalidK {
                k: self.k,
                n: n_points,
            });
        }
        Ok(())
    }
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = KnnConfig::default();
        assert_eq!(cfg.k(), 1);
        assert_eq!(cfg.norm(), PNorm::EUCLIDEAN);
    }

    #[test]
    fn test_builder() {
        let cfg = KnnConfig::new(7).with_norm(PNorm::TAXICAB);
        assert_eq!(cfg.k(), 7);
        assert_eq!(cfg.norm(), PNorm::TAXICAB);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(KnnConfig::new(1).validate(1).is_ok());
        assert!(KnnConfig::new(10).validate(10).is_ok());
        assert_eq!(
            KnnConfig::new(0).validate(10),
            Err(KnnError::InvalidK { k: 0, n: 10 })
        );
        assert_eq!(
            KnnConfig::new(11).validate(10),
            Err(KnnError::InvalidK { k: 11, n: 10 })
        );
    }

    #[test]
    fn test_validate_ignores_nonstandard_norm() {
        let cfg = KnnConfig::new(3).with_norm(PNorm::Other(0.0));
        assert!(cfg.validate(3).is_ok());
    }
}
