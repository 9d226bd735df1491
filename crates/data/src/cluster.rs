//! Isotropic Gaussian cluster simulation.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use knnmap_knn::LabeledDataset;

use crate::error::DataError;

/// One simulated class: `n_points` draws around `center`.
///
/// Each coordinate is sampled independently from
/// `N(center[j], spread²)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSpec {
    label: String,
    center: Vec<f64>,
    spread: f64,
    n_points: usize,
}

impl ClusterSpec {
    /// Creates a cluster specification.
    pub fn new(label: impl Into<String>, center: Vec<f64>, spread: f64, n_points: usize) -> Self {
        Self {
            label: label.into(),
            center,
            spread,
            n_points,
        }
    }

    /// Class label given to every simulated point.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Cluster center.
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Per-coordinate standard deviation.
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Number of points to draw.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    fn validate(&self) -> Result<(), DataError> {
        if self.center.is_empty() {
            return Err(DataError::EmptyCenter {
                label: self.label.clone(),
            });
        }
        if self.center.iter().any(|c| !c.is_finite()) {
            return Err(DataError::NonFiniteCenter {
                label: self.label.clone(),
            });
        }
        if !self.spread.is_finite() || self.spread < 0.0 {
            return Err(DataError::InvalidSpread {
                label: self.label.clone(),
                spread: self.spread,
            });
        }
        Ok(())
    }
}

/// The two-class scenario: `"red"` around (0, 0) and `"blue"` around (2, 2).
pub fn default_clusters(n_per_cluster: usize, spread: f64) -> Vec<ClusterSpec> {
    vec![
        ClusterSpec::new("red", vec![0.0, 0.0], spread, n_per_cluster),
        ClusterSpec::new("blue", vec![2.0, 2.0], spread, n_per_cluster),
    ]
}

/// Draws every cluster in `specs`, in order, into one dataset.
///
/// # Errors
///
/// Returns [`DataError::NoClusters`] for an empty `specs`, a cluster
/// validation error (empty or non-finite center, bad spread, mismatched
/// dimension), or [`DataError::Dataset`] if no points were requested at
/// all.
///
/// # Example
///
/// ```
/// use knnmap_data::{default_clusters, simulate_clusters};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let dataset = simulate_clusters(&default_clusters(100, 0.25), &mut rng).unwrap();
/// assert_eq!(dataset.len(), 200);
/// assert_eq!(dataset.n_dims(), 2);
/// ```
pub fn simulate_clusters<R: Rng + ?Sized>(
    specs: &[ClusterSpec],
    rng: &mut R,
) -> Result<LabeledDataset<String>, DataError> {
    let first = specs.first().ok_or(DataError::NoClusters)?;
    let n_dims = first.center.len();
    for spec in specs {
        spec.validate()?;
        if spec.center.len() != n_dims {
            return Err(DataError::CenterDimensionMismatch {
                label: spec.label.clone(),
                expected: n_dims,
                found: spec.center.len(),
            });
        }
    }

    let total: usize = specs.iter().map(|s| s.n_points).sum();
    let mut points = Vec::with_capacity(total * n_dims);
    let mut labels = Vec::with_capacity(total);

    for spec in specs {
        let noise = Normal::new(0.0, spec.spread).map_err(|_| DataError::InvalidSpread {
            label: spec.label.clone(),
            spread: spec.spread,
        })?;
        for _ in 0..spec.n_points {
            points.extend(spec.center.iter().map(|&c| c + noise.sample(rng)));
            labels.push(spec.label.clone());
        }
        debug!(label = %spec.label, n_points = spec.n_points, "simulated cluster");
    }

    Ok(LabeledDataset::from_flat(points, n_dims, labels)?)
}
