//! Labeled point sets.

use crate::error::KnnError;

/// An immutable set of points, each paired by position with a label.
///
/// Coordinates are stored row-major in one flat buffer
/// `[n_points × n_dims]`. Construction guarantees at least one point, at
/// least one dimension, a uniform dimension across points, finite
/// coordinates, and exactly one label per point.
///
/// # Example
///
/// ```
/// use knnmap_knn::LabeledDataset;
///
/// let dataset = LabeledDataset::from_rows(
///     [[0.0, 0.0], [1.0, 1.0], [5.0, 5.0]],
///     vec!["a", "a", "b"],
/// )
/// .unwrap();
///
/// assert_eq!(dataset.len(), 3);
/// assert_eq!(dataset.n_dims(), 2);
/// assert_eq!(dataset.point(2), &[5.0, 5.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDataset<L> {
    points: Vec<f64>,
    n_dims: usize,
    labels: Vec<L>,
}

impl<L> LabeledDataset<L> {
    /// Builds a dataset from a flat row-major coordinate buffer.
    ///
    /// # Errors
    ///
    /// [`KnnError::ZeroDimension`] if `n_dims == 0`,
    /// [`KnnError::EmptyDataset`] if `points` is empty,
    /// [`KnnError::PointShapeMismatch`] if `points.len()` is not a multiple
    /// of `n_dims`, [`KnnError::LabelCountMismatch`] if the number of
    /// rows differs from `labels.len()`, and
    /// [`KnnError::NonFiniteCoordinate`] for a NaN or infinite coordinate.
    pub fn from_flat(points: Vec<f64>, n_dims: usize, labels: Vec<L>) -> Result<Self, KnnError> {
        if n_dims == 0 {
            return Err(KnnError::ZeroDimension);
        }
        if points.is_empty() {
            return Err(KnnError::EmptyDataset);
        }
        if !points.len().is_multiple_of(n_dims) {
            return Err(KnnError::PointShapeMismatch {
                len: points.len(),
                n_dims,
            });
        }
        let n_points = points.len() / n_dims;
        if n_points != labels.len() {
            return Err(KnnError::LabelCountMismatch {
                points: n_points,
                labels: labels.len(),
            });
        }
        if let Some(pos) = points.iter().position(|x| !x.is_finite()) {
            return Err(KnnError::NonFiniteCoordinate {
                index: pos / n_dims,
                dim: pos % n_dims,
            });
        }
        Ok(Self {
            points,
            n_dims,
            labels,
        })
    }

    /// Builds a dataset from one slice-like row per point.
    ///
    /// The dimension is taken from the first row.
    ///
    /// # Errors
    ///
    /// [`KnnError::EmptyDataset`] if there are no rows,
    /// [`KnnError::ZeroDimension`] if the first row is empty,
    /// [`KnnError::RaggedPoint`] if a later row differs in length,
    /// [`KnnError::NonFiniteCoordinate`] for a NaN or infinite coordinate,
    /// and [`KnnError::LabelCountMismatch`] if the row and label counts differ.
    pub fn from_rows<I, P>(rows: I, labels: Vec<L>) -> Result<Self, KnnError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[f64]>,
    {
        let mut points = Vec::new();
        let mut n_dims = None;
        let mut n_points = 0;

        for (index, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *n_dims.get_or_insert(row.len());
            if expected == 0 {
                return Err(KnnError::ZeroDimension);
            }
            if row.len() != expected {
                return Err(KnnError::RaggedPoint {
                    index,
                    expected,
                    found: row.len(),
                });
            }
            if let Some(dim) = row.iter().position(|x| !x.is_finite()) {
                return Err(KnnError::NonFiniteCoordinate { index, dim });
            }
            points.extend_from_slice(row);
            n_points += 1;
        }

        let Some(n_dims) = n_dims else {
            return Err(KnnError::EmptyDataset);
        };
        if n_points != labels.len() {
            return Err(KnnError::LabelCountMismatch {
                points: n_points,
                labels: labels.len(),
            });
        }
        Ok(Self {
            points,
            n_dims,
            labels,
        })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; construction rejects empty datasets.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of coordinates per point.
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Coordinates of point `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn point(&self, index: usize) -> &[f64] {
        &self.points[index * self.n_dims..(index + 1) * self.n_dims]
    }

    /// Label of point `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn label(&self, index: usize) -> &L {
        &self.labels[index]
    }

    /// The flat row-major coordinate buffer.
    pub fn as_flat(&self) -> &[f64] {
        &self.points
    }

    /// All labels, in point order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Iterates over `(coordinates, label)` pairs in point order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &L)> + '_ {
        self.points.chunks_exact(self.n_dims).zip(self.labels.iter())
    }

    /// Per-dimension `(min, max)` over all points.
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        let mut bounds = vec![(f64::INFINITY, f64::NEG_INFINITY); self.n_dims];
        for row in self.points.chunks_exact(self.n_dims) {
            for (b, &x) in bounds.iter_mut().zip(row) {
                b.0 = b.0.min(x);
                b.1 = b.1.max(x);
            }
        }
        bounds
    }
}
