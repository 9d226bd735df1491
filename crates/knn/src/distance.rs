//! p-norm distance computation.

use serde::Serialize;
use tracing::debug;

use crate::dataset::LabeledDataset;
use crate::error::KnnError;
use crate::norm::{NonStandardNormWarning, PNorm};

/// Distances from one query to every point of a dataset.
///
/// `values()[i]` is the distance to `dataset.point(i)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceVector {
    values: Vec<f64>,
    norm: PNorm,
    warning: Option<NonStandardNormWarning>,
}

impl DistanceVector {
    /// Distances in dataset order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the vector, returning the raw distances.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Number of distances (equals the dataset size).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for a vector produced by [`distances`].
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The norm actually applied, after any fallback.
    pub fn norm(&self) -> PNorm {
        self.norm
    }

    /// Present when the requested p was replaced by the Euclidean norm.
    pub fn warning(&self) -> Option<&NonStandardNormWarning> {
        self.warning.as_ref()
    }
}

/// Computes the p-norm distance from `query` to every point in `dataset`.
///
/// A non-standard `p` never fails: the Euclidean norm is used instead and
/// the returned vector carries a [`NonStandardNormWarning`].
///
/// # Errors
///
/// Returns [`KnnError::QueryDimensionMismatch`] if `query.len()` differs
/// from `dataset.n_dims()`, and [`KnnError::NonFiniteQuery`] if a query
/// coordinate is NaN or infinite.
///
/// # Example
///
/// ```
/// use knnmap_knn::{LabeledDataset, PNorm, distances};
///
/// let dataset = LabeledDataset::from_rows([[3.0, 4.0]], vec!["a"]).unwrap();
/// let d = distances(&dataset, &[0.0, 0.0], PNorm::EUCLIDEAN).unwrap();
/// assert_eq!(d.values(), &[5.0]);
/// ```
pub fn distances<L>(
    dataset: &LabeledDataset<L>,
    query: &[f64],
    p: PNorm,
) -> Result<DistanceVector, KnnError> {
    check_query(dataset, query)?;
    let (norm, warning) = resolve_norm(p);
    let mut values = vec![0.0; dataset.len()];
    pnorm_distances(dataset.as_flat(), dataset.n_dims(), query, norm, &mut values);
    Ok(DistanceVector {
        values,
        norm,
        warning,
    })
}

pub(crate) fn check_query<L>(dataset: &LabeledDataset<L>, query: &[f64]) -> Result<(), KnnError> {
    if query.len() != dataset.n_dims() {
        return Err(KnnError::QueryDimensionMismatch {
            query: query.len(),
            n_dims: dataset.n_dims(),
        });
    }
    if let Some(dim) = query.iter().position(|x| !x.is_finite()) {
        return Err(KnnError::NonFiniteQuery { dim });
    }
    Ok(())
}

/// Resolves `p` to the norm actually applied.
pub(crate) fn resolve_norm(p: PNorm) -> (PNorm, Option<NonStandardNormWarning>) {
    let (norm, warning) = p.resolve();
    if let Some(w) = &warning {
        debug!(requested = w.requested(), "non-standard p-norm, using Euclidean");
    }
    (norm, warning)
}

/// Writes the distance from `query` to each row of `points` into `out`.
///
/// `norm` must already be resolved; [`PNorm::Other`] is treated as p = 2.
///
/// # Panics
///
/// Debug-asserts that `points.len() % n_dims == 0`, `query.len() == n_dims`
/// and `out.len() == points.len() / n_dims`.
pub(crate) fn pnorm_distances(
    points: &[f64],
    n_dims: usize,
    query: &[f64],
    norm: PNorm,
    out: &mut [f64],
) {
    debug_assert_eq!(points.len() % n_dims, 0);
    debug_assert_eq!(query.len(), n_dims);
    debug_assert_eq!(out.len(), points.len() / n_dims);

    let rows = points.chunks_exact(n_dims);
    match norm {
        PNorm::Finite(p) if p.get() == 1 => {
            for (o, row) in out.iter_mut().zip(rows) {
                *o = taxicab(row, query);
            }
        }
        PNorm::Finite(p) if p.get() == 2 => {
            for (o, row) in out.iter_mut().zip(rows) {
                *o = euclidean(row, query);
            }
        }
        PNorm::Finite(p) => {
            let p = f64::from(p.get());
            for (o, row) in out.iter_mut().zip(rows) {
                *o = minkowski(row, query, p);
            }
        }
        PNorm::Infinity => {
            for (o, row) in out.iter_mut().zip(rows) {
                *o = chebyshev(row, query);
            }
        }
        PNorm::Other(_) => {
            for (o, row) in out.iter_mut().zip(rows) {
                *o = euclidean(row, query);
            }
        }
    }
}

#[inline]
fn taxicab(x: &[f64], q: &[f64]) -> f64 {
    x.iter().zip(q).map(|(a, b)| (a - b).abs()).sum()
}

#[inline]
fn euclidean(x: &[f64], q: &[f64]) -> f64 {
    x.iter()
        .zip(q)
        .map(|(a, b)| {
            let d = a - b;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Unlike `f64::max`, a NaN difference poisons the result.
#[inline]
fn chebyshev(x: &[f64], q: &[f64]) -> f64 {
    x.iter()
        .zip(q)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, |m, d| if d > m || d.is_nan() { d } else { m })
}

/// General p ≥ 3. Differences are scaled by the largest one so that
/// `diffᵖ` cannot overflow for large p.
#[inline]
fn minkowski(x: &[f64], q: &[f64], p: f64) -> f64 {
    let scale = chebyshev(x, q);
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let acc: f64 = x
        .iter()
        .zip(q)
        .map(|(a, b)| ((a - b).abs() / scale).powf(p))
        .sum();
    scale * acc.powf(p.recip())
}
