//! Vote entry points and scratch buffer management.

use std::collections::BTreeMap;

use tracing::trace;

use crate::config::KnnConfig;
use crate::dataset::LabeledDataset;
use crate::distance::{check_query, pnorm_distances, resolve_norm};
use crate::error::KnnError;
use crate::norm::PNorm;
use crate::result::VoteResult;
use crate::select::{kth_smallest, select_within};

/// Pre-allocated scratch buffers for vote queries.
///
/// Reuse across calls to [`classify_with_scratch`] to avoid per-query heap
/// allocation when sweeping many queries over the same dataset (e.g. one
/// query per cell of a rendering grid).
///
/// # Example
///
/// ```
/// use knnmap_knn::KnnScratch;
///
/// let mut scratch = KnnScratch::new(200);
/// // Use with classify_with_scratch() in a loop...
/// ```
#[derive(Debug, Clone, Default)]
pub struct KnnScratch {
    /// Distance to every dataset point.
    pub(crate) distances: Vec<f64>,
    /// Copy of `distances` permuted by the order-statistic selection.
    pub(crate) order: Vec<f64>,
    /// (distance, index) pairs of the selected neighbours.
    pub(crate) pairs: Vec<(f64, usize)>,
    /// Indices of the selected neighbours.
    pub(crate) neighbours: Vec<usize>,
}

impl KnnScratch {
    /// Creates scratch buffers with capacity for `max_points` dataset points.
    pub fn new(max_points: usize) -> Self {
        Self {
            distances: Vec::with_capacity(max_points),
            order: Vec::with_capacity(max_points),
            pairs: Vec::with_capacity(max_points),
            neighbours: Vec::with_capacity(max_points),
        }
    }
}

/// Validates k and the query dimension against `dataset`.
fn validate_inputs<L>(
    dataset: &LabeledDataset<L>,
    query: &[f64],
    config: &KnnConfig,
) -> Result<(), KnnError> {
    config.validate(dataset.len())?;
    check_query(dataset, query)
}

/// Internal implementation that assumes all inputs are validated.
fn classify_inner<L: Clone + Ord>(
    dataset: &LabeledDataset<L>,
    query: &[f64],
    config: &KnnConfig,
    scratch: &mut KnnScratch,
) -> VoteResult<L> {
    let k = config.k();
    let (norm, warning) = resolve_norm(config.norm());

    scratch.distances.clear();
    scratch.distances.resize(dataset.len(), 0.0);
    pnorm_distances(
        dataset.as_flat(),
        dataset.n_dims(),
        query,
        norm,
        &mut scratch.distances,
    );

    let threshold = kth_smallest(&scratch.distances, k, &mut scratch.order);
    select_within(
        &scratch.distances,
        threshold,
        &mut scratch.pairs,
        &mut scratch.neighbours,
    );
    if scratch.neighbours.len() > k {
        trace!(
            k,
            n_selected = scratch.neighbours.len(),
            threshold,
            "ties at the k-th distance widened the neighbour set"
        );
    }

    let mut counts: BTreeMap<L, usize> = BTreeMap::new();
    for &i in &scratch.neighbours {
        *counts.entry(dataset.label(i).clone()).or_insert(0) += 1;
    }

    VoteResult::new(
        counts,
        scratch.neighbours.clone(),
        threshold,
        k,
        norm,
        warning,
    )
}

/// Classifies `query` by a vote among its `k` nearest points under `p`.
///
/// Every point tied with the k-th nearest distance joins the vote, and
/// each label's proportion is its neighbour count divided by `k`; see
/// [`VoteResult`] for the consequences.
///
/// # Errors
///
/// Returns [`KnnError::InvalidK`] unless `1 <= k <= dataset.len()`,
/// [`KnnError::QueryDimensionMismatch`] if the query dimension differs
/// from the dataset's, and [`KnnError::NonFiniteQuery`] for a NaN or
/// infinite query coordinate.
///
/// # Example
///
/// ```
/// use knnmap_knn::{LabeledDataset, PNorm, classify};
///
/// let dataset = LabeledDataset::from_rows(
///     [[0.0, 0.0], [0.1, 0.0], [2.0, 2.0]],
///     vec!["red", "red", "blue"],
/// )
/// .unwrap();
///
/// let vote = classify(&dataset, &[0.0, 0.1], 2, PNorm::EUCLIDEAN).unwrap();
/// assert_eq!(vote.winner(), Some(&"red"));
/// assert_eq!(vote.proportion(&"red"), 1.0);
/// ```
pub fn classify<L: Clone + Ord>(
    dataset: &LabeledDataset<L>,
    query: &[f64],
    k: usize,
    p: PNorm,
) -> Result<VoteResult<L>, KnnError> {
    classify_with_config(dataset, query, &KnnConfig::new(k).with_norm(p))
}

/// Same as [`classify`], taking k and p from a [`KnnConfig`].
///
/// # Errors
///
/// See [`classify`].
pub fn classify_with_config<L: Clone + Ord>(
    dataset: &LabeledDataset<L>,
    query: &[f64],
    config: &KnnConfig,
) -> Result<VoteResult<L>, KnnError> {
    validate_inputs(dataset, query, config)?;
    let mut scratch = KnnScratch::new(dataset.len());
    Ok(classify_inner(dataset, query, config, &mut scratch))
}

/// Same as [`classify_with_config`], reusing pre-allocated scratch buffers.
///
/// Buffers grow as needed and never shrink.
///
/// # Errors
///
/// See [`classify`].
pub fn classify_with_scratch<L: Clone + Ord>(
    dataset: &LabeledDataset<L>,
    query: &[f64],
    config: &KnnConfig,
    scratch: &mut KnnScratch,
) -> Result<VoteResult<L>, KnnError> {
    validate_inputs(dataset, query, config)?;
    Ok(classify_inner(dataset, query, config, scratch))
}
