//! Output type for vote queries.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::norm::{NonStandardNormWarning, PNorm};

/// Result of a kNN vote.
///
/// Proportions are `count / k` where `k` is the *requested* neighbour
/// count. Every point tied at the k-th smallest distance is counted, so
/// when ties inflate the neighbour set past k the proportions sum to more
/// than 1.0. This is kept as-is rather than renormalised; use
/// [`VoteResult::total`] to detect it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteResult<L: Ord> {
    proportions: BTreeMap<L, f64>,
    counts: BTreeMap<L, usize>,
    neighbours: Vec<usize>,
    threshold: f64,
    k: usize,
    norm: PNorm,
    warning: Option<NonStandardNormWarning>,
}

impl<L: Ord> VoteResult<L> {
    /// Creates a new `VoteResult` from per-label counts.
    pub(crate) fn new(
        counts: BTreeMap<L, usize>,
        neighbours: Vec<usize>,
        threshold: f64,
        k: usize,
        norm: PNorm,
        warning: Option<NonStandardNormWarning>,
    ) -> Self
    where
        L: Clone,
    {
        let proportions = counts
            .iter()
            .map(|(label, &count)| (label.clone(), count as f64 / k as f64))
            .collect();
        Self {
            proportions,
            counts,
            neighbours,
            threshold,
            k,
            norm,
            warning,
        }
    }

    /// Proportion per label present among the selected neighbours.
    pub fn proportions(&self) -> &BTreeMap<L, f64> {
        &self.proportions
    }

    /// Proportion for `label`, or 0.0 if no selected neighbour carries it.
    pub fn proportion(&self, label: &L) -> f64 {
        self.proportions.get(label).copied().unwrap_or(0.0)
    }

    /// Raw neighbour count per label.
    pub fn counts(&self) -> &BTreeMap<L, usize> {
        &self.counts
    }

    /// Dataset indices of the selected neighbours, nearest first.
    pub fn neighbours(&self) -> &[usize] {
        &self.neighbours
    }

    /// Size of the selected neighbour set (at least k, more under ties).
    pub fn n_selected(&self) -> usize {
        self.neighbours.len()
    }

    /// The k-th smallest distance; every neighbour lies at or within it.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The requested k.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The norm actually used, after any fallback.
    pub fn norm(&self) -> PNorm {
        self.norm
    }

    /// Present when the requested p was replaced by the Euclidean norm.
    pub fn warning(&self) -> Option<&NonStandardNormWarning> {
        self.warning.as_ref()
    }

    /// Sum of all proportions: `n_selected / k`.
    pub fn total(&self) -> f64 {
        self.proportions.values().sum()
    }

    /// The label with the largest proportion.
    ///
    /// When several labels share the maximum, the smallest one under `Ord`
    /// wins. Returns `None` only if no neighbour was selected.
    pub fn winner(&self) -> Option<&L> {
        let mut best: Option<(&L, usize)> = None;
        for (label, &count) in &self.counts {
            match best {
                Some((_, c)) if c >= count => {}
                _ => best = Some((label, count)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// Proportion of the winning label.
    pub fn winner_proportion(&self) -> Option<f64> {
        self.winner().map(|label| self.proportion(label))
    }

    /// All labels sharing the maximum count, in `Ord` order.
    pub fn leaders(&self) -> Vec<&L> {
        let Some(max) = self.counts.values().copied().max() else {
            return Vec::new();
        };
        self.counts
            .iter()
            .filter(|&(_, &c)| c == max)
            .map(|(label, _)| label)
            .collect()
    }

    /// `true` when more than one label shares the maximum proportion.
    pub fn is_tied(&self) -> bool {
        self.leaders().len() > 1
    }
}
