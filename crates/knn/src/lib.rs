//! Brute-force k-nearest-neighbour voting under any p-norm.
//!
//! This crate provides the two operations a kNN classifier is built from:
//!
//! | Operation | Returns | |
//! |-----------|---------|---|
//! | [`distances`] | [`DistanceVector`] | p-norm distance from a query to every point |
//! | [`classify`] | [`VoteResult`] | label proportions among the k nearest points |
//!
//! Supported norms are p = 1, 2, 3, … and p = ∞ ([`PNorm`]). Any other
//! requested p falls back to the Euclidean norm and the result carries a
//! [`NonStandardNormWarning`]; it never fails the query.
//!
//! # Quick start
//!
//! ```
//! use knnmap_knn::{LabeledDataset, PNorm, classify};
//!
//! let dataset = LabeledDataset::from_rows(
//!     [[0.0, 0.0], [0.2, 0.1], [2.0, 2.0], [2.1, 1.9]],
//!     vec!["red", "red", "blue", "blue"],
//! )
//! .unwrap();
//!
//! let vote = classify(&dataset, &[1.8, 2.0], 3, PNorm::TAXICAB).unwrap();
//! assert_eq!(vote.winner(), Some(&"blue"));
//! ```
//!
//! # Ties
//!
//! Every point tied at the k-th smallest distance is counted, and
//! proportions are divided by the requested k, so they can sum to more
//! than 1.0. [`VoteResult::winner`] breaks equal proportions in favour of
//! the smallest label.
//!
//! # Architecture
//!
//! ```text
//! classify()
//!   ├─ validate inputs
//!   ├─ pnorm_distances()   (distance.rs)
//!   ├─ kth_smallest()      (select.rs)
//!   ├─ select_within()     (select.rs)
//!   └─ tally labels        (result.rs)
//! ```
//!
//! For hot loops, use [`classify_with_scratch`] with a reusable
//! [`KnnScratch`] to avoid per-call heap allocation.

pub mod config;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod knn;
pub mod norm;
pub mod result;

pub(crate) mod select;

pub use config::KnnConfig;
pub use dataset::LabeledDataset;
pub use distance::{DistanceVector, distances};
pub use error::KnnError;
pub use knn::{KnnScratch, classify, classify_with_config, classify_with_scratch};
pub use norm::{NonStandardNormWarning, PNorm, ParsePNormError};
pub use result::VoteResult;
