//! # knnmap-data
//!
//! Builds the [`LabeledDataset`]s that the kNN classifier votes over:
//! simulated isotropic Gaussian clusters, or points read from CSV.
//!
//! CSV files carry a header row; every column but the last is a numeric
//! coordinate and the last column is the label:
//!
//! ```text
//! x0,x1,label
//! 0.03,-0.11,red
//! 2.04,1.97,blue
//! ```

mod cluster;
mod csv_io;
mod error;

pub use cluster::{ClusterSpec, default_clusters, simulate_clusters};
pub use csv_io::{read_dataset, read_dataset_csv, write_dataset, write_dataset_csv};
pub use error::DataError;

pub use knnmap_knn::LabeledDataset;
