//! # knnmap-surface
//!
//! Renders the decision surface of a kNN classifier over a 2-D lattice:
//! one independent vote per grid cell, evaluated in parallel, with the
//! winning label of each cell kept for output.
//!
//! ```
//! use knnmap_knn::{KnnConfig, LabeledDataset, PNorm};
//! use knnmap_surface::{GridSpec, render_ascii, render_surface};
//!
//! let dataset = LabeledDataset::from_rows(
//!     [[0.0, 0.0], [0.2, 0.1], [2.0, 2.0], [1.9, 2.2]],
//!     vec!["red", "red", "blue", "blue"],
//! )
//! .unwrap();
//! let grid = GridSpec::new(-1.0, 3.0, -1.0, 3.0, 20, 10);
//! let config = KnnConfig::new(3).with_norm(PNorm::EUCLIDEAN);
//!
//! let surface = render_surface(&dataset, &grid, &config).unwrap();
//! assert_eq!(surface.label_at(0, 0), Some(&"red"));
//! assert_eq!(surface.label_at(19, 9), Some(&"blue"));
//! println!("{}", render_ascii(&surface));
//! ```

mod error;
mod grid;
mod output;
mod render;

pub use error::SurfaceError;
pub use grid::GridSpec;
pub use output::{render_ascii, to_json, write_csv, write_csv_file};
pub use render::{Cell, DecisionSurface, render_surface};
