//! Rectangular query lattices.

use serde::Serialize;

use knnmap_knn::LabeledDataset;

use crate::error::SurfaceError;

/// An `nx × ny` lattice spanning `[x_min, x_max] × [y_min, y_max]`.
///
/// Both endpoints of each axis are lattice points. Cells are numbered
/// row-major with y outer: cell `iy * nx + ix`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSpec {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    nx: usize,
    ny: usize,
}

impl GridSpec {
    /// Creates a grid. Call [`GridSpec::validate`] before use.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, nx: usize, ny: usize) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            nx,
            ny,
        }
    }

    /// Fits a grid to the bounding box of a 2-D dataset, widened by
    /// `margin` on every side.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::NotTwoDimensional`] for datasets that are not 2-D,
    /// [`SurfaceError::InvalidMargin`] for a negative or non-finite margin,
    /// and any [`GridSpec::validate`] error (e.g. a zero-width box with
    /// zero margin).
    pub fn around<L>(
        dataset: &LabeledDataset<L>,
        margin: f64,
        nx: usize,
        ny: usize,
    ) -> Result<Self, SurfaceError> {
        if dataset.n_dims() != 2 {
            return Err(SurfaceError::NotTwoDimensional {
                n_dims: dataset.n_dims(),
            });
        }
        if !margin.is_finite() || margin < 0.0 {
            return Err(SurfaceError::InvalidMargin { margin });
        }
        let bounds = dataset.bounds();
        let grid = Self::new(
            bounds[0].0 - margin,
            bounds[0].1 + margin,
            bounds[1].0 - margin,
            bounds[1].1 + margin,
            nx,
            ny,
        );
        grid.validate()?;
        Ok(grid)
    }

    /// Checks finite, increasing bounds, at least two steps per axis, and a
    /// cell count that fits in a `usize`.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        for (axis, min, max) in [('x', self.x_min, self.x_max), ('y', self.y_min, self.y_max)] {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(SurfaceError::InvalidBounds { axis, min, max });
            }
        }
        for (axis, steps) in [('x', self.nx), ('y', self.ny)] {
            if steps < 2 {
                return Err(SurfaceError::TooFewSteps { axis, steps });
            }
        }
        if self.nx.checked_mul(self.ny).is_none() {
            return Err(SurfaceError::TooManyCells {
                nx: self.nx,
                ny: self.ny,
            });
        }
        Ok(())
    }

    /// Number of columns.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of rows.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of cells. Only meaningful for a validated grid.
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// `(x_min, x_max)`.
    pub fn x_range(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    /// `(y_min, y_max)`.
    pub fn y_range(&self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }

    /// Query point of column `ix`, row `iy`.
    pub fn coords(&self, ix: usize, iy: usize) -> [f64; 2] {
        [
            lerp(self.x_min, self.x_max, ix, self.nx),
            lerp(self.y_min, self.y_max, iy, self.ny),
        ]
    }

    /// `(ix, iy)` of a row-major cell index.
    pub fn position(&self, cell: usize) -> (usize, usize) {
        (cell % self.nx, cell / self.nx)
    }
}

/// The `i`-th of `n` evenly spaced points from `lo` to `hi` inclusive.
fn lerp(lo: f64, hi: f64, i: usize, n: usize) -> f64 {
    if i + 1 == n {
        return hi;
    }
    lo + (hi - lo) * i as f64 / (n - 1) as f64
}
