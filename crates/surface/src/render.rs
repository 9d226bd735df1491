//! Parallel per-cell voting.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use knnmap_knn::{KnnConfig, KnnScratch, LabeledDataset, PNorm, classify_with_scratch};

use crate::error::SurfaceError;
use crate::grid::GridSpec;

/// The outcome of one grid cell's vote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell<L> {
    label: Option<L>,
    proportion: f64,
    tied: bool,
    warned: bool,
}

impl<L> Cell<L> {
    /// Winning label, `None` only when no neighbour could be selected.
    pub fn label(&self) -> Option<&L> {
        self.label.as_ref()
    }

    /// Vote proportion of the winning label (0.0 without a winner).
    pub fn proportion(&self) -> f64 {
        self.proportion
    }

    /// `true` when the winner shared its proportion with another label.
    pub fn is_tied(&self) -> bool {
        self.tied
    }

    /// `true` when this cell's vote fell back to the Euclidean norm.
    pub fn is_warned(&self) -> bool {
        self.warned
    }
}

/// Winning labels over every cell of a [`GridSpec`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionSurface<L> {
    grid: GridSpec,
    k: usize,
    requested_norm: PNorm,
    norm: PNorm,
    cells: Vec<Cell<L>>,
}

impl<L> DecisionSurface<L> {
    /// The lattice the surface was rendered on.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Requested neighbour count.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Norm requested by the caller.
    pub fn requested_norm(&self) -> PNorm {
        self.requested_norm
    }

    /// Norm actually used, after any fallback.
    pub fn norm(&self) -> PNorm {
        self.norm
    }

    /// All cells, row-major with y outer.
    pub fn cells(&self) -> &[Cell<L>] {
        &self.cells
    }

    /// Cell at column `ix`, row `iy`.
    ///
    /// # Panics
    ///
    /// Panics if `ix >= nx` or `iy >= ny`.
    pub fn cell(&self, ix: usize, iy: usize) -> &Cell<L> {
        assert!(ix < self.grid.nx() && iy < self.grid.ny());
        &self.cells[iy * self.grid.nx() + ix]
    }

    /// Winning label at column `ix`, row `iy`.
    pub fn label_at(&self, ix: usize, iy: usize) -> Option<&L> {
        self.cell(ix, iy).label()
    }

    /// Query coordinates of column `ix`, row `iy`.
    pub fn coords(&self, ix: usize, iy: usize) -> [f64; 2] {
        self.grid.coords(ix, iy)
    }

    /// Number of cells whose winner was tied.
    pub fn n_tied(&self) -> usize {
        self.cells.iter().filter(|c| c.tied).count()
    }

    /// Number of cells whose vote carried a non-standard norm warning.
    pub fn n_warned(&self) -> usize {
        self.cells.iter().filter(|c| c.warned).count()
    }
}

impl<L: Ord> DecisionSurface<L> {
    /// Number of cells won by each label.
    pub fn label_counts(&self) -> BTreeMap<&L, usize> {
        let mut counts = BTreeMap::new();
        for label in self.cells.iter().filter_map(Cell::label) {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }
}

/// Votes once per cell of `grid` and keeps each cell's winning label.
///
/// Cells are independent and evaluated in parallel, one
/// [`KnnScratch`] per worker. A non-standard norm does not stop
/// rendering: every cell uses the Euclidean norm, is flagged as warned,
/// and a single summary warning is logged.
///
/// # Errors
///
/// Returns a grid validation error, [`SurfaceError::NotTwoDimensional`]
/// for datasets that are not 2-D, or [`SurfaceError::Knn`] when k is out
/// of range for the dataset.
#[tracing::instrument(skip_all, fields(nx = grid.nx(), ny = grid.ny(), k = config.k(), p = %config.norm()))]
pub fn render_surface<L>(
    dataset: &LabeledDataset<L>,
    grid: &GridSpec,
    config: &KnnConfig,
) -> Result<DecisionSurface<L>, SurfaceError>
where
    L: Clone + Ord + Send + Sync,
{
    grid.validate()?;
    if dataset.n_dims() != 2 {
        return Err(SurfaceError::NotTwoDimensional {
            n_dims: dataset.n_dims(),
        });
    }
    config.validate(dataset.len())?;

    let cells = (0..grid.n_cells())
        .into_par_iter()
        .map_init(
            || KnnScratch::new(dataset.len()),
            |scratch, cell| -> Result<Cell<L>, SurfaceError> {
                let (ix, iy) = grid.position(cell);
                let vote = classify_with_scratch(dataset, &grid.coords(ix, iy), config, scratch)?;
                Ok(Cell {
                    label: vote.winner().cloned(),
                    proportion: vote.winner_proportion().unwrap_or(0.0),
                    tied: vote.is_tied(),
                    warned: vote.warning().is_some(),
                })
            },
        )
        .collect::<Result<Vec<_>, _>>()?;

    let (norm, _) = config.norm().resolve();
    let surface = DecisionSurface {
        grid: *grid,
        k: config.k(),
        requested_norm: config.norm(),
        norm,
        cells,
    };

    let n_warned = surface.n_warned();
    if n_warned > 0 {
        warn!(
            requested = %config.norm(),
            n_warned,
            "non-standard p-norm: surface rendered with the Euclidean norm"
        );
    }
    info!(
        n_cells = grid.n_cells(),
        n_tied = surface.n_tied(),
        "decision surface rendered"
    );
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrants() -> LabeledDataset<&'static str> {
        LabeledDataset::from_rows(
            [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]],
            vec!["sw", "se", "nw", "ne"],
        )
        .unwrap()
    }

    #[test]
    fn test_k1_quadrants() {
        let grid = GridSpec::new(-2.0, 2.0, -2.0, 2.0, 4, 4);
        let s = render_surface(&quadrants(), &grid, &KnnConfig::new(1)).unwrap();
        assert_eq!(s.cells().len(), 16);
        assert_eq!(s.label_at(0, 0), Some(&"sw"));
        assert_eq!(s.label_at(3, 0), Some(&"se"));
        assert_eq!(s.label_at(0, 3), Some(&"nw"));
        assert_eq!(s.label_at(3, 3), Some(&"ne"));
        assert_eq!(s.n_tied(), 0);
        assert_eq!(s.label_counts()[&"ne"], 4);
    }

    #[test]
    fn test_center_cell_is_tied() {
        // 3x3 grid: the center (0, 0) is equidistant from all four points
        let grid = GridSpec::new(-2.0, 2.0, -2.0, 2.0, 3, 3);
        let s = render_surface(&quadrants(), &grid, &KnnConfig::new(1)).unwrap();
        let center = s.cell(1, 1);
        assert!(center.is_tied());
        assert_eq!(center.label(), Some(&"ne"));
        assert_eq!(center.proportion(), 1.0);
    }

    #[test]
    fn test_warned_cells_do_not_halt() {
        let grid = GridSpec::new(-2.0, 2.0, -2.0, 2.0, 5, 5);
        let config = KnnConfig::new(1).with_norm(PNorm::Other(0.0));
        let s = render_surface(&quadrants(), &grid, &config).unwrap();
        assert_eq!(s.n_warned(), 25);
        assert_eq!(s.requested_norm(), PNorm::Other(0.0));
        assert_eq!(s.norm(), PNorm::EUCLIDEAN);

        let reference = render_surface(&quadrants(), &grid, &KnnConfig::new(1)).unwrap();
        for (a, b) in s.cells().iter().zip(reference.cells()) {
            assert_eq!(a.label(), b.label());
        }
    }

    #[test]
    fn test_errors() {
        let grid = GridSpec::new(-2.0, 2.0, -2.0, 2.0, 3, 3);
        assert!(matches!(
            render_surface(&quadrants(), &grid, &KnnConfig::new(5)),
            Err(SurfaceError::Knn(_))
        ));
        let line = LabeledDataset::from_rows([[0.0], [1.0]], vec!["a", "b"]).unwrap();
        assert!(matches!(
            render_surface(&line, &grid, &KnnConfig::new(1)),
            Err(SurfaceError::NotTwoDimensional { n_dims: 1 })
        ));
        let bad = GridSpec::new(0.0, 0.0, 0.0, 1.0, 3, 3);
        assert!(matches!(
            render_surface(&quadrants(), &bad, &KnnConfig::new(1)),
            Err(SurfaceError::InvalidBounds { .. })
        ));
        let huge = GridSpec::new(-2.0, 2.0, -2.0, 2.0, usize::MAX, usize::MAX);
        assert!(matches!(
            render_surface(&quadrants(), &huge, &KnnConfig::new(1)),
            Err(SurfaceError::TooManyCells { .. })
        ));
    }
}
