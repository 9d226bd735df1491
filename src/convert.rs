//! Pure conversion functions: TOML config structs -> crate API types.

use std::path::Path;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use knnmap_data::{ClusterSpec, default_clusters, read_dataset_csv, simulate_clusters};
use knnmap_knn::{KnnConfig, LabeledDataset, PNorm};
use knnmap_surface::GridSpec;

use crate::config::{ClusterToml, DataToml, GridToml, KnnToml};

/// Points per cluster when no clusters are configured.
const DEFAULT_N_PER_CLUSTER: usize = 100;

/// Spread of the built-in clusters.
const DEFAULT_SPREAD: f64 = 0.25;

/// Builds a [`KnnConfig`] from `[knn]`, with command-line overrides.
pub fn build_knn_config(knn: &KnnToml, k: Option<usize>, p: Option<PNorm>) -> KnnConfig {
    KnnConfig::new(k.unwrap_or(knn.k)).with_norm(p.unwrap_or(knn.p))
}

/// Converts `[[data.clusters]]` entries, falling back to the built-in pair.
pub fn build_cluster_specs(clusters: &[ClusterToml]) -> Vec<ClusterSpec> {
    if clusters.is_empty() {
        return default_clusters(DEFAULT_N_PER_CLUSTER, DEFAULT_SPREAD);
    }
    clusters
        .iter()
        .map(|c| ClusterSpec::new(c.label.clone(), c.center.clone(), c.spread, c.n_points))
        .collect()
}

/// Builds the surface lattice.
///
/// Both ranges set gives an explicit grid; neither fits the grid around
/// the data with `margin`. Setting only one is rejected.
pub fn build_grid(
    grid: &GridToml,
    dataset: &LabeledDataset<String>,
    nx: Option<usize>,
    ny: Option<usize>,
) -> Result<GridSpec> {
    let nx = nx.unwrap_or(grid.nx);
    let ny = ny.unwrap_or(grid.ny);
    let spec = match (grid.x_range, grid.y_range) {
        (Some([x_min, x_max]), Some([y_min, y_max])) => {
            let spec = GridSpec::new(x_min, x_max, y_min, y_max, nx, ny);
            spec.validate()?;
            spec
        }
        (None, None) => GridSpec::around(dataset, grid.margin, nx, ny)?,
        _ => bail!("grid needs both x_range and y_range, or neither"),
    };
    Ok(spec)
}

/// Loads the dataset: a CSV path (command line first, then `[data].input`)
/// or seeded cluster simulation.
pub fn load_dataset(
    data: &DataToml,
    input: Option<&Path>,
    seed: Option<u64>,
) -> Result<LabeledDataset<String>> {
    if let Some(path) = input.or(data.input.as_deref()) {
        return read_dataset_csv(path)
            .with_context(|| format!("failed to read dataset: {}", path.display()));
    }

    simulate_dataset(&data.clusters, seed)
}

/// Simulates the configured clusters with a seeded (or OS-seeded) RNG.
pub fn simulate_dataset(
    clusters: &[ClusterToml],
    seed: Option<u64>,
) -> Result<LabeledDataset<String>> {
    let specs = build_cluster_specs(clusters);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let dataset = simulate_clusters(&specs, &mut rng).context("failed to simulate clusters")?;
    info!(
        n_clusters = specs.len(),
        n_points = dataset.len(),
        seed = ?seed,
        "simulated dataset"
    );
    Ok(dataset)
}
