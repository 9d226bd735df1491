//! Simulate command: draw labeled clusters and save them as CSV.

use anyhow::{Context, Result};
use tracing::info_span;

use knnmap_data::write_dataset_csv;

use crate::cli::SimulateArgs;
use crate::config::KnnmapConfig;
use crate::convert;

/// Simulate the configured clusters and write them to `args.output`.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();
    let config = KnnmapConfig::load(args.config.as_deref())?;

    let dataset = convert::simulate_dataset(&config.data.clusters, args.seed.or(config.seed))?;
    write_dataset_csv(&dataset, &args.output)
        .with_context(|| format!("failed to write dataset: {}", args.output.display()))?;
    Ok(())
}
