//! Render command: vote over a 2-D lattice.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use knnmap_surface::{render_ascii, render_surface, to_json, write_csv_file};

use crate::cli::RenderArgs;
use crate::config::KnnmapConfig;
use crate::convert;

/// Render the decision surface, writing it to a file and/or stdout.
pub fn run(args: RenderArgs) -> Result<()> {
    let _cmd = info_span!("render").entered();
    let config = KnnmapConfig::load(args.data.config.as_deref())?;

    let dataset = convert::load_dataset(
        &config.data,
        args.data.data.as_deref(),
        args.data.seed.or(config.seed),
    )?;
    let knn = convert::build_knn_config(&config.knn, args.vote.k, args.vote.p);
    let grid = convert::build_grid(&config.grid, &dataset, args.nx, args.ny)?;

    let surface = render_surface(&dataset, &grid, &knn)?;

    if let Some(ref path) = args.output {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let json = to_json(&surface)?;
            std::fs::write(path, json)
                .with_context(|| format!("failed to write surface: {}", path.display()))?;
        } else {
            write_csv_file(&surface, path)
                .with_context(|| format!("failed to write surface: {}", path.display()))?;
        }
        info!(path = %path.display(), "surface written");
    }

    // Print the map when asked, or when there is nowhere else for it to go.
    if args.ascii || args.output.is_none() {
        print!("{}", render_ascii(&surface));
    }
    Ok(())
}
