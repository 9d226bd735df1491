//! Classify command: vote on a single query point.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use knnmap_knn::classify_with_config;

use crate::cli::ClassifyArgs;
use crate::config::KnnmapConfig;
use crate::convert;

/// Classify one query and print the vote as JSON.
pub fn run(args: ClassifyArgs) -> Result<()> {
    let _cmd = info_span!("classify").entered();
    let config = KnnmapConfig::load(args.data.config.as_deref())?;

    let dataset = convert::load_dataset(
        &config.data,
        args.data.data.as_deref(),
        args.data.seed.or(config.seed),
    )?;
    let knn = convert::build_knn_config(&config.knn, args.vote.k, args.vote.p);
    info!(
        n_points = dataset.len(),
        n_dims = dataset.n_dims(),
        k = knn.k(),
        p = %knn.norm(),
        "classifying query"
    );

    let vote = classify_with_config(&dataset, &args.query, &knn)?;
    if let Some(w) = vote.warning() {
        warn!("{w}");
    }

    let json = serde_json::to_string_pretty(&vote).context("failed to serialize vote")?;
    println!("{json}");
    match (vote.winner(), vote.winner_proportion()) {
        (Some(label), Some(share)) => {
            let tied = if vote.is_tied() { ", tied" } else { "" };
            println!("winner: {label} ({share:.3}{tied})");
        }
        _ => println!("winner: none"),
    }
    Ok(())
}
