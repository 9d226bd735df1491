use std::path::PathBuf;

use clap::{Parser, Subcommand};

use knnmap_knn::PNorm;

/// knnmap p-norm kNN classifier.
#[derive(Parser)]
#[command(
    name = "knnmap",
    version,
    about = "Generalized p-norm kNN classifier and decision-surface renderer"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Classify a single query point and print the vote.
    Classify(ClassifyArgs),
    /// Render the decision surface over a 2-D grid.
    Render(RenderArgs),
    /// Simulate a labeled dataset and write it as CSV.
    Simulate(SimulateArgs),
}

/// Options shared by every subcommand that needs a dataset.
#[derive(clap::Args)]
pub struct DataArgs {
    /// Path to TOML configuration file. Built-in defaults if omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read points from this CSV instead of `[data]` in the config.
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Override the RNG seed used for simulated data.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Options that set the vote parameters.
#[derive(clap::Args)]
pub struct VoteArgs {
    /// Number of neighbours (overrides `[knn].k`).
    #[arg(short)]
    pub k: Option<usize>,

    /// p-norm: a positive integer or `inf` (overrides `[knn].p`).
    #[arg(short, allow_negative_numbers = true)]
    pub p: Option<PNorm>,
}

/// Arguments for the `classify` subcommand.
#[derive(clap::Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub vote: VoteArgs,

    /// Query coordinates, comma separated (e.g. `0.5,1.2`).
    #[arg(
        short,
        long,
        required = true,
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub query: Vec<f64>,
}

/// Arguments for the `render` subcommand.
#[derive(clap::Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub vote: VoteArgs,

    /// Grid columns (overrides `[grid].nx`).
    #[arg(long)]
    pub nx: Option<usize>,

    /// Grid rows (overrides `[grid].ny`).
    #[arg(long)]
    pub ny: Option<usize>,

    /// Write the surface here: `.json` for JSON, anything else for CSV.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the surface to stdout as text.
    #[arg(long)]
    pub ascii: bool,
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to TOML configuration file. Built-in defaults if omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path for the output CSV.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override the RNG seed.
    #[arg(short, long)]
    pub seed: Option<u64>,
}
