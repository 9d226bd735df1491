use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use knnmap_knn::PNorm;

/// Top-level knnmap configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnnmapConfig {
    /// Global RNG seed for simulated data.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Where the labeled points come from.
    #[serde(default)]
    pub data: DataToml,

    /// Vote parameters.
    #[serde(default)]
    pub knn: KnnToml,

    /// Decision-surface lattice.
    #[serde(default)]
    pub grid: GridToml,
}

impl KnnmapConfig {
    /// Reads a config file, or returns the built-in defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

/// `[data]`: a CSV file, or clusters to simulate.
///
/// With neither set, the built-in red/blue pair is simulated.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataToml {
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub clusters: Vec<ClusterToml>,
}

/// One `[[data.clusters]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterToml {
    pub label: String,
    pub center: Vec<f64>,
    #[serde(default = "default_spread")]
    pub spread: f64,
    #[serde(default = "default_n_points")]
    pub n_points: usize,
}

fn default_spread() -> f64 {
    0.25
}
fn default_n_points() -> usize {
    100
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnnToml {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub p: PNorm,
}

impl Default for KnnToml {
    fn default() -> Self {
        Self {
            k: default_k(),
            p: PNorm::default(),
        }
    }
}

fn default_k() -> usize {
    5
}

/// `[grid]`: explicit ranges, or a margin around the data.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    pub x_range: Option<[f64; 2]>,
    pub y_range: Option<[f64; 2]>,
    #[serde(default = "default_nx")]
    pub nx: usize,
    #[serde(default = "default_ny")]
    pub ny: usize,
    #[serde(default = "default_margin")]
    pub margin: f64,
}

impl Default for GridToml {
    fn default() -> Self {
        Self {
            x_range: None,
            y_range: None,
            nx: default_nx(),
            ny: default_ny(),
            margin: default_margin(),
        }
    }
}

fn default_nx() -> usize {
    60
}
fn default_ny() -> usize {
    30
}
fn default_margin() -> f64 {
    0.5
}
