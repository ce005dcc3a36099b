//! CLI argument parsing.
//!
//! Command-line values are layered over the YAML file named by `--config`,
//! which is itself layered over the built-in defaults.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::VizConfig;
use crate::engine::sorter::{Algorithm, Direction};
use crate::error::SortResult;

/// Algorithms selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// Bubble sort.
    Bubble,
    /// Insertion sort.
    Insertion,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Bubble => Self::Bubble,
            AlgorithmArg::Insertion => Self::Insertion,
        }
    }
}

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "sortviz",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SORTVIZ_GIT_HASH"), ")"),
    about = "Watch bubble and insertion sort rearrange bars one step per frame"
)]
pub struct Args {
    /// YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of bars.
    #[arg(short = 'n', long)]
    pub length: Option<usize>,

    /// Smallest generated value (inclusive).
    #[arg(long, allow_negative_numbers = true)]
    pub min_value: Option<i64>,

    /// Largest generated value (inclusive).
    #[arg(long, allow_negative_numbers = true)]
    pub max_value: Option<i64>,

    /// Viewport width in drawing units.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in drawing units.
    #[arg(long)]
    pub height: Option<u32>,

    /// Frames per second; one sort step is shown per frame.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Seed for sequence generation.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Algorithm selected at start-up.
    #[arg(short, long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// Sort in descending order.
    #[arg(short, long)]
    pub descending: bool,

    /// Run one sort to completion without a terminal and print a JSON summary.
    #[arg(long)]
    pub headless: bool,

    /// Write logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of `base`.
    #[must_use]
    pub fn apply(&self, base: VizConfig) -> VizConfig {
        let mut config = base;

        if let Some(length) = self.length {
            config.length = length;
        }
        if let Some(min) = self.min_value {
            config.min_value = min;
        }
        if let Some(max) = self.max_value {
            config.max_value = max;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm.into();
        }
        if self.descending {
            config.direction = Direction::Descending;
        }

        config
    }

    /// Resolve the effective configuration: defaults, then `--config`, then flags.
    ///
    /// Validation runs once, on the merged result.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be loaded or the merged
    /// configuration fails validation.
    pub fn resolve_config(&self) -> SortResult<VizConfig> {
        let base = match &self.config {
            Some(path) => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
            None => VizConfig::default(),
        };
        let config = self.apply(base);
        config.check()?;
        Ok(config)
    }
}
