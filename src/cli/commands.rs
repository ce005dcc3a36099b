//! CLI command handlers.
//!
//! Everything the binary does that does not need a terminal lives here so
//! it can be tested directly.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;

use super::output::RunSummary;
use crate::config::VizConfig;
use crate::engine::rng::SeqRng;
use crate::engine::sorter::SortRun;
use crate::engine::state::VisualizationState;
use crate::error::SortResult;

/// Run one sort to completion without a terminal.
///
/// # Errors
///
/// Returns error if the configuration is invalid or the engine faults.
pub fn run_headless(config: &VizConfig) -> SortResult<RunSummary> {
    config.check()?;

    let mut rng = SeqRng::from_seed_option(config.seed);
    let values = rng.sequence(config.length, config.min_value, config.max_value)?;
    let mut state = VisualizationState::new(values, config.viewport())?;

    let mut run = SortRun::new(config.algorithm, config.direction)?;
    info!(
        algorithm = config.algorithm.name(),
        direction = config.direction.name(),
        seed = rng.master_seed(),
        length = state.len(),
        "headless run started"
    );
    let steps = run.run_to_completion(&mut state)?;
    info!(steps, "headless run complete");

    Ok(RunSummary {
        algorithm: config.algorithm,
        direction: config.direction,
        length: state.len(),
        seed: rng.master_seed(),
        steps,
        sorted: state.is_sorted(config.direction),
        sequence: state.values().to_vec(),
    })
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Append to a file.
    File(&'a Path),
    /// Standard error.
    Stderr,
    /// Discard.
    Off,
}

impl<'a> LogTarget<'a> {
    /// Pick the target: an explicit file wins, otherwise stderr only when
    /// no TUI owns the terminal.
    #[must_use]
    pub fn select(log: Option<&'a Path>, headless: bool) -> Self {
        match (log, headless) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Stderr,
            (None, false) => Self::Off,
        }
    }
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
///
/// # Errors
///
/// Returns error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_logging(target: LogTarget<'_>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match target {
        LogTarget::File(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;
        }
        LogTarget::Stderr => {
            builder
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;
        }
        LogTarget::Off => {}
    }

    Ok(())
}
