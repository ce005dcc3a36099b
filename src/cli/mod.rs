//! CLI module for sortviz.
//!
//! Argument parsing, logging set-up and the headless runner live here so
//! they can be tested without a terminal. `main.rs` only owns terminal I/O.

mod args;
mod commands;
mod output;

pub use args::{AlgorithmArg, Args};
pub use commands::{init_logging, run_headless, LogTarget};
pub use output::{print_summary, RunSummary};
