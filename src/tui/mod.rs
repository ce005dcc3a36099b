//! TUI module for sortviz.
//!
//! This module contains the application state and input mapping used by
//! the binary. The actual terminal I/O remains in `main.rs`, but all
//! testable state management and business logic lives here.

#[cfg(feature = "tui")]
pub mod mouse;
#[cfg(feature = "tui")]
pub mod sort_app;

#[cfg(test)]
#[cfg(feature = "tui")]
mod tests;
