//! # sortviz
//!
//! Step-by-step visualization of in-place comparison sorts.
//!
//! A sequence of random integers is drawn as vertical bars. Each frame the
//! selected algorithm performs exactly one visible mutation (a swap or a
//! shift) and the two touched bars are highlighted.
//!
//! - [`engine`]: sequence state, bar geometry and resumable step generators
//! - [`config`]: YAML configuration with validation
//! - [`controls`]: dropdown and button layout with hit-testing
//! - [`tui`]: the frame-driven application state behind the terminal UI
//!
//! ## Example
//!
//! ```rust
//! use sortviz::prelude::*;
//!
//! let mut run = SortRun::new(Algorithm::Bubble, Direction::Ascending).unwrap();
//! let mut values = vec![5, 3, 4, 1, 2];
//!
//! assert_eq!(run.advance(&mut values).unwrap(), StepOutcome::Progressed(0, 1));
//! assert_eq!(values, vec![3, 5, 4, 1, 2]);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod cli;
pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{VizConfig, VizConfigBuilder};
    pub use crate::controls::{ControlHit, ControlPanel, PanelRect};
    pub use crate::engine::rng::SeqRng;
    pub use crate::engine::sorter::{
        Algorithm, Direction, SortRun, SortTarget, StepOutcome, Stepper,
    };
    pub use crate::engine::state::{BarRect, Geometry, Viewport, VisualizationState};
    pub use crate::error::{SortError, SortResult};
}

/// Re-export for public API
pub use error::{SortError, SortResult};
