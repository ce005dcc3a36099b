//! Core sorting engine.
//!
//! - [`rng`]: seeded generation of bounded integer sequences
//! - [`state`]: the sequence plus its derived screen geometry
//! - [`sorter`]: resumable step generators, one visible mutation per call

pub mod rng;
pub mod sorter;
pub mod state;

pub use rng::SeqRng;
pub use sorter::{Algorithm, Direction, SortRun, SortTarget, StepOutcome, Stepper};
pub use state::{BarRect, Geometry, Viewport, VisualizationState};
