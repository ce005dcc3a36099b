//! Configuration with YAML loading and validation.
//!
//! Mistake-proofing happens in two layers:
//! - field ranges checked by `validator`
//! - cross-field semantic checks (value range order, bar width)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::engine::sorter::{Algorithm, Direction};
use crate::engine::state::{Viewport, SIDE_PADDING};
use crate::error::{SortError, SortResult};

/// Start-up parameters for one visualization session.
///
/// Every field only affects initial state construction (and the value
/// range used on Reset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Number of elements in each generated sequence.
    #[validate(range(min = 1, max = 10_000))]
    #[serde(default = "default_length")]
    pub length: usize,

    /// Smallest value that can be generated (inclusive).
    #[serde(default)]
    pub min_value: i64,

    /// Largest value that can be generated (inclusive).
    #[serde(default = "default_max_value")]
    pub max_value: i64,

    /// Viewport width in drawing units.
    #[validate(range(min = 101, max = 100_000))]
    #[serde(default = "default_width")]
    pub width: u32,

    /// Viewport height in drawing units.
    #[validate(range(min = 151, max = 100_000))]
    #[serde(default = "default_height")]
    pub height: u32,

    /// Target frame rate; one sort step is applied per frame.
    #[validate(range(min = 1, max = 240))]
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Seed for sequence generation; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Algorithm selected at start-up.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Direction selected at start-up.
    #[serde(default)]
    pub direction: Direction,
}

const fn default_length() -> usize {
    50
}

const fn default_max_value() -> i64 {
    100
}

const fn default_width() -> u32 {
    800
}

const fn default_height() -> u32 {
    600
}

const fn default_fps() -> u32 {
    60
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            length: default_length(),
            min_value: 0,
            max_value: default_max_value(),
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            seed: None,
            algorithm: Algorithm::default(),
            direction: Direction::default(),
        }
    }
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SortResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SortResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_yaml(&self) -> SortResult<String> {
        serde_yaml::to_string(self).map_err(|e| SortError::serialization(e.to_string()))
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    /// Run field and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for out-of-range fields and `Config` for
    /// inconsistent combinations.
    pub fn check(&self) -> SortResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate semantic constraints beyond field ranges.
    fn validate_semantic(&self) -> SortResult<()> {
        if self.min_value > self.max_value {
            return Err(SortError::config(format!(
                "min_value {} exceeds max_value {}",
                self.min_value, self.max_value
            )));
        }

        let drawable = self.width.saturating_sub(SIDE_PADDING) as usize;
        if self.length > drawable {
            return Err(SortError::config(format!(
                "length {} leaves bars narrower than one unit in a {}-wide viewport",
                self.length, self.width
            )));
        }

        if !self.algorithm.is_implemented() {
            return Err(SortError::config(format!(
                "{} has no step generator",
                self.algorithm.name()
            )));
        }

        Ok(())
    }

    /// Viewport for the visualization state.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Interval between frames.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    length: Option<usize>,
    value_range: Option<(i64, i64)>,
    viewport: Option<(u32, u32)>,
    fps: Option<u32>,
    seed: Option<u64>,
    algorithm: Option<Algorithm>,
    direction: Option<Direction>,
}

impl VizConfigBuilder {
    /// Set the sequence length.
    #[must_use]
    pub const fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the inclusive value range.
    #[must_use]
    pub const fn value_range(mut self, min: i64, max: i64) -> Self {
        self.value_range = Some((min, max));
        self
    }

    /// Set the viewport size.
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some((width, height));
        self
    }

    /// Set the frame rate.
    #[must_use]
    pub const fn fps(mut self, fps: u32) -> Self {
        self.fps = Some(fps);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the start-up algorithm.
    #[must_use]
    pub const fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the start-up direction.
    #[must_use]
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Build the configuration. Call [`VizConfig::check`] to validate it.
    #[must_use]
    pub fn build(self) -> VizConfig {
        let mut config = VizConfig::default();

        if let Some(length) = self.length {
            config.length = length;
        }
        if let Some((min, max)) = self.value_range {
            config.min_value = min;
            config.max_value = max;
        }
        if let Some((width, height)) = self.viewport {
            config.width = width;
            config.height = height;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(direction) = self.direction {
            config.direction = direction;
        }

        config
    }
}
