//! Visualization state: the sequence being sorted and its screen geometry.
//!
//! Geometry is derived from the sequence and the viewport. It is recomputed
//! in full whenever the sequence is replaced, because a reset can change
//! both the length and the value range.

use serde::{Deserialize, Serialize};

use crate::engine::sorter::{Direction, SortTarget};
use crate::error::{SortError, SortResult};

/// Horizontal padding split evenly between the left and right edges.
pub const SIDE_PADDING: u32 = 100;

/// Vertical space reserved above the bars for the title and controls.
pub const TOP_PADDING: u32 = 150;

/// Drawing area dimensions in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in viewport units.
    pub width: u32,
    /// Height in viewport units.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check that the viewport leaves room for bars after padding.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either dimension does not exceed its padding.
    pub fn validate(&self) -> SortResult<()> {
        if self.width <= SIDE_PADDING {
            return Err(SortError::invalid_input(format!(
                "viewport width {} must exceed side padding {SIDE_PADDING}",
                self.width
            )));
        }
        if self.height <= TOP_PADDING {
            return Err(SortError::invalid_input(format!(
                "viewport height {} must exceed top padding {TOP_PADDING}",
                self.height
            )));
        }
        Ok(())
    }

    /// Width available to bars.
    #[must_use]
    pub const fn drawable_width(&self) -> u32 {
        self.width.saturating_sub(SIDE_PADDING)
    }

    /// Height available to bars.
    #[must_use]
    pub const fn drawable_height(&self) -> u32 {
        self.height.saturating_sub(TOP_PADDING)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Screen rectangle of one bar, origin at the top-left of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Bar width.
    pub width: u32,
    /// Bar height.
    pub height: u32,
}

impl BarRect {
    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Derived screen-mapping parameters.
///
/// Only ever produced by [`Geometry::compute`]; there is no deserialization
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Smallest value in the sequence.
    pub min_value: i64,
    /// Largest value in the sequence.
    pub max_value: i64,
    /// Width of every bar.
    pub bar_width: u32,
    /// Height of one value unit above `min_value`; zero when `max == min`.
    pub unit_height: u32,
    /// Left edge of the first bar.
    pub start_x: u32,
}

impl Geometry {
    /// Compute geometry for `values` inside `viewport`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `values` is empty.
    pub fn compute(values: &[i64], viewport: Viewport) -> SortResult<Self> {
        let (Some(&min_value), Some(&max_value)) = (values.iter().min(), values.iter().max())
        else {
            return Err(SortError::invalid_input("sequence must not be empty"));
        };

        let count = values.len() as u64;
        let drawable_width = u64::from(viewport.drawable_width());
        let start_x = SIDE_PADDING / 2;

        let mut bar_width = round_half_even(drawable_width, count);
        if u64::from(start_x) + count * bar_width > u64::from(viewport.width) {
            bar_width = drawable_width / count;
        }

        let range = max_value.abs_diff(min_value);
        let unit_height = if range == 0 {
            0
        } else {
            u64::from(viewport.drawable_height()) / range
        };

        Ok(Self {
            min_value,
            max_value,
            bar_width: u32::try_from(bar_width).unwrap_or(u32::MAX),
            unit_height: u32::try_from(unit_height).unwrap_or(u32::MAX),
            start_x,
        })
    }

    /// Whether every value is identical.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.min_value == self.max_value
    }
}

/// Integer division rounding to the nearest integer, ties to even.
fn round_half_even(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    match (2 * remainder).cmp(&denominator) {
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient & 1),
        std::cmp::Ordering::Less => quotient,
    }
}

/// Single source of truth for the sequence and the geometry to draw it.
///
/// Serialized as its sequence and viewport only. Deserialization goes
/// through [`VisualizationState::new`], so geometry is always recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateSnapshot", into = "StateSnapshot")]
pub struct VisualizationState {
    values: Vec<i64>,
    viewport: Viewport,
    geometry: Geometry,
}

impl VisualizationState {
    /// Create state over an initial sequence.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the sequence is empty or the viewport is
    /// too small for the paddings.
    pub fn new(values: Vec<i64>, viewport: Viewport) -> SortResult<Self> {
        viewport.validate()?;
        let geometry = Geometry::compute(&values, viewport)?;
        Ok(Self {
            values,
            viewport,
            geometry,
        })
    }

    /// Replace the sequence and recompute all geometry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `values` is empty; the previous sequence is
    /// kept in that case.
    pub fn replace_sequence(&mut self, values: Vec<i64>) -> SortResult<()> {
        self.geometry = Geometry::compute(&values, self.viewport)?;
        self.values = values;
        Ok(())
    }

    /// Read the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len`.
    pub fn value_at(&self, index: usize) -> SortResult<i64> {
        self.values
            .get(index)
            .copied()
            .ok_or_else(|| SortError::index_out_of_range(index, self.values.len()))
    }

    /// Swap the values at `i` and `j`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if either index is `>= len`.
    pub fn set_pair(&mut self, i: usize, j: usize) -> SortResult<()> {
        let len = self.values.len();
        for index in [i, j] {
            if index >= len {
                return Err(SortError::index_out_of_range(index, len));
            }
        }
        self.values.swap(i, j);
        Ok(())
    }

    /// Map an index to its screen rectangle.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len`.
    pub fn bar_rect(&self, index: usize) -> SortResult<BarRect> {
        let value = self.value_at(index)?;
        let geometry = &self.geometry;

        let height = if geometry.is_flat() {
            self.viewport.drawable_height()
        } else {
            let units = value.abs_diff(geometry.min_value);
            let scaled = units.saturating_mul(u64::from(geometry.unit_height));
            u32::try_from(scaled).unwrap_or(u32::MAX)
        };

        let offset = u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_mul(geometry.bar_width);

        Ok(BarRect {
            x: geometry.start_x.saturating_add(offset),
            y: self.viewport.height.saturating_sub(height),
            width: geometry.bar_width,
            height,
        })
    }

    /// Rectangles for every bar, in index order.
    #[must_use]
    pub fn bar_rects(&self) -> Vec<BarRect> {
        (0..self.values.len())
            .filter_map(|i| self.bar_rect(i).ok())
            .collect()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence is empty. Never true for a constructed state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The current sequence.
    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// The current geometry.
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The viewport the geometry was computed for.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether the sequence is ordered for `direction`.
    #[must_use]
    pub fn is_sorted(&self, direction: Direction) -> bool {
        direction.is_sorted(&self.values)
    }
}

/// Wire form of [`VisualizationState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StateSnapshot {
    values: Vec<i64>,
    viewport: Viewport,
}

impl TryFrom<StateSnapshot> for VisualizationState {
    type Error = SortError;

    fn try_from(snapshot: StateSnapshot) -> SortResult<Self> {
        Self::new(snapshot.values, snapshot.viewport)
    }
}

impl From<VisualizationState> for StateSnapshot {
    fn from(state: VisualizationState) -> Self {
        Self {
            values: state.values,
            viewport: state.viewport,
        }
    }
}

impl SortTarget for VisualizationState {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn value_at(&self, index: usize) -> SortResult<i64> {
        Self::value_at(self, index)
    }

    fn set_pair(&mut self, i: usize, j: usize) -> SortResult<()> {
        Self::set_pair(self, i, j)
    }
}
