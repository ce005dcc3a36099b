//! Control panel layout and hit-testing.
//!
//! The panel owns the positions of its controls in viewport coordinates.
//! Renderers draw from these rectangles and input handlers test clicks
//! against the same rectangles, so the two can never drift apart.

use serde::{Deserialize, Serialize};

use crate::engine::sorter::Algorithm;

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl PanelRect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the point lies inside. Left/top edges inclusive, right/bottom exclusive.
    #[must_use]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlHit {
    /// The dropdown box itself.
    ToggleDropdown,
    /// An option row of the open dropdown.
    SelectAlgorithm(Algorithm),
    /// The Reset button.
    Reset,
    /// The Start button.
    Start,
}

/// Positions of the dropdown, its option rows and the two buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPanel {
    /// Dropdown box showing the selected algorithm.
    pub dropdown: PanelRect,
    /// Reset button.
    pub reset: PanelRect,
    /// Start button.
    pub start: PanelRect,
    /// Height of each option row below the dropdown.
    pub option_height: i32,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            dropdown: PanelRect::new(50, 100, 200, 30),
            reset: PanelRect::new(300, 100, 100, 30),
            start: PanelRect::new(450, 100, 100, 30),
            option_height: 30,
        }
    }
}

impl ControlPanel {
    /// Algorithms listed when the dropdown is open.
    #[must_use]
    pub const fn options(&self) -> &'static [Algorithm] {
        &Algorithm::SELECTABLE
    }

    /// Rectangle of option row `index`, stacked directly below the dropdown.
    #[must_use]
    pub fn option_rect(&self, index: usize) -> PanelRect {
        let row = i32::try_from(index + 1).unwrap_or(i32::MAX);
        PanelRect::new(
            self.dropdown.x,
            self.dropdown.y.saturating_add(row.saturating_mul(self.option_height)),
            self.dropdown.width,
            self.option_height,
        )
    }

    /// Resolve a click.
    ///
    /// While the dropdown is open only the dropdown box and its option rows
    /// respond; every other click is swallowed.
    #[must_use]
    pub fn hit_test(&self, x: i32, y: i32, dropdown_open: bool) -> Option<ControlHit> {
        if self.dropdown.contains(x, y) {
            return Some(ControlHit::ToggleDropdown);
        }

        if dropdown_open {
            return self
                .options()
                .iter()
                .enumerate()
                .find(|(index, _)| self.option_rect(*index).contains(x, y))
                .map(|(_, &algorithm)| ControlHit::SelectAlgorithm(algorithm));
        }

        if self.reset.contains(x, y) {
            Some(ControlHit::Reset)
        } else if self.start.contains(x, y) {
            Some(ControlHit::Start)
        } else {
            None
        }
    }
}
