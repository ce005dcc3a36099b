//! Mouse event handling for the TUI.
//!
//! Terminal mouse events arrive in cell coordinates. They are mapped into
//! viewport coordinates through the canvas area cached at the last render,
//! then hit-tested by the control panel like any other pointer click.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::sort_app::SortApp;
use crate::engine::state::Viewport;
use crate::error::SortResult;

/// Handle a mouse event. Only left-button presses do anything.
///
/// # Errors
///
/// Propagates errors from the triggered control.
pub fn handle_mouse(app: &mut SortApp, event: MouseEvent) -> SortResult<()> {
    if event.kind != MouseEventKind::Down(MouseButton::Left) {
        return Ok(());
    }

    let Some(area) = app.canvas_area else {
        return Ok(());
    };

    match cell_to_viewport(area, app.state.viewport(), event.column, event.row) {
        Some((x, y)) => app.handle_click(x, y),
        None => Ok(()),
    }
}

/// Map the centre of a terminal cell inside `area` to viewport coordinates.
///
/// Returns `None` for cells outside the area or for an empty area.
#[must_use]
pub fn cell_to_viewport(area: Rect, viewport: Viewport, column: u16, row: u16) -> Option<(i32, i32)> {
    if area.width == 0 || area.height == 0 || !rect_contains(area, column, row) {
        return None;
    }

    let cx = f64::from(column - area.x) + 0.5;
    let cy = f64::from(row - area.y) + 0.5;
    let x = cx * f64::from(viewport.width) / f64::from(area.width);
    let y = cy * f64::from(viewport.height) / f64::from(area.height);

    Some((x.floor() as i32, y.floor() as i32))
}

fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
