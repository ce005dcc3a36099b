//! Integration tests for TUI module.
//!
//! These tests drive the app the way the frame loop does: input events
//! interleaved with one `tick()` per frame.

use super::mouse::handle_mouse;
use super::sort_app::SortApp;
use crate::config::VizConfig;
use crate::engine::sorter::{Algorithm, Direction};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

fn left_click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn test_sort_app_lifecycle() {
    let mut app = SortApp::new(VizConfig::builder().seed(42).length(20).build())
        .expect("valid config");

    // Idle frames change nothing.
    let initial = app.state.values().to_vec();
    for _ in 0..5 {
        app.tick().expect("tick");
    }
    assert_eq!(app.frame_count, 5);
    assert_eq!(app.state.values(), initial.as_slice());

    // Start and run to completion.
    app.handle_key(KeyCode::Char('s')).expect("key");
    while app.is_running() {
        app.tick().expect("tick");
    }
    assert!(app.state.is_sorted(Direction::Ascending));
    assert_eq!(app.completed_runs, 1);

    // Reset
    app.handle_key(KeyCode::Char('r')).expect("key");
    assert_eq!(app.state.len(), 20);

    // Quit
    app.handle_key(KeyCode::Char('q')).expect("key");
    assert!(app.should_quit());
}

#[test]
fn test_mouse_driven_insertion_descending() {
    let mut app = SortApp::new(VizConfig::builder().seed(7).length(30).build())
        .expect("valid config");
    // 80x30 cells: 10 units per column, 20 per row.
    app.canvas_area = Some(Rect::new(0, 0, 80, 30));

    // Open dropdown (x 105, y 110), pick row 2 (x 105, y 170).
    handle_mouse(&mut app, left_click(10, 5)).expect("mouse");
    assert!(app.dropdown_open);
    handle_mouse(&mut app, left_click(10, 8)).expect("mouse");
    assert_eq!(app.algorithm, Algorithm::Insertion);

    app.handle_key(KeyCode::Char('d')).expect("key");
    assert_eq!(app.title(), "Insertion Sort - Descending");

    // Start button (x 505, y 110).
    handle_mouse(&mut app, left_click(50, 5)).expect("mouse");
    assert!(app.is_running());

    let mut frames = 0u64;
    while app.is_running() {
        app.tick().expect("tick");
        frames += 1;
    }
    assert!(app.state.is_sorted(Direction::Descending));
    assert_eq!(frames, app.last_run_steps + 1);
}

#[test]
fn test_reset_mid_run_then_fresh_run() {
    let mut app = SortApp::new(VizConfig::builder().seed(3).build()).expect("valid config");
    app.start().expect("start");
    for _ in 0..10 {
        app.tick().expect("tick");
    }

    app.reset().expect("reset");
    let fresh = app.state.values().to_vec();
    assert!(!app.is_running());

    app.start().expect("start");
    assert_eq!(app.steps(), 0);
    while app.is_running() {
        app.tick().expect("tick");
    }

    let mut expected = fresh;
    expected.sort_unstable();
    assert_eq!(app.state.values(), expected.as_slice());
}
