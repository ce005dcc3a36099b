//! Sort visualizer application state and logic.
//!
//! This module contains the testable state and the frame-driving contract
//! for the TUI. Terminal I/O is handled by the binary, but all state
//! management lives here.
//!
//! One call to [`SortApp::tick`] is one frame: while a run is active it
//! applies exactly one visible step, otherwise it only clears the highlight.

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::config::VizConfig;
use crate::controls::{ControlHit, ControlPanel};
use crate::engine::rng::SeqRng;
use crate::engine::sorter::{Algorithm, Direction, SortRun, StepOutcome, Stepper};
use crate::engine::state::VisualizationState;
use crate::error::SortResult;

/// RGB triple.
pub type Rgb = (u8, u8, u8);

/// Default bar colors, cycled by index.
pub const PALETTE: [Rgb; 3] = [(128, 128, 128), (160, 160, 160), (192, 192, 192)];

/// Color of the lower index of the highlight pair.
pub const HIGHLIGHT_FROM: Rgb = (0, 255, 0);

/// Color of the higher index of the highlight pair.
pub const HIGHLIGHT_TO: Rgb = (255, 0, 0);

/// Application state for the sort visualizer.
pub struct SortApp {
    /// Start-up configuration; length and value range are reused on Reset.
    pub config: VizConfig,
    /// Sequence and geometry.
    pub state: VisualizationState,
    /// Sequence generator.
    pub rng: SeqRng,
    /// Control positions.
    pub panel: ControlPanel,
    /// Algorithm used by the next Start.
    pub algorithm: Algorithm,
    /// Direction used by the next Start.
    pub direction: Direction,
    /// Whether the algorithm list is expanded.
    pub dropdown_open: bool,
    /// The active run, if any.
    pub run: Option<SortRun>,
    /// Indices touched by the step applied this frame.
    pub highlight: Option<(usize, usize)>,
    /// Frame counter.
    pub frame_count: u64,
    /// Runs that reached `Done`.
    pub completed_runs: u64,
    /// Step count of the most recently finished run.
    pub last_run_steps: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Canvas area from the last render, for mouse mapping.
    pub canvas_area: Option<Rect>,
}

impl SortApp {
    /// Create a new application from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn new(config: VizConfig) -> SortResult<Self> {
        config.check()?;

        let mut rng = SeqRng::from_seed_option(config.seed);
        let values = rng.sequence(config.length, config.min_value, config.max_value)?;
        let state = VisualizationState::new(values, config.viewport())?;

        info!(
            seed = rng.master_seed(),
            length = config.length,
            min = config.min_value,
            max = config.max_value,
            "sequence generated"
        );

        Ok(Self {
            algorithm: config.algorithm,
            direction: config.direction,
            config,
            state,
            rng,
            panel: ControlPanel::default(),
            dropdown_open: false,
            run: None,
            highlight: None,
            frame_count: 0,
            completed_runs: 0,
            last_run_steps: 0,
            should_quit: false,
            canvas_area: None,
        })
    }

    /// Execute one frame.
    ///
    /// # Errors
    ///
    /// Propagates engine errors, which indicate a defect.
    pub fn tick(&mut self) -> SortResult<()> {
        self.frame_count += 1;

        let Some(run) = self.run.as_mut() else {
            self.highlight = None;
            return Ok(());
        };

        let outcome = run.advance(&mut self.state)?;
        let steps = run.steps();
        match outcome {
            StepOutcome::Progressed(i, j) => {
                debug!(i, j, steps, "step applied");
                self.highlight = Some((i, j));
            }
            StepOutcome::Done => {
                info!(steps, frames = self.frame_count, "sort complete");
                self.run = None;
                self.highlight = None;
                self.completed_runs += 1;
                self.last_run_steps = steps;
            }
        }
        Ok(())
    }

    /// Start a run with the selected algorithm and direction.
    ///
    /// Returns `false` without doing anything if a run is already active.
    ///
    /// # Errors
    ///
    /// Returns `NotImplemented` if the selected algorithm has no step generator.
    pub fn start(&mut self) -> SortResult<bool> {
        if self.run.is_some() {
            warn!("start ignored: a run is already active");
            return Ok(false);
        }

        self.run = Some(SortRun::new(self.algorithm, self.direction)?);
        info!(
            algorithm = self.algorithm.name(),
            direction = self.direction.name(),
            "sort started"
        );
        Ok(true)
    }

    /// Abandon any run and generate a fresh sequence.
    ///
    /// # Errors
    ///
    /// Returns error if the configured value range is invalid.
    pub fn reset(&mut self) -> SortResult<()> {
        if let Some(run) = self.run.take() {
            info!(steps = run.steps(), "run abandoned by reset");
        }

        let values = self
            .rng
            .sequence(self.config.length, self.config.min_value, self.config.max_value)?;
        self.state.replace_sequence(values)?;
        self.highlight = None;
        debug!("sequence regenerated");
        Ok(())
    }

    /// Whether a run is active.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Select the algorithm for the next Start and close the dropdown.
    ///
    /// Algorithms without a step generator are ignored.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        if algorithm.is_implemented() {
            self.algorithm = algorithm;
        }
        self.dropdown_open = false;
    }

    /// Flip the direction for the next Start.
    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
    }

    /// Handle a click at viewport coordinates.
    ///
    /// # Errors
    ///
    /// Propagates errors from Start or Reset.
    pub fn handle_click(&mut self, x: i32, y: i32) -> SortResult<()> {
        match self.panel.hit_test(x, y, self.dropdown_open) {
            Some(ControlHit::ToggleDropdown) => self.dropdown_open = !self.dropdown_open,
            Some(ControlHit::SelectAlgorithm(algorithm)) => self.select_algorithm(algorithm),
            Some(ControlHit::Reset) => self.reset()?,
            Some(ControlHit::Start) => {
                self.start()?;
            }
            None => {}
        }
        Ok(())
    }

    /// Handle a key press.
    ///
    /// # Errors
    ///
    /// Propagates errors from Start or Reset.
    pub fn handle_key(&mut self, key: KeyCode) -> SortResult<()> {
        match key {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s' | 'S') | KeyCode::Enter => {
                self.start()?;
            }
            KeyCode::Char('r' | 'R') => self.reset()?,
            KeyCode::Char('d' | 'D') => self.toggle_direction(),
            KeyCode::Tab => self.select_algorithm(self.algorithm.next_selectable()),
            _ => {}
        }
        Ok(())
    }

    /// Check if the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Title reflecting the selected algorithm and direction.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} - {}", self.algorithm.name(), self.direction.name())
    }

    /// Color of bar `index` this frame.
    #[must_use]
    pub fn bar_color(&self, index: usize) -> Rgb {
        match self.highlight {
            Some((from, _)) if from == index => HIGHLIGHT_FROM,
            Some((_, to)) if to == index => HIGHLIGHT_TO,
            _ => PALETTE[index % PALETTE.len()],
        }
    }

    /// Steps taken by the active run, or by the last finished one.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.run.as_ref().map_or(self.last_run_steps, SortRun::steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(values: Vec<i64>) -> SortApp {
        let mut app = SortApp::new(VizConfig::builder().seed(42).build()).expect("valid config");
        app.state.replace_sequence(values).expect("non-empty");
        app
    }

    #[test]
    fn test_new_app() {
        let app = SortApp::new(VizConfig::builder().seed(42).length(10).build())
            .expect("valid config");
        assert!(!app.is_running());
        assert!(!app.should_quit());
        assert!(!app.dropdown_open);
        assert_eq!(app.frame_count, 0);
        assert_eq!(app.state.len(), 10);
        assert_eq!(app.algorithm, Algorithm::Bubble);
        assert_eq!(app.direction, Direction::Ascending);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = SortApp::new(VizConfig::builder().value_range(5, 1).build());
        assert!(result.is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = SortApp::new(VizConfig::builder().seed(9).build()).expect("valid config");
        let b = SortApp::new(VizConfig::builder().seed(9).build()).expect("valid config");
        assert_eq!(a.state.values(), b.state.values());
    }

    #[test]
    fn test_title() {
        let mut app = app_with(vec![1, 2]);
        assert_eq!(app.title(), "Bubble Sort - Ascending");
        app.select_algorithm(Algorithm::Insertion);
        app.toggle_direction();
        assert_eq!(app.title(), "Insertion Sort - Descending");
    }

    #[test]
    fn test_tick_idle_only_counts_frames() {
        let mut app = app_with(vec![3, 1, 2]);
        app.tick().expect("tick");
        assert_eq!(app.frame_count, 1);
        assert_eq!(app.state.values(), &[3, 1, 2]);
        assert!(app.highlight.is_none());
    }

    #[test]
    fn test_one_step_per_frame() {
        let mut app = app_with(vec![5, 3, 4, 1, 2]);
        assert!(app.start().expect("start"));

        app.tick().expect("tick");
        assert_eq!(app.highlight, Some((0, 1)));
        assert_eq!(app.state.values(), &[3, 5, 4, 1, 2]);
        assert_eq!(app.steps(), 1);

        app.tick().expect("tick");
        assert_eq!(app.highlight, Some((1, 2)));
        assert_eq!(app.steps(), 2);
    }

    #[test]
    fn test_run_completes_and_returns_to_idle() {
        let mut app = app_with(vec![5, 3, 4, 1, 2]);
        app.start().expect("start");

        let mut frames = 0;
        while app.is_running() {
            app.tick().expect("tick");
            frames += 1;
            assert!(frames < 100, "run did not finish");
        }

        // 8 swaps plus the frame that observed Done.
        assert_eq!(frames, 9);
        assert_eq!(app.state.values(), &[1, 2, 3, 4, 5]);
        assert!(app.highlight.is_none());
        assert_eq!(app.completed_runs, 1);
        assert_eq!(app.last_run_steps, 8);
        assert_eq!(app.steps(), 8);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut app = app_with(vec![4, 3, 2, 1]);
        assert!(app.start().expect("start"));
        app.tick().expect("tick");
        let run_before = app.run.clone();

        app.toggle_direction();
        assert!(!app.start().expect("start"));
        assert_eq!(app.run, run_before);
    }

    #[test]
    fn test_selection_change_does_not_affect_active_run() {
        let mut app = app_with(vec![4, 3, 2, 1]);
        app.start().expect("start");
        app.select_algorithm(Algorithm::Insertion);
        app.toggle_direction();

        let run = app.run.as_ref().expect("active run");
        assert_eq!(run.algorithm(), Algorithm::Bubble);
        assert_eq!(run.direction(), Direction::Ascending);

        while app.is_running() {
            app.tick().expect("tick");
        }
        assert_eq!(app.state.values(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_reset_during_run_discards_run() {
        let mut app = app_with(vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
        app.start().expect("start");
        for _ in 0..3 {
            app.tick().expect("tick");
        }
        assert!(app.is_running());

        app.reset().expect("reset");
        assert!(!app.is_running());
        assert!(app.highlight.is_none());
        assert_eq!(app.state.len(), 50);

        // A new run starts a fresh traversal from pass 0.
        app.start().expect("start");
        assert_eq!(app.steps(), 0);
        app.tick().expect("tick");
        if let Some((i, j)) = app.highlight {
            assert_eq!(j, i + 1);
        }
    }

    #[test]
    fn test_reset_regenerates_sequence() {
        let mut app = SortApp::new(VizConfig::builder().seed(1).build()).expect("valid config");
        let before = app.state.values().to_vec();
        app.reset().expect("reset");
        assert_ne!(app.state.values(), before.as_slice());
        assert!(app.state.values().iter().all(|v| (0..=100).contains(v)));
    }

    #[test]
    fn test_bar_colors() {
        let mut app = app_with(vec![2, 1, 3, 4]);
        assert_eq!(app.bar_color(0), PALETTE[0]);
        assert_eq!(app.bar_color(1), PALETTE[1]);
        assert_eq!(app.bar_color(3), PALETTE[0]);

        app.start().expect("start");
        app.tick().expect("tick");
        assert_eq!(app.bar_color(0), HIGHLIGHT_FROM);
        assert_eq!(app.bar_color(1), HIGHLIGHT_TO);
        assert_eq!(app.bar_color(2), PALETTE[2]);
    }

    #[test]
    fn test_click_dropdown_and_select() {
        let mut app = app_with(vec![1, 2]);
        app.handle_click(60, 110).expect("click");
        assert!(app.dropdown_open);

        app.handle_click(60, 170).expect("click");
        assert!(!app.dropdown_open);
        assert_eq!(app.algorithm, Algorithm::Insertion);
    }

    #[test]
    fn test_click_start_and_reset() {
        let mut app = app_with(vec![3, 2, 1]);
        app.handle_click(500, 115).expect("click");
        assert!(app.is_running());

        app.handle_click(350, 115).expect("click");
        assert!(!app.is_running());
    }

    #[test]
    fn test_click_start_swallowed_while_dropdown_open() {
        let mut app = app_with(vec![3, 2, 1]);
        app.dropdown_open = true;
        app.handle_click(500, 115).expect("click");
        assert!(!app.is_running());
        assert!(app.dropdown_open);
    }

    #[test]
    fn test_select_quick_sort_ignored() {
        let mut app = app_with(vec![1, 2]);
        app.dropdown_open = true;
        app.select_algorithm(Algorithm::Quick);
        assert_eq!(app.algorithm, Algorithm::Bubble);
        assert!(!app.dropdown_open);
    }

    #[test]
    fn test_handle_key_quit() {
        let mut app = app_with(vec![1, 2]);
        app.handle_key(KeyCode::Char('q')).expect("key");
        assert!(app.should_quit());

        let mut app = app_with(vec![1, 2]);
        app.handle_key(KeyCode::Esc).expect("key");
        assert!(app.should_quit());
    }

    #[test]
    fn test_handle_key_start_reset_direction() {
        let mut app = app_with(vec![2, 1]);
        app.handle_key(KeyCode::Char('s')).expect("key");
        assert!(app.is_running());

        app.handle_key(KeyCode::Char('r')).expect("key");
        assert!(!app.is_running());

        app.handle_key(KeyCode::Char('d')).expect("key");
        assert_eq!(app.direction, Direction::Descending);

        app.handle_key(KeyCode::Enter).expect("key");
        assert_eq!(
            app.run.as_ref().map(SortRun::direction),
            Some(Direction::Descending)
        );
    }

    #[test]
    fn test_handle_key_uppercase() {
        let mut app = app_with(vec![2, 1]);
        app.handle_key(KeyCode::Char('D')).expect("key");
        assert_eq!(app.direction, Direction::Descending);

        app.handle_key(KeyCode::Char('S')).expect("key");
        assert!(app.is_running());

        app.handle_key(KeyCode::Char('R')).expect("key");
        assert!(!app.is_running());

        app.handle_key(KeyCode::Char('Q')).expect("key");
        assert!(app.should_quit());
    }

    #[test]
    fn test_handle_key_tab_cycles_algorithm() {
        let mut app = app_with(vec![1, 2]);
        app.handle_key(KeyCode::Tab).expect("key");
        assert_eq!(app.algorithm, Algorithm::Insertion);
        app.handle_key(KeyCode::Tab).expect("key");
        assert_eq!(app.algorithm, Algorithm::Bubble);
    }

    #[test]
    fn test_single_element_finishes_on_first_frame() {
        let mut app = app_with(vec![1]);
        app.start().expect("start");
        app.tick().expect("tick");
        assert!(!app.is_running());
        assert_eq!(app.last_run_steps, 0);
    }
}
