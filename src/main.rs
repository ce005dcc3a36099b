//! sortviz - Terminal User Interface
//!
//! Draws the sequence as bars on a ratatui canvas and advances the active
//! sort by one step per frame. App logic lives in `sortviz::tui::sort_app`.

#![forbid(unsafe_code)]

use clap::Parser;
use sortviz::cli::{init_logging, print_summary, run_headless, Args, LogTarget};
use sortviz::config::VizConfig;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(LogTarget::select(args.log.as_deref(), args.headless))?;

    let config = args.resolve_config()?;

    if args.headless {
        let summary = run_headless(&config)?;
        print_summary(&summary)?;
        return Ok(());
    }

    run_interactive(config)
}

#[cfg(feature = "tui")]
fn run_interactive(config: VizConfig) -> anyhow::Result<()> {
    let app = sortviz::tui::sort_app::SortApp::new(config)?;
    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_config: VizConfig) -> anyhow::Result<()> {
    anyhow::bail!("TUI feature not enabled. Run with --headless or build with --features tui")
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Alignment, Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        symbols::Marker,
        text::{Line, Span},
        widgets::{
            canvas::{Canvas, Line as CanvasLine, Rectangle},
            Block, Borders, Paragraph,
        },
        Frame, Terminal,
    };
    use sortviz::controls::PanelRect;
    use sortviz::tui::mouse::handle_mouse;
    use sortviz::tui::sort_app::{Rgb, SortApp};
    use std::io;
    use std::time::Instant;

    const CONTROL_BORDER: Color = Color::White;
    const OPTION_FILL: Color = Color::Rgb(200, 200, 200);

    pub fn run(mut app: SortApp) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            crossterm::cursor::Hide
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = run_main_loop(&mut terminal, &mut app);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_main_loop(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        app: &mut SortApp,
    ) -> anyhow::Result<()> {
        let frame_duration = app.config.frame_duration();
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| ui(f, app))?;

            let timeout = frame_duration.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key.code)?;
                    }
                    Event::Mouse(mouse) => handle_mouse(app, mouse)?,
                    _ => {}
                }
            }

            if last_tick.elapsed() >= frame_duration {
                app.tick()?;
                last_tick = Instant::now();
            }

            if app.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn ui(f: &mut Frame, app: &mut SortApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_title(f, chunks[0], app);
        render_canvas(f, chunks[1], app);
        render_status_bar(f, chunks[2], app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &SortApp) {
        let title = Paragraph::new(Line::from(Span::styled(
            app.title(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("sortviz"));
        f.render_widget(title, area);
    }

    const fn rgb(color: Rgb) -> Color {
        Color::Rgb(color.0, color.1, color.2)
    }

    /// Control rectangle in viewport coordinates, plus its label.
    struct ControlShape {
        rect: PanelRect,
        label: String,
        fill: Option<Color>,
    }

    fn control_shapes(app: &SortApp) -> Vec<ControlShape> {
        let panel = &app.panel;
        let mut shapes = vec![
            ControlShape {
                rect: panel.dropdown,
                label: format!(
                    "{} {}",
                    app.algorithm.name(),
                    if app.dropdown_open { "^" } else { "v" }
                ),
                fill: None,
            },
            ControlShape {
                rect: panel.reset,
                label: "Reset".to_string(),
                fill: None,
            },
            ControlShape {
                rect: panel.start,
                label: if app.is_running() { "Running" } else { "Start" }.to_string(),
                fill: None,
            },
        ];

        if app.dropdown_open {
            for (index, algorithm) in panel.options().iter().enumerate() {
                shapes.push(ControlShape {
                    rect: panel.option_rect(index),
                    label: algorithm.name().to_string(),
                    fill: Some(OPTION_FILL),
                });
            }
        }

        shapes
    }

    fn render_canvas(f: &mut Frame, area: Rect, app: &mut SortApp) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Bars (Green/Red = pair touched this frame)");
        let inner = block.inner(area);
        app.canvas_area = Some(inner);

        let viewport = app.state.viewport();
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);

        // Drawing units covered by half a terminal column.
        let fill_step = (width / (f64::from(inner.width.max(1)) * 2.0)).max(1.0);

        let bars: Vec<_> = app
            .state
            .bar_rects()
            .into_iter()
            .enumerate()
            .map(|(index, bar)| (bar, rgb(app.bar_color(index))))
            .collect();
        let controls = control_shapes(app);

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::HalfBlock)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(move |ctx| {
                // Viewport y grows downward, canvas y grows upward.
                for (bar, color) in &bars {
                    let top = height - f64::from(bar.y);
                    let bottom = height - f64::from(bar.bottom());
                    let mut x = f64::from(bar.x);
                    let right = f64::from(bar.right());
                    while x < right {
                        ctx.draw(&CanvasLine {
                            x1: x,
                            y1: bottom,
                            x2: x,
                            y2: top,
                            color: *color,
                        });
                        x += fill_step;
                    }
                }

                ctx.layer();

                for shape in &controls {
                    let rect = shape.rect;
                    let bottom = height - f64::from(rect.y + rect.height);
                    if let Some(fill) = shape.fill {
                        let mut y = bottom;
                        while y < bottom + f64::from(rect.height) {
                            ctx.draw(&CanvasLine {
                                x1: f64::from(rect.x),
                                y1: y,
                                x2: f64::from(rect.x + rect.width),
                                y2: y,
                                color: fill,
                            });
                            y += 1.0;
                        }
                    }
                    ctx.draw(&Rectangle {
                        x: f64::from(rect.x),
                        y: bottom,
                        width: f64::from(rect.width),
                        height: f64::from(rect.height),
                        color: CONTROL_BORDER,
                    });
                    let text = if shape.fill.is_some() {
                        Color::Black
                    } else {
                        Color::White
                    };
                    ctx.print(
                        f64::from(rect.x) + 8.0,
                        bottom + f64::from(rect.height) / 2.0,
                        Span::styled(
                            shape.label.clone(),
                            Style::default().fg(text).add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            });

        f.render_widget(canvas, area);
    }

    fn render_status_bar(f: &mut Frame, area: Rect, app: &SortApp) {
        let (status, status_color) = if app.is_running() {
            ("RUNNING", Color::Green)
        } else {
            ("IDLE", Color::Yellow)
        };

        let status_line = Line::from(vec![
            Span::styled(status, Style::default().fg(status_color)),
            Span::raw(format!(
                "  steps: {}  frame: {}  n: {}  ",
                app.steps(),
                app.frame_count,
                app.state.len()
            )),
            Span::styled(
                "[S]tart [R]eset [D]irection [Tab] algorithm [Q]uit",
                Style::default().fg(Color::Gray),
            ),
        ]);

        let bar = Paragraph::new(status_line).block(Block::default().borders(Borders::ALL));
        f.render_widget(bar, area);
    }
}
