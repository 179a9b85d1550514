//! Interactive Dipole Field Demo
//!
//! A terminal front end for the dipole session. Four sliders move the two
//! charges; every change recomputes the field and redraws the heat map,
//! arrows and markers.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package dipole-interactive
//! RUST_LOG=dipole_core=debug cargo run --package dipole-interactive  # log to dipole-interactive.log
//! ```
//!
//! # Keys
//!
//! - `↑` / `↓` / `Tab` - Select a slider
//! - `←` / `→` - Move the selected coordinate by 0.1 (`Shift`: 0.5)
//! - `Home` / `End` - Jump to the lower / upper bound
//! - `r` - Reset both charges
//! - `t` - Toggle dark / light theme
//! - `q` / `Esc` - Quit
//!
//! Clicking or dragging on a slider track sets its value directly.

use dipole_core::render::{arrow_glyph, plasma, viridis, ContourScale, Rgb};
use dipole_core::{
    Axis, ChargeId, DisplayConfig, FieldFrame, InteractiveSession, Polarity, RenderSurface,
    SessionConfig,
};
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use std::error::Error;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const TITLE: &str = " Electric field of a dipole ";
const LOG_FILE: &str = "dipole-interactive.log";
const FINE_STEP: f32 = 0.1;
const COARSE_STEP: f32 = 0.5;

/// Slider order in the control panel
const SLIDERS: [(ChargeId, Axis); 4] = [
    (ChargeId::Positive, Axis::X),
    (ChargeId::Positive, Axis::Y),
    (ChargeId::Negative, Axis::X),
    (ChargeId::Negative, Axis::Y),
];

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    let config = SessionConfig {
        display: DisplayConfig {
            contour_scale: ContourScale::Logarithmic,
            ..Default::default()
        },
        ..Default::default()
    };
    // Fail before touching the terminal
    config.validate()?;

    let terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;
    let result = run(terminal, config);
    teardown(|| execute!(io::stdout(), DisableMouseCapture), ratatui::restore)?;

    if let Err(e) = &result {
        error!("Session ended with error: {e}");
    }
    result
}

/// Undo terminal setup; `restore` runs even when releasing the mouse fails
fn teardown(
    release_mouse: impl FnOnce() -> io::Result<()>,
    restore: impl FnOnce(),
) -> io::Result<()> {
    let released = release_mouse();
    restore();
    released
}

/// Logs go to a file, and only when `RUST_LOG` is set; the terminal belongs to the UI
fn init_logging() -> io::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create(LOG_FILE)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(terminal: DefaultTerminal, config: SessionConfig) -> Result<(), Box<dyn Error>> {
    let mut session = InteractiveSession::new(config, TerminalSurface::new(terminal))?;
    session.recompute_and_render()?;
    info!("Terminal session started");

    loop {
        let keep_going = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(&mut session, key)?,
            Event::Mouse(mouse) => {
                handle_mouse(&mut session, mouse)?;
                true
            }
            Event::Resize(_, _) => {
                session.surface_mut().redraw()?;
                true
            }
            _ => true,
        };
        if !keep_going {
            break;
        }
        // The timer records after `present`, so the status line is one cycle behind
        let ms = session.timer().smoothed_frame_time_ms();
        if session.surface_mut().ui.sync_recompute_ms(ms) {
            session.surface_mut().redraw()?;
        }
    }

    info!("Terminal session closed");
    Ok(())
}

/// Returns `false` when the user asked to quit
fn handle_key(session: &mut InteractiveSession<TerminalSurface>, key: KeyEvent) -> io::Result<bool> {
    let selected = session.surface().ui.selected;
    let (id, axis) = SLIDERS[selected];
    let current = session.state().charge(id).position()[axis.index()];
    let bound = session.config().position_bound;
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        COARSE_STEP
    } else {
        FINE_STEP
    };

    match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Ok(false),
        KeyCode::Up | KeyCode::BackTab => {
            session.surface_mut().ui.selected = (selected + SLIDERS.len() - 1) % SLIDERS.len();
            session.surface_mut().redraw()?;
        }
        KeyCode::Down | KeyCode::Tab => {
            session.surface_mut().ui.selected = (selected + 1) % SLIDERS.len();
            session.surface_mut().redraw()?;
        }
        KeyCode::Left => session.set_position(id, axis, snap(current - step))?,
        KeyCode::Right => session.set_position(id, axis, snap(current + step))?,
        KeyCode::Home => session.set_position(id, axis, -bound)?,
        KeyCode::End => session.set_position(id, axis, bound)?,
        KeyCode::Char('r' | 'R') => session.reset()?,
        KeyCode::Char('t' | 'T') => {
            let ui = &mut session.surface_mut().ui;
            ui.dark = !ui.dark;
            session.surface_mut().redraw()?;
        }
        _ => {}
    }
    Ok(true)
}

fn handle_mouse(session: &mut InteractiveSession<TerminalSurface>, mouse: MouseEvent) -> io::Result<()> {
    if !matches!(
        mouse.kind,
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
    ) {
        return Ok(());
    }
    let Some((index, t)) = session.surface().ui.slider_at(mouse.column, mouse.row) else {
        return Ok(());
    };
    let bound = session.config().position_bound;
    let (id, axis) = SLIDERS[index];
    session.surface_mut().ui.selected = index;
    session.set_position(id, axis, snap(-bound + t * 2.0 * bound))
}

/// Round to the one-decimal slider resolution
fn snap(value: f32) -> f32 {
    let snapped = (value * 10.0).round() / 10.0;
    // -0.0 would read "-0.0"
    if snapped == 0.0 {
        0.0
    } else {
        snapped
    }
}

/// Front-end state that survives between frames
struct UiState {
    selected: usize,
    dark: bool,
    recompute_ms: f64,
    /// Screen rows of the slider tracks from the last draw, for mouse hit-tests
    tracks: [Rect; 4],
}

impl UiState {
    /// Store the latest recompute time; `true` if the status line needs a repaint
    fn sync_recompute_ms(&mut self, ms: f64) -> bool {
        if self.recompute_ms == ms {
            return false;
        }
        self.recompute_ms = ms;
        true
    }

    /// Slider index under `(column, row)` and the fraction along its track
    fn slider_at(&self, column: u16, row: u16) -> Option<(usize, f32)> {
        let pos = Position::new(column, row);
        self.tracks.iter().enumerate().find_map(|(i, track)| {
            if !track.contains(pos) {
                return None;
            }
            let span = f32::from(track.width.saturating_sub(1).max(1));
            Some((i, f32::from(column - track.x) / span))
        })
    }
}

struct Theme {
    base: Style,
    dim: Style,
    accent: Style,
    border: Style,
}

impl Theme {
    fn new(dark: bool) -> Self {
        let (fg, bg, dim) = if dark {
            (Color::Rgb(220, 220, 230), Color::Rgb(18, 18, 28), Color::Rgb(120, 120, 150))
        } else {
            (Color::Rgb(20, 20, 30), Color::Rgb(245, 245, 240), Color::Rgb(110, 110, 120))
        };
        Self {
            base: Style::default().fg(fg).bg(bg),
            dim: Style::default().fg(dim).bg(bg),
            accent: Style::default()
                .fg(Color::Rgb(255, 200, 80))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Rgb(100, 180, 255)).bg(bg),
        }
    }
}

/// Draws every presented frame straight to the terminal
struct TerminalSurface {
    terminal: DefaultTerminal,
    last_frame: Option<FieldFrame>,
    ui: UiState,
}

impl TerminalSurface {
    fn new(terminal: DefaultTerminal) -> Self {
        Self {
            terminal,
            last_frame: None,
            ui: UiState {
                selected: 0,
                dark: true,
                recompute_ms: 0.0,
                tracks: [Rect::default(); 4],
            },
        }
    }

    /// Repaint the last frame, e.g. after a resize or a selection change
    fn redraw(&mut self) -> io::Result<()> {
        let Some(field) = &self.last_frame else {
            return Ok(());
        };
        let ui = &mut self.ui;
        self.terminal.draw(|f| render(f, field, ui))?;
        Ok(())
    }
}

impl RenderSurface for TerminalSurface {
    type Error = io::Error;

    fn present(&mut self, frame: &FieldFrame) -> io::Result<()> {
        self.last_frame = Some(frame.clone());
        self.redraw()
    }
}

fn render(f: &mut Frame, field: &FieldFrame, ui: &mut UiState) {
    let theme = Theme::new(ui.dark);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border)
        .style(theme.base)
        .title(TITLE)
        .title_style(theme.accent);
    let inner = block.inner(f.area());
    f.render_widget(block, f.area());

    let [body, help] = Layout::vertical([Constraint::Min(8), Constraint::Length(1)]).areas(inner);
    let [panel, plot] =
        Layout::horizontal([Constraint::Length(34), Constraint::Min(20)]).areas(body);

    render_panel(f, panel, field, ui, &theme);
    render_plot(f, plot, field, &theme);

    let keys = "↑↓ select  ←→ ±0.1  ⇧ ±0.5  Home/End  r reset  t theme  q quit";
    f.render_widget(Paragraph::new(Span::styled(keys, theme.dim)), help);
}

fn render_panel(f: &mut Frame, area: Rect, field: &FieldFrame, ui: &mut UiState, theme: &Theme) {
    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend([Constraint::Length(2); 4]);
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(area);

    f.render_widget(
        Paragraph::new(Span::styled(" Control Panel", theme.accent)),
        rows[0],
    );

    let labels = field.labels();
    let bound = field.position_bound();
    for (i, (id, axis)) in SLIDERS.iter().enumerate() {
        let area = rows[i + 1];
        let value = field.marker(*id).position[axis.index()];
        let name = match id.polarity() {
            Polarity::Positive => "+q",
            Polarity::Negative => "−q",
        };
        let selected = ui.selected == i;
        let label_style = if selected { theme.accent } else { theme.base };
        let marker = if selected { "▶" } else { " " };
        let label = Line::from(vec![
            Span::styled(format!("{marker} {name} position {axis}: "), label_style),
            Span::styled(labels.coordinate(*id, *axis).to_string(), theme.accent),
        ]);

        let track = Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        ui.tracks[i] = track;
        let color = polarity_color(id.polarity());
        let bar = Line::from(vec![
            Span::raw("  "),
            Span::styled(slider_track(value, bound, usize::from(track.width)), theme.base.fg(color)),
        ]);
        f.render_widget(Paragraph::new(vec![label, bar]), area);
    }

    let (lo, hi) = field.magnitude_range();
    let mut info = vec![
        Line::from(""),
        Line::from(Span::styled(" Information", theme.accent)),
        Line::from(format!(" {}", labels.separation)),
    ];
    info.extend(labels.charges.lines().map(|l| Line::from(format!(" {l}"))));
    info.push(Line::from(format!(" {}", labels.constant)));
    info.push(Line::from(Span::styled(
        format!(" |E| {lo:.2e} .. {hi:.2e}"),
        theme.dim,
    )));
    info.push(Line::from(Span::styled(
        format!(" recompute {:.2} ms", ui.recompute_ms),
        theme.dim,
    )));
    f.render_widget(Paragraph::new(info), rows[5]);
}

fn slider_track(value: f32, bound: f32, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let t = ((value + bound) / (2.0 * bound)).clamp(0.0, 1.0);
    let knob = (t * (width - 1) as f32).round() as usize;
    (0..width)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}

fn render_plot(f: &mut Frame, area: Rect, field: &FieldFrame, theme: &Theme) {
    let grid = field.grid();
    let markers = field.markers().map(|m| (field.marker_cell(&m), m));
    let mut lines = Vec::with_capacity(grid.height() + 2);

    for row in (0..grid.height()).rev() {
        let mut spans = vec![Span::styled(format!("{:5.1} ", grid.ys().get(0, row)), theme.dim)];
        for col in 0..grid.width() {
            if let Some((_, m)) = markers.iter().find(|(cell, _)| *cell == (col, row)) {
                spans.push(Span::styled(
                    format!("{} ", m.symbol()),
                    Style::default()
                        .fg(Color::White)
                        .bg(polarity_color(m.polarity))
                        .add_modifier(Modifier::BOLD),
                ));
                continue;
            }
            let band = rgb(viridis(field.contour_fraction(col, row)));
            let arrow = rgb(plasma(field.normalized_magnitude(field.magnitude().get(col, row))));
            spans.push(Span::styled(
                format!("{} ", arrow_glyph(field.directions().at(col, row))),
                Style::default().fg(arrow).bg(band),
            ));
        }
        lines.push(Line::from(spans));
    }

    let width = grid.width();
    let x_min = format!("{:.1}", grid.xs().get(0, 0));
    let x_max = format!("{:.1}", grid.xs().get(width - 1, 0));
    lines.push(Line::from(Span::styled(
        format!("{:6}{x_min:<width$}{x_max:>width$}", ""),
        theme.dim,
    )));
    lines.push(Line::from(Span::styled(
        format!("{:6}{:^w$}", "", "x (m)", w = width * 2),
        theme.dim,
    )));

    f.render_widget(Paragraph::new(lines), area);
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

fn polarity_color(polarity: Polarity) -> Color {
    match polarity {
        Polarity::Positive => Color::Rgb(220, 50, 50),
        Polarity::Negative => Color::Rgb(60, 110, 235),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_track_knob_position() {
        assert_eq!(slider_track(-4.5, 4.5, 5), "●────");
        assert_eq!(slider_track(0.0, 4.5, 5), "━━●──");
        assert_eq!(slider_track(4.5, 4.5, 5), "━━━━●");
        assert_eq!(slider_track(0.0, 4.5, 0), "");
    }

    fn ui_state() -> UiState {
        UiState {
            selected: 0,
            dark: true,
            recompute_ms: 0.0,
            tracks: [Rect::default(); 4],
        }
    }

    #[test]
    fn test_snap_to_one_decimal() {
        assert_eq!(snap(1.26), 1.3);
        assert_eq!(snap(-0.04), 0.0);
        assert!(snap(-0.04).is_sign_positive());
        assert_eq!(format!("{:.1}", snap(-0.04)), "0.0");
        assert_eq!(snap(-1.26), -1.3);
    }

    #[test]
    fn test_recompute_time_sync() {
        let mut ui = ui_state();
        assert!(ui.sync_recompute_ms(1.25));
        assert_eq!(ui.recompute_ms, 1.25);
        assert!(!ui.sync_recompute_ms(1.25));
    }

    #[test]
    fn test_teardown_restores_when_mouse_release_fails() {
        let mut restored = false;
        let result = teardown(|| Err(io::Error::other("mouse")), || restored = true);
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn test_slider_hit_test() {
        let mut ui = ui_state();
        ui.tracks[2] = Rect::new(10, 5, 11, 1);
        assert_eq!(ui.slider_at(10, 5), Some((2, 0.0)));
        assert_eq!(ui.slider_at(20, 5), Some((2, 1.0)));
        assert_eq!(ui.slider_at(15, 5), Some((2, 0.5)));
        assert_eq!(ui.slider_at(15, 6), None);
    }
}
