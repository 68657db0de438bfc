//! Terminal presentation: key bindings, the board and the side panels.

use crossterm::event::KeyCode;
use rand::Rng;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use sysinfo::{System, SystemExt};

use crate::config::{SIZE_PRESETS, SPEED_PRESETS};
use crate::controller::Simulation;
use crate::error::ControlError;

const ALIVE: &str = "■ ";
const DEAD: &str = "· ";

/// Something the user asked for with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    TogglePause,
    Clear,
    Step,
    SetRenderSpeed(u64),
    SetGridSize(usize),
    Quit,
}

impl Action {
    /// Maps a key to its action.
    ///
    /// * `s`: start, Space: pause/continue, `c`: clear, Enter: single step
    /// * `1`-`3`: speed presets, `4`-`6`: size presets
    /// * `q` / Esc: quit
    pub fn from_key(code: KeyCode) -> Option<Action> {
        let action = match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('s') => Action::Start,
            KeyCode::Char(' ') => Action::TogglePause,
            KeyCode::Char('c') => Action::Clear,
            KeyCode::Enter => Action::Step,
            KeyCode::Char(c @ '1'..='3') => {
                Action::SetRenderSpeed(SPEED_PRESETS[preset_index(c, '1')])
            }
            KeyCode::Char(c @ '4'..='6') => {
                Action::SetGridSize(SIZE_PRESETS[preset_index(c, '4')])
            }
            _ => return None,
        };
        Some(action)
    }

    /// Whether the control behind this action is enabled right now.
    pub fn is_available<R: Rng>(self, sim: &Simulation<R>) -> bool {
        match self {
            Action::Start => sim.can_start(),
            Action::TogglePause => sim.can_toggle_pause(),
            Action::Step => sim.can_step(),
            Action::SetRenderSpeed(ms) => sim.render_speed() != ms,
            Action::SetGridSize(size) => sim.grid_size() != size,
            Action::Clear | Action::Quit => true,
        }
    }

    /// Runs the action against the simulation. Disabled actions are ignored.
    pub fn apply<R: Rng>(self, sim: &mut Simulation<R>) -> Result<(), ControlError> {
        if !self.is_available(sim) {
            return Ok(());
        }
        match self {
            Action::Start => sim.start(),
            Action::TogglePause => sim.toggle_pause(),
            Action::Clear => sim.clear(),
            Action::Step => sim.advance_one_generation(),
            Action::SetRenderSpeed(ms) => sim.set_render_speed(ms)?,
            Action::SetGridSize(size) => sim.set_grid_size(size)?,
            Action::Quit => {}
        }
        Ok(())
    }
}

fn preset_index(key: char, first: char) -> usize {
    (key as u8 - first as u8) as usize
}

/// Process memory figures shown in the statistics panel.
#[derive(Debug)]
pub struct Monitor {
    sys: System,
}

impl Monitor {
    pub fn new() -> Self {
        Monitor {
            sys: System::new_all(),
        }
    }

    pub fn refresh(&mut self) {
        self.sys.refresh_memory();
    }

    /// Used and total memory in KB.
    pub fn memory_kb(&self) -> (u64, u64) {
        (self.sys.used_memory() / 1024, self.sys.total_memory() / 1024)
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the whole screen: board on the left, controls and statistics on the right.
pub fn draw<R: Rng>(f: &mut Frame, sim: &Simulation<R>, memory_kb: (u64, u64)) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
        .split(f.size());
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)].as_ref())
        .split(chunks[1]);

    draw_grid(f, sim, chunks[0]);
    draw_controls(f, sim, side[0]);
    draw_stats(f, sim, memory_kb, side[1]);
}

/// Text form of the board, one line per row.
pub fn grid_text<R: Rng>(sim: &Simulation<R>) -> String {
    let mut cells = String::new();
    for row in sim.grid().rows() {
        for &cell in row {
            cells.push_str(if cell { ALIVE } else { DEAD });
        }
        cells.push('\n');
    }
    cells
}

fn draw_grid<R: Rng>(f: &mut Frame, sim: &Simulation<R>, area: Rect) {
    let size = sim.grid_size();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Game of Life {size}x{size}"));

    let paragraph = Paragraph::new(grid_text(sim))
        .style(Style::default().fg(Color::White))
        .block(block);

    f.render_widget(paragraph, area);
}

fn control<R: Rng>(key: &str, label: String, action: Action, sim: &Simulation<R>) -> Span<'static> {
    let style = if action.is_available(sim) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    };
    Span::styled(format!("[{key}] {label}  "), style)
}

fn draw_controls<R: Rng>(f: &mut Frame, sim: &Simulation<R>, area: Rect) {
    let toggle_label = if sim.is_paused() { "Continue" } else { "Pause" };

    let speeds: Vec<Span> = SPEED_PRESETS
        .iter()
        .zip(["1", "2", "3"])
        .map(|(&ms, key)| control(key, format!("{ms}ms"), Action::SetRenderSpeed(ms), sim))
        .collect();
    let sizes: Vec<Span> = SIZE_PRESETS
        .iter()
        .zip(["4", "5", "6"])
        .map(|(&n, key)| control(key, format!("{n}x{n}"), Action::SetGridSize(n), sim))
        .collect();

    let lines = vec![
        Line::from(vec![
            control("s", "Start".to_owned(), Action::Start, sim),
            control("space", toggle_label.to_owned(), Action::TogglePause, sim),
        ]),
        Line::from(vec![
            control("c", "Clear".to_owned(), Action::Clear, sim),
            control("enter", "Step".to_owned(), Action::Step, sim),
        ]),
        Line::from(""),
        Line::from("Speed:"),
        Line::from(speeds),
        Line::from("Grid size:"),
        Line::from(sizes),
        Line::from(Span::raw("[q] Quit")),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Controls"))
        .wrap(Wrap { trim: true });

    f.render_widget(widget, area);
}

/// Human readable playback state.
pub fn status<R: Rng>(sim: &Simulation<R>) -> &'static str {
    if sim.timer_active() {
        "Running"
    } else if sim.is_paused() {
        "Paused"
    } else {
        "Stopped"
    }
}

fn draw_stats<R: Rng>(f: &mut Frame, sim: &Simulation<R>, memory_kb: (u64, u64), area: Rect) {
    let (memory_used, memory_total) = memory_kb;

    let stats_text = format!(
        "Ticks: {}\n\
        Current Population: {}\n\
        Cells Born: {}\n\
        Birth Rate: {:.2}/tick\n\
        Speed: {}ms\n\
        Memory Usage: {}KB/{:.2}MB\n\
        Status: {}\n",
        sim.ticks(),
        sim.grid().population(),
        sim.generations(),
        sim.generations() as f64 / sim.ticks().max(1) as f64,
        sim.render_speed(),
        memory_used,
        memory_total as f64 / 1024.0,
        status(sim),
    );

    let stats_widget = Paragraph::new(stats_text)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(stats_widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use rand::{rngs::StdRng, SeedableRng};
    use ratatui::{backend::TestBackend, Terminal};

    fn simulation() -> Simulation<StdRng> {
        Simulation::with_rng(Settings::default(), StdRng::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn keys_map_to_presets() {
        assert_eq!(
            Action::from_key(KeyCode::Char('1')),
            Some(Action::SetRenderSpeed(1000))
        );
        assert_eq!(
            Action::from_key(KeyCode::Char('3')),
            Some(Action::SetRenderSpeed(250))
        );
        assert_eq!(
            Action::from_key(KeyCode::Char('4')),
            Some(Action::SetGridSize(25))
        );
        assert_eq!(
            Action::from_key(KeyCode::Char('6')),
            Some(Action::SetGridSize(50))
        );
        assert_eq!(Action::from_key(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(Action::from_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn current_presets_are_disabled() {
        let sim = simulation();
        assert!(!Action::SetRenderSpeed(1000).is_available(&sim));
        assert!(Action::SetRenderSpeed(500).is_available(&sim));
        assert!(!Action::SetGridSize(25).is_available(&sim));
        assert!(Action::SetGridSize(50).is_available(&sim));
    }

    #[test]
    fn start_is_ignored_while_running() {
        let mut sim = simulation();
        Action::Start.apply(&mut sim).unwrap();
        sim.advance_one_generation();
        let ticks = sim.ticks();

        Action::Start.apply(&mut sim).unwrap();
        assert_eq!(sim.ticks(), ticks);
    }

    #[test]
    fn step_advances_only_when_stopped() {
        let mut sim = simulation();
        Action::Step.apply(&mut sim).unwrap();
        assert_eq!(sim.ticks(), 1);

        sim.start();
        Action::Step.apply(&mut sim).unwrap();
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn pause_toggle_is_ignored_when_stopped() {
        let mut sim = simulation();
        Action::TogglePause.apply(&mut sim).unwrap();
        assert!(!sim.is_paused());
        assert!(!sim.timer_active());
    }

    #[test]
    fn grid_text_has_one_line_per_row() {
        let mut sim = simulation();
        sim.reset(4).unwrap();
        let text = grid_text(&sim);
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().all(|line| line.chars().count() == 8));
        assert_eq!(text.matches(ALIVE).count() as u64, sim.grid().population());
    }

    #[test]
    fn status_follows_timer_and_pause() {
        let mut sim = simulation();
        assert_eq!(status(&sim), "Stopped");
        sim.start();
        assert_eq!(status(&sim), "Running");
        sim.pause();
        assert_eq!(status(&sim), "Paused");
    }

    #[test]
    fn draws_into_test_backend() {
        let mut sim = simulation();
        sim.start();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, &sim, (1024, 2048))).unwrap();
    }
}
