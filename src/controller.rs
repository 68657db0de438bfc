//! Simulation state and the actions a UI can take on it.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::Settings;
use crate::error::ControlError;
use crate::grid::{self, Grid};
use crate::seed::{self, Coordinate};
use crate::timer::Interval;

/// Owns the board, the playback parameters and the single periodic timer.
///
/// The board is only ever replaced wholesale, so anything reading
/// [`Simulation::grid`] between ticks sees a complete generation.
#[derive(Debug)]
pub struct Simulation<R = StdRng> {
    /// Current generation, replaced wholesale on every change.
    grid: Grid,
    /// Side length used for the next reset or clear.
    grid_size: usize,
    /// Milliseconds between generations.
    render_speed: u64,
    /// Set by pause, cleared by resume, reset and clear.
    is_paused: bool,
    /// Cumulative cells born since the last reset or clear.
    generations: u64,
    /// Advances since the last reset or clear.
    ticks: u64,
    /// Seed list applied by the most recent reset.
    initial_seeds: Vec<Coordinate>,
    /// The only periodic timer; `None` while stopped.
    timer: Option<Interval>,
    /// Source of seed positions.
    rng: R,
}

impl Simulation<StdRng> {
    /// Creates an idle simulation with an empty board and an entropy-seeded RNG.
    pub fn new(settings: Settings) -> Result<Self, ControlError> {
        Self::with_rng(settings, StdRng::from_entropy())
    }
}

impl<R: Rng> Simulation<R> {
    /// Creates an idle simulation drawing seed positions from `rng`.
    pub fn with_rng(settings: Settings, rng: R) -> Result<Self, ControlError> {
        let settings = settings.validate()?;
        Ok(Simulation {
            grid: grid::make_field(settings.grid_size),
            grid_size: settings.grid_size,
            render_speed: settings.render_speed,
            is_paused: false,
            generations: 0,
            ticks: 0,
            initial_seeds: Vec::new(),
            timer: None,
            rng,
        })
    }

    /// The board as of the last completed generation.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Side length of the board.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Milliseconds between generations.
    pub fn render_speed(&self) -> u64 {
        self.render_speed
    }

    /// Whether the game was paused and not yet resumed.
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Cumulative number of cells born since the last reset or clear.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Generations advanced since the last reset or clear.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seed list applied by the most recent reset.
    pub fn initial_seeds(&self) -> &[Coordinate] {
        &self.initial_seeds
    }

    /// Whether the periodic timer is running.
    pub fn timer_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Period of the active timer, if any.
    pub fn timer_period(&self) -> Option<Duration> {
        self.timer.as_ref().map(Interval::period)
    }

    /// Starting is offered only while no timer runs.
    pub fn can_start(&self) -> bool {
        self.timer.is_none()
    }

    /// The pause toggle needs either a running timer or a paused game.
    pub fn can_toggle_pause(&self) -> bool {
        self.timer.is_some() || self.is_paused
    }

    /// Single stepping is only allowed while nothing advances on its own.
    pub fn can_step(&self) -> bool {
        self.timer.is_none()
    }

    /// Replaces the board with a freshly seeded one of `size`.
    ///
    /// Leaves the timer alone.
    pub fn reset(&mut self, size: usize) -> Result<(), ControlError> {
        if size == 0 {
            warn!("rejected reset to grid size {size}");
            return Err(ControlError::InvalidGridSize(size));
        }

        self.grid_size = size;
        self.reseed();
        Ok(())
    }

    /// Reseeds the current board and starts advancing at the current speed.
    pub fn start(&mut self) {
        self.reseed();
        self.start_timer();
        info!(
            "started {}x{} game every {}ms",
            self.grid_size, self.grid_size, self.render_speed
        );
    }

    /// Stops advancing without touching the board.
    pub fn pause(&mut self) {
        self.stop_timer();
        self.is_paused = true;
        info!("paused after {} ticks", self.ticks);
    }

    /// Continues advancing at the stored render speed.
    pub fn resume(&mut self) {
        self.is_paused = false;
        self.start_timer();
        info!("resumed every {}ms", self.render_speed);
    }

    /// Calls [`Simulation::resume`] when paused, [`Simulation::pause`] otherwise.
    pub fn toggle_pause(&mut self) {
        if self.is_paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Stops the timer and empties the board.
    pub fn clear(&mut self) {
        self.stop_timer();
        self.grid = grid::make_field(self.grid_size);
        self.generations = 0;
        self.ticks = 0;
        self.is_paused = false;
        info!("cleared {}x{} board", self.grid_size, self.grid_size);
    }

    /// Changes the period and restarts the timer with it.
    ///
    /// The timer is restarted even if it was not running before.
    pub fn set_render_speed(&mut self, ms: u64) -> Result<(), ControlError> {
        if ms == 0 {
            warn!("rejected render speed {ms}ms");
            return Err(ControlError::InvalidRenderSpeed(ms));
        }
        self.stop_timer();
        self.render_speed = ms;
        self.start_timer();
        info!("render speed set to {ms}ms");
        Ok(())
    }

    /// Switches to an empty board of `size`. The timer stays stopped.
    pub fn set_grid_size(&mut self, size: usize) -> Result<(), ControlError> {
        if size == 0 {
            warn!("rejected grid size {size}");
            return Err(ControlError::InvalidGridSize(size));
        }
        self.grid_size = size;
        self.clear();
        Ok(())
    }

    /// Computes one generation and swaps it in.
    pub fn advance_one_generation(&mut self) {
        let (next, born) = grid::advance(&self.grid);
        self.grid = next;
        self.generations += born;
        self.ticks += 1;
        debug!(
            "tick {}: {born} born, {} alive",
            self.ticks,
            self.grid.population()
        );
    }

    /// Advances one generation if nothing else does. Returns whether it did.
    pub fn step(&mut self) -> bool {
        if !self.can_step() {
            return false;
        }
        self.advance_one_generation();
        true
    }

    /// Runs one generation if the timer is due at `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = match self.timer.as_mut() {
            Some(timer) => timer.poll(now),
            None => false,
        };
        if due {
            self.advance_one_generation();
        }
        due
    }

    /// How long the event loop may wait before the next [`Simulation::tick`].
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.as_ref().map(|timer| timer.remaining(now))
    }

    fn reseed(&mut self) {
        let size = self.grid_size;
        let seeds = seed::generate_seed(size, &mut self.rng);
        let mut field = grid::make_field(size);
        seed::apply_seed(&mut field, &seeds);
        debug!("seeded {} cells on a {size}x{size} board", field.population());

        self.grid = field;
        self.initial_seeds = seeds;
        self.generations = 0;
        self.ticks = 0;
        self.is_paused = false;
    }

    fn start_timer(&mut self) {
        self.stop_timer();
        self.timer = Some(Interval::new(
            Duration::from_millis(self.render_speed),
            Instant::now(),
        ));
    }

    fn stop_timer(&mut self) {
        if self.timer.take().is_some() {
            debug!("timer stopped");
        }
    }
}
