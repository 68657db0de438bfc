//! Command-line options and simulation settings.

use std::path::PathBuf;

use clap::Parser;

use crate::error::ControlError;

/// Render speed presets offered by the UI, slowest first.
pub const SPEED_PRESETS: [u64; 3] = [1000, 500, 250];
/// Grid size presets offered by the UI.
pub const SIZE_PRESETS: [usize; 3] = [25, 35, 50];

/// Starting parameters of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Side length of the square board.
    pub grid_size: usize,
    /// Milliseconds between generations.
    pub render_speed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: SIZE_PRESETS[0],
            render_speed: SPEED_PRESETS[0],
        }
    }
}

impl Settings {
    /// Checks that both parameters are positive.
    pub fn validate(self) -> Result<Self, ControlError> {
        if self.grid_size == 0 {
            return Err(ControlError::InvalidGridSize(self.grid_size));
        }
        if self.render_speed == 0 {
            return Err(ControlError::InvalidRenderSpeed(self.render_speed));
        }
        Ok(self)
    }
}

/// Terminal Game of Life seeded with a few random clusters.
#[derive(Debug, Parser)]
#[command(name = "seeded_life", version, about)]
pub struct Cli {
    /// Side length of the square board.
    #[arg(long, default_value_t = SIZE_PRESETS[0])]
    pub size: usize,

    /// Milliseconds between generations.
    #[arg(long, default_value_t = SPEED_PRESETS[0])]
    pub speed: u64,

    /// Seed the board but wait for the pause toggle before advancing.
    #[arg(long)]
    pub paused: bool,

    /// Write log records to this file. Logging is disabled otherwise.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Validated simulation settings from the parsed options.
    pub fn settings(&self) -> Result<Settings, ControlError> {
        Settings {
            grid_size: self.size,
            render_speed: self.speed,
        }
        .validate()
    }
}
