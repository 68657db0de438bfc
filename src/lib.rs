//! # Seeded Life
//!
//! A Game of Life engine with a playback controller and a terminal front end
//! built on `ratatui` and `crossterm`.
//!
//! ## Features
//!
//! * Bounded square board (edges do not wrap)
//! * Random starting clusters seeded around three points
//! * Start, pause/continue and clear controls
//! * Speed presets of 1000, 500 and 250 ms
//! * Grid size presets of 25, 35 and 50

pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod seed;
pub mod timer;
pub mod ui;

pub use config::{Cli, Settings};
pub use controller::Simulation;
pub use error::ControlError;
pub use grid::{advance, count_live_neighbors, make_field, Grid};
pub use seed::{generate_seed, Coordinate};
