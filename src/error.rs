use thiserror::Error;

/// Rejected input to the simulation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("grid size must be at least 1, got {0}")]
    InvalidGridSize(usize),
    #[error("render speed must be at least 1 ms, got {0}")]
    InvalidRenderSpeed(u64),
}
