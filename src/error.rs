use std::collections::TryReserveError;

use thiserror::Error;

/// Unrecoverable failures while building game resources.
///
/// Collisions are not errors; they are reported through `game::Tick`.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("board of {width}x{height} cells is too large")]
    BoardTooLarge { width: usize, height: usize },

    #[error("failed to allocate game storage: {0}")]
    Allocation(#[from] TryReserveError),
}
