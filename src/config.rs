use crate::board;
use crate::error::GameError;

/// Configuration for one game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of playable columns
    pub width: usize,
    /// Number of playable rows
    pub height: usize,
    /// Fixed seed for food placement, random if absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of cells on the board, checked for zero size and overflow
    pub fn cell_count(&self) -> Result<usize, GameError> {
        board::cell_count(self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.cell_count().map(|_| ())
    }
}
