use thiserror::Error;

/// Reasons a [`GameConfig`](super::GameConfig) cannot be used to build a board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero")]
    ZeroDimension,

    #[error("a {height}x{width} grid cannot hold the two starting tiles")]
    TooSmall { height: usize, width: usize },

    #[error("win threshold {0} is below 4")]
    InvalidWinThreshold(u32),
}

/// Contract violations reported by the board engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// `spawn` was called with no empty cell left
    #[error("cannot spawn a tile: the grid has no empty cell")]
    Full,

    /// A cell holds something other than 0 or a power of two in `2..=MAX_TILE`
    #[error("invalid tile value {value} at ({row}, {col})")]
    InvalidTile { row: usize, col: usize, value: u32 },

    #[error("grid shape {found:?} does not match the configured {expected:?}")]
    Shape {
        expected: (usize, usize),
        found: (usize, usize),
    },
}
