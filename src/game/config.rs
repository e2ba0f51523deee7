use super::error::ConfigError;

/// Configuration for the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of rows in the grid
    pub height: usize,
    /// Number of columns in the grid
    pub width: usize,
    /// Tile value that wins the game
    pub win_threshold: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: 4,
            width: 4,
            win_threshold: 2048,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Default::default()
        }
    }

    /// Replace the win threshold
    pub fn with_win_threshold(self, win_threshold: u32) -> Self {
        Self {
            win_threshold,
            ..self
        }
    }

    /// Check that a board can be built from this configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.height * self.width < 2 {
            return Err(ConfigError::TooSmall {
                height: self.height,
                width: self.width,
            });
        }
        if self.win_threshold < 4 {
            return Err(ConfigError::InvalidWinThreshold(self.win_threshold));
        }
        Ok(())
    }
}
