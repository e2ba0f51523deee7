use super::{
    action::Direction,
    config::GameConfig,
    error::BoardError,
    grid::{Grid, is_valid_tile},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::{debug, info, trace};

/// Percent chance that a spawned tile is a 4 instead of a 2
const FOUR_PERCENT: u32 = 10;

/// The board engine: owns the grid, the running score and the session high score.
///
/// The board is only mutated through [`Board::reset`], [`Board::spawn`],
/// [`Board::move_tiles`] and the validated [`Board::set_grid`]; it never
/// performs I/O.
pub struct Board {
    config: GameConfig,
    grid: Grid,
    score: u64,
    high_score: u64,
    rng: StdRng,
}

impl Board {
    /// Create a board and start the first game
    pub fn new(config: GameConfig) -> Result<Self, BoardError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a board drawing spawns from `rng`
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, BoardError> {
        config.validate()?;

        let mut board = Self {
            config,
            grid: Grid::empty(config.height, config.width),
            score: 0,
            high_score: 0,
            rng,
        };
        board.reset()?;
        Ok(board)
    }

    /// Start a new game, folding the finished game's score into the high score
    pub fn reset(&mut self) -> Result<(), BoardError> {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        self.score = 0;
        self.grid = Grid::empty(self.config.height, self.config.width);

        self.spawn()?;
        self.spawn()?;

        info!(high_score = self.high_score, "new game started");
        Ok(())
    }

    /// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
    ///
    /// Returns the `(row, col)` that was filled. Fails with
    /// [`BoardError::Full`] and leaves the grid untouched when no cell is empty.
    pub fn spawn(&mut self) -> Result<(usize, usize), BoardError> {
        let empty = self.grid.empty_cells();
        let &(row, col) = empty.choose(&mut self.rng).ok_or(BoardError::Full)?;

        let value = if self.rng.gen_range(0..100) < FOUR_PERCENT {
            4
        } else {
            2
        };
        self.grid.set(row, col, value);

        debug!(row, col, value, "spawned tile");
        Ok((row, col))
    }

    /// Shift every tile in `direction`.
    ///
    /// Returns `Ok(false)` without touching the board when the move would not
    /// change anything. Otherwise merges, scores, spawns one tile and returns
    /// `Ok(true)`.
    pub fn move_tiles(&mut self, direction: Direction) -> Result<bool, BoardError> {
        if !self.move_is_possible(direction) {
            trace!(%direction, "move rejected");
            return Ok(false);
        }

        let (grid, points) = self.grid.moved(direction);
        self.grid = grid;
        self.score = self.score.saturating_add(points);
        debug!(%direction, points, score = self.score, "move applied");

        // A legal move always frees or keeps at least one empty cell
        self.spawn()?;
        Ok(true)
    }

    /// Whether moving in `direction` would change the board
    pub fn move_is_possible(&self, direction: Direction) -> bool {
        self.grid.can_move(direction)
    }

    /// Whether some tile has reached the win threshold
    pub fn is_win(&self) -> bool {
        self.grid
            .cells()
            .any(|value| value >= self.config.win_threshold)
    }

    /// Whether no direction can change the board
    pub fn is_gameover(&self) -> bool {
        !Direction::ALL
            .iter()
            .any(|&direction| self.move_is_possible(direction))
    }

    /// Replace the grid, e.g. to resume a position or set up a scenario.
    ///
    /// The grid must match the configured shape and hold only valid tiles;
    /// otherwise the board is left untouched.
    pub fn set_grid(&mut self, grid: Grid) -> Result<(), BoardError> {
        let expected = (self.config.height, self.config.width);
        let found = (grid.height(), grid.width());
        if expected != found {
            return Err(BoardError::Shape { expected, found });
        }
        for (row, cells) in grid.rows().iter().enumerate() {
            if let Some((col, &value)) = cells
                .iter()
                .enumerate()
                .find(|(_, value)| !is_valid_tile(**value))
            {
                return Err(BoardError::InvalidTile { row, col, value });
            }
        }
        self.grid = grid;
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn win_threshold(&self) -> u32 {
        self.config.win_threshold
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
