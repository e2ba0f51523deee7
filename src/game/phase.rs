use super::{action::Action, engine::Board, error::BoardError};
use tracing::info;

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// A new game must be dealt before any input is read
    Init,
    /// Playing
    Game,
    /// A tile reached the win threshold
    Win,
    /// No move is possible
    Gameover,
    /// Terminal
    Exit,
}

impl GamePhase {
    /// Resolve phases that need no input. `Init` resets the board and becomes `Game`.
    pub fn settle(self, board: &mut Board) -> Result<Self, BoardError> {
        match self {
            GamePhase::Init => {
                board.reset()?;
                Ok(GamePhase::Game)
            }
            other => Ok(other),
        }
    }

    /// Apply one player action
    pub fn on_action(self, action: Action, board: &mut Board) -> Result<Self, BoardError> {
        let next = match (self, action) {
            (GamePhase::Exit, _) => GamePhase::Exit,
            (_, Action::Exit) => GamePhase::Exit,
            (_, Action::Restart) => GamePhase::Init,
            (GamePhase::Game, Action::Move(direction)) => {
                if !board.move_tiles(direction)? {
                    GamePhase::Game
                } else if board.is_win() {
                    info!(score = board.score(), "game won");
                    GamePhase::Win
                } else if board.is_gameover() {
                    info!(score = board.score(), "game over");
                    GamePhase::Gameover
                } else {
                    GamePhase::Game
                }
            }
            // Moves are ignored once the game has ended; Init never sees input
            (phase, Action::Move(_)) => phase,
        };
        Ok(next)
    }

    pub fn is_terminal(&self) -> bool {
        *self == GamePhase::Exit
    }
}
