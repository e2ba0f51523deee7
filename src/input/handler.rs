use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

/// Maps key presses to player actions
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Translate a key press. Returns `None` for keys with no meaning in the game.
    pub fn handle_key_event(&self, key: KeyEvent) -> Option<Action> {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Exit);
        }

        let action = match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Action::Move(Direction::Up),
            KeyCode::Down => Action::Move(Direction::Down),
            KeyCode::Left => Action::Move(Direction::Left),
            KeyCode::Right => Action::Move(Direction::Right),

            // Movement, restart and quit by letter, either case
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Action::Move(Direction::Up),
                's' => Action::Move(Direction::Down),
                'a' => Action::Move(Direction::Left),
                'd' => Action::Move(Direction::Right),
                'r' => Action::Restart,
                'q' => Action::Exit,
                _ => return None,
            },

            KeyCode::Esc => Action::Exit,

            _ => return None,
        };
        Some(action)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
