use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Mode, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(PlayerId, Direction),
    /// Start a round, or restart one that is over
    Start,
    Restart,
    NextLevel,
    PreviousLevel,
    ToggleMode,
    Quit,
    None,
}

/// Maps terminal keys to game actions
///
/// In single mode both arrows and WASD steer the one snake. In versus mode
/// WASD steers player 1 and the arrows steer player 2.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, mode: Mode) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let arrows = match mode {
            Mode::Single => PlayerId::One,
            Mode::Versus => PlayerId::Two,
        };

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(arrows, Direction::Up),
            KeyCode::Down => KeyAction::Steer(arrows, Direction::Down),
            KeyCode::Left => KeyAction::Steer(arrows, Direction::Left),
            KeyCode::Right => KeyAction::Steer(arrows, Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Steer(PlayerId::One, Direction::Up)
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Steer(PlayerId::One, Direction::Down)
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Steer(PlayerId::One, Direction::Left)
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Steer(PlayerId::One, Direction::Right)
            }

            // Controls
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Start,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('n') | KeyCode::Char('N') => KeyAction::NextLevel,
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::PreviousLevel,
            KeyCode::Char('m') | KeyCode::Char('M') => KeyAction::ToggleMode,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
