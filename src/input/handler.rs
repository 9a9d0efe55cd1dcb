use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the game loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    Quit,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to a command; unbound keys return `None`.
    pub fn command_for(&self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                Some(Command::Turn(Direction::Up))
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                Some(Command::Turn(Direction::Down))
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                Some(Command::Turn(Direction::Left))
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                Some(Command::Turn(Direction::Right))
            }

            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),

            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.command_for(key(KeyCode::Up)),
            Some(Command::Turn(Direction::Up))
        );
        assert_eq!(
            handler.command_for(key(KeyCode::Down)),
            Some(Command::Turn(Direction::Down))
        );
        assert_eq!(
            handler.command_for(key(KeyCode::Left)),
            Some(Command::Turn(Direction::Left))
        );
        assert_eq!(
            handler.command_for(key(KeyCode::Right)),
            Some(Command::Turn(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.command_for(key(KeyCode::Char('w'))),
            Some(Command::Turn(Direction::Up))
        );
        assert_eq!(
            handler.command_for(key(KeyCode::Char('a'))),
            Some(Command::Turn(Direction::Left))
        );
        assert_eq!(
            handler.command_for(key(KeyCode::Char('s'))),
            Some(Command::Turn(Direction::Down))
        );
        assert_eq!(
            handler.command_for(key(KeyCode::Char('d'))),
            Some(Command::Turn(Direction::Right))
        );

        let shifted = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.command_for(shifted),
            Some(Command::Turn(Direction::Up))
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.command_for(key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(handler.command_for(key(KeyCode::Esc)), Some(Command::Quit));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.command_for(ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn test_restart_key() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.command_for(key(KeyCode::Char('r'))),
            Some(Command::Restart)
        );
        assert_eq!(
            handler.command_for(key(KeyCode::Char('R'))),
            Some(Command::Restart)
        );
    }

    #[test]
    fn test_unbound_key() {
        let handler = InputHandler::new();
        assert_eq!(handler.command_for(key(KeyCode::Char('x'))), None);
        assert_eq!(handler.command_for(key(KeyCode::Tab)), None);
    }
}
