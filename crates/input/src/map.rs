//! Key mapping from terminal events to game intents.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One control the player can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateLeft,
    RotateRight,
    Hold,
    Pause,
    /// Start a fresh game after game over. Handled by the runner, not the core.
    Restart,
}

impl Intent {
    /// Level-triggered intents stay active while the key is held.
    pub fn is_held(&self) -> bool {
        matches!(self, Intent::MoveLeft | Intent::MoveRight | Intent::SoftDrop)
    }
}

/// Map keyboard input to game intents.
pub fn map_key(key: KeyEvent) -> Option<Intent> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Intent::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Intent::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Intent::SoftDrop)
        }

        // Rotation
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Intent::RotateLeft),
        KeyCode::Up
        | KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Intent::RotateRight),

        // Ctrl-C is quit, not hold.
        KeyCode::Char('c') | KeyCode::Char('C')
            if !key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Intent::Hold)
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(Intent::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Intent::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Option<Intent> {
        map_key(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Left), Some(Intent::MoveLeft));
        assert_eq!(key(KeyCode::Right), Some(Intent::MoveRight));
        assert_eq!(key(KeyCode::Down), Some(Intent::SoftDrop));

        assert_eq!(key(KeyCode::Char('a')), Some(Intent::MoveLeft));
        assert_eq!(key(KeyCode::Char('D')), Some(Intent::MoveRight));
        assert_eq!(key(KeyCode::Char('s')), Some(Intent::SoftDrop));

        assert_eq!(key(KeyCode::Char('H')), Some(Intent::MoveLeft));
        assert_eq!(key(KeyCode::Char('l')), Some(Intent::MoveRight));
        assert_eq!(key(KeyCode::Char('J')), Some(Intent::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(key(KeyCode::Char('z')), Some(Intent::RotateLeft));
        assert_eq!(key(KeyCode::Char('x')), Some(Intent::RotateRight));
        assert_eq!(key(KeyCode::Up), Some(Intent::RotateRight));
        assert_eq!(key(KeyCode::Char('W')), Some(Intent::RotateRight));
        assert_eq!(key(KeyCode::Char('k')), Some(Intent::RotateRight));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key(KeyCode::Char('c')), Some(Intent::Hold));
        assert_eq!(key(KeyCode::Char('p')), Some(Intent::Pause));
        assert_eq!(key(KeyCode::Esc), Some(Intent::Pause));
        assert_eq!(key(KeyCode::Char('r')), Some(Intent::Restart));
        assert_eq!(key(KeyCode::Char(' ')), None);
    }

    #[test]
    fn test_ctrl_c_is_not_hold() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), None);
        assert!(should_quit(ctrl_c));
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_held_intents() {
        assert!(Intent::MoveLeft.is_held());
        assert!(Intent::SoftDrop.is_held());
        assert!(!Intent::RotateLeft.is_held());
        assert!(!Intent::Pause.is_held());
    }
}
