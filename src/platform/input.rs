//! Keyboard to intent mapping
//!
//! Space starts from the menu and flaps in play, P pauses and resumes,
//! M mutes, R restarts after game over, Q quits from the menu or game over
//! screen. Closing the window is always a quit request.

use crate::sim::{GamePhase, Intent};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    P,
    M,
    R,
    Q,
    /// Window close button
    Close,
    Other,
}

impl Key {
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_lowercase() {
            ' ' => Key::Space,
            'p' => Key::P,
            'm' => Key::M,
            'r' => Key::R,
            'q' => Key::Q,
            _ => Key::Other,
        }
    }
}

/// Intent for a key press in the given phase, if any
pub fn intent_for_key(key: Key, phase: GamePhase) -> Option<Intent> {
    match (phase, key) {
        (_, Key::Close) => Some(Intent::Quit),
        (GamePhase::Menu, Key::Space) => Some(Intent::Start),
        (GamePhase::Menu, Key::Q) => Some(Intent::Quit),
        (GamePhase::Playing, Key::Space) => Some(Intent::Flap),
        (GamePhase::Playing, Key::P) | (GamePhase::Paused, Key::P) => Some(Intent::Pause),
        (GamePhase::Playing, Key::M) => Some(Intent::Mute),
        (GamePhase::GameOver, Key::R) => Some(Intent::Restart),
        (GamePhase::GameOver, Key::Q) => Some(Intent::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_depends_on_phase() {
        assert_eq!(intent_for_key(Key::Space, GamePhase::Menu), Some(Intent::Start));
        assert_eq!(intent_for_key(Key::Space, GamePhase::Playing), Some(Intent::Flap));
        assert_eq!(intent_for_key(Key::Space, GamePhase::Paused), None);
        assert_eq!(intent_for_key(Key::Space, GamePhase::GameOver), None);
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Key::from_char('P'), Key::P);
        assert_eq!(Key::from_char(' '), Key::Space);
        assert_eq!(Key::from_char('x'), Key::Other);
    }

    #[test]
    fn test_close_always_quits() {
        for phase in [GamePhase::Menu, GamePhase::Playing, GamePhase::Paused, GamePhase::GameOver] {
            assert_eq!(intent_for_key(Key::Close, phase), Some(Intent::Quit));
        }
        assert_eq!(intent_for_key(Key::Q, GamePhase::Playing), None);
    }
}
