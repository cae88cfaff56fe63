//! Key and mouse mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to game actions.
///
/// Letter keys match either case. Quit keys are checked separately with
/// [`should_quit`] before this is called.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Enter | KeyCode::Up | KeyCode::Down => Some(GameAction::Tap),
        KeyCode::Char(c) => char_action(c),
        _ => None,
    }
}

fn char_action(c: char) -> Option<GameAction> {
    match c.to_ascii_lowercase() {
        ' ' | 'w' | 's' | 'j' | 'k' => Some(GameAction::Tap),
        'p' => Some(GameAction::Pause),
        'r' => Some(GameAction::Restart),
        _ => None,
    }
}

/// Map mouse input to game actions: a left click is a tap anywhere.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<GameAction> {
    matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)).then_some(GameAction::Tap)
}

/// `q`, `Esc` or `Ctrl-C`.
pub fn should_quit(key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => true,
            'c' => ctrl,
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn click(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn drop_keys_all_tap() {
        let codes = [
            KeyCode::Char(' '),
            KeyCode::Enter,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Char('w'),
            KeyCode::Char('S'),
            KeyCode::Char('j'),
            KeyCode::Char('K'),
        ];
        for code in codes {
            assert_eq!(handle_key_event(key(code)), Some(GameAction::Tap), "{code:?}");
        }
    }

    #[test]
    fn pause_and_restart_ignore_case() {
        assert_eq!(handle_key_event(key(KeyCode::Char('p'))), Some(GameAction::Pause));
        assert_eq!(handle_key_event(key(KeyCode::Char('P'))), Some(GameAction::Pause));
        assert_eq!(handle_key_event(key(KeyCode::Char('R'))), Some(GameAction::Restart));
    }

    #[test]
    fn unbound_keys_map_to_nothing() {
        for code in [KeyCode::Left, KeyCode::Tab, KeyCode::Char('x'), KeyCode::Char('1')] {
            assert_eq!(handle_key_event(key(code)), None, "{code:?}");
        }
    }

    #[test]
    fn only_left_press_taps() {
        let left = MouseButton::Left;
        assert_eq!(handle_mouse_event(click(MouseEventKind::Down(left))), Some(GameAction::Tap));
        assert_eq!(handle_mouse_event(click(MouseEventKind::Up(left))), None);
        assert_eq!(handle_mouse_event(click(MouseEventKind::Drag(left))), None);
        assert_eq!(handle_mouse_event(click(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(handle_mouse_event(click(MouseEventKind::Moved)), None);
    }

    #[test]
    fn quit_needs_q_escape_or_ctrl_c() {
        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(should_quit(key(KeyCode::Char('Q'))));
        assert!(should_quit(key(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(key(KeyCode::Char('c'))));
        assert!(!should_quit(key(KeyCode::Char(' '))));
    }
}
