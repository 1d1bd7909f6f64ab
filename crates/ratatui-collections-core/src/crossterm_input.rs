//! Conversions from crossterm events (feature `crossterm`).

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::ScrollDirection;
use crossterm::event as ct;

/// Converts a crossterm event. Key releases and repeats, pastes, resizes and non-wheel mouse
/// input yield `None`.
pub fn input_event_from_crossterm(ev: ct::Event) -> Option<InputEvent> {
    match ev {
        ct::Event::Key(key) if key.kind == ct::KeyEventKind::Press => {
            key_event_from_crossterm(key).map(InputEvent::Key)
        }
        ct::Event::Mouse(m) if m.kind == ct::MouseEventKind::ScrollUp => {
            Some(InputEvent::Scroll(ScrollDirection::Up))
        }
        ct::Event::Mouse(m) if m.kind == ct::MouseEventKind::ScrollDown => {
            Some(InputEvent::Scroll(ScrollDirection::Down))
        }
        _ => None,
    }
}

/// Converts a key, ignoring its press/release kind. Keys the widgets never bind yield `None`.
pub fn key_event_from_crossterm(key: ct::KeyEvent) -> Option<KeyEvent> {
    let code = key_code_from_crossterm(key.code)?;
    // Shifted letters already arrive uppercase; SHIFT is dropped so `G` matches `key_char('G')`.
    let modifiers = KeyModifiers {
        shift: false,
        ctrl: key.modifiers.contains(ct::KeyModifiers::CONTROL),
        alt: key.modifiers.contains(ct::KeyModifiers::ALT),
    };
    Some(KeyEvent::new(code).with_modifiers(modifiers))
}

fn key_code_from_crossterm(code: ct::KeyCode) -> Option<KeyCode> {
    Some(match code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Esc => KeyCode::Esc,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        ct::KeyCode::PageUp => KeyCode::PageUp,
        ct::KeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap;

    fn press(code: ct::KeyCode, modifiers: ct::KeyModifiers) -> ct::Event {
        ct::Event::Key(ct::KeyEvent::new(code, modifiers))
    }

    #[test]
    fn converts_keys_and_wheel() {
        assert_eq!(
            input_event_from_crossterm(press(ct::KeyCode::Char('d'), ct::KeyModifiers::CONTROL)),
            Some(InputEvent::Key(keymap::key_ctrl('d')))
        );
        assert_eq!(
            input_event_from_crossterm(press(ct::KeyCode::Char('G'), ct::KeyModifiers::SHIFT)),
            Some(InputEvent::Key(keymap::key_char('G')))
        );
        assert_eq!(
            input_event_from_crossterm(press(ct::KeyCode::F(1), ct::KeyModifiers::NONE)),
            None
        );

        let wheel = ct::Event::Mouse(ct::MouseEvent {
            kind: ct::MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: ct::KeyModifiers::NONE,
        });
        assert_eq!(
            input_event_from_crossterm(wheel),
            Some(InputEvent::Scroll(ScrollDirection::Down))
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = ct::KeyEvent::new(ct::KeyCode::Down, ct::KeyModifiers::NONE);
        key.kind = ct::KeyEventKind::Release;
        assert_eq!(input_event_from_crossterm(ct::Event::Key(key)), None);
    }
}
