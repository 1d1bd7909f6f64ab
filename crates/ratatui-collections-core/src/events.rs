//! Named events, the commands they carry, and key bindings that produce them.
//!
//! A host runtime can forward its own named events through [`Command::from_event`], or feed raw
//! input through a widget's `handle_event`, which consults [`CommandBindings`].

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::ScrollDirection;
use crate::keymap;

pub const KEY_DOWN: &str = "keyDown";
pub const KEY_UP: &str = "keyUp";
pub const KEY_ENTER: &str = "keyEnter";
pub const KEY_HOME: &str = "keyHome";
pub const KEY_END: &str = "keyEnd";
pub const KEY_PAGE_UP: &str = "keyPageUp";
pub const KEY_PAGE_DOWN: &str = "keyPageDown";
pub const SORT: &str = "sort";

/// All event names a collection widget registers handlers for.
pub const EVENT_NAMES: &[&str] = &[
    KEY_DOWN,
    KEY_UP,
    KEY_ENTER,
    KEY_HOME,
    KEY_END,
    KEY_PAGE_UP,
    KEY_PAGE_DOWN,
    SORT,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Down,
    Up,
    PageDown,
    PageUp,
    First,
    Last,
    Confirm,
    /// Sort by the named field.
    Sort(String),
}

impl Command {
    /// Parses a named event. `"sort"` needs the field name as payload; anything else ignores it.
    pub fn from_event(name: &str, payload: Option<&str>) -> Option<Self> {
        let cmd = match name {
            KEY_DOWN => Command::Down,
            KEY_UP => Command::Up,
            KEY_ENTER => Command::Confirm,
            KEY_HOME => Command::First,
            KEY_END => Command::Last,
            KEY_PAGE_UP => Command::PageUp,
            KEY_PAGE_DOWN => Command::PageDown,
            SORT => Command::Sort(payload?.to_string()),
            _ => return None,
        };
        Some(cmd)
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            Command::Down => KEY_DOWN,
            Command::Up => KEY_UP,
            Command::PageDown => KEY_PAGE_DOWN,
            Command::PageUp => KEY_PAGE_UP,
            Command::First => KEY_HOME,
            Command::Last => KEY_END,
            Command::Confirm => KEY_ENTER,
            Command::Sort(_) => SORT,
        }
    }
}

/// Result of handling one command. Anything but `None` means the widget changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionAction {
    None,
    SelectionChanged(usize),
    Activated(usize),
    Sorted,
}

/// Key bindings for collection navigation.
///
/// The defaults accept both arrow keys and Vim-style keys.
#[derive(Clone, Debug)]
pub struct CommandBindings {
    pub down: Vec<KeyEvent>,
    pub up: Vec<KeyEvent>,
    pub page_down: Vec<KeyEvent>,
    pub page_up: Vec<KeyEvent>,
    pub first: Vec<KeyEvent>,
    pub last: Vec<KeyEvent>,
    pub confirm: Vec<KeyEvent>,
}

impl Default for CommandBindings {
    fn default() -> Self {
        Self {
            down: vec![keymap::key(KeyCode::Down), keymap::key_char('j')],
            up: vec![keymap::key(KeyCode::Up), keymap::key_char('k')],
            page_down: vec![keymap::key(KeyCode::PageDown), keymap::key_ctrl('d')],
            page_up: vec![keymap::key(KeyCode::PageUp), keymap::key_ctrl('u')],
            first: vec![keymap::key(KeyCode::Home), keymap::key_char('g')],
            last: vec![keymap::key(KeyCode::End), keymap::key_char('G')],
            confirm: vec![keymap::key(KeyCode::Enter)],
        }
    }
}

impl CommandBindings {
    pub fn command_for(&self, key: &KeyEvent) -> Option<Command> {
        let table: [(&[KeyEvent], Command); 7] = [
            (self.down.as_slice(), Command::Down),
            (self.up.as_slice(), Command::Up),
            (self.page_down.as_slice(), Command::PageDown),
            (self.page_up.as_slice(), Command::PageUp),
            (self.first.as_slice(), Command::First),
            (self.last.as_slice(), Command::Last),
            (self.confirm.as_slice(), Command::Confirm),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keymap::any_matches(keys, key))
            .map(|(_, cmd)| cmd)
    }

    pub fn command_for_event(&self, event: &InputEvent) -> Option<Command> {
        match event {
            InputEvent::Key(key) => self.command_for(key),
            InputEvent::Scroll(ScrollDirection::Up) => Some(Command::Up),
            InputEvent::Scroll(ScrollDirection::Down) => Some(Command::Down),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_events() {
        assert_eq!(Command::from_event("keyDown", None), Some(Command::Down));
        assert_eq!(
            Command::from_event("sort", Some("Age")),
            Some(Command::Sort("Age".into()))
        );
        assert_eq!(Command::from_event("sort", None), None);
        assert_eq!(Command::from_event("keyLeft", None), None);
        for name in EVENT_NAMES {
            let cmd = Command::from_event(name, Some("x")).expect("known event");
            assert_eq!(cmd.event_name(), *name);
        }
    }

    #[test]
    fn default_bindings() {
        let b = CommandBindings::default();
        assert_eq!(b.command_for(&keymap::key_char('j')), Some(Command::Down));
        assert_eq!(b.command_for(&keymap::key_ctrl('u')), Some(Command::PageUp));
        assert_eq!(b.command_for(&keymap::key_char('G')), Some(Command::Last));
        assert_eq!(b.command_for(&keymap::key_char('x')), None);
        assert_eq!(
            b.command_for_event(&InputEvent::Scroll(ScrollDirection::Up)),
            Some(Command::Up)
        );
    }
}
