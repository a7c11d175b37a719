//! Input Router: raw keys to player actions, with user-remappable bindings.

use std::fmt;

use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

/// A raw key identifier, independent of the terminal backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Space,
    Left,
    Right,
    Up,
    Down,
    Enter,
    Tab,
    Esc,
    Backspace,
    F(u8),
}

impl Key {
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        Some(match code {
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Esc => Key::Esc,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::F(n) => Key::F(n),
            _ => return None,
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Space => f.write_str("Space"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Enter => f.write_str("Enter"),
            Key::Tab => f.write_str("Tab"),
            Key::Esc => f.write_str("Esc"),
            Key::Backspace => f.write_str("Backspace"),
            Key::F(n) => write!(f, "F{n}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Pause,
    CheatLives,
    CheatSpeed,
    CheatBullets,
    BossKey,
    Save,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Fire,
        Action::Pause,
        Action::CheatLives,
        Action::CheatSpeed,
        Action::CheatBullets,
        Action::BossKey,
        Action::Save,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::MoveLeft => "Move left",
            Action::MoveRight => "Move right",
            Action::Fire => "Fire",
            Action::Pause => "Pause",
            Action::CheatLives => "Cheat: +3 lives",
            Action::CheatSpeed => "Cheat: slow enemies",
            Action::CheatBullets => "Cheat: big lasers",
            Action::BossKey => "Boss key",
            Action::Save => "Save & quit to menu",
        }
    }
}

/// One key per action, kept in the order the bindings were made.
///
/// Two actions may share a key; the most recently bound one wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    bindings: Vec<(Action, Key)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                (Action::MoveLeft, Key::Left),
                (Action::MoveRight, Key::Right),
                (Action::Fire, Key::Space),
                (Action::Pause, Key::Char('p')),
                (Action::CheatLives, Key::Char('c')),
                (Action::CheatSpeed, Key::Char('v')),
                (Action::CheatBullets, Key::Char('w')),
                (Action::BossKey, Key::Char('b')),
                (Action::Save, Key::Char('s')),
            ],
        }
    }
}

impl KeyBindings {
    /// Bind `action` to `key`, replacing only that action's previous key.
    pub fn bind(&mut self, action: Action, key: Key) {
        self.bindings.retain(|(a, _)| *a != action);
        self.bindings.push((action, key));
    }

    pub fn key_for(&self, action: Action) -> Option<Key> {
        self.bindings
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, k)| *k)
    }

    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.bindings
            .iter()
            .rev()
            .find(|(_, k)| *k == key)
            .map(|(a, _)| *a)
    }
}

/// Translates terminal key codes into actions using the current bindings.
#[derive(Clone, Debug, Default)]
pub struct InputRouter {
    bindings: KeyBindings,
}

impl InputRouter {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn route(&self, code: KeyCode) -> Option<Action> {
        Key::from_key_code(code).and_then(|key| self.bindings.action_for(key))
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn rebind(&mut self, action: Action, key: Key) {
        self.bindings.bind(action, key);
    }
}
