//! Physical keys and per-fighter key bindings.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ControlsError;
use crate::types::{Button, InputFrame};

/// Physical keyboard keys a fighter can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Period,
    Comma,
    Slash,
    Semicolon,
    Space,
    Enter,
}

/// `KeyboardEvent.code` spelling of every key.
const KEY_CODES: [(Key, &str); 46] = [
    (Key::A, "KeyA"),
    (Key::B, "KeyB"),
    (Key::C, "KeyC"),
    (Key::D, "KeyD"),
    (Key::E, "KeyE"),
    (Key::F, "KeyF"),
    (Key::G, "KeyG"),
    (Key::H, "KeyH"),
    (Key::I, "KeyI"),
    (Key::J, "KeyJ"),
    (Key::K, "KeyK"),
    (Key::L, "KeyL"),
    (Key::M, "KeyM"),
    (Key::N, "KeyN"),
    (Key::O, "KeyO"),
    (Key::P, "KeyP"),
    (Key::Q, "KeyQ"),
    (Key::R, "KeyR"),
    (Key::S, "KeyS"),
    (Key::T, "KeyT"),
    (Key::U, "KeyU"),
    (Key::V, "KeyV"),
    (Key::W, "KeyW"),
    (Key::X, "KeyX"),
    (Key::Y, "KeyY"),
    (Key::Z, "KeyZ"),
    (Key::Digit0, "Digit0"),
    (Key::Digit1, "Digit1"),
    (Key::Digit2, "Digit2"),
    (Key::Digit3, "Digit3"),
    (Key::Digit4, "Digit4"),
    (Key::Digit5, "Digit5"),
    (Key::Digit6, "Digit6"),
    (Key::Digit7, "Digit7"),
    (Key::Digit8, "Digit8"),
    (Key::Digit9, "Digit9"),
    (Key::ArrowLeft, "ArrowLeft"),
    (Key::ArrowRight, "ArrowRight"),
    (Key::ArrowUp, "ArrowUp"),
    (Key::ArrowDown, "ArrowDown"),
    (Key::Period, "Period"),
    (Key::Comma, "Comma"),
    (Key::Slash, "Slash"),
    (Key::Semicolon, "Semicolon"),
    (Key::Space, "Space"),
    (Key::Enter, "Enter"),
];

impl Key {
    pub fn code(self) -> &'static str {
        KEY_CODES
            .iter()
            .find(|(k, _)| *k == self)
            .map(|(_, code)| *code)
            .unwrap_or("Unidentified")
    }

    pub fn from_code(code: &str) -> Option<Key> {
        KEY_CODES.iter().find(|(_, c)| *c == code).map(|(k, _)| *k)
    }
}

/// Input-source contract: which keys are held right now.
pub trait KeyboardState {
    fn is_pressed(&self, key: Key) -> bool;
}

impl KeyboardState for HashSet<Key> {
    fn is_pressed(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

impl KeyboardState for BTreeSet<Key> {
    fn is_pressed(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

impl KeyboardState for [Key] {
    fn is_pressed(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

/// Key bindings as they arrive from configuration. Any field may be missing;
/// [`Controls::from_config`] turns this into a complete layout or an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsConfig {
    #[serde(default)]
    pub left: Option<Key>,
    #[serde(default)]
    pub right: Option<Key>,
    #[serde(default)]
    pub jump: Option<Key>,
    #[serde(default)]
    pub attack1: Option<Key>,
    #[serde(default)]
    pub attack2: Option<Key>,
    #[serde(default)]
    pub block: Option<Key>,
}

impl ControlsConfig {
    pub fn get(&self, b: Button) -> Option<Key> {
        match b {
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Jump => self.jump,
            Button::Attack1 => self.attack1,
            Button::Attack2 => self.attack2,
            Button::Block => self.block,
        }
    }
}

impl From<Controls> for ControlsConfig {
    fn from(c: Controls) -> Self {
        ControlsConfig {
            left: Some(c.left),
            right: Some(c.right),
            jump: Some(c.jump),
            attack1: Some(c.attack1),
            attack2: Some(c.attack2),
            block: Some(c.block),
        }
    }
}

/// A complete, validated key layout: every button has exactly one key and no
/// key drives two buttons. Fixed once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    left: Key,
    right: Key,
    jump: Key,
    attack1: Key,
    attack2: Key,
    block: Key,
}

impl Controls {
    pub fn new(
        left: Key,
        right: Key,
        jump: Key,
        attack1: Key,
        attack2: Key,
        block: Key,
    ) -> Result<Self, ControlsError> {
        let controls = Controls {
            left,
            right,
            jump,
            attack1,
            attack2,
            block,
        };
        controls.check_duplicates()?;
        Ok(controls)
    }

    pub fn from_config(config: &ControlsConfig) -> Result<Self, ControlsError> {
        let key = |b: Button| config.get(b).ok_or(ControlsError::Unmapped(b));
        Controls::new(
            key(Button::Left)?,
            key(Button::Right)?,
            key(Button::Jump)?,
            key(Button::Attack1)?,
            key(Button::Attack2)?,
            key(Button::Block)?,
        )
    }

    pub fn key(&self, b: Button) -> Key {
        match b {
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Jump => self.jump,
            Button::Attack1 => self.attack1,
            Button::Attack2 => self.attack2,
            Button::Block => self.block,
        }
    }

    pub fn bindings(&self) -> impl Iterator<Item = (Button, Key)> + '_ {
        Button::ALL.into_iter().map(move |b| (b, self.key(b)))
    }

    pub fn binds(&self, key: Key) -> bool {
        self.bindings().any(|(_, k)| k == key)
    }

    /// Snapshot the held buttons for this frame.
    pub fn sample<K: KeyboardState + ?Sized>(&self, keys: &K) -> InputFrame {
        let mut buttons = 0;
        for (b, key) in self.bindings() {
            if keys.is_pressed(key) {
                buttons |= b.mask();
            }
        }
        InputFrame { buttons }
    }

    fn check_duplicates(&self) -> Result<(), ControlsError> {
        for (i, &first) in Button::ALL.iter().enumerate() {
            for &second in &Button::ALL[i + 1..] {
                if self.key(first) == self.key(second) {
                    return Err(ControlsError::DuplicateKey {
                        key: self.key(first),
                        first,
                        second,
                    });
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<ControlsConfig> for Controls {
    type Error = ControlsError;

    fn try_from(config: ControlsConfig) -> Result<Self, Self::Error> {
        Controls::from_config(&config)
    }
}

/// Two fighters on one keyboard must not share any key.
pub fn ensure_disjoint(a: &Controls, b: &Controls) -> Result<(), ControlsError> {
    match a.bindings().find(|(_, key)| b.binds(*key)) {
        Some((_, key)) => Err(ControlsError::SharedKey { key }),
        None => Ok(()),
    }
}
