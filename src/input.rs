//! Keyboard input
//!
//! Key events arrive between frames and write into [`InputState`]; the
//! simulation only reads a [`TickInput`] snapshot taken at the start of a tick.

use std::collections::HashMap;

/// Keys the game reacts to. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    A,
    D,
    W,
    S,
    Space,
    /// Restart after game over (released `r`)
    Restart,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "a" | "A" => Some(Key::A),
            "d" | "D" => Some(Key::D),
            "w" | "W" => Some(Key::W),
            "s" | "S" => Some(Key::S),
            " " => Some(Key::Space),
            "r" | "R" => Some(Key::Restart),
            _ => None,
        }
    }

    /// Control keys are tracked in [`InputState`] and have their browser
    /// default action suppressed. Restart is only ever a release event.
    pub fn is_control(&self) -> bool {
        !matches!(self, Key::Restart)
    }
}

/// Movement intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Currently held control keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashMap<Key, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as held. Returns true when the key was recorded, i.e. the
    /// host should suppress its default handling.
    pub fn press(&mut self, key: Key) -> bool {
        if !key.is_control() {
            return false;
        }
        self.keys.insert(key, true);
        true
    }

    pub fn release(&mut self, key: Key) {
        if key.is_control() {
            self.keys.insert(key, false);
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    pub fn any_pressed(&self) -> bool {
        self.keys.values().any(|&held| held)
    }

    /// Release every key
    pub fn clear(&mut self) {
        for held in self.keys.values_mut() {
            *held = false;
        }
    }

    /// Freeze the current key state into per-tick movement flags
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.is_pressed(Key::ArrowLeft) || self.is_pressed(Key::A),
            right: self.is_pressed(Key::ArrowRight) || self.is_pressed(Key::D),
            up: self.is_pressed(Key::ArrowUp) || self.is_pressed(Key::W),
            down: self.is_pressed(Key::ArrowDown) || self.is_pressed(Key::S),
        }
    }
}
