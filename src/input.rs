//! Held-key input state
//!
//! The host collects key events asynchronously; the session only ever reads
//! a snapshot during its synchronous tick. Repeated key-down while a key is
//! already held is ignored, and unrecognized keys map to nothing at all.

use crate::sim::TickInput;

/// Keys the core recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    SpinClockwise,
    SpinCounterClockwise,
    Restart,
    Quit,
}

impl Key {
    const COUNT: usize = 6;

    fn index(self) -> usize {
        self as usize
    }

    /// Map a DOM-style key name. Unknown names are silently ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            "ArrowUp" | "x" | "X" => Some(Self::SpinClockwise),
            "z" | "Z" => Some(Self::SpinCounterClockwise),
            "r" | "R" => Some(Self::Restart),
            "Escape" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Currently-held keys plus edge-triggered restart/quit.
#[derive(Debug, Default)]
pub struct InputState {
    held: [bool; Key::COUNT],
    pending_restart: bool,
    pending_quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key-down. Returns false when the key was already held
    /// (auto-repeat events change nothing).
    pub fn press(&mut self, key: Key) -> bool {
        if self.held[key.index()] {
            return false;
        }
        self.held[key.index()] = true;
        match key {
            Key::Restart => self.pending_restart = true,
            Key::Quit => self.pending_quit = true,
            _ => {}
        }
        true
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Drop everything held, e.g. when the game screen is left.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Snapshot for one tick. Consumes the restart/quit edges so they fire
    /// exactly once per press.
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            spin_cw: self.is_held(Key::SpinClockwise),
            spin_ccw: self.is_held(Key::SpinCounterClockwise),
            restart: self.pending_restart,
            quit: self.pending_quit,
        };
        self.pending_restart = false;
        self.pending_quit = false;
        input
    }
}
