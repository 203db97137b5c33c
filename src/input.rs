/// Per-frame input snapshot.
///
/// The platform layer refreshes this once before each update pass; the core
/// never sees raw terminal events. Keys stay held until released (or until a
/// handler consumes them, e.g. the pause toggle); the mouse click edge is
/// true for exactly one frame after a press and is force-cleared at the end
/// of every update cycle regardless of whether anything consumed it.
use std::collections::HashMap;

/// The handful of keys the game cares about, decoupled from the host's
/// key-code type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Fire,
    Escape,
    P,
    C,
}

#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: HashMap<Key, bool>,
    /// Mouse position in world coordinates.
    pub mouse_x: f32,
    pub mouse_y: f32,
    /// True for the single frame following a press.
    pub clicked: bool,
    /// Continuous button-held state.
    pub mouse_down: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&mut self, key: Key, held: bool) {
        self.held.insert(key, held);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.get(&key).copied().unwrap_or(false)
    }

    /// Reads a key and clears it in the same step, so one physical press
    /// triggers at most one action (pause/resume toggles).
    pub fn consume(&mut self, key: Key) -> bool {
        let was = self.is_held(key);
        if was {
            self.held.insert(key, false);
        }
        was
    }

    /// Reads the click edge and clears it so later entities in the same
    /// pass don't react to the same physical click.
    pub fn consume_click(&mut self) -> bool {
        let was = self.clicked;
        self.clicked = false;
        was
    }

    /// Unconditional end-of-frame clear of the click edge.
    pub fn end_frame(&mut self) {
        self.clicked = false;
    }
}
