use glam::Vec2;

use crate::action::{Action, MoveKey};

/// One-shot commands collected since the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Commands {
    /// Trigger pulls; each one is resolved as a separate fire attempt.
    pub fire: u32,
    pub reload: bool,
}

impl Commands {
    pub fn is_empty(&self) -> bool {
        self.fire == 0 && !self.reload
    }
}

/// Held movement keys, pending mouse-look and queued commands.
///
/// Pure state: applying input never performs I/O and never fails.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; 4],
    mouse_delta: Vec2,
    pointer_captured: bool,
    commands: Commands,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one action into the state.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Move { key, pressed } => self.set_key(key, pressed),
            Action::Look(delta) => self.add_mouse_delta(delta.x, delta.y),
            Action::Fire => self.commands.fire += 1,
            Action::Reload => self.commands.reload = true,
            Action::CapturePointer => self.set_pointer_captured(true),
            Action::ReleasePointer => self.set_pointer_captured(false),
        }
    }

    pub fn set_key(&mut self, key: MoveKey, pressed: bool) {
        self.held[key.index()] = pressed;
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held[key.index()]
    }

    /// Whether any movement key is currently down.
    pub fn is_moving(&self) -> bool {
        self.held.iter().any(|h| *h)
    }

    /// Accumulate pointer movement. Discarded unless pointer capture is engaged.
    pub fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        if !self.pointer_captured {
            tracing::trace!(dx, dy, "mouse delta discarded: pointer not captured");
            return;
        }
        self.mouse_delta += Vec2::new(dx, dy);
    }

    /// Return and clear the pointer movement accumulated since the last call.
    pub fn consume_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// Engage or release exclusive mouse mode. Releasing drops pending look input.
    pub fn set_pointer_captured(&mut self, captured: bool) {
        if self.pointer_captured != captured {
            tracing::debug!(captured, "pointer capture changed");
        }
        self.pointer_captured = captured;
        if !captured {
            self.mouse_delta = Vec2::ZERO;
        }
    }

    /// Return and clear the queued one-shot commands.
    pub fn take_commands(&mut self) -> Commands {
        std::mem::take(&mut self.commands)
    }

    /// Release every key and drop pending input. Capture mode is kept.
    pub fn clear(&mut self) {
        self.held = [false; 4];
        self.mouse_delta = Vec2::ZERO;
        self.commands = Commands::default();
    }
}
