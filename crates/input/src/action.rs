use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Semantic movement keys, independent of the physical layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [Self::Forward, Self::Back, Self::Left, Self::Right];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Forward => 0,
            Self::Back => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}

/// A high-level action produced by the input source.
///
/// The session consumes actions and the resulting [`crate::InputState`],
/// never raw device events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A movement key was pressed or released.
    Move { key: MoveKey, pressed: bool },
    /// Raw pointer movement in pixels.
    Look(Vec2),
    /// Pull the trigger once.
    Fire,
    /// Request a manual reload.
    Reload,
    /// Engage exclusive mouse mode.
    CapturePointer,
    /// Leave exclusive mouse mode.
    ReleasePointer,
}
