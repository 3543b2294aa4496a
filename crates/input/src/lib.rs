//! Input: raw key and pointer events mapped to semantic actions, folded into
//! per-frame [`InputState`].
//!
//! # Invariants
//! - The simulation consumes actions and state, never raw key names.
//! - Mouse-look deltas only accumulate while pointer capture is engaged.

pub mod action;
pub mod keymap;
pub mod state;

pub use action::{Action, MoveKey};
pub use keymap::action_for_key;
pub use state::{Commands, InputState};

pub fn crate_info() -> &'static str {
    concat!("ironsight-input v", env!("CARGO_PKG_VERSION"))
}
