//! Presentation: the contract between the session and whatever shows it to
//! the player (HUD text, damage overlay, sound), plus developer inspection.
//!
//! # Invariants
//! - Presentation is driven only by [`ironsight_kernel::Cue`]s, in order.
//! - Nothing here mutates session state.

mod hud;
mod inspector;
mod presentation;

pub use hud::HudState;
pub use inspector::{SessionInspector, SessionSummary};
pub use presentation::{LogPresenter, Presentation, dispatch};

pub fn crate_info() -> &'static str {
    concat!("ironsight-hud v", env!("CARGO_PKG_VERSION"))
}
