//! Game loop: one fixed-order pass per frame over a session.
//!
//! # Invariants
//! - Every frame runs input, simulation ticks, presentation, then render.
//! - Simulation advances in fixed ticks regardless of frame rate.

mod autopilot;
mod frame_timer;
mod game_loop;
mod script;

pub use autopilot::Autopilot;
pub use frame_timer::FrameTimer;
pub use game_loop::{FrameReport, GameLoop};
pub use script::{Idle, InputScript, InputSource};

pub fn crate_info() -> &'static str {
    concat!("ironsight-game v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    #[test]
    fn crate_info_names_every_layer() {
        for info in [
            crate::crate_info(),
            ironsight_kernel::crate_info(),
            ironsight_render::crate_info(),
            ironsight_hud::crate_info(),
            ironsight_input::crate_info(),
        ] {
            assert!(info.starts_with("ironsight-"), "{info}");
        }
    }
}
