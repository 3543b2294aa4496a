//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderer cannot mutate session state.
//! - Render output derives only from a [`RenderScene`] and a [`ViewState`].
//!
//! The debug text renderer stands in for a GPU backend; swap one in by
//! implementing [`Renderer`] without touching the game loop.

mod renderer;

pub use renderer::{DebugTextRenderer, NullRenderer, RenderScene, Renderer, ViewState};

pub fn crate_info() -> &'static str {
    concat!("ironsight-render v", env!("CARGO_PKG_VERSION"))
}
