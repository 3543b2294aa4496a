//! Session kernel: authoritative player and enemy state, the weapon and enemy
//! AI systems, deferred timers, and the fixed-order simulation tick.
//!
//! # Invariants
//! - A tick runs input, player, weapon, then enemy AI, in that order.
//! - All state mutations flow through explicit operations and report outcomes.
//! - Presentation never reads kernel internals; it only receives [`Cue`]s.

pub mod controller;
pub mod cue;
pub mod enemy_ai;
pub mod player;
pub mod session;
pub mod timers;
pub mod weapon;
pub mod world;

pub use controller::PlayerController;
pub use cue::Cue;
pub use enemy_ai::{Attack, EnemyAi};
pub use player::{DamageOutcome, Player};
pub use session::{Session, SessionState, SessionStats, TickReport};
pub use timers::{TimerHandle, TimerKind, TimerQueue};
pub use weapon::{
    FireOutcome, FireRejection, Projectile, ProjectileId, ProjectileReport, ReloadOutcome,
    WeaponSystem,
};
pub use world::{Enemy, EnemyHit, World, WorldError, WorldEvent};

pub fn crate_info() -> &'static str {
    concat!("ironsight-kernel v", env!("CARGO_PKG_VERSION"))
}
