//! Shared types for the ironsight workspace: identifiers, transforms, view
//! math and the tuning configuration every other crate reads from.

pub mod config;
pub mod types;

pub use config::{
    ConfigError, EnemyTuning, GameConfig, LoopTuning, PlayerTuning, REFERENCE_FRAME_RATE,
    WeaponTuning,
};
pub use types::{
    EnemyVariant, EntityId, SessionId, Transform, horizontal_basis, view_direction, yaw_towards,
};
