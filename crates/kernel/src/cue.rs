use ironsight_common::EntityId;
use serde::{Deserialize, Serialize};

/// Presentation-facing event produced by a session.
///
/// The session never calls the presentation layer directly; it queues cues
/// and the driver forwards them once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    HealthChanged(i32),
    AmmoChanged(u32),
    ReloadStarted,
    ReloadFinished,
    FireSound,
    HitSound,
    /// Show the damage overlay at full opacity.
    DamageFlash,
    /// Hide the damage overlay.
    DamageFlashFaded,
    EnemyKilled(EntityId),
    /// The player died after surviving `ticks` ticks.
    SessionEnded { ticks: u64 },
    /// State was reinitialized for a new play-through.
    SessionReset,
}
