//! Tuning configuration for a session.
//!
//! Every rate is expressed per second (or per tick where noted). The
//! defaults reproduce the feel of the per-frame constants the game was
//! designed around at [`REFERENCE_FRAME_RATE`].

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::types::EnemyVariant;

/// Frame rate the per-frame design constants were authored against.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0:?} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub spawn_position: Vec3,
    /// Eye height the head bob oscillates around.
    pub base_height: f32,
    pub start_health: i32,
    /// Walk speed in units/s.
    pub move_speed: f32,
    /// Radians of rotation per pixel of mouse movement.
    pub mouse_sensitivity: f32,
    /// Head bob phase advance in radians/s.
    pub bob_rate: f32,
    pub bob_amplitude: f32,
    /// Fraction of the remaining height error closed per reference frame while idle.
    pub height_smoothing: f32,
    pub damage_flash_ms: u64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            spawn_position: Vec3::new(0.0, 1.7, 5.0),
            base_height: 1.7,
            start_health: 100,
            move_speed: 0.12 * REFERENCE_FRAME_RATE,
            mouse_sensitivity: 0.002,
            bob_rate: 0.15 * REFERENCE_FRAME_RATE,
            bob_amplitude: 0.05,
            height_smoothing: 0.1,
            damage_flash_ms: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub max_ammo: u32,
    pub reload_ms: u64,
    /// Projectile speed in units/s.
    pub projectile_speed: f32,
    pub hit_radius: f32,
    pub max_range: f32,
    pub damage_per_hit: u32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            max_ammo: 30,
            reload_ms: 1200,
            projectile_speed: 1.0 * REFERENCE_FRAME_RATE,
            hit_radius: 1.2,
            max_range: 300.0,
            damage_per_hit: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Enemies stop approaching inside this distance.
    pub close_range: f32,
    /// Approach speed in units/s.
    pub move_speed: f32,
    pub attack_range: f32,
    pub attack_damage: i32,
    /// Ticks between two attacks of the same enemy.
    pub attack_cooldown_ticks: u32,
    pub spawn_ring_radius: f32,
    /// Height of an enemy's centre above the floor.
    pub spawn_height: f32,
    /// Maximum random offset applied to each spawn point, per axis.
    pub spawn_jitter: f32,
    pub population: Vec<EnemyVariant>,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        use EnemyVariant::*;
        Self {
            close_range: 2.0,
            move_speed: 0.03 * REFERENCE_FRAME_RATE,
            attack_range: 20.0,
            attack_damage: 5,
            attack_cooldown_ticks: 120,
            spawn_ring_radius: 25.0,
            spawn_height: 1.0,
            spawn_jitter: 4.0,
            population: vec![Grunt, Grunt, Stalker, Stalker, Brute, Brute],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopTuning {
    pub tick_rate_hz: f32,
    /// Catch-up ticks allowed in one frame before accumulated time is dropped.
    pub max_ticks_per_frame: u32,
}

impl Default for LoopTuning {
    fn default() -> Self {
        Self {
            tick_rate_hz: REFERENCE_FRAME_RATE,
            max_ticks_per_frame: 5,
        }
    }
}

/// Complete tuning for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the deterministic spawn layout.
    pub seed: u64,
    pub player: PlayerTuning,
    pub weapon: WeaponTuning,
    pub enemy: EnemyTuning,
    #[serde(rename = "loop")]
    pub game_loop: LoopTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            player: PlayerTuning::default(),
            weapon: WeaponTuning::default(),
            enemy: EnemyTuning::default(),
            game_loop: LoopTuning::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate a config file. The format is picked from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let config: Self = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {v}"),
                })
            }
        }

        positive("loop.tick_rate_hz", self.game_loop.tick_rate_hz)?;
        positive("player.move_speed", self.player.move_speed)?;
        positive("player.mouse_sensitivity", self.player.mouse_sensitivity)?;
        positive("weapon.projectile_speed", self.weapon.projectile_speed)?;
        positive("weapon.hit_radius", self.weapon.hit_radius)?;
        positive("weapon.max_range", self.weapon.max_range)?;
        positive("enemy.attack_range", self.enemy.attack_range)?;

        if !(0.0..=1.0).contains(&self.player.height_smoothing) {
            return Err(ConfigError::Invalid {
                field: "player.height_smoothing",
                reason: format!("must be within [0, 1], got {}", self.player.height_smoothing),
            });
        }
        if self.player.start_health <= 0 {
            return Err(ConfigError::Invalid {
                field: "player.start_health",
                reason: "must be greater than zero".into(),
            });
        }
        if self.weapon.max_ammo == 0 {
            return Err(ConfigError::Invalid {
                field: "weapon.max_ammo",
                reason: "must be greater than zero".into(),
            });
        }
        if self.game_loop.max_ticks_per_frame == 0 {
            return Err(ConfigError::Invalid {
                field: "loop.max_ticks_per_frame",
                reason: "must be greater than zero".into(),
            });
        }
        if self.enemy.close_range < 0.0 || self.enemy.spawn_jitter < 0.0 {
            return Err(ConfigError::Invalid {
                field: "enemy",
                reason: "ranges must not be negative".into(),
            });
        }
        Ok(())
    }

    /// Duration of one simulation tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.game_loop.tick_rate_hz as f64)
    }

    pub fn reload_duration(&self) -> Duration {
        Duration::from_millis(self.weapon.reload_ms)
    }

    pub fn damage_flash_duration(&self) -> Duration {
        Duration::from_millis(self.player.damage_flash_ms)
    }
}
