use glam::Vec3;
use ironsight_common::{GameConfig, Transform, view_direction};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Pitch bounds: straight down to straight up.
pub const PITCH_LIMIT: f32 = FRAC_PI_2;

/// Result of applying damage to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Still alive with this much health left.
    Wounded { health: i32 },
    /// Health reached zero; the session is over.
    Killed,
}

/// The player's viewpoint and vitals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Eye position.
    pub position: Vec3,
    /// Radians about +Y; positive turns left.
    pub yaw: f32,
    /// Radians, clamped to [-PITCH_LIMIT, PITCH_LIMIT].
    pub pitch: f32,
    pub health: i32,
    pub ammo: u32,
    pub reloading: bool,
}

impl Player {
    /// A fresh player at the configured spawn point with full health and magazine.
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            position: config.player.spawn_position,
            yaw: 0.0,
            pitch: 0.0,
            health: config.player.start_health,
            ammo: config.weapon.max_ammo,
            reloading: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Unit vector the player is looking along.
    pub fn view_direction(&self) -> Vec3 {
        view_direction(self.yaw, self.pitch)
    }

    pub fn eye(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: glam::Quat::from_euler(glam::EulerRot::YXZ, self.yaw, self.pitch, 0.0),
        }
    }

    /// Set pitch, clamped to the vertical limits.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Subtract `amount` from health, flooring at zero.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        self.health = (self.health - amount.max(0)).max(0);
        if self.health == 0 {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded {
                health: self.health,
            }
        }
    }
}
