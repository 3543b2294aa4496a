use glam::Vec3;
use ironsight_common::{EnemyTuning, EntityId, yaw_towards};

use crate::world::World;

/// A melee strike landed on the player this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attack {
    pub enemy: EntityId,
    pub damage: i32,
}

/// Pursuit and melee behaviour shared by every enemy.
///
/// Damage is gated purely by distance and the per-enemy cooldown; there is
/// no line-of-sight test.
pub struct EnemyAi;

impl EnemyAi {
    /// Advance every living enemy by one tick of `dt` seconds toward `target`.
    ///
    /// Returns the attacks that landed, in enemy id order. The caller applies
    /// the damage, so it can stop early if the player dies.
    pub fn update(world: &mut World, target: Vec3, dt: f32, tuning: &EnemyTuning) -> Vec<Attack> {
        let mut attacks = Vec::new();
        for enemy in world.enemies_mut() {
            let distance = World::distance(enemy.position, target);

            if distance > tuning.close_range {
                let toward = (target - enemy.position).with_y(0.0).normalize_or_zero();
                let step = (tuning.move_speed * dt).min(distance - tuning.close_range);
                enemy.position += toward * step;
            }
            if let Some(yaw) = yaw_towards(enemy.position, target) {
                enemy.yaw = yaw;
            }

            if enemy.cooldown > 0 {
                enemy.cooldown -= 1;
                continue;
            }
            if distance < tuning.attack_range {
                enemy.cooldown = tuning.attack_cooldown_ticks;
                attacks.push(Attack {
                    enemy: enemy.id,
                    damage: tuning.attack_damage,
                });
            }
        }
        if !attacks.is_empty() {
            tracing::debug!(count = attacks.len(), "enemy attacks landed");
        }
        attacks
    }
}
