use glam::Vec3;
use ironsight_common::{EntityId, WeaponTuning};
use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::world::World;

/// Identifier of an in-flight projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u64);

/// A shot in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub origin: Vec3,
    /// Unit direction of travel.
    pub direction: Vec3,
    pub position: Vec3,
    pub traveled: f32,
}

impl Projectile {
    fn advance(&mut self, step: f32) {
        self.position += self.direction * step;
        self.traveled += step;
    }
}

/// Why a trigger pull did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRejection {
    Reloading,
}

/// Result of a trigger pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Fired(ProjectileId),
    /// The magazine was empty; a reload started instead.
    ReloadStarted,
    Rejected(FireRejection),
}

/// Result of a reload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Started,
    AlreadyReloading,
    MagazineFull,
}

/// What happened to projectiles during one advance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectileReport {
    /// (projectile, enemy) pairs, one per confirmed hit.
    pub hits: Vec<(ProjectileId, EntityId)>,
    /// Enemies whose hit points reached zero, already removed from the world.
    pub kills: Vec<EntityId>,
    /// Projectiles that ran out of range.
    pub expired: Vec<ProjectileId>,
}

/// Magazine state machine and projectile simulation.
///
/// Ready -> Fired -> Ready, and Ready -> Reloading -> Ready. The reload
/// delay itself is a session timer; this type only flips the state.
#[derive(Debug, Clone, Default)]
pub struct WeaponSystem {
    projectiles: Vec<Projectile>,
    next_id: u64,
}

impl WeaponSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projectiles currently in flight, oldest first.
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Pull the trigger.
    ///
    /// Rejected while reloading; an empty magazine starts a reload instead
    /// of firing. Otherwise spends one round and spawns a projectile at the
    /// player's eye along the view direction.
    pub fn fire(&mut self, player: &mut Player, tuning: &WeaponTuning) -> FireOutcome {
        if player.reloading {
            return FireOutcome::Rejected(FireRejection::Reloading);
        }
        if player.ammo == 0 {
            return match self.reload(player, tuning) {
                ReloadOutcome::Started => FireOutcome::ReloadStarted,
                // Unreachable with a non-empty magazine size, but never fire dry.
                _ => FireOutcome::Rejected(FireRejection::Reloading),
            };
        }

        player.ammo -= 1;
        let id = ProjectileId(self.next_id);
        self.next_id += 1;
        self.projectiles.push(Projectile {
            id,
            origin: player.position,
            direction: player.view_direction(),
            position: player.position,
            traveled: 0.0,
        });
        FireOutcome::Fired(id)
    }

    /// Enter the reloading state. Repeated requests while reloading are ignored.
    pub fn reload(&mut self, player: &mut Player, tuning: &WeaponTuning) -> ReloadOutcome {
        if player.reloading {
            return ReloadOutcome::AlreadyReloading;
        }
        if player.ammo >= tuning.max_ammo {
            return ReloadOutcome::MagazineFull;
        }
        player.reloading = true;
        ReloadOutcome::Started
    }

    /// Refill the magazine. Returns false if no reload was in progress.
    pub fn finish_reload(&mut self, player: &mut Player, tuning: &WeaponTuning) -> bool {
        if !player.reloading {
            return false;
        }
        player.ammo = tuning.max_ammo;
        player.reloading = false;
        true
    }

    /// Move every projectile one step of `dt` seconds and resolve hits.
    ///
    /// A projectile damages at most one enemy (the nearest within the hit
    /// radius) and is destroyed by that hit. Killed enemies are compacted
    /// out of the world before this returns.
    pub fn advance(&mut self, dt: f32, world: &mut World, tuning: &WeaponTuning) -> ProjectileReport {
        let step = tuning.projectile_speed * dt;
        let mut report = ProjectileReport::default();

        self.projectiles.retain_mut(|p| {
            let from = p.position;
            p.advance(step);
            // Sweep the whole step so long ticks cannot tunnel through a target.
            if let Some(target) = world.first_enemy_along(from, p.position, tuning.hit_radius) {
                match world.damage_enemy(target, tuning.damage_per_hit) {
                    Ok(hit) => {
                        report.hits.push((p.id, target));
                        if hit.killed {
                            report.kills.push(target);
                        }
                    }
                    Err(e) => tracing::warn!(%e, "hit on enemy that vanished"),
                }
                return false;
            }
            if p.traveled > tuning.max_range {
                report.expired.push(p.id);
                return false;
            }
            true
        });

        world.compact();
        report
    }

    /// Drop every projectile in flight.
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironsight_common::{EnemyVariant, GameConfig};

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (WeaponSystem, Player, World, WeaponTuning) {
        let mut config = GameConfig::default();
        config.player.spawn_position = Vec3::ZERO;
        (
            WeaponSystem::new(),
            Player::spawn(&config),
            World::new(),
            config.weapon,
        )
    }

    #[test]
    fn fire_spends_one_round() {
        let (mut weapon, mut player, _, tuning) = setup();
        let outcome = weapon.fire(&mut player, &tuning);
        assert!(matches!(outcome, FireOutcome::Fired(_)));
        assert_eq!(player.ammo, 29);
        assert_eq!(weapon.projectiles().len(), 1);
        assert_eq!(weapon.projectiles()[0].direction, player.view_direction());
    }

    #[test]
    fn empty_magazine_reroutes_to_reload() {
        let (mut weapon, mut player, _, tuning) = setup();
        player.ammo = 0;
        assert_eq!(weapon.fire(&mut player, &tuning), FireOutcome::ReloadStarted);
        assert!(player.reloading);
        assert_eq!(player.ammo, 0);
        assert!(weapon.projectiles().is_empty());
    }

    #[test]
    fn fire_rejected_while_reloading() {
        let (mut weapon, mut player, _, tuning) = setup();
        player.ammo = 3;
        assert_eq!(weapon.reload(&mut player, &tuning), ReloadOutcome::Started);
        assert_eq!(
            weapon.fire(&mut player, &tuning),
            FireOutcome::Rejected(FireRejection::Reloading)
        );
        assert_eq!(player.ammo, 3);
    }

    #[test]
    fn reload_is_idempotent_while_reloading() {
        let (mut weapon, mut player, _, tuning) = setup();
        player.ammo = 0;
        weapon.reload(&mut player, &tuning);
        for _ in 0..5 {
            assert_eq!(
                weapon.reload(&mut player, &tuning),
                ReloadOutcome::AlreadyReloading
            );
        }
        assert!(weapon.finish_reload(&mut player, &tuning));
        assert_eq!(player.ammo, tuning.max_ammo);
        assert!(!player.reloading);
        assert!(!weapon.finish_reload(&mut player, &tuning));
    }

    #[test]
    fn full_magazine_rejects_reload() {
        let (mut weapon, mut player, _, tuning) = setup();
        assert_eq!(weapon.reload(&mut player, &tuning), ReloadOutcome::MagazineFull);
        assert!(!player.reloading);
    }

    #[test]
    fn ammo_never_exceeds_bounds() {
        let (mut weapon, mut player, _, tuning) = setup();
        for _ in 0..100 {
            match weapon.fire(&mut player, &tuning) {
                FireOutcome::ReloadStarted => {
                    weapon.finish_reload(&mut player, &tuning);
                }
                FireOutcome::Fired(_) | FireOutcome::Rejected(_) => {}
            }
            assert!(player.ammo <= tuning.max_ammo);
        }
    }

    #[test]
    fn projectile_hits_once_and_does_not_pierce() {
        let (mut weapon, mut player, mut world, tuning) = setup();
        let front = world.spawn_enemy(Vec3::new(0.0, 0.0, -3.0), EnemyVariant::Grunt);
        let behind = world.spawn_enemy(Vec3::new(0.0, 0.0, -3.5), EnemyVariant::Grunt);
        weapon.fire(&mut player, &tuning);

        let mut hits = Vec::new();
        for _ in 0..10 {
            hits.extend(weapon.advance(DT, &mut world, &tuning).hits);
        }
        assert_eq!(hits.len(), 1);
        assert!(weapon.projectiles().is_empty());
        let hp = |id| world.enemy(id).map(|e| e.hp);
        assert_eq!(hp(front).unwrap() + hp(behind).unwrap(), 9);
    }

    #[test]
    fn kill_removes_enemy_exactly_once() {
        let (mut weapon, mut player, mut world, tuning) = setup();
        let id = world.spawn_enemy(Vec3::new(0.0, 0.0, -2.0), EnemyVariant::Grunt);
        world.enemy_mut(id).unwrap().hp = 1;
        weapon.fire(&mut player, &tuning);
        weapon.fire(&mut player, &tuning);

        let mut kills = Vec::new();
        let mut hits = 0;
        for _ in 0..5 {
            let r = weapon.advance(DT, &mut world, &tuning);
            hits += r.hits.len();
            kills.extend(r.kills);
        }
        assert_eq!(kills, vec![id]);
        assert_eq!(hits, 1);
        assert_eq!(world.enemy_count(), 0);
        assert!(world.remove_enemy(id).is_err());
        // The second shot flew on through the empty space.
        assert_eq!(weapon.projectiles().len(), 1);
    }

    #[test]
    fn slow_tick_rate_does_not_tunnel() {
        // At 30 Hz a projectile steps 2 units, longer than the chord it cuts
        // through this enemy's hit sphere.
        let config = GameConfig::default();
        let mut weapon = WeaponSystem::new();
        let mut player = Player::spawn(&config);
        let mut world = World::new();
        let id = world.spawn_enemy(Vec3::new(0.0, 1.0, 2.0), EnemyVariant::Grunt);
        weapon.fire(&mut player, &config.weapon);

        let mut hits = Vec::new();
        for _ in 0..10 {
            hits.extend(weapon.advance(1.0 / 30.0, &mut world, &config.weapon).hits);
        }
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1, id);
        assert_eq!(world.enemy(id).unwrap().hp, 4);
    }

    #[test]
    fn projectile_expires_past_max_range() {
        let (mut weapon, mut player, mut world, tuning) = setup();
        weapon.fire(&mut player, &tuning);
        let steps_to_range = (tuning.max_range / (tuning.projectile_speed * DT)).ceil() as usize;

        let mut expired = Vec::new();
        for _ in 0..steps_to_range + 1 {
            expired.extend(weapon.advance(DT, &mut world, &tuning).expired);
        }
        assert_eq!(expired.len(), 1);
        assert!(weapon.projectiles().is_empty());
    }
}
