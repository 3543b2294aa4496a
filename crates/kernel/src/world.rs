use glam::Vec3;
use ironsight_common::{EnemyTuning, EnemyVariant, EntityId, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An event record produced by every mutation of the enemy population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Enemy was spawned at the given position.
    EnemySpawned {
        id: EntityId,
        variant: EnemyVariant,
        position: Vec3,
    },
    /// Enemy lost hit points and has `remaining` left.
    EnemyDamaged { id: EntityId, remaining: u32 },
    /// Enemy left the world. Emitted exactly once per enemy.
    EnemyRemoved { id: EntityId, position: Vec3 },
}

/// Errors from world operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("enemy {0} not found")]
    EnemyNotFound(EntityId),
}

/// One hostile actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub variant: EnemyVariant,
    pub position: Vec3,
    /// Facing, radians about +Y.
    pub yaw: f32,
    pub hp: u32,
    /// Ticks left before this enemy may attack again.
    pub cooldown: u32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position_yaw(self.position, self.yaw)
    }
}

/// Result of damaging an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyHit {
    pub id: EntityId,
    pub remaining: u32,
    pub killed: bool,
}

/// The enemy population of one session.
///
/// Enemies live in an id-ordered arena. An enemy whose hit points reach zero
/// is marked dead immediately (invisible to every query) and physically
/// dropped by the next [`World::compact`], so callers may damage enemies
/// while walking a snapshot of ids without invalidating anything.
#[derive(Debug, Clone, Default)]
pub struct World {
    enemies: BTreeMap<EntityId, Enemy>,
    next_id: u64,
    /// Append-only event log of all mutations.
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world populated per `tuning`, with spawn jitter derived from `seed`.
    ///
    /// The same tuning and seed always produce the same layout.
    pub fn populated(tuning: &EnemyTuning, seed: u64) -> Self {
        let mut world = Self::new();
        let count = tuning.population.len();
        let mut state = seed;
        for (i, variant) in tuning.population.iter().enumerate() {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let ring = Vec3::new(angle.cos(), 0.0, angle.sin()) * tuning.spawn_ring_radius;
            state = splitmix64(state);
            let jx = unit_interval(state) * 2.0 - 1.0;
            state = splitmix64(state);
            let jz = unit_interval(state) * 2.0 - 1.0;
            let jitter = Vec3::new(jx, 0.0, jz) * tuning.spawn_jitter;
            let position = ring + jitter + Vec3::Y * tuning.spawn_height;
            world.spawn_enemy(position, *variant);
        }
        world
    }

    /// Number of living enemies.
    pub fn enemy_count(&self) -> usize {
        self.enemies.values().filter(|e| e.is_alive()).count()
    }

    /// Living enemies in id order.
    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values().filter(|e| e.is_alive())
    }

    /// Mutable access to living enemies in id order.
    pub fn enemies_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.values_mut().filter(|e| e.is_alive())
    }

    /// Look up a living enemy.
    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.get(&id).filter(|e| e.is_alive())
    }

    /// Mutable lookup of a living enemy.
    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.get_mut(&id).filter(|e| e.is_alive())
    }

    /// Spawn an enemy with the variant's full hit points. Returns its id.
    pub fn spawn_enemy(&mut self, position: Vec3, variant: EnemyVariant) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.enemies.insert(
            id,
            Enemy {
                id,
                variant,
                position,
                yaw: 0.0,
                hp: variant.max_hp(),
                cooldown: 0,
            },
        );
        self.event_log.push(WorldEvent::EnemySpawned {
            id,
            variant,
            position,
        });
        id
    }

    /// Remove an enemy outright, dead or alive.
    pub fn remove_enemy(&mut self, id: EntityId) -> Result<Enemy, WorldError> {
        let enemy = self
            .enemies
            .remove(&id)
            .ok_or(WorldError::EnemyNotFound(id))?;
        self.event_log.push(WorldEvent::EnemyRemoved {
            id,
            position: enemy.position,
        });
        Ok(enemy)
    }

    /// Subtract hit points from a living enemy, saturating at zero.
    ///
    /// At zero the enemy is dead: queries stop returning it and the next
    /// [`World::compact`] removes it.
    pub fn damage_enemy(&mut self, id: EntityId, amount: u32) -> Result<EnemyHit, WorldError> {
        let enemy = self
            .enemies
            .get_mut(&id)
            .filter(|e| e.is_alive())
            .ok_or(WorldError::EnemyNotFound(id))?;
        enemy.hp = enemy.hp.saturating_sub(amount);
        let remaining = enemy.hp;
        self.event_log
            .push(WorldEvent::EnemyDamaged { id, remaining });
        Ok(EnemyHit {
            id,
            remaining,
            killed: remaining == 0,
        })
    }

    /// Drop every dead enemy. Returns the ids removed, in id order.
    pub fn compact(&mut self) -> Vec<EntityId> {
        let dead: Vec<EntityId> = self
            .enemies
            .values()
            .filter(|e| !e.is_alive())
            .map(|e| e.id)
            .collect();
        for id in &dead {
            if let Some(enemy) = self.enemies.remove(id) {
                self.event_log.push(WorldEvent::EnemyRemoved {
                    id: *id,
                    position: enemy.position,
                });
            }
        }
        dead
    }

    /// Euclidean distance between two points.
    pub fn distance(a: Vec3, b: Vec3) -> f32 {
        a.distance(b)
    }

    /// Living enemies strictly closer than `radius` to `point`.
    pub fn enemies_within(&self, point: Vec3, radius: f32) -> impl Iterator<Item = &Enemy> {
        self.enemies()
            .filter(move |e| Self::distance(e.position, point) < radius)
    }

    /// The first living enemy that the segment from `start` to `end` passes
    /// strictly within `radius` of.
    ///
    /// Candidates are ordered by how far along the segment it enters their
    /// hit sphere, then by closest approach, then by id. A zero-length
    /// segment degenerates to the nearest enemy within `radius` of `start`.
    pub fn first_enemy_along(&self, start: Vec3, end: Vec3, radius: f32) -> Option<EntityId> {
        let segment = end - start;
        let len = segment.length();
        let dir = if len > 0.0 { segment / len } else { Vec3::ZERO };

        let mut best: Option<(f32, f32, EntityId)> = None;
        for e in self.enemies() {
            let along = (e.position - start).dot(dir).clamp(0.0, len);
            let miss = Self::distance(start + dir * along, e.position);
            if miss >= radius {
                continue;
            }
            let entry = (along - (radius * radius - miss * miss).sqrt()).max(0.0);
            if best.is_none_or(|(be, bm, _)| entry < be || (entry == be && miss < bm)) {
                best = Some((entry, miss, e.id));
            }
        }
        best.map(|(_, _, id)| id)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }
}

/// Splitmix64 step. Drives the spawn jitter so layouts are reproducible
/// across platforms for a given seed.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Map the top 24 bits of a hash to [0, 1).
fn unit_interval(h: u64) -> f32 {
    (h >> 40) as f32 / (1u64 << 24) as f32
}
