use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for an entity inside one world.
///
/// Ids are allocated monotonically by the world that owns the entity, so
/// ordering follows spawn order and is identical across replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier for one play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for log lines.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Spatial transform: position and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Transform at `position` facing along `yaw` (radians about +Y).
    pub fn from_position_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw),
        }
    }
}

/// Enemy archetypes. They differ only in starting hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyVariant {
    Grunt,
    Stalker,
    Brute,
}

impl EnemyVariant {
    pub fn max_hp(self) -> u32 {
        match self {
            Self::Grunt => 5,
            Self::Stalker => 6,
            Self::Brute => 8,
        }
    }
}

/// Unit view direction for a yaw/pitch pair.
///
/// Yaw 0 and pitch 0 look down -Z; positive yaw turns left, positive pitch
/// looks up.
pub fn view_direction(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        -yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
    .normalize()
}

/// Horizontal (forward, right) unit vectors for a yaw, ignoring pitch.
pub fn horizontal_basis(yaw: f32) -> (Vec3, Vec3) {
    let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
    let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
    (forward, right)
}

/// Yaw that makes something at `from` face `to` on the horizontal plane.
/// Returns `None` when the two points are vertically aligned.
pub fn yaw_towards(from: Vec3, to: Vec3) -> Option<f32> {
    let d = to - from;
    if d.x.abs() <= f32::EPSILON && d.z.abs() <= f32::EPSILON {
        return None;
    }
    Some((-d.x).atan2(-d.z))
}
