use std::f32::consts::{PI, TAU};

use glam::Vec2;
use ironsight_common::yaw_towards;
use ironsight_input::{Action, MoveKey};
use ironsight_kernel::{Session, World};

use crate::script::InputSource;

/// Scripted player for headless runs.
///
/// Captures the pointer, turns toward the nearest enemy with bounded mouse
/// deltas, fires when the sights are on target and strafes side to side.
/// It only issues actions a human could, so everything still goes through
/// `InputState` and the controller.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Largest mouse delta per frame, in pixels.
    pub max_turn_px: f32,
    /// Aim error below which the autopilot pulls the trigger, in radians.
    pub aim_tolerance: f32,
    /// Fire at most once every this many frames.
    pub fire_every: u64,
    /// Frames between strafe direction changes. Zero disables strafing.
    pub strafe_period: u64,
    captured: bool,
    strafing: Option<MoveKey>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            max_turn_px: 400.0,
            aim_tolerance: 0.02,
            fire_every: 6,
            strafe_period: 90,
            captured: false,
            strafing: None,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn strafe(&mut self, frame: u64, actions: &mut Vec<Action>) {
        if self.strafe_period == 0 || frame % self.strafe_period != 0 {
            return;
        }
        let next = match self.strafing {
            Some(MoveKey::Left) => MoveKey::Right,
            _ => MoveKey::Left,
        };
        if let Some(prev) = self.strafing {
            actions.push(Action::Move {
                key: prev,
                pressed: false,
            });
        }
        actions.push(Action::Move {
            key: next,
            pressed: true,
        });
        self.strafing = Some(next);
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, frame: u64, session: &Session) -> Vec<Action> {
        let mut actions = Vec::new();
        if !self.captured {
            actions.push(Action::CapturePointer);
            self.captured = true;
        }
        self.strafe(frame, &mut actions);

        let player = session.player();
        if player.ammo == 0 && !player.reloading {
            actions.push(Action::Reload);
        }

        let eye = player.position;
        let target = session.world().enemies().min_by(|a, b| {
            World::distance(a.position, eye).total_cmp(&World::distance(b.position, eye))
        });
        let Some(target) = target else {
            return actions;
        };
        let Some(yaw) = yaw_towards(eye, target.position) else {
            return actions;
        };
        let to_target = target.position - eye;
        let pitch = (to_target.y / to_target.length()).asin();

        let yaw_error = wrap_angle(yaw - player.yaw);
        let pitch_error = pitch - player.pitch;
        let sensitivity = session.config().player.mouse_sensitivity;
        let delta = Vec2::new(-yaw_error, -pitch_error) / sensitivity;
        let delta = delta.clamp(Vec2::splat(-self.max_turn_px), Vec2::splat(self.max_turn_px));
        if delta != Vec2::ZERO {
            actions.push(Action::Look(delta));
        }

        let on_target = yaw_error.abs() < self.aim_tolerance && pitch_error.abs() < self.aim_tolerance;
        if on_target && !player.reloading && frame % self.fire_every.max(1) == 0 {
            actions.push(Action::Fire);
        }
        actions
    }
}

/// Map an angle into [-π, π).
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use ironsight_common::{EnemyVariant, GameConfig};

    fn lone_target(at: Vec3) -> Session {
        let mut config = GameConfig::default();
        config.enemy.population.clear();
        let mut session = Session::new(config).unwrap();
        session.world_mut().spawn_enemy(at, EnemyVariant::Grunt);
        session
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn captures_pointer_once() {
        let session = lone_target(Vec3::new(0.0, 1.7, -10.0));
        let mut pilot = Autopilot::new();
        assert!(pilot.poll(0, &session).contains(&Action::CapturePointer));
        assert!(!pilot.poll(1, &session).contains(&Action::CapturePointer));
    }

    #[test]
    fn fires_when_target_is_straight_ahead() {
        // Player spawns at (0, 1.7, 5) looking down -Z.
        let session = lone_target(Vec3::new(0.0, 1.7, -10.0));
        let mut pilot = Autopilot {
            strafe_period: 0,
            ..Autopilot::new()
        };
        let actions = pilot.poll(0, &session);
        assert!(actions.contains(&Action::Fire));
        assert!(!actions.iter().any(|a| matches!(a, Action::Look(_))));
    }

    #[test]
    fn turns_toward_target_off_axis() {
        let session = lone_target(Vec3::new(20.0, 1.7, 5.0));
        let mut pilot = Autopilot {
            strafe_period: 0,
            ..Autopilot::new()
        };
        let actions = pilot.poll(0, &session);
        let look = actions.iter().find_map(|a| match a {
            Action::Look(d) => Some(*d),
            _ => None,
        });
        // Target is to the right: yaw must decrease, so the delta is positive.
        assert!(look.is_some_and(|d| d.x > 0.0));
        assert!(!actions.contains(&Action::Fire));
    }

    #[test]
    fn reloads_when_empty() {
        let mut session = lone_target(Vec3::new(0.0, 1.7, -10.0));
        session.player_mut().ammo = 0;
        let actions = Autopilot::new().poll(1, &session);
        assert!(actions.contains(&Action::Reload));
    }

    #[test]
    fn alternates_strafe_direction() {
        let session = Session::new(GameConfig::default()).unwrap();
        let mut pilot = Autopilot {
            strafe_period: 2,
            ..Autopilot::new()
        };
        let first = pilot.poll(0, &session);
        assert!(first.contains(&Action::Move {
            key: MoveKey::Left,
            pressed: true
        }));
        let second = pilot.poll(2, &session);
        assert!(second.contains(&Action::Move {
            key: MoveKey::Left,
            pressed: false
        }));
        assert!(second.contains(&Action::Move {
            key: MoveKey::Right,
            pressed: true
        }));
    }
}
