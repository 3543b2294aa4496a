use glam::Vec3;
use ironsight_common::{PlayerTuning, REFERENCE_FRAME_RATE, horizontal_basis};
use ironsight_input::{InputState, MoveKey};

use crate::player::Player;

/// First-person controller: mouse-look, WASD movement and head bob.
///
/// Movement is horizontal; the eye height is owned by the bob, which
/// oscillates around the base height while walking and eases back to it
/// when idle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerController {
    bob_time: f32,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current head bob phase in radians. Zero while idle.
    pub fn bob_time(&self) -> f32 {
        self.bob_time
    }

    /// Advance the player by `dt` seconds of input.
    ///
    /// The pending mouse delta is always consumed; it only rotates the view
    /// while pointer capture is engaged.
    pub fn update(
        &mut self,
        player: &mut Player,
        input: &mut InputState,
        dt: f32,
        tuning: &PlayerTuning,
    ) {
        let look = input.consume_mouse_delta();
        if input.pointer_captured() {
            player.yaw -= look.x * tuning.mouse_sensitivity;
            player.set_pitch(player.pitch - look.y * tuning.mouse_sensitivity);
        }

        let (forward, right) = horizontal_basis(player.yaw);
        let mut step = Vec3::ZERO;
        for key in MoveKey::ALL {
            if !input.is_held(key) {
                continue;
            }
            // Each held key contributes a full step; diagonals are not normalized.
            step += match key {
                MoveKey::Forward => forward,
                MoveKey::Back => -forward,
                MoveKey::Left => -right,
                MoveKey::Right => right,
            };
        }
        player.position += step * tuning.move_speed * dt;

        if input.is_moving() {
            self.bob_time += tuning.bob_rate * dt;
            player.position.y = tuning.base_height + self.bob_time.sin() * tuning.bob_amplitude;
        } else {
            self.bob_time = 0.0;
            let keep = (1.0 - tuning.height_smoothing).powf(dt * REFERENCE_FRAME_RATE);
            player.position.y += (tuning.base_height - player.position.y) * (1.0 - keep);
        }
    }
}
