use ironsight_common::EntityId;

use crate::presentation::Presentation;

/// Text-mode HUD model: what a UI overlay would bind to.
///
/// Sounds are counted rather than played.
#[derive(Debug, Clone)]
pub struct HudState {
    max_ammo: u32,
    health: i32,
    ammo: u32,
    reloading: bool,
    overlay_opacity: f32,
    pub fire_sounds: u64,
    pub hit_sounds: u64,
    pub kills: u64,
    pub sessions_ended: u64,
    last_message: Option<String>,
}

impl HudState {
    pub fn new(max_ammo: u32) -> Self {
        Self {
            max_ammo,
            health: 0,
            ammo: 0,
            reloading: false,
            overlay_opacity: 0.0,
            fire_sounds: 0,
            hit_sounds: 0,
            kills: 0,
            sessions_ended: 0,
            last_message: None,
        }
    }

    pub fn health_text(&self) -> String {
        format!("Health: {}", self.health)
    }

    pub fn ammo_text(&self) -> String {
        if self.reloading {
            format!("Ammo: {}/{} (reloading)", self.ammo, self.max_ammo)
        } else {
            format!("Ammo: {}/{}", self.ammo, self.max_ammo)
        }
    }

    /// Damage overlay opacity: 1.0 while flashing, 0.0 otherwise.
    pub fn overlay_opacity(&self) -> f32 {
        self.overlay_opacity
    }

    /// The most recent blocking notice shown to the player, if any.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }
}

impl Presentation for HudState {
    fn set_health(&mut self, value: i32) {
        self.health = value;
    }

    fn set_ammo(&mut self, value: u32) {
        self.ammo = value;
    }

    fn flash_damage(&mut self) {
        self.overlay_opacity = 1.0;
    }

    fn fade_damage_flash(&mut self) {
        self.overlay_opacity = 0.0;
    }

    fn play_fire_sound(&mut self) {
        self.fire_sounds += 1;
    }

    fn play_hit_sound(&mut self) {
        self.hit_sounds += 1;
    }

    fn notify_session_end(&mut self, ticks: u64) {
        self.sessions_ended += 1;
        self.last_message = Some(format!("You died! Survived {ticks} ticks."));
    }

    fn reload_started(&mut self) {
        self.reloading = true;
    }

    fn reload_finished(&mut self) {
        self.reloading = false;
    }

    fn enemy_killed(&mut self, _enemy: EntityId) {
        self.kills += 1;
    }

    fn session_reset(&mut self) {
        self.reloading = false;
    }
}
