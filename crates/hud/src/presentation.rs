use ironsight_common::EntityId;
use ironsight_kernel::Cue;

/// Everything the session needs from the layer that shows the game.
///
/// The required methods mirror the HUD and audio surface. The provided ones
/// are informational and default to doing nothing.
pub trait Presentation {
    fn set_health(&mut self, value: i32);
    fn set_ammo(&mut self, value: u32);
    /// Show the damage overlay at full opacity.
    fn flash_damage(&mut self);
    /// Hide the damage overlay.
    fn fade_damage_flash(&mut self);
    fn play_fire_sound(&mut self);
    fn play_hit_sound(&mut self);
    /// The player died; `ticks` is how long the session lasted.
    fn notify_session_end(&mut self, ticks: u64);

    fn reload_started(&mut self) {}
    fn reload_finished(&mut self) {}
    fn enemy_killed(&mut self, _enemy: EntityId) {}
    fn session_reset(&mut self) {}
}

/// Forward cues to a presentation layer, in order.
pub fn dispatch<P: Presentation + ?Sized>(cues: &[Cue], presenter: &mut P) {
    for cue in cues {
        match cue {
            Cue::HealthChanged(v) => presenter.set_health(*v),
            Cue::AmmoChanged(v) => presenter.set_ammo(*v),
            Cue::ReloadStarted => presenter.reload_started(),
            Cue::ReloadFinished => presenter.reload_finished(),
            Cue::FireSound => presenter.play_fire_sound(),
            Cue::HitSound => presenter.play_hit_sound(),
            Cue::DamageFlash => presenter.flash_damage(),
            Cue::DamageFlashFaded => presenter.fade_damage_flash(),
            Cue::EnemyKilled(id) => presenter.enemy_killed(*id),
            Cue::SessionEnded { ticks } => presenter.notify_session_end(*ticks),
            Cue::SessionReset => presenter.session_reset(),
        }
    }
}

/// Fan out to two presentation layers.
impl<A: Presentation, B: Presentation> Presentation for (A, B) {
    fn set_health(&mut self, value: i32) {
        self.0.set_health(value);
        self.1.set_health(value);
    }
    fn set_ammo(&mut self, value: u32) {
        self.0.set_ammo(value);
        self.1.set_ammo(value);
    }
    fn flash_damage(&mut self) {
        self.0.flash_damage();
        self.1.flash_damage();
    }
    fn fade_damage_flash(&mut self) {
        self.0.fade_damage_flash();
        self.1.fade_damage_flash();
    }
    fn play_fire_sound(&mut self) {
        self.0.play_fire_sound();
        self.1.play_fire_sound();
    }
    fn play_hit_sound(&mut self) {
        self.0.play_hit_sound();
        self.1.play_hit_sound();
    }
    fn notify_session_end(&mut self, ticks: u64) {
        self.0.notify_session_end(ticks);
        self.1.notify_session_end(ticks);
    }
    fn reload_started(&mut self) {
        self.0.reload_started();
        self.1.reload_started();
    }
    fn reload_finished(&mut self) {
        self.0.reload_finished();
        self.1.reload_finished();
    }
    fn enemy_killed(&mut self, enemy: EntityId) {
        self.0.enemy_killed(enemy);
        self.1.enemy_killed(enemy);
    }
    fn session_reset(&mut self) {
        self.0.session_reset();
        self.1.session_reset();
    }
}

/// Presentation that reports through `tracing`.
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presentation for LogPresenter {
    fn set_health(&mut self, value: i32) {
        tracing::debug!(health = value, "hud health");
    }

    fn set_ammo(&mut self, value: u32) {
        tracing::debug!(ammo = value, "hud ammo");
    }

    fn flash_damage(&mut self) {
        tracing::debug!("damage flash");
    }

    fn fade_damage_flash(&mut self) {
        tracing::trace!("damage flash faded");
    }

    fn play_fire_sound(&mut self) {
        tracing::trace!("sfx: fire");
    }

    fn play_hit_sound(&mut self) {
        tracing::trace!("sfx: hit");
    }

    fn notify_session_end(&mut self, ticks: u64) {
        tracing::warn!(ticks, "you died");
    }

    fn reload_started(&mut self) {
        tracing::debug!("reloading");
    }

    fn enemy_killed(&mut self, enemy: EntityId) {
        tracing::info!(%enemy, "enemy down");
    }
}
