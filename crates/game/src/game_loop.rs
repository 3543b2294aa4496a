use std::time::Duration;

use ironsight_hud::{Presentation, dispatch};
use ironsight_input::{Action, InputState, action_for_key};
use ironsight_kernel::{Session, TickReport};
use ironsight_render::{RenderScene, Renderer, ViewState};
use tracing::{info_span, warn};

use crate::frame_timer::FrameTimer;
use crate::script::InputSource;

/// Outcome of one presented frame.
#[derive(Debug, Clone)]
pub struct FrameReport<O> {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Simulation ticks run during this frame.
    pub ticks: Vec<TickReport>,
    /// Simulation time that was discarded because the frame fell too far behind.
    pub dropped: Duration,
    /// What the renderer produced.
    pub output: O,
}

impl<O> FrameReport<O> {
    /// True if the player died during any tick of this frame.
    pub fn session_ended(&self) -> bool {
        self.ticks.iter().any(|t| t.session_ended)
    }
}

/// Drives a session at a fixed tick rate from variable-length frames.
///
/// Each frame accumulates real time, runs as many whole ticks as fit (capped
/// by `max_ticks_per_frame`), forwards queued cues to the presenter and then
/// renders exactly once.
pub struct GameLoop<R: Renderer, P: Presentation> {
    session: Session,
    input: InputState,
    renderer: R,
    presenter: P,
    accumulator: Duration,
    frame_timer: FrameTimer,
    frames: u64,
}

impl<R: Renderer, P: Presentation> GameLoop<R, P> {
    pub fn new(session: Session, renderer: R, presenter: P) -> Self {
        Self {
            session,
            input: InputState::new(),
            renderer,
            presenter,
            accumulator: Duration::ZERO,
            frame_timer: FrameTimer::default(),
            frames: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn frame_timer(&self) -> &FrameTimer {
        &self.frame_timer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Feed one input action. Takes effect on the next tick.
    pub fn handle(&mut self, action: Action) {
        self.input.apply(action);
    }

    /// Feed a raw key or mouse button event. Unbound keys are ignored.
    pub fn handle_key(&mut self, key: &str, pressed: bool) {
        if let Some(action) = action_for_key(key, pressed) {
            self.handle(action);
        }
    }

    /// Advance by `elapsed` wall time and present one frame.
    pub fn frame(&mut self, elapsed: Duration) -> FrameReport<R::Output> {
        self.frames += 1;
        let _span = info_span!("frame", n = self.frames).entered();

        let tick = self.session.config().tick_duration();
        let max_ticks = self.session.config().game_loop.max_ticks_per_frame;
        self.accumulator += elapsed;

        let mut ticks = Vec::new();
        while self.accumulator >= tick && (ticks.len() as u32) < max_ticks {
            self.accumulator -= tick;
            ticks.push(self.session.tick(&mut self.input));
        }

        let mut dropped = Duration::ZERO;
        if self.accumulator >= tick {
            dropped = self.accumulator;
            self.accumulator = Duration::ZERO;
            warn!(
                dropped_ms = dropped.as_millis() as u64,
                max_ticks, "frame fell behind, dropping simulation time"
            );
        }

        let cues = self.session.drain_cues();
        dispatch(&cues, &mut self.presenter);

        let view = ViewState::from_player(self.session.player());
        let output = self
            .renderer
            .render(&RenderScene::from_session(&self.session), &view);

        self.frame_timer.record(elapsed);
        FrameReport {
            frame: self.frames,
            ticks,
            dropped,
            output,
        }
    }

    /// Present one frame covering exactly one tick.
    pub fn step(&mut self) -> FrameReport<R::Output> {
        let tick = self.session.config().tick_duration();
        self.frame(tick)
    }

    /// Run `frames` frames of `frame_time` each, polling `source` before every
    /// frame. `on_frame` sees each report as it is produced.
    pub fn run<S, F>(&mut self, source: &mut S, frames: u64, frame_time: Duration, mut on_frame: F)
    where
        S: InputSource + ?Sized,
        F: FnMut(&Self, &FrameReport<R::Output>),
    {
        for _ in 0..frames {
            for action in source.poll(self.frames, &self.session) {
                self.handle(action);
            }
            let report = self.frame(frame_time);
            on_frame(self, &report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use ironsight_common::{EnemyVariant, GameConfig};
    use ironsight_hud::HudState;
    use ironsight_render::NullRenderer;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.enemy.population.clear();
        config
    }

    fn game(config: GameConfig) -> GameLoop<NullRenderer, HudState> {
        let hud = HudState::new(config.weapon.max_ammo);
        GameLoop::new(Session::new(config).unwrap(), NullRenderer::new(), hud)
    }

    #[test]
    fn first_frame_binds_hud() {
        let mut g = game(quiet_config());
        let report = g.frame(Duration::ZERO);
        assert!(report.ticks.is_empty());
        assert_eq!(g.presenter().health_text(), "Health: 100");
        assert_eq!(g.presenter().ammo_text(), "Ammo: 30/30");
        assert_eq!(g.renderer().frames(), 1);
    }

    #[test]
    fn accumulator_carries_partial_ticks() {
        let mut g = game(quiet_config());
        let tick = g.session().config().tick_duration();
        let half = tick / 2;

        assert_eq!(g.frame(half).ticks.len(), 0);
        assert_eq!(g.frame(half).ticks.len(), 1);
        assert_eq!(g.frame(tick * 3).ticks.len(), 3);
        assert_eq!(g.session().tick_count(), 4);
    }

    #[test]
    fn long_frames_are_capped() {
        let mut g = game(quiet_config());
        let report = g.frame(Duration::from_secs(1));
        assert_eq!(report.ticks.len(), 5);
        assert!(report.dropped > Duration::ZERO);
        // Nothing left over to replay on the next frame.
        assert_eq!(g.frame(Duration::ZERO).ticks.len(), 0);
    }

    #[test]
    fn renders_once_per_frame() {
        let mut g = game(quiet_config());
        g.frame(Duration::from_millis(50));
        g.frame(Duration::from_millis(50));
        assert_eq!(g.renderer().frames(), 2);
        assert_eq!(g.frames(), 2);
        assert_eq!(g.frame_timer().count(), 2);
    }

    #[test]
    fn fire_key_reaches_the_hud() {
        let mut g = game(quiet_config());
        g.handle_key("Mouse0", true);
        g.step();
        assert_eq!(g.presenter().fire_sounds, 1);
        assert_eq!(g.presenter().ammo_text(), "Ammo: 29/30");
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut g = game(quiet_config());
        g.handle_key("F12", true);
        g.step();
        assert!(!g.input().is_moving());
        assert_eq!(g.presenter().fire_sounds, 0);
    }

    #[test]
    fn kill_shows_up_in_presenter() {
        let mut config = quiet_config();
        config.player.spawn_position = Vec3::ZERO;
        config.player.base_height = 0.0;
        let mut g = game(config);
        g.session_mut()
            .world_mut()
            .spawn_enemy(Vec3::new(0.0, 0.0, -1.0), EnemyVariant::Grunt);
        for _ in 0..5 {
            g.handle(Action::Fire);
            g.step();
        }
        assert_eq!(g.presenter().kills, 1);
        assert_eq!(g.presenter().hit_sounds, 5);
        assert_eq!(g.session().world().enemy_count(), 0);
    }
}
