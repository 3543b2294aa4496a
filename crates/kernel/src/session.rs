use ironsight_common::{ConfigError, GameConfig, SessionId};
use ironsight_input::InputState;
use serde::Serialize;
use std::time::Duration;

use crate::controller::PlayerController;
use crate::cue::Cue;
use crate::enemy_ai::EnemyAi;
use crate::player::{DamageOutcome, Player};
use crate::timers::{TimerKind, TimerQueue};
use crate::weapon::{FireOutcome, Projectile, ProjectileReport, ReloadOutcome, WeaponSystem};
use crate::world::{Enemy, World, WorldEvent};

/// Counters that survive session resets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub shots_fired: u64,
    pub hits: u64,
    pub kills: u64,
    pub deaths: u64,
    pub damage_taken: u64,
}

/// Everything that happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub fired: Vec<FireOutcome>,
    pub reload: Option<ReloadOutcome>,
    pub projectiles: ProjectileReport,
    pub attacks: usize,
    /// The player died this tick and the session was reset.
    pub session_ended: bool,
}

/// Comparable snapshot of the simulation state.
///
/// Excludes identity, lifetime stats and queued cues, so a reset session
/// compares equal to a freshly constructed one.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub tick: u64,
    pub clock: Duration,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub pending_timers: Vec<TimerKind>,
    pub bob_time: f32,
}

/// One play-through: the explicit context every system runs against.
///
/// Owns the player, the enemy world, in-flight projectiles, deferred timers
/// and the session clock. Multiple sessions are fully independent.
pub struct Session {
    id: SessionId,
    config: GameConfig,
    world: World,
    player: Player,
    controller: PlayerController,
    weapon: WeaponSystem,
    timers: TimerQueue,
    clock: Duration,
    tick: u64,
    cues: Vec<Cue>,
    stats: SessionStats,
}

impl Session {
    /// Start a session with a populated world and a fresh player.
    ///
    /// The config is validated first; a session never runs with tuning it
    /// cannot simulate.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = World::populated(&config.enemy, config.seed);
        let player = Player::spawn(&config);
        let id = SessionId::new();
        tracing::info!(
            session = %id.short(),
            enemies = world.enemy_count(),
            seed = config.seed,
            "session started"
        );
        let mut session = Self {
            id,
            config,
            world,
            player,
            controller: PlayerController::new(),
            weapon: WeaponSystem::new(),
            timers: TimerQueue::new(),
            clock: Duration::ZERO,
            tick: 0,
            cues: Vec::new(),
            stats: SessionStats::default(),
        };
        session.world.drain_events();
        session.push_vitals();
        Ok(session)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn projectiles(&self) -> &[Projectile] {
        self.weapon.projectiles()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Session time elapsed since spawn.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Ticks simulated since spawn.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Cues queued since the last drain.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            tick: self.tick,
            clock: self.clock,
            player: self.player.clone(),
            enemies: self.world.enemies().cloned().collect(),
            projectiles: self.weapon.projectiles().to_vec(),
            pending_timers: self.timers.pending_kinds(),
            bob_time: self.controller.bob_time(),
        }
    }

    /// Run one fixed-duration tick: timers, input, player, weapon, enemy AI.
    pub fn tick(&mut self, input: &mut InputState) -> TickReport {
        let dt_duration = self.config.tick_duration();
        let dt = dt_duration.as_secs_f32();
        self.tick += 1;
        self.clock += dt_duration;
        let _span = tracing::info_span!("session_tick", session = %self.id.short(), tick = self.tick)
            .entered();

        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        self.run_due_timers();

        let commands = input.take_commands();
        self.controller
            .update(&mut self.player, input, dt, &self.config.player);

        if commands.reload {
            report.reload = Some(self.reload());
        }
        for _ in 0..commands.fire {
            report.fired.push(self.fire());
        }
        report.projectiles = self.weapon.advance(dt, &mut self.world, &self.config.weapon);
        for _ in &report.projectiles.hits {
            self.cues.push(Cue::HitSound);
        }
        for id in &report.projectiles.kills {
            tracing::debug!(enemy = %id, "enemy killed");
            self.cues.push(Cue::EnemyKilled(*id));
        }
        self.absorb_world_events();

        let attacks = EnemyAi::update(
            &mut self.world,
            self.player.position,
            dt,
            &self.config.enemy,
        );
        report.attacks = attacks.len();
        for attack in attacks {
            if self.apply_damage(attack.damage) == DamageOutcome::Killed {
                report.session_ended = true;
                break;
            }
        }

        tracing::trace!(
            health = self.player.health,
            ammo = self.player.ammo,
            enemies = self.world.enemy_count(),
            projectiles = self.weapon.projectiles().len(),
            "tick complete"
        );
        report
    }

    /// Pull the trigger now.
    pub fn fire(&mut self) -> FireOutcome {
        let outcome = self.weapon.fire(&mut self.player, &self.config.weapon);
        match outcome {
            FireOutcome::Fired(_) => {
                self.stats.shots_fired += 1;
                self.cues.push(Cue::FireSound);
                self.cues.push(Cue::AmmoChanged(self.player.ammo));
            }
            FireOutcome::ReloadStarted => self.start_reload_timer(),
            FireOutcome::Rejected(reason) => {
                tracing::trace!(?reason, "fire rejected");
            }
        }
        outcome
    }

    /// Request a reload now.
    pub fn reload(&mut self) -> ReloadOutcome {
        let outcome = self.weapon.reload(&mut self.player, &self.config.weapon);
        if outcome == ReloadOutcome::Started {
            self.start_reload_timer();
        }
        outcome
    }

    /// Damage the player. At zero health the session ends and resets.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        let outcome = self.player.take_damage(amount);
        self.stats.damage_taken += amount.max(0) as u64;
        self.cues.push(Cue::HealthChanged(self.player.health));
        self.cues.push(Cue::DamageFlash);
        let fade_at = self.clock + self.config.damage_flash_duration();
        self.timers.schedule(TimerKind::DamageFlashFade, fade_at);

        if outcome == DamageOutcome::Killed {
            self.end();
        }
        outcome
    }

    /// Reinitialize everything for a new play-through with the same config.
    ///
    /// Lifetime stats are kept; queued cues are kept so a pending end-of-session
    /// notice still reaches the presentation layer.
    pub fn reset(&mut self) {
        self.id = SessionId::new();
        self.world = World::populated(&self.config.enemy, self.config.seed);
        self.world.drain_events();
        self.player = Player::spawn(&self.config);
        self.controller = PlayerController::new();
        self.weapon = WeaponSystem::new();
        self.timers = TimerQueue::new();
        self.clock = Duration::ZERO;
        self.tick = 0;
        self.cues.push(Cue::SessionReset);
        self.cues.push(Cue::DamageFlashFaded);
        self.push_vitals();
        tracing::info!(session = %self.id.short(), "session reset");
    }

    fn end(&mut self) {
        self.stats.deaths += 1;
        tracing::info!(
            session = %self.id.short(),
            ticks = self.tick,
            kills = self.stats.kills,
            "player died, session over"
        );
        self.cues.push(Cue::SessionEnded { ticks: self.tick });
        self.reset();
    }

    fn start_reload_timer(&mut self) {
        let due = self.clock + self.config.reload_duration();
        self.timers.schedule(TimerKind::ReloadComplete, due);
        self.cues.push(Cue::ReloadStarted);
        tracing::debug!(due = ?due, "reload started");
    }

    fn run_due_timers(&mut self) {
        for kind in self.timers.pop_due(self.clock) {
            match kind {
                TimerKind::ReloadComplete => {
                    if self
                        .weapon
                        .finish_reload(&mut self.player, &self.config.weapon)
                    {
                        self.cues.push(Cue::AmmoChanged(self.player.ammo));
                        self.cues.push(Cue::ReloadFinished);
                        tracing::debug!(ammo = self.player.ammo, "reload finished");
                    }
                }
                TimerKind::DamageFlashFade => self.cues.push(Cue::DamageFlashFaded),
            }
        }
    }

    fn absorb_world_events(&mut self) {
        for event in self.world.drain_events() {
            match event {
                WorldEvent::EnemyDamaged { .. } => self.stats.hits += 1,
                WorldEvent::EnemyRemoved { .. } => self.stats.kills += 1,
                WorldEvent::EnemySpawned { .. } => {}
            }
        }
    }

    fn push_vitals(&mut self) {
        self.cues.push(Cue::HealthChanged(self.player.health));
        self.cues.push(Cue::AmmoChanged(self.player.ammo));
    }
}
