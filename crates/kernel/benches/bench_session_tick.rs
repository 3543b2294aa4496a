use std::hint::black_box;
use std::time::Instant;

use ironsight_common::{ConfigError, EnemyVariant, GameConfig};
use ironsight_input::{Action, InputState, MoveKey};
use ironsight_kernel::Session;

fn crowded_config(enemies: usize) -> GameConfig {
    let mut config = GameConfig::default();
    config.enemy.population = (0..enemies)
        .map(|i| match i % 3 {
            0 => EnemyVariant::Grunt,
            1 => EnemyVariant::Stalker,
            _ => EnemyVariant::Brute,
        })
        .collect();
    // Keep the player alive for the whole run.
    config.player.start_health = i32::MAX;
    config
}

fn bench_idle_ticks(enemies: usize, ticks: usize) -> Result<(), ConfigError> {
    let mut session = Session::new(crowded_config(enemies))?;
    let mut input = InputState::new();

    let start = Instant::now();
    for _ in 0..ticks {
        black_box(session.tick(&mut input));
        session.drain_cues();
    }
    let elapsed = start.elapsed();
    let per_tick = elapsed / ticks as u32;
    println!("  idle ({enemies} enemies, {ticks} ticks): {per_tick:?}/tick, total {elapsed:?}");
    Ok(())
}

fn bench_firing_ticks(enemies: usize, ticks: usize) -> Result<(), ConfigError> {
    let mut session = Session::new(crowded_config(enemies))?;
    let mut input = InputState::new();
    input.apply(Action::CapturePointer);
    input.set_key(MoveKey::Forward, true);

    let start = Instant::now();
    for i in 0..ticks {
        if i % 4 == 0 {
            input.apply(Action::Fire);
        }
        input.apply(Action::Look(glam::Vec2::new(3.0, 0.0)));
        black_box(session.tick(&mut input));
        session.drain_cues();
    }
    let elapsed = start.elapsed();
    let per_tick = elapsed / ticks as u32;
    println!(
        "  firing ({enemies} enemies, {ticks} ticks): {per_tick:?}/tick, in flight {}",
        session.projectiles().len()
    );
    Ok(())
}

fn main() -> Result<(), ConfigError> {
    println!("session tick benchmarks");
    for enemies in [6, 60, 600] {
        bench_idle_ticks(enemies, 2_000)?;
        bench_firing_ticks(enemies, 2_000)?;
    }
    Ok(())
}
