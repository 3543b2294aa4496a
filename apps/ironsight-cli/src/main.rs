use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use ironsight_common::GameConfig;
use ironsight_game::{Autopilot, GameLoop, Idle, InputSource};
use ironsight_hud::{HudState, LogPresenter, SessionInspector};
use ironsight_kernel::Session;
use ironsight_render::DebugTextRenderer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ironsight-cli", about = "Headless driver for ironsight sessions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the default tuning
    Info,
    /// Run a headless session for a fixed number of frames
    Play {
        /// Frames to run, one tick each
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Override the config seed for enemy placement
        #[arg(short, long)]
        seed: Option<u64>,
        /// Tuning file (.yaml, .yml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Let the built-in autopilot aim and shoot; otherwise the player idles
        #[arg(short, long)]
        autopilot: bool,
        /// Print the debug render every K frames
        #[arg(short, long)]
        render_every: Option<u64>,
        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the default tuning
    Config {
        #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = GameConfig::default();
            println!("ironsight-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", ironsight_input::crate_info());
            println!("kernel: {}", ironsight_kernel::crate_info());
            println!("render: {}", ironsight_render::crate_info());
            println!("hud: {}", ironsight_hud::crate_info());
            println!("game: {}", ironsight_game::crate_info());
            println!(
                "tuning: {} Hz, {} enemies, magazine {}, reload {} ms, health {}",
                config.game_loop.tick_rate_hz,
                config.enemy.population.len(),
                config.weapon.max_ammo,
                config.weapon.reload_ms,
                config.player.start_health,
            );
        }
        Commands::Play {
            frames,
            seed,
            config,
            autopilot,
            render_every,
            json,
        } => {
            let mut config = match config {
                Some(path) => GameConfig::load(&path)
                    .with_context(|| format!("loading tuning from {}", path.display()))?,
                None => GameConfig::default(),
            };
            if let Some(seed) = seed {
                config.seed = seed;
            }
            play(config, frames, autopilot, render_every, json)?;
        }
        Commands::Config { format } => {
            let config = GameConfig::default();
            let text = match format {
                Format::Yaml => config.to_yaml(),
                Format::Json => config.to_json(),
            }
            .context("serializing default tuning")?;
            println!("{text}");
        }
    }

    Ok(())
}

fn play(
    config: GameConfig,
    frames: u64,
    autopilot: bool,
    render_every: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let hud = HudState::new(config.weapon.max_ammo);
    let session = Session::new(config).context("starting session")?;
    let tick = session.config().tick_duration();
    let mut game = GameLoop::new(
        session,
        DebugTextRenderer::new(),
        (hud, LogPresenter),
    );
    let mut source: Box<dyn InputSource> = if autopilot {
        Box::new(Autopilot::new())
    } else {
        Box::new(Idle)
    };

    let started = Instant::now();
    game.run(source.as_mut(), frames, tick, |game, report| {
        if render_every.is_some_and(|k| k > 0 && report.frame % k == 0) {
            let (hud, _) = game.presenter();
            println!("{}", report.output);
            println!("{} | {}", hud.health_text(), hud.ammo_text());
        }
        if report.session_ended() {
            if let Some(notice) = game.presenter().0.last_message() {
                println!("{notice}");
            }
        }
    });
    tracing::info!(
        frames,
        wall_ms = started.elapsed().as_millis() as u64,
        "headless run finished"
    );

    let summary = SessionInspector::summary(game.session());
    if json {
        let text = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        println!("{text}");
    } else {
        println!("{summary}");
    }
    Ok(())
}
