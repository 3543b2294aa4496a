use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for ironsight")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests and docs in sequence
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates, warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Run the session tick timing bench
    Bench,
    /// Play a short autopilot session through the CLI
    Smoke {
        /// Frames to run
        #[arg(short, long, default_value = "600")]
        frames: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            fmt()?;
            clippy()?;
            test()?;
            doc()?;
        }
        Commands::Fmt => fmt()?,
        Commands::Clippy => clippy()?,
        Commands::Test => test()?,
        Commands::Doc => doc()?,
        Commands::Build => cargo("build", &["build", "--workspace"])?,
        Commands::Bench => cargo(
            "bench",
            &["bench", "-p", "ironsight-kernel", "--bench", "bench_session_tick"],
        )?,
        Commands::Smoke { frames } => {
            let frames = frames.to_string();
            cargo(
                "smoke play",
                &[
                    "run",
                    "-p",
                    "ironsight-cli",
                    "--",
                    "play",
                    "--autopilot",
                    "--frames",
                    &frames,
                    "--json",
                ],
            )?;
        }
    }

    Ok(())
}

fn fmt() -> Result<()> {
    cargo("fmt --check", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test() -> Result<()> {
    cargo("test", &["test", "--workspace"])
}

fn doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

/// Run one cargo invocation, failing on a non-zero exit.
fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {label}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("cargo {label} failed ({status})");
    }
    Ok(())
}
