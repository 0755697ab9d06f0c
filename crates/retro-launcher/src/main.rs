//! RetroDream launcher entry point (headless development build).
//!
//! Loads the settings, builds the shell and drives it at a fixed tick.  There
//! is no renderer or disc loader on the development target, so the actions
//! the shell requests are logged instead of executed.  Input comes from a
//! script file (see [`ScriptedInput`]) or, without one, from an idle source.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ LocalFileSystem::detect()   -- platform default locations
//!  └─ LauncherConfig::new()       -- load or create the config file
//!  └─ LauncherShell::new()
//!  └─ frame loop                  -- one LauncherShell::frame() per tick
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use retro_launcher::application::launcher_config::LauncherConfig;
use retro_launcher::application::shell::{LauncherShell, ShellAction};
use retro_launcher::infrastructure::fs::{FileSystem, LocalFileSystem};
use retro_launcher::infrastructure::input::{InputSource, ScriptedInput};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "retro-launcher",
    about = "RetroDream disc image launcher (headless development build)",
    version
)]
struct Cli {
    /// Config file to load and save.
    #[arg(long, env = "RETRODREAM_CONFIG")]
    config: Option<PathBuf>,

    /// Default data directory, used when the stored one is missing.
    #[arg(long, env = "RETRODREAM_DATA_PATH")]
    data_path: Option<PathBuf>,

    /// Default browsing directory, used when the stored one is missing.
    #[arg(long, env = "RETRODREAM_HOME_PATH")]
    home_path: Option<PathBuf>,

    /// Input script to replay (`KEYS FRAMES` per line).
    #[arg(long)]
    script: Option<PathBuf>,

    /// Stop after this many frames (0 runs until QUIT or the script ends).
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Length of one frame in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u32,
}

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("RetroDream launcher starting");

    // ── Filesystem ─────────────────────────────────────────────────────────────
    let mut local = LocalFileSystem::detect()
        .context("cannot determine platform directories (is HOME set?)")?;
    if let Some(path) = cli.config {
        local = local.with_config_path(path);
    }
    if let Some(path) = cli.data_path {
        local = local.with_default_data_path(path);
    }
    if let Some(path) = cli.home_path {
        local = local.with_default_home_path(path);
    }
    let fs: Arc<dyn FileSystem> = Arc::new(local);

    // ── Settings ───────────────────────────────────────────────────────────────
    let config = LauncherConfig::new(Arc::clone(&fs)).context("invalid settings schema")?;
    info!("config file: {}", config.store().path().display());
    info!("data path: {}", fs.data_path().display());

    // ── Input ──────────────────────────────────────────────────────────────────
    let input: Box<dyn InputSource> = match &cli.script {
        Some(path) => Box::new(
            ScriptedInput::from_file(path, cli.frame_ms)
                .with_context(|| format!("cannot load input script {}", path.display()))?,
        ),
        None => Box::new(ScriptedInput::idle()),
    };

    let mut shell = LauncherShell::new(config, fs, input);
    let tick = Duration::from_millis(u64::from(cli.frame_ms));

    // ── Frame loop ─────────────────────────────────────────────────────────────
    let mut frame = 0u64;
    while cli.frames == 0 || frame < cli.frames {
        match shell.frame() {
            Some(ShellAction::Screenshot(dir)) => info!("screenshot -> {}", dir.display()),
            Some(ShellAction::Boot { image, options }) => {
                info!("boot {}", image.display());
                for option in options.options() {
                    info!("  {} = {:?}", option.key(), option.value());
                }
                break;
            }
            Some(ShellAction::Quit) | None => {}
        }
        if shell.should_quit() || shell.input_exhausted() {
            break;
        }
        frame += 1;
        std::thread::sleep(tick);
    }

    info!("RetroDream launcher stopped after {frame} frames");
    Ok(())
}
