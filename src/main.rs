//! driftboard: headless replay of a recorded input script through the camera engine.
//!
//! Reads a JSON-lines script, runs it through `EngineCore` at a fixed frame
//! rate and writes the camera transform as JSON lines on stdout. Logs go to
//! stderr, filtered by `RUST_LOG`.

mod script;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use canvas::config::CameraConfig;
use canvas::engine::EngineCore;
use canvas::error::ConfigError;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::script::{Replay, parse_script};

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to read {what}: {source}")]
    Read {
        what: String,
        #[source]
        source: io::Error,
    },
    #[error("script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("script line {line}: timestamp must be finite and >= 0 (got {t_ms})")]
    Timestamp { line: usize, t_ms: f64 },
    #[error("fps must be finite and > 0 (got {0})")]
    Fps(f64),
    #[error("invalid camera config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "driftboard", about = "Inertial canvas camera, replayed headless")]
struct Cli {
    /// Camera config overrides (JSON). Unset fields keep their defaults.
    #[arg(long, env = "DRIFTBOARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON-lines input script and print the camera transform.
    Replay {
        script: PathBuf,
        #[arg(long, env = "DRIFTBOARD_FPS", default_value_t = 60.0)]
        fps: f64,
        /// Viewport size in CSS pixels, `WIDTHxHEIGHT`.
        #[arg(long, env = "DRIFTBOARD_VIEWPORT", default_value = "1280x720", value_parser = parse_viewport)]
        viewport: Viewport,
        /// Print only the final frame instead of every frame.
        #[arg(long)]
        final_only: bool,
        /// Stop at the last event instead of waiting for the camera to come to rest.
        #[arg(long)]
        no_settle: bool,
    },
    /// Print the effective camera config as JSON.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    width: f64,
    height: f64,
}

fn parse_viewport(raw: &str) -> Result<Viewport, String> {
    let (width, height) = raw.split_once(['x', 'X']).ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{raw}`"))?;
    let parse = |part: &str| -> Result<f64, String> {
        match part.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
            _ => Err(format!("invalid viewport dimension `{part}`")),
        }
    };
    Ok(Viewport { width: parse(width)?, height: parse(height)? })
}

fn load_config(path: Option<&Path>) -> Result<CameraConfig, DriverError> {
    let Some(path) = path else {
        return Ok(CameraConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|source| DriverError::Read { what: path.display().to_string(), source })?;
    let config = CameraConfig::from_json(&raw)?;
    tracing::info!(path = %path.display(), "camera config loaded");
    Ok(config)
}

fn main() -> Result<(), DriverError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Config => {
            serde_json::to_writer_pretty(&mut out, &config)?;
            writeln!(out)?;
        }
        Command::Replay { script, fps, viewport, final_only, no_settle } => {
            let replay = Replay::new(fps, !no_settle)?;
            let file = File::open(&script)
                .map_err(|source| DriverError::Read { what: script.display().to_string(), source })?;
            let entries = parse_script(BufReader::new(file))?;

            let mut core = EngineCore::new(&config)?;
            core.set_viewport(viewport.width, viewport.height);

            let last = replay.run(&mut core, &entries, |record| {
                if !final_only {
                    serde_json::to_writer(&mut out, record)?;
                    writeln!(out)?;
                }
                Ok(())
            })?;
            if final_only {
                serde_json::to_writer(&mut out, &last)?;
                writeln!(out)?;
            }
            tracing::info!(frames = last.frame + 1, idle = last.idle, "replay finished");
        }
    }
    Ok(())
}
