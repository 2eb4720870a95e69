#![allow(missing_docs)]

//! Turnbridge CLI: inspect and round-trip conversational webhook payloads.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use turnbridge::config::{self, Config};
use turnbridge::logging;
use turnbridge::{AnyRequest, CanonicalRequest, CanonicalView, JsonInput, Platform};

/// Turnbridge: canonical requests for conversational platforms.
#[derive(Parser)]
#[command(name = "turnbridge", version, about)]
struct Cli {
    /// Config file (default: ~/.turnbridge/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write JSON logs to this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Print what the dialogue engine would see for a payload.
    Inspect {
        /// Payload file, or `-` for stdin.
        input: PathBuf,
        /// Platform to hydrate as (default: config, then auto-detect).
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Hydrate a payload and emit it again as wire JSON.
    Roundtrip {
        /// Payload file, or `-` for stdin.
        input: PathBuf,
        /// Platform to hydrate as (default: config, then auto-detect).
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Print the platform a payload appears to come from.
    Detect {
        /// Payload file, or `-` for stdin.
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;

    let _logging_guard = match &cli.log_dir {
        Some(dir) => Some(logging::init_production(dir, &config.logging.level)?),
        None => {
            logging::init_cli(&config.logging.level);
            None
        }
    };

    match cli.command {
        Command::Inspect { input, platform } => handle_inspect(&input, platform, &config),
        Command::Roundtrip { input, platform } => handle_roundtrip(&input, platform, &config),
        Command::Detect { input } => handle_detect(&input),
    }
}

/// Print the canonical view of a payload.
fn handle_inspect(input: &Path, platform: Option<Platform>, config: &Config) -> anyhow::Result<()> {
    let request = hydrate(input, platform, config)?;
    let view = CanonicalView::capture(&request);
    info!(platform = %view.platform, session = ?view.session_id, "inspected payload");
    print_json(&view, config.output.pretty)
}

/// Re-emit a payload after hydration.
fn handle_roundtrip(
    input: &Path,
    platform: Option<Platform>,
    config: &Config,
) -> anyhow::Result<()> {
    let request = hydrate(input, platform, config)?;
    let json = request.to_json().context("failed to encode request")?;
    print_json(&json, config.output.pretty)
}

/// Print the detected platform name.
fn handle_detect(input: &Path) -> anyhow::Result<()> {
    let raw = read_input(input)?;
    let value = JsonInput::Text(&raw).into_value()?;
    let platform = Platform::detect(&value)
        .ok_or_else(|| anyhow::anyhow!("payload does not match any supported platform"))?;
    println!("{platform}");
    Ok(())
}

/// Load the explicit config file, or the default one if it exists.
fn resolve_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => config::load_config(path),
        None => match config::default_config_path() {
            Ok(path) => config::load_config_or_default(&path),
            Err(e) => {
                debug!(error = %e, "no home directory, using default config");
                Ok(Config::default())
            }
        },
    }
}

/// Hydrate a payload as the requested, configured or detected platform.
fn hydrate(
    input: &Path,
    platform: Option<Platform>,
    config: &Config,
) -> anyhow::Result<AnyRequest> {
    let raw = read_input(input)?;
    let request = match platform.or(config.platform.default) {
        Some(platform) => AnyRequest::hydrate(platform, raw.as_str()),
        None => AnyRequest::detect_and_hydrate(raw.as_str()),
    }
    .with_context(|| format!("failed to hydrate {}", input.display()))?;
    debug!(platform = %request.platform(), "payload hydrated");
    Ok(request)
}

/// Read a payload file, or stdin when the path is `-`.
fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

fn print_json(value: &impl Serialize, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
