//! sentry-stack CLI: stack Tesla sentry camera clips into one grid video.
//!
//! Usage:
//!   sentry-stack [OPTIONS] [ENCODER GLOBAL OPTIONS...]
//!
//! Any argument not listed under OPTIONS is handed to the encoder as a
//! global option, placed immediately after the encoder binary.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use sentry_stack_common::config::{config_file_path, StackConfig};
use sentry_stack_engine::{JobSettings, StackParams};

mod args;
mod commands;

const PASSTHROUGH_WARNING: &str = "WARNING: any arguments not explicitly recognized are \
considered global options and are added to the encoder command line immediately after \
the encoder binary. Consider using --dry-run first and inspect the logs for 'global \
options'; if that list is not empty, proceed with caution.";

#[derive(Parser, Debug)]
#[command(
    name = "sentry-stack",
    about = "Stack your Tesla sentry videos into a single grid output",
    long_about = PASSTHROUGH_WARNING,
    version,
    author
)]
struct Cli {
    /// Top level sentry directory
    #[arg(long, default_value = "./")]
    sentry_dir: PathBuf,

    /// Speed multiplier [config default: 1]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    speed: Option<u32>,

    /// Scale-down divisor, e.g. 2 for half the width/height [config default: 4]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    scale: Option<u32>,

    /// Encode quality (CRF); increase to reduce quality and file size [config default: 23]
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=51))]
    quality: Option<u32>,

    /// Overwrite existing output files, otherwise skip them
    #[arg(long)]
    overwrite: bool,

    /// Print encoder commands but do not execute them
    #[arg(long)]
    dry_run: bool,

    /// List sub directories which correspond to sentry events, then exit
    #[arg(long)]
    list_dir: bool,

    /// Write outputs here instead of next to the clips
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Encoder binary [config default: ffmpeg]
    #[arg(long)]
    encoder: Option<String>,

    /// Config file [default: $XDG_CONFIG_HOME/sentry-stack/config.json]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective config file and exit
    #[arg(long)]
    init_config: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let raw: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let program = raw
        .first()
        .cloned()
        .unwrap_or_else(|| "sentry-stack".to_string());

    let split = args::split_known_args(&Cli::command(), raw.into_iter().skip(1));
    let cli = Cli::parse_from(std::iter::once(program).chain(split.recognized));

    let config_path = cli.config.clone().unwrap_or_else(config_file_path);
    let loaded = StackConfig::load_from(&config_path);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    config.logging.json |= cli.json_logs;
    sentry_stack_common::logging::init_logging(&config.logging);

    if let Err(e) = loaded {
        tracing::warn!(error = %e, "Using default configuration");
    }

    if cli.list_dir {
        return commands::list::run(&cli.sentry_dir);
    }

    if let Some(encoder) = &cli.encoder {
        config.encoder.binary = encoder.clone();
    }
    config.validate()?;

    if cli.init_config {
        config.save_to(&config_path)?;
        println!("Wrote config: {}", config_path.display());
        return Ok(());
    }

    let defaults = StackParams::from_defaults(&config.encoder);
    let params = StackParams {
        scale: cli.scale.unwrap_or(defaults.scale),
        speed: cli.speed.unwrap_or(defaults.speed),
        quality: cli.quality.unwrap_or(defaults.quality),
    };

    tracing::info!(
        sentry_dir = %cli.sentry_dir.display(),
        scale = params.scale,
        speed = params.speed,
        quality = params.quality,
        overwrite = cli.overwrite,
        dry_run = cli.dry_run,
        global_options = ?split.passthrough,
        "Options"
    );
    if !split.passthrough.is_empty() {
        tracing::warn!(
            global_options = ?split.passthrough,
            "Unrecognized arguments will be passed to the encoder as global options"
        );
    }

    let settings = JobSettings {
        params,
        encoder: config.encoder,
        output_dir: cli.output_dir,
        overwrite: cli.overwrite,
        global_options: split.passthrough,
    };
    commands::stack::run(&cli.sentry_dir, &settings, cli.dry_run)
}
