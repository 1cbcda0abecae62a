use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tintlog::palette::PALETTE;
use tintlog::{Context, LoggerConfig, Severity, StyleLogger};

use crate::error::{CliError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "tintlog",
    about = "Print console lines in 256-colour ANSI styles",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write one styled line to stdout.
    Say(SayArgs),

    /// Print every named colour in its own text colour.
    Palette,
}

#[derive(Debug, Args)]
pub struct SayArgs {
    /// Text colour name; unknown names are ignored.
    #[arg(long)]
    pub fg: Option<String>,

    /// Background colour name; unknown names are ignored.
    #[arg(long)]
    pub bg: Option<String>,

    #[arg(long)]
    pub bold: bool,

    #[arg(long)]
    pub italic: bool,

    #[arg(long)]
    pub underline: bool,

    /// TOML logger config (channel, level, template).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Severity of the line.
    #[arg(long, value_parser = parse_severity, default_value = "info")]
    pub level: Severity,

    /// Structured context as a JSON object.
    #[arg(long)]
    pub context: Option<String>,

    pub message: String,
}

fn parse_severity(name: &str) -> std::result::Result<Severity, String> {
    Severity::from_name(name).ok_or_else(|| format!("unknown severity `{name}`"))
}

fn parse_context(raw: Option<&str>) -> Result<Context> {
    let Some(raw) = raw else {
        return Ok(Context::new());
    };
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        Value::Null => Err(CliError::ContextNotObject { kind: "null" }),
        Value::Bool(_) => Err(CliError::ContextNotObject { kind: "boolean" }),
        Value::Number(_) => Err(CliError::ContextNotObject { kind: "number" }),
        Value::String(_) => Err(CliError::ContextNotObject { kind: "string" }),
        Value::Array(_) => Err(CliError::ContextNotObject { kind: "array" }),
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli, io::stdout())?;
    Ok(())
}

/// Execute `cli`, writing styled output to `out`, and hand the writer back.
pub fn run<W: Write>(cli: Cli, out: W) -> Result<W> {
    match cli.command {
        Commands::Say(args) => say(&args, out),
        Commands::Palette => palette(out),
    }
}

fn say<W: Write>(args: &SayArgs, out: W) -> Result<W> {
    let config = match &args.config {
        Some(path) => LoggerConfig::from_toml_file(path)?,
        None => LoggerConfig::default(),
    };
    tracing::debug!(
        channel = %config.channel,
        min_level = %config.level,
        path = ?args.config,
        "logger config loaded"
    );
    let context = parse_context(args.context.as_deref())?;
    let mut logger = StyleLogger::from_config(&config, out)?;

    if let Some(fg) = &args.fg {
        logger.text_colour(fg);
    }
    if let Some(bg) = &args.bg {
        logger.background_colour(bg);
    }
    if args.bold {
        logger.bold();
    }
    if args.italic {
        logger.italic();
    }
    if args.underline {
        logger.underline();
    }
    logger.log_at(args.level, &args.message, &context)?;

    Ok(logger.into_sink().into_writer())
}

fn palette<W: Write>(out: W) -> Result<W> {
    let mut logger = StyleLogger::with_writer(out);
    for &(name, code) in &PALETTE {
        logger.text_colour(name).log(&format!("{name:<16}{code:>4}"))?;
    }
    Ok(logger.into_sink().into_writer())
}
