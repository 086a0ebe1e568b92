// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `matrixd`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "matrixd",
    version,
    about = "Serve a shared RGB LED matrix over a TCP display protocol.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Matrixd.toml` in the current working directory. A missing
    /// file is not an error; built-in defaults apply.
    #[arg(long, value_name = "PATH", default_value = "Matrixd.toml")]
    pub config: String,

    /// Listen on this port (overrides the config file).
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Width of the RGB matrix in pixels (overrides the config file).
    #[arg(short = 'W', long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Height of the RGB matrix in pixels (overrides the config file).
    #[arg(short = 'H', long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Do not access hardware; render to the log and self-test with a
    /// synthetic client that submits random requests.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MATRIXD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
