//! Command-line argument definitions for `kubetint`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use clap::{Parser, ValueEnum};
use serde::Deserialize;

/// Colorize Kubernetes pod log records from stdin.
///
/// Reads one JSON record per line (node, namespace, pod and container plus
/// the application's log line in `message`) and prints one colorized line
/// per record. Application log lines that are JSON are reformatted;
/// anything else is printed as written.
#[derive(Debug, Parser)]
#[command(name = "kubetint", version, about, long_about = None)]
pub struct Cli {
    /// Control color output.
    ///
    /// `auto` enables colors only when stdout is a TTY and `NO_COLOR` is unset.
    #[arg(short = 'c', long, value_enum)]
    pub color: Option<ColorMode>,

    /// Time zone for epoch timestamps and timestamps without an offset.
    #[arg(short = 'z', long, value_enum)]
    pub timezone: Option<Zone>,

    /// Stop at the first record that cannot be decoded.
    ///
    /// By default undecodable records are reported on stderr and skipped.
    #[arg(long)]
    pub fail_fast: bool,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Print a shell completion script and exit.
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Enable colors only when stdout is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}

/// Time zone used when a timestamp carries no offset of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Coordinated Universal Time.
    Utc,
    /// The system's local time zone.
    Local,
}

impl Zone {
    pub fn time_zone(self) -> jiff::tz::TimeZone {
        match self {
            Self::Utc => jiff::tz::TimeZone::UTC,
            Self::Local => jiff::tz::TimeZone::system(),
        }
    }
}
