//! Log level classification and colorization.
//!
//! The level text is shown as the application wrote it; only its color is
//! derived from a case-insensitive severity lookup. Unknown levels are shown
//! uncolored.

use std::fmt::Write;

use owo_colors::{OwoColorize, Style};

/// Severity classes recognized in the level field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    /// Classify a level string, case-insensitive.
    ///
    /// Returns `None` for unrecognized strings.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" | "dpanic" | "panic" => Some(Self::Error),
            "fatal" | "critical" => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Returns the [`Style`] used for level text of this severity.
    #[allow(clippy::trivially_copy_pass_by_ref)] // &self required since OwoColorize has conflicting trait methods
    pub const fn style(&self) -> Style {
        match self {
            Self::Debug => Style::new().magenta(),
            Self::Info => Style::new().blue(),
            Self::Warn => Style::new().yellow(),
            Self::Error => Style::new().red(),
            Self::Fatal => Style::new().cyan(),
        }
    }
}

/// Write `level` into `out`, styled by its severity when `use_color` is set.
pub fn write_level(level: &str, use_color: bool, out: &mut String) {
    match Severity::from_str_loose(level) {
        Some(severity) if use_color => {
            let _ = write!(out, "{}", level.style(severity.style()));
        }
        _ => out.push_str(level),
    }
}
