//! Error types for `kubetint`.
//!
//! Uses [`thiserror`] for ergonomic error derivation.

use thiserror::Error;

/// Maximum number of characters of the raw record quoted in a [`DecodeError`].
const SNIPPET_MAX_CHARS: usize = 64;

/// The outer record could not be decoded into an envelope.
///
/// This is the only error the record pipeline surfaces. Everything past the
/// envelope stage degrades instead of failing.
#[derive(Debug, Error)]
#[error("failed to decode record `{snippet}`: {source}")]
pub struct DecodeError {
    /// Lossy, length-capped copy of the offending input.
    pub snippet: String,
    #[source]
    pub source: serde_json::Error,
}

impl DecodeError {
    pub(crate) fn new(raw: &[u8], source: serde_json::Error) -> Self {
        Self {
            snippet: snippet(raw),
            source,
        }
    }
}

/// Errors that can occur in the `kubetint` binary.
///
/// Maps to exit codes: [`Config`](Self::Config) and [`Toml`](Self::Toml) → exit 1,
/// [`Io`](Self::Io) → exit 2, [`Decode`](Self::Decode) → exit 3.
#[derive(Debug, Error)]
pub enum KubetintError {
    /// Configuration error (invalid value, unreadable config file).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Envelope decode failure, fatal only in `--fail-fast` mode.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl KubetintError {
    /// Process exit code for this error.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Toml(_) => 1,
            Self::Io(_) => 2,
            Self::Decode(_) => 3,
        }
    }
}

fn snippet(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    if text.chars().count() <= SNIPPET_MAX_CHARS {
        return text.into_owned();
    }
    let head: String = text.chars().take(SNIPPET_MAX_CHARS).collect();
    format!("{head}…")
}
