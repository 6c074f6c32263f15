//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`~/.config/kubetint/config.toml` or `$XDG_CONFIG_HOME/kubetint/config.toml`)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::{Cli, ColorMode, Zone};
use crate::error::KubetintError;
use crate::fields::FieldKeys;
use crate::timestamp::DEFAULT_LAYOUTS;

/// Runtime configuration merged from defaults, config file, and CLI arguments.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::default`] for built-in defaults (useful in tests and benchmarks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Color output mode (auto/always/never).
    pub color_mode: ColorMode,
    /// Zone for epoch timestamps and timestamps without an offset.
    pub zone: Zone,
    /// Abort on the first record whose envelope cannot be decoded.
    pub fail_fast: bool,
    /// Key tables for named-field extraction and noise removal.
    pub keys: FieldKeys,
    /// strptime layouts tried after RFC 3339.
    pub timestamp_layouts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            zone: Zone::Utc,
            fail_fast: false,
            keys: FieldKeys::default(),
            timestamp_layouts: DEFAULT_LAYOUTS.iter().map(|l| (*l).to_string()).collect(),
        }
    }
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// Merge precedence: CLI flags > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, KubetintError> {
        let mut config = Self::default();

        let config_path = cli.config.clone().unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            let file_config = FileConfig::load(&config_path)?;
            config.apply_file_config(file_config);
        } else if cli.config.is_some() {
            return Err(KubetintError::Config(format!(
                "config file {} does not exist",
                config_path.display()
            )));
        }

        if let Some(color) = cli.color {
            config.color_mode = color;
        }
        if let Some(zone) = cli.timezone {
            config.zone = zone;
        }
        config.fail_fast |= cli.fail_fast;

        Ok(config)
    }

    /// Default config file path: `$XDG_CONFIG_HOME/kubetint/config.toml` or `~/.config/kubetint/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("kubetint").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("kubetint")
                .join("config.toml")
        } else {
            PathBuf::from(".config/kubetint/config.toml")
        }
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) {
        if let Some(color) = file.color {
            self.color_mode = color;
        }
        if let Some(zone) = file.timezone {
            self.zone = zone;
        }
        if let Some(fail_fast) = file.fail_fast {
            self.fail_fast = fail_fast;
        }

        if let Some(keys) = file.keys {
            // The replaced defaults stay on the noise list so they never leak.
            if let Some(trace) = keys.trace {
                let previous = std::mem::replace(&mut self.keys.trace, vec![trace]);
                self.keys.omit.extend(previous);
            }
            if let Some(span) = keys.span {
                let previous = std::mem::replace(&mut self.keys.span, vec![span]);
                self.keys.omit.extend(previous);
            }
        }

        if let Some(omit) = file.omit {
            self.keys.omit.extend(omit);
        }
        if let Some(layouts) = file.timestamp_layouts {
            self.timestamp_layouts.extend(layouts);
        }
    }
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    color: Option<ColorMode>,
    timezone: Option<Zone>,
    fail_fast: Option<bool>,
    keys: Option<KeysConfig>,
    omit: Option<Vec<String>>,
    timestamp_layouts: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeysConfig {
    trace: Option<String>,
    span: Option<String>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, KubetintError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KubetintError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
