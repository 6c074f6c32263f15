//! Field key tables and named-field extraction.
//!
//! Each named field has an ordered list of accepted keys; the first key
//! present wins (exact, case-sensitive match). After extraction every key in
//! every list, plus a set of noise keys, is removed so none of them reappear
//! among the residual fields.

use serde_json::{Map, Value};

/// Accepted keys for the timestamp field.
pub const TIMESTAMP_KEYS: &[&str] = &["ts", "time", "timestamp"];

/// Accepted keys for the level field.
pub const LEVEL_KEYS: &[&str] = &["level", "severity"];

/// Accepted keys for the message field.
pub const MESSAGE_KEYS: &[&str] = &["msg", "message"];

/// Cloud Logging structured-logging key for the trace id.
pub const TRACE_KEY: &str = "logging.googleapis.com/trace";

/// Cloud Logging structured-logging key for the span id.
pub const SPAN_KEY: &str = "logging.googleapis.com/spanId";

/// Operational metadata that is always dropped from the residual fields.
pub const NOISE_KEYS: &[&str] = &[
    "logging.googleapis.com/trace_sampled",
    "caller",
    "stacktrace",
];

/// Named fields pulled out of an embedded log line.
///
/// The timestamp is kept as the raw JSON value; it is normalized later.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExtractedRecord {
    pub timestamp: Option<Value>,
    pub level: Option<String>,
    pub message: Option<String>,
    pub trace: Option<String>,
    pub span: Option<String>,
    /// Remaining fields after extraction and noise removal.
    pub residual: Map<String, Value>,
}

/// Key tables used for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKeys {
    pub timestamp: Vec<String>,
    pub level: Vec<String>,
    pub message: Vec<String>,
    pub trace: Vec<String>,
    pub span: Vec<String>,
    /// Keys removed unconditionally.
    pub omit: Vec<String>,
}

impl Default for FieldKeys {
    fn default() -> Self {
        Self {
            timestamp: to_owned(TIMESTAMP_KEYS),
            level: to_owned(LEVEL_KEYS),
            message: to_owned(MESSAGE_KEYS),
            trace: vec![TRACE_KEY.to_string()],
            span: vec![SPAN_KEY.to_string()],
            omit: to_owned(NOISE_KEYS),
        }
    }
}

impl FieldKeys {
    /// Split `map` into named fields and residual fields.
    ///
    /// A named field whose value is not of the expected type (for example a
    /// numeric level) is treated as absent; its key is still removed.
    pub fn extract(&self, mut map: Map<String, Value>) -> ExtractedRecord {
        let timestamp = find_and_remove(&mut map, &self.timestamp).filter(|v| !v.is_null());
        let level = take_string(&mut map, &self.level);
        let message = take_string(&mut map, &self.message);
        let trace = take_string(&mut map, &self.trace);
        let span = take_string(&mut map, &self.span);

        for key in self.consumed_keys() {
            map.remove(key);
        }

        ExtractedRecord {
            timestamp,
            level,
            message,
            trace,
            span,
            residual: map,
        }
    }

    /// Every key that never survives into the residual fields.
    fn consumed_keys(&self) -> impl Iterator<Item = &str> {
        self.timestamp
            .iter()
            .chain(&self.level)
            .chain(&self.message)
            .chain(&self.trace)
            .chain(&self.span)
            .chain(&self.omit)
            .map(String::as_str)
    }
}

/// Remove the first matching alias key from a JSON object.
///
/// Returns its value if found.
pub fn find_and_remove<S: AsRef<str>>(map: &mut Map<String, Value>, aliases: &[S]) -> Option<Value> {
    aliases.iter().find_map(|alias| map.remove(alias.as_ref()))
}

fn take_string<S: AsRef<str>>(map: &mut Map<String, Value>, aliases: &[S]) -> Option<String> {
    match find_and_remove(map, aliases) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn to_owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| (*k).to_string()).collect()
}
