//! The record pipeline: one tailer record in, one display line out.
//!
//! ```text
//! [timestamp ][level ]pod container [trace ][span ]message[ {residual}]
//! ```
//!
//! Bracketed segments are left out when the field is absent or empty. When
//! the embedded message is not a JSON object only the identity is colored
//! and the message is printed as written:
//!
//! ```text
//! pod container message
//! ```

use std::fmt::Write;

use owo_colors::{AnsiColors, OwoColorize};

use crate::color;
use crate::config::Config;
use crate::envelope::{Envelope, Message};
use crate::error::DecodeError;
use crate::fields::{ExtractedRecord, FieldKeys};
use crate::level;
use crate::pretty::PrettyJson;
use crate::timestamp::TimestampNormalizer;

/// Number of trailing characters of a trace or span id that are displayed.
pub const ID_SUFFIX_CHARS: usize = 6;

/// Formats tailer records. Holds only immutable tables; safe to reuse for
/// every line.
#[derive(Debug, Clone)]
pub struct Formatter {
    keys: FieldKeys,
    normalizer: TimestampNormalizer,
    pretty: PrettyJson,
    use_color: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(&Config::default(), true)
    }
}

impl Formatter {
    pub fn new(config: &Config, use_color: bool) -> Self {
        Self {
            keys: config.keys.clone(),
            normalizer: TimestampNormalizer::new(
                config.timestamp_layouts.clone(),
                config.zone.time_zone(),
            ),
            pretty: PrettyJson::new(use_color),
            use_color,
        }
    }

    /// Format one raw record.
    ///
    /// Fails only when the envelope itself cannot be decoded; in that case
    /// no text is produced.
    pub fn format_record(&self, raw: &[u8]) -> Result<String, DecodeError> {
        let mut out = String::new();
        self.format_record_into(raw, &mut out)?;
        Ok(out)
    }

    /// Format one raw record, appending the line to `out`.
    ///
    /// On error `out` is left untouched.
    pub fn format_record_into(&self, raw: &[u8], out: &mut String) -> Result<(), DecodeError> {
        let envelope = Envelope::decode(raw)?;
        match envelope.decode_message() {
            Message::Structured(map) => {
                let record = self.keys.extract(map);
                self.write_structured(&envelope, &record, out);
            }
            Message::Raw => {
                self.write_identity(&envelope, out);
                out.push_str(&envelope.message);
            }
        }
        Ok(())
    }

    fn write_structured(&self, envelope: &Envelope, record: &ExtractedRecord, out: &mut String) {
        if let Some(ts) = record
            .timestamp
            .as_ref()
            .and_then(|v| self.normalizer.normalize(v))
            .filter(|ts| !ts.is_empty())
        {
            out.push_str(&ts);
            out.push(' ');
        }

        if let Some(lvl) = non_empty(record.level.as_deref()) {
            level::write_level(lvl, self.use_color, out);
            out.push(' ');
        }

        self.write_identity(envelope, out);

        for id in [record.trace.as_deref(), record.span.as_deref()] {
            if let Some(id) = non_empty(id) {
                self.write_short_id(id, out);
                out.push(' ');
            }
        }

        out.push_str(record.message.as_deref().unwrap_or_default());

        if !record.residual.is_empty() {
            out.push(' ');
            self.pretty.write_object(&record.residual, out);
        }
    }

    /// `pod container ` with the pod's color pair.
    fn write_identity(&self, envelope: &Envelope, out: &mut String) {
        let (pod_color, container_color) = color::pod_colors(&envelope.pod_name);
        self.paint(&envelope.pod_name, pod_color, out);
        out.push(' ');
        self.paint(&envelope.container_name, container_color, out);
        out.push(' ');
    }

    /// Last [`ID_SUFFIX_CHARS`] characters of `id`, colored by the hash of
    /// the whole id.
    fn write_short_id(&self, id: &str, out: &mut String) {
        self.paint(id_suffix(id), color::id_color(id), out);
    }

    fn paint(&self, text: &str, color: AnsiColors, out: &mut String) {
        if self.use_color {
            let _ = write!(out, "{}", text.color(color));
        } else {
            out.push_str(text);
        }
    }
}

/// The trailing [`ID_SUFFIX_CHARS`] characters of `id`.
pub fn id_suffix(id: &str) -> &str {
    let count = id.chars().count();
    if count <= ID_SUFFIX_CHARS {
        return id;
    }
    match id.char_indices().nth(count - ID_SUFFIX_CHARS) {
        Some((start, _)) => &id[start..],
        None => id,
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
