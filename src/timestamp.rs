//! Timestamp normalization for embedded log lines.
//!
//! Applications write timestamps as RFC 3339 strings, looser date-time
//! strings, or numeric Unix epochs (optionally fractional). All of them are
//! rendered in one canonical layout, `YYYY-MM-DDTHH:MM:SS.mmm` followed by
//! `Z` or a `±HH:MM` offset (`±HH:MM:SS` when the offset has seconds).
//! Values that cannot be interpreted are passed through as text.

use std::fmt::Write;

use jiff::fmt::temporal::{Pieces, PiecesOffset};
use jiff::tz::{Offset, TimeZone};
use jiff::{Timestamp, Zoned};

/// Zone-less and offset-bearing layouts tried after RFC 3339, in order.
///
/// Layouts without an offset directive are interpreted in the normalizer's
/// configured zone.
pub const DEFAULT_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%a, %d %b %Y %H:%M:%S %z",
];

/// Converts timestamp values of unknown shape into canonical text.
#[derive(Debug, Clone)]
pub struct TimestampNormalizer {
    layouts: Vec<String>,
    zone: TimeZone,
}

impl Default for TimestampNormalizer {
    fn default() -> Self {
        Self::new(
            DEFAULT_LAYOUTS.iter().map(|l| (*l).to_string()).collect(),
            TimeZone::UTC,
        )
    }
}

impl TimestampNormalizer {
    /// Build a normalizer that tries `layouts` (after RFC 3339) and renders
    /// epochs and zone-less strings in `zone`.
    pub fn new(layouts: Vec<String>, zone: TimeZone) -> Self {
        Self { layouts, zone }
    }

    /// Normalize a timestamp value.
    ///
    /// - `null` is treated as absent and yields `None`.
    /// - Strings are parsed against RFC 3339 and then each layout; the first
    ///   match wins. Unparseable strings are returned unchanged.
    /// - Numbers are Unix epoch seconds, with an optional fractional part
    ///   and exponent. Numbers outside the timestamp range are returned as
    ///   their JSON text.
    /// - Anything else is returned as compact JSON text.
    pub fn normalize(&self, value: &serde_json::Value) -> Option<String> {
        let normalized = match value {
            serde_json::Value::Null => return None,
            serde_json::Value::String(s) => self.parse_str(s).map(|zdt| canonical(&zdt)),
            serde_json::Value::Number(n) => epoch_from_decimal(&n.to_string())
                .map(|ts| canonical(&ts.to_zoned(self.zone.clone()))),
            other => return Some(other.to_string()),
        };
        if normalized.is_none() {
            tracing::debug!(value = %value, "timestamp not recognized, passing through");
        }
        normalized.or_else(|| match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
    }

    fn parse_str(&self, s: &str) -> Option<Zoned> {
        if let Ok(ts) = s.parse::<Timestamp>() {
            return Some(ts.to_zoned(TimeZone::fixed(rfc3339_offset(s))));
        }

        self.layouts
            .iter()
            .find_map(|layout| self.parse_layout(layout, s))
    }

    fn parse_layout(&self, layout: &str, s: &str) -> Option<Zoned> {
        let tm = jiff::fmt::strtime::parse(layout, s).ok()?;
        if let Some(offset) = tm.offset() {
            let ts = tm.to_timestamp().ok()?;
            return Some(ts.to_zoned(TimeZone::fixed(offset)));
        }
        tm.to_datetime().ok()?.to_zoned(self.zone.clone()).ok()
    }
}

/// Render `zdt` in the canonical layout.
///
/// Offsets with a seconds component are written as `±HH:MM:SS`.
pub fn canonical(zdt: &Zoned) -> String {
    let mut out = zdt.strftime("%Y-%m-%dT%H:%M:%S%.3f").to_string();
    let seconds = zdt.offset().seconds();
    if seconds == 0 {
        out.push('Z');
        return out;
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    let _ = write!(out, "{sign}{:02}:{:02}", abs / 3600, abs / 60 % 60);
    if abs % 60 != 0 {
        let _ = write!(out, ":{:02}", abs % 60);
    }
    out
}

/// Offset written in an RFC 3339 / Temporal string, ignoring any bracketed
/// time zone annotation. `Z` and the unknown offset `-00:00` map to UTC.
fn rfc3339_offset(s: &str) -> Offset {
    match Pieces::parse(s).ok().and_then(|pieces| pieces.offset()) {
        Some(PiecesOffset::Numeric(numeric)) => numeric.offset(),
        _ => Offset::UTC,
    }
}

/// Largest decimal exponent accepted for an epoch; anything beyond is far
/// outside the representable timestamp range.
const MAX_EPOCH_EXPONENT: i32 = 32;

/// Interpret decimal text (optionally with an exponent) as Unix epoch
/// seconds without going through `f64`.
///
/// Fraction digits beyond nanosecond precision are dropped.
fn epoch_from_decimal(text: &str) -> Option<Timestamp> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().ok()?),
        None => (unsigned, 0),
    };
    if exponent.abs() > MAX_EPOCH_EXPONENT {
        return None;
    }
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let (whole, fraction) = shift_decimal_point(whole, fraction, exponent);

    let mut seconds: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos: i32 = 0;
    for i in 0..9 {
        let digit = fraction.as_bytes().get(i).map_or(0, |b| i32::from(b - b'0'));
        nanos = nanos * 10 + digit;
    }
    if negative {
        seconds = -seconds;
        nanos = -nanos;
    }
    Timestamp::new(seconds, nanos).ok()
}

/// Move the decimal point of `whole.fraction` by `exponent` places.
fn shift_decimal_point(whole: &str, fraction: &str, exponent: i32) -> (String, String) {
    let digits = format!("{whole}{fraction}");
    let point = whole.len() as i64 + i64::from(exponent);
    if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        (String::new(), format!("{zeros}{digits}"))
    } else if point as usize >= digits.len() {
        let zeros = "0".repeat(point as usize - digits.len());
        (format!("{digits}{zeros}"), String::new())
    } else {
        let (w, f) = digits.split_at(point as usize);
        (w.to_string(), f.to_string())
    }
}
