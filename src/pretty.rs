//! Single-line, syntax-colored JSON rendering for residual fields.
//!
//! Output is JSON text with one deliberate difference from a plain
//! serializer: object keys are always emitted in lexicographic order, so
//! equal objects render byte-for-byte identically whatever their source
//! order. Numbers keep their original digits; an exponent is written with a
//! lowercase `e` and an explicit sign (`1E5` becomes `1e+5`).

use std::fmt::Write;

use owo_colors::{OwoColorize, Style};
use serde_json::{Map, Value};

/// Renders JSON values with colored object keys.
#[derive(Debug, Clone, Copy)]
pub struct PrettyJson {
    key_style: Style,
    use_color: bool,
}

impl Default for PrettyJson {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PrettyJson {
    pub const fn new(use_color: bool) -> Self {
        Self {
            key_style: Style::new().blue(),
            use_color,
        }
    }

    /// Render `value` into a new string.
    pub fn render(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(value, &mut out);
        out
    }

    /// Append the rendering of `value` to `out`.
    pub fn write_value(&self, value: &Value, out: &mut String) {
        match value {
            Value::Object(map) => self.write_object(map, out),
            Value::Array(items) => self.write_array(items, out),
            Value::String(s) => write_json_string(s, out),
            Value::Number(n) => {
                let _ = write!(out, "{n}");
            }
            Value::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            Value::Null => out.push_str("null"),
        }
    }

    /// Append the rendering of an object to `out`.
    pub fn write_object(&self, map: &Map<String, Value>, out: &mut String) {
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort_unstable();

        out.push('{');
        for (i, key) in keys.into_iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let mut label = String::new();
            write_json_string(key, &mut label);
            label.push(':');
            if self.use_color {
                let _ = write!(out, "{}", label.style(self.key_style));
            } else {
                out.push_str(&label);
            }
            if let Some(value) = map.get(key) {
                self.write_value(value, out);
            }
        }
        out.push('}');
    }

    fn write_array(&self, items: &[Value], out: &mut String) {
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write_value(item, out);
        }
        out.push(']');
    }
}

/// Append `s` as a quoted, escaped JSON string.
fn write_json_string(s: &str, out: &mut String) {
    match serde_json::to_string(s) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => {
            let _ = write!(out, "{s:?}");
        }
    }
}
