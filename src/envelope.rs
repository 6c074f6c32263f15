//! The outer log-tailing record and its embedded message.
//!
//! A record is decoded in two independent stages. The envelope must be a
//! JSON object and failing to decode it is an error. The embedded `message`
//! is then decoded on its own; when it is not a JSON object the record is
//! shown in raw mode instead.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// One record as emitted by the log tailer.
///
/// Missing or `null` fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Envelope {
    #[serde(deserialize_with = "null_as_empty")]
    pub node_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub namespace: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub pod_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub container_name: String,
    /// Application log line, still serialized.
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Result of decoding the embedded message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The message is a JSON object.
    Structured(Map<String, Value>),
    /// The message is plain text (or JSON that is not an object).
    Raw,
}

impl Envelope {
    /// Decode the outer record.
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        serde_json::from_slice(raw).map_err(|e| DecodeError::new(raw, e))
    }

    /// Decode the embedded message as an independent JSON document.
    pub fn decode_message(&self) -> Message {
        match serde_json::from_str::<Value>(&self.message) {
            Ok(Value::Object(map)) => Message::Structured(map),
            Ok(_) => {
                tracing::debug!(pod = %self.pod_name, "message is JSON but not an object");
                Message::Raw
            }
            Err(e) => {
                tracing::debug!(pod = %self.pod_name, error = %e, "message is not JSON");
                Message::Raw
            }
        }
    }
}
