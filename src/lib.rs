//! `kubetint` — Colorize Kubernetes pod log records from stdin.
//!
//! This library turns one log-tailer record (node, namespace, pod and
//! container identity plus the application's log line in `message`) into a
//! single colorized line. Application lines that are JSON objects have their
//! timestamp, level, message, trace and span pulled out and the remaining
//! fields appended as key-sorted JSON; anything else is shown as written.
//!
//! # Example
//!
//! ```
//! use kubetint::{Config, Formatter};
//!
//! let formatter = Formatter::new(&Config::default(), false);
//! let record = br#"{"podName":"api-0","containerName":"app","message":"{\"level\":\"info\",\"msg\":\"hello\",\"port\":8080}"}"#;
//!
//! let line = formatter.format_record(record).unwrap();
//! assert_eq!(line, r#"info api-0 app hello {"port":8080}"#);
//! ```

pub mod cli;
pub mod color;
pub mod config;
pub mod envelope;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod level;
pub mod pretty;
pub mod timestamp;

// Re-export primary API types for convenience.
pub use config::Config;
pub use envelope::{Envelope, Message};
pub use error::{DecodeError, KubetintError};
pub use fields::{ExtractedRecord, FieldKeys};
pub use formatter::Formatter;
pub use level::Severity;
pub use pretty::PrettyJson;
pub use timestamp::TimestampNormalizer;
