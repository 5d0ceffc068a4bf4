//! Configuration types deserialized from `folio.toml`.

use serde::Deserialize;
use std::fmt;

/// Default header marker: a markdown heading written inside a comment.
pub const DEFAULT_HEADER: &str = "# #";
/// Default escape-start pattern: a fenced block opened inside a comment.
pub const DEFAULT_ESCAPE: &str = r"^# ?(~~~+|```+)";
/// Default comment-marker pattern stripped from commentary lines.
pub const DEFAULT_COMMENT: &str = r"^#\s?";

/// Top-level `folio.toml` contents.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    /// Splitter marker settings.
    #[serde(default)]
    pub script: ScriptConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[script]`: markers the segment classifier recognizes.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptConfig {
    /// Literal prefix that marks a line as a header escape. Empty disables it.
    #[serde(default = "default_header")]
    pub header: String,
    /// Regex that opens a multi-line escape run.
    #[serde(default = "default_escape")]
    pub escape: String,
    /// Regex for the comment marker stripped from commentary.
    #[serde(default = "default_comment")]
    pub comment: String,
}

impl ScriptConfig {
    /// The header marker, or `None` when disabled.
    pub fn header_marker(&self) -> Option<&str> {
        Some(self.header.as_str()).filter(|h| !h.is_empty())
    }
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            escape: default_escape(),
            comment: default_comment(),
        }
    }
}

fn default_header() -> String {
    DEFAULT_HEADER.to_string()
}

fn default_escape() -> String {
    DEFAULT_ESCAPE.to_string()
}

fn default_comment() -> String {
    DEFAULT_COMMENT.to_string()
}

/// `[logging]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default verbosity when `RUST_LOG` is unset.
    #[serde(default)]
    pub level: LogLevel,
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Normal progress output.
    #[default]
    Info,
    /// Per-unit cache decisions.
    Debug,
    /// Everything, including cache hits.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}
