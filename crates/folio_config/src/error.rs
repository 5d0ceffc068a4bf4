//! Configuration errors.

/// Errors from loading or validating `folio.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A marker pattern is not a valid regular expression.
    #[error("invalid pattern for script.{field}: {reason}")]
    InvalidPattern {
        /// Which key held the pattern.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_pattern() {
        let err = ConfigError::InvalidPattern {
            field: "escape",
            reason: "unclosed group".to_string(),
        };
        assert_eq!(err.to_string(), "invalid pattern for script.escape: unclosed group");
    }

    #[test]
    fn display_parse_error() {
        let err = ConfigError::ParseError("expected '='".to_string());
        assert_eq!(err.to_string(), "failed to parse configuration: expected '='");
    }

    #[test]
    fn display_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(ConfigError::IoError(io)
            .to_string()
            .starts_with("failed to read configuration:"));
    }
}
