//! Shared error types for protomap.
//!
//! Only a missing scan root aborts an analysis. Unreadable directories and
//! undecodable files are absorbed by the scanner, and unknown protocol names
//! are reported as data by `compare`/`migrate`, so neither appears here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for protomap operations
#[derive(Debug, Error)]
pub enum Error {
    /// The root path (or single file) handed to a scan does not exist
    #[error("Project path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// File system errors outside of the scan walk (config, report output)
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A protocol descriptor violates a catalog invariant
    #[error("Invalid protocol catalog: {0}")]
    Catalog(String),

    /// A detection or role pattern failed to compile
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a not-found error for a scan root
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check whether this is the fatal missing-root condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::Io { .. } => "I/O",
            Self::Config(_) | Self::Toml(_) => "Config",
            Self::Catalog(_) | Self::Pattern(_) => "Catalog",
            Self::Json(_) => "Serialization",
        }
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_path() {
        let err = Error::not_found("/no/such/project");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Project path not found: /no/such/project");
        assert_eq!(err.category(), "NotFound");
    }

    #[test]
    fn io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io("report.md", source);
        assert!(!err.is_not_found());
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("report.md"));
    }

    #[test]
    fn regex_errors_convert() {
        let bad = regex::Regex::new("(unclosed").unwrap_err();
        let err: Error = bad.into();
        assert_eq!(err.category(), "Catalog");
    }
}
