//! Error types for loading and querying the catalogue
//!
//! Rendering an ARN never produces an error; these cover reading service
//! data and looking up services, resources and action patterns.

use std::path::PathBuf;

use thiserror::Error;

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{}'?)", s))
        .unwrap_or_default()
}

/// Errors raised by the catalogue
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading a service data file failed
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking a service data directory failed
    #[error("Failed to scan {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A service data file is not a valid service definition
    #[error("Failed to parse service definition {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Embedded data is not UTF-8
    #[error("Invalid UTF-8 in service definition {0}")]
    InvalidUtf8(String),

    /// Two data files define the same service
    #[error("Service '{0}' is defined more than once")]
    DuplicateService(String),

    /// No service with that name
    #[error("Unknown service '{name}'{}", did_you_mean(.suggestion))]
    UnknownService {
        name: String,
        suggestion: Option<String>,
    },

    /// The service has no resource type with that name
    #[error("Service '{service}' has no resource type '{name}'{}", did_you_mean(.suggestion))]
    UnknownResource {
        service: String,
        name: String,
        suggestion: Option<String>,
    },

    /// An action wildcard pattern could not be interpreted
    #[error("Invalid action pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl CatalogError {
    pub(crate) fn json(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            origin: origin.into(),
            source,
        }
    }

    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias for catalogue operations
pub type Result<T> = std::result::Result<T, CatalogError>;
