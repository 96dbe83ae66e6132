//! Error types for the hubcard-core crate.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for model card operations.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Metadata serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] Box<figment::Error>),
}

impl CardError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = CardError::io(
            Path::new("/tmp/out/README.md"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/out/README.md"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_config_error_display() {
        let err = CardError::config("model name missing");
        assert_eq!(err.to_string(), "Configuration error: model name missing");
    }
}
