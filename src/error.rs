//! Error types with actionable diagnostics.
//!
//! Every variant names the thing that went wrong and, where the user can fix
//! it, what to try next.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for endurecer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring, training or evaluating a model.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Configuration parsed but failed validation.
    #[error("Invalid config: {0}")]
    Validation(#[from] crate::config::ValidationError),

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Dataset file missing from the data root.
    #[error("Dataset file not found: {path}\n  → Set `data.download: true` or place the binary CIFAR files under the data root")]
    DatasetNotFound { path: PathBuf },

    /// Dataset file is present but malformed.
    #[error("Malformed dataset file {path}: {message}")]
    DatasetFormat { path: PathBuf, message: String },

    /// Dataset download failed.
    #[error("Download failed for {url}: {message}\n  → Check network access or download the archive manually")]
    Download { url: String, message: String },

    /// Model record could not be written or read.
    #[error("Checkpoint error at {path}: {message}")]
    Checkpoint { path: PathBuf, message: String },

    /// Checkpoint metadata could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation requested in a state that does not support it.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Check if this error is something the user can fix without a code change.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_)
                | Self::Validation(_)
                | Self::DatasetNotFound { .. }
                | Self::Download { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_keeps_context() {
        let err = Error::io(
            "reading test_batch.bin",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("test_batch.bin"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_dataset_not_found_is_actionable() {
        let err = Error::DatasetNotFound {
            path: "data/cifar-10-batches-bin".into(),
        };
        assert!(err.to_string().contains("data.download"));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_checkpoint_error_is_not_user_error() {
        let err = Error::Checkpoint {
            path: "out/best".into(),
            message: "truncated".into(),
        };
        assert!(!err.is_user_error());
    }
}
