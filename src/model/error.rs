//! Error types for treescroll.
//!
//! The windowing core is total: position recalculation, window resolution
//! and scroll reconciliation never fail, they degrade to rendering nothing
//! (or everything, when windowing is disabled). Errors only exist at the
//! edges, where the binary touches the filesystem.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error for the binary
//!   - [`SourceError`] - loading a tree description from disk
//!   - [`ConfigError`] - config file read / parse failures
//!   - [`LoggingError`] - tracing subscriber setup failures

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Every variant is fatal for the binary: it reports the error and exits.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load the tree description.
    #[error("Failed to load tree: {0}")]
    Source(#[from] SourceError),

    /// Failed to load configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to set up logging.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// `--reveal` named a node that is not in the tree.
    #[error("No node named {0:?}")]
    UnknownNode(String),

    /// Failed to write the report.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors encountered when reading a tree description file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The tree file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use treescroll::model::error::SourceError;
    ///
    /// let err = SourceError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json"),
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// I/O failure while reading the file.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid tree description.
    #[error("Invalid tree JSON in {path}: {source}")]
    Json {
        /// Path with invalid content.
        path: PathBuf,
        /// Parser error with line/column.
        #[source]
        source: serde_json::Error,
    },

    /// The description parsed but contains no nodes.
    #[error("Tree description has no nodes")]
    EmptyTree,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_converts_into_app_error() {
        let err: AppError = SourceError::EmptyTree.into();
        assert!(matches!(err, AppError::Source(SourceError::EmptyTree)));
        assert_eq!(err.to_string(), "Failed to load tree: Tree description has no nodes");
    }

    #[test]
    fn io_error_converts_into_output_variant() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Output(_)));
    }

    #[test]
    fn io_variant_exposes_source() {
        use std::error::Error as _;
        let err = SourceError::Io {
            path: PathBuf::from("tree.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("tree.json"));
    }

    #[test]
    fn unknown_node_quotes_the_name() {
        let err = AppError::UnknownNode("src".to_string());
        assert_eq!(err.to_string(), "No node named \"src\"");
    }

    #[test]
    fn config_error_converts_into_app_error() {
        let err: AppError = ConfigError::InvalidPath("bad".to_string()).into();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
