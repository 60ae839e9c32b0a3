use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error variants for dependency graph construction.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Failed to read a source file.
    #[error("failed to read module '{path}': {source}")]
    Io {
        /// Path to the module that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Parsing a source file failed.
    #[error("failed to parse module '{path}': {message}")]
    Parse {
        /// Path to the source file.
        path: PathBuf,
        /// Aggregated parser error message.
        message: String,
    },

    /// An import chain returned to a module still being walked.
    #[error("circular dependency: '{from}' imports '{to}'")]
    CircularDependency {
        /// The importing module.
        from: PathBuf,
        /// The module that closed the cycle.
        to: PathBuf,
    },
}
