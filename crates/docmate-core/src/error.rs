use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error variants for documentation metadata extraction.
///
/// Every recognized-but-unsupported syntax shape is a hard failure that
/// aborts the whole entry build; there is no per-symbol recovery.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read or access a source file.
    #[error("failed to read module '{path}': {source}")]
    Io {
        /// Path to the module that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Parsing the source file with OXC failed.
    #[error("failed to parse module '{path}': {message}")]
    Parse {
        /// Path to the source file.
        path: PathBuf,
        /// Aggregated parser error message.
        message: String,
    },

    /// A parameter, property or return position requires an explicit type
    /// annotation and none was found.
    #[error("missing type annotation on '{symbol}'")]
    MissingAnnotation {
        /// Name of the binding or parameter lacking an annotation.
        symbol: String,
    },

    /// A class or function in a position where a name is mandatory has none.
    #[error("declaration requires a name")]
    UnnamedDeclaration,

    /// A variable initializer shape the declaration table does not recognize.
    #[error("unsupported initializer for declaration '{name}'")]
    UnknownDeclarationKind {
        /// Name of the declared binding.
        name: String,
    },

    /// A top-level export shape the classifier does not recognize.
    #[error("unsupported export declaration: {details}")]
    UnknownExportDeclaration {
        /// Context about the unsupported shape.
        details: String,
    },

    /// A class-body member kind the class handler does not recognize.
    #[error("unsupported class member in class '{class}'")]
    UnknownClassMember {
        /// Name of the enclosing class.
        class: String,
    },

    /// A generic `Array` reference carried no type arguments.
    #[error("array type annotation has no type arguments")]
    UnhandledArrayAnnotation,

    /// A re-export chain revisited a module that is still being resolved.
    #[error("re-export cycle detected through '{path}'")]
    ReExportCycle {
        /// The module that closed the cycle.
        path: PathBuf,
    },

    /// An exported name could not be matched against any declaration.
    ///
    /// Only raised when [`ExtractOptions::fail_on_unresolved`] is set;
    /// otherwise the same condition is reported as a diagnostic.
    ///
    /// [`ExtractOptions::fail_on_unresolved`]: crate::config::ExtractOptions
    #[error("unresolved export '{name}' in module '{module}'")]
    UnresolvedExport {
        /// The exported name that failed to resolve.
        name: String,
        /// The module the name was expected to come from.
        module: PathBuf,
    },
}
