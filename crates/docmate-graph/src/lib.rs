//! Relative-import dependency graphs for JavaScript and TypeScript modules.
//!
//! Starting at an entry module, [`DependencyWalker`] parses each file,
//! collects its relative import specifiers and recurses, producing a
//! [`DependencyNode`] tree. Package imports are skipped and true import
//! cycles are reported as errors.

mod error;
mod model;
mod walker;

pub use error::{GraphError, Result};
pub use model::DependencyNode;
pub use walker::DependencyWalker;
