//! Documentation metadata extraction for JavaScript and TypeScript modules.
//!
//! Given an entry module, the extractor parses it with oxc, indexes every
//! top-level declaration, classifies the export surface and follows
//! re-export chains across files, producing a single [`ModuleExports`]
//! document: the default-export slot, the named exports with their types,
//! descriptions and literal values, and any non-fatal findings.
//!
//! ```no_run
//! use docmate_core::{extract, ExtractOptions, ParserConfig};
//!
//! # async fn run() -> docmate_core::Result<()> {
//! let doc = extract(
//!     std::path::Path::new("src/index.js"),
//!     ParserConfig::default(),
//!     ExtractOptions::default(),
//! )
//! .await?;
//! println!("{} named exports", doc.common_export.len());
//! # Ok(())
//! # }
//! ```

mod builder;
mod comments;
mod config;
mod declarations;
mod error;
mod exports;
mod model;
pub mod resolver;
pub mod types;

pub use builder::{extract, ModuleDocBuilder};
pub use config::{ExtractOptions, ParserConfig};
pub use error::{Error, Result};
pub use model::{
    DeclarationKind, DeclarationRecord, DefaultExport, Diagnostic, ModuleExports, ParamRecord,
    PropertyRecord,
};
