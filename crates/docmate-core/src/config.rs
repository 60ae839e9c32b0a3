use oxc_span::SourceType;

/// Immutable parser configuration shared by every module visit in a run.
///
/// The extractor parses every module with the same fixed grammar surface:
/// ESM source type with nominal typing, JSX, class fields and decorators
/// enabled. Callers pass this value into the pipeline explicitly; there is
/// no process-global parser state.
#[derive(Debug, Clone, Copy)]
pub struct ParserConfig {
    source_type: SourceType,
}

impl ParserConfig {
    /// The source type handed to the parser for every module.
    pub fn source_type(&self) -> SourceType {
        self.source_type
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        // tsx covers the whole annotation grammar the extractor understands,
        // independent of the file extension on disk.
        Self {
            source_type: SourceType::tsx(),
        }
    }
}

/// Options controlling extraction behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Treat an unresolved export as a fatal error instead of a diagnostic.
    ///
    /// The default keeps the tolerant behavior: the symbol is dropped from
    /// the document and reported in [`ModuleExports::diagnostics`].
    ///
    /// [`ModuleExports::diagnostics`]: crate::model::ModuleExports
    pub fail_on_unresolved: bool,
}
