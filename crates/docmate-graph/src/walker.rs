//! Depth-first dependency walker.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;
use oxc_parser::Parser;
use rustc_hash::FxHashSet;

use docmate_core::resolver::{is_relative_specifier, resolve_specifier};
use docmate_core::ParserConfig;

use crate::error::{GraphError, Result};
use crate::model::DependencyNode;

/// Walks the relative-import graph under an entry module.
///
/// Package imports (anything that is not `./`, `../`, `/` or `~`) are
/// outside the project tree and skipped. A module imported again through a
/// different chain after it has been fully walked is recorded as a leaf;
/// a module imported again while still on the walk stack is a
/// [`GraphError::CircularDependency`].
pub struct DependencyWalker {
    config: ParserConfig,
}

impl DependencyWalker {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Builds the dependency tree rooted at `entry`.
    pub async fn walk(&self, entry: &Path) -> Result<DependencyNode> {
        let mut stack = FxHashSet::default();
        let mut completed = FxHashSet::default();
        self.visit(entry.to_path_buf(), None, &mut stack, &mut completed)
            .await
    }

    fn visit<'a>(
        &'a self,
        module: PathBuf,
        importer: Option<PathBuf>,
        stack: &'a mut FxHashSet<PathBuf>,
        completed: &'a mut FxHashSet<PathBuf>,
    ) -> Pin<Box<dyn Future<Output = Result<DependencyNode>> + Send + 'a>> {
        Box::pin(async move {
            let (module_path, source) = read_source(&module).await?;

            if stack.contains(&module_path) {
                return Err(GraphError::CircularDependency {
                    from: importer.unwrap_or_else(|| module_path.clone()),
                    to: module_path,
                });
            }
            if completed.contains(&module_path) {
                return Ok(DependencyNode::leaf(module_path));
            }

            tracing::debug!(module = %module_path.display(), "walking imports");
            stack.insert(module_path.clone());

            let specifiers = self.scan_imports(&module_path, &source)?;
            let mut imports = Vec::with_capacity(specifiers.len());
            for specifier in specifiers {
                let target = resolve_specifier(&module_path, &specifier);
                let child = self
                    .visit(target, Some(module_path.clone()), stack, completed)
                    .await?;
                imports.push(child);
            }

            stack.remove(&module_path);
            completed.insert(module_path.clone());
            Ok(DependencyNode {
                path: module_path,
                imports,
            })
        })
    }

    /// Collects the relative import specifiers of one module, in source
    /// order. Confines the arena.
    fn scan_imports(&self, module: &Path, source: &str) -> Result<Vec<String>> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, self.config.source_type()).parse();
        if ret.panicked || !ret.errors.is_empty() {
            let message = ret
                .errors
                .first()
                .map(|error| error.to_string())
                .unwrap_or_else(|| "parser panicked".to_string());
            return Err(GraphError::Parse {
                path: module.to_path_buf(),
                message,
            });
        }

        let mut specifiers = Vec::new();
        for statement in &ret.program.body {
            if let Statement::ImportDeclaration(import) = statement {
                let specifier = import.source.value.as_str();
                if is_relative_specifier(specifier) {
                    specifiers.push(specifier.to_string());
                } else {
                    tracing::trace!(specifier, "skipping package import");
                }
            }
        }
        Ok(specifiers)
    }
}

/// Reads a module, falling back from `.js` to `.jsx` when the inferred name
/// is absent.
async fn read_source(path: &Path) -> Result<(PathBuf, String)> {
    match tokio::fs::read_to_string(path).await {
        Ok(source) => Ok((path.to_path_buf(), source)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            if path.extension().and_then(|ext| ext.to_str()) == Some("js") {
                let sibling = path.with_extension("jsx");
                if let Ok(source) = tokio::fs::read_to_string(&sibling).await {
                    return Ok((sibling, source));
                }
            }
            Err(GraphError::Io {
                path: path.to_path_buf(),
                source: error,
            })
        }
        Err(error) => Err(GraphError::Io {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}
