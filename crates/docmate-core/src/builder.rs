//! Module document builder.
//!
//! Drives the per-module pipeline: read source, parse, index declarations,
//! classify exports, then chase re-export edges across files. File reads are
//! the only await points; parsing and analysis stay synchronous so the
//! arena-backed syntax tree never crosses an await.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use indexmap::IndexMap;
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use rustc_hash::FxHashSet;

use crate::comments::{self, CommentIndex};
use crate::config::{ExtractOptions, ParserConfig};
use crate::declarations::DeclarationTable;
use crate::error::{Error, Result};
use crate::exports::{self, Classification, ReExportEdge};
use crate::model::{DeclarationRecord, Diagnostic, ModuleExports};
use crate::resolver::{read_source, resolve_specifier};

/// Builds the metadata document for an entry module.
pub struct ModuleDocBuilder {
    config: ParserConfig,
    options: ExtractOptions,
}

/// Analysis of a module visited as a re-export target: records resolved
/// locally, plus edges that must be chased one module further.
struct ChildAnalysis {
    resolved: Vec<DeclarationRecord>,
    forward: IndexMap<String, Vec<ReExportEdge>>,
    diagnostics: Vec<Diagnostic>,
}

impl ModuleDocBuilder {
    pub fn new(config: ParserConfig, options: ExtractOptions) -> Self {
        Self { config, options }
    }

    /// Extracts the document for `entry`.
    ///
    /// Re-export chains are followed depth first. A specifier chain that
    /// returns to a module still on the visitation stack is a
    /// [`Error::ReExportCycle`]; a module reached twice through disjoint
    /// chains is fine.
    pub async fn build(&self, entry: &Path) -> Result<ModuleExports> {
        let (entry_path, source) = read_source(entry).await?;
        tracing::debug!(module = %entry_path.display(), "extracting module document");

        let (description, classification) = self.analyze_entry(&entry_path, &source)?;
        let Classification {
            default_info,
            mut common_export,
            pending,
            mut diagnostics,
        } = classification;

        let mut visiting = FxHashSet::default();
        visiting.insert(entry_path.clone());
        for (specifier, edges) in pending {
            let target = resolve_specifier(&entry_path, &specifier);
            let records = self
                .resolve_edges(target, edges, &mut visiting, &mut diagnostics)
                .await?;
            common_export.extend(records);
        }

        if self.options.fail_on_unresolved {
            if let Some(Diagnostic::UnresolvedExport { module, name }) = diagnostics.first() {
                return Err(Error::UnresolvedExport {
                    name: name.clone(),
                    module: module.clone(),
                });
            }
        }

        Ok(ModuleExports {
            description,
            default_info,
            common_export,
            diagnostics,
        })
    }

    /// Resolves the requested edges against `module`, recursing through the
    /// module's own re-exports for names it does not declare itself.
    fn resolve_edges<'a>(
        &'a self,
        module: PathBuf,
        edges: Vec<ReExportEdge>,
        visiting: &'a mut FxHashSet<PathBuf>,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DeclarationRecord>>> + Send + 'a>> {
        Box::pin(async move {
            let (module_path, source) = read_source(&module).await?;
            if !visiting.insert(module_path.clone()) {
                return Err(Error::ReExportCycle { path: module_path });
            }
            tracing::debug!(module = %module_path.display(), "resolving re-exports");

            let analysis = self.analyze_child(&module_path, &source, edges)?;
            diagnostics.extend(analysis.diagnostics);

            let mut records = analysis.resolved;
            for (specifier, forwarded) in analysis.forward {
                let target = resolve_specifier(&module_path, &specifier);
                let resolved = self
                    .resolve_edges(target, forwarded, visiting, diagnostics)
                    .await?;
                records.extend(resolved);
            }

            visiting.remove(&module_path);
            Ok(records)
        })
    }

    /// Synchronous part of the entry visit; confines the arena.
    fn analyze_entry(&self, entry: &Path, source: &str) -> Result<(String, Classification)> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, self.config.source_type()).parse();
        if ret.panicked || !ret.errors.is_empty() {
            let message = ret
                .errors
                .first()
                .map(|error| error.to_string())
                .unwrap_or_else(|| "parser panicked".to_string());
            return Err(Error::Parse {
                path: entry.to_path_buf(),
                message,
            });
        }

        let description = comments::module_description(&ret.program, source);
        let comments = CommentIndex::new(&ret.program, source);
        let table = DeclarationTable::build(&ret.program, &comments)?;
        let classification = exports::classify(&ret.program, &table, entry)?;
        Ok((description, classification))
    }

    /// Synchronous part of a child-module visit; confines the arena.
    fn analyze_child(
        &self,
        module: &Path,
        source: &str,
        edges: Vec<ReExportEdge>,
    ) -> Result<ChildAnalysis> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, self.config.source_type()).parse();
        if ret.panicked || !ret.errors.is_empty() {
            let message = ret
                .errors
                .first()
                .map(|error| error.to_string())
                .unwrap_or_else(|| "parser panicked".to_string());
            return Err(Error::Parse {
                path: module.to_path_buf(),
                message,
            });
        }

        let comments = CommentIndex::new(&ret.program, source);
        let table = DeclarationTable::build(&ret.program, &comments)?;
        // The child's classified export surface is what the edge resolves
        // against; declarations it never exports stay behind. Its own
        // diagnostics concern names outside the whitelist and are dropped.
        let classification = exports::classify(&ret.program, &table, module)?;

        let mut analysis = ChildAnalysis {
            resolved: Vec::new(),
            forward: IndexMap::new(),
            diagnostics: Vec::new(),
        };

        for edge in edges {
            if let Some(record) = classification
                .common_export
                .iter()
                .find(|record| record.name == edge.source_name)
            {
                let mut record = record.clone();
                record.name = edge.exported_name;
                analysis.resolved.push(record);
                continue;
            }

            // Not exported here directly: maybe re-exported in turn.
            let mut forwarded = false;
            'search: for (specifier, child_edges) in &classification.pending {
                for child_edge in child_edges {
                    if child_edge.exported_name == edge.source_name {
                        analysis
                            .forward
                            .entry(specifier.clone())
                            .or_default()
                            .push(ReExportEdge {
                                source_name: child_edge.source_name.clone(),
                                exported_name: edge.exported_name.clone(),
                            });
                        forwarded = true;
                        break 'search;
                    }
                }
            }
            if !forwarded {
                analysis.diagnostics.push(Diagnostic::UnresolvedExport {
                    module: module.to_path_buf(),
                    name: edge.source_name,
                });
            }
        }

        Ok(analysis)
    }
}

/// Extracts the document for `entry` with the given configuration.
pub async fn extract(
    entry: &Path,
    config: ParserConfig,
    options: ExtractOptions,
) -> Result<ModuleExports> {
    ModuleDocBuilder::new(config, options).build(entry).await
}

