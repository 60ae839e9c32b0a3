//! Export-surface classification.
//!
//! A second pass over the top-level statements sorts every export into one
//! of three buckets: the default-export slot, named exports resolved from
//! the module's own declaration table, and re-export edges that point at
//! another module and are resolved later by the builder.

use std::path::Path;

use indexmap::IndexMap;
use oxc_ast::ast::{
    Expression, ExportDefaultDeclarationKind, ModuleExportName, ObjectPropertyKind, Program,
    Statement,
};
use oxc_span::GetSpan;

use crate::declarations::DeclarationTable;
use crate::error::{Error, Result};
use crate::model::{DeclarationRecord, DefaultExport, Diagnostic};

/// One `export { sourceName as exportedName } from '...'` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReExportEdge {
    /// Name looked up in the target module.
    pub source_name: String,
    /// Name the record carries in this module's document.
    pub exported_name: String,
}

/// Result of classifying a module's export statements.
///
/// `pending` groups re-export edges by their raw import specifier, in the
/// order the specifiers first appear; the builder resolves them afterwards.
#[derive(Debug)]
pub(crate) struct Classification {
    pub default_info: DefaultExport,
    pub common_export: Vec<DeclarationRecord>,
    pub pending: IndexMap<String, Vec<ReExportEdge>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Classifies every export statement of the module.
///
/// `export * from` and default exports that are neither declarations,
/// identifiers nor object literals have no document representation and are
/// fatal.
pub(crate) fn classify(
    program: &Program<'_>,
    table: &DeclarationTable,
    module: &Path,
) -> Result<Classification> {
    let mut classification = Classification {
        default_info: DefaultExport::empty(),
        common_export: Vec::new(),
        pending: IndexMap::new(),
        diagnostics: Vec::new(),
    };

    for statement in &program.body {
        match statement {
            Statement::ExportNamedDeclaration(export) => {
                if let Some(declaration) = &export.declaration {
                    for name in declared_names(declaration) {
                        match table.get(&name) {
                            Some(record) => classification.common_export.push(record.clone()),
                            None => classification.diagnostics.push(unresolved(module, name)),
                        }
                    }
                }
                match export.source.as_ref() {
                    Some(source) => {
                        let edges = classification
                            .pending
                            .entry(source.value.to_string())
                            .or_default();
                        for specifier in &export.specifiers {
                            edges.push(ReExportEdge {
                                source_name: export_name(&specifier.local),
                                exported_name: export_name(&specifier.exported),
                            });
                        }
                    }
                    None => {
                        for specifier in &export.specifiers {
                            let local = export_name(&specifier.local);
                            let exported = export_name(&specifier.exported);
                            match table.get(&local) {
                                Some(record) => {
                                    let mut record = record.clone();
                                    record.name = exported;
                                    classification.common_export.push(record);
                                }
                                None => classification
                                    .diagnostics
                                    .push(unresolved(module, local)),
                            }
                        }
                    }
                }
            }
            Statement::ExportDefaultDeclaration(export) => {
                classification.default_info = match &export.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                        let name = function
                            .id
                            .as_ref()
                            .map(|id| id.name.to_string())
                            .unwrap_or_else(|| "unknown".to_string());
                        default_from_table(table, module, name, &mut classification.diagnostics)
                    }
                    ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                        let name = class
                            .id
                            .as_ref()
                            .map(|id| id.name.to_string())
                            .ok_or(Error::UnnamedDeclaration)?;
                        default_from_table(table, module, name, &mut classification.diagnostics)
                    }
                    ExportDefaultDeclarationKind::ObjectExpression(object) => {
                        DefaultExport::object(object_export_props(object))
                    }
                    ExportDefaultDeclarationKind::Identifier(ident) => default_from_table(
                        table,
                        module,
                        ident.name.to_string(),
                        &mut classification.diagnostics,
                    ),
                    other => {
                        return Err(Error::UnknownExportDeclaration {
                            details: format!(
                                "unsupported default export at offset {}",
                                other.span().start
                            ),
                        });
                    }
                };
            }
            Statement::ExportAllDeclaration(export) => {
                return Err(Error::UnknownExportDeclaration {
                    details: format!(
                        "wildcard re-export from '{}' at offset {}",
                        export.source.value, export.span.start
                    ),
                });
            }
            _ => {}
        }
    }

    Ok(classification)
}

fn default_from_table(
    table: &DeclarationTable,
    module: &Path,
    name: String,
    diagnostics: &mut Vec<Diagnostic>,
) -> DefaultExport {
    match table.get(&name) {
        Some(record) => DefaultExport::Declaration(record.clone()),
        None => {
            diagnostics.push(unresolved(module, name));
            DefaultExport::empty()
        }
    }
}

/// Names bound by a declaration nested inside `export`.
fn declared_names(declaration: &oxc_ast::ast::Declaration<'_>) -> Vec<String> {
    use oxc_ast::ast::{BindingPatternKind, Declaration};
    match declaration {
        Declaration::ClassDeclaration(class) => class
            .id
            .as_ref()
            .map(|id| vec![id.name.to_string()])
            .unwrap_or_default(),
        Declaration::FunctionDeclaration(function) => function
            .id
            .as_ref()
            .map(|id| vec![id.name.to_string()])
            .unwrap_or_default(),
        Declaration::VariableDeclaration(variable) => variable
            .declarations
            .iter()
            .filter_map(|declarator| match &declarator.id.kind {
                BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Property names advertised by an inline `export default { ... }` literal.
/// Identifier values win over keys, so `{ alias: impl }` advertises `impl`;
/// spreads have no static name and are skipped.
fn object_export_props(object: &oxc_ast::ast::ObjectExpression<'_>) -> Vec<String> {
    object
        .properties
        .iter()
        .filter_map(|property| match property {
            ObjectPropertyKind::ObjectProperty(property) => match &property.value {
                Expression::Identifier(ident) => Some(ident.name.to_string()),
                _ => property.key.static_name().map(|name| name.to_string()),
            },
            ObjectPropertyKind::SpreadProperty(_) => None,
        })
        .collect()
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(literal) => literal.value.to_string(),
    }
}

fn unresolved(module: &Path, name: String) -> Diagnostic {
    Diagnostic::UnresolvedExport {
        module: module.to_path_buf(),
        name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::CommentIndex;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;
    use std::path::PathBuf;

    fn with_classification<T>(source: &str, check: impl FnOnce(Classification) -> T) -> T {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::tsx()).parse();
        assert!(ret.errors.is_empty(), "parse errors: {:?}", ret.errors);
        let comments = CommentIndex::new(&ret.program, source);
        let table = DeclarationTable::build(&ret.program, &comments).expect("table");
        let classification =
            classify(&ret.program, &table, &PathBuf::from("mod.js")).expect("classify");
        check(classification)
    }

    #[test]
    fn exported_declaration_lands_in_common() {
        with_classification("export const A = 1;", |c| {
            assert_eq!(c.common_export.len(), 1);
            assert_eq!(c.common_export[0].name, "A");
            assert!(c.default_info.is_empty());
        });
    }

    #[test]
    fn local_specifier_renames_the_record() {
        with_classification("const A = 1;\nexport { A as B };", |c| {
            assert_eq!(c.common_export.len(), 1);
            assert_eq!(c.common_export[0].name, "B");
            assert_eq!(c.common_export[0].value, Some(serde_json::Value::from(1)));
        });
    }

    #[test]
    fn missing_local_specifier_is_a_diagnostic() {
        with_classification("export { Missing };", |c| {
            assert!(c.common_export.is_empty());
            assert_eq!(c.diagnostics.len(), 1);
            assert!(matches!(
                &c.diagnostics[0],
                Diagnostic::UnresolvedExport { name, .. } if name == "Missing"
            ));
        });
    }

    #[test]
    fn reexport_specifiers_group_by_source() {
        let source = "export { a } from './one';\nexport { b as c } from './one';\nexport { d } from './two';";
        with_classification(source, |c| {
            assert_eq!(c.pending.len(), 2);
            let one = &c.pending["./one"];
            assert_eq!(one.len(), 2);
            assert_eq!(one[1].source_name, "b");
            assert_eq!(one[1].exported_name, "c");
            assert_eq!(c.pending["./two"][0].source_name, "d");
        });
    }

    #[test]
    fn default_function_fills_default_slot() {
        with_classification("export default function main(): void {}", |c| {
            match c.default_info {
                DefaultExport::Declaration(record) => assert_eq!(record.name, "main"),
                other => panic!("unexpected default slot: {other:?}"),
            }
        });
    }

    #[test]
    fn default_identifier_resolves_from_table() {
        with_classification("const config = 'dev';\nexport default config;", |c| {
            match c.default_info {
                DefaultExport::Declaration(record) => {
                    assert_eq!(record.name, "config");
                    assert_eq!(record.type_signature, "string");
                }
                other => panic!("unexpected default slot: {other:?}"),
            }
        });
    }

    #[test]
    fn default_object_literal_lists_props() {
        let source = "const run = (): void => {};\nexport default { run, label: 'x', alias: run };";
        with_classification(source, |c| {
            match c.default_info {
                DefaultExport::Object {
                    export_type,
                    export_props,
                } => {
                    assert_eq!(export_type, "object");
                    assert_eq!(export_props, vec!["run", "label", "run"]);
                }
                other => panic!("unexpected default slot: {other:?}"),
            }
        });
    }

    #[test]
    fn wildcard_reexport_is_fatal() {
        let allocator = Allocator::default();
        let source = "export * from './other';";
        let ret = Parser::new(&allocator, source, SourceType::tsx()).parse();
        let comments = CommentIndex::new(&ret.program, source);
        let table = DeclarationTable::build(&ret.program, &comments).unwrap();
        let error = classify(&ret.program, &table, &PathBuf::from("mod.js"))
            .expect_err("wildcard must fail");
        assert!(matches!(error, Error::UnknownExportDeclaration { .. }));
    }
}
