//! Per-module declaration table.
//!
//! One traversal of the module's top-level statements indexes every binding
//! by name. Declarations nested inside export statements are indexed as
//! well, with the export statement's leading comment hoisted onto the
//! declaration.

use oxc_ast::ast::{
    Class, ClassElement, Expression, ExportDefaultDeclarationKind, FormalParameters, Function,
    Program, PropertyDefinition, PropertyKey, Statement, TSTypeAnnotation, VariableDeclarator,
};
use rustc_hash::FxHashMap;

use crate::comments::CommentIndex;
use crate::error::{Error, Result};
use crate::model::{DeclarationKind, DeclarationRecord, ParamRecord, PropertyRecord};
use crate::types;

/// Name-keyed index of every top-level binding in one module.
///
/// Duplicate names overwrite; the last declaration wins. The table is built
/// once per module visit and never mutated afterwards.
#[derive(Debug)]
pub struct DeclarationTable {
    records: FxHashMap<String, DeclarationRecord>,
}

impl DeclarationTable {
    /// Builds the table from the module's top-level statements.
    pub(crate) fn build(program: &Program<'_>, comments: &CommentIndex<'_>) -> Result<Self> {
        let mut table = Self {
            records: FxHashMap::default(),
        };

        for statement in &program.body {
            match statement {
                Statement::ClassDeclaration(class) => {
                    let record = class_record(class, None, &[class.span.start], comments)?;
                    table.insert(record);
                }
                Statement::FunctionDeclaration(function) => {
                    let record = function_record(function, &[function.span.start], comments)?;
                    table.insert(record);
                }
                Statement::VariableDeclaration(declaration) => {
                    for declarator in &declaration.declarations {
                        let attach = [declarator.span.start, declaration.span.start];
                        if let Some(record) =
                            record_for_declarator(declarator, &attach, comments)?
                        {
                            table.insert(record);
                        }
                    }
                }
                Statement::ExportNamedDeclaration(export) => {
                    if let Some(declaration) = &export.declaration {
                        use oxc_ast::ast::Declaration;
                        match declaration {
                            Declaration::ClassDeclaration(class) => {
                                let attach = [class.span.start, export.span.start];
                                table.insert(class_record(class, None, &attach, comments)?);
                            }
                            Declaration::FunctionDeclaration(function) => {
                                let attach = [function.span.start, export.span.start];
                                table.insert(function_record(function, &attach, comments)?);
                            }
                            Declaration::VariableDeclaration(variable) => {
                                for declarator in &variable.declarations {
                                    let attach = [
                                        declarator.span.start,
                                        variable.span.start,
                                        export.span.start,
                                    ];
                                    if let Some(record) =
                                        record_for_declarator(declarator, &attach, comments)?
                                    {
                                        table.insert(record);
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                    ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                        let attach = [class.span.start, export.span.start];
                        table.insert(class_record(class, None, &attach, comments)?);
                    }
                    ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                        let attach = [function.span.start, export.span.start];
                        table.insert(function_record(function, &attach, comments)?);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        Ok(table)
    }

    /// Looks a binding up by name.
    pub fn get(&self, name: &str) -> Option<&DeclarationRecord> {
        self.records.get(name)
    }

    /// Number of indexed bindings.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    fn insert(&mut self, record: DeclarationRecord) {
        self.records.insert(record.name.clone(), record);
    }
}

/// Builds a class record from a class declaration or expression.
///
/// `name_override` carries the binding name when the class comes from a
/// `const C = class ...` initializer.
fn class_record(
    class: &Class<'_>,
    name_override: Option<String>,
    attach: &[u32],
    comments: &CommentIndex<'_>,
) -> Result<DeclarationRecord> {
    let name = name_override
        .or_else(|| class.id.as_ref().map(|id| id.name.to_string()))
        .ok_or(Error::UnnamedDeclaration)?;

    let mut record = DeclarationRecord::new(name.clone(), DeclarationKind::Class);
    record.description = comments.description_at(attach);
    record.type_signature = name.clone();
    record.super_class = class.super_class.as_ref().and_then(|expr| match expr {
        Expression::Identifier(ident) => Some(ident.name.to_string()),
        _ => None,
    });

    let mut methods = Vec::new();
    let mut static_methods = Vec::new();
    let mut properties = Vec::new();
    let mut static_properties = Vec::new();

    for element in &class.body.body {
        match element {
            ClassElement::MethodDefinition(method) => {
                let member_name = property_key_name(&method.key);
                let description = comments.description_at(&[method.span.start]);
                let member = function_like_record(
                    member_name,
                    &method.value.params,
                    method.value.return_type.as_deref(),
                    description,
                )?;
                if method.r#static {
                    static_methods.push(member);
                } else {
                    methods.push(member);
                }
            }
            ClassElement::PropertyDefinition(property) => match property.value.as_ref() {
                Some(Expression::FunctionExpression(function)) => {
                    let member_name = property_key_name(&property.key);
                    let description = comments.description_at(&[property.span.start]);
                    let member = function_like_record(
                        member_name,
                        &function.params,
                        function.return_type.as_deref(),
                        description,
                    )?;
                    if property.r#static {
                        static_methods.push(member);
                    } else {
                        methods.push(member);
                    }
                }
                Some(Expression::ArrowFunctionExpression(arrow)) => {
                    let member_name = property_key_name(&property.key);
                    let description = comments.description_at(&[property.span.start]);
                    let member = function_like_record(
                        member_name,
                        &arrow.params,
                        arrow.return_type.as_deref(),
                        description,
                    )?;
                    if property.r#static {
                        static_methods.push(member);
                    } else {
                        methods.push(member);
                    }
                }
                _ => {
                    let member = data_property_record(property)?;
                    if property.r#static {
                        static_properties.push(member);
                    } else {
                        properties.push(member);
                    }
                }
            },
            _ => {
                return Err(Error::UnknownClassMember {
                    class: name.clone(),
                });
            }
        }
    }

    record.methods = Some(methods);
    record.static_methods = Some(static_methods);
    record.properties = Some(properties);
    record.static_properties = Some(static_properties);
    Ok(record)
}

/// Types a non-function class property: literal kinds first, then the
/// explicit annotation, otherwise the annotation is mandatory.
fn data_property_record(property: &PropertyDefinition<'_>) -> Result<PropertyRecord> {
    let name = property_key_name(&property.key);

    let type_annotation = match property.value.as_ref().and_then(literal_type_of) {
        Some(literal) => literal.to_string(),
        None => {
            let lowered = types::lower_annotation(property.type_annotation.as_deref())
                .ok_or_else(|| Error::MissingAnnotation {
                    symbol: name.clone(),
                })?;
            types::serialize(&lowered)?
        }
    };

    Ok(PropertyRecord {
        name,
        type_annotation,
    })
}

fn function_record(
    function: &Function<'_>,
    attach: &[u32],
    comments: &CommentIndex<'_>,
) -> Result<DeclarationRecord> {
    let name = function
        .id
        .as_ref()
        .map(|id| id.name.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let description = comments.description_at(attach);
    function_like_record(
        name,
        &function.params,
        function.return_type.as_deref(),
        description,
    )
}

/// Shared constructor for functions, arrow functions and class methods.
/// Every parameter must carry an explicit type annotation; the return type
/// defaults to `void`.
fn function_like_record(
    name: String,
    params: &FormalParameters<'_>,
    return_type: Option<&TSTypeAnnotation<'_>>,
    description: String,
) -> Result<DeclarationRecord> {
    let params = params_from(params)?;
    let return_type = match types::lower_annotation(return_type) {
        Some(node) => types::serialize(&node)?,
        None => "void".to_string(),
    };

    let mut record = DeclarationRecord::new(name, DeclarationKind::Function);
    record.description = description;
    record.type_signature = function_signature(&params, &return_type);
    record.params = Some(params);
    record.return_type = Some(return_type);
    Ok(record)
}

fn params_from(params: &FormalParameters<'_>) -> Result<Vec<ParamRecord>> {
    params
        .items
        .iter()
        .map(|item| {
            let name = binding_name(&item.pattern.kind);
            let lowered = types::lower_annotation(item.pattern.type_annotation.as_deref())
                .ok_or_else(|| Error::MissingAnnotation {
                    symbol: name.clone(),
                })?;
            Ok(ParamRecord {
                name,
                type_annotation: types::serialize(&lowered)?,
            })
        })
        .collect()
}

fn function_signature(params: &[ParamRecord], return_type: &str) -> String {
    let rendered = params
        .iter()
        .map(|param| format!("{}: {}", param.name, param.type_annotation))
        .collect::<Vec<_>>()
        .join(", ");
    format!("({rendered}) => {return_type}")
}

/// Classifies a variable declarator by its initializer kind.
///
/// Returns `Ok(None)` for destructuring bindings, which carry no single
/// indexable name.
fn record_for_declarator(
    declarator: &VariableDeclarator<'_>,
    attach: &[u32],
    comments: &CommentIndex<'_>,
) -> Result<Option<DeclarationRecord>> {
    use oxc_ast::ast::BindingPatternKind;

    let name = match &declarator.id.kind {
        BindingPatternKind::BindingIdentifier(ident) => ident.name.to_string(),
        _ => {
            tracing::trace!("skipping destructuring declarator");
            return Ok(None);
        }
    };

    let Some(init) = declarator.init.as_ref() else {
        return Err(Error::UnknownDeclarationKind { name });
    };

    let description = comments.description_at(attach);

    let record = match init {
        Expression::StringLiteral(literal) => DeclarationRecord::literal(
            name,
            "string",
            serde_json::Value::String(literal.value.to_string()),
        ),
        Expression::NumericLiteral(literal) => {
            DeclarationRecord::literal(name, "number", number_value(literal.value))
        }
        Expression::BooleanLiteral(literal) => {
            DeclarationRecord::literal(name, "boolean", serde_json::Value::Bool(literal.value))
        }
        Expression::NullLiteral(_) => {
            DeclarationRecord::literal(name, "null", serde_json::Value::Null)
        }
        Expression::Identifier(ident) if ident.name == "undefined" => DeclarationRecord::literal(
            name,
            "undefined",
            serde_json::Value::String("undefined".to_string()),
        ),
        Expression::CallExpression(_) => DeclarationRecord::placeholder(name),
        Expression::ClassExpression(class) => {
            class_record(class, Some(name), attach, comments)?
        }
        Expression::FunctionExpression(function) => function_like_record(
            name,
            &function.params,
            function.return_type.as_deref(),
            description.clone(),
        )?,
        Expression::ArrowFunctionExpression(arrow) => function_like_record(
            name,
            &arrow.params,
            arrow.return_type.as_deref(),
            description.clone(),
        )?,
        Expression::ObjectExpression(_) => {
            annotated_container_record(name, DeclarationKind::Object, &declarator.id.type_annotation)?
        }
        Expression::ArrayExpression(_) => {
            annotated_container_record(name, DeclarationKind::Array, &declarator.id.type_annotation)?
        }
        _ => return Err(Error::UnknownDeclarationKind { name }),
    };

    let mut record = record;
    if record.description.is_empty() {
        record.description = description;
    }
    Ok(Some(record))
}

/// Object and array initializers are typed by the binding's own annotation.
fn annotated_container_record(
    name: String,
    kind: DeclarationKind,
    annotation: &Option<oxc_allocator::Box<'_, TSTypeAnnotation<'_>>>,
) -> Result<DeclarationRecord> {
    let lowered = types::lower_annotation(annotation.as_deref()).ok_or_else(|| {
        Error::MissingAnnotation {
            symbol: name.clone(),
        }
    })?;
    let mut record = DeclarationRecord::new(name, kind);
    record.type_signature = types::serialize(&lowered)?;
    Ok(record)
}

fn literal_type_of(expr: &Expression<'_>) -> Option<&'static str> {
    match expr {
        Expression::StringLiteral(_) => Some("string"),
        Expression::NumericLiteral(_) => Some("number"),
        Expression::BooleanLiteral(_) => Some("boolean"),
        Expression::NullLiteral(_) => Some("null"),
        Expression::Identifier(ident) if ident.name == "undefined" => Some("undefined"),
        _ => None,
    }
}

fn property_key_name(key: &PropertyKey<'_>) -> String {
    key.static_name()
        .map(|name| name.to_string())
        .unwrap_or_else(|| "[computed]".to_string())
}

fn binding_name(kind: &oxc_ast::ast::BindingPatternKind<'_>) -> String {
    match kind {
        oxc_ast::ast::BindingPatternKind::BindingIdentifier(ident) => ident.name.to_string(),
        _ => "_".to_string(),
    }
}

/// Integer-valued literals are captured as integers so `const A = 1` round
/// trips as `1`, not `1.0`.
fn number_value(value: f64) -> serde_json::Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
        serde_json::Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn with_table<T>(source: &str, check: impl FnOnce(&DeclarationTable) -> T) -> T {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::tsx()).parse();
        assert!(ret.errors.is_empty(), "parse errors: {:?}", ret.errors);
        let comments = CommentIndex::new(&ret.program, source);
        let table = DeclarationTable::build(&ret.program, &comments).expect("table build");
        check(&table)
    }

    fn build_error(source: &str) -> Error {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::tsx()).parse();
        assert!(ret.errors.is_empty(), "parse errors: {:?}", ret.errors);
        let comments = CommentIndex::new(&ret.program, source);
        DeclarationTable::build(&ret.program, &comments).expect_err("expected build failure")
    }

    #[test]
    fn literal_declarator_captures_value() {
        with_table("const A = 1;", |table| {
            let record = table.get("A").expect("record for A");
            assert_eq!(record.kind, DeclarationKind::Literal);
            assert_eq!(record.type_signature, "number");
            assert_eq!(record.value, Some(serde_json::Value::from(1)));
        });
    }

    #[test]
    fn duplicate_names_last_declaration_wins() {
        with_table("const A = 1;\nconst A = 'two';", |table| {
            assert_eq!(table.len(), 1);
            let record = table.get("A").unwrap();
            assert_eq!(record.type_signature, "string");
            assert_eq!(
                record.value,
                Some(serde_json::Value::String("two".to_string()))
            );
        });
    }

    #[test]
    fn function_declaration_with_annotations() {
        with_table(
            "function add(a: number, b: number): number { return a + b; }",
            |table| {
                let record = table.get("add").unwrap();
                assert_eq!(record.kind, DeclarationKind::Function);
                let params = record.params.as_ref().unwrap();
                assert_eq!(params.len(), 2);
                assert_eq!(params[0].name, "a");
                assert_eq!(params[0].type_annotation, "number");
                assert_eq!(record.return_type.as_deref(), Some("number"));
                assert_eq!(record.type_signature, "(a: number, b: number) => number");
            },
        );
    }

    #[test]
    fn unannotated_return_defaults_to_void() {
        with_table("function log(message: string) {}", |table| {
            let record = table.get("log").unwrap();
            assert_eq!(record.return_type.as_deref(), Some("void"));
        });
    }

    #[test]
    fn unannotated_parameter_is_fatal() {
        let error = build_error("function broken(a) {}");
        assert!(matches!(error, Error::MissingAnnotation { symbol } if symbol == "a"));
    }

    #[test]
    fn class_members_split_static_from_instance() {
        let source = r#"
            class Example {
                count: number;
                static LABEL = 'example';
                greet(name: string): string { return name; }
                static create(): Example { return new Example(); }
            }
        "#;
        with_table(source, |table| {
            let record = table.get("Example").unwrap();
            assert_eq!(record.kind, DeclarationKind::Class);

            let properties = record.properties.as_ref().unwrap();
            assert_eq!(properties.len(), 1);
            assert_eq!(properties[0].name, "count");
            assert_eq!(properties[0].type_annotation, "number");

            let static_properties = record.static_properties.as_ref().unwrap();
            assert_eq!(static_properties.len(), 1);
            assert_eq!(static_properties[0].type_annotation, "string");

            let methods = record.methods.as_ref().unwrap();
            assert_eq!(methods.len(), 1);
            assert_eq!(methods[0].name, "greet");
            assert_eq!(methods[0].return_type.as_deref(), Some("string"));

            let static_methods = record.static_methods.as_ref().unwrap();
            assert_eq!(static_methods.len(), 1);
            assert_eq!(static_methods[0].name, "create");
        });
    }

    #[test]
    fn function_valued_class_property_is_a_method() {
        let source = r#"
            class Handler {
                onEvent = (payload: string): void => {};
            }
        "#;
        with_table(source, |table| {
            let record = table.get("Handler").unwrap();
            let methods = record.methods.as_ref().unwrap();
            assert_eq!(methods.len(), 1);
            assert_eq!(methods[0].name, "onEvent");
            assert_eq!(methods[0].type_signature, "(payload: string) => void");
            assert!(record.properties.as_ref().unwrap().is_empty());
        });
    }

    #[test]
    fn class_description_from_nearest_block_comment() {
        let source = "/* first */\n/* the real one */\nclass Documented {}";
        with_table(source, |table| {
            let record = table.get("Documented").unwrap();
            assert_eq!(record.description, "the real one");
        });
    }

    #[test]
    fn exported_declaration_inherits_export_comment() {
        let source = "/* answer constant */\nexport const answer = 42;";
        with_table(source, |table| {
            let record = table.get("answer").unwrap();
            assert_eq!(record.description, "answer constant");
            assert_eq!(record.value, Some(serde_json::Value::from(42)));
        });
    }

    #[test]
    fn superclass_identifier_is_stored_unresolved() {
        with_table("class Child extends Base {}", |table| {
            let record = table.get("Child").unwrap();
            assert_eq!(record.super_class.as_deref(), Some("Base"));
        });
    }

    #[test]
    fn call_expression_initializer_yields_placeholder() {
        with_table("const client = connect();", |table| {
            let record = table.get("client").unwrap();
            assert_eq!(record.kind, DeclarationKind::Unknown);
            assert_eq!(record.type_signature, "unknown");
        });
    }

    #[test]
    fn undefined_initializer_is_explicit() {
        with_table("const nothing = undefined;", |table| {
            let record = table.get("nothing").unwrap();
            assert_eq!(record.type_signature, "undefined");
        });
    }

    #[test]
    fn object_initializer_requires_binding_annotation() {
        with_table(
            "const point: {x: number, y: number} = {x: 0, y: 0};",
            |table| {
                let record = table.get("point").unwrap();
                assert_eq!(record.kind, DeclarationKind::Object);
                assert_eq!(record.type_signature, "{x: number, y: number}");
            },
        );

        let error = build_error("const point = {x: 0};");
        assert!(matches!(error, Error::MissingAnnotation { .. }));
    }

    #[test]
    fn array_initializer_requires_binding_annotation() {
        with_table("const names: Array<string> = [];", |table| {
            let record = table.get("names").unwrap();
            assert_eq!(record.kind, DeclarationKind::Array);
            assert_eq!(record.type_signature, "Array<string>");
        });
    }

    #[test]
    fn unsupported_initializer_is_fatal() {
        let error = build_error("const x = a + b;");
        assert!(matches!(error, Error::UnknownDeclarationKind { name } if name == "x"));
    }

    #[test]
    fn arrow_initializer_is_a_function_record() {
        with_table("const double = (n: number): number => n * 2;", |table| {
            let record = table.get("double").unwrap();
            assert_eq!(record.kind, DeclarationKind::Function);
            assert_eq!(record.type_signature, "(n: number) => number");
        });
    }
}
