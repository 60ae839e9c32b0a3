//! Nominal type tree and its canonical string rendering.
//!
//! Type annotations read from the syntax tree are lowered into an owned
//! [`TypeNode`] sum type first, so the serializer works on a fixed set of
//! kinds and unknown parser shapes collapse into [`TypeNode::Unknown`]
//! instead of failing at a distance.

use oxc_ast::ast::{
    BindingPatternKind, TSLiteral, TSSignature, TSType, TSTypeAnnotation, TSTypeName,
};

use crate::error::{Error, Result};

/// Owned nominal type tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    String,
    Number,
    Boolean,
    Null,
    Void,
    /// Nullable wrapper, rendered as `?inner`.
    Nullable(Box<TypeNode>),
    /// Union members in declared order.
    Union(Vec<TypeNode>),
    /// Array wrapper, rendered as `Array<element>`.
    Array(Box<TypeNode>),
    /// Function type with named parameters and an optional return type.
    Function {
        params: Vec<FunctionTypeParam>,
        return_type: Option<Box<TypeNode>>,
    },
    /// Structural object type.
    Object(Vec<ObjectTypeProperty>),
    /// Reference to a named type, possibly with type arguments.
    Named { name: String, args: Vec<TypeNode> },
    /// Explicit fallback for kinds the extractor does not model.
    Unknown,
}

/// One parameter of a [`TypeNode::Function`].
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTypeParam {
    pub name: String,
    /// `None` when the parameter carries no annotation; serialization of the
    /// enclosing function type fails in that case.
    pub ty: Option<TypeNode>,
}

/// One property of a [`TypeNode::Object`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTypeProperty {
    pub name: String,
    pub ty: TypeNode,
}

/// Renders a type tree into its canonical string form.
///
/// Pure and re-entrant; re-serializing the same tree always yields the same
/// string. Fails with [`Error::MissingAnnotation`] when a function parameter
/// lacks a type and with [`Error::UnhandledArrayAnnotation`] when a generic
/// `Array` reference has no type arguments.
pub fn serialize(node: &TypeNode) -> Result<String> {
    match node {
        TypeNode::String => Ok("string".to_string()),
        TypeNode::Number => Ok("number".to_string()),
        TypeNode::Boolean => Ok("boolean".to_string()),
        TypeNode::Null => Ok("null".to_string()),
        TypeNode::Void => Ok("void".to_string()),
        TypeNode::Unknown => Ok("unknown".to_string()),
        TypeNode::Nullable(inner) => Ok(format!("?{}", serialize(inner)?)),
        TypeNode::Union(members) => {
            let rendered = members
                .iter()
                .map(serialize)
                .collect::<Result<Vec<_>>>()?;
            Ok(rendered.join(" | "))
        }
        TypeNode::Array(element) => Ok(format!("Array<{}>", serialize(element)?)),
        TypeNode::Function {
            params,
            return_type,
        } => {
            let mut out = String::from("(");
            for (index, param) in params.iter().enumerate() {
                let ty = param.ty.as_ref().ok_or_else(|| Error::MissingAnnotation {
                    symbol: param.name.clone(),
                })?;
                if index > 0 {
                    out.push_str(", ");
                }
                out.push_str(&param.name);
                out.push_str(": ");
                out.push_str(&serialize(ty)?);
            }
            out.push_str(") => ");
            match return_type {
                Some(ret) => out.push_str(&serialize(ret)?),
                None => out.push_str("void"),
            }
            Ok(out)
        }
        TypeNode::Object(properties) => {
            let mut out = String::from("{");
            for (index, property) in properties.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                out.push_str(&property.name);
                out.push_str(": ");
                out.push_str(&serialize(&property.ty)?);
            }
            out.push('}');
            Ok(out)
        }
        TypeNode::Named { name, args } => {
            if name == "Array" {
                if args.is_empty() {
                    return Err(Error::UnhandledArrayAnnotation);
                }
                let mut out = String::from("Array<");
                for arg in args {
                    out.push_str(&serialize(arg)?);
                }
                out.push('>');
                Ok(out)
            } else {
                Ok(name.clone())
            }
        }
    }
}

/// Lowers an optional annotation wrapper, keeping absence observable.
pub(crate) fn lower_annotation(annotation: Option<&TSTypeAnnotation>) -> Option<TypeNode> {
    annotation.map(|wrapper| lower(&wrapper.type_annotation))
}

/// Lowers an oxc type node into the owned tree. Never fails: shapes outside
/// the supported set become [`TypeNode::Unknown`].
pub(crate) fn lower(ts: &TSType) -> TypeNode {
    match ts {
        TSType::TSStringKeyword(_) => TypeNode::String,
        TSType::TSNumberKeyword(_) => TypeNode::Number,
        TSType::TSBooleanKeyword(_) => TypeNode::Boolean,
        TSType::TSNullKeyword(_) => TypeNode::Null,
        TSType::TSVoidKeyword(_) => TypeNode::Void,
        TSType::TSLiteralType(literal) => match &literal.literal {
            TSLiteral::StringLiteral(_) => TypeNode::String,
            TSLiteral::NumericLiteral(_) => TypeNode::Number,
            TSLiteral::BooleanLiteral(_) => TypeNode::Boolean,
            _ => TypeNode::Unknown,
        },
        TSType::JSDocNullableType(nullable) => {
            TypeNode::Nullable(Box::new(lower(&nullable.type_annotation)))
        }
        TSType::TSUnionType(union) => {
            TypeNode::Union(union.types.iter().map(lower).collect())
        }
        TSType::TSArrayType(array) => TypeNode::Array(Box::new(lower(&array.element_type))),
        TSType::TSParenthesizedType(inner) => lower(&inner.type_annotation),
        TSType::TSFunctionType(function) => {
            let params = function
                .params
                .items
                .iter()
                .map(|item| FunctionTypeParam {
                    name: binding_name(&item.pattern.kind),
                    ty: lower_annotation(item.pattern.type_annotation.as_deref()),
                })
                .collect();
            TypeNode::Function {
                params,
                return_type: Some(Box::new(lower(&function.return_type.type_annotation))),
            }
        }
        TSType::TSTypeLiteral(object) => {
            let properties = object
                .members
                .iter()
                .filter_map(|member| match member {
                    TSSignature::TSPropertySignature(property) => {
                        let name = property.key.static_name()?.to_string();
                        let ty = lower_annotation(property.type_annotation.as_deref())
                            .unwrap_or(TypeNode::Unknown);
                        Some(ObjectTypeProperty { name, ty })
                    }
                    _ => None,
                })
                .collect();
            TypeNode::Object(properties)
        }
        TSType::TSTypeReference(reference) => {
            let args = reference
                .type_arguments
                .as_ref()
                .map(|instantiation| instantiation.params.iter().map(lower).collect())
                .unwrap_or_default();
            TypeNode::Named {
                name: type_name_to_string(&reference.type_name),
                args,
            }
        }
        _ => TypeNode::Unknown,
    }
}

fn type_name_to_string(name: &TSTypeName) -> String {
    match name {
        TSTypeName::IdentifierReference(ident) => ident.name.to_string(),
        TSTypeName::QualifiedName(qualified) => format!(
            "{}.{}",
            type_name_to_string(&qualified.left),
            qualified.right.name
        ),
        _ => "unknown".to_string(),
    }
}

fn binding_name(kind: &BindingPatternKind) -> String {
    match kind {
        BindingPatternKind::BindingIdentifier(ident) => ident.name.to_string(),
        _ => "_".to_string(),
    }
}
