use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Kind discriminator for a top-level declaration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Class,
    Function,
    Object,
    Array,
    Literal,
    Unknown,
}

/// Metadata for one top-level binding in a module.
///
/// One record exists per binding name; duplicate top-level names overwrite,
/// last declaration wins. Records are created during the declaration table
/// pass and never mutated afterwards, except for the rename applied when a
/// record travels across a re-export edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationRecord {
    /// Binding name (or the locally exported name after re-export renaming).
    pub name: String,
    /// Declaration kind.
    #[serde(rename = "type")]
    pub kind: DeclarationKind,
    /// Description from the nearest attached block comment, stars stripped.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    /// Canonical string rendering of the declaration's type.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub type_signature: String,
    /// Raw literal value, captured for literal initializers.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<serde_json::Value>,
    /// Superclass identifier, stored unresolved.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub super_class: Option<String>,
    /// Function parameters, for function-kind records.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub params: Option<Vec<ParamRecord>>,
    /// Serialized return type, for function-kind records.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub return_type: Option<String>,
    /// Instance data properties, for class-kind records.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub properties: Option<Vec<PropertyRecord>>,
    /// Static data properties, for class-kind records.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub static_properties: Option<Vec<PropertyRecord>>,
    /// Instance methods, as function-kind records.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub methods: Option<Vec<DeclarationRecord>>,
    /// Static methods, as function-kind records.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub static_methods: Option<Vec<DeclarationRecord>>,
}

impl DeclarationRecord {
    /// Creates a bare record with the given name and kind.
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            type_signature: String::new(),
            value: None,
            super_class: None,
            params: None,
            return_type: None,
            properties: None,
            static_properties: None,
            methods: None,
            static_methods: None,
        }
    }

    /// Record for a literal initializer (`const A = 1`).
    pub fn literal(
        name: impl Into<String>,
        type_signature: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        let mut record = Self::new(name, DeclarationKind::Literal);
        record.type_signature = type_signature.into();
        record.value = Some(value);
        record
    }

    /// Placeholder record for an initializer whose type cannot be derived,
    /// such as a bare call expression.
    pub fn placeholder(name: impl Into<String>) -> Self {
        let mut record = Self::new(name, DeclarationKind::Unknown);
        record.type_signature = "unknown".to_string();
        record
    }
}

/// Name/type pair for a function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRecord {
    /// Parameter name.
    pub name: String,
    /// Serialized parameter type.
    #[serde(rename = "typeAnnotation")]
    pub type_annotation: String,
}

/// Name/type pair for a class data property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Property name.
    pub name: String,
    /// Serialized property type.
    #[serde(rename = "typeAnnotation")]
    pub type_annotation: String,
}

/// Default-export slot of a module document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultExport {
    /// A resolved declaration record.
    Declaration(DeclarationRecord),
    /// An inline object literal, or the empty marker when no default export
    /// exists (`exportType` is then the empty string).
    Object {
        #[serde(rename = "exportType")]
        export_type: String,
        #[serde(rename = "exportProps")]
        export_props: Vec<String>,
    },
}

impl DefaultExport {
    /// The empty marker used when a module has no default export.
    pub fn empty() -> Self {
        Self::Object {
            export_type: String::new(),
            export_props: Vec::new(),
        }
    }

    /// Descriptor for an inline `export default { ... }` object literal.
    pub fn object(export_props: Vec<String>) -> Self {
        Self::Object {
            export_type: "object".to_string(),
            export_props,
        }
    }

    /// Returns `true` for the empty marker.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Object { export_type, .. } if export_type.is_empty())
    }
}

impl Default for DefaultExport {
    fn default() -> Self {
        Self::empty()
    }
}

/// Finished per-module metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleExports {
    /// Module description assembled from `//!` banner comments.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    /// Default-export metadata.
    pub default_info: DefaultExport,
    /// Named exports, in declaration then source-visitation order.
    pub common_export: Vec<DeclarationRecord>,
    /// Non-fatal findings collected during resolution.
    #[serde(skip, default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// A non-fatal finding surfaced to the caller instead of being silently
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// An exported name had no matching declaration or re-export edge.
    UnresolvedExport {
        /// Module the name was expected to come from.
        module: PathBuf,
        /// The unresolved name.
        name: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedExport { module, name } => {
                write!(f, "unresolved export '{}' in '{}'", name, module.display())
            }
        }
    }
}
