//! Declaration-tree model.
//!
//! The engine operates on an already-parsed declaration document: statements
//! nested inside namespaces, with type aliases, interfaces and enums as the
//! leaf declarations. The model is a tagged sum type (no duck-typed shape
//! sniffing) and doubles as the JSON wire format the host feeds in and reads
//! back, via internally tagged serde enums.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// A top-level or namespace-body statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Statement {
    /// `namespace Foo { ... }` — nesting container for all other statements.
    Namespace { name: String, body: Vec<Statement> },
    /// `type Foo = ...;`
    TypeAlias { name: String, ty: TypeNode },
    /// `interface Foo { ... }`
    Interface {
        name: String,
        members: Vec<PropertySignature>,
    },
    /// `enum Foo { ... }` / `const enum Foo { ... }`
    Enum {
        name: String,
        #[serde(default, skip_serializing_if = "is_false")]
        is_const: bool,
        members: Vec<EnumMember>,
    },
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// One property in an interface body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySignature {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    pub ty: TypeNode,
}

/// One member of an enum declaration.
///
/// `quoted_key` marks keys that are not legal bare identifiers and must be
/// serialized as string-literal keys (`"not-found" = "not-found"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMember {
    pub key: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub quoted_key: bool,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A type expression on the right-hand side of an alias or property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeNode {
    /// `"active"`
    StringLiteral { value: String },
    /// `A | B | C`
    Union { members: Vec<TypeNode> },
    /// `Status` (one segment) or `Api.Models.Status` (qualified).
    TypeRef { path: Vec<String> },
    /// `T[]`
    Array { element: Box<TypeNode> },
    /// `string`, `number`, `boolean`, ...
    Keyword { name: String },
}

impl TypeNode {
    /// Build an unqualified reference.
    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::TypeRef {
            path: vec![name.into()],
        }
    }

    /// Build a union of string literals from raw values.
    pub fn literal_union<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeNode::Union {
            members: values
                .into_iter()
                .map(|v| TypeNode::StringLiteral { value: v.into() })
                .collect(),
        }
    }

    /// The literal values of this node if it is a union composed entirely of
    /// string literals. A mixed union returns `None`; an empty union returns
    /// `Some(vec![])`. A bare `StringLiteral` is not a union node and also
    /// returns `None`.
    pub fn as_string_literal_union(&self) -> Option<Vec<String>> {
        let TypeNode::Union { members } = self else {
            return None;
        };
        let mut values = Vec::with_capacity(members.len());
        for member in members {
            match member {
                TypeNode::StringLiteral { value } => values.push(value.clone()),
                _ => return None,
            }
        }
        Some(values)
    }
}

/// Join a namespace path and a declaration name into a dotted full path.
pub fn full_path(namespace_path: &[String], name: &str) -> String {
    if namespace_path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace_path.join("."), name)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
