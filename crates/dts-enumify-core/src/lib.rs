//! dts-enumify-core: promote string-literal union types in a generated
//! declaration tree to named enum declarations.
//!
//! The engine runs three passes over one declaration document:
//!
//! 1. **Collection** — read-only traversal registering every promotable
//!    string-literal union (and pre-existing enum) into an [`EnumRegistry`],
//!    deduplicating by value-set equality across namespaces.
//! 2. **Rewrite** — builds the output tree: canonical enum declarations are
//!    emitted at their owning namespace, redundant aliases removed, and every
//!    reference re-pointed (qualified across namespace boundaries).
//! 3. **Reconciliation** — safety-net traversal fixing any reference whose
//!    qualification does not match the ownership rule.
//!
//! The registry lives exactly as long as one [`transform`] call; nothing
//! leaks between runs. The schema-defined-name predicate used by the
//! `schema` strategy is built separately, before any declaration tree
//! exists, by scanning the raw input schemas ([`scan_schema`]).
//!
//! ## Usage
//!
//! ```rust
//! use dts_enumify_core::{scan_schema, transform, SchemaEnumIndex, TransformOptions};
//! use serde_json::json;
//!
//! let mut schemas = SchemaEnumIndex::new();
//! scan_schema(
//!     &mut schemas,
//!     "api",
//!     &json!({ "properties": { "status": { "type": "string", "enum": ["on", "off"] } } }),
//!     50,
//! );
//!
//! let tree: Vec<dts_enumify_core::Statement> = serde_json::from_value(json!([
//!     { "kind": "typeAlias", "name": "status", "ty": { "kind": "union", "members": [
//!         { "kind": "stringLiteral", "value": "on" },
//!         { "kind": "stringLiteral", "value": "off" }
//!     ]}}
//! ]))
//! .unwrap();
//!
//! let result = transform(tree, &TransformOptions::default(), &schemas);
//! assert!(matches!(&result[0], dts_enumify_core::Statement::Enum { .. }));
//! ```

pub mod ast;
pub mod casing;
pub mod config;
pub mod error;
pub mod extract;
pub mod passes;
pub mod registry;

use serde_json::Value;
use tracing::debug;

pub use ast::{EnumMember, PropertySignature, Statement, TypeNode};
pub use config::{CasingPolicy, EnumStrategy, TransformOptions};
pub use error::TransformError;
pub use extract::{scan_schema, SchemaEnumIndex};
pub use registry::{EnumIdentity, EnumRegistry};

/// Transform one declaration tree: collect, rewrite, reconcile.
///
/// A fresh registry is constructed per call and discarded at the end;
/// collection fully completes before any reference is resolved.
pub fn transform(
    statements: Vec<Statement>,
    options: &TransformOptions,
    schemas: &SchemaEnumIndex,
) -> Vec<Statement> {
    let mut registry = EnumRegistry::new();
    passes::collect::run(&statements, options, schemas, &mut registry);
    debug!("collection complete, starting rewrite");
    let rewritten = passes::rewrite::run(statements, options, &mut registry);
    passes::reconcile::run(rewritten, &registry)
}

/// JSON-in/JSON-out adapter around [`transform`]: decodes a declaration
/// document (a JSON array of statements), transforms it, re-encodes it.
pub fn transform_document(
    document: &Value,
    options: &TransformOptions,
    schemas: &SchemaEnumIndex,
) -> Result<Value, TransformError> {
    let statements: Vec<Statement> = serde_json::from_value(document.clone())?;
    let transformed = transform(statements, options, schemas);
    Ok(serde_json::to_value(transformed)?)
}

/// Host-pipeline adapter bundling options with the schema index.
///
/// The host's pre-processing hook calls [`scan_schema`](Self::scan_schema)
/// once per input schema document (side effect only, before any declaration
/// tree exists); its post-processing hook calls
/// [`transform_document`](Self::transform_document) once per output file.
#[derive(Debug, Default)]
pub struct Transformer {
    options: TransformOptions,
    schemas: SchemaEnumIndex,
}

impl Transformer {
    pub fn new(options: TransformOptions) -> Self {
        Self {
            options,
            schemas: SchemaEnumIndex::new(),
        }
    }

    /// Pre-processing hook: index schema-defined enums from one raw schema.
    pub fn scan_schema(&mut self, id: &str, schema: &Value) {
        scan_schema(&mut self.schemas, id, schema, self.options.max_depth);
    }

    /// Post-processing hook: transform one declaration document.
    pub fn transform_document(&self, document: &Value) -> Result<Value, TransformError> {
        transform_document(document, &self.options, &self.schemas)
    }

    /// Transform an already-decoded declaration tree.
    pub fn transform(&self, statements: Vec<Statement>) -> Vec<Statement> {
        transform(statements, &self.options, &self.schemas)
    }
}
