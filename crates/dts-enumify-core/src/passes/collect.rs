//! Collection pass: discover promotable unions and populate the registry.
//!
//! A single read-only pre-order traversal of the declaration tree. Tracks
//! the namespace path as a stack; registers every promotable string-literal
//! union (type-alias form and, under the `all` strategy, inline property
//! form) plus every pre-existing enum declaration, so the rewrite treats
//! fresh promotions and existing enums uniformly. The tree is not mutated.

use tracing::debug;

use crate::ast::Statement;
use crate::config::{EnumStrategy, TransformOptions};
use crate::extract::SchemaEnumIndex;
use crate::registry::{EnumRegistry, Origin};

pub fn run(
    statements: &[Statement],
    options: &TransformOptions,
    schemas: &SchemaEnumIndex,
    registry: &mut EnumRegistry,
) {
    let mut path = Vec::new();
    collect(statements, &mut path, options, schemas, registry);
}

fn collect(
    statements: &[Statement],
    path: &mut Vec<String>,
    options: &TransformOptions,
    schemas: &SchemaEnumIndex,
    registry: &mut EnumRegistry,
) {
    for statement in statements {
        match statement {
            Statement::Namespace { name, body } => {
                path.push(name.clone());
                collect(body, path, options, schemas, registry);
                path.pop();
            }
            Statement::TypeAlias { name, ty } => {
                // A mixed union is never promoted.
                let Some(values) = ty.as_string_literal_union() else {
                    continue;
                };
                if should_promote(name, options, schemas) {
                    debug!(name, namespace = path.join("."), "collected union alias");
                    registry.register(name, &values, path, Origin::Alias);
                }
            }
            Statement::Interface { members, .. } => {
                // Inline property unions only qualify under `all`.
                if options.strategy != EnumStrategy::All {
                    continue;
                }
                for member in members {
                    if let Some(values) = member.ty.as_string_literal_union() {
                        debug!(
                            property = member.name,
                            namespace = path.join("."),
                            "collected inline property union"
                        );
                        registry.register(&member.name, &values, path, Origin::Inline);
                    }
                }
            }
            Statement::Enum { name, members, .. } => {
                let values: Vec<String> = members.iter().map(|m| m.value.clone()).collect();
                registry.register(name, &values, path, Origin::Existing);
            }
        }
    }
}

fn should_promote(name: &str, options: &TransformOptions, schemas: &SchemaEnumIndex) -> bool {
    match options.strategy {
        EnumStrategy::All => true,
        EnumStrategy::Schema => schemas.contains(name),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
