//! Reconciliation pass: qualification safety net.
//!
//! A final corrective traversal over the rewritten tree. After this pass
//! every reference to a registered enum is qualified iff the reference site
//! sits outside the enum's owning namespace — the general ownership rule is
//! applied at every nesting depth, with no special case for references that
//! merely share a top-level namespace root with the enum.
//!
//! Bare identifiers matching exactly one known display name are re-pointed
//! even when path resolution fails; an ambiguous bare name (several
//! identities sharing a display name in different namespaces) is left
//! untouched rather than guessed at.

use tracing::trace;

use crate::ast::{PropertySignature, Statement, TypeNode};
use crate::passes::rewrite::canonical_reference;
use crate::registry::EnumRegistry;

pub fn run(statements: Vec<Statement>, registry: &EnumRegistry) -> Vec<Statement> {
    let mut path = Vec::new();
    reconcile(statements, &mut path, registry)
}

fn reconcile(
    statements: Vec<Statement>,
    path: &mut Vec<String>,
    registry: &EnumRegistry,
) -> Vec<Statement> {
    statements
        .into_iter()
        .map(|statement| match statement {
            Statement::Namespace { name, body } => {
                path.push(name.clone());
                let body = reconcile(body, path, registry);
                path.pop();
                Statement::Namespace { name, body }
            }
            Statement::TypeAlias { name, ty } => Statement::TypeAlias {
                name,
                ty: fix_type(ty, path, registry),
            },
            Statement::Interface { name, members } => Statement::Interface {
                name,
                members: members
                    .into_iter()
                    .map(|member| PropertySignature {
                        name: member.name,
                        optional: member.optional,
                        ty: fix_type(member.ty, path, registry),
                    })
                    .collect(),
            },
            enum_decl @ Statement::Enum { .. } => enum_decl,
        })
        .collect()
}

fn fix_type(ty: TypeNode, path: &[String], registry: &EnumRegistry) -> TypeNode {
    match ty {
        TypeNode::TypeRef { path: ref_path } => {
            if let Some(id) = registry.resolve_reference(path, &ref_path) {
                let fixed = canonical_reference(registry.identity(id), path);
                if fixed != (TypeNode::TypeRef { path: ref_path.clone() }) {
                    trace!(
                        reference = ref_path.join("."),
                        namespace = path.join("."),
                        "reconciled mis-qualified reference"
                    );
                }
                return fixed;
            }
            if ref_path.len() == 1 {
                if let Some(id) = registry.resolve_display_name(&ref_path[0]) {
                    return canonical_reference(registry.identity(id), path);
                }
            }
            TypeNode::TypeRef { path: ref_path }
        }
        TypeNode::Union { members } => TypeNode::Union {
            members: members
                .into_iter()
                .map(|member| fix_type(member, path, registry))
                .collect(),
        },
        TypeNode::Array { element } => TypeNode::Array {
            element: Box::new(fix_type(*element, path, registry)),
        },
        other => other,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
