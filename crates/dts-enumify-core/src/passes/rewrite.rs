//! Rewrite pass: emit canonical enums and re-point every reference.
//!
//! The second traversal builds the output tree. On entering a namespace
//! body, every identity owned by that namespace and not yet processed is
//! emitted first (alphabetically by display name, for deterministic
//! output); aliases that were promoted are dropped — except at the top
//! level, where an alias-origin promotion replaces its alias in place.
//! Pre-existing enum declarations stay where they were written when they
//! own their identity, and are dropped when deduplicated into another.
//!
//! Every type reference — inline string-literal union, bare identifier, or
//! namespace-qualified path — is rewritten to the canonical identity,
//! qualified from the outermost namespace iff the reference site is outside
//! the identity's owning namespace.

use tracing::debug;

use crate::ast::{full_path, PropertySignature, Statement, TypeNode};
use crate::casing::{normalize_member, pascal_case};
use crate::config::TransformOptions;
use crate::registry::{EnumIdentity, EnumRegistry, Origin};

pub fn run(
    statements: Vec<Statement>,
    options: &TransformOptions,
    registry: &mut EnumRegistry,
) -> Vec<Statement> {
    let mut path = Vec::new();
    rewrite_body(statements, &mut path, options, registry, true)
}

fn rewrite_body(
    statements: Vec<Statement>,
    path: &mut Vec<String>,
    options: &TransformOptions,
    registry: &mut EnumRegistry,
    is_root: bool,
) -> Vec<Statement> {
    let mut out = Vec::new();

    // Emit identities owned by this namespace at body entry. Top-level
    // alias promotions instead replace their alias in place further down;
    // pre-existing enums are kept at their original position.
    for id in registry.owned_unprocessed(path) {
        let emit_here = match registry.identity(id).origin {
            Origin::Existing => false,
            Origin::Alias => !is_root,
            Origin::Inline => true,
        };
        if emit_here && registry.mark_processed(id) {
            let identity = registry.identity(id);
            debug!(path = %identity.full_path, "emitting enum declaration");
            out.push(emit_enum_decl(identity, options));
        }
    }

    for statement in statements {
        match statement {
            Statement::Namespace { name, body } => {
                path.push(name.clone());
                let body = rewrite_body(body, path, options, registry, false);
                path.pop();
                out.push(Statement::Namespace { name, body });
            }
            Statement::TypeAlias { name, ty } => {
                // An alias was promoted iff its own value set resolves to
                // the identity registered at its path. Anything else (a
                // surviving alias, or an unlucky path collision) passes
                // through with its references rewritten.
                let registered = registry
                    .resolve_path(&full_path(path, &name))
                    .filter(|&id| {
                        ty.as_string_literal_union()
                            .and_then(|values| registry.resolve_values(&values))
                            == Some(id)
                    });
                match registered {
                    Some(id) => {
                        let canonical_here = {
                            let identity = registry.identity(id);
                            identity.origin == Origin::Alias
                                && identity.namespace_path == *path
                                && identity.display_name == pascal_case(&name)
                        };
                        if canonical_here && is_root && registry.mark_processed(id) {
                            // Top-level promotion: enum replaces the alias.
                            out.push(emit_enum_decl(registry.identity(id), options));
                        }
                        // Otherwise the enum was (or will be) emitted at its
                        // owning namespace; the alias is redundant.
                    }
                    None => out.push(Statement::TypeAlias {
                        name,
                        ty: rewrite_type(ty, path, registry),
                    }),
                }
            }
            Statement::Interface { name, members } => {
                let members = members
                    .into_iter()
                    .map(|member| PropertySignature {
                        name: member.name,
                        optional: member.optional,
                        ty: rewrite_type(member.ty, path, registry),
                    })
                    .collect();
                out.push(Statement::Interface { name, members });
            }
            Statement::Enum {
                name,
                is_const,
                members,
            } => {
                match registry.resolve_path(&full_path(path, &name)) {
                    Some(id) => {
                        let canonical_here = {
                            let identity = registry.identity(id);
                            identity.origin == Origin::Existing
                                && identity.namespace_path == *path
                                && identity.display_name == pascal_case(&name)
                        };
                        if canonical_here && registry.mark_processed(id) {
                            // Kept in place under its canonical display name
                            // so rewritten references stay valid.
                            out.push(Statement::Enum {
                                name: registry.identity(id).display_name.clone(),
                                is_const,
                                members,
                            });
                        }
                        // Deduplicated into another identity: dropped.
                    }
                    None => out.push(Statement::Enum {
                        name,
                        is_const,
                        members,
                    }),
                }
            }
        }
    }

    out
}

/// Materialize an enum declaration for a registry identity, applying the
/// configured casing policy and const modifier.
fn emit_enum_decl(identity: &EnumIdentity, options: &TransformOptions) -> Statement {
    Statement::Enum {
        name: identity.display_name.clone(),
        is_const: options.const_enums,
        members: identity
            .values
            .iter()
            .map(|value| normalize_member(value, options.casing))
            .collect(),
    }
}

/// Rewrite one type expression against the completed registry.
///
/// Promotable unions and resolvable references become canonical enum
/// references; unresolvable references pass through unchanged (they may
/// legitimately point at a non-enum type).
pub(crate) fn rewrite_type(ty: TypeNode, path: &[String], registry: &EnumRegistry) -> TypeNode {
    if let Some(values) = ty.as_string_literal_union() {
        if let Some(id) = registry.resolve_values(&values) {
            return canonical_reference(registry.identity(id), path);
        }
        return ty;
    }
    match ty {
        TypeNode::TypeRef { path: ref_path } => match registry.resolve_reference(path, &ref_path) {
            Some(id) => canonical_reference(registry.identity(id), path),
            None => TypeNode::TypeRef { path: ref_path },
        },
        TypeNode::Union { members } => TypeNode::Union {
            members: members
                .into_iter()
                .map(|member| rewrite_type(member, path, registry))
                .collect(),
        },
        TypeNode::Array { element } => TypeNode::Array {
            element: Box::new(rewrite_type(*element, path, registry)),
        },
        other => other,
    }
}

/// Reference an identity from `current`: bare inside the owning namespace,
/// fully qualified from the outermost namespace everywhere else.
pub(crate) fn canonical_reference(identity: &EnumIdentity, current: &[String]) -> TypeNode {
    if identity.namespace_path == current {
        TypeNode::reference(identity.display_name.clone())
    } else {
        let mut qualified = identity.namespace_path.clone();
        qualified.push(identity.display_name.clone());
        TypeNode::TypeRef { path: qualified }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CasingPolicy, EnumStrategy};
    use crate::extract::SchemaEnumIndex;
    use crate::passes::collect;
    use pretty_assertions::assert_eq;

    fn all_options() -> TransformOptions {
        TransformOptions {
            strategy: EnumStrategy::All,
            ..TransformOptions::default()
        }
    }

    fn rewrite(statements: Vec<Statement>, options: &TransformOptions) -> Vec<Statement> {
        let mut registry = EnumRegistry::new();
        collect::run(&statements, options, &SchemaEnumIndex::new(), &mut registry);
        run(statements, options, &mut registry)
    }

    fn alias(name: &str, values: &[&str]) -> Statement {
        Statement::TypeAlias {
            name: name.to_string(),
            ty: TypeNode::literal_union(values.iter().copied()),
        }
    }

    #[test]
    fn test_top_level_alias_replaced_in_place() {
        let result = rewrite(
            vec![
                Statement::Interface {
                    name: "Item".to_string(),
                    members: vec![],
                },
                alias("Status", &["active", "inactive"]),
            ],
            &all_options(),
        );
        assert_eq!(result.len(), 2);
        assert!(
            matches!(&result[0], Statement::Interface { .. }),
            "statement order preserved"
        );
        let Statement::Enum { name, members, .. } = &result[1] else {
            panic!("alias should be replaced by an enum, got {:?}", result[1]);
        };
        assert_eq!(name, "Status");
        assert_eq!(members[0].key, "Active");
        assert_eq!(members[0].value, "active");
    }

    #[test]
    fn test_namespaced_alias_emits_at_body_entry() {
        let result = rewrite(
            vec![Statement::Namespace {
                name: "Api".to_string(),
                body: vec![
                    Statement::Interface {
                        name: "Item".to_string(),
                        members: vec![PropertySignature {
                            name: "status".to_string(),
                            optional: false,
                            ty: TypeNode::reference("Status"),
                        }],
                    },
                    alias("Status", &["a", "b"]),
                ],
            }],
            &all_options(),
        );
        let Statement::Namespace { body, .. } = &result[0] else {
            panic!("expected namespace");
        };
        // Enum first, interface second, alias gone.
        assert_eq!(body.len(), 2);
        assert!(matches!(&body[0], Statement::Enum { name, .. } if name == "Status"));
        let Statement::Interface { members, .. } = &body[1] else {
            panic!("expected interface");
        };
        // Reference inside the owning namespace stays bare.
        assert_eq!(members[0].ty, TypeNode::reference("Status"));
    }

    #[test]
    fn test_cross_namespace_reference_fully_qualified() {
        let result = rewrite(
            vec![
                Statement::Namespace {
                    name: "Models".to_string(),
                    body: vec![alias("Status", &["a", "b"])],
                },
                Statement::Namespace {
                    name: "Views".to_string(),
                    body: vec![Statement::Interface {
                        name: "Panel".to_string(),
                        members: vec![PropertySignature {
                            name: "state".to_string(),
                            optional: false,
                            ty: TypeNode::literal_union(["a", "b"]),
                        }],
                    }],
                },
            ],
            &all_options(),
        );
        let Statement::Namespace { body, .. } = &result[1] else {
            panic!("expected Views namespace");
        };
        let Statement::Interface { members, .. } = &body[0] else {
            panic!("expected interface");
        };
        assert_eq!(
            members[0].ty,
            TypeNode::TypeRef {
                path: vec!["Models".to_string(), "Status".to_string()]
            }
        );
    }

    #[test]
    fn test_multiple_enums_emitted_alphabetically() {
        let result = rewrite(
            vec![Statement::Namespace {
                name: "Api".to_string(),
                body: vec![alias("zeta", &["z1", "z2"]), alias("alpha", &["a1", "a2"])],
            }],
            &all_options(),
        );
        let Statement::Namespace { body, .. } = &result[0] else {
            panic!("expected namespace");
        };
        let names: Vec<&str> = body
            .iter()
            .map(|s| match s {
                Statement::Enum { name, .. } => name.as_str(),
                other => panic!("expected only enums, got {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_const_enum_flag_propagates() {
        let options = TransformOptions {
            const_enums: true,
            ..all_options()
        };
        let result = rewrite(vec![alias("Status", &["a"])], &options);
        assert!(matches!(&result[0], Statement::Enum { is_const: true, .. }));

        let result = rewrite(vec![alias("Status", &["a"])], &all_options());
        assert!(matches!(&result[0], Statement::Enum { is_const: false, .. }));
    }

    #[test]
    fn test_casing_policy_applied_to_members() {
        let options = TransformOptions {
            casing: Some(CasingPolicy::Upper),
            ..all_options()
        };
        let result = rewrite(vec![alias("Status", &["not-found"])], &options);
        let Statement::Enum { members, .. } = &result[0] else {
            panic!("expected enum");
        };
        assert_eq!(members[0].key, "NOT_FOUND");
        assert_eq!(members[0].value, "NOT_FOUND");
    }

    #[test]
    fn test_existing_enum_kept_in_place_and_alias_deduplicated() {
        let result = rewrite(
            vec![
                Statement::Enum {
                    name: "Status".to_string(),
                    is_const: false,
                    members: vec![
                        normalize_member("on", None),
                        normalize_member("off", None),
                    ],
                },
                alias("Toggle", &["off", "on"]),
                Statement::Interface {
                    name: "Switch".to_string(),
                    members: vec![PropertySignature {
                        name: "mode".to_string(),
                        optional: false,
                        ty: TypeNode::reference("Toggle"),
                    }],
                },
            ],
            &all_options(),
        );
        // Enum kept at position 0, alias dropped, reference re-pointed.
        assert_eq!(result.len(), 2);
        assert!(matches!(&result[0], Statement::Enum { name, .. } if name == "Status"));
        let Statement::Interface { members, .. } = &result[1] else {
            panic!("expected interface");
        };
        assert_eq!(members[0].ty, TypeNode::reference("Status"));
    }

    #[test]
    fn test_unresolved_reference_passes_through() {
        let original = vec![Statement::Interface {
            name: "Item".to_string(),
            members: vec![PropertySignature {
                name: "other".to_string(),
                optional: false,
                ty: TypeNode::reference("SomethingElse"),
            }],
        }];
        let result = rewrite(original.clone(), &all_options());
        assert_eq!(result, original);
    }

    #[test]
    fn test_mixed_union_survives_with_refs_rewritten() {
        let result = rewrite(
            vec![
                Statement::Namespace {
                    name: "M".to_string(),
                    body: vec![alias("Status", &["a", "b"])],
                },
                Statement::TypeAlias {
                    name: "Loose".to_string(),
                    ty: TypeNode::Union {
                        members: vec![
                            TypeNode::Keyword {
                                name: "string".to_string(),
                            },
                            TypeNode::TypeRef {
                                path: vec!["M".to_string(), "Status".to_string()],
                            },
                        ],
                    },
                },
            ],
            &all_options(),
        );
        let Statement::TypeAlias { ty, .. } = &result[1] else {
            panic!("mixed alias must survive");
        };
        let TypeNode::Union { members } = ty else {
            panic!("expected union");
        };
        assert_eq!(
            members[1],
            TypeNode::TypeRef {
                path: vec!["M".to_string(), "Status".to_string()]
            }
        );
    }

    #[test]
    fn test_array_element_rewritten() {
        let result = rewrite(
            vec![
                alias("Status", &["a", "b"]),
                Statement::Interface {
                    name: "Item".to_string(),
                    members: vec![PropertySignature {
                        name: "history".to_string(),
                        optional: false,
                        ty: TypeNode::Array {
                            element: Box::new(TypeNode::literal_union(["a", "b"])),
                        },
                    }],
                },
            ],
            &all_options(),
        );
        let Statement::Interface { members, .. } = &result[1] else {
            panic!("expected interface");
        };
        assert_eq!(
            members[0].ty,
            TypeNode::Array {
                element: Box::new(TypeNode::reference("Status")),
            }
        );
    }
}
