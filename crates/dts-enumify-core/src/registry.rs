//! Canonical enum identity store for one transform run.
//!
//! [`EnumRegistry`] is the single point of truth mapping value sets to
//! enum identities and namespace-qualified paths back to those identities.
//! It is built fresh inside every transform run, populated by the collection
//! pass, then read (and `processed`-marked) by the rewrite and
//! reconciliation passes. No registry state survives a run.
//!
//! Deduplication is by value-set equality, order-independent: the first
//! registration of a value set creates the identity and its namespace wins
//! ownership; every later registration of the same set — whatever its name
//! or namespace — indexes its own path onto the existing identity.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::ast::full_path;
use crate::casing::pascal_case;

/// Handle into the registry's identity arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumId(usize);

/// How a registration was discovered in the declaration tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A `type X = "a" | "b"` alias.
    Alias,
    /// An inline union on an interface property.
    Inline,
    /// An enum declaration already present in the input.
    Existing,
}

/// One canonical enum: the declaration that will be emitted, and where.
#[derive(Debug, Clone)]
pub struct EnumIdentity {
    /// Identifier emitted in output (pascal-cased first-registered name).
    pub display_name: String,
    /// Member values in first-registered order, duplicates removed.
    pub values: Vec<String>,
    /// Owning namespace — where the canonical declaration is emitted.
    pub namespace_path: Vec<String>,
    /// `namespace_path` + `display_name`, dotted.
    pub full_path: String,
    /// Discovery form of the first (canonical) registration.
    pub origin: Origin,
}

#[derive(Debug, Default)]
pub struct EnumRegistry {
    identities: Vec<EnumIdentity>,
    by_value_set: HashMap<String, EnumId>,
    by_path: HashMap<String, EnumId>,
    processed: HashSet<EnumId>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Order-independent dedup key: JSON encoding of the sorted value list.
    fn values_key(values: &[String]) -> String {
        let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.dedup();
        serde_json::to_string(&sorted).unwrap_or_default()
    }

    /// Register a discovered string-literal union (or existing enum).
    ///
    /// If the value set is already known, the new path is indexed onto the
    /// existing identity and no new identity is created. Re-registering an
    /// identical `(name, values, namespace_path)` triple is a no-op beyond
    /// that same path indexing.
    pub fn register(
        &mut self,
        name: &str,
        values: &[String],
        namespace_path: &[String],
        origin: Origin,
    ) -> EnumId {
        let key = Self::values_key(values);
        let id = match self.by_value_set.get(&key) {
            Some(&existing) => {
                debug!(
                    name,
                    canonical = %self.identities[existing.0].full_path,
                    "value set already registered, deduplicating"
                );
                existing
            }
            None => {
                let display_name = pascal_case(name);
                let id = EnumId(self.identities.len());
                let mut deduped: Vec<String> = Vec::with_capacity(values.len());
                for value in values {
                    if !deduped.contains(value) {
                        deduped.push(value.clone());
                    }
                }
                let identity = EnumIdentity {
                    full_path: full_path(namespace_path, &display_name),
                    display_name,
                    values: deduped,
                    namespace_path: namespace_path.to_vec(),
                    origin,
                };
                debug!(path = %identity.full_path, "registered enum identity");
                self.identities.push(identity);
                self.by_value_set.insert(key, id);
                id
            }
        };
        // Index both the source-written path and the display-name path, so
        // references in either spelling resolve to the canonical identity.
        self.by_path
            .insert(full_path(namespace_path, name), id);
        self.by_path
            .insert(full_path(namespace_path, &pascal_case(name)), id);
        id
    }

    pub fn identity(&self, id: EnumId) -> &EnumIdentity {
        &self.identities[id.0]
    }

    /// Resolve a value set to its canonical identity, if registered.
    pub fn resolve_values(&self, values: &[String]) -> Option<EnumId> {
        self.by_value_set.get(&Self::values_key(values)).copied()
    }

    /// Resolve an exact dotted full path.
    pub fn resolve_path(&self, path: &str) -> Option<EnumId> {
        self.by_path.get(path).copied()
    }

    /// Resolve a (possibly qualified) reference written at `current_path`:
    /// the reference is tried against every prefix of the current namespace
    /// path, longest first, then as an absolute path.
    pub fn resolve_reference(
        &self,
        current_path: &[String],
        ref_path: &[String],
    ) -> Option<EnumId> {
        let suffix = ref_path.join(".");
        for prefix_len in (0..=current_path.len()).rev() {
            let candidate = if prefix_len == 0 {
                suffix.clone()
            } else {
                format!("{}.{}", current_path[..prefix_len].join("."), suffix)
            };
            if let Some(&id) = self.by_path.get(&candidate) {
                return Some(id);
            }
        }
        None
    }

    /// Resolve a bare display name against all identities. Used by the
    /// reconciliation pass for references left unqualified outside their
    /// owning namespace; ambiguous names (several identities sharing a
    /// display name across namespaces) return `None`.
    pub fn resolve_display_name(&self, name: &str) -> Option<EnumId> {
        let mut found = None;
        for (idx, identity) in self.identities.iter().enumerate() {
            if identity.display_name == name {
                if found.is_some() {
                    return None;
                }
                found = Some(EnumId(idx));
            }
        }
        found
    }

    /// Identities owned by exactly `namespace_path` and not yet emitted,
    /// sorted alphabetically by display name for deterministic output.
    pub fn owned_unprocessed(&self, namespace_path: &[String]) -> Vec<EnumId> {
        let mut owned: Vec<EnumId> = self
            .identities
            .iter()
            .enumerate()
            .filter(|(idx, identity)| {
                identity.namespace_path == namespace_path && !self.processed.contains(&EnumId(*idx))
            })
            .map(|(idx, _)| EnumId(idx))
            .collect();
        owned.sort_by(|a, b| {
            self.identities[a.0]
                .display_name
                .cmp(&self.identities[b.0].display_name)
        });
        owned
    }

    /// Mark an identity as emitted. Returns `false` when it already was,
    /// preventing double emission.
    pub fn mark_processed(&mut self, id: EnumId) -> bool {
        self.processed.insert(id)
    }

    pub fn is_processed(&self, id: EnumId) -> bool {
        self.processed.contains(&id)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
