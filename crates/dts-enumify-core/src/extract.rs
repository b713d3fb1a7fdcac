//! Schema enum extraction.
//!
//! Walks raw input schema documents (plain `serde_json::Value` trees, before
//! any declaration tree exists) and records which property paths are
//! schema-authored string enumerations. The resulting [`SchemaEnumIndex`] is
//! the "is this name schema-defined" predicate consulted by the `schema`
//! promotion strategy.
//!
//! Extraction is tolerant by design: any node missing an expected field is
//! simply not an enum, and the walk continues. Depth is bounded to guard
//! against pathologically nested documents.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

/// Index of schema-defined enumeration names.
///
/// Stores lowercased dotted paths: for a string enum discovered at
/// `components.schemas.Status`, the index holds `status`,
/// `schemas.status`, and `components.schemas.status`, so the same
/// conceptual enum matches whichever namespace depth later references it.
#[derive(Debug, Default, Clone)]
pub struct SchemaEnumIndex {
    names: HashSet<String>,
}

impl SchemaEnumIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Record a string-enum discovery at `path` (outermost segment first).
    /// Every dotted suffix of the path is indexed.
    fn record(&mut self, path: &[&str]) {
        for start in 0..path.len() {
            let suffix = path[start..].join(".").to_lowercase();
            self.names.insert(suffix);
        }
    }

    /// `true` when `name` — case-insensitively, bare or dotted — refers to a
    /// schema-defined enumeration.
    ///
    /// Matches the name itself, any recorded path ending in `.name`, and the
    /// conventional `components.schemas.<name>` / `components.responses.<name>`
    /// forms, so references at differing namespace depths all resolve.
    pub fn contains(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        if self.names.contains(&needle) {
            return true;
        }
        let dotted = format!(".{needle}");
        if self.names.iter().any(|n| n.ends_with(&dotted)) {
            return true;
        }
        let terminal = needle.rsplit('.').next().unwrap_or(&needle);
        self.names.contains(&format!("components.schemas.{terminal}"))
            || self.names.contains(&format!("components.responses.{terminal}"))
    }
}

/// Walk one schema document, registering every string enum into `index`.
///
/// `id` seeds the path (the host's identifier for the document); `max_depth`
/// bounds recursion.
pub fn scan_schema(index: &mut SchemaEnumIndex, id: &str, schema: &Value, max_depth: usize) {
    let mut path: Vec<&str> = Vec::new();
    if !id.is_empty() {
        path.push(id);
    }
    walk(index, schema, &mut path, 0, max_depth);
}

fn walk<'a>(
    index: &mut SchemaEnumIndex,
    node: &'a Value,
    path: &mut Vec<&'a str>,
    depth: usize,
    max_depth: usize,
) {
    if depth > max_depth {
        return;
    }
    let Value::Object(obj) = node else {
        return;
    };

    if is_string_enum(obj) {
        debug!(path = path.join("."), "schema enum discovered");
        index.record(path);
    }

    // oneOf/anyOf branches share the current path.
    for keyword in ["oneOf", "anyOf"] {
        if let Some(Value::Array(branches)) = obj.get(keyword) {
            for branch in branches {
                walk(index, branch, path, depth + 1, max_depth);
            }
        }
    }

    // Prefer a `properties` sub-object; otherwise descend into all own keys.
    if let Some(Value::Object(props)) = obj.get("properties") {
        for (key, child) in props {
            path.push(key.as_str());
            walk(index, child, path, depth + 1, max_depth);
            path.pop();
        }
    } else {
        for (key, child) in obj {
            if key == "oneOf" || key == "anyOf" || key == "enum" {
                continue;
            }
            path.push(key.as_str());
            walk(index, child, path, depth + 1, max_depth);
            path.pop();
        }
    }
}

fn is_string_enum(obj: &serde_json::Map<String, Value>) -> bool {
    obj.get("type").and_then(Value::as_str) == Some("string")
        && obj.get("enum").is_some_and(Value::is_array)
}

// ===========================================================================
// Tests
// ===========================================================================
