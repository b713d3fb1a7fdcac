//! Configuration for the enum-promotion transform.

use serde::{Deserialize, Serialize};

/// Which string-literal unions are promoted to enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumStrategy {
    /// Promote only unions whose name is a schema-authored enumeration
    /// (default, recommended).
    Schema,
    /// Promote every eligible string-literal union, including inline
    /// property unions.
    All,
}

/// Casing applied to emitted enum member keys and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CasingPolicy {
    /// Key = raw value (quoted when not a legal identifier), value unchanged.
    Value,
    /// Key and value upper-cased with illegal characters replaced by `_`.
    Upper,
    /// Key and value lower-cased with illegal characters replaced by `_`.
    Lower,
    /// Key and value pascal-cased.
    Pascal,
}

/// Options for one transform run.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `const-enums`, `max-depth`).
/// This naming convention is part of the public API contract for config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransformOptions {
    /// Promotion strategy. Default: Schema.
    pub strategy: EnumStrategy,
    /// Member casing policy. `None` keeps values as written and pascal-cases
    /// only the member key.
    pub casing: Option<CasingPolicy>,
    /// Emit `const enum` declarations instead of plain `enum`.
    pub const_enums: bool,
    /// Maximum traversal depth for schema extraction (stack overflow guard).
    pub max_depth: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            strategy: EnumStrategy::Schema,
            casing: None,
            const_enums: false,
            max_depth: 50,
        }
    }
}
