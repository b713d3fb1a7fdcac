//! Member-key casing for emitted enums.
//!
//! Maps a raw literal value to an enum member `(key, value)` pair under one
//! of four policies (or the unspecified default). Pure, deterministic, and
//! total over any input string — empty strings and pure punctuation fall
//! back to capitalizing the first character.

use std::sync::OnceLock;

use regex::Regex;

use crate::ast::EnumMember;
use crate::config::CasingPolicy;

/// `true` when `c` cannot appear in a bare identifier.
fn is_illegal(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// `true` when `key` must be serialized as a string-literal member key.
fn needs_quoting(key: &str) -> bool {
    key.is_empty()
        || key.chars().next().is_some_and(|c| c.is_ascii_digit())
        || key.chars().any(is_illegal)
}

fn replace_illegal(raw: &str) -> String {
    raw.chars()
        .map(|c| if is_illegal(c) { '_' } else { c })
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn pascal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[A-Z][a-zA-Z0-9]*$").unwrap())
}

/// Pascal-case a raw value: split on hyphen/underscore, capitalize each
/// segment, join. A string that is already PascalCase is returned unchanged.
pub fn pascal_case(raw: &str) -> String {
    if pascal_re().is_match(raw) {
        return raw.to_string();
    }
    let joined: String = raw
        .split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect();
    if joined.is_empty() {
        // Empty or nothing but separators: capitalize what was written.
        capitalize(raw)
    } else {
        joined
    }
}

/// Normalize one raw literal value into an enum member under `policy`.
///
/// `None` is the unspecified policy: the key is pascal-cased, the value is
/// kept exactly as written.
pub fn normalize_member(raw: &str, policy: Option<CasingPolicy>) -> EnumMember {
    let (key, value) = match policy {
        Some(CasingPolicy::Value) => (raw.to_string(), raw.to_string()),
        Some(CasingPolicy::Upper) => {
            let cased = replace_illegal(raw).to_uppercase();
            (cased.clone(), cased)
        }
        Some(CasingPolicy::Lower) => {
            let cased = replace_illegal(raw).to_lowercase();
            (cased.clone(), cased)
        }
        Some(CasingPolicy::Pascal) => {
            let cased = pascal_case(raw);
            (cased.clone(), cased)
        }
        None => (pascal_case(raw), raw.to_string()),
    };
    let quoted_key = needs_quoting(&key);
    EnumMember {
        key,
        quoted_key,
        value,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
