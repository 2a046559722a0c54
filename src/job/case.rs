//! snake_case to camelCase key conversion
//!
//! Jenkins element names are camelCase (`defaultValue`, `allowEmptyArchive`)
//! while Rust field names are snake_case.

use crate::document::Tree;

/// Converts `allow_empty_archive` into `allowEmptyArchive`.
///
/// Leading underscores are dropped and already camelCased input is returned
/// unchanged.
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;

    for ch in name.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }

    out
}

/// Renames the top-level keys of `tree` to camelCase, keeping their order
#[must_use]
pub fn camel_case_keys(tree: Tree) -> Tree {
    tree.into_iter()
        .map(|(key, value)| (to_camel_case(&key), value))
        .collect()
}
