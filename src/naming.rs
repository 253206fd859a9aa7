//! Entry name generation
//!
//! Derives a registry entry name from the owning element's tag and keeps it
//! collision-free against the entries already present.

use std::collections::HashSet;

/// Generate a unique entry name for `tag` against the `existing` names.
///
/// `Text` becomes `text`; when taken, `text1`, `text2`, ... until free.
/// Deterministic for a given registry state, so re-running after one
/// extraction always picks a fresh name.
pub fn generate_name(tag: &str, existing: &HashSet<String>) -> String {
    let mut chars = tag.chars();
    let base: String = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => "element".to_string(),
    };

    if !existing.contains(&base) {
        return base;
    }

    let mut counter = 1usize;
    loop {
        let candidate = format!("{}{}", base, counter);
        if !existing.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
