//! Dotted path construction.
//!
//! Indexed paths only ever contain object keys. Search hits and image
//! locations additionally mark array membership with `[i]`, which is
//! informative only and never resolved back.

/// Append an object key to a dotted path
#[must_use]
pub fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Append an array position marker to a path
#[must_use]
pub fn join_index(prefix: &str, index: usize) -> String {
    format!("{prefix}[{index}]")
}
