//! Turning remote display names into unique path components.

use std::collections::HashSet;

/// Makes `name` usable as a single path component: no separators and none of
/// the names the path grammar reserves.
pub fn sanitize_component(name: &str) -> String {
    let cleaned = name.replace('/', "_");
    match cleaned.as_str() {
        "" | "." | ".." | "~" => format!("_{}", cleaned),
        _ => cleaned,
    }
}

/// Sanitizes `name` and suffixes ` (n)` until it is not in `taken`.
pub fn unique_component(name: &str, taken: &HashSet<String>) -> String {
    let base = sanitize_component(name);
    if !taken.contains(&base) {
        return base;
    }
    let mut n = 1usize;
    loop {
        let candidate = format!("{} ({})", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
