//! Entry name normalization.
//!
//! Names in ZIP archives always use `/` as separator. Stripping leading
//! segments lets trees rooted at different directories line up, and the same
//! transform re-roots names when rendering.

/// Separator between an outer entry name and the names flattened out of it
/// when the entry is itself an archive (`lib.jar!Foo.class`).
pub const NESTED_SEPARATOR: char = '!';

/// Strip `count` leading `/`-separated segments from `name`.
///
/// Returns an empty string when `name` has fewer than `count` separators,
/// which callers treat as a collapsed root.
pub fn strip_prefix_segments(name: &str, count: usize) -> &str {
    let mut rest = name;
    for _ in 0..count {
        match rest.find('/') {
            Some(idx) => rest = &rest[idx + 1..],
            None => return "",
        }
    }
    rest
}

/// Prefix used for names flattened out of a nested archive entry.
pub fn nested_prefix(outer: &str) -> String {
    format!("{}{}", outer, NESTED_SEPARATOR)
}

/// Whether `name` refers to an entry inside a nested archive.
pub fn is_nested_name(name: &str) -> bool {
    name.contains(NESTED_SEPARATOR)
}
