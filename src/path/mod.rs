mod error;

pub use error::{PathError, PathResult};

use memchr::memchr;

/// Splits a dotted route name into its leading label and the remainder.
pub fn parse_name(name: &str) -> PathResult<(&str, Option<&str>)> {
    if name.is_empty() {
        return Err(PathError::EmptyName);
    }
    match memchr(b'.', name.as_bytes()) {
        Some(idx) => {
            let (label, rest) = (&name[..idx], &name[idx + 1..]);
            if label.is_empty() || rest.is_empty() {
                return Err(PathError::EmptyLabel {
                    name: name.to_string(),
                });
            }
            Ok((label, Some(rest)))
        }
        None => Ok((name, None)),
    }
}

/// Joins an accumulated dotted path with the next hop label.
pub fn join_hops(base: &str, label: &str) -> String {
    if base.is_empty() {
        label.to_string()
    } else {
        format!("{base}.{label}")
    }
}

/// Splits a relative URI path into its first segment and the remainder.
pub fn split_segment(path: &str) -> (&str, &str) {
    match memchr(b'/', path.as_bytes()) {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => (path, ""),
    }
}

/// Strips `prefix` segments from the front of a relative path, honoring
/// segment boundaries. Returns the remainder without its leading slash.
pub fn strip_segments<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        return Some("");
    }
    rest.strip_prefix('/')
}
