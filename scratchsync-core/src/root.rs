//! Shared-root detection.
//!
//! The root is the longest *literal* prefix common to every path. Trimming
//! works character by character, so the root can end in the middle of a
//! directory name (`/music/Orb` for `/music/Orb/x` and `/music/Orbital/y`).
//! Keys are produced by stripping the root by character offset on both the
//! source and the target side, which keeps the two consistent.

use crate::error::CoreError;

/// Longest common literal prefix of `paths`.
///
/// Returns [`CoreError::EmptyInput`] when `paths` yields nothing.
pub fn resolve<I, S>(paths: I) -> Result<String, CoreError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut paths = paths.into_iter();
    let first = paths.next().ok_or(CoreError::EmptyInput)?;
    let mut root = first.as_ref().to_owned();

    for path in paths {
        let path = path.as_ref();
        if path.starts_with(root.as_str()) {
            continue;
        }
        tracing::debug!(key = path, base = %root, "key doesn't start with base, shrinking it");
        while !path.starts_with(root.as_str()) {
            root.pop();
        }
    }

    Ok(root)
}

/// Strip `root` from the front of `path`.
///
/// Falls back to the whole path if `root` is not a prefix, which cannot
/// happen for a root produced by [`resolve`] over a set containing `path`.
pub fn relative<'a>(path: &'a str, root: &str) -> &'a str {
    path.strip_prefix(root).unwrap_or(path)
}
