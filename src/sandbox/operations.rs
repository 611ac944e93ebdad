//! Sandbox operations

use std::path::{Path, PathBuf};

use crate::error::PathError;

/// Resolves a relative, possibly multi-segment path against the current
/// directory and enforces that the result stays inside `root`.
///
/// Segments may be separated by `/` or `\`. A `..` segment moves to the
/// parent of the running directory and is rejected if that parent falls
/// outside `root`; any other segment must name an existing directory.
/// Containment is a component-wise path-prefix test, never a string
/// comparison.
///
/// All-or-nothing: on error the caller's current directory must not change,
/// which holds because the running path here is a local copy and the result
/// is only assigned from `Ok`.
pub fn resolve(current: &Path, root: &Path, relative: &str) -> Result<PathBuf, PathError> {
    let mut dir = current.to_path_buf();

    for segment in relative.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => {
                let parent = dir
                    .parent()
                    .ok_or_else(|| PathError::EscapesRoot(relative.to_string()))?;
                if !parent.starts_with(root) {
                    return Err(PathError::EscapesRoot(relative.to_string()));
                }
                dir = parent.to_path_buf();
            }
            name => {
                let next = dir.join(name);
                if !next.is_dir() {
                    return Err(PathError::NotADirectory(name.to_string()));
                }
                dir = next;
            }
        }
    }

    Ok(dir)
}

/// Joins a file name onto the current directory for file operations
/// (RETR/STOR/DELE/XMKD). No existence check; callers check.
pub fn full_path(current: &Path, name: &str) -> PathBuf {
    current.join(name)
}
