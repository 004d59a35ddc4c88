use std::path::{Path, PathBuf};

use crate::error::Error;

/// Suffix of the files considered as Go sources
pub const SOURCE_SUFFIX: &str = ".go";

/// Text that marks the file holding the entry point
pub const ENTRY_POINT_MARKER: &str = "func main()";

/// Finds the first Go file of `dir` that contains [`ENTRY_POINT_MARKER`].
///
/// Only the top level of `dir` is scanned, in the order returned by the filesystem.
/// This is a substring search, so a marker inside a comment or a string literal also matches.
/// Files that cannot be read are skipped.
pub fn find_main_file(dir: &Path) -> Result<PathBuf, Error> {
    let entries = std::fs::read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry in `{}`: {e}", dir.display());
                continue;
            }
        };

        if !entry.file_name().to_string_lossy().ends_with(SOURCE_SUFFIX) {
            continue;
        }
        if entry.file_type().is_ok_and(|file_type| file_type.is_dir()) {
            continue;
        }

        let path = entry.path();
        let content = match std::fs::read(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Skipping `{}`: {e}", path.display());
                continue;
            }
        };

        if contains(&content, ENTRY_POINT_MARKER.as_bytes()) {
            tracing::debug!("Entry point found in `{}`", path.display());
            return Ok(path);
        }
    }

    Err(Error::NoMainFile {
        path: dir.to_path_buf(),
    })
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}
