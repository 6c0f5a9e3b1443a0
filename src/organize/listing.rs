//! One-shot snapshot of the source directory's top level.

use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

use super::classify::DirectoryEntry;
use crate::errors::OrganizeError;

/// List the immediate children of `dir`.
///
/// Any failure to read the directory is fatal for the run. Symlinks are not
/// followed when deciding `is_dir`, so a link to a directory is moved like a
/// file. Names that are not valid UTF-8 are skipped with a warning.
pub fn list_source_dir(dir: &Path) -> Result<Vec<DirectoryEntry>, OrganizeError> {
    let list_err = |source: io::Error| OrganizeError::ListSource {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let file_type = entry.file_type().map_err(list_err)?;
        match entry.file_name().into_string() {
            Ok(name) => entries.push(DirectoryEntry {
                name,
                is_dir: file_type.is_dir(),
            }),
            Err(raw) => warn!(name = ?raw, "skipping entry with non UTF-8 name"),
        }
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
