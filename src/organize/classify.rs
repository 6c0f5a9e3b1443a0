//! Classifier: maps a directory listing to destination batches.
//!
//! Pure transformation: no filesystem access. The only side effect is logging
//! through the dispatcher handed in by the caller.

use std::collections::btree_map::{self, BTreeMap};
use tracing::{debug, trace, Dispatch};

use crate::config::ExclusionSet;

/// One item of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirectoryEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Destination subdirectory name -> files to move there, in listing order.
///
/// Keys iterate in sorted order, so a given listing is always processed the
/// same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveTargets(BTreeMap<String, Vec<String>>);

impl MoveTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files queued for `destination`; `None` if the key is absent.
    pub fn get(&self, destination: &str) -> Option<&[String]> {
        self.0.get(destination).map(Vec::as_slice)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.0.iter()
    }

    /// Number of destination keys, including directories with nothing to receive.
    pub fn destination_count(&self) -> usize {
        self.0.len()
    }

    /// Total number of files queued across all destinations.
    pub fn file_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.file_count() == 0
    }

    /// Register `destination` without queueing anything for it.
    pub fn acknowledge(&mut self, destination: impl Into<String>) {
        self.0.entry(destination.into()).or_default();
    }

    /// Queue `file` for `destination`.
    pub fn push(&mut self, destination: impl Into<String>, file: impl Into<String>) {
        self.0.entry(destination.into()).or_default().push(file.into());
    }
}

impl<'a> IntoIterator for &'a MoveTargets {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K, V, F> FromIterator<(K, V)> for MoveTargets
where
    K: Into<String>,
    V: IntoIterator<Item = F>,
    F: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut targets = MoveTargets::new();
        for (dest, files) in iter {
            let dest = dest.into();
            targets.acknowledge(dest.clone());
            for f in files {
                targets.push(dest.clone(), f);
            }
        }
        targets
    }
}

/// Split `file_name` into its extension (last dot to end, dot included; empty
/// when there is no dot) and the destination subdirectory for that extension.
///
/// `report.pdf` -> (`.pdf`, `pdf_files`), `README` -> (``, `_files`),
/// `.bashrc` -> (`.bashrc`, `bashrc_files`).
pub fn extension_and_destination(file_name: &str) -> (&str, String) {
    let extension = file_name.rfind('.').map_or("", |i| &file_name[i..]);
    let stem = extension.strip_prefix('.').unwrap_or(extension);
    (extension, format!("{stem}_files"))
}

/// Build the move plan for a listing.
///
/// - Directories become destination keys (possibly with no files) and are
///   never moved themselves.
/// - Files whose extension is in `excluded` are dropped.
/// - Every other file is queued under its extension's destination.
pub fn classify(entries: &[DirectoryEntry], excluded: &ExclusionSet, log: &Dispatch) -> MoveTargets {
    tracing::dispatcher::with_default(log, || {
        let mut targets = MoveTargets::new();
        for entry in entries {
            if entry.is_dir {
                trace!(dir = %entry.name, "found dir to process");
                targets.acknowledge(entry.name.as_str());
                continue;
            }

            let (extension, destination) = extension_and_destination(&entry.name);
            if excluded.contains(extension) {
                debug!(file = %entry.name, extension, "excluded");
                continue;
            }
            targets.push(destination, entry.name.as_str());
        }
        debug!(
            destinations = targets.destination_count(),
            files = targets.file_count(),
            "classified listing"
        );
        targets
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(entries: &[DirectoryEntry], excluded: &[&str]) -> MoveTargets {
        let excluded: ExclusionSet = excluded.iter().copied().collect();
        classify(entries, &excluded, &Dispatch::none())
    }

    #[test]
    fn extension_rules() {
        let cases = [
            ("file.ext", ".ext", "ext_files"),
            ("noext", "", "_files"),
            (".onlyext", ".onlyext", "onlyext_files"),
            (".DS_Store", ".DS_Store", "DS_Store_files"),
            ("archive.tar.gz", ".gz", "gz_files"),
            ("trailing.", ".", "_files"),
        ];
        for (name, ext, dest) in cases {
            let (e, d) = extension_and_destination(name);
            assert_eq!(e, ext, "extension of {name}");
            assert_eq!(d, dest, "destination of {name}");
        }
    }

    #[test]
    fn listing_example() {
        let entries = [
            DirectoryEntry::file("report.pdf"),
            DirectoryEntry::file("image.png"),
            DirectoryEntry::file("image.png.bak"),
            DirectoryEntry::dir("archive"),
        ];
        let targets = run(&entries, &[".bak"]);

        let expected: MoveTargets = [
            ("pdf_files", vec!["report.pdf"]),
            ("png_files", vec!["image.png"]),
            ("archive", vec![]),
        ]
        .into_iter()
        .collect();
        assert_eq!(targets, expected);
    }

    #[test]
    fn directory_is_a_key_and_never_a_file() {
        let targets = run(&[DirectoryEntry::dir("subdir")], &[]);
        assert_eq!(targets.get("subdir"), Some(&[][..]));
        assert_eq!(targets.file_count(), 0);
        assert!(targets.is_empty());
        assert_eq!(targets.destination_count(), 1);
    }

    #[test]
    fn directory_named_like_a_destination_keeps_its_files() {
        let entries = [
            DirectoryEntry::file("a.txt"),
            DirectoryEntry::dir("txt_files"),
            DirectoryEntry::file("b.txt"),
        ];
        let targets = run(&entries, &[]);
        assert_eq!(
            targets.get("txt_files").unwrap(),
            ["a.txt".to_string(), "b.txt".to_string()]
        );
        assert_eq!(targets.destination_count(), 1);
    }

    #[test]
    fn excluded_file_is_dropped_entirely() {
        let targets = run(&[DirectoryEntry::file("file.tmp")], &[".tmp"]);
        assert_eq!(targets.destination_count(), 0);
    }

    #[test]
    fn exclusion_is_case_sensitive() {
        let targets = run(&[DirectoryEntry::file("photo.BAK")], &[".bak"]);
        assert_eq!(targets.get("BAK_files").unwrap(), ["photo.BAK".to_string()]);
    }

    #[test]
    fn preserves_listing_order_within_destination() {
        let entries: Vec<_> = ["c.txt", "a.txt", "b.txt"]
            .into_iter()
            .map(DirectoryEntry::file)
            .collect();
        let targets = run(&entries, &[]);
        assert_eq!(
            targets.get("txt_files").unwrap(),
            ["c.txt".to_string(), "a.txt".to_string(), "b.txt".to_string()]
        );
    }

    #[test]
    fn every_eligible_name_appears_exactly_once() {
        let entries = [
            DirectoryEntry::file("a.txt"),
            DirectoryEntry::file("b.md"),
            DirectoryEntry::file("README"),
            DirectoryEntry::file(".env"),
            DirectoryEntry::file("keep.part"),
            DirectoryEntry::dir("photos"),
        ];
        let targets = run(&entries, &[".part"]);

        let mut listed: Vec<&str> = targets
            .iter()
            .flat_map(|(_, files)| files.iter().map(String::as_str))
            .collect();
        listed.sort_unstable();
        assert_eq!(listed, [".env", "README", "a.txt", "b.md"]);
        for (name, dest) in [("a.txt", "txt_files"), ("README", "_files"), (".env", "env_files")] {
            assert!(targets.get(dest).unwrap().iter().any(|f| f == name));
        }
    }

    #[test]
    fn classification_is_repeatable_and_leaves_inputs_alone() {
        let entries = vec![
            DirectoryEntry::file("x.zip"),
            DirectoryEntry::dir("old"),
            DirectoryEntry::file("y.zip.bak"),
        ];
        let excluded: ExclusionSet = [".bak"].into_iter().collect();
        let entries_before = entries.clone();
        let excluded_before = excluded.clone();

        let first = classify(&entries, &excluded, &Dispatch::none());
        let second = classify(&entries, &excluded, &Dispatch::none());

        assert_eq!(first, second);
        assert_eq!(entries, entries_before);
        assert_eq!(excluded, excluded_before);
    }

    #[test]
    fn empty_listing_gives_empty_plan() {
        let targets = run(&[], &[".bak"]);
        assert_eq!(targets, MoveTargets::new());
    }
}
