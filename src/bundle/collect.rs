//! Deterministic collection of (logical name, digest) entries.
//!
//! Filesystem listing order is never trusted: logical names go through a
//! `BTreeMap`, which iterates in byte-wise ascending order, and files are
//! hashed in that order. Same directory contents always collect to the
//! same entry list.

use crate::bundle::scan::{list_entries, FileEntry};
use crate::digest::{file_digest, tagged_digest};
use crate::error::BundleError;
use crate::manifest::ResourceEntry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// What to do when a single file's digest cannot be computed.
///
/// Directory-level enumeration failures always abort the run; this policy
/// only governs per-file read failures during hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashErrorPolicy {
    /// Emit the entry with the bare algorithm tag and no hex digest.
    SkipWithEmptyDigest,
    /// Fail the whole collection on the first unreadable file.
    Abort,
}

/// Collect one category directory into a name-sorted entry list.
///
/// Logical names are derived by `name_fn` and mapped back to their actual
/// paths; entries are emitted in ascending name order regardless of how
/// the filesystem listed them. Filenames are unique within a directory,
/// so logical names cannot collide. Directories nested inside a category
/// directory are skipped.
pub fn collect<F>(
    dir: &Path,
    name_fn: F,
    policy: HashErrorPolicy,
) -> Result<Vec<ResourceEntry>, BundleError>
where
    F: Fn(&FileEntry) -> String,
{
    let mut by_name: BTreeMap<String, PathBuf> = BTreeMap::new();
    for entry in list_entries(dir)? {
        if entry.is_dir {
            continue;
        }
        by_name.insert(name_fn(&entry), entry.path.clone());
    }

    let mut entries = Vec::with_capacity(by_name.len());
    for (name, path) in by_name {
        let digest = match file_digest(&path) {
            Ok(hex) => tagged_digest(&hex),
            Err(e) => match policy {
                HashErrorPolicy::Abort => return Err(e),
                HashErrorPolicy::SkipWithEmptyDigest => {
                    warn!("digest failed for {}: {}", path.display(), e);
                    tagged_digest("")
                }
            },
        };
        entries.push(ResourceEntry { name, digest });
    }
    Ok(entries)
}

/// Name derivation for categories keyed by bare filename: strip a fixed
/// suffix when present, keep the name as-is otherwise.
pub fn strip_suffix_name(suffix: &str) -> impl Fn(&FileEntry) -> String + '_ {
    move |entry| match entry.name.strip_suffix(suffix) {
        Some(stripped) => stripped.to_string(),
        None => entry.name.clone(),
    }
}
