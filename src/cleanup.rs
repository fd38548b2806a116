//! Post-placement root sweep.
//!
//! After placement every sortable file lives under a category folder, so
//! anything else left directly under the root is residue: emptied source
//! directories, stray folders, dotfiles. The sweep removes all of it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::file_category::Category;
use crate::file_organizer::{OrganizeError, OrganizeResult};

/// What the sweep removed and what it could not.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Root entries that were deleted.
    pub removed: Vec<PathBuf>,
    /// Entries that resisted deletion, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

/// Removes every direct child of `root` whose name is not a category name.
///
/// Directories are deleted recursively, everything else (files, symlinks)
/// individually. The name check is exact: a dotfile is not a category name,
/// so it is deleted too. This is destructive and assumes placement already
/// ran; per-entry failures are recorded and the sweep continues.
pub fn cleanup(root: &Path) -> OrganizeResult<CleanupReport> {
    let entries = fs::read_dir(root).map_err(|e| OrganizeError::CleanupFailed {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut report = CleanupReport::default();
    for entry in entries.flatten() {
        let name = entry.file_name();
        if Category::from_dir_name(&name.to_string_lossy()).is_some() {
            continue;
        }

        let path = entry.path();
        // Decide by the entry's own type so a symlink is unlinked instead of
        // deleted through its target.
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let outcome = if is_dir {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        match outcome {
            Ok(()) => report.removed.push(path),
            Err(e) => report.failed.push((path, e.to_string())),
        }
    }
    Ok(report)
}
