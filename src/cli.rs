//! Command-line interface.
//!
//! Argument parsing, root validation and the run orchestration:
//! discovery → classification → placement → cleanup, with all console
//! reporting in between. The sorting core stays silent; this module turns
//! its reports into output.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cleanup;
use crate::file_category::classify;
use crate::file_organizer::{FileOrganizer, OrganizeError, OrganizeResult};
use crate::output::{Reporter, plural};
use crate::scan;

/// Sort a directory's files into category subfolders.
#[derive(Debug, Parser)]
#[command(name = "dirsort", version)]
pub struct Cli {
    /// Directory to sort.
    pub directory: PathBuf,
}

/// Validates the root path, returning it on success.
///
/// Kept separate from [`run`] so the process-exit decision stays with the
/// outermost caller.
pub fn validate_root(path: &Path) -> OrganizeResult<&Path> {
    if path.is_dir() {
        Ok(path)
    } else {
        Err(OrganizeError::InvalidRoot {
            path: path.to_path_buf(),
        })
    }
}

/// Runs one full sorting pass over `root`.
///
/// Per-file failures during placement and cleanup are reported to the
/// console but do not produce an `Err`; only an invalid or unreadable root
/// does. Cleanup runs even when discovery finds nothing, so stray root
/// entries are pruned either way.
pub fn run(root: &Path) -> OrganizeResult<()> {
    let root = validate_root(root)?;

    Reporter::info(&format!("Searching for files in {}...", root.display()));
    let files = scan::scan(root).map_err(|e| OrganizeError::ScanFailed {
        path: root.to_path_buf(),
        source: e,
    })?;

    if files.is_empty() {
        Reporter::warning("No files found to sort");
    } else {
        Reporter::info(&format!("Found {} {}", files.len(), plural(files.len())));

        let buckets = classify(files);
        for (category, bucket) in buckets.iter() {
            Reporter::category_count(category.dir_name(), bucket.len());
        }

        let bar = Reporter::progress_bar(buckets.total_files() as u64);
        let report = FileOrganizer::place(root, &buckets, Some(&bar))?;
        bar.finish_and_clear();

        for (archive, reason) in &report.failed_archives {
            Reporter::warning(&format!(
                "Failed to extract {}: {}",
                archive.display(),
                reason
            ));
        }
        for (path, reason) in &report.failed_moves {
            Reporter::error(&format!("Could not place {}: {}", path.display(), reason));
        }

        Reporter::success(&format!(
            "Sorted {} {}, unpacked {} {}",
            report.moved_files,
            plural(report.moved_files),
            report.unpacked_archives,
            if report.unpacked_archives == 1 {
                "archive"
            } else {
                "archives"
            }
        ));
    }

    let swept = cleanup::cleanup(root)?;
    for (path, reason) in &swept.failed {
        Reporter::error(&format!("Could not remove {}: {}", path.display(), reason));
    }
    if !swept.removed.is_empty() {
        Reporter::info(&format!(
            "Removed {} leftover {}",
            swept.removed.len(),
            if swept.removed.len() == 1 {
                "entry"
            } else {
                "entries"
            }
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_validate_root_accepts_directory() {
        let temp = TempDir::new().unwrap();
        assert!(validate_root(temp.path()).is_ok());
    }

    #[test]
    fn test_validate_root_rejects_missing_path() {
        let result = validate_root(Path::new("/nonexistent/dirsort-root"));
        assert!(matches!(result, Err(OrganizeError::InvalidRoot { .. })));
    }

    #[test]
    fn test_validate_root_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not_a_dir.txt");
        File::create(&file).unwrap();

        let result = validate_root(&file);
        assert!(matches!(result, Err(OrganizeError::InvalidRoot { .. })));
    }

    #[test]
    fn test_run_on_empty_directory_succeeds() {
        let temp = TempDir::new().unwrap();
        assert!(run(temp.path()).is_ok());
    }
}
