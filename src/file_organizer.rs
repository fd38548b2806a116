//! Placement engine: moves classified files into their category folders.
//!
//! Consumes the buckets produced by classification. Category folders are
//! created lazily, destination names are resolved with a deterministic
//! duplicate counter, archives are unpacked in place of being moved, and a
//! failed extraction reroutes the untouched original into `other/`. Per-file
//! failures are collected and never abort the remaining work.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::archive;
use crate::file_category::{Buckets, Category};
use crate::normalize::normalize;

/// Errors that stop the run before or outside per-file processing.
#[derive(Debug)]
pub enum OrganizeError {
    /// The root path is missing or not a directory.
    InvalidRoot { path: PathBuf },
    /// The root directory could not be listed during discovery.
    ScanFailed { path: PathBuf, source: io::Error },
    /// The root directory could not be listed during cleanup.
    CleanupFailed { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot { path } => {
                write!(f, "not a directory: {}", path.display())
            }
            Self::ScanFailed { path, source } => {
                write!(f, "failed to search {}: {}", path.display(), source)
            }
            Self::CleanupFailed { path, source } => {
                write!(f, "failed to clean up {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Outcome of one placement pass over the buckets.
///
/// Failures carry the offending path and a human-readable reason; they are
/// reported by the caller and do not affect the process exit status.
#[derive(Debug, Default)]
pub struct PlacementReport {
    /// Files moved into a category folder.
    pub moved_files: usize,
    /// Archives successfully unpacked (original deleted).
    pub unpacked_archives: usize,
    /// Archives whose extraction failed, with the reason. Each was rerouted
    /// to `other/` unless the same path also shows up in `failed_moves`.
    pub failed_archives: Vec<(PathBuf, String)>,
    /// Files that could not be moved to their destination.
    pub failed_moves: Vec<(PathBuf, String)>,
}

impl PlacementReport {
    /// True when every file was placed without incident.
    pub fn is_clean(&self) -> bool {
        self.failed_archives.is_empty() && self.failed_moves.is_empty()
    }
}

/// Moves classified files into category subdirectories of a root.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Places every bucketed file under `root`, creating category folders as
    /// needed.
    ///
    /// Buckets are processed in fixed category order and files in bucket
    /// order, so duplicate numbering is reproducible. `progress` is advanced
    /// once per file when given.
    ///
    /// Only an invalid root is an error; everything that goes wrong for an
    /// individual file is recorded in the report and processing continues.
    pub fn place(
        root: &Path,
        buckets: &Buckets,
        progress: Option<&ProgressBar>,
    ) -> OrganizeResult<PlacementReport> {
        if !root.is_dir() {
            return Err(OrganizeError::InvalidRoot {
                path: root.to_path_buf(),
            });
        }

        let mut report = PlacementReport::default();
        for (category, files) in buckets.iter() {
            let target_dir = match Self::ensure_category_dir(root, category) {
                Ok(dir) => dir,
                Err(e) => {
                    // Fails this bucket's files; other buckets still run.
                    for file in files {
                        report.failed_moves.push((file.clone(), e.to_string()));
                        if let Some(bar) = progress {
                            bar.inc(1);
                        }
                    }
                    continue;
                }
            };

            for file in files {
                Self::place_file(root, &target_dir, category, file, &mut report);
                if let Some(bar) = progress {
                    bar.inc(1);
                }
            }
        }
        Ok(report)
    }

    /// Creates `root/<category>` if absent and returns its path. Reusing an
    /// existing folder is not an error.
    fn ensure_category_dir(root: &Path, category: Category) -> io::Result<PathBuf> {
        let dir = root.join(category.dir_name());
        if !dir.exists() {
            fs::create_dir(&dir)?;
        }
        Ok(dir)
    }

    /// Places a single file: move for regular categories, unpack-and-unlink
    /// for archives with the reroute fallback on failure.
    fn place_file(
        root: &Path,
        target_dir: &Path,
        category: Category,
        file: &Path,
        report: &mut PlacementReport,
    ) {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base = if category == Category::Other {
            stem
        } else {
            normalize(&stem)
        };
        // Archives become folders, so the probe runs without a suffix.
        let suffix = if category == Category::Archives {
            String::new()
        } else {
            extension_suffix(file)
        };
        let name = resolve_duplicate(target_dir, base, &suffix);

        if category == Category::Archives {
            let dest = target_dir.join(&name);
            match Self::unpack_and_remove(file, &dest) {
                Ok(()) => report.unpacked_archives += 1,
                Err(e) => {
                    // Don't leave half-written output under archives/ for a
                    // file that ends up in other/.
                    let _ = fs::remove_dir_all(&dest);
                    report.failed_archives.push((file.to_path_buf(), e.to_string()));
                    Self::reroute_to_other(root, file, report);
                }
            }
        } else {
            let dest = target_dir.join(format!("{name}{suffix}"));
            match fs::rename(file, &dest) {
                Ok(()) => report.moved_files += 1,
                Err(e) => report.failed_moves.push((
                    file.to_path_buf(),
                    format!("failed to move to {}: {}", dest.display(), e),
                )),
            }
        }
    }

    /// Unpacks an archive into `dest`, then deletes the original. A failed
    /// unlink counts as an extraction failure so the caller falls back.
    fn unpack_and_remove(file: &Path, dest: &Path) -> Result<(), archive::ExtractError> {
        archive::unpack(file, dest)?;
        fs::remove_file(file)?;
        Ok(())
    }

    /// Moves a failed archive, unrenamed, into `root/other/`.
    ///
    /// The fallback keeps the original filename including its extension and
    /// deliberately skips duplicate resolution; if `other/` already holds a
    /// same-named file the move is refused and recorded rather than
    /// overwriting.
    fn reroute_to_other(root: &Path, file: &Path, report: &mut PlacementReport) {
        let other_dir = match Self::ensure_category_dir(root, Category::Other) {
            Ok(dir) => dir,
            Err(e) => {
                report
                    .failed_moves
                    .push((file.to_path_buf(), e.to_string()));
                return;
            }
        };

        let Some(file_name) = file.file_name() else {
            report.failed_moves.push((
                file.to_path_buf(),
                "file has no name component".to_string(),
            ));
            return;
        };

        let dest = other_dir.join(file_name);
        if dest.exists() {
            report.failed_moves.push((
                file.to_path_buf(),
                format!("refusing to overwrite {}", dest.display()),
            ));
            return;
        }

        if let Err(e) = fs::rename(file, &dest) {
            report.failed_moves.push((
                file.to_path_buf(),
                format!("failed to move to {}: {}", dest.display(), e),
            ));
        }
    }
}

/// The file's extension with its leading dot, or empty for extensionless
/// names.
fn extension_suffix(file: &Path) -> String {
    file.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

/// Resolves a collision-free destination name by linear existence probing.
///
/// The first candidate is `base` itself. On the first collision `_1` is
/// appended; on every later collision the text after the last `_` is
/// rewritten with the next counter value, so `report` becomes `report_1`,
/// `report_2`, ... rather than `report_1_2`. The probe only consults
/// existence at the destination and never revisits a freed name.
fn resolve_duplicate(dir: &Path, base: String, suffix: &str) -> String {
    let mut name = base;
    let mut duplicate = 0u32;
    loop {
        if duplicate == 1 {
            name.push_str("_1");
        } else if duplicate > 1 {
            let cut = name.rfind('_').map_or(0, |i| i + 1);
            name.truncate(cut);
            name.push_str(&duplicate.to_string());
        }

        if dir.join(format!("{name}{suffix}")).exists() {
            duplicate += 1;
            continue;
        }
        break;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_category::classify;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        File::create(path).expect("failed to create test file");
    }

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_resolve_duplicate_first_candidate_is_base() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            resolve_duplicate(temp.path(), "report".to_string(), ".txt"),
            "report"
        );
    }

    #[test]
    fn test_resolve_duplicate_counter_sequence() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("report.txt"));
        assert_eq!(
            resolve_duplicate(temp.path(), "report".to_string(), ".txt"),
            "report_1"
        );

        touch(&temp.path().join("report_1.txt"));
        assert_eq!(
            resolve_duplicate(temp.path(), "report".to_string(), ".txt"),
            "report_2"
        );

        touch(&temp.path().join("report_2.txt"));
        assert_eq!(
            resolve_duplicate(temp.path(), "report".to_string(), ".txt"),
            "report_3"
        );
    }

    #[test]
    fn test_resolve_duplicate_rewrites_after_last_underscore() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("my_file.txt"));
        touch(&temp.path().join("my_file_1.txt"));
        // The counter replaces "1", not the "file" segment.
        assert_eq!(
            resolve_duplicate(temp.path(), "my_file".to_string(), ".txt"),
            "my_file_2"
        );
    }

    #[test]
    fn test_resolve_duplicate_without_suffix() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("bundle")).unwrap();
        assert_eq!(
            resolve_duplicate(temp.path(), "bundle".to_string(), ""),
            "bundle_1"
        );
    }

    #[test]
    fn test_place_moves_files_into_category_dirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("photo.jpg"));
        touch(&root.join("notes.txt"));

        let buckets = classify(vec![root.join("photo.jpg"), root.join("notes.txt")]);
        let report = FileOrganizer::place(root, &buckets, None).unwrap();

        assert_eq!(report.moved_files, 2);
        assert!(report.is_clean());
        assert!(root.join("images").join("photo.jpg").exists());
        assert!(root.join("documents").join("notes.txt").exists());
        assert!(!root.join("photo.jpg").exists());
    }

    #[test]
    fn test_place_normalizes_stems_outside_other() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("мій звіт.txt"));

        let buckets = classify(vec![root.join("мій звіт.txt")]);
        FileOrganizer::place(root, &buckets, None).unwrap();

        assert!(root.join("documents").join("miy_zvit.txt").exists());
    }

    #[test]
    fn test_place_keeps_raw_stem_for_other() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("дані.dat"));

        let buckets = classify(vec![root.join("дані.dat")]);
        FileOrganizer::place(root, &buckets, None).unwrap();

        // "other" skips normalization entirely.
        assert!(root.join("other").join("дані.dat").exists());
    }

    #[test]
    fn test_place_numbers_duplicates_in_bucket_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("documents")).unwrap();
        touch(&root.join("documents").join("a.txt"));

        touch(&root.join("a.txt"));
        fs::create_dir(root.join("sub")).unwrap();
        touch(&root.join("sub").join("a.txt"));

        let buckets = classify(vec![root.join("a.txt"), root.join("sub").join("a.txt")]);
        let report = FileOrganizer::place(root, &buckets, None).unwrap();

        assert_eq!(report.moved_files, 2);
        assert!(root.join("documents").join("a.txt").exists());
        assert!(root.join("documents").join("a_1.txt").exists());
        assert!(root.join("documents").join("a_2.txt").exists());
    }

    #[test]
    fn test_place_unpacks_archive_and_removes_original() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let archive = root.join("bundle.zip");
        write_zip(&archive, &[("inner.txt", "hello")]);

        let buckets = classify(vec![archive.clone()]);
        let report = FileOrganizer::place(root, &buckets, None).unwrap();

        assert_eq!(report.unpacked_archives, 1);
        assert!(report.is_clean());
        assert!(!archive.exists());
        assert!(root.join("archives").join("bundle").join("inner.txt").exists());
    }

    #[test]
    fn test_place_reroutes_corrupt_archive_to_other() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let archive = root.join("broken.zip");
        fs::write(&archive, b"not really a zip").unwrap();

        let buckets = classify(vec![archive.clone()]);
        let report = FileOrganizer::place(root, &buckets, None).unwrap();

        assert_eq!(report.failed_archives.len(), 1);
        assert_eq!(report.failed_archives[0].0, archive);
        // Original name and extension survive the reroute.
        assert!(root.join("other").join("broken.zip").exists());
        assert!(!archive.exists());
        // Nothing half-extracted is left behind.
        assert!(!root.join("archives").join("broken").exists());
    }

    #[test]
    fn test_reroute_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("other")).unwrap();
        fs::write(root.join("other").join("broken.zip"), b"already here").unwrap();

        let archive = root.join("broken.zip");
        fs::write(&archive, b"not really a zip").unwrap();

        let buckets = classify(vec![archive.clone()]);
        let report = FileOrganizer::place(root, &buckets, None).unwrap();

        assert_eq!(report.failed_archives.len(), 1);
        assert_eq!(report.failed_moves.len(), 1);
        // The source file stays put; the existing file is untouched.
        assert!(archive.exists());
        assert_eq!(
            fs::read(root.join("other").join("broken.zip")).unwrap(),
            b"already here"
        );
    }

    #[test]
    fn test_place_reuses_existing_category_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("images")).unwrap();
        touch(&root.join("photo.png"));

        let buckets = classify(vec![root.join("photo.png")]);
        let report = FileOrganizer::place(root, &buckets, None).unwrap();

        assert_eq!(report.moved_files, 1);
        assert!(root.join("images").join("photo.png").exists());
    }

    #[test]
    fn test_place_invalid_root() {
        let buckets = classify(Vec::new());
        let result = FileOrganizer::place(Path::new("/nonexistent/dirsort-root"), &buckets, None);
        assert!(matches!(result, Err(OrganizeError::InvalidRoot { .. })));
    }

    #[test]
    fn test_missing_source_file_is_recorded_not_fatal() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("real.txt"));

        let buckets = classify(vec![root.join("ghost.txt"), root.join("real.txt")]);
        let report = FileOrganizer::place(root, &buckets, None).unwrap();

        assert_eq!(report.moved_files, 1);
        assert_eq!(report.failed_moves.len(), 1);
        assert!(root.join("documents").join("real.txt").exists());
    }
}
