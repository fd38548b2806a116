//! Recursive file discovery.
//!
//! Walks a root directory and collects every regular file that is eligible
//! for sorting. Hidden entries are never visited, and top-level folders named
//! after a category are left alone so that a second run does not re-sort its
//! own output.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::file_category::Category;

/// Recursively collects the files to sort under `root`.
///
/// Rules, applied per entry:
/// - names starting with `.` are skipped entirely, files and directories alike;
/// - a directory named exactly after a category is skipped at the top level
///   only; deeper directories that happen to share a category name are
///   walked like any other;
/// - every other directory is recursed into;
/// - regular files are collected.
///
/// Directory listings are sorted by file name before processing, so discovery
/// order (and with it duplicate numbering during placement) is deterministic
/// across runs and platforms. Symlinks are followed when deciding whether an
/// entry is a directory.
pub fn scan(root: &Path) -> io::Result<Vec<PathBuf>> {
    collect(root, true)
}

fn collect(dir: &Path, skip_category_dirs: bool) -> io::Result<Vec<PathBuf>> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<io::Result<_>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut files = Vec::new();
    for entry in entries {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            if skip_category_dirs && Category::from_dir_name(&name).is_some() {
                continue;
            }
            // Only the top level protects category folders.
            files.extend(collect(&path, false)?);
        } else {
            files.push(path);
        }
    }
    Ok(files)
}
