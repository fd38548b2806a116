//! Archive unpacking.
//!
//! Extracts ZIP, TAR and gzip-compressed TAR archives into a destination
//! directory. Extraction is the one recoverable operation in the sorting
//! pipeline: any failure here is surfaced as a typed error so the placement
//! engine can reroute the original file instead of aborting the run.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use flate2::read::GzDecoder;

/// Errors raised while unpacking an archive.
#[derive(Debug)]
pub enum ExtractError {
    /// The file's extension names no supported archive format.
    UnsupportedFormat { extension: String },
    /// The archive exists but cannot be parsed as its claimed format.
    Malformed { reason: String },
    /// An I/O failure while reading the archive or writing its contents.
    Io { source: io::Error },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { extension } => {
                write!(f, "unsupported archive format: .{}", extension)
            }
            Self::Malformed { reason } => write!(f, "malformed archive: {}", reason),
            Self::Io { source } => write!(f, "archive I/O error: {}", source),
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<io::Error> for ExtractError {
    fn from(source: io::Error) -> Self {
        Self::Io { source }
    }
}

/// Unpacks `archive` into the directory `dest`, creating it if needed.
///
/// The format is chosen by the archive's extension: `zip` is read as a ZIP
/// archive, `tar` as a plain tarball, and `gz` as a gzip-compressed tarball.
/// A bare gzip file that is not a tarball fails tar parsing and is reported
/// as malformed; the caller decides what to do with the original.
///
/// `dest` may be left holding partially extracted entries when extraction
/// fails midway; callers that care must remove it themselves.
pub fn unpack(archive: &Path, dest: &Path) -> Result<(), ExtractError> {
    let extension = archive
        .extension()
        .map(|e| e.to_string_lossy().to_uppercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ZIP" => unpack_zip(archive, dest),
        "TAR" => unpack_tar(archive, dest),
        "GZ" => unpack_tar_gz(archive, dest),
        _ => Err(ExtractError::UnsupportedFormat {
            extension: extension.to_lowercase(),
        }),
    }
}

fn unpack_zip(archive: &Path, dest: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| ExtractError::Malformed {
        reason: e.to_string(),
    })?;
    std::fs::create_dir_all(dest)?;
    zip.extract(dest).map_err(|e| ExtractError::Malformed {
        reason: e.to_string(),
    })
}

fn unpack_tar(archive: &Path, dest: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive)?;
    std::fs::create_dir_all(dest)?;
    tar::Archive::new(file).unpack(dest)?;
    Ok(())
}

fn unpack_tar_gz(archive: &Path, dest: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive)?;
    std::fs::create_dir_all(dest)?;
    tar::Archive::new(GzDecoder::new(file)).unpack(dest)?;
    Ok(())
}
