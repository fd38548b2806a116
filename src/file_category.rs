//! File categorization for extension-based sorting.
//!
//! Maps file extensions to one of six fixed categories and partitions
//! discovered files into per-category buckets. The extension table is a
//! closed constant; there is no content sniffing and no way to extend the
//! table at runtime.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One of the six fixed sorting categories.
///
/// Every category except [`Category::Other`] owns a set of recognized
/// extensions; `Other` is the fallback for unmatched files and the reroute
/// target for failed archive extractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Images,
    Video,
    Documents,
    Audio,
    Archives,
    Other,
}

impl Category {
    /// All categories, in the order buckets are processed and reported.
    pub const ALL: [Category; 6] = [
        Category::Images,
        Category::Video,
        Category::Documents,
        Category::Audio,
        Category::Archives,
        Category::Other,
    ];

    /// Categories with an extension set, in classification lookup order.
    /// First match wins.
    const CLASSIFIED: [Category; 5] = [
        Category::Images,
        Category::Video,
        Category::Documents,
        Category::Audio,
        Category::Archives,
    ];

    /// Returns the destination directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "images");
    /// assert_eq!(Category::Video.dir_name(), "video");
    /// assert_eq!(Category::Other.dir_name(), "other");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Video => "video",
            Category::Documents => "documents",
            Category::Audio => "audio",
            Category::Archives => "archives",
            Category::Other => "other",
        }
    }

    /// Recognized extensions for this category, uppercased, without the dot.
    /// `Other` has no extension set.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Images => &["JPEG", "PNG", "JPG", "SVG"],
            Category::Video => &["AVI", "MP4", "MOV", "MKV"],
            Category::Documents => &["DOC", "DOCX", "TXT", "PDF", "XLSX", "PPTX"],
            Category::Audio => &["MP3", "OGG", "WAV", "AMR"],
            Category::Archives => &["ZIP", "GZ", "TAR"],
            Category::Other => &[],
        }
    }

    /// Looks up a category by its directory name.
    ///
    /// Used by the walker to protect top-level category folders from
    /// re-discovery and by cleanup to decide which root entries survive.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::Category;
    ///
    /// assert_eq!(Category::from_dir_name("audio"), Some(Category::Audio));
    /// assert_eq!(Category::from_dir_name("Audio"), None);
    /// assert_eq!(Category::from_dir_name("old_stuff"), None);
    /// ```
    pub fn from_dir_name(name: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.dir_name() == name)
    }

    /// Classifies a single path by its extension.
    ///
    /// The extension is compared uppercased against each category's set in
    /// declaration order; no extension or no match yields `Other`.
    pub fn of_path(path: &Path) -> Category {
        let Some(ext) = path.extension() else {
            return Category::Other;
        };
        let ext = ext.to_string_lossy().to_uppercase();
        Category::CLASSIFIED
            .iter()
            .copied()
            .find(|c| c.extensions().contains(&ext.as_str()))
            .unwrap_or(Category::Other)
    }
}

/// Files partitioned by category, in discovery order within each bucket.
///
/// A category is only present if at least one file was assigned to it;
/// iteration visits the present buckets in [`Category::ALL`] order so that
/// placement and reporting are deterministic.
#[derive(Debug, Default)]
pub struct Buckets {
    by_category: HashMap<Category, Vec<PathBuf>>,
}

impl Buckets {
    /// Appends a file to a category's bucket, materializing it on first use.
    fn push(&mut self, category: Category, path: PathBuf) {
        self.by_category.entry(category).or_default().push(path);
    }

    /// Returns the bucket for a category, or `None` if no file was assigned.
    pub fn get(&self, category: Category) -> Option<&[PathBuf]> {
        self.by_category.get(&category).map(Vec::as_slice)
    }

    /// Iterates the non-empty buckets in fixed category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[PathBuf])> {
        Category::ALL
            .iter()
            .filter_map(|c| self.by_category.get(c).map(|files| (*c, files.as_slice())))
    }

    /// Total number of files across all buckets.
    pub fn total_files(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    /// True when no file was assigned to any category.
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

/// Partitions discovered files into per-category buckets.
///
/// Pure with respect to the filesystem: only the path text is inspected.
/// Every input path lands in exactly one bucket, in input order.
pub fn classify(files: Vec<PathBuf>) -> Buckets {
    let mut buckets = Buckets::default();
    for file in files {
        let category = Category::of_path(&file);
        buckets.push(category, file);
    }
    buckets
}
