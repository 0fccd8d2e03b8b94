//! Decides which files and folders take part in a scan.

use std::collections::HashSet;
use std::path::Path;

use crate::config::{SCANNABLE_EXTENSIONS, ScanConfig};

/// Normalize an extension to lowercase with a leading dot.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// The `.ext` suffix of a path, lowercased. `None` for extensionless files.
fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Check whether a file should be scanned.
///
/// `excluded_extensions` must already be normalized (see
/// [`normalize_extension`]). Exclusion wins over the allow-list.
pub fn is_scannable(path: &Path, excluded_extensions: &HashSet<String>) -> bool {
    let Some(ext) = dotted_extension(path) else {
        return false;
    };

    if excluded_extensions.contains(&ext) {
        return false;
    }

    SCANNABLE_EXTENSIONS.contains(&ext.as_str())
}

/// Applies the folder and extension rules of a [`ScanConfig`].
#[derive(Debug, Clone)]
pub struct FileClassifier {
    ignored_folders: HashSet<String>,
    ignored_extensions: HashSet<String>,
}

impl FileClassifier {
    /// Build a classifier from a scan configuration.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            ignored_folders: config.ignored_folders(),
            ignored_extensions: config.ignored_extensions(),
        }
    }

    /// Check if an entry with this bare name is skipped entirely.
    ///
    /// Hidden entries and ignored folder names are pruned.
    pub fn is_excluded_name(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignored_folders.contains(name)
    }

    /// Check if a file should be read for markers.
    pub fn is_scannable(&self, path: &Path) -> bool {
        is_scannable(path, &self.ignored_extensions)
    }
}
