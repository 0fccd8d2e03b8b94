//! Recursive marker scanning over workspace roots.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::classifier::FileClassifier;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::extractor::{MarkerExtractor, MarkerKind};

/// A marker discovered in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRecord {
    /// Unique within a scan: `file:line:offset`.
    pub id: String,

    /// The marker keyword.
    pub kind: MarkerKind,

    /// Trimmed trailing text, possibly empty.
    pub text: String,

    /// Full path to the file.
    pub file_path: PathBuf,

    /// Path relative to the scan root that contained the file.
    pub relative_path: PathBuf,

    /// Zero-based line index.
    pub line: usize,

    /// Byte offset of the marker within the line.
    pub column: usize,
}

impl MarkerRecord {
    fn new(
        kind: MarkerKind,
        text: String,
        file_path: &Path,
        relative_path: &Path,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            id: format!("{}:{line}:{column}", file_path.display()),
            kind,
            text,
            file_path: file_path.to_path_buf(),
            relative_path: relative_path.to_path_buf(),
            line,
            column,
        }
    }
}

/// Result of a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Markers in visit order.
    pub markers: Vec<MarkerRecord>,

    /// Counters for the scan.
    pub stats: ScanStats,
}

/// Statistics about a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanStats {
    /// Number of roots walked.
    pub roots: usize,

    /// Number of files read.
    pub files_scanned: usize,

    /// Number of markers found.
    pub markers_found: usize,

    /// Entries that could not be read and were skipped.
    pub skipped: usize,

    /// Time taken in milliseconds.
    pub duration_ms: u64,

    /// When the scan finished.
    pub completed_at: DateTime<Utc>,
}

/// Walks workspace roots and extracts markers from source files.
#[derive(Debug, Clone)]
pub struct Scanner {
    classifier: FileClassifier,
    extractor: MarkerExtractor,
}

impl Scanner {
    /// Create a scanner for the given configuration.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        Ok(Self {
            classifier: FileClassifier::new(config),
            extractor: MarkerExtractor::new()?,
        })
    }

    /// Scan every root and collect markers.
    ///
    /// Results from multiple roots are concatenated in root order. Anything
    /// that cannot be read is skipped; the scan itself never fails.
    pub fn scan(&self, roots: &[PathBuf]) -> ScanResult {
        let start = Instant::now();
        let mut markers = Vec::new();
        let mut files_scanned = 0;
        let mut skipped = 0;

        for root in roots {
            let root = &absolute_root(root);
            let walker = WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_entry(|entry| !self.is_pruned(entry));

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        debug!("Skipping unreadable entry under {}: {e}", root.display());
                        skipped += 1;
                        continue;
                    }
                };

                if !entry.file_type().is_file() || !self.classifier.is_scannable(entry.path()) {
                    continue;
                }

                match self.scan_file(root, entry.path()) {
                    Some(found) => {
                        files_scanned += 1;
                        markers.extend(found);
                    }
                    None => skipped += 1,
                }
            }
        }

        let duration = start.elapsed();
        let stats = ScanStats {
            roots: roots.len(),
            files_scanned,
            markers_found: markers.len(),
            skipped,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            completed_at: Utc::now(),
        };

        info!(
            "Scanned {} files in {:?} ({} markers, {} skipped)",
            stats.files_scanned, duration, stats.markers_found, stats.skipped
        );

        ScanResult { markers, stats }
    }

    /// Roots are always walked; below them hidden and ignored names are pruned.
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && self
                .classifier
                .is_excluded_name(&entry.file_name().to_string_lossy())
    }

    /// Extract markers from one file. `None` if the file cannot be read.
    fn scan_file(&self, root: &Path, path: &Path) -> Option<Vec<MarkerRecord>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Skipping unreadable file {}: {e}", path.display());
                return None;
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        let relative = path.strip_prefix(root).unwrap_or(path);

        let records = content
            .lines()
            .enumerate()
            .flat_map(|(line, text)| {
                self.extractor.extract(text).into_iter().map(move |m| {
                    MarkerRecord::new(m.kind, m.text, path, relative, line, m.offset)
                })
            })
            .collect();

        Some(records)
    }
}

/// Roots are walked in absolute form so every marker path is absolute.
fn absolute_root(root: &Path) -> PathBuf {
    std::path::absolute(root).unwrap_or_else(|e| {
        debug!("Cannot make {} absolute: {e}", root.display());
        root.to_path_buf()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn scan(dir: &Path, config: &ScanConfig) -> ScanResult {
        Scanner::new(config).unwrap().scan(&[dir.to_path_buf()])
    }

    #[test]
    fn test_relative_root_yields_absolute_paths() {
        let temp_dir = TempDir::new_in(".").unwrap();
        fs::write(temp_dir.path().join("a.ts"), "// TODO: here").unwrap();
        let relative = Path::new(".").join(temp_dir.path().file_name().unwrap());
        let absolute = std::path::absolute(&relative).unwrap();
        assert!(relative.is_relative());

        let result = Scanner::new(&ScanConfig::new())
            .unwrap()
            .scan(&[relative, absolute.clone()]);

        assert_eq!(result.markers.len(), 2);
        for marker in &result.markers {
            assert!(marker.file_path.is_absolute());
            assert_eq!(marker.file_path, absolute.join("a.ts"));
            assert_eq!(marker.relative_path, Path::new("a.ts"));
            assert!(marker.id.starts_with(&absolute.join("a.ts").display().to_string()));
        }
        assert_eq!(crate::group::group(&result.markers).len(), 1);
    }

    #[test]
    fn test_scan_finds_markers_in_file_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut f = File::create(temp_dir.path().join("a.ts")).unwrap();
        writeln!(f, "// TODO: first").unwrap();
        writeln!(f, "// FIXME: second").unwrap();

        let result = scan(temp_dir.path(), &ScanConfig::new());
        let lines: Vec<_> = result.markers.iter().map(|m| m.line).collect();
        let kinds: Vec<_> = result.markers.iter().map(|m| m.kind).collect();

        assert_eq!(lines, vec![0, 1]);
        assert_eq!(kinds, vec![MarkerKind::Todo, MarkerKind::Fixme]);
        assert_eq!(result.markers[0].relative_path, Path::new("a.ts"));
        assert_eq!(result.stats.files_scanned, 1);
    }

    #[test]
    fn test_ids_unique_on_same_line() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("test.ts"), "// TODO: first TODO: second").unwrap();

        let result = scan(temp_dir.path(), &ScanConfig::new());
        assert_eq!(result.markers.len(), 2);
        assert_ne!(result.markers[0].id, result.markers[1].id);
    }

    #[test]
    fn test_crlf_lines() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("w.cs"), "// TODO: one\r\n// TODO: two\r\n").unwrap();

        let result = scan(temp_dir.path(), &ScanConfig::new());
        let texts: Vec<_> = result.markers.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_hidden_and_builtin_folders_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        for dir in [".git", "node_modules", "dist", "out", "src"] {
            fs::create_dir(temp_dir.path().join(dir)).unwrap();
            fs::write(temp_dir.path().join(dir).join("x.js"), "// TODO: here").unwrap();
        }

        let result = scan(temp_dir.path(), &ScanConfig::new());
        assert_eq!(result.markers.len(), 1);
        assert_eq!(result.markers[0].relative_path, Path::new("src").join("x.js"));
    }

    #[test]
    fn test_non_source_files_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.md"), "TODO: not code").unwrap();
        fs::write(temp_dir.path().join("Makefile"), "# TODO: no extension").unwrap();

        let result = scan(temp_dir.path(), &ScanConfig::new());
        assert!(result.markers.is_empty());
        assert_eq!(result.stats.files_scanned, 0);
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let result = scan(&missing, &ScanConfig::new());
        assert!(result.markers.is_empty());
        assert_eq!(result.stats.skipped, 1);
    }

    #[test]
    fn test_no_roots() {
        let scanner = Scanner::new(&ScanConfig::new()).unwrap();
        let result = scanner.scan(&[]);

        assert!(result.markers.is_empty());
        assert_eq!(result.stats.roots, 0);
    }
}
