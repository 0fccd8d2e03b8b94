//! Configuration types for marker scanning.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::classifier::normalize_extension;

/// Folder names that are never descended into, regardless of configuration.
pub const BUILTIN_IGNORED_FOLDERS: &[&str] = &["node_modules", "dist", "out"];

/// Extensions (lowercase, with leading dot) that are eligible for scanning.
pub const SCANNABLE_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".js", ".jsx", ".py", ".java", ".cpp", ".c", ".cs", ".go", ".rs", ".php",
    ".rb", ".swift",
];

/// User-configurable exclusions for a scan.
///
/// A fresh `ScanConfig` is built from settings at the start of every scan so
/// that configuration changes apply on the next refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Additional folder names to skip.
    pub excluded_folders: Vec<String>,

    /// File extensions to skip, with or without the leading dot.
    pub excluded_extensions: Vec<String>,
}

impl ScanConfig {
    /// Create a config with no user exclusions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a folder name to exclude.
    pub fn exclude_folder(mut self, name: impl Into<String>) -> Self {
        self.excluded_folders.push(name.into());
        self
    }

    /// Add an extension to exclude.
    pub fn exclude_extension(mut self, ext: impl Into<String>) -> Self {
        self.excluded_extensions.push(ext.into());
        self
    }

    /// Built-in ignored folders merged with the configured ones.
    pub fn ignored_folders(&self) -> HashSet<String> {
        BUILTIN_IGNORED_FOLDERS
            .iter()
            .map(|name| (*name).to_string())
            .chain(self.excluded_folders.iter().cloned())
            .collect()
    }

    /// Configured extension exclusions, normalized to `.ext` lowercase.
    pub fn ignored_extensions(&self) -> HashSet<String> {
        self.excluded_extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtins_always_apply() {
        let config = ScanConfig::new().exclude_folder("generated");
        let folders = config.ignored_folders();

        assert!(folders.contains("node_modules"));
        assert!(folders.contains("dist"));
        assert!(folders.contains("out"));
        assert!(folders.contains("generated"));
        assert_eq!(folders.len(), 4);
    }

    #[test]
    fn test_duplicate_folders_are_merged() {
        let config = ScanConfig::new().exclude_folder("dist");
        assert_eq!(config.ignored_folders().len(), 3);
    }

    #[test]
    fn test_extensions_are_normalized() {
        let config = ScanConfig::new()
            .exclude_extension("JS")
            .exclude_extension(".Tsx");
        let exts = config.ignored_extensions();

        assert!(exts.contains(".js"));
        assert!(exts.contains(".tsx"));
        assert_eq!(exts.len(), 2);
    }
}
