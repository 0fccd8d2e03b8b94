//! Configuration lookup for the panel.
//!
//! Settings are read on demand rather than cached, so edits take effect on
//! the next refresh without a restart.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use devhq_todo_scanner::ScanConfig;
use tracing::warn;

use crate::error::{PanelError, Result};

/// Section holding the TODO scanner settings.
pub const TODO_SECTION: &str = "devhq.todo";

/// Folder names excluded from scanning (list).
pub const EXCLUDE_FOLDERS_KEY: &str = "excludeFolders";

/// Extensions excluded from scanning (list).
pub const EXCLUDE_EXTENSIONS_KEY: &str = "excludeExtensions";

/// Section holding the notes settings.
pub const NOTES_SECTION: &str = "devhq.notes";

/// Notes directory override (string, blank for the default).
pub const NOTES_FOLDER_KEY: &str = "folder";

/// Key/value configuration source.
pub trait Settings: Send + Sync {
    /// Look up a string value.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Look up a list of strings.
    fn get_list(&self, section: &str, key: &str) -> Option<Vec<String>>;
}

/// Build the scan configuration from current settings.
pub fn scan_config(settings: &dyn Settings) -> ScanConfig {
    ScanConfig {
        excluded_folders: settings
            .get_list(TODO_SECTION, EXCLUDE_FOLDERS_KEY)
            .unwrap_or_default(),
        excluded_extensions: settings
            .get_list(TODO_SECTION, EXCLUDE_EXTENSIONS_KEY)
            .unwrap_or_default(),
    }
}

/// The configured notes folder, empty when unset.
pub fn notes_folder(settings: &dyn Settings) -> String {
    settings
        .get_string(NOTES_SECTION, NOTES_FOLDER_KEY)
        .unwrap_or_default()
}

/// A single setting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// A string value.
    String(String),

    /// A list of strings.
    List(Vec<String>),
}

/// In-memory settings, changeable at runtime.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, SettingValue>>,
}

impl MemorySettings {
    /// Create empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    fn full_key(section: &str, key: &str) -> String {
        format!("{section}.{key}")
    }

    /// Set a value.
    pub fn set(&self, section: &str, key: &str, value: SettingValue) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(Self::full_key(section, key), value);
    }

    /// Set a string value (builder style).
    pub fn with_string(self, section: &str, key: &str, value: impl Into<String>) -> Self {
        self.set(section, key, SettingValue::String(value.into()));
        self
    }

    /// Set a list value (builder style).
    pub fn with_list<I, S>(self, section: &str, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = values.into_iter().map(Into::into).collect();
        self.set(section, key, SettingValue::List(list));
        self
    }

    fn get(&self, section: &str, key: &str) -> Option<SettingValue> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&Self::full_key(section, key))
            .cloned()
    }
}

impl Settings for MemorySettings {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        match self.get(section, key)? {
            SettingValue::String(value) => Some(value),
            SettingValue::List(_) => None,
        }
    }

    fn get_list(&self, section: &str, key: &str) -> Option<Vec<String>> {
        match self.get(section, key)? {
            SettingValue::List(values) => Some(values),
            SettingValue::String(_) => None,
        }
    }
}

/// Settings backed by a TOML file, re-read on every lookup.
///
/// Sections map to nested tables, so `devhq.todo` / `excludeFolders` reads
/// `[devhq.todo] excludeFolders = [...]`. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct TomlSettings {
    path: PathBuf,
}

impl TomlSettings {
    /// Create settings reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file.
    pub fn load(&self) -> Result<toml::Table> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(toml::Table::new()),
            Err(e) => return Err(e.into()),
        };

        content
            .parse::<toml::Table>()
            .map_err(|e| PanelError::Settings(format!("{}: {e}", self.path.display())))
    }

    fn lookup(&self, section: &str, key: &str) -> Option<toml::Value> {
        let table = match self.load() {
            Ok(table) => table,
            Err(e) => {
                warn!("Ignoring unreadable settings: {e}");
                return None;
            }
        };

        let mut current = &table;
        for part in section.split('.') {
            current = current.get(part)?.as_table()?;
        }
        current.get(key).cloned()
    }
}

impl Settings for TomlSettings {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.lookup(section, key)?.as_str().map(str::to_string)
    }

    fn get_list(&self, section: &str, key: &str) -> Option<Vec<String>> {
        let value = self.lookup(section, key)?;
        let items = value.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        )
    }
}
