//! The note model.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File extension of every note.
pub const NOTE_EXTENSION: &str = ".md";

/// A note document on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// File name without the `.md` suffix.
    pub name: String,

    /// Full path to the note file.
    pub path: PathBuf,
}

impl Note {
    /// Build a note from a path, if its file name carries the note extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let file_name = path.file_name()?.to_str()?;
        let name = file_name.strip_suffix(NOTE_EXTENSION)?;

        Some(Self {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
    }
}
