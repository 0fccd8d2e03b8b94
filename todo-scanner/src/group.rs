//! Grouping of markers by file for tree presentation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::scanner::MarkerRecord;

/// All markers found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedFile {
    /// Full path to the file.
    pub file_path: PathBuf,

    /// Path relative to its scan root (first one seen for this file).
    pub relative_path: PathBuf,

    /// Markers sorted by line, ties in extraction order.
    pub markers: Vec<MarkerRecord>,
}

impl GroupedFile {
    /// Number of markers in the file.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the group holds no markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Partition markers by file.
///
/// Groups are ordered by their path string; markers within a group by line.
/// Sorting is stable, so markers sharing a line keep their offset order.
pub fn group(records: &[MarkerRecord]) -> Vec<GroupedFile> {
    let mut by_file: BTreeMap<String, GroupedFile> = BTreeMap::new();

    for record in records {
        by_file
            .entry(record.file_path.to_string_lossy().into_owned())
            .or_insert_with(|| GroupedFile {
                file_path: record.file_path.clone(),
                relative_path: record.relative_path.clone(),
                markers: Vec::new(),
            })
            .markers
            .push(record.clone());
    }

    by_file
        .into_values()
        .map(|mut file| {
            file.markers.sort_by_key(|m| m.line);
            file
        })
        .collect()
}
