//! TODO tree: files at the root, markers below each file.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use devhq_todo_scanner::{GroupedFile, MarkerKind, MarkerRecord, Scanner, group};
use tokio::sync::broadcast;

use crate::error::Result;
use crate::refresh::{Loader, RefreshController, RefreshOutcome};
use crate::settings::{Settings, scan_config};
use crate::tree::{Icon, TreeDataProvider, TreeItem};

/// Scans the workspace roots and groups the markers by file.
pub struct TodoLoader {
    roots: Vec<PathBuf>,
    settings: Arc<dyn Settings>,
}

impl TodoLoader {
    /// Create a loader over `roots`.
    pub fn new(roots: Vec<PathBuf>, settings: Arc<dyn Settings>) -> Self {
        Self { roots, settings }
    }

    /// The workspace roots.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

#[async_trait]
impl Loader for TodoLoader {
    type Item = GroupedFile;

    async fn load(&self) -> Result<Vec<GroupedFile>> {
        // Settings are read per scan so exclusion edits apply on the next refresh.
        let scanner = Scanner::new(&scan_config(self.settings.as_ref()))?;
        let roots = self.roots.clone();

        let result = tokio::task::spawn_blocking(move || scanner.scan(&roots)).await?;
        Ok(group(&result.markers))
    }
}

/// A node of the TODO tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoNode {
    /// A file containing markers.
    File {
        /// Full path to the file.
        file_path: PathBuf,
        /// Path relative to its scan root.
        relative_path: PathBuf,
        /// Number of markers in the file.
        count: usize,
    },

    /// A single marker.
    Marker(MarkerRecord),
}

impl From<&GroupedFile> for TodoNode {
    fn from(file: &GroupedFile) -> Self {
        Self::File {
            file_path: file.file_path.clone(),
            relative_path: file.relative_path.clone(),
            count: file.len(),
        }
    }
}

/// Tree provider for workspace markers.
pub struct TodoTreeProvider {
    controller: RefreshController<TodoLoader>,
}

impl TodoTreeProvider {
    /// Create a provider scanning `roots`.
    pub fn new(roots: Vec<PathBuf>, settings: Arc<dyn Settings>) -> Self {
        Self {
            controller: RefreshController::new("todos", TodoLoader::new(roots, settings)),
        }
    }

    /// The underlying refresh controller.
    pub fn controller(&self) -> &RefreshController<TodoLoader> {
        &self.controller
    }

    /// Rescan if needed; `force` rescans even when a snapshot exists.
    pub async fn refresh(&self, force: bool) -> Result<RefreshOutcome> {
        self.controller.refresh(force).await
    }

    /// The view became visible.
    pub async fn on_visible(&self) -> Result<RefreshOutcome> {
        self.refresh(true).await
    }

    /// Grouped markers from the latest scan, scanning first if needed.
    pub async fn files(&self) -> Result<Arc<Vec<GroupedFile>>> {
        self.controller.snapshot().await
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[async_trait]
impl TreeDataProvider for TodoTreeProvider {
    type Node = TodoNode;

    async fn children(&self, parent: Option<&TodoNode>) -> Result<Vec<TodoNode>> {
        let files = self.files().await?;

        let nodes: Vec<TodoNode> = match parent {
            None => files.iter().map(TodoNode::from).collect(),
            Some(TodoNode::File { file_path, .. }) => files
                .iter()
                .find(|file| &file.file_path == file_path)
                .map(|file| file.markers.iter().cloned().map(TodoNode::Marker).collect())
                .unwrap_or_default(),
            Some(TodoNode::Marker(_)) => Vec::new(),
        };

        Ok(nodes)
    }

    fn tree_item(&self, node: &TodoNode) -> TreeItem {
        match node {
            TodoNode::File {
                relative_path,
                count,
                ..
            } => TreeItem::new(relative_path.display().to_string(), Icon::File)
                .with_description(format!("{count} item{}", plural(*count)))
                .collapsible(),
            TodoNode::Marker(marker) => {
                let line = marker.line + 1;
                let icon = match marker.kind {
                    MarkerKind::Fixme => Icon::Warning,
                    MarkerKind::Todo => Icon::Checklist,
                };
                TreeItem::new(marker.text.clone(), icon)
                    .with_description(format!("{} — line {line}", marker.kind))
                    .with_tooltip(format!(
                        "**{}** {}\n\n{}:{line}",
                        marker.kind,
                        marker.text,
                        marker.relative_path.display()
                    ))
                    .opens(marker.file_path.clone(), Some(marker.line))
            }
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.controller.subscribe()
    }
}
