//! Hierarchical view model consumed by the host UI.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::Result;

/// Icon shown next to a tree item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// A file.
    File,

    /// A TODO marker.
    Checklist,

    /// A FIXME marker.
    Warning,
}

/// Where activating an item should navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTarget {
    /// File to open.
    pub path: PathBuf,

    /// Zero-based line to reveal, if any.
    pub line: Option<usize>,
}

/// Display data for one node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    /// Main label.
    pub label: String,

    /// Secondary text.
    pub description: Option<String>,

    /// Markdown tooltip.
    pub tooltip: Option<String>,

    /// Icon.
    pub icon: Icon,

    /// Whether the node has children (shown collapsed).
    pub collapsible: bool,

    /// Navigation on activation.
    pub open: Option<OpenTarget>,
}

impl TreeItem {
    /// A leaf item with just a label and icon.
    pub fn new(label: impl Into<String>, icon: Icon) -> Self {
        Self {
            label: label.into(),
            description: None,
            tooltip: None,
            icon,
            collapsible: false,
            open: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the tooltip.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Mark the item as having children.
    pub fn collapsible(mut self) -> Self {
        self.collapsible = true;
        self
    }

    /// Navigate to a file (and optionally a line) on activation.
    pub fn opens(mut self, path: impl Into<PathBuf>, line: Option<usize>) -> Self {
        self.open = Some(OpenTarget {
            path: path.into(),
            line,
        });
        self
    }
}

/// Data source for a tree view.
///
/// The host asks for root nodes with `children(None)` and expands nodes
/// with `children(Some(node))`, re-rendering whenever a change
/// notification arrives.
#[async_trait]
pub trait TreeDataProvider: Send + Sync {
    /// Node type of this tree.
    type Node: Clone + Send + Sync;

    /// Child nodes of `parent`, or the roots when `parent` is `None`.
    async fn children(&self, parent: Option<&Self::Node>) -> Result<Vec<Self::Node>>;

    /// Display data for a node.
    fn tree_item(&self, node: &Self::Node) -> TreeItem;

    /// Subscribe to change notifications.
    fn subscribe(&self) -> broadcast::Receiver<()>;
}
