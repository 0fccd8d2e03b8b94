//! Wiring of the two views over shared settings and host capabilities.

use std::path::PathBuf;
use std::sync::Arc;

use devhq_notes::{NoteOpener, NotesStore, resolve_notes_dir};
use tracing::{info, warn};

use crate::notes_tree::NotesTreeProvider;
use crate::settings::{MemorySettings, Settings, notes_folder};
use crate::todo_tree::TodoTreeProvider;
use crate::ui::Prompter;

/// The TODO tree and the notes list of one session.
pub struct Panel {
    todos: TodoTreeProvider,
    notes: NotesTreeProvider,
}

impl Panel {
    /// Start building a panel around the host's capabilities.
    pub fn builder(opener: Arc<dyn NoteOpener>, prompter: Arc<dyn Prompter>) -> PanelBuilder {
        PanelBuilder::new(opener, prompter)
    }

    /// The TODO tree.
    pub fn todos(&self) -> &TodoTreeProvider {
        &self.todos
    }

    /// The notes list.
    pub fn notes(&self) -> &NotesTreeProvider {
        &self.notes
    }

    /// The notes store.
    pub fn notes_store(&self) -> &Arc<NotesStore> {
        self.notes.store()
    }
}

/// Builder for [`Panel`].
pub struct PanelBuilder {
    roots: Vec<PathBuf>,
    settings: Option<Arc<dyn Settings>>,
    notes_dir: Option<PathBuf>,
    opener: Arc<dyn NoteOpener>,
    prompter: Arc<dyn Prompter>,
}

impl PanelBuilder {
    /// Create a builder with no roots and empty settings.
    pub fn new(opener: Arc<dyn NoteOpener>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            roots: Vec::new(),
            settings: None,
            notes_dir: None,
            opener,
            prompter,
        }
    }

    /// Add a workspace root to scan.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Add several workspace roots.
    pub fn with_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots.extend(roots.into_iter().map(Into::into));
        self
    }

    /// Set the settings source.
    pub fn with_settings(mut self, settings: Arc<dyn Settings>) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Use `dir` for notes instead of the configured folder.
    pub fn with_notes_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.notes_dir = Some(dir.into());
        self
    }

    /// Build the panel.
    ///
    /// The notes directory is resolved once here and kept for the session.
    /// Failing to create it is logged; listing then shows no notes.
    pub async fn build(self) -> Panel {
        let settings = self
            .settings
            .unwrap_or_else(|| Arc::new(MemorySettings::new()));

        let notes_dir = self
            .notes_dir
            .unwrap_or_else(|| resolve_notes_dir(&notes_folder(settings.as_ref())));
        let store = Arc::new(NotesStore::new(notes_dir, self.opener));
        if let Err(e) = store.ensure_directory().await {
            warn!("Notes directory unavailable: {e}");
        }

        info!(
            "Panel ready: {} root(s), notes in {}",
            self.roots.len(),
            store.directory().display()
        );

        Panel {
            todos: TodoTreeProvider::new(self.roots, settings),
            notes: NotesTreeProvider::new(store, self.prompter),
        }
    }
}
