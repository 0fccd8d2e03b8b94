//! Notes list and the commands acting on it.
//!
//! Command failures never propagate to the host: the detail is logged and
//! the user sees a short generic notice.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use devhq_notes::{Note, NotesStore, validate_title};
use tokio::sync::broadcast;
use tracing::warn;

use crate::error::{PanelError, Result};
use crate::refresh::{Loader, RefreshController, RefreshOutcome};
use crate::tree::{Icon, TreeDataProvider, TreeItem};
use crate::ui::{InputRequest, Prompter};

const CREATE_FAILED: &str = "Failed to create note";
const RENAME_FAILED: &str = "Failed to rename note";
const DELETE_FAILED: &str = "Failed to delete note";
const OPEN_FOLDER_FAILED: &str = "Failed to open notes folder";

/// Lists the notes directory.
pub struct NotesLoader {
    store: Arc<NotesStore>,
}

impl NotesLoader {
    /// Create a loader over `store`.
    pub fn new(store: Arc<NotesStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Loader for NotesLoader {
    type Item = Note;

    async fn load(&self) -> Result<Vec<Note>> {
        Ok(self.store.list().await)
    }
}

/// Tree provider and command handler for notes.
pub struct NotesTreeProvider {
    store: Arc<NotesStore>,
    prompter: Arc<dyn Prompter>,
    controller: RefreshController<NotesLoader>,
}

impl NotesTreeProvider {
    /// Create a provider over `store`, asking the user through `prompter`.
    pub fn new(store: Arc<NotesStore>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            controller: RefreshController::new("notes", NotesLoader::new(Arc::clone(&store))),
            store,
            prompter,
        }
    }

    /// The notes store.
    pub fn store(&self) -> &Arc<NotesStore> {
        &self.store
    }

    /// The underlying refresh controller.
    pub fn controller(&self) -> &RefreshController<NotesLoader> {
        &self.controller
    }

    /// Re-list if needed; `force` re-lists even when a snapshot exists.
    pub async fn refresh(&self, force: bool) -> Result<RefreshOutcome> {
        self.controller.refresh(force).await
    }

    /// The view became visible.
    pub async fn on_visible(&self) -> Result<RefreshOutcome> {
        self.refresh(true).await
    }

    /// Notes from the latest listing, listing first if needed.
    pub async fn notes(&self) -> Result<Arc<Vec<Note>>> {
        self.controller.snapshot().await
    }

    async fn report(&self, message: &str, action: &str, error: impl std::fmt::Display) {
        warn!("{action} failed: {error}");
        self.prompter.show_error(message).await;
    }

    /// Ask for a title, create the note and open it.
    ///
    /// Returns the note path, or `None` when cancelled or failed.
    pub async fn create_note(&self) -> Option<PathBuf> {
        let request = InputRequest::new("New note title")
            .with_placeholder("e.g. Release plan")
            .with_validator(validate_title);
        let title = self.prompter.input(request).await?;
        if validate_title(&title).is_some() {
            return None;
        }

        let result = async {
            let path = self.store.create(&title).await?;
            self.refresh(true).await?;
            Ok::<_, PanelError>(path)
        }
        .await;

        match result {
            Ok(path) => Some(path),
            Err(e) => {
                self.report(CREATE_FAILED, "Create note", e).await;
                None
            }
        }
    }

    /// Ask for a new title, rename the note and open it.
    ///
    /// Cancelling or keeping the same title does nothing.
    pub async fn rename_note(&self, note: &Note) -> Option<PathBuf> {
        let request = InputRequest::new("Rename note")
            .with_value(note.name.clone())
            .with_validator(validate_title);
        let title = self.prompter.input(request).await?;
        if title == note.name || validate_title(&title).is_some() {
            return None;
        }

        let result = async {
            let target = self.store.rename(&note.path, &title).await?;
            self.refresh(true).await?;
            self.store.open(&target).await?;
            Ok::<_, PanelError>(target)
        }
        .await;

        match result {
            Ok(target) => Some(target),
            Err(e) => {
                self.report(RENAME_FAILED, "Rename note", e).await;
                None
            }
        }
    }

    /// Confirm, then delete the note. True if it was deleted.
    pub async fn delete_note(&self, note: &Note) -> bool {
        let message = format!("Delete note \"{}\"?", note.name);
        if !self.prompter.confirm(&message, "Delete").await {
            return false;
        }

        let result = async {
            self.store.delete(&note.path).await?;
            self.refresh(true).await?;
            Ok::<_, PanelError>(())
        }
        .await;

        match result {
            Ok(()) => true,
            Err(e) => {
                self.report(DELETE_FAILED, "Delete note", e).await;
                false
            }
        }
    }

    /// Open a note.
    pub async fn open_note(&self, note: &Note) -> Result<()> {
        self.store.open(&note.path).await?;
        Ok(())
    }

    /// Reveal the notes directory in the host.
    pub async fn open_notes_folder(&self) -> bool {
        match self.store.reveal().await {
            Ok(()) => true,
            Err(e) => {
                self.report(OPEN_FOLDER_FAILED, "Open notes folder", e).await;
                false
            }
        }
    }
}

#[async_trait]
impl TreeDataProvider for NotesTreeProvider {
    type Node = Note;

    async fn children(&self, parent: Option<&Note>) -> Result<Vec<Note>> {
        if parent.is_some() {
            return Ok(Vec::new());
        }
        Ok(self.notes().await?.as_ref().clone())
    }

    fn tree_item(&self, note: &Note) -> TreeItem {
        TreeItem::new(note.name.clone(), Icon::File).opens(note.path.clone(), None)
    }

    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.controller.subscribe()
    }
}
