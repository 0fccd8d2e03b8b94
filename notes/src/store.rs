//! Notes storage on the local file system.
//!
//! The `NotesStore` owns one notes directory for the lifetime of a session.
//! Every note is a single markdown file named after its sanitized title.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::error::{NotesError, Result, StorageError};
use crate::note::{NOTE_EXTENSION, Note};
use crate::opener::NoteOpener;
use crate::title::sanitize_title;

/// Default notes location: `~/Documents/DevHQ-Notes`.
pub fn default_notes_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("DevHQ-Notes")
}

/// Resolve the notes directory from a configured value.
///
/// A blank value selects [`default_notes_dir`]; anything else is made
/// absolute against the current directory.
pub fn resolve_notes_dir(configured: &str) -> PathBuf {
    let configured = configured.trim();
    if configured.is_empty() {
        return default_notes_dir();
    }

    std::path::absolute(configured).unwrap_or_else(|_| PathBuf::from(configured))
}

/// Write the heading of a freshly created note at `path`.
///
/// On failure the file is removed again, so a later `create` writes the
/// heading instead of opening an empty note.
async fn write_new_note<W>(path: &Path, mut file: W, title: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        file.write_all(format!("# {title}\n\n").as_bytes()).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        if let Err(remove_err) = fs::remove_file(path).await {
            debug!("Cannot remove partial note {}: {remove_err}", path.display());
        }
        return Err(StorageError::WriteFile(format!("{}: {e}", path.display())).into());
    }
    Ok(())
}

/// Storage backend for notes.
pub struct NotesStore {
    /// Directory holding the note files.
    dir: PathBuf,

    /// Host capability used to show notes.
    opener: Arc<dyn NoteOpener>,
}

impl NotesStore {
    /// Create a store over `dir`. Nothing is touched on disk.
    pub fn new(dir: impl Into<PathBuf>, opener: Arc<dyn NoteOpener>) -> Self {
        Self {
            dir: dir.into(),
            opener,
        }
    }

    /// The notes directory.
    pub fn directory(&self) -> &Path {
        &self.dir
    }

    /// Create the notes directory if it doesn't exist.
    pub async fn ensure_directory(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::CreateDirectory(format!("{}: {e}", self.dir.display())))?;
        Ok(())
    }

    /// Get the file path for a title.
    fn note_path(&self, title: &str) -> Result<PathBuf> {
        let stem = sanitize_title(title);
        if stem.is_empty() {
            return Err(NotesError::InvalidTitle(title.to_string()));
        }
        Ok(self.dir.join(format!("{stem}{NOTE_EXTENSION}")))
    }

    /// List all notes, sorted by name.
    ///
    /// An unreadable directory yields an empty list.
    pub async fn list(&self) -> Vec<Note> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot read notes directory {}: {e}", self.dir.display());
                return Vec::new();
            }
        };

        let mut notes = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    debug!("Stopped listing {}: {e}", self.dir.display());
                    break;
                }
            };

            let path = entry.path();
            let Some(note) = Note::from_path(&path) else {
                continue;
            };
            let is_file = fs::metadata(&path).await.is_ok_and(|m| m.is_file());
            if is_file {
                notes.push(note);
            }
        }

        notes.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Listed {} notes", notes.len());
        notes
    }

    /// Create a note for `title` and open it.
    ///
    /// An existing note with the same sanitized title is opened untouched.
    /// New notes start with a heading holding the title as typed.
    pub async fn create(&self, title: &str) -> Result<PathBuf> {
        let path = self.note_path(title)?;

        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => {
                write_new_note(&path, file, title).await?;
                info!("Created note: {}", path.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                debug!("Note already exists: {}", path.display());
            }
            Err(e) => {
                return Err(StorageError::WriteFile(format!("{}: {e}", path.display())).into());
            }
        }

        self.open(&path).await?;
        Ok(path)
    }

    /// Rename a note to a new title, returning its new path.
    pub async fn rename(&self, path: &Path, new_title: &str) -> Result<PathBuf> {
        let target = self.note_path(new_title)?;

        fs::rename(path, &target).await.map_err(|e| {
            StorageError::RenameFile(format!("{} -> {}: {e}", path.display(), target.display()))
        })?;

        info!("Renamed note: {} -> {}", path.display(), target.display());
        Ok(target)
    }

    /// Delete a note.
    pub async fn delete(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)
            .await
            .map_err(|e| StorageError::DeleteFile(format!("{}: {e}", path.display())))?;

        info!("Deleted note: {}", path.display());
        Ok(())
    }

    /// Show a note through the host.
    pub async fn open(&self, path: &Path) -> Result<()> {
        self.opener
            .open(path)
            .await
            .map_err(|e| StorageError::Open(format!("{}: {e}", path.display())))?;
        Ok(())
    }

    /// Reveal the notes directory through the host.
    pub async fn reveal(&self) -> Result<()> {
        self.opener
            .reveal(&self.dir)
            .await
            .map_err(|e| StorageError::Open(format!("{}: {e}", self.dir.display())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::task::{Context as TaskContext, Poll};
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Mutex<Vec<PathBuf>>,
    }

    #[async_trait]
    impl NoteOpener for RecordingOpener {
        async fn open(&self, path: &Path) -> std::io::Result<()> {
            self.opened.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }

        async fn reveal(&self, _dir: &Path) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn store(dir: &Path) -> (NotesStore, Arc<RecordingOpener>) {
        let opener = Arc::new(RecordingOpener::default());
        (NotesStore::new(dir, opener.clone()), opener)
    }

    #[tokio::test]
    async fn test_create_sanitizes_name_and_keeps_heading() {
        let temp_dir = TempDir::new().unwrap();
        let (store, opener) = store(temp_dir.path());

        let path = store.create("My Note:1").await.unwrap();

        assert_eq!(path, temp_dir.path().join("My Note1.md"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "# My Note:1\n\n");
        assert_eq!(*opener.opened.lock().unwrap(), vec![path]);
    }

    struct FailingWriter;

    impl AsyncWrite for FailingWriter {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut TaskContext<'_>,
            _buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::Error::other("disk full")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: Pin<&mut Self>,
            _cx: &mut TaskContext<'_>,
        ) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_failed_heading_write_leaves_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let (store, _) = store(temp_dir.path());
        let path = temp_dir.path().join("Plan.md");
        std::fs::write(&path, "").unwrap();

        let result = write_new_note(&path, FailingWriter, "Plan").await;

        assert!(matches!(
            result,
            Err(NotesError::Storage(StorageError::WriteFile(_)))
        ));
        assert!(!path.exists());

        store.create("Plan").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Plan\n\n");
    }

    #[tokio::test]
    async fn test_create_existing_note_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let (store, opener) = store(temp_dir.path());
        let existing = temp_dir.path().join("Plan.md");
        std::fs::write(&existing, "keep me").unwrap();

        let path = store.create("Plan").await.unwrap();

        assert_eq!(path, existing);
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep me");
        assert_eq!(opener.opened.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_title_without_usable_characters() {
        let temp_dir = TempDir::new().unwrap();
        let (store, opener) = store(temp_dir.path());

        let result = store.create("///").await;

        assert!(matches!(result, Err(NotesError::InvalidTitle(_))));
        assert!(opener.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_in_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let (store, _) = store(&temp_dir.path().join("missing"));

        let result = store.create("Note").await;
        assert!(matches!(
            result,
            Err(NotesError::Storage(StorageError::WriteFile(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_only_markdown_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("b.md"), "").unwrap();
        std::fs::write(temp_dir.path().join("a.md"), "").unwrap();
        std::fs::write(temp_dir.path().join("c.txt"), "").unwrap();
        std::fs::create_dir(temp_dir.path().join("folder.md")).unwrap();
        let (store, _) = store(temp_dir.path());

        let names: Vec<_> = store.list().await.into_iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_list_unreadable_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let (store, _) = store(&temp_dir.path().join("missing"));

        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_rename() {
        let temp_dir = TempDir::new().unwrap();
        let (store, _) = store(temp_dir.path());
        let original = store.create("Draft").await.unwrap();

        let renamed = store.rename(&original, "Final: v2").await.unwrap();

        assert_eq!(renamed, temp_dir.path().join("Final v2.md"));
        assert!(!original.exists());
        assert!(renamed.exists());
    }

    #[tokio::test]
    async fn test_rename_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let (store, _) = store(temp_dir.path());

        let result = store
            .rename(&temp_dir.path().join("ghost.md"), "Anything")
            .await;
        assert!(matches!(
            result,
            Err(NotesError::Storage(StorageError::RenameFile(_)))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let (store, _) = store(temp_dir.path());
        let path = store.create("Scratch").await.unwrap();

        store.delete(&path).await.unwrap();
        assert!(!path.exists());

        let again = store.delete(&path).await;
        assert!(matches!(
            again,
            Err(NotesError::Storage(StorageError::DeleteFile(_)))
        ));
    }

    #[tokio::test]
    async fn test_ensure_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let (store, _) = store(&nested);

        store.ensure_directory().await.unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.directory(), nested.as_path());
    }

    #[test]
    fn test_resolve_notes_dir() {
        assert_eq!(resolve_notes_dir("   "), default_notes_dir());
        assert_eq!(resolve_notes_dir(" /srv/notes "), PathBuf::from("/srv/notes"));
        assert!(resolve_notes_dir("relative/notes").is_absolute());
    }
}
