//! Integration tests for a notes session on a real directory.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use devhq_notes::{NoteOpener, NotesStore, resolve_notes_dir};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingOpener {
    opened: Mutex<Vec<PathBuf>>,
    revealed: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl NoteOpener for RecordingOpener {
    async fn open(&self, path: &Path) -> std::io::Result<()> {
        self.opened.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn reveal(&self, dir: &Path) -> std::io::Result<()> {
        self.revealed.lock().unwrap().push(dir.to_path_buf());
        Ok(())
    }
}

#[tokio::test]
async fn test_note_lifecycle_in_configured_directory() {
    let temp_dir = TempDir::new().unwrap();
    let configured = temp_dir.path().join("nested").join("notes");
    let dir = resolve_notes_dir(configured.to_str().unwrap());
    assert_eq!(dir, configured);

    let opener = Arc::new(RecordingOpener::default());
    let store = NotesStore::new(&dir, opener.clone());
    store.ensure_directory().await.unwrap();
    assert!(dir.is_dir());

    let plan = store.create("Release plan").await.unwrap();
    let ideas = store.create("  ideas   for  v3 ").await.unwrap();
    let names: Vec<_> = store.list().await.into_iter().map(|n| n.name).collect();
    assert_eq!(names, vec!["Release plan", "ideas for v3"]);

    let renamed = store.rename(&ideas, "Backlog").await.unwrap();
    store.delete(&plan).await.unwrap();
    let notes = store.list().await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].name, "Backlog");
    assert_eq!(notes[0].path, renamed);
    assert_eq!(
        std::fs::read_to_string(&renamed).unwrap(),
        "#   ideas   for  v3 \n\n"
    );

    store.reveal().await.unwrap();
    assert_eq!(*opener.opened.lock().unwrap(), vec![plan, ideas]);
    assert_eq!(*opener.revealed.lock().unwrap(), vec![dir]);
}

#[tokio::test]
async fn test_blank_setting_uses_default_directory() {
    assert_eq!(resolve_notes_dir("   "), devhq_notes::default_notes_dir());
    assert!(
        devhq_notes::default_notes_dir().ends_with(Path::new("Documents").join("DevHQ-Notes"))
    );
}
