//! Host capability for showing notes to the user.

use std::path::Path;

use async_trait::async_trait;

/// Opens notes and the notes folder in the host environment.
#[async_trait]
pub trait NoteOpener: Send + Sync {
    /// Show a note document.
    async fn open(&self, path: &Path) -> std::io::Result<()>;

    /// Reveal the notes folder.
    async fn reveal(&self, dir: &Path) -> std::io::Result<()>;
}
