//! Error types for the notes store.

use thiserror::Error;

/// Result type alias for notes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Errors that can occur in the notes store.
#[derive(Error, Debug)]
pub enum NotesError {
    /// The title contains nothing usable as a file name.
    #[error("invalid note title: {0:?}")]
    InvalidTitle(String),

    /// A file system operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create the notes directory.
    #[error("failed to create directory: {0}")]
    CreateDirectory(String),

    /// Failed to write a note.
    #[error("failed to write file: {0}")]
    WriteFile(String),

    /// Failed to rename a note.
    #[error("failed to rename file: {0}")]
    RenameFile(String),

    /// Failed to delete a note.
    #[error("failed to delete file: {0}")]
    DeleteFile(String),

    /// The host could not open a note or folder.
    #[error("failed to open: {0}")]
    Open(String),
}
