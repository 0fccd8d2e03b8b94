//! Error types for the panel.

use thiserror::Error;

/// Result type alias for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors that can occur in the panel.
#[derive(Error, Debug)]
pub enum PanelError {
    /// Marker scanner error.
    #[error("scan error: {0}")]
    Scan(#[from] devhq_todo_scanner::ScanError),

    /// Notes store error.
    #[error("notes error: {0}")]
    Notes(#[from] devhq_notes::NotesError),

    /// Configuration error.
    #[error("settings error: {0}")]
    Settings(String),

    /// A background task panicked or was cancelled.
    #[error("task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
