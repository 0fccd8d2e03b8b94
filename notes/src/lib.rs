//! # Notes
//!
//! Personal notes kept as markdown files in a single directory.
//!
//! - **Listing**: Every `*.md` file directly inside the notes directory
//! - **Creation**: Titles are sanitized into safe file names
//! - **Rename/Delete**: Plain file operations, errors surface to the caller
//! - **Opening**: Delegated to a [`NoteOpener`] supplied by the host
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           Notes                                 │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  title ──► sanitize_title ──► NotesStore ──► <dir>/<title>.md   │
//! │                                   │                             │
//! │                                   ▼                             │
//! │                              NoteOpener                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod note;
pub mod opener;
pub mod store;
pub mod title;

pub use error::{NotesError, Result, StorageError};
pub use note::{NOTE_EXTENSION, Note};
pub use opener::NoteOpener;
pub use store::{NotesStore, default_notes_dir, resolve_notes_dir};
pub use title::{TITLE_REQUIRED, sanitize_title, validate_title};
