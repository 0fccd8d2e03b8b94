//! # DevHQ Panel
//!
//! A side panel with two views for the current workspace:
//!
//! - **TODOs**: `TODO:`/`FIXME:` markers found in source files, grouped by file
//! - **Notes**: personal markdown notes kept outside the workspace
//!
//! Both views hold a lazily loaded snapshot behind a [`RefreshController`].
//! Host integration happens through capability traits: [`Settings`] for
//! configuration, [`Prompter`] for user interaction, [`NoteOpener`] for
//! showing documents and [`TreeDataProvider`] for rendering.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                              Panel                                  │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────┐                     ┌──────────────────────┐  │
//! │  │ TodoTreeProvider │                     │  NotesTreeProvider   │  │
//! │  └────────┬─────────┘                     └──────────┬───────────┘  │
//! │           ▼                                          ▼              │
//! │  RefreshController<TodoLoader>        RefreshController<NotesLoader>│
//! │           │                                          │              │
//! │           ▼                                          ▼              │
//! │  Scanner (blocking pool) ◄── Settings          NotesStore ──► Opener│
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`NoteOpener`]: devhq_notes::NoteOpener

pub mod error;
pub mod notes_tree;
pub mod panel;
pub mod refresh;
pub mod settings;
pub mod todo_tree;
pub mod tree;
pub mod ui;

pub use error::{PanelError, Result};
pub use notes_tree::{NotesLoader, NotesTreeProvider};
pub use panel::{Panel, PanelBuilder};
pub use refresh::{Loader, RefreshController, RefreshOutcome};
pub use settings::{MemorySettings, SettingValue, Settings, TomlSettings};
pub use todo_tree::{TodoLoader, TodoNode, TodoTreeProvider};
pub use tree::{Icon, OpenTarget, TreeDataProvider, TreeItem};
pub use ui::{InputRequest, Prompter, Validator};
