//! # TODO Scanner
//!
//! This crate finds inline `TODO:` and `FIXME:` markers in source files
//! across one or more workspace roots and groups them by file for
//! hierarchical presentation.
//!
//! ## Features
//!
//! - **Marker Extraction**: Multiple markers per line, each with its own offset
//! - **File Classification**: Closed allow-list of source extensions
//! - **Exclusions**: Built-in and configured folder/extension exclusions
//! - **Best-effort Walking**: Unreadable entries are skipped, never fatal
//! - **Grouping**: Deterministic file ordering and per-file line ordering
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        TODO Scanner                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ScanConfig ──► Scanner ──► MarkerRecord ──► group()            │
//! │       │            │                            │               │
//! │       ▼            ▼                            ▼               │
//! │  FileClassifier  MarkerExtractor            GroupedFile         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod extractor;
pub mod group;
pub mod scanner;

pub use classifier::{FileClassifier, is_scannable, normalize_extension};
pub use config::ScanConfig;
pub use error::{Result, ScanError};
pub use extractor::{MarkerExtractor, MarkerKind, MarkerMatch};
pub use group::{GroupedFile, group};
pub use scanner::{MarkerRecord, ScanResult, ScanStats, Scanner};
