//! Error types for the TODO scanner.

use thiserror::Error;

/// Result type alias for scanner operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that can occur while setting up a scan.
///
/// Walking and reading are best-effort and never produce an error; only
/// construction of the scanner itself can fail.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The marker pattern failed to compile.
    #[error("invalid marker pattern: {0}")]
    Pattern(#[from] regex_lite::Error),
}
