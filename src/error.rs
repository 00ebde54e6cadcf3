//! # Error Module
//!
//! Error types surfaced by the header classifier and reconciler.

use std::io;
use std::path::PathBuf;

/// Errors produced while checking or applying a header to a single file.
///
/// Every variant carries the path it concerns so that callers processing many
/// files can report failures without additional bookkeeping.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// The target file could not be opened or read.
  #[error("Failed to read '{path}': {source}")]
  ReadFailure { path: PathBuf, source: io::Error },

  /// The header template is missing or unreadable.
  #[error("Failed to load header template '{path}': {source}")]
  TemplateLoadFailure { path: PathBuf, source: io::Error },

  /// The temporary replacement file could not be created or written.
  #[error("Failed to write temporary file '{path}': {source}")]
  WriteFailure { path: PathBuf, source: io::Error },

  /// The temporary file could not be moved over the original.
  #[error("Failed to replace '{to}' with '{from}': {source}")]
  ReplaceFailure {
    from: PathBuf,
    to: PathBuf,
    source: io::Error,
  },

  /// A generated file reached the rewrite step. Detection always reports
  /// generated files as compliant, so this indicates an internal bug.
  #[error("Internal error: generated file '{path}' reached the rewrite step")]
  GeneratedDuringRewrite { path: PathBuf },
}

impl HeaderError {
  pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::ReadFailure {
      path: path.into(),
      source,
    }
  }

  pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::WriteFailure {
      path: path.into(),
      source,
    }
  }
}

/// Result alias for header operations.
pub type Result<T, E = HeaderError> = std::result::Result<T, E>;
