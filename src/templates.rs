//! # Templates Module
//!
//! This module loads the header template that every Go file is expected to
//! start with.
//!
//! The template is opaque: its bytes are compared and inserted exactly as
//! stored on disk, with no variable substitution and no comment formatting.
//! It is loaded once and shared read-only across all files.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use goheader::header::HeaderApplier;
//! use goheader::templates::TemplateManager;
//!
//! # fn main() -> goheader::error::Result<()> {
//! // Reads `templates/go.txt`
//! let template_manager = TemplateManager::from_dir(Path::new("templates"))?;
//! let applier = HeaderApplier::new(template_manager.bytes());
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{HeaderError, Result};
use crate::verbose_log;

/// File name of the Go header template inside a template directory.
pub const GO_TEMPLATE_FILENAME: &str = "go.txt";

/// Holds the loaded header template bytes.
#[derive(Debug, Clone)]
pub struct TemplateManager {
  /// Where the template was read from
  path: PathBuf,
  /// The template content, shared with every applier that uses it
  template: Arc<[u8]>,
}

impl TemplateManager {
  /// Loads the Go template (`go.txt`) from a template directory.
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::TemplateLoadFailure`] if the file does not exist
  /// or cannot be read.
  pub fn from_dir(dir: &Path) -> Result<Self> {
    Self::load_template(&dir.join(GO_TEMPLATE_FILENAME))
  }

  /// Loads a template from an explicit file path.
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::TemplateLoadFailure`] if the file does not exist
  /// or cannot be read.
  pub fn load_template(path: &Path) -> Result<Self> {
    verbose_log!("Loading template from: {}", path.display());

    let template = fs::read(path).map_err(|e| HeaderError::TemplateLoadFailure {
      path: path.to_path_buf(),
      source: e,
    })?;

    verbose_log!("Template is {} bytes", template.len());

    Ok(Self {
      path: path.to_path_buf(),
      template: template.into(),
    })
  }

  /// Returns a shared handle to the template bytes.
  pub fn bytes(&self) -> Arc<[u8]> {
    Arc::clone(&self.template)
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_from_dir_reads_go_txt() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(GO_TEMPLATE_FILENAME), "// Copyright 2025 Acme\n\n").unwrap();

    let manager = TemplateManager::from_dir(dir.path()).unwrap();
    assert_eq!(&*manager.bytes(), b"// Copyright 2025 Acme\n\n");
    assert_eq!(manager.path(), dir.path().join(GO_TEMPLATE_FILENAME));
  }

  #[test]
  fn test_missing_template_is_load_failure() {
    let dir = tempdir().unwrap();
    let err = TemplateManager::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, HeaderError::TemplateLoadFailure { .. }));
  }

  #[test]
  fn test_template_bytes_are_not_interpreted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.txt");
    let raw = b"// {{year}} \xff\r\n".to_vec();
    fs::write(&path, &raw).unwrap();

    let manager = TemplateManager::load_template(&path).unwrap();
    assert_eq!(&*manager.bytes(), raw.as_slice());
  }

  #[test]
  fn test_bytes_are_shared() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(GO_TEMPLATE_FILENAME), "// x\n").unwrap();
    let manager = TemplateManager::from_dir(dir.path()).unwrap();
    let a = manager.bytes();
    let b = manager.bytes();
    assert!(Arc::ptr_eq(&a, &b));
  }
}
