//! # File Collector Module
//!
//! Turns the paths given on the command line into the list of Go files to
//! check. Explicit files are taken as given; directories are walked
//! recursively for `*.go` files.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory names skipped during traversal unless configured otherwise.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["vendor", "testdata"];

const GO_EXTENSION: &str = "go";

/// Collects Go source files from paths and directories.
pub struct FileCollector {
  exclude_dirs: Vec<String>,
}

impl Default for FileCollector {
  fn default() -> Self {
    Self::new(DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect())
  }
}

impl FileCollector {
  /// Creates a collector that skips directories with any of the given names.
  ///
  /// Hidden directories (names starting with `.`) are always skipped.
  pub const fn new(exclude_dirs: Vec<String>) -> Self {
    Self { exclude_dirs }
  }

  /// Expands `patterns` into a sorted, deduplicated list of files.
  ///
  /// # Errors
  ///
  /// Returns an error if a pattern names a path that does not exist.
  pub fn collect(&self, patterns: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for pattern in patterns {
      if pattern.is_file() {
        files.insert(pattern.clone());
      } else if pattern.is_dir() {
        files.extend(self.traverse_directory(pattern));
      } else {
        bail!("No such file or directory: {}", pattern.display());
      }
    }

    Ok(files.into_iter().collect())
  }

  /// Walks `dir` and returns every regular `*.go` file below it.
  ///
  /// Symlinks are not followed. Unreadable entries are logged and skipped.
  pub fn traverse_directory(&self, dir: &Path) -> Vec<PathBuf> {
    debug!("Scanning directory: {}", dir.display());
    let start_time = std::time::Instant::now();

    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
      .follow_links(false)
      .into_iter()
      .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded_dir(entry));

    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Error reading directory entry: {}", e);
          continue;
        }
      };

      if entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new(GO_EXTENSION)) {
        trace!("Found: {}", entry.path().display());
        files.push(entry.into_path());
      }
    }

    debug!(
      "Found {} Go files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    files
  }

  fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
      return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || self.exclude_dirs.iter().any(|excluded| *excluded == name)
  }
}
