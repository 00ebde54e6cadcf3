//! # Report Module
//!
//! Per-file results collected while a run processes files, and the summary
//! derived from them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::header::{ApplyOutcome, HeaderStatus};

/// Information about a processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
  pub path: PathBuf,
  pub action: FileAction,
}

/// What happened to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
  /// The header was already present
  Present,
  /// Generated file, left untouched
  Generated,
  /// Header missing (check mode)
  Missing,
  /// Header inserted (modify mode)
  Inserted,
  /// Processing failed; the message is the error chain
  Failed(String),
}

impl From<HeaderStatus> for FileAction {
  fn from(status: HeaderStatus) -> Self {
    match status {
      HeaderStatus::Present => FileAction::Present,
      HeaderStatus::Generated => FileAction::Generated,
      HeaderStatus::Missing => FileAction::Missing,
    }
  }
}

impl From<ApplyOutcome> for FileAction {
  fn from(outcome: ApplyOutcome) -> Self {
    match outcome {
      ApplyOutcome::AlreadyPresent => FileAction::Present,
      ApplyOutcome::Generated => FileAction::Generated,
      ApplyOutcome::Inserted => FileAction::Inserted,
    }
  }
}

/// Counts over all processed files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
  pub total_files: usize,
  pub present: usize,
  pub generated: usize,
  pub missing: usize,
  pub inserted: usize,
  pub failed: usize,
  pub processing_time: Duration,
}

impl ProcessingSummary {
  pub fn from_reports(reports: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: reports.len(),
      processing_time,
      ..Self::default()
    };

    for report in reports {
      match report.action {
        FileAction::Present => summary.present += 1,
        FileAction::Generated => summary.generated += 1,
        FileAction::Missing => summary.missing += 1,
        FileAction::Inserted => summary.inserted += 1,
        FileAction::Failed(_) => summary.failed += 1,
      }
    }

    summary
  }

  /// `true` if the run should exit non-zero.
  pub const fn has_issues(&self) -> bool {
    self.missing > 0 || self.failed > 0
  }
}

/// Reports grouped by action for printing.
#[derive(Debug, Default)]
pub struct CategorizedReports<'a> {
  pub missing: Vec<&'a FileReport>,
  pub inserted: Vec<&'a FileReport>,
  pub generated: Vec<&'a FileReport>,
  pub failed: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut categorized = Self::default();
    for report in reports {
      match report.action {
        FileAction::Missing => categorized.missing.push(report),
        FileAction::Inserted => categorized.inserted.push(report),
        FileAction::Generated => categorized.generated.push(report),
        FileAction::Failed(_) => categorized.failed.push(report),
        FileAction::Present => {}
      }
    }
    categorized
  }
}

/// Shows `path` relative to `root` when it lies below it.
pub fn make_relative_path(path: &Path, root: Option<&Path>) -> String {
  root
    .and_then(|base| path.strip_prefix(base).ok())
    .filter(|relative| !relative.as_os_str().is_empty())
    .unwrap_or(path)
    .display()
    .to_string()
}
