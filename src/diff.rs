//! # Diff Module
//!
//! Renders the change a header insertion would make, so check mode can show
//! it without touching the file.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

use crate::header::Preview;

/// Builds a line diff between the original and updated content of `path`.
///
/// Content is decoded lossily; the diff is for display only.
pub fn render_diff(path: &Path, preview: &Preview) -> String {
  let original = String::from_utf8_lossy(&preview.original);
  let updated = String::from_utf8_lossy(&preview.updated);
  let diff = TextDiff::from_lines(original.as_ref(), updated.as_ref());

  let mut out = format!("Diff for {}:\n", path.display());
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    out.push_str(sign);
    out.push_str(change.value());
    if change.missing_newline() {
      out.push('\n');
    }
  }
  out
}

/// Prints the diff for `path` to stderr, coloring added and removed lines.
pub fn display_diff(path: &Path, preview: &Preview) {
  for line in render_diff(path, preview).lines() {
    if line.starts_with('+') {
      eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
    } else if line.starts_with('-') {
      eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
    } else {
      eprintln!("{}", line);
    }
  }
  eprintln!();
}
