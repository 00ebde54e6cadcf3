//! # Output Module
//!
//! This module centralizes all user-facing output for goheader. Lists of
//! files go to stdout; in quiet mode only bare paths are printed so the
//! output can be piped.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use goheader::logging::{is_quiet, is_verbose};
use goheader::report::{FileAction, FileReport, ProcessingSummary, make_relative_path};

/// Symbols used in output
pub mod symbols {
  /// Success/has header
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing header/failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Generated file, skipped
  pub const SKIPPED: &str = "-";
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Checking N files..." or "Processing N files..." message.
pub fn print_start_message(file_count: usize, modify_mode: bool) {
  if is_quiet() {
    return;
  }

  let verb = if modify_mode { "Processing" } else { "Checking" };
  println!("{} {} {}...", verb, file_count, plural(file_count));
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the list of files missing the header.
///
/// In quiet mode only the paths are printed, one per line.
pub fn print_missing_files(files: &[&FileReport], root: Option<&Path>) {
  if files.is_empty() {
    return;
  }

  if is_quiet() {
    for file in files {
      println!("{}", make_relative_path(&file.path, root));
    }
    return;
  }

  let header = format!(
    "{} {} {} missing the header:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    files.len(),
    plural(files.len())
  );
  print_file_list(&header, files, root);
}

/// Print generated files that were skipped. Only shown in verbose mode.
pub fn print_generated_files(files: &[&FileReport], root: Option<&Path>) {
  if !is_verbose() || files.is_empty() {
    return;
  }

  let header = format!(
    "{} Skipped {} generated {}:",
    symbols::SKIPPED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    files.len(),
    plural(files.len())
  );
  print_file_list(&header, files, root);
}

/// Print files that failed, with their errors, to stderr.
pub fn print_failed_files(files: &[&FileReport], root: Option<&Path>) {
  for file in files {
    if let FileAction::Failed(ref message) = file.action {
      eprintln!(
        "{} {}: {}",
        "error:".if_supports_color(Stream::Stderr, |s| s.red()),
        make_relative_path(&file.path, root),
        message
      );
    }
  }
}

/// Print the success message when no file needs a change.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files have the header.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X OK, Y missing, Z generated, W failed"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary, modify_mode: bool) {
  if is_quiet() {
    return;
  }

  let ok_count = summary.present + summary.inserted;
  let mut summary_line = format!(
    "Summary: {} OK, {} {}, {} generated, {} failed",
    ok_count.if_supports_color(Stream::Stdout, |s| s.cyan()),
    if modify_mode { summary.inserted } else { summary.missing },
    if modify_mode { "added" } else { "missing" },
    summary.generated.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    summary.failed
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

fn print_file_list(header: &str, files: &[&FileReport], root: Option<&Path>) {
  println!("{}", header);

  let mut sorted: Vec<_> = files.to_vec();
  sorted.sort_by(|a, b| a.path.cmp(&b.path));

  let limit = if is_verbose() { sorted.len() } else { DEFAULT_FILE_LIST_LIMIT };
  for file in sorted.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, root));
  }

  if sorted.len() > limit {
    println!(
      "  {} more (use -v to see all)",
      format!("... and {}", sorted.len() - limit).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

const fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}
