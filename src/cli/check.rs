//! # Check Command
//!
//! Checks Go files for the header and, with `--modify`, inserts it.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use goheader::config::{load_config, resolve_template};
use goheader::diff::display_diff;
use goheader::file_collector::FileCollector;
use goheader::header::{ApplyOutcome, HeaderApplier};
use goheader::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use goheader::report::{CategorizedReports, FileAction, FileReport, ProcessingSummary};
use goheader::{info_log, verbose_log};

use crate::output::{
  print_all_files_ok, print_blank_line, print_failed_files, print_generated_files, print_hint, print_missing_files,
  print_start_message, print_summary,
};

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
  /// Go files or directories to process. Directories are processed
  /// recursively.
  #[arg(required = true)]
  pub patterns: Vec<PathBuf>,

  /// Insert the header into files that are missing it (default: only check)
  #[arg(long)]
  pub modify: bool,

  /// Show the diff of the changes --modify would make
  #[arg(long, conflicts_with = "modify")]
  pub show_diff: bool,

  /// Directory containing the go.txt header template
  #[arg(long, value_name = "DIR")]
  pub template_dir: Option<PathBuf>,

  /// Header template file (takes precedence over --template-dir)
  #[arg(long, short = 'f', value_name = "FILE")]
  pub template_file: Option<PathBuf>,

  /// Path to config file (default: .goheader.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and the list of missing files
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the check command with the given arguments
pub fn run_check(args: CheckArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  let config = load_config(args.config.as_deref(), &current_dir, args.no_config)?;

  let template_manager = resolve_template(
    args.template_file.as_deref(),
    args.template_dir.as_deref(),
    config.as_ref(),
  )
  .context("Failed to load header template")?;
  verbose_log!("Using template: {}", template_manager.path().display());
  let applier = HeaderApplier::new(template_manager.bytes());

  let collector = config
    .as_ref()
    .map_or_else(FileCollector::default, |c| FileCollector::new(c.exclude_dirs()));
  let files = collector.collect(&args.patterns)?;

  print_start_message(files.len(), args.modify);

  let start_time = Instant::now();
  let reports: Vec<FileReport> = files
    .into_iter()
    .map(|path| {
      let action = process_file(&applier, &path, &args);
      FileReport { path, action }
    })
    .collect();
  let summary = ProcessingSummary::from_reports(&reports, start_time.elapsed());
  let categorized = CategorizedReports::from_reports(&reports);

  print_failed_files(&categorized.failed, Some(&current_dir));
  print_blank_line();

  print_missing_files(&categorized.missing, Some(&current_dir));
  if !summary.has_issues() && categorized.inserted.is_empty() {
    print_all_files_ok();
  }
  print_generated_files(&categorized.generated, Some(&current_dir));

  print_blank_line();
  print_summary(&summary, args.modify);

  if !args.modify && summary.missing > 0 {
    print_blank_line();
    print_hint("Run with --modify to add missing headers.");
  }

  if summary.has_issues() {
    process::exit(1);
  }

  Ok(())
}

/// Checks or modifies one file. Errors are recorded in the report rather than
/// stopping the run.
fn process_file(applier: &HeaderApplier, path: &Path, args: &CheckArgs) -> FileAction {
  debug!("Processing file: {}", path.display());

  let result = if args.modify {
    applier.apply_header(path).map(|outcome| {
      if outcome == ApplyOutcome::Inserted {
        info_log!("Added header to: {}", path.display());
      }
      FileAction::from(outcome)
    })
  } else if args.show_diff {
    applier.preview_file(path).map(|preview| match preview {
      Some(preview) => {
        display_diff(path, &preview);
        FileAction::Missing
      }
      None => FileAction::Present,
    })
  } else {
    applier.check_file(path).map(FileAction::from)
  };

  result.unwrap_or_else(|e| FileAction::Failed(e.to_string()))
}
