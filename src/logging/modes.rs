use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Global output mode shared by the logging macros.
///
/// Starts as [`OutputMode::Normal`] until [`set_verbose`] or [`set_quiet`] is
/// called.
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies the mode to `owo-colors`' global override.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

/// Enables verbose output for [`verbose_log!`](crate::verbose_log).
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

/// Suppresses [`info_log!`](crate::info_log) output.
pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
  OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)) == OutputMode::Verbose
}

pub fn is_quiet() -> bool {
  OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)) == OutputMode::Quiet
}

/// Maps the `-v` count and `--quiet` flag to a tracing filter directive.
pub const fn default_level(quiet: bool, verbose: u8) -> &'static str {
  if quiet {
    return "error";
  }
  match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the level derived from the CLI flags.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(quiet: bool, verbose: u8) {
  let level = default_level(quiet, verbose);
  let filter = EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(level))
    .unwrap_or_else(|_| EnvFilter::new(level));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_level() {
    assert_eq!(default_level(false, 0), "warn");
    assert_eq!(default_level(false, 1), "info");
    assert_eq!(default_level(false, 2), "debug");
    assert_eq!(default_level(false, 5), "trace");
    assert_eq!(default_level(true, 3), "error");
  }

  #[test]
  fn test_output_mode_from_u8_defaults_to_normal() {
    assert_eq!(OutputMode::from_u8(0), OutputMode::Normal);
    assert_eq!(OutputMode::from_u8(42), OutputMode::Normal);
  }
}
