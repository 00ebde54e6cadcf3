//! # Logging Module
//!
//! This module provides logging utilities for goheader, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Setup of the `tracing` subscriber used for diagnostics
//!
//! Verbose logs go to stderr and info logs go to stdout, so the list of files
//! printed in quiet mode stays pipeable.
//!
//! ## Example
//!
//! ```rust
//! use goheader::logging::{ColorMode, set_verbose};
//! use goheader::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! verbose_log!("Processing file: {}", "main.go");
//! info_log!("Header added to: {}", "main.go");
//! ```

mod modes;

pub use modes::{ColorMode, default_level, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message, colored when the terminal supports it.
///
/// Used by [`info_log!`]; not meant to be called directly.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
