//! # goheader
//!
//! A tool that ensures Go source files start with a license header.
//!
//! The header is inserted after any build constraints (`//go:build`,
//! `// +build`) and the blank line that must follow them, so the constraints
//! keep working. Files marked as generated (a `//` comment containing
//! `DO NOT EDIT`) are never modified. Files are rewritten through a temporary
//! file and a rename, so an interrupted run leaves each file either untouched
//! or fully updated.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use goheader::header::{ApplyOutcome, HeaderApplier};
//! use goheader::templates::TemplateManager;
//!
//! fn main() -> anyhow::Result<()> {
//!     let template_manager = TemplateManager::load_template(Path::new("hack/go.txt"))?;
//!     let applier = HeaderApplier::new(template_manager.bytes());
//!
//!     if applier.apply_header(Path::new("main.go"))? == ApplyOutcome::Inserted {
//!         println!("Header added to main.go");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`header`] - Classification, detection and atomic rewriting of files
//! * [`templates`] - Header template loading
//! * [`file_collector`] - Discovery of Go files under the given paths
//! * [`config`] - `.goheader.toml` configuration
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`header`]: crate::header
//! [`templates`]: crate::templates
//! [`file_collector`]: crate::file_collector
//! [`config`]: crate::config
//! [`logging`]: crate::logging

pub mod config;
pub mod diff;
pub mod error;
pub mod file_collector;
pub mod header;
pub mod logging;
pub mod report;
pub mod templates;
