//! # goheader
//!
//! Checks that Go source files start with a license header, and inserts it
//! where it is missing.

mod cli;
mod output;

use anyhow::Result;

use crate::cli::{Cli, run_check};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_check(cli.check_args)
}
