#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Header template used across the integration tests.
pub const TEMPLATE: &str = "// Copyright 2025 The Example Authors.\n// SPDX-License-Identifier: Apache-2.0\n\n";

/// Writes `TEMPLATE` as `go.txt` into `dir/hack` and returns the directory.
pub fn write_template_dir(dir: &Path) -> Result<PathBuf> {
  let template_dir = dir.join("hack");
  fs::create_dir_all(&template_dir)?;
  fs::write(template_dir.join("go.txt"), TEMPLATE)?;
  Ok(template_dir)
}

/// Writes `content` to `dir/relative`, creating parent directories.
pub fn write_go_file(dir: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}

pub fn with_header(body: &str) -> String {
  format!("{TEMPLATE}{body}")
}
