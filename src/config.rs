//! # Configuration Module
//!
//! This module provides configuration support for goheader: where the header
//! template lives and which directories to skip while collecting files.
//!
//! Configuration can be specified in a `.goheader.toml` file or via the
//! `GOHEADER_CONFIG` environment variable. Command-line flags override it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::file_collector::DEFAULT_EXCLUDE_DIRS;
use crate::templates::TemplateManager;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".goheader.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "GOHEADER_CONFIG";

/// Main configuration struct for goheader.
///
/// Relative paths are resolved against the directory containing the config
/// file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Directory containing the `go.txt` template.
  #[serde(default)]
  pub template_dir: Option<PathBuf>,

  /// Explicit template file; takes precedence over `template-dir`.
  #[serde(default)]
  pub template_file: Option<PathBuf>,

  /// Directory names to skip during traversal.
  #[serde(default)]
  pub exclude_dirs: Option<Vec<String>>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value in the config file is invalid.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_relative_to(base))
  }

  /// Checks that:
  /// - Excluded directory names are plain names, not paths
  /// - Template paths are not empty
  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(ref dirs) = self.exclude_dirs {
      for dir in dirs {
        if dir.is_empty() || dir.contains('/') || dir.contains('\\') {
          return Err(ConfigError::InvalidValue {
            key: "exclude-dirs".to_string(),
            message: format!("'{}' must be a single directory name", dir),
          });
        }
      }
    }

    for (key, value) in [("template-dir", &self.template_dir), ("template-file", &self.template_file)] {
      if value.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
        return Err(ConfigError::InvalidValue {
          key: key.to_string(),
          message: "path cannot be empty".to_string(),
        });
      }
    }

    Ok(())
  }

  fn resolve_relative_to(self, base: &Path) -> Self {
    Self {
      template_dir: self.template_dir.map(|p| base.join(p)),
      template_file: self.template_file.map(|p| base.join(p)),
      exclude_dirs: self.exclude_dirs,
    }
  }

  /// The directory names to skip, falling back to the defaults.
  pub fn exclude_dirs(&self) -> Vec<String> {
    self
      .exclude_dirs
      .clone()
      .unwrap_or_else(|| DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `GOHEADER_CONFIG` environment variable
/// 3. `.goheader.toml` in `root`
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let default_config = root.join(DEFAULT_CONFIG_FILENAME);
  if default_config.exists() {
    verbose_log!("Using config: {}", default_config.display());
    return Some(default_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `None` if discovery is disabled or no file is found.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}

/// Loads the header template, picking its location in this order:
/// `template_file`, `template_dir`, then the config's `template-file` and
/// `template-dir`.
///
/// The config's template keys are only consulted when neither CLI location
/// is given.
pub fn resolve_template(
  template_file: Option<&Path>,
  template_dir: Option<&Path>,
  config: Option<&Config>,
) -> Result<TemplateManager> {
  let (file, dir) = if template_file.is_some() || template_dir.is_some() {
    (template_file, template_dir)
  } else {
    (
      config.and_then(|c| c.template_file.as_deref()),
      config.and_then(|c| c.template_dir.as_deref()),
    )
  };

  let manager = match (file, dir) {
    (Some(file), _) => TemplateManager::load_template(file)?,
    (None, Some(dir)) => TemplateManager::from_dir(dir)?,
    (None, None) => anyhow::bail!("Missing required argument: --template-dir <DIR> or --template-file <FILE>"),
  };
  Ok(manager)
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_valid_config() {
    let config_content = concat!(
      "template-dir = \"license\"\n",
      "exclude-dirs = [\"vendor\", \"third_party\"]\n",
    );

    let config: Config = toml::from_str(config_content).expect("valid config should parse");

    assert_eq!(config.template_dir, Some(PathBuf::from("license")));
    assert_eq!(config.template_file, None);
    assert_eq!(config.exclude_dirs(), vec!["vendor".to_string(), "third_party".to_string()]);
  }

  #[test]
  fn test_parse_empty_config() {
    let config: Config = toml::from_str("").expect("empty config should parse");
    assert_eq!(config, Config::default());
    assert_eq!(config.exclude_dirs(), vec!["vendor".to_string(), "testdata".to_string()]);
  }

  #[test]
  fn test_unknown_key_is_rejected() {
    let result: Result<Config, _> = toml::from_str("template = \"x\"\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_validate_exclude_dir_with_separator() {
    let config = Config {
      exclude_dirs: Some(vec!["third_party/go".to_string()]),
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
  }

  #[test]
  fn test_validate_empty_template_path() {
    let config = Config {
      template_file: Some(PathBuf::new()),
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "template-file"));
  }

  #[test]
  fn test_load_resolves_relative_paths() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "template-file = \"hack/header.txt\"\n").expect("write config");

    let config = Config::load(&config_path).expect("load should succeed");
    assert_eq!(config.template_file, Some(temp_dir.path().join("hack/header.txt")));
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = Config::load(Path::new("/nonexistent/path/.goheader.toml"));
    assert!(matches!(
      result.expect_err("should fail"),
      ConfigError::ReadError { .. }
    ));
  }

  #[test]
  fn test_load_config_invalid_toml() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "template-dir = [").expect("write config");

    assert!(matches!(
      Config::load(&config_path).expect_err("should fail"),
      ConfigError::ParseError { .. }
    ));
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom-config.toml");
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(Some(&config_path), temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_explicit_path_missing() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "").expect("write config");

    let missing = temp_dir.path().join("missing.toml");
    assert_eq!(discover_config_path(Some(&missing), temp_dir.path()), None);
  }

  #[test]
  fn test_discover_config_in_root() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(None, temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_load_config_disabled() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "").expect("write config");

    let config = load_config(None, temp_dir.path(), true).expect("load should succeed");
    assert!(config.is_none());
  }

  fn template_fixture() -> TempDir {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join("go.txt"), "// from dir\n").expect("write go.txt");
    std::fs::write(temp_dir.path().join("header.txt"), "// from file\n").expect("write header.txt");
    temp_dir
  }

  #[test]
  fn test_resolve_template_file_beats_dir() {
    let temp_dir = template_fixture();
    let file = temp_dir.path().join("header.txt");

    let manager = resolve_template(Some(&file), Some(temp_dir.path()), None).expect("template should load");
    assert_eq!(&*manager.bytes(), b"// from file\n");
  }

  #[test]
  fn test_resolve_template_cli_dir_beats_config_file() {
    let temp_dir = template_fixture();
    let config = Config {
      template_file: Some(temp_dir.path().join("header.txt")),
      ..Config::default()
    };

    let manager = resolve_template(None, Some(temp_dir.path()), Some(&config)).expect("template should load");
    assert_eq!(&*manager.bytes(), b"// from dir\n");
  }

  #[test]
  fn test_resolve_template_config_file_beats_config_dir() {
    let temp_dir = template_fixture();
    let config = Config {
      template_dir: Some(temp_dir.path().to_path_buf()),
      template_file: Some(temp_dir.path().join("header.txt")),
      ..Config::default()
    };

    let manager = resolve_template(None, None, Some(&config)).expect("template should load");
    assert_eq!(&*manager.bytes(), b"// from file\n");
  }

  #[test]
  fn test_resolve_template_from_config_dir() {
    let temp_dir = template_fixture();
    let config = Config {
      template_dir: Some(temp_dir.path().to_path_buf()),
      ..Config::default()
    };

    let manager = resolve_template(None, None, Some(&config)).expect("template should load");
    assert_eq!(&*manager.bytes(), b"// from dir\n");
  }

  #[test]
  fn test_resolve_template_without_location() {
    let err = resolve_template(None, None, Some(&Config::default())).expect_err("should fail");
    assert!(err.to_string().contains("--template-dir"));
  }

  #[test]
  fn test_resolve_template_missing_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("absent.txt");
    assert!(resolve_template(Some(&missing), None, None).is_err());
  }
}
