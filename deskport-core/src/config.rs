//! # Configuration Management
//!
//! Locates the deskport configuration directory and loads the optional
//! `export.toml` file that tunes both export pipelines. Every setting has a
//! built-in default so the file may be absent or partial.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Default page size for the issue+comment exporter.
pub const DEFAULT_ISSUE_PAGE_SIZE: usize = 1;

/// Default cap on the number of issues pulled by the issue+comment exporter.
pub const DEFAULT_ISSUE_LIMIT: usize = 1500;

/// Length of a well-formed numeric issue ID.
pub const DEFAULT_EXPECTED_ID_LENGTH: usize = 6;

/// Default master CSV for the issue+comment exporter.
pub const DEFAULT_ISSUES_OUTPUT: &str = "issues_with_comments.csv";

/// Default side file receiving non-public comments.
pub const DEFAULT_COMMENTS_FILE: &str = "non_public_comments.csv";

/// Represents the configuration directories for deskport
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Resolve the platform config directory
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "deskport").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Use an explicit directory instead of the platform default
  pub fn from_dir(config_dir: impl Into<PathBuf>) -> Self {
    Self {
      config_dir: config_dir.into(),
    }
  }

  /// Get the path to the export configuration file
  pub fn export_config_path(&self) -> PathBuf {
    self.config_dir.join("export.toml")
  }

  /// Load the export configuration from file or return the defaults
  pub fn load_export_config(&self) -> Result<ExportConfig> {
    let config_path = self.export_config_path();

    if !config_path.exists() {
      return Ok(ExportConfig::default());
    }
    ExportConfig::load(&config_path)
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Settings shared by both export pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
  /// Jira host; the `DESKPORT_JIRA_HOST` variable and `--host` take precedence
  pub host: Option<String>,
  /// Issues requested per search page by the issue+comment exporter
  pub page_size: usize,
  /// Maximum number of issues exported by the issue+comment exporter
  pub limit: usize,
  /// Length an issue ID must have to be considered valid
  pub expected_id_length: usize,
  /// Master CSV written by the issue+comment exporter
  pub output: PathBuf,
  /// Append-only CSV receiving non-public comments
  pub comments_file: PathBuf,
  /// PEM bundle of extra root certificates to trust; `--ca-cert` takes
  /// precedence
  pub ca_cert: Option<PathBuf>,
  /// Custom field codes for project-specific columns
  pub fields: FieldMap,
}

impl ExportConfig {
  /// Parse a specific TOML file; unlike [`ConfigDirs::load_export_config`]
  /// a missing file is an error.
  pub fn load(config_path: &Path) -> Result<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read export config from {}", config_path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse export config from {}", config_path.display()))
  }
}

impl Default for ExportConfig {
  fn default() -> Self {
    Self {
      host: None,
      page_size: DEFAULT_ISSUE_PAGE_SIZE,
      limit: DEFAULT_ISSUE_LIMIT,
      expected_id_length: DEFAULT_EXPECTED_ID_LENGTH,
      output: PathBuf::from(DEFAULT_ISSUES_OUTPUT),
      comments_file: PathBuf::from(DEFAULT_COMMENTS_FILE),
      ca_cert: None,
      fields: FieldMap::default(),
    }
  }
}

/// Maps project-specific columns to the custom field codes that hold them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMap {
  /// Service-desk status history exposing `currentStatus`
  pub status_history: String,
  pub affected_clients: String,
  pub client_type: String,
  pub gui_email: String,
  pub tranche_id: String,
  pub issue_date_time: String,
  pub fix_request_message: String,
  pub submitter: String,
  pub fix_response_message: String,
  pub deal_id: String,
  pub fix_request_id: String,
  pub fix_seq_id: String,
}

impl Default for FieldMap {
  fn default() -> Self {
    Self {
      status_history: "customfield_10010".to_string(),
      affected_clients: "customfield_10211".to_string(),
      client_type: "customfield_10221".to_string(),
      gui_email: "customfield_10212".to_string(),
      tranche_id: "customfield_10213".to_string(),
      issue_date_time: "customfield_10214".to_string(),
      fix_request_message: "customfield_10215".to_string(),
      submitter: "customfield_10216".to_string(),
      fix_response_message: "customfield_10217".to_string(),
      deal_id: "customfield_10218".to_string(),
      fix_request_id: "customfield_10219".to_string(),
      fix_seq_id: "customfield_10220".to_string(),
    }
  }
}
