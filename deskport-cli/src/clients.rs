//! # Client Creation
//!
//! Resolves configuration, host, and credentials into a ready-to-use Jira
//! client plus the runtime that drives it.

use std::path::Path;

use anyhow::{Context, Result};
use deskport_core::url::resolve_jira_base_url;
use deskport_core::{ExportConfig, get_config_dirs};
use deskport_jira::JiraClient;
use deskport_jira::auth::resolve_jira_auth;
use directories::BaseDirs;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::cli::ConnectionArgs;

/// Load settings from `explicit` if given, else from the platform config
/// directory (defaults when that file does not exist).
pub fn load_export_config(explicit: Option<&Path>) -> Result<ExportConfig> {
  match explicit {
    Some(path) => ExportConfig::load(path),
    None => {
      let dirs = get_config_dirs()?;
      debug!("Looking for config in {}", dirs.export_config_path().display());
      dirs.load_export_config()
    }
  }
}

/// Creates an authenticated Jira client from flags, environment, config, and
/// `.netrc`, in that order of precedence. A CA bundle from `--ca-cert` or the
/// config is trusted on top of the system roots.
pub fn create_jira_client(connection: &ConnectionArgs, config: &ExportConfig) -> Result<JiraClient> {
  let base_url = resolve_jira_base_url(connection.host.as_deref(), config.host.as_deref())?;
  let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

  let auth = resolve_jira_auth(
    home.as_deref(),
    &base_url,
    connection.username.clone(),
    connection.api_token.clone(),
  )
  .context("Failed to get Jira credentials")?;

  debug!("Using Jira at {base_url} as {}", auth.username);
  match connection.ca_cert.as_deref().or(config.ca_cert.as_deref()) {
    Some(ca_cert) => JiraClient::with_ca_cert(&base_url, auth, ca_cert),
    None => Ok(JiraClient::new(&base_url, auth)),
  }
}

/// Creates a tokio runtime and an authenticated Jira client
pub fn create_jira_runtime_and_client(
  connection: &ConnectionArgs,
  config: &ExportConfig,
) -> Result<(Runtime, JiraClient)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let client = create_jira_client(connection, config)?;
  Ok((rt, client))
}
