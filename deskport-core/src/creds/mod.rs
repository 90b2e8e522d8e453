//! # Credential Management
//!
//! Lookup of Jira API credentials stored in the user's `.netrc` file.

pub mod netrc;

use std::path::Path;

use anyhow::Result;

/// Represents credentials for a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Machine entry used as a fallback for every Atlassian cloud site.
pub const ATLASSIAN_FALLBACK_MACHINE: &str = "atlassian.net";

/// Find credentials for `host`, falling back to the shared `atlassian.net`
/// entry.
pub fn find_jira_credentials(home: &Path, host: &str) -> Result<Option<Credentials>> {
  let netrc_path = netrc::get_netrc_path(home);
  if !netrc_path.exists() {
    return Ok(None);
  }

  let normalized_host = netrc::normalize_host(host);
  if let Some(creds) = netrc::parse_netrc_file(&netrc_path, &normalized_host)? {
    return Ok(Some(creds));
  }
  netrc::parse_netrc_file(&netrc_path, ATLASSIAN_FALLBACK_MACHINE)
}
