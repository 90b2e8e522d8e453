//! Authentication helpers for the Jira client.
//!
//! Credentials come from explicit values when given and from `.netrc`
//! otherwise, so a token never has to appear on the command line.

use std::path::Path;

use anyhow::Result;
use deskport_core::creds::{ATLASSIAN_FALLBACK_MACHINE, find_jira_credentials};
use deskport_core::creds::netrc::normalize_host;

use crate::models::JiraAuth;

/// Build [`JiraAuth`] from explicit values, filling gaps from `.netrc`.
///
/// `home` is the directory holding `.netrc`; pass `None` to disable the
/// lookup.
pub fn resolve_jira_auth(
  home: Option<&Path>,
  jira_host: &str,
  username: Option<String>,
  api_token: Option<String>,
) -> Result<JiraAuth> {
  if let (Some(username), Some(api_token)) = (&username, &api_token) {
    return Ok(JiraAuth {
      username: username.clone(),
      api_token: api_token.clone(),
    });
  }

  let stored = match home {
    Some(home) => find_jira_credentials(home, jira_host)?,
    None => None,
  };

  match (username, api_token, stored) {
    (Some(username), Some(api_token), _) => Ok(JiraAuth { username, api_token }),
    (username, api_token, Some(creds)) => Ok(JiraAuth {
      username: username.unwrap_or(creds.username),
      api_token: api_token.unwrap_or(creds.password),
    }),
    _ => Err(anyhow::anyhow!(
      "Jira credentials not found. Pass --username and --api-token, or add a .netrc entry for machine '{}' or '{ATLASSIAN_FALLBACK_MACHINE}'.",
      normalize_host(jira_host)
    )),
  }
}
