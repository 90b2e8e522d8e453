//! Host resolution for the Jira base URL.

use anyhow::{Context, Result};
use url::Url;

/// Environment variable storing the Jira host configuration.
pub const ENV_JIRA_HOST: &str = "DESKPORT_JIRA_HOST";

/// Pick the Jira base URL from, in order, an explicit flag, the
/// `DESKPORT_JIRA_HOST` environment variable, and the config file.
pub fn resolve_jira_base_url(explicit: Option<&str>, configured: Option<&str>) -> Result<String> {
  let from_env = std::env::var(ENV_JIRA_HOST).ok().filter(|host| !host.trim().is_empty());

  let host = explicit
    .map(str::to_string)
    .or(from_env)
    .or_else(|| configured.map(str::to_string))
    .with_context(|| format!("No Jira host configured. Pass --host or set '{ENV_JIRA_HOST}'."))?;

  ensure_url_scheme(&host)
}

/// Ensure a host has an http(s) scheme, assuming https:// when none is given.
///
/// The result never ends with a `/`, so endpoint paths can be appended
/// directly.
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
    trimmed.to_string()
  } else {
    format!("https://{trimmed}")
  };

  let url = Url::parse(&candidate).map_err(|e| anyhow::anyhow!("Failed to parse host '{input}': {e}"))?;
  if url.host().is_none() {
    return Err(anyhow::anyhow!("Host '{input}' has no hostname"));
  }

  Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
  use deskport_test_utils::EnvVarGuard;

  use super::*;

  #[test]
  fn test_ensure_url_scheme_without_scheme() {
    assert_eq!(
      ensure_url_scheme("company.atlassian.net").unwrap(),
      "https://company.atlassian.net"
    );
  }

  #[test]
  fn test_ensure_url_scheme_keeps_http_and_port() {
    assert_eq!(
      ensure_url_scheme("http://localhost:8080").unwrap(),
      "http://localhost:8080"
    );
  }

  #[test]
  fn test_ensure_url_scheme_strips_trailing_slash() {
    assert_eq!(
      ensure_url_scheme("https://company.atlassian.net/").unwrap(),
      "https://company.atlassian.net"
    );
  }

  #[test]
  fn test_ensure_url_scheme_empty_string() {
    let result = ensure_url_scheme("   ");
    assert!(result.unwrap_err().to_string().contains("Host cannot be empty"));
  }

  #[test]
  fn test_resolve_precedence() {
    let guard = EnvVarGuard::new(ENV_JIRA_HOST);

    guard.remove();
    assert_eq!(
      resolve_jira_base_url(None, Some("from-config.example.com")).unwrap(),
      "https://from-config.example.com"
    );

    guard.set("from-env.example.com");
    assert_eq!(
      resolve_jira_base_url(None, Some("from-config.example.com")).unwrap(),
      "https://from-env.example.com"
    );
    assert_eq!(
      resolve_jira_base_url(Some("http://flag.example.com"), Some("from-config.example.com")).unwrap(),
      "http://flag.example.com"
    );

    guard.remove();
    assert!(resolve_jira_base_url(None, None).is_err());
  }
}
