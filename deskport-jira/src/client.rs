use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Certificate, Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::consts;
use crate::error::JiraError;
use crate::models::JiraAuth;

/// Represents a Jira API client
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: JiraAuth,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(base_url: &str, auth: JiraAuth) -> Self {
    Self {
      client: Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
    }
  }

  /// Create a client that also trusts the root certificates in the PEM
  /// bundle at `ca_cert`
  pub fn with_ca_cert(base_url: &str, auth: JiraAuth, ca_cert: &Path) -> Result<Self> {
    let mut builder = Client::builder();
    for cert in load_ca_bundle(ca_cert)? {
      builder = builder.add_root_certificate(cert);
    }
    let client = builder
      .build()
      .with_context(|| format!("Failed to build HTTP client with CA bundle {}", ca_cert.display()))?;

    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
    })
  }

  /// The base URL every endpoint path is appended to
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Issue an authenticated GET and decode the body as untyped JSON.
  pub(crate) async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, JiraError> {
    let url = format!("{}{}", self.base_url, path);
    debug!("GET {url} {query:?}");

    let response = self
      .client
      .get(&url)
      .query(query)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .header(ACCEPT, "application/json")
      .header(USER_AGENT, consts::USER_AGENT)
      .send()
      .await
      .map_err(JiraError::Transport)?;

    let status = response.status();
    match status {
      status if status.is_success() => response.json::<Value>().await.map_err(JiraError::Decode),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(JiraError::Auth(status)),
      StatusCode::NOT_FOUND => Err(JiraError::NotFound(path.to_string())),
      _ => Err(JiraError::Http {
        status,
        body: response.text().await.unwrap_or_default(),
      }),
    }
  }
}

const PEM_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const PEM_END: &str = "-----END CERTIFICATE-----";

/// Read every certificate block from a PEM bundle.
fn load_ca_bundle(path: &Path) -> Result<Vec<Certificate>> {
  let pem = fs::read_to_string(path).with_context(|| format!("Failed to read CA bundle {}", path.display()))?;

  let mut certs = Vec::new();
  let mut rest = pem.as_str();
  while let Some(start) = rest.find(PEM_BEGIN) {
    let Some(len) = rest[start..].find(PEM_END) else {
      break;
    };
    let end = start + len + PEM_END.len();
    let cert = Certificate::from_pem(rest[start..end].as_bytes())
      .with_context(|| format!("Failed to parse certificate #{} in {}", certs.len() + 1, path.display()))?;
    certs.push(cert);
    rest = &rest[end..];
  }

  if certs.is_empty() {
    anyhow::bail!("No PEM certificates found in {}", path.display());
  }
  debug!("Loaded {} CA certificates from {}", certs.len(), path.display());
  Ok(certs)
}

/// Create a Jira client from credentials
pub fn create_jira_client(base_url: &str, username: &str, api_token: &str) -> JiraClient {
  let auth = JiraAuth {
    username: username.to_string(),
    api_token: api_token.to_string(),
  };

  JiraClient::new(base_url, auth)
}
