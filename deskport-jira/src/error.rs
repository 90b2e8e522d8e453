//! Errors raised by HTTP calls against Jira.

use reqwest::StatusCode;
use thiserror::Error;

/// A failed request against the Jira or Service Desk API
#[derive(Debug, Error)]
pub enum JiraError {
  #[error("Authentication failed (HTTP {0}). Please check your Jira credentials.")]
  Auth(StatusCode),

  #[error("Resource not found: {0}")]
  NotFound(String),

  #[error("Unexpected error: HTTP {status} - {body}")]
  Http { status: StatusCode, body: String },

  #[error("Failed to connect to Jira: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("Failed to parse Jira response: {0}")]
  Decode(#[source] reqwest::Error),
}
