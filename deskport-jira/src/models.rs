use serde::Serialize;
use serde_json::Value;

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

impl std::fmt::Debug for JiraAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JiraAuth")
      .field("username", &self.username)
      .field("api_token", &"<redacted>")
      .finish()
  }
}

/// A JQL filter sent to the search endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  pub jql: String,
}

impl SearchQuery {
  pub fn new(jql: impl Into<String>) -> Self {
    Self { jql: jql.into() }
  }

  /// Every issue in a project, in the order Jira returns them
  pub fn for_project(project_key: &str) -> Self {
    Self::new(format!("project = {project_key}"))
  }

  /// Every issue in a project, newest first
  pub fn for_project_newest_first(project_key: &str) -> Self {
    Self::new(format!("project = \"{project_key}\" ORDER BY created DESC"))
  }
}

/// Bounds of a paginated search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
  /// Records requested per page (`maxResults`)
  pub page_size: usize,
  /// Stop once this many records have been collected
  pub limit: Option<usize>,
}

impl PageLimits {
  pub const fn unbounded(page_size: usize) -> Self {
    Self { page_size, limit: None }
  }

  pub const fn bounded(page_size: usize, limit: usize) -> Self {
    Self {
      page_size,
      limit: Some(limit),
    }
  }
}

/// Why a paginated search stopped requesting pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
  /// A page came back short, or the reported total was reached
  Exhausted,
  /// The requested number of records was collected
  LimitReached,
  /// A successful response carried no `issues` array
  MissingIssues,
  /// A request failed; records gathered before it are kept
  Failed(String),
}

/// Records gathered by a paginated search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
  /// Raw issues in the order the API returned them
  pub issues: Vec<Value>,
  /// Number of page requests that succeeded
  pub pages_fetched: usize,
  pub stop: StopReason,
}

impl SearchOutcome {
  /// True when the very first request failed, leaving nothing to export.
  pub fn first_page_failed(&self) -> bool {
    self.pages_fetched == 0 && self.failure().is_some()
  }

  /// The error that ended the search, if it ended on a failed request.
  pub fn failure(&self) -> Option<&str> {
    match &self.stop {
      StopReason::Failed(reason) => Some(reason),
      _ => None,
    }
  }
}

/// The reduced projection of a public Service Desk comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicComment {
  pub id: String,
  pub body: String,
  pub author: String,
  pub created: String,
}
