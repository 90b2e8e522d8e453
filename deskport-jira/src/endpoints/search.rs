//! # Jira Search Endpoint

use serde_json::Value;

use crate::client::JiraClient;
use crate::consts::SEARCH_PATH;
use crate::error::JiraError;
use crate::models::SearchQuery;

impl JiraClient {
  /// Fetch one page of search results starting at `start_at`
  pub async fn search_page(&self, query: &SearchQuery, start_at: usize, max_results: usize) -> Result<Value, JiraError> {
    self
      .get_json(
        SEARCH_PATH,
        &[
          ("jql", query.jql.clone()),
          ("startAt", start_at.to_string()),
          ("maxResults", max_results.to_string()),
        ],
      )
      .await
  }
}
