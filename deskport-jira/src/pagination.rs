//! # Paginated Search
//!
//! Drives the search endpoint page by page until the data runs out, a limit is
//! hit, or a request fails. A failure never discards what was already
//! collected: the loop stops and hands back the partial result together with
//! the reason it stopped.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::client::JiraClient;
use crate::models::{PageLimits, SearchOutcome, SearchQuery, StopReason};

impl JiraClient {
  /// Collect every issue matching `query`, one page at a time.
  pub async fn search_all(&self, query: &SearchQuery, limits: &PageLimits) -> SearchOutcome {
    self.search_all_observed(query, limits, |_, _| {}).await
  }

  /// Like [`JiraClient::search_all`], handing each raw page body and its
  /// offset to `on_page` before it is consumed.
  pub async fn search_all_observed<F>(&self, query: &SearchQuery, limits: &PageLimits, mut on_page: F) -> SearchOutcome
  where
    F: FnMut(usize, &Value),
  {
    let page_size = limits.page_size.max(1);
    let mut issues: Vec<Value> = Vec::new();
    let mut pages_fetched = 0;

    let stop = loop {
      if limits.limit.is_some_and(|limit| issues.len() >= limit) {
        break StopReason::LimitReached;
      }

      let start_at = pages_fetched * page_size;
      let body = match self.search_page(query, start_at, page_size).await {
        Ok(body) => body,
        Err(e) => {
          error!("Failed to retrieve issues at offset {start_at}: {e}");
          break StopReason::Failed(e.to_string());
        }
      };
      pages_fetched += 1;
      on_page(start_at, &body);

      let Some(page) = body.get("issues").and_then(Value::as_array) else {
        warn!("No 'issues' key in response data.");
        break StopReason::MissingIssues;
      };
      let page_len = page.len();
      issues.extend(page.iter().cloned());
      debug!("Fetched {page_len} issues at offset {start_at} ({} total)", issues.len());

      if let Some(limit) = limits.limit
        && issues.len() >= limit
      {
        issues.truncate(limit);
        break StopReason::LimitReached;
      }

      if page_len < page_size {
        info!("No more issues to process.");
        break StopReason::Exhausted;
      }

      // Jira reports the total match count; use it to skip a trailing empty page
      if let Some(total) = body.get("total").and_then(Value::as_u64)
        && (start_at + page_len) as u64 >= total
      {
        info!("No more issues to process.");
        break StopReason::Exhausted;
      }
    };

    SearchOutcome {
      issues,
      pages_fetched,
      stop,
    }
  }
}
