//! Builders for Jira and Service Desk response payloads.

use serde_json::{Value, json};

/// A minimal search hit with a numeric `id`, a `key`, and a summary.
pub fn issue(id: &str, key: &str) -> Value {
  json!({
    "id": id,
    "key": key,
    "fields": {
      "summary": format!("Summary of {key}"),
    }
  })
}

/// `count` consecutive issues starting at `first`, keyed `DESK-<n>`.
pub fn issues(first: usize, count: usize) -> Vec<Value> {
  (first..first + count)
    .map(|n| issue(&format!("{}", 100_000 + n), &format!("DESK-{n}")))
    .collect()
}

/// Wrap issues in a search response body.
pub fn search_page(issues: Vec<Value>) -> Value {
  json!({
    "issues": issues,
  })
}

/// A Service Desk comment as returned by the request comment endpoint.
pub fn comment(id: &str, body: &str, public: bool) -> Value {
  json!({
    "id": id,
    "body": body,
    "public": public,
    "author": {
      "displayName": format!("Author {id}"),
    },
    "created": {
      "iso8601": "2024-03-01T10:00:00+0000",
    }
  })
}

/// Wrap comments in a request comment page.
pub fn comment_page(comments: Vec<Value>) -> Value {
  json!({
    "size": comments.len(),
    "values": comments,
  })
}
