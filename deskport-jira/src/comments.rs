//! # Comment Partitioning
//!
//! Splits a Service Desk request's comments by visibility. Public comments are
//! returned for inline export; non-public ones are appended to the side log
//! straight away and never reach the caller.

use deskport_core::NonPublicCommentLog;
use deskport_core::export::NonPublicCommentRow;
use deskport_core::json_path::text_or;
use serde_json::Value;
use tracing::{error, info};

use crate::client::JiraClient;
use crate::models::PublicComment;

const MISSING: &str = "N/A";

impl JiraClient {
  /// Fetch the comments of `ticket_id`, logging non-public ones to `log` and
  /// returning the public ones.
  ///
  /// Failures are scoped to this ticket: they are logged and yield an empty
  /// list so the export can move on to the next one.
  pub async fn get_comments(&self, ticket_id: &str, log: &mut NonPublicCommentLog) -> Vec<PublicComment> {
    let raw = match self.fetch_request_comments(ticket_id).await {
      Ok(raw) => raw,
      Err(e) => {
        error!("Failed to retrieve comments for ticket {ticket_id}: {e}");
        return Vec::new();
      }
    };

    let (public, non_public) = partition_comments(ticket_id, &raw);
    info!(
      "Retrieved {} public comments and {} non-public comments for ticket {ticket_id}",
      public.len(),
      non_public.len()
    );

    if let Err(e) = log.append(&non_public) {
      error!(
        "Failed to record non-public comments for ticket {ticket_id} in {}: {e:#}",
        log.path().display()
      );
    }

    public
  }
}

/// Split raw comments into public projections and non-public side-log rows.
///
/// Only an explicit `"public": true` counts as public; a missing or malformed
/// flag keeps the comment out of the main export.
pub fn partition_comments(ticket_id: &str, raw: &[Value]) -> (Vec<PublicComment>, Vec<NonPublicCommentRow>) {
  let mut public = Vec::new();
  let mut non_public = Vec::new();

  for comment in raw {
    if comment.get("public").and_then(Value::as_bool) == Some(true) {
      public.push(PublicComment {
        id: text_or(comment, &["id"], MISSING),
        body: text_or(comment, &["body"], ""),
        author: text_or(comment, &["author", "displayName"], MISSING),
        created: text_or(comment, &["created", "iso8601"], MISSING),
      });
    } else {
      non_public.push(NonPublicCommentRow {
        ticket_id: ticket_id.to_string(),
        body: text_or(comment, &["body"], ""),
      });
    }
  }

  (public, non_public)
}
