//! # Field Projection
//!
//! Flattens raw search hits into the two fixed CSV schemas. Every column is
//! filled on every row: a missing, `null`, or wrongly shaped source value
//! resolves to the column's sentinel instead of failing.

use deskport_core::FieldMap;
use deskport_core::json_path::{join_list, lookup, text_or};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::models::PublicComment;

/// Marker substituted for issue IDs of unexpected length
pub const INVALID_ID: &str = "Invalid ID";

const NA: &str = "N/A";

/// Column order of the bulk ticket export
pub const TICKET_COLUMNS: [&str; 10] = [
  "key",
  "summary",
  "status",
  "priority",
  "assignee",
  "reporter",
  "created",
  "updated",
  "resolution",
  "description",
];

/// Column order of the issue+comment export
pub const ISSUE_COLUMNS: [&str; 25] = [
  "IssueID",
  "IssueKey",
  "IssueCreation",
  "Summary",
  "ReporterEmail",
  "ReporterName",
  "Description",
  "Severity",
  "IssueType",
  "Comments",
  "Component",
  "ClientType",
  "AffectedClient",
  "Submitter",
  "FixResponseMessage",
  "FixRequestMessage",
  "Permissions",
  "FixRequestID",
  "FixSeqID",
  "DealID",
  "TrancheID",
  "IssueDateAndTime",
  "GUIEmailAddress",
  "CurrentStatus",
  "StatusTime",
];

/// One row of the bulk ticket export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketRow {
  pub key: String,
  pub summary: String,
  pub status: String,
  pub priority: String,
  pub assignee: String,
  pub reporter: String,
  pub created: String,
  pub updated: String,
  pub resolution: String,
  pub description: String,
}

impl TicketRow {
  /// People and the resolution default to an empty cell; everything else to
  /// `N/A`.
  pub fn from_issue(issue: &Value) -> Self {
    let fields = lookup(issue, &["fields"]).unwrap_or(&Value::Null);

    Self {
      key: text_or(issue, &["key"], NA),
      summary: text_or(fields, &["summary"], NA),
      status: text_or(fields, &["status", "name"], NA),
      priority: text_or(fields, &["priority", "name"], NA),
      assignee: text_or(fields, &["assignee", "displayName"], ""),
      reporter: text_or(fields, &["reporter", "displayName"], ""),
      created: text_or(fields, &["created"], NA),
      updated: text_or(fields, &["updated"], NA),
      resolution: text_or(fields, &["resolution", "name"], ""),
      description: text_or(fields, &["description"], NA),
    }
  }
}

/// One row of the issue+comment export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IssueRow {
  #[serde(rename = "IssueID")]
  pub issue_id: String,
  pub issue_key: String,
  pub issue_creation: String,
  pub summary: String,
  pub reporter_email: String,
  pub reporter_name: String,
  pub description: String,
  pub severity: String,
  pub issue_type: String,
  /// Public comments as a JSON array
  pub comments: String,
  pub component: String,
  pub client_type: String,
  pub affected_client: String,
  pub submitter: String,
  pub fix_response_message: String,
  pub fix_request_message: String,
  /// Never populated by the API; kept so the column set stays fixed
  pub permissions: String,
  #[serde(rename = "FixRequestID")]
  pub fix_request_id: String,
  #[serde(rename = "FixSeqID")]
  pub fix_seq_id: String,
  #[serde(rename = "DealID")]
  pub deal_id: String,
  #[serde(rename = "TrancheID")]
  pub tranche_id: String,
  pub issue_date_and_time: String,
  #[serde(rename = "GUIEmailAddress")]
  pub gui_email_address: String,
  pub current_status: String,
  pub status_time: String,
}

impl IssueRow {
  /// Project a raw search hit. IDs whose length differs from
  /// `expected_id_len` become [`INVALID_ID`].
  pub fn from_issue(issue: &Value, field_map: &FieldMap, expected_id_len: usize) -> Self {
    let fields = lookup(issue, &["fields"]).unwrap_or(&Value::Null);
    let custom = |code: &str| text_or(fields, &[code], NA);
    let status_history = field_map.status_history.as_str();

    let raw_id = text_or(issue, &["id"], NA);
    let issue_id = if raw_id.chars().count() == expected_id_len {
      raw_id
    } else {
      warn!("Issue ID '{raw_id}' does not have {expected_id_len} characters; marking it invalid");
      INVALID_ID.to_string()
    };

    Self {
      issue_id,
      issue_key: text_or(issue, &["key"], NA),
      issue_creation: text_or(fields, &["created"], NA),
      summary: text_or(fields, &["summary"], NA),
      reporter_email: text_or(fields, &["reporter", "emailAddress"], NA),
      reporter_name: text_or(fields, &["reporter", "displayName"], NA),
      description: text_or(fields, &["description"], NA),
      severity: text_or(fields, &["priority", "name"], NA),
      issue_type: text_or(fields, &["issuetype", "name"], NA),
      comments: "[]".to_string(),
      component: join_list(fields, &["components"], "name", NA),
      client_type: text_or(fields, &[field_map.client_type.as_str(), "value"], NA),
      affected_client: join_list(fields, &[field_map.affected_clients.as_str()], "value", NA),
      submitter: custom(field_map.submitter.as_str()),
      fix_response_message: custom(field_map.fix_response_message.as_str()),
      fix_request_message: custom(field_map.fix_request_message.as_str()),
      permissions: String::new(),
      fix_request_id: custom(field_map.fix_request_id.as_str()),
      fix_seq_id: custom(field_map.fix_seq_id.as_str()),
      deal_id: custom(field_map.deal_id.as_str()),
      tranche_id: custom(field_map.tranche_id.as_str()),
      issue_date_and_time: custom(field_map.issue_date_time.as_str()),
      gui_email_address: custom(field_map.gui_email.as_str()),
      current_status: text_or(fields, &[status_history, "currentStatus", "status"], NA),
      status_time: text_or(fields, &[status_history, "currentStatus", "statusDate", "iso8601"], NA),
    }
  }

  /// True when the issue ID passed validation
  pub fn has_valid_id(&self) -> bool {
    self.issue_id != INVALID_ID
  }

  /// Store the public comments as a JSON array in the `Comments` column
  pub fn attach_comments(&mut self, comments: &[PublicComment]) -> serde_json::Result<()> {
    self.comments = serde_json::to_string(comments)?;
    Ok(())
  }
}
