//! # Tickets Command
//!
//! Bulk export of every ticket in a project into the ticket CSV schema.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Args;
use deskport_core::{ExportConfig, print_success, print_warning, write_csv_rows};
use deskport_jira::{JiraClient, PageLimits, SearchQuery, TICKET_COLUMNS, TicketRow};
use tracing::info;

use crate::cli::ConnectionArgs;
use crate::clients::create_jira_runtime_and_client;

/// Tickets requested per search page.
pub const TICKET_PAGE_SIZE: usize = 50;

/// Arguments for the tickets command
#[derive(Args, Debug)]
pub struct TicketsArgs {
  /// Project key to export, e.g. DESK
  #[arg(short = 'p', long)]
  pub project: String,

  /// CSV file to write
  #[arg(short = 'o', long, value_name = "FILE")]
  pub output: PathBuf,

  #[command(flatten)]
  pub connection: ConnectionArgs,
}

/// Handle the tickets command
pub fn handle_tickets_command(args: TicketsArgs, config: &ExportConfig) -> Result<()> {
  let (rt, client) = create_jira_runtime_and_client(&args.connection, config)?;

  rt.block_on(export_tickets(&client, &args.project, &args.output))?;

  print_success(&format!("Jira tickets exported to {}", args.output.display()));
  Ok(())
}

/// Fetch every ticket of `project` and write them to `output`.
///
/// Returns the number of rows written. A failure after the first page still
/// writes what was fetched; a failure of the first page is an error and
/// leaves `output` untouched.
pub async fn export_tickets(client: &JiraClient, project: &str, output: &Path) -> Result<usize> {
  let query = SearchQuery::for_project(project);
  let outcome = client
    .search_all(&query, &PageLimits::unbounded(TICKET_PAGE_SIZE))
    .await;

  if outcome.first_page_failed() {
    bail!(
      "Failed to fetch tickets for project {project}: {}",
      outcome.failure().unwrap_or("unknown error")
    );
  }
  if let Some(reason) = outcome.failure() {
    print_warning(&format!(
      "Export stopped early after {} tickets: {reason}",
      outcome.issues.len()
    ));
  }

  let rows: Vec<TicketRow> = outcome.issues.iter().map(TicketRow::from_issue).collect();
  write_csv_rows(output, &rows, &TICKET_COLUMNS)?;
  info!("Wrote {} tickets to {}", rows.len(), output.display());

  Ok(rows.len())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use deskport_jira::create_jira_client;
  use deskport_test_utils::jira::{issues, search_page};
  use serde_json::json;
  use tempfile::TempDir;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  async fn mount_ticket_page(server: &MockServer, start_at: usize, count: usize) {
    Mock::given(method("GET"))
      .and(path("/rest/api/3/search"))
      .and(query_param("jql", "project = DESK"))
      .and(query_param("startAt", start_at.to_string()))
      .and(query_param("maxResults", "50"))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_page(issues(start_at, count))))
      .expect(1)
      .mount(server)
      .await;
  }

  #[tokio::test]
  async fn test_export_120_tickets_in_three_requests() {
    let server = MockServer::start().await;
    mount_ticket_page(&server, 0, 50).await;
    mount_ticket_page(&server, 50, 50).await;
    mount_ticket_page(&server, 100, 20).await;

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("tickets.csv");
    let client = create_jira_client(&server.uri(), "user@example.com", "token");

    let written = export_tickets(&client, "DESK", &output).await.unwrap();
    assert_eq!(written, 120);

    let content = fs::read_to_string(&output).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some(TICKET_COLUMNS.join(",").as_str()));
    assert_eq!(lines.count(), 120);
    assert!(content.contains("DESK-119"));
  }

  #[tokio::test]
  async fn test_first_page_failure_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/rest/api/3/search"))
      .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
      .expect(1)
      .mount(&server)
      .await;

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("tickets.csv");
    let client = create_jira_client(&server.uri(), "user@example.com", "token");

    assert!(export_tickets(&client, "DESK", &output).await.is_err());
    assert!(!output.exists());
  }

  #[tokio::test]
  async fn test_later_failure_keeps_partial_export() {
    let server = MockServer::start().await;
    mount_ticket_page(&server, 0, 50).await;
    Mock::given(method("GET"))
      .and(path("/rest/api/3/search"))
      .and(query_param("startAt", "50"))
      .respond_with(ResponseTemplate::new(503).set_body_json(json!({"errorMessages": ["busy"]})))
      .expect(1)
      .mount(&server)
      .await;

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("tickets.csv");
    let client = create_jira_client(&server.uri(), "user@example.com", "token");

    let written = export_tickets(&client, "DESK", &output).await.unwrap();
    assert_eq!(written, 50);
    assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 51);
  }
}
