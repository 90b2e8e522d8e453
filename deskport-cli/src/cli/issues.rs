//! # Issues Command
//!
//! Exports issues with their public comments inlined as JSON, while
//! non-public comments are diverted to an append-only side file.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{ArgGroup, Args};
use deskport_core::{
  ExportConfig, FieldMap, NonPublicCommentLog, format_path, print_info, print_success, print_warning,
  write_csv_rows, write_json_pretty,
};
use deskport_jira::{ISSUE_COLUMNS, IssueRow, JiraClient, PageLimits, SearchQuery};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::cli::ConnectionArgs;
use crate::clients::create_jira_runtime_and_client;

/// Arguments for the issues command
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("selection").required(true).args(["project", "jql"])))]
pub struct IssuesArgs {
  /// Project key to export, newest issues first
  #[arg(short = 'p', long)]
  pub project: Option<String>,

  /// Raw JQL selecting the issues to export
  #[arg(long)]
  pub jql: Option<String>,

  /// Issues requested per search page [config: page_size, default: 1]
  #[arg(long, value_name = "N")]
  pub page_size: Option<usize>,

  /// Maximum number of issues to export [config: limit, default: 1500]
  #[arg(long, value_name = "N")]
  pub limit: Option<usize>,

  /// Master CSV file [config: output, default: issues_with_comments.csv]
  #[arg(short = 'o', long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Append-only CSV receiving non-public comments [config: comments_file,
  /// default: non_public_comments.csv]
  #[arg(long, value_name = "FILE")]
  pub comments_file: Option<PathBuf>,

  /// Save every raw search response as response_<startAt>.json in DIR
  #[arg(long, value_name = "DIR")]
  pub dump_dir: Option<PathBuf>,

  #[command(flatten)]
  pub connection: ConnectionArgs,
}

/// Everything an issue export needs once flags and config are merged
#[derive(Debug, Clone)]
pub struct IssueExport {
  pub query: SearchQuery,
  pub limits: PageLimits,
  pub expected_id_length: usize,
  pub fields: FieldMap,
  pub output: PathBuf,
  pub comments_file: PathBuf,
  pub dump_dir: Option<PathBuf>,
}

impl IssueExport {
  /// Merge command-line arguments over the loaded configuration
  pub fn from_args(args: &IssuesArgs, config: &ExportConfig) -> Self {
    let query = match (&args.jql, &args.project) {
      (Some(jql), _) => SearchQuery::new(jql.clone()),
      (None, Some(project)) => SearchQuery::for_project_newest_first(project),
      (None, None) => SearchQuery::new(String::new()),
    };

    Self {
      query,
      limits: PageLimits::bounded(
        args.page_size.unwrap_or(config.page_size),
        args.limit.unwrap_or(config.limit),
      ),
      expected_id_length: config.expected_id_length,
      fields: config.fields.clone(),
      output: args.output.clone().unwrap_or_else(|| config.output.clone()),
      comments_file: args
        .comments_file
        .clone()
        .unwrap_or_else(|| config.comments_file.clone()),
      dump_dir: args.dump_dir.clone(),
    }
  }
}

/// Handle the issues command
pub fn handle_issues_command(args: IssuesArgs, config: &ExportConfig) -> Result<()> {
  let plan = IssueExport::from_args(&args, config);
  let (rt, client) = create_jira_runtime_and_client(&args.connection, config)?;

  rt.block_on(export_issues(&client, &plan))?;

  print_success(&format!("Data has been exported to {}", plan.output.display()));
  if plan.comments_file.exists() {
    print_info(&format!(
      "Non-public comments are in {}",
      format_path(&plan.comments_file.display().to_string())
    ));
  }
  Ok(())
}

/// Run the issue+comment export described by `plan`.
///
/// All search pages are fetched before any comments. Returns the number of
/// rows written to the master CSV.
pub async fn export_issues(client: &JiraClient, plan: &IssueExport) -> Result<usize> {
  let dump_dir = plan.dump_dir.as_deref();
  let outcome = client
    .search_all_observed(&plan.query, &plan.limits, |start_at, body| {
      if let Some(dir) = dump_dir {
        dump_response(dir, start_at, body);
      }
    })
    .await;

  if outcome.first_page_failed() {
    bail!(
      "Failed to fetch issues for '{}': {}",
      plan.query.jql,
      outcome.failure().unwrap_or("unknown error")
    );
  }
  if let Some(reason) = outcome.failure() {
    print_warning(&format!(
      "Search stopped early after {} issues: {reason}",
      outcome.issues.len()
    ));
  }

  let mut log = NonPublicCommentLog::new(&plan.comments_file);
  let total = outcome.issues.len();
  let mut rows = Vec::with_capacity(total);

  for (index, issue) in outcome.issues.iter().enumerate() {
    let mut row = IssueRow::from_issue(issue, &plan.fields, plan.expected_id_length);
    info!("Issue ID: {}", row.issue_id);
    info!("Issue Key: {}", row.issue_key);

    if row.has_valid_id() {
      let comments = client.get_comments(&row.issue_id, &mut log).await;
      if let Err(e) = row.attach_comments(&comments) {
        error!("Failed to encode comments for issue {}: {e}", row.issue_key);
      }
    } else {
      warn!("Skipping comments for issue {} because its ID is invalid", row.issue_key);
    }

    info!("Processed issue {}/{total} - Issue ID: {}", index + 1, row.issue_id);
    rows.push(row);
  }

  write_csv_rows(&plan.output, &rows, &ISSUE_COLUMNS)?;
  Ok(rows.len())
}

fn dump_response(dir: &Path, start_at: usize, body: &Value) {
  let path = dir.join(format!("response_{start_at}.json"));
  if let Err(e) = write_json_pretty(body, &path) {
    warn!("Failed to save raw response to {}: {e:#}", path.display());
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use deskport_jira::{INVALID_ID, create_jira_client};
  use deskport_test_utils::jira::{comment, comment_page, issue, search_page};
  use serde_json::json;
  use tempfile::TempDir;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  fn plan(temp_dir: &TempDir, page_size: usize, limit: usize) -> IssueExport {
    IssueExport {
      query: SearchQuery::for_project_newest_first("DESK"),
      limits: PageLimits::bounded(page_size, limit),
      expected_id_length: 6,
      fields: FieldMap::default(),
      output: temp_dir.path().join("issues_with_comments.csv"),
      comments_file: temp_dir.path().join("non_public_comments.csv"),
      dump_dir: None,
    }
  }

  async fn mount_search(server: &MockServer, start_at: usize, issues: Vec<Value>) {
    Mock::given(method("GET"))
      .and(path("/rest/api/3/search"))
      .and(query_param("startAt", start_at.to_string()))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_page(issues)))
      .expect(1)
      .mount(server)
      .await;
  }

  async fn mount_comments(server: &MockServer, ticket_id: &str, comments: Vec<Value>) {
    Mock::given(method("GET"))
      .and(path(format!("/rest/servicedeskapi/request/{ticket_id}/comment")))
      .respond_with(ResponseTemplate::new(200).set_body_json(comment_page(comments)))
      .expect(1)
      .mount(server)
      .await;
  }

  fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    assert_eq!(reader.headers().unwrap(), &csv::StringRecord::from(ISSUE_COLUMNS.to_vec()));
    reader.records().map(Result::unwrap).collect()
  }

  #[test]
  fn test_flags_override_config() {
    let config = ExportConfig {
      page_size: 10,
      limit: 20,
      ..ExportConfig::default()
    };
    let args = IssuesArgs {
      project: Some("DESK".to_string()),
      jql: None,
      page_size: None,
      limit: Some(5),
      output: Some(PathBuf::from("custom.csv")),
      comments_file: None,
      dump_dir: None,
      connection: ConnectionArgs {
        host: None,
        username: None,
        api_token: None,
        ca_cert: None,
      },
    };

    let plan = IssueExport::from_args(&args, &config);
    assert_eq!(plan.query.jql, "project = \"DESK\" ORDER BY created DESC");
    assert_eq!(plan.limits, PageLimits::bounded(10, 5));
    assert_eq!(plan.output, PathBuf::from("custom.csv"));
    assert_eq!(plan.comments_file, PathBuf::from("non_public_comments.csv"));
  }

  #[tokio::test]
  async fn test_export_with_public_and_internal_comments() {
    let server = MockServer::start().await;
    mount_search(&server, 0, vec![issue("100001", "DESK-1")]).await;
    mount_search(&server, 1, vec![issue("100002", "DESK-2")]).await;
    mount_search(&server, 2, vec![]).await;
    mount_comments(
      &server,
      "100001",
      vec![
        comment("1", "Hello", true),
        comment("2", "internal note", false),
        comment("3", "Fixed", true),
      ],
    )
    .await;
    mount_comments(&server, "100002", vec![]).await;

    let temp_dir = TempDir::new().unwrap();
    let plan = plan(&temp_dir, 1, 10);
    let client = create_jira_client(&server.uri(), "user@example.com", "token");

    let written = export_issues(&client, &plan).await.unwrap();
    assert_eq!(written, 2);

    let rows = read_rows(&plan.output);
    assert_eq!(&rows[0][0], "100001");
    assert_eq!(&rows[0][1], "DESK-1");
    let comments: Vec<Value> = serde_json::from_str(&rows[0][9]).unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["body"], json!("Hello"));
    assert_eq!(comments[1]["author"], json!("Author 3"));
    assert!(!rows[0][9].contains("internal note"));
    assert_eq!(&rows[1][9], "[]");

    let side = fs::read_to_string(&plan.comments_file).unwrap();
    assert_eq!(side, "ticket_ID,Non_public_comment\n100001,internal note\n");
  }

  #[tokio::test]
  async fn test_invalid_id_skips_comment_fetch() {
    let server = MockServer::start().await;
    mount_search(&server, 0, vec![issue("42", "DESK-42")]).await;
    Mock::given(method("GET"))
      .and(path("/rest/servicedeskapi/request/42/comment"))
      .respond_with(ResponseTemplate::new(200).set_body_json(comment_page(vec![])))
      .expect(0)
      .mount(&server)
      .await;

    let temp_dir = TempDir::new().unwrap();
    let plan = plan(&temp_dir, 1, 1);
    let client = create_jira_client(&server.uri(), "user@example.com", "token");

    export_issues(&client, &plan).await.unwrap();

    let rows = read_rows(&plan.output);
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], INVALID_ID);
    assert_eq!(&rows[0][9], "[]");
    assert!(!plan.comments_file.exists());
  }

  #[tokio::test]
  async fn test_comment_failure_is_scoped_to_issue() {
    let server = MockServer::start().await;
    mount_search(&server, 0, vec![issue("100001", "DESK-1"), issue("100002", "DESK-2")]).await;
    Mock::given(method("GET"))
      .and(path("/rest/servicedeskapi/request/100001/comment"))
      .respond_with(ResponseTemplate::new(500))
      .expect(1)
      .mount(&server)
      .await;
    mount_comments(&server, "100002", vec![comment("7", "Thanks", true)]).await;

    let temp_dir = TempDir::new().unwrap();
    let plan = plan(&temp_dir, 2, 2);
    let client = create_jira_client(&server.uri(), "user@example.com", "token");

    export_issues(&client, &plan).await.unwrap();

    let rows = read_rows(&plan.output);
    assert_eq!(&rows[0][9], "[]");
    assert!(rows[1][9].contains("Thanks"));
  }

  #[tokio::test]
  async fn test_dump_dir_receives_raw_pages() {
    let server = MockServer::start().await;
    mount_search(&server, 0, vec![issue("100001", "DESK-1")]).await;
    mount_comments(&server, "100001", vec![]).await;

    let temp_dir = TempDir::new().unwrap();
    let dump_dir = TempDir::new().unwrap();
    let plan = IssueExport {
      dump_dir: Some(dump_dir.path().to_path_buf()),
      ..plan(&temp_dir, 1, 1)
    };
    let client = create_jira_client(&server.uri(), "user@example.com", "token");

    export_issues(&client, &plan).await.unwrap();

    let dumped: Value =
      serde_json::from_str(&fs::read_to_string(dump_dir.path().join("response_0.json")).unwrap()).unwrap();
    assert_eq!(dumped["issues"][0]["key"], json!("DESK-1"));
  }

  #[tokio::test]
  async fn test_later_search_failure_keeps_partial_export() {
    let server = MockServer::start().await;
    mount_search(&server, 0, vec![issue("100001", "DESK-1")]).await;
    Mock::given(method("GET"))
      .and(path("/rest/api/3/search"))
      .and(query_param("startAt", "1"))
      .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
      .expect(1)
      .mount(&server)
      .await;
    mount_comments(&server, "100001", vec![comment("1", "On it", true)]).await;

    let temp_dir = TempDir::new().unwrap();
    let plan = plan(&temp_dir, 1, 5);
    let client = create_jira_client(&server.uri(), "user@example.com", "token");

    let written = export_issues(&client, &plan).await.unwrap();
    assert_eq!(written, 1);

    let rows = read_rows(&plan.output);
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][1], "DESK-1");
    assert!(rows[0][9].contains("On it"));
  }

  #[tokio::test]
  async fn test_first_page_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/rest/api/3/search"))
      .respond_with(ResponseTemplate::new(401))
      .expect(1)
      .mount(&server)
      .await;

    let temp_dir = TempDir::new().unwrap();
    let plan = plan(&temp_dir, 1, 5);
    let client = create_jira_client(&server.uri(), "user@example.com", "token");

    let error = export_issues(&client, &plan).await.unwrap_err().to_string();
    assert!(error.contains("Authentication failed"));
    assert!(!plan.output.exists());
  }
}
