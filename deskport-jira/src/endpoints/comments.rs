//! # Service Desk Comment Endpoint

use serde_json::Value;

use crate::client::JiraClient;
use crate::consts::{COMMENT_PAGE_SIZE, SERVICE_DESK_REQUEST_PATH};
use crate::error::JiraError;

impl JiraClient {
  /// Fetch every comment on a Service Desk request, following `isLastPage`.
  ///
  /// Comments are returned raw and in API order. A failure on any page fails
  /// the whole call so that callers never see a partial comment list.
  pub async fn fetch_request_comments(&self, ticket_id: &str) -> Result<Vec<Value>, JiraError> {
    let path = format!("{SERVICE_DESK_REQUEST_PATH}/{ticket_id}/comment");
    let mut comments = Vec::new();

    loop {
      let page = self
        .get_json(
          &path,
          &[
            ("start", comments.len().to_string()),
            ("limit", COMMENT_PAGE_SIZE.to_string()),
          ],
        )
        .await?;

      let values = page.get("values").and_then(Value::as_array);
      let page_len = values.map_or(0, Vec::len);
      comments.extend(values.into_iter().flatten().cloned());

      // Older servers omit the flag; treat that as a single page
      let is_last_page = page.get("isLastPage").and_then(Value::as_bool).unwrap_or(true);
      if is_last_page || page_len == 0 {
        return Ok(comments);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use deskport_test_utils::jira;
  use serde_json::json;
  use wiremock::matchers::{basic_auth, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::create_jira_client;

  #[tokio::test]
  async fn test_fetch_request_comments_single_page() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/servicedeskapi/request/100001/comment"))
      .and(basic_auth("test_user", "test_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(jira::comment_page(vec![
        jira::comment("1", "first", true),
        jira::comment("2", "second", false),
      ])))
      .expect(1)
      .mount(&mock_server)
      .await;

    let comments = client.fetch_request_comments("100001").await?;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1]["body"], "second");

    Ok(())
  }

  #[tokio::test]
  async fn test_fetch_request_comments_follows_pages() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/servicedeskapi/request/100001/comment"))
      .and(query_param("start", "0"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "values": [jira::comment("1", "first", true)],
        "isLastPage": false,
      })))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/servicedeskapi/request/100001/comment"))
      .and(query_param("start", "1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "values": [jira::comment("2", "second", true)],
        "isLastPage": true,
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let comments = client.fetch_request_comments("100001").await?;
    let ids: Vec<_> = comments.iter().map(|c| c["id"].as_str().unwrap_or_default()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    Ok(())
  }

  #[tokio::test]
  async fn test_fetch_request_comments_not_found() {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/servicedeskapi/request/999999/comment"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&mock_server)
      .await;

    let result = client.fetch_request_comments("999999").await;
    assert!(result.unwrap_err().to_string().contains("not found"));
  }
}
