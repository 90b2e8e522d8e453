//! Constants for the deskport Jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("deskport/", env!("CARGO_PKG_VERSION"));

/// Path of the Jira issue search endpoint
pub const SEARCH_PATH: &str = "/rest/api/3/search";

/// Path prefix of the Service Desk request endpoints
pub const SERVICE_DESK_REQUEST_PATH: &str = "/rest/servicedeskapi/request";

/// Page size requested from the Service Desk comment endpoint
pub const COMMENT_PAGE_SIZE: usize = 50;
