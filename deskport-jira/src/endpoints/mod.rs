//! # Jira API Endpoints
//!
//! Raw page requests against the issue search and Service Desk comment
//! resources. Pagination and failure policy live one level up.

pub mod comments;
pub mod search;
