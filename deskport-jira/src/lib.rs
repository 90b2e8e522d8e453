//! # Jira API Client
//!
//! Read-only client for the Jira search API and the Service Desk comment API,
//! together with the pagination loop and the row projections used by the
//! deskport exporters.

pub mod auth;
mod client;
pub mod comments;
pub mod consts;
mod endpoints;
pub mod error;
pub mod models;
pub mod pagination;
pub mod projection;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
pub use error::JiraError;
// Re-export models
pub use models::{JiraAuth, PageLimits, PublicComment, SearchOutcome, SearchQuery, StopReason};
pub use projection::{INVALID_ID, ISSUE_COLUMNS, IssueRow, TICKET_COLUMNS, TicketRow};
