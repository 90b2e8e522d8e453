//! # Export Writers
//!
//! File writers shared by both export pipelines: the truncating CSV writer for
//! the master exports, the append-only side log for non-public comments, and a
//! pretty JSON dumper for diagnostic snapshots of API responses.

mod csv;
mod json;

pub use self::csv::{NON_PUBLIC_COMMENT_HEADER, NonPublicCommentLog, NonPublicCommentRow, write_csv_rows};
pub use self::json::write_json_pretty;
