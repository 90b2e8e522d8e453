//! # Deskport Core Library
//!
//! Shared building blocks for the deskport workspace: configuration loading,
//! credential lookup, host normalisation, null-safe JSON traversal, and the
//! CSV/JSON writers used by both export pipelines.

pub mod config;
pub mod creds;
pub mod export;
pub mod json_path;
pub mod output;
pub mod url;

// Re-export the types most callers need
pub use config::{ConfigDirs, ExportConfig, FieldMap, get_config_dirs};
pub use creds::Credentials;
pub use export::{NonPublicCommentLog, NonPublicCommentRow, write_csv_rows, write_json_pretty};
pub use output::{format_path, print_info, print_success, print_warning};
