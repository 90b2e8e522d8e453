use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

/// Column names of the non-public comment side file.
pub const NON_PUBLIC_COMMENT_HEADER: [&str; 2] = ["ticket_ID", "Non_public_comment"];

/// Write `rows` to a freshly truncated CSV file.
///
/// `header` must list the columns in the field order of `T`; it is written
/// explicitly so an empty `rows` slice still produces a header-only file.
pub fn write_csv_rows<T: Serialize>(path: &Path, rows: &[T], header: &[&str]) -> Result<()> {
  let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
  let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

  writer
    .write_record(header)
    .with_context(|| format!("Failed to write header to {}", path.display()))?;
  for row in rows {
    writer
      .serialize(row)
      .with_context(|| format!("Failed to write row to {}", path.display()))?;
  }
  writer
    .flush()
    .with_context(|| format!("Failed to flush {}", path.display()))?;

  debug!("Wrote {} rows to {}", rows.len(), path.display());
  Ok(())
}

/// One row of the non-public comment side file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonPublicCommentRow {
  #[serde(rename = "ticket_ID")]
  pub ticket_id: String,
  #[serde(rename = "Non_public_comment")]
  pub body: String,
}

/// Append-only CSV log of comments that must not appear in the main export.
///
/// The file is reopened in append mode for every batch, and the header is
/// written only when the file is empty at that moment, so repeated batches
/// within a run (or across runs) never duplicate it.
#[derive(Debug, Clone)]
pub struct NonPublicCommentLog {
  path: PathBuf,
}

impl NonPublicCommentLog {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Append `rows`, writing the header first if the file is empty.
  pub fn append(&mut self, rows: &[NonPublicCommentRow]) -> Result<()> {
    if rows.is_empty() {
      return Ok(());
    }

    let file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)
      .with_context(|| format!("Failed to open {}", self.path.display()))?;
    let is_empty = file
      .metadata()
      .with_context(|| format!("Failed to stat {}", self.path.display()))?
      .len()
      == 0;

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    if is_empty {
      writer
        .write_record(NON_PUBLIC_COMMENT_HEADER)
        .with_context(|| format!("Failed to write to {}", self.path.display()))?;
    }
    for row in rows {
      writer
        .serialize(row)
        .with_context(|| format!("Failed to write to {}", self.path.display()))?;
    }
    writer
      .flush()
      .with_context(|| format!("Failed to flush {}", self.path.display()))?;

    Ok(())
  }
}
