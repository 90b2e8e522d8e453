use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::info;

/// Pretty-print `data` to `path` with sorted keys and a four-space indent.
pub fn write_json_pretty<T: Serialize>(data: &T, path: &Path) -> Result<()> {
  let value = sort_keys(serde_json::to_value(data).context("Failed to convert data to JSON")?);

  let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
  let mut out = BufWriter::new(file);
  let mut serializer = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
  value
    .serialize(&mut serializer)
    .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
  out
    .flush()
    .with_context(|| format!("Failed to flush {}", path.display()))?;

  info!("JSON data written to {}", path.display());
  Ok(())
}

/// Rebuild every object with its keys in ascending order.
fn sort_keys(value: Value) -> Value {
  match value {
    Value::Object(map) => {
      let mut entries: Vec<(String, Value)> = map.into_iter().collect();
      entries.sort_by(|a, b| a.0.cmp(&b.0));
      Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect::<Map<_, _>>())
    }
    Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
    other => other,
  }
}
