//! Null-safe traversal of untyped JSON documents.
//!
//! Remote ticket payloads are treated as untrusted shapes: any step of a
//! lookup may be missing, `null`, or of the wrong type. Every helper here
//! resolves such cases to `None` (or a caller-provided default) instead of
//! failing.

use serde_json::Value;

/// Walk `root` following `path`, returning `None` as soon as a step is missing,
/// `null`, or not an object.
///
/// # Examples
///
/// ```
/// use deskport_core::json_path::lookup;
/// use serde_json::json;
///
/// let issue = json!({"fields": {"status": {"name": "Open"}, "assignee": null}});
/// assert_eq!(lookup(&issue, &["fields", "status", "name"]), Some(&json!("Open")));
/// assert_eq!(lookup(&issue, &["fields", "assignee", "displayName"]), None);
/// ```
pub fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
  let mut current = root;
  for key in path {
    current = current.as_object()?.get(*key)?;
  }
  if current.is_null() { None } else { Some(current) }
}

/// Render a JSON value as a single CSV cell.
///
/// Strings are used verbatim; any other non-null value is rendered as compact
/// JSON text (numbers, booleans, and rich-text documents alike).
pub fn render(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(text) => Some(text.clone()),
    other => Some(other.to_string()),
  }
}

/// Look up `path` and render it, falling back to `default` when anything along
/// the way is absent.
pub fn text_or(root: &Value, path: &[&str], default: &str) -> String {
  lookup(root, path)
    .and_then(render)
    .unwrap_or_else(|| default.to_string())
}

/// Join the `key` of every element of the list found at `path` with `", "`.
///
/// A missing or non-list value is treated as an empty list. Elements lacking
/// `key` contribute `missing`.
pub fn join_list(root: &Value, path: &[&str], key: &str, missing: &str) -> String {
  let Some(items) = lookup(root, path).and_then(Value::as_array) else {
    return String::new();
  };

  items
    .iter()
    .map(|item| text_or(item, &[key], missing))
    .collect::<Vec<_>>()
    .join(", ")
}
