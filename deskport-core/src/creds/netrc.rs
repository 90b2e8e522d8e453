//! Helpers for reading credentials stored in `.netrc` files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::creds::Credentials;

/// Returns the path to the `.netrc` file for the provided home directory.
///
/// ```
/// use std::path::Path;
/// use deskport_core::creds::netrc::get_netrc_path;
///
/// assert_eq!(get_netrc_path(Path::new("/home/user")), Path::new("/home/user/.netrc"));
/// ```
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Strip scheme, path, and port from a host so it matches a `machine` entry.
pub fn normalize_host(host: &str) -> String {
  let without_scheme = host
    .trim()
    .trim_start_matches("https://")
    .trim_start_matches("http://");
  let authority = without_scheme.split('/').next().unwrap_or_default();
  authority.split(':').next().unwrap_or_default().to_ascii_lowercase()
}

/// Parses a `.netrc` file and returns credentials for the requested machine.
///
/// Both single-line (`machine host login user password pass`) and multi-line
/// layouts are accepted. A machine entry without both `login` and `password`
/// is treated as absent.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  let file = File::open(path).context("Failed to open .netrc file")?;
  let reader = BufReader::new(file);

  let mut tokens = Vec::new();
  for line in reader.lines() {
    let line = line.context("Failed to read line from .netrc")?;
    tokens.extend(line.split_whitespace().map(str::to_string));
  }

  let mut machine: Option<&str> = None;
  let mut username: Option<&str> = None;
  let mut password: Option<&str> = None;

  let mut iter = tokens.iter();
  while let Some(token) = iter.next() {
    match token.as_str() {
      "machine" | "default" => {
        if let Some(found) = credentials_for(machine, username, password, target_machine) {
          return Ok(Some(found));
        }
        machine = if token == "machine" { iter.next().map(String::as_str) } else { None };
        username = None;
        password = None;
      }
      "login" => username = iter.next().map(String::as_str),
      "password" => password = iter.next().map(String::as_str),
      _ => {}
    }
  }

  Ok(credentials_for(machine, username, password, target_machine))
}

fn credentials_for(
  machine: Option<&str>,
  username: Option<&str>,
  password: Option<&str>,
  target_machine: &str,
) -> Option<Credentials> {
  match (machine, username, password) {
    (Some(machine), Some(username), Some(password)) if machine == target_machine => Some(Credentials {
      username: username.to_string(),
      password: password.to_string(),
    }),
    _ => None,
  }
}
