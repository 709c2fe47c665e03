//! Users and the fixed roster they are drawn from.
//!
//! Users are never created or deleted through the ledger; the roster is
//! configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The roster used when none is configured.
pub const DEFAULT_USERS: &[&str] = &["keerthana", "natasha"];

/// A normalised (trimmed, lowercase) user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
  fn normalise(raw: &str) -> String { raw.trim().to_lowercase() }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl AsRef<str> for UserId {
  fn as_ref(&self) -> &str { &self.0 }
}

/// The closed set of users the ledger serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
  users: Vec<UserId>,
}

impl Roster {
  /// Build a roster, normalising identifiers and dropping blanks and
  /// duplicates. Order is preserved.
  pub fn new<I, S>(users: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut roster: Vec<UserId> = Vec::new();
    for raw in users {
      let id = UserId(UserId::normalise(raw.as_ref()));
      if !id.0.is_empty() && !roster.contains(&id) {
        roster.push(id);
      }
    }
    Self { users: roster }
  }

  pub fn users(&self) -> &[UserId] { &self.users }

  /// Resolve a raw identifier (e.g. a URL segment) against the roster.
  pub fn resolve(&self, raw: &str) -> Result<UserId> {
    let wanted = UserId::normalise(raw);
    self
      .users
      .iter()
      .find(|u| u.0 == wanted)
      .cloned()
      .ok_or_else(|| Error::UnknownUser(raw.to_owned()))
  }
}

impl Default for Roster {
  fn default() -> Self { Self::new(DEFAULT_USERS) }
}
