//! Request field types shared by the handlers.
//!
//! The tracker's forms submit every field as text, so numeric fields accept
//! either a JSON number or a numeric string. Either way the value goes
//! through [`leavebook_core::number`] and is rejected, never defaulted, when
//! malformed.

use chrono::NaiveDate;
use leavebook_core::{Error as CoreError, number};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// A numeric field as submitted. Any JSON shape deserialises; anything other
/// than a number or numeric string fails in [`NumberInput::resolve`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
  Number(f64),
  Text(String),
  Other(Value),
}

impl Default for NumberInput {
  /// An absent field.
  fn default() -> Self { Self::Other(Value::Null) }
}

impl NumberInput {
  pub fn resolve(&self, field: &'static str) -> Result<f64, ApiError> {
    let value = match self {
      Self::Number(n) => number::check(field, *n)?,
      Self::Text(s) => number::parse(field, s)?,
      Self::Other(v) => {
        return Err(CoreError::InvalidNumeric { field, value: v.to_string() }.into());
      }
    };
    Ok(value)
  }
}

/// An optional `YYYY-MM-DD` date; blank means "not given".
pub fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
  match raw.map(str::trim) {
    None | Some("") => Ok(None),
    Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .map(Some)
      .map_err(|_| ApiError::BadRequest(format!("invalid date {s:?} (expected YYYY-MM-DD)"))),
  }
}
