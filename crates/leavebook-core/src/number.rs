//! Validation of user-entered quantities (credits, hours).
//!
//! Malformed input is rejected with [`Error::InvalidNumeric`]; it is never
//! coerced to zero.

use crate::{Error, Result};

/// Accept `value` if it is finite and not negative.
pub fn check(field: &'static str, value: f64) -> Result<f64> {
  if value.is_finite() && value >= 0.0 {
    Ok(value)
  } else {
    Err(Error::InvalidNumeric { field, value: value.to_string() })
  }
}

/// Parse a textual quantity, as submitted by a form field.
pub fn parse(field: &'static str, raw: &str) -> Result<f64> {
  let value = raw
    .trim()
    .parse::<f64>()
    .map_err(|_| Error::InvalidNumeric { field, value: raw.to_owned() })?;
  check(field, value).map_err(|_| Error::InvalidNumeric { field, value: raw.to_owned() })
}
