//! Small input helpers shared by the resource services

use serde::{Deserialize, Deserializer};

use crate::error::{CoreError, CoreResult};

/// Deserialize a nullable patch field.
///
/// Use with `#[serde(default, deserialize_with = "nullable")]` on an
/// `Option<Option<T>>`: a missing key stays `None`, an explicit `null`
/// becomes `Some(None)` and a value becomes `Some(Some(v))`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trim a required text field, failing when nothing is left
pub fn required_text(field: &str, value: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim optional text, mapping blank input to `None`
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reject NaN and infinities
pub fn finite_amount(value: f64) -> CoreResult<f64> {
    if !value.is_finite() {
        return Err(CoreError::validation("amount must be a finite number"));
    }
    Ok(value)
}
