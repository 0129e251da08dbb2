//! Decoding of upstream JSON into the typed entities in [`crate::types`].
//!
//! Decoding goes through `serde_path_to_error` so a failure anywhere in a
//! nested document is reported once, with the full path of the offending
//! field (`items[3].album.release_date_precision`). Unknown fields are
//! ignored, literal fields reject anything outside their declared set.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// An upstream document did not have the shape we expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    /// Path of the offending field, `.` for the document root.
    pub path: String,
    /// What was expected and what was found instead.
    pub message: String,
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema validation failed at `{}`: {}", self.path, self.message)
    }
}

impl std::error::Error for SchemaValidationError {}

/// Decodes an untyped JSON document into `T`.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use statify::{schema, types::Followers};
///
/// let followers: Followers = schema::parse(json!({ "href": null, "total": 12 }))?;
/// assert_eq!(followers.total, 12);
/// ```
pub fn parse<T: DeserializeOwned>(value: Value) -> Result<T, SchemaValidationError> {
    serde_path_to_error::deserialize(value).map_err(|err| SchemaValidationError {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Decodes a raw response body into `T`.
///
/// A body that is not JSON at all fails at the document root.
pub fn parse_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SchemaValidationError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|err| SchemaValidationError {
        path: ".".to_string(),
        message: err.to_string(),
    })?;
    parse(value)
}
