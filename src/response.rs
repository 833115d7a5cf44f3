//! Lookup outcome types.
//!
//! A lookup either yields the matched [`StoredCredential`] or a [`FailureInfo`]
//! with the ordered error log. Both render to JSON: the credential as-is, the
//! failure as `{"Status": "Failed", "ErrorLog": [...]}`.

use crate::StoredCredential;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Outcome of a single lookup.
pub type LookupResult = std::result::Result<StoredCredential, FailureInfo>;

/// Lookup status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// A credential was found
    Success,
    /// The lookup failed; see the error log
    Failed,
}

impl Status {
    /// Status of a lookup result.
    pub fn of(result: &LookupResult) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(_) => Self::Failed,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Failure record with every error collected during the lookup, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FailureInfo {
    #[serde(deserialize_with = "failed_only")]
    status: Status,
    /// Collected error messages
    pub error_log: Vec<String>,
}

impl FailureInfo {
    /// Creates an empty failure record.
    pub fn new() -> Self {
        Self {
            status: Status::Failed,
            error_log: Vec::new(),
        }
    }

    /// Always [`Status::Failed`].
    pub fn status(&self) -> Status {
        self.status
    }

    /// Appends a message to the error log.
    pub fn push(&mut self, message: impl Into<String>) {
        self.error_log.push(message.into());
    }

    /// Builder form of [`push`](Self::push).
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.push(message);
        self
    }
}

impl Default for FailureInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FailureInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.error_log.join("; "))
    }
}

impl std::error::Error for FailureInfo {}

fn failed_only<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Status, D::Error> {
    match Status::deserialize(deserializer)? {
        Status::Failed => Ok(Status::Failed),
        other => Err(serde::de::Error::custom(format!(
            "failure record with status {}",
            other
        ))),
    }
}

/// Renders a lookup result as JSON.
///
/// # Example
///
/// ```
/// use credfetch::response::{to_json, FailureInfo};
///
/// let result = Err(FailureInfo::new().with_error("No credential exists for the given user."));
/// let json = to_json(&result).unwrap();
///
/// assert_eq!(json["Status"], "Failed");
/// assert_eq!(json["ErrorLog"][0], "No credential exists for the given user.");
/// ```
pub fn to_json(result: &LookupResult) -> serde_json::Result<serde_json::Value> {
    match result {
        Ok(credential) => serde_json::to_value(credential),
        Err(failure) => serde_json::to_value(failure),
    }
}
