//! Version Label Value Object
//!
//! Immutable identifier tying one uploaded artifact to one application version.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Provider limit on version label length
const MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionLabelError {
    #[error("version label must not be empty")]
    Empty,
    #[error("version label exceeds {MAX_LEN} characters")]
    TooLong,
    #[error("version label must not contain '/'")]
    Slash,
}

/// Application version label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionLabel(String);

impl VersionLabel {
    /// Validate a caller-supplied label
    pub fn parse(value: &str) -> Result<Self, VersionLabelError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(VersionLabelError::Empty);
        }
        if value.chars().count() > MAX_LEN {
            return Err(VersionLabelError::TooLong);
        }
        // The label becomes part of the artifact object key
        if value.contains('/') {
            return Err(VersionLabelError::Slash);
        }
        Ok(Self(value.to_string()))
    }

    /// Default label derived from the current time, e.g. `v20261019-143005`
    pub fn timestamped(now: DateTime<Utc>) -> Self {
        Self(format!("v{}", now.format("%Y%m%d-%H%M%S")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
