//! `FieldValue`: the value carried by one side of a recorded field change.
//!
//! Task attributes have heterogeneous types (text, integers, booleans,
//! timestamps, nullable variants of each). Change history keeps them in a
//! single TEXT column, so values are JSON-encoded at the storage boundary:
//! `"Buy milk"`, `30`, `true`. SQL NULL stands for [`FieldValue::Null`]; the
//! string `"null"` is never written.
//!
//! Timestamps travel as [`FieldValue::Text`] in the canonical form produced by
//! [`timestamp_text`].

use chrono::{DateTime, SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Priority;
use crate::errors::CoreError;

/// Render a timestamp in the fixed-width form used for every stored instant
/// (`2026-10-19T08:30:00.000Z`). Fixed width keeps text ordering chronological.
#[must_use]
pub fn timestamp_text(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
    Null,
}

impl FieldValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Encode for the history table. `Null` maps to SQL NULL (`None`).
    #[must_use]
    pub fn encode(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Boolean(b) => Some(b.to_string()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Text(s) => Some(serde_json::Value::String(s.clone()).to_string()),
        }
    }

    /// Decode a history column back into a typed value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidValue` if the text is not a JSON string,
    /// integer, boolean or null.
    pub fn decode(encoded: Option<&str>) -> Result<Self, CoreError> {
        let Some(text) = encoded else {
            return Ok(Self::Null);
        };
        serde_json::from_str(text).map_err(|e| CoreError::InvalidValue {
            field: "field_value".into(),
            reason: format!("'{text}': {e}"),
        })
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Priority> for FieldValue {
    fn from(value: Priority) -> Self {
        Self::Text(value.as_str().to_string())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Text(timestamp_text(&value))
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
