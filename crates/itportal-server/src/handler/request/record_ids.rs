//! Numeric record identifiers as they arrive in request bodies.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A row id sent either as a JSON number or as a numeric string.
///
/// Surrounding whitespace in the string form is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Unwraps a list of ids in request order.
    pub fn collect(ids: &[Self]) -> Vec<i64> {
        ids.iter().map(|id| id.0).collect()
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(id) => Ok(Self(id)),
            Repr::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| D::Error::custom(format!("invalid record id: {text:?}"))),
        }
    }
}

impl JsonSchema for RecordId {
    fn schema_name() -> Cow<'static, str> {
        "RecordId".into()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "description": "Row id as a number or a numeric string.",
            "oneOf": [
                { "type": "integer", "format": "int64" },
                { "type": "string", "pattern": "^\\s*-?[0-9]+\\s*$" }
            ]
        })
    }
}
