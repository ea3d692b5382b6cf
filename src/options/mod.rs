//! Tagged option values for the run-flag builder.
//!
//! The templating layer hands over one JSON object per container: option
//! name to value. Values are heterogeneous (booleans, strings, numbers,
//! nested lists, explicit nulls), so they are modeled as a tagged enum
//! instead of relying on truthiness coercion. Each consumer in
//! [`crate::flags`] pattern-matches on the shape it expects.
//!
//! Absence has two spellings with identical meaning: the key is missing
//! from the map, or the key maps to an explicit `null`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single option value in its tagged form.
///
/// Numbers deserialize into [`OptionValue::Scalar`] using their decimal
/// string form, since every flag template ultimately interpolates text.
/// JSON objects are rejected at deserialization time -- no flag consumes
/// a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Explicit `null`; behaves exactly like a missing key.
    Absent,
    /// A boolean, used by presence-style flags such as `privileged`.
    Bool(bool),
    /// A string (or stringified number).
    Scalar(String),
    /// A list of values; may nest, and is flattened on consumption.
    List(Vec<OptionValue>),
}

impl OptionValue {
    /// Human-readable shape name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "null",
            Self::Bool(_) => "boolean",
            Self::Scalar(_) => "string",
            Self::List(_) => "list",
        }
    }

    /// Deep-flatten this value into `out`, keeping only entries that are
    /// present under the falsy-is-absent rules.
    ///
    /// Empty strings, `false`, and nulls are dropped; nested lists are
    /// walked recursively; `true` renders as the literal `true`, matching
    /// how the generated flag would interpolate it.
    pub fn flatten_into<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Absent | Self::Bool(false) => {}
            Self::Bool(true) => out.push("true"),
            Self::Scalar(s) if s.is_empty() => {}
            Self::Scalar(s) => out.push(s),
            Self::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<serde_json::Value> for OptionValue {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(Self::Absent),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Number(n) => Ok(Self::Scalar(n.to_string())),
            Value::String(s) => Ok(Self::Scalar(s)),
            Value::Array(items) => items
                .into_iter()
                .map(Self::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Object(_) => {
                Err("mapping values are not supported as option values".to_string())
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// The full option map for one container.
///
/// Keys the builder does not recognize are carried but ignored. Lookup
/// never fails: a missing key reads as [`OptionValue::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    entries: HashMap<String, OptionValue>,
}

static ABSENT: OptionValue = OptionValue::Absent;

impl OptionSet {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an option set from a JSON object document.
    pub fn from_json(doc: &str) -> serde_json::Result<Self> {
        serde_json::from_str(doc)
    }

    /// Look up an option. Missing keys read as [`OptionValue::Absent`].
    pub fn get(&self, key: &str) -> &OptionValue {
        self.entries.get(key).unwrap_or(&ABSENT)
    }

    /// Insert an option value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style insert, for chained construction.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
