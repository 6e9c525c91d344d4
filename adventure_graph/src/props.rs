//! Style props - the string-keyed dictionary attached to adventures and nodes.
//!
//! Props arrive either as a JSON object or as JSON-encoded text. Parsing is
//! best effort: anything that does not decode to an object yields an empty
//! dictionary instead of an error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A dictionary of style properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct StyleProps(Map<String, Value>);

impl StyleProps {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build props from a raw value.
    ///
    /// Objects are taken as-is, strings are decoded as JSON, and everything
    /// else (including malformed text) becomes an empty dictionary.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self(map.clone()),
            Value::String(text) => Self::parse(text),
            _ => Self::default(),
        }
    }

    /// Decode JSON text into props.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Self(map),
            Ok(_) => Self::default(),
            Err(err) => {
                tracing::debug!(%err, "ignoring malformed style props");
                Self::default()
            }
        }
    }

    /// Set a value, returning the updated props.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Merge `overrides` on top of these props; keys in `overrides` win.
    pub fn merged_with(&self, overrides: &StyleProps) -> StyleProps {
        let mut merged = self.0.clone();
        for (key, value) in &overrides.0 {
            merged.insert(key.clone(), value.clone());
        }
        StyleProps(merged)
    }

    /// Raw value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty string value for a key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }

    /// Numeric value for a key, accepting numbers and numeric strings.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whether a key holds a truthy flag (`true`, non-zero, `"true"`, `"on"`, `"1"`).
    pub fn is_truthy(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => {
                matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "on" | "1" | "yes")
            }
            _ => false,
        }
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for StyleProps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
