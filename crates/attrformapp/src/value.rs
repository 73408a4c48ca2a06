//! Attribute value types.
//!
//! This module defines the runtime representation of raw attribute values
//! and the primitive type tags recorded on each form field. Values arrive
//! as schema-less JSON; `AttrValue` narrows them to the three primitives
//! the host deals in (boolean, number, string) while keeping enough
//! information to reproduce the host's original typing on the way back.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FormError, Result};

/// Primitive type tag of a raw attribute value.
///
/// Fixed at field creation and never mutated by edits; coercion consults
/// it to decide which representation family the host expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Number,
    Text,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => write!(f, "boolean"),
            ValueType::Number => write!(f, "number"),
            ValueType::Text => write!(f, "string"),
        }
    }
}

/// Runtime representation of a raw attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttrValue {
    /// Convert an arbitrary JSON value into an attribute value.
    ///
    /// Booleans, numbers and strings map directly. Anything else (null,
    /// arrays, nested objects) is stringified, matching how the original
    /// host surfaces malformed scalars.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Bool(b) => AttrValue::Bool(*b),
            Value::Number(n) => AttrValue::Number(n.as_f64().unwrap_or_default()),
            Value::String(s) => AttrValue::Text(s.clone()),
            other => AttrValue::Text(other.to_string()),
        }
    }

    /// The primitive type tag for this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            AttrValue::Bool(_) => ValueType::Bool,
            AttrValue::Number(_) => ValueType::Number,
            AttrValue::Text(_) => ValueType::Text,
        }
    }

    /// Stringified form, as the host would display it.
    ///
    /// Numbers with no fractional part render without a decimal point
    /// (`210.0` becomes `"210"`), which is what drives integer-step
    /// inference downstream.
    pub fn display_string(&self) -> String {
        match self {
            AttrValue::Bool(b) => b.to_string(),
            AttrValue::Number(n) => format_number(*n),
            AttrValue::Text(s) => s.clone(),
        }
    }

    /// Numeric reading of this value, if it has one.
    ///
    /// Numbers yield themselves; strings yield their fully-parsed numeric
    /// value (no unit stripping here); booleans never read as numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(s) => parse_number(s),
            AttrValue::Bool(_) => None,
        }
    }
}

impl From<AttrValue> for Value {
    fn from(value: AttrValue) -> Value {
        match value {
            AttrValue::Bool(b) => Value::Bool(b),
            AttrValue::Number(n) => {
                if is_integral(n) {
                    Value::from(n as i64)
                } else {
                    serde_json::Number::from_f64(n)
                        .map(Value::Number)
                        .unwrap_or(Value::Null)
                }
            }
            AttrValue::Text(s) => Value::String(s),
        }
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AttrValue::Bool(b) => serializer.serialize_bool(*b),
            AttrValue::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            AttrValue::Number(n) => serializer.serialize_f64(*n),
            AttrValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(AttrValue::from_json(&value))
    }
}

/// Parse a string as a number, the strict way: the whole (trimmed) string
/// must be the number. `"100.0cm"`, `"inf"` and `""` all fail; `"1e3"`,
/// `" -2.5 "` succeed.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Reject alphabetic forms f64::from_str accepts but the host does not
    // (inf, NaN). Exponent markers are the only letters allowed.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64
}

fn format_number(n: f64) -> String {
    if is_integral(n) {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// The schema-less dictionary-of-dictionaries a host supplies: ordered map
/// from section name to an ordered map of attribute key to raw value.
///
/// Underscore-prefixed sibling keys with suffixes `_label`, `_units`,
/// `_description`, `_formtype` and `_options` are meta-attributes describing
/// the attribute sharing their base key; they are never rendered themselves.
/// Insertion order is significant and preserved through (de)serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAttributeSet(pub Map<String, Value>);

impl RawAttributeSet {
    /// Build from a parsed JSON value. The top level must be an object;
    /// anything else is a malformed attribute set.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(RawAttributeSet(map)),
            other => Err(FormError::MalformedAttributeSet(format!(
                "expected an object of sections, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    /// Insert a coerced value under `section.key`, creating the section
    /// object if needed.
    pub fn insert(&mut self, section: &str, key: &str, value: AttrValue) {
        let entry = self
            .0
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = entry {
            map.insert(key.to_string(), value.into());
        }
    }

    /// Look up a raw value by section and key.
    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.0.get(section)?.as_object()?.get(key)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
