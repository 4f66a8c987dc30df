//! Cell values.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single cell of a [`Table`](super::Table).
///
/// Numbers compare by value, so `12.5` equals `12.50`. A number never equals
/// text (`5.0` is not `"5"`), while two `Empty` cells are equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Text, kept verbatim.
    String(String),
    /// A finite number, with the text it was read from.
    Number(Number),
    /// Absent value. Also the marker written into unmapped columns.
    #[default]
    Empty,
}

/// The marker used for columns a transformation could not fill.
pub const MISSING: Value = Value::Empty;

/// A finite number that remembers how it was written.
///
/// Keys, country matching and export use the source text, so `001` stays
/// `001`. Equality uses the value only.
#[derive(Debug, Clone)]
pub struct Number {
    value: f64,
    text: String,
}

impl Number {
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The text this number was read from.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number {
            value,
            text: format!("{}", value),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value)
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Number::from)
    }
}

impl Value {
    /// Classify raw cell text.
    ///
    /// Anything that reads as a finite number becomes a `Number` holding the
    /// original text; `NaN`, `inf` and padded text stay strings.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Value::Empty;
        }
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Value::Number(Number {
                value,
                text: raw.to_string(),
            }),
            _ => Value::String(raw.to_string()),
        }
    }

    /// Returns true for the missing marker.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Borrow the text of a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the numeric value of a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.value),
            _ => None,
        }
    }

    /// String form used when building keys and testing membership.
    ///
    /// `Empty` contributes an empty segment rather than failing.
    pub fn key_segment(&self) -> Cow<'_, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Borrowed(&n.text),
            Value::Empty => Cow::Borrowed(""),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_segment())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::from(n as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_cells() {
        assert_eq!(Value::parse(""), Value::Empty);
        assert_eq!(Value::parse("10"), Value::from(10.0));
        assert_eq!(Value::parse("-2.5"), Value::from(-2.5));
        assert_eq!(Value::parse("US"), Value::from("US"));
        assert_eq!(Value::parse("NaN"), Value::from("NaN"));
        assert_eq!(Value::parse(" 7"), Value::from(" 7"));
    }

    #[test]
    fn test_parse_keeps_source_text() {
        let code = Value::parse("001");
        assert_eq!(code.as_number(), Some(1.0));
        assert_eq!(code.key_segment(), "001");
        assert_eq!(Value::parse("10.50").to_string(), "10.50");
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert_eq!(Value::parse("12.5"), Value::parse("12.50"));
        assert_eq!(Value::parse("5"), Value::parse("5.0"));
        assert_ne!(Value::parse("5"), Value::parse("5.1"));
        assert_ne!(Value::from(5.0), Value::from("5"));
        assert_eq!(Value::Empty, Value::Empty);
        assert_eq!(Value::from(5_i64), Value::from(5.0));
    }

    #[test]
    fn test_key_segment() {
        assert_eq!(Value::from("X1").key_segment(), "X1");
        assert_eq!(Value::from(36.0).key_segment(), "36");
        assert_eq!(Value::Empty.key_segment(), "");
        assert_eq!(Value::from(1.25).to_string(), "1.25");
    }

    #[test]
    fn test_serde_untagged() {
        let json = serde_json::to_string(&vec![
            Value::from("LI"),
            Value::parse("3.00"),
            Value::Empty,
        ])
        .unwrap();
        assert_eq!(json, r#"["LI",3.0,null]"#);

        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0], Value::from("LI"));
        assert_eq!(back[1], Value::from(3.0));
        assert_eq!(back[2], Value::Empty);
    }
}
