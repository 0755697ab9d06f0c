//! Typed option values.
//!
//! A configuration option holds exactly one of three value kinds: a string
//! (used for filesystem paths), a floating-point rectangle (screen geometry)
//! or an integer (millisecond delays).  The kind is fixed when the option is
//! registered; reads and writes through the store must use the same kind.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in floating-point screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl FloatRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns the rectangle shrunk by `amount` on every side.
    ///
    /// Width and height never go below zero.
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            left: self.left + amount,
            top: self.top + amount,
            width: (self.width - amount * 2.0).max(0.0),
            height: (self.height - amount * 2.0).max(0.0),
        }
    }
}

/// Discriminant of an [`OptionValue`], used in contract-violation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    FloatRect,
    Integer,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::FloatRect => "float rect",
            ValueKind::Integer => "integer",
        };
        f.write_str(name)
    }
}

/// The value held by a single configuration option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    FloatRect(FloatRect),
    Integer(i32),
}

impl OptionValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            OptionValue::String(_) => ValueKind::String,
            OptionValue::FloatRect(_) => ValueKind::FloatRect,
            OptionValue::Integer(_) => ValueKind::Integer,
        }
    }

    /// Converts the value into its TOML representation.
    pub(crate) fn to_toml(&self) -> toml::Value {
        match self {
            OptionValue::String(s) => toml::Value::String(s.clone()),
            OptionValue::Integer(i) => toml::Value::Integer(i64::from(*i)),
            OptionValue::FloatRect(rect) => {
                let mut table = toml::Table::new();
                table.insert("left".into(), toml::Value::Float(f64::from(rect.left)));
                table.insert("top".into(), toml::Value::Float(f64::from(rect.top)));
                table.insert("width".into(), toml::Value::Float(f64::from(rect.width)));
                table.insert("height".into(), toml::Value::Float(f64::from(rect.height)));
                toml::Value::Table(table)
            }
        }
    }

    /// Parses `raw` as a value of the given kind.
    ///
    /// Returns `None` when the TOML value cannot represent that kind, e.g. a
    /// string where an integer is expected or an integer outside `i32`.
    /// Rectangle fields accept integer literals as well as floats.
    pub(crate) fn from_toml(kind: ValueKind, raw: &toml::Value) -> Option<Self> {
        match kind {
            ValueKind::String => raw.as_str().map(|s| OptionValue::String(s.to_string())),
            ValueKind::Integer => raw
                .as_integer()
                .and_then(|i| i32::try_from(i).ok())
                .map(OptionValue::Integer),
            ValueKind::FloatRect => raw
                .clone()
                .try_into::<FloatRect>()
                .ok()
                .map(OptionValue::FloatRect),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<FloatRect> for OptionValue {
    fn from(value: FloatRect) -> Self {
        OptionValue::FloatRect(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Integer(value)
    }
}

/// A single named, typed configuration entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigOption {
    key: String,
    value: OptionValue,
}

impl ConfigOption {
    pub fn new(key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    /// Replaces the value, keeping the registered kind.
    ///
    /// Returns `false` (and leaves the option untouched) on a kind mismatch.
    pub(crate) fn replace(&mut self, value: OptionValue) -> bool {
        if value.kind() != self.value.kind() {
            return false;
        }
        self.value = value;
        true
    }
}
