// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Records and the keys used to compare them.
//!
//! A record is an ordered JSON object. Ids and parent references are
//! compared loosely, so `"7"` and `7` name the same node. `Key` is the
//! normalized form both sides are reduced to before comparison.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;
use serde_json::Value;

/// One node of a hierarchy: field name to value, in insertion order.
pub type Record = serde_json::Map<String, Value>;

/// The normalized form of an id or parent reference.
///
/// Integers, integral floats and numeric strings become `Int`. Anything
/// else that can still act as an identifier becomes `Text`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl Key {
    /// Normalize a JSON value, or `None` if it cannot identify a node
    /// (`null`, booleans, arrays and objects).
    pub fn from_value(value: &Value) -> Option<Key> {
        return match value {
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Some(Key::Int(int))
                } else if let Some(float) = number.as_f64().filter(|f| integral(*f)) {
                    Some(Key::Int(float as i64))
                } else {
                    Some(Key::Text(number.to_string()))
                }
            }
            Value::String(text) => Some(Key::parse(text)),
            _ => None,
        };
    }

    /// Normalize a string: numeric strings become `Int`.
    pub fn parse(text: &str) -> Key {
        return match text.parse::<i64>() {
            Ok(int) => Key::Int(int),
            Err(_) => Key::Text(text.to_string()),
        };
    }

    /// The JSON value this key stands for.
    pub fn to_value(&self) -> Value {
        return match self {
            Key::Int(int) => Value::from(*int),
            Key::Text(text) => Value::from(text.as_str()),
        };
    }
}

fn integral(float: f64) -> bool {
    return float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64;
}

/// Read `field` from `record` as a key.
#[inline]
pub fn key_of(record: &Record, field: &str) -> Option<Key> {
    return record.get(field).and_then(Key::from_value);
}

/// Append `child` to the array stored under `field`, creating it if needed.
/// A non-array value already stored there is replaced.
pub fn push_child(record: &mut Record, field: &str, child: Record) {
    let slot = record
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    if let Value::Array(children) = slot {
        children.push(Value::Object(child));
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Key::Int(int) => write!(f, "{}", int),
            Key::Text(text) => write!(f, "{}", text),
        };
    }
}

impl From<i32> for Key {
    fn from(int: i32) -> Key {
        return Key::Int(int as i64);
    }
}

impl From<i64> for Key {
    fn from(int: i64) -> Key {
        return Key::Int(int);
    }
}

impl From<u32> for Key {
    fn from(int: u32) -> Key {
        return Key::Int(int as i64);
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Key {
        return Key::parse(text);
    }
}

impl From<String> for Key {
    fn from(text: String) -> Key {
        return Key::parse(&text);
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Key {
        return key.clone();
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return match self {
            Key::Int(int) => serializer.serialize_i64(*int),
            Key::Text(text) => serializer.serialize_str(text),
        };
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Key, D::Error> {
        let value = Value::deserialize(deserializer)?;
        return Key::from_value(&value)
            .ok_or_else(|| D::Error::custom(format!("{} cannot be used as a key", value)));
    }
}
