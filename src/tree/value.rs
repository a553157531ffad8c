//! Decoded JSON values.
//!
//! [`Value`] is a closed tagged union so every traversal over it is
//! checked for exhaustiveness. Object members keep the order in which the
//! decoder saw them; duplicate keys keep their first position and the last
//! value, matching what `serde_json` does for maps.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Number;

/// A decoded JSON value with ordered object members.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Object(Vec<(String, Self)>),
    Array(Vec<Self>),
}

/// The JSON type of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    String,
    Number,
    Boolean,
    Null,
    Object,
    Array,
}

impl NodeType {
    /// Whether the node owns children (object or array).
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }

    /// Lowercase JSON type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Opening bracket for composite types.
    pub const fn open_bracket(self) -> Option<char> {
        match self {
            Self::Object => Some('{'),
            Self::Array => Some('['),
            _ => None,
        }
    }

    /// Closing bracket for composite types.
    pub const fn close_bracket(self) -> Option<char> {
        match self {
            Self::Object => Some('}'),
            Self::Array => Some(']'),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub const fn node_type(&self) -> NodeType {
        match self {
            Self::Null => NodeType::Null,
            Self::Bool(_) => NodeType::Boolean,
            Self::Number(_) => NodeType::Number,
            Self::String(_) => NodeType::String,
            Self::Object(_) => NodeType::Object,
            Self::Array(_) => NodeType::Array,
        }
    }

    /// Text shown for a primitive value.
    ///
    /// Strings are JSON-escaped without their surrounding quotes. Objects
    /// and arrays have no value text.
    pub fn value_text(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::String(s) => escape_json_string(s),
            Self::Object(_) | Self::Array(_) => String::new(),
        }
    }

    /// Number of direct children (0 for primitives).
    pub fn child_count(&self) -> usize {
        match self {
            Self::Object(members) => members.len(),
            Self::Array(items) => items.len(),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => 0,
        }
    }
}

/// Escape `s` the way a JSON encoder would, without the outer quotes.
pub fn escape_json_string(s: &str) -> String {
    let quoted = serde_json::Value::String(s.to_string()).to_string();
    quoted
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map_or_else(|| s.to_string(), ToOwned::to_owned)
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| E::custom("non-finite number"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let capacity = map.size_hint().unwrap_or(0);
        let mut members: Vec<(String, Value)> = Vec::with_capacity(capacity);
        // Key -> slot in `members`; a repeated key overwrites in place.
        let mut slots: HashMap<String, usize> = HashMap::with_capacity(capacity);
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            match slots.entry(key) {
                Entry::Occupied(slot) => members[*slot.get()].1 = value,
                Entry::Vacant(slot) => {
                    members.push((slot.key().clone(), value));
                    slot.insert(members.len() - 1);
                }
            }
        }
        Ok(Value::Object(members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(src: &str) -> Value {
        serde_json::from_str(src).unwrap()
    }

    #[test]
    fn test_object_members_keep_source_order() {
        let value = decode(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#);
        let Value::Object(members) = value else {
            panic!("expected object");
        };
        let keys: Vec<_> = members.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_key_keeps_first_position_and_last_value() {
        let value = decode(r#"{"a": 1, "b": 2, "a": 3}"#);
        assert_eq!(
            value,
            Value::Object(vec![
                ("a".to_string(), Value::Number(3.into())),
                ("b".to_string(), Value::Number(2.into())),
            ])
        );
    }

    #[test]
    fn test_wide_object_with_repeated_keys() {
        let n = 50_000;
        let body: Vec<String> = (0..n)
            .map(|i| format!("\"k{}\": {i}", i % (n / 2)))
            .collect();
        let started = std::time::Instant::now();
        let Value::Object(members) = decode(&format!("{{{}}}", body.join(","))) else {
            panic!("expected object");
        };
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        assert_eq!(members.len(), n / 2);
        assert_eq!(members[0], ("k0".to_string(), Value::Number((n / 2).into())));
        assert_eq!(members[n / 2 - 1].0, format!("k{}", n / 2 - 1));
    }

    #[test]
    fn test_value_text_for_primitives() {
        assert_eq!(decode("null").value_text(), "null");
        assert_eq!(decode("true").value_text(), "true");
        assert_eq!(decode("2.5").value_text(), "2.5");
        assert_eq!(decode("-7").value_text(), "-7");
        assert_eq!(decode(r#""say \"hi\"\n""#).value_text(), r#"say \"hi\"\n"#);
        assert_eq!(decode("[1]").value_text(), "");
    }

    #[test]
    fn test_node_type_brackets() {
        assert_eq!(NodeType::Object.open_bracket(), Some('{'));
        assert_eq!(NodeType::Array.close_bracket(), Some(']'));
        assert_eq!(NodeType::String.open_bracket(), None);
        assert!(NodeType::Array.is_composite());
        assert!(!NodeType::Null.is_composite());
    }

    #[test]
    fn test_from_serde_json_value_matches_direct_decode() {
        let src = r#"{"a": [1, "two", null], "b": {"c": false}}"#;
        let via_serde: serde_json::Value = serde_json::from_str(src).unwrap();
        assert_eq!(Value::from(via_serde), decode(src));
    }
}
