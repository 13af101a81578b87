//! JSON-shaped output tree built by the transformer.
//!
//! [`OutputValue`] only carries the shapes the transformer can produce. It
//! serializes directly through `serde` and converts losslessly into a
//! `serde_json::Value` (object key order is preserved).

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A dynamically typed output value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputValue {
    #[default]
    Null,
    String(String),
    Integer(i64),
    Object(OutputObject),
    Array(Vec<OutputValue>),
}

impl OutputValue {
    pub fn is_null(&self) -> bool {
        matches!(self, OutputValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OutputValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OutputValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&OutputObject> {
        match self {
            OutputValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[OutputValue]> {
        match self {
            OutputValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Look up a key when this value is an object.
    pub fn get(&self, key: &str) -> Option<&OutputValue> {
        self.as_object().and_then(|obj| obj.get(key))
    }
}

impl From<String> for OutputValue {
    fn from(s: String) -> Self {
        OutputValue::String(s)
    }
}

impl From<&str> for OutputValue {
    fn from(s: &str) -> Self {
        OutputValue::String(s.to_string())
    }
}

impl From<i64> for OutputValue {
    fn from(i: i64) -> Self {
        OutputValue::Integer(i)
    }
}

impl From<Option<&str>> for OutputValue {
    fn from(s: Option<&str>) -> Self {
        s.map(OutputValue::from).unwrap_or(OutputValue::Null)
    }
}

impl From<OutputObject> for OutputValue {
    fn from(obj: OutputObject) -> Self {
        OutputValue::Object(obj)
    }
}

impl From<OutputValue> for serde_json::Value {
    fn from(value: OutputValue) -> Self {
        match value {
            OutputValue::Null => serde_json::Value::Null,
            OutputValue::String(s) => serde_json::Value::String(s),
            OutputValue::Integer(i) => serde_json::Value::Number(i.into()),
            OutputValue::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
            OutputValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
        }
    }
}

impl Serialize for OutputValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OutputValue::Null => serializer.serialize_unit(),
            OutputValue::String(s) => serializer.serialize_str(s),
            OutputValue::Integer(i) => serializer.serialize_i64(*i),
            OutputValue::Object(obj) => obj.serialize(serializer),
            OutputValue::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Keyed mapping that remembers insertion order.
///
/// Re-inserting an existing key replaces its value but keeps the key's
/// original position. Objects stay small (one per mapped XML node), so
/// lookups are a linear scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputObject {
    entries: Vec<(String, OutputValue)>,
}

impl OutputObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&OutputValue> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut OutputValue> {
        match self.position(key) {
            Some(idx) => Some(&mut self.entries[idx].1),
            None => None,
        }
    }

    /// Insert a value, returning the previous one stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: OutputValue) -> Option<OutputValue> {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<OutputValue> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    /// Run `f` on the nested object stored under `key`, created when absent.
    ///
    /// A non-object value already stored under `key` is replaced.
    pub fn object_entry<R>(&mut self, key: &str, f: impl FnOnce(&mut OutputObject) -> R) -> R {
        match self.slot(key) {
            OutputValue::Object(obj) => f(obj),
            other => {
                let mut obj = OutputObject::new();
                let out = f(&mut obj);
                *other = OutputValue::Object(obj);
                out
            }
        }
    }

    /// Run `f` on the array stored under `key`, created when absent.
    ///
    /// A non-array value already stored under `key` is replaced.
    pub fn array_entry<R>(&mut self, key: &str, f: impl FnOnce(&mut Vec<OutputValue>) -> R) -> R {
        match self.slot(key) {
            OutputValue::Array(arr) => f(arr),
            other => {
                let mut arr = Vec::new();
                let out = f(&mut arr);
                *other = OutputValue::Array(arr);
                out
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OutputValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    // Value under `key`, appending a `Null` placeholder when absent.
    fn slot(&mut self, key: &str) -> &mut OutputValue {
        let idx = match self.position(key) {
            Some(idx) => idx,
            None => {
                self.entries.push((key.to_string(), OutputValue::Null));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }
}

impl IntoIterator for OutputObject {
    type Item = (String, OutputValue);
    type IntoIter = std::vec::IntoIter<(String, OutputValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, OutputValue)> for OutputObject {
    fn from_iter<I: IntoIterator<Item = (String, OutputValue)>>(iter: I) -> Self {
        let mut obj = OutputObject::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

impl Serialize for OutputObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
