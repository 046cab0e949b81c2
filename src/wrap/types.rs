//! Wrapped JSON value types
//!
//! `WrappedValue` is decided once, at wrap time, from serde_json's own
//! type tags. Navigation never guesses: asking an object for a key it
//! does not have is `Error::NoSuchAttribute`.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Read-only, navigable view over a decoded JSON value
#[derive(Debug, Clone)]
pub enum WrappedValue {
    /// A JSON object; every value is wrapped as well
    Object(WrappedObject),
    /// A JSON array; every element is wrapped independently
    Array(Vec<WrappedValue>),
    /// Strings, numbers, booleans and null pass through unchanged
    Scalar(JsonValue),
}

/// Wrap any JSON value (or an already wrapped one, which is returned as is)
pub fn wrap(value: impl Into<WrappedValue>) -> WrappedValue {
    value.into()
}

impl From<JsonValue> for WrappedValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => Self::Object(WrappedObject::from(map)),
            JsonValue::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            scalar => Self::Scalar(scalar),
        }
    }
}

impl From<&JsonValue> for WrappedValue {
    fn from(value: &JsonValue) -> Self {
        Self::from(value.clone())
    }
}

impl WrappedValue {
    /// Access a named attribute of an object
    ///
    /// Fails with `NoSuchAttribute` when the key is absent or when the
    /// value is not an object at all.
    pub fn field(&self, name: &str) -> Result<&WrappedValue> {
        match self {
            Self::Object(obj) => obj.get(name),
            _ => Err(Error::no_such_attribute(name)),
        }
    }

    /// Permissive attribute access
    pub fn get_opt(&self, name: &str) -> Option<&WrappedValue> {
        self.as_object().and_then(|obj| obj.get_opt(name))
    }

    /// Access an array element
    pub fn at(&self, index: usize) -> Option<&WrappedValue> {
        match self {
            Self::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Navigate a dotted path such as `"author.name"` or `"assets.links.0.url"`
    ///
    /// Numeric segments index into arrays; any other segment is an
    /// attribute name. The error names the path prefix that failed.
    pub fn path(&self, path: &str) -> Result<&WrappedValue> {
        let mut current = self;
        let mut walked = String::new();

        for segment in path.split('.') {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);

            current = match current {
                Self::Object(obj) => obj
                    .get_opt(segment)
                    .ok_or_else(|| Error::no_such_attribute(&walked))?,
                Self::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| items.get(i))
                    .ok_or_else(|| Error::no_such_attribute(&walked))?,
                Self::Scalar(_) => return Err(Error::no_such_attribute(&walked)),
            };
        }

        Ok(current)
    }

    pub fn as_object(&self) -> Option<&WrappedObject> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[WrappedValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&JsonValue> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(JsonValue::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(JsonValue::as_i64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_scalar().and_then(JsonValue::as_u64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(JsonValue::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(JsonValue::as_bool)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(JsonValue::Null))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Number of keys (object) or elements (array); scalars have none
    pub fn len(&self) -> usize {
        match self {
            Self::Object(obj) => obj.len(),
            Self::Array(items) => items.len(),
            Self::Scalar(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rebuild the original JSON value
    pub fn to_raw(&self) -> JsonValue {
        match self {
            Self::Object(obj) => JsonValue::Object(obj.to_raw()),
            Self::Array(items) => JsonValue::Array(items.iter().map(Self::to_raw).collect()),
            Self::Scalar(v) => v.clone(),
        }
    }

    pub fn into_raw(self) -> JsonValue {
        match self {
            Self::Object(obj) => JsonValue::Object(obj.into_raw()),
            Self::Array(items) => JsonValue::Array(items.into_iter().map(Self::into_raw).collect()),
            Self::Scalar(v) => v,
        }
    }

    /// Convert into a typed struct
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_raw())?)
    }
}

impl Default for WrappedValue {
    fn default() -> Self {
        Self::Scalar(JsonValue::Null)
    }
}

impl PartialEq for WrappedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            // A hand-built Scalar may hold an object or array
            _ => self.to_raw() == other.to_raw(),
        }
    }
}

impl PartialEq<JsonValue> for WrappedValue {
    fn eq(&self, other: &JsonValue) -> bool {
        match self {
            Self::Scalar(v) => v == other,
            _ => self.to_raw() == *other,
        }
    }
}

macro_rules! scalar_eq {
    ($($ty:ty),*) => {
        $(
            impl PartialEq<$ty> for WrappedValue {
                fn eq(&self, other: &$ty) -> bool {
                    match self {
                        Self::Scalar(v) => *v == *other,
                        _ => false,
                    }
                }
            }
        )*
    };
}

scalar_eq!(i32, i64, u32, u64, f64, bool, &str, String);

impl fmt::Display for WrappedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_raw())
    }
}

impl Serialize for WrappedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Object(obj) => obj.serialize(serializer),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Scalar(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for WrappedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// Wrapped Object
// ============================================================================

/// A JSON object with its original keys kept
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedObject {
    fields: BTreeMap<String, WrappedValue>,
}

impl From<JsonObject> for WrappedObject {
    fn from(map: JsonObject) -> Self {
        Self {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, WrappedValue::from(v)))
                .collect(),
        }
    }
}

impl WrappedObject {
    /// Strict attribute access
    pub fn get(&self, name: &str) -> Result<&WrappedValue> {
        self.fields
            .get(name)
            .ok_or_else(|| Error::no_such_attribute(name))
    }

    pub fn get_opt(&self, name: &str) -> Option<&WrappedValue> {
        self.fields.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, WrappedValue> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_raw(&self) -> JsonObject {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_raw()))
            .collect()
    }

    pub fn into_raw(self) -> JsonObject {
        self.fields
            .into_iter()
            .map(|(k, v)| (k, v.into_raw()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a WrappedObject {
    type Item = (&'a String, &'a WrappedValue);
    type IntoIter = btree_map::Iter<'a, String, WrappedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Serialize for WrappedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
