//! Turning extraction results back into plain values

use crate::wrapped::{is_truthy, Wrapped};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Recursive unwrapping of extraction results.
///
/// Wrapped values become their plain value; containers are rebuilt with every
/// item unwrapped; plain values pass through unchanged.
pub trait IntoPlain {
    /// Type left after unwrapping
    type Plain;

    /// Strip all wrappers
    fn into_plain(self) -> Self::Plain;
}

impl IntoPlain for Wrapped<'_> {
    type Plain = Value;

    fn into_plain(self) -> Value {
        self.into_value()
    }
}

impl IntoPlain for Value {
    type Plain = Value;

    fn into_plain(self) -> Value {
        self
    }
}

impl<T: IntoPlain> IntoPlain for Vec<T> {
    type Plain = Vec<T::Plain>;

    fn into_plain(self) -> Self::Plain {
        self.into_iter().map(IntoPlain::into_plain).collect()
    }
}

impl<T: IntoPlain> IntoPlain for Option<T> {
    type Plain = Option<T::Plain>;

    fn into_plain(self) -> Self::Plain {
        self.map(IntoPlain::into_plain)
    }
}

impl<T: IntoPlain> IntoPlain for IndexMap<String, T> {
    type Plain = IndexMap<String, T::Plain>;

    fn into_plain(self) -> Self::Plain {
        self.into_iter()
            .map(|(key, value)| (key, value.into_plain()))
            .collect()
    }
}

impl<A: IntoPlain, B: IntoPlain> IntoPlain for (A, B) {
    type Plain = (A::Plain, B::Plain);

    fn into_plain(self) -> Self::Plain {
        (self.0.into_plain(), self.1.into_plain())
    }
}

macro_rules! plain_scalar {
    ($($ty:ty),*) => {
        $(
            impl IntoPlain for $ty {
                type Plain = $ty;

                fn into_plain(self) -> $ty {
                    self
                }
            }
        )*
    };
}

plain_scalar!((), String, bool, i64, f64);

/// Result of an extraction: wrapped leaves mixed with plain containers.
///
/// Extraction code builds new lists and maps around values it read from a
/// wrapped source. Unwrapping the whole tree yields a plain [`Value`].
#[derive(Debug, Clone)]
pub enum Extracted<'a> {
    /// Value taken from a source
    Wrapped(Wrapped<'a>),

    /// Value built by the extraction itself
    Plain(Value),

    /// List built by the extraction
    List(Vec<Extracted<'a>>),

    /// Map built by the extraction, in insertion order
    Map(IndexMap<String, Extracted<'a>>),
}

impl<'a> Extracted<'a> {
    /// JSON truthiness of the value, wrapped or not
    pub fn truthy(&self) -> bool {
        match self {
            Self::Wrapped(wrapped) => wrapped.truthy(),
            Self::Plain(value) => is_truthy(value),
            Self::List(items) => !items.is_empty(),
            Self::Map(map) => !map.is_empty(),
        }
    }

    /// True for a wrapped or plain null
    pub fn is_null(&self) -> bool {
        match self {
            Self::Wrapped(wrapped) => wrapped.is_null(),
            Self::Plain(value) => value.is_null(),
            Self::List(_) | Self::Map(_) => false,
        }
    }

    /// The wrapped value, if this came from a source
    pub fn as_wrapped(&self) -> Option<&Wrapped<'a>> {
        match self {
            Self::Wrapped(wrapped) => Some(wrapped),
            _ => None,
        }
    }
}

impl IntoPlain for Extracted<'_> {
    type Plain = Value;

    fn into_plain(self) -> Value {
        match self {
            Self::Wrapped(wrapped) => wrapped.into_value(),
            Self::Plain(value) => value,
            Self::List(items) => Value::Array(items.into_iter().map(IntoPlain::into_plain).collect()),
            Self::Map(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, value.into_plain()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl<'a> From<Wrapped<'a>> for Extracted<'a> {
    fn from(wrapped: Wrapped<'a>) -> Self {
        Self::Wrapped(wrapped)
    }
}

impl<'a> From<&Wrapped<'a>> for Extracted<'a> {
    fn from(wrapped: &Wrapped<'a>) -> Self {
        Self::Wrapped(wrapped.clone())
    }
}

impl From<Value> for Extracted<'_> {
    fn from(value: Value) -> Self {
        Self::Plain(value)
    }
}

impl From<&str> for Extracted<'_> {
    fn from(text: &str) -> Self {
        Self::Plain(Value::from(text))
    }
}

impl From<String> for Extracted<'_> {
    fn from(text: String) -> Self {
        Self::Plain(Value::String(text))
    }
}

impl From<bool> for Extracted<'_> {
    fn from(flag: bool) -> Self {
        Self::Plain(Value::Bool(flag))
    }
}

impl From<i64> for Extracted<'_> {
    fn from(number: i64) -> Self {
        Self::Plain(Value::from(number))
    }
}

impl<'a, T: Into<Extracted<'a>>> From<Vec<T>> for Extracted<'a> {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<'a, T: Into<Extracted<'a>>> From<Option<T>> for Extracted<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Plain(Value::Null), Into::into)
    }
}

impl<'a> From<Record<'a>> for Extracted<'a> {
    fn from(record: Record<'a>) -> Self {
        Self::Map(record.fields)
    }
}

/// Ordered map under construction by an extraction
#[derive(Debug, Clone, Default)]
pub struct Record<'a> {
    fields: IndexMap<String, Extracted<'a>>,
}

impl<'a> Record<'a> {
    /// Empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Record with one more field
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Extracted<'a>>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a field, keeping its first position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Extracted<'a>>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Add a field only when its value is truthy
    pub fn insert_truthy(&mut self, key: impl Into<String>, value: impl Into<Extracted<'a>>) {
        let value = value.into();
        if value.truthy() {
            self.fields.insert(key.into(), value);
        }
    }

    /// Field value by key
    pub fn get(&self, key: &str) -> Option<&Extracted<'a>> {
        self.fields.get(key)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field was added
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl IntoPlain for Record<'_> {
    type Plain = Value;

    fn into_plain(self) -> Value {
        Extracted::from(self).into_plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_value_is_unchanged() {
        let value = json!({"a": [1, "b", null, {"c": true}]});
        assert_eq!(value.clone().into_plain(), value);
    }

    #[test]
    fn test_mixed_tree_unwraps() {
        let source = json!({"nodes": [{"name": "n1"}, {"name": "n2"}]});
        let wrapped = Wrapped::new(&source, "desc");
        let names: Vec<Extracted<'_>> = wrapped
            .at("nodes")
            .unwrap()
            .iter()
            .unwrap()
            .map(|node| Record::new().with("node_name", node.at("name").unwrap()).into())
            .collect();

        let plain = Record::new()
            .with("nodes", names)
            .with("count", 2_i64)
            .into_plain();

        assert_eq!(
            plain,
            json!({"nodes": [{"node_name": "n1"}, {"node_name": "n2"}], "count": 2})
        );
    }

    #[test]
    fn test_record_keeps_insertion_order() {
        let plain = Record::new()
            .with("z", "last letter")
            .with("a", "first letter")
            .into_plain();
        let keys: Vec<_> = plain.as_object().unwrap().keys().cloned().collect();

        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_insert_truthy_skips_empty() {
        let mut record = Record::new();
        record.insert_truthy("empty", Vec::<Extracted<'_>>::new());
        record.insert_truthy("none", Option::<Value>::None);
        record.insert_truthy("kept", "value");

        assert_eq!(record.len(), 1);
        assert!(record.get("kept").is_some());
    }
}
