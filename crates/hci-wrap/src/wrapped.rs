//! Wrapped source values
//!
//! A [`Wrapped`] value reads like the JSON value it wraps, but every access
//! the data does not support fails with an [`InvalidSourceError`] pointing at
//! the exact location within the original source. Descending into objects,
//! arrays and strings yields further wrapped values whose paths are one
//! segment longer.

use crate::access::{Access, Slice};
use crate::context::{Context, InvalidSourceError, Kind};
use crate::path::Segment;
use crate::plain::Extracted;
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

type Result<T> = std::result::Result<T, InvalidSourceError>;

/// Iterator over wrapped children
pub type Iter<'a> = std::vec::IntoIter<Wrapped<'a>>;

/// A source value together with the context it was reached through
#[derive(Debug, Clone)]
pub struct Wrapped<'a> {
    value: Cow<'a, Value>,
    context: Context<'a>,
}

/// Wrap a value bound to the given context
pub fn wrap<'a>(value: &'a Value, context: Context<'a>) -> Wrapped<'a> {
    Wrapped {
        value: Cow::Borrowed(value),
        context,
    }
}

impl<'a> Wrapped<'a> {
    /// Wrap the root of a source
    pub fn new(root: &'a Value, description: &'a str) -> Self {
        wrap(root, Context::new(root, description))
    }

    /// The wrapped plain value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Drop the context and return the plain value
    pub fn into_value(self) -> Value {
        self.value.into_owned()
    }

    /// Context this value was reached through
    pub fn context(&self) -> &Context<'a> {
        &self.context
    }

    /// Runtime kind of the wrapped value
    pub fn kind(&self) -> Kind {
        Kind::of(&self.value)
    }

    /// Rendered path of this value within its source
    pub fn location(&self) -> String {
        self.context.path().render()
    }

    /// Error reporting this value as invalid although it is well-formed
    pub fn invalid_part(&self, reason: impl Into<String>) -> InvalidSourceError {
        self.context.error(reason)
    }

    fn expected(&self, expected: &str) -> InvalidSourceError {
        self.invalid_part(format!("Expected {expected} but got '{}'", self.kind()))
    }

    fn expected_dict(&self, key: Option<&str>) -> InvalidSourceError {
        match key {
            Some(key) => self.expected(&format!("dict with key '{key}'")),
            None => self.expected("dict"),
        }
    }

    fn expected_list(&self, index: i64) -> InvalidSourceError {
        self.expected(&format!("list with index '{index}'"))
    }

    fn index_out_of_range(&self, index: i64) -> InvalidSourceError {
        self.invalid_part(format!("Index '{index}' out of range"))
    }

    fn invalid_access(&self, access: &Access) -> InvalidSourceError {
        self.invalid_part(format!(
            "Invalid access by '{access}' to '{}'",
            self.kind()
        ))
    }

    // JSON objects only have string keys, so an integer always means the
    // caller expected a list.
    fn unsupported_access(&self, access: &Access) -> InvalidSourceError {
        match access {
            Access::Key(key) => self.expected_dict(Some(key)),
            Access::Index(index) => self.expected_list(*index),
            other => self.invalid_access(other),
        }
    }

    fn unsupported_operand(&self, operator: &str, other: &Value) -> InvalidSourceError {
        self.invalid_part(format!(
            "Unsupported operand type(s) for '{operator}': '{}' and '{}'",
            self.kind(),
            Kind::of(other)
        ))
    }

    fn incomparable(&self, other: Kind) -> InvalidSourceError {
        self.invalid_part(format!(
            "Comparison not supported between '{}' and '{other}'",
            self.kind()
        ))
    }

    fn descend(&self, value: Cow<'a, Value>, segment: impl Into<Segment>) -> Self {
        Self {
            value,
            context: self.context.child(segment),
        }
    }

    fn alongside(&self, value: Value) -> Self {
        Self {
            value: Cow::Owned(value),
            context: self.context.clone(),
        }
    }

    fn project(&self, pick: impl FnOnce(&Value) -> Option<&Value>) -> Option<Cow<'a, Value>> {
        match &self.value {
            Cow::Borrowed(value) => pick(*value).map(Cow::Borrowed),
            Cow::Owned(value) => pick(value).cloned().map(Cow::Owned),
        }
    }

    fn member(&self, key: &str) -> Option<Self> {
        self.project(|value| value.as_object().and_then(|map| map.get(key)))
            .map(|member| self.descend(member, key))
    }

    fn element(&self, position: usize) -> Option<Self> {
        self.project(|value| value.as_array().and_then(|items| items.get(position)))
            .map(|element| self.descend(element, position))
    }

    /// Reach into the value by key, index or slice.
    ///
    /// Keys descend into objects, indexes into arrays and strings. Slices
    /// keep the current path since a sub-sequence has no single location.
    pub fn at(&self, access: impl Into<Access>) -> Result<Self> {
        let access = access.into();
        match (&access, self.value()) {
            (Access::Key(key), Value::Object(_)) => self
                .member(key)
                .ok_or_else(|| self.invalid_part(format!("Missing key '{key}'"))),

            (Access::Index(index), Value::Array(items)) => {
                let position = resolve_index(*index, items.len())
                    .ok_or_else(|| self.index_out_of_range(*index))?;
                let element = self
                    .project(|value| value.as_array().and_then(|items| items.get(position)))
                    .ok_or_else(|| self.index_out_of_range(*index))?;
                Ok(self.descend(element, *index))
            }

            (Access::Index(index), Value::String(text)) => {
                let character = resolve_index(*index, text.chars().count())
                    .and_then(|position| text.chars().nth(position))
                    .ok_or_else(|| self.index_out_of_range(*index))?;
                Ok(self.descend(Cow::Owned(Value::String(character.to_string())), *index))
            }

            (Access::Slice(slice), Value::Array(items)) => {
                let (start, end) = slice.bounds(items.len());
                Ok(self.alongside(Value::Array(items[start..end].to_vec())))
            }

            (Access::Slice(slice), Value::String(text)) => Ok(self.alongside(Value::String(
                slice_chars(text, *slice),
            ))),

            (Access::Key(key), Value::Array(_) | Value::String(_)) => {
                Err(self.expected_dict(Some(key)))
            }

            _ => Err(self.unsupported_access(&access)),
        }
    }

    /// Sub-sequence of a string or array, at the same path
    pub fn slice(&self, slice: Slice) -> Result<Self> {
        self.at(slice)
    }

    /// Object member if present, `None` if the key is absent
    pub fn get(&self, key: &str) -> Result<Option<Self>> {
        match self.value() {
            Value::Object(_) => Ok(self.member(key)),
            _ => Err(self.expected_dict(Some(key))),
        }
    }

    /// Object member if present, otherwise the caller's default.
    ///
    /// The default is not wrapped: it does not come from the source.
    pub fn get_or(&self, key: &str, default: impl Into<Extracted<'a>>) -> Result<Extracted<'a>> {
        Ok(match self.get(key)? {
            Some(member) => Extracted::Wrapped(member),
            None => default.into(),
        })
    }

    /// Membership test: object keys, array string items, or substrings
    pub fn contains(&self, needle: &str) -> Result<bool> {
        match self.value() {
            Value::Object(map) => Ok(map.contains_key(needle)),
            Value::Array(items) => Ok(items.iter().any(|item| item.as_str() == Some(needle))),
            Value::String(text) => Ok(text.contains(needle)),
            _ => Err(self.expected_dict(Some(needle))),
        }
    }

    /// Iterate the value.
    ///
    /// Arrays yield their elements and strings their characters, each one
    /// level deeper. Objects yield their keys at the object's own path: code
    /// that mistakes an object for a list of objects then fails on the key
    /// with an "Expected dict" reason instead of silently working on values.
    pub fn iter(&self) -> Result<Iter<'a>> {
        let items: Vec<Self> = match self.value() {
            Value::Object(map) => map
                .keys()
                .map(|key| self.alongside(Value::String(key.clone())))
                .collect(),
            Value::Array(items) => (0..items.len())
                .filter_map(|position| self.element(position))
                .collect(),
            Value::String(text) => text
                .chars()
                .enumerate()
                .map(|(position, character)| {
                    self.descend(Cow::Owned(Value::String(character.to_string())), position)
                })
                .collect(),
            _ => return Err(self.expected("iterable")),
        };
        Ok(items.into_iter())
    }

    /// Object keys, at the object's path
    pub fn keys(&self) -> Result<Iter<'a>> {
        let map = self.value().as_object().ok_or_else(|| self.expected_dict(None))?;
        let keys: Vec<Self> = map
            .keys()
            .map(|key| self.alongside(Value::String(key.clone())))
            .collect();
        Ok(keys.into_iter())
    }

    /// Object member values, each at its key's path
    pub fn values(&self) -> Result<Iter<'a>> {
        let map = self.value().as_object().ok_or_else(|| self.expected_dict(None))?;
        let values: Vec<Self> = map.keys().filter_map(|key| self.member(key)).collect();
        Ok(values.into_iter())
    }

    /// Object key and member pairs
    pub fn items(&self) -> Result<Vec<(Self, Self)>> {
        let map = self.value().as_object().ok_or_else(|| self.expected_dict(None))?;
        Ok(map
            .keys()
            .filter_map(|key| {
                self.member(key)
                    .map(|member| (self.alongside(Value::String(key.clone())), member))
            })
            .collect())
    }

    /// Number of characters, elements or members
    pub fn len(&self) -> Result<usize> {
        match self.value() {
            Value::String(text) => Ok(text.chars().count()),
            Value::Array(items) => Ok(items.len()),
            Value::Object(map) => Ok(map.len()),
            _ => Err(self.invalid_part(format!(
                "Object of type '{}' has no len()",
                self.kind()
            ))),
        }
    }

    /// True for empty strings, arrays and objects
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// True if the wrapped value is JSON null
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// JSON truthiness: null, false, zero and empty strings, arrays and
    /// objects are falsy
    pub fn truthy(&self) -> bool {
        is_truthy(self.value())
    }

    /// The value as a string slice
    pub fn as_str(&self) -> Result<&str> {
        self.value().as_str().ok_or_else(|| self.expected("str"))
    }

    /// The value as an integer
    pub fn as_i64(&self) -> Result<i64> {
        self.value().as_i64().ok_or_else(|| self.expected("int"))
    }

    /// The value as a float, integers included
    pub fn as_f64(&self) -> Result<f64> {
        self.value().as_f64().ok_or_else(|| self.expected("float"))
    }

    /// The value as a boolean
    pub fn as_bool(&self) -> Result<bool> {
        self.value().as_bool().ok_or_else(|| self.expected("bool"))
    }

    /// Concatenate strings or arrays; the result stays at this value's path
    pub fn concat(&self, other: &Value) -> Result<Self> {
        let joined = match (self.value(), other) {
            (Value::String(left), Value::String(right)) => Value::String(format!("{left}{right}")),
            (Value::Array(left), Value::Array(right)) => {
                Value::Array(left.iter().chain(right).cloned().collect())
            }
            _ => return Err(self.unsupported_operand("+", other)),
        };
        Ok(self.alongside(joined))
    }

    /// Order against another wrapped value.
    ///
    /// A null on either side is reported at the null's own location.
    pub fn try_cmp(&self, other: &Wrapped<'_>) -> Result<Ordering> {
        compare(self.value(), other.value()).ok_or_else(|| {
            if other.is_null() && !self.is_null() {
                other.incomparable(self.kind())
            } else {
                self.incomparable(other.kind())
            }
        })
    }

    /// Order against a plain value
    pub fn try_cmp_value(&self, other: &Value) -> Result<Ordering> {
        compare(self.value(), other).ok_or_else(|| self.incomparable(Kind::of(other)))
    }

    /// Items of the value in ascending order
    pub fn sorted(&self) -> Result<Vec<Self>> {
        merge_sort(self.iter()?.collect(), &mut |left: &Self, right: &Self| {
            left.try_cmp(right)
        })
    }

    /// Items of the value in ascending order of a key taken from each item
    pub fn sorted_by_key<F>(&self, mut key: F) -> Result<Vec<Self>>
    where
        F: FnMut(&Self) -> Result<Self>,
    {
        let keyed = self
            .iter()?
            .map(|item| -> Result<(Self, Self)> { Ok((key(&item)?, item)) })
            .collect::<Result<Vec<_>>>()?;
        let sorted = merge_sort(keyed, &mut |left: &(Self, Self), right: &(Self, Self)| {
            left.0.try_cmp(&right.0)
        })?;
        Ok(sorted.into_iter().map(|(_, item)| item).collect())
    }

    /// Bitwise and; booleans combine like the integers 0 and 1
    pub fn and(&self, other: &Value) -> Result<Value> {
        self.bitwise("and", other, |left, right| left & right)
    }

    /// Bitwise or; booleans combine like the integers 0 and 1
    pub fn or(&self, other: &Value) -> Result<Value> {
        self.bitwise("or", other, |left, right| left | right)
    }

    /// Bitwise exclusive or; booleans combine like the integers 0 and 1
    pub fn xor(&self, other: &Value) -> Result<Value> {
        self.bitwise("xor", other, |left, right| left ^ right)
    }

    /// Logical negation of a boolean, bitwise negation of an integer
    pub fn invert(&self) -> Result<Value> {
        let bad_operand =
            || self.invalid_part(format!("Bad operand type for unary '~': '{}'", self.kind()));
        match self.value() {
            Value::Bool(flag) => Ok(Value::Bool(!flag)),
            Value::Number(number) => number
                .as_i64()
                .map(|integer| Value::from(!integer))
                .ok_or_else(bad_operand),
            _ => Err(bad_operand()),
        }
    }

    fn bitwise(&self, operator: &str, other: &Value, apply: fn(i64, i64) -> i64) -> Result<Value> {
        if let (Value::Bool(left), Value::Bool(right)) = (self.value(), other) {
            return Ok(Value::Bool(
                apply(i64::from(*left), i64::from(*right)) != 0,
            ));
        }
        match (integer(self.value()), integer(other)) {
            (Some(left), Some(right)) => Ok(Value::from(apply(left, right))),
            _ => Err(self.unsupported_operand(operator, other)),
        }
    }
}

impl fmt::Display for Wrapped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}

impl PartialEq<Value> for Wrapped<'_> {
    fn eq(&self, other: &Value) -> bool {
        self.value() == other
    }
}

impl<'b> PartialEq<Wrapped<'b>> for Wrapped<'_> {
    fn eq(&self, other: &Wrapped<'b>) -> bool {
        self.value() == other.value()
    }
}

impl PartialEq<str> for Wrapped<'_> {
    fn eq(&self, other: &str) -> bool {
        self.value().as_str() == Some(other)
    }
}

impl PartialEq<&str> for Wrapped<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.value().as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Wrapped<'_> {
    fn eq(&self, other: &i64) -> bool {
        self.value().as_i64() == Some(*other)
    }
}

impl PartialEq<bool> for Wrapped<'_> {
    fn eq(&self, other: &bool) -> bool {
        self.value().as_bool() == Some(*other)
    }
}

/// JSON truthiness of a plain value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|float| float != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let absolute = if index < 0 { len + index } else { index };
    if (0..len).contains(&absolute) {
        usize::try_from(absolute).ok()
    } else {
        None
    }
}

fn slice_chars(text: &str, slice: Slice) -> String {
    let (start, end) = slice.bounds(text.chars().count());
    text.chars().skip(start).take(end - start).collect()
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::Number(number) => number.as_i64(),
        _ => None,
    }
}

fn float(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Number(number) => number.as_f64(),
        _ => None,
    }
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        (Value::Array(left), Value::Array(right)) => {
            // equal numbers may be encoded differently, e.g. 1 and 1.0
            for (left_item, right_item) in left.iter().zip(right) {
                match compare(left_item, right_item)? {
                    Ordering::Equal => {}
                    other => return Some(other),
                }
            }
            Some(left.len().cmp(&right.len()))
        }
        _ => match (integer(left), integer(right)) {
            (Some(left), Some(right)) => Some(left.cmp(&right)),
            _ => float(left)?.partial_cmp(&float(right)?),
        },
    }
}

// Stable merge sort that stops at the first incomparable pair.
fn merge_sort<T, F>(mut items: Vec<T>, compare: &mut F) -> Result<Vec<T>>
where
    F: FnMut(&T, &T) -> Result<Ordering>,
{
    if items.len() <= 1 {
        return Ok(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, compare)?;
    let right = merge_sort(right, compare)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(left_item), Some(right_item)) => {
                compare(right_item, left_item)? == Ordering::Less
            }
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DESC: &str = "Desc";

    #[test]
    fn test_object_member_path() {
        let data = json!({"a": {"b": "c"}});
        let wrapped = Wrapped::new(&data, DESC);
        let leaf = wrapped.at("a").unwrap().at("b").unwrap();

        assert_eq!(leaf, "c");
        assert_eq!(leaf.location(), "/a/b");
    }

    #[test]
    fn test_negative_index() {
        let data = json!(["a", "b", "c"]);
        let last = Wrapped::new(&data, DESC).at(-1).unwrap();

        assert_eq!(last, "c");
        assert_eq!(last.location(), "/-1");
    }

    #[test]
    fn test_owned_values_descend() {
        let data = json!([[1, 2], [3, 4]]);
        let sliced = Wrapped::new(&data, DESC).slice(Slice::starting_at(1)).unwrap();
        let inner = sliced.at(0).unwrap().at(1).unwrap();

        assert_eq!(inner, 4);
        assert_eq!(inner.location(), "/0/1");
    }

    #[test]
    fn test_string_characters() {
        let data = json!("héllo");
        let wrapped = Wrapped::new(&data, DESC);

        assert_eq!(wrapped.at(1).unwrap(), "é");
        assert_eq!(wrapped.len().unwrap(), 5);
        assert_eq!(wrapped.slice(Slice::new(Some(1), Some(3))).unwrap(), "él");
    }

    #[test]
    fn test_compare_numbers_and_bools() {
        let data = json!([1, 2.5, true]);
        let wrapped = Wrapped::new(&data, DESC);
        let one = wrapped.at(0).unwrap();
        let two_and_half = wrapped.at(1).unwrap();
        let yes = wrapped.at(2).unwrap();

        assert_eq!(one.try_cmp(&two_and_half).unwrap(), Ordering::Less);
        assert_eq!(one.try_cmp(&yes).unwrap(), Ordering::Equal);
        assert_ne!(one, yes);
    }

    #[test]
    fn test_compare_string_with_int_fails() {
        let data = json!(["a", 1]);
        let wrapped = Wrapped::new(&data, DESC);
        let error = wrapped
            .at(0)
            .unwrap()
            .try_cmp(&wrapped.at(1).unwrap())
            .unwrap_err();

        assert_eq!(error.location, "/0");
        assert_eq!(error.reason, "Comparison not supported between 'str' and 'int'");
    }

    #[test]
    fn test_sorted_by_key() {
        let data = json!([{"link": "1", "addr": "b"}, {"link": "0", "addr": "a"}]);
        let sorted = Wrapped::new(&data, DESC)
            .sorted_by_key(|item| item.at("link"))
            .unwrap();

        let addrs: Vec<_> = sorted
            .iter()
            .map(|item| item.at("addr").unwrap().into_value())
            .collect();
        assert_eq!(addrs, vec![json!("a"), json!("b")]);
        assert_eq!(sorted[0].location(), "/1");
    }

    #[test]
    fn test_sort_is_stable() {
        let data = json!([[1, "x"], [0, "y"], [1, "z"]]);
        let sorted = Wrapped::new(&data, DESC)
            .sorted_by_key(|item| item.at(0))
            .unwrap();
        let labels: Vec<_> = sorted.iter().map(|item| item.at(1).unwrap().to_string()).collect();

        assert_eq!(labels, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_bool_operators() {
        let data = json!({"t": true, "f": false});
        let wrapped = Wrapped::new(&data, DESC);
        let yes = wrapped.at("t").unwrap();

        assert_eq!(yes.and(&json!(false)).unwrap(), json!(false));
        assert_eq!(yes.or(&json!(false)).unwrap(), json!(true));
        assert_eq!(yes.xor(&json!(true)).unwrap(), json!(false));
        assert_eq!(yes.and(&json!(3)).unwrap(), json!(1));
        assert_eq!(yes.invert().unwrap(), json!(false));
        assert_eq!(wrapped.at("f").unwrap().invert().unwrap(), json!(true));
    }

    #[test]
    fn test_truthiness() {
        let data = json!(["", "a", 0, 1, [], [0], {}, {"a": 1}, null, false]);
        let truthy: Vec<bool> = Wrapped::new(&data, DESC)
            .iter()
            .unwrap()
            .map(|item| item.truthy())
            .collect();

        assert_eq!(
            truthy,
            vec![false, true, false, true, false, true, false, true, false, false]
        );
    }

    #[test]
    fn test_typed_accessors_report_kind() {
        let data = json!({"name": 5});
        let error = Wrapped::new(&data, DESC)
            .at("name")
            .unwrap()
            .as_str()
            .unwrap_err();

        assert_eq!(error.location, "/name");
        assert_eq!(error.reason, "Expected str but got 'int'");
    }
}
