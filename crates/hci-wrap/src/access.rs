//! Ways of reaching into a wrapped value

use crate::wrapped::Wrapped;
use serde_json::Value;
use std::fmt;

/// A half-open range over a sequence.
///
/// Negative bounds count from the end and out-of-range bounds are clamped,
/// so a slice never fails on a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    /// First position, the beginning when absent
    pub start: Option<i64>,
    /// Position after the last one, the end when absent
    pub end: Option<i64>,
}

impl Slice {
    /// Slice between optional bounds
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    /// The whole sequence
    pub fn full() -> Self {
        Self::default()
    }

    /// From the beginning up to `end`
    pub fn to(end: i64) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// From `start` up to the end
    pub fn starting_at(start: i64) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Concrete bounds for a sequence of `len` items, `start <= end`
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let len_signed = i64::try_from(len).unwrap_or(i64::MAX);
        let clamp = |bound: i64| -> usize {
            let absolute = if bound < 0 { len_signed + bound } else { bound };
            usize::try_from(absolute.clamp(0, len_signed)).unwrap_or(len)
        };
        let start = self.start.map_or(0, &clamp);
        let end = self.end.map_or(len, &clamp);
        (start, end.max(start))
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        f.write_str("..")?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        Ok(())
    }
}

/// Key, index or slice used to reach into a wrapped value
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    /// Object member by name
    Key(String),

    /// Sequence position, negative counts from the end
    Index(i64),

    /// Sub-sequence
    Slice(Slice),

    /// Anything else, rendered for the error reason
    Other(String),
}

impl Access {
    /// Classify a plain value used as a key
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(key) => Self::Key(key.clone()),
            Value::Number(number) => match number.as_i64() {
                Some(index) => Self::Index(index),
                None => Self::Other(number.to_string()),
            },
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
            Self::Slice(slice) => write!(f, "{slice}"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

impl From<&str> for Access {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for Access {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&String> for Access {
    fn from(key: &String) -> Self {
        Self::Key(key.clone())
    }
}

impl From<i32> for Access {
    fn from(index: i32) -> Self {
        Self::Index(i64::from(index))
    }
}

impl From<i64> for Access {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<usize> for Access {
    fn from(index: usize) -> Self {
        Self::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<Slice> for Access {
    fn from(slice: Slice) -> Self {
        Self::Slice(slice)
    }
}

impl From<&Value> for Access {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

// Keys are often taken from another part of a source, e.g. a node name
// used to look up its address.
impl From<&Wrapped<'_>> for Access {
    fn from(key: &Wrapped<'_>) -> Self {
        Self::from_value(key.value())
    }
}

impl From<Wrapped<'_>> for Access {
    fn from(key: Wrapped<'_>) -> Self {
        Self::from_value(key.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slice_bounds() {
        assert_eq!(Slice::full().bounds(3), (0, 3));
        assert_eq!(Slice::to(-1).bounds(3), (0, 2));
        assert_eq!(Slice::starting_at(1).bounds(3), (1, 3));
        assert_eq!(Slice::new(Some(-10), Some(10)).bounds(3), (0, 3));
        assert_eq!(Slice::new(Some(2), Some(1)).bounds(3), (2, 2));
        assert_eq!(Slice::to(5).bounds(0), (0, 0));
    }

    #[test]
    fn test_slice_display() {
        assert_eq!(Slice::to(-1).to_string(), "..-1");
        assert_eq!(Slice::full().to_string(), "..");
        assert_eq!(Slice::new(Some(1), Some(3)).to_string(), "1..3");
    }

    #[test]
    fn test_access_from_value() {
        assert_eq!(Access::from(&json!("a")), Access::Key("a".to_string()));
        assert_eq!(Access::from(&json!(2)), Access::Index(2));
        assert_eq!(Access::from(&json!(1.5)), Access::Other("1.5".to_string()));
        assert_eq!(Access::from(&json!(null)), Access::Other("null".to_string()));
    }
}
