//! Locations within a source document

use std::fmt;
use std::sync::Arc;

/// One step taken while descending into a source document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member name
    Key(String),

    /// Array element or string character position
    Index(i64),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<i64> for Segment {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

/// Path from the document root to a value.
///
/// A path is a persistent cons-list. [`Path::child`] links a new segment in
/// front of the shared parent chain and leaves the parent untouched, so paths
/// handed to sibling values never observe each other's segments.
#[derive(Debug, Clone, Default)]
pub struct Path {
    head: Option<Arc<Link>>,
    len: usize,
}

#[derive(Debug)]
struct Link {
    segment: Segment,
    parent: Option<Arc<Link>>,
}

impl Path {
    /// The empty path, pointing at the document root
    pub fn root() -> Self {
        Self::default()
    }

    /// Path one level below this one
    #[must_use]
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        Self {
            head: Some(Arc::new(Link {
                segment: segment.into(),
                parent: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for the root path
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Segments from the root downwards
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(self.len);
        let mut link = self.head.as_deref();
        while let Some(current) = link {
            segments.push(current.segment.clone());
            link = current.parent.as_deref();
        }
        segments.reverse();
        segments
    }

    /// Slash-delimited rendering: `""` for the root, `/nodes/0/addrs` otherwise
    pub fn render(&self) -> String {
        self.segments()
            .iter()
            .map(|segment| format!("/{segment}"))
            .collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.segments() == other.segments()
    }
}

impl Eq for Path {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_empty() {
        let path = Path::root();
        assert!(path.is_empty());
        assert_eq!(path.render(), "");
    }

    #[test]
    fn test_child_renders_segments() {
        let path = Path::root().child("primitives").child(0_i64).child("operations");
        assert_eq!(path.len(), 3);
        assert_eq!(path.render(), "/primitives/0/operations");
        assert_eq!(
            path.segments(),
            vec![
                Segment::Key("primitives".to_string()),
                Segment::Index(0),
                Segment::Key("operations".to_string()),
            ]
        );
    }

    #[test]
    fn test_siblings_do_not_share_segments() {
        let parent = Path::root().child("nodes");
        let first = parent.child(0_usize);
        let second = parent.child("other");

        assert_eq!(parent.render(), "/nodes");
        assert_eq!(first.render(), "/nodes/0");
        assert_eq!(second.render(), "/nodes/other");
    }

    #[test]
    fn test_negative_index_is_kept() {
        let path = Path::root().child(-1_i64);
        assert_eq!(path.to_string(), "/-1");
    }
}
