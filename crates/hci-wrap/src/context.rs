//! Source context carried by wrapped values and the error built from it

use crate::path::{Path, Segment};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Runtime kind of a JSON value, named the way error reasons report it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// JSON string
    Str,
    /// JSON number without fraction
    Int,
    /// JSON number with fraction
    Float,
    /// JSON boolean
    Bool,
    /// JSON null
    Null,
    /// JSON array
    List,
    /// JSON object
    Dict,
}

impl Kind {
    /// Kind of a plain value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::Str,
            Value::Number(number) if number.is_i64() || number.is_u64() => Self::Int,
            Value::Number(_) => Self::Float,
            Value::Bool(_) => Self::Bool,
            Value::Null => Self::Null,
            Value::Array(_) => Self::List,
            Value::Object(_) => Self::Dict,
        }
    }

    /// Name used in error reasons
    pub fn name(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Null => "NoneType",
            Self::List => "list",
            Self::Dict => "dict",
        }
    }

    /// Scalars cannot be descended into
    pub fn is_scalar(self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Bool | Self::Null)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A source value that cannot be interpreted as the extraction expects.
///
/// `data` always holds the whole original source, not the failing fragment,
/// so callers can show the surrounding document when needed.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{reason} in {description}{}", at_location(.location))]
pub struct InvalidSourceError {
    /// Description of the logical source, e.g. "corosync configuration"
    pub description: String,

    /// The original source document
    pub data: Value,

    /// Slash-delimited location within `data`, empty for the root
    pub location: String,

    /// What went wrong
    pub reason: String,
}

fn at_location(location: &str) -> String {
    if location.is_empty() {
        String::new()
    } else {
        format!(" at {location}")
    }
}

/// Where a wrapped value came from: the original root, a description of the
/// source, and the path walked from the root.
///
/// Contexts are never modified. Descending creates a new context sharing the
/// parent's path prefix.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    root: &'a Value,
    description: &'a str,
    path: Path,
}

impl<'a> Context<'a> {
    /// Context for the root of a source
    pub fn new(root: &'a Value, description: &'a str) -> Self {
        Self {
            root,
            description,
            path: Path::root(),
        }
    }

    /// Context at an explicit path within a source
    pub fn with_path(root: &'a Value, description: &'a str, path: Path) -> Self {
        Self {
            root,
            description,
            path,
        }
    }

    /// Original source document
    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// Description of the source
    pub fn description(&self) -> &'a str {
        self.description
    }

    /// Path from the root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Context one level below this one
    #[must_use]
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        Self {
            root: self.root,
            description: self.description,
            path: self.path.child(segment),
        }
    }

    /// Build the error for a problem found at this context's location
    pub fn error(&self, reason: impl Into<String>) -> InvalidSourceError {
        InvalidSourceError {
            description: self.description.to_string(),
            data: self.root.clone(),
            location: self.path.render(),
            reason: reason.into(),
        }
    }
}
