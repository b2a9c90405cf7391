//! # hci-wrap
//!
//! Context-tracking views over JSON sources.
//!
//! Values loaded from pcs and local configuration files are weakly typed
//! JSON. Extraction code reads them through [`Wrapped`] values which behave
//! like the plain data but report every structural mismatch (missing key,
//! wrong type, index out of range) as an [`InvalidSourceError`] carrying the
//! path to the offending part:
//!
//! ```rust
//! use hci_wrap::Wrapped;
//! use serde_json::json;
//!
//! let conf = json!({"nodes": [{"name": "n1"}]});
//! let wrapped = Wrapped::new(&conf, "corosync configuration");
//! let error = wrapped.at("nodes").and_then(|nodes| nodes.at(0)).and_then(|node| node.at("addrs"));
//!
//! let error = error.unwrap_err();
//! assert_eq!(error.location, "/nodes/0");
//! assert_eq!(error.reason, "Missing key 'addrs'");
//! ```
//!
//! A [`Boundary`] wraps the declared source arguments of an extraction
//! function and unwraps its result, so callers only deal with plain values.

/// Key, index and slice access descriptors.
pub mod access;
/// Extraction boundaries binding arguments and unwrapping results.
pub mod boundary;
/// Source context and the invalid source error.
pub mod context;
/// Paths within a source document.
pub mod path;
/// Unwrapping of extraction results.
pub mod plain;
/// The wrapped value.
pub mod wrapped;

pub use access::{Access, Slice};
pub use boundary::{extract, Arguments, Boundary, Bound};
pub use context::{Context, InvalidSourceError, Kind};
pub use path::{Path, Segment};
pub use plain::{Extracted, IntoPlain, Record};
pub use wrapped::{is_truthy, wrap, Wrapped};

use thiserror::Error;

/// Errors raised while running an extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The source does not have the shape the extraction expects
    #[error(transparent)]
    InvalidSource(#[from] InvalidSourceError),

    /// A value used as a source part was never wrapped
    #[error("{0}")]
    Type(String),

    /// Arguments do not match the declared parameters
    #[error("{function}(): {reason}")]
    Bind { function: String, reason: String },
}

impl Error {
    /// Argument binding error for the given function
    pub fn bind(function: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Bind {
            function: function.into(),
            reason: reason.into(),
        }
    }

    /// Generic type error
    pub fn type_error(reason: impl Into<String>) -> Self {
        Self::Type(reason.into())
    }

    /// The invalid source error, if that is what this is
    pub fn as_invalid_source(&self) -> Option<&InvalidSourceError> {
        match self {
            Self::InvalidSource(error) => Some(error),
            _ => None,
        }
    }
}

/// Result type for extractions
pub type Result<T> = std::result::Result<T, Error>;

/// Report a well-formed part of a source as invalid.
///
/// The error points at the value's own location. A value that did not come
/// from a wrapped source has no location, so a plain type error is returned.
pub fn invalid_part<'a>(value: impl Into<Extracted<'a>>, reason: impl Into<String>) -> Error {
    match value.into() {
        Extracted::Wrapped(wrapped) => Error::InvalidSource(wrapped.invalid_part(reason)),
        _ => Error::type_error(reason),
    }
}

/// True if the value, wrapped or plain, is null
pub fn is_none<'a>(value: impl Into<Extracted<'a>>) -> bool {
    value.into().is_null()
}
