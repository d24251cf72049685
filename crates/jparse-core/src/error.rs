//! Error types for document decoding and navigation.

use crate::types::JsonKind;
use thiserror::Error;

/// Failure to turn input into a navigable document.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The input was not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The input parsed, but its root is not an object.
    #[error("document root is {found}, expected object")]
    NotAnObject { found: JsonKind },
}

/// Errors returned by [`Document`](crate::Document) and
/// [`Navigator`](crate::Navigator) operations.
#[derive(Error, Debug)]
pub enum NavError {
    #[error("unable to decode document: {0}")]
    Decode(#[from] DecodeError),

    /// The key is absent from the current object.
    #[error("key '{key}' not found")]
    NotFound { key: String },

    /// The key is present but holds a value of another kind.
    #[error("key '{key}' holds {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: JsonKind,
        found: JsonKind,
    },

    /// The key holds a number that is fractional or outside the `i64` range.
    #[error("key '{key}' holds {value}, expected an integer")]
    NotAnInteger { key: String, value: f64 },

    /// A list under `key` has an element of the wrong kind.
    #[error("element {index} of '{key}' is {found}, expected {expected}")]
    ElementTypeMismatch {
        key: String,
        index: usize,
        expected: JsonKind,
        found: JsonKind,
    },

    #[error("no key matches pattern '{pattern}'")]
    NoMatch { pattern: String },

    #[error("pattern '{pattern}' matches more than one key: {keys:?}")]
    AmbiguousMatch { pattern: String, keys: Vec<String> },

    #[error("invalid key pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("path must contain at least one segment")]
    EmptyPath,

    /// A multi-segment path lookup failed; `source` names the failing segment.
    #[error("at path {path:?}: {source}")]
    InPath {
        path: Vec<String>,
        #[source]
        source: Box<NavError>,
    },

    #[error("unable to re-encode object: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("unable to load object into target type: {0}")]
    Projection(#[source] serde_json::Error),
}

/// Coarse classification of a [`NavError`], stable across path wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Decode,
    NotFound,
    TypeMismatch,
    NoMatch,
    AmbiguousMatch,
    Pattern,
    EmptyPath,
    Encode,
    Projection,
}

impl NavError {
    /// Classify this error. `InPath` reports the kind of the wrapped error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NavError::Decode(_) => ErrorKind::Decode,
            NavError::NotFound { .. } => ErrorKind::NotFound,
            NavError::TypeMismatch { .. }
            | NavError::NotAnInteger { .. }
            | NavError::ElementTypeMismatch { .. } => ErrorKind::TypeMismatch,
            NavError::NoMatch { .. } => ErrorKind::NoMatch,
            NavError::AmbiguousMatch { .. } => ErrorKind::AmbiguousMatch,
            NavError::Pattern { .. } => ErrorKind::Pattern,
            NavError::EmptyPath => ErrorKind::EmptyPath,
            NavError::InPath { source, .. } => source.kind(),
            NavError::Encode(_) => ErrorKind::Encode,
            NavError::Projection(_) => ErrorKind::Projection,
        }
    }

    /// The innermost error, with any path context peeled off.
    pub fn root_cause(&self) -> &NavError {
        match self {
            NavError::InPath { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The key (or path segment) this error is about, when it has one.
    pub fn key(&self) -> Option<&str> {
        match self.root_cause() {
            NavError::NotFound { key }
            | NavError::TypeMismatch { key, .. }
            | NavError::NotAnInteger { key, .. }
            | NavError::ElementTypeMismatch { key, .. } => Some(key),
            _ => None,
        }
    }

    pub(crate) fn in_path(path: &[&str], source: NavError) -> Self {
        NavError::InPath {
            path: path.iter().map(|segment| segment.to_string()).collect(),
            source: Box::new(source),
        }
    }
}

/// Convenience alias used throughout jparse-core.
pub type Result<T> = std::result::Result<T, NavError>;
