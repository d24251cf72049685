//! Decoding JSON input into an owned, navigable document.

use crate::error::{DecodeError, NavError, Result};
use crate::navigator::Navigator;
use crate::types::JsonKind;
use serde_json::{Map, Value};
use std::io::Read;
use std::str::FromStr;
use tracing::debug;

/// An owned JSON document whose root is an object.
///
/// The tree is never mutated after decoding. [`Document::root`] hands out
/// [`Navigator`]s that borrow from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

impl Document {
    /// Decode a document from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Decode`] if the bytes are not well-formed JSON or
    /// the root value is not an object.
    ///
    /// # Examples
    ///
    /// ```
    /// use jparse_core::Document;
    ///
    /// let doc = Document::from_slice(br#"{"name":"Alice"}"#).unwrap();
    /// assert_eq!(doc.root().string_with_name("name").unwrap(), "Alice");
    ///
    /// assert!(Document::from_slice(b"[1, 2, 3]").is_err());
    /// ```
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes).map_err(DecodeError::Syntax)?;
        debug!(bytes = bytes.len(), "decoded document");
        Self::from_value(value)
    }

    /// Decode a document from a reader, consuming it to the end.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader).map_err(DecodeError::Syntax)?;
        debug!("decoded document from reader");
        Self::from_value(value)
    }

    /// Wrap an already-decoded value. Fails unless it is an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(NavError::Decode(DecodeError::NotAnObject {
                found: JsonKind::of(&other),
            })),
        }
    }

    /// A navigator over the root object.
    pub fn root(&self) -> Navigator<'_> {
        Navigator::new(&self.root)
    }

    /// Give back the decoded root object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.root
    }
}

impl FromStr for Document {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}

impl TryFrom<Value> for Document {
    type Error = NavError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}
