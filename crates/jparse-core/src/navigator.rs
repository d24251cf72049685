//! Typed lookups over a JSON object by key name, dotted path, or key regex.
//!
//! A [`Navigator`] is a borrowed, read-only view of one JSON object. Every
//! accessor comes in three addressing forms:
//!
//! - `*_with_name("key")` -- a single key of the current object
//! - `*_with_path(&["a", "b", "key"])` -- every segment but the last must
//!   resolve to an object; the last is read with the accessor's type
//! - `*_with_regex("^ke")` -- the one key matching the pattern
//!
//! Accessors never coerce between kinds: a string is not a number, and a
//! number is not a string.

use crate::error::{NavError, Result};
use crate::projection;
use crate::types::JsonKind;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::trace;

/// Read-only view over one JSON object.
///
/// Navigators are cheap to copy. Child navigators returned by object lookups
/// borrow the nested map from the same tree.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> Navigator<'a> {
    pub fn new(object: &'a Map<String, Value>) -> Self {
        Self { object }
    }

    /// The underlying object map.
    pub fn as_map(&self) -> &'a Map<String, Value> {
        self.object
    }

    pub fn len(&self) -> usize {
        self.object.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object.is_empty()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.object.contains_key(name)
    }

    /// All keys of the current object in ascending byte order.
    ///
    /// ```
    /// use jparse_core::Document;
    ///
    /// let doc: Document = r#"{"b":1,"a":2,"c":3}"#.parse().unwrap();
    /// assert_eq!(doc.root().keys(), vec!["a", "b", "c"]);
    /// ```
    pub fn keys(&self) -> Vec<&'a str> {
        let mut keys: Vec<&'a str> = self.object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// The sorted keys in which `pattern` finds a match.
    ///
    /// The pattern is not anchored; use `^...$` for whole-key matching.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Pattern`] if `pattern` does not compile.
    pub fn keys_with_regex(&self, pattern: &str) -> Result<Vec<&'a str>> {
        let re = compile(pattern)?;
        let mut keys = self.keys();
        keys.retain(|key| re.is_match(key));
        Ok(keys)
    }

    /// Resolve `pattern` to the single key it matches.
    fn single_key_with_regex(&self, pattern: &str) -> Result<&'a str> {
        let matches = self.keys_with_regex(pattern)?;
        match matches.as_slice() {
            [] => Err(NavError::NoMatch {
                pattern: pattern.to_string(),
            }),
            [key] => {
                let key = *key;
                trace!(pattern, key, "resolved key pattern");
                Ok(key)
            }
            _ => Err(NavError::AmbiguousMatch {
                pattern: pattern.to_string(),
                keys: matches.iter().map(|k| k.to_string()).collect(),
            }),
        }
    }

    /// The raw value stored under `name`, of any kind.
    pub fn value_with_name(&self, name: &str) -> Result<&'a Value> {
        self.object.get(name).ok_or_else(|| NavError::NotFound {
            key: name.to_string(),
        })
    }

    /// A navigator over the object stored under `name`.
    ///
    /// # Errors
    ///
    /// [`NavError::NotFound`] if the key is absent, [`NavError::TypeMismatch`]
    /// if it holds anything but an object.
    pub fn object_with_name(&self, name: &str) -> Result<Navigator<'a>> {
        match self.value_with_name(name)? {
            Value::Object(map) => Ok(Navigator::new(map)),
            other => Err(mismatch(name, JsonKind::Object, other)),
        }
    }

    pub fn string_with_name(&self, name: &str) -> Result<&'a str> {
        match self.value_with_name(name)? {
            Value::String(s) => Ok(s),
            other => Err(mismatch(name, JsonKind::String, other)),
        }
    }

    /// Any JSON number, as `f64`.
    pub fn number_with_name(&self, name: &str) -> Result<f64> {
        let value = self.value_with_name(name)?;
        value
            .as_f64()
            .ok_or_else(|| mismatch(name, JsonKind::Number, value))
    }

    /// A JSON number with an integral value that fits in `i64`.
    ///
    /// Written forms do not matter: `42` and `42.0` both read as `42`, while
    /// `42.5` and `1e300` are rejected with [`NavError::NotAnInteger`].
    pub fn integer_with_name(&self, name: &str) -> Result<i64> {
        let n = match self.value_with_name(name)? {
            Value::Number(n) => n,
            other => return Err(mismatch(name, JsonKind::Number, other)),
        };
        if let Some(i) = n.as_i64() {
            return Ok(i);
        }
        let f = n.as_f64().unwrap_or(f64::NAN);
        // 2^63 is exactly representable; i64::MAX is not.
        if f.fract() == 0.0 && f >= -(2f64.powi(63)) && f < 2f64.powi(63) {
            Ok(f as i64)
        } else {
            Err(NavError::NotAnInteger {
                key: name.to_string(),
                value: f,
            })
        }
    }

    pub fn bool_with_name(&self, name: &str) -> Result<bool> {
        match self.value_with_name(name)? {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch(name, JsonKind::Bool, other)),
        }
    }

    /// Navigators over each element of the list stored under `name`.
    ///
    /// Every element must be an object; an empty list yields an empty vec.
    pub fn slice_of_object_with_name(&self, name: &str) -> Result<Vec<Navigator<'a>>> {
        list_of(name, self.value_with_name(name)?, JsonKind::Object, |item| match item {
            Value::Object(map) => Some(Navigator::new(map)),
            _ => None,
        })
    }

    /// The strings of the list stored under `name`.
    ///
    /// Fails on the first non-string element; no partial result is returned.
    pub fn slice_of_string_with_name(&self, name: &str) -> Result<Vec<&'a str>> {
        list_of(name, self.value_with_name(name)?, JsonKind::String, |item| {
            item.as_str()
        })
    }

    /// Walk `path`, reading the last segment with `read`.
    ///
    /// A one-segment path is exactly `read(self, segment)`. Longer paths wrap
    /// failures in [`NavError::InPath`].
    fn resolve_path<T>(
        &self,
        path: &[&str],
        read: impl FnOnce(Navigator<'a>, &str) -> Result<T>,
    ) -> Result<T> {
        let (last, parents) = path.split_last().ok_or(NavError::EmptyPath)?;
        if parents.is_empty() {
            return read(*self, *last);
        }
        let mut current = *self;
        for &segment in parents {
            trace!(segment, "descending into object");
            current = current
                .object_with_name(segment)
                .map_err(|e| NavError::in_path(path, e))?;
        }
        read(current, *last).map_err(|e| NavError::in_path(path, e))
    }

    pub fn value_with_path(&self, path: &[&str]) -> Result<&'a Value> {
        self.resolve_path(path, |nav, key| nav.value_with_name(key))
    }

    /// Resolve every segment of `path` as an object.
    ///
    /// ```
    /// use jparse_core::{Document, ErrorKind};
    ///
    /// let doc: Document = r#"{"aaa":{"bbb":{"ccc":{"what":"42"}}}}"#.parse().unwrap();
    /// let ccc = doc.root().object_with_path(&["aaa", "bbb", "ccc"]).unwrap();
    /// assert_eq!(ccc.string_with_name("what").unwrap(), "42");
    ///
    /// let err = doc.root().object_with_path(&["aaa", "bbb", "zzz"]).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::NotFound);
    /// assert_eq!(err.key(), Some("zzz"));
    /// ```
    pub fn object_with_path(&self, path: &[&str]) -> Result<Navigator<'a>> {
        self.resolve_path(path, |nav, key| nav.object_with_name(key))
    }

    pub fn string_with_path(&self, path: &[&str]) -> Result<&'a str> {
        self.resolve_path(path, |nav, key| nav.string_with_name(key))
    }

    pub fn number_with_path(&self, path: &[&str]) -> Result<f64> {
        self.resolve_path(path, |nav, key| nav.number_with_name(key))
    }

    pub fn integer_with_path(&self, path: &[&str]) -> Result<i64> {
        self.resolve_path(path, |nav, key| nav.integer_with_name(key))
    }

    pub fn bool_with_path(&self, path: &[&str]) -> Result<bool> {
        self.resolve_path(path, |nav, key| nav.bool_with_name(key))
    }

    pub fn slice_of_object_with_path(&self, path: &[&str]) -> Result<Vec<Navigator<'a>>> {
        self.resolve_path(path, |nav, key| nav.slice_of_object_with_name(key))
    }

    pub fn slice_of_string_with_path(&self, path: &[&str]) -> Result<Vec<&'a str>> {
        self.resolve_path(path, |nav, key| nav.slice_of_string_with_name(key))
    }

    pub fn value_with_regex(&self, pattern: &str) -> Result<&'a Value> {
        self.value_with_name(self.single_key_with_regex(pattern)?)
    }

    /// The object under the one key matching `pattern`.
    ///
    /// # Errors
    ///
    /// [`NavError::Pattern`] for an invalid pattern, [`NavError::NoMatch`] or
    /// [`NavError::AmbiguousMatch`] unless exactly one key matches, then
    /// whatever [`Navigator::object_with_name`] returns for that key.
    pub fn object_with_regex(&self, pattern: &str) -> Result<Navigator<'a>> {
        self.object_with_name(self.single_key_with_regex(pattern)?)
    }

    pub fn string_with_regex(&self, pattern: &str) -> Result<&'a str> {
        self.string_with_name(self.single_key_with_regex(pattern)?)
    }

    pub fn number_with_regex(&self, pattern: &str) -> Result<f64> {
        self.number_with_name(self.single_key_with_regex(pattern)?)
    }

    pub fn integer_with_regex(&self, pattern: &str) -> Result<i64> {
        self.integer_with_name(self.single_key_with_regex(pattern)?)
    }

    pub fn bool_with_regex(&self, pattern: &str) -> Result<bool> {
        self.bool_with_name(self.single_key_with_regex(pattern)?)
    }

    pub fn slice_of_object_with_regex(&self, pattern: &str) -> Result<Vec<Navigator<'a>>> {
        self.slice_of_object_with_name(self.single_key_with_regex(pattern)?)
    }

    pub fn slice_of_string_with_regex(&self, pattern: &str) -> Result<Vec<&'a str>> {
        self.slice_of_string_with_name(self.single_key_with_regex(pattern)?)
    }

    /// Deserialize the current object into `T`.
    ///
    /// The object is re-encoded to JSON and decoded into `T`. Struct fields
    /// match object keys case-insensitively, preferring a key that names the
    /// field exactly; nested structs and list elements match the same way.
    /// Unknown fields are ignored unless `T` denies them.
    ///
    /// ```
    /// use jparse_core::Document;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Owner {
    ///     name: String,
    ///     age: u32,
    /// }
    ///
    /// let doc: Document = r#"{"owner":{"Name":"Ada","AGE":36,"extra":true}}"#.parse().unwrap();
    /// let owner: Owner = doc.root().object_with_name("owner").unwrap().load_into().unwrap();
    /// assert_eq!(owner.name, "Ada");
    /// assert_eq!(owner.age, 36);
    /// ```
    pub fn load_into<T: DeserializeOwned>(&self) -> Result<T> {
        let bytes = serde_json::to_vec(self.object).map_err(NavError::Encode)?;
        let value: Value = serde_json::from_slice(&bytes).map_err(NavError::Encode)?;
        projection::from_value(value).map_err(NavError::Projection)
    }
}

impl<'a> TryFrom<&'a Value> for Navigator<'a> {
    type Error = NavError;

    fn try_from(value: &'a Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Navigator::new(map)),
            other => Err(NavError::Decode(crate::error::DecodeError::NotAnObject {
                found: JsonKind::of(other),
            })),
        }
    }
}

impl<'a> From<&'a Map<String, Value>> for Navigator<'a> {
    fn from(object: &'a Map<String, Value>) -> Self {
        Navigator::new(object)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| NavError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn mismatch(key: &str, expected: JsonKind, found: &Value) -> NavError {
    NavError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: JsonKind::of(found),
    }
}

/// Convert every element of the list under `key` with `convert`, failing on
/// the first element it rejects.
fn list_of<'a, T>(
    key: &str,
    value: &'a Value,
    expected: JsonKind,
    convert: impl Fn(&'a Value) -> Option<T>,
) -> Result<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(mismatch(key, JsonKind::Array, other)),
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            convert(item).ok_or_else(|| NavError::ElementTypeMismatch {
                key: key.to_string(),
                index,
                expected,
                found: JsonKind::of(item),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("fixture must be an object"),
        }
    }

    #[test]
    fn integer_accepts_integral_floats() {
        let m = map(json!({"a": 42, "b": 42.0, "c": -7, "d": 42.5, "e": 1e300, "f": "42"}));
        let nav = Navigator::new(&m);
        assert_eq!(nav.integer_with_name("a").unwrap(), 42);
        assert_eq!(nav.integer_with_name("b").unwrap(), 42);
        assert_eq!(nav.integer_with_name("c").unwrap(), -7);
        assert!(matches!(
            nav.integer_with_name("d"),
            Err(NavError::NotAnInteger { .. })
        ));
        assert!(matches!(
            nav.integer_with_name("e"),
            Err(NavError::NotAnInteger { .. })
        ));
        assert!(matches!(
            nav.integer_with_name("f"),
            Err(NavError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn integer_rejects_u64_beyond_i64() {
        let m = map(json!({"big": u64::MAX}));
        let nav = Navigator::new(&m);
        assert!(matches!(
            nav.integer_with_name("big"),
            Err(NavError::NotAnInteger { .. })
        ));
        assert_eq!(nav.number_with_name("big").unwrap(), u64::MAX as f64);
    }

    #[test]
    fn list_of_reports_first_bad_index() {
        let value = json!(["a", "b", 3, null]);
        let err = list_of("tags", &value, JsonKind::String, |v| v.as_str()).unwrap_err();
        match err {
            NavError::ElementTypeMismatch { index, found, .. } => {
                assert_eq!(index, 2);
                assert_eq!(found, JsonKind::Number);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_path_is_rejected() {
        let m = map(json!({"a": 1}));
        let nav = Navigator::new(&m);
        assert!(matches!(nav.value_with_path(&[]), Err(NavError::EmptyPath)));
    }

    #[test]
    fn navigator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Navigator<'static>>();
        assert_send_sync::<crate::Document>();
    }
}
