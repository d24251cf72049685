//! Panicking `must_*` forms of every fallible operation.
//!
//! Use these only where the document shape is guaranteed by contract; a
//! failure here is a bug at the call site, not bad input.

use crate::document::Document;
use crate::error::NavError;
use crate::navigator::Navigator;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Unwrap a navigation result, panicking with the error's message on failure.
///
/// ```
/// use jparse_core::{Document, Must};
///
/// let doc = r#"{"a":{"b":"c"}}"#.parse::<Document>().must();
/// assert_eq!(doc.root().string_with_path(&["a", "b"]).must(), "c");
/// ```
pub trait Must<T> {
    fn must(self) -> T;
}

impl<T> Must<T> for Result<T, NavError> {
    #[track_caller]
    fn must(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => panic!("jparse: {err}"),
        }
    }
}

macro_rules! must_forward {
    (impl<$lt:lifetime> { $($must:ident => $fallible:ident($arg:ident: $arg_ty:ty) -> $ret:ty;)* }) => {
        impl<$lt> Navigator<$lt> {
            $(
                #[doc = concat!("Like [`Navigator::", stringify!($fallible), "`], but panics on failure.")]
                #[track_caller]
                pub fn $must(&self, $arg: $arg_ty) -> $ret {
                    self.$fallible($arg).must()
                }
            )*
        }
    };
}

must_forward! { impl<'a> {
    must_keys_with_regex => keys_with_regex(pattern: &str) -> Vec<&'a str>;

    must_value_with_name => value_with_name(name: &str) -> &'a Value;
    must_object_with_name => object_with_name(name: &str) -> Navigator<'a>;
    must_string_with_name => string_with_name(name: &str) -> &'a str;
    must_number_with_name => number_with_name(name: &str) -> f64;
    must_integer_with_name => integer_with_name(name: &str) -> i64;
    must_bool_with_name => bool_with_name(name: &str) -> bool;
    must_slice_of_object_with_name => slice_of_object_with_name(name: &str) -> Vec<Navigator<'a>>;
    must_slice_of_string_with_name => slice_of_string_with_name(name: &str) -> Vec<&'a str>;

    must_value_with_path => value_with_path(path: &[&str]) -> &'a Value;
    must_object_with_path => object_with_path(path: &[&str]) -> Navigator<'a>;
    must_string_with_path => string_with_path(path: &[&str]) -> &'a str;
    must_number_with_path => number_with_path(path: &[&str]) -> f64;
    must_integer_with_path => integer_with_path(path: &[&str]) -> i64;
    must_bool_with_path => bool_with_path(path: &[&str]) -> bool;
    must_slice_of_object_with_path => slice_of_object_with_path(path: &[&str]) -> Vec<Navigator<'a>>;
    must_slice_of_string_with_path => slice_of_string_with_path(path: &[&str]) -> Vec<&'a str>;

    must_value_with_regex => value_with_regex(pattern: &str) -> &'a Value;
    must_object_with_regex => object_with_regex(pattern: &str) -> Navigator<'a>;
    must_string_with_regex => string_with_regex(pattern: &str) -> &'a str;
    must_number_with_regex => number_with_regex(pattern: &str) -> f64;
    must_integer_with_regex => integer_with_regex(pattern: &str) -> i64;
    must_bool_with_regex => bool_with_regex(pattern: &str) -> bool;
    must_slice_of_object_with_regex => slice_of_object_with_regex(pattern: &str) -> Vec<Navigator<'a>>;
    must_slice_of_string_with_regex => slice_of_string_with_regex(pattern: &str) -> Vec<&'a str>;
} }

impl Navigator<'_> {
    /// Like [`Navigator::load_into`], but panics on failure.
    #[track_caller]
    pub fn must_load_into<T: DeserializeOwned>(&self) -> T {
        self.load_into().must()
    }
}

impl Document {
    /// Like [`Document::from_slice`], but panics on failure.
    #[track_caller]
    pub fn must_from_slice(bytes: &[u8]) -> Self {
        Self::from_slice(bytes).must()
    }

    /// Like [`str::parse`] into a [`Document`], but panics on failure.
    #[track_caller]
    pub fn must_from_str(s: &str) -> Self {
        s.parse::<Document>().must()
    }
}
