//! # jparse-core
//!
//! Typed accessors over loosely-shaped JSON documents.
//!
//! A [`Document`] owns a decoded JSON object; [`Document::root`] returns a
//! [`Navigator`], a borrowed read-only view that reads strings, numbers,
//! booleans, nested objects and lists by key name, by path, or by the single
//! key matching a regular expression. Lookups fail with a typed
//! [`NavError`] instead of forcing callers through repeated `match` arms.
//!
//! ## Quick start
//!
//! ```rust
//! use jparse_core::{Document, ErrorKind};
//!
//! let json = r#"{"server":{"name":"edge-1","ports":[{"port":80},{"port":443}]},"tags":["a","b"]}"#;
//! let doc = Document::from_slice(json.as_bytes()).unwrap();
//! let root = doc.root();
//!
//! assert_eq!(root.string_with_path(&["server", "name"]).unwrap(), "edge-1");
//! assert_eq!(root.slice_of_string_with_name("tags").unwrap(), vec!["a", "b"]);
//!
//! let ports = root.slice_of_object_with_path(&["server", "ports"]).unwrap();
//! assert_eq!(ports[1].integer_with_name("port").unwrap(), 443);
//!
//! // The one key containing "serv"
//! let server = root.object_with_regex("serv").unwrap();
//! assert_eq!(server.keys(), vec!["name", "ports"]);
//!
//! let err = root.number_with_path(&["server", "name"]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::TypeMismatch);
//! ```
//!
//! ## Modules
//!
//! - [`document`] — decoding input into a [`Document`]
//! - [`navigator`] — name, path and regex lookups, struct projection
//! - [`must`] — panicking `must_*` forms and the [`Must`] combinator
//! - [`error`] — [`NavError`] and its [`ErrorKind`] classification
//! - [`types`] — [`JsonKind`], the kind names used in errors

pub mod document;
pub mod error;
pub mod must;
pub mod navigator;
mod projection;
pub mod types;

pub use document::Document;
pub use error::{DecodeError, ErrorKind, NavError, Result};
pub use must::Must;
pub use navigator::Navigator;
pub use types::JsonKind;
