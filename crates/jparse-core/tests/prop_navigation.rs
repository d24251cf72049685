/// Property-based tests for key enumeration and path composition.
///
/// Strategies generate random objects with string keys and nested objects,
/// then check that:
/// - `keys()` returns every top-level key exactly once, sorted
/// - `keys_with_regex` is a sorted subset agreeing with a direct match
/// - a path lookup equals the chain of single-key object lookups
/// - accessors never coerce strings and numbers into one another
use jparse_core::{Document, ErrorKind};
use proptest::prelude::*;
use regex::Regex;
use serde_json::{Map, Value};

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_.]{0,10}").unwrap()
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000i64..1_000_000i64).prop_map(Value::from),
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

fn arb_object() -> impl Strategy<Value = Map<String, Value>> {
    let leaf = prop::collection::btree_map(arb_key(), arb_scalar(), 0..6)
        .prop_map(|m| m.into_iter().collect::<Map<String, Value>>());
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop::collection::btree_map(
            arb_key(),
            prop_oneof![arb_scalar(), inner.prop_map(Value::Object)],
            0..6,
        )
        .prop_map(|m| m.into_iter().collect::<Map<String, Value>>())
    })
}

/// A chain of nested objects along `path`, with `leaf` stored under the last key.
fn nest(path: &[String], leaf: Value) -> Value {
    path.iter()
        .rev()
        .fold(leaf, |acc, key| {
            let mut m = Map::new();
            m.insert(key.clone(), acc);
            Value::Object(m)
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn keys_are_sorted_and_unique(obj in arb_object()) {
        let doc = Document::from(obj.clone());
        let keys = doc.root().keys();
        prop_assert_eq!(keys.len(), obj.len());
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        for key in obj.keys() {
            prop_assert!(keys.contains(&key.as_str()));
        }
    }

    #[test]
    fn keys_with_regex_is_filtered_keys(obj in arb_object(), pattern in "[a-z_.]{1,2}") {
        let doc = Document::from(obj);
        let re = Regex::new(&pattern).unwrap();
        let expected: Vec<&str> = doc.root().keys().into_iter().filter(|k| re.is_match(k)).collect();
        prop_assert_eq!(doc.root().keys_with_regex(&pattern).unwrap(), expected);
    }

    #[test]
    fn path_equals_chained_lookups(
        path in prop::collection::vec(arb_key(), 1..5),
        leaf in "[a-z]{0,8}",
    ) {
        let value = nest(&path, Value::String(leaf.clone()));
        let doc = Document::from_value(value).unwrap();
        let segments: Vec<&str> = path.iter().map(String::as_str).collect();

        let (last, parents) = segments.split_last().unwrap();
        let mut nav = doc.root();
        for segment in parents {
            nav = nav.object_with_name(segment).unwrap();
        }
        prop_assert_eq!(nav.string_with_name(last).unwrap(), leaf.as_str());
        prop_assert_eq!(doc.root().string_with_path(&segments).unwrap(), leaf.as_str());
    }

    #[test]
    fn strings_and_numbers_do_not_coerce(s in "[0-9]{1,6}", n in -1_000i64..1_000) {
        let mut m = Map::new();
        m.insert("s".to_string(), Value::String(s));
        m.insert("n".to_string(), Value::from(n));
        let doc = Document::from(m);
        let root = doc.root();
        prop_assert_eq!(root.number_with_name("s").unwrap_err().kind(), ErrorKind::TypeMismatch);
        prop_assert_eq!(root.integer_with_name("s").unwrap_err().kind(), ErrorKind::TypeMismatch);
        prop_assert_eq!(root.string_with_name("n").unwrap_err().kind(), ErrorKind::TypeMismatch);
        prop_assert_eq!(root.integer_with_name("n").unwrap(), n);
    }
}
