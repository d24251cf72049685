//! Case-insensitive struct projection of a JSON value.
//!
//! [`Folded`] wraps a `serde_json::Value` and forwards to its deserializer,
//! except that when the target asks for a struct, object keys that differ
//! from a field name only by case are renamed to that field. A key naming a
//! field exactly always wins over its case variants. Nested objects and list
//! elements are folded the same way.

use serde::de::{
    DeserializeOwned, DeserializeSeed, Deserializer, Error as _, MapAccess, SeqAccess, Visitor,
};
use serde::forward_to_deserialize_any;
use serde_json::{map, Map, Value};

/// Deserialize `value` into `T`, matching struct fields case-insensitively.
pub(crate) fn from_value<T: DeserializeOwned>(value: Value) -> serde_json::Result<T> {
    T::deserialize(Folded(value))
}

/// Rename keys of `object` onto the case-insensitively equal names in `fields`.
fn fold_keys(object: Map<String, Value>, fields: &'static [&'static str]) -> Map<String, Value> {
    let exact: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|field| object.contains_key(*field))
        .collect();
    let mut folded = Map::new();
    for (key, value) in object {
        if fields.contains(&key.as_str()) {
            folded.insert(key, value);
            continue;
        }
        match fields.iter().find(|field| same_fold(field, &key)) {
            Some(field) if exact.contains(field) => {}
            Some(field) => {
                folded.insert((*field).to_string(), value);
            }
            None => {
                folded.insert(key, value);
            }
        }
    }
    folded
}

fn same_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

struct Folded(Value);

impl<'de> Deserializer<'de> for Folded {
    type Error = serde_json::Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> serde_json::Result<V::Value> {
        match self.0 {
            Value::Array(items) => visitor.visit_seq(FoldedSeq(items.into_iter())),
            Value::Object(object) => visitor.visit_map(FoldedMap::new(object)),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> serde_json::Result<V::Value> {
        match self.0 {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(Folded(other)),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> serde_json::Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> serde_json::Result<V::Value> {
        match self.0 {
            Value::Object(object) => visitor.visit_map(FoldedMap::new(fold_keys(object, fields))),
            other => Folded(other).deserialize_any(visitor),
        }
    }

    // Enum payloads are decoded without folding.
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> serde_json::Result<V::Value> {
        self.0.deserialize_enum(name, variants, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map identifier
        ignored_any
    }
}

struct FoldedSeq(std::vec::IntoIter<Value>);

impl<'de> SeqAccess<'de> for FoldedSeq {
    type Error = serde_json::Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> serde_json::Result<Option<T::Value>> {
        self.0
            .next()
            .map(|item| seed.deserialize(Folded(item)))
            .transpose()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.0.len())
    }
}

struct FoldedMap {
    entries: map::IntoIter,
    pending: Option<Value>,
}

impl FoldedMap {
    fn new(object: Map<String, Value>) -> Self {
        Self {
            entries: object.into_iter(),
            pending: None,
        }
    }
}

impl<'de> MapAccess<'de> for FoldedMap {
    type Error = serde_json::Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> serde_json::Result<Option<K::Value>> {
        match self.entries.next() {
            Some((key, value)) => {
                self.pending = Some(value);
                seed.deserialize(MapKey(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> serde_json::Result<V::Value> {
        let value = self
            .pending
            .take()
            .ok_or_else(|| serde_json::Error::custom("value requested before its key"))?;
        seed.deserialize(Folded(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// An object key. Integer-keyed maps parse the key text, as `serde_json` does.
struct MapKey(String);

macro_rules! parse_key {
    (<$lt:lifetime> $($method:ident => $visit:ident($ty:ty);)*) => {
        $(
            fn $method<V: Visitor<$lt>>(self, visitor: V) -> serde_json::Result<V::Value> {
                match self.0.parse::<$ty>() {
                    Ok(n) => visitor.$visit(n),
                    Err(_) => visitor.visit_string(self.0),
                }
            }
        )*
    };
}

impl<'de> Deserializer<'de> for MapKey {
    type Error = serde_json::Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> serde_json::Result<V::Value> {
        visitor.visit_string(self.0)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> serde_json::Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> serde_json::Result<V::Value> {
        Value::String(self.0).deserialize_enum(name, variants, visitor)
    }

    parse_key! { <'de>
        deserialize_i8 => visit_i8(i8);
        deserialize_i16 => visit_i16(i16);
        deserialize_i32 => visit_i32(i32);
        deserialize_i64 => visit_i64(i64);
        deserialize_u8 => visit_u8(u8);
        deserialize_u16 => visit_u16(u16);
        deserialize_u32 => visit_u32(u32);
        deserialize_u64 => visit_u64(u64);
    }

    forward_to_deserialize_any! {
        bool i128 u128 f32 f64 char str string bytes byte_buf option unit
        unit_struct seq tuple tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Inner {
        label: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Outer {
        name: String,
        inner: Inner,
        items: Vec<Inner>,
        maybe: Option<Inner>,
    }

    #[test]
    fn folds_keys_at_every_depth() {
        let value = json!({
            "NAME": "top",
            "Inner": {"LABEL": "a"},
            "items": [{"Label": "b"}, {"label": "c"}],
            "Maybe": {"lAbEl": "d"}
        });
        let outer: Outer = from_value(value).unwrap();
        assert_eq!(outer.name, "top");
        assert_eq!(outer.inner.label, "a");
        assert_eq!(outer.items[0].label, "b");
        assert_eq!(outer.items[1].label, "c");
        assert_eq!(outer.maybe.unwrap().label, "d");
    }

    #[test]
    fn exact_key_beats_case_variant() {
        let value = json!({"LABEL": "variant", "label": "exact"});
        let inner: Inner = from_value(value).unwrap();
        assert_eq!(inner.label, "exact");
    }

    #[test]
    fn map_keys_are_left_alone() {
        let value = json!({"One": 1, "one": 2});
        let m: BTreeMap<String, i32> = from_value(value).unwrap();
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn integer_map_keys_parse() {
        let value = json!({"1": "a", "20": "b"});
        let m: BTreeMap<u32, String> = from_value(value).unwrap();
        assert_eq!(m[&20], "b");
    }

    #[test]
    fn non_ascii_keys_fold() {
        let value = json!({"ÉTAT": "ok"});
        #[derive(Deserialize)]
        struct State {
            état: String,
        }
        let state: State = from_value(value).unwrap();
        assert_eq!(state.état, "ok");
    }
}
