//! Map deserialization that rejects repeated keys.
//!
//! JSON objects may repeat a key and serde's stock `BTreeMap` keeps the last
//! value. For permission tables that would let a later `"/path": []` silently
//! replace an earlier requirement, so every table map goes through here.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

/// A `BTreeMap` whose `Deserialize` fails on the first repeated key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UniqueMap<K, V>(pub(crate) BTreeMap<K, V>);

impl<'de, K, V> Deserialize<'de> for UniqueMap<K, V>
where
    K: Deserialize<'de> + Ord + fmt::Display,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(UniqueMapVisitor(PhantomData)).map(UniqueMap)
    }
}

struct UniqueMapVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for UniqueMapVisitor<K, V>
where
    K: Deserialize<'de> + Ord + fmt::Display,
    V: Deserialize<'de>,
{
    type Value = BTreeMap<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map without repeated keys")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = BTreeMap::new();
        while let Some(key) = access.next_key::<K>()? {
            if map.contains_key(&key) {
                return Err(de::Error::custom(format_args!("duplicate key '{key}'")));
            }
            let value = access.next_value()?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

/// For `#[serde(deserialize_with = "crate::unique_map::deserialize")]`.
pub(crate) fn deserialize<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord + fmt::Display,
    V: Deserialize<'de>,
{
    UniqueMap::deserialize(deserializer).map(|map| map.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_key_is_rejected() {
        let err = serde_json::from_str::<UniqueMap<String, u32>>(r#"{"a": 1, "b": 2, "a": 3}"#)
            .unwrap_err();
        assert!(err.to_string().contains("duplicate key 'a'"), "{err}");
    }

    #[test]
    fn distinct_keys_are_kept() {
        let map: UniqueMap<String, u32> = serde_json::from_str(r#"{"b": 2, "a": 1}"#).unwrap();
        assert_eq!(map.0.into_iter().collect::<Vec<_>>(), vec![("a".into(), 1), ("b".into(), 2)]);
    }
}
