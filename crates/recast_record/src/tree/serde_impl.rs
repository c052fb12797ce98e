use alloc::string::String;
use alloc::vec::Vec;
use core::{fmt, fmt::Formatter};

use serde_core::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::{Tree, TreeMap};

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for Tree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Tree::Null => serializer.serialize_unit(),
            Tree::Bool(value) => serializer.serialize_bool(*value),
            Tree::Int(value) => serializer.serialize_i64(*value),
            Tree::Float(value) => serializer.serialize_f64(*value),
            Tree::Str(value) => serializer.serialize_str(value),
            Tree::Seq(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Tree::Map(entries) => {
                let mut state = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Deserialize

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TreeVisitor)
    }
}

/// A [`Visitor`] accepting any self-describing data.
struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = Tree;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("any key-value tree")
    }

    #[inline]
    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Tree::Bool(v))
    }

    #[inline]
    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Tree::Int(v))
    }

    fn visit_u64<E: serde_core::de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(Tree::Int)
            .map_err(|_| E::custom(format_args!("integer `{v}` does not fit in i64")))
    }

    #[inline]
    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Tree::Float(v))
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Tree::Str(String::from(v)))
    }

    #[inline]
    fn visit_string<E>(self, v: String) -> Result<Self::Value, E> {
        Ok(Tree::Str(v))
    }

    #[inline]
    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Tree::Null)
    }

    #[inline]
    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Tree::deserialize(deserializer)
    }

    #[inline]
    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Tree::Null)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default().min(256));
        while let Some(item) = seq.next_element::<Tree>()? {
            items.push(item);
        }
        Ok(Tree::Seq(items))
    }

    fn visit_map<V>(self, mut map: V) -> Result<Self::Value, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut entries = TreeMap::with_capacity(map.size_hint().unwrap_or_default().min(256));
        while let Some((key, value)) = map.next_entry::<String, Tree>()? {
            if entries.insert(key, value).is_some() {
                return Err(serde_core::de::Error::custom("duplicate key in mapping"));
            }
        }
        Ok(Tree::Map(entries))
    }
}
