//! The plain key-value tree produced by the serializer.
//!
//! A [`Tree`] has primitive leaves and two kinds of branch: ordered
//! sequences and string-keyed mappings that keep insertion order.
//!
//! `Tree` implements `Serialize` and `Deserialize`, so it can be handed to
//! any serde format (JSON, RON, ...). This crate itself never encodes bytes.
//!
//! # Examples
//!
//! ```
//! use recast_record::tree::{Tree, TreeMap};
//!
//! let mut map = TreeMap::new();
//! map.insert("name", Tree::from("leon"));
//! map.insert("age", Tree::from(7));
//! let tree = Tree::Map(map);
//!
//! assert_eq!(tree.get("name").and_then(Tree::as_str), Some("leon"));
//! assert_eq!(
//!     serde_json::to_string(&tree).unwrap(),
//!     r#"{"name":"leon","age":7}"#,
//! );
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use recast_utils::OrderedMap;

mod serde_impl;

/// The mapping branch of a [`Tree`].
pub type TreeMap = OrderedMap<Tree>;

/// A node of a key-value tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Tree {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Tree>),
    Map(TreeMap),
}

impl Tree {
    /// Returns a short name of the variant, used by error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "mapping",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_seq(&self) -> Option<&[Tree]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&TreeMap> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up `key` if this node is a mapping.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.as_map().and_then(|map| map.get(key))
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Tree {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Tree {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Tree {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Tree {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Tree {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for Tree {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Tree>> for Tree {
    #[inline]
    fn from(value: Vec<Tree>) -> Self {
        Self::Seq(value)
    }
}

impl From<TreeMap> for Tree {
    #[inline]
    fn from(value: TreeMap) -> Self {
        Self::Map(value)
    }
}
