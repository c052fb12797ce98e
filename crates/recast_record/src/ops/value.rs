use alloc::string::String;
use alloc::vec::Vec;

use recast_utils::OrderedMap;

use crate::ops::{EnumValue, Record};
use crate::tree::Tree;

/// A dynamically typed field value.
///
/// Leaves are scalars and enum variants; branches are sequences, string-keyed
/// mappings and nested records.
///
/// # Examples
///
/// ```
/// use recast_record::ops::Value;
///
/// let value = Value::from(vec!["leon", "nathan"]);
/// assert_eq!(value.kind_name(), "list");
/// assert_eq!(value.as_list().map(<[Value]>::len), Some(2));
///
/// assert!(Value::from(None::<i64>).is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// The absent value.
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Enum(EnumValue),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// A string-keyed mapping, key order is kept but not significant.
    Map(OrderedMap<Value>),
    Record(Record),
}

impl Value {
    /// Returns a short name of the variant, used by error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Enum(_) => "enum",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Map(_) => "mapping",
            Self::Record(_) => "record",
        }
    }

    /// Copies a tree structurally: sequences become lists, `Null` becomes `None`.
    pub fn from_tree(tree: &Tree) -> Self {
        match tree {
            Tree::Null => Self::None,
            Tree::Bool(value) => Self::Bool(*value),
            Tree::Int(value) => Self::Int(*value),
            Tree::Float(value) => Self::Float(*value),
            Tree::Str(value) => Self::Str(value.clone()),
            Tree::Seq(items) => Self::List(items.iter().map(Self::from_tree).collect()),
            Tree::Map(entries) => Self::Map(
                entries
                    .iter()
                    .map(|(key, value)| (key, Self::from_tree(value)))
                    .collect(),
            ),
        }
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
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

    /// Returns the value as a float, widening integers.
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
    pub const fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the items of a list or a tuple.
    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&OrderedMap<Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($($ty:ty => $variant:ident $(as $cast:ty)?),* $(,)?) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::$variant(value $(as $cast)?)
            }
        }
    )*};
}

impl_from! {
    bool => Bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float,
    String => Str,
    EnumValue => Enum,
    Record => Record,
    OrderedMap<Value> => Map,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    #[inline]
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}
