use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::ops::Value;
use crate::tree::Tree;

/// A substitution key: the scalar a record is replaced by.
///
/// Floats hash and compare by bit pattern, so `NaN` keys are usable and
/// `0.0` differs from `-0.0`.
#[derive(Clone, Debug)]
pub enum ScalarKey {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ScalarKey {
    /// Converts a tree leaf, `None` for null and for branches.
    pub fn from_tree(tree: &Tree) -> Option<Self> {
        match tree {
            Tree::Str(value) => Some(Self::Str(value.clone())),
            Tree::Int(value) => Some(Self::Int(*value)),
            Tree::Float(value) => Some(Self::Float(*value)),
            Tree::Bool(value) => Some(Self::Bool(*value)),
            Tree::Null | Tree::Seq(_) | Tree::Map(_) => None,
        }
    }

    /// Converts a scalar value; an enum becomes the name of its variant.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(value) => Some(Self::Str(value.clone())),
            Value::Int(value) => Some(Self::Int(*value)),
            Value::Float(value) => Some(Self::Float(*value)),
            Value::Bool(value) => Some(Self::Bool(*value)),
            Value::Enum(value) => Some(Self::Str(String::from(value.variant()))),
            _ => None,
        }
    }

    /// Returns the tree leaf this key serializes to.
    pub fn to_tree(&self) -> Tree {
        match self {
            Self::Str(value) => Tree::Str(value.clone()),
            Self::Int(value) => Tree::Int(*value),
            Self::Float(value) => Tree::Float(*value),
            Self::Bool(value) => Tree::Bool(*value),
        }
    }

    /// Returns the value this key stands for in an argument mapping.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Str(value) => Value::Str(value.clone()),
            Self::Int(value) => Value::Int(*value),
            Self::Float(value) => Value::Float(*value),
            Self::Bool(value) => Value::Bool(*value),
        }
    }
}

impl PartialEq for ScalarKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ScalarKey {}

impl Hash for ScalarKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Str(value) => value.hash(state),
            Self::Int(value) => value.hash(state),
            Self::Float(value) => value.to_bits().hash(state),
            Self::Bool(value) => value.hash(state),
        }
    }
}

impl fmt::Display for ScalarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Int(value) => fmt::Display::fmt(value, f),
            Self::Float(value) => fmt::Display::fmt(value, f),
            Self::Bool(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl From<&str> for ScalarKey {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for ScalarKey {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ScalarKey {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ScalarKey {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ScalarKey {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
