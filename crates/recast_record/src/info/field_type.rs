use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::info::{EnumInfo, RecordInfo};

/// The declared type of a field.
///
/// The serializer and deserializer dispatch on this closed set instead of
/// inspecting values ad hoc.
#[derive(Clone, Debug)]
pub enum FieldType {
    /// Booleans, numbers, strings and untyped nested data, copied as-is.
    Primitive,
    Record(Arc<RecordInfo>),
    Enum(Arc<EnumInfo>),
    /// An ordered sequence of the inner type.
    List(Box<FieldType>),
    /// A fixed tuple whose elements all share the inner type.
    Tuple(Box<FieldType>),
    /// A string-keyed mapping whose values have the inner type.
    Map(Box<FieldType>),
    /// One of several record types, recovered through a type tag.
    Union(Arc<[Arc<RecordInfo>]>),
}

impl FieldType {
    #[inline]
    pub fn record(info: &Arc<RecordInfo>) -> Self {
        Self::Record(Arc::clone(info))
    }

    #[inline]
    pub fn enumeration(info: &Arc<EnumInfo>) -> Self {
        Self::Enum(Arc::clone(info))
    }

    #[inline]
    pub fn list(inner: FieldType) -> Self {
        Self::List(Box::new(inner))
    }

    #[inline]
    pub fn tuple(inner: FieldType) -> Self {
        Self::Tuple(Box::new(inner))
    }

    #[inline]
    pub fn map(inner: FieldType) -> Self {
        Self::Map(Box::new(inner))
    }

    pub fn union<'a>(variants: impl IntoIterator<Item = &'a Arc<RecordInfo>>) -> Self {
        Self::Union(variants.into_iter().map(Arc::clone).collect())
    }

    /// Returns `true` for `Record` and `Union`, the types a field can be flattened from.
    #[inline]
    pub const fn is_record_like(&self) -> bool {
        matches!(self, Self::Record(_) | Self::Union(_))
    }

    /// Returns `true` for `List`, `Tuple` and `Map`.
    #[inline]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Tuple(_) | Self::Map(_))
    }

    /// Returns the element type of a collection, or `self` otherwise.
    #[inline]
    pub fn element(&self) -> &FieldType {
        match self {
            Self::List(inner) | Self::Tuple(inner) | Self::Map(inner) => inner.element(),
            other => other,
        }
    }

    #[inline]
    pub fn as_record(&self) -> Option<&Arc<RecordInfo>> {
        match self {
            Self::Record(info) => Some(info),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive => f.write_str("primitive"),
            Self::Record(info) => write!(f, "record `{}`", info.name()),
            Self::Enum(info) => write!(f, "enum `{}`", info.name()),
            Self::List(inner) => write!(f, "list of {inner}"),
            Self::Tuple(inner) => write!(f, "tuple of {inner}"),
            Self::Map(inner) => write!(f, "mapping of {inner}"),
            Self::Union(variants) => {
                f.write_str("union of ")?;
                for (index, info) in variants.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "`{}`", info.name())?;
                }
                Ok(())
            }
        }
    }
}
