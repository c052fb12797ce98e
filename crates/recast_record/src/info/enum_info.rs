use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::ops::EnumValue;

/// A container for enum type info: its name and variant names.
///
/// Enum values serialize to their variant name.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use recast_record::info::EnumInfo;
///
/// let color = Arc::new(EnumInfo::new("Color", ["Red", "Green"]));
///
/// assert_eq!(color.index_of("Green"), Some(1));
/// assert_eq!(color.value("Red").unwrap().variant(), "Red");
/// assert!(color.value("Blue").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct EnumInfo {
    name: Cow<'static, str>,
    variants: Box<[Cow<'static, str>]>,
}

impl EnumInfo {
    pub fn new<V>(name: impl Into<Cow<'static, str>>, variants: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Cow<'static, str>>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the variant names in declaration order.
    #[inline]
    pub fn variants(&self) -> impl ExactSizeIterator<Item = &str> {
        self.variants.iter().map(AsRef::as_ref)
    }

    #[inline]
    pub fn variant_at(&self, index: usize) -> Option<&str> {
        self.variants.get(index).map(AsRef::as_ref)
    }

    #[inline]
    pub fn index_of(&self, variant: &str) -> Option<usize> {
        self.variants.iter().position(|v| v == variant)
    }

    /// Returns the name of a variant known to exist.
    #[inline]
    pub(crate) fn variant_name(&self, index: usize) -> &str {
        &self.variants[index]
    }

    /// Returns the value of the variant named `variant`, if declared.
    pub fn value(self: &Arc<Self>, variant: &str) -> Option<EnumValue> {
        self.index_of(variant)
            .map(|index| EnumValue::from_parts(Arc::clone(self), index))
    }
}
