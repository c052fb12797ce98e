use alloc::sync::Arc;
use core::fmt;

use crate::info::EnumInfo;

/// A variant of an enum type.
///
/// Obtained from [`EnumInfo::value`]; always names a declared variant.
///
/// Two values are equal when both the enum names and the variant names match.
#[derive(Clone)]
pub struct EnumValue {
    info: Arc<EnumInfo>,
    index: usize,
}

impl EnumValue {
    #[inline]
    pub(crate) fn from_parts(info: Arc<EnumInfo>, index: usize) -> Self {
        debug_assert!(index < info.variants().len());
        Self { info, index }
    }

    #[inline]
    pub fn info(&self) -> &Arc<EnumInfo> {
        &self.info
    }

    /// Returns the name of the enum type.
    #[inline]
    pub fn enum_name(&self) -> &str {
        self.info.name()
    }

    /// Returns the variant name, the serialized form of this value.
    #[inline]
    pub fn variant(&self) -> &str {
        self.info.variant_name(self.index)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.enum_name() == other.enum_name() && self.variant() == other.variant()
    }
}

impl Eq for EnumValue {}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.enum_name(), self.variant())
    }
}
