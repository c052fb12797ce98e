use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use recast_utils::hash::{FixedHashState, HashMap};

use crate::info::RecordInfo;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A subtype table: maps a type label to a concrete record type.
///
/// Attached to a field through [`FieldOptions::with_subtype_table`], or
/// supplied to a whole call through [`DeserializeDriver::with_registry`].
/// The field's own table takes precedence.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use recast_record::info::RecordInfo;
/// use recast_record::registry::TypeRegistry;
///
/// let a = Arc::new(RecordInfo::new("A", []));
/// let b = Arc::new(RecordInfo::new("B", []));
///
/// let registry = TypeRegistry::new().with(&a).with_as("bee", &b);
///
/// assert_eq!(registry.get("A").map(|info| info.name()), Some("A"));
/// assert_eq!(registry.get("bee").map(|info| info.name()), Some("B"));
/// assert!(!registry.contains("B"));
/// ```
///
/// [`FieldOptions::with_subtype_table`]: crate::info::FieldOptions::with_subtype_table
/// [`DeserializeDriver::with_registry`]: crate::serde::DeserializeDriver::with_registry
#[derive(Clone)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<RecordInfo>>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty [`TypeRegistry`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            types: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Registers a record type under its own name.
    ///
    /// - If the label already exists, the function does nothing and returns `false`.
    /// - Otherwise it inserts the type and returns `true`.
    #[inline]
    pub fn register(&mut self, info: &Arc<RecordInfo>) -> bool {
        self.register_as(info.name(), info)
    }

    /// Registers a record type under an explicit label.
    ///
    /// Same return convention as [`TypeRegistry::register`].
    pub fn register_as(&mut self, label: impl Into<String>, info: &Arc<RecordInfo>) -> bool {
        let label: String = label.into();
        if self.types.contains_key(label.as_str()) {
            log::warn!(
                "type label `{label}` is already registered, `{}` is ignored",
                info.name()
            );
            return false;
        }
        self.types.insert(label, Arc::clone(info));
        true
    }

    /// Builder form of [`TypeRegistry::register`].
    #[inline]
    pub fn with(mut self, info: &Arc<RecordInfo>) -> Self {
        self.register(info);
        self
    }

    /// Builder form of [`TypeRegistry::register_as`].
    #[inline]
    pub fn with_as(mut self, label: impl Into<String>, info: &Arc<RecordInfo>) -> Self {
        self.register_as(label, info);
        self
    }

    /// Returns the record type registered under `label`.
    #[inline]
    pub fn get(&self, label: &str) -> Option<&Arc<RecordInfo>> {
        self.types.get(label)
    }

    #[inline]
    pub fn contains(&self, label: &str) -> bool {
        self.types.contains_key(label)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns an iterator over the registered labels, in no particular order.
    #[inline]
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a Arc<RecordInfo>> for TypeRegistry {
    fn from_iter<T: IntoIterator<Item = &'a Arc<RecordInfo>>>(iter: T) -> Self {
        let mut registry = Self::new();
        for info in iter {
            registry.register(info);
        }
        registry
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.types.iter().map(|(label, info)| (label, info.name())))
            .finish()
    }
}
