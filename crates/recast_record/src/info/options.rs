use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::info::RecordInfo;
use crate::registry::TypeRegistry;

/// The type-tag key used when neither `type_label_key` nor an
/// [`AddType::Key`] is given and the field is not flattened.
pub const DEFAULT_TYPE_LABEL: &str = "typ";

// -----------------------------------------------------------------------------
// AddType

/// Whether a type-tag entry is injected next to a serialized record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AddType {
    #[default]
    No,
    /// Inject a tag under the computed default key.
    Yes,
    /// Inject a tag under the given key.
    Key(Cow<'static, str>),
}

impl AddType {
    #[inline]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::No)
    }
}

impl From<bool> for AddType {
    #[inline]
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

// -----------------------------------------------------------------------------
// TypeName

/// How the value of a type tag is rendered.
#[derive(Clone, Default)]
pub enum TypeName {
    /// The record's own name.
    #[default]
    Default,
    /// A fixed string, whatever the concrete record is.
    Fixed(Cow<'static, str>),
    /// A function of the concrete record.
    With(fn(&RecordInfo) -> String),
}

impl TypeName {
    /// Renders the tag value for a record of type `info`.
    pub fn render(&self, info: &RecordInfo) -> String {
        match self {
            Self::Default => String::from(info.name()),
            Self::Fixed(name) => String::from(&**name),
            Self::With(name_of) => name_of(info),
        }
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("TypeName::Default"),
            Self::Fixed(name) => write!(f, "TypeName::Fixed({name:?})"),
            Self::With(_) => f.write_str("TypeName::With(..)"),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldOptions

/// Declarative (de)serialization options attached to a field.
///
/// A field without options behaves like [`FieldOptions::new`]: it is stored
/// under its own name, never flattened, never tagged.
///
/// # Examples
///
/// ```
/// use recast_record::info::{AddType, FieldOptions};
///
/// let options = FieldOptions::new()
///     .with_overwrite_key("no_name")
///     .with_add_type(AddType::Key("kind".into()));
///
/// assert_eq!(options.overwrite_key(), Some("no_name"));
/// assert!(options.add_type().is_set());
/// assert!(!options.flatten());
/// ```
#[derive(Clone, Debug, Default)]
pub struct FieldOptions {
    substitute_by_attribute: Option<Cow<'static, str>>,
    collection_name: Option<Cow<'static, str>>,
    flatten: bool,
    add_type: AddType,
    type_label_key: Option<Cow<'static, str>>,
    type_name: TypeName,
    subtype_table: Option<Arc<TypeRegistry>>,
    overwrite_key: Option<Cow<'static, str>>,
}

impl FieldOptions {
    /// A static reference to the all-defaults options.
    ///
    /// Returned for fields that carry no options.
    pub(crate) const DEFAULT: &'static Self = &Self::new();

    /// Creates the all-defaults options.
    #[inline]
    pub const fn new() -> Self {
        Self {
            substitute_by_attribute: None,
            collection_name: None,
            flatten: false,
            add_type: AddType::No,
            type_label_key: None,
            type_name: TypeName::Default,
            subtype_table: None,
            overwrite_key: None,
        }
    }

    /// Replaces the nested record by the value of one of its attributes.
    #[inline]
    pub fn with_substitute_by_attribute(self, attribute: impl Into<Cow<'static, str>>) -> Self {
        Self {
            substitute_by_attribute: Some(attribute.into()),
            ..self
        }
    }

    /// Names the collection bucket used to resolve substituted references.
    #[inline]
    pub fn with_collection_name(self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            collection_name: Some(name.into()),
            ..self
        }
    }

    /// Splices the nested record's keys into the parent level.
    #[inline]
    pub fn with_flatten(self, flatten: bool) -> Self {
        Self { flatten, ..self }
    }

    #[inline]
    pub fn with_add_type(self, add_type: impl Into<AddType>) -> Self {
        Self {
            add_type: add_type.into(),
            ..self
        }
    }

    /// Sets the type-tag key, superseding every computed default.
    #[inline]
    pub fn with_type_label_key(self, key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_label_key: Some(key.into()),
            ..self
        }
    }

    #[inline]
    pub fn with_type_name(self, type_name: TypeName) -> Self {
        Self { type_name, ..self }
    }

    /// Sets the table used to turn a type tag back into a record type.
    #[inline]
    pub fn with_subtype_table(self, table: Arc<TypeRegistry>) -> Self {
        Self {
            subtype_table: Some(table),
            ..self
        }
    }

    /// Stores the field under `key` instead of its own name.
    #[inline]
    pub fn with_overwrite_key(self, key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            overwrite_key: Some(key.into()),
            ..self
        }
    }

    #[inline]
    pub fn substitute_by_attribute(&self) -> Option<&str> {
        self.substitute_by_attribute.as_deref()
    }

    #[inline]
    pub fn collection_name(&self) -> Option<&str> {
        self.collection_name.as_deref()
    }

    #[inline]
    pub const fn flatten(&self) -> bool {
        self.flatten
    }

    #[inline]
    pub const fn add_type(&self) -> &AddType {
        &self.add_type
    }

    #[inline]
    pub fn type_label_key(&self) -> Option<&str> {
        self.type_label_key.as_deref()
    }

    #[inline]
    pub const fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    #[inline]
    pub fn subtype_table(&self) -> Option<&TypeRegistry> {
        self.subtype_table.as_deref()
    }

    #[inline]
    pub fn overwrite_key(&self) -> Option<&str> {
        self.overwrite_key.as_deref()
    }
}
