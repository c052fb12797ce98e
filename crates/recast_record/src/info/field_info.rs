use alloc::borrow::Cow;
use alloc::sync::Arc;

use crate::info::{FieldOptions, FieldType};
use crate::ops::Value;

/// Information for a named record field.
///
/// # Examples
///
/// ```
/// use recast_record::info::{FieldInfo, FieldOptions, FieldType};
///
/// let field = FieldInfo::new("name", FieldType::Primitive)
///     .with_options(FieldOptions::new().with_overwrite_key("no_name"));
///
/// assert_eq!(field.name(), "name");
/// assert_eq!(field.options().overwrite_key(), Some("no_name"));
/// assert!(!field.has_default());
/// ```
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: Cow<'static, str>,
    ty: FieldType,
    default: Option<Value>,
    // Use `Option` to avoid a heap allocation for the common no-options case.
    options: Option<Arc<FieldOptions>>,
}

impl FieldInfo {
    /// Creates a new [`FieldInfo`] for the given field `name` and declared type.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            options: None,
        }
    }

    /// Sets the value used when construction receives no argument for this field.
    #[inline]
    pub fn with_default(self, value: impl Into<Value>) -> Self {
        Self {
            default: Some(value.into()),
            ..self
        }
    }

    /// Attaches options (overwrite, do not merge).
    #[inline]
    pub fn with_options(self, options: FieldOptions) -> Self {
        Self {
            options: Some(Arc::new(options)),
            ..self
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn ty(&self) -> &FieldType {
        &self.ty
    }

    #[inline]
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Returns the effective options: the attached ones, or the all-defaults value.
    #[inline]
    pub fn options(&self) -> &FieldOptions {
        match &self.options {
            Some(options) => options,
            None => FieldOptions::DEFAULT,
        }
    }
}
