use crate::ConfigError;
use crate::info::{AddType, DEFAULT_TYPE_LABEL, FieldInfo, FieldOptions, FieldType};

/// A field paired with its effective [`FieldOptions`].
///
/// All derived keys are computed on demand, nothing is cached.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use recast_record::info::{FieldInfo, FieldOptions, FieldType, RecordInfo, ResolvedField};
///
/// let child = Arc::new(RecordInfo::new("Child", []));
/// let field = FieldInfo::new("child", FieldType::record(&child))
///     .with_options(FieldOptions::new().with_flatten(true).with_add_type(true));
///
/// let resolved = ResolvedField::new(&field);
/// assert_eq!(resolved.key(), "child");
/// // Once flattened, the effective key doubles as the type-tag key.
/// assert_eq!(resolved.type_tag_key(), "child");
/// assert_eq!(resolved.collection_key(), "child");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ResolvedField<'a> {
    field: &'a FieldInfo,
    options: &'a FieldOptions,
}

impl<'a> ResolvedField<'a> {
    #[inline]
    pub fn new(field: &'a FieldInfo) -> Self {
        Self {
            field,
            options: field.options(),
        }
    }

    #[inline]
    pub fn field(&self) -> &'a FieldInfo {
        self.field
    }

    #[inline]
    pub fn name(&self) -> &'a str {
        self.field.name()
    }

    #[inline]
    pub fn ty(&self) -> &'a FieldType {
        self.field.ty()
    }

    #[inline]
    pub fn options(&self) -> &'a FieldOptions {
        self.options
    }

    /// The key this field is stored under: `overwrite_key`, else the field name.
    #[inline]
    pub fn key(&self) -> &'a str {
        self.options.overwrite_key().unwrap_or(self.field.name())
    }

    /// The key of the injected type tag.
    ///
    /// `type_label_key` wins, then the key of [`AddType::Key`]. Otherwise a
    /// flattened field uses its effective key and any other field uses
    /// [`DEFAULT_TYPE_LABEL`].
    pub fn type_tag_key(&self) -> &'a str {
        if let Some(key) = self.options.type_label_key() {
            return key;
        }
        if let AddType::Key(key) = self.options.add_type() {
            return key;
        }
        if self.options.flatten() {
            self.key()
        } else {
            DEFAULT_TYPE_LABEL
        }
    }

    /// The bucket of the collection index: `collection_name`, else the field name.
    #[inline]
    pub fn collection_key(&self) -> &'a str {
        self.options.collection_name().unwrap_or(self.field.name())
    }

    /// Checks the option combinations that are invalid whatever the data.
    ///
    /// The checks needing a runtime value or a subtype table happen in the drivers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let options = self.options;
        let substitute = options.substitute_by_attribute().is_some();

        if substitute && options.flatten() {
            return Err(ConfigError::FlattenWithSubstitute);
        }
        if substitute && options.add_type().is_set() {
            return Err(ConfigError::SubstituteWithAddType);
        }
        if options.flatten() {
            let ty = self.ty();
            if ty.is_collection() {
                return Err(ConfigError::FlattenCollection);
            }
            if !ty.is_record_like() {
                use alloc::string::ToString;
                return Err(ConfigError::FlattenNonRecord(ty.to_string()));
            }
        }
        Ok(())
    }
}
