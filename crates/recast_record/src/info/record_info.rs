use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use recast_utils::hash::HashMap;

use crate::ConstructError;
use crate::info::FieldInfo;
use crate::ops::{Arguments, Record};

/// A construction hook that replaces the default construction step.
///
/// It receives the collected arguments and may validate or complete them
/// before building the record, typically through [`RecordInfo::construct_default`].
pub type Constructor = fn(&Arc<RecordInfo>, Arguments) -> Result<Record, ConstructError>;

/// A container for record type info: a name and an ordered sequence of fields.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use recast_record::info::{FieldInfo, FieldType, RecordInfo};
/// use recast_record::ops::Arguments;
///
/// let child = Arc::new(RecordInfo::new(
///     "Child",
///     [
///         FieldInfo::new("age", FieldType::Primitive).with_default(0),
///         FieldInfo::new("name", FieldType::Primitive),
///     ],
/// ));
///
/// assert_eq!(child.field_len(), 2);
/// assert_eq!(child.index_of("name"), Some(1));
///
/// let leon = child.construct(Arguments::new().with("name", "leon")).unwrap();
/// assert_eq!(leon.field("age").and_then(|v| v.as_i64()), Some(0));
/// ```
pub struct RecordInfo {
    name: Cow<'static, str>,
    fields: Box<[FieldInfo]>,
    field_indices: HashMap<String, usize>,
    constructor: Option<Constructor>,
}

impl RecordInfo {
    /// Creates a new [`RecordInfo`].
    ///
    /// The order of fields is fixed, depends on the input order.
    ///
    /// # Panics
    ///
    /// Panics if two fields share a name.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        fields: impl IntoIterator<Item = FieldInfo>,
    ) -> Self {
        let name = name.into();
        let fields: Box<[FieldInfo]> = fields.into_iter().collect();
        let mut field_indices = HashMap::with_capacity_and_hasher(fields.len(), Default::default());
        for (index, field) in fields.iter().enumerate() {
            let previous = field_indices.insert(field.name().to_string(), index);
            assert!(
                previous.is_none(),
                "duplicate field `{}` in record `{name}`",
                field.name(),
            );
        }

        Self {
            name,
            fields,
            field_indices,
            constructor: None,
        }
    }

    /// Sets a custom construction hook.
    #[inline]
    pub fn with_constructor(self, constructor: Constructor) -> Self {
        Self {
            constructor: Some(constructor),
            ..self
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the [`FieldInfo`] for the given `name`, if present.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.field_indices
            .get(name)
            .map(|&index| &self.fields[index])
    }

    /// Returns the [`FieldInfo`] at the given index, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    /// Returns the index for the given field `name`, if present.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    /// Returns an iterator over the fields in **declaration order**.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FieldInfo> {
        self.fields.iter()
    }

    #[inline]
    pub(crate) fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Builds an instance from `arguments`.
    ///
    /// Runs the custom constructor when one is set, the default construction
    /// otherwise.
    pub fn construct(self: &Arc<Self>, arguments: Arguments) -> Result<Record, ConstructError> {
        match self.constructor {
            Some(constructor) => constructor(self, arguments),
            None => self.construct_default(arguments),
        }
    }

    /// The default construction step.
    ///
    /// Missing arguments take the field default; a missing argument without
    /// default and an argument naming no field are both errors.
    pub fn construct_default(
        self: &Arc<Self>,
        mut arguments: Arguments,
    ) -> Result<Record, ConstructError> {
        let mut values = Vec::with_capacity(self.field_len());
        for field in self.iter() {
            match arguments.remove(field.name()) {
                Some(value) => values.push(value),
                None => match field.default() {
                    Some(value) => values.push(value.clone()),
                    None => {
                        return Err(ConstructError::MissingArgument {
                            record: self.name().to_string(),
                            argument: field.name().to_string(),
                        });
                    }
                },
            }
        }

        if let Some((argument, _)) = arguments.into_iter().next() {
            return Err(ConstructError::UnknownArgument {
                record: self.name().to_string(),
                argument,
            });
        }

        Ok(Record::from_parts(Arc::clone(self), values))
    }
}

impl fmt::Debug for RecordInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordInfo")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}
