use super::SerializeProcessor;
use super::record_serializer::RecordSerializer;

use crate::ops::{Record, Value};
use crate::tree::Tree;
use crate::{Error, ErrorKind, FieldPath};

// -----------------------------------------------------------------------------
// SerializeDriver

/// Serializer turning record instances into key-value trees.
///
/// # Serialization Rules
///
/// Fields are visited in declaration order and merged left to right into
/// one mapping per nesting level. For each field value:
///
/// 1. **Processor Priority**: the [`SerializeProcessor`], if any, is asked
///    first. If it handles the value, its result is used as-is.
/// 2. **Containers**: lists and tuples become sequences, mappings keep their
///    keys; every item is serialized with the options of the field.
/// 3. **Substitution**: with `substitute_by_attribute`, a record is replaced
///    by the scalar value of that attribute.
/// 4. **Records**: a nested record becomes a mapping; with `add_type`, the
///    type tag is its first entry.
/// 5. **Scalars** are copied, enums become their variant name, `None`
///    becomes `Null`.
///
/// The result is stored under the effective key of the field, or spliced
/// into the current level when the field is flattened. When two fields
/// write the same key, the last write wins and a warning is logged.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use recast_record::info::{FieldInfo, FieldOptions, FieldType, RecordInfo};
/// use recast_record::ops::Arguments;
/// use recast_record::serde::SerializeDriver;
///
/// let child = Arc::new(RecordInfo::new(
///     "Child",
///     [FieldInfo::new("name", FieldType::Primitive)
///         .with_options(FieldOptions::new().with_overwrite_key("no_name"))],
/// ));
/// let leon = child.construct(Arguments::new().with("name", "leon")).unwrap();
///
/// let tree = SerializeDriver::new().serialize_record(&leon).unwrap();
///
/// assert_eq!(serde_json::to_string(&tree).unwrap(), r#"{"no_name":"leon"}"#);
/// ```
#[derive(Clone, Copy)]
pub struct SerializeDriver<'a, P: SerializeProcessor = ()> {
    processor: Option<&'a P>,
}

impl Default for SerializeDriver<'_, ()> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SerializeDriver<'_, ()> {
    /// Creates a serializer with no processor.
    ///
    /// If you want to add custom logic for serializing certain values, use
    /// [`with_processor`](Self::with_processor).
    #[inline]
    pub const fn new() -> Self {
        Self { processor: None }
    }
}

impl<'a, P: SerializeProcessor> SerializeDriver<'a, P> {
    /// Creates a serializer with a processor.
    #[inline]
    pub const fn with_processor(processor: &'a P) -> Self {
        Self {
            processor: Some(processor),
        }
    }

    /// Serializes a value, which must be a record.
    ///
    /// Any other value fails with [`ErrorKind::TypeMismatch`].
    pub fn serialize(&self, value: &Value) -> Result<Tree, Error> {
        match value {
            Value::Record(record) => self.serialize_record(record),
            other => Err(FieldPath::default().error(ErrorKind::mismatch("record", other.kind_name()))),
        }
    }

    /// Serializes a record into a mapping tree.
    pub fn serialize_record(&self, record: &Record) -> Result<Tree, Error> {
        log::debug!("serializing record `{}`", record.name());

        let mut serializer = RecordSerializer::new(self.processor, record.name());
        serializer.record(record).map(Tree::Map)
    }
}
