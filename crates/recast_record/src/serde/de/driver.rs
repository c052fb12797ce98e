use alloc::sync::Arc;

use super::record_visitor::RecordVisitor;

use crate::info::{FieldType, RecordInfo};
use crate::ops::{Arguments, Record};
use crate::registry::{CollectionIndex, TypeRegistry};
use crate::tree::Tree;
use crate::{Error, ErrorKind, FieldPath};

// -----------------------------------------------------------------------------
// BuildMode

/// What the deserializer returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildMode {
    /// Collect constructor arguments without constructing.
    ///
    /// Nested records stay argument mappings ([`Value::Map`]) and
    /// substituted references stay raw keys.
    ///
    /// [`Value::Map`]: crate::ops::Value::Map
    #[default]
    Arguments,
    /// Construct the target record, nested records and resolve references
    /// through the [`CollectionIndex`].
    Instance,
}

/// The result of [`DeserializeDriver::deserialize`], selected by [`BuildMode`].
#[derive(Clone, Debug, PartialEq)]
pub enum Deserialized {
    Arguments(Arguments),
    Instance(Record),
}

impl Deserialized {
    #[inline]
    pub fn into_arguments(self) -> Option<Arguments> {
        match self {
            Self::Arguments(arguments) => Some(arguments),
            Self::Instance(_) => None,
        }
    }

    #[inline]
    pub fn into_instance(self) -> Option<Record> {
        match self {
            Self::Instance(record) => Some(record),
            Self::Arguments(_) => None,
        }
    }
}

// -----------------------------------------------------------------------------
// DeserializeDriver

/// Deserializer rebuilding records from key-value trees.
///
/// The tree carries no type information of its own, so the target
/// [`RecordInfo`] must be given. Every field is read back by its effective
/// key, or from the current level when flattened:
///
/// - sequence and mapping fields are rebuilt item by item with their inner type;
/// - enums are looked up by variant name;
/// - with `add_type`, the concrete record is found by looking up the type
///   tag in the field's subtype table, else in the registry of the driver;
/// - with `substitute_by_attribute`, the raw key is resolved through the
///   [`CollectionIndex`] in [`BuildMode::Instance`], and kept as-is in
///   [`BuildMode::Arguments`].
///
/// A field whose value is absent or null is left to its default. Without a
/// default, it fails with [`ErrorKind::MissingKey`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use recast_record::info::{FieldInfo, FieldType, RecordInfo};
/// use recast_record::serde::{BuildMode, DeserializeDriver};
/// use recast_record::tree::Tree;
///
/// let child = Arc::new(RecordInfo::new(
///     "Child",
///     [
///         FieldInfo::new("name", FieldType::Primitive),
///         FieldInfo::new("age", FieldType::Primitive).with_default(0),
///     ],
/// ));
/// let tree: Tree = serde_json::from_str(r#"{"name": "leon"}"#).unwrap();
///
/// let arguments = DeserializeDriver::new()
///     .deserialize(&tree, &child)
///     .unwrap()
///     .into_arguments()
///     .unwrap();
/// assert_eq!(arguments.len(), 1);
///
/// let leon = DeserializeDriver::new()
///     .with_mode(BuildMode::Instance)
///     .deserialize(&tree, &child)
///     .unwrap()
///     .into_instance()
///     .unwrap();
/// assert_eq!(leon.field("age").and_then(|v| v.as_i64()), Some(0));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DeserializeDriver<'a> {
    mode: BuildMode,
    registry: Option<&'a TypeRegistry>,
    index: Option<&'a CollectionIndex>,
}

impl<'a> DeserializeDriver<'a> {
    /// Creates a deserializer in [`BuildMode::Arguments`], without registry
    /// nor collection index.
    #[inline]
    pub const fn new() -> Self {
        Self {
            mode: BuildMode::Arguments,
            registry: None,
            index: None,
        }
    }

    #[inline]
    pub const fn with_mode(self, mode: BuildMode) -> Self {
        Self { mode, ..self }
    }

    /// Sets the subtype table used by fields that carry none.
    #[inline]
    pub const fn with_registry(self, registry: &'a TypeRegistry) -> Self {
        Self {
            registry: Some(registry),
            ..self
        }
    }

    /// Sets the index resolving substituted references.
    #[inline]
    pub const fn with_index(self, index: &'a CollectionIndex) -> Self {
        Self {
            index: Some(index),
            ..self
        }
    }

    #[inline]
    pub const fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Deserializes `tree` as a record of type `info`.
    pub fn deserialize(&self, tree: &Tree, info: &Arc<RecordInfo>) -> Result<Deserialized, Error> {
        log::debug!("deserializing record `{}` ({:?})", info.name(), self.mode);

        let arguments = self.arguments(tree, info)?;
        match self.mode {
            BuildMode::Arguments => Ok(Deserialized::Arguments(arguments)),
            BuildMode::Instance => Self::construct(info, arguments).map(Deserialized::Instance),
        }
    }

    /// Deserializes `tree` as a value of the declared type `ty`.
    ///
    /// Fails with [`ErrorKind::TypeMismatch`] unless `ty` is a record type.
    pub fn deserialize_as(&self, tree: &Tree, ty: &FieldType) -> Result<Deserialized, Error> {
        match ty {
            FieldType::Record(info) => self.deserialize(tree, info),
            other => Err(FieldPath::default().error(ErrorKind::mismatch("record type", other))),
        }
    }

    /// Deserializes `tree` into an instance, whatever the configured mode.
    pub fn deserialize_record(&self, tree: &Tree, info: &Arc<RecordInfo>) -> Result<Record, Error> {
        log::debug!("deserializing record `{}` (Instance)", info.name());

        let driver = self.with_mode(BuildMode::Instance);
        let arguments = driver.arguments(tree, info)?;
        Self::construct(info, arguments)
    }

    fn arguments(&self, tree: &Tree, info: &Arc<RecordInfo>) -> Result<Arguments, Error> {
        let Some(level) = tree.as_map() else {
            return Err(FieldPath::new(info.name())
                .error(ErrorKind::mismatch("mapping", tree.kind_name())));
        };
        RecordVisitor::new(self.mode, self.registry, self.index, info.name()).record(level, info)
    }

    fn construct(info: &Arc<RecordInfo>, arguments: Arguments) -> Result<Record, Error> {
        info.construct(arguments)
            .map_err(|error| FieldPath::new(info.name()).error(error))
    }
}
