use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;

use recast_utils::OrderedMap;

use super::BuildMode;

use crate::info::{FieldType, RecordInfo, ResolvedField};
use crate::ops::{Arguments, Value};
use crate::registry::{CollectionIndex, ScalarKey, TypeRegistry};
use crate::tree::{Tree, TreeMap};
use crate::{ConfigError, Error, ErrorKind, FieldPath};

/// Walks one tree against its record schema, tracking the path of the
/// current value.
pub(super) struct RecordVisitor<'a> {
    mode: BuildMode,
    registry: Option<&'a TypeRegistry>,
    index: Option<&'a CollectionIndex>,
    path: FieldPath,
}

impl<'a> RecordVisitor<'a> {
    #[inline]
    pub fn new(
        mode: BuildMode,
        registry: Option<&'a TypeRegistry>,
        index: Option<&'a CollectionIndex>,
        root: &str,
    ) -> Self {
        Self {
            mode,
            registry,
            index,
            path: FieldPath::new(root),
        }
    }

    #[inline]
    fn error(&self, kind: impl Into<ErrorKind>) -> Error {
        self.path.error(kind)
    }

    /// Collects the constructor arguments of `info` from one tree level.
    ///
    /// Fields resolving to `None` are dropped so that construction falls
    /// back to their default.
    pub fn record(&mut self, level: &TreeMap, info: &RecordInfo) -> Result<Arguments, Error> {
        let mut arguments = Arguments::with_capacity(info.field_len());
        for field_info in info.iter() {
            let field = ResolvedField::new(field_info);
            self.path.push_field(field.name());

            #[cfg(all(debug_assertions, feature = "debug"))]
            log::trace!("deserializing field `{}` from key `{}`", self.path, field.key());

            let value = self.field(field, level)?;
            if !value.is_none() {
                arguments.insert(field.name(), value);
            } else if !field_info.has_default() {
                return Err(self.error(ErrorKind::MissingKey {
                    key: field.key().to_string(),
                }));
            }
            self.path.pop();
        }
        Ok(arguments)
    }

    fn field(&mut self, field: ResolvedField<'_>, level: &TreeMap) -> Result<Value, Error> {
        field.validate().map_err(|error| self.error(error))?;

        let options = field.options();
        if options.add_type().is_set() && self.table(field).is_none() {
            return Err(self.error(ConfigError::AddTypeWithoutTable));
        }
        if matches!(field.ty().element(), FieldType::Union(_))
            && !options.add_type().is_set()
            && options.substitute_by_attribute().is_none()
        {
            return Err(self.error(ConfigError::UnionWithoutTypeTag));
        }

        // The nested keys were spliced into this level.
        if options.flatten() {
            // An absent record left no key behind.
            if field.field().has_default() && !spliced(field, level) {
                return Ok(Value::None);
            }
            return self.nested(field, level, field.ty());
        }

        match level.get(field.key()) {
            Some(raw) => self.element(field, raw, field.ty()),
            None => Ok(Value::None),
        }
    }

    /// The subtype table of `field`, else the registry of the call.
    #[inline]
    fn table<'f>(&self, field: ResolvedField<'f>) -> Option<&'f TypeRegistry>
    where
        'a: 'f,
    {
        field.options().subtype_table().or(self.registry)
    }

    fn element(
        &mut self,
        field: ResolvedField<'_>,
        raw: &Tree,
        ty: &FieldType,
    ) -> Result<Value, Error> {
        if raw.is_null() {
            return Ok(Value::None);
        }

        match ty {
            FieldType::List(inner) => self.sequence(field, raw, ty, inner).map(Value::List),
            FieldType::Tuple(inner) => self.sequence(field, raw, ty, inner).map(Value::Tuple),
            FieldType::Map(inner) => {
                let Some(entries) = raw.as_map() else {
                    return Err(self.error(ErrorKind::mismatch(ty, raw.kind_name())));
                };
                let mut output = OrderedMap::with_capacity(entries.len());
                for (key, item) in entries {
                    self.path.push_key(key);
                    output.insert(key, self.element(field, item, inner)?);
                    self.path.pop();
                }
                Ok(Value::Map(output))
            }
            FieldType::Enum(info) => {
                let Some(variant) = raw.as_str() else {
                    return Err(self.error(ErrorKind::mismatch(ty, raw.kind_name())));
                };
                match info.value(variant) {
                    Some(value) => Ok(Value::Enum(value)),
                    None => Err(self.error(ErrorKind::UnknownVariant {
                        enum_name: info.name().to_string(),
                        variant: variant.to_string(),
                    })),
                }
            }
            FieldType::Primitive
                if !field.options().add_type().is_set()
                    && field.options().substitute_by_attribute().is_none() =>
            {
                Ok(Value::from_tree(raw))
            }
            FieldType::Primitive | FieldType::Record(_) | FieldType::Union(_) => {
                self.record_like(field, raw, ty)
            }
        }
    }

    fn sequence(
        &mut self,
        field: ResolvedField<'_>,
        raw: &Tree,
        ty: &FieldType,
        inner: &FieldType,
    ) -> Result<Vec<Value>, Error> {
        let Some(items) = raw.as_seq() else {
            return Err(self.error(ErrorKind::mismatch(ty, raw.kind_name())));
        };
        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.path.push_index(index);
            output.push(self.element(field, item, inner)?);
            self.path.pop();
        }
        Ok(output)
    }

    fn record_like(
        &mut self,
        field: ResolvedField<'_>,
        raw: &Tree,
        ty: &FieldType,
    ) -> Result<Value, Error> {
        if let Some(attribute) = field.options().substitute_by_attribute() {
            return self.reference(field, attribute, raw);
        }
        match raw.as_map() {
            Some(level) => self.nested(field, level, ty),
            None => Err(self.error(ErrorKind::mismatch(ty, raw.kind_name()))),
        }
    }

    fn nested(
        &mut self,
        field: ResolvedField<'_>,
        level: &TreeMap,
        ty: &FieldType,
    ) -> Result<Value, Error> {
        let info = self.concrete_type(field, level, ty)?;
        let arguments = self.record(level, &info)?;
        match self.mode {
            BuildMode::Arguments => Ok(Value::Map(arguments.into_map())),
            BuildMode::Instance => info
                .construct(arguments)
                .map(Value::Record)
                .map_err(|error| self.error(error)),
        }
    }

    /// Picks the record type to build: the tagged one with `add_type`, the
    /// declared one otherwise.
    fn concrete_type(
        &self,
        field: ResolvedField<'_>,
        level: &TreeMap,
        ty: &FieldType,
    ) -> Result<Arc<RecordInfo>, Error> {
        if !field.options().add_type().is_set() {
            return match ty {
                FieldType::Record(info) => Ok(Arc::clone(info)),
                FieldType::Union(_) => Err(self.error(ConfigError::UnionWithoutTypeTag)),
                other => Err(self.error(ErrorKind::mismatch("record type", other))),
            };
        }

        let key = field.type_tag_key();
        let Some(tag) = level.get(key) else {
            return Err(self.error(ErrorKind::MissingKey {
                key: key.to_string(),
            }));
        };
        let Some(tag) = tag.as_str() else {
            return Err(self.error(ErrorKind::mismatch("string type tag", tag.kind_name())));
        };
        let Some(table) = self.table(field) else {
            return Err(self.error(ConfigError::AddTypeWithoutTable));
        };
        let Some(info) = table.get(tag) else {
            return Err(self.error(ErrorKind::UnknownType {
                tag: tag.to_string(),
            }));
        };

        if info.iter().any(|nested| {
            let nested = ResolvedField::new(nested);
            !nested.options().flatten() && nested.key() == key
        }) {
            return Err(self.error(ConfigError::TypeTagCollision {
                record: info.name().to_string(),
                key: key.to_string(),
            }));
        }

        if let FieldType::Union(variants) = ty
            && !variants.iter().any(|variant| variant.name() == info.name())
        {
            log::warn!(
                "type tag `{tag}` at `{}` resolves to `{}`, outside of the declared {ty}",
                self.path,
                info.name(),
            );
        }
        Ok(Arc::clone(info))
    }

    fn reference(
        &self,
        field: ResolvedField<'_>,
        attribute: &str,
        raw: &Tree,
    ) -> Result<Value, Error> {
        let Some(key) = ScalarKey::from_tree(raw) else {
            return Err(self.error(ErrorKind::KeyType {
                attribute: attribute.to_string(),
                found: raw.kind_name(),
            }));
        };

        if self.mode == BuildMode::Arguments {
            return Ok(key.to_value());
        }

        let bucket = field.collection_key();
        match self.index.and_then(|index| index.get(bucket, &key)) {
            Some(value) => Ok(value.clone()),
            None => Err(self.error(ErrorKind::ReferenceLookup {
                bucket: bucket.to_string(),
                key,
            })),
        }
    }
}

/// Returns `true` when `level` holds a key the flattened `field` splices in.
fn spliced(field: ResolvedField<'_>, level: &TreeMap) -> bool {
    if field.options().add_type().is_set() {
        return level.contains_key(field.type_tag_key());
    }
    match field.ty() {
        FieldType::Record(info) => carries_keys(info, level),
        FieldType::Union(variants) => variants.iter().any(|info| carries_keys(info, level)),
        _ => false,
    }
}

fn carries_keys(info: &RecordInfo, level: &TreeMap) -> bool {
    info.iter().any(|field_info| {
        let field = ResolvedField::new(field_info);
        if field.options().flatten() {
            spliced(field, level)
        } else {
            level.contains_key(field.key())
        }
    })
}
