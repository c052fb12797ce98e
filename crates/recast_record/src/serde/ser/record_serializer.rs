use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::SerializeProcessor;

use crate::info::ResolvedField;
use crate::ops::{Record, Value};
use crate::registry::ScalarKey;
use crate::tree::{Tree, TreeMap};
use crate::{ConfigError, Error, ErrorKind, FieldPath};

/// Walks one record graph, tracking the path of the current value.
pub(super) struct RecordSerializer<'a, P: SerializeProcessor> {
    processor: Option<&'a P>,
    path: FieldPath,
}

impl<'a, P: SerializeProcessor> RecordSerializer<'a, P> {
    #[inline]
    pub fn new(processor: Option<&'a P>, root: &str) -> Self {
        Self {
            processor,
            path: FieldPath::new(root),
        }
    }

    #[inline]
    fn error(&self, kind: impl Into<ErrorKind>) -> Error {
        self.path.error(kind)
    }

    /// Serializes every field of `record` into one mapping.
    pub fn record(&mut self, record: &Record) -> Result<TreeMap, Error> {
        let mut output = TreeMap::with_capacity(record.field_len());
        for (info, value) in record.iter_fields() {
            let field = ResolvedField::new(info);
            self.path.push_field(field.name());

            #[cfg(all(debug_assertions, feature = "debug"))]
            log::trace!("serializing field `{}` ({})", self.path, value.kind_name());

            self.field(field, value, &mut output)?;
            self.path.pop();
        }
        Ok(output)
    }

    fn field(
        &mut self,
        field: ResolvedField<'_>,
        value: &Value,
        output: &mut TreeMap,
    ) -> Result<(), Error> {
        field.validate().map_err(|error| self.error(error))?;

        let flatten = field.options().flatten();
        if flatten && matches!(value, Value::List(_) | Value::Tuple(_) | Value::Map(_)) {
            return Err(self.error(ConfigError::FlattenCollection));
        }

        let element = self.element(field, value)?;
        if !flatten {
            self.merge(output, String::from(field.key()), element);
            return Ok(());
        }

        match element {
            Tree::Map(entries) => {
                for (key, value) in entries {
                    self.merge(output, key, value);
                }
                Ok(())
            }
            // An absent record splices nothing.
            Tree::Null => Ok(()),
            other => Err(self.error(ConfigError::FlattenNonRecord(
                other.kind_name().to_string(),
            ))),
        }
    }

    /// Inserts an entry, the last write wins on a key collision.
    fn merge(&self, output: &mut TreeMap, key: String, value: Tree) {
        if output.contains_key(&key) {
            log::warn!(
                "key `{key}` is written twice at `{}`, the last value wins",
                self.path
            );
        }
        output.insert(key, value);
    }

    fn element(&mut self, field: ResolvedField<'_>, value: &Value) -> Result<Tree, Error> {
        if let Some(processor) = self.processor
            && let Some(result) = processor.try_serialize(value, field)
        {
            return result.map_err(|kind| self.error(kind));
        }

        let options = field.options();
        match value {
            Value::None => Ok(Tree::Null),
            Value::List(items) | Value::Tuple(items) => {
                let mut output = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    self.path.push_index(index);
                    output.push(self.element(field, item)?);
                    self.path.pop();
                }
                Ok(Tree::Seq(output))
            }
            Value::Map(entries) => {
                let mut output = TreeMap::with_capacity(entries.len());
                for (key, item) in entries {
                    self.path.push_key(key);
                    output.insert(key, self.element(field, item)?);
                    self.path.pop();
                }
                Ok(Tree::Map(output))
            }
            Value::Record(record) => self.nested(field, record),
            scalar => {
                if options.substitute_by_attribute().is_some() {
                    return Err(self.error(ConfigError::SubstituteNonRecord(scalar.kind_name())));
                }
                if options.add_type().is_set() {
                    return Err(self.error(ConfigError::TypeTagOnNonRecord(scalar.kind_name())));
                }
                Ok(scalar_tree(scalar))
            }
        }
    }

    fn nested(&mut self, field: ResolvedField<'_>, record: &Record) -> Result<Tree, Error> {
        let options = field.options();

        if let Some(attribute) = options.substitute_by_attribute() {
            let Some(value) = record.field(attribute) else {
                return Err(self.error(ConfigError::MissingAttribute {
                    record: record.name().to_string(),
                    attribute: attribute.to_string(),
                }));
            };
            return match ScalarKey::from_value(value) {
                Some(key) => Ok(key.to_tree()),
                None => Err(self.error(ErrorKind::KeyType {
                    attribute: attribute.to_string(),
                    found: value.kind_name(),
                })),
            };
        }

        let inner = self.record(record)?;
        if !options.add_type().is_set() {
            return Ok(Tree::Map(inner));
        }

        let tag_key = field.type_tag_key();
        if inner.contains_key(tag_key) {
            return Err(self.error(ConfigError::TypeTagCollision {
                record: record.name().to_string(),
                key: tag_key.to_string(),
            }));
        }

        let mut tagged = TreeMap::with_capacity(inner.len() + 1);
        tagged.insert(tag_key, Tree::Str(options.type_name().render(record.info())));
        tagged.extend(inner);
        Ok(Tree::Map(tagged))
    }
}

/// Copies a leaf value; enums become their variant name.
fn scalar_tree(value: &Value) -> Tree {
    match value {
        Value::Bool(value) => Tree::Bool(*value),
        Value::Int(value) => Tree::Int(*value),
        Value::Float(value) => Tree::Float(*value),
        Value::Str(value) => Tree::Str(value.clone()),
        Value::Enum(value) => Tree::Str(String::from(value.variant())),
        Value::None | Value::List(_) | Value::Tuple(_) | Value::Map(_) | Value::Record(_) => {
            Tree::Null
        }
    }
}
