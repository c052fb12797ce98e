use alloc::string::{String, ToString};
use core::fmt;

use recast_utils::hash::{FixedHashState, HashMap};

use crate::ops::{Record, Value};
use crate::registry::ScalarKey;
use crate::{ConfigError, Error, ErrorKind, FieldPath};

/// Resolves substituted references back into full instances.
///
/// Organized in named buckets, each mapping a [`ScalarKey`] to an instance.
/// A field with `substitute_by_attribute` looks in the bucket named by its
/// `collection_name`, or by its own name.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use recast_record::info::{FieldInfo, FieldType, RecordInfo};
/// use recast_record::ops::Arguments;
/// use recast_record::registry::{CollectionIndex, ScalarKey};
///
/// let child = Arc::new(RecordInfo::new("Child", [FieldInfo::new("name", FieldType::Primitive)]));
/// let leon = child.construct(Arguments::new().with("name", "leon")).unwrap();
///
/// let mut index = CollectionIndex::new();
/// index.insert_by_attribute("childs", "name", [leon]).unwrap();
///
/// assert!(index.get("childs", &ScalarKey::from("leon")).is_some());
/// assert!(index.get("childs", &ScalarKey::from("nathan")).is_none());
/// ```
#[derive(Clone, Default)]
pub struct CollectionIndex {
    buckets: HashMap<String, HashMap<ScalarKey, Value>>,
}

impl CollectionIndex {
    #[inline]
    pub const fn new() -> Self {
        Self {
            buckets: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Adds an instance to `bucket`, returning the one it replaces.
    pub fn insert(
        &mut self,
        bucket: &str,
        key: impl Into<ScalarKey>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.buckets
            .entry_ref(bucket)
            .or_default()
            .insert(key.into(), value.into())
    }

    /// Adds every record to `bucket`, keyed by its `attribute` value.
    ///
    /// Fails when a record lacks the attribute or when its value is not a
    /// permitted key scalar. Records before the failing one stay inserted.
    pub fn insert_by_attribute(
        &mut self,
        bucket: &str,
        attribute: &str,
        records: impl IntoIterator<Item = Record>,
    ) -> Result<(), Error> {
        for (position, record) in records.into_iter().enumerate() {
            let key = match record.field(attribute) {
                Some(value) => ScalarKey::from_value(value).ok_or_else(|| ErrorKind::KeyType {
                    attribute: attribute.to_string(),
                    found: value.kind_name(),
                }),
                None => Err(ErrorKind::from(ConfigError::MissingAttribute {
                    record: record.name().to_string(),
                    attribute: attribute.to_string(),
                })),
            };
            let key = key.map_err(|kind| {
                let mut path = FieldPath::new(bucket);
                path.push_index(position);
                path.error(kind)
            })?;
            self.insert(bucket, key, record);
        }
        Ok(())
    }

    /// Returns the instance registered under `key` in `bucket`.
    #[inline]
    pub fn get(&self, bucket: &str, key: &ScalarKey) -> Option<&Value> {
        self.buckets.get(bucket)?.get(key)
    }

    #[inline]
    pub fn contains_bucket(&self, bucket: &str) -> bool {
        self.buckets.contains_key(bucket)
    }

    /// Returns the number of instances in `bucket`.
    #[inline]
    pub fn bucket_len(&self, bucket: &str) -> usize {
        self.buckets.get(bucket).map_or(0, HashMap::len)
    }
}

impl fmt::Debug for CollectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().map(|(name, entries)| (name, entries.len())))
            .finish()
    }
}
