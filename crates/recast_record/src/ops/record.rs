use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{FieldInfo, RecordInfo};
use crate::ops::{Arguments, Value};

// -----------------------------------------------------------------------------
// Record

/// An immutable record instance.
///
/// Holds one [`Value`] per field of its [`RecordInfo`], in declaration
/// order. Built by [`RecordInfo::construct`].
///
/// Two records are equal when their record names and field values match.
#[derive(Clone)]
pub struct Record {
    info: Arc<RecordInfo>,
    values: Box<[Value]>,
}

impl Record {
    #[inline]
    pub(crate) fn from_parts(info: Arc<RecordInfo>, values: Vec<Value>) -> Self {
        debug_assert_eq!(info.field_len(), values.len());
        Self {
            info,
            values: values.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn info(&self) -> &Arc<RecordInfo> {
        &self.info
    }

    /// Returns the record type name.
    #[inline]
    pub fn name(&self) -> &str {
        self.info.name()
    }

    /// Returns the value of the field named `name`, if declared.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.info.index_of(name).map(|index| &self.values[index])
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over `(field, value)` pairs in declaration order.
    #[inline]
    pub fn iter_fields(&self) -> RecordFieldIter<'_> {
        RecordFieldIter {
            fields: self.info.fields().iter().zip(self.values.iter()),
        }
    }

    /// Turns the instance back into its constructor arguments.
    pub fn into_arguments(self) -> Arguments {
        self.info
            .iter()
            .zip(self.values.into_vec())
            .map(|(field, value)| (field.name(), value))
            .collect()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.values == other.values
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct(self.name());
        for (field, value) in self.iter_fields() {
            debug.field(field.name(), value);
        }
        debug.finish()
    }
}

// -----------------------------------------------------------------------------
// Iterator

/// An iterator over the fields of a [`Record`] and their values.
pub struct RecordFieldIter<'a> {
    fields: core::iter::Zip<core::slice::Iter<'a, FieldInfo>, core::slice::Iter<'a, Value>>,
}

impl<'a> Iterator for RecordFieldIter<'a> {
    type Item = (&'a FieldInfo, &'a Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.fields.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.fields.size_hint()
    }
}

impl ExactSizeIterator for RecordFieldIter<'_> {}
