//! Convert record instances into key-value trees and back.
//!
//! # Overview
//!
//! ## Serialization
//!
//! - [`SerializeDriver`]: walks a [`Record`] and produces a [`Tree`], applying
//!   the options attached to each field.
//! - [`SerializeProcessor`]: a hook consulted before the default rules,
//!   e.g. to render leaf values for display.
//!
//! ## Deserialization
//!
//! - [`DeserializeDriver`]: walks a [`Tree`] against a target [`RecordInfo`]
//!   and returns either constructor [`Arguments`] or a constructed [`Record`],
//!   selected by [`BuildMode`].
//!     - Type tags are resolved through a [`TypeRegistry`] (per field, or per call).
//!     - Substituted references are resolved through a [`CollectionIndex`].
//!
//! ## Field options
//!
//! | option | serialize | deserialize |
//! |---|---|---|
//! | `overwrite_key` | stored under another key | read from that key |
//! | `flatten` | nested keys spliced into the parent | nested record read from the parent level |
//! | `add_type` | type tag injected next to the nested keys | concrete type picked from the tag |
//! | `substitute_by_attribute` | record replaced by one attribute | key looked up in the collection index |
//!
//! The shortcuts [`to_tree`] and [`from_tree`] cover the common case.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use recast_record::info::{FieldInfo, FieldOptions, FieldType, RecordInfo};
//! use recast_record::ops::{Arguments, Value};
//! use recast_record::{from_tree, to_tree};
//!
//! let child = Arc::new(RecordInfo::new("Child", [FieldInfo::new("name", FieldType::Primitive)]));
//! let parent = Arc::new(RecordInfo::new(
//!     "Parent",
//!     [
//!         FieldInfo::new("id", FieldType::Primitive),
//!         FieldInfo::new("child", FieldType::record(&child))
//!             .with_options(FieldOptions::new().with_flatten(true)),
//!     ],
//! ));
//!
//! let leon = child.construct(Arguments::new().with("name", "leon")).unwrap();
//! let value = parent
//!     .construct(Arguments::new().with("id", 1).with("child", leon))
//!     .unwrap();
//!
//! let tree = to_tree(&value).unwrap();
//! assert_eq!(
//!     serde_json::to_string(&tree).unwrap(),
//!     r#"{"id":1,"name":"leon"}"#,
//! );
//!
//! assert_eq!(from_tree(&tree, &parent).unwrap(), value);
//! ```
//!
//! [`Record`]: crate::ops::Record
//! [`Arguments`]: crate::ops::Arguments
//! [`RecordInfo`]: crate::info::RecordInfo
//! [`Tree`]: crate::tree::Tree
//! [`TypeRegistry`]: crate::registry::TypeRegistry
//! [`CollectionIndex`]: crate::registry::CollectionIndex

use alloc::sync::Arc;

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use de::{BuildMode, DeserializeDriver, Deserialized};
pub use ser::{SerializeDriver, SerializeProcessor};

use crate::Error;
use crate::info::RecordInfo;
use crate::ops::Record;
use crate::tree::Tree;

/// Serializes a record with the default [`SerializeDriver`].
#[inline]
pub fn to_tree(record: &Record) -> Result<Tree, Error> {
    SerializeDriver::new().serialize_record(record)
}

/// Deserializes a record instance, without collection index nor registry.
///
/// See [`DeserializeDriver`] for the other settings.
#[inline]
pub fn from_tree(tree: &Tree, info: &Arc<RecordInfo>) -> Result<Record, Error> {
    DeserializeDriver::new().deserialize_record(tree, info)
}
