//! Static schema metadata: records, fields, declared types and field options.
//!
//! ## Menu
//!
//! - [`RecordInfo`]: a named, ordered sequence of fields. The unit of (de)serialization.
//! - [`FieldInfo`]: one named slot of a record, with a declared [`FieldType`],
//!   an optional default value and optional [`FieldOptions`].
//! - [`FieldType`]: the closed set of declared type shapes.
//! - [`EnumInfo`]: an enum type whose values serialize to their variant name.
//! - [`FieldOptions`]: the declarative per-field configuration.
//! - [`ResolvedField`]: a field paired with its effective options, exposing the
//!   derived keys (effective key, type-tag key, collection bucket key).
//!
//! Schema values are built once and shared through `Arc`; nothing in this
//! module is mutated after construction.

// -----------------------------------------------------------------------------
// Modules

mod enum_info;
mod field_info;
mod field_type;
mod options;
mod record_info;
mod resolved;

// -----------------------------------------------------------------------------
// Exports

pub use enum_info::EnumInfo;
pub use field_info::FieldInfo;
pub use field_type::FieldType;
pub use options::{AddType, DEFAULT_TYPE_LABEL, FieldOptions, TypeName};
pub use record_info::{Constructor, RecordInfo};
pub use resolved::ResolvedField;
