//! Runtime values: record instances and the data they hold.
//!
//! ## Menu
//!
//! - [`Value`]: a dynamically typed value, the content of a record field.
//! - [`Record`]: an immutable instance of a [`RecordInfo`], one value per field.
//! - [`Arguments`]: an ordered `name -> value` mapping of constructor arguments.
//! - [`EnumValue`]: one variant of an [`EnumInfo`].
//!
//! A [`Record`] is only built through [`RecordInfo::construct`], so its
//! values always line up with the fields of its info.
//!
//! [`RecordInfo`]: crate::info::RecordInfo
//! [`RecordInfo::construct`]: crate::info::RecordInfo::construct
//! [`EnumInfo`]: crate::info::EnumInfo

// -----------------------------------------------------------------------------
// Modules

mod arguments;
mod enum_value;
mod record;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use arguments::Arguments;
pub use enum_value::EnumValue;
pub use record::{Record, RecordFieldIter};
pub use value::Value;
