//! Caller-supplied lookup tables consulted by the deserializer.
//!
//! ## Menu
//!
//! - [`TypeRegistry`]: a subtype table, `type label -> record type`, used to
//!   recover the concrete record behind a type tag.
//! - [`CollectionIndex`]: `bucket -> (key -> instance)`, used to resolve
//!   substituted references back into full instances.
//! - [`ScalarKey`]: the hashable form of a substitution key.
//!
//! Neither table is mutated by the drivers; they are borrowed for the
//! duration of a call.

// -----------------------------------------------------------------------------
// Modules

mod collection_index;
mod scalar_key;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use collection_index::CollectionIndex;
pub use scalar_key::ScalarKey;
pub use type_registry::TypeRegistry;
