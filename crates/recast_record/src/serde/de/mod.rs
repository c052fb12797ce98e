// -----------------------------------------------------------------------------
// Modules

mod driver;
mod record_visitor;

// -----------------------------------------------------------------------------
// Exports

pub use driver::{BuildMode, DeserializeDriver, Deserialized};
