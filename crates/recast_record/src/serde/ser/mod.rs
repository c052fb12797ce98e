// -----------------------------------------------------------------------------
// Modules

mod driver;
mod processor;
mod record_serializer;

// -----------------------------------------------------------------------------
// Exports

pub use driver::SerializeDriver;
pub use processor::SerializeProcessor;
