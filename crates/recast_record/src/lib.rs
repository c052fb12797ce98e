#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod info;
pub mod ops;
pub mod registry;
pub mod serde;
pub mod tree;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{ConfigError, ConstructError, Error, ErrorKind, FieldPath, PathSegment};
pub use crate::serde::{from_tree, to_tree};
