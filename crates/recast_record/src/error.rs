use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;

use crate::registry::ScalarKey;

// -----------------------------------------------------------------------------
// FieldPath

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A record field, by its declared name.
    Field(String),
    /// A position inside a sequence.
    Index(usize),
    /// An entry of a mapping.
    Key(String),
}

/// The location of a value inside the record graph being traversed.
///
/// Rendered as `Parent.childs[1].name`, mapping entries as `["key"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    root: String,
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates a path rooted at the record named `root`.
    #[inline]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            segments: Vec::new(),
        }
    }

    #[inline]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn push_field(&mut self, name: &str) {
        self.segments.push(PathSegment::Field(name.to_owned()));
    }

    #[inline]
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    #[inline]
    pub fn push_key(&mut self, key: &str) {
        self.segments.push(PathSegment::Key(key.to_owned()));
    }

    #[inline]
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Builds an [`Error`] located at the current position.
    #[inline]
    pub fn error(&self, kind: impl Into<ErrorKind>) -> Error {
        Error::new(kind, self.clone())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.root.is_empty() { "$" } else { &self.root })?;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Error

/// An error raised while serializing, deserializing or constructing records.
///
/// Carries the [`FieldPath`] of the value that failed.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind} (at `{path}`)")]
pub struct Error {
    kind: ErrorKind,
    path: FieldPath,
}

impl Error {
    #[inline]
    pub fn new(kind: impl Into<ErrorKind>, path: FieldPath) -> Self {
        Self {
            kind: kind.into(),
            path,
        }
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    #[inline]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    #[inline]
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }
}

/// The failure categories of [`Error`].
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error(
        "attribute `{attribute}` cannot be used as a key: found {found}, \
         expected a string, integer, float, boolean or enum"
    )]
    KeyType { attribute: String, found: &'static str },

    #[error("invalid field configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("missing key `{key}`")]
    MissingKey { key: String },

    #[error("type tag `{tag}` is not in the subtype table")]
    UnknownType { tag: String },

    #[error("`{variant}` is not a variant of enum `{enum_name}`")]
    UnknownVariant { enum_name: String, variant: String },

    #[error("no instance with key `{key}` in collection `{bucket}`")]
    ReferenceLookup { bucket: String, key: ScalarKey },

    #[error("cannot construct record: {0}")]
    Construct(#[from] ConstructError),
}

impl ErrorKind {
    pub(crate) fn mismatch(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        use alloc::string::ToString;

        Self::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// An invalid combination of [`FieldOptions`](crate::info::FieldOptions).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("`add_type` is set but no subtype table is available to resolve the tag")]
    AddTypeWithoutTable,

    #[error("only record fields can be flattened, found {0}")]
    FlattenNonRecord(String),

    #[error("sequence and mapping fields cannot be flattened")]
    FlattenCollection,

    #[error("`flatten` cannot be combined with `substitute_by_attribute`")]
    FlattenWithSubstitute,

    #[error("`add_type` cannot be combined with `substitute_by_attribute`")]
    SubstituteWithAddType,

    #[error("`substitute_by_attribute` needs a record value, found {0}")]
    SubstituteNonRecord(&'static str),

    #[error("record `{record}` has no attribute `{attribute}`")]
    MissingAttribute { record: String, attribute: String },

    #[error("`add_type` needs a record value, found {0}")]
    TypeTagOnNonRecord(&'static str),

    #[error("union fields need `add_type` to pick a concrete record")]
    UnionWithoutTypeTag,

    #[error("record `{record}` has a field stored under the type-tag key `{key}`")]
    TypeTagCollision { record: String, key: String },
}

/// A failure of the construction step that turns arguments into a record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConstructError {
    #[error("record `{record}` is missing argument `{argument}`")]
    MissingArgument { record: String, argument: String },

    #[error("record `{record}` has no field `{argument}`")]
    UnknownArgument { record: String, argument: String },

    #[error("record `{record}` rejected its arguments: {reason}")]
    Rejected { record: String, reason: String },
}
