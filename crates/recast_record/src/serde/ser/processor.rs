use crate::ErrorKind;
use crate::info::ResolvedField;
use crate::ops::Value;
use crate::tree::Tree;

/// A hook consulted for every element value before the default rules.
///
/// Receives the runtime value and the field it belongs to. For sequence and
/// mapping fields it is called once for the container and once per item.
///
/// ## Return Value Semantics
///
/// - **`Some(Ok(tree))`** → The value is handled, `tree` replaces the default output.
/// - **`Some(Err(error))`** → The value is handled but failed; the error is reported
///   at the current field path.
/// - **`None`** → The value is not handled; the default rules apply.
///
/// ## Default Implementation
///
/// The trait is implemented for `()` as a default processor that always
/// returns `None` (handles nothing).
///
/// See serialization rules in [`SerializeDriver`] .
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use recast_record::ErrorKind;
/// use recast_record::info::{FieldInfo, FieldType, RecordInfo, ResolvedField};
/// use recast_record::ops::{Arguments, Value};
/// use recast_record::serde::{SerializeDriver, SerializeProcessor};
/// use recast_record::tree::Tree;
///
/// /// Renders every float with two decimals.
/// struct Rounded;
///
/// impl SerializeProcessor for Rounded {
///     fn try_serialize(&self, value: &Value, _field: ResolvedField<'_>) -> Option<Result<Tree, ErrorKind>> {
///         let value = value.as_f64().filter(|_| matches!(value, Value::Float(_)))?;
///         Some(Ok(Tree::from(format!("{value:.2}"))))
///     }
/// }
///
/// let point = Arc::new(RecordInfo::new("Point", [FieldInfo::new("x", FieldType::Primitive)]));
/// let record = point.construct(Arguments::new().with("x", 1.0 / 3.0)).unwrap();
///
/// let tree = SerializeDriver::with_processor(&Rounded).serialize_record(&record).unwrap();
/// assert_eq!(tree.get("x").and_then(Tree::as_str), Some("0.33"));
/// ```
///
/// [`SerializeDriver`]: crate::serde::SerializeDriver
pub trait SerializeProcessor {
    fn try_serialize(
        &self,
        value: &Value,
        field: ResolvedField<'_>,
    ) -> Option<Result<Tree, ErrorKind>>;
}

impl SerializeProcessor for () {
    #[inline]
    fn try_serialize(
        &self,
        _value: &Value,
        _field: ResolvedField<'_>,
    ) -> Option<Result<Tree, ErrorKind>> {
        None
    }
}
