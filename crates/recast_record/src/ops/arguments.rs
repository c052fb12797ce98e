use alloc::string::String;

use recast_utils::{OrderedMap, OrderedMapIter};

use crate::ops::Value;

/// An ordered mapping of constructor-argument name to value.
///
/// Produced by the deserializer in [`BuildMode::Arguments`] and consumed by
/// [`RecordInfo::construct`]. Callers may inspect or edit it in between.
///
/// # Examples
///
/// ```
/// use recast_record::ops::{Arguments, Value};
///
/// let mut args = Arguments::new().with("name", "leon").with("age", 7);
/// args.insert("age", 8);
///
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.get("age"), Some(&Value::Int(8)));
/// ```
///
/// [`BuildMode::Arguments`]: crate::serde::BuildMode::Arguments
/// [`RecordInfo::construct`]: crate::info::RecordInfo::construct
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments(OrderedMap<Value>);

impl Arguments {
    #[inline]
    pub fn new() -> Self {
        Self(OrderedMap::new())
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(OrderedMap::with_capacity(capacity))
    }

    #[inline]
    pub fn from_map(map: OrderedMap<Value>) -> Self {
        Self(map)
    }

    /// Builder form of [`Arguments::insert`].
    #[inline]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name, value.into());
        self
    }

    /// Sets an argument, returning the previous value.
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name, value.into())
    }

    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.0.get_mut(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> OrderedMapIter<'_, Value> {
        self.0.iter()
    }

    #[inline]
    pub fn as_map(&self) -> &OrderedMap<Value> {
        &self.0
    }

    #[inline]
    pub fn into_map(self) -> OrderedMap<Value> {
        self.0
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Arguments {
    #[inline]
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Arguments {
    type Item = (String, Value);
    type IntoIter = alloc::vec::IntoIter<(String, Value)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = (&'a str, &'a Value);
    type IntoIter = OrderedMapIter<'a, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Arguments> for Value {
    #[inline]
    fn from(value: Arguments) -> Self {
        Value::Map(value.0)
    }
}
