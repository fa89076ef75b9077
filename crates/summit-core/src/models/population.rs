//! Tri-state child collections.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A child collection that may not have been requested at all.
///
/// `Omitted` means the caller asked not to populate the collection and the
/// field is left out of the serialized form entirely. `Loaded` carries the
/// children, which may legitimately be empty. Fields of this type are declared
/// with `#[serde(default, skip_serializing_if = "Population::is_omitted")]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Population<T> {
    /// Children were not fetched
    Omitted,
    /// Children were fetched (possibly none exist)
    Loaded(Vec<T>),
}

impl<T> Population<T> {
    /// Returns `true` when the children were not fetched.
    pub fn is_omitted(&self) -> bool {
        matches!(self, Population::Omitted)
    }

    /// Returns the loaded children, or `None` when omitted.
    pub fn loaded(&self) -> Option<&[T]> {
        match self {
            Population::Omitted => None,
            Population::Loaded(items) => Some(items),
        }
    }

    /// Mutable access to the loaded children.
    pub fn loaded_mut(&mut self) -> Option<&mut Vec<T>> {
        match self {
            Population::Omitted => None,
            Population::Loaded(items) => Some(items),
        }
    }

    /// The children as a slice; empty when omitted.
    pub fn as_slice(&self) -> &[T] {
        self.loaded().unwrap_or(&[])
    }

    /// Drops the children and marks the collection as not requested.
    pub fn omit(&mut self) {
        *self = Population::Omitted;
    }
}

impl<T> Default for Population<T> {
    fn default() -> Self {
        Population::Omitted
    }
}

impl<T> From<Vec<T>> for Population<T> {
    fn from(items: Vec<T>) -> Self {
        Population::Loaded(items)
    }
}

impl<T: Serialize> Serialize for Population<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Population::Omitted => serializer.serialize_none(),
            Population::Loaded(items) => items.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Population<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<Vec<T>>::deserialize(deserializer)
            .map(|items| items.map_or(Population::Omitted, Population::Loaded))
    }
}
