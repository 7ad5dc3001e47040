//! Copy-on-write record.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::mvi::Patchable;

/// A read-only, object-shaped value.
///
/// [`update`](Self::update) returns a new record with the supplied fields
/// merged over the current ones; the wrapped value is never mutated.
pub struct PersistentRecord<T> {
    value: Arc<T>,
}

impl<T> PersistentRecord<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(value),
        }
    }

    /// Borrowed view of the wrapped value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// True when both records wrap the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl<T: Clone> PersistentRecord<T> {
    /// A copy of the wrapped value.
    pub fn object(&self) -> T {
        T::clone(&self.value)
    }
}

impl<T: Patchable> PersistentRecord<T> {
    /// A new record with `fields` shallow-merged over the current value.
    pub fn update(&self, fields: T::Patch) -> Self {
        Self::new(self.value.merge(fields))
    }
}

impl<T> Clone for PersistentRecord<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

impl<T: Default> Default for PersistentRecord<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PersistentRecord").field(&self.value).finish()
    }
}

impl<T: PartialEq> PartialEq for PersistentRecord<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> From<T> for PersistentRecord<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// Records can be state themselves; they delegate to the wrapped value.
impl<T: Patchable> Patchable for PersistentRecord<T> {
    type Patch = T::Patch;

    fn is_record(&self) -> bool {
        self.value.is_record()
    }

    fn is_record_patch(patch: &T::Patch) -> bool {
        T::is_record_patch(patch)
    }

    fn merge(&self, patch: T::Patch) -> Self {
        self.update(patch)
    }

    fn adopt(patch: Option<T::Patch>) -> Self {
        Self::new(T::adopt(patch))
    }
}

impl<T: Serialize> Serialize for PersistentRecord<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PersistentRecord<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::new)
    }
}
