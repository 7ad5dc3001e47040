//! Copy-on-write list.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::mvi::Patchable;

/// An ordered sequence that is never mutated after construction.
///
/// Every operation that "changes" the list returns a new list backed by a
/// fresh snapshot; the receiver and anything borrowed from it stay valid
/// and unchanged. Clones share the immutable snapshot.
///
/// Each mutator copies the whole snapshot, so they are O(n).
///
/// ```
/// use elmish::PersistentList;
///
/// let empty = PersistentList::new();
/// let one = empty.append("milk");
/// assert_eq!(empty.len(), 0);
/// assert_eq!(one.array(), vec!["milk"]);
/// ```
pub struct PersistentList<T> {
    items: Arc<[T]>,
}

impl<T> PersistentList<T> {
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    /// The element at `index`, or `None` when out of range.
    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Walks the current snapshot. Restartable; does not consume the list.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrowed view of the snapshot.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// True when both lists share one snapshot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Projects every element into a new list.
    pub fn map<U>(&self, transform: impl FnMut(&T) -> U) -> PersistentList<U> {
        self.items.iter().map(transform).collect()
    }
}

impl<T: Clone> PersistentList<T> {
    /// Builds a list from a full copy of `items`.
    pub fn from_slice(items: &[T]) -> Self {
        Self {
            items: Arc::from(items.to_vec()),
        }
    }

    /// A copy of the elements; never the backing snapshot itself.
    pub fn array(&self) -> Vec<T> {
        self.items.to_vec()
    }

    pub fn append(&self, item: T) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items);
        items.push(item);
        items.into()
    }

    pub fn prepend(&self, item: T) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.push(item);
        items.extend_from_slice(&self.items);
        items.into()
    }

    /// Inserts `item` before `index`. An index at or past the end appends.
    pub fn insert_at(&self, index: usize, item: T) -> Self {
        let index = index.min(self.items.len());
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items[..index]);
        items.push(item);
        items.extend_from_slice(&self.items[index..]);
        items.into()
    }

    /// A list without the element at `index`. Out of range yields an
    /// unchanged copy.
    pub fn remove_at(&self, index: usize) -> Self {
        self.items
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, item)| item.clone())
            .collect()
    }

    /// Removes the last element, or the first when `from_start` is set.
    ///
    /// Returns the shortened list and the removed element, if any.
    pub fn pop(&self, from_start: bool) -> (Self, Option<T>) {
        if self.items.is_empty() {
            return (self.clone_snapshot(), None);
        }
        let index = if from_start { 0 } else { self.items.len() - 1 };
        (self.remove_at(index), self.items.get(index).cloned())
    }

    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Self {
        self.items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    fn clone_snapshot(&self) -> Self {
        Self::from_slice(&self.items)
    }
}

impl<T: Patchable> PersistentList<T> {
    /// Replaces the element at `index` with `patch`.
    ///
    /// When both the element and the patch are records the patch is merged
    /// over the element; otherwise it replaces the element wholesale. Out of
    /// range yields an unchanged copy.
    pub fn update_at(&self, index: usize, patch: T::Patch) -> Self {
        let Some(current) = self.items.get(index) else {
            return self.clone_snapshot();
        };
        let replacement = if current.is_record() && T::is_record_patch(&patch) {
            current.merge(patch)
        } else {
            T::adopt(Some(patch))
        };
        let mut items = self.items.to_vec();
        items[index] = replacement;
        items.into()
    }

    /// Removes the element at `index` when `should_remove` says so, and
    /// applies `update_instead` to it like [`update_at`](Self::update_at)
    /// otherwise. Out of range yields an unchanged copy.
    pub fn mutate_at(
        &self,
        index: usize,
        should_remove: impl FnOnce(&T) -> bool,
        update_instead: impl FnOnce(&T) -> T::Patch,
    ) -> Self {
        let Some(current) = self.items.get(index) else {
            return self.clone_snapshot();
        };
        if should_remove(current) {
            self.remove_at(index)
        } else {
            let patch = update_instead(current);
            self.update_at(index, patch)
        }
    }
}

impl<T> Clone for PersistentList<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for PersistentList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

impl<T> From<Vec<T>> for PersistentList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }
}

impl<T> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for PersistentList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

/// Lists are not object-shaped: a patch replaces the whole list, and an
/// absent result leaves an empty list.
impl<T: Clone> Patchable for PersistentList<T> {
    type Patch = PersistentList<T>;

    fn is_record(&self) -> bool {
        false
    }

    fn is_record_patch(_: &PersistentList<T>) -> bool {
        false
    }

    fn merge(&self, patch: PersistentList<T>) -> Self {
        patch
    }

    fn adopt(patch: Option<PersistentList<T>>) -> Self {
        patch.unwrap_or_default()
    }
}

impl<T: Serialize> Serialize for PersistentList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PersistentList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}
