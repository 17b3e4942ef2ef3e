use std::collections::HashSet;
use std::collections::hash_set;
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{DecodeError, EncodeError};
use crate::types::{Cell, CellValue, DecodeMode, TypeName, discard};

/// A deduplicated collection stored as a JSON array.
///
/// Reading from storage adds to the elements already present instead of replacing
/// them, so scanning two cells into the same set yields their union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set<T: Eq + Hash> {
    inner: HashSet<T>,
}

impl<T: Eq + Hash> Default for Set<T> {
    fn default() -> Self {
        Self {
            inner: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash> Set<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key`; adding an element already present changes nothing.
    pub fn add(&mut self, key: T) {
        self.inner.insert(key);
    }

    /// Removes `key` if present.
    pub fn remove(&mut self, key: &T) {
        self.inner.remove(key);
    }

    pub fn contains(&self, key: &T) -> bool {
        self.inner.contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn add_list<I: IntoIterator<Item = T>>(&mut self, list: I) {
        self.inner.extend(list);
    }

    pub fn iter(&self) -> hash_set::Iter<'_, T> {
        self.inner.iter()
    }
}

impl<T: Eq + Hash + Clone> Set<T> {
    /// All elements, in no particular order.
    pub fn list(&self) -> Vec<T> {
        self.inner.iter().cloned().collect()
    }

    /// Elements present in both sets. Neither operand is modified.
    pub fn intersect(&self, other: &Set<T>) -> Set<T> {
        other
            .iter()
            .filter(|key| self.contains(*key))
            .cloned()
            .collect()
    }
}

impl<T: Eq + Hash> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<T: Eq + Hash> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<T: Eq + Hash> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = hash_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<T> CellValue for Set<T>
where
    T: Eq + Hash + Serialize + DeserializeOwned,
{
    fn type_name() -> TypeName {
        TypeName::new(&format!("flatcell::Set<{}>", std::any::type_name::<T>()))
    }

    fn to_cell(&self) -> Result<Cell, EncodeError> {
        let list: Vec<&T> = self.inner.iter().collect();
        Ok(Cell::Bytes(serde_json::to_vec(&list)?))
    }

    fn from_cell(cell: &Cell, _mode: DecodeMode) -> Result<Self, DecodeError> {
        let list: Vec<T> = serde_json::from_slice(cell.as_bytes()?)?;
        Ok(list.into_iter().collect())
    }

    /// Adds the decoded elements to the ones already present.
    fn scan(&mut self, cell: &Cell) {
        match Self::from_cell(cell, DecodeMode::BestEffort) {
            Ok(decoded) => self.inner.extend(decoded),
            Err(err) => discard(&Self::type_name(), &err),
        }
    }
}
