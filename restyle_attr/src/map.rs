// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse attribute-to-value storage.
//!
//! [`AttrMap`] is the storage shared by attribute-set snapshots, programmatic
//! styles and style resources. It is a sorted `SmallVec` searched by
//! [`AttrId`], which keeps small maps inline and lookups cache-friendly.

use core::fmt;
use smallvec::SmallVec;

use crate::id::AttrId;
use crate::value::AttrValue;

/// Most styles assign fewer than 8 attributes.
const INLINE_CAPACITY: usize = 8;

/// A sorted map from [`AttrId`] to [`AttrValue`] with last-write-wins inserts.
///
/// # Example
///
/// ```rust
/// use restyle_attr::{AttrId, AttrMap, AttrValue, ResourceId};
///
/// let width = AttrId::new(0);
/// let mut map = AttrMap::new();
/// map.insert(width, AttrValue::literal(10_i32));
/// map.insert(width, AttrValue::Resource(ResourceId::new(3)));
///
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.get(width), Some(&AttrValue::Resource(ResourceId::new(3))));
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct AttrMap {
    entries: SmallVec<[(AttrId, AttrValue); INLINE_CAPACITY]>,
}

impl AttrMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of assigned attributes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no attribute is assigned.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn find(&self, id: AttrId) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&id, |(aid, _)| *aid)
    }

    /// Assigns a value, replacing any previous assignment for the attribute.
    ///
    /// Returns the replaced value.
    pub fn insert(&mut self, id: AttrId, value: AttrValue) -> Option<AttrValue> {
        match self.find(id) {
            Ok(idx) => Some(core::mem::replace(&mut self.entries[idx].1, value)),
            Err(idx) => {
                self.entries.insert(idx, (id, value));
                None
            }
        }
    }

    /// Returns the value assigned to an attribute.
    #[must_use]
    #[inline]
    pub fn get(&self, id: AttrId) -> Option<&AttrValue> {
        self.find(id).ok().map(|idx| &self.entries[idx].1)
    }

    /// Returns `true` if the attribute is assigned.
    #[must_use]
    #[inline]
    pub fn contains(&self, id: AttrId) -> bool {
        self.find(id).is_ok()
    }

    /// Iterates assignments in ascending [`AttrId`] order.
    pub fn iter(&self) -> impl Iterator<Item = (AttrId, &AttrValue)> + '_ {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    /// Iterates assigned attribute IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AttrId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }
}

impl fmt::Debug for AttrMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(AttrId, AttrValue)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (AttrId, AttrValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, value) in iter {
            map.insert(id, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceId;
    use alloc::vec::Vec;

    #[test]
    fn insert_keeps_ids_sorted() {
        let mut map = AttrMap::new();
        map.insert(AttrId::new(5), AttrValue::literal(5_i32));
        map.insert(AttrId::new(1), AttrValue::literal(1_i32));
        map.insert(AttrId::new(3), AttrValue::literal(3_i32));

        let ids: Vec<_> = map.ids().map(AttrId::index).collect();
        assert_eq!(ids, [1, 3, 5]);
    }

    #[test]
    fn last_write_wins() {
        let id = AttrId::new(0);
        let mut map = AttrMap::new();
        assert_eq!(map.insert(id, AttrValue::literal(1_i32)), None);
        assert_eq!(
            map.insert(id, AttrValue::literal(2_i32)),
            Some(AttrValue::literal(1_i32))
        );
        assert_eq!(map.get(id), Some(&AttrValue::literal(2_i32)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: AttrMap = [
            (AttrId::new(0), AttrValue::literal(1_i32)),
            (AttrId::new(1), AttrValue::Resource(ResourceId::new(2))),
        ]
        .into_iter()
        .collect();
        let b: AttrMap = [
            (AttrId::new(1), AttrValue::Resource(ResourceId::new(2))),
            (AttrId::new(0), AttrValue::literal(1_i32)),
        ]
        .into_iter()
        .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_ids_are_absent() {
        let map = AttrMap::new();
        assert!(map.is_empty());
        assert!(!map.contains(AttrId::new(0)));
        assert_eq!(map.get(AttrId::new(0)), None);
    }
}
