// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Compatibility Relation
//!
//! Which request types may park on which bays. The relation is
//! conservative: a `(type, bay)` pair without an entry is incompatible, the
//! same as an explicit `false`.

use crate::{
    keys::CompatibilityKey,
    request::{BayId, TypeCode},
};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityRelation {
    entries: FxHashMap<CompatibilityKey, bool>,
}

impl CompatibilityRelation {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records whether `type_code` may use `bay`, returning the previous entry.
    pub fn insert<C, B>(&mut self, type_code: C, bay: B, compatible: bool) -> Option<bool>
    where
        C: Into<TypeCode>,
        B: Into<BayId>,
    {
        self.entries
            .insert(CompatibilityKey::new(type_code, bay), compatible)
    }

    /// Marks `type_code` as compatible with `bay`.
    #[inline]
    pub fn allow<C, B>(&mut self, type_code: C, bay: B)
    where
        C: Into<TypeCode>,
        B: Into<BayId>,
    {
        self.insert(type_code, bay, true);
    }

    /// Returns `true` only for an explicit compatible entry.
    ///
    /// ```rust
    /// use apron_model::compatibility::CompatibilityRelation;
    /// use apron_model::request::{BayId, TypeCode};
    ///
    /// let mut rel = CompatibilityRelation::new();
    /// rel.allow("A320", "B1");
    /// rel.insert("B737", "B1", false);
    ///
    /// assert!(rel.is_compatible(&TypeCode::new("A320"), &BayId::new("B1")));
    /// assert!(!rel.is_compatible(&TypeCode::new("B737"), &BayId::new("B1")));
    /// assert!(!rel.is_compatible(&TypeCode::new("A380"), &BayId::new("B1")));
    /// ```
    pub fn is_compatible(&self, type_code: &TypeCode, bay: &BayId) -> bool {
        let key = CompatibilityKey::new(type_code.clone(), bay.clone());
        self.entries.get(&key).copied().unwrap_or(false)
    }

    /// Returns the raw entry, `None` if the pair was never recorded.
    #[inline]
    pub fn get(&self, key: &CompatibilityKey) -> Option<bool> {
        self.entries.get(key).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the recorded entries in unspecified order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&CompatibilityKey, bool)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }
}

impl FromIterator<(CompatibilityKey, bool)> for CompatibilityRelation {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (CompatibilityKey, bool)>,
    {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_is_incompatible() {
        let rel = CompatibilityRelation::new();
        assert!(rel.is_empty());
        assert!(!rel.is_compatible(&TypeCode::new("A320"), &BayId::new("B1")));
    }

    #[test]
    fn test_insert_overwrites_and_returns_previous() {
        let mut rel = CompatibilityRelation::new();
        assert_eq!(rel.insert("A320", "B1", false), None);
        assert_eq!(rel.insert("A320", "B1", true), Some(false));
        assert!(rel.is_compatible(&TypeCode::new("A320"), &BayId::new("B1")));
        assert_eq!(rel.len(), 1);
    }
}
