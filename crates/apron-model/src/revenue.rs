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

//! # Revenue Table
//!
//! Revenue earned when a request of a given owner and type is parked on a
//! given bay. A missing entry is worth zero. Zero revenue does not make a
//! pair ineligible; eligibility is the job of the compatibility relation.

use crate::{
    err::InvalidRevenueError,
    keys::RevenueKey,
    request::{BayId, OwnerCode, TypeCode},
};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenueTable {
    entries: FxHashMap<RevenueKey, f64>,
}

impl RevenueTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the revenue for a key, returning the previous amount.
    ///
    /// Negative and non-finite amounts are rejected and leave the table
    /// unchanged.
    ///
    /// ```rust
    /// use apron_model::revenue::RevenueTable;
    ///
    /// let mut table = RevenueTable::new();
    /// assert!(table.insert("AI", "A320", "B1", 100.0).is_ok());
    /// assert!(table.insert("AI", "A320", "B2", -1.0).is_err());
    /// assert!(table.insert("AI", "A320", "B3", f64::NAN).is_err());
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert<O, C, B>(
        &mut self,
        owner: O,
        type_code: C,
        bay: B,
        amount: f64,
    ) -> Result<Option<f64>, InvalidRevenueError>
    where
        O: Into<OwnerCode>,
        C: Into<TypeCode>,
        B: Into<BayId>,
    {
        let key = RevenueKey::new(owner, type_code, bay);
        if !amount.is_finite() || amount < 0.0 {
            return Err(InvalidRevenueError::new(key, amount));
        }
        Ok(self.entries.insert(key, amount))
    }

    /// Returns the revenue for the triple, zero if there is no entry.
    pub fn revenue(&self, owner: &OwnerCode, type_code: &TypeCode, bay: &BayId) -> f64 {
        let key = RevenueKey::new(owner.clone(), type_code.clone(), bay.clone());
        self.entries.get(&key).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn get(&self, key: &RevenueKey) -> Option<f64> {
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
    pub fn iter(&self) -> impl Iterator<Item = (&RevenueKey, f64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_is_zero() {
        let table = RevenueTable::new();
        let owner = OwnerCode::new("AI");
        let ty = TypeCode::new("A320");
        let bay = BayId::new("B1");
        assert_eq!(table.revenue(&owner, &ty, &bay), 0.0);
    }

    #[test]
    fn test_lookup_is_keyed_by_owner_type_and_bay() {
        let mut table = RevenueTable::new();
        table.insert("AI", "A320", "B1", 100.0).unwrap();
        table.insert("BA", "A320", "B1", 120.0).unwrap();

        let ty = TypeCode::new("A320");
        let bay = BayId::new("B1");
        assert_eq!(table.revenue(&OwnerCode::new("AI"), &ty, &bay), 100.0);
        assert_eq!(table.revenue(&OwnerCode::new("BA"), &ty, &bay), 120.0);
        assert_eq!(table.revenue(&OwnerCode::new("LH"), &ty, &bay), 0.0);
    }

    #[test]
    fn test_invalid_amount_reports_key() {
        let mut table = RevenueTable::new();
        let err = table
            .insert("AI", "A320", "B1", f64::INFINITY)
            .unwrap_err();
        assert_eq!(err.key(), &RevenueKey::new("AI", "A320", "B1"));
        assert!(table.is_empty());
    }
}
