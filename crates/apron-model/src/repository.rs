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

//! # Collaborator Interfaces
//!
//! The engine never talks to storage. Callers keep their requests and their
//! facility data wherever they like and hand a snapshot to
//! `Problem::from_sources`. The traits below describe what such a
//! collaborator offers; the in-memory types are reference implementations
//! for tests and embedding.
//!
//! A stored request is keyed by its owner and the owner's own identifier.
//! Both are trimmed, the owner and the type are upper-cased, and the
//! request identifier handed to the engine is `OWNER_EXTERNALID`.

use crate::{
    compatibility::CompatibilityRelation,
    err::{DuplicateRequestKeyError, EmptyFieldError, RepositoryError, RequestNotFoundError},
    request::{BayId, OwnerCode, Request, RequestId},
    revenue::RevenueTable,
};
use apron_core::num::TimeNumeric;

/// Composite key of a stored request.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestKey {
    owner: OwnerCode,
    external_id: String,
}

impl RequestKey {
    /// Normalizes and validates the key parts.
    ///
    /// ```rust
    /// use apron_model::repository::RequestKey;
    ///
    /// let key = RequestKey::try_new(" ai ", " 101").unwrap();
    /// assert_eq!(key.owner().as_str(), "AI");
    /// assert_eq!(key.to_string(), "AI_101");
    /// assert!(RequestKey::try_new("AI", "  ").is_err());
    /// ```
    pub fn try_new(owner: &str, external_id: &str) -> Result<Self, EmptyFieldError> {
        let owner = normalize_code(owner, "owner")?;
        let external_id = external_id.trim();
        if external_id.is_empty() {
            return Err(EmptyFieldError::new("external_id"));
        }
        Ok(Self {
            owner: OwnerCode::new(owner),
            external_id: external_id.to_owned(),
        })
    }

    #[inline]
    pub fn owner(&self) -> &OwnerCode {
        &self.owner
    }

    #[inline]
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// The identifier the engine sees for this request.
    #[inline]
    pub fn request_id(&self) -> RequestId {
        RequestId::new(self.to_string())
    }
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.owner, self.external_id)
    }
}

fn normalize_code(value: &str, field: &'static str) -> Result<String, EmptyFieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EmptyFieldError::new(field));
    }
    Ok(value.to_uppercase())
}

/// Store of the requests that make up the next solve.
pub trait RequestRepository<T>
where
    T: TimeNumeric,
{
    /// Returns all stored requests in insertion order.
    fn list(&self) -> Vec<Request<T>>;

    /// Stores a new request and returns its key.
    fn add(
        &mut self,
        owner: &str,
        external_id: &str,
        type_code: &str,
        start: T,
        end: T,
    ) -> Result<RequestKey, RepositoryError<T>>;

    /// Removes a stored request and returns it.
    fn remove(&mut self, key: &RequestKey) -> Result<Request<T>, RepositoryError<T>>;

    /// Removes every stored request.
    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only snapshot of the static facility data.
pub trait FacilitySnapshotSource {
    fn bays(&self) -> Vec<BayId>;
    fn compatibility(&self) -> CompatibilityRelation;
    fn revenue(&self) -> RevenueTable;
}

/// A `RequestRepository` backed by a `Vec`.
#[derive(Debug, Clone)]
pub struct InMemoryRequestRepository<T> {
    entries: Vec<(RequestKey, Request<T>)>,
}

impl<T> Default for InMemoryRequestRepository<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> InMemoryRequestRepository<T>
where
    T: TimeNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored request for `key`, if any.
    pub fn get(&self, key: &RequestKey) -> Option<&Request<T>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, request)| request)
    }

    /// Iterates `(key, request)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&RequestKey, &Request<T>)> {
        self.entries.iter().map(|(k, r)| (k, r))
    }
}

impl<T> RequestRepository<T> for InMemoryRequestRepository<T>
where
    T: TimeNumeric,
{
    fn list(&self) -> Vec<Request<T>> {
        self.entries.iter().map(|(_, r)| r.clone()).collect()
    }

    fn add(
        &mut self,
        owner: &str,
        external_id: &str,
        type_code: &str,
        start: T,
        end: T,
    ) -> Result<RequestKey, RepositoryError<T>> {
        let key = RequestKey::try_new(owner, external_id)?;
        let type_code = normalize_code(type_code, "type_code")?;
        if self.entries.iter().any(|(k, _)| *k == key) {
            return Err(DuplicateRequestKeyError::new(key).into());
        }
        let request = Request::try_new(key.request_id(), key.owner().clone(), type_code, start, end)?;
        self.entries.push((key.clone(), request));
        Ok(key)
    }

    fn remove(&mut self, key: &RequestKey) -> Result<Request<T>, RepositoryError<T>> {
        match self.entries.iter().position(|(k, _)| k == key) {
            Some(position) => Ok(self.entries.remove(position).1),
            None => Err(RequestNotFoundError::new(key.clone()).into()),
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A `FacilitySnapshotSource` holding fixed tables.
#[derive(Debug, Clone, Default)]
pub struct StaticFacility {
    bays: Vec<BayId>,
    compatibility: CompatibilityRelation,
    revenue: RevenueTable,
}

impl StaticFacility {
    #[inline]
    pub fn new(bays: Vec<BayId>, compatibility: CompatibilityRelation, revenue: RevenueTable) -> Self {
        Self {
            bays,
            compatibility,
            revenue,
        }
    }

    /// A small demonstration apron.
    ///
    /// - Ten bays `B1` to `B10`.
    /// - `A320` is compatible with every bay, `B737` with every bay but `B1`.
    /// - Owner `AI` earns `100 + 5 * k` for an `A320` on the `k`-th bay
    ///   (counting from zero).
    /// - Owner `BA` earns `150 + 5 * (k - 1)` for a `B737` on the `k`-th bay,
    ///   `k >= 1`.
    ///
    /// ```rust
    /// use apron_model::repository::{FacilitySnapshotSource, StaticFacility};
    /// use apron_model::request::{BayId, OwnerCode, TypeCode};
    ///
    /// let demo = StaticFacility::demo();
    /// assert_eq!(demo.bays().len(), 10);
    /// let rev = demo.revenue();
    /// let b10 = BayId::new("B10");
    /// assert_eq!(rev.revenue(&OwnerCode::new("AI"), &TypeCode::new("A320"), &b10), 145.0);
    /// assert_eq!(rev.revenue(&OwnerCode::new("BA"), &TypeCode::new("B737"), &b10), 190.0);
    /// ```
    pub fn demo() -> Self {
        let bays: Vec<BayId> = (1..=10).map(|i| BayId::new(format!("B{}", i))).collect();

        let mut compatibility = CompatibilityRelation::new();
        let mut revenue = RevenueTable::new();
        for (k, bay) in bays.iter().enumerate() {
            compatibility.allow("A320", bay.clone());
            compatibility.insert("B737", bay.clone(), k != 0);

            let _ = revenue.insert("AI", "A320", bay.clone(), 100.0 + 5.0 * k as f64);
            if k != 0 {
                let _ = revenue.insert("BA", "B737", bay.clone(), 150.0 + 5.0 * (k - 1) as f64);
            }
        }

        Self {
            bays,
            compatibility,
            revenue,
        }
    }
}

impl FacilitySnapshotSource for StaticFacility {
    fn bays(&self) -> Vec<BayId> {
        self.bays.clone()
    }

    fn compatibility(&self) -> CompatibilityRelation {
        self.compatibility.clone()
    }

    fn revenue(&self) -> RevenueTable {
        self.revenue.clone()
    }
}
