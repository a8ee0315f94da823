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

//! # Problem Snapshot
//!
//! `Problem<T>` is the validated, immutable input of one solve: the ordered
//! requests, the ordered bays and the three facility tables. Input order is
//! significant. It fixes the `RequestIndex` and `BayIndex` spaces, the order
//! of overlap pairs and the tie-breaking of the search.
//!
//! Construction goes through `Problem::new` (already typed parts),
//! `ProblemBuilder` (raw values, every check deferred to `build`) or
//! `Problem::from_sources` (collaborator snapshots).

use crate::{
    buffer::BufferTable,
    compatibility::CompatibilityRelation,
    err::{
        DuplicateBayError, DuplicateRequestError, FacilityTable, UnknownBayError, ValidationError,
    },
    index::{BayIndex, RequestIndex},
    keys::RevenueKey,
    repository::{FacilitySnapshotSource, RequestRepository},
    request::{BayId, OwnerCode, Request, RequestId, TypeCode},
    revenue::RevenueTable,
};
use apron_core::{interval::ClosedOpenInterval, num::TimeNumeric};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone)]
pub struct Problem<T> {
    requests: Vec<Request<T>>,
    bays: Vec<BayId>,
    bay_lookup: FxHashMap<BayId, BayIndex>,
    compatibility: CompatibilityRelation,
    revenue: RevenueTable,
    buffers: BufferTable<T>,
}

impl<T> Problem<T>
where
    T: TimeNumeric,
{
    /// Validates the parts and assembles a problem.
    ///
    /// Request identifiers and bay identifiers must be unique, and every
    /// compatibility or revenue entry must name a bay of `bays`.
    pub fn new(
        requests: Vec<Request<T>>,
        bays: Vec<BayId>,
        compatibility: CompatibilityRelation,
        revenue: RevenueTable,
        buffers: BufferTable<T>,
    ) -> Result<Self, ValidationError<T>> {
        let mut seen_requests: FxHashSet<&RequestId> = FxHashSet::default();
        for request in &requests {
            if !seen_requests.insert(request.id()) {
                return Err(DuplicateRequestError::new(request.id().clone()).into());
            }
        }

        let mut bay_lookup = FxHashMap::default();
        bay_lookup.reserve(bays.len());
        for (i, bay) in bays.iter().enumerate() {
            if bay_lookup.insert(bay.clone(), BayIndex::new(i)).is_some() {
                return Err(DuplicateBayError::new(bay.clone()).into());
            }
        }

        // Smallest offending key first so the reported error does not
        // depend on hash map iteration order.
        if let Some(key) = compatibility
            .iter()
            .map(|(key, _)| key)
            .filter(|key| !bay_lookup.contains_key(key.bay()))
            .min()
        {
            return Err(UnknownBayError::new(key.bay().clone(), FacilityTable::Compatibility).into());
        }
        if let Some(key) = revenue
            .iter()
            .map(|(key, _)| key)
            .filter(|key| !bay_lookup.contains_key(key.bay()))
            .min()
        {
            return Err(UnknownBayError::new(key.bay().clone(), FacilityTable::Revenue).into());
        }

        Ok(Self {
            requests,
            bays,
            bay_lookup,
            compatibility,
            revenue,
            buffers,
        })
    }

    /// Assembles a problem from the current contents of a request
    /// repository and a facility snapshot.
    pub fn from_sources<R, F>(
        repository: &R,
        facility: &F,
        buffers: BufferTable<T>,
    ) -> Result<Self, ValidationError<T>>
    where
        R: RequestRepository<T> + ?Sized,
        F: FacilitySnapshotSource + ?Sized,
    {
        Self::new(
            repository.list(),
            facility.bays(),
            facility.compatibility(),
            facility.revenue(),
            buffers,
        )
    }

    #[inline]
    pub fn num_requests(&self) -> usize {
        self.requests.len()
    }

    #[inline]
    pub fn num_bays(&self) -> usize {
        self.bays.len()
    }

    #[inline]
    pub fn requests(&self) -> &[Request<T>] {
        &self.requests
    }

    #[inline]
    pub fn bays(&self) -> &[BayId] {
        &self.bays
    }

    /// Returns the request at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..num_requests()`.
    #[inline]
    pub fn request(&self, index: RequestIndex) -> &Request<T> {
        let index = index.get();
        debug_assert!(
            index < self.requests.len(),
            "called `Problem::request` with request index out of bounds: the len is {} but the index is {}",
            self.requests.len(),
            index
        );
        &self.requests[index]
    }

    /// Returns the bay at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..num_bays()`.
    #[inline]
    pub fn bay(&self, index: BayIndex) -> &BayId {
        let index = index.get();
        debug_assert!(
            index < self.bays.len(),
            "called `Problem::bay` with bay index out of bounds: the len is {} but the index is {}",
            self.bays.len(),
            index
        );
        &self.bays[index]
    }

    /// Looks up the position of a bay by identifier.
    #[inline]
    pub fn bay_index(&self, bay: &str) -> Option<BayIndex> {
        self.bay_lookup.get(bay).copied()
    }

    #[inline]
    pub fn compatibility(&self) -> &CompatibilityRelation {
        &self.compatibility
    }

    #[inline]
    pub fn revenue_table(&self) -> &RevenueTable {
        &self.revenue
    }

    #[inline]
    pub fn buffers(&self) -> &BufferTable<T> {
        &self.buffers
    }

    #[inline]
    pub fn is_compatible(&self, request: RequestIndex, bay: BayIndex) -> bool {
        self.compatibility
            .is_compatible(self.request(request).type_code(), self.bay(bay))
    }

    #[inline]
    pub fn revenue(&self, request: RequestIndex, bay: BayIndex) -> f64 {
        let r = self.request(request);
        self.revenue.revenue(r.owner(), r.type_code(), self.bay(bay))
    }

    /// Returns the window of `request` padded by the buffer of its type.
    #[inline]
    pub fn buffered_window(&self, request: RequestIndex) -> ClosedOpenInterval<T> {
        let r = self.request(request);
        r.buffered_window(self.buffers.buffer(r.type_code()))
    }
}

impl<T> std::fmt::Display for Problem<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Problem(requests: {}, bays: {})",
            self.requests.len(),
            self.bays.len()
        )
    }
}

#[derive(Debug, Clone)]
struct RawRequest<T> {
    id: RequestId,
    owner: OwnerCode,
    type_code: TypeCode,
    start: T,
    end: T,
}

/// Collects raw inputs and validates them all at once in `build`.
///
/// ```rust
/// use apron_model::{index::RequestIndex, problem::ProblemBuilder};
///
/// let mut builder = ProblemBuilder::<i64>::new();
/// builder
///     .add_bay("B1")
///     .add_request("AI_1", "AI", "A320", 0, 60)
///     .allow("A320", "B1")
///     .set_revenue("AI", "A320", "B1", 100.0)
///     .set_buffer("A320", 10);
/// let problem = builder.build().unwrap();
/// assert_eq!(problem.num_requests(), 1);
/// assert_eq!(problem.buffered_window(RequestIndex::new(0)).start(), -10);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemBuilder<T> {
    requests: Vec<RawRequest<T>>,
    bays: Vec<BayId>,
    compatibility: CompatibilityRelation,
    revenue: Vec<(RevenueKey, f64)>,
    buffers: Vec<(TypeCode, T)>,
}

impl<T> Default for ProblemBuilder<T> {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
            bays: Vec::new(),
            compatibility: CompatibilityRelation::new(),
            revenue: Vec::new(),
            buffers: Vec::new(),
        }
    }
}

impl<T> ProblemBuilder<T>
where
    T: TimeNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_request<I, O, C>(
        &mut self,
        id: I,
        owner: O,
        type_code: C,
        start: T,
        end: T,
    ) -> &mut Self
    where
        I: Into<RequestId>,
        O: Into<OwnerCode>,
        C: Into<TypeCode>,
    {
        self.requests.push(RawRequest {
            id: id.into(),
            owner: owner.into(),
            type_code: type_code.into(),
            start,
            end,
        });
        self
    }

    pub fn add_bay<B>(&mut self, bay: B) -> &mut Self
    where
        B: Into<BayId>,
    {
        self.bays.push(bay.into());
        self
    }

    pub fn allow<C, B>(&mut self, type_code: C, bay: B) -> &mut Self
    where
        C: Into<TypeCode>,
        B: Into<BayId>,
    {
        self.compatibility.allow(type_code, bay);
        self
    }

    pub fn set_compatibility<C, B>(&mut self, type_code: C, bay: B, compatible: bool) -> &mut Self
    where
        C: Into<TypeCode>,
        B: Into<BayId>,
    {
        self.compatibility.insert(type_code, bay, compatible);
        self
    }

    pub fn set_revenue<O, C, B>(&mut self, owner: O, type_code: C, bay: B, amount: f64) -> &mut Self
    where
        O: Into<OwnerCode>,
        C: Into<TypeCode>,
        B: Into<BayId>,
    {
        self.revenue
            .push((RevenueKey::new(owner, type_code, bay), amount));
        self
    }

    pub fn set_buffer<C>(&mut self, type_code: C, buffer: T) -> &mut Self
    where
        C: Into<TypeCode>,
    {
        self.buffers.push((type_code.into(), buffer));
        self
    }

    /// Validates everything collected so far.
    ///
    /// Checks run in a fixed order: request windows, buffers, revenue
    /// amounts, then the checks of `Problem::new`. The first failure is
    /// returned.
    pub fn build(self) -> Result<Problem<T>, ValidationError<T>> {
        let requests = self
            .requests
            .into_iter()
            .map(|raw| Request::try_new(raw.id, raw.owner, raw.type_code, raw.start, raw.end))
            .collect::<Result<Vec<_>, _>>()?;

        let mut buffers = BufferTable::new();
        for (type_code, buffer) in self.buffers {
            buffers.insert(type_code, buffer)?;
        }

        let mut revenue = RevenueTable::new();
        for (key, amount) in self.revenue {
            revenue.insert(
                key.owner().clone(),
                key.type_code().clone(),
                key.bay().clone(),
                amount,
            )?;
        }

        Problem::new(requests, self.bays, self.compatibility, revenue, buffers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ProblemBuilder<i64> {
        let mut b = ProblemBuilder::new();
        b.add_bay("B1")
            .add_bay("B2")
            .allow("A320", "B1")
            .set_revenue("AI", "A320", "B1", 50.0);
        b
    }

    #[test]
    fn test_build_valid_problem_preserves_order() {
        let mut b = base();
        b.add_request("R2", "AI", "A320", 10, 20)
            .add_request("R1", "AI", "A320", 0, 5);
        let p = b.build().unwrap();

        assert_eq!(p.num_requests(), 2);
        assert_eq!(p.num_bays(), 2);
        assert_eq!(p.request(RequestIndex::new(0)).id().as_str(), "R2");
        assert_eq!(p.bay_index("B2"), Some(BayIndex::new(1)));
        assert_eq!(p.bay_index("B9"), None);
        assert!(p.is_compatible(RequestIndex::new(0), BayIndex::new(0)));
        assert!(!p.is_compatible(RequestIndex::new(0), BayIndex::new(1)));
        assert_eq!(p.revenue(RequestIndex::new(1), BayIndex::new(0)), 50.0);
        assert_eq!(p.revenue(RequestIndex::new(1), BayIndex::new(1)), 0.0);
    }

    #[test]
    fn test_invalid_interval_is_reported() {
        let mut b = base();
        b.add_request("R1", "AI", "A320", 20, 10);
        match b.build() {
            Err(ValidationError::InvalidInterval(e)) => assert_eq!(e.id().as_str(), "R1"),
            other => panic!("expected InvalidInterval, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_buffer_is_reported() {
        let mut b = base();
        b.set_buffer("A320", -3);
        assert!(matches!(b.build(), Err(ValidationError::NegativeBuffer(_))));
    }

    #[test]
    fn test_invalid_revenue_is_reported() {
        let mut b = base();
        b.set_revenue("AI", "A320", "B2", f64::NAN);
        assert!(matches!(b.build(), Err(ValidationError::InvalidRevenue(_))));
    }

    #[test]
    fn test_duplicate_request_is_reported() {
        let mut b = base();
        b.add_request("R1", "AI", "A320", 0, 10)
            .add_request("R1", "BA", "B737", 20, 30);
        match b.build() {
            Err(ValidationError::DuplicateRequest(e)) => assert_eq!(e.id().as_str(), "R1"),
            other => panic!("expected DuplicateRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_bay_is_reported() {
        let mut b = base();
        b.add_bay("B1");
        assert!(matches!(b.build(), Err(ValidationError::DuplicateBay(_))));
    }

    #[test]
    fn test_unknown_bay_in_tables_is_reported() {
        let mut b = base();
        b.allow("A320", "B7").allow("A320", "B5");
        match b.build() {
            Err(ValidationError::UnknownBay(e)) => {
                assert_eq!(e.bay().as_str(), "B5");
                assert_eq!(e.table(), FacilityTable::Compatibility);
            }
            other => panic!("expected UnknownBay, got {:?}", other),
        }

        let mut b = base();
        b.set_revenue("AI", "A320", "B3", 1.0);
        match b.build() {
            Err(ValidationError::UnknownBay(e)) => assert_eq!(e.table(), FacilityTable::Revenue),
            other => panic!("expected UnknownBay, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_problem_is_valid() {
        let p = ProblemBuilder::<i32>::new().build().unwrap();
        assert_eq!(p.num_requests(), 0);
        assert_eq!(p.num_bays(), 0);
        assert_eq!(format!("{}", p), "Problem(requests: 0, bays: 0)");
    }
}
