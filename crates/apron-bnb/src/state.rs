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

//! Mutable search state
//!
//! `SearchState` is the node the branch-and-bound engine works on. It holds
//! one `RequestDecision` per request, one occupancy bitset per bay (bit `r`
//! set iff request `r` is parked there) and the revenue collected so far.
//!
//! A bay can take request `r` iff its occupancy is disjoint from the
//! conflict row of `r` in the `ConstraintModel`. That single bitset test
//! enforces every no-double-booking constraint touching the bay.

use apron_model::{
    assignment::Assignment,
    constraint::{ConstraintModel, Variable},
    index::{BayIndex, RequestIndex},
};
use fixedbitset::FixedBitSet;

/// The decision taken for one request at the current node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestDecision {
    /// Not yet branched on.
    #[default]
    Undecided,
    /// Deliberately left without a bay.
    Unassigned,
    /// Parked on the given bay.
    Assigned(BayIndex),
}

impl RequestDecision {
    #[inline]
    pub fn is_decided(&self) -> bool {
        !matches!(self, RequestDecision::Undecided)
    }

    #[inline]
    pub fn bay(&self) -> Option<BayIndex> {
        match self {
            RequestDecision::Assigned(bay) => Some(*bay),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestDecision::Undecided => write!(f, "Undecided"),
            RequestDecision::Unassigned => write!(f, "Unassigned"),
            RequestDecision::Assigned(bay) => write!(f, "Assigned({})", bay),
        }
    }
}

/// The state of the search at one node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    decisions: Vec<RequestDecision>,
    occupancy: Vec<FixedBitSet>,
    num_decided: usize,
    current_revenue: f64,
}

impl SearchState {
    /// Creates the root state: every request undecided, every bay empty.
    #[inline]
    pub fn new(num_requests: usize, num_bays: usize) -> Self {
        Self {
            decisions: vec![RequestDecision::Undecided; num_requests],
            occupancy: vec![FixedBitSet::with_capacity(num_requests); num_bays],
            num_decided: 0,
            current_revenue: 0.0,
        }
    }

    #[inline]
    pub fn num_requests(&self) -> usize {
        self.decisions.len()
    }

    #[inline]
    pub fn num_bays(&self) -> usize {
        self.occupancy.len()
    }

    #[inline]
    pub fn num_decided(&self) -> usize {
        self.num_decided
    }

    /// Returns `true` once every request carries a decision.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_decided == self.decisions.len()
    }

    #[inline]
    pub fn current_revenue(&self) -> f64 {
        self.current_revenue
    }

    #[inline]
    pub fn set_current_revenue(&mut self, revenue: f64) {
        self.current_revenue = revenue;
    }

    #[inline]
    pub fn decision(&self, request: RequestIndex) -> RequestDecision {
        debug_assert!(
            request.get() < self.decisions.len(),
            "called `SearchState::decision` with request index out of bounds: the len is {} but the index is {}",
            self.decisions.len(),
            request.get()
        );
        self.decisions[request.get()]
    }

    #[inline]
    pub fn is_decided(&self, request: RequestIndex) -> bool {
        self.decision(request).is_decided()
    }

    /// Returns the requests currently parked on `bay` as a bitset.
    #[inline]
    pub fn occupancy(&self, bay: BayIndex) -> &FixedBitSet {
        debug_assert!(
            bay.get() < self.occupancy.len(),
            "called `SearchState::occupancy` with bay index out of bounds: the len is {} but the index is {}",
            self.occupancy.len(),
            bay.get()
        );
        &self.occupancy[bay.get()]
    }

    /// Returns `true` if no request parked on `bay` conflicts with `request`.
    #[inline]
    pub fn can_place(&self, model: &ConstraintModel, request: RequestIndex, bay: BayIndex) -> bool {
        self.occupancy(bay).is_disjoint(model.conflicts(request))
    }

    /// Iterates the variables of `request` that earn revenue and fit the
    /// current occupancy, in bay order.
    #[inline]
    pub fn open_options<'a>(
        &'a self,
        model: &'a ConstraintModel,
        request: RequestIndex,
    ) -> impl Iterator<Item = &'a Variable> + 'a {
        model
            .request_variables(request)
            .iter()
            .filter(move |v| v.revenue() > 0.0 && self.can_place(model, request, v.bay()))
    }

    /// Iterates the requests that still need a decision, in input order.
    #[inline]
    pub fn undecided_requests(&self) -> impl Iterator<Item = RequestIndex> + '_ {
        self.decisions
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.is_decided())
            .map(|(r, _)| RequestIndex::new(r))
    }

    /// Parks `request` on `bay`. Revenue is tracked by the caller.
    #[inline]
    pub fn assign(&mut self, request: RequestIndex, bay: BayIndex) {
        debug_assert!(
            !self.is_decided(request),
            "called `SearchState::assign` with already decided request: {}",
            request
        );
        debug_assert!(
            bay.get() < self.occupancy.len(),
            "called `SearchState::assign` with bay index out of bounds: the len is {} but the index is {}",
            self.occupancy.len(),
            bay.get()
        );
        self.decisions[request.get()] = RequestDecision::Assigned(bay);
        self.occupancy[bay.get()].insert(request.get());
        self.num_decided += 1;
    }

    #[inline]
    pub fn leave_unassigned(&mut self, request: RequestIndex) {
        debug_assert!(
            !self.is_decided(request),
            "called `SearchState::leave_unassigned` with already decided request: {}",
            request
        );
        self.decisions[request.get()] = RequestDecision::Unassigned;
        self.num_decided += 1;
    }

    /// Reverts the decision of `request` back to undecided.
    #[inline]
    pub fn retract(&mut self, request: RequestIndex) {
        debug_assert!(
            self.is_decided(request),
            "called `SearchState::retract` with undecided request: {}",
            request
        );
        match self.decision(request) {
            RequestDecision::Assigned(bay) => {
                self.occupancy[bay.get()].set(request.get(), false);
            }
            RequestDecision::Unassigned => {}
            RequestDecision::Undecided => return,
        }
        self.decisions[request.get()] = RequestDecision::Undecided;
        self.num_decided -= 1;
    }

    /// Clears every decision and occupancy bit, keeping allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.decisions.fill(RequestDecision::Undecided);
        for bits in &mut self.occupancy {
            bits.clear();
        }
        self.num_decided = 0;
        self.current_revenue = 0.0;
    }

    /// Snapshots the state as an `Assignment`; undecided requests stay
    /// unassigned.
    pub fn to_assignment(&self) -> Assignment {
        Assignment::from_vec(self.decisions.iter().map(RequestDecision::bay).collect())
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(decided: {}/{}, revenue: {})",
            self.num_decided,
            self.decisions.len(),
            self.current_revenue
        )
    }
}
