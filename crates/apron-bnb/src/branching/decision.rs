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

use crate::state::SearchState;
use apron_model::{
    constraint::ConstraintModel,
    index::{BayIndex, RequestIndex},
};
use std::iter::FusedIterator;

/// A branching decision: park a request on a bay, or leave it unassigned,
/// together with the revenue the move adds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decision {
    revenue_delta: f64,
    request: RequestIndex,
    bay: Option<BayIndex>,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.bay {
            Some(bay) => write!(
                f,
                "Decision(request: {}, bay: {}, revenue_delta: {})",
                self.request, bay, self.revenue_delta
            ),
            None => write!(f, "Decision(request: {}, unassigned)", self.request),
        }
    }
}

impl Decision {
    /// Creates an assignment decision without checking it against a state.
    #[inline]
    pub const fn assign(request: RequestIndex, bay: BayIndex, revenue_delta: f64) -> Self {
        Self {
            revenue_delta,
            request,
            bay: Some(bay),
        }
    }

    /// Creates the decision that leaves `request` without a bay.
    #[inline]
    pub const fn leave_unassigned(request: RequestIndex) -> Self {
        Self {
            revenue_delta: 0.0,
            request,
            bay: None,
        }
    }

    /// Tries to create a decision parking `request` on `bay` at `state`.
    ///
    /// Returns `None` if the request is already decided, the pair has no
    /// variable in the model (incompatible), or the bay holds a conflicting
    /// request.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `request` or `bay` is out of bounds.
    pub fn try_assign(
        request: RequestIndex,
        bay: BayIndex,
        model: &ConstraintModel,
        state: &SearchState,
    ) -> Option<Self> {
        debug_assert!(
            request.get() < model.num_requests(),
            "called `Decision::try_assign` with request index out of bounds: the len is {} but the index is {}",
            model.num_requests(),
            request.get()
        );
        debug_assert!(
            bay.get() < model.num_bays(),
            "called `Decision::try_assign` with bay index out of bounds: the len is {} but the index is {}",
            model.num_bays(),
            bay.get()
        );

        if state.is_decided(request) {
            return None;
        }
        let variable = model.variable(model.variable_for(request, bay)?);
        if !state.can_place(model, request, bay) {
            return None;
        }
        Some(Self::assign(request, bay, variable.revenue()))
    }

    #[inline(always)]
    pub const fn request(&self) -> RequestIndex {
        self.request
    }

    /// The bay, or `None` for the unassigned child.
    #[inline(always)]
    pub const fn bay(&self) -> Option<BayIndex> {
        self.bay
    }

    #[inline(always)]
    pub const fn revenue_delta(&self) -> f64 {
        self.revenue_delta
    }

    #[inline(always)]
    pub const fn is_assignment(&self) -> bool {
        self.bay.is_some()
    }
}

/// Generates the children of a search node.
///
/// The engine pushes the yielded decisions onto a LIFO stack, so the child
/// yielded last is explored first.
pub trait DecisionBuilder {
    type DecisionIterator<'a>: Iterator<Item = Decision> + FusedIterator + 'a
    where
        Self: 'a;

    fn name(&self) -> &str;

    fn next_decision<'a>(
        &'a mut self,
        model: &'a ConstraintModel,
        state: &'a SearchState,
    ) -> Self::DecisionIterator<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::constraint::ConstraintModelBuilder;

    fn r(i: usize) -> RequestIndex {
        RequestIndex::new(i)
    }

    fn b(i: usize) -> BayIndex {
        BayIndex::new(i)
    }

    fn model() -> ConstraintModel {
        let mut builder = ConstraintModelBuilder::new(2, 2);
        builder
            .add_variable(r(0), b(0), 10.0)
            .add_variable(r(1), b(0), 20.0)
            .add_variable(r(1), b(1), 15.0)
            .add_conflict(r(0), r(1));
        builder.build()
    }

    #[test]
    fn test_try_assign_reads_revenue_from_model() {
        let m = model();
        let s = SearchState::new(2, 2);
        let d = Decision::try_assign(r(1), b(1), &m, &s).unwrap();
        assert_eq!(d.request(), r(1));
        assert_eq!(d.bay(), Some(b(1)));
        assert_eq!(d.revenue_delta(), 15.0);
        assert!(d.is_assignment());
    }

    #[test]
    fn test_try_assign_rejects_incompatible_pair() {
        let m = model();
        let s = SearchState::new(2, 2);
        assert_eq!(Decision::try_assign(r(0), b(1), &m, &s), None);
    }

    #[test]
    fn test_try_assign_rejects_conflict_and_decided_request() {
        let m = model();
        let mut s = SearchState::new(2, 2);
        s.assign(r(0), b(0));
        assert_eq!(Decision::try_assign(r(1), b(0), &m, &s), None);
        assert!(Decision::try_assign(r(1), b(1), &m, &s).is_some());
        assert_eq!(Decision::try_assign(r(0), b(0), &m, &s), None);
    }

    #[test]
    fn test_display() {
        let d = Decision::assign(r(0), b(1), 12.5);
        assert_eq!(
            format!("{}", d),
            "Decision(request: RequestIndex(0), bay: BayIndex(1), revenue_delta: 12.5)"
        );
        assert_eq!(
            format!("{}", Decision::leave_unassigned(r(3))),
            "Decision(request: RequestIndex(3), unassigned)"
        );
    }
}
