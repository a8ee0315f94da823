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

//! Revenue upper bounds
//!
//! A `RevenueBound` estimates how much revenue the undecided requests can
//! still add at a node. The engine prunes a node when `current revenue +
//! estimate` does not strictly beat the incumbent, so an estimate must never
//! undershoot what the subtree can actually reach.

use crate::state::SearchState;
use apron_model::constraint::ConstraintModel;

/// Admissible estimate of the revenue still obtainable below a node.
pub trait RevenueBound {
    /// Returns the name of the bound.
    fn name(&self) -> &str;

    /// Returns an upper bound on the revenue the undecided requests of
    /// `state` can add.
    fn estimate_remaining_revenue(&mut self, model: &ConstraintModel, state: &SearchState) -> f64;
}

/// Sums the best open revenue of every undecided request.
///
/// Each request takes at most one bay and occupancy only grows deeper in the
/// tree, so no completion can earn more than this sum. The bound ignores
/// conflicts among the undecided requests themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestChoiceBound;

impl BestChoiceBound {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl RevenueBound for BestChoiceBound {
    fn name(&self) -> &str {
        "BestChoiceBound"
    }

    fn estimate_remaining_revenue(&mut self, model: &ConstraintModel, state: &SearchState) -> f64 {
        state
            .undecided_requests()
            .map(|request| {
                state
                    .open_options(model, request)
                    .map(|v| v.revenue())
                    .fold(0.0, f64::max)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::{
        constraint::ConstraintModelBuilder,
        index::{BayIndex, RequestIndex},
    };

    fn r(i: usize) -> RequestIndex {
        RequestIndex::new(i)
    }

    fn b(i: usize) -> BayIndex {
        BayIndex::new(i)
    }

    #[test]
    fn test_root_bound_sums_best_bay_per_request() {
        let mut mb = ConstraintModelBuilder::new(2, 2);
        mb.add_variable(r(0), b(0), 10.0)
            .add_variable(r(0), b(1), 30.0)
            .add_variable(r(1), b(0), 20.0)
            .add_conflict(r(0), r(1));
        let m = mb.build();
        let s = SearchState::new(2, 2);

        let mut bound = BestChoiceBound::new();
        assert_eq!(bound.estimate_remaining_revenue(&m, &s), 50.0);
        assert_eq!(bound.name(), "BestChoiceBound");
    }

    #[test]
    fn test_bound_shrinks_with_occupancy() {
        let mut mb = ConstraintModelBuilder::new(3, 1);
        mb.add_variable(r(0), b(0), 10.0)
            .add_variable(r(1), b(0), 20.0)
            .add_variable(r(2), b(0), 5.0)
            .add_conflict(r(0), r(1));
        let m = mb.build();
        let mut s = SearchState::new(3, 1);
        s.assign(r(0), b(0));

        // r1 is blocked, r2 still fits.
        let mut bound = BestChoiceBound;
        assert_eq!(bound.estimate_remaining_revenue(&m, &s), 5.0);
    }

    #[test]
    fn test_complete_state_has_nothing_left() {
        let mut mb = ConstraintModelBuilder::new(1, 1);
        mb.add_variable(r(0), b(0), 10.0);
        let m = mb.build();
        let mut s = SearchState::new(1, 1);
        s.leave_unassigned(r(0));
        assert_eq!(BestChoiceBound.estimate_remaining_revenue(&m, &s), 0.0);
    }
}
