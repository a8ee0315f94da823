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

//! Most Constrained Request (MRV) branching
//!
//! Branches on the undecided request with the fewest open bays, where an
//! open bay is compatible, earns revenue and fits the current occupancy.
//!
//! Strategy:
//! 1. Count the open bays of every undecided request.
//! 2. Pick the smallest count; ties go to the earlier request in input order.
//! 3. Yield its children so the engine explores them best-first: bays by
//!    descending revenue (ties by bay order), then "leave unassigned".
//!
//! A request with zero open bays gets the single unassigned child, which
//! decides it without branching.

use crate::{
    branching::decision::{Decision, DecisionBuilder},
    state::SearchState,
};
use apron_model::{constraint::ConstraintModel, index::RequestIndex};

/// A decision builder that settles the pickiest request first.
#[derive(Debug, Clone, Default)]
pub struct MostConstrainedBuilder {
    decision_queue: Vec<Decision>,
}

impl MostConstrainedBuilder {
    pub fn new() -> Self {
        Self {
            decision_queue: Vec::new(),
        }
    }

    /// Pre-allocates the queue for a model with `num_bays` bays.
    pub fn preallocated(num_bays: usize) -> Self {
        Self {
            decision_queue: Vec::with_capacity(num_bays + 1),
        }
    }

    fn select_request(model: &ConstraintModel, state: &SearchState) -> Option<RequestIndex> {
        let mut chosen: Option<(usize, RequestIndex)> = None;
        for request in state.undecided_requests() {
            let count = state.open_options(model, request).count();
            if chosen.is_none_or(|(best, _)| count < best) {
                chosen = Some((count, request));
                if count == 0 {
                    break;
                }
            }
        }
        chosen.map(|(_, request)| request)
    }
}

impl DecisionBuilder for MostConstrainedBuilder {
    type DecisionIterator<'a>
        = std::vec::Drain<'a, Decision>
    where
        Self: 'a;

    fn name(&self) -> &str {
        "MostConstrainedBuilder"
    }

    fn next_decision<'a>(
        &'a mut self,
        model: &'a ConstraintModel,
        state: &'a SearchState,
    ) -> Self::DecisionIterator<'a> {
        self.decision_queue.clear();

        let Some(request) = Self::select_request(model, state) else {
            return self.decision_queue.drain(..);
        };

        // The stack pops the last child first, so the queue runs from the
        // least to the most preferred child.
        self.decision_queue.push(Decision::leave_unassigned(request));
        self.decision_queue.extend(
            state
                .open_options(model, request)
                .map(|v| Decision::assign(request, v.bay(), v.revenue())),
        );
        self.decision_queue[1..].sort_by(|a, b| {
            a.revenue_delta()
                .total_cmp(&b.revenue_delta())
                .then_with(|| b.bay().cmp(&a.bay()))
        });

        self.decision_queue.drain(..)
    }
}
