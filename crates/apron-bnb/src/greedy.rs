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

//! Greedy warm start
//!
//! Visits the revenue earning variables by descending revenue (ties by
//! variable order, which is request then bay) and parks every request whose
//! bay is still free of conflicts. The result is always feasible and seeds
//! the incumbent before the first node is expanded.

use crate::{solution::Solution, state::SearchState};
use apron_model::{constraint::ConstraintModel, index::RequestIndex};

/// Completes `state` greedily and returns the resulting solution.
///
/// Decisions already present in `state` are kept. `state` itself is not
/// modified.
///
/// ```rust
/// use apron_bnb::{greedy::greedy_completion, state::SearchState};
/// use apron_model::{constraint::ConstraintModelBuilder, index::{BayIndex, RequestIndex}};
///
/// let mut builder = ConstraintModelBuilder::new(2, 1);
/// builder
///     .add_variable(RequestIndex::new(0), BayIndex::new(0), 10.0)
///     .add_variable(RequestIndex::new(1), BayIndex::new(0), 20.0)
///     .add_conflict(RequestIndex::new(0), RequestIndex::new(1));
/// let model = builder.build();
///
/// let solution = greedy_completion(&model, &SearchState::new(2, 1));
/// assert_eq!(solution.revenue(), 20.0);
/// assert_eq!(solution.assignment().bay_of(RequestIndex::new(0)), None);
/// ```
pub fn greedy_completion(model: &ConstraintModel, state: &SearchState) -> Solution {
    let mut order: Vec<usize> = (0..model.num_variables())
        .filter(|&i| model.variables()[i].revenue() > 0.0)
        .collect();
    let variables = model.variables();
    order.sort_by(|&a, &b| {
        variables[b]
            .revenue()
            .total_cmp(&variables[a].revenue())
            .then(a.cmp(&b))
    });

    let mut scratch = state.clone();
    let mut revenue = scratch.current_revenue();
    for index in order {
        let variable = &variables[index];
        let request: RequestIndex = variable.request();
        if scratch.is_decided(request) || !scratch.can_place(model, request, variable.bay()) {
            continue;
        }
        scratch.assign(request, variable.bay());
        revenue += variable.revenue();
    }

    Solution::new(revenue, scratch.to_assignment())
}
