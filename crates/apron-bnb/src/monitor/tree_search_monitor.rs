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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait, `PruneReason` and
//! `SearchCommand`. Callbacks follow the engine lifecycle and a monitor can
//! stop the run by answering `search_command` with `Terminate`.
//!
//! Lifecycle
//! - enter -> step -> {bound/prune | decisions/descend/backtrack} -> solution -> exit
//! - `BnbSolverStatistics` is passed to every callback.
//!
//! Only `name`, `on_enter_search` and `on_exit_search` are required; every
//! other callback defaults to doing nothing.

use crate::{
    branching::decision::Decision, result::AbortReason, solution::Solution, state::SearchState,
    stats::BnbSolverStatistics,
};
use apron_model::constraint::ConstraintModel;

/// Reasons for pruning a search node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The node cannot be completed.
    Infeasible,
    /// The node cannot beat the incumbent.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// The answer of a monitor to "may the search go on?".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(AbortReason),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate({})", reason),
        }
    }
}

/// Trait for observing and controlling the branch-and-bound search.
pub trait TreeSearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, model: &ConstraintModel, statistics: &BnbSolverStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);
    /// Called once per loop iteration to decide whether to go on.
    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called at each step of the search.
    fn on_step(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {}
    /// Called when a node's revenue bound is computed. `upper_bound` is the
    /// node bound, `estimated_remaining` the part contributed by the
    /// undecided requests.
    fn on_upper_bound_computed(
        &mut self,
        _state: &SearchState,
        _upper_bound: f64,
        _estimated_remaining: f64,
        _statistics: &BnbSolverStatistics,
    ) {
    }
    /// Called when a node is pruned.
    fn on_prune(
        &mut self,
        _state: &SearchState,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }
    /// Called when children are enqueued for exploration.
    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState,
        _count: usize,
        _statistics: &BnbSolverStatistics,
    ) {
    }
    /// Called after descending into a child.
    fn on_descend(
        &mut self,
        _state: &SearchState,
        _decision: Decision,
        _statistics: &BnbSolverStatistics,
    ) {
    }
    /// Called before backtracking to the parent.
    fn on_backtrack(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {}
    /// Called when an improving solution is found.
    fn on_solution_found(&mut self, _solution: &Solution, _statistics: &BnbSolverStatistics) {}
}

impl std::fmt::Debug for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<M> TreeSearchMonitor for &mut M
where
    M: TreeSearchMonitor + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, model: &ConstraintModel, statistics: &BnbSolverStatistics) {
        (**self).on_enter_search(model, statistics)
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        (**self).on_exit_search(statistics)
    }

    fn search_command(
        &mut self,
        state: &SearchState,
        statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        (**self).search_command(state, statistics)
    }

    fn on_step(&mut self, state: &SearchState, statistics: &BnbSolverStatistics) {
        (**self).on_step(state, statistics)
    }

    fn on_upper_bound_computed(
        &mut self,
        state: &SearchState,
        upper_bound: f64,
        estimated_remaining: f64,
        statistics: &BnbSolverStatistics,
    ) {
        (**self).on_upper_bound_computed(state, upper_bound, estimated_remaining, statistics)
    }

    fn on_prune(&mut self, state: &SearchState, reason: PruneReason, statistics: &BnbSolverStatistics) {
        (**self).on_prune(state, reason, statistics)
    }

    fn on_decisions_enqueued(
        &mut self,
        state: &SearchState,
        count: usize,
        statistics: &BnbSolverStatistics,
    ) {
        (**self).on_decisions_enqueued(state, count, statistics)
    }

    fn on_descend(&mut self, state: &SearchState, decision: Decision, statistics: &BnbSolverStatistics) {
        (**self).on_descend(state, decision, statistics)
    }

    fn on_backtrack(&mut self, state: &SearchState, statistics: &BnbSolverStatistics) {
        (**self).on_backtrack(state, statistics)
    }

    fn on_solution_found(&mut self, solution: &Solution, statistics: &BnbSolverStatistics) {
        (**self).on_solution_found(solution, statistics)
    }
}
