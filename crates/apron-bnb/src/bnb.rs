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

//! Branch-and-bound solver for bay assignment.
//!
//! This module implements a stateful search engine that explores request to
//! bay decisions depth first and prunes every node whose revenue bound
//! cannot beat the incumbent. The `BnbSolver` owns the reusable undo trail
//! and decision stack; a fast `reset` keeps their capacities between runs.
//!
//! Each run is a search session: fixed decisions are applied at the root, a
//! greedy completion seeds the incumbent, and the loop then alternates
//! between descending into the next pending decision and backtracking when
//! a level runs dry. Monitors are consulted once per step and may abort the
//! run, in which case the best solution so far is reported as feasible.
//!
//! The exploration order is fully determined by the decision builder, so
//! repeated solves of the same model return the same assignment.

use crate::{
    bound::RevenueBound,
    branching::decision::{Decision, DecisionBuilder},
    fixed::FixedAssignment,
    greedy,
    incumbent::{IncumbentStore, NoSharedIncumbent, SharedIncumbent, SharedIncumbentAdapter},
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    result::{BnbSolverOutcome, TerminationReason},
    solution::Solution,
    stack::SearchStack,
    state::SearchState,
    stats::BnbSolverStatistics,
    trail::SearchTrail,
};
use apron_core::num::is_revenue_improvement;
use apron_model::constraint::ConstraintModel;

/// A depth-first branch-and-bound solver for the bay assignment model.
///
/// This is only the execution engine. Which request to branch on and in
/// which order its children are tried is decided by a `DecisionBuilder`,
/// and the pruning bound comes from a `RevenueBound`.
///
/// ```rust
/// use apron_bnb::{
///     bnb::BnbSolver, bound::BestChoiceBound, branching::mrv::MostConstrainedBuilder,
///     monitor::no_op::NoOperationMonitor,
/// };
/// use apron_model::{constraint::ConstraintModelBuilder, index::{BayIndex, RequestIndex}};
///
/// let mut builder = ConstraintModelBuilder::new(2, 1);
/// builder
///     .add_variable(RequestIndex::new(0), BayIndex::new(0), 10.0)
///     .add_variable(RequestIndex::new(1), BayIndex::new(0), 20.0);
/// let model = builder.build();
///
/// let mut solver = BnbSolver::new();
/// let outcome = solver.solve(
///     &model,
///     &mut MostConstrainedBuilder::new(),
///     &mut BestChoiceBound::new(),
///     NoOperationMonitor::new(),
/// );
/// assert!(outcome.is_optimal());
/// assert_eq!(outcome.result().solution().map(|s| s.revenue()), Some(30.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct BnbSolver {
    trail: SearchTrail,
    stack: SearchStack,
}

impl BnbSolver {
    #[inline]
    pub fn new() -> Self {
        Self {
            trail: SearchTrail::new(),
            stack: SearchStack::new(),
        }
    }

    /// Creates a solver with storage preallocated for the given model size.
    ///
    /// The solver grows its storage on demand anyway; this only moves the
    /// allocations to construction time.
    #[inline]
    pub fn preallocated(num_requests: usize, num_bays: usize) -> Self {
        Self {
            trail: SearchTrail::preallocated(num_requests),
            stack: SearchStack::preallocated(num_requests, num_bays),
        }
    }

    /// Solves `model` as a standalone, single threaded search.
    #[inline]
    pub fn solve<B, E, S>(
        &mut self,
        model: &ConstraintModel,
        builder: &mut B,
        bound: &mut E,
        monitor: S,
    ) -> BnbSolverOutcome
    where
        B: DecisionBuilder,
        E: RevenueBound,
        S: TreeSearchMonitor,
    {
        self.solve_internal(model, &[], builder, bound, monitor, NoSharedIncumbent::new())
    }

    /// Solves `model` while sharing the best known revenue through
    /// `incumbent`. Nodes that cannot beat the shared revenue are pruned.
    #[inline]
    pub fn solve_with_incumbent<B, E, S>(
        &mut self,
        model: &ConstraintModel,
        builder: &mut B,
        bound: &mut E,
        monitor: S,
        incumbent: &SharedIncumbent,
    ) -> BnbSolverOutcome
    where
        B: DecisionBuilder,
        E: RevenueBound,
        S: TreeSearchMonitor,
    {
        let backing = SharedIncumbentAdapter::new(incumbent);
        self.solve_internal(model, &[], builder, bound, monitor, backing)
    }

    /// Solves `model` with the given decisions pinned at the root.
    #[inline]
    pub fn solve_with_fixed<B, E, S>(
        &mut self,
        model: &ConstraintModel,
        builder: &mut B,
        bound: &mut E,
        monitor: S,
        fixed: &[FixedAssignment],
    ) -> BnbSolverOutcome
    where
        B: DecisionBuilder,
        E: RevenueBound,
        S: TreeSearchMonitor,
    {
        self.solve_internal(model, fixed, builder, bound, monitor, NoSharedIncumbent::new())
    }

    /// Solves `model` with pinned decisions and a shared incumbent. This is
    /// the entry point of the parallel root split.
    #[inline]
    pub fn solve_with_fixed_and_incumbent<B, E, S>(
        &mut self,
        model: &ConstraintModel,
        builder: &mut B,
        bound: &mut E,
        monitor: S,
        fixed: &[FixedAssignment],
        incumbent: &SharedIncumbent,
    ) -> BnbSolverOutcome
    where
        B: DecisionBuilder,
        E: RevenueBound,
        S: TreeSearchMonitor,
    {
        let backing = SharedIncumbentAdapter::new(incumbent);
        self.solve_internal(model, fixed, builder, bound, monitor, backing)
    }

    #[inline(always)]
    fn solve_internal<B, E, S, I>(
        &mut self,
        model: &ConstraintModel,
        fixed: &[FixedAssignment],
        builder: &mut B,
        bound: &mut E,
        mut monitor: S,
        backing: I,
    ) -> BnbSolverOutcome
    where
        B: DecisionBuilder,
        E: RevenueBound,
        S: TreeSearchMonitor,
        I: IncumbentStore,
    {
        let session =
            BnbSolverSearchSession::new(self, model, fixed, builder, bound, &mut monitor, backing);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Clears the trail and the stack without releasing their memory.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.stack.reset();
    }
}

/// The state of a single search run.
struct BnbSolverSearchSession<'a, B, E, S, I> {
    solver: &'a mut BnbSolver,
    model: &'a ConstraintModel,
    fixed: &'a [FixedAssignment],
    builder: &'a mut B,
    bound: &'a mut E,
    monitor: &'a mut S,
    incumbent: I,
    state: SearchState,
    best_revenue: f64,
    best_solution: Option<Solution>,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<B, E, S, I> std::fmt::Display for BnbSolverSearchSession<'_, B, E, S, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let solution = match &self.best_solution {
            Some(sol) => format!("Solution(revenue: {})", sol.revenue()),
            None => "No solution found".to_string(),
        };
        write!(
            f,
            "SearchSession(best_revenue: {}, best_solution: {}, state: {})",
            self.best_revenue, solution, self.state
        )
    }
}

impl<'a, B, E, S, I> BnbSolverSearchSession<'a, B, E, S, I>
where
    B: DecisionBuilder,
    E: RevenueBound,
    S: TreeSearchMonitor,
    I: IncumbentStore,
{
    #[inline]
    fn new(
        solver: &'a mut BnbSolver,
        model: &'a ConstraintModel,
        fixed: &'a [FixedAssignment],
        builder: &'a mut B,
        bound: &'a mut E,
        monitor: &'a mut S,
        incumbent: I,
    ) -> Self {
        let state = SearchState::new(model.num_requests(), model.num_bays());
        let best_revenue = incumbent.initial_lower_bound();

        Self {
            solver,
            model,
            fixed,
            builder,
            bound,
            monitor,
            incumbent,
            state,
            best_revenue,
            best_solution: None,
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> BnbSolverOutcome {
        tracing::debug!(
            builder = self.builder.name(),
            bound = self.bound.name(),
            monitor = self.monitor.name(),
            fixed = self.fixed.len(),
            "starting branch-and-bound"
        );
        self.monitor.on_enter_search(self.model, &self.stats);

        if !self.initialize() {
            self.stats.on_pruning_infeasible();
            self.stats.set_total_time(self.start_time.elapsed());
            self.monitor.on_exit_search(&self.stats);
            return self.finalize_result(TerminationReason::InfeasibilityProven);
        }

        let termination_reason = loop {
            self.best_revenue = self.incumbent.tighten(self.best_revenue);
            self.monitor.on_step(&self.state, &self.stats);
            self.stats.on_step();

            if let SearchCommand::Terminate(reason) =
                self.monitor.search_command(&self.state, &self.stats)
            {
                break TerminationReason::Aborted(reason);
            }

            if self.solver.stack.is_current_level_empty() {
                if self.solver.stack.depth() <= 1 {
                    break if self.best_solution.is_some() {
                        TerminationReason::OptimalityProven
                    } else {
                        TerminationReason::InfeasibilityProven
                    };
                }
                self.backtrack_step();
            } else {
                self.process_next_decision();
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        tracing::debug!(
            reason = %termination_reason,
            nodes = self.stats.nodes_explored,
            best_revenue = self.best_revenue,
            "branch-and-bound finished"
        );
        self.finalize_result(termination_reason)
    }

    fn finalize_result(self, reason: TerminationReason) -> BnbSolverOutcome {
        match reason {
            TerminationReason::OptimalityProven => match self.best_solution {
                Some(solution) => BnbSolverOutcome::optimal(solution, self.stats),
                None => BnbSolverOutcome::infeasible(self.stats),
            },
            TerminationReason::InfeasibilityProven => BnbSolverOutcome::infeasible(self.stats),
            TerminationReason::Aborted(reason) => {
                BnbSolverOutcome::aborted(self.best_solution, reason, self.stats)
            }
        }
    }

    /// Validates the model, applies the fixed decisions, installs the warm
    /// start and pushes the root frame with its children.
    ///
    /// Returns `false` if the model is malformed or a fixed decision cannot
    /// be applied.
    fn initialize(&mut self) -> bool {
        if let Err(error) = self.model.check_structure() {
            tracing::warn!(%error, "constraint model is malformed");
            return false;
        }

        self.solver.trail.ensure_capacity(self.model.num_requests());
        self.solver
            .stack
            .ensure_capacity(self.model.num_requests(), self.model.num_bays());

        for fixed in self.fixed {
            if !self.apply_fixed(fixed) {
                tracing::debug!(%fixed, "fixed decision cannot be applied");
                return false;
            }
        }

        self.install_warm_start();

        // Root frame. Must exist before any decision is pushed.
        self.solver.trail.push_frame();
        self.solver.stack.push_frame();
        self.stats.on_node_explored();

        let remaining = self
            .bound
            .estimate_remaining_revenue(self.model, &self.state);
        self.stats
            .set_root_upper_bound(self.state.current_revenue() + remaining);

        if self.state.is_complete() {
            let revenue = self.state.current_revenue();
            self.handle_complete_solution(revenue);
            return true;
        }

        self.should_backtrack_after_expand();
        true
    }

    fn apply_fixed(&mut self, fixed: &FixedAssignment) -> bool {
        let request = fixed.request_index;
        if request.get() >= self.model.num_requests() || self.state.is_decided(request) {
            return false;
        }

        match fixed.bay_index {
            Some(bay) => {
                if bay.get() >= self.model.num_bays() {
                    return false;
                }
                let Some(decision) = Decision::try_assign(request, bay, self.model, &self.state)
                else {
                    return false;
                };
                self.state.assign(request, bay);
                let revenue = self.state.current_revenue() + decision.revenue_delta();
                self.state.set_current_revenue(revenue);
            }
            None => self.state.leave_unassigned(request),
        }
        true
    }

    /// Seeds the session with the greedy completion of the root state.
    ///
    /// The completion is always kept as the local fallback solution; it is
    /// only published when it beats the incumbent.
    fn install_warm_start(&mut self) {
        let warm = greedy::greedy_completion(self.model, &self.state);
        if is_revenue_improvement(warm.revenue(), self.best_revenue) {
            self.best_revenue = warm.revenue();
            self.incumbent.on_solution_found(&warm);
            self.stats.on_solution_found();
            self.monitor.on_solution_found(&warm, &self.stats);
        }
        tracing::trace!(revenue = warm.revenue(), "greedy warm start");
        self.best_solution = Some(warm);
    }

    #[inline]
    fn backtrack_step(&mut self) {
        self.stats.on_backtrack();
        self.monitor.on_backtrack(&self.state, &self.stats);

        self.solver.trail.backtrack(&mut self.state);
        self.solver.stack.pop_frame();
    }

    #[inline(always)]
    fn process_next_decision(&mut self) {
        let Some(decision) = self.solver.stack.pop() else {
            return;
        };

        debug_assert!(
            !self.state.is_decided(decision.request()),
            "called `BnbSolverSearchSession::process_next_decision` with already decided request: {}",
            decision.request()
        );
        debug_assert!(
            decision
                .bay()
                .is_none_or(|bay| self.state.can_place(self.model, decision.request(), bay)),
            "called `BnbSolverSearchSession::process_next_decision` with a stale decision: {}",
            decision
        );

        self.descend(decision);
    }

    /// Applies `decision` on a fresh frame and either records a leaf or
    /// expands the new node.
    #[inline(always)]
    fn descend(&mut self, decision: Decision) {
        self.solver.trail.push_frame();
        self.solver.trail.apply_decision(&mut self.state, &decision);
        self.solver.stack.push_frame();

        self.stats.on_node_explored();
        self.stats.on_depth_update(self.solver.stack.depth() as u64);
        self.monitor.on_descend(&self.state, decision, &self.stats);

        if self.state.is_complete() {
            let revenue = self.state.current_revenue();
            self.handle_complete_solution(revenue);
            return;
        }

        if self.should_backtrack_after_expand() {
            self.backtrack_step();
        }
    }

    #[inline(always)]
    fn handle_complete_solution(&mut self, revenue: f64) {
        if is_revenue_improvement(revenue, self.best_revenue) {
            let solution = Solution::new(revenue, self.state.to_assignment());
            self.best_revenue = revenue;
            self.incumbent.on_solution_found(&solution);
            self.stats.on_solution_found();
            self.monitor.on_solution_found(&solution, &self.stats);
            tracing::trace!(revenue, nodes = self.stats.nodes_explored, "improving solution");
            self.best_solution = Some(solution);
        } else {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
        }
    }

    /// Bounds the current node and enqueues its children if it survives.
    /// Returns `true` if the node is finished and the caller should
    /// backtrack.
    #[inline(always)]
    fn should_backtrack_after_expand(&mut self) -> bool {
        let remaining = self
            .bound
            .estimate_remaining_revenue(self.model, &self.state);
        let current = self.state.current_revenue();
        let node_bound = current + remaining;

        self.monitor
            .on_upper_bound_computed(&self.state, node_bound, remaining, &self.stats);

        if !is_revenue_improvement(node_bound, self.best_revenue) {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return true;
        }

        // No undecided request has an open bay left, so leaving all of them
        // unassigned is the only completion.
        if remaining <= 0.0 {
            self.handle_complete_solution(current);
            return true;
        }

        let decisions = self.builder.next_decision(self.model, &self.state);
        let count_before = self.solver.stack.num_entries();
        self.solver.stack.extend(decisions);
        let added = self.solver.stack.num_entries() - count_before;

        self.stats.on_decisions_generated(added as u64);
        self.monitor
            .on_decisions_enqueued(&self.state, added, &self.stats);

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bound::BestChoiceBound,
        branching::mrv::MostConstrainedBuilder,
        monitor::{
            composite::CompositeTreeSearchMonitor, log::LogTreeSearchMonitor,
            no_op::NoOperationMonitor, node_limit::NodeLimitMonitor, time::TimeLimitMonitor,
        },
        result::{AbortReason, SolverResult},
    };
    use apron_model::{
        assignment::Assignment,
        constraint::ConstraintModelBuilder,
        index::{BayIndex, RequestIndex},
    };
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    fn r(i: usize) -> RequestIndex {
        RequestIndex::new(i)
    }

    fn b(i: usize) -> BayIndex {
        BayIndex::new(i)
    }

    fn solve(model: &ConstraintModel) -> BnbSolverOutcome {
        BnbSolver::new().solve(
            model,
            &mut MostConstrainedBuilder::new(),
            &mut BestChoiceBound::new(),
            NoOperationMonitor::new(),
        )
    }

    fn revenue_of(outcome: &BnbSolverOutcome) -> f64 {
        outcome
            .result()
            .solution()
            .map(|s| s.revenue())
            .unwrap_or(f64::NAN)
    }

    /// `n` requests, revenue `revenue(i)` on every bay, all pairwise in
    /// conflict.
    fn clique(n: usize, bays: usize, revenue: impl Fn(usize) -> f64) -> ConstraintModel {
        let mut mb = ConstraintModelBuilder::new(n, bays);
        for i in 0..n {
            for k in 0..bays {
                mb.add_variable(r(i), b(k), revenue(i));
            }
            for j in (i + 1)..n {
                mb.add_conflict(r(i), r(j));
            }
        }
        mb.build()
    }

    /// Enumerates every assignment; only usable for tiny models.
    fn brute_force(model: &ConstraintModel) -> f64 {
        fn go(model: &ConstraintModel, request: usize, current: &mut Assignment, best: &mut f64) {
            if request == model.num_requests() {
                if let Some(value) = model
                    .objective_value(current)
                    .filter(|_| model.is_feasible(current))
                {
                    *best = best.max(value);
                }
                return;
            }
            go(model, request + 1, current, best);
            for v in model.request_variables(r(request)) {
                current.assign(r(request), v.bay());
                go(model, request + 1, current, best);
                current.unassign(r(request));
            }
        }
        let mut best = f64::NEG_INFINITY;
        go(model, 0, &mut Assignment::unassigned(model.num_requests()), &mut best);
        best
    }

    fn random_model(rng: &mut ChaCha8Rng) -> ConstraintModel {
        let n = rng.random_range(0..8);
        let bays = rng.random_range(1..4);
        let mut mb = ConstraintModelBuilder::new(n, bays);
        for i in 0..n {
            for k in 0..bays {
                if rng.random_bool(0.7) {
                    let revenue = if rng.random_bool(0.1) {
                        0.0
                    } else {
                        rng.random_range(1..100) as f64
                    };
                    mb.add_variable(r(i), b(k), revenue);
                }
            }
            for j in (i + 1)..n {
                if rng.random_bool(0.4) {
                    mb.add_conflict(r(i), r(j));
                }
            }
        }
        mb.build()
    }

    #[test]
    fn test_disjoint_requests_share_one_bay() {
        let mut mb = ConstraintModelBuilder::new(2, 1);
        mb.add_variable(r(0), b(0), 10.0).add_variable(r(1), b(0), 20.0);
        let outcome = solve(&mb.build());

        assert!(outcome.is_optimal());
        assert_eq!(revenue_of(&outcome), 30.0);
    }

    #[test]
    fn test_identical_windows_keep_higher_revenue() {
        let model = clique(2, 1, |i| if i == 0 { 10.0 } else { 20.0 });
        let outcome = solve(&model);

        assert!(outcome.is_optimal());
        let solution = outcome.result().solution().unwrap();
        assert_eq!(solution.revenue(), 20.0);
        assert_eq!(solution.assignment().bay_of(r(1)), Some(b(0)));
        assert_eq!(solution.assignment().bay_of(r(0)), None);
    }

    #[test]
    fn test_no_compatible_bay_is_optimal_with_zero() {
        let model = ConstraintModelBuilder::new(1, 1).build();
        let outcome = solve(&model);

        assert!(outcome.is_optimal());
        assert_eq!(revenue_of(&outcome), 0.0);
        assert_eq!(outcome.result().solution().unwrap().assignment().num_assigned(), 0);
    }

    #[test]
    fn test_three_overlapping_on_two_bays() {
        let model = clique(3, 2, |i| 10.0 * (i + 1) as f64);
        let outcome = solve(&model);

        assert!(outcome.is_optimal());
        assert_eq!(revenue_of(&outcome), 50.0);
        let assignment = outcome.result().solution().unwrap().assignment().clone();
        assert!(model.is_feasible(&assignment));
        assert_eq!(assignment.bay_of(r(0)), None);
    }

    #[test]
    fn test_empty_model_is_optimal() {
        let model = ConstraintModelBuilder::new(0, 0).build();
        let outcome = solve(&model);
        assert!(outcome.is_optimal());
        assert_eq!(revenue_of(&outcome), 0.0);
    }

    #[test]
    fn test_search_beats_greedy() {
        // Greedy takes r0 on b0 (30) and blocks r1 and r2 (20 each) which
        // would fit b0 together.
        let mut mb = ConstraintModelBuilder::new(3, 1);
        mb.add_variable(r(0), b(0), 30.0)
            .add_variable(r(1), b(0), 20.0)
            .add_variable(r(2), b(0), 20.0)
            .add_conflict(r(0), r(1))
            .add_conflict(r(0), r(2));
        let model = mb.build();

        let warm = greedy::greedy_completion(&model, &SearchState::new(3, 1));
        assert_eq!(warm.revenue(), 30.0);

        let outcome = solve(&model);
        assert!(outcome.is_optimal());
        assert_eq!(revenue_of(&outcome), 40.0);
        assert!(outcome.statistics().solutions_found >= 2);
    }

    #[test]
    fn test_brute_force_skips_conflicting_assignments() {
        // Both requests on the single bay would earn 30 but they conflict.
        let model = clique(2, 1, |i| if i == 0 { 10.0 } else { 20.0 });
        assert_eq!(brute_force(&model), 20.0);

        let mut both = Assignment::unassigned(2);
        both.assign(r(0), b(0));
        both.assign(r(1), b(0));
        assert!(!model.is_feasible(&both));
    }

    #[test]
    fn test_matches_brute_force_on_random_models() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xa9_20_17);
        let mut solver = BnbSolver::new();
        for round in 0..150 {
            let model = random_model(&mut rng);
            let outcome = solver.solve(
                &model,
                &mut MostConstrainedBuilder::new(),
                &mut BestChoiceBound::new(),
                NoOperationMonitor::new(),
            );
            assert!(outcome.is_optimal(), "round {} not optimal", round);

            let solution = outcome.result().solution().unwrap();
            assert!(model.is_feasible(solution.assignment()), "round {}", round);
            assert_eq!(
                model.objective_value(solution.assignment()),
                Some(solution.revenue()),
                "round {}",
                round
            );
            assert_eq!(solution.revenue(), brute_force(&model), "round {}", round);
        }
    }

    #[test]
    fn test_repeated_solves_are_identical() {
        let model = clique(5, 2, |i| ((i * 7) % 5 + 1) as f64);
        let mut solver = BnbSolver::preallocated(5, 2);
        let mut builder = MostConstrainedBuilder::preallocated(2);
        let mut bound = BestChoiceBound::new();

        let first = solver.solve(&model, &mut builder, &mut bound, NoOperationMonitor::new());
        let second = solver.solve(&model, &mut builder, &mut bound, NoOperationMonitor::new());
        assert_eq!(first.result(), second.result());
        assert_eq!(
            first.statistics().nodes_explored,
            second.statistics().nodes_explored
        );
    }

    #[test]
    fn test_zero_time_limit_reports_warm_start() {
        let model = clique(6, 2, |i| (i + 1) as f64);
        let outcome = BnbSolver::new().solve(
            &model,
            &mut MostConstrainedBuilder::new(),
            &mut BestChoiceBound::new(),
            TimeLimitMonitor::new(Duration::ZERO, 1024),
        );

        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted(AbortReason::TimeLimit(Duration::ZERO))
        );
        let SolverResult::Feasible(solution) = outcome.result() else {
            panic!("expected the greedy solution, got {}", outcome.result());
        };
        assert!(model.is_feasible(solution.assignment()));
        assert_eq!(solution.revenue(), 11.0);
        assert_eq!(outcome.statistics().nodes_explored, 1);
    }

    #[test]
    fn test_node_limit_aborts_with_feasible_solution() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut mb = ConstraintModelBuilder::new(30, 3);
        for i in 0..30 {
            for k in 0..3 {
                mb.add_variable(r(i), b(k), rng.random_range(1..50) as f64);
            }
            for j in (i + 1)..30 {
                if rng.random_bool(0.3) {
                    mb.add_conflict(r(i), r(j));
                }
            }
        }
        let model = mb.build();

        let outcome = BnbSolver::new().solve(
            &model,
            &mut MostConstrainedBuilder::new(),
            &mut BestChoiceBound::new(),
            NodeLimitMonitor::new(5),
        );
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted(AbortReason::NodeLimit(5))
        );
        let solution = outcome.result().solution().unwrap();
        assert!(model.is_feasible(solution.assignment()));
    }

    #[test]
    fn test_fixed_decisions_are_respected() {
        let model = clique(2, 1, |i| if i == 0 { 10.0 } else { 20.0 });
        let fixed = [FixedAssignment::assigned(r(0), b(0))];
        let outcome = BnbSolver::new().solve_with_fixed(
            &model,
            &mut MostConstrainedBuilder::new(),
            &mut BestChoiceBound::new(),
            NoOperationMonitor::new(),
            &fixed,
        );

        assert!(outcome.is_optimal());
        let solution = outcome.result().solution().unwrap();
        assert_eq!(solution.revenue(), 10.0);
        assert_eq!(solution.assignment().bay_of(r(0)), Some(b(0)));
        assert_eq!(solution.assignment().bay_of(r(1)), None);
    }

    #[test]
    fn test_fixed_unassigned_and_complete_fixing() {
        let model = clique(2, 1, |i| if i == 0 { 10.0 } else { 20.0 });
        let fixed = [
            FixedAssignment::unassigned(r(1)),
            FixedAssignment::assigned(r(0), b(0)),
        ];
        let outcome = BnbSolver::new().solve_with_fixed(
            &model,
            &mut MostConstrainedBuilder::new(),
            &mut BestChoiceBound::new(),
            NoOperationMonitor::new(),
            &fixed,
        );
        assert!(outcome.is_optimal());
        assert_eq!(revenue_of(&outcome), 10.0);
    }

    #[test]
    fn test_clashing_fixed_decisions_are_infeasible() {
        let model = clique(2, 1, |_| 1.0);
        let fixed = [
            FixedAssignment::assigned(r(0), b(0)),
            FixedAssignment::assigned(r(1), b(0)),
        ];
        let outcome = BnbSolver::new().solve_with_fixed(
            &model,
            &mut MostConstrainedBuilder::new(),
            &mut BestChoiceBound::new(),
            NoOperationMonitor::new(),
            &fixed,
        );
        assert_eq!(outcome.result(), &SolverResult::Infeasible);
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::InfeasibilityProven
        );
    }

    #[test]
    fn test_malformed_model_is_infeasible() {
        let mut mb = ConstraintModelBuilder::new(1, 1);
        mb.add_variable(r(0), b(3), 5.0);
        let outcome = solve(&mb.build());
        assert_eq!(outcome.result(), &SolverResult::Infeasible);
    }

    #[test]
    fn test_shared_incumbent_receives_best_solution() {
        let model = clique(3, 2, |i| 10.0 * (i + 1) as f64);
        let shared = SharedIncumbent::new();
        let outcome = BnbSolver::new().solve_with_incumbent(
            &model,
            &mut MostConstrainedBuilder::new(),
            &mut BestChoiceBound::new(),
            NoOperationMonitor::new(),
            &shared,
        );
        assert!(outcome.is_optimal());
        assert_eq!(shared.lower_bound(), 50.0);
        assert_eq!(shared.snapshot().map(|s| s.revenue()), Some(50.0));
    }

    #[test]
    fn test_better_shared_incumbent_prunes_the_root() {
        let model = clique(3, 2, |i| 10.0 * (i + 1) as f64);
        let shared = SharedIncumbent::new();
        shared.try_install(&Solution::new(1_000.0, Assignment::unassigned(3)));

        let outcome = BnbSolver::new().solve_with_incumbent(
            &model,
            &mut MostConstrainedBuilder::new(),
            &mut BestChoiceBound::new(),
            NoOperationMonitor::new(),
            &shared,
        );
        assert!(outcome.is_optimal());
        assert_eq!(outcome.statistics().nodes_explored, 1);
        assert_eq!(shared.lower_bound(), 1_000.0);
    }

    #[test]
    fn test_composite_with_log_monitor_does_not_change_result() {
        let model = clique(4, 2, |i| (i * 3 + 1) as f64);
        let plain = solve(&model);

        let mut composite = CompositeTreeSearchMonitor::new();
        composite.add_monitor(LogTreeSearchMonitor::new(Duration::ZERO, 0));
        composite.add_monitor(TimeLimitMonitor::new(Duration::from_secs(60), 1));
        let logged = BnbSolver::new().solve(
            &model,
            &mut MostConstrainedBuilder::new(),
            &mut BestChoiceBound::new(),
            composite,
        );
        assert_eq!(plain.result(), logged.result());
    }

    #[test]
    fn test_statistics_are_coherent() {
        let model = clique(5, 2, |i| (i + 1) as f64);
        let outcome = solve(&model);
        let stats = outcome.statistics();

        assert!(stats.nodes_explored >= 1);
        assert!(stats.steps >= stats.nodes_explored - 1);
        assert!(stats.max_depth <= model.num_requests() as u64 + 1);
        assert!(stats.root_upper_bound >= revenue_of(&outcome));
    }
}
