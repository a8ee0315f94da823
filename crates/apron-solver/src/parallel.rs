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

//! Parallel root split
//!
//! The children of the root branching decision partition the search space.
//! `solve_parallel` hands them to a pool of scoped worker threads. Each
//! worker pulls the next child from an atomic cursor and runs an
//! independent branch-and-bound with that child fixed. All workers prune
//! against one `SharedIncumbent`.
//!
//! The reduction keeps the highest revenue (ties go to the earlier child)
//! and only reports optimality when every subtree was exhausted. A time
//! limit in any subtree makes the whole run a time limit abort.

use crate::{
    config::SolverConfig,
    solver::{search_monitor, solve_sequential},
};
use apron_bnb::{
    bnb::BnbSolver,
    bound::{BestChoiceBound, RevenueBound},
    branching::{decision::DecisionBuilder, mrv::MostConstrainedBuilder},
    fixed::FixedAssignment,
    incumbent::SharedIncumbent,
    result::{AbortReason, BnbSolverOutcome, TerminationReason},
    solution::Solution,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use apron_core::num::is_revenue_improvement;
use apron_model::constraint::ConstraintModel;
use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Instant,
};

/// Returns the root children in preference order: best bay first, the
/// unassigned child last.
pub fn root_children(model: &ConstraintModel) -> Vec<FixedAssignment> {
    let state = SearchState::new(model.num_requests(), model.num_bays());
    let mut builder = MostConstrainedBuilder::preallocated(model.num_bays());
    let mut children: Vec<FixedAssignment> = builder
        .next_decision(model, &state)
        .map(|d| match d.bay() {
            Some(bay) => FixedAssignment::assigned(d.request(), bay),
            None => FixedAssignment::unassigned(d.request()),
        })
        .collect();
    children.reverse();
    children
}

/// Solves `model` on up to `config.threads()` workers.
///
/// Falls back to a single sequential search when the model is malformed,
/// when only one worker is configured or when the root has fewer than two
/// children.
pub fn solve_parallel(
    model: &ConstraintModel,
    config: &SolverConfig,
    start_time: Instant,
) -> BnbSolverOutcome {
    if config.threads() <= 1 || model.check_structure().is_err() {
        return solve_sequential(model, config, start_time);
    }

    let children = root_children(model);
    if children.len() < 2 {
        return solve_sequential(model, config, start_time);
    }

    let workers = config.threads().min(children.len());
    tracing::debug!(
        workers,
        subtrees = children.len(),
        "splitting the root decision"
    );

    let incumbent = SharedIncumbent::new();
    let cursor = AtomicUsize::new(0);

    let mut results: Vec<(usize, BnbSolverOutcome)> = Vec::with_capacity(children.len());
    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let children = &children;
            let incumbent = &incumbent;
            let cursor = &cursor;
            handles.push(scope.spawn(move || {
                let mut solver = BnbSolver::preallocated(model.num_requests(), model.num_bays());
                let mut builder = MostConstrainedBuilder::preallocated(model.num_bays());
                let mut bound = BestChoiceBound::new();
                let mut local = Vec::new();
                loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(child) = children.get(index) else {
                        break;
                    };
                    let outcome = solver.solve_with_fixed_and_incumbent(
                        model,
                        &mut builder,
                        &mut bound,
                        search_monitor(config, start_time),
                        std::slice::from_ref(child),
                        incumbent,
                    );
                    tracing::trace!(%child, reason = %outcome.termination_reason(), "subtree finished");
                    local.push((index, outcome));
                }
                local
            }));
        }

        for handle in handles {
            match handle.join() {
                Ok(local) => results.extend(local),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
    });
    results.sort_by_key(|(index, _)| *index);

    merge_outcomes(model, results.into_iter().map(|(_, o)| o), start_time)
}

/// Reduces the subtree outcomes, given in child order, to one outcome.
fn merge_outcomes<O>(model: &ConstraintModel, outcomes: O, start_time: Instant) -> BnbSolverOutcome
where
    O: IntoIterator<Item = BnbSolverOutcome>,
{
    let mut stats = BnbSolverStatistics::default();
    let mut best: Option<Solution> = None;
    let mut abort: Option<AbortReason> = None;

    for outcome in outcomes {
        let (result, reason, sub_stats) = outcome.into_parts();
        stats.merge(&sub_stats);

        if let TerminationReason::Aborted(reason) = reason {
            abort = match (abort, reason) {
                (Some(AbortReason::TimeLimit(limit)), _) | (_, AbortReason::TimeLimit(limit)) => {
                    Some(AbortReason::TimeLimit(limit))
                }
                (Some(first), _) => Some(first),
                (None, reason) => Some(reason),
            };
        }

        if let Some(candidate) = result.into_solution() {
            let improves = best
                .as_ref()
                .is_none_or(|b| is_revenue_improvement(candidate.revenue(), b.revenue()));
            if improves {
                best = Some(candidate);
            }
        }
    }

    let root_state = SearchState::new(model.num_requests(), model.num_bays());
    stats.set_root_upper_bound(BestChoiceBound::new().estimate_remaining_revenue(model, &root_state));
    stats.set_total_time(start_time.elapsed());

    match abort {
        Some(reason) => BnbSolverOutcome::aborted(best, reason, stats),
        None => match best {
            Some(solution) => BnbSolverOutcome::optimal(solution, stats),
            None => BnbSolverOutcome::infeasible(stats),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_bnb::{monitor::no_op::NoOperationMonitor, result::SolverResult};
    use apron_model::{
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

    fn random_model(rng: &mut ChaCha8Rng, n: usize, bays: usize) -> ConstraintModel {
        let mut mb = ConstraintModelBuilder::new(n, bays);
        for i in 0..n {
            for k in 0..bays {
                if rng.random_bool(0.8) {
                    mb.add_variable(r(i), b(k), rng.random_range(1..60) as f64);
                }
            }
            for j in (i + 1)..n {
                if rng.random_bool(0.35) {
                    mb.add_conflict(r(i), r(j));
                }
            }
        }
        mb.build()
    }

    fn sequential_revenue(model: &ConstraintModel) -> f64 {
        let outcome = BnbSolver::new().solve(
            model,
            &mut MostConstrainedBuilder::new(),
            &mut BestChoiceBound::new(),
            NoOperationMonitor::new(),
        );
        assert!(outcome.is_optimal());
        outcome.result().solution().map(|s| s.revenue()).unwrap_or(0.0)
    }

    #[test]
    fn test_root_children_prefer_best_bay() {
        let mut mb = ConstraintModelBuilder::new(1, 3);
        mb.add_variable(r(0), b(0), 5.0)
            .add_variable(r(0), b(1), 9.0)
            .add_variable(r(0), b(2), 5.0);
        let children = root_children(&mb.build());
        assert_eq!(
            children,
            vec![
                FixedAssignment::assigned(r(0), b(1)),
                FixedAssignment::assigned(r(0), b(0)),
                FixedAssignment::assigned(r(0), b(2)),
                FixedAssignment::unassigned(r(0)),
            ]
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = SolverConfig::builder().with_threads(4).build();
        for round in 0..20 {
            let model = random_model(&mut rng, 12, 3);
            let outcome = solve_parallel(&model, &config, Instant::now());
            assert!(outcome.is_optimal(), "round {}", round);

            let solution = outcome.result().solution().unwrap();
            assert!(model.is_feasible(solution.assignment()), "round {}", round);
            assert!(
                apron_core::num::revenue_approx_eq(solution.revenue(), sequential_revenue(&model)),
                "round {}",
                round
            );
        }
    }

    #[test]
    fn test_zero_time_limit_is_a_time_limit_abort() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let model = random_model(&mut rng, 20, 3);
        let config = SolverConfig::builder()
            .with_threads(3)
            .with_time_limit(Duration::ZERO)
            .build();

        let outcome = solve_parallel(&model, &config, Instant::now());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted(AbortReason::TimeLimit(Duration::ZERO))
        );
        let SolverResult::Feasible(solution) = outcome.result() else {
            panic!("expected a feasible result, got {}", outcome.result());
        };
        assert!(model.is_feasible(solution.assignment()));
    }

    #[test]
    fn test_single_child_falls_back_to_sequential() {
        // The only request has no bay, so the root has one child.
        let model = ConstraintModelBuilder::new(1, 2).build();
        let config = SolverConfig::builder().with_threads(8).build();
        let outcome = solve_parallel(&model, &config, Instant::now());
        assert!(outcome.is_optimal());
        assert_eq!(outcome.result().solution().map(|s| s.revenue()), Some(0.0));
    }
}
