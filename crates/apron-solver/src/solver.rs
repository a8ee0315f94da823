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

//! # Bay Assignment Facade
//!
//! `Solver` runs one complete solve of a `Problem<T>`:
//!
//! 1. Detect the buffered overlap pairs (`OverlapDetector::detect`).
//! 2. Build the `ConstraintModel` from the problem and the pairs.
//! 3. Search the model, sequentially or split over worker threads.
//! 4. Map the termination reason to a `SolveStatus` and apply the
//!    `ZeroRevenuePolicy`.
//! 5. Assemble the `SolveResult` in request input order.
//!
//! No state survives a call; a `Solver` only holds its configuration.
//!
//! ## Usage
//!
//! ```rust
//! use apron_model::problem::ProblemBuilder;
//! use apron_solver::{assemble::SolveStatus, config::SolverConfig, solver::Solver};
//!
//! let mut builder = ProblemBuilder::<i64>::new();
//! builder
//!     .add_request("F1", "AI", "A320", 0, 60)
//!     .add_request("F2", "AI", "A320", 60, 120)
//!     .add_bay("B1")
//!     .allow("A320", "B1")
//!     .set_revenue("AI", "A320", "B1", 10.0);
//! let problem = builder.build().unwrap();
//!
//! let result = Solver::new(SolverConfig::default()).solve(&problem);
//! assert_eq!(result.status(), SolveStatus::Optimal);
//! assert_eq!(result.total_revenue(), 20.0);
//! ```

use crate::{
    assemble::{self, SolveResult, SolveStatus},
    config::{SolverConfig, ZeroRevenuePolicy},
    error::SolveError,
    parallel,
};
use apron_bnb::{
    bnb::BnbSolver,
    bound::BestChoiceBound,
    branching::mrv::MostConstrainedBuilder,
    monitor::{
        composite::CompositeTreeSearchMonitor, interrupt::InterruptMonitor,
        log::LogTreeSearchMonitor, node_limit::NodeLimitMonitor, time::TimeLimitMonitor,
    },
    result::{AbortReason, BnbSolverOutcome, TerminationReason},
    solution::Solution,
};
use apron_core::num::TimeNumeric;
use apron_model::{
    assignment::Assignment,
    buffer::BufferTable,
    constraint::ConstraintModel,
    index::RequestIndex,
    overlap::OverlapDetector,
    problem::Problem,
    repository::{FacilitySnapshotSource, RequestRepository},
};
use std::time::Instant;

/// The progress log reads the clock every 4096 nodes.
const LOG_CLOCK_CHECK_MASK: u64 = 4095;

#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    #[inline]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `problem` and returns the best assignment found within the
    /// configured limits.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(requests = problem.num_requests(), bays = problem.num_bays())
    )]
    pub fn solve<T>(&self, problem: &Problem<T>) -> SolveResult
    where
        T: TimeNumeric,
    {
        let start_time = Instant::now();

        let overlaps = OverlapDetector::detect(problem.requests(), problem.buffers());
        let model = ConstraintModel::from_problem(problem, &overlaps);
        tracing::debug!(
            overlaps = overlaps.len(),
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            "constraint model built"
        );

        let outcome = if self.config.threads() > 1 {
            parallel::solve_parallel(&model, &self.config, start_time)
        } else {
            solve_sequential(&model, &self.config, start_time)
        };

        let (result, reason, statistics) = outcome.into_parts();
        let status = status_for(&reason);

        let assignment = if status.has_assignment() {
            let mut assignment = result
                .into_solution()
                .map(Solution::into_assignment)
                .unwrap_or_else(|| Assignment::unassigned(model.num_requests()));
            if self.config.zero_revenue_policy() == ZeroRevenuePolicy::FillIdleBays {
                let filled = fill_idle_bays(&model, &mut assignment);
                tracing::debug!(filled, "parked requests on idle zero revenue bays");
            }
            debug_assert!(
                model.is_feasible(&assignment),
                "called `Solver::solve` and produced an infeasible assignment: {}",
                assignment
            );
            Some(assignment)
        } else {
            None
        };

        let solve_result = assemble::assemble(
            problem,
            assignment.as_ref(),
            status,
            statistics,
            reason.to_string(),
        );
        tracing::info!(
            status = %solve_result.status(),
            total_revenue = solve_result.total_revenue(),
            assigned = solve_result.decisions().len(),
            nodes = solve_result.statistics().nodes_explored,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "solve finished"
        );
        solve_result
    }

    /// Assembles a problem from the collaborators and solves it.
    ///
    /// # Errors
    ///
    /// Returns `SolveError::Validation` if the snapshot does not form a
    /// valid problem, for example when a facility table names an unknown
    /// bay.
    pub fn solve_sources<T, R, F>(
        &self,
        repository: &R,
        facility: &F,
        buffers: BufferTable<T>,
    ) -> Result<SolveResult, SolveError<T>>
    where
        T: TimeNumeric,
        R: RequestRepository<T> + ?Sized,
        F: FacilitySnapshotSource + ?Sized,
    {
        let problem = Problem::from_sources(repository, facility, buffers)?;
        Ok(self.solve(&problem))
    }
}

/// Builds the monitor stack of one search.
///
/// The time limit is anchored at `start_time` so that every worker of a
/// parallel solve shares the same deadline.
pub(crate) fn search_monitor(
    config: &SolverConfig,
    start_time: Instant,
) -> CompositeTreeSearchMonitor<'_> {
    let mut monitor = CompositeTreeSearchMonitor::with_capacity(4);
    if let Some(flag) = config.interrupt() {
        monitor.add_monitor(InterruptMonitor::new(flag));
    }
    monitor.add_monitor(
        TimeLimitMonitor::new(config.time_limit(), config.clock_check_interval())
            .anchored_at(start_time),
    );
    if let Some(limit) = config.node_limit() {
        monitor.add_monitor(NodeLimitMonitor::new(limit));
    }
    if let Some(interval) = config.log_interval() {
        monitor.add_monitor(LogTreeSearchMonitor::new(interval, LOG_CLOCK_CHECK_MASK));
    }
    monitor
}

pub(crate) fn solve_sequential(
    model: &ConstraintModel,
    config: &SolverConfig,
    start_time: Instant,
) -> BnbSolverOutcome {
    let mut solver = BnbSolver::preallocated(model.num_requests(), model.num_bays());
    solver.solve(
        model,
        &mut MostConstrainedBuilder::preallocated(model.num_bays()),
        &mut BestChoiceBound::new(),
        search_monitor(config, start_time),
    )
}

fn status_for(reason: &TerminationReason) -> SolveStatus {
    match reason {
        TerminationReason::OptimalityProven => SolveStatus::Optimal,
        TerminationReason::InfeasibilityProven => SolveStatus::Infeasible,
        TerminationReason::Aborted(AbortReason::TimeLimit(_)) => SolveStatus::TimedOut,
        TerminationReason::Aborted(_) => SolveStatus::FeasibleSuboptimal,
    }
}

/// Parks unassigned requests on their first zero revenue bay that no
/// assigned conflicting request occupies. Requests are visited in input
/// order. Returns the number of requests parked.
fn fill_idle_bays(model: &ConstraintModel, assignment: &mut Assignment) -> usize {
    let mut filled = 0;
    for request in RequestIndex::range(model.num_requests()) {
        if assignment.bay_of(request).is_some() {
            continue;
        }
        let conflicts = model.conflicts(request);
        let idle = model
            .request_variables(request)
            .iter()
            .filter(|v| v.revenue() == 0.0)
            .map(|v| v.bay())
            .find(|&bay| {
                conflicts
                    .ones()
                    .all(|other| assignment.bay_of(RequestIndex::new(other)) != Some(bay))
            });
        if let Some(bay) = idle {
            assignment.assign(request, bay);
            filled += 1;
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::{
        index::BayIndex,
        problem::ProblemBuilder,
        repository::{InMemoryRequestRepository, StaticFacility},
        request::BayId,
        revenue::RevenueTable,
        compatibility::CompatibilityRelation,
    };
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::{
        collections::HashSet,
        sync::{Arc, atomic::AtomicBool},
        time::Duration,
    };

    fn solve(problem: &Problem<i64>) -> SolveResult {
        Solver::default().solve(problem)
    }

    fn assigned_ids(result: &SolveResult) -> Vec<&str> {
        result
            .decisions()
            .iter()
            .map(|d| d.request_id().as_str())
            .collect()
    }

    fn random_problem(rng: &mut ChaCha8Rng, num_requests: usize, num_bays: usize) -> Problem<i64> {
        const OWNERS: [&str; 3] = ["AI", "BA", "6E"];
        const TYPES: [&str; 3] = ["A320", "B737", "E190"];

        let mut builder = ProblemBuilder::new();
        for i in 0..num_requests {
            let start = rng.random_range(0..600);
            let length = rng.random_range(20..120);
            builder.add_request(
                format!("F{}", i),
                OWNERS[rng.random_range(0..OWNERS.len())],
                TYPES[rng.random_range(0..TYPES.len())],
                start,
                start + length,
            );
        }
        for k in 0..num_bays {
            let bay = format!("B{}", k + 1);
            builder.add_bay(bay.as_str());
            for type_code in TYPES {
                if rng.random_bool(0.7) {
                    builder.allow(type_code, bay.as_str());
                }
                for owner in OWNERS {
                    if rng.random_bool(0.8) {
                        let amount = rng.random_range(0..200) as f64 + 0.5;
                        builder.set_revenue(owner, type_code, bay.as_str(), amount);
                    }
                }
            }
        }
        for type_code in TYPES {
            builder.set_buffer(type_code, rng.random_range(0..15));
        }
        builder.build().unwrap()
    }

    /// Checks the hard constraints of `result` against `problem`.
    fn assert_valid(problem: &Problem<i64>, result: &SolveResult) {
        let index_of = |id: &str| {
            problem
                .requests()
                .iter()
                .position(|r| r.id().as_str() == id)
                .map(RequestIndex::new)
                .unwrap()
        };

        let mut seen = HashSet::new();
        let mut assignment = Assignment::unassigned(problem.num_requests());
        for decision in result.decisions() {
            let r = index_of(decision.request_id().as_str());
            assert!(seen.insert(r), "request {} assigned twice", r);
            let b = problem.bay_index(decision.bay().as_str()).unwrap();
            assert!(problem.is_compatible(r, b), "incompatible decision {}", decision);
            assert_eq!(decision.revenue(), problem.revenue(r, b));
            assignment.assign(r, b);
        }

        for pair in OverlapDetector::detect_naive(problem.requests(), problem.buffers()) {
            let (a, b) = (assignment.bay_of(pair.first()), assignment.bay_of(pair.second()));
            assert!(a.is_none() || a != b, "overlap pair {} shares a bay", pair);
        }

        let sum = result
            .decisions()
            .iter()
            .fold(0.0, |acc, d| acc + d.revenue());
        assert_eq!(result.total_revenue(), sum);
    }

    #[test]
    fn test_two_disjoint_requests_on_one_bay() {
        let mut builder = ProblemBuilder::new();
        builder
            .add_request("F1", "AI", "A320", 0, 60)
            .add_request("F2", "BA", "A320", 60, 120)
            .add_bay("B1")
            .allow("A320", "B1")
            .set_revenue("AI", "A320", "B1", 10.0)
            .set_revenue("BA", "A320", "B1", 20.0);
        let result = solve(&builder.build().unwrap());

        assert_eq!(result.status(), SolveStatus::Optimal);
        assert_eq!(result.total_revenue(), 30.0);
        assert_eq!(assigned_ids(&result), vec!["F1", "F2"]);
    }

    #[test]
    fn test_identical_windows_keep_higher_revenue() {
        let mut builder = ProblemBuilder::new();
        builder
            .add_request("F1", "AI", "A320", 0, 60)
            .add_request("F2", "BA", "A320", 0, 60)
            .add_bay("B1")
            .allow("A320", "B1")
            .set_revenue("AI", "A320", "B1", 10.0)
            .set_revenue("BA", "A320", "B1", 20.0);
        let result = solve(&builder.build().unwrap());

        assert_eq!(result.status(), SolveStatus::Optimal);
        assert_eq!(result.total_revenue(), 20.0);
        assert_eq!(assigned_ids(&result), vec!["F2"]);
    }

    #[test]
    fn test_request_without_compatible_bay() {
        let mut builder = ProblemBuilder::new();
        builder
            .add_request("F1", "AI", "B737", 0, 60)
            .add_bay("B1")
            .allow("A320", "B1")
            .set_revenue("AI", "B737", "B1", 50.0);
        let result = solve(&builder.build().unwrap());

        assert_eq!(result.status(), SolveStatus::Optimal);
        assert_eq!(result.total_revenue(), 0.0);
        assert!(result.decisions().is_empty());
    }

    #[test]
    fn test_three_mutually_overlapping_on_two_bays() {
        let mut builder = ProblemBuilder::new();
        builder
            .add_request("F1", "AI", "A320", 0, 60)
            .add_request("F2", "BA", "A320", 10, 70)
            .add_request("F3", "6E", "A320", 20, 80)
            .add_bay("B1")
            .add_bay("B2");
        for (owner, amount) in [("AI", 10.0), ("BA", 20.0), ("6E", 30.0)] {
            builder
                .set_revenue(owner, "A320", "B1", amount)
                .set_revenue(owner, "A320", "B2", amount);
        }
        builder.allow("A320", "B1").allow("A320", "B2");
        let problem = builder.build().unwrap();
        let result = solve(&problem);

        assert_eq!(result.status(), SolveStatus::Optimal);
        assert_eq!(result.total_revenue(), 50.0);
        assert_eq!(assigned_ids(&result), vec!["F2", "F3"]);
        assert_valid(&problem, &result);
    }

    #[test]
    fn test_buffers_turn_touching_windows_into_conflicts() {
        let mut builder = ProblemBuilder::new();
        builder
            .add_request("F1", "AI", "A320", 0, 60)
            .add_request("F2", "AI", "A320", 60, 120)
            .add_bay("B1")
            .allow("A320", "B1")
            .set_revenue("AI", "A320", "B1", 10.0)
            .set_buffer("A320", 5);
        let result = solve(&builder.build().unwrap());

        assert_eq!(result.status(), SolveStatus::Optimal);
        assert_eq!(result.decisions().len(), 1);
        assert_eq!(result.total_revenue(), 10.0);
    }

    #[test]
    fn test_zero_time_limit_times_out_with_valid_incumbent() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let problem = random_problem(&mut rng, 200, 8);
        let config = SolverConfig::builder()
            .with_time_limit(Duration::ZERO)
            .build();
        let result = Solver::new(config).solve(&problem);

        assert_eq!(result.status(), SolveStatus::TimedOut);
        assert!(result.termination().contains("time limit"));
        assert!(!result.decisions().is_empty());
        assert!(result.total_revenue() <= result.statistics().root_upper_bound + 1e-6);
        assert_valid(&problem, &result);
    }

    #[test]
    fn test_node_limit_is_feasible_suboptimal() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let problem = random_problem(&mut rng, 60, 4);
        let config = SolverConfig::builder().with_node_limit(1).build();
        let result = Solver::new(config).solve(&problem);

        assert_eq!(result.status(), SolveStatus::FeasibleSuboptimal);
        assert_valid(&problem, &result);
    }

    #[test]
    fn test_raised_interrupt_is_feasible_suboptimal() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let problem = random_problem(&mut rng, 30, 3);
        let flag = Arc::new(AtomicBool::new(true));
        let config = SolverConfig::builder().with_interrupt(flag).build();
        let result = Solver::new(config).solve(&problem);

        assert_eq!(result.status(), SolveStatus::FeasibleSuboptimal);
        assert_eq!(result.termination(), "Aborted: interrupted");
        assert_valid(&problem, &result);
    }

    /// Best total revenue over every assignment of `problem`, checked
    /// directly on the buffered windows. Only usable for tiny problems.
    fn brute_force_revenue(problem: &Problem<i64>) -> f64 {
        fn go(
            problem: &Problem<i64>,
            request: usize,
            bays: &mut Vec<Option<usize>>,
            best: &mut f64,
        ) {
            if request == problem.num_requests() {
                let total = bays
                    .iter()
                    .enumerate()
                    .filter_map(|(i, k)| {
                        k.map(|k| problem.revenue(RequestIndex::new(i), BayIndex::new(k)))
                    })
                    .fold(0.0, |acc, v| acc + v);
                *best = best.max(total);
                return;
            }

            bays.push(None);
            go(problem, request + 1, bays, best);
            bays.pop();

            let r = RequestIndex::new(request);
            let window = problem.buffered_window(r);
            for k in 0..problem.num_bays() {
                if !problem.is_compatible(r, BayIndex::new(k)) {
                    continue;
                }
                let clashes = bays.iter().enumerate().any(|(other, bay)| {
                    *bay == Some(k)
                        && problem
                            .buffered_window(RequestIndex::new(other))
                            .intersects(&window)
                });
                if clashes {
                    continue;
                }
                bays.push(Some(k));
                go(problem, request + 1, bays, best);
                bays.pop();
            }
        }

        let mut best = 0.0;
        go(problem, 0, &mut Vec::with_capacity(problem.num_requests()), &mut best);
        best
    }

    #[test]
    fn test_random_problems_respect_constraints() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xb4a7);
        for _ in 0..25 {
            let problem = random_problem(&mut rng, 14, 3);
            let result = solve(&problem);
            assert_eq!(result.status(), SolveStatus::Optimal);
            assert_valid(&problem, &result);
        }
    }

    #[test]
    fn test_random_problems_reach_best_revenue() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_0b);
        let parallel = Solver::new(SolverConfig::builder().with_threads(3).build());
        for round in 0..40 {
            let num_requests = rng.random_range(0..8);
            let num_bays = rng.random_range(1..4);
            let problem = random_problem(&mut rng, num_requests, num_bays);
            let expected = brute_force_revenue(&problem);

            for result in [solve(&problem), parallel.solve(&problem)] {
                assert_eq!(result.status(), SolveStatus::Optimal, "round {}", round);
                assert_valid(&problem, &result);
                assert!(
                    apron_core::num::revenue_approx_eq(result.total_revenue(), expected),
                    "round {}: {} vs {}",
                    round,
                    result.total_revenue(),
                    expected
                );
            }
        }
    }

    #[test]
    fn test_solving_twice_is_idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let problem = random_problem(&mut rng, 16, 3);
        let solver = Solver::default();

        let first = solver.solve(&problem);
        let second = solver.solve(&problem);
        assert_eq!(first.total_revenue(), second.total_revenue());
        assert_eq!(first.decisions(), second.decisions());
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let parallel = Solver::new(SolverConfig::builder().with_threads(4).build());
        for _ in 0..10 {
            let problem = random_problem(&mut rng, 16, 3);
            let sequential = solve(&problem);
            let split = parallel.solve(&problem);

            assert_eq!(split.status(), SolveStatus::Optimal);
            assert!(apron_core::num::revenue_approx_eq(
                sequential.total_revenue(),
                split.total_revenue()
            ));
            assert_valid(&problem, &split);
        }
    }

    #[test]
    fn test_fill_idle_bays_parks_zero_revenue_requests() {
        let mut builder = ProblemBuilder::new();
        builder
            .add_request("F1", "AI", "A320", 0, 60)
            .add_request("F2", "XX", "A320", 0, 60)
            .add_request("F3", "XX", "A320", 30, 90)
            .add_bay("B1")
            .add_bay("B2")
            .allow("A320", "B1")
            .allow("A320", "B2")
            .set_revenue("AI", "A320", "B1", 40.0);
        let problem = builder.build().unwrap();

        let plain = solve(&problem);
        assert_eq!(assigned_ids(&plain), vec!["F1"]);

        let config = SolverConfig::builder()
            .with_zero_revenue_policy(ZeroRevenuePolicy::FillIdleBays)
            .build();
        let filled = Solver::new(config).solve(&problem);
        assert_eq!(filled.status(), SolveStatus::Optimal);
        assert_eq!(filled.total_revenue(), 40.0);
        // F2 takes the free B2, F3 overlaps both and finds no bay.
        assert_eq!(assigned_ids(&filled), vec!["F1", "F2"]);
        assert_eq!(filled.decision_for("F2").map(|d| d.bay().as_str()), Some("B2"));
        assert_valid(&problem, &filled);
    }

    #[test]
    fn test_solve_sources_uses_repository_and_facility() {
        let mut repo = InMemoryRequestRepository::<i64>::new();
        repo.add("AI", "101", "A320", 0, 60).unwrap();
        repo.add("BA", "202", "B737", 0, 60).unwrap();
        repo.add("BA", "203", "B737", 30, 90).unwrap();

        let result = Solver::default()
            .solve_sources(&repo, &StaticFacility::demo(), BufferTable::new())
            .unwrap();
        assert_eq!(result.status(), SolveStatus::Optimal);
        // Best A320 bay is B10 (145), best B737 bays are B10 and B9 (190, 185).
        // B737s overlap each other and the A320, so the three split B8..B10.
        assert_eq!(result.decisions().len(), 3);
        assert_eq!(result.total_revenue(), 190.0 + 185.0 + 135.0);
    }

    #[test]
    fn test_solve_sources_reports_validation_errors() {
        let mut compatibility = CompatibilityRelation::new();
        compatibility.allow("A320", "B1");
        let facility = StaticFacility::new(
            vec![BayId::new("B1"), BayId::new("B1")],
            compatibility,
            RevenueTable::new(),
        );
        let repo = InMemoryRequestRepository::<i64>::new();

        let err = Solver::default()
            .solve_sources(&repo, &facility, BufferTable::new())
            .unwrap_err();
        assert!(matches!(err, SolveError::Validation(_)));
    }

    #[test]
    fn test_progress_logging_does_not_change_result() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let problem = random_problem(&mut rng, 12, 3);
        let logged = Solver::new(
            SolverConfig::builder()
                .with_log_interval(Duration::ZERO)
                .build(),
        )
        .solve(&problem);
        let plain = solve(&problem);

        assert_eq!(logged.status(), plain.status());
        assert_eq!(logged.decisions(), plain.decisions());
    }

    #[test]
    fn test_empty_problem_is_optimal() {
        let problem = ProblemBuilder::<i64>::new().build().unwrap();
        let result = solve(&problem);
        assert_eq!(result.status(), SolveStatus::Optimal);
        assert!(result.decisions().is_empty());
    }
}
