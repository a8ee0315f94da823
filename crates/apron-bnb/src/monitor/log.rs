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

//! Progress logging for tree search
//!
//! `LogTreeSearchMonitor` emits one `tracing::info!` line per `log_interval`
//! with the node count, depth, incumbent and pruning counters. The clock is
//! only read when `nodes_explored & clock_check_mask == 0`.

use crate::{
    branching::decision::Decision, monitor::tree_search_monitor::TreeSearchMonitor,
    solution::Solution, state::SearchState, stats::BnbSolverStatistics,
};
use apron_model::constraint::ConstraintModel;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_revenue: Option<f64>,
}

impl LogTreeSearchMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_revenue: None,
        }
    }

    fn log_line(&mut self, state: &SearchState, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        tracing::info!(
            elapsed_secs = now.duration_since(self.start_time).as_secs_f32(),
            nodes = stats.nodes_explored,
            depth = state.num_decided(),
            best_revenue = self.best_revenue.unwrap_or(f64::NEG_INFINITY),
            current_revenue = state.current_revenue(),
            backtracks = stats.backtracks,
            pruned = stats.prunings_bound,
            "search progress"
        );
        self.last_log_time = now;
    }
}

impl Default for LogTreeSearchMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogTreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {:?}, clock_check_mask: {})",
            self.log_interval, self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogTreeSearchMonitor {
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, model: &ConstraintModel, _statistics: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_revenue = None;
        tracing::info!(
            requests = model.num_requests(),
            bays = model.num_bays(),
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            "search started"
        );
    }

    fn on_descend(&mut self, state: &SearchState, _decision: Decision, stats: &BnbSolverStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, stats);
        }
    }

    fn on_solution_found(&mut self, solution: &Solution, stats: &BnbSolverStatistics) {
        self.best_revenue = Some(solution.revenue());
        tracing::debug!(
            revenue = solution.revenue(),
            nodes = stats.nodes_explored,
            "improving solution"
        );
    }

    fn on_exit_search(&mut self, stats: &BnbSolverStatistics) {
        tracing::info!(
            nodes = stats.nodes_explored,
            backtracks = stats.backtracks,
            solutions = stats.solutions_found,
            elapsed = ?stats.time_total,
            "search finished"
        );
    }
}
