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

use std::time::Duration;

/// Statistics collected during one branch-and-bound run.
#[derive(Debug, Clone, PartialEq)]
pub struct BnbSolverStatistics {
    /// Iterations of the main loop.
    pub steps: u64,
    /// Total nodes visited, the root included.
    pub nodes_explored: u64,
    /// Total frames popped while backtracking.
    pub backtracks: u64,
    /// Total children enqueued by the decision builder.
    pub decisions_generated: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Pruned because a fixed decision or the model itself was unusable.
    pub prunings_infeasible: u64,
    /// Pruned because the revenue bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Improving solutions found, the warm start included.
    pub solutions_found: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
    /// Revenue bound at the root node; the optimality gap is measured
    /// against it.
    pub root_upper_bound: f64,
}

impl Default for BnbSolverStatistics {
    fn default() -> Self {
        Self {
            steps: 0,
            nodes_explored: 0,
            backtracks: 0,
            decisions_generated: 0,
            max_depth: 0,
            prunings_infeasible: 0,
            prunings_bound: 0,
            solutions_found: 0,
            time_total: Duration::ZERO,
            root_upper_bound: 0.0,
        }
    }
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_decisions_generated(&mut self, count: u64) {
        self.decisions_generated = self.decisions_generated.saturating_add(count);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_upper_bound(&mut self, bound: f64) {
        self.root_upper_bound = bound;
    }

    /// Folds the statistics of a concurrent run into `self`.
    ///
    /// Counters add up; depth, wall time and root bound take the maximum.
    pub fn merge(&mut self, other: &BnbSolverStatistics) {
        self.steps = self.steps.saturating_add(other.steps);
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.backtracks = self.backtracks.saturating_add(other.backtracks);
        self.decisions_generated = self
            .decisions_generated
            .saturating_add(other.decisions_generated);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.prunings_infeasible = self
            .prunings_infeasible
            .saturating_add(other.prunings_infeasible);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
        self.time_total = self.time_total.max(other.time_total);
        self.root_upper_bound = self.root_upper_bound.max(other.root_upper_bound);
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Apron-BnB Solver Statistics:")?;
        writeln!(f, "  Steps:                {}", self.steps)?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:           {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Decisions generated:  {}", self.decisions_generated)?;
        writeln!(f, "  Prunings (infeasible):{}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Root Upper Bound:     {}", self.root_upper_bound)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_merge() {
        let mut a = BnbSolverStatistics::default();
        a.on_node_explored();
        a.on_node_explored();
        a.on_depth_update(3);
        a.on_decisions_generated(4);
        a.set_root_upper_bound(50.0);
        a.set_total_time(Duration::from_millis(5));

        let mut b = BnbSolverStatistics::default();
        b.on_node_explored();
        b.on_depth_update(7);
        b.on_solution_found();
        b.set_root_upper_bound(40.0);
        b.set_total_time(Duration::from_millis(9));

        a.merge(&b);
        assert_eq!(a.nodes_explored, 3);
        assert_eq!(a.max_depth, 7);
        assert_eq!(a.decisions_generated, 4);
        assert_eq!(a.solutions_found, 1);
        assert_eq!(a.root_upper_bound, 50.0);
        assert_eq!(a.time_total, Duration::from_millis(9));
        assert!(format!("{}", a).contains("Nodes explored:       3"));
    }
}
