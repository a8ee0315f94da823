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

//! Time limit monitor for tree search
//!
//! `TimeLimitMonitor` enforces a wall-clock budget. The clock is read on the
//! first step and then every `check_interval` steps, so a zero budget stops
//! the search before the first node is expanded and a large one costs one
//! `Instant::now()` per interval.
//!
//! By default the clock starts in `on_enter_search`. `anchored_at` starts it
//! at a caller supplied instant instead, which lets several searches share
//! one deadline.

use crate::{
    monitor::tree_search_monitor::{SearchCommand, TreeSearchMonitor},
    result::AbortReason,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use apron_model::constraint::ConstraintModel;
use std::time::{Duration, Instant};

/// A monitor that terminates the search once the time budget is used up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    time_limit: Duration,
    start_time: Option<Instant>,
    anchored: bool,
    check_interval: u64,
    steps_since_last_check: u64,
}

impl TimeLimitMonitor {
    /// Default number of steps between two clock reads.
    pub const DEFAULT_CHECK_INTERVAL: u64 = 1024;

    /// Creates a monitor reading the clock every `check_interval` steps.
    /// An interval of zero is treated as one.
    pub fn new(time_limit: Duration, check_interval: u64) -> Self {
        Self {
            time_limit,
            start_time: None,
            anchored: false,
            check_interval: check_interval.max(1),
            steps_since_last_check: 0,
        }
    }

    pub fn with_default_check_interval(time_limit: Duration) -> Self {
        Self::new(time_limit, Self::DEFAULT_CHECK_INTERVAL)
    }

    /// Measures the budget from `start` instead of from the start of the
    /// search.
    pub fn anchored_at(mut self, start: Instant) -> Self {
        self.start_time = Some(start);
        self.anchored = true;
        self
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    #[inline]
    pub fn check_interval(&self) -> u64 {
        self.check_interval
    }
}

impl std::fmt::Display for TimeLimitMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TimeLimitMonitor(time_limit: {:?}, check_interval: {})",
            self.time_limit, self.check_interval
        )
    }
}

impl TreeSearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &ConstraintModel, _statistics: &BnbSolverStatistics) {
        if !self.anchored {
            self.start_time = Some(Instant::now());
        }
        self.steps_since_last_check = 0;
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {
        if !self.anchored {
            self.start_time = None;
        }
    }

    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        let due = self.steps_since_last_check == 0;
        self.steps_since_last_check += 1;
        if self.steps_since_last_check >= self.check_interval {
            self.steps_since_last_check = 0;
        }

        if due
            && let Some(start) = self.start_time
            && start.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate(AbortReason::TimeLimit(self.time_limit));
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::constraint::ConstraintModelBuilder;

    fn run_steps(monitor: &mut TimeLimitMonitor, steps: usize) -> Vec<SearchCommand> {
        let model = ConstraintModelBuilder::new(0, 0).build();
        let stats = BnbSolverStatistics::default();
        let state = SearchState::new(0, 0);
        monitor.on_enter_search(&model, &stats);
        (0..steps)
            .map(|_| monitor.search_command(&state, &stats))
            .collect()
    }

    #[test]
    fn test_zero_budget_stops_on_first_step() {
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO, 1_000_000);
        let commands = run_steps(&mut monitor, 1);
        assert_eq!(
            commands[0],
            SearchCommand::Terminate(AbortReason::TimeLimit(Duration::ZERO))
        );
    }

    #[test]
    fn test_generous_budget_continues() {
        let mut monitor = TimeLimitMonitor::new(Duration::from_secs(3600), 2);
        let commands = run_steps(&mut monitor, 10);
        assert!(commands.iter().all(|c| *c == SearchCommand::Continue));
    }

    #[test]
    fn test_expired_anchor_stops_immediately() {
        let start = Instant::now() - Duration::from_millis(50);
        let mut monitor =
            TimeLimitMonitor::new(Duration::from_millis(10), 4).anchored_at(start);
        let commands = run_steps(&mut monitor, 1);
        assert!(matches!(commands[0], SearchCommand::Terminate(_)));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let monitor = TimeLimitMonitor::new(Duration::from_secs(1), 0);
        assert_eq!(monitor.check_interval(), 1);
        assert_eq!(
            format!("{}", monitor),
            "TimeLimitMonitor(time_limit: 1s, check_interval: 1)"
        );
    }
}
