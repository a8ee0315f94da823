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

use crate::{
    monitor::tree_search_monitor::{SearchCommand, TreeSearchMonitor},
    result::AbortReason,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use apron_model::constraint::ConstraintModel;
use std::sync::atomic::{AtomicBool, Ordering};

/// A monitor that terminates the search once an external flag is raised.
///
/// The flag is read on every step with relaxed ordering; the search stops
/// within one step of the flag becoming visible.
#[derive(Debug, Clone, Copy)]
pub struct InterruptMonitor<'a> {
    stop_signal: &'a AtomicBool,
}

impl<'a> InterruptMonitor<'a> {
    #[inline]
    pub fn new(stop_signal: &'a AtomicBool) -> Self {
        Self { stop_signal }
    }
}

impl TreeSearchMonitor for InterruptMonitor<'_> {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _model: &ConstraintModel, _statistics: &BnbSolverStatistics) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    #[inline]
    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        if self.stop_signal.load(Ordering::Relaxed) {
            return SearchCommand::Terminate(AbortReason::Interrupted);
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reacts_to_flag() {
        let flag = AtomicBool::new(false);
        let mut monitor = InterruptMonitor::new(&flag);
        let state = SearchState::new(0, 0);
        let stats = BnbSolverStatistics::default();

        assert_eq!(monitor.search_command(&state, &stats), SearchCommand::Continue);
        flag.store(true, Ordering::Relaxed);
        assert_eq!(
            monitor.search_command(&state, &stats),
            SearchCommand::Terminate(AbortReason::Interrupted)
        );
    }
}
