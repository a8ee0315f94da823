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

use crate::{solution::Solution, stats::BnbSolverStatistics};
use std::time::Duration;

/// What a finished search produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverResult {
    /// The model is malformed or a fixed decision could not be applied.
    Infeasible,
    /// A solution whose optimality was proven by exhausting the tree.
    Optimal(Solution),
    /// A feasible solution, not proven optimal.
    Feasible(Solution),
    /// The search stopped without a solution and without a proof.
    Unknown,
}

impl SolverResult {
    /// Returns the solution, if any.
    #[inline]
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    #[inline]
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(s) => write!(f, "Optimal(revenue={})", s.revenue()),
            SolverResult::Feasible(s) => write!(f, "Feasible(revenue={})", s.revenue()),
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why a monitor stopped the search early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The wall-clock budget was used up.
    TimeLimit(Duration),
    /// The node budget was used up.
    NodeLimit(u64),
    /// An external stop flag was raised.
    Interrupted,
    /// Any other monitor-defined reason.
    Other(String),
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::TimeLimit(limit) => write!(f, "time limit of {:?} reached", limit),
            AbortReason::NodeLimit(limit) => write!(f, "node limit of {} reached", limit),
            AbortReason::Interrupted => write!(f, "interrupted"),
            AbortReason::Other(msg) => write!(f, "{}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The tree was exhausted.
    OptimalityProven,
    /// The model is malformed or the fixed decisions clash.
    InfeasibilityProven,
    /// A monitor stopped the search.
    Aborted(AbortReason),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the solver after termination.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome {
    result: SolverResult,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
}

impl BnbSolverOutcome {
    #[inline]
    pub fn optimal(solution: Solution, statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted(
        solution: Option<Solution>,
        reason: AbortReason,
        statistics: BnbSolverStatistics,
    ) -> Self {
        let result = match solution {
            Some(sol) => SolverResult::Feasible(sol),
            None => SolverResult::Unknown,
        };
        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason),
            statistics,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    /// Splits the outcome into its parts.
    #[inline]
    pub fn into_parts(self) -> (SolverResult, TerminationReason, BnbSolverStatistics) {
        (self.result, self.termination_reason, self.statistics)
    }
}

impl std::fmt::Display for BnbSolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result:      {}", self.result)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::assignment::Assignment;

    fn solution(revenue: f64) -> Solution {
        Solution::new(revenue, Assignment::unassigned(1))
    }

    #[test]
    fn test_aborted_with_solution_is_feasible() {
        let outcome = BnbSolverOutcome::aborted(
            Some(solution(3.0)),
            AbortReason::NodeLimit(10),
            BnbSolverStatistics::default(),
        );
        assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
        assert_eq!(
            format!("{}", outcome.termination_reason()),
            "Aborted: node limit of 10 reached"
        );
        assert!(!outcome.is_optimal());
    }

    #[test]
    fn test_aborted_without_solution_is_unknown() {
        let outcome = BnbSolverOutcome::aborted(
            None,
            AbortReason::Interrupted,
            BnbSolverStatistics::default(),
        );
        assert_eq!(outcome.result(), &SolverResult::Unknown);
        assert!(outcome.result().solution().is_none());
    }

    #[test]
    fn test_optimal_and_infeasible() {
        let optimal = BnbSolverOutcome::optimal(solution(0.0), BnbSolverStatistics::default());
        assert!(optimal.is_optimal());
        assert_eq!(format!("{}", optimal.result()), "Optimal(revenue=0)");

        let infeasible = BnbSolverOutcome::infeasible(BnbSolverStatistics::default());
        assert_eq!(
            infeasible.termination_reason(),
            &TerminationReason::InfeasibilityProven
        );
    }
}
