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

//! Result assembly
//!
//! Maps an `Assignment` back onto the identifiers of the `Problem` it was
//! computed for. Decisions are listed in request input order and the total
//! revenue is the sum of exactly those decisions, accumulated in that
//! order, so the reported total always matches the list.

use apron_bnb::stats::BnbSolverStatistics;
use apron_core::num::TimeNumeric;
use apron_model::{
    assignment::Assignment,
    problem::Problem,
    request::{BayId, OwnerCode, RequestId, TypeCode},
};

/// The outcome class of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// The search was exhausted; no better assignment exists.
    Optimal,
    /// The search was stopped early by a node limit or an interrupt.
    FeasibleSuboptimal,
    /// The model was malformed. No decisions are reported.
    Infeasible,
    /// The time budget ran out. The best assignment found is reported.
    TimedOut,
}

impl SolveStatus {
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }

    /// Returns `true` if the result carries a feasible assignment.
    #[inline]
    pub fn has_assignment(&self) -> bool {
        !matches!(self, SolveStatus::Infeasible)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::FeasibleSuboptimal => write!(f, "FeasibleSuboptimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::TimedOut => write!(f, "TimedOut"),
        }
    }
}

/// One request parked on one bay.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentDecision {
    request_id: RequestId,
    owner: OwnerCode,
    type_code: TypeCode,
    bay: BayId,
    revenue: f64,
}

impl AssignmentDecision {
    #[inline]
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    #[inline]
    pub fn owner(&self) -> &OwnerCode {
        &self.owner
    }

    #[inline]
    pub fn type_code(&self) -> &TypeCode {
        &self.type_code
    }

    #[inline]
    pub fn bay(&self) -> &BayId {
        &self.bay
    }

    #[inline]
    pub fn revenue(&self) -> f64 {
        self.revenue
    }
}

impl std::fmt::Display for AssignmentDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} {}) -> {}: {}",
            self.request_id, self.owner, self.type_code, self.bay, self.revenue
        )
    }
}

#[derive(Debug, Clone)]
pub struct SolveResult {
    status: SolveStatus,
    total_revenue: f64,
    decisions: Vec<AssignmentDecision>,
    statistics: BnbSolverStatistics,
    termination: String,
}

impl SolveResult {
    #[inline]
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    #[inline]
    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    /// The assigned requests in input order. Unassigned requests are
    /// absent.
    #[inline]
    pub fn decisions(&self) -> &[AssignmentDecision] {
        &self.decisions
    }

    #[inline]
    pub fn into_decisions(self) -> Vec<AssignmentDecision> {
        self.decisions
    }

    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    /// Human readable reason the search stopped.
    #[inline]
    pub fn termination(&self) -> &str {
        &self.termination
    }

    /// Looks up the decision of a request by identifier.
    pub fn decision_for(&self, request_id: &str) -> Option<&AssignmentDecision> {
        self.decisions
            .iter()
            .find(|d| d.request_id.as_str() == request_id)
    }
}

impl std::fmt::Display for SolveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "SolveResult(status: {}, total_revenue: {}, assigned: {}, termination: {})",
            self.status,
            self.total_revenue,
            self.decisions.len(),
            self.termination
        )?;
        for decision in &self.decisions {
            writeln!(f, "  {}", decision)?;
        }
        Ok(())
    }
}

/// Builds the `SolveResult` for `assignment`.
///
/// `None` yields an empty decision list with zero revenue.
pub fn assemble<T>(
    problem: &Problem<T>,
    assignment: Option<&Assignment>,
    status: SolveStatus,
    statistics: BnbSolverStatistics,
    termination: String,
) -> SolveResult
where
    T: TimeNumeric,
{
    let decisions: Vec<AssignmentDecision> = assignment
        .map(|assignment| {
            assignment
                .iter_assigned()
                .map(|(r, b)| {
                    let request = problem.request(r);
                    AssignmentDecision {
                        request_id: request.id().clone(),
                        owner: request.owner().clone(),
                        type_code: request.type_code().clone(),
                        bay: problem.bay(b).clone(),
                        revenue: problem.revenue(r, b),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let total_revenue = decisions.iter().fold(0.0, |acc, d| acc + d.revenue);

    SolveResult {
        status,
        total_revenue,
        decisions,
        statistics,
        termination,
    }
}
