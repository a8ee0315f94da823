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

//! Apron-BnB: branch-and-bound for bay assignment
//!
//! A deterministic depth-first branch-and-bound engine that maximizes the
//! revenue of a `ConstraintModel`. Branching, bounding, monitoring and
//! incumbent handling are separate seams so each can be swapped without
//! touching the search loop.
//!
//! Core flow
//! - Build an `apron_model::constraint::ConstraintModel`.
//! - Choose a `branching::decision::DecisionBuilder` (request ordering).
//! - Choose a `bound::RevenueBound` (admissible upper bound on the rest).
//! - Optionally pass fixed decisions, a shared incumbent and monitors.
//! - Run `bnb::BnbSolver`.
//!
//! Design highlights
//! - The search state is mutated in place and restored through an undo
//!   trail; pending decisions live on a framed stack.
//! - A greedy pass seeds the incumbent before the first node, so an aborted
//!   search always carries a feasible assignment.
//! - Deterministic given deterministic builders and bounds.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `branching`: decisions and decision builders.
//! - `bound`: revenue upper bounds.
//! - `greedy`: the warm start.
//! - `incumbent`: local and shared incumbent stores.
//! - `monitor`: tree-search monitors (limits, logging, composition).
//! - `result`: solver outcomes with termination reasons.
//! - `solution`: an assignment together with its revenue.
//! - `state`: the mutable search state.
//! - `stats`: lightweight counters and timing.
//! - `fixed`: decisions pinned before the search starts.

pub mod bnb;
pub mod bound;
pub mod branching;
pub mod fixed;
pub mod greedy;
pub mod incumbent;
pub mod monitor;
pub mod result;
pub mod solution;
mod stack;
pub mod state;
pub mod stats;
mod trail;
