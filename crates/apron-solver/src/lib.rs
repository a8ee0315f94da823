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

//! # Apron Solver
//!
//! The entry point of the bay assignment engine. A caller hands over a
//! validated `Problem<T>` and a `SolverConfig` and gets back a
//! `SolveResult`: the status, the total revenue and the ordered list of
//! assignment decisions.
//!
//! ## Modules
//!
//! - `config`: `SolverConfig`, its builder and the zero revenue policy.
//! - `solver`: the `Solver` facade. Runs overlap detection, builds the
//!   constraint model, searches it and maps the outcome to a status.
//! - `parallel`: splits the root decision over worker threads that share
//!   one incumbent.
//! - `assemble`: turns the chosen assignment into `AssignmentDecision`s.
//! - `error`: errors raised before a model is built.
//!
//! ## Status contract
//!
//! An exhausted search is `Optimal`, even with zero assignments. A search
//! stopped by the time budget is `TimedOut` and carries the incumbent. Any
//! other early stop is `FeasibleSuboptimal`. `Infeasible` is reserved for
//! structurally malformed models.

pub mod assemble;
pub mod config;
pub mod error;
pub mod parallel;
pub mod solver;
