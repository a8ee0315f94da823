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

//! Incumbent management for branch-and-bound
//!
//! `IncumbentStore` is the minimal interface the engine uses to read and
//! publish the best known revenue (the lower bound on the optimum). It hides
//! whether the incumbent is local to one search or shared between workers.
//!
//! Implementations
//! - `NoSharedIncumbent`: local only. `initial_lower_bound` is
//!   `f64::NEG_INFINITY`, `tighten(x) = x`, publishing is a no-op.
//! - `SharedIncumbentAdapter<'a>`: wraps a `SharedIncumbent`;
//!   `tighten(x)` returns `max(shared, x)` and publishing attempts an
//!   installation.
//!
//! `SharedIncumbent` keeps the revenue in an `AtomicU64` (the `f64` bit
//! pattern) for lock-free reads in the hot loop, and the assignment behind a
//! `Mutex` that is only taken when a candidate looks better.

use crate::solution::Solution;
use apron_core::num::is_revenue_improvement;
use std::sync::{
    Mutex, MutexGuard,
    atomic::{AtomicU64, Ordering},
};

/// Source and sink of the incumbent revenue during one search.
pub trait IncumbentStore {
    /// Returns the revenue a solution has to beat at the start.
    fn initial_lower_bound(&self) -> f64;
    /// Merges the local best revenue with any externally known one.
    fn tighten(&self, current_local_best: f64) -> f64;
    /// Notifies the store that the search found an improving solution.
    fn on_solution_found(&self, solution: &Solution);
}

/// An incumbent store that shares nothing. Use this for single-threaded
/// solving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSharedIncumbent;

impl NoSharedIncumbent {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl IncumbentStore for NoSharedIncumbent {
    #[inline(always)]
    fn initial_lower_bound(&self) -> f64 {
        f64::NEG_INFINITY
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: f64) -> f64 {
        current_local_best
    }

    #[inline(always)]
    fn on_solution_found(&self, _: &Solution) {}
}

/// The best solution known to a group of concurrent searches.
#[derive(Debug)]
pub struct SharedIncumbent {
    lower_bound: AtomicU64,
    solution: Mutex<Option<Solution>>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedIncumbent {
    /// Creates a shared incumbent with no solution installed.
    #[inline]
    pub fn new() -> Self {
        Self {
            lower_bound: AtomicU64::new(f64::NEG_INFINITY.to_bits()),
            solution: Mutex::new(None),
        }
    }

    /// Returns the best installed revenue, or `f64::NEG_INFINITY`.
    #[inline]
    pub fn lower_bound(&self) -> f64 {
        f64::from_bits(self.lower_bound.load(Ordering::Relaxed))
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, Option<Solution>> {
        // A panicking worker cannot leave the slot half written.
        self.solution
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns a copy of the installed solution, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Solution> {
        self.lock().clone()
    }

    /// Installs `candidate` if it beats the current incumbent.
    /// Returns `true` if the candidate was installed.
    pub fn try_install(&self, candidate: &Solution) -> bool {
        if !is_revenue_improvement(candidate.revenue(), self.lower_bound()) {
            return false;
        }

        let mut guard = self.lock();
        // Re-check under the lock; another worker may have installed since.
        if let Some(current) = guard.as_ref()
            && !is_revenue_improvement(candidate.revenue(), current.revenue())
        {
            return false;
        }

        *guard = Some(candidate.clone());
        self.lower_bound
            .store(candidate.revenue().to_bits(), Ordering::Relaxed);
        true
    }
}

/// An incumbent store backed by a borrowed `SharedIncumbent`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct SharedIncumbentAdapter<'a> {
    inner: &'a SharedIncumbent,
}

impl<'a> SharedIncumbentAdapter<'a> {
    #[inline(always)]
    pub fn new(inner: &'a SharedIncumbent) -> Self {
        Self { inner }
    }
}

impl IncumbentStore for SharedIncumbentAdapter<'_> {
    #[inline(always)]
    fn initial_lower_bound(&self) -> f64 {
        self.inner.lower_bound()
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: f64) -> f64 {
        self.inner.lower_bound().max(current_local_best)
    }

    #[inline(always)]
    fn on_solution_found(&self, solution: &Solution) {
        self.inner.try_install(solution);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::assignment::Assignment;
    use std::thread;

    fn solution(revenue: f64) -> Solution {
        Solution::new(revenue, Assignment::unassigned(2))
    }

    #[test]
    fn test_initial_state() {
        let inc = SharedIncumbent::new();
        assert_eq!(inc.lower_bound(), f64::NEG_INFINITY);
        assert!(inc.snapshot().is_none());
    }

    #[test]
    fn test_install_better_and_reject_worse_or_equal() {
        let inc = SharedIncumbent::new();
        assert!(inc.try_install(&solution(10.0)));
        assert_eq!(inc.lower_bound(), 10.0);

        assert!(!inc.try_install(&solution(10.0)));
        assert!(!inc.try_install(&solution(5.0)));
        assert!(inc.try_install(&solution(12.5)));
        assert_eq!(inc.snapshot().map(|s| s.revenue()), Some(12.5));
    }

    #[test]
    fn test_empty_assignment_installs_on_fresh_incumbent() {
        let inc = SharedIncumbent::new();
        assert!(inc.try_install(&solution(0.0)));
        assert_eq!(inc.lower_bound(), 0.0);
    }

    #[test]
    fn test_adapters() {
        let local = NoSharedIncumbent::new();
        assert_eq!(local.initial_lower_bound(), f64::NEG_INFINITY);
        assert_eq!(local.tighten(3.0), 3.0);

        let shared = SharedIncumbent::new();
        shared.try_install(&solution(7.0));
        let adapter = SharedIncumbentAdapter::new(&shared);
        assert_eq!(adapter.initial_lower_bound(), 7.0);
        assert_eq!(adapter.tighten(3.0), 7.0);
        assert_eq!(adapter.tighten(9.0), 9.0);

        adapter.on_solution_found(&solution(8.0));
        assert_eq!(shared.lower_bound(), 8.0);
    }

    #[test]
    fn test_concurrent_installs_keep_the_maximum() {
        let inc = SharedIncumbent::new();
        thread::scope(|scope| {
            for t in 0..8 {
                let inc = &inc;
                scope.spawn(move || {
                    for k in 0..100 {
                        inc.try_install(&solution((t * 100 + k) as f64));
                    }
                });
            }
        });
        assert_eq!(inc.lower_bound(), 799.0);
        assert_eq!(inc.snapshot().map(|s| s.revenue()), Some(799.0));
    }
}
