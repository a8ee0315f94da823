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

#![allow(dead_code)]

use crate::{branching::decision::Decision, state::SearchState};
use apron_model::index::RequestIndex;

/// One decision applied to the search state, with what is needed to undo it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrailEntry {
    old_revenue: f64,
    request: RequestIndex,
}

impl TrailEntry {
    #[inline]
    pub fn old_revenue(&self) -> f64 {
        self.old_revenue
    }

    #[inline]
    pub fn request(&self) -> RequestIndex {
        self.request
    }
}

impl std::fmt::Display for TrailEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TrailEntry(request: {}, old_revenue: {})",
            self.request.get(),
            self.old_revenue
        )
    }
}

/// A linear undo log with frame markers for backtracking.
///
/// Usage:
/// 1. `push_frame()` before descending into a child.
/// 2. `apply_decision(state, decision)` for the decision of that child.
/// 3. `backtrack(state)` restores the state to the start of the frame.
///
/// Backtracking restores the recorded revenue verbatim instead of
/// subtracting the delta again.
#[derive(Debug, Clone, Default)]
pub struct SearchTrail {
    entries: Vec<TrailEntry>,
    /// `frames[i]` is the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl SearchTrail {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    #[inline]
    pub fn preallocated(num_requests: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_requests),
            frames: Vec::with_capacity(num_requests + 1),
        }
    }

    pub fn ensure_capacity(&mut self, num_requests: usize) {
        if self.entries.capacity() < num_requests {
            self.entries.reserve(num_requests - self.entries.len());
        }
        if self.frames.capacity() < num_requests + 1 {
            self.frames.reserve((num_requests + 1) - self.frames.len());
        }
    }

    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Applies `decision` to `state` and records how to undo it.
    #[inline]
    pub fn apply_decision(&mut self, state: &mut SearchState, decision: &Decision) {
        debug_assert!(
            !self.frames.is_empty(),
            "called `SearchTrail::apply_decision` without an open frame"
        );

        let old_revenue = state.current_revenue();
        self.entries.push(TrailEntry {
            old_revenue,
            request: decision.request(),
        });

        match decision.bay() {
            Some(bay) => state.assign(decision.request(), bay),
            None => state.leave_unassigned(decision.request()),
        }
        state.set_current_revenue(old_revenue + decision.revenue_delta());
    }

    /// Undoes every entry of the top frame and pops it.
    /// Returns `false` if there was no frame to pop.
    #[inline]
    pub fn backtrack(&mut self, state: &mut SearchState) -> bool {
        let Some(start) = self.frames.pop() else {
            return false;
        };
        while self.entries.len() > start {
            if let Some(entry) = self.entries.pop() {
                state.retract(entry.request);
                state.set_current_revenue(entry.old_revenue);
            }
        }
        true
    }

    /// Clears entries and frames, keeping the allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }
}

impl std::fmt::Display for SearchTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchTrail(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}
