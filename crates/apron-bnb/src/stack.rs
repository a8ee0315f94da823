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

use crate::branching::decision::Decision;

/// A frame-structured LIFO stack of pending decisions.
///
/// All enqueued `Decision`s live in one vector; `frames` marks where each
/// decision level begins. Popping a frame truncates the entries back to the
/// recorded start.
#[derive(Clone, Debug, Default)]
pub struct SearchStack {
    entries: Vec<Decision>,
    /// `frames[i]` is the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl SearchStack {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a stack sized for `num_requests` levels of `num_bays + 1`
    /// children each.
    #[inline]
    pub fn preallocated(num_requests: usize, num_bays: usize) -> Self {
        let mut stack = Self::new();
        stack.ensure_capacity(num_requests, num_bays);
        stack
    }

    #[inline]
    pub fn ensure_capacity(&mut self, num_requests: usize, num_bays: usize) {
        let entry_capacity = num_requests.saturating_mul(num_bays.saturating_add(1));
        let frame_capacity = num_requests.saturating_add(1);

        if self.entries.capacity() < entry_capacity {
            self.entries.reserve(entry_capacity - self.entries.len());
        }
        if self.frames.capacity() < frame_capacity {
            self.frames.reserve(frame_capacity - self.frames.len());
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

    /// Marks the start of a new decision level.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Drops the current level together with its pending decisions.
    #[inline]
    pub fn pop_frame(&mut self) -> Option<()> {
        let start = self.frames.pop()?;
        self.entries.truncate(start);
        Some(())
    }

    #[inline]
    pub fn push(&mut self, decision: Decision) {
        self.entries.push(decision);
    }

    #[inline]
    pub fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Decision>,
    {
        self.entries.extend(iter);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Decision> {
        if self.is_current_level_empty() {
            return None;
        }
        self.entries.pop()
    }

    /// Clears entries and frames, keeping the allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    #[inline]
    pub fn is_current_level_empty(&self) -> bool {
        match self.frames.last() {
            Some(&start) => self.entries.len() == start,
            None => true,
        }
    }

    #[inline]
    pub fn current_frame_entries(&self) -> &[Decision] {
        match self.frames.last() {
            Some(&start) => &self.entries[start..],
            None => &[],
        }
    }
}

impl std::fmt::Display for SearchStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchStack(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::index::{BayIndex, RequestIndex};

    fn d(r: usize, b: usize) -> Decision {
        Decision::assign(RequestIndex::new(r), BayIndex::new(b), 1.0)
    }

    #[test]
    fn test_new_stack_is_empty() {
        let s = SearchStack::new();
        assert_eq!(s.num_entries(), 0);
        assert_eq!(s.depth(), 0);
        assert!(s.is_empty());
        assert!(s.is_current_level_empty());
        assert_eq!(s.current_frame_entries(), &[]);
        assert_eq!(format!("{}", s), "SearchStack(entries: 0, frames: 0)");
    }

    #[test]
    fn test_frames_isolate_levels() {
        let mut s = SearchStack::preallocated(4, 2);
        s.push_frame();
        s.extend([d(0, 0), d(0, 1)]);
        s.push_frame();
        s.push(d(1, 0));

        assert_eq!(s.depth(), 2);
        assert_eq!(s.current_frame_entries(), &[d(1, 0)]);
        assert_eq!(s.pop(), Some(d(1, 0)));
        assert!(s.is_current_level_empty());
        assert_eq!(s.pop(), None, "pop must not cross into the parent level");

        assert_eq!(s.pop_frame(), Some(()));
        assert_eq!(s.pop(), Some(d(0, 1)));
        assert_eq!(s.num_entries(), 1);
    }

    #[test]
    fn test_pop_frame_truncates_pending_entries() {
        let mut s = SearchStack::new();
        s.push_frame();
        s.push(d(0, 0));
        s.push_frame();
        s.extend([d(1, 0), d(1, 1), d(1, 2)]);

        s.pop_frame();
        assert_eq!(s.num_entries(), 1);
        s.pop_frame();
        assert!(s.is_empty());
        assert_eq!(s.pop_frame(), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut s = SearchStack::new();
        s.push_frame();
        s.push(d(0, 0));
        s.reset();
        assert_eq!(s.num_entries(), 0);
        assert!(s.is_empty());
    }
}
