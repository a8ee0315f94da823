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

//! # Half-Open Intervals
//!
//! `ClosedOpenInterval<T>` is the occupancy window `[start, end)` of a
//! request. Two windows that merely touch (`a.end == b.start`) do not
//! intersect, which is exactly the "equal boundary is no conflict" rule of
//! the overlap detector.

use crate::num::TimeNumeric;
use num_traits::ops::saturating::{SaturatingAdd, SaturatingSub};

/// A half-open interval `[start_inclusive, end_exclusive)`.
///
/// # Invariants
///
/// `start_inclusive <= end_exclusive`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClosedOpenInterval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> ClosedOpenInterval<T>
where
    T: TimeNumeric,
{
    /// Creates a new interval.
    ///
    /// # Panics
    ///
    /// Panics if `start_inclusive > end_exclusive`.
    ///
    /// ```rust
    /// # use apron_core::interval::ClosedOpenInterval;
    /// let iv = ClosedOpenInterval::new(0i64, 10);
    /// assert_eq!(iv.duration(), 10);
    /// ```
    #[inline]
    pub fn new(start_inclusive: T, end_exclusive: T) -> Self {
        assert!(
            start_inclusive <= end_exclusive,
            "called `ClosedOpenInterval::new` with start {} after end {}",
            start_inclusive,
            end_exclusive
        );
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// Creates a new interval, returning `None` if `start_inclusive > end_exclusive`.
    #[inline]
    pub fn try_new(start_inclusive: T, end_exclusive: T) -> Option<Self> {
        if start_inclusive > end_exclusive {
            return None;
        }
        Some(Self {
            start_inclusive,
            end_exclusive,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> T {
        self.start_inclusive
    }

    #[inline(always)]
    pub fn end(&self) -> T {
        self.end_exclusive
    }

    /// Returns `end - start`.
    #[inline]
    pub fn duration(&self) -> T {
        SaturatingSub::saturating_sub(&self.end_exclusive, &self.start_inclusive)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_inclusive == self.end_exclusive
    }

    /// Returns `true` if `point` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, point: T) -> bool {
        self.start_inclusive <= point && point < self.end_exclusive
    }

    /// Returns `true` if the two intervals share at least one point.
    ///
    /// ```rust
    /// # use apron_core::interval::ClosedOpenInterval;
    /// let a = ClosedOpenInterval::new(0i64, 10);
    /// let b = ClosedOpenInterval::new(10i64, 20);
    /// let c = ClosedOpenInterval::new(9i64, 11);
    /// assert!(!a.intersects(&b));
    /// assert!(a.intersects(&c) && b.intersects(&c));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start_inclusive < other.end_exclusive
            && other.start_inclusive < self.end_exclusive
    }

    /// Widens the interval by `margin` on both sides, saturating at the
    /// bounds of `T`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `margin` is negative.
    ///
    /// ```rust
    /// # use apron_core::interval::ClosedOpenInterval;
    /// let iv = ClosedOpenInterval::new(100i64, 200).padded(15);
    /// assert_eq!((iv.start(), iv.end()), (85, 215));
    /// ```
    #[inline]
    pub fn padded(&self, margin: T) -> Self {
        debug_assert!(
            margin >= T::zero(),
            "called `ClosedOpenInterval::padded` with negative margin {}",
            margin
        );
        Self {
            start_inclusive: SaturatingSub::saturating_sub(&self.start_inclusive, &margin),
            end_exclusive: SaturatingAdd::saturating_add(&self.end_exclusive, &margin),
        }
    }
}

impl<T> std::fmt::Debug for ClosedOpenInterval<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}, {:?})", self.start_inclusive, self.end_exclusive)
    }
}

impl<T> std::fmt::Display for ClosedOpenInterval<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type I = ClosedOpenInterval<i64>;

    #[test]
    fn test_try_new_rejects_inverted_bounds() {
        assert!(I::try_new(5, 4).is_none());
        assert!(I::try_new(5, 5).is_some());
        assert!(I::try_new(4, 5).is_some());
    }

    #[test]
    #[should_panic(expected = "called `ClosedOpenInterval::new` with start 3 after end 2")]
    fn test_new_panics_on_inverted_bounds() {
        let _ = I::new(3, 2);
    }

    #[test]
    fn test_touching_intervals_do_not_intersect() {
        let a = I::new(0, 10);
        let b = I::new(10, 20);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_intersection_is_symmetric() {
        let cases = [
            (I::new(0, 10), I::new(5, 15)),
            (I::new(0, 10), I::new(2, 3)),
            (I::new(0, 10), I::new(20, 30)),
            (I::new(-5, 0), I::new(-1, 1)),
        ];
        for (a, b) in cases {
            assert_eq!(a.intersects(&b), b.intersects(&a), "{a} vs {b}");
        }
    }

    #[test]
    fn test_empty_interval_intersects_nothing() {
        let empty = I::new(5, 5);
        assert!(empty.is_empty());
        assert!(!empty.intersects(&I::new(0, 10)));
        assert!(!I::new(0, 10).intersects(&empty));
        assert!(!empty.intersects(&empty));
        assert!(!empty.contains(5));
    }

    #[test]
    fn test_padding_turns_touching_into_intersecting() {
        let a = I::new(0, 10);
        let b = I::new(10, 20);
        assert!(a.padded(1).intersects(&b));
        assert!(!a.padded(0).intersects(&b));
    }

    #[test]
    fn test_padding_saturates() {
        let iv = ClosedOpenInterval::new(i64::MIN + 1, i64::MAX - 1).padded(10);
        assert_eq!(iv.start(), i64::MIN);
        assert_eq!(iv.end(), i64::MAX);
    }

    #[test]
    fn test_contains_and_duration() {
        let iv = I::new(3, 8);
        assert_eq!(iv.duration(), 5);
        assert!(iv.contains(3));
        assert!(iv.contains(7));
        assert!(!iv.contains(8));
        assert_eq!(format!("{}", iv), "[3, 8)");
    }
}
