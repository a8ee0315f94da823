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

//! # Numeric Bounds
//!
//! `TimeNumeric` collects the bounds every time value in Apron must satisfy:
//! a signed primitive integer (`i16`, `i32`, `i64`, `isize`, ...) with
//! saturating addition and subtraction for buffer padding. The unit is up to
//! the caller (minutes or seconds since an epoch are typical).
//!
//! Revenue is an `f64`. Sums of revenues are compared with a relative
//! tolerance so that differently ordered summations of the same set of
//! values never count as an improvement over each other.

use num_traits::{
    PrimInt, Signed,
    ops::saturating::{SaturatingAdd, SaturatingSub},
};
use std::hash::Hash;

/// Numeric bound for instants and durations.
pub trait TimeNumeric:
    PrimInt
    + Signed
    + SaturatingAdd
    + SaturatingSub
    + std::fmt::Debug
    + std::fmt::Display
    + Hash
    + Send
    + Sync
{
}

impl<T> TimeNumeric for T where
    T: PrimInt
        + Signed
        + SaturatingAdd
        + SaturatingSub
        + std::fmt::Debug
        + std::fmt::Display
        + Hash
        + Send
        + Sync
{
}

/// Relative tolerance for revenue comparisons.
pub const REVENUE_TOLERANCE: f64 = 1e-9;

#[inline(always)]
fn tolerance_for(a: f64, b: f64) -> f64 {
    REVENUE_TOLERANCE * 1.0_f64.max(a.abs()).max(b.abs())
}

/// Returns `true` if `candidate` is strictly better than `incumbent`
/// beyond the revenue tolerance.
///
/// An incumbent of `f64::NEG_INFINITY` stands for "no solution yet" and is
/// beaten by every finite candidate.
///
/// ```rust
/// use apron_core::num::is_revenue_improvement;
///
/// assert!(is_revenue_improvement(10.5, 10.0));
/// assert!(!is_revenue_improvement(10.0 + 1e-12, 10.0));
/// ```
#[inline(always)]
pub fn is_revenue_improvement(candidate: f64, incumbent: f64) -> bool {
    if !candidate.is_finite() || !incumbent.is_finite() {
        return candidate > incumbent;
    }
    candidate > incumbent + tolerance_for(candidate, incumbent)
}

/// Returns `true` if both revenue values are equal within the tolerance.
#[inline(always)]
pub fn revenue_approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= tolerance_for(a, b)
}
