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

//! # Overlap Detection
//!
//! Two requests conflict when their buffered windows intersect:
//!
//! ```text
//! a.start - buf(a.type) < b.end + buf(b.type)  &&  b.start - buf(b.type) < a.end + buf(a.type)
//! ```
//!
//! Windows that only touch do not conflict. Each conflicting pair is
//! reported once as `(i, j)` with `i < j` by input position, and the output
//! is sorted, so both detectors return identical vectors for the same input.
//!
//! - `OverlapDetector::detect_naive` tests every pair, `O(n^2)`.
//! - `OverlapDetector::detect` sorts by buffered start and sweeps with an
//!   active set, `O(n log n + k)` for `k` reported pairs plus the active set
//!   scans.

use crate::{buffer::BufferTable, index::RequestIndex, request::Request};
use apron_core::{interval::ClosedOpenInterval, num::TimeNumeric};

/// An unordered pair of conflicting requests, stored as `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlapPair {
    first: RequestIndex,
    second: RequestIndex,
}

impl OverlapPair {
    /// Creates the canonical pair for two distinct requests.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    #[inline]
    pub fn new(a: RequestIndex, b: RequestIndex) -> Self {
        assert!(
            a != b,
            "called `OverlapPair::new` with identical request indices: {}",
            a
        );
        if a < b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// The request that comes first in input order.
    #[inline]
    pub fn first(&self) -> RequestIndex {
        self.first
    }

    /// The request that comes later in input order.
    #[inline]
    pub fn second(&self) -> RequestIndex {
        self.second
    }
}

impl std::fmt::Display for OverlapPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.first.get(), self.second.get())
    }
}

/// Stateless buffered overlap detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapDetector;

impl OverlapDetector {
    #[inline]
    fn buffered_windows<T>(
        requests: &[Request<T>],
        buffers: &BufferTable<T>,
    ) -> Vec<ClosedOpenInterval<T>>
    where
        T: TimeNumeric,
    {
        requests
            .iter()
            .map(|r| r.buffered_window(buffers.buffer(r.type_code())))
            .collect()
    }

    /// Reference implementation testing every pair.
    ///
    /// ```rust
    /// use apron_model::{buffer::BufferTable, overlap::OverlapDetector, request::Request};
    ///
    /// let requests = vec![
    ///     Request::try_new("a", "AI", "A320", 0i64, 60).unwrap(),
    ///     Request::try_new("b", "AI", "A320", 60i64, 120).unwrap(),
    /// ];
    /// let mut buffers = BufferTable::new();
    /// assert!(OverlapDetector::detect_naive(&requests, &buffers).is_empty());
    ///
    /// buffers.insert("A320", 1).unwrap();
    /// assert_eq!(OverlapDetector::detect_naive(&requests, &buffers).len(), 1);
    /// ```
    pub fn detect_naive<T>(requests: &[Request<T>], buffers: &BufferTable<T>) -> Vec<OverlapPair>
    where
        T: TimeNumeric,
    {
        let windows = Self::buffered_windows(requests, buffers);
        let mut pairs = Vec::new();
        for i in 0..windows.len() {
            for j in (i + 1)..windows.len() {
                if windows[i].intersects(&windows[j]) {
                    pairs.push(OverlapPair::new(RequestIndex::new(i), RequestIndex::new(j)));
                }
            }
        }
        pairs
    }

    /// Sweep-line implementation.
    ///
    /// Requests are visited by buffered start. A request leaves the active
    /// set once its buffered end is at or before the start being visited,
    /// since no later request can reach back into it.
    pub fn detect<T>(requests: &[Request<T>], buffers: &BufferTable<T>) -> Vec<OverlapPair>
    where
        T: TimeNumeric,
    {
        if requests.len() < 2 {
            return Vec::new();
        }

        let windows = Self::buffered_windows(requests, buffers);
        let mut order: Vec<usize> = (0..windows.len()).collect();
        order.sort_unstable_by_key(|&i| (windows[i].start(), i));

        let mut active: Vec<usize> = Vec::new();
        let mut pairs = Vec::new();
        for &current in &order {
            let window = windows[current];
            active.retain(|&other| windows[other].end() > window.start());
            for &other in &active {
                if windows[other].intersects(&window) {
                    pairs.push(OverlapPair::new(
                        RequestIndex::new(other),
                        RequestIndex::new(current),
                    ));
                }
            }
            active.push(current);
        }

        pairs.sort_unstable();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn req(id: &str, ty: &str, start: i64, end: i64) -> Request<i64> {
        Request::try_new(id, "AI", ty, start, end).unwrap()
    }

    fn pair(a: usize, b: usize) -> OverlapPair {
        OverlapPair::new(RequestIndex::new(a), RequestIndex::new(b))
    }

    #[test]
    fn test_pair_is_canonical() {
        let p = pair(5, 2);
        assert_eq!(p.first().get(), 2);
        assert_eq!(p.second().get(), 5);
        assert_eq!(p, pair(2, 5));
        assert_eq!(format!("{}", p), "(2, 5)");
    }

    #[test]
    #[should_panic(expected = "called `OverlapPair::new` with identical request indices")]
    fn test_pair_rejects_self_loop() {
        let _ = pair(1, 1);
    }

    #[test]
    fn test_zero_or_one_request_has_no_overlaps() {
        let buffers = BufferTable::new();
        assert!(OverlapDetector::detect(&[], &buffers).is_empty());
        assert!(OverlapDetector::detect(&[req("a", "A320", 0, 10)], &buffers).is_empty());
        assert!(OverlapDetector::detect_naive(&[req("a", "A320", 0, 10)], &buffers).is_empty());
    }

    #[test]
    fn test_touching_windows_do_not_overlap() {
        let requests = vec![req("a", "A320", 0, 10), req("b", "A320", 10, 20)];
        let buffers = BufferTable::new();
        assert!(OverlapDetector::detect(&requests, &buffers).is_empty());
    }

    #[test]
    fn test_buffer_is_applied_per_type() {
        // a ends at 100, b starts at 110. Buffers of 5 on both types make
        // the padded windows touch at 105, one more unit on B737 overlaps.
        let requests = vec![req("a", "A320", 0, 100), req("b", "B737", 110, 200)];
        let mut buffers = BufferTable::new();
        buffers.insert("A320", 5).unwrap();
        buffers.insert("B737", 5).unwrap();
        assert!(OverlapDetector::detect(&requests, &buffers).is_empty());

        buffers.insert("B737", 6).unwrap();
        assert_eq!(OverlapDetector::detect(&requests, &buffers), vec![pair(0, 1)]);
    }

    #[test]
    fn test_output_is_sorted_by_input_position() {
        let requests = vec![
            req("late", "A320", 50, 70),
            req("early", "A320", 0, 60),
            req("mid", "A320", 55, 65),
        ];
        let buffers = BufferTable::new();
        let got = OverlapDetector::detect(&requests, &buffers);
        assert_eq!(got, vec![pair(0, 1), pair(0, 2), pair(1, 2)]);
    }

    #[test]
    fn test_detection_is_symmetric_in_input_order() {
        let forward = vec![
            req("a", "A320", 0, 30),
            req("b", "A320", 20, 50),
            req("c", "A320", 60, 90),
        ];
        let mut backward = forward.clone();
        backward.reverse();
        let buffers = BufferTable::new();

        let ids = |requests: &[Request<i64>], pairs: Vec<OverlapPair>| {
            let mut named: Vec<(String, String)> = pairs
                .into_iter()
                .map(|p| {
                    let a = requests[p.first().get()].id().as_str().to_owned();
                    let b = requests[p.second().get()].id().as_str().to_owned();
                    if a < b { (a, b) } else { (b, a) }
                })
                .collect();
            named.sort();
            named
        };

        let f = ids(&forward, OverlapDetector::detect(&forward, &buffers));
        let b = ids(&backward, OverlapDetector::detect(&backward, &buffers));
        assert_eq!(f, b);
        assert_eq!(f, vec![("a".to_owned(), "b".to_owned())]);
    }

    #[test]
    fn test_zero_buffer_matches_plain_intersection() {
        let requests = vec![
            req("a", "A320", 0, 30),
            req("b", "B737", 29, 31),
            req("c", "A320", 30, 40),
        ];
        let mut buffers = BufferTable::new();
        buffers.insert("A320", 0).unwrap();

        let expected: Vec<OverlapPair> = (0..requests.len())
            .flat_map(|i| ((i + 1)..requests.len()).map(move |j| (i, j)))
            .filter(|&(i, j)| requests[i].window().intersects(&requests[j].window()))
            .map(|(i, j)| pair(i, j))
            .collect();
        assert_eq!(OverlapDetector::detect(&requests, &buffers), expected);
        assert_eq!(expected, vec![pair(0, 1), pair(1, 2)]);
    }

    #[test]
    fn test_sweep_agrees_with_naive_on_random_instances() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let types = ["A320", "B737", "A380"];
        for round in 0..200 {
            let n = rng.random_range(0..40);
            let requests: Vec<Request<i64>> = (0..n)
                .map(|i| {
                    let start = rng.random_range(0..500);
                    let len = rng.random_range(1..80);
                    let ty = types[rng.random_range(0..types.len())];
                    req(&format!("r{}", i), ty, start, start + len)
                })
                .collect();
            let mut buffers = BufferTable::new();
            for ty in types {
                if rng.random_bool(0.5) {
                    buffers.insert(ty, rng.random_range(0..20)).unwrap();
                }
            }

            let naive = OverlapDetector::detect_naive(&requests, &buffers);
            let sweep = OverlapDetector::detect(&requests, &buffers);
            assert_eq!(naive, sweep, "round {} disagrees", round);
        }
    }

    #[test]
    fn test_padding_saturates_near_time_bounds() {
        let requests = vec![
            Request::try_new("a", "AI", "A320", i64::MIN + 1, i64::MIN + 10).unwrap(),
            Request::try_new("b", "AI", "A320", i64::MAX - 10, i64::MAX - 1).unwrap(),
        ];
        let mut buffers = BufferTable::new();
        buffers.insert("A320", 100).unwrap();
        assert!(OverlapDetector::detect(&requests, &buffers).is_empty());
        assert!(OverlapDetector::detect_naive(&requests, &buffers).is_empty());
    }
}
