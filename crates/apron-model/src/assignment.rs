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

use crate::index::{BayIndex, RequestIndex};

/// A request to bay map where every request takes at most one bay.
///
/// Single assignment holds by construction: a request is either mapped to
/// one bay or left unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    bays: Vec<Option<BayIndex>>,
}

impl Assignment {
    /// Creates an assignment with every request unassigned.
    #[inline]
    pub fn unassigned(num_requests: usize) -> Self {
        Self {
            bays: vec![None; num_requests],
        }
    }

    #[inline]
    pub fn from_vec(bays: Vec<Option<BayIndex>>) -> Self {
        Self { bays }
    }

    #[inline]
    pub fn num_requests(&self) -> usize {
        self.bays.len()
    }

    /// Returns the number of requests that hold a bay.
    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.bays.iter().filter(|b| b.is_some()).count()
    }

    #[inline]
    pub fn bay_of(&self, request: RequestIndex) -> Option<BayIndex> {
        debug_assert!(
            request.get() < self.bays.len(),
            "called `Assignment::bay_of` with request index out of bounds: the len is {} but the index is {}",
            self.bays.len(),
            request.get()
        );
        self.bays[request.get()]
    }

    #[inline]
    pub fn assign(&mut self, request: RequestIndex, bay: BayIndex) {
        debug_assert!(
            request.get() < self.bays.len(),
            "called `Assignment::assign` with request index out of bounds: the len is {} but the index is {}",
            self.bays.len(),
            request.get()
        );
        self.bays[request.get()] = Some(bay);
    }

    #[inline]
    pub fn unassign(&mut self, request: RequestIndex) {
        debug_assert!(
            request.get() < self.bays.len(),
            "called `Assignment::unassign` with request index out of bounds: the len is {} but the index is {}",
            self.bays.len(),
            request.get()
        );
        self.bays[request.get()] = None;
    }

    /// Iterates the assigned `(request, bay)` pairs in request order.
    #[inline]
    pub fn iter_assigned(&self) -> impl Iterator<Item = (RequestIndex, BayIndex)> + '_ {
        self.bays
            .iter()
            .enumerate()
            .filter_map(|(r, b)| b.map(|b| (RequestIndex::new(r), b)))
    }

    #[inline]
    pub fn as_slice(&self) -> &[Option<BayIndex>] {
        &self.bays
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Assignment(")?;
        for (i, (r, b)) in self.iter_assigned().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}->{}", r.get(), b.get())?;
        }
        write!(f, ")")
    }
}
