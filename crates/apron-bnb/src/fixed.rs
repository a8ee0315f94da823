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

//! Fixed decisions
//!
//! `FixedAssignment` pins a request to a bay, or to "unassigned", before the
//! search starts. The parallel root split fixes the first decision of each
//! worker this way; callers can also pin pre-placed aircraft.
//!
//! Ordering
//! - Total order: by request, then bay (`None` first).

use apron_model::index::{BayIndex, RequestIndex};

/// A decision applied at the root and never revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedAssignment {
    pub request_index: RequestIndex,
    pub bay_index: Option<BayIndex>,
}

impl FixedAssignment {
    #[inline]
    pub fn assigned(request_index: RequestIndex, bay_index: BayIndex) -> Self {
        Self {
            request_index,
            bay_index: Some(bay_index),
        }
    }

    #[inline]
    pub fn unassigned(request_index: RequestIndex) -> Self {
        Self {
            request_index,
            bay_index: None,
        }
    }
}

impl std::fmt::Display for FixedAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.bay_index {
            Some(bay) => write!(f, "FixedAssignment(request: {}, bay: {})", self.request_index, bay),
            None => write!(f, "FixedAssignment(request: {}, unassigned)", self.request_index),
        }
    }
}
