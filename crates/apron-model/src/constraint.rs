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

//! # Constraint Model
//!
//! The binary program behind a bay assignment problem, independent of any
//! particular solving algorithm.
//!
//! - One variable `x(r, b)` per compatible `(request, bay)` pair, weighted by
//!   its revenue. Incompatible pairs have no variable at all.
//! - Objective: maximize `sum revenue(r, b) * x(r, b)`.
//! - Single assignment: one `AtMostOne` over the variables of each request.
//! - No double booking: one `AtMostOne` over `{x(a, b), x(c, b)}` for every
//!   overlap pair `(a, c)` and every bay `b` both can use.
//!
//! Besides the explicit constraint list the model keeps a structural view
//! for custom algorithms: the variables of a request are contiguous and
//! sorted by bay, every bay lists its variables, and every request has a
//! conflict bitset over all requests.

use crate::{
    assignment::Assignment,
    err::ModelStructureError,
    index::{BayIndex, RequestIndex, VariableIndex},
    overlap::OverlapPair,
    problem::Problem,
};
use apron_core::num::TimeNumeric;
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;
use std::ops::Range;

/// A binary decision variable `x(request, bay)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    revenue: f64,
    request: RequestIndex,
    bay: BayIndex,
}

impl Variable {
    #[inline]
    pub fn request(&self) -> RequestIndex {
        self.request
    }

    #[inline]
    pub fn bay(&self) -> BayIndex {
        self.bay
    }

    /// Objective coefficient of the variable.
    #[inline]
    pub fn revenue(&self) -> f64 {
        self.revenue
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x({}, {}) * {}",
            self.request.get(),
            self.bay.get(),
            self.revenue
        )
    }
}

/// Where an `AtMostOne` constraint comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintOrigin {
    /// A request takes at most one bay.
    SingleAssignment(RequestIndex),
    /// Two overlapping requests do not share `bay`.
    NoDoubleBooking { pair: OverlapPair, bay: BayIndex },
}

/// `sum x(v) <= 1` over `variables`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtMostOne {
    origin: ConstraintOrigin,
    variables: SmallVec<[VariableIndex; 4]>,
}

impl AtMostOne {
    #[inline]
    pub fn origin(&self) -> ConstraintOrigin {
        self.origin
    }

    #[inline]
    pub fn variables(&self) -> &[VariableIndex] {
        &self.variables
    }
}

impl std::fmt::Display for AtMostOne {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, v) in self.variables.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "x{}", v.get())?;
        }
        write!(f, " <= 1")
    }
}

#[derive(Debug, Clone)]
pub struct ConstraintModel {
    num_requests: usize,
    num_bays: usize,
    variables: Vec<Variable>,
    request_offsets: Vec<usize>,
    bay_variables: Vec<Vec<VariableIndex>>,
    conflicts: Vec<FixedBitSet>,
    constraints: Vec<AtMostOne>,
}

impl ConstraintModel {
    /// Builds the model for a validated problem and its overlap pairs.
    ///
    /// ```rust
    /// use apron_model::{
    ///     constraint::ConstraintModel, overlap::OverlapDetector, problem::ProblemBuilder,
    /// };
    ///
    /// let mut b = ProblemBuilder::<i64>::new();
    /// b.add_bay("B1")
    ///     .add_bay("B2")
    ///     .allow("A320", "B1")
    ///     .allow("A320", "B2")
    ///     .add_request("r1", "AI", "A320", 0, 60)
    ///     .add_request("r2", "AI", "A320", 30, 90);
    /// let problem = b.build().unwrap();
    /// let overlaps = OverlapDetector::detect(problem.requests(), problem.buffers());
    ///
    /// let model = ConstraintModel::from_problem(&problem, &overlaps);
    /// assert_eq!(model.num_variables(), 4);
    /// // two single-assignment rows plus one no-double-booking row per bay
    /// assert_eq!(model.num_constraints(), 4);
    /// assert!(model.check_structure().is_ok());
    /// ```
    pub fn from_problem<T>(problem: &Problem<T>, overlaps: &[OverlapPair]) -> Self
    where
        T: TimeNumeric,
    {
        let mut builder = ConstraintModelBuilder::new(problem.num_requests(), problem.num_bays());
        for r in RequestIndex::range(problem.num_requests()) {
            for b in BayIndex::range(problem.num_bays()) {
                if problem.is_compatible(r, b) {
                    builder.add_variable(r, b, problem.revenue(r, b));
                }
            }
        }
        for pair in overlaps {
            builder.add_conflict(pair.first(), pair.second());
        }
        builder.build()
    }

    #[inline]
    pub fn num_requests(&self) -> usize {
        self.num_requests
    }

    #[inline]
    pub fn num_bays(&self) -> usize {
        self.num_bays
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    #[inline]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    #[inline]
    pub fn variable(&self, index: VariableIndex) -> &Variable {
        debug_assert!(
            index.get() < self.variables.len(),
            "called `ConstraintModel::variable` with variable index out of bounds: the len is {} but the index is {}",
            self.variables.len(),
            index.get()
        );
        &self.variables[index.get()]
    }

    #[inline]
    pub fn constraints(&self) -> &[AtMostOne] {
        &self.constraints
    }

    /// Returns the positions of the variables of `request`, sorted by bay.
    #[inline]
    pub fn request_variable_range(&self, request: RequestIndex) -> Range<usize> {
        debug_assert!(
            request.get() < self.num_requests,
            "called `ConstraintModel::request_variable_range` with request index out of bounds: the len is {} but the index is {}",
            self.num_requests,
            request.get()
        );
        self.request_offsets[request.get()]..self.request_offsets[request.get() + 1]
    }

    /// Returns the variables of `request`, sorted by bay.
    #[inline]
    pub fn request_variables(&self, request: RequestIndex) -> &[Variable] {
        &self.variables[self.request_variable_range(request)]
    }

    /// Returns the variable `x(request, bay)` if the pair is compatible.
    pub fn variable_for(&self, request: RequestIndex, bay: BayIndex) -> Option<VariableIndex> {
        if request.get() >= self.num_requests {
            return None;
        }
        let range = self.request_variable_range(request);
        let offset = range.start;
        self.variables[range]
            .binary_search_by_key(&bay, |v| v.bay)
            .ok()
            .map(|i| VariableIndex::new(offset + i))
    }

    #[inline]
    pub fn bay_variables(&self, bay: BayIndex) -> &[VariableIndex] {
        debug_assert!(
            bay.get() < self.num_bays,
            "called `ConstraintModel::bay_variables` with bay index out of bounds: the len is {} but the index is {}",
            self.num_bays,
            bay.get()
        );
        &self.bay_variables[bay.get()]
    }

    /// Returns the set of requests whose buffered windows overlap `request`.
    #[inline]
    pub fn conflicts(&self, request: RequestIndex) -> &FixedBitSet {
        debug_assert!(
            request.get() < self.num_requests,
            "called `ConstraintModel::conflicts` with request index out of bounds: the len is {} but the index is {}",
            self.num_requests,
            request.get()
        );
        &self.conflicts[request.get()]
    }

    #[inline]
    pub fn are_conflicting(&self, a: RequestIndex, b: RequestIndex) -> bool {
        self.conflicts(a).contains(b.get())
    }

    /// Verifies that the model is well formed.
    ///
    /// Every variable must name an existing request and bay, no
    /// `(request, bay)` pair may have two variables and every constraint
    /// must reference existing variables. Models built from a validated
    /// `Problem` always pass.
    pub fn check_structure(&self) -> Result<(), ModelStructureError> {
        for (i, v) in self.variables.iter().enumerate() {
            let variable = VariableIndex::new(i);
            if v.request.get() >= self.num_requests {
                return Err(ModelStructureError::RequestOutOfRange {
                    variable,
                    request: v.request,
                });
            }
            if v.bay.get() >= self.num_bays {
                return Err(ModelStructureError::BayOutOfRange {
                    variable,
                    bay: v.bay,
                });
            }
        }

        for window in self.variables.windows(2) {
            if window[0].request == window[1].request && window[0].bay == window[1].bay {
                return Err(ModelStructureError::DuplicateVariable {
                    request: window[0].request,
                    bay: window[0].bay,
                });
            }
        }

        for (c, constraint) in self.constraints.iter().enumerate() {
            if let Some(&variable) = constraint
                .variables
                .iter()
                .find(|v| v.get() >= self.variables.len())
            {
                return Err(ModelStructureError::DanglingVariable {
                    constraint: c,
                    variable,
                });
            }
        }

        Ok(())
    }

    /// Returns `true` if `assignment` uses only existing variables and
    /// satisfies every constraint.
    pub fn is_feasible(&self, assignment: &Assignment) -> bool {
        if assignment.num_requests() != self.num_requests {
            return false;
        }

        let mut chosen = FixedBitSet::with_capacity(self.variables.len());
        for (request, bay) in assignment.iter_assigned() {
            match self.variable_for(request, bay) {
                Some(v) => chosen.insert(v.get()),
                None => return false,
            }
        }

        self.constraints.iter().all(|constraint| {
            constraint
                .variables
                .iter()
                .filter(|v| chosen.contains(v.get()))
                .count()
                <= 1
        })
    }

    /// Returns the objective value of `assignment`, summed in request order,
    /// or `None` if it uses a pair without a variable.
    pub fn objective_value(&self, assignment: &Assignment) -> Option<f64> {
        if assignment.num_requests() != self.num_requests {
            return None;
        }
        let mut total = 0.0;
        for (request, bay) in assignment.iter_assigned() {
            let v = self.variable_for(request, bay)?;
            total += self.variables[v.get()].revenue;
        }
        Some(total)
    }
}

impl std::fmt::Display for ConstraintModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ConstraintModel(requests: {}, bays: {}, variables: {}, constraints: {})",
            self.num_requests,
            self.num_bays,
            self.variables.len(),
            self.constraints.len()
        )
    }
}

/// Low-level assembly of a `ConstraintModel` from variables and request
/// conflicts. The constraint rows are derived in `build`.
#[derive(Debug, Clone)]
pub struct ConstraintModelBuilder {
    num_requests: usize,
    num_bays: usize,
    variables: Vec<Variable>,
    conflict_pairs: Vec<OverlapPair>,
}

impl ConstraintModelBuilder {
    #[inline]
    pub fn new(num_requests: usize, num_bays: usize) -> Self {
        Self {
            num_requests,
            num_bays,
            variables: Vec::new(),
            conflict_pairs: Vec::new(),
        }
    }

    /// Adds the variable `x(request, bay)`.
    ///
    /// Indices are not checked here; `ConstraintModel::check_structure`
    /// reports variables outside the model dimensions.
    pub fn add_variable(&mut self, request: RequestIndex, bay: BayIndex, revenue: f64) -> &mut Self {
        self.variables.push(Variable {
            revenue,
            request,
            bay,
        });
        self
    }

    /// Marks two requests as overlapping.
    ///
    /// # Panics
    ///
    /// Panics if either index is not in `0..num_requests` or if `a == b`.
    pub fn add_conflict(&mut self, a: RequestIndex, b: RequestIndex) -> &mut Self {
        assert!(
            a.get() < self.num_requests && b.get() < self.num_requests,
            "called `ConstraintModelBuilder::add_conflict` with request index out of bounds: the len is {} but the indices are {} and {}",
            self.num_requests,
            a.get(),
            b.get()
        );
        self.conflict_pairs.push(OverlapPair::new(a, b));
        self
    }

    pub fn build(mut self) -> ConstraintModel {
        self.variables.sort_by_key(|v| (v.request, v.bay));
        self.conflict_pairs.sort_unstable();
        self.conflict_pairs.dedup();

        let request_offsets: Vec<usize> = (0..=self.num_requests)
            .map(|r| self.variables.partition_point(|v| v.request.get() < r))
            .collect();

        let mut bay_variables = vec![Vec::new(); self.num_bays];
        for (i, v) in self.variables.iter().enumerate() {
            if let Some(list) = bay_variables.get_mut(v.bay.get()) {
                list.push(VariableIndex::new(i));
            }
        }

        let mut conflicts = vec![FixedBitSet::with_capacity(self.num_requests); self.num_requests];
        for pair in &self.conflict_pairs {
            conflicts[pair.first().get()].insert(pair.second().get());
            conflicts[pair.second().get()].insert(pair.first().get());
        }

        let mut constraints = Vec::with_capacity(self.num_requests + self.conflict_pairs.len());
        for r in 0..self.num_requests {
            let range = request_offsets[r]..request_offsets[r + 1];
            if range.is_empty() {
                continue;
            }
            constraints.push(AtMostOne {
                origin: ConstraintOrigin::SingleAssignment(RequestIndex::new(r)),
                variables: range.map(VariableIndex::new).collect(),
            });
        }

        for pair in &self.conflict_pairs {
            let (a, c) = (pair.first().get(), pair.second().get());
            let c_range = request_offsets[c]..request_offsets[c + 1];
            for va in request_offsets[a]..request_offsets[a + 1] {
                let bay = self.variables[va].bay;
                if let Ok(offset) = self.variables[c_range.clone()].binary_search_by_key(&bay, |v| v.bay) {
                    let mut variables = SmallVec::new();
                    variables.push(VariableIndex::new(va));
                    variables.push(VariableIndex::new(c_range.start + offset));
                    constraints.push(AtMostOne {
                        origin: ConstraintOrigin::NoDoubleBooking { pair: *pair, bay },
                        variables,
                    });
                }
            }
        }

        ConstraintModel {
            num_requests: self.num_requests,
            num_bays: self.num_bays,
            variables: self.variables,
            request_offsets,
            bay_variables,
            conflicts,
            constraints,
        }
    }
}
