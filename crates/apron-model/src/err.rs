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

use crate::{
    index::{BayIndex, RequestIndex, VariableIndex},
    keys::RevenueKey,
    repository::RequestKey,
    request::{BayId, RequestId, TypeCode},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIntervalError<T> {
    id: RequestId,
    start: T,
    end: T,
}

impl<T> InvalidIntervalError<T>
where
    T: Copy,
{
    pub fn new(id: RequestId, start: T, end: T) -> Self {
        Self { id, start, end }
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }
}

impl<T> std::fmt::Display for InvalidIntervalError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Request {} has start {} which is not before end {}",
            self.id, self.start, self.end
        )
    }
}

impl<T> std::error::Error for InvalidIntervalError<T> where T: std::fmt::Debug + std::fmt::Display {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegativeBufferError<T> {
    type_code: TypeCode,
    buffer: T,
}

impl<T> NegativeBufferError<T>
where
    T: Copy,
{
    pub fn new(type_code: TypeCode, buffer: T) -> Self {
        Self { type_code, buffer }
    }

    pub fn type_code(&self) -> &TypeCode {
        &self.type_code
    }

    pub fn buffer(&self) -> T {
        self.buffer
    }
}

impl<T> std::fmt::Display for NegativeBufferError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Buffer {} for type {} is negative",
            self.buffer, self.type_code
        )
    }
}

impl<T> std::error::Error for NegativeBufferError<T> where T: std::fmt::Debug + std::fmt::Display {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRequestError {
    id: RequestId,
}

impl DuplicateRequestError {
    pub fn new(id: RequestId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }
}

impl std::fmt::Display for DuplicateRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Request with ID {} appears more than once", self.id)
    }
}

impl std::error::Error for DuplicateRequestError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateBayError {
    bay: BayId,
}

impl DuplicateBayError {
    pub fn new(bay: BayId) -> Self {
        Self { bay }
    }

    pub fn bay(&self) -> &BayId {
        &self.bay
    }
}

impl std::fmt::Display for DuplicateBayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bay {} appears more than once", self.bay)
    }
}

impl std::error::Error for DuplicateBayError {}

/// The facility table an `UnknownBayError` was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityTable {
    Compatibility,
    Revenue,
}

impl std::fmt::Display for FacilityTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacilityTable::Compatibility => write!(f, "compatibility"),
            FacilityTable::Revenue => write!(f, "revenue"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBayError {
    bay: BayId,
    table: FacilityTable,
}

impl UnknownBayError {
    pub fn new(bay: BayId, table: FacilityTable) -> Self {
        Self { bay, table }
    }

    pub fn bay(&self) -> &BayId {
        &self.bay
    }

    pub fn table(&self) -> FacilityTable {
        self.table
    }
}

impl std::fmt::Display for UnknownBayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The {} table references bay {} which is not in the bay set",
            self.table, self.bay
        )
    }
}

impl std::error::Error for UnknownBayError {}

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRevenueError {
    key: RevenueKey,
    amount: f64,
}

impl InvalidRevenueError {
    pub fn new(key: RevenueKey, amount: f64) -> Self {
        Self { key, amount }
    }

    pub fn key(&self) -> &RevenueKey {
        &self.key
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl std::fmt::Display for InvalidRevenueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Revenue {} for {} must be finite and non-negative",
            self.amount, self.key
        )
    }
}

impl std::error::Error for InvalidRevenueError {}

/// Everything that can be wrong with the inputs of a solve.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError<T> {
    InvalidInterval(InvalidIntervalError<T>),
    NegativeBuffer(NegativeBufferError<T>),
    DuplicateRequest(DuplicateRequestError),
    DuplicateBay(DuplicateBayError),
    UnknownBay(UnknownBayError),
    InvalidRevenue(InvalidRevenueError),
}

impl<T> std::fmt::Display for ValidationError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidInterval(err) => write!(f, "{}", err),
            ValidationError::NegativeBuffer(err) => write!(f, "{}", err),
            ValidationError::DuplicateRequest(err) => write!(f, "{}", err),
            ValidationError::DuplicateBay(err) => write!(f, "{}", err),
            ValidationError::UnknownBay(err) => write!(f, "{}", err),
            ValidationError::InvalidRevenue(err) => write!(f, "{}", err),
        }
    }
}

impl<T> std::error::Error for ValidationError<T> where T: std::fmt::Debug + std::fmt::Display {}

impl<T> From<InvalidIntervalError<T>> for ValidationError<T> {
    fn from(err: InvalidIntervalError<T>) -> Self {
        ValidationError::InvalidInterval(err)
    }
}

impl<T> From<NegativeBufferError<T>> for ValidationError<T> {
    fn from(err: NegativeBufferError<T>) -> Self {
        ValidationError::NegativeBuffer(err)
    }
}

impl<T> From<DuplicateRequestError> for ValidationError<T> {
    fn from(err: DuplicateRequestError) -> Self {
        ValidationError::DuplicateRequest(err)
    }
}

impl<T> From<DuplicateBayError> for ValidationError<T> {
    fn from(err: DuplicateBayError) -> Self {
        ValidationError::DuplicateBay(err)
    }
}

impl<T> From<UnknownBayError> for ValidationError<T> {
    fn from(err: UnknownBayError) -> Self {
        ValidationError::UnknownBay(err)
    }
}

impl<T> From<InvalidRevenueError> for ValidationError<T> {
    fn from(err: InvalidRevenueError) -> Self {
        ValidationError::InvalidRevenue(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyFieldError {
    field: &'static str,
}

impl EmptyFieldError {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }
}

impl std::fmt::Display for EmptyFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}' must not be empty", self.field)
    }
}

impl std::error::Error for EmptyFieldError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRequestKeyError {
    key: RequestKey,
}

impl DuplicateRequestKeyError {
    pub fn new(key: RequestKey) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &RequestKey {
        &self.key
    }
}

impl std::fmt::Display for DuplicateRequestKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Request '{}' already exists", self.key)
    }
}

impl std::error::Error for DuplicateRequestKeyError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestNotFoundError {
    key: RequestKey,
}

impl RequestNotFoundError {
    pub fn new(key: RequestKey) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &RequestKey {
        &self.key
    }
}

impl std::fmt::Display for RequestNotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Request '{}' does not exist", self.key)
    }
}

impl std::error::Error for RequestNotFoundError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError<T> {
    EmptyField(EmptyFieldError),
    InvalidInterval(InvalidIntervalError<T>),
    DuplicateRequestKey(DuplicateRequestKeyError),
    RequestNotFound(RequestNotFoundError),
}

impl<T> std::fmt::Display for RepositoryError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::EmptyField(err) => write!(f, "{}", err),
            RepositoryError::InvalidInterval(err) => write!(f, "{}", err),
            RepositoryError::DuplicateRequestKey(err) => write!(f, "{}", err),
            RepositoryError::RequestNotFound(err) => write!(f, "{}", err),
        }
    }
}

impl<T> std::error::Error for RepositoryError<T> where T: std::fmt::Debug + std::fmt::Display {}

impl<T> From<EmptyFieldError> for RepositoryError<T> {
    fn from(err: EmptyFieldError) -> Self {
        RepositoryError::EmptyField(err)
    }
}

impl<T> From<InvalidIntervalError<T>> for RepositoryError<T> {
    fn from(err: InvalidIntervalError<T>) -> Self {
        RepositoryError::InvalidInterval(err)
    }
}

impl<T> From<DuplicateRequestKeyError> for RepositoryError<T> {
    fn from(err: DuplicateRequestKeyError) -> Self {
        RepositoryError::DuplicateRequestKey(err)
    }
}

impl<T> From<RequestNotFoundError> for RepositoryError<T> {
    fn from(err: RequestNotFoundError) -> Self {
        RepositoryError::RequestNotFound(err)
    }
}

/// A structural defect of a hand-assembled `ConstraintModel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStructureError {
    /// A variable names a request outside `0..num_requests`.
    RequestOutOfRange {
        variable: VariableIndex,
        request: RequestIndex,
    },
    /// A variable names a bay outside `0..num_bays`.
    BayOutOfRange {
        variable: VariableIndex,
        bay: BayIndex,
    },
    /// Two variables share the same request and bay.
    DuplicateVariable {
        request: RequestIndex,
        bay: BayIndex,
    },
    /// A constraint references a variable that does not exist.
    DanglingVariable {
        constraint: usize,
        variable: VariableIndex,
    },
}

impl std::fmt::Display for ModelStructureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelStructureError::RequestOutOfRange { variable, request } => {
                write!(f, "{} references {} which does not exist", variable, request)
            }
            ModelStructureError::BayOutOfRange { variable, bay } => {
                write!(f, "{} references {} which does not exist", variable, bay)
            }
            ModelStructureError::DuplicateVariable { request, bay } => {
                write!(f, "More than one variable for {} on {}", request, bay)
            }
            ModelStructureError::DanglingVariable {
                constraint,
                variable,
            } => write!(
                f,
                "Constraint {} references {} which does not exist",
                constraint, variable
            ),
        }
    }
}

impl std::error::Error for ModelStructureError {}
