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

//! Structured keys for the facility tables.

use crate::request::{BayId, OwnerCode, TypeCode};

/// Key of the compatibility relation: may a request of `type_code` use `bay`?
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompatibilityKey {
    type_code: TypeCode,
    bay: BayId,
}

impl CompatibilityKey {
    #[inline]
    pub fn new<C, B>(type_code: C, bay: B) -> Self
    where
        C: Into<TypeCode>,
        B: Into<BayId>,
    {
        Self {
            type_code: type_code.into(),
            bay: bay.into(),
        }
    }

    #[inline]
    pub fn type_code(&self) -> &TypeCode {
        &self.type_code
    }

    #[inline]
    pub fn bay(&self) -> &BayId {
        &self.bay
    }
}

impl std::fmt::Display for CompatibilityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.type_code, self.bay)
    }
}

/// Key of the revenue table: what does `owner` pay for `type_code` on `bay`?
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RevenueKey {
    owner: OwnerCode,
    type_code: TypeCode,
    bay: BayId,
}

impl RevenueKey {
    #[inline]
    pub fn new<O, C, B>(owner: O, type_code: C, bay: B) -> Self
    where
        O: Into<OwnerCode>,
        C: Into<TypeCode>,
        B: Into<BayId>,
    {
        Self {
            owner: owner.into(),
            type_code: type_code.into(),
            bay: bay.into(),
        }
    }

    #[inline]
    pub fn owner(&self) -> &OwnerCode {
        &self.owner
    }

    #[inline]
    pub fn type_code(&self) -> &TypeCode {
        &self.type_code
    }

    #[inline]
    pub fn bay(&self) -> &BayId {
        &self.bay
    }
}

impl std::fmt::Display for RevenueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.owner, self.type_code, self.bay)
    }
}
