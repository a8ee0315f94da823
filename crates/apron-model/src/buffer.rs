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

//! # Buffer Table
//!
//! Per-type safety margin added on both sides of a request window before
//! overlaps are tested. Types without an entry get a zero buffer. Negative
//! buffers never enter the table.

use crate::{err::NegativeBufferError, request::TypeCode};
use apron_core::num::TimeNumeric;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferTable<T> {
    entries: FxHashMap<TypeCode, T>,
}

impl<T> Default for BufferTable<T> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<T> BufferTable<T>
where
    T: TimeNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the buffer of `type_code`, returning the previous value.
    ///
    /// ```rust
    /// use apron_model::buffer::BufferTable;
    /// use apron_model::request::TypeCode;
    ///
    /// let mut buffers = BufferTable::<i64>::new();
    /// buffers.insert("A320", 15).unwrap();
    /// assert!(buffers.insert("B737", -5).is_err());
    ///
    /// assert_eq!(buffers.buffer(&TypeCode::new("A320")), 15);
    /// assert_eq!(buffers.buffer(&TypeCode::new("B737")), 0);
    /// ```
    pub fn insert<C>(&mut self, type_code: C, buffer: T) -> Result<Option<T>, NegativeBufferError<T>>
    where
        C: Into<TypeCode>,
    {
        let type_code = type_code.into();
        if buffer < T::zero() {
            return Err(NegativeBufferError::new(type_code, buffer));
        }
        Ok(self.entries.insert(type_code, buffer))
    }

    /// Returns the buffer of `type_code`, zero if there is no entry.
    #[inline]
    pub fn buffer(&self, type_code: &TypeCode) -> T {
        self.entries
            .get(type_code.as_str())
            .copied()
            .unwrap_or_else(T::zero)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&TypeCode, T)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }
}
