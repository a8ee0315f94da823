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

//! # Requests
//!
//! A `Request<T>` asks for one bay during the half-open window
//! `[start, end)`. It carries an external identifier, the owner category
//! (for example an airline) and the type category (for example an aircraft
//! type). The owner and type select the revenue row, the type alone selects
//! compatibility and the safety buffer.
//!
//! Identifiers are plain string newtypes. They compare, hash and order like
//! the string they wrap and borrow as `str`, so hash maps keyed by them can
//! be queried with a `&str`.

use crate::err::InvalidIntervalError;
use apron_core::{interval::ClosedOpenInterval, num::TimeNumeric};

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            #[inline]
            pub fn new<S>(value: S) -> Self
            where
                S: Into<String>,
            {
                Self(value.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_identifier! {
    /// Externally assigned, unique identifier of a request.
    RequestId
}

string_identifier! {
    /// Owner category of a request, e.g. an airline code.
    OwnerCode
}

string_identifier! {
    /// Type category of a request, e.g. an aircraft type.
    TypeCode
}

string_identifier! {
    /// Unique identifier of a bay.
    BayId
}

/// An immutable request for one bay over `[start, end)`.
///
/// # Invariants
///
/// `start < end`. The only constructor is `Request::try_new`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Request<T> {
    id: RequestId,
    owner: OwnerCode,
    type_code: TypeCode,
    window: ClosedOpenInterval<T>,
}

impl<T> Request<T>
where
    T: TimeNumeric,
{
    /// Creates a request, rejecting windows with `start >= end`.
    ///
    /// ```rust
    /// use apron_model::request::Request;
    ///
    /// let r = Request::try_new("AI_101", "AI", "A320", 600i64, 660).unwrap();
    /// assert_eq!(r.window().duration(), 60);
    /// assert!(Request::try_new("AI_102", "AI", "A320", 660i64, 660).is_err());
    /// ```
    pub fn try_new<I, O, C>(
        id: I,
        owner: O,
        type_code: C,
        start: T,
        end: T,
    ) -> Result<Self, InvalidIntervalError<T>>
    where
        I: Into<RequestId>,
        O: Into<OwnerCode>,
        C: Into<TypeCode>,
    {
        let id = id.into();
        if start >= end {
            return Err(InvalidIntervalError::new(id, start, end));
        }
        Ok(Self {
            id,
            owner: owner.into(),
            type_code: type_code.into(),
            window: ClosedOpenInterval::new(start, end),
        })
    }

    #[inline]
    pub fn id(&self) -> &RequestId {
        &self.id
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
    pub fn start(&self) -> T {
        self.window.start()
    }

    #[inline]
    pub fn end(&self) -> T {
        self.window.end()
    }

    /// Returns the unbuffered occupancy window.
    #[inline]
    pub fn window(&self) -> ClosedOpenInterval<T> {
        self.window
    }

    /// Returns the occupancy window widened by `buffer` on both sides.
    #[inline]
    pub fn buffered_window(&self, buffer: T) -> ClosedOpenInterval<T> {
        self.window.padded(buffer)
    }
}

impl<T> std::fmt::Debug for Request<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("type_code", &self.type_code)
            .field("window", &self.window)
            .finish()
    }
}

impl<T> std::fmt::Display for Request<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Request({} {} {} {})",
            self.id, self.owner, self.type_code, self.window
        )
    }
}
