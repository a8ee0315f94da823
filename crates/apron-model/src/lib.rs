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

//! # Apron Model
//!
//! The data side of the bay assignment engine. A `Problem<T>` is a validated
//! snapshot of requests, bays and the facility tables. From it the overlap
//! detector derives the conflict pairs and the constraint model builder
//! derives the binary program the search engine solves.
//!
//! ## Module map
//!
//! - `index`: typed indices for requests, bays and decision variables.
//! - `request`: identifier newtypes and the immutable `Request<T>`.
//! - `keys`: structured lookup keys for the facility tables.
//! - `compatibility`, `revenue`, `buffer`: the facility tables.
//! - `problem`: the validated snapshot and its builder.
//! - `overlap`: buffered pairwise overlap detection (naive and sweep).
//! - `constraint`: the solver-agnostic `ConstraintModel`.
//! - `assignment`: request to bay maps evaluated against a model.
//! - `repository`: collaborator interfaces that feed a `Problem`.
//! - `err`: validation, repository and structure errors.

pub mod assignment;
pub mod buffer;
pub mod compatibility;
pub mod constraint;
pub mod err;
pub mod index;
pub mod keys;
pub mod overlap;
pub mod problem;
pub mod repository;
pub mod request;
pub mod revenue;
