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

//! # Solver Numeric Trait
//!
//! Unified numeric bounds for search and solver components. Exact search
//! should remain generic over the time/objective integer type while keeping
//! predictable arithmetic semantics; this alias collects the required
//! capabilities into a single bound:
//!
//! - `PrimInt + Signed` numeric fundamentals,
//! - `Into<i64>` for interop with the atomic incumbent bound,
//! - by-value saturating arithmetic for overflow-free bound composition,
//! - `Send + Sync` for parallel portfolio execution.
//!
//! `i128` is intentionally excluded: it cannot convert into the `i64`
//! incumbent representation and is significantly slower on many platforms.

use apron_core::num::ops::{SaturatingAddVal, SaturatingMulVal, SaturatingSubVal};
use num_traits::{PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for numeric types usable as solver time/objective values.
/// Satisfied by the signed integer primitives `i8`, `i16`, `i32`, and `i64`.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + Into<i64>
    + std::fmt::Debug
    + std::fmt::Display
    + SaturatingAddVal
    + SaturatingSubVal
    + SaturatingMulVal
    + Send
    + Sync
    + Hash
{
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + Into<i64>
        + std::fmt::Debug
        + std::fmt::Display
        + SaturatingAddVal
        + SaturatingSubVal
        + SaturatingMulVal
        + Send
        + Sync
        + Hash
{
}
