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

//! Half-open interval arithmetic.
//!
//! `ClosedOpenInterval<T>` models a `[start, end)` range of integral time
//! points. The scheduler uses it for aircraft ground-time windows: a task
//! may run anywhere inside its aircraft's interval, and window checks reduce
//! to simple comparisons on the two endpoints.

use num_traits::PrimInt;

/// A half-open interval `[start, end)`.
///
/// The interval is empty when `start >= end`. Endpoints are plain integral
/// values; no invariant beyond `start <= end` is enforced at construction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ClosedOpenInterval<T> {
    start: T,
    end: T,
}

impl<T> ClosedOpenInterval<T>
where
    T: PrimInt,
{
    /// Creates a new interval `[start, end)`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `start > end`.
    #[inline]
    pub fn new(start: T, end: T) -> Self {
        debug_assert!(
            start <= end,
            "called `ClosedOpenInterval::new` with start > end"
        );
        Self { start, end }
    }

    /// Returns the inclusive lower endpoint.
    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    /// Returns the exclusive upper endpoint.
    #[inline]
    pub fn end(&self) -> T {
        self.end
    }

    /// Returns the length of the interval (`end - start`).
    #[inline]
    pub fn length(&self) -> T {
        self.end - self.start
    }

    /// Returns `true` if the interval contains no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if `point` lies inside `[start, end)`.
    #[inline]
    pub fn contains(&self, point: T) -> bool {
        point >= self.start && point < self.end
    }

    /// Returns `true` if the `[start, end]` span of length `duration`
    /// beginning at `point` fits entirely inside this interval.
    #[inline]
    pub fn fits(&self, point: T, duration: T) -> bool {
        point >= self.start && point + duration <= self.end
    }

    /// Returns `true` if the two intervals share at least one point.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl<T> std::fmt::Display for ClosedOpenInterval<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
