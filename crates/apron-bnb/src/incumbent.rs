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

//! Incumbent backings for the search session.
//!
//! The engine prunes against a "best known makespan" that either lives
//! purely inside one session (standalone solve) or is shared with other
//! workers through `SharedIncumbent`. `IncumbentStore` abstracts over the
//! two so the hot loop stays monomorphic.

use apron_model::solution::Solution;
use apron_search::{incumbent::SharedIncumbent, num::SolverNumeric};

pub(crate) trait IncumbentStore<T> {
    /// The upper bound to start pruning with.
    fn initial_upper_bound(&self) -> T;
    /// Folds the shared upper bound into the session-local one.
    fn tighten(&self, current: T) -> T;
    /// Publishes a newly found solution.
    fn on_solution_found(&self, solution: &Solution<T>);
    /// A snapshot of the best shared solution, if any.
    fn snapshot(&self) -> Option<Solution<T>>;
}

/// Backing for standalone solves: nothing is shared.
pub(crate) struct NoSharedIncumbent;

impl NoSharedIncumbent {
    #[inline]
    pub(crate) fn new() -> Self {
        Self
    }
}

impl<T> IncumbentStore<T> for NoSharedIncumbent
where
    T: SolverNumeric,
{
    #[inline]
    fn initial_upper_bound(&self) -> T {
        T::max_value()
    }

    #[inline]
    fn tighten(&self, current: T) -> T {
        current
    }

    #[inline]
    fn on_solution_found(&self, _solution: &Solution<T>) {}

    #[inline]
    fn snapshot(&self) -> Option<Solution<T>> {
        None
    }
}

/// Backing that mirrors a `SharedIncumbent` used by parallel workers.
pub(crate) struct SharedIncumbentAdapter<'a, T> {
    incumbent: &'a SharedIncumbent<T>,
}

impl<'a, T> SharedIncumbentAdapter<'a, T> {
    #[inline]
    pub(crate) fn new(incumbent: &'a SharedIncumbent<T>) -> Self {
        Self { incumbent }
    }
}

impl<'a, T> IncumbentStore<T> for SharedIncumbentAdapter<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    fn initial_upper_bound(&self) -> T {
        self.tighten(T::max_value())
    }

    #[inline]
    fn tighten(&self, current: T) -> T {
        let shared = self.incumbent.upper_bound();
        if shared >= current.into() {
            return current;
        }
        // The shared bound was published from a `T` makespan, so the
        // conversion back only fails for the untouched sentinel.
        T::from(shared).unwrap_or(current)
    }

    #[inline]
    fn on_solution_found(&self, solution: &Solution<T>) {
        self.incumbent.try_install(solution);
    }

    #[inline]
    fn snapshot(&self) -> Option<Solution<T>> {
        self.incumbent.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::index::VehicleIndex;

    #[test]
    fn test_no_shared_incumbent_is_inert() {
        let store = NoSharedIncumbent::new();
        let initial: i64 = IncumbentStore::<i64>::initial_upper_bound(&store);
        assert_eq!(initial, i64::MAX);
        assert_eq!(store.tighten(42i64), 42);
        assert!(IncumbentStore::<i64>::snapshot(&store).is_none());
    }

    #[test]
    fn test_shared_adapter_tightens_from_other_workers() {
        let incumbent = SharedIncumbent::<i64>::new();
        let adapter = SharedIncumbentAdapter::new(&incumbent);

        // Sentinel untouched: nothing to tighten.
        assert_eq!(adapter.tighten(100i64), 100);

        let solution = Solution::new(50i64, vec![VehicleIndex::new(0)], vec![0]);
        adapter.on_solution_found(&solution);
        assert_eq!(adapter.tighten(100i64), 50);
        assert_eq!(adapter.tighten(30i64), 30);
        assert_eq!(adapter.snapshot().unwrap().makespan(), 50);
    }
}
