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

//! # Shared Incumbent (Best Solution Holder)
//!
//! A concurrent container for the best schedule discovered so far during
//! search. It exposes a fast, lock-free upper bound via an atomic and
//! stores the actual `Solution<T>` behind a `Mutex` as the source of truth.
//!
//! The atomic makespan lets workers short-circuit obviously worse
//! candidates without locking; the mutex guarantees consistent updates of
//! the authoritative solution under contention. A stale atomic read only
//! costs a missed pruning opportunity, never correctness. The sentinel
//! `i64::MAX` means "no incumbent installed yet"; the engines minimize,
//! so no real makespan can collide with it.

use apron_model::solution::Solution;
use num_traits::{PrimInt, Signed};
use std::sync::{Mutex, atomic::AtomicI64};

/// A concurrent holder for the best (incumbent) solution found during
/// search.
///
/// Lifecycle: created once per solve, shared by reference with every
/// worker, read for pruning, and drained into the final outcome when the
/// search ends.
#[derive(Debug)]
pub struct SharedIncumbent<T> {
    /// Makespan of the incumbent solution, stored as `i64` for atomic
    /// access. Loads and stores use `Ordering::Relaxed`; all
    /// correctness-sensitive state is synchronized via the mutex below.
    upper_bound: AtomicI64,

    /// The incumbent solution, protected by a mutex.
    solution: Mutex<Option<Solution<T>>>,
}

impl<T> Default for SharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Display for SharedIncumbent<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(upper_bound: {})", self.upper_bound())
    }
}

impl<T> SharedIncumbent<T> {
    /// Creates a new shared incumbent with no solution installed.
    /// The initial upper bound is `i64::MAX`.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            upper_bound: AtomicI64::new(i64::MAX),
            solution: Mutex::new(None),
        }
    }

    /// Returns the current upper bound.
    #[inline]
    pub fn upper_bound(&self) -> i64 {
        self.upper_bound.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Returns a snapshot of the current incumbent solution, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Solution<T>>
    where
        T: Clone,
    {
        let guard = self.solution.lock().unwrap();
        guard.clone()
    }

    /// Attempts to install the given candidate solution as the new
    /// incumbent. Returns `true` if the candidate was installed.
    #[inline]
    pub fn try_install(&self, candidate: &Solution<T>) -> bool
    where
        T: PrimInt + Signed + Into<i64>,
    {
        let candidate_makespan: i64 = candidate.makespan().into();
        let current_upper_bound = self.upper_bound();

        // Minimizing, so lower is better.
        if candidate_makespan >= current_upper_bound {
            return false;
        }

        let mut guard = self.solution.lock().unwrap();
        // Another thread might have installed a better solution while we
        // were waiting for the lock; compare against the mutex-held
        // solution, not the atomic hint read earlier.
        if let Some(current_solution) = guard.as_ref() {
            let current_makespan: i64 = current_solution.makespan().into();
            if candidate_makespan >= current_makespan {
                return false;
            }
        }

        *guard = Some(candidate.clone());
        self.upper_bound
            .store(candidate_makespan, std::sync::atomic::Ordering::Relaxed);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::SharedIncumbent;
    use apron_model::index::VehicleIndex;
    use apron_model::solution::Solution;
    use std::sync::Arc;
    use std::thread;

    fn make_solution(makespan: i64, n: usize) -> Solution<i64> {
        let vehicles = (0..n).map(VehicleIndex::new).collect::<Vec<_>>();
        let start_times = (0..n).map(|i| i as i64).collect::<Vec<_>>();
        Solution::new(makespan, vehicles, start_times)
    }

    #[test]
    fn test_initial_state() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();
        assert_eq!(inc.upper_bound(), i64::MAX);
        assert!(inc.snapshot().is_none());
    }

    #[test]
    fn test_install_better_solution_updates_bound_and_snapshot() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();
        let s = make_solution(100, 3);

        assert!(inc.try_install(&s));
        assert_eq!(inc.upper_bound(), 100);

        let snap = inc.snapshot().expect("snapshot should be Some");
        assert_eq!(snap.makespan(), 100);
        assert_eq!(snap.num_tasks(), 3);
    }

    #[test]
    fn test_reject_worse_or_equal_candidates() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();

        assert!(inc.try_install(&make_solution(100, 2)));
        assert!(!inc.try_install(&make_solution(150, 2)));
        assert!(!inc.try_install(&make_solution(100, 2)));
        assert_eq!(inc.upper_bound(), 100);
    }

    #[test]
    fn test_concurrent_installs_minimum_wins() {
        let inc = Arc::new(SharedIncumbent::<i64>::new());
        let makespans = vec![300, 200, 400, 50, 120, 75, 500, 60, 90];

        let mut handles = Vec::new();
        for makespan in makespans.iter().cloned() {
            let inc_cloned = Arc::clone(&inc);
            handles.push(thread::spawn(move || {
                inc_cloned.try_install(&make_solution(makespan, 4))
            }));
        }

        let results = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>();
        assert!(results.iter().any(|&r| r));

        let min_makespan = *makespans.iter().min().unwrap();
        assert_eq!(inc.upper_bound(), min_makespan);
        assert_eq!(inc.snapshot().unwrap().makespan(), min_makespan);
    }

    #[test]
    fn test_incumbent_with_i32() {
        let inc: SharedIncumbent<i32> = SharedIncumbent::new();
        let vehicles = vec![VehicleIndex::new(0)];
        let best = Solution::new(50i32, vehicles.clone(), vec![0i32]);
        let worse = Solution::new(80i32, vehicles, vec![0i32]);

        assert!(inc.try_install(&best));
        assert!(!inc.try_install(&worse));
        assert_eq!(inc.upper_bound(), 50i64);
        assert_eq!(inc.snapshot().unwrap().makespan(), 50i32);
    }
}
