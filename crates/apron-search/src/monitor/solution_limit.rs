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

//! # Solution Limit Monitor
//!
//! Stops the search after a configured number of solutions has been
//! installed across all workers. The counter is shared (an `AtomicU64`
//! owned by the orchestrator), so the limit is global: with a limit of
//! one, the whole portfolio stops at the first feasible schedule, which
//! is the feasibility-only mode of the solver.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use apron_model::{model::Model, solution::Solution};
use num_traits::{PrimInt, Signed};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct SolutionLimitMonitor<'a, T> {
    global_solution_count: &'a AtomicU64,
    solution_limit: Option<u64>,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T> SolutionLimitMonitor<'a, T> {
    #[inline]
    pub fn new(global_solution_count: &'a AtomicU64, solution_limit: Option<u64>) -> Self {
        Self {
            global_solution_count,
            solution_limit,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<'a, T> SearchMonitor<T> for SolutionLimitMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "SolutionLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &Model<T>) {}
    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _solution: &Solution<T>) {
        self.global_solution_count.fetch_add(1, Ordering::Relaxed);
    }

    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        match self.solution_limit {
            Some(limit) if self.global_solution_count.load(Ordering::Relaxed) >= limit => {
                SearchCommand::Terminate("solution limit reached".to_string())
            }
            _ => SearchCommand::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::index::VehicleIndex;

    type IntegerType = i64;

    fn solution() -> Solution<IntegerType> {
        Solution::new(10, vec![VehicleIndex::new(0)], vec![0])
    }

    #[test]
    fn test_no_limit_never_terminates() {
        let counter = AtomicU64::new(0);
        let monitor = SolutionLimitMonitor::<IntegerType>::new(&counter, None);
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_limit_reached_after_counted_solutions() {
        let counter = AtomicU64::new(0);
        let mut monitor = SolutionLimitMonitor::<IntegerType>::new(&counter, Some(2));

        assert_eq!(
            SearchMonitor::<IntegerType>::search_command(&monitor),
            SearchCommand::Continue
        );
        monitor.on_solution_found(&solution());
        monitor.on_solution_found(&solution());
        assert!(matches!(
            SearchMonitor::<IntegerType>::search_command(&monitor),
            SearchCommand::Terminate(_)
        ));
        assert_eq!(counter.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_counter_is_shared_between_monitors() {
        let counter = AtomicU64::new(0);
        let mut first = SolutionLimitMonitor::<IntegerType>::new(&counter, Some(1));
        let second = SolutionLimitMonitor::<IntegerType>::new(&counter, Some(1));

        first.on_solution_found(&solution());
        assert!(matches!(
            SearchMonitor::<IntegerType>::search_command(&second),
            SearchCommand::Terminate(_)
        ));
    }
}
