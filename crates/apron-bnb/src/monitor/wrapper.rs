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

//! Bridges an engine-agnostic `SearchMonitor` (time, node, and solution
//! budgets; interrupts) into the engine's `TreeSearchMonitor` callbacks.
//! Used by the portfolio adapter, where the orchestrator hands each
//! worker a composite `SearchMonitor` stack.

use crate::monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor};
use crate::{branching::decision::Decision, state::SearchState, stats::BnbSolverStatistics};
use apron_model::{model::Model, solution::Solution};
use apron_search::monitor::search_monitor::{SearchCommand, SearchMonitor};
use apron_search::num::SolverNumeric;

/// Adapts a `&mut dyn SearchMonitor` into a `TreeSearchMonitor`.
pub struct WrapperMonitor<'a, T>
where
    T: SolverNumeric,
{
    inner: &'a mut dyn SearchMonitor<T>,
}

impl<'a, T> WrapperMonitor<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new(inner: &'a mut dyn SearchMonitor<T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> TreeSearchMonitor<T> for WrapperMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "WrapperMonitor"
    }

    fn on_enter_search(&mut self, model: &Model<T>, _statistics: &BnbSolverStatistics) {
        self.inner.on_enter_search(model);
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {
        self.inner.on_exit_search();
    }

    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        self.inner.search_command()
    }

    #[inline]
    fn on_step(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics) {
        self.inner.on_step();
    }

    fn on_lower_bound_computed(
        &mut self,
        _state: &SearchState<T>,
        _lower_bound: T,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_prune(
        &mut self,
        _state: &SearchState<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState<T>,
        _count: usize,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_descend(
        &mut self,
        _state: &SearchState<T>,
        _decision: Decision<T>,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_backtrack(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, solution: &Solution<T>, _statistics: &BnbSolverStatistics) {
        self.inner.on_solution_found(solution);
    }
}
