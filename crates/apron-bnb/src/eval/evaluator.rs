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

use crate::{bounds::TaskBounds, state::SearchState};
use apron_model::model::Model;
use apron_search::num::SolverNumeric;

/// A strategy computing admissible makespan lower bounds.
///
/// `ObjectiveEvaluator` decouples the search engine from a particular
/// relaxation. The engine prunes a branch whenever
/// `lower_bound >= best_makespan`, so the bound must never exceed the
/// best makespan actually achievable from the given partial state;
/// otherwise optimal schedules would be cut off. Unlike additive
/// objectives there is no cost/remainder split: the makespan composes by
/// maximum, so the evaluator returns the full bound directly.
///
/// `None` signals that no completion of the state can satisfy all
/// windows; the engine treats the branch as infeasible and backtracks.
pub trait ObjectiveEvaluator<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the objective evaluator.
    fn name(&self) -> &str;

    /// Computes an admissible lower bound on the best makespan reachable
    /// from `state`, or `None` if the branch is infeasible.
    fn lower_bound(
        &mut self,
        model: &Model<T>,
        bounds: &TaskBounds<T>,
        state: &SearchState<T>,
    ) -> Option<T>;
}
