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

//! Adapter running the branch-and-bound engine as one portfolio worker.

use crate::{
    bnb::BnbSolver, branching::decision::DecisionBuilder, eval::evaluator::ObjectiveEvaluator,
    monitor::wrapper::WrapperMonitor,
};
use apron_search::{
    num::SolverNumeric,
    portfolio::{PortfolioSolver, PortfolioSolverContext, PortfolioSolverResult},
};

/// A `BnbSolver` packaged with its branching policy and evaluator so the
/// orchestrator can run it side by side with other strategies.
#[derive(Clone)]
pub struct BnbPortfolioSolver<T, B, E>
where
    T: SolverNumeric,
    B: DecisionBuilder<T>,
    E: ObjectiveEvaluator<T>,
{
    inner: BnbSolver<T>,
    decision_builder: B,
    evaluator: E,
}

impl<T, B, E> BnbPortfolioSolver<T, B, E>
where
    T: SolverNumeric,
    B: DecisionBuilder<T>,
    E: ObjectiveEvaluator<T>,
{
    #[inline]
    pub fn new(decision_builder: B, evaluator: E) -> Self {
        Self {
            inner: BnbSolver::new(),
            decision_builder,
            evaluator,
        }
    }

    #[inline]
    pub fn preallocated(
        num_vehicles: usize,
        num_tasks: usize,
        decision_builder: B,
        evaluator: E,
    ) -> Self {
        Self {
            inner: BnbSolver::preallocated(num_vehicles, num_tasks),
            decision_builder,
            evaluator,
        }
    }
}

impl<T, B, E> PortfolioSolver<T> for BnbPortfolioSolver<T, B, E>
where
    T: SolverNumeric,
    B: DecisionBuilder<T>,
    E: ObjectiveEvaluator<T>,
{
    fn solve<'a>(&mut self, context: PortfolioSolverContext<'a, T>) -> PortfolioSolverResult<T> {
        let monitor = WrapperMonitor::new(context.monitor);
        let outcome = self.inner.solve_with_incumbent(
            context.model,
            &mut self.decision_builder,
            &mut self.evaluator,
            monitor,
            context.incumbent,
        );

        outcome.into()
    }

    fn name(&self) -> &str {
        self.decision_builder.name()
    }
}
