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

//! The portfolio interface: the contract between the orchestrating solver
//! and the concrete search engines it runs in parallel.
//!
//! Each worker receives a `PortfolioSolverContext` (the immutable model,
//! the shared incumbent, its monitor stack, and the cooperative stop flag)
//! and reports back a `PortfolioSolverResult` with its qualitative
//! result, termination reason, the lower bound it proved, and the number
//! of nodes it explored.

use crate::{
    incumbent::SharedIncumbent,
    monitor::search_monitor::SearchMonitor,
    result::{SolverResult, TerminationReason},
};
use apron_model::{model::Model, solution::Solution};
use num_traits::{PrimInt, Signed};
use std::sync::atomic::AtomicBool;

/// Everything a portfolio worker needs for one run.
pub struct PortfolioSolverContext<'a, T>
where
    T: PrimInt + Signed,
{
    pub model: &'a Model<T>,
    pub incumbent: &'a SharedIncumbent<T>,
    pub monitor: &'a mut dyn SearchMonitor<T>,
    pub stop: &'a AtomicBool,
}

impl<'a, T> PortfolioSolverContext<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    pub fn new(
        model: &'a Model<T>,
        incumbent: &'a SharedIncumbent<T>,
        monitor: &'a mut dyn SearchMonitor<T>,
        stop: &'a AtomicBool,
    ) -> Self {
        Self {
            model,
            incumbent,
            monitor,
            stop,
        }
    }
}

impl<'a, T> std::fmt::Debug for PortfolioSolverContext<'a, T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioSolverContext")
            .field("incumbent", &self.incumbent)
            .field("monitor", &self.monitor.name())
            .field("stop", &self.stop)
            .finish()
    }
}

/// One worker's report after its run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioSolverResult<T>
where
    T: PrimInt + Signed,
{
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    /// The lower bound on the optimal makespan this worker proved.
    lower_bound: Option<T>,
    /// Nodes this worker explored.
    nodes_explored: u64,
}

impl<T> PortfolioSolverResult<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    pub fn optimal(solution: Solution<T>, nodes_explored: u64) -> Self
    where
        T: Copy,
    {
        let lower_bound = Some(solution.makespan());
        Self {
            result: SolverResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            lower_bound,
            nodes_explored,
        }
    }

    #[inline]
    pub fn infeasible(nodes_explored: u64) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            lower_bound: None,
            nodes_explored,
        }
    }

    #[inline]
    pub fn aborted<R>(
        solution: Option<Solution<T>>,
        reason: R,
        lower_bound: Option<T>,
        nodes_explored: u64,
    ) -> Self
    where
        R: Into<String>,
    {
        let termination_reason = TerminationReason::Aborted(reason.into());
        let result = match solution {
            Some(solution) => SolverResult::Feasible(solution),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason,
            lower_bound,
            nodes_explored,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn lower_bound(&self) -> Option<T> {
        self.lower_bound
    }

    #[inline]
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }
}

impl<T> std::fmt::Display for PortfolioSolverResult<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PortfolioSolverResult(result: {}, termination_reason: {})",
            self.result, self.termination_reason
        )
    }
}

/// A search engine that can run as one worker of a portfolio.
pub trait PortfolioSolver<T>
where
    T: PrimInt + Signed,
{
    fn solve<'a>(&mut self, context: PortfolioSolverContext<'a, T>) -> PortfolioSolverResult<T>;
    fn name(&self) -> &str;
}
