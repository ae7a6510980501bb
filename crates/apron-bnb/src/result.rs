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

use crate::{bounds::PropagationConflict, stats::BnbSolverStatistics};
use apron_model::solution::Solution;
use apron_search::{portfolio::PortfolioSolverResult, result::SolverResult};
use num_traits::{PrimInt, Signed};

/// Why the engine stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BnbTerminationReason {
    /// The search tree was exhausted with an incumbent in hand.
    OptimalityProven,
    /// The search tree was exhausted without any solution, or root
    /// propagation already failed.
    InfeasibilityProven,
    /// A monitor terminated the search early.
    Aborted(String),
}

impl std::fmt::Display for BnbTerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BnbTerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            BnbTerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            BnbTerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of one engine run.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: BnbTerminationReason,
    /// The proven lower bound on the optimal makespan, when one exists.
    lower_bound: Option<T>,
    /// The root conflict, when infeasibility was proven by propagation.
    conflict: Option<PropagationConflict>,
    statistics: BnbSolverStatistics,
}

impl<T> BnbSolverOutcome<T> {
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: BnbSolverStatistics) -> Self
    where
        T: PrimInt + Signed,
    {
        let lower_bound = Some(solution.makespan());
        Self {
            result: SolverResult::Optimal(solution),
            termination_reason: BnbTerminationReason::OptimalityProven,
            lower_bound,
            conflict: None,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(
        conflict: Option<PropagationConflict>,
        statistics: BnbSolverStatistics,
    ) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: BnbTerminationReason::InfeasibilityProven,
            lower_bound: None,
            conflict,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(
        solution: Option<Solution<T>>,
        reason: R,
        lower_bound: Option<T>,
        statistics: BnbSolverStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        let termination_reason = BnbTerminationReason::Aborted(reason.into());
        let result = match solution {
            Some(solution) => SolverResult::Feasible(solution),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason,
            lower_bound,
            conflict: None,
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &BnbTerminationReason {
        &self.termination_reason
    }

    /// Returns the proven lower bound, if any.
    #[inline]
    pub fn lower_bound(&self) -> Option<T>
    where
        T: Copy,
    {
        self.lower_bound
    }

    /// Returns the root conflict behind a proven infeasibility, if known.
    #[inline]
    pub fn conflict(&self) -> Option<PropagationConflict> {
        self.conflict
    }

    /// Returns the engine statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }
}

impl<T> From<BnbSolverOutcome<T>> for PortfolioSolverResult<T>
where
    T: PrimInt + Signed,
{
    fn from(outcome: BnbSolverOutcome<T>) -> Self {
        let nodes = outcome.statistics.nodes_explored;
        match outcome.termination_reason {
            BnbTerminationReason::OptimalityProven => match outcome.result {
                SolverResult::Optimal(solution) => PortfolioSolverResult::optimal(solution, nodes),
                _ => unreachable!(
                    "termination reason is OptimalityProven but result is not Optimal"
                ),
            },
            BnbTerminationReason::InfeasibilityProven => PortfolioSolverResult::infeasible(nodes),
            BnbTerminationReason::Aborted(reason) => match outcome.result {
                SolverResult::Feasible(solution) => PortfolioSolverResult::aborted(
                    Some(solution),
                    reason,
                    outcome.lower_bound,
                    nodes,
                ),
                _ => PortfolioSolverResult::aborted(None, reason, outcome.lower_bound, nodes),
            },
        }
    }
}
