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

use crate::stats::SolverStatistics;
use apron_model::solution::Solution;
use num_traits::{PrimInt, Signed};

/// The qualitative result of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// The problem is proven infeasible.
    Infeasible,
    /// A solution was found and proven optimal.
    Optimal(Solution<T>),
    /// A feasible solution was found, without an optimality proof.
    Feasible(Solution<T>),
    /// The solver terminated without a solution and without an
    /// infeasibility proof.
    Unknown,
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(solution) => {
                write!(f, "Optimal(makespan={})", solution.makespan())
            }
            SolverResult::Feasible(solution) => {
                write!(f, "Feasible(makespan={})", solution.makespan())
            }
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why the solver stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver found and proved optimality of a solution.
    OptimalityProven,
    /// The solver proved that the problem is infeasible.
    InfeasibilityProven,
    /// The solver aborted due to a search limit (time, nodes, solutions)
    /// or an external interrupt. The string carries the trigger.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The complete outcome of a solve: result, termination reason, proven
/// lower bound (for optimality-gap reporting), and aggregate statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome<T>
where
    T: PrimInt + Signed + Copy,
{
    result: SolverResult<T>,
    reason: TerminationReason,
    /// A proven lower bound on the optimal makespan. For an `Optimal`
    /// result this equals the makespan; for aborted runs it bounds the
    /// remaining optimality gap from below.
    lower_bound: Option<T>,
    statistics: SolverStatistics,
}

impl<T> SolverOutcome<T>
where
    T: PrimInt + Signed + Copy,
{
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: SolverStatistics) -> Self {
        let lower_bound = Some(solution.makespan());
        Self {
            result: SolverResult::Optimal(solution),
            reason: TerminationReason::OptimalityProven,
            lower_bound,
            statistics,
        }
    }

    #[inline]
    pub fn feasible(
        solution: Solution<T>,
        reason: String,
        lower_bound: Option<T>,
        statistics: SolverStatistics,
    ) -> Self {
        Self {
            result: SolverResult::Feasible(solution),
            reason: TerminationReason::Aborted(reason),
            lower_bound,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: SolverStatistics) -> Self {
        Self {
            result: SolverResult::Infeasible,
            reason: TerminationReason::InfeasibilityProven,
            lower_bound: None,
            statistics,
        }
    }

    #[inline]
    pub fn unknown(reason: String, lower_bound: Option<T>, statistics: SolverStatistics) -> Self {
        Self {
            result: SolverResult::Unknown,
            reason: TerminationReason::Aborted(reason),
            lower_bound,
            statistics,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    #[inline]
    pub fn reason(&self) -> &TerminationReason {
        &self.reason
    }

    #[inline]
    pub fn lower_bound(&self) -> Option<T> {
        self.lower_bound
    }

    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(
            self.result,
            SolverResult::Optimal(_) | SolverResult::Feasible(_)
        )
    }

    /// Returns the solution if one was found.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        match &self.result {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => Some(solution),
            _ => None,
        }
    }
}

impl<T> std::fmt::Display for SolverOutcome<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolverOutcome(result: {}, reason: {}", self.result, self.reason)?;
        if let Some(bound) = self.lower_bound {
            write!(f, ", lower_bound: {}", bound)?;
        }
        write!(f, ")")
    }
}
