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

//! The planning facade: `Instance` in, `TurnaroundPlan` out.
//!
//! Pipeline: validate and intern the instance into a `Model`, run root
//! propagation for an early infeasibility certificate, solve with the
//! default two-strategy portfolio under the configured budgets, then
//! extract and re-validate the final `Schedule`.
//!
//! Error taxonomy (all fatal for the given instance):
//! - `InvalidInstance`: malformed input, no search attempted;
//! - `NoCompatibleVehicle` / `InfeasibleWindow`: build-time fast fails;
//! - `NoFeasibleSchedule`: root or search-proven infeasibility, with a
//!   propagation conflict as certificate when one exists;
//! - `InvariantViolation`: the extractor caught a corrupt schedule;
//!   a defect in the engine, logged as an error and never silently
//!   corrected.
//!
//! Budget exhaustion is not an error: the plan comes back as
//! `BestEffort` with `optimal() == false` and the proven lower bound for
//! gap reporting.

use crate::solver::{Solver, SolverBuilder};
use apron_bnb::{
    bounds::{PropagationConflict, TaskBounds},
    branching::chronological::ChronologicalBuilder,
    branching::most_constrained::MostConstrainedBuilder,
    eval::critical_path::CriticalPathEvaluator,
    eval::workload::WorkloadEvaluator,
    portfolio::BnbPortfolioSolver,
};
use apron_model::{
    instance::Instance,
    model::{Model, ModelError},
    schedule::{Schedule, ScheduleError},
};
use apron_search::{num::SolverNumeric, result::SolverResult, stats::SolverStatistics};
use tracing::{debug, error};

/// Configuration surface of the planning facade.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Wall-clock budget per worker.
    pub time_limit: Option<std::time::Duration>,
    /// Node budget per worker. When neither limit is set, a default node
    /// budget is installed so every run terminates.
    pub node_limit: Option<u64>,
    /// Stop at the first feasible schedule instead of proving optimality.
    pub first_feasible: bool,
}

/// Solution quality of a returned plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    /// The schedule is proven makespan-minimal.
    Optimal,
    /// Best schedule found within the budget; the lower bound quantifies
    /// the remaining gap.
    BestEffort,
}

/// The planning result: schedule, quality flag, and gap information.
#[derive(Debug, Clone)]
pub struct TurnaroundPlan<T> {
    status: PlanStatus,
    schedule: Option<Schedule<T>>,
    lower_bound: Option<T>,
    statistics: SolverStatistics,
}

impl<T> TurnaroundPlan<T>
where
    T: SolverNumeric,
{
    /// Returns the solution quality flag.
    #[inline]
    pub fn status(&self) -> PlanStatus {
        self.status
    }

    /// Returns `true` if the schedule is proven optimal.
    #[inline]
    pub fn optimal(&self) -> bool {
        self.status == PlanStatus::Optimal
    }

    /// Returns the schedule, if one was found within the budget.
    #[inline]
    pub fn schedule(&self) -> Option<&Schedule<T>> {
        self.schedule.as_ref()
    }

    /// Returns the makespan of the returned schedule.
    #[inline]
    pub fn makespan(&self) -> Option<T> {
        self.schedule.as_ref().map(|s| s.makespan())
    }

    /// Returns the proven lower bound on the optimal makespan.
    #[inline]
    pub fn lower_bound(&self) -> Option<T> {
        self.lower_bound
    }

    /// Returns aggregate solve statistics.
    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }
}

/// The error type of the planning facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The instance data is malformed; no search was attempted.
    InvalidInstance(ModelError),
    /// A task's required capability matches no vehicle in the fleet.
    NoCompatibleVehicle { task_id: String },
    /// A task cannot fit into its aircraft's ground window.
    InfeasibleWindow { task_id: String },
    /// No assignment satisfies all constraints. The conflict names a
    /// minimal culprit when root propagation found one.
    NoFeasibleSchedule {
        conflict: Option<PropagationConflict>,
    },
    /// The engine produced a schedule violating an invariant: an
    /// internal defect, never a data error.
    InvariantViolation(ScheduleError),
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::InvalidInstance(error) => write!(f, "invalid instance: {}", error),
            PlanError::NoCompatibleVehicle { task_id } => {
                write!(f, "no vehicle in the fleet can serve task '{}'", task_id)
            }
            PlanError::InfeasibleWindow { task_id } => write!(
                f,
                "task '{}' does not fit into its aircraft's ground window",
                task_id
            ),
            PlanError::NoFeasibleSchedule { conflict } => match conflict {
                Some(conflict) => write!(f, "no feasible schedule: {}", conflict),
                None => write!(f, "no feasible schedule (no certificate)"),
            },
            PlanError::InvariantViolation(error) => {
                write!(f, "internal invariant violation: {}", error)
            }
        }
    }
}

impl std::error::Error for PlanError {}

impl From<ModelError> for PlanError {
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::NoCompatibleVehicle { task_id } => {
                PlanError::NoCompatibleVehicle { task_id }
            }
            ModelError::InfeasibleWindow { task_id } => PlanError::InfeasibleWindow { task_id },
            other => PlanError::InvalidInstance(other),
        }
    }
}

/// Plans a turnaround from ingestion records.
pub fn plan_turnaround<T>(
    instance: Instance<T>,
    options: &PlanOptions,
) -> Result<TurnaroundPlan<T>, PlanError>
where
    T: SolverNumeric,
{
    let model = instance.into_model()?;
    plan_model(&model, options)
}

/// Plans a turnaround for an already validated model.
pub fn plan_model<T>(model: &Model<T>, options: &PlanOptions) -> Result<TurnaroundPlan<T>, PlanError>
where
    T: SolverNumeric,
{
    // Root propagation up front: a conflict is the diagnostic the
    // caller gets with the infeasibility report.
    let mut bounds = TaskBounds::new();
    if !bounds.initialize(model) {
        let conflict = bounds.conflict();
        debug!(?conflict, "instance is infeasible at the root");
        return Err(PlanError::NoFeasibleSchedule { conflict });
    }

    let mut solver = build_default_solver(model, options);
    let outcome = solver.solve(model);

    match outcome.result() {
        SolverResult::Optimal(solution) => {
            let schedule = extract_checked(model, solution)?;
            Ok(TurnaroundPlan {
                status: PlanStatus::Optimal,
                schedule: Some(schedule),
                lower_bound: outcome.lower_bound(),
                statistics: *outcome.statistics(),
            })
        }
        SolverResult::Feasible(solution) => {
            let schedule = extract_checked(model, solution)?;
            Ok(TurnaroundPlan {
                status: PlanStatus::BestEffort,
                schedule: Some(schedule),
                lower_bound: outcome.lower_bound(),
                statistics: *outcome.statistics(),
            })
        }
        SolverResult::Unknown => Ok(TurnaroundPlan {
            status: PlanStatus::BestEffort,
            schedule: None,
            lower_bound: outcome.lower_bound(),
            statistics: *outcome.statistics(),
        }),
        SolverResult::Infeasible => Err(PlanError::NoFeasibleSchedule { conflict: None }),
    }
}

fn build_default_solver<'a, T>(model: &Model<T>, options: &PlanOptions) -> Solver<'a, T>
where
    T: SolverNumeric + 'a,
{
    let mut builder = SolverBuilder::new()
        .add_solver(BnbPortfolioSolver::preallocated(
            model.num_vehicles(),
            model.num_tasks(),
            MostConstrainedBuilder::preallocated(model.num_vehicles(), model.num_tasks()),
            WorkloadEvaluator::for_model(model),
        ))
        .add_solver(BnbPortfolioSolver::preallocated(
            model.num_vehicles(),
            model.num_tasks(),
            ChronologicalBuilder::preallocated(model.num_vehicles(), model.num_tasks()),
            CriticalPathEvaluator::preallocated(model.num_tasks()),
        ));

    if let Some(limit) = options.time_limit {
        builder = builder.with_time_limit(limit);
    }
    if let Some(limit) = options.node_limit {
        builder = builder.with_node_limit(limit);
    }
    if options.first_feasible {
        builder = builder.first_feasible();
    }

    builder.build()
}

fn extract_checked<T>(model: &Model<T>, solution: &apron_model::solution::Solution<T>) -> Result<Schedule<T>, PlanError>
where
    T: SolverNumeric,
{
    Schedule::extract(model, solution).map_err(|violation| {
        error!(%violation, "engine produced a schedule violating an invariant");
        PlanError::InvariantViolation(violation)
    })
}
