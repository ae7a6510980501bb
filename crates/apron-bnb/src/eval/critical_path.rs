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

//! Critical-path lower bound.
//!
//! For every undispatched task the evaluator derives a release time from
//! the propagated static bounds, the actual completion of its dispatched
//! predecessor (or the recursively derived release of an undispatched
//! one), and the earliest free time among its compatible vehicles. Each
//! term under-approximates the task's real start in any completion, so
//! `release + duration` never exceeds the task's real completion and the
//! maximum over all tasks (and the current partial makespan) is an
//! admissible bound. A task whose derived release exceeds its latest
//! start can no longer meet its deadline anywhere below this node, which
//! the evaluator reports as `None`.
//!
//! Travel legs are deliberately left out of the relaxation: with an
//! arbitrary asymmetric travel matrix the vehicle serving a task may
//! approach from any stand, so no positive travel term is safe to add.

use crate::{bounds::TaskBounds, eval::evaluator::ObjectiveEvaluator, state::SearchState};
use apron_model::model::Model;
use apron_search::num::SolverNumeric;

/// A lightweight release-time/critical-path bound.
#[derive(Debug, Clone, Default)]
pub struct CriticalPathEvaluator<T> {
    releases: Vec<T>,
}

impl<T> CriticalPathEvaluator<T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            releases: Vec::new(),
        }
    }

    /// Preallocates the scratch buffer for the given number of tasks.
    #[inline]
    pub fn preallocated(num_tasks: usize) -> Self {
        Self {
            releases: Vec::with_capacity(num_tasks),
        }
    }
}

impl<T> ObjectiveEvaluator<T> for CriticalPathEvaluator<T>
where
    T: SolverNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "CriticalPathEvaluator"
    }

    fn lower_bound(
        &mut self,
        model: &Model<T>,
        bounds: &TaskBounds<T>,
        state: &SearchState<T>,
    ) -> Option<T> {
        let num_tasks = model.num_tasks();
        self.releases.clear();
        self.releases.resize(num_tasks, T::zero());

        let mut bound = state.current_makespan();

        // Topological order guarantees predecessors are resolved before
        // their successors.
        for &task in bounds.topological_order() {
            if state.is_task_assigned(task) {
                self.releases[task.get()] = state.task_start_time(task);
                continue;
            }

            let mut release = bounds.earliest_start(task);
            if let Some(predecessor) = model.task_predecessor(task) {
                let predecessor_end = self.releases[predecessor.get()]
                    .saturating_add_val(model.task_duration(predecessor));
                release = release.max(predecessor_end);
            }

            let mut earliest_vehicle = T::max_value();
            for vehicle in model.compatible_vehicles(task) {
                earliest_vehicle = earliest_vehicle.min(state.vehicle_free_time(vehicle));
            }
            release = release.max(earliest_vehicle);

            if release > bounds.latest_start(task) {
                return None;
            }

            self.releases[task.get()] = release;
            bound = bound.max(release.saturating_add_val(model.task_duration(task)));
        }

        Some(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::{index::VehicleIndex, model::ModelBuilder};

    type IntegerType = i64;

    #[test]
    fn test_chain_bound_is_duration_sum() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 100);
        let t1 = builder.add_task("T1", ac, 10, "fuel");
        let t2 = builder.add_task("T2", ac, 20, "fuel");
        builder.set_predecessor(t2, t1);
        builder.add_vehicle("V1", &["fuel"], p);
        let model = builder.build().unwrap();
        let mut bounds = crate::bounds::TaskBounds::new();
        assert!(bounds.initialize(&model));
        let state = SearchState::new(&model);

        let mut evaluator = CriticalPathEvaluator::new();
        let bound = evaluator
            .lower_bound(&model, &bounds, &state)
            .expect("root is feasible");
        assert_eq!(bound, 30);
    }

    #[test]
    fn test_vehicle_availability_lifts_bound() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 100);
        let t1 = builder.add_task("T1", ac, 10, "fuel");
        builder.add_task("T2", ac, 10, "fuel");
        builder.add_vehicle("V1", &["fuel"], p);
        let model = builder.build().unwrap();
        let mut bounds = crate::bounds::TaskBounds::new();
        assert!(bounds.initialize(&model));

        let mut state = SearchState::new(&model);
        state.assign_task(t1, VehicleIndex::new(0), 0, 10, p);
        state.set_last_decision(0, t1);

        let mut evaluator = CriticalPathEvaluator::new();
        let bound = evaluator
            .lower_bound(&model, &bounds, &state)
            .expect("branch is feasible");
        // The sole vehicle is busy until 10, so t2 cannot end before 20.
        assert_eq!(bound, 20);
    }

    #[test]
    fn test_missed_deadline_reports_infeasible() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 25);
        let t1 = builder.add_task("T1", ac, 8, "stairs");
        builder.add_task("T2", ac, 15, "fuel");
        builder.add_vehicle("V1", &["fuel", "stairs"], p);
        builder.add_vehicle("V2", &["stairs"], p);
        let model = builder.build().unwrap();
        let mut bounds = crate::bounds::TaskBounds::new();
        assert!(bounds.initialize(&model));

        let mut state = SearchState::new(&model);
        // T1 keeps V1 (the only fuel vehicle) busy until 11: 11 + 15 > 25.
        state.assign_task(t1, VehicleIndex::new(0), 3, 11, p);
        state.set_last_decision(3, t1);

        let mut evaluator = CriticalPathEvaluator::new();
        assert!(evaluator.lower_bound(&model, &bounds, &state).is_none());
    }
}
