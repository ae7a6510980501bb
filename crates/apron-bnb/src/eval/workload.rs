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

//! Workload-strengthened lower bound.
//!
//! Combines the critical-path bound with a parallel-machine relaxation
//! per capability pool. Tasks sharing the same set of compatible vehicles
//! can only be served by that pool; in any schedule the pool's machines
//! finish no earlier than the average of their release times plus the
//! pool's remaining work, so
//!
//! `(sum of vehicle free times + sum of remaining durations) / pool size`
//!
//! (floor division) never exceeds the latest pool completion. Vehicles
//! also serving other pools only finish later, and arrivals and travel
//! legs only push completions further out, so dropping both keeps the
//! estimate optimistic. The final bound is the maximum of the critical-path bound
//! and every pool bound.

use crate::{
    bounds::TaskBounds,
    eval::{critical_path::CriticalPathEvaluator, evaluator::ObjectiveEvaluator},
    state::SearchState,
};
use apron_model::{
    index::{TaskIndex, VehicleIndex},
    model::Model,
};
use apron_search::num::SolverNumeric;
use std::collections::HashMap;

/// One capability pool: the tasks pinned to an identical vehicle set.
#[derive(Debug, Clone)]
struct CapabilityPool {
    vehicles: Vec<VehicleIndex>,
    tasks: Vec<TaskIndex>,
}

/// The critical-path bound strengthened by per-pool workload averages.
#[derive(Debug, Clone)]
pub struct WorkloadEvaluator<T> {
    critical_path: CriticalPathEvaluator<T>,
    pools: Vec<CapabilityPool>,
}

impl<T> WorkloadEvaluator<T>
where
    T: SolverNumeric,
{
    /// Builds the evaluator for a model, grouping tasks into capability
    /// pools by their compatible vehicle sets.
    pub fn for_model(model: &Model<T>) -> Self {
        let mut pool_by_key: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut pools: Vec<CapabilityPool> = Vec::new();

        for t in 0..model.num_tasks() {
            let task = TaskIndex::new(t);
            let key: Vec<usize> = model.compatible_vehicles(task).map(|v| v.get()).collect();
            match pool_by_key.get(&key) {
                Some(&index) => pools[index].tasks.push(task),
                None => {
                    pool_by_key.insert(key.clone(), pools.len());
                    pools.push(CapabilityPool {
                        vehicles: key.into_iter().map(VehicleIndex::new).collect(),
                        tasks: vec![task],
                    });
                }
            }
        }

        Self {
            critical_path: CriticalPathEvaluator::preallocated(model.num_tasks()),
            pools,
        }
    }
}

impl<T> ObjectiveEvaluator<T> for WorkloadEvaluator<T>
where
    T: SolverNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "WorkloadEvaluator"
    }

    fn lower_bound(
        &mut self,
        model: &Model<T>,
        bounds: &TaskBounds<T>,
        state: &SearchState<T>,
    ) -> Option<T> {
        let mut bound = self.critical_path.lower_bound(model, bounds, state)?;

        for pool in &self.pools {
            let mut remaining_work = T::zero();
            for &task in &pool.tasks {
                if !state.is_task_assigned(task) {
                    remaining_work = remaining_work.saturating_add_val(model.task_duration(task));
                }
            }
            if remaining_work.is_zero() {
                continue;
            }

            let pool_size = match T::from(pool.vehicles.len()) {
                Some(size) => size,
                // A pool too large for the time type cannot tighten the
                // bound; skipping it stays admissible.
                None => continue,
            };

            let mut release_sum = T::zero();
            for &vehicle in &pool.vehicles {
                release_sum = release_sum.saturating_add_val(state.vehicle_free_time(vehicle));
            }

            let pool_bound = release_sum.saturating_add_val(remaining_work) / pool_size;
            bound = bound.max(pool_bound);
        }

        Some(bound)
    }
}
