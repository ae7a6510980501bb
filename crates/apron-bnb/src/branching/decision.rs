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

//! Dispatch decisions and their feasibility rules.
//!
//! A `Decision` appends one task to one vehicle's route at the earliest
//! feasible start time. Because makespan is a regular objective, schedules
//! in which every task starts as early as its assignment, route position,
//! and predecessor allow contain an optimum, so earliest-start dispatching
//! loses nothing.
//!
//! # Symmetry
//!
//! Different interleavings of dispatches across vehicles produce the same
//! final schedule. To avoid exploring those duplicates, decisions are only
//! generated forward in time: a dispatch may not start before the previous
//! decision's start time, and at equal start times the task index must not
//! decrease. Every final schedule has exactly one dispatch order sorted by
//! (start time, task index): durations are positive and travel times
//! non-negative, so predecessors and route predecessors always sort
//! earlier, and that canonical order always passes the filter.

use crate::{bounds::TaskBounds, state::SearchState};
use apron_model::{
    index::{TaskIndex, VehicleIndex},
    model::Model,
};
use apron_search::num::SolverNumeric;

/// A decision to dispatch a task on a vehicle at a fixed start time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decision<T> {
    /// The start time of the dispatched task.
    start_time: T,
    /// The completion time (start plus duration); also an admissible
    /// lower bound on the makespan of every schedule below this decision.
    completion_time: T,
    /// The dispatched task.
    task: TaskIndex,
    /// The serving vehicle.
    vehicle: VehicleIndex,
}

impl<T> std::fmt::Display for Decision<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Decision(task: {}, vehicle: {}, start: {}, completion: {})",
            self.task, self.vehicle, self.start_time, self.completion_time
        )
    }
}

impl<T> Decision<T>
where
    T: SolverNumeric,
{
    /// Assembles a decision from raw parts, skipping feasibility checks.
    /// Intended for tests and internal plumbing; search code goes through
    /// `try_new`.
    #[inline]
    pub fn from_parts(
        task: TaskIndex,
        vehicle: VehicleIndex,
        start_time: T,
        completion_time: T,
    ) -> Self {
        Self {
            start_time,
            completion_time,
            task,
            vehicle,
        }
    }

    /// Tries to create the dispatch of `task` on `vehicle` in the given
    /// state.
    ///
    /// Returns `None` when the dispatch is structurally impossible (task
    /// already dispatched, incompatible vehicle, predecessor or forced
    /// predecessor still waiting), infeasible (start past the propagated
    /// latest start), or pruned by the forward-in-time symmetry rule.
    #[inline]
    pub fn try_new(
        task: TaskIndex,
        vehicle: VehicleIndex,
        model: &Model<T>,
        bounds: &TaskBounds<T>,
        state: &SearchState<T>,
    ) -> Option<Self> {
        debug_assert!(
            task.get() < model.num_tasks(),
            "called `Decision::try_new` with task index out of bounds: the len is {} but the index is {}",
            model.num_tasks(),
            task.get()
        );
        debug_assert!(
            vehicle.get() < model.num_vehicles(),
            "called `Decision::try_new` with vehicle index out of bounds: the len is {} but the index is {}",
            model.num_vehicles(),
            vehicle.get()
        );

        if state.is_task_assigned(task) {
            return None;
        }
        if !model.is_compatible(task, vehicle) {
            return None;
        }

        let start_time = Self::earliest_feasible_start(task, vehicle, model, bounds, state)?;

        // Forward-in-time symmetry breaking.
        let last_time = state.last_decision_time();
        if start_time < last_time {
            return None;
        }
        if start_time == last_time && task < state.last_decision_task() {
            return None;
        }

        let completion_time = start_time + model.task_duration(task);
        Some(Self {
            start_time,
            completion_time,
            task,
            vehicle,
        })
    }

    /// Computes the earliest start of `task` on `vehicle`, or `None` when
    /// the dispatch cannot be feasible in any completion of this state.
    ///
    /// The start honors the propagated release (aircraft arrival plus
    /// precedence and forced-order tightening), the actual end of the
    /// predecessor, and the vehicle's availability including the travel
    /// leg from its current stand.
    #[inline]
    pub(crate) fn earliest_feasible_start(
        task: TaskIndex,
        vehicle: VehicleIndex,
        model: &Model<T>,
        bounds: &TaskBounds<T>,
        state: &SearchState<T>,
    ) -> Option<T> {
        // Predecessor must already be dispatched.
        let mut start_time = bounds.earliest_start(task);
        if let Some(predecessor) = model.task_predecessor(task) {
            if !state.is_task_assigned(predecessor) {
                return None;
            }
            let predecessor_end =
                state.task_start_time(predecessor) + model.task_duration(predecessor);
            start_time = start_time.max(predecessor_end);
        }

        // A task forced to run earlier on the same (unique) vehicle must
        // not still be waiting; appending would invert the forced order.
        for &earlier in bounds.forced_before(task) {
            if !state.is_task_assigned(earlier) {
                return None;
            }
        }

        let travel = model.travel_time(state.vehicle_location(vehicle), model.task_parking(task));
        let vehicle_available = state.vehicle_free_time(vehicle).saturating_add_val(travel);
        start_time = start_time.max(vehicle_available);

        if start_time > bounds.latest_start(task) {
            return None;
        }

        Some(start_time)
    }

    /// Returns the start time of this decision.
    #[inline]
    pub fn start_time(&self) -> T {
        self.start_time
    }

    /// Returns the completion time of this decision.
    #[inline]
    pub fn completion_time(&self) -> T {
        self.completion_time
    }

    /// Returns the dispatched task.
    #[inline]
    pub fn task(&self) -> TaskIndex {
        self.task
    }

    /// Returns the serving vehicle.
    #[inline]
    pub fn vehicle(&self) -> VehicleIndex {
        self.vehicle
    }
}

/// Fills `out` with every feasible dispatch at the current node.
///
/// The emitted set is complete modulo the symmetry rule, so builders may
/// reorder it freely without losing optimality proofs.
pub(crate) fn generate_feasible<T>(
    model: &Model<T>,
    bounds: &TaskBounds<T>,
    state: &SearchState<T>,
    out: &mut Vec<Decision<T>>,
) where
    T: SolverNumeric,
{
    out.clear();
    for t in 0..model.num_tasks() {
        let task = TaskIndex::new(t);
        if state.is_task_assigned(task) {
            continue;
        }
        for vehicle in model.compatible_vehicles(task) {
            if let Some(decision) = Decision::try_new(task, vehicle, model, bounds, state) {
                out.push(decision);
            }
        }
    }
}

/// A strategy producing the exploration order of the feasible dispatches
/// at each node. The engine pops decisions from the back of the returned
/// slice, so builders place the decision to explore first at the end.
pub trait DecisionBuilder<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the decision builder.
    fn name(&self) -> &str;

    /// Generates the ordered feasible dispatches for the current node.
    fn next_decisions(
        &mut self,
        model: &Model<T>,
        bounds: &TaskBounds<T>,
        state: &SearchState<T>,
    ) -> &[Decision<T>];
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::model::ModelBuilder;

    type IntegerType = i64;

    fn fixture() -> (Model<IntegerType>, TaskBounds<IntegerType>) {
        let mut builder = ModelBuilder::new();
        let p1 = builder.add_parking("P1");
        let p2 = builder.add_parking("P2");
        builder.set_travel_time(p1, p2, 3);
        builder.set_travel_time(p2, p1, 3);
        let ac = builder.add_aircraft("AC1", p1, 5, 100);
        let t1 = builder.add_task("T1", ac, 10, "fuel");
        let t2 = builder.add_task("T2", ac, 5, "fuel");
        builder.set_predecessor(t2, t1);
        builder.add_vehicle("V1", &["fuel"], p2);
        let model = builder.build().unwrap();
        let mut bounds = TaskBounds::new();
        assert!(bounds.initialize(&model));
        (model, bounds)
    }

    #[test]
    fn test_start_honors_arrival_and_base_travel() {
        let (model, bounds) = fixture();
        let state = SearchState::new(&model);
        let decision = Decision::try_new(
            TaskIndex::new(0),
            VehicleIndex::new(0),
            &model,
            &bounds,
            &state,
        )
        .expect("dispatch is feasible");

        // Arrival is 5, base leg is 3: arrival dominates.
        assert_eq!(decision.start_time(), 5);
        assert_eq!(decision.completion_time(), 15);
    }

    #[test]
    fn test_successor_blocked_until_predecessor_dispatched() {
        let (model, bounds) = fixture();
        let mut state = SearchState::new(&model);
        let t1 = TaskIndex::new(0);
        let t2 = TaskIndex::new(1);
        let vehicle = VehicleIndex::new(0);

        assert!(Decision::try_new(t2, vehicle, &model, &bounds, &state).is_none());

        let p1 = model.task_parking(t1);
        state.assign_task(t1, vehicle, 5, 15, p1);
        state.set_last_decision(5, t1);

        let decision =
            Decision::try_new(t2, vehicle, &model, &bounds, &state).expect("t2 is now ready");
        // Same stand, so the successor follows immediately.
        assert_eq!(decision.start_time(), 15);
    }

    #[test]
    fn test_deadline_excludes_late_dispatch() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 20);
        let t1 = builder.add_task("T1", ac, 8, "stairs");
        let t2 = builder.add_task("T2", ac, 15, "fuel");
        builder.add_vehicle("V1", &["fuel", "stairs"], p);
        builder.add_vehicle("V2", &["stairs"], p);
        let model = builder.build().unwrap();
        let mut bounds = TaskBounds::new();
        assert!(bounds.initialize(&model));

        let mut state = SearchState::new(&model);
        // T1 occupies V1 until time 8; 8 + 15 > 20, so T2 (pinned to V1)
        // can no longer meet its deadline in any completion of this
        // branch. The instance stays feasible via T1 on V2.
        state.assign_task(t1, VehicleIndex::new(0), 0, 8, p);
        state.set_last_decision(0, t1);
        assert!(Decision::try_new(t2, VehicleIndex::new(0), &model, &bounds, &state).is_none());

        let mut out = Vec::new();
        generate_feasible(&model, &bounds, &state, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_symmetry_rule_skips_backward_dispatches() {
        let (model, bounds) = fixture();
        let mut state = SearchState::new(&model);
        // Pretend the last decision started at time 50.
        state.set_last_decision(50, TaskIndex::new(1));

        assert!(Decision::try_new(
            TaskIndex::new(0),
            VehicleIndex::new(0),
            &model,
            &bounds,
            &state
        )
        .is_none());
    }

    #[test]
    fn test_generate_feasible_emits_all_ready_dispatches() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 100);
        builder.add_task("T1", ac, 10, "fuel");
        builder.add_task("T2", ac, 5, "fuel");
        builder.add_vehicle("V1", &["fuel"], p);
        builder.add_vehicle("V2", &["fuel"], p);
        let model = builder.build().unwrap();
        let mut bounds = TaskBounds::new();
        assert!(bounds.initialize(&model));

        let state = SearchState::new(&model);
        let mut out = Vec::new();
        generate_feasible(&model, &bounds, &state, &mut out);
        // Two independent tasks times two vehicles.
        assert_eq!(out.len(), 4);
    }
}
