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

//! Search state management for the branch-and-bound engine.
//!
//! `SearchState` is a compact, mutable container tracking the incremental
//! dispatch of tasks onto vehicles during search:
//!
//! - per vehicle: the time it becomes free again and the parking stand it
//!   will then be standing at (travel legs depend on it);
//! - per task: assignment status (a `FixedBitSet`), the chosen vehicle,
//!   and the fixed start time;
//! - the makespan of the partial schedule and the metadata of the last
//!   dispatch decision (used for symmetry breaking).
//!
//! All mutations are reversed through `SearchTrail`; the state itself
//! offers no undo. Checked accessors debug-assert bounds; `*_unchecked`
//! variants skip bounds checks for the search hot path, with the usual
//! caller obligations.

use apron_model::{
    index::{ParkingIndex, TaskIndex, VehicleIndex},
    model::Model,
    solution::Solution,
};
use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed, Zero};

/// The mutable search state: partial dispatch of tasks onto vehicles.
#[derive(Debug, Clone)]
pub struct SearchState<T> {
    vehicle_free_times: Vec<T>,
    vehicle_locations: Vec<ParkingIndex>,
    task_assignments: FixedBitSet,
    task_start_times: Vec<T>,
    task_vehicles: Vec<VehicleIndex>,

    current_makespan: T,
    last_decision_time: T,
    last_decision_task: TaskIndex,
    num_tasks: usize,
    num_assigned_tasks: usize,
}

impl<T> SearchState<T>
where
    T: PrimInt + Signed,
{
    /// Creates the root state for a model: every vehicle idle at its base
    /// from time zero, no task dispatched, makespan zero.
    #[inline]
    pub fn new(model: &Model<T>) -> Self {
        let num_tasks = model.num_tasks();
        let num_vehicles = model.num_vehicles();
        Self {
            vehicle_free_times: vec![T::zero(); num_vehicles],
            vehicle_locations: (0..num_vehicles)
                .map(|v| model.vehicle_base_parking(VehicleIndex::new(v)))
                .collect(),
            task_assignments: FixedBitSet::with_capacity(num_tasks),
            task_start_times: vec![T::zero(); num_tasks],
            task_vehicles: vec![VehicleIndex::new(0); num_tasks],
            current_makespan: T::zero(),
            last_decision_time: T::min_value(),
            last_decision_task: TaskIndex::new(0),
            num_tasks,
            num_assigned_tasks: 0,
        }
    }

    /// Returns the number of vehicles in this state.
    #[inline]
    pub fn num_vehicles(&self) -> usize {
        self.vehicle_free_times.len()
    }

    /// Returns the number of tasks in this state.
    #[inline]
    pub fn num_tasks(&self) -> usize {
        self.num_tasks
    }

    /// Returns the number of dispatched tasks in this state.
    #[inline]
    pub fn num_assigned_tasks(&self) -> usize {
        self.num_assigned_tasks
    }

    /// Returns the makespan of the partial schedule.
    #[inline]
    pub fn current_makespan(&self) -> T {
        self.current_makespan
    }

    /// Returns the start time of the most recent dispatch.
    #[inline]
    pub fn last_decision_time(&self) -> T {
        self.last_decision_time
    }

    /// Returns the task of the most recent dispatch.
    #[inline]
    pub fn last_decision_task(&self) -> TaskIndex {
        self.last_decision_task
    }

    /// Checks whether the specified task has been dispatched.
    #[inline]
    pub fn is_task_assigned(&self, task: TaskIndex) -> bool {
        debug_assert!(
            task.get() < self.num_tasks,
            "called `SearchState::is_task_assigned` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks,
            task.get()
        );
        self.task_assignments.contains(task.get())
    }

    /// Checks whether the specified task has been dispatched without
    /// bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `task` is within `0..num_tasks()`.
    #[inline]
    pub unsafe fn is_task_assigned_unchecked(&self, task: TaskIndex) -> bool {
        debug_assert!(task.get() < self.num_tasks);
        unsafe { self.task_assignments.contains_unchecked(task.get()) }
    }

    /// Returns the time the specified vehicle becomes free.
    #[inline]
    pub fn vehicle_free_time(&self, vehicle: VehicleIndex) -> T {
        debug_assert!(
            vehicle.get() < self.num_vehicles(),
            "called `SearchState::vehicle_free_time` with vehicle index out of bounds: the len is {} but the index is {}",
            self.num_vehicles(),
            vehicle.get()
        );
        self.vehicle_free_times[vehicle.get()]
    }

    /// Returns the stand the specified vehicle will be at when free.
    #[inline]
    pub fn vehicle_location(&self, vehicle: VehicleIndex) -> ParkingIndex {
        debug_assert!(
            vehicle.get() < self.num_vehicles(),
            "called `SearchState::vehicle_location` with vehicle index out of bounds: the len is {} but the index is {}",
            self.num_vehicles(),
            vehicle.get()
        );
        self.vehicle_locations[vehicle.get()]
    }

    /// Returns the start time of a dispatched task.
    #[inline]
    pub fn task_start_time(&self, task: TaskIndex) -> T {
        debug_assert!(
            self.is_task_assigned(task),
            "called `SearchState::task_start_time` for undispatched task {}",
            task
        );
        self.task_start_times[task.get()]
    }

    /// Returns the vehicle of a dispatched task.
    #[inline]
    pub fn task_vehicle(&self, task: TaskIndex) -> VehicleIndex {
        debug_assert!(
            self.is_task_assigned(task),
            "called `SearchState::task_vehicle` for undispatched task {}",
            task
        );
        self.task_vehicles[task.get()]
    }

    /// Records the metadata of the most recent dispatch.
    #[inline]
    pub fn set_last_decision(&mut self, time: T, task: TaskIndex) {
        debug_assert!(
            task.get() < self.num_tasks,
            "called `SearchState::set_last_decision` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks,
            task.get()
        );
        self.last_decision_time = time;
        self.last_decision_task = task;
    }

    /// Applies one dispatch: task `task` runs on `vehicle` from
    /// `start_time`, after which the vehicle is free at `vehicle_ready`
    /// standing at `location`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the task is out of bounds or already
    /// dispatched.
    #[inline]
    pub fn assign_task(
        &mut self,
        task: TaskIndex,
        vehicle: VehicleIndex,
        start_time: T,
        vehicle_ready: T,
        location: ParkingIndex,
    ) {
        debug_assert!(
            task.get() < self.num_tasks,
            "called `SearchState::assign_task` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks,
            task.get()
        );
        debug_assert!(
            !self.task_assignments.contains(task.get()),
            "called `SearchState::assign_task` with already dispatched task {}",
            task.get()
        );
        debug_assert!(self.num_assigned_tasks < self.num_tasks);

        self.task_assignments.insert(task.get());
        self.task_start_times[task.get()] = start_time;
        self.task_vehicles[task.get()] = vehicle;
        self.vehicle_free_times[vehicle.get()] = vehicle_ready;
        self.vehicle_locations[vehicle.get()] = location;
        self.current_makespan = self.current_makespan.max(vehicle_ready);
        self.num_assigned_tasks += 1;
    }

    /// Reverses one dispatch, restoring the captured previous values.
    /// Used exclusively by the trail during backtracking.
    #[inline]
    pub(crate) fn undo_assignment(
        &mut self,
        task: TaskIndex,
        vehicle: VehicleIndex,
        old_vehicle_time: T,
        old_vehicle_location: ParkingIndex,
        old_makespan: T,
    ) {
        debug_assert!(
            self.task_assignments.contains(task.get()),
            "called `SearchState::undo_assignment` for undispatched task {}",
            task.get()
        );

        self.task_assignments.remove(task.get());
        self.vehicle_free_times[vehicle.get()] = old_vehicle_time;
        self.vehicle_locations[vehicle.get()] = old_vehicle_location;
        self.current_makespan = old_makespan;
        self.num_assigned_tasks -= 1;
    }

    /// Restores the last-decision metadata; used by the trail on
    /// backtracking.
    #[inline]
    pub(crate) fn restore_last_decision(&mut self, time: T, task: TaskIndex) {
        self.last_decision_time = time;
        self.last_decision_task = task;
    }

    /// Converts a complete state into a `Solution`. Returns `None` while
    /// tasks are still undispatched.
    #[inline]
    pub fn to_solution(&self) -> Option<Solution<T>>
    where
        T: Zero,
    {
        if self.num_assigned_tasks != self.num_tasks {
            return None;
        }
        Some(Solution::new(
            self.current_makespan,
            self.task_vehicles.clone(),
            self.task_start_times.clone(),
        ))
    }
}

impl<T> std::fmt::Display for SearchState<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(assigned: {}/{}, makespan: {})",
            self.num_assigned_tasks, self.num_tasks, self.current_makespan
        )
    }
}
