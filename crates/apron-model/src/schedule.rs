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

//! Schedule extraction and defensive validation.
//!
//! `Schedule::extract` turns a raw `Solution` into the consumer-facing
//! schedule: per-task rows with concrete end times and per-vehicle routes
//! ordered by start time. Extraction re-checks every scheduling invariant
//! against the model:
//!
//! 1. every task is served by exactly one, compatible vehicle;
//! 2. a task starts no earlier than its predecessor ends;
//! 3. every task runs inside its aircraft's ground window;
//! 4. consecutive tasks on a vehicle respect the travel time between
//!    their stands;
//! 5. a vehicle's first task respects the travel time from its base;
//! 6. tasks on the same vehicle never overlap;
//! 7. every end time equals start plus duration.
//!
//! A violation means the engine produced a corrupt assignment; it is
//! reported as a `ScheduleError` and treated as an internal defect by the
//! caller, never as a user error.

use crate::{
    index::{TaskIndex, VehicleIndex},
    model::Model,
    solution::Solution,
};
use num_traits::{PrimInt, Signed};

/// The error type for schedule validation failures.
///
/// Each variant corresponds to one of the scheduling invariants. These
/// errors indicate a bug in the model builder or the search engine.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScheduleError {
    /// The solution does not cover every task exactly once.
    AssignmentShape,
    /// A task is served by a vehicle lacking the required capability.
    IncompatibleVehicle { task: TaskIndex },
    /// A task starts before its predecessor ends.
    PrecedenceViolation { task: TaskIndex },
    /// A task runs outside its aircraft's ground window.
    WindowViolation { task: TaskIndex },
    /// Two consecutive tasks on a vehicle violate the connecting travel time.
    TravelTimeViolation {
        vehicle: VehicleIndex,
        first: TaskIndex,
        second: TaskIndex,
    },
    /// A vehicle's first task starts before the leg from its base completes.
    BaseTravelViolation {
        vehicle: VehicleIndex,
        task: TaskIndex,
    },
    /// Two tasks on the same vehicle overlap in time.
    OverlapOnVehicle {
        vehicle: VehicleIndex,
        first: TaskIndex,
        second: TaskIndex,
    },
    /// The reported makespan does not equal the latest task end.
    MakespanMismatch,
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::AssignmentShape => {
                write!(f, "solution shape does not match the model's task count")
            }
            ScheduleError::IncompatibleVehicle { task } => {
                write!(f, "task {} is served by an incompatible vehicle", task)
            }
            ScheduleError::PrecedenceViolation { task } => {
                write!(f, "task {} starts before its predecessor ends", task)
            }
            ScheduleError::WindowViolation { task } => {
                write!(f, "task {} runs outside its aircraft's ground window", task)
            }
            ScheduleError::TravelTimeViolation {
                vehicle,
                first,
                second,
            } => write!(
                f,
                "vehicle {} cannot reach task {} after task {} in time",
                vehicle, second, first
            ),
            ScheduleError::BaseTravelViolation { vehicle, task } => write!(
                f,
                "vehicle {} cannot reach its first task {} from its base in time",
                vehicle, task
            ),
            ScheduleError::OverlapOnVehicle {
                vehicle,
                first,
                second,
            } => write!(
                f,
                "tasks {} and {} overlap on vehicle {}",
                first, second, vehicle
            ),
            ScheduleError::MakespanMismatch => {
                write!(f, "reported makespan does not equal the latest task end")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// One scheduled task: assignment plus concrete timing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScheduledTask<T> {
    pub task: TaskIndex,
    pub vehicle: VehicleIndex,
    pub start: T,
    pub end: T,
}

/// The consumer-facing schedule: timed task rows plus per-vehicle routes.
///
/// `entries` is task-indexed; `routes[v]` lists the tasks served by vehicle
/// `v` in execution order (ascending start time).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Schedule<T> {
    makespan: T,
    entries: Vec<ScheduledTask<T>>,
    routes: Vec<Vec<TaskIndex>>,
}

impl<T> Schedule<T>
where
    T: PrimInt + Signed,
{
    /// Materializes and validates a schedule from a raw solution.
    ///
    /// Returns a `ScheduleError` if any scheduling invariant is violated;
    /// such an error signals a defect in the engine, not bad input.
    pub fn extract(model: &Model<T>, solution: &Solution<T>) -> Result<Self, ScheduleError> {
        let num_tasks = model.num_tasks();
        if solution.num_tasks() != num_tasks {
            return Err(ScheduleError::AssignmentShape);
        }

        let mut entries = Vec::with_capacity(num_tasks);
        let mut latest_end = T::zero();

        for t in 0..num_tasks {
            let task = TaskIndex::new(t);
            let vehicle = solution.vehicle_for_task(task);
            if vehicle.get() >= model.num_vehicles() {
                return Err(ScheduleError::AssignmentShape);
            }

            let start = solution.start_time_for_task(task);
            let end = start + model.task_duration(task);
            latest_end = latest_end.max(end);

            // Invariant 1: capability match.
            if !model.is_compatible(task, vehicle) {
                return Err(ScheduleError::IncompatibleVehicle { task });
            }

            // Invariant 3: ground window. Invariant 7 holds by
            // construction (end is recomputed from the model duration).
            if start < model.task_release(task) || end > model.task_deadline(task) {
                return Err(ScheduleError::WindowViolation { task });
            }

            // Invariant 2: predecessor completion.
            if let Some(predecessor) = model.task_predecessor(task) {
                let predecessor_end = solution.start_time_for_task(predecessor)
                    + model.task_duration(predecessor);
                if start < predecessor_end {
                    return Err(ScheduleError::PrecedenceViolation { task });
                }
            }

            entries.push(ScheduledTask {
                task,
                vehicle,
                start,
                end,
            });
        }

        // Routes: group by vehicle, order by start time.
        let mut routes: Vec<Vec<TaskIndex>> = vec![Vec::new(); model.num_vehicles()];
        let mut order: Vec<TaskIndex> = (0..num_tasks).map(TaskIndex::new).collect();
        order.sort_by_key(|&task| (entries[task.get()].start, task));
        for task in order {
            routes[entries[task.get()].vehicle.get()].push(task);
        }

        // Invariants 4, 5, 6 along every route.
        for (v, route) in routes.iter().enumerate() {
            let vehicle = VehicleIndex::new(v);
            let mut previous: Option<TaskIndex> = None;
            for &task in route {
                let entry = &entries[task.get()];
                match previous {
                    None => {
                        let leg = model
                            .travel_time(model.vehicle_base_parking(vehicle), model.task_parking(task));
                        if entry.start < leg {
                            return Err(ScheduleError::BaseTravelViolation { vehicle, task });
                        }
                    }
                    Some(first) => {
                        let first_entry = &entries[first.get()];
                        if entry.start < first_entry.end {
                            return Err(ScheduleError::OverlapOnVehicle {
                                vehicle,
                                first,
                                second: task,
                            });
                        }
                        let leg = model
                            .travel_time(model.task_parking(first), model.task_parking(task));
                        if entry.start < first_entry.end + leg {
                            return Err(ScheduleError::TravelTimeViolation {
                                vehicle,
                                first,
                                second: task,
                            });
                        }
                    }
                }
                previous = Some(task);
            }
        }

        if num_tasks > 0 && solution.makespan() != latest_end {
            return Err(ScheduleError::MakespanMismatch);
        }

        Ok(Self {
            makespan: solution.makespan(),
            entries,
            routes,
        })
    }

    /// Returns the makespan of this schedule.
    #[inline]
    pub fn makespan(&self) -> T {
        self.makespan
    }

    /// Returns the number of scheduled tasks.
    #[inline]
    pub fn num_tasks(&self) -> usize {
        self.entries.len()
    }

    /// Returns the scheduled entry for a specific task.
    #[inline]
    pub fn entry(&self, task: TaskIndex) -> &ScheduledTask<T> {
        &self.entries[task.get()]
    }

    /// Returns all scheduled entries, task-indexed.
    #[inline]
    pub fn entries(&self) -> &[ScheduledTask<T>] {
        &self.entries
    }

    /// Returns the execution-ordered route of the specified vehicle.
    #[inline]
    pub fn route(&self, vehicle: VehicleIndex) -> &[TaskIndex] {
        &self.routes[vehicle.get()]
    }

    /// Returns all per-vehicle routes, vehicle-indexed.
    #[inline]
    pub fn routes(&self) -> &[Vec<TaskIndex>] {
        &self.routes
    }
}

impl<T> std::fmt::Display for Schedule<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Schedule (makespan: {})", self.makespan)?;
        for (v, route) in self.routes.iter().enumerate() {
            write!(f, "  vehicle {}:", v)?;
            for &task in route {
                let entry = &self.entries[task.get()];
                write!(f, " [{} @ {}..{}]", task.get(), entry.start, entry.end)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
