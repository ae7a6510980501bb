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

use crate::index::{TaskIndex, VehicleIndex};
use num_traits::{PrimInt, Signed};

/// The raw output of the solving engine.
///
/// This struct uses a Structure of Arrays (SoA) layout; data is indexed
/// directly by `TaskIndex`. The makespan is the objective value: the time
/// at which the last task across all vehicles finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<T> {
    /// The makespan of this solution.
    makespan: T,

    /// The assigned vehicle for each task.
    /// `vehicles[t]` is the vehicle serving task `t`.
    vehicles: Vec<VehicleIndex>,

    /// The assigned start time for each task.
    /// `start_times[t]` is the start time of task `t`.
    start_times: Vec<T>,
}

impl<T> Solution<T>
where
    T: PrimInt + Signed + Copy,
{
    /// Constructs a new `Solution`.
    ///
    /// # Panics
    ///
    /// Panics if `vehicles` and `start_times` have different lengths.
    pub fn new(makespan: T, vehicles: Vec<VehicleIndex>, start_times: Vec<T>) -> Self {
        assert_eq!(
            vehicles.len(),
            start_times.len(),
            "called Solution::new with inconsistent vector lengths: vehicles.len() = {}, start_times.len() = {}",
            vehicles.len(),
            start_times.len()
        );

        Self {
            makespan,
            vehicles,
            start_times,
        }
    }

    /// Returns the vehicle assigned to a specific task.
    ///
    /// # Panics
    ///
    /// Panics if `task` is out of bounds.
    #[inline]
    pub fn vehicle_for_task(&self, task: TaskIndex) -> VehicleIndex {
        debug_assert!(
            task.get() < self.num_tasks(),
            "called `Solution::vehicle_for_task` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks(),
            task.get()
        );
        self.vehicles[task.get()]
    }

    /// Returns the start time assigned to a specific task.
    ///
    /// # Panics
    ///
    /// Panics if `task` is out of bounds.
    #[inline]
    pub fn start_time_for_task(&self, task: TaskIndex) -> T {
        debug_assert!(
            task.get() < self.num_tasks(),
            "called `Solution::start_time_for_task` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks(),
            task.get()
        );
        self.start_times[task.get()]
    }

    /// Returns the number of tasks in this solution.
    #[inline]
    pub fn num_tasks(&self) -> usize {
        self.vehicles.len()
    }

    /// Returns the makespan of this solution.
    #[inline]
    pub fn makespan(&self) -> T {
        self.makespan
    }

    /// Returns a slice of assigned vehicles for all tasks.
    #[inline]
    pub fn vehicles(&self) -> &[VehicleIndex] {
        &self.vehicles
    }

    /// Returns a slice of assigned start times for all tasks.
    #[inline]
    pub fn start_times(&self) -> &[T] {
        &self.start_times
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Makespan: {}", self.makespan)?;
        writeln!(f)?;

        if self.num_tasks() == 0 {
            writeln!(f, "   (No tasks scheduled)")?;
            return Ok(());
        }

        writeln!(
            f,
            "   {:<10} | {:<10} | {:<12}",
            "Task", "Vehicle", "Start Time"
        )?;
        writeln!(f, "   {:-<10}-+-{:-<10}-+-{:-<12}", "", "", "")?;
        for t in 0..self.num_tasks() {
            writeln!(
                f,
                "   {:<10} | {:<10} | {:<12}",
                t,
                self.vehicles[t].get(),
                self.start_times[t]
            )?;
        }

        Ok(())
    }
}
