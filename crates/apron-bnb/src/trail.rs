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

//! A linear undo log with frame markers for efficient backtracking.
//!
//! `SearchTrail` records every mutation applied to `SearchState` along
//! with frame boundaries. Backtracking a frame undoes its mutations in
//! reverse and restores the last-decision metadata captured when the
//! frame was pushed. Typical usage:
//!
//! 1. `push_frame(&state)` before expanding a decision level,
//! 2. `apply_assignment(...)` for the applied dispatch,
//! 3. `backtrack(&mut state)` on prune or exhaustion.

use crate::state::SearchState;
use apron_model::index::{ParkingIndex, TaskIndex, VehicleIndex};
use num_traits::{PrimInt, Signed};

/// A compact record of a single dispatch applied to the search state,
/// sufficient to undo it during backtracking.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TrailEntry<T> {
    old_vehicle_time: T,
    old_makespan: T,
    old_vehicle_location: ParkingIndex,
    task: TaskIndex,
    vehicle: VehicleIndex,
}

impl<T> TrailEntry<T>
where
    T: Copy,
{
    /// Returns the vehicle free time before the dispatch.
    #[inline]
    pub fn old_vehicle_time(&self) -> T {
        self.old_vehicle_time
    }

    /// Returns the partial makespan before the dispatch.
    #[inline]
    pub fn old_makespan(&self) -> T {
        self.old_makespan
    }

    /// Returns the dispatched task.
    #[inline]
    pub fn task(&self) -> TaskIndex {
        self.task
    }

    /// Returns the vehicle involved in the dispatch.
    #[inline]
    pub fn vehicle(&self) -> VehicleIndex {
        self.vehicle
    }
}

/// A frame marker describing the boundary of one decision level.
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub struct FrameEntry<T> {
    previous_last_decision_time: T,
    previous_last_decision_task: TaskIndex,
    entry_start_index: usize,
}

/// The undo log: a linear entry history plus a stack of frame markers.
#[derive(Debug, Clone, Default)]
pub struct SearchTrail<T> {
    entries: Vec<TrailEntry<T>>,
    frames: Vec<FrameEntry<T>>,
}

impl<T> SearchTrail<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new, empty `SearchTrail`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a trail preallocating for the given number of tasks.
    #[inline]
    pub fn preallocated(num_tasks: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_tasks),
            frames: Vec::with_capacity(num_tasks + 1),
        }
    }

    /// Ensures the trail has capacity for the given problem size.
    pub fn ensure_capacity(&mut self, num_tasks: usize) {
        if self.entries.capacity() < num_tasks {
            self.entries.reserve(num_tasks - self.entries.capacity());
        }
        if self.frames.capacity() < num_tasks + 1 {
            self.frames.reserve((num_tasks + 1) - self.frames.capacity());
        }
    }

    /// Returns the number of entries in the trail.
    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns the current depth (number of frames).
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no frames are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Pushes a new frame, capturing the state's last-decision metadata.
    #[inline]
    pub fn push_frame(&mut self, state: &SearchState<T>) {
        self.frames.push(FrameEntry {
            previous_last_decision_time: state.last_decision_time(),
            previous_last_decision_task: state.last_decision_task(),
            entry_start_index: self.entries.len(),
        });
    }

    /// Applies one dispatch to the state and records its undo entry in
    /// the current frame.
    #[inline]
    pub fn apply_assignment(
        &mut self,
        state: &mut SearchState<T>,
        task: TaskIndex,
        vehicle: VehicleIndex,
        start_time: T,
        vehicle_ready: T,
        location: ParkingIndex,
    ) {
        debug_assert!(
            !self.frames.is_empty(),
            "called `SearchTrail::apply_assignment` without an active frame"
        );

        self.entries.push(TrailEntry {
            old_vehicle_time: state.vehicle_free_time(vehicle),
            old_makespan: state.current_makespan(),
            old_vehicle_location: state.vehicle_location(vehicle),
            task,
            vehicle,
        });

        state.assign_task(task, vehicle, start_time, vehicle_ready, location);
        state.set_last_decision(start_time, task);
    }

    /// Backtracks one frame: undoes its entries in reverse and restores
    /// the last-decision metadata captured at frame push.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if called with no frames on the trail.
    #[inline]
    pub fn backtrack(&mut self, state: &mut SearchState<T>) {
        debug_assert!(
            !self.frames.is_empty(),
            "called `SearchTrail::backtrack` with no frames on the trail"
        );

        let frame = match self.frames.pop() {
            Some(frame) => frame,
            None => return,
        };

        while self.entries.len() > frame.entry_start_index {
            let entry = self
                .entries
                .pop()
                .expect("entry count checked above");
            state.undo_assignment(
                entry.task,
                entry.vehicle,
                entry.old_vehicle_time,
                entry.old_vehicle_location,
                entry.old_makespan,
            );
        }

        state.restore_last_decision(
            frame.previous_last_decision_time,
            frame.previous_last_decision_task,
        );
    }

    /// Clears all entries and frames, keeping allocated capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    /// Returns the total allocated memory in bytes.
    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<TrailEntry<T>>()
            + self.frames.capacity() * std::mem::size_of::<FrameEntry<T>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::model::{Model, ModelBuilder};

    type IntegerType = i64;

    fn model() -> Model<IntegerType> {
        let mut builder = ModelBuilder::new();
        let p1 = builder.add_parking("P1");
        let p2 = builder.add_parking("P2");
        builder.set_travel_time(p1, p2, 2);
        builder.set_travel_time(p2, p1, 2);
        let ac = builder.add_aircraft("AC1", p1, 0, 100);
        builder.add_task("T1", ac, 10, "fuel");
        builder.add_task("T2", ac, 5, "fuel");
        builder.add_vehicle("V1", &["fuel"], p2);
        builder.build().unwrap()
    }

    #[test]
    fn test_apply_and_backtrack_restores_state() {
        let model = model();
        let mut state = SearchState::<IntegerType>::new(&model);
        let mut trail = SearchTrail::new();

        let task = TaskIndex::new(0);
        let vehicle = VehicleIndex::new(0);
        let location = model.task_parking(task);

        trail.push_frame(&state);
        trail.apply_assignment(&mut state, task, vehicle, 2, 12, location);

        assert_eq!(trail.depth(), 1);
        assert_eq!(trail.num_entries(), 1);
        assert!(state.is_task_assigned(task));
        assert_eq!(state.last_decision_time(), 2);
        assert_eq!(state.last_decision_task(), task);

        trail.backtrack(&mut state);
        assert_eq!(trail.depth(), 0);
        assert_eq!(trail.num_entries(), 0);
        assert!(!state.is_task_assigned(task));
        assert_eq!(state.current_makespan(), 0);
        assert_eq!(state.last_decision_time(), IntegerType::MIN);
    }

    #[test]
    fn test_nested_frames_backtrack_in_order() {
        let model = model();
        let mut state = SearchState::<IntegerType>::new(&model);
        let mut trail = SearchTrail::preallocated(model.num_tasks());

        let vehicle = VehicleIndex::new(0);
        let t1 = TaskIndex::new(0);
        let t2 = TaskIndex::new(1);
        let location = model.task_parking(t1);

        trail.push_frame(&state);
        trail.apply_assignment(&mut state, t1, vehicle, 2, 12, location);
        trail.push_frame(&state);
        trail.apply_assignment(&mut state, t2, vehicle, 12, 17, location);

        assert_eq!(state.num_assigned_tasks(), 2);
        assert_eq!(state.current_makespan(), 17);

        trail.backtrack(&mut state);
        assert!(state.is_task_assigned(t1));
        assert!(!state.is_task_assigned(t2));
        assert_eq!(state.current_makespan(), 12);
        assert_eq!(state.last_decision_time(), 2);

        trail.backtrack(&mut state);
        assert_eq!(state.num_assigned_tasks(), 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut trail = SearchTrail::<IntegerType>::preallocated(8);
        let bytes_before = trail.allocated_memory_bytes();
        trail.reset();
        assert!(trail.is_empty());
        assert_eq!(trail.num_entries(), 0);
        assert!(trail.allocated_memory_bytes() >= bytes_before);
    }
}
