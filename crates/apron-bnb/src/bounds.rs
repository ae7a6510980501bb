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

//! Root constraint propagation for the turnaround scheduling model.
//!
//! `TaskBounds` maintains, per task, the interval `[earliest_start,
//! latest_start]` of feasible start times, tightened to a fixed point by:
//!
//! - interval arithmetic along the precedence DAG (a task starts no
//!   earlier than its predecessor's earliest end; a predecessor starts no
//!   later than its successor's latest start minus its own duration);
//! - disjunctive reasoning over task pairs that must share a vehicle
//!   (both have exactly one, identical, compatible vehicle): if neither
//!   execution order fits the windows and the connecting travel times, the
//!   instance is infeasible; if exactly one order fits, it is forced and
//!   its arc tightens both windows.
//!
//! Pairwise ordering knowledge is held as a `PairRelation` per task pair:
//! `Unrelated` pairs can never meet on a vehicle, `Undecided` pairs keep
//! both orders open, `Before`/`After` record a forced order. The forced
//! orders also feed the search: a task may not be dispatched while a task
//! forced before it is still waiting.
//!
//! Propagation failures carry a `PropagationConflict` naming the empty
//! window or the deadlocked pair; the orchestrating solver surfaces it as
//! the diagnostic of a root-level infeasibility.

use apron_model::{index::TaskIndex, model::Model};
use apron_search::num::SolverNumeric;
use smallvec::SmallVec;

/// Ordering knowledge about one task pair `(i, j)` with `i < j`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PairRelation {
    /// Both orders are still open.
    #[default]
    Undecided,
    /// `i` must run before `j` on their shared vehicle.
    Before,
    /// `j` must run before `i` on their shared vehicle.
    After,
    /// The pair can never meet on a vehicle.
    Unrelated,
}

impl std::fmt::Display for PairRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairRelation::Undecided => write!(f, "Undecided"),
            PairRelation::Before => write!(f, "Before"),
            PairRelation::After => write!(f, "After"),
            PairRelation::Unrelated => write!(f, "Unrelated"),
        }
    }
}

/// The minimal conflict discovered when root propagation fails.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PropagationConflict {
    /// A task's start-time window became empty.
    EmptyWindow { task: TaskIndex },
    /// Two tasks must share a vehicle but neither order fits the windows.
    OrderingDeadlock { first: TaskIndex, second: TaskIndex },
}

impl std::fmt::Display for PropagationConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropagationConflict::EmptyWindow { task } => {
                write!(f, "start-time window of task {} is empty", task)
            }
            PropagationConflict::OrderingDeadlock { first, second } => write!(
                f,
                "tasks {} and {} must share a vehicle but admit no execution order",
                first, second
            ),
        }
    }
}

/// Propagated start-time bounds plus pairwise ordering knowledge.
///
/// Reusable across solves: `initialize` recomputes everything for a model,
/// keeping allocations, and returns `false` when the instance is infeasible
/// at the root (the conflict is then available via `conflict`).
#[derive(Clone, Debug, Default)]
pub struct TaskBounds<T> {
    earliest_starts: Vec<T>,
    latest_starts: Vec<T>,
    topological_order: Vec<TaskIndex>,
    relations: Vec<PairRelation>,
    forced_before: Vec<SmallVec<[TaskIndex; 4]>>,
    num_tasks: usize,
    conflict: Option<PropagationConflict>,
}

impl<T> TaskBounds<T>
where
    T: SolverNumeric,
{
    /// Creates empty bounds; call `initialize` before use.
    #[inline]
    pub fn new() -> Self {
        Self {
            earliest_starts: Vec::new(),
            latest_starts: Vec::new(),
            topological_order: Vec::new(),
            relations: Vec::new(),
            forced_before: Vec::new(),
            num_tasks: 0,
            conflict: None,
        }
    }

    /// Recomputes all bounds for the given model.
    ///
    /// Returns `false` if propagation proves the instance infeasible; the
    /// discovered conflict is then available via `conflict()`.
    pub fn initialize(&mut self, model: &Model<T>) -> bool {
        let n = model.num_tasks();
        self.num_tasks = n;
        self.conflict = None;

        self.earliest_starts.clear();
        self.latest_starts.clear();
        self.relations.clear();
        self.relations.resize(n * n, PairRelation::Undecided);
        self.forced_before.clear();
        self.forced_before.resize(n, SmallVec::new());

        for t in 0..n {
            let task = TaskIndex::new(t);
            self.earliest_starts.push(model.task_release(task));
            self.latest_starts
                .push(model.task_deadline(task) - model.task_duration(task));
        }

        self.compute_topological_order(model);
        self.classify_pairs(model);
        let must_share = self.collect_must_share_pairs(model);

        self.propagate(model, &must_share)
    }

    /// Returns the tightest known earliest start of the specified task.
    #[inline]
    pub fn earliest_start(&self, task: TaskIndex) -> T {
        debug_assert!(
            task.get() < self.num_tasks,
            "called `TaskBounds::earliest_start` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks,
            task.get()
        );
        self.earliest_starts[task.get()]
    }

    /// Returns the tightest known latest start of the specified task.
    #[inline]
    pub fn latest_start(&self, task: TaskIndex) -> T {
        debug_assert!(
            task.get() < self.num_tasks,
            "called `TaskBounds::latest_start` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks,
            task.get()
        );
        self.latest_starts[task.get()]
    }

    /// Returns the ordering relation of a task pair. The relation is
    /// reported from the perspective of `first`: `Before` means `first`
    /// must run before `second`.
    #[inline]
    pub fn relation(&self, first: TaskIndex, second: TaskIndex) -> PairRelation {
        debug_assert!(first.get() < self.num_tasks);
        debug_assert!(second.get() < self.num_tasks);
        self.relations[first.get() * self.num_tasks + second.get()]
    }

    /// Returns the tasks that must run before the specified task on its
    /// (unique) compatible vehicle.
    #[inline]
    pub fn forced_before(&self, task: TaskIndex) -> &[TaskIndex] {
        &self.forced_before[task.get()]
    }

    /// Returns the tasks of the precedence DAG in topological order.
    #[inline]
    pub fn topological_order(&self) -> &[TaskIndex] {
        &self.topological_order
    }

    /// Returns the conflict found by the last failed `initialize`, if any.
    #[inline]
    pub fn conflict(&self) -> Option<PropagationConflict> {
        self.conflict
    }

    /// Resets the bounds to their empty state, keeping allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.earliest_starts.clear();
        self.latest_starts.clear();
        self.topological_order.clear();
        self.relations.clear();
        self.forced_before.clear();
        self.num_tasks = 0;
        self.conflict = None;
    }

    #[inline]
    fn set_relation(&mut self, first: TaskIndex, second: TaskIndex, relation: PairRelation) {
        let mirrored = match relation {
            PairRelation::Before => PairRelation::After,
            PairRelation::After => PairRelation::Before,
            other => other,
        };
        self.relations[first.get() * self.num_tasks + second.get()] = relation;
        self.relations[second.get() * self.num_tasks + first.get()] = mirrored;
    }

    /// Kahn's algorithm over the predecessor forest. The model validated
    /// acyclicity, so every task is emitted exactly once.
    fn compute_topological_order(&mut self, model: &Model<T>) {
        let n = model.num_tasks();
        self.topological_order.clear();
        self.topological_order.reserve(n);

        let mut successor_counts_done = vec![false; n];
        let mut pending: Vec<TaskIndex> = (0..n)
            .map(TaskIndex::new)
            .filter(|&t| model.task_predecessor(t).is_none())
            .collect();

        while let Some(task) = pending.pop() {
            self.topological_order.push(task);
            successor_counts_done[task.get()] = true;
            for s in 0..n {
                let successor = TaskIndex::new(s);
                if !successor_counts_done[s] && model.task_predecessor(successor) == Some(task) {
                    pending.push(successor);
                }
            }
        }

        debug_assert_eq!(
            self.topological_order.len(),
            n,
            "precedence graph must be acyclic after model validation"
        );
    }

    /// Marks pairs that can never meet on a vehicle as `Unrelated`.
    fn classify_pairs(&mut self, model: &Model<T>) {
        let n = model.num_tasks();
        let num_vehicles = model.num_vehicles();
        for i in 0..n {
            for j in (i + 1)..n {
                let first = TaskIndex::new(i);
                let second = TaskIndex::new(j);
                let can_share = (0..num_vehicles).any(|v| {
                    let vehicle = apron_model::index::VehicleIndex::new(v);
                    model.is_compatible(first, vehicle) && model.is_compatible(second, vehicle)
                });
                if !can_share {
                    self.set_relation(first, second, PairRelation::Unrelated);
                }
            }
        }
    }

    /// Collects pairs that are pinned to the same single vehicle; only
    /// those admit unconditional disjunctive reasoning.
    fn collect_must_share_pairs(&self, model: &Model<T>) -> Vec<(TaskIndex, TaskIndex)> {
        let n = model.num_tasks();
        let mut pairs = Vec::new();
        for i in 0..n {
            let first = TaskIndex::new(i);
            if model.compatible_count(first) != 1 {
                continue;
            }
            let vehicle = model
                .compatible_vehicles(first)
                .next()
                .expect("compatible_count == 1 guarantees one vehicle");
            for j in (i + 1)..n {
                let second = TaskIndex::new(j);
                if model.compatible_count(second) == 1 && model.is_compatible(second, vehicle) {
                    pairs.push((first, second));
                }
            }
        }
        pairs
    }

    /// Runs window and disjunctive propagation to a fixed point.
    fn propagate(&mut self, model: &Model<T>, must_share: &[(TaskIndex, TaskIndex)]) -> bool {
        loop {
            let mut changed = false;

            // Forward pass: a task starts no earlier than its
            // predecessor's earliest end. Topological order makes one
            // pass per round sufficient for whole chains.
            for index in 0..self.topological_order.len() {
                let task = self.topological_order[index];
                if let Some(predecessor) = model.task_predecessor(task) {
                    let earliest_end = self.earliest_starts[predecessor.get()]
                        .saturating_add_val(model.task_duration(predecessor));
                    if earliest_end > self.earliest_starts[task.get()] {
                        self.earliest_starts[task.get()] = earliest_end;
                        changed = true;
                    }
                }
            }

            // Backward pass: a predecessor starts no later than its
            // successor's latest start minus its own duration.
            for index in (0..self.topological_order.len()).rev() {
                let task = self.topological_order[index];
                if let Some(predecessor) = model.task_predecessor(task) {
                    let latest = self.latest_starts[task.get()]
                        .saturating_sub_val(model.task_duration(predecessor));
                    if latest < self.latest_starts[predecessor.get()] {
                        self.latest_starts[predecessor.get()] = latest;
                        changed = true;
                    }
                }
            }

            if let Some(conflict) = self.find_empty_window() {
                self.conflict = Some(conflict);
                return false;
            }

            // Disjunctive reasoning over must-share pairs.
            for &(first, second) in must_share {
                match self.relation(first, second) {
                    PairRelation::Before => {
                        changed |= self.apply_order_arc(model, first, second);
                    }
                    PairRelation::After => {
                        changed |= self.apply_order_arc(model, second, first);
                    }
                    PairRelation::Undecided => {
                        let first_then_second = self.order_fits(model, first, second);
                        let second_then_first = self.order_fits(model, second, first);

                        match (first_then_second, second_then_first) {
                            (false, false) => {
                                self.conflict = Some(PropagationConflict::OrderingDeadlock {
                                    first,
                                    second,
                                });
                                return false;
                            }
                            (true, false) => {
                                self.set_relation(first, second, PairRelation::Before);
                                self.forced_before[second.get()].push(first);
                                self.apply_order_arc(model, first, second);
                                changed = true;
                            }
                            (false, true) => {
                                self.set_relation(first, second, PairRelation::After);
                                self.forced_before[first.get()].push(second);
                                self.apply_order_arc(model, second, first);
                                changed = true;
                            }
                            (true, true) => {}
                        }
                    }
                    PairRelation::Unrelated => unreachable!(
                        "must-share pairs cannot be unrelated"
                    ),
                }
            }

            if let Some(conflict) = self.find_empty_window() {
                self.conflict = Some(conflict);
                return false;
            }

            if !changed {
                return true;
            }
        }
    }

    /// Whether running `before` and then `after` on the shared vehicle
    /// still fits both windows, travel included.
    fn order_fits(&self, model: &Model<T>, before: TaskIndex, after: TaskIndex) -> bool {
        let travel = model.travel_time(model.task_parking(before), model.task_parking(after));
        let earliest_arrival = self.earliest_starts[before.get()]
            .saturating_add_val(model.task_duration(before))
            .saturating_add_val(travel);
        earliest_arrival <= self.latest_starts[after.get()]
    }

    /// Tightens both windows along a forced order arc `before -> after`.
    fn apply_order_arc(&mut self, model: &Model<T>, before: TaskIndex, after: TaskIndex) -> bool {
        let travel = model.travel_time(model.task_parking(before), model.task_parking(after));
        let mut changed = false;

        let earliest = self.earliest_starts[before.get()]
            .saturating_add_val(model.task_duration(before))
            .saturating_add_val(travel);
        if earliest > self.earliest_starts[after.get()] {
            self.earliest_starts[after.get()] = earliest;
            changed = true;
        }

        let latest = self.latest_starts[after.get()]
            .saturating_sub_val(travel)
            .saturating_sub_val(model.task_duration(before));
        if latest < self.latest_starts[before.get()] {
            self.latest_starts[before.get()] = latest;
            changed = true;
        }

        changed
    }

    fn find_empty_window(&self) -> Option<PropagationConflict> {
        for t in 0..self.num_tasks {
            if self.earliest_starts[t] > self.latest_starts[t] {
                return Some(PropagationConflict::EmptyWindow {
                    task: TaskIndex::new(t),
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::model::ModelBuilder;

    type IntegerType = i64;

    #[test]
    fn test_precedence_chain_tightens_bounds() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 100);
        let t1 = builder.add_task("T1", ac, 10, "fuel");
        let t2 = builder.add_task("T2", ac, 20, "fuel");
        let t3 = builder.add_task("T3", ac, 5, "fuel");
        builder.set_predecessor(t2, t1);
        builder.set_predecessor(t3, t2);
        builder.add_vehicle("V1", &["fuel"], p);
        builder.add_vehicle("V2", &["fuel"], p);
        let model = builder.build().unwrap();

        let mut bounds = TaskBounds::new();
        assert!(bounds.initialize(&model));

        assert_eq!(bounds.earliest_start(t1), 0);
        assert_eq!(bounds.earliest_start(t2), 10);
        assert_eq!(bounds.earliest_start(t3), 30);

        // Backward: t3 must start by 95, so t2 by 75 and t1 by 65.
        assert_eq!(bounds.latest_start(t3), 95);
        assert_eq!(bounds.latest_start(t2), 75);
        assert_eq!(bounds.latest_start(t1), 65);
    }

    #[test]
    fn test_infeasible_chain_reports_empty_window() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 25);
        let t1 = builder.add_task("T1", ac, 10, "fuel");
        let t2 = builder.add_task("T2", ac, 10, "fuel");
        let t3 = builder.add_task("T3", ac, 10, "fuel");
        builder.set_predecessor(t2, t1);
        builder.set_predecessor(t3, t2);
        builder.add_vehicle("V1", &["fuel"], p);
        let model = builder.build().unwrap();

        let mut bounds = TaskBounds::new();
        assert!(!bounds.initialize(&model));
        assert!(matches!(
            bounds.conflict(),
            Some(PropagationConflict::EmptyWindow { .. })
        ));
    }

    #[test]
    fn test_disjoint_capabilities_are_unrelated() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 100);
        let t1 = builder.add_task("T1", ac, 10, "fuel");
        let t2 = builder.add_task("T2", ac, 10, "clean");
        builder.add_vehicle("V1", &["fuel"], p);
        builder.add_vehicle("V2", &["clean"], p);
        let model = builder.build().unwrap();

        let mut bounds = TaskBounds::new();
        assert!(bounds.initialize(&model));
        assert_eq!(bounds.relation(t1, t2), PairRelation::Unrelated);
        assert_eq!(bounds.relation(t2, t1), PairRelation::Unrelated);
    }

    #[test]
    fn test_forced_order_on_shared_vehicle() {
        // Two aircraft, one vehicle. AC2's window opens so late that the
        // only feasible order is AC1's task first.
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p1 = builder.add_parking("P1");
        let p2 = builder.add_parking("P2");
        builder.set_travel_time(p1, p2, 4);
        builder.set_travel_time(p2, p1, 4);
        let ac1 = builder.add_aircraft("AC1", p1, 0, 20);
        let ac2 = builder.add_aircraft("AC2", p2, 50, 70);
        let t1 = builder.add_task("T1", ac1, 10, "fuel");
        let t2 = builder.add_task("T2", ac2, 10, "fuel");
        builder.add_vehicle("V1", &["fuel"], p1);
        let model = builder.build().unwrap();

        let mut bounds = TaskBounds::new();
        assert!(bounds.initialize(&model));
        assert_eq!(bounds.relation(t1, t2), PairRelation::Before);
        assert_eq!(bounds.relation(t2, t1), PairRelation::After);
        assert_eq!(bounds.forced_before(t2), &[t1]);
        assert!(bounds.forced_before(t1).is_empty());
    }

    #[test]
    fn test_ordering_deadlock_is_reported() {
        // Two tasks pinned to the same vehicle with identical tight
        // windows: neither can finish before the other must start.
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p1 = builder.add_parking("P1");
        let p2 = builder.add_parking("P2");
        builder.set_travel_time(p1, p2, 1);
        builder.set_travel_time(p2, p1, 1);
        let ac1 = builder.add_aircraft("AC1", p1, 0, 12);
        let ac2 = builder.add_aircraft("AC2", p2, 0, 12);
        builder.add_task("T1", ac1, 10, "fuel");
        builder.add_task("T2", ac2, 10, "fuel");
        builder.add_vehicle("V1", &["fuel"], p1);
        let model = builder.build().unwrap();

        let mut bounds = TaskBounds::new();
        assert!(!bounds.initialize(&model));
        assert!(matches!(
            bounds.conflict(),
            Some(PropagationConflict::OrderingDeadlock { .. })
        ));
    }

    #[test]
    fn test_open_pairs_stay_undecided() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 100);
        let t1 = builder.add_task("T1", ac, 10, "fuel");
        let t2 = builder.add_task("T2", ac, 10, "fuel");
        builder.add_vehicle("V1", &["fuel"], p);
        let model = builder.build().unwrap();

        let mut bounds = TaskBounds::new();
        assert!(bounds.initialize(&model));
        assert_eq!(bounds.relation(t1, t2), PairRelation::Undecided);
    }
}
