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

//! Greedy warm start.
//!
//! Dispatch-rule scheduling: repeatedly pick, among all feasible
//! dispatches, the one starting earliest (ties by task index, then by
//! completion across a task's vehicles) and commit it. The result is
//! rarely optimal but arrives in O(n² m) time and seeds the shared
//! incumbent, so budget-bounded runs always have a schedule to fall back
//! on and the exact search starts with a real upper bound to prune
//! against.
//!
//! Committing strictly in start-time order keeps every later dispatch at
//! or after the previous one, so the dispatcher never collides with the
//! engine's forward-in-time rule baked into `Decision::try_new`. It can
//! still dead-end on tightly constrained instances (commitments are
//! never undone); that is acceptable for a warm start and reported as
//! `None`.

use apron_bnb::{bounds::TaskBounds, branching::decision::Decision, state::SearchState};
use apron_model::{index::TaskIndex, model::Model, solution::Solution};
use apron_search::num::SolverNumeric;

/// Builds a feasible schedule with earliest-completion dispatching, or
/// `None` when the heuristic dead-ends.
pub fn greedy_schedule<T>(model: &Model<T>, bounds: &TaskBounds<T>) -> Option<Solution<T>>
where
    T: SolverNumeric,
{
    let mut state = SearchState::new(model);

    while state.num_assigned_tasks() < model.num_tasks() {
        let mut best: Option<Decision<T>> = None;

        for t in 0..model.num_tasks() {
            let task = TaskIndex::new(t);
            if state.is_task_assigned(task) {
                continue;
            }
            for vehicle in model.compatible_vehicles(task) {
                let Some(candidate) = Decision::try_new(task, vehicle, model, bounds, &state)
                else {
                    continue;
                };
                let better = match &best {
                    None => true,
                    Some(current) => {
                        let candidate_key = (
                            candidate.start_time(),
                            candidate.task(),
                            candidate.completion_time(),
                            candidate.vehicle(),
                        );
                        let current_key = (
                            current.start_time(),
                            current.task(),
                            current.completion_time(),
                            current.vehicle(),
                        );
                        candidate_key < current_key
                    }
                };
                if better {
                    best = Some(candidate);
                }
            }
        }

        let decision = best?;
        state.assign_task(
            decision.task(),
            decision.vehicle(),
            decision.start_time(),
            decision.completion_time(),
            model.task_parking(decision.task()),
        );
        state.set_last_decision(decision.start_time(), decision.task());
    }

    state.to_solution()
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::model::ModelBuilder;

    type IntegerType = i64;

    #[test]
    fn test_greedy_produces_feasible_schedule() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p1 = builder.add_parking("P1");
        let p2 = builder.add_parking("P2");
        builder.set_travel_time(p1, p2, 5);
        builder.set_travel_time(p2, p1, 5);
        let ac1 = builder.add_aircraft("AC1", p1, 0, 100);
        let ac2 = builder.add_aircraft("AC2", p2, 0, 100);
        builder.add_task("TA", ac1, 4, "fuel");
        builder.add_task("TB", ac2, 4, "fuel");
        builder.add_vehicle("V1", &["fuel"], p1);
        let model = builder.build().unwrap();

        let mut bounds = TaskBounds::new();
        assert!(bounds.initialize(&model));

        let solution = greedy_schedule(&model, &bounds).expect("greedy finds a schedule");
        // Earliest start first: TA at 0..4, travel 5, TB at 9..13.
        assert_eq!(solution.makespan(), 13);

        let schedule = apron_model::schedule::Schedule::extract(&model, &solution)
            .expect("greedy schedule passes validation");
        assert_eq!(schedule.makespan(), 13);
    }

    #[test]
    fn test_greedy_respects_precedence() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 100);
        let t1 = builder.add_task("T1", ac, 10, "fuel");
        let t2 = builder.add_task("T2", ac, 5, "fuel");
        builder.set_predecessor(t2, t1);
        builder.add_vehicle("V1", &["fuel"], p);
        let model = builder.build().unwrap();

        let mut bounds = TaskBounds::new();
        assert!(bounds.initialize(&model));

        let solution = greedy_schedule(&model, &bounds).expect("greedy finds a schedule");
        assert_eq!(solution.makespan(), 15);
        assert!(
            solution.start_time_for_task(t2) >= solution.start_time_for_task(t1) + 10
        );
    }
}
