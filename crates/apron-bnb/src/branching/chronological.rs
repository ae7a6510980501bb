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

//! Chronological exhaustive branching.
//!
//! Explores dispatches by ascending start time (ties by task index, then
//! completion). Matches the canonical dispatch order of the symmetry rule
//! and tends to produce good incumbents early on loosely constrained
//! instances.

use crate::{
    bounds::TaskBounds,
    branching::decision::{self, Decision, DecisionBuilder},
    state::SearchState,
};
use apron_model::model::Model;
use apron_search::num::SolverNumeric;

/// A decision builder exploring the earliest dispatch first.
#[derive(Debug, Clone, Default)]
pub struct ChronologicalBuilder<T> {
    buffer: Vec<Decision<T>>,
}

impl<T> ChronologicalBuilder<T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Preallocates the decision buffer for the given problem size.
    #[inline]
    pub fn preallocated(num_vehicles: usize, num_tasks: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(num_tasks.saturating_mul(num_vehicles)),
        }
    }
}

impl<T> DecisionBuilder<T> for ChronologicalBuilder<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "ChronologicalBuilder"
    }

    fn next_decisions(
        &mut self,
        model: &Model<T>,
        bounds: &TaskBounds<T>,
        state: &SearchState<T>,
    ) -> &[Decision<T>] {
        decision::generate_feasible(model, bounds, state, &mut self.buffer);

        // The engine pops from the back; descending sort puts the
        // earliest start there.
        self.buffer.sort_unstable_by(|a, b| {
            let key_a = (a.start_time(), a.task(), a.completion_time(), a.vehicle());
            let key_b = (b.start_time(), b.task(), b.completion_time(), b.vehicle());
            key_b.cmp(&key_a)
        });

        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::model::ModelBuilder;

    type IntegerType = i64;

    #[test]
    fn test_earliest_start_pops_first() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p1 = builder.add_parking("P1");
        let p2 = builder.add_parking("P2");
        builder.set_travel_time(p1, p2, 0);
        builder.set_travel_time(p2, p1, 0);
        let ac1 = builder.add_aircraft("AC1", p1, 20, 100);
        let ac2 = builder.add_aircraft("AC2", p2, 5, 100);
        let t1 = builder.add_task("T1", ac1, 10, "fuel");
        let t2 = builder.add_task("T2", ac2, 10, "fuel");
        builder.add_vehicle("V1", &["fuel"], p1);
        let model = builder.build().unwrap();
        let mut bounds = TaskBounds::new();
        assert!(bounds.initialize(&model));
        let state = SearchState::new(&model);

        let mut policy = ChronologicalBuilder::new();
        let decisions = policy.next_decisions(&model, &bounds, &state);
        assert_eq!(decisions.len(), 2);
        // T2 starts at 5, T1 at 20; T2 must be popped first (last slot).
        assert_eq!(decisions.last().unwrap().task(), t2);
        assert_eq!(decisions.last().unwrap().start_time(), 5);
        assert_eq!(decisions.first().unwrap().task(), t1);
    }
}
