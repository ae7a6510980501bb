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

//! Most-constrained-first branching.
//!
//! Explores the task with the fewest remaining dispatch options first,
//! breaking ties by earliest aircraft departure, and within one task by
//! earliest completion. Picky tasks are decided while the tree is still
//! shallow; a task that runs out of options prunes its whole subtree
//! immediately.
//!
//! The builder reorders the complete feasible set without dropping
//! decisions, so exhaustion still proves optimality.

use crate::{
    bounds::TaskBounds,
    branching::decision::{self, Decision, DecisionBuilder},
    state::SearchState,
};
use apron_model::model::Model;
use apron_search::num::SolverNumeric;

/// A decision builder prioritizing the pickiest task.
#[derive(Debug, Clone, Default)]
pub struct MostConstrainedBuilder<T> {
    buffer: Vec<Decision<T>>,
    options_per_task: Vec<usize>,
}

impl<T> MostConstrainedBuilder<T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            options_per_task: Vec::new(),
        }
    }

    /// Preallocates buffers for the given problem size.
    #[inline]
    pub fn preallocated(num_vehicles: usize, num_tasks: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(num_tasks.saturating_mul(num_vehicles)),
            options_per_task: Vec::with_capacity(num_tasks),
        }
    }
}

impl<T> DecisionBuilder<T> for MostConstrainedBuilder<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "MostConstrainedBuilder"
    }

    fn next_decisions(
        &mut self,
        model: &Model<T>,
        bounds: &TaskBounds<T>,
        state: &SearchState<T>,
    ) -> &[Decision<T>] {
        decision::generate_feasible(model, bounds, state, &mut self.buffer);

        self.options_per_task.clear();
        self.options_per_task.resize(model.num_tasks(), 0);
        for d in &self.buffer {
            self.options_per_task[d.task().get()] += 1;
        }

        // Ascending explore priority, then reversed: the engine pops from
        // the back, so the most constrained task's cheapest dispatch must
        // end up last.
        let options = &self.options_per_task;
        self.buffer.sort_unstable_by(|a, b| {
            let key_a = (
                options[a.task().get()],
                model.task_deadline(a.task()),
                a.task(),
                a.completion_time(),
                a.vehicle(),
            );
            let key_b = (
                options[b.task().get()],
                model.task_deadline(b.task()),
                b.task(),
                b.completion_time(),
                b.vehicle(),
            );
            key_a.cmp(&key_b)
        });
        self.buffer.reverse();

        &self.buffer
    }
}
