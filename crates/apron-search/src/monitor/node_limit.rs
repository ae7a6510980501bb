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

//! # Node Limit Monitor
//!
//! Enforces a node budget on the search. Every `on_step` call corresponds
//! to one processed search node; the monitor terminates the search once
//! the configured number of nodes has been spent. A budget of zero stops
//! the search before the first node, which still yields a valid best-effort
//! outcome through the warm-started incumbent.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use apron_model::{model::Model, solution::Solution};
use num_traits::{PrimInt, Signed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLimitMonitor<T> {
    node_limit: u64,
    nodes: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> NodeLimitMonitor<T> {
    #[inline]
    pub fn new(node_limit: u64) -> Self {
        Self {
            node_limit,
            nodes: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the number of nodes counted so far.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl<T> SearchMonitor<T> for NodeLimitMonitor<T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &Model<T>) {
        self.nodes = 0;
    }

    fn on_exit_search(&mut self) {}
    fn on_solution_found(&mut self, _solution: &Solution<T>) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.nodes = self.nodes.saturating_add(1);
    }

    fn search_command(&self) -> SearchCommand {
        if self.nodes >= self.node_limit {
            SearchCommand::Terminate("node limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_zero_budget_terminates_immediately() {
        let monitor = NodeLimitMonitor::<IntegerType>::new(0);
        assert!(matches!(
            monitor.search_command(),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_budget_is_consumed_by_steps() {
        let mut monitor = NodeLimitMonitor::<IntegerType>::new(2);
        assert_eq!(
            <NodeLimitMonitor<IntegerType> as SearchMonitor<IntegerType>>::search_command(&monitor),
            SearchCommand::Continue
        );
        monitor.on_step();
        monitor.on_step();
        assert!(matches!(
            <NodeLimitMonitor<IntegerType> as SearchMonitor<IntegerType>>::search_command(&monitor),
            SearchCommand::Terminate(_)
        ));
        assert_eq!(monitor.nodes(), 2);
    }
}
