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

//! Progress logging through `tracing`.
//!
//! Emits an `info!` event for every improving solution and periodic
//! `debug!` progress lines. The clock is only consulted when the step
//! counter passes a bitmask filter to keep the overhead negligible.

use crate::monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor};
use crate::{branching::decision::Decision, state::SearchState, stats::BnbSolverStatistics};
use apron_model::{model::Model, solution::Solution};
use apron_search::num::SolverNumeric;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    steps: u64,
    best_makespan: Option<T>,
}

impl<T> LogMonitor<T> {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            steps: 0,
            best_makespan: None,
        }
    }
}

impl<T> Default for LogMonitor<T> {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> TreeSearchMonitor<T> for LogMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, model: &Model<T>, _statistics: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.steps = 0;
        self.best_makespan = None;
        debug!(
            tasks = model.num_tasks(),
            vehicles = model.num_vehicles(),
            "search started"
        );
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        debug!(
            nodes = statistics.nodes_explored,
            backtracks = statistics.backtracks,
            solutions = statistics.solutions_found,
            elapsed = ?self.start_time.elapsed(),
            "search finished"
        );
    }

    #[inline]
    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics) {
        self.steps = self.steps.wrapping_add(1);
        if self.steps & self.clock_check_mask != 0 {
            return;
        }
        let now = Instant::now();
        if now.duration_since(self.last_log_time) < self.log_interval {
            return;
        }
        self.last_log_time = now;
        let best = self
            .best_makespan
            .map(|m| m.to_string())
            .unwrap_or_else(|| "none".to_string());
        debug!(
            nodes = statistics.nodes_explored,
            depth = state.num_assigned_tasks(),
            backtracks = statistics.backtracks,
            pruned_bound = statistics.prunings_bound,
            pruned_infeasible = statistics.prunings_infeasible,
            makespan = %state.current_makespan(),
            best = %best,
            "search progress"
        );
    }

    fn on_lower_bound_computed(
        &mut self,
        _state: &SearchState<T>,
        _lower_bound: T,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_prune(
        &mut self,
        _state: &SearchState<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState<T>,
        _count: usize,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_descend(
        &mut self,
        _state: &SearchState<T>,
        _decision: Decision<T>,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_backtrack(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics) {
        self.best_makespan = Some(solution.makespan());
        info!(
            makespan = %solution.makespan(),
            nodes = statistics.nodes_explored,
            elapsed = ?self.start_time.elapsed(),
            "improving schedule found"
        );
    }
}
