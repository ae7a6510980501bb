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

//! Branch-and-bound engine for turnaround scheduling.
//!
//! `BnbSolver` owns the reusable search structures (trail, stack, bounds)
//! and spawns a `BnbSolverSearchSession` per run. The session drives an
//! explicit work-stack DFS:
//!
//! 1. root propagation; a conflict ends the run before any search;
//! 2. the decision builder enqueues the feasible dispatches of the root;
//! 3. the loop pops a dispatch, prunes it against the incumbent, applies
//!    it through the trail, and either records a complete schedule or
//!    asks the evaluator for a bound and enqueues the child's dispatches;
//! 4. an empty level backtracks; an empty root level ends the search with
//!    optimality (incumbent in hand) or infeasibility (none anywhere).
//!
//! Monitors observe every transition and can stop the run; on an abort
//! the session reports the best incumbent plus a proven lower bound
//! (the root bound joined with the minimum over the open frontier, which
//! is exactly the remaining stack entries).

use crate::{
    bounds::TaskBounds,
    branching::decision::{Decision, DecisionBuilder},
    eval::evaluator::ObjectiveEvaluator,
    incumbent::{IncumbentStore, NoSharedIncumbent, SharedIncumbentAdapter},
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    result::{BnbSolverOutcome, BnbTerminationReason},
    stack::SearchStack,
    state::SearchState,
    stats::BnbSolverStatistics,
    trail::SearchTrail,
};
use apron_model::{model::Model, solution::Solution};
use apron_search::{
    incumbent::SharedIncumbent, monitor::search_monitor::SearchCommand, num::SolverNumeric,
};

/// A branch-and-bound solver for the turnaround scheduling problem.
///
/// This is only the execution engine: decision ordering is delegated to a
/// `DecisionBuilder` and bounding to an `ObjectiveEvaluator`. The solver
/// keeps its internal structures across runs, so repeated solves reuse
/// allocations.
#[derive(Clone, Debug, Default)]
pub struct BnbSolver<T> {
    trail: SearchTrail<T>,
    stack: SearchStack<T>,
    bounds: TaskBounds<T>,
}

impl<T> BnbSolver<T>
where
    T: SolverNumeric,
{
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            trail: SearchTrail::new(),
            stack: SearchStack::new(),
            bounds: TaskBounds::new(),
        }
    }

    /// Creates a solver with preallocated storage for the given problem
    /// size. Capacity is re-ensured at every solve; preallocating merely
    /// moves the allocation cost to construction time.
    #[inline]
    pub fn preallocated(num_vehicles: usize, num_tasks: usize) -> Self {
        Self {
            trail: SearchTrail::preallocated(num_tasks),
            stack: SearchStack::preallocated(num_vehicles, num_tasks),
            bounds: TaskBounds::new(),
        }
    }

    /// Solves the model as a standalone, single-threaded search.
    #[inline]
    pub fn solve<B, E, S>(
        &mut self,
        model: &Model<T>,
        builder: &mut B,
        evaluator: &mut E,
        monitor: S,
    ) -> BnbSolverOutcome<T>
    where
        B: DecisionBuilder<T>,
        E: ObjectiveEvaluator<T>,
        S: TreeSearchMonitor<T>,
    {
        let backing = NoSharedIncumbent::new();
        self.solve_internal(model, builder, evaluator, monitor, backing)
    }

    /// Solves the model while sharing the best known schedule with other
    /// workers through the given incumbent. The shared upper bound is
    /// folded into the pruning bound at every step; improving schedules
    /// are published immediately.
    #[inline]
    pub fn solve_with_incumbent<B, E, S>(
        &mut self,
        model: &Model<T>,
        builder: &mut B,
        evaluator: &mut E,
        monitor: S,
        incumbent: &SharedIncumbent<T>,
    ) -> BnbSolverOutcome<T>
    where
        B: DecisionBuilder<T>,
        E: ObjectiveEvaluator<T>,
        S: TreeSearchMonitor<T>,
    {
        let backing = SharedIncumbentAdapter::new(incumbent);
        self.solve_internal(model, builder, evaluator, monitor, backing)
    }

    #[inline(always)]
    fn solve_internal<B, E, S, I>(
        &mut self,
        model: &Model<T>,
        builder: &mut B,
        evaluator: &mut E,
        mut monitor: S,
        backing: I,
    ) -> BnbSolverOutcome<T>
    where
        B: DecisionBuilder<T>,
        E: ObjectiveEvaluator<T>,
        S: TreeSearchMonitor<T>,
        I: IncumbentStore<T>,
    {
        let session =
            BnbSolverSearchSession::new(self, model, builder, evaluator, &mut monitor, backing);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Resets the internal structures, keeping allocated capacity.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.stack.reset();
        self.bounds.reset();
    }
}

/// Per-run state of one search.
struct BnbSolverSearchSession<'a, T, B, E, S, I>
where
    T: SolverNumeric,
    I: IncumbentStore<T>,
{
    solver: &'a mut BnbSolver<T>,
    model: &'a Model<T>,
    builder: &'a mut B,
    evaluator: &'a mut E,
    monitor: &'a mut S,
    incumbent: I,
    state: SearchState<T>,
    best_makespan: T,
    best_solution: Option<Solution<T>>,
    root_bound: Option<T>,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, B, E, S, I> BnbSolverSearchSession<'a, T, B, E, S, I>
where
    T: SolverNumeric,
    B: DecisionBuilder<T>,
    E: ObjectiveEvaluator<T>,
    S: TreeSearchMonitor<T>,
    I: IncumbentStore<T>,
{
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        model: &'a Model<T>,
        builder: &'a mut B,
        evaluator: &'a mut E,
        monitor: &'a mut S,
        backing: I,
    ) -> Self {
        let state = SearchState::new(model);
        let best_makespan = backing.initial_upper_bound();

        Self {
            solver,
            model,
            builder,
            evaluator,
            monitor,
            incumbent: backing,
            state,
            best_makespan,
            best_solution: None,
            root_bound: None,
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    #[inline]
    fn run(mut self) -> BnbSolverOutcome<T> {
        self.monitor.on_enter_search(self.model, &self.stats);

        if !self.initialize() {
            self.stats.set_total_time(self.start_time.elapsed());
            self.monitor.on_exit_search(&self.stats);
            return self.finalize(BnbTerminationReason::InfeasibilityProven);
        }

        let termination_reason = loop {
            self.best_makespan = self.incumbent.tighten(self.best_makespan);
            self.monitor.on_step(&self.state, &self.stats);

            if let SearchCommand::Terminate(reason) =
                self.monitor.search_command(&self.state, &self.stats)
            {
                break BnbTerminationReason::Aborted(reason);
            }

            if self.solver.stack.is_current_level_empty() {
                if self.solver.stack.depth() <= 1 {
                    // Root level exhausted: the whole tree was explored,
                    // so whatever incumbent exists is optimal.
                    let any_solution =
                        self.best_solution.is_some() || self.incumbent.snapshot().is_some();
                    break if any_solution {
                        BnbTerminationReason::OptimalityProven
                    } else {
                        BnbTerminationReason::InfeasibilityProven
                    };
                }
                self.backtrack_step();
            } else {
                self.process_next_decision();
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize(termination_reason)
    }

    /// Builds the final outcome; consumes the session.
    #[inline]
    fn finalize(mut self, reason: BnbTerminationReason) -> BnbSolverOutcome<T> {
        match reason {
            BnbTerminationReason::OptimalityProven => {
                let solution = self
                    .take_best_known_solution()
                    .expect("expected an incumbent solution when termination is OptimalityProven");
                BnbSolverOutcome::optimal(solution, self.stats)
            }
            BnbTerminationReason::InfeasibilityProven => {
                BnbSolverOutcome::infeasible(self.solver.bounds.conflict(), self.stats)
            }
            BnbTerminationReason::Aborted(reason) => {
                let lower_bound = self.proven_lower_bound();
                let solution = self.take_best_known_solution();
                BnbSolverOutcome::aborted(solution, reason, lower_bound, self.stats)
            }
        }
    }

    /// The better of the session-local best and the shared incumbent.
    #[inline]
    fn take_best_known_solution(&mut self) -> Option<Solution<T>> {
        let local = self.best_solution.take();
        let shared = self.incumbent.snapshot();
        match (local, shared) {
            (Some(local), Some(shared)) => {
                if shared.makespan() < local.makespan() {
                    Some(shared)
                } else {
                    Some(local)
                }
            }
            (Some(local), None) => Some(local),
            (None, shared) => shared,
        }
    }

    /// The proven global lower bound at an abort: every unexplored
    /// subtree is rooted at a stack entry whose completion time bounds it
    /// from below, and the incumbent bounds all explored parts.
    #[inline]
    fn proven_lower_bound(&self) -> Option<T> {
        let mut frontier = self.best_makespan;
        for decision in self.solver.stack.iter() {
            frontier = frontier.min(decision.completion_time());
        }
        let bound = match self.root_bound {
            Some(root) => frontier.max(root),
            None => frontier,
        };
        if bound == T::max_value() {
            None
        } else {
            Some(bound)
        }
    }

    /// Sets up bounds, the root frame, and the root decisions. Returns
    /// `false` on a root-level infeasibility.
    #[inline]
    fn initialize(&mut self) -> bool {
        self.solver.trail.ensure_capacity(self.model.num_tasks());
        self.solver
            .stack
            .ensure_capacity(self.model.num_vehicles(), self.model.num_tasks());

        if !self.solver.bounds.initialize(self.model) {
            return false;
        }

        match self
            .evaluator
            .lower_bound(self.model, &self.solver.bounds, &self.state)
        {
            Some(bound) => self.root_bound = Some(bound),
            None => return false,
        }

        // Degenerate instances with no tasks are already complete.
        if self.state.num_assigned_tasks() == self.model.num_tasks() {
            self.handle_complete_solution();
        }

        self.solver.trail.push_frame(&self.state);
        self.solver.stack.push_frame();
        self.stats.on_node_explored();

        let decisions = self
            .builder
            .next_decisions(self.model, &self.solver.bounds, &self.state);
        let count = decisions.len();
        self.solver.stack.extend_from_slice(decisions);
        self.stats.decisions_generated = self.stats.decisions_generated.saturating_add(count as u64);
        self.monitor
            .on_decisions_enqueued(&self.state, count, &self.stats);

        true
    }

    #[inline]
    fn backtrack_step(&mut self) {
        self.stats.on_backtrack();
        self.monitor.on_backtrack(&self.state, &self.stats);

        self.solver.trail.backtrack(&mut self.state);
        self.solver.stack.pop_frame();
    }

    /// Pops and processes the next dispatch of the current level.
    #[inline(always)]
    fn process_next_decision(&mut self) {
        debug_assert!(
            !self.solver.stack.is_current_level_empty(),
            "called `BnbSolverSearchSession::process_next_decision` with empty decision level"
        );

        let decision = match self.solver.stack.pop() {
            Some(decision) => decision,
            None => return,
        };

        let new_makespan = self
            .state
            .current_makespan()
            .max(decision.completion_time());
        if new_makespan >= self.best_makespan {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return;
        }

        self.descend(decision);
    }

    /// Applies the dispatch and expands or closes the child node.
    #[inline(always)]
    fn descend(&mut self, decision: Decision<T>) {
        self.solver.trail.push_frame(&self.state);
        let location = self.model.task_parking(decision.task());
        self.solver.trail.apply_assignment(
            &mut self.state,
            decision.task(),
            decision.vehicle(),
            decision.start_time(),
            decision.completion_time(),
            location,
        );
        self.solver.stack.push_frame();

        self.stats.on_node_explored();
        self.stats.on_depth_update(self.solver.stack.depth() as u64);
        self.monitor.on_descend(&self.state, decision, &self.stats);

        if self.state.num_assigned_tasks() == self.model.num_tasks() {
            self.handle_complete_solution();
            return;
        }

        if self.should_backtrack_after_expand() {
            self.backtrack_step();
        }
    }

    /// Records a complete schedule if it improves on the incumbent.
    #[inline(always)]
    fn handle_complete_solution(&mut self) {
        let makespan = self.state.current_makespan();
        if makespan < self.best_makespan {
            if let Some(solution) = self.state.to_solution() {
                self.best_makespan = makespan;
                self.incumbent.on_solution_found(&solution);
                self.stats.on_solution_found();
                self.monitor.on_solution_found(&solution, &self.stats);
                self.best_solution = Some(solution);
            }
        } else {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
        }
    }

    /// Bounds the freshly expanded node and enqueues its dispatches.
    /// Returns `true` when the node should be abandoned immediately.
    #[inline(always)]
    fn should_backtrack_after_expand(&mut self) -> bool {
        let lower_bound = match self
            .evaluator
            .lower_bound(self.model, &self.solver.bounds, &self.state)
        {
            Some(bound) => bound,
            None => {
                self.stats.on_pruning_infeasible();
                self.monitor
                    .on_prune(&self.state, PruneReason::Infeasible, &self.stats);
                return true;
            }
        };

        self.monitor
            .on_lower_bound_computed(&self.state, lower_bound, &self.stats);

        if lower_bound >= self.best_makespan {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return true;
        }

        let decisions = self
            .builder
            .next_decisions(self.model, &self.solver.bounds, &self.state);
        let count = decisions.len();
        self.solver.stack.extend_from_slice(decisions);
        self.stats.decisions_generated = self.stats.decisions_generated.saturating_add(count as u64);
        self.monitor
            .on_decisions_enqueued(&self.state, count, &self.stats);

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::chronological::ChronologicalBuilder;
    use crate::branching::most_constrained::MostConstrainedBuilder;
    use crate::eval::workload::WorkloadEvaluator;
    use crate::monitor::no_op::NoOperationMonitor;
    use crate::monitor::wrapper::WrapperMonitor;
    use apron_model::index::{TaskIndex, VehicleIndex};
    use apron_model::model::ModelBuilder;
    use apron_search::monitor::node_limit::NodeLimitMonitor;
    use apron_search::result::SolverResult;

    type IntegerType = i64;

    /// Scenario A: one aircraft, two chained tasks, one vehicle, zero
    /// travel. Optimal makespan is the duration sum.
    fn chain_model() -> Model<IntegerType> {
        let mut builder = ModelBuilder::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 100);
        let t1 = builder.add_task("T1", ac, 10, "fuel");
        let t2 = builder.add_task("T2", ac, 5, "fuel");
        builder.set_predecessor(t2, t1);
        builder.add_vehicle("V1", &["fuel"], p);
        builder.build().unwrap()
    }

    /// Scenario B: two aircraft on different stands sharing one vehicle;
    /// a travel leg of 5 separates the stands.
    fn travel_model() -> Model<IntegerType> {
        let mut builder = ModelBuilder::new();
        let p1 = builder.add_parking("P1");
        let p2 = builder.add_parking("P2");
        builder.set_travel_time(p1, p2, 5);
        builder.set_travel_time(p2, p1, 5);
        let ac1 = builder.add_aircraft("AC1", p1, 0, 100);
        let ac2 = builder.add_aircraft("AC2", p2, 0, 100);
        builder.add_task("TA", ac1, 4, "fuel");
        builder.add_task("TB", ac2, 4, "fuel");
        builder.add_vehicle("V1", &["fuel"], p1);
        builder.build().unwrap()
    }

    fn solve_to_optimal(model: &Model<IntegerType>) -> Solution<IntegerType> {
        let mut solver = BnbSolver::new();
        let mut builder =
            MostConstrainedBuilder::preallocated(model.num_vehicles(), model.num_tasks());
        let mut evaluator = WorkloadEvaluator::for_model(model);
        let outcome = solver.solve(model, &mut builder, &mut evaluator, NoOperationMonitor::new());
        match outcome.result() {
            SolverResult::Optimal(solution) => solution.clone(),
            other => panic!("expected Optimal, got {:?}", other),
        }
    }

    #[test]
    fn test_chained_tasks_run_sequentially() {
        let model = chain_model();
        let solution = solve_to_optimal(&model);

        assert_eq!(solution.makespan(), 15);
        assert_eq!(solution.vehicle_for_task(TaskIndex::new(0)), VehicleIndex::new(0));
        assert_eq!(solution.vehicle_for_task(TaskIndex::new(1)), VehicleIndex::new(0));
        assert_eq!(solution.start_time_for_task(TaskIndex::new(0)), 0);
        assert_eq!(solution.start_time_for_task(TaskIndex::new(1)), 10);
    }

    #[test]
    fn test_travel_leg_is_paid_between_stands() {
        let model = travel_model();
        let solution = solve_to_optimal(&model);

        // Serve P1 first (the vehicle starts there), then one leg of 5:
        // 0..4 at P1, 9..13 at P2.
        assert_eq!(solution.makespan(), 13);
    }

    #[test]
    fn test_chronological_builder_finds_same_optimum() {
        let model = travel_model();
        let mut solver = BnbSolver::new();
        let mut builder = ChronologicalBuilder::new();
        let mut evaluator = WorkloadEvaluator::for_model(&model);
        let outcome = solver.solve(
            &model,
            &mut builder,
            &mut evaluator,
            NoOperationMonitor::new(),
        );

        match outcome.result() {
            SolverResult::Optimal(solution) => assert_eq!(solution.makespan(), 13),
            other => panic!("expected Optimal, got {:?}", other),
        }
    }

    #[test]
    fn test_re_solve_is_idempotent() {
        let model = travel_model();
        let mut solver = BnbSolver::preallocated(model.num_vehicles(), model.num_tasks());
        let mut builder = MostConstrainedBuilder::new();

        for run in 0..3 {
            let mut evaluator = WorkloadEvaluator::for_model(&model);
            let outcome = solver.solve(
                &model,
                &mut builder,
                &mut evaluator,
                NoOperationMonitor::new(),
            );
            match outcome.result() {
                SolverResult::Optimal(solution) => {
                    assert_eq!(solution.makespan(), 13, "run {}: wrong objective", run)
                }
                other => panic!("run {}: expected Optimal, got {:?}", run, other),
            }

            // End-state invariants: trail and stack reset after each run.
            assert_eq!(solver.trail.num_entries(), 0);
            assert_eq!(solver.trail.depth(), 0);
            assert_eq!(solver.stack.num_entries(), 0);
            assert_eq!(solver.stack.depth(), 0);
        }
    }

    #[test]
    fn test_outcome_lower_bound_matches_optimum() {
        let model = chain_model();
        let mut solver = BnbSolver::new();
        let mut builder = MostConstrainedBuilder::new();
        let mut evaluator = WorkloadEvaluator::for_model(&model);
        let outcome = solver.solve(
            &model,
            &mut builder,
            &mut evaluator,
            NoOperationMonitor::new(),
        );

        assert_eq!(outcome.lower_bound(), Some(15));
        assert!(outcome.statistics().nodes_explored > 0);
    }

    #[test]
    fn test_zero_node_budget_aborts_with_admissible_bound() {
        let model = travel_model();
        let mut solver = BnbSolver::new();
        let mut builder = MostConstrainedBuilder::new();
        let mut evaluator = WorkloadEvaluator::for_model(&model);
        let mut node_limit = NodeLimitMonitor::new(0);
        let monitor = WrapperMonitor::new(&mut node_limit);

        let outcome = solver.solve(&model, &mut builder, &mut evaluator, monitor);

        assert!(matches!(
            outcome.termination_reason(),
            BnbTerminationReason::Aborted(_)
        ));
        // No search happened, so no solution; the reported bound still
        // must not exceed the known optimum of 13.
        assert!(matches!(outcome.result(), SolverResult::Unknown));
        let bound = outcome.lower_bound().expect("root bound is available");
        assert!(bound <= 13);
        assert!(bound >= 0);
    }

    #[test]
    fn test_shared_incumbent_is_improved() {
        let model = travel_model();
        let incumbent = SharedIncumbent::<IntegerType>::new();

        // Pre-install a deliberately poor schedule: both tasks on V1 in
        // the expensive order.
        let poor = Solution::new(
            18,
            vec![VehicleIndex::new(0), VehicleIndex::new(0)],
            vec![14, 5],
        );
        assert!(incumbent.try_install(&poor));
        assert_eq!(incumbent.upper_bound(), 18);

        let mut solver = BnbSolver::new();
        let mut builder = MostConstrainedBuilder::new();
        let mut evaluator = WorkloadEvaluator::for_model(&model);
        let outcome = solver.solve_with_incumbent(
            &model,
            &mut builder,
            &mut evaluator,
            NoOperationMonitor::new(),
            &incumbent,
        );

        match outcome.result() {
            SolverResult::Optimal(solution) => assert_eq!(solution.makespan(), 13),
            other => panic!("expected Optimal, got {:?}", other),
        }
        assert_eq!(incumbent.upper_bound(), 13);
        assert_eq!(incumbent.snapshot().unwrap().makespan(), 13);
    }

    #[test]
    fn test_search_proven_infeasibility_without_certificate() {
        // Each window is individually wide enough and no pair is pinned
        // to one vehicle, so root propagation stays quiet. Still, three
        // 10-unit tasks cannot fit into [0, 18) on two vehicles.
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 18);
        builder.add_task("T1", ac, 10, "fuel");
        builder.add_task("T2", ac, 10, "fuel");
        builder.add_task("T3", ac, 10, "fuel");
        builder.add_vehicle("V1", &["fuel"], p);
        builder.add_vehicle("V2", &["fuel"], p);
        let model = builder.build().unwrap();

        let mut solver = BnbSolver::new();
        let mut policy = MostConstrainedBuilder::new();
        let mut evaluator = WorkloadEvaluator::for_model(&model);
        let outcome = solver.solve(
            &model,
            &mut policy,
            &mut evaluator,
            NoOperationMonitor::new(),
        );

        assert!(matches!(outcome.result(), SolverResult::Infeasible));
        assert!(matches!(
            outcome.termination_reason(),
            BnbTerminationReason::InfeasibilityProven
        ));
    }

    #[test]
    fn test_root_conflict_reports_infeasibility_with_certificate() {
        // Chain of three 10-unit tasks in a 25-unit window: root
        // propagation proves the infeasibility directly.
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

        let mut solver = BnbSolver::new();
        let mut policy = MostConstrainedBuilder::new();
        let mut evaluator = WorkloadEvaluator::for_model(&model);
        let outcome = solver.solve(
            &model,
            &mut policy,
            &mut evaluator,
            NoOperationMonitor::new(),
        );

        assert!(matches!(outcome.result(), SolverResult::Infeasible));
        assert!(outcome.conflict().is_some());
        assert_eq!(outcome.statistics().nodes_explored, 0);
    }

    #[test]
    fn test_parallel_tasks_use_both_vehicles() {
        // Two independent tasks, two vehicles at the stand: both run at
        // time zero and the makespan is a single duration.
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p = builder.add_parking("P1");
        let ac = builder.add_aircraft("AC1", p, 0, 100);
        builder.add_task("T1", ac, 10, "fuel");
        builder.add_task("T2", ac, 10, "fuel");
        builder.add_vehicle("V1", &["fuel"], p);
        builder.add_vehicle("V2", &["fuel"], p);
        let model = builder.build().unwrap();

        let solution = solve_to_optimal(&model);
        assert_eq!(solution.makespan(), 10);
        assert_ne!(
            solution.vehicle_for_task(TaskIndex::new(0)),
            solution.vehicle_for_task(TaskIndex::new(1))
        );
    }
}
