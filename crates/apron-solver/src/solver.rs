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

//! # Portfolio-Orchestrated Solver
//!
//! Runs multiple search strategies in parallel, manages the shared
//! incumbent, and enforces global termination criteria via pluggable
//! monitors (time limit, node budget, solution limit, interrupt).
//!
//! Execution model
//! - A greedy warm start seeds the incumbent before any worker spawns.
//! - Each `PortfolioSolver<T>` runs in its own thread under
//!   `std::thread::scope`; workers share only the immutable model, the
//!   `SharedIncumbent`, a global solution counter, and the stop flag.
//! - Every worker gets a per-thread `CompositeMonitor` stack: interrupt
//!   (stop flag, polled cooperatively between branching steps), solution
//!   limit, plus node and time budgets when configured.
//! - A worker proving optimality raises the stop flag so the rest stop
//!   at their next poll.
//! - Results are aggregated: best global solution, optimality hierarchy
//!   (optimal > infeasible > aborted), and the tightest proven lower
//!   bound across workers for gap reporting.
//!
//! A budget is always enforced: `SolverBuilder::build` installs a
//! default node budget when neither a node nor a time limit was
//! configured, so every run terminates even on adversarial instances.

use crate::greedy::greedy_schedule;
use apron_bnb::bounds::TaskBounds;
use apron_model::{model::Model, solution::Solution};
use apron_search::{
    incumbent::SharedIncumbent,
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor, node_limit::NodeLimitMonitor,
        solution_limit::SolutionLimitMonitor, time_limit::TimeLimitMonitor,
    },
    num::SolverNumeric,
    portfolio::{PortfolioSolver, PortfolioSolverContext, PortfolioSolverResult},
    result::{SolverOutcome, SolverResult, TerminationReason},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

/// The default node budget installed when the caller configures no
/// budget at all. Large enough for the tree to exhaust first on any
/// reasonable instance; its job is guaranteed termination.
pub const DEFAULT_NODE_LIMIT: u64 = 50_000_000;

pub struct Solver<'a, T> {
    portfolio_solvers: Vec<Box<dyn PortfolioSolver<T> + Send + 'a>>,
    incumbent: SharedIncumbent<T>,
    global_solution_count: AtomicU64,
    /// Shared flag signalling all workers to stop (optimality proven
    /// elsewhere, or an external cancellation request).
    stop_signal: AtomicBool,
    solution_limit: Option<u64>,
    node_limit: Option<u64>,
    time_limit: Option<std::time::Duration>,
}

impl<'a, T> Solver<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn add_solver<S>(&mut self, solver: S)
    where
        S: PortfolioSolver<T> + Send + 'a,
    {
        self.portfolio_solvers.push(Box::new(solver));
    }

    #[inline]
    pub fn incumbent(&self) -> &SharedIncumbent<T> {
        &self.incumbent
    }

    #[inline]
    pub fn solution_limit(&self) -> Option<u64> {
        self.solution_limit
    }

    #[inline]
    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }

    #[inline]
    pub fn time_limit(&self) -> Option<std::time::Duration> {
        self.time_limit
    }

    /// Solves the model with the configured portfolio and budgets.
    pub fn solve(&mut self, model: &Model<T>) -> SolverOutcome<T> {
        assert!(
            !self.portfolio_solvers.is_empty(),
            "called `Solver::solve` with no portfolio solvers added"
        );

        let start_time = std::time::Instant::now();

        self.stop_signal.store(false, Ordering::Relaxed);
        self.global_solution_count.store(0, Ordering::Relaxed);

        // Root propagation once up front; a conflict means no worker has
        // anything to do.
        let mut bounds = TaskBounds::new();
        if !bounds.initialize(model) {
            debug!(conflict = ?bounds.conflict(), "root propagation proved infeasibility");
            let statistics = self.build_statistics(start_time, 0, 0);
            return SolverOutcome::infeasible(statistics);
        }

        // Greedy warm start: seeds the incumbent so every worker prunes
        // against a real upper bound from its first node on.
        if let Some(seed) = greedy_schedule(model, &bounds) {
            debug!(makespan = %seed.makespan(), "greedy warm start installed");
            if self.incumbent.try_install(&seed) {
                self.global_solution_count.fetch_add(1, Ordering::Relaxed);
            }
        }

        let results = self.run_portfolio_parallel(model);
        self.construct_outcome(start_time, results)
    }

    /// Spawns one thread per portfolio solver and collects their results.
    fn run_portfolio_parallel(&mut self, model: &Model<T>) -> Vec<PortfolioSolverResult<T>> {
        let solution_limit = self.solution_limit;
        let node_limit = self.node_limit;
        let time_limit = self.time_limit;
        let incumbent = &self.incumbent;
        let global_solution_count = &self.global_solution_count;
        let stop_signal = &self.stop_signal;

        let mut results = Vec::with_capacity(self.portfolio_solvers.len());

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.portfolio_solvers.len());

            for solver in &mut self.portfolio_solvers {
                let handle = scope.spawn(move || {
                    let mut monitor = CompositeMonitor::<T>::new();

                    // Always present: cooperative interrupt and the
                    // global solution counter.
                    monitor.add_monitor(InterruptMonitor::new(stop_signal));
                    monitor.add_monitor(SolutionLimitMonitor::new(
                        global_solution_count,
                        solution_limit,
                    ));
                    if let Some(limit) = node_limit {
                        monitor.add_monitor(NodeLimitMonitor::new(limit));
                    }
                    if let Some(limit) = time_limit {
                        monitor.add_monitor(TimeLimitMonitor::new(limit));
                    }

                    let context =
                        PortfolioSolverContext::new(model, incumbent, &mut monitor, stop_signal);
                    let result = solver.solve(context);

                    if matches!(result.result(), SolverResult::Optimal(_)) {
                        debug!(
                            worker = solver.name(),
                            "optimality proven, signalling other workers to stop"
                        );
                        stop_signal.store(true, Ordering::Relaxed);
                    }

                    result
                });
                handles.push(handle);
            }

            for handle in handles {
                results.push(handle.join().expect("portfolio solver thread panicked"));
            }
        });

        results
    }

    /// The best solution among all workers and the shared incumbent.
    fn find_best_solution(&self, results: &[PortfolioSolverResult<T>]) -> Option<Solution<T>> {
        let thread_solutions = results.iter().filter_map(|r| match r.result() {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            _ => None,
        });

        let incumbent_snapshot = self.incumbent.snapshot();

        thread_solutions
            .chain(incumbent_snapshot.as_ref())
            .min_by_key(|s| s.makespan())
            .cloned()
    }

    /// The tightest proven lower bound. Every worker explores the full
    /// tree independently, so each reported bound is globally valid and
    /// the maximum is, too.
    fn proven_lower_bound(&self, results: &[PortfolioSolverResult<T>]) -> Option<T> {
        results.iter().filter_map(|r| r.lower_bound()).max()
    }

    fn build_statistics(
        &self,
        start_time: std::time::Instant,
        used_threads: usize,
        nodes_explored: u64,
    ) -> SolverStatistics {
        SolverStatisticsBuilder::new()
            .solutions_found(self.global_solution_count.load(Ordering::Relaxed))
            .nodes_explored(nodes_explored)
            .used_threads(used_threads)
            .solve_duration(start_time.elapsed())
            .build()
    }

    fn construct_outcome(
        &self,
        start_time: std::time::Instant,
        results: Vec<PortfolioSolverResult<T>>,
    ) -> SolverOutcome<T> {
        let nodes: u64 = results.iter().map(|r| r.nodes_explored()).sum();
        let statistics = self.build_statistics(start_time, results.len(), nodes);

        let best_solution = self.find_best_solution(&results);
        let optimality_proven = results
            .iter()
            .any(|r| matches!(r.result(), SolverResult::Optimal(_)));

        if let Some(solution) = best_solution {
            if optimality_proven {
                return SolverOutcome::optimal(solution, statistics);
            }
            let reason = self.determine_abort_reason(&results);
            let lower_bound = self.proven_lower_bound(&results);
            return SolverOutcome::feasible(solution, reason, lower_bound, statistics);
        }

        if results
            .iter()
            .any(|r| matches!(r.result(), SolverResult::Infeasible))
        {
            return SolverOutcome::infeasible(statistics);
        }

        let reason = self.determine_abort_reason(&results);
        let lower_bound = self.proven_lower_bound(&results);
        SolverOutcome::unknown(reason, lower_bound, statistics)
    }

    fn determine_abort_reason(&self, results: &[PortfolioSolverResult<T>]) -> String {
        if let Some(message) = results.iter().find_map(|result| {
            if let TerminationReason::Aborted(message) = result.termination_reason() {
                Some(message.clone())
            } else {
                None
            }
        }) {
            return message;
        }

        if self.stop_signal.load(Ordering::Relaxed) {
            return "external interrupt".to_string();
        }

        "search space exhausted without proof".to_string()
    }
}

/// Builder configuring budgets and the strategy portfolio.
pub struct SolverBuilder<'a, T> {
    portfolio_solvers: Vec<Box<dyn PortfolioSolver<T> + Send + 'a>>,
    solution_limit: Option<u64>,
    node_limit: Option<u64>,
    time_limit: Option<std::time::Duration>,
}

impl<'a, T> Default for SolverBuilder<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> SolverBuilder<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            portfolio_solvers: Vec::new(),
            solution_limit: None,
            node_limit: None,
            time_limit: None,
        }
    }

    /// Stops the whole portfolio after this many installed solutions.
    #[inline]
    pub fn with_solution_limit(mut self, limit: u64) -> Self {
        self.solution_limit = Some(limit);
        self
    }

    /// Feasibility-only mode: stop at the first schedule found.
    #[inline]
    pub fn first_feasible(self) -> Self {
        self.with_solution_limit(1)
    }

    /// Caps each worker's search at this many nodes.
    #[inline]
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Caps the wall-clock time of each worker.
    #[inline]
    pub fn with_time_limit(mut self, limit: std::time::Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Adds a portfolio worker.
    #[inline]
    pub fn add_solver<S>(mut self, solver: S) -> Self
    where
        S: PortfolioSolver<T> + Send + 'a,
    {
        self.portfolio_solvers.push(Box::new(solver));
        self
    }

    /// Finalizes the solver. When no budget at all was configured, the
    /// default node budget is installed so the run is guaranteed to
    /// terminate.
    #[inline]
    pub fn build(self) -> Solver<'a, T> {
        let node_limit = match (self.node_limit, self.time_limit) {
            (None, None) => Some(DEFAULT_NODE_LIMIT),
            (node_limit, _) => node_limit,
        };

        Solver {
            portfolio_solvers: self.portfolio_solvers,
            incumbent: SharedIncumbent::new(),
            global_solution_count: AtomicU64::new(0),
            stop_signal: AtomicBool::new(false),
            solution_limit: self.solution_limit,
            node_limit,
            time_limit: self.time_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_bnb::branching::chronological::ChronologicalBuilder;
    use apron_bnb::branching::most_constrained::MostConstrainedBuilder;
    use apron_bnb::eval::critical_path::CriticalPathEvaluator;
    use apron_bnb::eval::workload::WorkloadEvaluator;
    use apron_bnb::portfolio::BnbPortfolioSolver;
    use apron_model::index::{ParkingIndex, TaskIndex, VehicleIndex};
    use apron_model::model::ModelBuilder;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    type IntegerType = i64;

    fn default_solver<'a>(model: &Model<IntegerType>) -> Solver<'a, IntegerType> {
        SolverBuilder::new()
            .add_solver(BnbPortfolioSolver::preallocated(
                model.num_vehicles(),
                model.num_tasks(),
                MostConstrainedBuilder::new(),
                WorkloadEvaluator::for_model(model),
            ))
            .add_solver(BnbPortfolioSolver::preallocated(
                model.num_vehicles(),
                model.num_tasks(),
                ChronologicalBuilder::new(),
                CriticalPathEvaluator::preallocated(model.num_tasks()),
            ))
            .build()
    }

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

    /// Independent exhaustive enumeration of dispatch sequences, without
    /// propagation, symmetry breaking, or bounding. Only usable on tiny
    /// instances.
    fn brute_force_makespan(model: &Model<IntegerType>) -> Option<IntegerType> {
        struct Frame {
            free: Vec<IntegerType>,
            location: Vec<ParkingIndex>,
            starts: Vec<Option<IntegerType>>,
        }

        fn recurse(model: &Model<IntegerType>, frame: &mut Frame) -> Option<IntegerType> {
            if frame.starts.iter().all(|s| s.is_some()) {
                let makespan = (0..model.num_tasks())
                    .map(|t| {
                        let task = TaskIndex::new(t);
                        frame.starts[t].unwrap() + model.task_duration(task)
                    })
                    .max()
                    .unwrap_or(0);
                return Some(makespan);
            }

            let mut best: Option<IntegerType> = None;
            for t in 0..model.num_tasks() {
                let task = TaskIndex::new(t);
                if frame.starts[t].is_some() {
                    continue;
                }
                let predecessor_end = match model.task_predecessor(task) {
                    Some(p) => match frame.starts[p.get()] {
                        Some(start) => start + model.task_duration(p),
                        None => continue,
                    },
                    None => IntegerType::MIN,
                };

                for v in 0..model.num_vehicles() {
                    let vehicle = VehicleIndex::new(v);
                    if !model.is_compatible(task, vehicle) {
                        continue;
                    }
                    let travel =
                        model.travel_time(frame.location[v], model.task_parking(task));
                    let start = model
                        .task_release(task)
                        .max(predecessor_end)
                        .max(frame.free[v] + travel);
                    if start + model.task_duration(task) > model.task_deadline(task) {
                        continue;
                    }

                    let saved_free = frame.free[v];
                    let saved_location = frame.location[v];
                    frame.free[v] = start + model.task_duration(task);
                    frame.location[v] = model.task_parking(task);
                    frame.starts[t] = Some(start);

                    if let Some(makespan) = recurse(model, frame) {
                        best = Some(best.map_or(makespan, |b: IntegerType| b.min(makespan)));
                    }

                    frame.free[v] = saved_free;
                    frame.location[v] = saved_location;
                    frame.starts[t] = None;
                }
            }
            best
        }

        let mut frame = Frame {
            free: vec![0; model.num_vehicles()],
            location: (0..model.num_vehicles())
                .map(|v| model.vehicle_base_parking(VehicleIndex::new(v)))
                .collect(),
            starts: vec![None; model.num_tasks()],
        };
        recurse(model, &mut frame)
    }

    /// A random tiny instance; returns `None` when the draw is invalid
    /// (e.g. a task type without a vehicle).
    fn random_model(rng: &mut StdRng) -> Option<Model<IntegerType>> {
        let mut builder = ModelBuilder::<IntegerType>::new();

        let num_parkings = rng.gen_range(1..=3usize);
        let parkings: Vec<_> = (0..num_parkings)
            .map(|i| builder.add_parking(format!("P{}", i)))
            .collect();
        for (i, &from) in parkings.iter().enumerate() {
            for (j, &to) in parkings.iter().enumerate() {
                if i != j {
                    builder.set_travel_time(from, to, rng.gen_range(0..=5));
                }
            }
        }

        let types = ["fuel", "clean"];
        let num_vehicles = rng.gen_range(1..=2usize);
        for v in 0..num_vehicles {
            let vehicle_types: &[&str] = if num_vehicles == 1 || rng.gen_bool(0.3) {
                &types
            } else {
                std::slice::from_ref(&types[v % 2])
            };
            let base = parkings[rng.gen_range(0..num_parkings)];
            builder.add_vehicle(format!("V{}", v), vehicle_types, base);
        }

        let num_aircraft = rng.gen_range(1..=2usize);
        let mut aircraft = Vec::new();
        for a in 0..num_aircraft {
            let parking = parkings[rng.gen_range(0..num_parkings)];
            let arrival = rng.gen_range(0..10);
            let departure = arrival + rng.gen_range(25..60);
            aircraft.push(builder.add_aircraft(format!("AC{}", a), parking, arrival, departure));
        }

        let num_tasks = rng.gen_range(1..=4usize);
        let mut previous: Option<(usize, TaskIndex)> = None;
        for t in 0..num_tasks {
            let owner = rng.gen_range(0..num_aircraft);
            let duration = rng.gen_range(1..=8);
            let required = types[rng.gen_range(0..types.len())];
            let task = builder.add_task(format!("T{}", t), aircraft[owner], duration, required);
            if let Some((prev_owner, prev_task)) = previous {
                if prev_owner == owner && rng.gen_bool(0.4) {
                    builder.set_predecessor(task, prev_task);
                }
            }
            previous = Some((owner, task));
        }

        builder.build().ok()
    }

    #[test]
    fn test_portfolio_finds_known_optimum() {
        let model = travel_model();
        let mut solver = default_solver(&model);
        let outcome = solver.solve(&model);

        assert!(outcome.is_optimal());
        assert_eq!(outcome.solution().unwrap().makespan(), 13);
        assert_eq!(outcome.lower_bound(), Some(13));
        assert_eq!(outcome.statistics().used_threads, 2);
    }

    #[test]
    fn test_matches_brute_force_on_random_instances() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let mut checked = 0;

        while checked < 40 {
            let Some(model) = random_model(&mut rng) else {
                continue;
            };

            let expected = brute_force_makespan(&model);
            let mut solver = default_solver(&model);
            let outcome = solver.solve(&model);

            match expected {
                Some(optimal) => {
                    assert!(
                        outcome.is_optimal(),
                        "feasible instance must be solved to optimality: {}",
                        model
                    );
                    assert_eq!(
                        outcome.solution().unwrap().makespan(),
                        optimal,
                        "engine and brute force disagree on {}",
                        model
                    );
                    if let Some(bound) = outcome.lower_bound() {
                        assert!(bound <= optimal, "bound must be admissible on {}", model);
                    }
                }
                None => {
                    assert!(
                        outcome.is_infeasible(),
                        "infeasible instance must be reported as such: {}",
                        model
                    );
                }
            }
            checked += 1;
        }
    }

    #[test]
    fn test_deterministic_makespan_across_runs() {
        let mut rng = StdRng::seed_from_u64(42);
        let model = loop {
            if let Some(model) = random_model(&mut rng) {
                if brute_force_makespan(&model).is_some() {
                    break model;
                }
            }
        };

        let mut makespans = Vec::new();
        for _ in 0..3 {
            let mut solver = default_solver(&model);
            let outcome = solver.solve(&model);
            makespans.push(outcome.solution().map(|s| s.makespan()));
        }
        assert_eq!(makespans[0], makespans[1]);
        assert_eq!(makespans[1], makespans[2]);
    }

    #[test]
    fn test_window_tightening_never_improves_makespan() {
        // The same instance with a tighter departure can only get worse.
        let build = |departure: IntegerType| {
            let mut builder = ModelBuilder::<IntegerType>::new();
            let p1 = builder.add_parking("P1");
            let p2 = builder.add_parking("P2");
            builder.set_travel_time(p1, p2, 5);
            builder.set_travel_time(p2, p1, 5);
            let ac1 = builder.add_aircraft("AC1", p1, 0, 100);
            let ac2 = builder.add_aircraft("AC2", p2, 0, departure);
            builder.add_task("TA", ac1, 4, "fuel");
            builder.add_task("TB", ac2, 4, "fuel");
            builder.add_vehicle("V1", &["fuel"], p1);
            builder.build().unwrap()
        };

        let loose = build(100);
        let tight = build(11);

        let mut loose_solver = default_solver(&loose);
        let loose_makespan = loose_solver
            .solve(&loose)
            .solution()
            .unwrap()
            .makespan();

        let mut tight_solver = default_solver(&tight);
        let tight_makespan = tight_solver
            .solve(&tight)
            .solution()
            .unwrap()
            .makespan();

        // Tight: TB must finish by 11, so the vehicle serves P2 first
        // (5..9) and returns for TA (14..18).
        assert_eq!(loose_makespan, 13);
        assert_eq!(tight_makespan, 18);
        assert!(tight_makespan >= loose_makespan);
    }

    #[test]
    fn test_removing_a_vehicle_never_improves_makespan() {
        let build = |second_vehicle: bool| {
            let mut builder = ModelBuilder::<IntegerType>::new();
            let p = builder.add_parking("P1");
            let ac = builder.add_aircraft("AC1", p, 0, 100);
            builder.add_task("T1", ac, 10, "fuel");
            builder.add_task("T2", ac, 10, "fuel");
            builder.add_vehicle("V1", &["fuel"], p);
            if second_vehicle {
                builder.add_vehicle("V2", &["fuel"], p);
            }
            builder.build().unwrap()
        };

        let two = build(true);
        let one = build(false);

        let mut two_solver = default_solver(&two);
        let two_makespan = two_solver.solve(&two).solution().unwrap().makespan();
        let mut one_solver = default_solver(&one);
        let one_makespan = one_solver.solve(&one).solution().unwrap().makespan();

        assert_eq!(two_makespan, 10);
        assert_eq!(one_makespan, 20);
        assert!(one_makespan >= two_makespan);
    }

    #[test]
    fn test_adding_precedence_never_improves_makespan() {
        let build = |chained: bool| {
            let mut builder = ModelBuilder::<IntegerType>::new();
            let p = builder.add_parking("P1");
            let ac = builder.add_aircraft("AC1", p, 0, 100);
            let t1 = builder.add_task("T1", ac, 10, "fuel");
            let t2 = builder.add_task("T2", ac, 10, "fuel");
            if chained {
                builder.set_predecessor(t2, t1);
            }
            builder.add_vehicle("V1", &["fuel"], p);
            builder.add_vehicle("V2", &["fuel"], p);
            builder.build().unwrap()
        };

        let free = build(false);
        let chained = build(true);

        let mut free_solver = default_solver(&free);
        let free_makespan = free_solver.solve(&free).solution().unwrap().makespan();
        let mut chained_solver = default_solver(&chained);
        let chained_makespan = chained_solver
            .solve(&chained)
            .solution()
            .unwrap()
            .makespan();

        assert_eq!(free_makespan, 10);
        assert_eq!(chained_makespan, 20);
        assert!(chained_makespan >= free_makespan);
    }

    #[test]
    fn test_zero_node_budget_returns_best_effort() {
        let model = travel_model();
        let mut solver = SolverBuilder::new()
            .with_node_limit(0)
            .add_solver(BnbPortfolioSolver::new(
                MostConstrainedBuilder::new(),
                WorkloadEvaluator::for_model(&model),
            ))
            .build();

        let outcome = solver.solve(&model);

        // The greedy warm start guarantees a schedule even with no
        // search at all; optimality is not claimed.
        assert!(outcome.is_feasible());
        assert!(!outcome.is_optimal());
        let solution = outcome.solution().unwrap();
        assert!(solution.makespan() >= 13);
        let bound = outcome.lower_bound().expect("bound is reported");
        assert!(bound <= 13);
    }

    #[test]
    fn test_first_feasible_mode_stops_early() {
        let model = travel_model();
        let mut solver = SolverBuilder::new()
            .first_feasible()
            .add_solver(BnbPortfolioSolver::new(
                ChronologicalBuilder::new(),
                WorkloadEvaluator::for_model(&model),
            ))
            .build();

        let outcome = solver.solve(&model);
        assert!(outcome.has_solution());
        // The warm start already satisfies the solution limit of one.
        assert!(outcome.statistics().solutions_found >= 1);
    }

    #[test]
    fn test_root_infeasibility_is_reported() {
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

        let mut solver = default_solver(&model);
        let outcome = solver.solve(&model);
        assert!(outcome.is_infeasible());
    }
}
