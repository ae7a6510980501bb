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

//! Apron-BnB: branch-and-bound for aircraft turnaround scheduling
//!
//! A deterministic, modular branch-and-bound engine minimizing the makespan
//! of ground-handling schedules. The engine separates constraint
//! propagation, branching, bounding, monitoring, and incumbent handling so
//! strategies can be swapped without touching the core search loop.
//!
//! Core flow
//! - Provide an `apron_model::model::Model<T>`.
//! - Root propagation (`bounds::TaskBounds`) tightens per-task start-time
//!   windows and detects infeasible instances before any search.
//! - A `branching::DecisionBuilder` generates, per node, the feasible
//!   dispatches: a decision appends one task to one vehicle's route at its
//!   earliest feasible start.
//! - An `eval::ObjectiveEvaluator` supplies admissible makespan lower
//!   bounds for pruning against the (optionally shared) incumbent.
//! - `bnb::BnbSolver` drives an explicit work-stack search; state is
//!   mutated in place and restored through a trail, never via deep
//!   recursion.
//!
//! Assumptions and guarantees
//! - Lower bounds must be admissible (never above the best achievable
//!   makespan); pruning correctness relies on this.
//! - Builders enumerate every feasible dispatch at each node (modulo the
//!   forward-in-time symmetry rule), so exhausting the tree proves
//!   optimality of the incumbent.
//!
//! Module map
//! - `bounds`: root propagation, pair relations, conflict certificates.
//! - `bnb`: the solver engine and per-run search session.
//! - `branching`: decision generation and exploration ordering.
//! - `eval`: admissible lower-bound evaluators.
//! - `monitor`: tree-search monitors (no-op, tracing log, wrapper).
//! - `portfolio`: adapter to the `apron_search` portfolio API.
//! - `result`: engine outcomes with termination reasons and bounds.
//! - `stats`: lightweight counters and timing.

pub mod bnb;
pub mod bounds;
pub mod branching;
pub mod eval;
mod incumbent;
pub mod monitor;
pub mod portfolio;
pub mod result;
mod stack;
pub mod state;
pub mod stats;
mod trail;
