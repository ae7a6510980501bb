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

//! # Portfolio-Orchestrated Turnaround Solver
//!
//! The top layer of the apron workspace: runs several branch-and-bound
//! strategies in parallel on a shared incumbent, enforces global budgets
//! through pluggable monitors, and exposes the planning facade that turns
//! an ingestion `Instance` into a validated `TurnaroundPlan`.
//!
//! - `greedy`: a chronological dispatcher seeding the incumbent so even
//!   a zero-budget run returns a usable schedule.
//! - `solver`: `Solver`/`SolverBuilder`: thread-scoped portfolio
//!   execution, shared stop flag, outcome aggregation with the proven
//!   lower bound.
//! - `plan`: the `Instance` → `TurnaroundPlan` pipeline with the full
//!   error taxonomy (invalid instance, no compatible vehicle, infeasible
//!   window, no feasible schedule, invariant violation).

pub mod greedy;
pub mod plan;
pub mod solver;
