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

//! # Apron Model
//!
//! **The core domain model for the apron ground-handling scheduler.**
//!
//! This crate defines the data structures describing an aircraft turnaround
//! scheduling instance and its solutions. It is the interchange layer
//! between problem ingestion (user input) and the solving engine
//! (`apron-bnb`).
//!
//! ## Architecture
//!
//! * **`index`**: strongly typed wrappers (`TaskIndex`, `VehicleIndex`,
//!   `ParkingIndex`, `AircraftIndex`) that prevent logical indexing errors.
//! * **`instance`**: the ingestion boundary; plain records with string
//!   identifiers, as delivered by external data loaders.
//! * **`model`**: the immutable, validated `Model` (flattened SoA layout,
//!   optimized for the search hot path) and its `ModelBuilder`.
//! * **`solution`**: the raw solver output; one vehicle and start time per
//!   task plus the makespan objective.
//! * **`schedule`**: the extracted, per-vehicle routed `Schedule` with a
//!   defensive re-validation of every scheduling invariant.
//!
//! ## Design Philosophy
//!
//! 1. **Fail fast**: instances are validated exhaustively at build time; the
//!    solver never sees malformed data.
//! 2. **Memory layout**: task and vehicle attributes live in flattened
//!    vectors (Structure of Arrays) to maximize cache locality during
//!    branch-and-bound.
//! 3. **Type safety**: distinct index types for distinct entity spaces.

pub mod index;
pub mod instance;
pub mod model;
pub mod schedule;
pub mod solution;
