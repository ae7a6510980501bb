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

//! The immutable scheduling model and its validating builder.
//!
//! A `Model<T>` holds all pre-validated, queryable instance data in a
//! flattened Structure-of-Arrays layout:
//!
//! - per-task: duration, owning aircraft, optional predecessor, required
//!   capability (as an interned type id);
//! - per-aircraft: ground window `[arrival, departure)` and parking stand;
//! - per-vehicle: base parking stand and capability set;
//! - a dense `num_parkings x num_parkings` travel-time matrix;
//! - a task-major compatibility bitset linking tasks to the vehicles able
//!   to serve them.
//!
//! Construction goes through `ModelBuilder`, whose `build` performs the
//! full instance validation: referential integrity, acyclic precedence
//! within one aircraft, positive durations, non-negative and complete
//! travel times, non-empty ground windows, at least one compatible vehicle
//! per task, and per-task window feasibility. The solver can therefore
//! assume a well-formed instance and never re-checks these properties on
//! the hot path.

use crate::index::{AircraftIndex, ParkingIndex, TaskIndex, VehicleIndex};
use apron_core::math::interval::ClosedOpenInterval;
use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};

#[inline(always)]
fn travel_index(num_parkings: usize, from: ParkingIndex, to: ParkingIndex) -> usize {
    from.get() * num_parkings + to.get()
}

#[inline(always)]
fn compat_index(num_vehicles: usize, task: TaskIndex, vehicle: VehicleIndex) -> usize {
    task.get() * num_vehicles + vehicle.get()
}

/// Classification of model construction failures, mirroring the error
/// taxonomy of the scheduling core: malformed input data, a task that no
/// vehicle can serve, and a ground window too short for its task.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModelErrorKind {
    /// The instance data itself is malformed.
    InvalidInstance,
    /// A task requires a capability no vehicle provides.
    NoCompatibleVehicle,
    /// A task cannot fit into its aircraft's ground window.
    InfeasibleWindow,
}

impl std::fmt::Display for ModelErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelErrorKind::InvalidInstance => write!(f, "InvalidInstance"),
            ModelErrorKind::NoCompatibleVehicle => write!(f, "NoCompatibleVehicle"),
            ModelErrorKind::InfeasibleWindow => write!(f, "InfeasibleWindow"),
        }
    }
}

/// The error type for model construction.
///
/// Every variant names the offending identifier so that ingestion tooling
/// can point directly at the faulty record.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ModelError {
    /// An identifier was used twice within its entity class.
    DuplicateIdentifier { identifier: String },
    /// A task references an aircraft that does not exist.
    UnknownAircraft { task_id: String, aircraft_id: String },
    /// An aircraft or vehicle references a parking stand that does not exist.
    UnknownParking { owner_id: String, parking_id: String },
    /// A task references a predecessor task that does not exist.
    UnknownPredecessor {
        task_id: String,
        predecessor_id: String,
    },
    /// A task's predecessor belongs to a different aircraft.
    PredecessorAircraftMismatch {
        task_id: String,
        predecessor_id: String,
    },
    /// Following predecessor links from this task revisits it.
    CyclicPrecedence { task_id: String },
    /// A task duration is zero or negative.
    NonPositiveDuration { task_id: String },
    /// A travel time entry is negative.
    NegativeTravelTime { from_id: String, to_id: String },
    /// A travel time entry for a referenced parking pair is absent.
    MissingTravelTime { from_id: String, to_id: String },
    /// The self-distance of a parking stand was set to a non-zero value.
    NonZeroSelfTravel { parking_id: String },
    /// An aircraft arrives at or after its departure.
    EmptyTurnaroundWindow { aircraft_id: String },
    /// A task's required capability matches no vehicle in the fleet.
    NoCompatibleVehicle { task_id: String },
    /// A task's duration exceeds its aircraft's ground window.
    InfeasibleWindow { task_id: String },
}

impl ModelError {
    /// Returns the coarse classification of this error.
    #[inline]
    pub fn kind(&self) -> ModelErrorKind {
        match self {
            ModelError::NoCompatibleVehicle { .. } => ModelErrorKind::NoCompatibleVehicle,
            ModelError::InfeasibleWindow { .. } => ModelErrorKind::InfeasibleWindow,
            _ => ModelErrorKind::InvalidInstance,
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::DuplicateIdentifier { identifier } => {
                write!(f, "Identifier '{}' is used more than once", identifier)
            }
            ModelError::UnknownAircraft {
                task_id,
                aircraft_id,
            } => write!(
                f,
                "Task '{}' references unknown aircraft '{}'",
                task_id, aircraft_id
            ),
            ModelError::UnknownParking {
                owner_id,
                parking_id,
            } => write!(
                f,
                "'{}' references unknown parking stand '{}'",
                owner_id, parking_id
            ),
            ModelError::UnknownPredecessor {
                task_id,
                predecessor_id,
            } => write!(
                f,
                "Task '{}' references unknown predecessor '{}'",
                task_id, predecessor_id
            ),
            ModelError::PredecessorAircraftMismatch {
                task_id,
                predecessor_id,
            } => write!(
                f,
                "Task '{}' and its predecessor '{}' belong to different aircraft",
                task_id, predecessor_id
            ),
            ModelError::CyclicPrecedence { task_id } => {
                write!(f, "Precedence chain through task '{}' is cyclic", task_id)
            }
            ModelError::NonPositiveDuration { task_id } => {
                write!(f, "Task '{}' has a non-positive duration", task_id)
            }
            ModelError::NegativeTravelTime { from_id, to_id } => write!(
                f,
                "Travel time from '{}' to '{}' is negative",
                from_id, to_id
            ),
            ModelError::MissingTravelTime { from_id, to_id } => write!(
                f,
                "No travel time defined from '{}' to '{}'",
                from_id, to_id
            ),
            ModelError::NonZeroSelfTravel { parking_id } => write!(
                f,
                "Self travel time of parking stand '{}' must be zero",
                parking_id
            ),
            ModelError::EmptyTurnaroundWindow { aircraft_id } => write!(
                f,
                "Aircraft '{}' arrives at or after its departure",
                aircraft_id
            ),
            ModelError::NoCompatibleVehicle { task_id } => write!(
                f,
                "No vehicle in the fleet can serve task '{}'",
                task_id
            ),
            ModelError::InfeasibleWindow { task_id } => write!(
                f,
                "Task '{}' does not fit into its aircraft's ground window",
                task_id
            ),
        }
    }
}

impl std::error::Error for ModelError {}

/// The immutable data model describing tasks, vehicles, aircraft, parking
/// stands, and travel times.
///
/// Use `ModelBuilder` (or `Model::from_instance`) to obtain a validated
/// `Model`. All accessors index with the typed index types of this crate;
/// checked variants debug-assert bounds, unchecked variants are provided
/// for the search hot path.
#[derive(Clone, Debug)]
pub struct Model<T>
where
    T: PrimInt + Signed,
{
    task_durations: Vec<T>,                          // len = num_tasks
    task_aircraft: Vec<AircraftIndex>,               // len = num_tasks
    task_predecessors: Vec<Option<TaskIndex>>,       // len = num_tasks
    aircraft_windows: Vec<ClosedOpenInterval<T>>,    // len = num_aircraft
    aircraft_parkings: Vec<ParkingIndex>,            // len = num_aircraft
    vehicle_base_parkings: Vec<ParkingIndex>,        // len = num_vehicles
    compatibility: FixedBitSet,                      // num_tasks * num_vehicles
    compatible_counts: Vec<usize>,                   // len = num_tasks
    travel_times: Vec<T>,                            // num_parkings^2
    num_parkings: usize,

    // Identifier tables, retained for diagnostics and display only.
    task_ids: Vec<String>,
    vehicle_ids: Vec<String>,
    aircraft_ids: Vec<String>,
    parking_ids: Vec<String>,
}

impl<T> Model<T>
where
    T: PrimInt + Signed,
{
    /// Returns the number of tasks in the model.
    #[inline]
    pub fn num_tasks(&self) -> usize {
        self.task_durations.len()
    }

    /// Returns the number of vehicles in the model.
    #[inline]
    pub fn num_vehicles(&self) -> usize {
        self.vehicle_base_parkings.len()
    }

    /// Returns the number of aircraft in the model.
    #[inline]
    pub fn num_aircraft(&self) -> usize {
        self.aircraft_windows.len()
    }

    /// Returns the number of parking stands in the model.
    #[inline]
    pub fn num_parkings(&self) -> usize {
        self.num_parkings
    }

    /// Returns the duration of the specified task.
    #[inline]
    pub fn task_duration(&self, task: TaskIndex) -> T {
        debug_assert!(
            task.get() < self.num_tasks(),
            "called `Model::task_duration` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks(),
            task.get()
        );
        self.task_durations[task.get()]
    }

    /// Returns the duration of the specified task without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `task` is in `0..num_tasks()`.
    #[inline]
    pub unsafe fn task_duration_unchecked(&self, task: TaskIndex) -> T {
        debug_assert!(task.get() < self.num_tasks());
        unsafe { *self.task_durations.get_unchecked(task.get()) }
    }

    /// Returns the aircraft owning the specified task.
    #[inline]
    pub fn task_aircraft(&self, task: TaskIndex) -> AircraftIndex {
        debug_assert!(
            task.get() < self.num_tasks(),
            "called `Model::task_aircraft` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks(),
            task.get()
        );
        self.task_aircraft[task.get()]
    }

    /// Returns the predecessor of the specified task, if any.
    #[inline]
    pub fn task_predecessor(&self, task: TaskIndex) -> Option<TaskIndex> {
        debug_assert!(
            task.get() < self.num_tasks(),
            "called `Model::task_predecessor` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks(),
            task.get()
        );
        self.task_predecessors[task.get()]
    }

    /// Returns the parking stand at which the specified task takes place
    /// (the stand of its owning aircraft).
    #[inline]
    pub fn task_parking(&self, task: TaskIndex) -> ParkingIndex {
        self.aircraft_parkings[self.task_aircraft(task).get()]
    }

    /// Returns the earliest allowed start of the specified task (the
    /// arrival of its owning aircraft).
    #[inline]
    pub fn task_release(&self, task: TaskIndex) -> T {
        self.aircraft_windows[self.task_aircraft(task).get()].start()
    }

    /// Returns the latest allowed end of the specified task (the departure
    /// of its owning aircraft).
    #[inline]
    pub fn task_deadline(&self, task: TaskIndex) -> T {
        self.aircraft_windows[self.task_aircraft(task).get()].end()
    }

    /// Returns the ground window of the specified aircraft.
    #[inline]
    pub fn aircraft_window(&self, aircraft: AircraftIndex) -> ClosedOpenInterval<T> {
        debug_assert!(
            aircraft.get() < self.num_aircraft(),
            "called `Model::aircraft_window` with aircraft index out of bounds: the len is {} but the index is {}",
            self.num_aircraft(),
            aircraft.get()
        );
        self.aircraft_windows[aircraft.get()]
    }

    /// Returns the parking stand of the specified aircraft.
    #[inline]
    pub fn aircraft_parking(&self, aircraft: AircraftIndex) -> ParkingIndex {
        debug_assert!(
            aircraft.get() < self.num_aircraft(),
            "called `Model::aircraft_parking` with aircraft index out of bounds: the len is {} but the index is {}",
            self.num_aircraft(),
            aircraft.get()
        );
        self.aircraft_parkings[aircraft.get()]
    }

    /// Returns the base parking stand of the specified vehicle.
    #[inline]
    pub fn vehicle_base_parking(&self, vehicle: VehicleIndex) -> ParkingIndex {
        debug_assert!(
            vehicle.get() < self.num_vehicles(),
            "called `Model::vehicle_base_parking` with vehicle index out of bounds: the len is {} but the index is {}",
            self.num_vehicles(),
            vehicle.get()
        );
        self.vehicle_base_parkings[vehicle.get()]
    }

    /// Returns `true` if the specified vehicle can serve the specified task.
    #[inline]
    pub fn is_compatible(&self, task: TaskIndex, vehicle: VehicleIndex) -> bool {
        debug_assert!(task.get() < self.num_tasks());
        debug_assert!(vehicle.get() < self.num_vehicles());
        self.compatibility
            .contains(compat_index(self.num_vehicles(), task, vehicle))
    }

    /// Returns `true` if the specified vehicle can serve the specified task
    /// without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `task` is in `0..num_tasks()` and
    /// `vehicle` is in `0..num_vehicles()`.
    #[inline]
    pub unsafe fn is_compatible_unchecked(&self, task: TaskIndex, vehicle: VehicleIndex) -> bool {
        debug_assert!(task.get() < self.num_tasks());
        debug_assert!(vehicle.get() < self.num_vehicles());
        unsafe {
            self.compatibility
                .contains_unchecked(compat_index(self.num_vehicles(), task, vehicle))
        }
    }

    /// Returns the number of vehicles able to serve the specified task.
    #[inline]
    pub fn compatible_count(&self, task: TaskIndex) -> usize {
        debug_assert!(
            task.get() < self.num_tasks(),
            "called `Model::compatible_count` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks(),
            task.get()
        );
        self.compatible_counts[task.get()]
    }

    /// Returns the travel time between two parking stands.
    #[inline]
    pub fn travel_time(&self, from: ParkingIndex, to: ParkingIndex) -> T {
        debug_assert!(from.get() < self.num_parkings);
        debug_assert!(to.get() < self.num_parkings);
        self.travel_times[travel_index(self.num_parkings, from, to)]
    }

    /// Returns the travel time between two parking stands without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that both indices are in `0..num_parkings()`.
    #[inline]
    pub unsafe fn travel_time_unchecked(&self, from: ParkingIndex, to: ParkingIndex) -> T {
        debug_assert!(from.get() < self.num_parkings);
        debug_assert!(to.get() < self.num_parkings);
        unsafe {
            *self
                .travel_times
                .get_unchecked(travel_index(self.num_parkings, from, to))
        }
    }

    /// Returns the identifier of the specified task.
    #[inline]
    pub fn task_id(&self, task: TaskIndex) -> &str {
        &self.task_ids[task.get()]
    }

    /// Returns the identifier of the specified vehicle.
    #[inline]
    pub fn vehicle_id(&self, vehicle: VehicleIndex) -> &str {
        &self.vehicle_ids[vehicle.get()]
    }

    /// Returns the identifier of the specified aircraft.
    #[inline]
    pub fn aircraft_id(&self, aircraft: AircraftIndex) -> &str {
        &self.aircraft_ids[aircraft.get()]
    }

    /// Returns the identifier of the specified parking stand.
    #[inline]
    pub fn parking_id(&self, parking: ParkingIndex) -> &str {
        &self.parking_ids[parking.get()]
    }

    /// Returns an iterator over the vehicles able to serve the specified task.
    #[inline]
    pub fn compatible_vehicles(
        &self,
        task: TaskIndex,
    ) -> impl Iterator<Item = VehicleIndex> + '_ {
        let num_vehicles = self.num_vehicles();
        (0..num_vehicles)
            .map(VehicleIndex::new)
            .filter(move |&v| self.is_compatible(task, v))
    }
}

impl<T> std::fmt::Display for Model<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(tasks: {}, vehicles: {}, aircraft: {}, parkings: {})",
            self.num_tasks(),
            self.num_vehicles(),
            self.num_aircraft(),
            self.num_parkings()
        )
    }
}

/// Internal per-task record kept by the builder until validation.
#[derive(Clone, Debug)]
struct TaskEntry<T> {
    id: String,
    aircraft: AircraftIndex,
    duration: T,
    required_type: usize,
    predecessor: Option<TaskIndex>,
}

/// Internal per-vehicle record kept by the builder until validation.
#[derive(Clone, Debug)]
struct VehicleEntry {
    id: String,
    base_parking: ParkingIndex,
    capability_types: Vec<usize>,
}

/// A mutable builder assembling a scheduling instance entity by entity.
///
/// Capability tags are interned to small integers on the fly; travel times
/// start out undefined except for the zero self-distances and must be
/// supplied for every pair of parking stands referenced by aircraft or
/// vehicle bases. `build` runs the full validation described in the module
/// documentation and returns the immutable `Model`.
#[derive(Clone, Debug, Default)]
pub struct ModelBuilder<T> {
    parking_ids: Vec<String>,
    aircraft: Vec<(String, ParkingIndex, T, T)>,
    tasks: Vec<TaskEntry<T>>,
    vehicles: Vec<VehicleEntry>,
    travel_times: Vec<(ParkingIndex, ParkingIndex, T)>,
    type_names: Vec<String>,
}

impl<T> ModelBuilder<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new, empty builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            parking_ids: Vec::new(),
            aircraft: Vec::new(),
            tasks: Vec::new(),
            vehicles: Vec::new(),
            travel_times: Vec::new(),
            type_names: Vec::new(),
        }
    }

    /// Registers a parking stand and returns its index.
    pub fn add_parking<S: Into<String>>(&mut self, id: S) -> ParkingIndex {
        let index = ParkingIndex::new(self.parking_ids.len());
        self.parking_ids.push(id.into());
        index
    }

    /// Registers an aircraft with its stand and ground window.
    pub fn add_aircraft<S: Into<String>>(
        &mut self,
        id: S,
        parking: ParkingIndex,
        arrival: T,
        departure: T,
    ) -> AircraftIndex {
        let index = AircraftIndex::new(self.aircraft.len());
        self.aircraft.push((id.into(), parking, arrival, departure));
        index
    }

    /// Registers a task on an aircraft requiring the given capability tag.
    pub fn add_task<S: Into<String>>(
        &mut self,
        id: S,
        aircraft: AircraftIndex,
        duration: T,
        required_type: &str,
    ) -> TaskIndex {
        let type_id = self.intern_type(required_type);
        let index = TaskIndex::new(self.tasks.len());
        self.tasks.push(TaskEntry {
            id: id.into(),
            aircraft,
            duration,
            required_type: type_id,
            predecessor: None,
        });
        index
    }

    /// Declares that `task` may only start after `predecessor` has finished.
    pub fn set_predecessor(&mut self, task: TaskIndex, predecessor: TaskIndex) -> &mut Self {
        self.tasks[task.get()].predecessor = Some(predecessor);
        self
    }

    /// Registers a vehicle with its capability tags and base parking stand.
    pub fn add_vehicle<S: Into<String>>(
        &mut self,
        id: S,
        capability_types: &[&str],
        base_parking: ParkingIndex,
    ) -> VehicleIndex {
        let types = capability_types
            .iter()
            .map(|&t| self.intern_type(t))
            .collect();
        let index = VehicleIndex::new(self.vehicles.len());
        self.vehicles.push(VehicleEntry {
            id: id.into(),
            base_parking,
            capability_types: types,
        });
        index
    }

    /// Sets the travel time between two parking stands.
    pub fn set_travel_time(
        &mut self,
        from: ParkingIndex,
        to: ParkingIndex,
        travel_time: T,
    ) -> &mut Self {
        self.travel_times.push((from, to, travel_time));
        self
    }

    fn intern_type(&mut self, name: &str) -> usize {
        match self.type_names.iter().position(|t| t == name) {
            Some(index) => index,
            None => {
                self.type_names.push(name.to_string());
                self.type_names.len() - 1
            }
        }
    }

    /// Validates the assembled instance and returns the immutable model.
    pub fn build(self) -> Result<Model<T>, ModelError> {
        let num_parkings = self.parking_ids.len();
        let num_tasks = self.tasks.len();
        let num_vehicles = self.vehicles.len();

        // Travel matrix: zero self-distances, everything else undefined
        // until set. A sentinel marks missing entries; valid travel times
        // are non-negative, so the sentinel can never collide.
        let mut travel = vec![None; num_parkings * num_parkings];
        for p in 0..num_parkings {
            let parking = ParkingIndex::new(p);
            travel[travel_index(num_parkings, parking, parking)] = Some(T::zero());
        }
        for &(from, to, time) in &self.travel_times {
            if time < T::zero() {
                return Err(ModelError::NegativeTravelTime {
                    from_id: self.parking_ids[from.get()].clone(),
                    to_id: self.parking_ids[to.get()].clone(),
                });
            }
            if from == to && !time.is_zero() {
                return Err(ModelError::NonZeroSelfTravel {
                    parking_id: self.parking_ids[from.get()].clone(),
                });
            }
            travel[travel_index(num_parkings, from, to)] = Some(time);
        }

        // Every parking referenced by an aircraft or a vehicle base must be
        // reachable from every other referenced parking, in both directions.
        let mut referenced = vec![false; num_parkings];
        for &(_, parking, _, _) in &self.aircraft {
            referenced[parking.get()] = true;
        }
        for vehicle in &self.vehicles {
            referenced[vehicle.base_parking.get()] = true;
        }
        for from in 0..num_parkings {
            if !referenced[from] {
                continue;
            }
            for to in 0..num_parkings {
                if !referenced[to] {
                    continue;
                }
                let from_index = ParkingIndex::new(from);
                let to_index = ParkingIndex::new(to);
                if travel[travel_index(num_parkings, from_index, to_index)].is_none() {
                    return Err(ModelError::MissingTravelTime {
                        from_id: self.parking_ids[from].clone(),
                        to_id: self.parking_ids[to].clone(),
                    });
                }
            }
        }

        // Ground windows must be non-empty.
        for (id, _, arrival, departure) in &self.aircraft {
            if arrival >= departure {
                return Err(ModelError::EmptyTurnaroundWindow {
                    aircraft_id: id.clone(),
                });
            }
        }

        // Task durations must be strictly positive.
        for task in &self.tasks {
            if task.duration <= T::zero() {
                return Err(ModelError::NonPositiveDuration {
                    task_id: task.id.clone(),
                });
            }
        }

        // Predecessors must stay within the owning aircraft and must not
        // form cycles. Each task has at most one predecessor, so a cycle
        // shows up as a pointer walk revisiting its origin.
        for (index, task) in self.tasks.iter().enumerate() {
            if let Some(predecessor) = task.predecessor {
                let pred_entry = &self.tasks[predecessor.get()];
                if pred_entry.aircraft != task.aircraft {
                    return Err(ModelError::PredecessorAircraftMismatch {
                        task_id: task.id.clone(),
                        predecessor_id: pred_entry.id.clone(),
                    });
                }

                let mut cursor = task.predecessor;
                let mut steps = 0usize;
                while let Some(current) = cursor {
                    if current.get() == index || steps > num_tasks {
                        return Err(ModelError::CyclicPrecedence {
                            task_id: task.id.clone(),
                        });
                    }
                    cursor = self.tasks[current.get()].predecessor;
                    steps += 1;
                }
            }
        }

        // Compatibility: each task must be serveable by at least one vehicle.
        let mut compatibility = FixedBitSet::with_capacity(num_tasks * num_vehicles);
        let mut compatible_counts = vec![0usize; num_tasks];
        for (t, task) in self.tasks.iter().enumerate() {
            for (v, vehicle) in self.vehicles.iter().enumerate() {
                if vehicle.capability_types.contains(&task.required_type) {
                    compatibility.insert(t * num_vehicles + v);
                    compatible_counts[t] += 1;
                }
            }
            if compatible_counts[t] == 0 {
                return Err(ModelError::NoCompatibleVehicle {
                    task_id: task.id.clone(),
                });
            }
        }

        // Window feasibility per task, without precedence interaction;
        // chained windows are the propagation engine's concern.
        for task in &self.tasks {
            let &(_, _, arrival, departure) = &self.aircraft[task.aircraft.get()];
            if arrival + task.duration > departure {
                return Err(ModelError::InfeasibleWindow {
                    task_id: task.id.clone(),
                });
            }
        }

        let travel_times = travel
            .into_iter()
            .map(|entry| entry.unwrap_or_else(T::zero))
            .collect();

        Ok(Model {
            task_durations: self.tasks.iter().map(|t| t.duration).collect(),
            task_aircraft: self.tasks.iter().map(|t| t.aircraft).collect(),
            task_predecessors: self.tasks.iter().map(|t| t.predecessor).collect(),
            aircraft_windows: self
                .aircraft
                .iter()
                .map(|&(_, _, arrival, departure)| ClosedOpenInterval::new(arrival, departure))
                .collect(),
            aircraft_parkings: self.aircraft.iter().map(|&(_, p, _, _)| p).collect(),
            vehicle_base_parkings: self.vehicles.iter().map(|v| v.base_parking).collect(),
            compatibility,
            compatible_counts,
            travel_times,
            num_parkings,
            task_ids: self.tasks.into_iter().map(|t| t.id).collect(),
            vehicle_ids: self.vehicles.into_iter().map(|v| v.id).collect(),
            aircraft_ids: self.aircraft.into_iter().map(|(id, _, _, _)| id).collect(),
            parking_ids: self.parking_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    fn two_stand_builder() -> (ModelBuilder<IntegerType>, ParkingIndex, ParkingIndex) {
        let mut builder = ModelBuilder::new();
        let p1 = builder.add_parking("P1");
        let p2 = builder.add_parking("P2");
        builder.set_travel_time(p1, p2, 5);
        builder.set_travel_time(p2, p1, 5);
        (builder, p1, p2)
    }

    #[test]
    fn test_build_valid_model() {
        let (mut builder, p1, p2) = two_stand_builder();
        let ac = builder.add_aircraft("AC1", p1, 0, 100);
        let t1 = builder.add_task("T1", ac, 10, "fuel");
        let t2 = builder.add_task("T2", ac, 5, "clean");
        builder.set_predecessor(t2, t1);
        let v1 = builder.add_vehicle("V1", &["fuel"], p2);
        let v2 = builder.add_vehicle("V2", &["clean", "fuel"], p1);

        let model = builder.build().expect("model should build");
        assert_eq!(model.num_tasks(), 2);
        assert_eq!(model.num_vehicles(), 2);
        assert_eq!(model.task_duration(t1), 10);
        assert_eq!(model.task_parking(t1), p1);
        assert_eq!(model.task_release(t2), 0);
        assert_eq!(model.task_deadline(t2), 100);
        assert_eq!(model.task_predecessor(t2), Some(t1));
        assert_eq!(model.travel_time(p1, p2), 5);
        assert_eq!(model.travel_time(p1, p1), 0);
        assert!(model.is_compatible(t1, v1));
        assert!(model.is_compatible(t1, v2));
        assert!(!model.is_compatible(t2, v1));
        assert_eq!(model.compatible_count(t1), 2);
        assert_eq!(model.compatible_count(t2), 1);
        assert_eq!(model.task_id(t1), "T1");
        assert_eq!(model.vehicle_id(v2), "V2");
    }

    #[test]
    fn test_no_compatible_vehicle_is_rejected() {
        let (mut builder, p1, _) = two_stand_builder();
        let ac = builder.add_aircraft("AC1", p1, 0, 100);
        builder.add_task("T1", ac, 10, "deice");
        builder.add_vehicle("V1", &["fuel"], p1);

        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), ModelErrorKind::NoCompatibleVehicle);
        assert!(matches!(err, ModelError::NoCompatibleVehicle { task_id } if task_id == "T1"));
    }

    #[test]
    fn test_infeasible_window_is_rejected() {
        let (mut builder, p1, _) = two_stand_builder();
        let ac = builder.add_aircraft("AC1", p1, 0, 8);
        builder.add_task("T1", ac, 10, "fuel");
        builder.add_vehicle("V1", &["fuel"], p1);

        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), ModelErrorKind::InfeasibleWindow);
    }

    #[test]
    fn test_cyclic_precedence_is_rejected() {
        let (mut builder, p1, _) = two_stand_builder();
        let ac = builder.add_aircraft("AC1", p1, 0, 100);
        let t1 = builder.add_task("T1", ac, 5, "fuel");
        let t2 = builder.add_task("T2", ac, 5, "fuel");
        builder.set_predecessor(t1, t2);
        builder.set_predecessor(t2, t1);
        builder.add_vehicle("V1", &["fuel"], p1);

        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), ModelErrorKind::InvalidInstance);
        assert!(matches!(err, ModelError::CyclicPrecedence { .. }));
    }

    #[test]
    fn test_cross_aircraft_predecessor_is_rejected() {
        let (mut builder, p1, p2) = two_stand_builder();
        let ac1 = builder.add_aircraft("AC1", p1, 0, 100);
        let ac2 = builder.add_aircraft("AC2", p2, 0, 100);
        let t1 = builder.add_task("T1", ac1, 5, "fuel");
        let t2 = builder.add_task("T2", ac2, 5, "fuel");
        builder.set_predecessor(t2, t1);
        builder.add_vehicle("V1", &["fuel"], p1);

        let err = builder.build().unwrap_err();
        assert!(matches!(err, ModelError::PredecessorAircraftMismatch { .. }));
    }

    #[test]
    fn test_missing_travel_time_is_rejected() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p1 = builder.add_parking("P1");
        let p2 = builder.add_parking("P2");
        builder.set_travel_time(p1, p2, 3);
        // p2 -> p1 deliberately left undefined.
        let ac = builder.add_aircraft("AC1", p1, 0, 100);
        builder.add_task("T1", ac, 5, "fuel");
        builder.add_vehicle("V1", &["fuel"], p2);

        let err = builder.build().unwrap_err();
        assert!(matches!(err, ModelError::MissingTravelTime { .. }));
    }

    #[test]
    fn test_negative_travel_time_is_rejected() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p1 = builder.add_parking("P1");
        let p2 = builder.add_parking("P2");
        builder.set_travel_time(p1, p2, -1);
        builder.set_travel_time(p2, p1, 1);
        let ac = builder.add_aircraft("AC1", p1, 0, 100);
        builder.add_task("T1", ac, 5, "fuel");
        builder.add_vehicle("V1", &["fuel"], p2);

        let err = builder.build().unwrap_err();
        assert!(matches!(err, ModelError::NegativeTravelTime { .. }));
    }

    #[test]
    fn test_empty_window_is_rejected() {
        let (mut builder, p1, _) = two_stand_builder();
        builder.add_aircraft("AC1", p1, 50, 50);
        let err = builder.build().unwrap_err();
        assert!(matches!(err, ModelError::EmptyTurnaroundWindow { .. }));
    }

    #[test]
    fn test_non_positive_duration_is_rejected() {
        let (mut builder, p1, _) = two_stand_builder();
        let ac = builder.add_aircraft("AC1", p1, 0, 100);
        builder.add_task("T1", ac, 0, "fuel");
        builder.add_vehicle("V1", &["fuel"], p1);

        let err = builder.build().unwrap_err();
        assert!(matches!(err, ModelError::NonPositiveDuration { .. }));
    }

    #[test]
    fn test_asymmetric_travel_times_are_allowed() {
        let mut builder = ModelBuilder::<IntegerType>::new();
        let p1 = builder.add_parking("P1");
        let p2 = builder.add_parking("P2");
        builder.set_travel_time(p1, p2, 3);
        builder.set_travel_time(p2, p1, 9);
        let ac = builder.add_aircraft("AC1", p1, 0, 100);
        builder.add_task("T1", ac, 5, "fuel");
        builder.add_vehicle("V1", &["fuel"], p2);

        let model = builder.build().expect("asymmetric matrix should build");
        assert_eq!(model.travel_time(p1, p2), 3);
        assert_eq!(model.travel_time(p2, p1), 9);
    }
}
