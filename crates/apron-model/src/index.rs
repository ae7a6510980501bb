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

use apron_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for task indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TaskIndexTag;

impl TypedIndexTag for TaskIndexTag {
    const NAME: &'static str = "TaskIndex";
}

/// A typed index for ground-handling tasks.
pub type TaskIndex = TypedIndex<TaskIndexTag>;

/// A tag type for vehicle indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VehicleIndexTag;

impl TypedIndexTag for VehicleIndexTag {
    const NAME: &'static str = "VehicleIndex";
}

/// A typed index for ground-support vehicles.
pub type VehicleIndex = TypedIndex<VehicleIndexTag>;

/// A tag type for parking stand indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ParkingIndexTag;

impl TypedIndexTag for ParkingIndexTag {
    const NAME: &'static str = "ParkingIndex";
}

/// A typed index for parking stands.
pub type ParkingIndex = TypedIndex<ParkingIndexTag>;

/// A tag type for aircraft indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct AircraftIndexTag;

impl TypedIndexTag for AircraftIndexTag {
    const NAME: &'static str = "AircraftIndex";
}

/// A typed index for aircraft.
pub type AircraftIndex = TypedIndex<AircraftIndexTag>;
