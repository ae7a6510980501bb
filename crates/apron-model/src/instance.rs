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

//! The ingestion boundary of the scheduling core.
//!
//! External loaders (CSV readers, services, test fixtures) hand over plain
//! records with string identifiers; `Instance::into_model` interns the
//! identifiers into typed indices and delegates semantic validation to the
//! `ModelBuilder`. Referential errors (unknown or duplicate identifiers)
//! are caught here, where the offending strings are still at hand.
//!
//! No file I/O happens in this crate; parsing lives with the caller.

use crate::model::{Model, ModelBuilder, ModelError};
use num_traits::{PrimInt, Signed};
use rustc_hash::FxHashMap;

/// One aircraft as delivered by ingestion.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AircraftRecord<T> {
    pub id: String,
    pub parking: String,
    pub arrival_time: T,
    pub departure_time: T,
}

/// One ground-handling task as delivered by ingestion.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskRecord<T> {
    pub id: String,
    pub aircraft_id: String,
    pub duration: T,
    pub required_type: String,
    /// Identifier of the task that must finish first, if any.
    pub predecessor: Option<String>,
}

/// One ground-support vehicle as delivered by ingestion.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleRecord {
    pub id: String,
    /// Capability tags; the vehicle can serve any task requiring one of them.
    pub types: Vec<String>,
    pub base_parking: String,
}

/// One directed travel-time entry between two parking stands.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelTimeRecord<T> {
    pub from: String,
    pub to: String,
    pub travel_time: T,
}

/// A complete scheduling instance at the ingestion boundary.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance<T> {
    pub aircraft: Vec<AircraftRecord<T>>,
    pub tasks: Vec<TaskRecord<T>>,
    pub vehicles: Vec<VehicleRecord>,
    pub travel_times: Vec<TravelTimeRecord<T>>,
}

impl<T> Instance<T>
where
    T: PrimInt + Signed,
{
    /// Interns all identifiers and builds the validated `Model`.
    pub fn into_model(self) -> Result<Model<T>, ModelError> {
        let mut builder = ModelBuilder::new();

        // Parking stands come into existence by being mentioned anywhere.
        let mut parkings = FxHashMap::default();
        let mut parking_index = |builder: &mut ModelBuilder<T>, id: &str| {
            *parkings
                .entry(id.to_string())
                .or_insert_with(|| builder.add_parking(id))
        };

        for record in &self.travel_times {
            let from = parking_index(&mut builder, &record.from);
            let to = parking_index(&mut builder, &record.to);
            builder.set_travel_time(from, to, record.travel_time);
        }

        let mut aircraft = FxHashMap::default();
        for record in &self.aircraft {
            let parking = parking_index(&mut builder, &record.parking);
            let index = builder.add_aircraft(
                record.id.clone(),
                parking,
                record.arrival_time,
                record.departure_time,
            );
            if aircraft.insert(record.id.clone(), index).is_some() {
                return Err(ModelError::DuplicateIdentifier {
                    identifier: record.id.clone(),
                });
            }
        }

        let mut vehicles = FxHashMap::default();
        for record in &self.vehicles {
            let base = parking_index(&mut builder, &record.base_parking);
            let types: Vec<&str> = record.types.iter().map(String::as_str).collect();
            let index = builder.add_vehicle(record.id.clone(), &types, base);
            if vehicles.insert(record.id.clone(), index).is_some() {
                return Err(ModelError::DuplicateIdentifier {
                    identifier: record.id.clone(),
                });
            }
        }

        let mut tasks = FxHashMap::default();
        for record in &self.tasks {
            let aircraft_index = *aircraft.get(&record.aircraft_id).ok_or_else(|| {
                ModelError::UnknownAircraft {
                    task_id: record.id.clone(),
                    aircraft_id: record.aircraft_id.clone(),
                }
            })?;
            let index = builder.add_task(
                record.id.clone(),
                aircraft_index,
                record.duration,
                &record.required_type,
            );
            if tasks.insert(record.id.clone(), index).is_some() {
                return Err(ModelError::DuplicateIdentifier {
                    identifier: record.id.clone(),
                });
            }
        }

        // Predecessors are resolved in a second pass so that forward
        // references between task records are legal.
        for record in &self.tasks {
            if let Some(predecessor_id) = &record.predecessor {
                let task_index = tasks[&record.id];
                let predecessor_index = *tasks.get(predecessor_id).ok_or_else(|| {
                    ModelError::UnknownPredecessor {
                        task_id: record.id.clone(),
                        predecessor_id: predecessor_id.clone(),
                    }
                })?;
                builder.set_predecessor(task_index, predecessor_index);
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelErrorKind;

    type IntegerType = i64;

    fn small_instance() -> Instance<IntegerType> {
        Instance {
            aircraft: vec![AircraftRecord {
                id: "AC1".into(),
                parking: "P1".into(),
                arrival_time: 0,
                departure_time: 60,
            }],
            tasks: vec![
                TaskRecord {
                    id: "deboard".into(),
                    aircraft_id: "AC1".into(),
                    duration: 10,
                    required_type: "stairs".into(),
                    predecessor: None,
                },
                TaskRecord {
                    id: "clean".into(),
                    aircraft_id: "AC1".into(),
                    duration: 15,
                    required_type: "cleaning".into(),
                    predecessor: Some("deboard".into()),
                },
            ],
            vehicles: vec![
                VehicleRecord {
                    id: "V1".into(),
                    types: vec!["stairs".into()],
                    base_parking: "DEPOT".into(),
                },
                VehicleRecord {
                    id: "V2".into(),
                    types: vec!["cleaning".into()],
                    base_parking: "DEPOT".into(),
                },
            ],
            travel_times: vec![
                TravelTimeRecord {
                    from: "DEPOT".into(),
                    to: "P1".into(),
                    travel_time: 3,
                },
                TravelTimeRecord {
                    from: "P1".into(),
                    to: "DEPOT".into(),
                    travel_time: 3,
                },
            ],
        }
    }

    #[test]
    fn test_into_model_resolves_identifiers() {
        let model = small_instance().into_model().expect("instance is valid");
        assert_eq!(model.num_tasks(), 2);
        assert_eq!(model.num_vehicles(), 2);
        assert_eq!(model.num_aircraft(), 1);
        assert_eq!(model.num_parkings(), 2);

        let deboard = crate::index::TaskIndex::new(0);
        let clean = crate::index::TaskIndex::new(1);
        assert_eq!(model.task_id(deboard), "deboard");
        assert_eq!(model.task_predecessor(clean), Some(deboard));
        assert_eq!(model.compatible_count(deboard), 1);
    }

    #[test]
    fn test_unknown_aircraft_reference() {
        let mut instance = small_instance();
        instance.tasks[0].aircraft_id = "GHOST".into();
        let err = instance.into_model().unwrap_err();
        assert_eq!(err.kind(), ModelErrorKind::InvalidInstance);
        assert!(matches!(err, ModelError::UnknownAircraft { .. }));
    }

    #[test]
    fn test_unknown_predecessor_reference() {
        let mut instance = small_instance();
        instance.tasks[1].predecessor = Some("GHOST".into());
        let err = instance.into_model().unwrap_err();
        assert!(matches!(err, ModelError::UnknownPredecessor { .. }));
    }

    #[test]
    fn test_duplicate_task_identifier() {
        let mut instance = small_instance();
        let mut duplicate = instance.tasks[0].clone();
        duplicate.predecessor = None;
        instance.tasks.push(duplicate);
        let err = instance.into_model().unwrap_err();
        assert!(matches!(err, ModelError::DuplicateIdentifier { .. }));
    }

    #[test]
    fn test_forward_predecessor_reference_is_legal() {
        let mut instance = small_instance();
        instance.tasks.swap(0, 1);
        let model = instance.into_model().expect("forward reference resolves");
        assert_eq!(model.num_tasks(), 2);
    }
}
