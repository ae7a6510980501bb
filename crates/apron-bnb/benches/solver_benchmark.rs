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

use apron_bnb::bnb::BnbSolver;
use apron_bnb::branching::most_constrained::MostConstrainedBuilder;
use apron_bnb::eval::workload::WorkloadEvaluator;
use apron_bnb::monitor::no_op::NoOperationMonitor;
use apron_model::index::AircraftIndex;
use apron_model::model::{Model, ModelBuilder};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

type IntegerType = i64;

/// A mid-size turnaround wave: three aircraft on distinct stands, four
/// tasks each (with one precedence per aircraft), and four vehicles over
/// two capability types.
fn build_wave() -> Model<IntegerType> {
    let mut builder = ModelBuilder::new();

    let stands: Vec<_> = (0..4).map(|i| builder.add_parking(format!("P{}", i))).collect();
    for (i, &from) in stands.iter().enumerate() {
        for (j, &to) in stands.iter().enumerate() {
            if i != j {
                builder.set_travel_time(from, to, ((i + 2 * j) % 5) as IntegerType + 1);
            }
        }
    }

    let mut aircraft: Vec<AircraftIndex> = Vec::new();
    for i in 0..3 {
        let arrival = (i as IntegerType) * 15;
        aircraft.push(builder.add_aircraft(
            format!("AC{}", i),
            stands[i],
            arrival,
            arrival + 120,
        ));
    }

    for (i, &ac) in aircraft.iter().enumerate() {
        let stairs = builder.add_task(format!("deboard{}", i), ac, 8, "stairs");
        let clean = builder.add_task(format!("clean{}", i), ac, 12, "cleaning");
        builder.add_task(format!("fuel{}", i), ac, 10, "fuel");
        builder.add_task(format!("board{}", i), ac, 9, "stairs");
        builder.set_predecessor(clean, stairs);
    }

    builder.add_vehicle("stairs-1", &["stairs"], stands[3]);
    builder.add_vehicle("stairs-2", &["stairs"], stands[3]);
    builder.add_vehicle("clean-1", &["cleaning"], stands[3]);
    builder.add_vehicle("fuel-1", &["fuel"], stands[3]);

    builder.build().expect("benchmark model is valid")
}

fn bench_solver(c: &mut Criterion) {
    let model = build_wave();

    c.bench_function("bnb_turnaround_wave", |b| {
        b.iter(|| {
            let mut solver =
                BnbSolver::preallocated(model.num_vehicles(), model.num_tasks());
            let mut policy =
                MostConstrainedBuilder::preallocated(model.num_vehicles(), model.num_tasks());
            let mut evaluator = WorkloadEvaluator::for_model(&model);
            let outcome = solver.solve(
                black_box(&model),
                &mut policy,
                &mut evaluator,
                NoOperationMonitor::new(),
            );
            black_box(outcome)
        })
    });
}

criterion_group!(benches, bench_solver);
criterion_main!(benches);
