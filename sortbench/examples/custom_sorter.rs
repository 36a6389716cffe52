//! Sortbench Custom Algorithm Demo
//!
//! Registers a user-defined algorithm next to the built-ins, validates the
//! pool and prints the Deviation Benchmark results.
//!
//! Run with:
//!   cargo run --example custom_sorter
//!   cargo run --example custom_sorter -- 20000 10    # array size, iterations

use sortbench::prelude::*;
use sortbench::{ResultTable, default_harness, generate_csv_report, presenter_for};

/// Insertion sort with a reusable output buffer
#[derive(Default)]
struct InsertionSort {
    buffer: Vec<i32>,
}

impl Sorter for InsertionSort {
    fn sort(&mut self, input: Vec<i32>) -> Vec<i32> {
        self.buffer.clear();
        for value in input {
            let at = self.buffer.partition_point(|&x| x <= value);
            self.buffer.insert(at, value);
        }
        self.buffer.clone()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let array_size: f64 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(10_000.0);
    let iterations: f64 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(20.0);

    let mut harness = default_harness(Some(2024));
    harness.register(AlgorithmDescriptor::of::<InsertionSort>("InsertionSort"));
    harness.instantiate_all_into_pool();

    let report = harness.validate();
    for instance in &report.instances {
        println!("{} {}: {:?}", instance.id, instance.name, instance.state);
    }

    let Some(run) = harness.execute_by_name(
        DeviationBenchmark::NAME,
        &[("array-size", array_size), ("iterations", iterations)],
    )?
    else {
        return Ok(());
    };

    let presenter = presenter_for(run);
    for result in &run.results {
        println!("\n{}", result.name);
        for line in presenter.present(result) {
            println!("  {}", line);
        }
    }

    println!("\n{}", generate_csv_report(&ResultTable::from_run(run))?);
    Ok(())
}
