//! Output Formatting
//!
//! Human-readable output for the terminal:
//! - Validation results with status icons (✓/✗)
//! - Benchmark results through the benchmark's presenter
//! - Registered algorithms and benchmark options

use sortbench_core::{
    BenchOption, BenchmarkRun, FIXTURE_COUNT, FixtureOutcome, ValidationReport,
};
use sortbench_report::presenter_for;

/// Format a validation pass
pub fn format_validation(report: &ValidationReport) -> String {
    let mut output = String::new();

    output.push_str("Validation\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for instance in &report.instances {
        let icon = if instance.passed() { "✓" } else { "✗" };
        output.push_str(&format!(
            "  {} {} {} ({}/{})\n",
            icon,
            instance.id,
            instance.name,
            instance.fixtures_passed(),
            FIXTURE_COUNT
        ));

        for (fixture, outcome) in &instance.outcomes {
            match outcome {
                FixtureOutcome::Passed => {}
                FixtureOutcome::Unordered => {
                    output.push_str(&format!("      {}: unordered output\n", fixture.name()));
                }
                FixtureOutcome::Panicked { message } => {
                    output.push_str(&format!("      {}: panicked: {}\n", fixture.name(), message));
                }
            }
        }
    }

    let summary = report.summary();
    output.push_str(&format!(
        "\n{} passed, {} failed\n",
        summary.passed, summary.failed
    ));
    output
}

/// Format a completed run for human-readable terminal display
pub fn format_human_output(run: &BenchmarkRun, validation: Option<&ValidationReport>) -> String {
    let mut output = String::new();

    output.push('\n');
    if let Some(validation) = validation {
        output.push_str(&format_validation(validation));
        output.push('\n');
    }

    output.push_str(&format!("{} Results\n", run.benchmark));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    if !run.options.is_empty() {
        let options: Vec<String> = run
            .options
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        output.push_str(&format!("Options: {}\n", options.join(", ")));
    }
    output.push('\n');

    if run.results.is_empty() {
        output.push_str("  No validated algorithms to benchmark.\n");
    }

    let presenter = presenter_for(run);
    for result in &run.results {
        output.push_str(&format!("  {} {}\n", result.id, result.name));
        for line in presenter.present(result) {
            output.push_str(&format!("      {}\n", line));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Total: {:.2} ms, {} algorithm(s)\n",
        run.total_duration_ms,
        run.results.len()
    ));
    output
}

/// Format the registered algorithms and benchmarks
pub fn format_listing(algorithms: &[&str], benchmarks: &[(&str, Vec<BenchOption>)]) -> String {
    let mut output = String::new();

    output.push_str("Algorithms:\n");
    for name in algorithms {
        output.push_str(&format!("├── {}\n", name));
    }
    output.push_str(&format!("{} algorithms registered.\n\n", algorithms.len()));

    output.push_str("Benchmarks:\n");
    for (name, options) in benchmarks {
        output.push_str(&format!("├── {}\n", name));
        for option in options {
            let min = option
                .min
                .map(|m| format!(", min {}", m))
                .unwrap_or_default();
            let max = option
                .max
                .map(|m| format!(", max {}", m))
                .unwrap_or_default();
            output.push_str(&format!(
                "│   ├── {} (default {}{}{}) {}\n",
                option.name, option.default, min, max, option.description
            ));
        }
    }
    output
}
