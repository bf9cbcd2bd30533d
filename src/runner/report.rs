//! Result reporting and output.
//!
//! Handles all user-facing output for suite runs: colored PASS/FAIL lines,
//! failure detail with expected/actual diffs, and a JSON export for
//! machine consumption.

use std::io::Write;

use difference::{Changeset, Difference};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::errors::{invalid_operation, AttestResult};

use super::{RunConfig, TestResult, GREEN, RED, YELLOW};

/// Summary counts across one suite run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
}

/// Partition test results by outcome type.
pub fn summarize(results: &[TestResult]) -> RunSummary {
    RunSummary {
        total: results.len(),
        passed: results
            .iter()
            .filter(|r| matches!(r, TestResult::Pass { .. }))
            .count(),
        failed: results
            .iter()
            .filter(|r| matches!(r, TestResult::Fail { .. }))
            .count(),
        errored: results
            .iter()
            .filter(|r| matches!(r, TestResult::Error { .. }))
            .count(),
        skipped: results
            .iter()
            .filter(|r| matches!(r, TestResult::Skipped { .. }))
            .count(),
    }
}

/// Print comprehensive run results with colored output.
pub fn report_results(results: &[TestResult], config: &RunConfig) -> RunSummary {
    for result in results {
        match result {
            TestResult::Pass { suite, name } => {
                println!("{}: {} [{}]", config.colorize("PASS", GREEN), name, suite)
            }
            TestResult::Fail { .. } | TestResult::Error { .. } => print_failure(result, config),
            TestResult::Skipped {
                suite,
                name,
                reason,
            } => {
                println!(
                    "{}: {} [{}] ({})",
                    config.colorize("SKIP", YELLOW),
                    name,
                    suite,
                    reason
                )
            }
        }
    }

    let summary = summarize(results);
    println!(
        "\nRun summary: total {}, {} {}, {} {}, {} {}, {} {}",
        summary.total,
        config.colorize("passed", GREEN),
        summary.passed,
        config.colorize("failed", RED),
        summary.failed,
        config.colorize("errored", RED),
        summary.errored,
        config.colorize("skipped", YELLOW),
        summary.skipped,
    );

    if summary.failed > 0 || summary.errored > 0 {
        eprintln!("\nUnsuccessful tests:");
        for result in results {
            match result {
                TestResult::Fail { name, .. } | TestResult::Error { name, .. } => {
                    eprintln!("  - {}", name)
                }
                _ => {}
            }
        }
    }
    summary
}

/// Print detailed failure information.
pub fn print_failure(result: &TestResult, config: &RunConfig) {
    match result {
        TestResult::Fail {
            suite,
            name,
            message,
        } => {
            eprintln!("{}: {} [{}]", config.colorize("FAIL", RED), name, suite);
            eprintln!("  Error: {}", message);
            if let Some((expected, actual)) = split_expectation(message) {
                print_diff(expected, actual, config);
            }
        }
        TestResult::Error {
            suite,
            name,
            message,
        } => {
            eprintln!("{}: {} [{}]", config.colorize("ERROR", RED), name, suite);
            eprintln!("  Error: {}", message);
        }
        _ => {}
    }
}

/// Pulls expected/actual out of the standard equality-failure message.
fn split_expectation(message: &str) -> Option<(&str, &str)> {
    let rest = message.strip_prefix("Assertion failed: expected ")?;
    rest.rsplit_once(", got ")
}

/// Print a line-by-line diff of two rendered values.
pub fn print_diff(expected: &str, actual: &str, config: &RunConfig) {
    let choice = if config.use_colors {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    let changeset = Changeset::new(expected, actual, "\n");

    for diff in &changeset.diffs {
        match diff {
            Difference::Same(x) => {
                let _ = stderr.reset();
                let _ = writeln!(stderr, "   {}", x);
            }
            Difference::Add(x) => {
                let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                let _ = writeln!(stderr, "  +{}", x);
            }
            Difference::Rem(x) => {
                let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = writeln!(stderr, "  -{}", x);
            }
        }
    }
    let _ = stderr.reset();
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: RunSummary,
    results: &'a [TestResult],
}

/// Serialize results and their summary as a pretty-printed JSON document.
pub fn results_to_json(results: &[TestResult]) -> AttestResult<String> {
    let report = JsonReport {
        summary: summarize(results),
        results,
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| invalid_operation("serializing results", e.to_string()))
}
