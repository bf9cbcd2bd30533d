//! Host runner: explicit registration and synchronous execution.
//!
//! A [`Suite`] is the registration struct that replaces annotation-driven
//! discovery: hook closures per lifecycle phase and a [`TestSpec`] per test,
//! optionally carrying a parameter source. [`run_suite`] executes everything
//! single-threaded, one case at a time to completion, in registration
//! order:
//!
//! 1. before-all hooks
//! 2. per test: before-each → body → after-each (after-each always runs)
//! 3. after-all hooks
//!
//! Outcome taxonomy: a body or hook failing with the assertion kind marks
//! the test **failed**; any other error kind marks it **errored**; a
//! configuration error from case expansion aborts the whole parameterized
//! test before any case runs.

pub mod report;

use serde::Serialize;

use crate::cases::{Case, ParameterSource};
use crate::errors::{AttestError, AttestResult};

// ============================================================================
// REGISTRATION
// ============================================================================

pub type HookFn = Box<dyn Fn() -> AttestResult<()>>;
pub type TestFn = Box<dyn Fn(&Case) -> AttestResult<()>>;

/// One registered test: a name, an optional parameter source, and a body.
pub struct TestSpec {
    name: String,
    source: Option<ParameterSource>,
    skip: bool,
    body: TestFn,
}

impl TestSpec {
    pub fn new(
        name: impl Into<String>,
        body: impl Fn(&Case) -> AttestResult<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            source: None,
            skip: false,
            body: Box::new(body),
        }
    }

    pub fn parameterized(
        name: impl Into<String>,
        source: ParameterSource,
        body: impl Fn(&Case) -> AttestResult<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            source: Some(source),
            skip: false,
            body: Box::new(body),
        }
    }

    /// Marks this test to be reported as skipped instead of run.
    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Lifecycle hooks, one list per phase.
#[derive(Default)]
pub struct Hooks {
    before_all: Vec<HookFn>,
    before_each: Vec<HookFn>,
    after_each: Vec<HookFn>,
    after_all: Vec<HookFn>,
}

/// The explicit-registration configuration a host passes to [`run_suite`].
pub struct Suite {
    name: String,
    hooks: Hooks,
    tests: Vec<TestSpec>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hooks: Hooks::default(),
            tests: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn before_all(mut self, hook: impl Fn() -> AttestResult<()> + 'static) -> Self {
        self.hooks.before_all.push(Box::new(hook));
        self
    }

    pub fn before_each(mut self, hook: impl Fn() -> AttestResult<()> + 'static) -> Self {
        self.hooks.before_each.push(Box::new(hook));
        self
    }

    pub fn after_each(mut self, hook: impl Fn() -> AttestResult<()> + 'static) -> Self {
        self.hooks.after_each.push(Box::new(hook));
        self
    }

    pub fn after_all(mut self, hook: impl Fn() -> AttestResult<()> + 'static) -> Self {
        self.hooks.after_all.push(Box::new(hook));
        self
    }

    pub fn register(mut self, test: TestSpec) -> Self {
        self.tests.push(test);
        self
    }

    pub fn test(
        self,
        name: impl Into<String>,
        body: impl Fn(&Case) -> AttestResult<()> + 'static,
    ) -> Self {
        self.register(TestSpec::new(name, body))
    }

    pub fn parameterized(
        self,
        name: impl Into<String>,
        source: ParameterSource,
        body: impl Fn(&Case) -> AttestResult<()> + 'static,
    ) -> Self {
        self.register(TestSpec::parameterized(name, source, body))
    }
}

// ============================================================================
// RESULTS AND CONFIGURATION
// ============================================================================

/// Represents the outcome of executing a single test case.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TestResult {
    /// Test passed successfully.
    Pass { suite: String, name: String },
    /// A test expectation was not met.
    Fail {
        suite: String,
        name: String,
        message: String,
    },
    /// An unexpected error escaped the test.
    Error {
        suite: String,
        name: String,
        message: String,
    },
    /// Test was not run.
    Skipped {
        suite: String,
        name: String,
        reason: String,
    },
}

/// Configuration for suite execution and reporting.
pub struct RunConfig {
    pub filter: Option<String>,
    pub use_colors: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            filter: None,
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }
}

// Color constants for terminal output
pub(crate) const RESET: &str = "\x1b[0m";
pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const YELLOW: &str = "\x1b[33m";

impl RunConfig {
    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// Helper for test skipping logic.
fn skip_reason(test: &TestSpec, filter: Option<&str>) -> Option<String> {
    if test.skip {
        return Some("Marked 'skip'".to_string());
    }
    if let Some(f) = filter {
        if !test.name.to_lowercase().contains(&f.to_lowercase()) {
            return Some(format!("Filtered out by substring: {}", f));
        }
    }
    None
}

// ============================================================================
// EXECUTION
// ============================================================================

/// Run every registered test of the suite and collect per-case results.
pub fn run_suite(suite: &Suite, config: &RunConfig) -> Vec<TestResult> {
    let mut results = Vec::new();

    if let Err(err) = run_hooks(&suite.hooks.before_all) {
        // Nothing can run; report every runnable test with the hook error.
        for test in &suite.tests {
            results.push(match skip_reason(test, config.filter.as_deref()) {
                Some(reason) => TestResult::Skipped {
                    suite: suite.name.clone(),
                    name: test.name.clone(),
                    reason,
                },
                None => outcome(
                    suite,
                    test.name.clone(),
                    Err(hook_error("before-all", &err)),
                ),
            });
        }
        append_hook_result(&mut results, suite, "after-all", run_hooks(&suite.hooks.after_all));
        return results;
    }

    for test in &suite.tests {
        run_test(suite, test, config, &mut results);
    }

    append_hook_result(&mut results, suite, "after-all", run_hooks(&suite.hooks.after_all));
    results
}

fn run_test(suite: &Suite, test: &TestSpec, config: &RunConfig, results: &mut Vec<TestResult>) {
    if let Some(reason) = skip_reason(test, config.filter.as_deref()) {
        results.push(TestResult::Skipped {
            suite: suite.name.clone(),
            name: test.name.clone(),
            reason,
        });
        return;
    }

    let Some(source) = &test.source else {
        let result = execute_case(&suite.hooks, &test.body, &Case::empty());
        results.push(outcome(suite, test.name.clone(), result));
        return;
    };

    // Expansion failures abort the whole parameterized test, before any case.
    let cases = match source.expand() {
        Ok(cases) => cases,
        Err(err) => {
            results.push(TestResult::Error {
                suite: suite.name.clone(),
                name: test.name.clone(),
                message: err.to_string(),
            });
            return;
        }
    };

    for case in &cases {
        let label = format!("{} {}", test.name, case);
        let result = execute_case(&suite.hooks, &test.body, case);
        results.push(outcome(suite, label, result));
    }
}

/// before-each → body → after-each; after-each always runs and the first
/// error in that order decides the outcome.
fn execute_case(hooks: &Hooks, body: &TestFn, case: &Case) -> AttestResult<()> {
    let mut first = run_hooks(&hooks.before_each);
    if first.is_ok() {
        first = body(case);
    }
    let after = run_hooks(&hooks.after_each);
    first.and(after)
}

fn run_hooks(hooks: &[HookFn]) -> AttestResult<()> {
    for hook in hooks {
        hook()?;
    }
    Ok(())
}

fn outcome(suite: &Suite, name: String, result: AttestResult<()>) -> TestResult {
    match result {
        Ok(()) => TestResult::Pass {
            suite: suite.name.clone(),
            name,
        },
        Err(err) if err.is_assertion_failure() => TestResult::Fail {
            suite: suite.name.clone(),
            name,
            message: err.to_string(),
        },
        Err(err) => TestResult::Error {
            suite: suite.name.clone(),
            name,
            message: err.to_string(),
        },
    }
}

fn hook_error(phase: &str, err: &AttestError) -> AttestError {
    match err {
        AttestError::Assertion { message } => {
            crate::errors::assertion_failure(format!("{} hook: {}", phase, message))
        }
        other => crate::errors::invalid_operation(format!("{} hook", phase), other.to_string()),
    }
}

fn append_hook_result(
    results: &mut Vec<TestResult>,
    suite: &Suite,
    phase: &str,
    outcome_result: AttestResult<()>,
) {
    if let Err(err) = outcome_result {
        results.push(outcome(
            suite,
            format!("<{}>", phase),
            Err(hook_error(phase, &err)),
        ));
    }
}
