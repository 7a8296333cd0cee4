//! Suite runner.
//!
//! Declared tests run serially, in declaration order, against the one
//! shared session; ordering between tests is a correctness precondition
//! (login navigates, later scenarios assume the resulting state), not an
//! artifact. A failing test is recorded and the run continues; scenario
//! outcomes collapse to pass/fail here and nowhere earlier.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::result::E2eResult;
use crate::scenario::ScenarioOutcome;

/// Result of running a single test
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test name
    pub name: String,
    /// Whether the test passed
    pub passed: bool,
    /// Failure detail, if any
    pub detail: Option<String>,
    /// Test duration
    pub duration: Duration,
}

impl TestResult {
    /// Create a passing result
    #[must_use]
    pub fn pass(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            passed: true,
            detail: None,
            duration,
        }
    }

    /// Create a failing result
    #[must_use]
    pub fn fail(name: impl Into<String>, detail: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: Some(detail.into()),
            duration,
        }
    }
}

/// Results from a full suite run
#[derive(Debug, Clone)]
pub struct SuiteResults {
    /// Suite name
    pub suite_name: String,
    /// Individual test results, in declaration order
    pub results: Vec<TestResult>,
    /// Total duration
    pub duration: Duration,
}

impl SuiteResults {
    /// Whether every test passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Count of passed tests
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Count of failed tests
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Total test count
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// The failing tests
    #[must_use]
    pub fn failures(&self) -> Vec<&TestResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }
}

/// Serial test runner over the shared session
#[derive(Debug)]
pub struct SuiteRunner {
    suite_name: String,
    results: Vec<TestResult>,
    started: Instant,
}

impl SuiteRunner {
    /// Start a suite run
    #[must_use]
    pub fn new(suite_name: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
            results: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Run a boolean-shaped scenario and assert it passed
    pub async fn check_pass<F>(&mut self, name: &str, scenario: F)
    where
        F: Future<Output = E2eResult<ScenarioOutcome>>,
    {
        let start = Instant::now();
        let result = match scenario.await {
            Ok(ScenarioOutcome::Passed) => TestResult::pass(name, start.elapsed()),
            Ok(ScenarioOutcome::AssertionFailed(detail) | ScenarioOutcome::Fault(detail)) => {
                TestResult::fail(name, detail, start.elapsed())
            }
            Err(err) => TestResult::fail(name, err.to_string(), start.elapsed()),
        };
        self.record(result);
    }

    /// Run a string-shaped scenario and assert the exact expected text
    pub async fn check_text<F>(&mut self, name: &str, expected: &str, scenario: F)
    where
        F: Future<Output = E2eResult<String>>,
    {
        let start = Instant::now();
        let result = match scenario.await {
            Ok(actual) if actual == expected => TestResult::pass(name, start.elapsed()),
            Ok(actual) => TestResult::fail(
                name,
                format!("expected '{expected}' but got '{actual}'"),
                start.elapsed(),
            ),
            Err(err) => TestResult::fail(name, err.to_string(), start.elapsed()),
        };
        self.record(result);
    }

    /// Finish the run
    #[must_use]
    pub fn finish(self) -> SuiteResults {
        SuiteResults {
            suite_name: self.suite_name,
            results: self.results,
            duration: self.started.elapsed(),
        }
    }

    fn record(&mut self, result: TestResult) {
        if result.passed {
            tracing::info!(test = %result.name, duration_ms = result.duration.as_millis() as u64, "PASS");
        } else {
            tracing::error!(
                test = %result.name,
                detail = result.detail.as_deref().unwrap_or(""),
                "FAIL"
            );
        }
        self.results.push(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::E2eError;

    #[tokio::test]
    async fn test_passing_and_failing_scenarios_are_both_recorded() {
        let mut runner = SuiteRunner::new("demo");
        runner
            .check_pass("passes", async { Ok(ScenarioOutcome::Passed) })
            .await;
        runner
            .check_pass("fails", async {
                Ok(ScenarioOutcome::AssertionFailed("mismatch".to_string()))
            })
            .await;
        let results = runner.finish();
        assert_eq!(results.total(), 2);
        assert_eq!(results.passed_count(), 1);
        assert_eq!(results.failed_count(), 1);
        assert!(!results.all_passed());
    }

    #[tokio::test]
    async fn test_data_fault_fails_only_its_test() {
        let mut runner = SuiteRunner::new("demo");
        runner
            .check_pass("data fault", async { Err(E2eError::data("missing sheet")) })
            .await;
        runner
            .check_pass("still runs", async { Ok(ScenarioOutcome::Passed) })
            .await;
        let results = runner.finish();
        assert_eq!(results.failed_count(), 1);
        assert_eq!(results.passed_count(), 1);
    }

    #[tokio::test]
    async fn test_text_scenario_requires_exact_match() {
        let mut runner = SuiteRunner::new("demo");
        runner
            .check_text("exact", "Department Updated", async {
                Ok("Department Updated".to_string())
            })
            .await;
        runner
            .check_text("superstring rejected", "Department Updated", async {
                Ok("Department Updated!".to_string())
            })
            .await;
        let results = runner.finish();
        assert!(results.results[0].passed);
        assert!(!results.results[1].passed);
    }

    #[tokio::test]
    async fn test_failures_lists_details() {
        let mut runner = SuiteRunner::new("demo");
        runner
            .check_pass("faulty", async {
                Ok(ScenarioOutcome::Fault("element detached".to_string()))
            })
            .await;
        let results = runner.finish();
        let failures = results.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].detail.as_deref(), Some("element detached"));
    }
}
