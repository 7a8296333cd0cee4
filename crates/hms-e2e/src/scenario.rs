//! Scenario outcomes.
//!
//! A boolean-shaped scenario is all-or-nothing: it passes iff every
//! assertion in its fixed step sequence held and no step faulted. Inside
//! the scenario the fault kinds stay distinguishable for diagnosability;
//! they collapse to a boolean only at the harness boundary. Data faults
//! are never captured here; they propagate and fail the test immediately.

use crate::result::{E2eError, E2eResult};

/// Typed result of one boolean-shaped scenario invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// Every assertion in the sequence passed
    Passed,
    /// An expectation about observed state did not hold
    AssertionFailed(String),
    /// A target element could not be found or acted upon, or a wait
    /// exhausted its budget
    Fault(String),
}

impl ScenarioOutcome {
    /// Collapse to the boolean the harness asserts against
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Capture a scenario body's result at the method boundary.
    ///
    /// Assertion failures and interaction faults are logged and converted;
    /// data faults propagate.
    ///
    /// # Errors
    ///
    /// Returns the original error when it is a data fault.
    pub fn capture(scenario: &str, result: E2eResult<()>) -> E2eResult<Self> {
        match result {
            Ok(()) => Ok(Self::Passed),
            Err(err) if err.is_data_fault() => Err(err),
            Err(E2eError::AssertionFailed { message }) => {
                tracing::error!(scenario, %message, "assertion failed");
                Ok(Self::AssertionFailed(message))
            }
            Err(err) => {
                tracing::error!(scenario, error = %err, "scenario fault");
                Ok(Self::Fault(err.to_string()))
            }
        }
    }
}
