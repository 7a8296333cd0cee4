//! Result and error types for the suite.
//!
//! The error taxonomy separates the three fault kinds a scenario can hit:
//! assertion failures (an expectation about observed state does not hold),
//! interaction faults (an element could not be found or acted upon), and
//! data faults (a requested sheet/row/column is absent). Boolean-shaped
//! scenarios convert the first two into a non-pass outcome at their
//! boundary; data faults always propagate.

use thiserror::Error;

/// Result type for suite operations
pub type E2eResult<T> = Result<T, E2eError>;

/// Errors that can occur while driving the application under test
#[derive(Debug, Error)]
pub enum E2eError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page-level error from the CDP connection
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A wait condition was not satisfied within its budget
    #[error("Timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// Timeout budget in milliseconds
        ms: u64,
        /// Description of the awaited condition
        waiting_for: String,
    },

    /// A target element could not be found or acted upon
    #[error("Interaction fault: {message}")]
    InteractionFault {
        /// Error message
        message: String,
    },

    /// An expectation about observed state does not hold
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// A requested sheet, row, or column is absent from the workbook
    #[error("Data fault: {message}")]
    DataFault {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error while reading a sheet
    #[error("Sheet read error: {0}")]
    Csv(#[from] csv::Error),
}

impl E2eError {
    /// Interaction fault with a formatted message
    pub fn interaction(message: impl Into<String>) -> Self {
        Self::InteractionFault {
            message: message.into(),
        }
    }

    /// Assertion failure with a formatted message
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Data fault with a formatted message
    pub fn data(message: impl Into<String>) -> Self {
        Self::DataFault {
            message: message.into(),
        }
    }

    /// Whether this error is a data fault (never swallowed by scenarios)
    #[must_use]
    pub const fn is_data_fault(&self) -> bool {
        matches!(self, Self::DataFault { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_fault_message() {
        let err = E2eError::interaction("no element matched //div");
        assert!(err.to_string().contains("no element matched"));
    }

    #[test]
    fn test_timeout_message_includes_budget() {
        let err = E2eError::Timeout {
            ms: 20_000,
            waiting_for: "admin marker".to_string(),
        };
        assert!(err.to_string().contains("20000ms"));
        assert!(err.to_string().contains("admin marker"));
    }

    #[test]
    fn test_data_fault_detection() {
        assert!(E2eError::data("missing sheet").is_data_fault());
        assert!(!E2eError::assertion("nope").is_data_fault());
    }
}
