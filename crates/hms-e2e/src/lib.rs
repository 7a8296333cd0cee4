//! End-to-end test suite for a hospital information system.
//!
//! The crate drives the application through a swappable [`backend::Backend`]:
//! a CDP-backed browser (behind the `browser` feature) for live runs, and an
//! in-memory mock for unit-testing scenario logic. Page objects under
//! [`pages`] hold the locators for one application module each and expose
//! scenario methods against an explicitly passed [`session::Session`].
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐    ┌───────────┐    ┌────────────────────┐
//! │ Suite     │    │ Page      │    │ Session            │
//! │ runner    │───►│ objects   │───►│ (waits, actions)   │
//! └───────────┘    └───────────┘    └─────────┬──────────┘
//!                                             │ Backend trait
//!                                   ┌─────────┴──────────┐
//!                                   │ CdpBackend │ Mock  │
//!                                   └────────────────────┘
//! ```
//!
//! Scenario outcomes are typed ([`scenario::ScenarioOutcome`]) and collapse
//! to pass/fail only at the harness boundary; test-data faults fail a test
//! immediately instead of being folded into an assertion failure.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod backend;
pub mod config;
pub mod data;
pub mod harness;
pub mod locator;
pub mod logging;
pub mod pages;
pub mod result;
pub mod scenario;
pub mod session;

pub use backend::{Backend, MockBackend};
#[cfg(feature = "browser")]
pub use backend::CdpBackend;
pub use config::SuiteConfig;
pub use data::{DataRecord, Workbook};
pub use harness::{SuiteResults, SuiteRunner, TestResult};
pub use locator::{Locator, Selector, TextExpectation};
pub use result::{E2eError, E2eResult};
pub use scenario::ScenarioOutcome;
pub use session::Session;
