//! Page objects, one per application module.
//!
//! A page object holds an immutable set of [`crate::locator::Locator`]s
//! built eagerly at construction time, and exposes scenario methods that
//! drive the shared [`crate::session::Session`] passed in explicitly.
//! Scenario methods document their required entry state: the suite runs
//! them in declaration order, and prerequisite navigation (login first) is
//! an ordering contract between tests.

pub mod appointment;
pub mod billing;
pub mod claim_management;
pub mod dispensary;
pub mod laboratory;
pub mod login;
pub mod patient;
pub mod procurement;
pub mod settings;

pub use appointment::AppointmentPage;
pub use billing::BillingPage;
pub use claim_management::ClaimManagementPage;
pub use dispensary::DispensaryPage;
pub use laboratory::LaboratoryPage;
pub use login::LoginPage;
pub use patient::PatientPage;
pub use procurement::ProcurementPage;
pub use settings::SettingsPage;

/// Cap on grid rows compared by list-verification scenarios, regardless of
/// the underlying result-set size
pub const MAX_ROW_CHECKS: usize = 20;
