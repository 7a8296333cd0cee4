//! Full suite against a live deployment.
//!
//! Requires a running application (configure via `HMS_BASE_URL`) and a
//! local Chromium, so the test is ignored by default:
//!
//! ```text
//! cargo test --features browser -- --ignored live_suite
//! ```

#![cfg(feature = "browser")]

use std::sync::Arc;

use hms_e2e::backend::{Backend, CdpBackend};
use hms_e2e::config::SuiteConfig;
use hms_e2e::data::Workbook;
use hms_e2e::pages::{
    AppointmentPage, BillingPage, ClaimManagementPage, DispensaryPage, LaboratoryPage, LoginPage,
    PatientPage, ProcurementPage, SettingsPage,
};
use hms_e2e::result::E2eResult;
use hms_e2e::session::Session;

/// Tests run serially against one shared session: login first, every later
/// test assumes the logged-in state it leaves behind.
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a running deployment and a local Chromium"]
async fn live_suite() -> E2eResult<()> {
    hms_e2e::logging::init();

    let config = SuiteConfig::from_env();
    let backend = CdpBackend::launch(&config).await?;
    let backend: Arc<dyn Backend> = Arc::new(backend);
    let session = Session::new(backend, config.base_url.clone());
    let workbook = Workbook::open(&config.workbook_dir)?;

    let login = LoginPage::new();
    let dispensary = DispensaryPage::new();
    let procurement = ProcurementPage::new();
    let laboratory = LaboratoryPage::new();
    let patient = PatientPage::new();
    let appointment = AppointmentPage::new();
    let claim_management = ClaimManagementPage::new();
    let billing = BillingPage::new();
    let settings = SettingsPage::new();

    let login_row = workbook.first_row("Login")?;
    let date_range = workbook.first_row("DateRange")?;
    let patient_names = workbook.first_row("PatientNames")?;
    let add_department = workbook.first_row("AddDepartment")?;

    login.navigate(&session).await?;

    let mut runner = hms_e2e::harness::SuiteRunner::new("hms-live");
    runner
        .check_pass("login with valid credentials", login.login(&session, &login_row))
        .await;
    runner
        .check_pass(
            "activate counter in dispensary",
            dispensary.verify_active_counter_message(&session),
        )
        .await;
    runner
        .check_pass(
            "purchase request list load",
            procurement.verify_purchase_request_list_elements(&session),
        )
        .await;
    runner
        .check_text(
            "error message while adding new lab test",
            "Lab Test Code Required.",
            laboratory.add_lab_test_error_message(&session),
        )
        .await;
    runner
        .check_pass(
            "data-driven patient search",
            patient.search_and_verify_patients(&session, &patient_names),
        )
        .await;
    runner
        .check_text(
            "notice after incorrect purchase request filters",
            "Date is not between Range. Please enter again",
            procurement.invalid_filter_notice(&session),
        )
        .await;
    runner
        .check_pass(
            "counter activation",
            dispensary.verify_counter_activated(&session),
        )
        .await;
    runner
        .check_pass(
            "appointment patient list search",
            appointment.search_and_verify_patient_list(&session),
        )
        .await;
    runner
        .check_pass(
            "required and optional login fields",
            login.verify_login_fields(&session, &login_row),
        )
        .await;
    runner
        .check_pass(
            "switching between pages and windows",
            claim_management.verify_window_navigation(&session),
        )
        .await;
    runner
        .check_pass(
            "user collection report search",
            dispensary.verify_search_functionality(&session, &date_range),
        )
        .await;
    runner
        .check_pass("return bill details", billing.verify_bill_details(&session))
        .await;
    runner
        .check_pass(
            "bill review load",
            claim_management.verify_bill_review(&session, &date_range),
        )
        .await;
    runner
        .check_text(
            "add and edit department",
            "Department Updated",
            settings.add_and_edit_department(&session, &add_department),
        )
        .await;

    let results = runner.finish();
    for failure in results.failures() {
        eprintln!("FAIL {}: {:?}", failure.name, failure.detail);
    }
    assert!(
        results.all_passed(),
        "{}/{} tests failed",
        results.failed_count(),
        results.total()
    );
    Ok(())
}
