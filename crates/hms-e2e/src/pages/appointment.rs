//! Appointment page object.

use std::time::Duration;

use super::MAX_ROW_CHECKS;
use crate::locator::{Locator, TextExpectation};
use crate::result::E2eResult;
use crate::scenario::ScenarioOutcome;
use crate::session::Session;

/// Budget for the patient list to render after navigation
const LIST_BUDGET: Duration = Duration::from_millis(2_000);

/// Budget for filtered search results to settle
const SEARCH_BUDGET: Duration = Duration::from_millis(3_000);

/// Page object for the appointment module
#[derive(Debug)]
pub struct AppointmentPage {
    appointment_link: Locator,
    title: Locator,
    search_bar: Locator,
    hospital_search_bar: Locator,
    patient_name_cells: Locator,
    patient_code_cells: Locator,
}

impl Default for AppointmentPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentPage {
    /// Build the locator map for the appointment module
    #[must_use]
    pub fn new() -> Self {
        Self {
            appointment_link: Locator::css(r##"a[href="#/Appointment"]"##),
            title: Locator::xpath("//span[text() = 'Patient List |']"),
            search_bar: Locator::css("#quickFilterInput"),
            hospital_search_bar: Locator::css("#id_input_search_using_hospital_no"),
            patient_name_cells: Locator::xpath("//div[@role='gridcell' and @col-id='ShortName']"),
            patient_code_cells: Locator::xpath(
                "//div[@role='gridcell' and @col-id='PatientCode']",
            ),
        }
    }

    /// Search the patient list by the first patient's name and hospital
    /// code, and verify the filtered results.
    ///
    /// Entry state: logged in. Both filters use exact equality per row,
    /// and verification is bounded at [`MAX_ROW_CHECKS`] rows.
    pub async fn search_and_verify_patient_list(
        &self,
        session: &Session,
    ) -> E2eResult<ScenarioOutcome> {
        ScenarioOutcome::capture(
            "search_and_verify_patient_list",
            self.try_search_and_verify(session).await,
        )
    }

    async fn try_search_and_verify(&self, session: &Session) -> E2eResult<()> {
        session.click(&self.appointment_link).await?;
        session.wait_for_visible(&self.title, LIST_BUDGET).await?;
        session
            .wait_for_visible(&self.patient_name_cells.clone().first(), LIST_BUDGET)
            .await?;

        // Filter by the first patient's name and verify every returned row
        let search_name = session
            .inner_text(&self.patient_name_cells.clone().first())
            .await?;
        session.fill(&self.search_bar, &search_name).await?;
        session.press(&self.search_bar, "Enter").await?;
        self.verify_column(session, &self.patient_name_cells, &search_name)
            .await?;

        // Repeat with the first patient's hospital code
        let search_code = session
            .inner_text(&self.patient_code_cells.clone().first())
            .await?;
        session.fill(&self.hospital_search_bar, &search_code).await?;
        session.press(&self.hospital_search_bar, "Enter").await?;
        self.verify_column(session, &self.patient_code_cells, &search_code)
            .await?;

        Ok(())
    }

    /// Verify that each of (at most [`MAX_ROW_CHECKS`]) result cells in a
    /// column exactly equals the search term.
    async fn verify_column(
        &self,
        session: &Session,
        cells: &Locator,
        expected: &str,
    ) -> E2eResult<()> {
        let count = session
            .wait_for_count_at_least(cells, 1, SEARCH_BUDGET)
            .await?;
        let expectation = TextExpectation::Exact(expected.to_string());
        for i in 0..count.min(MAX_ROW_CHECKS) {
            let text = session.inner_text(&cells.clone().nth(i)).await?;
            expectation.check(&text)?;
        }
        Ok(())
    }
}
