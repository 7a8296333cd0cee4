//! Patient page object.

use std::time::Duration;

use super::MAX_ROW_CHECKS;
use crate::data::DataRecord;
use crate::locator::{Locator, TextExpectation};
use crate::result::E2eResult;
use crate::scenario::ScenarioOutcome;
use crate::session::Session;

/// Budget for filtered search results to settle
const SEARCH_BUDGET: Duration = Duration::from_millis(3_000);

/// Page object for the patient module
#[derive(Debug)]
pub struct PatientPage {
    patient_link: Locator,
    search_bar: Locator,
    patient_name_cells: Locator,
}

impl Default for PatientPage {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientPage {
    /// Build the locator map for the patient module
    #[must_use]
    pub fn new() -> Self {
        Self {
            patient_link: Locator::css(r##"a[href="#/Patient"]"##),
            search_bar: Locator::css("#quickFilterInput"),
            patient_name_cells: Locator::xpath(
                "//div[@role='gridcell' and @col-id='ShortName']",
            ),
        }
    }

    /// Search the patient register for the `PatientName` from the
    /// `PatientNames` sheet and verify the filtered results.
    ///
    /// Entry state: logged in. Each of (at most [`MAX_ROW_CHECKS`]) result
    /// rows must exactly equal the searched name.
    pub async fn search_and_verify_patients(
        &self,
        session: &Session,
        data: &DataRecord,
    ) -> E2eResult<ScenarioOutcome> {
        ScenarioOutcome::capture(
            "search_and_verify_patients",
            self.try_search_and_verify(session, data).await,
        )
    }

    async fn try_search_and_verify(&self, session: &Session, data: &DataRecord) -> E2eResult<()> {
        let patient_name = data.get("PatientName")?;

        session.click(&self.patient_link).await?;
        session
            .wait_for_visible(&self.search_bar, SEARCH_BUDGET)
            .await?;
        session.fill(&self.search_bar, patient_name).await?;
        session.press(&self.search_bar, "Enter").await?;

        let count = session
            .wait_for_count_at_least(&self.patient_name_cells, 1, SEARCH_BUDGET)
            .await?;
        let expectation = TextExpectation::Exact(patient_name.to_string());
        for i in 0..count.min(MAX_ROW_CHECKS) {
            let text = session
                .inner_text(&self.patient_name_cells.clone().nth(i))
                .await?;
            expectation.check(&text)?;
        }
        Ok(())
    }
}
