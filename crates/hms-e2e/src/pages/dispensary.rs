//! Dispensary page object.

use std::time::Duration;

use rand::Rng;

use crate::data::DataRecord;
use crate::locator::{Locator, TextExpectation};
use crate::result::E2eResult;
use crate::scenario::ScenarioOutcome;
use crate::session::Session;

/// Budget for the counter management view to render
const COUNTER_BUDGET: Duration = Duration::from_millis(2_000);

/// Budget for the user collection report grid to render
const REPORT_BUDGET: Duration = Duration::from_millis(2_000);

/// Per-keystroke delay when typing into the date picker
const DATE_KEY_DELAY: Duration = Duration::from_millis(100);

/// Page object for the dispensary module
#[derive(Debug)]
pub struct DispensaryPage {
    dispensary_link: Locator,
    counter_tab: Locator,
    counter_tiles: Locator,
    counter_names: Locator,
    activated_counter_info: Locator,
    deactivate_counter_button: Locator,
    title: Locator,
    reports_tab: Locator,
    user_collection_report: Locator,
    show_report_button: Locator,
    report_patient_name: Locator,
    search_bar: Locator,
    from_date: Locator,
}

impl Default for DispensaryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DispensaryPage {
    /// Build the locator map for the dispensary module
    #[must_use]
    pub fn new() -> Self {
        Self {
            dispensary_link: Locator::css(r##"a[href="#/Dispensary"]"##),
            counter_tab: Locator::xpath("//a[contains(text(),'Counter')]"),
            counter_tiles: Locator::xpath(r#"//div[@class="counter-item"]"#),
            counter_names: Locator::xpath(r#"//div[@class="counter-item"]//h5"#),
            activated_counter_info: Locator::css("div.mt-comment-info"),
            deactivate_counter_button: Locator::xpath(
                "//button[contains(text(),'Deactivate Counter')]",
            ),
            title: Locator::xpath("//span[@class='caption-subject']"),
            reports_tab: Locator::xpath("//a[text()=' Reports ']"),
            user_collection_report: Locator::xpath("(//span[@class='report-name']//i)").first(),
            show_report_button: Locator::xpath("//span[text()='Show Report']"),
            report_patient_name: Locator::xpath(
                "//div[@role='row']//div[@col-id='PatientName']",
            )
            .nth(1),
            search_bar: Locator::css("#quickFilterInput"),
            from_date: Locator::xpath(r#"(//input[@id="date"])"#).first(),
        }
    }

    /// Activate a randomly chosen counter and verify that the activation
    /// banner names the chosen counter.
    ///
    /// Entry state: logged in. Passes iff the banner text contains the
    /// chosen counter's label.
    pub async fn verify_active_counter_message(
        &self,
        session: &Session,
    ) -> E2eResult<ScenarioOutcome> {
        ScenarioOutcome::capture(
            "verify_active_counter_message",
            self.try_verify_active_counter_message(session).await,
        )
    }

    async fn try_verify_active_counter_message(&self, session: &Session) -> E2eResult<()> {
        session.click(&self.dispensary_link).await?;
        session.click(&self.counter_tab).await?;
        session.wait_for_visible(&self.title, COUNTER_BUDGET).await?;

        let counter_count = session
            .wait_for_count_at_least(&self.counter_tiles, 1, COUNTER_BUDGET)
            .await?;
        let random_index = rand::thread_rng().gen_range(0..counter_count);
        tracing::debug!(counter_count, random_index, "selecting counter");

        let tile_text = session
            .inner_text(&self.counter_names.clone().nth(random_index))
            .await?;
        let counter_label = counter_label(&tile_text);

        session
            .click(&self.counter_tiles.clone().nth(random_index))
            .await?;
        session.click(&self.counter_tab).await?;

        session
            .wait_for_visible(&self.activated_counter_info, COUNTER_BUDGET)
            .await?;
        let info_text = session.inner_text(&self.activated_counter_info).await?;
        TextExpectation::Contains(counter_label.to_string()).check(&info_text)
    }

    /// Verify that activating a counter exposes the deactivate control.
    ///
    /// Entry state: logged in. Passes iff the "Deactivate Counter" button
    /// becomes visible after entering counter management.
    pub async fn verify_counter_activated(&self, session: &Session) -> E2eResult<ScenarioOutcome> {
        ScenarioOutcome::capture(
            "verify_counter_activated",
            self.try_verify_counter_activated(session).await,
        )
    }

    async fn try_verify_counter_activated(&self, session: &Session) -> E2eResult<()> {
        session.click(&self.dispensary_link).await?;
        session.click(&self.counter_tab).await?;
        session
            .wait_for_visible(&self.deactivate_counter_button, COUNTER_BUDGET)
            .await?;
        Ok(())
    }

    /// Verify the report search box by re-finding a patient taken from the
    /// user collection report.
    ///
    /// Entry state: logged in. Filters the report from `FromDate`, captures
    /// the first listed patient name, searches for it, and passes iff the
    /// first result row exactly matches the captured name.
    pub async fn verify_search_functionality(
        &self,
        session: &Session,
        data: &DataRecord,
    ) -> E2eResult<ScenarioOutcome> {
        ScenarioOutcome::capture(
            "verify_search_functionality",
            self.try_verify_search_functionality(session, data).await,
        )
    }

    async fn try_verify_search_functionality(
        &self,
        session: &Session,
        data: &DataRecord,
    ) -> E2eResult<()> {
        let from_date = data.get("FromDate")?;

        session.click(&self.dispensary_link).await?;
        session.click(&self.reports_tab).await?;
        session
            .wait_for_visible(&self.user_collection_report, REPORT_BUDGET)
            .await?;
        session.click(&self.user_collection_report).await?;
        session
            .wait_for_visible(&self.from_date, REPORT_BUDGET)
            .await?;

        session
            .type_text(&self.from_date, from_date, DATE_KEY_DELAY)
            .await?;
        session.click(&self.show_report_button).await?;

        session
            .wait_for_visible(&self.report_patient_name, REPORT_BUDGET)
            .await?;
        let patient_name = session.inner_text(&self.report_patient_name).await?;
        tracing::debug!(%patient_name, "captured report patient");

        session.fill(&self.search_bar, &patient_name).await?;
        session
            .wait_for_visible(&self.report_patient_name, REPORT_BUDGET)
            .await?;
        let filtered_name = session.inner_text(&self.report_patient_name).await?;
        TextExpectation::Exact(patient_name).check(&filtered_name)
    }
}

/// Extract the counter label from a tile's text, which reads
/// `"<name> click to Activate"`.
fn counter_label(tile_text: &str) -> &str {
    tile_text
        .split("click to Activate")
        .next()
        .unwrap_or(tile_text)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_label_strips_activation_hint() {
        assert_eq!(
            counter_label("Morning Counter click to Activate"),
            "Morning Counter"
        );
    }

    #[test]
    fn test_counter_label_without_hint_is_trimmed() {
        assert_eq!(counter_label("  New Counter \n"), "New Counter");
    }

    #[test]
    fn test_counter_label_empty_text() {
        assert_eq!(counter_label(""), "");
    }
}
