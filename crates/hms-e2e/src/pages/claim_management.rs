//! Claim management page object.

use std::time::Duration;

use crate::data::DataRecord;
use crate::locator::{Locator, TextExpectation};
use crate::result::E2eResult;
use crate::scenario::ScenarioOutcome;
use crate::session::Session;

/// Budget for each claim management view transition
const CLAIM_BUDGET: Duration = Duration::from_millis(2_000);

/// Budget for the loaded bill rows to appear
const LOAD_BUDGET: Duration = Duration::from_millis(1_000);

/// Per-keystroke delay when typing into the date picker
const DATE_KEY_DELAY: Duration = Duration::from_millis(100);

/// Page object for the claim management module
#[derive(Debug)]
pub struct ClaimManagementPage {
    claim_module: Locator,
    insurance_provider: Locator,
    bill_review: Locator,
    from_date: Locator,
    load_button: Locator,
    table_rows: Locator,
    dashboard: Locator,
}

impl Default for ClaimManagementPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimManagementPage {
    /// Build the locator map for the claim management module
    #[must_use]
    pub fn new() -> Self {
        Self {
            claim_module: Locator::xpath("(//span[text() = 'ClaimMgmt'])").first(),
            insurance_provider: Locator::xpath("(//a[@class='report_list'])").first(),
            bill_review: Locator::xpath("//a[text() = ' Bill Review ']"),
            from_date: Locator::xpath(r#"(//input[@id="date"])"#).first(),
            load_button: Locator::xpath("//button[text() = 'Load ']"),
            table_rows: Locator::xpath("(//div[@class='col-md-12']//tbody)[2]//tr"),
            dashboard: Locator::xpath(r#"//div[@class="page-logo"]"#),
        }
    }

    /// Load the bill review list for an insurance provider, filtered from
    /// `FromDate`, and verify that at least one bill is listed.
    ///
    /// Entry state: logged in.
    pub async fn verify_bill_review(
        &self,
        session: &Session,
        data: &DataRecord,
    ) -> E2eResult<ScenarioOutcome> {
        ScenarioOutcome::capture(
            "verify_bill_review",
            self.try_verify_bill_review(session, data).await,
        )
    }

    async fn try_verify_bill_review(
        &self,
        session: &Session,
        data: &DataRecord,
    ) -> E2eResult<()> {
        let from_date = data.get("FromDate")?;

        session.click(&self.claim_module).await?;
        session
            .wait_for_visible(&self.insurance_provider, CLAIM_BUDGET)
            .await?;
        session.click(&self.insurance_provider).await?;
        session
            .wait_for_visible(&self.bill_review, CLAIM_BUDGET)
            .await?;
        session.click(&self.bill_review).await?;
        session
            .wait_for_visible(&self.from_date, CLAIM_BUDGET)
            .await?;

        session
            .type_text(&self.from_date, from_date, DATE_KEY_DELAY)
            .await?;
        session.click(&self.load_button).await?;

        session
            .wait_for_count_at_least(&self.table_rows, 1, LOAD_BUDGET)
            .await?;
        Ok(())
    }

    /// Verify browser-history navigation around the insurance provider
    /// screen.
    ///
    /// Entry state: logged in. Opens the provider selection screen, records
    /// its URL, navigates away to the dashboard, goes back, and passes iff
    /// the recorded URL contains `SelectInsuranceProvider`.
    pub async fn verify_window_navigation(
        &self,
        session: &Session,
    ) -> E2eResult<ScenarioOutcome> {
        ScenarioOutcome::capture(
            "verify_window_navigation",
            self.try_verify_window_navigation(session).await,
        )
    }

    async fn try_verify_window_navigation(&self, session: &Session) -> E2eResult<()> {
        session.click(&self.dashboard).await?;
        session.click(&self.claim_module).await?;
        session
            .wait_for_visible(&self.insurance_provider, CLAIM_BUDGET)
            .await?;
        session.highlight(&self.insurance_provider).await;

        let provider_url = session.url().await?;
        tracing::debug!(%provider_url, "insurance provider screen url");

        session.click(&self.dashboard).await?;
        session.go_back().await?;

        TextExpectation::Contains("SelectInsuranceProvider".to_string()).check(&provider_url)
    }
}
