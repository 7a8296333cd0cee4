//! Billing page object.

use std::time::Duration;

use crate::locator::Locator;
use crate::result::E2eResult;
use crate::scenario::ScenarioOutcome;
use crate::session::Session;

/// Budget for each billing view transition and for the results grid
const BILLING_BUDGET: Duration = Duration::from_millis(2_000);

/// Page object for the billing module
#[derive(Debug)]
pub struct BillingPage {
    billing_module: Locator,
    counter: Locator,
    return_bills: Locator,
    fiscal_year_dropdown: Locator,
    invoice_number_field: Locator,
    search_button: Locator,
    table_rows: Locator,
}

impl Default for BillingPage {
    fn default() -> Self {
        Self::new()
    }
}

impl BillingPage {
    /// Build the locator map for the billing module
    #[must_use]
    pub fn new() -> Self {
        Self {
            billing_module: Locator::xpath("(//span[text() = 'Billing'])").first(),
            counter: Locator::xpath(r#"(//div[@class="counter-item"])"#).first(),
            return_bills: Locator::xpath("//a[text()='Return Bills ']"),
            fiscal_year_dropdown: Locator::xpath("//div[@class='search-list']//select"),
            invoice_number_field: Locator::xpath(r#"//div[@class="search-list"]//input"#),
            search_button: Locator::xpath("//div[@class='search-list']//button"),
            table_rows: Locator::xpath("//div[@class='col-md-12']//tbody//tr"),
        }
    }

    /// Search the return bills list for invoice `95` in fiscal year `2024`
    /// and verify that at least one bill is listed.
    ///
    /// Entry state: logged in.
    pub async fn verify_bill_details(&self, session: &Session) -> E2eResult<ScenarioOutcome> {
        ScenarioOutcome::capture(
            "verify_bill_details",
            self.try_verify_bill_details(session).await,
        )
    }

    async fn try_verify_bill_details(&self, session: &Session) -> E2eResult<()> {
        session.click(&self.billing_module).await?;
        session.wait_for_visible(&self.counter, BILLING_BUDGET).await?;
        session.click(&self.counter).await?;

        session.click(&self.return_bills).await?;
        session
            .wait_for_visible(&self.fiscal_year_dropdown, BILLING_BUDGET)
            .await?;
        session
            .select_option(&self.fiscal_year_dropdown, "2024")
            .await?;
        session.fill(&self.invoice_number_field, "95").await?;
        session.click(&self.search_button).await?;

        session
            .wait_for_count_at_least(&self.table_rows, 1, BILLING_BUDGET)
            .await?;
        Ok(())
    }
}
