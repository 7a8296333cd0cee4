//! Procurement page object.

use std::time::Duration;

use crate::locator::Locator;
use crate::result::{E2eError, E2eResult};
use crate::scenario::ScenarioOutcome;
use crate::session::Session;

/// Budget for the purchase request list to render
const LIST_BUDGET: Duration = Duration::from_millis(2_000);

/// Budget for the invalid-date notice to appear
const NOTICE_BUDGET: Duration = Duration::from_millis(2_000);

/// Per-keystroke delay when typing into the date picker
const DATE_KEY_DELAY: Duration = Duration::from_millis(100);

/// Page object for the procurement module
#[derive(Debug)]
pub struct ProcurementPage {
    procurement_link: Locator,
    purchase_request: Locator,
    purchase_order: Locator,
    goods_arrival_notification: Locator,
    quotations: Locator,
    settings: Locator,
    reports: Locator,
    favorite_button: Locator,
    ok_button: Locator,
    print_button: Locator,
    first_button: Locator,
    previous_button: Locator,
    next_button: Locator,
    last_button: Locator,
    from_date: Locator,
    invalid_msg: Locator,
}

impl Default for ProcurementPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcurementPage {
    /// Build the locator map for the procurement module
    #[must_use]
    pub fn new() -> Self {
        Self {
            procurement_link: Locator::css(r##"a[href="#/ProcurementMain"]"##),
            purchase_request: Locator::xpath(r#"//a[contains(text(),"Purchase Request")]"#),
            purchase_order: Locator::xpath(r#"(//a[contains(text(),"Purchase Order")])"#).first(),
            goods_arrival_notification: Locator::xpath(
                r#"//a[contains(text(),"Goods Arrival Notification")]"#,
            ),
            quotations: Locator::xpath(r#"//a[contains(text(),"Quotation")]"#),
            settings: Locator::xpath(r#"//a[contains(text(),"Settings")]"#),
            reports: Locator::xpath(r#"//a[contains(text(),"Reports")]"#),
            favorite_button: Locator::xpath(r#"//i[contains(@class,"icon-favourite")]"#),
            ok_button: Locator::xpath(r#"//button[contains(text(),"OK")]"#),
            print_button: Locator::xpath("//button[text()='Print']"),
            first_button: Locator::xpath("//button[text()='First']"),
            previous_button: Locator::xpath("//button[text()='Previous']"),
            next_button: Locator::xpath("//button[text()='Next']"),
            last_button: Locator::xpath("//button[text()='Last']"),
            from_date: Locator::xpath(r#"(//input[@id="date"])"#).first(),
            invalid_msg: Locator::xpath(r#"//div[contains(@class,"invalid-msg-cal")]"#),
        }
    }

    /// Verify the visibility of the purchase request list chrome: sub-module
    /// tabs, favorite toggle, and the filter and pager buttons.
    ///
    /// Entry state: logged in. Passes iff every listed control is visible.
    pub async fn verify_purchase_request_list_elements(
        &self,
        session: &Session,
    ) -> E2eResult<ScenarioOutcome> {
        ScenarioOutcome::capture(
            "verify_purchase_request_list_elements",
            self.try_verify_purchase_request_list_elements(session).await,
        )
    }

    async fn try_verify_purchase_request_list_elements(
        &self,
        session: &Session,
    ) -> E2eResult<()> {
        session.click(&self.procurement_link).await?;
        session
            .wait_for_visible(&self.purchase_request, LIST_BUDGET)
            .await?;

        let elements = [
            &self.purchase_request,
            &self.purchase_order,
            &self.goods_arrival_notification,
            &self.quotations,
            &self.settings,
            &self.reports,
            &self.favorite_button,
            &self.ok_button,
            &self.print_button,
            &self.first_button,
            &self.previous_button,
            &self.next_button,
            &self.last_button,
        ];
        for element in elements {
            session.highlight(element).await;
            if !session.is_visible(element).await? {
                return Err(E2eError::assertion(format!(
                    "purchase request list element not visible: {element}"
                )));
            }
        }
        Ok(())
    }

    /// Apply an invalid `"00-00-0000"` date filter to the purchase request
    /// list and return the trimmed notice text it produces.
    ///
    /// Entry state: logged in.
    pub async fn invalid_filter_notice(&self, session: &Session) -> E2eResult<String> {
        session.click(&self.procurement_link).await?;
        session.click(&self.purchase_request).await?;

        session
            .type_text(&self.from_date, "00-00-0000", DATE_KEY_DELAY)
            .await?;
        session.click(&self.ok_button).await?;

        session
            .wait_for_visible(&self.invalid_msg, NOTICE_BUDGET)
            .await?;
        let notice = session.inner_text(&self.invalid_msg).await?;
        tracing::debug!(%notice, "invalid date filter notice");
        Ok(notice.trim().to_string())
    }
}
