//! Laboratory page object.

use std::time::Duration;

use crate::locator::Locator;
use crate::result::E2eResult;
use crate::session::Session;

/// Budget for the validation toast to appear
const TOAST_BUDGET: Duration = Duration::from_millis(2_000);

/// Page object for the laboratory module
#[derive(Debug)]
pub struct LaboratoryPage {
    laboratory_link: Locator,
    settings_submodule: Locator,
    add_new_lab_test: Locator,
    add_button: Locator,
    close_button: Locator,
}

impl Default for LaboratoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LaboratoryPage {
    /// Build the locator map for the laboratory module
    #[must_use]
    pub fn new() -> Self {
        Self {
            laboratory_link: Locator::css(r##"a[href="#/Lab"]"##),
            settings_submodule: Locator::xpath(r##"(//a[@href="#/Lab/Settings"])"##).nth(1),
            add_new_lab_test: Locator::xpath(r#"//a[contains(text(),"Add New Lab Test")]"#),
            add_button: Locator::xpath(r#"//button[contains(text(),"Add")]"#),
            close_button: Locator::xpath(r#"//button[contains(text(),"Close")]"#),
        }
    }

    /// Locator for the error toast carrying the given message
    fn error_toast(message: &str) -> Locator {
        Locator::xpath(format!(
            r#"//p[contains(text(),"error")]/../p[contains(text(),"{message}")]"#
        ))
    }

    /// Submit the Add New Lab Test modal with every field blank and return
    /// the trimmed validation toast text.
    ///
    /// Entry state: logged in. The modal is closed before returning.
    pub async fn add_lab_test_error_message(&self, session: &Session) -> E2eResult<String> {
        session.click(&self.laboratory_link).await?;
        session.click(&self.settings_submodule).await?;
        session.click(&self.add_new_lab_test).await?;
        session.click(&self.add_button).await?;

        let toast = Self::error_toast("Lab Test Code Required.");
        session.wait_for_visible(&toast, TOAST_BUDGET).await?;
        let message = session.inner_text(&toast).await?;
        tracing::debug!(%message, "lab test validation toast");

        session.click(&self.close_button).await?;
        Ok(message.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_toast_locator_embeds_message() {
        let toast = LaboratoryPage::error_toast("Lab Test Code Required.");
        assert!(toast
            .selector()
            .to_all_query()
            .contains("Lab Test Code Required."));
    }
}
