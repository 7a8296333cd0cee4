//! Settings page object.

use std::time::Duration;

use rand::Rng;

use crate::data::DataRecord;
use crate::locator::Locator;
use crate::result::E2eResult;
use crate::session::Session;

/// Budget for each settings view transition
const SETTINGS_BUDGET: Duration = Duration::from_millis(2_000);

/// Page object for the settings module
#[derive(Debug)]
pub struct SettingsPage {
    settings_module: Locator,
    departments: Locator,
    add_department_button: Locator,
    department_code_input: Locator,
    department_name_input: Locator,
    add_department_modal_button: Locator,
    search_bar: Locator,
    is_active_dropdown: Locator,
    update_department_button: Locator,
    update_success_msg: Locator,
}

impl Default for SettingsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPage {
    /// Build the locator map for the settings module
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings_module: Locator::xpath("(//a//span[text()='Settings'])").nth(4),
            departments: Locator::xpath("//a[text()= ' Departments ']"),
            add_department_button: Locator::xpath(r#"//a[text()="Add Department"]"#),
            department_code_input: Locator::css("input#id_department_code"),
            department_name_input: Locator::css("input#id_department_name"),
            add_department_modal_button: Locator::css("input#AddDepartment"),
            search_bar: Locator::css("#quickFilterInput"),
            is_active_dropdown: Locator::css("#id_select_department_isActive"),
            update_department_button: Locator::css("input#UpdateDepartment"),
            update_success_msg: Locator::xpath(
                r#"//p[contains(text(),"success")]/../p[contains(text(),"Department Updated")]"#,
            ),
        }
    }

    /// Locator for the edit action on the grid row whose code cell shows
    /// the given department code
    fn edit_row(department_code: &str) -> Locator {
        Locator::xpath(format!(
            r#"//div[text()="{department_code}"]/../div/a[@danphe-grid-action="edit"]"#
        ))
    }

    /// Add a department under a randomized unique code, then edit it to
    /// inactive and return the trimmed update success message.
    ///
    /// Entry state: logged in. The department code is `DepartmentCode` from
    /// the `AddDepartment` sheet with a random 1..=10000 suffix appended, so
    /// each run creates a fresh department. The department name is set to
    /// the same value.
    pub async fn add_and_edit_department(
        &self,
        session: &Session,
        data: &DataRecord,
    ) -> E2eResult<String> {
        let department_code = unique_department_code(data.get("DepartmentCode")?);
        self.add_and_edit_department_with_code(session, &department_code)
            .await
    }

    /// As [`Self::add_and_edit_department`], but under an explicit code
    pub async fn add_and_edit_department_with_code(
        &self,
        session: &Session,
        department_code: &str,
    ) -> E2eResult<String> {
        tracing::debug!(%department_code, "adding department");

        session.click(&self.settings_module).await?;
        session
            .wait_for_visible(&self.departments, SETTINGS_BUDGET)
            .await?;
        session.click(&self.departments).await?;
        session.click(&self.add_department_button).await?;

        session
            .wait_for_visible(&self.department_code_input, SETTINGS_BUDGET)
            .await?;
        session
            .fill(&self.department_code_input, department_code)
            .await?;
        session
            .fill(&self.department_name_input, department_code)
            .await?;
        session.click(&self.add_department_modal_button).await?;

        session
            .wait_for_visible(&self.search_bar, SETTINGS_BUDGET)
            .await?;
        session.fill(&self.search_bar, department_code).await?;
        session.press(&self.search_bar, "Enter").await?;

        let edit_row = Self::edit_row(department_code);
        session.wait_for_visible(&edit_row, SETTINGS_BUDGET).await?;
        session.click(&edit_row).await?;

        session
            .wait_for_visible(&self.is_active_dropdown, SETTINGS_BUDGET)
            .await?;
        session
            .select_option(&self.is_active_dropdown, "false")
            .await?;
        session.click(&self.update_department_button).await?;

        session
            .wait_for_visible(&self.update_success_msg, SETTINGS_BUDGET)
            .await?;
        let message = session.inner_text(&self.update_success_msg).await?;
        tracing::debug!(%message, "department update message");
        Ok(message.trim().to_string())
    }
}

/// Append a random 1..=10000 suffix so every run adds a fresh department
fn unique_department_code(base: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(1..=10_000);
    format!("{base}{suffix}")
}
