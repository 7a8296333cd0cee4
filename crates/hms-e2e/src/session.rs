//! The shared browser session.
//!
//! One [`Session`] is created at suite start and passed explicitly to every
//! scenario method; all cross-scenario coupling goes through its navigation
//! state. Interactions follow a fixed shape: highlight the target, perform
//! exactly one action, then (where the scenario requires it) wait for a
//! condition. Waits are condition-based polls with an explicit budget, not
//! unconditional sleeps; the budget is the upper bound the suite tolerates
//! under slow rendering.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::backend::Backend;
use crate::locator::Locator;
use crate::result::{E2eError, E2eResult};

/// The single shared document session reused across all scenarios
#[derive(Clone)]
pub struct Session {
    backend: Arc<dyn Backend>,
    base_url: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session over a backend
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, base_url: impl Into<String>) -> Self {
        Self {
            backend,
            base_url: base_url.into(),
        }
    }

    /// Base URL of the application under test
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Navigate to a path relative to the base URL (or an absolute URL)
    pub async fn goto(&self, path: &str) -> E2eResult<()> {
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };
        tracing::debug!(url = %url, "navigating");
        self.backend.goto(&url).await
    }

    /// Navigate one entry back in session history
    pub async fn go_back(&self) -> E2eResult<()> {
        self.backend.go_back().await
    }

    /// Current document URL
    pub async fn url(&self) -> E2eResult<String> {
        self.backend.current_url().await
    }

    /// Highlight and click an element
    pub async fn click(&self, locator: &Locator) -> E2eResult<()> {
        self.backend
            .highlight(locator.selector(), locator.index())
            .await;
        tracing::debug!(target = %locator, "click");
        self.backend.click(locator.selector(), locator.index()).await
    }

    /// Highlight an element and replace its value
    pub async fn fill(&self, locator: &Locator, text: &str) -> E2eResult<()> {
        self.backend
            .highlight(locator.selector(), locator.index())
            .await;
        tracing::debug!(target = %locator, "fill");
        self.backend
            .fill(locator.selector(), locator.index(), text)
            .await
    }

    /// Highlight an element and type into it one character at a time
    pub async fn type_text(
        &self,
        locator: &Locator,
        text: &str,
        per_key_delay: Duration,
    ) -> E2eResult<()> {
        self.backend
            .highlight(locator.selector(), locator.index())
            .await;
        tracing::debug!(target = %locator, "type");
        self.backend
            .type_text(locator.selector(), locator.index(), text, per_key_delay)
            .await
    }

    /// Dispatch a keyboard key to an element
    pub async fn press(&self, locator: &Locator, key: &str) -> E2eResult<()> {
        self.backend
            .press_key(locator.selector(), locator.index(), key)
            .await
    }

    /// Highlight a select element and pick the option with the given value
    pub async fn select_option(&self, locator: &Locator, value: &str) -> E2eResult<()> {
        self.backend
            .highlight(locator.selector(), locator.index())
            .await;
        tracing::debug!(target = %locator, value, "select");
        self.backend
            .select_option(locator.selector(), locator.index(), value)
            .await
    }

    /// Rendered text of an element; faults if the element is absent
    pub async fn inner_text(&self, locator: &Locator) -> E2eResult<String> {
        self.backend
            .inner_text(locator.selector(), locator.index())
            .await
    }

    /// Whether an element exists and is visible
    pub async fn is_visible(&self, locator: &Locator) -> E2eResult<bool> {
        self.backend
            .is_visible(locator.selector(), locator.index())
            .await
    }

    /// Number of elements matching the locator's selector
    pub async fn count(&self, locator: &Locator) -> E2eResult<usize> {
        self.backend.count(locator.selector()).await
    }

    /// Apply the diagnostic highlight without interacting
    pub async fn highlight(&self, locator: &Locator) {
        self.backend
            .highlight(locator.selector(), locator.index())
            .await;
    }

    /// Poll until the element is visible, up to `timeout`
    pub async fn wait_for_visible(&self, locator: &Locator, timeout: Duration) -> E2eResult<()> {
        let poll = locator.options().poll_interval;
        let start = Instant::now();
        loop {
            if self
                .backend
                .is_visible(locator.selector(), locator.index())
                .await?
            {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(E2eError::Timeout {
                    ms: timeout.as_millis() as u64,
                    waiting_for: format!("{locator} to become visible"),
                });
            }
            tokio::time::sleep(poll).await;
        }
    }

    /// Poll until the element is hidden or gone, up to `timeout`
    pub async fn wait_for_hidden(&self, locator: &Locator, timeout: Duration) -> E2eResult<()> {
        let poll = locator.options().poll_interval;
        let start = Instant::now();
        loop {
            if !self
                .backend
                .is_visible(locator.selector(), locator.index())
                .await?
            {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(E2eError::Timeout {
                    ms: timeout.as_millis() as u64,
                    waiting_for: format!("{locator} to become hidden"),
                });
            }
            tokio::time::sleep(poll).await;
        }
    }

    /// Poll until at least `minimum` elements match, up to `timeout`
    pub async fn wait_for_count_at_least(
        &self,
        locator: &Locator,
        minimum: usize,
        timeout: Duration,
    ) -> E2eResult<usize> {
        let poll = locator.options().poll_interval;
        let start = Instant::now();
        loop {
            let count = self.backend.count(locator.selector()).await?;
            if count >= minimum {
                return Ok(count);
            }
            if start.elapsed() >= timeout {
                return Err(E2eError::Timeout {
                    ms: timeout.as_millis() as u64,
                    waiting_for: format!("at least {minimum} matches of {locator}"),
                });
            }
            tokio::time::sleep(poll).await;
        }
    }
}
