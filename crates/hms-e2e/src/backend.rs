//! Session backends.
//!
//! A [`Backend`] performs element-level operations against a rendered
//! document. With the `browser` feature enabled the [`CdpBackend`] drives a
//! real Chromium page over the DevTools protocol via chromiumoxide; the
//! scripted [`MockBackend`] is always available and resolves elements from
//! a staged state map so scenario logic can be exercised without a browser.
//!
//! All operations address elements by `(selector, nth)` where `nth` is the
//! index into the matches in document order.

use std::time::Duration;

use async_trait::async_trait;

use crate::locator::Selector;
use crate::result::E2eResult;

/// Element-level operations against a rendered document.
///
/// Every interacting call (`click`, `fill`, ...) is preceded by the session
/// with a `highlight` call; `highlight` is diagnostic only and never fails.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Navigate to an absolute URL
    async fn goto(&self, url: &str) -> E2eResult<()>;

    /// Navigate one entry back in session history
    async fn go_back(&self) -> E2eResult<()>;

    /// Current document URL
    async fn current_url(&self) -> E2eResult<String>;

    /// Click the nth matching element
    async fn click(&self, selector: &Selector, nth: usize) -> E2eResult<()>;

    /// Replace the value of the nth matching element
    async fn fill(&self, selector: &Selector, nth: usize, text: &str) -> E2eResult<()>;

    /// Type into the nth matching element one character at a time
    async fn type_text(
        &self,
        selector: &Selector,
        nth: usize,
        text: &str,
        per_key_delay: Duration,
    ) -> E2eResult<()>;

    /// Dispatch a keyboard key to the nth matching element
    async fn press_key(&self, selector: &Selector, nth: usize, key: &str) -> E2eResult<()>;

    /// Select the option with the given value on the nth matching element
    async fn select_option(&self, selector: &Selector, nth: usize, value: &str) -> E2eResult<()>;

    /// Rendered text of the nth matching element
    async fn inner_text(&self, selector: &Selector, nth: usize) -> E2eResult<String>;

    /// Whether the nth matching element exists and is visible. A selector
    /// matching nothing yields `false`, not a fault.
    async fn is_visible(&self, selector: &Selector, nth: usize) -> E2eResult<bool>;

    /// Number of elements matching the selector
    async fn count(&self, selector: &Selector) -> E2eResult<usize>;

    /// Apply a transient visual highlight to the nth matching element.
    /// Diagnostic instrumentation for recorded runs; never fails and never
    /// blocks meaningfully.
    async fn highlight(&self, selector: &Selector, nth: usize);
}

// ============================================================================
// Real CDP implementation (when the `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{async_trait, Backend, Duration, E2eResult, Selector};
    use crate::config::SuiteConfig;
    use crate::result::E2eError;
    use chromiumoxide::browser::{Browser, BrowserConfig};
    use chromiumoxide::page::Page;
    use futures::StreamExt;

    /// Duration of the transient highlight flash
    const HIGHLIGHT_MS: u64 = 300;

    /// Short pause after applying a highlight so it is observable in
    /// recorded runs
    const HIGHLIGHT_SETTLE_MS: u64 = 50;

    /// Backend driving a real Chromium page over CDP
    #[derive(Debug)]
    pub struct CdpBackend {
        browser: Browser,
        page: Page,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl CdpBackend {
        /// Launch a browser and open a blank page.
        ///
        /// # Errors
        ///
        /// Returns an error if the browser cannot be launched.
        pub async fn launch(config: &SuiteConfig) -> E2eResult<Self> {
            let mut builder = BrowserConfig::builder()
                .window_size(config.viewport_width, config.viewport_height)
                .no_sandbox();

            if !config.headless {
                builder = builder.with_head();
            }
            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let browser_config = builder.build().map_err(|e| E2eError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                Browser::launch(browser_config)
                    .await
                    .map_err(|e| E2eError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page =
                browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| E2eError::PageError {
                        message: e.to_string(),
                    })?;

            Ok(Self {
                browser,
                page,
                handle,
            })
        }

        /// Close the browser, releasing the underlying execution context
        pub async fn close(mut self) -> E2eResult<()> {
            self.browser
                .close()
                .await
                .map_err(|e| E2eError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> E2eResult<T> {
            let result = self
                .page
                .evaluate(expr)
                .await
                .map_err(|e| E2eError::interaction(e.to_string()))?;
            Ok(result.into_value()?)
        }

        /// Run an element-targeted action; the script must evaluate to
        /// `true` when the element was found and acted upon.
        async fn act(&self, selector: &Selector, script: String) -> E2eResult<()> {
            let found: bool = self.eval(script).await?;
            if found {
                Ok(())
            } else {
                Err(E2eError::interaction(format!(
                    "no element matched {selector}"
                )))
            }
        }
    }

    #[async_trait]
    impl Backend for CdpBackend {
        async fn goto(&self, url: &str) -> E2eResult<()> {
            self.page
                .goto(url)
                .await
                .map_err(|e| E2eError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn go_back(&self) -> E2eResult<()> {
            let _: Option<bool> = self.eval("history.back(); true".to_string()).await?;
            Ok(())
        }

        async fn current_url(&self) -> E2eResult<String> {
            let url = self.page.url().await.map_err(|e| E2eError::PageError {
                message: e.to_string(),
            })?;
            url.ok_or_else(|| E2eError::PageError {
                message: "page has no URL".to_string(),
            })
        }

        async fn click(&self, selector: &Selector, nth: usize) -> E2eResult<()> {
            let el = selector.to_nth_query(nth);
            self.act(
                selector,
                format!(
                    "(() => {{ const el = {el}; if (!el) return false; \
                     el.scrollIntoView({{block: 'center'}}); el.click(); return true; }})()"
                ),
            )
            .await
        }

        async fn fill(&self, selector: &Selector, nth: usize, text: &str) -> E2eResult<()> {
            let el = selector.to_nth_query(nth);
            self.act(
                selector,
                format!(
                    "(() => {{ const el = {el}; if (!el) return false; \
                     el.focus(); el.value = {text:?}; \
                     el.dispatchEvent(new Event('input', {{bubbles: true}})); \
                     el.dispatchEvent(new Event('change', {{bubbles: true}})); \
                     return true; }})()"
                ),
            )
            .await
        }

        async fn type_text(
            &self,
            selector: &Selector,
            nth: usize,
            text: &str,
            per_key_delay: Duration,
        ) -> E2eResult<()> {
            // One input event per character, matching how the application's
            // date widgets observe keystrokes.
            let el = selector.to_nth_query(nth);
            self.act(
                selector,
                format!(
                    "(() => {{ const el = {el}; if (!el) return false; \
                     el.focus(); el.value = ''; return true; }})()"
                ),
            )
            .await?;
            for ch in text.chars() {
                let script = format!(
                    "(() => {{ const el = {el}; if (!el) return false; \
                     el.value += {:?}; \
                     el.dispatchEvent(new Event('input', {{bubbles: true}})); \
                     return true; }})()",
                    ch.to_string()
                );
                self.act(selector, script).await?;
                tokio::time::sleep(per_key_delay).await;
            }
            Ok(())
        }

        async fn press_key(&self, selector: &Selector, nth: usize, key: &str) -> E2eResult<()> {
            let el = selector.to_nth_query(nth);
            self.act(
                selector,
                format!(
                    "(() => {{ const el = {el}; if (!el) return false; \
                     const opts = {{key: {key:?}, bubbles: true}}; \
                     el.dispatchEvent(new KeyboardEvent('keydown', opts)); \
                     el.dispatchEvent(new KeyboardEvent('keyup', opts)); \
                     return true; }})()"
                ),
            )
            .await
        }

        async fn select_option(
            &self,
            selector: &Selector,
            nth: usize,
            value: &str,
        ) -> E2eResult<()> {
            let el = selector.to_nth_query(nth);
            self.act(
                selector,
                format!(
                    "(() => {{ const el = {el}; if (!el) return false; \
                     el.value = {value:?}; \
                     if (el.selectedIndex === -1) return false; \
                     el.dispatchEvent(new Event('change', {{bubbles: true}})); \
                     return true; }})()"
                ),
            )
            .await
        }

        async fn inner_text(&self, selector: &Selector, nth: usize) -> E2eResult<String> {
            let el = selector.to_nth_query(nth);
            let text: Option<String> = self
                .eval(format!(
                    "(() => {{ const el = {el}; \
                     return el ? (el.innerText ?? el.textContent ?? '') : null; }})()"
                ))
                .await?;
            text.ok_or_else(|| {
                E2eError::interaction(format!("no element matched {selector} for text read"))
            })
        }

        async fn is_visible(&self, selector: &Selector, nth: usize) -> E2eResult<bool> {
            let el = selector.to_nth_query(nth);
            self.eval(format!(
                "(() => {{ const el = {el}; if (!el) return false; \
                 const rects = el.getClientRects(); \
                 return rects.length > 0 && \
                        getComputedStyle(el).visibility !== 'hidden'; }})()"
            ))
            .await
        }

        async fn count(&self, selector: &Selector) -> E2eResult<usize> {
            self.eval(selector.to_count_query()).await
        }

        async fn highlight(&self, selector: &Selector, nth: usize) {
            let el = selector.to_nth_query(nth);
            let script = format!(
                "(() => {{ const el = {el}; if (!el) return false; \
                 const prev = el.style.outline; \
                 el.style.outline = '3px solid #e74c3c'; \
                 setTimeout(() => {{ el.style.outline = prev; }}, {HIGHLIGHT_MS}); \
                 return true; }})()"
            );
            // Diagnostic only: a failed highlight must not fail the step.
            let _ = self.eval::<bool>(script).await;
            tokio::time::sleep(Duration::from_millis(HIGHLIGHT_SETTLE_MS)).await;
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpBackend;

// ============================================================================
// Scripted mock implementation (always available)
// ============================================================================

mod mock {
    use super::{async_trait, Backend, Duration, E2eResult, Selector};
    use crate::result::E2eError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Staged state of the elements matching one selector
    #[derive(Debug, Clone)]
    pub struct MockElement {
        /// Text per match, in document order; the length is the match count
        pub texts: Vec<String>,
        /// Whether the matches are visible
        pub visible: bool,
    }

    impl MockElement {
        /// Visible element(s) with the given texts
        #[must_use]
        pub fn visible(texts: &[&str]) -> Self {
            Self {
                texts: texts.iter().map(ToString::to_string).collect(),
                visible: true,
            }
        }

        /// Present but hidden element(s)
        #[must_use]
        pub fn hidden(texts: &[&str]) -> Self {
            Self {
                texts: texts.iter().map(ToString::to_string).collect(),
                visible: false,
            }
        }
    }

    /// One recorded interaction against the mock document
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum MockAction {
        /// Navigation to a URL
        Goto(String),
        /// History back
        GoBack,
        /// Click on `(target, nth)`
        Click {
            /// Selector key
            target: String,
            /// Match index
            nth: usize,
        },
        /// Value replacement
        Fill {
            /// Selector key
            target: String,
            /// Match index
            nth: usize,
            /// Text written
            text: String,
        },
        /// Character-by-character typing
        Type {
            /// Selector key
            target: String,
            /// Match index
            nth: usize,
            /// Text typed
            text: String,
        },
        /// Keyboard key dispatch
        Press {
            /// Selector key
            target: String,
            /// Match index
            nth: usize,
            /// Keyboard key
            key: String,
        },
        /// Option selection
        Select {
            /// Selector key
            target: String,
            /// Match index
            nth: usize,
            /// Option value
            value: String,
        },
    }

    #[derive(Debug, Default)]
    struct MockState {
        url: String,
        history: Vec<String>,
        elements: HashMap<String, MockElement>,
        journal: Vec<MockAction>,
    }

    /// Backend resolving elements from a staged state map.
    ///
    /// Tests stage the document state a scenario will observe, run the
    /// scenario, then inspect the interaction journal.
    #[derive(Debug, Default)]
    pub struct MockBackend {
        state: Mutex<MockState>,
    }

    impl MockBackend {
        /// Create an empty mock document
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Stage the elements matching a selector
        pub fn stage(&self, selector: &Selector, element: MockElement) {
            let mut state = self.state.lock().unwrap();
            let _ = state.elements.insert(selector.key(), element);
        }

        /// Stage visible element(s) with the given texts
        pub fn stage_visible(&self, selector: &Selector, texts: &[&str]) {
            self.stage(selector, MockElement::visible(texts));
        }

        /// Remove staged elements for a selector
        pub fn remove(&self, selector: &Selector) {
            let mut state = self.state.lock().unwrap();
            let _ = state.elements.remove(&selector.key());
        }

        /// Snapshot of the interaction journal
        #[must_use]
        pub fn journal(&self) -> Vec<MockAction> {
            self.state.lock().unwrap().journal.clone()
        }

        /// Values written to a selector via `fill` or `type_text`, in order
        #[must_use]
        pub fn written_values(&self, selector: &Selector) -> Vec<String> {
            let key = selector.key();
            self.journal()
                .into_iter()
                .filter_map(|action| match action {
                    MockAction::Fill { target, text, .. }
                    | MockAction::Type { target, text, .. }
                        if target == key =>
                    {
                        Some(text)
                    }
                    _ => None,
                })
                .collect()
        }

        /// Whether the selector was clicked at least once
        #[must_use]
        pub fn was_clicked(&self, selector: &Selector) -> bool {
            let key = selector.key();
            self.journal()
                .iter()
                .any(|action| matches!(action, MockAction::Click { target, .. } if *target == key))
        }

        fn record(&self, action: MockAction) {
            self.state.lock().unwrap().journal.push(action);
        }

        fn require_interactable(&self, selector: &Selector, nth: usize) -> E2eResult<()> {
            let state = self.state.lock().unwrap();
            match state.elements.get(&selector.key()) {
                Some(el) if nth < el.texts.len() && el.visible => Ok(()),
                Some(el) if nth < el.texts.len() => Err(E2eError::interaction(format!(
                    "element {selector} is not visible"
                ))),
                _ => Err(E2eError::interaction(format!(
                    "no element matched {selector}"
                ))),
            }
        }
    }

    #[async_trait]
    impl Backend for MockBackend {
        async fn goto(&self, url: &str) -> E2eResult<()> {
            let mut state = self.state.lock().unwrap();
            let previous = std::mem::replace(&mut state.url, url.to_string());
            state.history.push(previous);
            state.journal.push(MockAction::Goto(url.to_string()));
            Ok(())
        }

        async fn go_back(&self) -> E2eResult<()> {
            let mut state = self.state.lock().unwrap();
            if let Some(previous) = state.history.pop() {
                state.url = previous;
            }
            state.journal.push(MockAction::GoBack);
            Ok(())
        }

        async fn current_url(&self) -> E2eResult<String> {
            Ok(self.state.lock().unwrap().url.clone())
        }

        async fn click(&self, selector: &Selector, nth: usize) -> E2eResult<()> {
            self.require_interactable(selector, nth)?;
            self.record(MockAction::Click {
                target: selector.key(),
                nth,
            });
            Ok(())
        }

        async fn fill(&self, selector: &Selector, nth: usize, text: &str) -> E2eResult<()> {
            self.require_interactable(selector, nth)?;
            self.record(MockAction::Fill {
                target: selector.key(),
                nth,
                text: text.to_string(),
            });
            Ok(())
        }

        async fn type_text(
            &self,
            selector: &Selector,
            nth: usize,
            text: &str,
            _per_key_delay: Duration,
        ) -> E2eResult<()> {
            self.require_interactable(selector, nth)?;
            self.record(MockAction::Type {
                target: selector.key(),
                nth,
                text: text.to_string(),
            });
            Ok(())
        }

        async fn press_key(&self, selector: &Selector, nth: usize, key: &str) -> E2eResult<()> {
            self.require_interactable(selector, nth)?;
            self.record(MockAction::Press {
                target: selector.key(),
                nth,
                key: key.to_string(),
            });
            Ok(())
        }

        async fn select_option(
            &self,
            selector: &Selector,
            nth: usize,
            value: &str,
        ) -> E2eResult<()> {
            self.require_interactable(selector, nth)?;
            self.record(MockAction::Select {
                target: selector.key(),
                nth,
                value: value.to_string(),
            });
            Ok(())
        }

        async fn inner_text(&self, selector: &Selector, nth: usize) -> E2eResult<String> {
            let state = self.state.lock().unwrap();
            state
                .elements
                .get(&selector.key())
                .and_then(|el| el.texts.get(nth).cloned())
                .ok_or_else(|| {
                    E2eError::interaction(format!("no element matched {selector} for text read"))
                })
        }

        async fn is_visible(&self, selector: &Selector, nth: usize) -> E2eResult<bool> {
            let state = self.state.lock().unwrap();
            Ok(state
                .elements
                .get(&selector.key())
                .is_some_and(|el| el.visible && nth < el.texts.len()))
        }

        async fn count(&self, selector: &Selector) -> E2eResult<usize> {
            let state = self.state.lock().unwrap();
            Ok(state
                .elements
                .get(&selector.key())
                .map_or(0, |el| el.texts.len()))
        }

        async fn highlight(&self, _selector: &Selector, _nth: usize) {}
    }
}

pub use mock::{MockAction, MockBackend, MockElement};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Selector;
    use crate::result::E2eError;

    mod mock_backend_tests {
        use super::*;

        #[tokio::test]
        async fn test_click_missing_element_is_interaction_fault() {
            let backend = MockBackend::new();
            let err = backend
                .click(&Selector::css("#login"), 0)
                .await
                .unwrap_err();
            assert!(matches!(err, E2eError::InteractionFault { .. }));
        }

        #[tokio::test]
        async fn test_click_hidden_element_is_interaction_fault() {
            let backend = MockBackend::new();
            let sel = Selector::css("#login");
            backend.stage(&sel, MockElement::hidden(&["Login"]));
            assert!(backend.click(&sel, 0).await.is_err());
        }

        #[tokio::test]
        async fn test_visibility_of_missing_element_is_false_not_fault() {
            let backend = MockBackend::new();
            let visible = backend
                .is_visible(&Selector::css("#nothing"), 0)
                .await
                .unwrap();
            assert!(!visible);
        }

        #[tokio::test]
        async fn test_count_of_missing_selector_is_zero() {
            let backend = MockBackend::new();
            assert_eq!(backend.count(&Selector::css(".row")).await.unwrap(), 0);
        }

        #[tokio::test]
        async fn test_nth_text_in_document_order() {
            let backend = MockBackend::new();
            let sel = Selector::xpath("//div[@col-id='ShortName']");
            backend.stage_visible(&sel, &["John Doe", "Mary Roe"]);
            assert_eq!(backend.inner_text(&sel, 1).await.unwrap(), "Mary Roe");
            assert_eq!(backend.count(&sel).await.unwrap(), 2);
        }

        #[tokio::test]
        async fn test_journal_records_fill_and_click() {
            let backend = MockBackend::new();
            let input = Selector::css("#username_id");
            let button = Selector::css("#login");
            backend.stage_visible(&input, &[""]);
            backend.stage_visible(&button, &["Login"]);

            backend.fill(&input, 0, "admin").await.unwrap();
            backend.click(&button, 0).await.unwrap();

            assert_eq!(backend.written_values(&input), vec!["admin".to_string()]);
            assert!(backend.was_clicked(&button));
        }

        #[tokio::test]
        async fn test_navigation_history() {
            let backend = MockBackend::new();
            backend.goto("http://hms.local/#/Dashboard").await.unwrap();
            backend
                .goto("http://hms.local/#/ClaimManagement")
                .await
                .unwrap();
            backend.go_back().await.unwrap();
            assert_eq!(
                backend.current_url().await.unwrap(),
                "http://hms.local/#/Dashboard"
            );
        }

        #[tokio::test]
        async fn test_highlight_never_fails_on_missing_element() {
            let backend = MockBackend::new();
            backend.highlight(&Selector::css("#ghost"), 0).await;
        }
    }
}
