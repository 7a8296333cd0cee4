//! Locator abstraction for element selection.
//!
//! A [`Locator`] is an opaque, lazily-resolved reference to the elements
//! matching a selector expression. Locators are cheap value types: page
//! objects build them eagerly at construction time and an invalid selector
//! surfaces only when first used against a live session. A selector may
//! match several elements in document order; `first()`/`nth()` narrow the
//! target without re-resolving.

use std::time::Duration;

use crate::result::{E2eError, E2eResult};

/// Default timeout for auto-waiting interactions (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval for condition-based waits (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., `a[href="#/Dispensary"]`)
    Css(String),
    /// XPath selector (e.g., `//button[contains(text(),'OK')]`)
    XPath(String),
    /// Text content selector (matches any element containing the text)
    Text(String),
    /// CSS selector narrowed to elements containing the given text
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// JavaScript expression evaluating to the array of matching elements,
    /// in document order
    #[must_use]
    pub fn to_all_query(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::XPath(s) => format!(
                "(() => {{ const r = document.evaluate({s:?}, document, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                 const out = []; \
                 for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); \
                 return out; }})()"
            ),
            Self::Text(t) => format!(
                "Array.from(document.querySelectorAll('*')).filter(el => el.textContent.includes({t:?}))"
            ),
            Self::CssWithText { css, text } => format!(
                "Array.from(document.querySelectorAll({css:?})).filter(el => el.textContent.includes({text:?}))"
            ),
        }
    }

    /// JavaScript expression evaluating to the nth matching element (or null)
    #[must_use]
    pub fn to_nth_query(&self, nth: usize) -> String {
        format!("({})[{nth}]", self.to_all_query())
    }

    /// JavaScript expression evaluating to the number of matching elements
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("({}).length", self.to_all_query())
    }

    /// Canonical key for this selector. The scripted mock backend resolves
    /// elements by this key; the CDP backend never uses it.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Css(s) => format!("css:{s}"),
            Self::XPath(s) => format!("xpath:{s}"),
            Self::Text(t) => format!("text:{t}"),
            Self::CssWithText { css, text } => format!("css:{css}::text:{text}"),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Locator options for customizing wait behavior
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Timeout budget for auto-waiting
    pub timeout: Duration,
    /// Polling interval for condition-based waits
    pub poll_interval: Duration,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// A locator for finding and interacting with elements.
///
/// Resolution is lazy: nothing is validated at construction time.
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    nth: usize,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator with a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::css(selector))
    }

    /// Create a locator with an XPath selector
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::from_selector(Selector::xpath(expr))
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            nth: 0,
            options: LocatorOptions::default(),
        }
    }

    /// Narrow to the first matching element (the default)
    #[must_use]
    pub const fn first(mut self) -> Self {
        self.nth = 0;
        self
    }

    /// Narrow to the nth matching element, in document order
    #[must_use]
    pub const fn nth(mut self, index: usize) -> Self {
        self.nth = index;
        self
    }

    /// Set a custom wait budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the element index this locator targets
    #[must_use]
    pub const fn index(&self) -> usize {
        self.nth
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.nth == 0 {
            write!(f, "{}", self.selector)
        } else {
            write!(f, "{}[{}]", self.selector, self.nth)
        }
    }
}

/// Text expectation against an element's content.
///
/// The application under test is deliberately inconsistent about this:
/// some fields echo input verbatim (exact equality), others embed it in a
/// longer confirmation message (containment). Each scenario preserves the
/// policy the field actually has, so both forms live here side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextExpectation {
    /// Full text equality after trimming
    Exact(String),
    /// Substring containment
    Contains(String),
}

impl TextExpectation {
    /// Check the expectation against observed text
    pub fn check(&self, actual: &str) -> E2eResult<()> {
        match self {
            Self::Exact(expected) => {
                if actual.trim() == expected {
                    Ok(())
                } else {
                    Err(E2eError::assertion(format!(
                        "expected text '{expected}' but got '{}'",
                        actual.trim()
                    )))
                }
            }
            Self::Contains(expected) => {
                if actual.contains(expected.as_str()) {
                    Ok(())
                } else {
                    Err(E2eError::assertion(format!(
                        "expected text to contain '{expected}' but got '{actual}'"
                    )))
                }
            }
        }
    }
}
