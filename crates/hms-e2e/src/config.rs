//! Suite configuration.
//!
//! Where the application under test lives, how the browser is launched,
//! and where the parameter workbook sits. Values come from the builder or
//! from the environment (`HMS_BASE_URL`, `HMS_HEADLESS`, `CHROMIUM_PATH`,
//! `HMS_WORKBOOK_DIR`).

use std::path::PathBuf;

/// Configuration for a suite run
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Base URL of the hospital information system deployment
    pub base_url: String,
    /// Run the browser in headless mode
    pub headless: bool,
    /// Chromium executable override (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Directory holding the parameter workbook sheets
    pub workbook_dir: PathBuf,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9999".to_string(),
            headless: true,
            chromium_path: None,
            workbook_dir: PathBuf::from("fixtures"),
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }
}

impl SuiteConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the environment, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("HMS_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(headless) = std::env::var("HMS_HEADLESS") {
            config.headless = !matches!(headless.as_str(), "0" | "false" | "no");
        }
        if let Ok(path) = std::env::var("CHROMIUM_PATH") {
            config.chromium_path = Some(path);
        }
        if let Ok(dir) = std::env::var("HMS_WORKBOOK_DIR") {
            config.workbook_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the chromium executable path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set the workbook directory
    #[must_use]
    pub fn with_workbook_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workbook_dir = dir.into();
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert!(config.headless);
        assert!(config.chromium_path.is_none());
        assert_eq!(config.workbook_dir, PathBuf::from("fixtures"));
    }

    #[test]
    fn test_builder_chain() {
        let config = SuiteConfig::new()
            .with_base_url("https://hms.example.org")
            .with_headless(false)
            .with_viewport(1280, 720)
            .with_workbook_dir("data");
        assert_eq!(config.base_url, "https://hms.example.org");
        assert!(!config.headless);
        assert_eq!(config.viewport_width, 1280);
        assert_eq!(config.workbook_dir, PathBuf::from("data"));
    }
}
