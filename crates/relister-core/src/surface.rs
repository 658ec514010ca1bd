//! The contract between the listing engine and whatever drives the browser.
//!
//! The engine only ever talks to an [`AutomationSurface`]; the real
//! implementation lives in `relister-browser`, tests use a scripted fake.

use crate::Result;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// How an element is found on the page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// CSS selector
    Css(String),
    /// Structural path query (XPath)
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(path: impl Into<String>) -> Self {
        Locator::XPath(path.into())
    }

    /// A `<span>` whose text is exactly `text`
    pub fn span_text(text: &str) -> Self {
        Locator::XPath(format!("//span[text()={}]", xpath_literal(text)))
    }

    /// An auto-direction `<span>` whose text is exactly `text`
    pub fn auto_span_text(text: &str) -> Self {
        Locator::XPath(format!(
            "//span[@dir=\"auto\"][text()={}]",
            xpath_literal(text)
        ))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Locator::Css(s) | Locator::XPath(s) => s,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css:{}", s),
            Locator::XPath(s) => write!(f, "xpath:{}", s),
        }
    }
}

/// Quote `text` as an XPath string literal
///
/// XPath 1.0 has no escape sequences, so text holding both quote kinds is
/// assembled with `concat()`.
pub fn xpath_literal(text: &str) -> String {
    if !text.contains('"') {
        return format!("\"{}\"", text);
    }
    if !text.contains('\'') {
        return format!("'{}'", text);
    }

    let parts: Vec<String> = text
        .split('"')
        .map(|part| format!("\"{}\"", part))
        .collect();
    format!("concat({})", parts.join(", '\"', "))
}

/// Escape `value` for use inside a double-quoted CSS attribute selector
pub fn css_attr_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Browser-driving primitives the engine is built on
///
/// Interaction methods (`click`, `send_keys`, `clear_text`, `upload_files`,
/// `scroll_into_view`) wait up to the surface's own element timeout for the
/// element and fail with [`crate::Error::ElementNotFound`] if it never shows.
#[async_trait]
pub trait AutomationSurface: Send + Sync {
    /// Poll for an element until it exists or `timeout` elapses.
    ///
    /// Returns `Ok(false)` for a missing optional element; a missing required
    /// element is an `ElementNotFound` error.
    async fn find_element(&self, locator: &Locator, required: bool, timeout: Duration)
    -> Result<bool>;

    async fn click(&self, locator: &Locator) -> Result<()>;

    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()>;

    async fn clear_text(&self, locator: &Locator) -> Result<()>;

    /// Attach files to a file input; `paths` is newline separated
    async fn upload_files(&self, locator: &Locator, paths: &str) -> Result<()>;

    async fn scroll_into_view(&self, locator: &Locator) -> Result<()>;

    async fn wait_until_present(&self, locator: &Locator, timeout: Duration) -> Result<()>;

    /// Wait for an element to disappear or become hidden.
    ///
    /// Returns `Ok(false)` if it is still visible when `timeout` elapses.
    async fn wait_until_invisible(&self, locator: &Locator, timeout: Duration) -> Result<bool>;

    async fn navigate(&self, url: &str) -> Result<()>;
}
