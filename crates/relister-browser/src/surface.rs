use crate::Error;
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use relister_core::{AutomationSurface, Locator, Result, Timeouts};
use std::time::{Duration, Instant};

// React ignores `this.value` writes; the value is reset through the
// prototype setter before the input event fires.
const CLEAR_VALUE_JS: &str = "function() {
    this.focus();
    const proto = this instanceof HTMLTextAreaElement
        ? HTMLTextAreaElement.prototype
        : HTMLInputElement.prototype;
    Object.getOwnPropertyDescriptor(proto, 'value').set.call(this, '');
    this.dispatchEvent(new Event('input', { bubbles: true }));
}";

const IS_VISIBLE_JS: &str = "function() {
    const rect = this.getBoundingClientRect();
    const style = window.getComputedStyle(this);
    return rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden' && style.display !== 'none';
}";

fn cdp(err: CdpError) -> relister_core::Error {
    Error::from(err).into()
}

/// Newline-separated upload list as individual paths
fn split_paths(paths: &str) -> Vec<String> {
    paths
        .lines()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// [`AutomationSurface`] over a live Chrome tab
///
/// Lookups poll the DOM every `poll_interval` until they succeed or their
/// timeout runs out. Interactions wait up to the element timeout.
pub struct CdpSurface {
    page: Page,
    element_timeout: Duration,
    poll_interval: Duration,
}

impl CdpSurface {
    pub fn new(page: Page, timeouts: &Timeouts) -> Self {
        Self {
            page,
            element_timeout: timeouts.element,
            poll_interval: timeouts.poll_interval,
        }
    }

    async fn query(&self, locator: &Locator) -> Option<Element> {
        let found = match locator {
            Locator::Css(selector) => self.page.find_element(selector.as_str()).await,
            Locator::XPath(path) => self.page.find_xpath(path.as_str()).await,
        };
        match found {
            Ok(element) => Some(element),
            Err(e) => {
                tracing::trace!("{} not found yet: {}", locator, e);
                None
            }
        }
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Option<Element> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(element) = self.query(locator).await {
                return Some(element);
            }
            if Instant::now() >= deadline {
                return None;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn require(&self, locator: &Locator) -> Result<Element> {
        self.wait_for(locator, self.element_timeout)
            .await
            .ok_or_else(|| relister_core::Error::ElementNotFound {
                locator: locator.to_string(),
                waited: self.element_timeout,
            })
    }

    async fn is_visible(&self, element: &Element) -> bool {
        match element.call_js_fn(IS_VISIBLE_JS, false).await {
            Ok(returns) => returns
                .result
                .value
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            // A detached node is no longer on screen
            Err(_) => false,
        }
    }
}

#[async_trait]
impl AutomationSurface for CdpSurface {
    async fn find_element(&self, locator: &Locator, required: bool, timeout: Duration) -> Result<bool> {
        tracing::debug!("find {} (required: {}, {:?})", locator, required, timeout);
        match self.wait_for(locator, timeout).await {
            Some(_) => Ok(true),
            None if required => Err(relister_core::Error::ElementNotFound {
                locator: locator.to_string(),
                waited: timeout,
            }),
            None => Ok(false),
        }
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        tracing::debug!("click {}", locator);
        let element = self.require(locator).await?;
        element.click().await.map_err(cdp)?;
        Ok(())
    }

    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()> {
        tracing::debug!("type into {}", locator);
        let element = self.require(locator).await?;
        element.click().await.map_err(cdp)?;
        element.type_str(text).await.map_err(cdp)?;
        Ok(())
    }

    async fn clear_text(&self, locator: &Locator) -> Result<()> {
        tracing::debug!("clear {}", locator);
        let element = self.require(locator).await?;
        element.call_js_fn(CLEAR_VALUE_JS, false).await.map_err(cdp)?;
        Ok(())
    }

    async fn upload_files(&self, locator: &Locator, paths: &str) -> Result<()> {
        let files = split_paths(paths);
        tracing::debug!("upload {} files to {}", files.len(), locator);

        let element = self.require(locator).await?;
        let mut params = SetFileInputFilesParams::new(files);
        params.backend_node_id = Some(element.backend_node_id.clone());
        self.page.execute(params).await.map_err(cdp)?;
        Ok(())
    }

    async fn scroll_into_view(&self, locator: &Locator) -> Result<()> {
        tracing::debug!("scroll to {}", locator);
        let element = self.require(locator).await?;
        element.scroll_into_view().await.map_err(cdp)?;
        Ok(())
    }

    async fn wait_until_present(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        self.find_element(locator, true, timeout).await.map(|_| ())
    }

    async fn wait_until_invisible(&self, locator: &Locator, timeout: Duration) -> Result<bool> {
        tracing::debug!("wait for {} to disappear ({:?})", locator, timeout);
        let deadline = Instant::now() + timeout;
        loop {
            match self.query(locator).await {
                None => return Ok(true),
                Some(element) if !self.is_visible(&element).await => return Ok(true),
                Some(_) => {}
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!("navigate to {}", url);
        self.page.goto(url).await.map_err(cdp)?;
        Ok(())
    }
}
