use crate::{Error, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

const CONNECT_ATTEMPTS: u32 = 10;
const CONNECT_BACKOFF: Duration = Duration::from_millis(500);

/// A DevTools connection to a running Chrome and the tab it drives
pub struct CdpSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl CdpSession {
    /// Attach to Chrome's debugging port, retrying while it starts up
    pub async fn connect(debugging_port: u16) -> Result<Self> {
        let endpoint = format!("http://localhost:{}", debugging_port);
        tracing::info!("Connecting to Chrome on port {}", debugging_port);

        let mut attempt = 1;
        let (browser, mut handler) = loop {
            tracing::debug!("CDP connection attempt {} to {}", attempt, endpoint);
            match Browser::connect(&endpoint).await {
                Ok(connected) => break connected,
                Err(e) if attempt < CONNECT_ATTEMPTS => {
                    tracing::debug!("Chrome not ready yet: {}", e);
                    attempt += 1;
                    tokio::time::sleep(CONNECT_BACKOFF).await;
                }
                Err(e) => {
                    return Err(Error::Cdp(format!(
                        "Failed to connect to Chrome after {} attempts: {}",
                        CONNECT_ATTEMPTS, e
                    )));
                }
            }
        };

        // Commands only complete while the handler is being polled
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        tokio::time::sleep(CONNECT_BACKOFF).await;
        let page = match browser.pages().await?.into_iter().next() {
            Some(page) => page,
            None => {
                tracing::debug!("No open tab, creating one");
                browser.new_page("about:blank").await?
            }
        };

        tracing::info!("CDP session established");
        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the browser and stop the event handler
    pub async fn close(mut self) -> Result<()> {
        let closed = self.browser.close().await;
        self.handler.abort();
        closed?;
        Ok(())
    }
}
