// src/fetch/browser.rs
//
// Headless Chrome render session. The widget fills its region with script
// after page load, so each page is polled until the region has rows.

use anyhow::{anyhow, Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::{wait_for_widget, RenderOptions, Renderer};
use crate::normalize::RawMatrix;

pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    opts: RenderOptions,
}

impl BrowserSession {
    /// Launch one headless browser for the whole run.
    pub async fn open(opts: RenderOptions) -> Result<Self> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(opts.timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg(format!("--user-agent={}", opts.user_agent))
            .build()
            .map_err(|e| anyhow!("building browser config: {e}"))?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .context("launching headless browser")?;
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "browser handler event error");
                }
            }
        });
        debug!(selector = %opts.widget_selector, timeout = ?opts.timeout, "browser session opened");
        Ok(Self {
            browser,
            handler,
            opts,
        })
    }

    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "closing browser");
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
        debug!("browser session closed");
    }
}

impl Renderer for BrowserSession {
    #[instrument(level = "info", skip(self))]
    async fn render(&self, url: &str) -> Result<RawMatrix> {
        let page = self
            .browser
            .new_page(url)
            .await
            .with_context(|| format!("opening {}", url))?;

        let snapshot = {
            let page = &page;
            move || async move { page.content().await.context("reading page content") }
        };
        let matrix = wait_for_widget(&self.opts, url, snapshot).await;

        if let Err(e) = page.close().await {
            debug!(error = %e, "closing page");
        }
        let matrix = matrix?;
        info!(rows = matrix.len(), "widget rendered");
        Ok(matrix)
    }
}
